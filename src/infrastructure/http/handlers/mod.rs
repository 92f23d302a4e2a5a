//! HTTP Handlers

mod episode;
mod feed;
mod index;
mod ping;

pub use episode::*;
pub use feed::*;
pub use index::*;
pub use ping::*;
