//! HTTP Layer - 订阅源与单集音频路由

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::{create_routes, EPISODE_PATH, RSS_PATH};
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
