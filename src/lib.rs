pub mod auth;
pub mod cache;
pub mod config;
pub mod content;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod mutations;
pub mod routes;
pub mod state;
pub mod storage;
pub mod types;

pub use routes::app;
pub use state::AppState;
