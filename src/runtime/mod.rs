//! The standalone hyper runtime for GraphQL views.

mod config;
mod server;

pub use config::ServerConfig;
pub use server::HttpServer;
