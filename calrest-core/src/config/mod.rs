//! Configuration types for calrest.

mod server_config;

pub use server_config::ServerConfig;
