//! Configuration module

mod server;

pub use server::ServerConfig;
pub use server::DEFAULT_CONFIG_FILE;
