mod server;

pub use server::{FileConfig, ServerConfig};
