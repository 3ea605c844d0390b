pub mod dto;
pub mod http_client;
#[cfg(feature = "server")]
pub mod server;
pub mod store;
