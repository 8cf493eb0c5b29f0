// Adapters layer: concrete implementations for external systems (destination http client, inbound server).

pub mod http;
pub mod server;

pub use http::HttpDestination;
