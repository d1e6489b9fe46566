pub mod fixtures;
pub mod harness;
pub mod http_client;
