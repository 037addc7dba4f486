mod client;
mod service;

pub use service::{ConfigError, Service};
