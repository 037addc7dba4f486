pub mod dto;
mod handlers;
pub mod routes;

pub use routes::router;
