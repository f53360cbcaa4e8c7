mod dto;
pub mod global;
mod middlewares;
pub mod routes;

pub use global::{AppConfig, AppContext};
