pub mod config;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod schemas;
pub mod test_helpers;
pub mod utils;

pub mod app;

pub use app::{AppState, create_app};
