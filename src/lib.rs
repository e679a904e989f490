pub mod config;
pub mod main_module;
pub mod shared;
pub mod tasks;

pub use main_module::{build_app_state, build_router, run_axum_server};
