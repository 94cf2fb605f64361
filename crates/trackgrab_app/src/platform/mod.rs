mod app;
mod cli;
mod config;
mod logging;
mod navigate;
mod render;

pub use app::run_app;
