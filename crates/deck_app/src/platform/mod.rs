mod app;
mod config;
mod convert;
mod effects;
mod logging;
mod persistence;
mod ui;

pub use app::run_app;
