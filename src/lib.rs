pub mod app;
pub mod charts;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod records;
pub mod report;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;
pub mod views;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
