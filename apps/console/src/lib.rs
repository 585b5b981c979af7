pub mod config;
pub mod input;
pub mod main_lib;
pub mod view;

pub use config::{Config, LogFormat};
pub use main_lib::{init_tracing, run};
