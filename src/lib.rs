pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod services;

pub use config::Config;
pub use error::{WatchdogError, WatchdogResult};
pub use services::*;
