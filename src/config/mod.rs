//! Configuration loading and management for the payroll engine.
//!
//! This module loads the YAML file that locates the data files, sets the
//! date and time formats they use, and configures the server and logging.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Listening on {}", config.config().server.bind);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_CONFIG_PATH, DataSources, FormatConfig, LoggingConfig, PayrollConfig, ServerConfig,
};
