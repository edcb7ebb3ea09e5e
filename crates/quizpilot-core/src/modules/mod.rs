//! Process-level services: data directory, config file, credential store, logging.

pub mod config;
pub mod credential;
pub mod logger;
pub mod paths;

pub use paths::get_data_dir;
