//! Scanner configuration domain model.

pub mod scanner_config;

pub use scanner_config::ScannerConfig;
