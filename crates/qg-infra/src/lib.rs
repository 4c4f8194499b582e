//! # qg-infra
//!
//! Infrastructure adapters for qrgate: implementations of the core ports
//! against real backends.

pub mod http;

pub use http::HttpRegistrationClient;
