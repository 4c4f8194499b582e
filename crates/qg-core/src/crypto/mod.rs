//! Cryptographic helpers for the scan domain.

pub mod code_prefix;
