//! Shared build trigger primitives.
//!
//! This crate owns the fixed build project identity and the request/response
//! contract exchanged with the build service. It intentionally excludes AWS SDK
//! and Lambda runtime concerns.

pub mod contract;
