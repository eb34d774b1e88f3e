//! AWS-oriented adapters and handlers for the build trigger function.
//!
//! This crate owns runtime integration details (the Lambda handler and the
//! build service seam). The CodeBuild client itself lives in the binary so the
//! handler can be exercised without AWS credentials.

pub mod adapters;
pub mod handlers;
