//! The `utils` module provides the pieces shared by every sample program:
//! the crate error type and logging setup.

pub mod error;
pub mod logging;

pub use error::{Result, SampleError};
