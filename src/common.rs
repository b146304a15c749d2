//! Common utilities module
//!
//! This module contains shared utilities used across the CCD test kit.

pub mod error;

pub use error::{CcdError, Result};
