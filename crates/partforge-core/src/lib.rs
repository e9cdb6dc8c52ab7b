//! partforge core library
//!
//! This crate provides the error handling and the small value types
//! (vectors, quaternions, colors, bounds, matrices) shared by the scene
//! model and the exporter.

pub mod error;
pub mod types;

pub use error::{Error, Result, ResultExt};
pub use types::*;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::error::{Error, Result, ResultExt};
    pub use crate::types::*;
}
