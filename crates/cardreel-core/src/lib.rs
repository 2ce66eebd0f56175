//! Cardreel Core - Clip sequencing and loudness balancing for card compilations

pub mod config;
pub mod error;
pub mod loudness;
pub mod plan;
pub mod sequence;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::*;
