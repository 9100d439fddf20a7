//! Test utilities for the contract host.

mod contracts;
mod executor;
mod host;

pub use contracts::*;
pub use executor::*;
pub use host::*;
