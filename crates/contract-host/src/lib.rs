//! Host-side call boundary for a deterministic smart-contract execution engine.
//!
//! A running contract reaches the blockchain state only through a [`HostApi`]. Every operation
//! is metered through the frame's [`GasMeter`]; nested calls and deploys derive a child
//! [`HostEnv`], run the opaque [`Executor`] against it with a fresh meter, and fold the child
//! back into its parent only when the invocation succeeds. Each invocation is reported as a
//! bounded [`ActionResult`] tree.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod constants;

mod api;
pub use api::*;

mod args;
pub use args::*;

mod config;
pub use config::*;

mod dispatch;
pub use dispatch::*;

mod error;
pub use error::*;

mod executor;
pub use executor::*;

mod gas;
pub use gas::*;

mod host;
pub use host::*;

mod recorder;
pub use recorder::*;

mod state;
pub use state::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

mod types;
pub use types::*;
