//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as `blockfall::{core, adapter, term, input, types}`
//! and hosts the runtime configuration shared by the binaries.

pub mod config;
pub mod logging;

pub use blockfall_adapter as adapter;
pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
