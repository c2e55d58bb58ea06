//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace members under stable module names so hosts can depend on a
//! single package:
//!
//! - [`types`]: constants and plain data shared by every crate
//! - [`core`]: board, pieces, rules and the [`core::GameSession`] controller
//! - [`input`]: crossterm key mapping with state-aware filtering
//! - [`runtime`]: tokio driver, real-time scheduler and tracing setup

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_runtime as runtime;
pub use blockfall_types as types;
