//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and filters them by the
//! state a [`blockfall_core::GameSnapshot`] reports, so a host loop can forward whatever
//! comes out straight to the session. Independent of any rendering framework.

pub mod map;

pub use blockfall_types as types;

pub use map::{action_allowed, handle_key_event, map_key, should_quit};
