//! Framework primitives the demos are built from
//!
//! - `reducer`: pure state transitions, optionally persisted
//! - `debounce`: settle a value after a quiet period
//! - `memo`: cache a computation keyed by its dependencies
//!
//! Time is always passed in explicitly (milliseconds), so every primitive
//! is deterministic and testable without a clock.

pub mod debounce;
pub mod memo;
pub mod reducer;

pub use debounce::Debounce;
pub use memo::Memo;
pub use reducer::{Reducer, reduce_persisted};
