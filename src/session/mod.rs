//! Per-connection navigation.
//!
//! A session starts on the headline view of the default feed and moves
//! between views on each submitted page until an exit key is pressed or the
//! terminal goes away.

pub mod machine;
pub mod runner;
pub mod state;

pub use machine::{HeadlineAction, PickerAction, StateMachine};
pub use runner::run_session;
pub use state::{PickerKind, SessionState, View, ViewResult};
