//! The three-step upload, configure and generate flow.

pub mod action;
pub mod reducer;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;

pub use action::{Action, Effect, Notice};
pub use reducer::{reduce, Transition};
pub use session::{Completion, SessionEvent, WorkflowSession};
pub use state::{
    OutputState, SelectedSample, WorkflowState, GENERATION_FAILED_MESSAGE, SAMPLE_PHRASES,
};
