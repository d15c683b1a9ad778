// sherpa/src/wizard/mod.rs

//! The wizard engine: the declarative document model and the step-sequencing
//! execution loop.

pub mod definition;
pub mod execution;

pub use definition::Wizard;

/// Outcome of a full wizard run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
  /// The step index ran off the end of the step list.
  Completed,
  /// The user voluntarily cancelled. Not a failure; the accumulated state is
  /// still available through the caller's `StateData` handle.
  Aborted,
}
