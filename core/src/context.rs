// sherpa/src/context.rs

//! Per-invocation context handed to callbacks and step executors.

/// Identifies the wizard run position on whose behalf a callback or executor
/// is being invoked.
///
/// Cancellation follows the Rust async model: dropping the future returned by
/// [`crate::Wizard::run`] cancels whatever await is in flight. There is no
/// separate timeout layer in the core; callbacks that need deadlines apply
/// their own.
#[derive(Debug, Clone)]
pub struct WizardContext {
  pub wizard_name: String,
  pub step_id: String,
  pub step_index: usize,
  pub step_count: usize,
}
