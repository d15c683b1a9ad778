// sherpa/src/error.rs

use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Error taxonomy for wizard definition and execution.
///
/// Two variants are sentinels rather than failures: [`WizardError::UserAborted`]
/// (the user voluntarily cancelled) and [`WizardError::StepNotImplemented`]
/// (a step variant has no behavior yet, tolerated by the engine). Callers
/// should test for them with [`WizardError::is_user_abort`] and
/// [`WizardError::is_not_implemented`] instead of matching display strings.
#[derive(Debug, Error)]
pub enum WizardError {
  #[error("user aborted")]
  UserAborted,

  #[error("step '{step_id}' ({step_type}) is not implemented")]
  StepNotImplemented { step_id: String, step_type: String },

  #[error("invalid wizard definition: {message}")]
  Definition { message: String },

  #[error("configuration error for step '{step_id}': {message}")]
  Configuration { step_id: String, message: String },

  #[error("callback '{name}' failed for step '{step_id}'. Source: {source}")]
  Callback {
    step_id: String,
    name: String,
    #[source]
    source: AnyhowError,
  },

  #[error("condition '{expression}' failed to evaluate: {message}")]
  Condition { expression: String, message: String },

  #[error("condition '{expression}' did not return a boolean")]
  ConditionNotBoolean { expression: String },

  #[error("navigation target '{target}' from step '{step_id}' does not match any step")]
  NavigationTarget { step_id: String, target: String },

  #[error("error executing step '{step_id}' ({step_type}). Source: {source}")]
  StepFailed {
    step_id: String,
    step_type: String,
    #[source]
    source: AnyhowError,
  },

  #[error("could not parse wizard document: {0}")]
  Parse(#[from] serde_yaml::Error),

  #[error("could not read wizard file '{path}': {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("error in user-provided callback or external operation. Source: {source}")]
  External {
    #[source]
    source: AnyhowError,
  },
}

impl WizardError {
  /// True for the distinguished user-cancellation sentinel.
  pub fn is_user_abort(&self) -> bool {
    matches!(self, WizardError::UserAborted)
  }

  /// True for the distinguished not-implemented sentinel.
  pub fn is_not_implemented(&self) -> bool {
    matches!(self, WizardError::StepNotImplemented { .. })
  }
}

// User callbacks return anyhow::Error. If such an error is (or wraps) a
// WizardError, recover it so the sentinel classifications survive the trip
// through user code; otherwise wrap it as an external failure.
impl From<AnyhowError> for WizardError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<WizardError>() {
      Ok(wizard_err) => wizard_err,
      Err(other) => WizardError::External { source: other },
    }
  }
}

pub type WizardResult<T, E = WizardError> = std::result::Result<T, E>;
