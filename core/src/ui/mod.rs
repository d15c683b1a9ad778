// sherpa/src/ui/mod.rs

//! The rendering seam between the engine and whatever front end presents the
//! wizard. The engine only ever talks to [`WizardUi`]; the bundled
//! [`ConsoleUi`] is one implementation, and tests drive scripted ones.

pub mod console;

pub use console::ConsoleUi;

use crate::context::WizardContext;
use crate::error::WizardResult;
use crate::state::WizardState;
use crate::step::form::Form;
use async_trait::async_trait;

/// Rendering collaborator consumed by the step executors.
///
/// Implementations MUST surface voluntary user cancellation as
/// [`crate::WizardError::UserAborted`] so the engine can distinguish it from
/// hard failures. An implementation that cannot render a given surface may
/// return [`crate::WizardError::StepNotImplemented`], which the engine
/// tolerates (warn + continue).
#[async_trait]
pub trait WizardUi: Send + Sync {
  /// Renders the form and collects one value per keyed field. The current
  /// state is provided so fields can be pre-populated.
  async fn run_form(
    &self,
    ctx: &WizardContext,
    form: &Form,
    state: &WizardState,
  ) -> WizardResult<WizardState>;

  /// Presents `choices` and returns exactly one chosen value.
  async fn select(&self, ctx: &WizardContext, prompt: &str, choices: &[String]) -> WizardResult<String>;

  /// Displays a dismissable note (info and summary steps, action completion).
  async fn show_note(&self, title: &str, body: &str) -> WizardResult<()>;

  /// Displays a transient, non-blocking progress notice. Best effort: the
  /// default implementation does nothing.
  fn show_progress(&self, _title: &str, _body: &str) {}
}
