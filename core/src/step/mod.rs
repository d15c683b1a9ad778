// sherpa/src/step/mod.rs

//! The polymorphic step model: common metadata shared by every step plus a
//! closed tagged union over the five concrete step kinds, dispatched through
//! one exhaustive match. An unknown `type` tag is a load-time (deserialize)
//! error rather than a runtime surprise.

pub mod action;
pub mod decision;
pub mod form;
pub mod info;
pub mod summary;

pub use action::ActionStep;
pub use decision::DecisionStep;
pub use form::{Field, FieldOption, FieldValidation, Form, FormGroup, FormStep};
pub use info::InfoStep;
pub use summary::{SummarySection, SummaryStep};

use crate::context::WizardContext;
use crate::error::WizardResult;
use crate::registry::CallbackRegistry;
use crate::state::{StateData, WizardState};
use crate::ui::WizardUi;
use serde::{Deserialize, Serialize};

/// Common metadata carried by every step kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepMeta {
  pub id: String,

  #[serde(default)]
  pub title: String,

  #[serde(default)]
  pub description: String,

  /// Boolean expression gating whether the step executes at all.
  /// Empty means "never skip".
  #[serde(default)]
  pub skip_condition: String,

  /// Static navigation hint; also written by the decision executor as its
  /// recorded branch. Consulted by the engine when no navigation callback
  /// overrides it.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub next_step: Option<String>,

  // Names of registered lifecycle callbacks, resolved at run time.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub before: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub after: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub validation: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub navigation: Option<String>,
}

/// The four lifecycle callback slots a step may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackSlot {
  Before,
  After,
  Validation,
  Navigation,
}

impl CallbackSlot {
  pub fn as_str(&self) -> &'static str {
    match self {
      CallbackSlot::Before => "before",
      CallbackSlot::After => "after",
      CallbackSlot::Validation => "validation",
      CallbackSlot::Navigation => "navigation",
    }
  }
}

impl StepMeta {
  /// The callback name configured for `slot`, if any. Empty names count as
  /// unset.
  pub fn callback_name(&self, slot: CallbackSlot) -> Option<&str> {
    let name = match slot {
      CallbackSlot::Before => &self.before,
      CallbackSlot::After => &self.after,
      CallbackSlot::Validation => &self.validation,
      CallbackSlot::Navigation => &self.navigation,
    };
    name.as_deref().filter(|n| !n.is_empty())
  }
}

/// The closed set of step kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
  Form(FormStep),
  Decision(DecisionStep),
  Action(ActionStep),
  Info(InfoStep),
  Summary(SummaryStep),
}

impl StepKind {
  pub fn name(&self) -> &'static str {
    match self {
      StepKind::Form(_) => "form",
      StepKind::Decision(_) => "decision",
      StepKind::Action(_) => "action",
      StepKind::Info(_) => "info",
      StepKind::Summary(_) => "summary",
    }
  }
}

/// One step of a wizard: shared metadata plus kind-specific payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
  #[serde(flatten)]
  pub meta: StepMeta,
  #[serde(flatten)]
  pub kind: StepKind,
}

impl Step {
  pub fn new(id: impl Into<String>, kind: StepKind) -> Self {
    Step {
      meta: StepMeta {
        id: id.into(),
        ..StepMeta::default()
      },
      kind,
    }
  }

  pub fn id(&self) -> &str {
    &self.meta.id
  }

  pub fn kind_name(&self) -> &'static str {
    self.kind.name()
  }

  /// Display title, falling back to the step id.
  pub fn title(&self) -> &str {
    if self.meta.title.is_empty() {
      &self.meta.id
    } else {
      &self.meta.title
    }
  }
}

/// What a step execution hands back to the engine: a partial state update to
/// merge, and an optional navigation hint (the decision executor's recorded
/// branch).
#[derive(Debug, Clone, Default)]
pub struct StepOutput {
  pub result: WizardState,
  pub next_step: Option<String>,
}

impl StepOutput {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn with_result(result: WizardState) -> Self {
    StepOutput {
      result,
      next_step: None,
    }
  }
}

impl Step {
  /// Executes this step's kind-specific behavior against the shared state.
  ///
  /// Success is a result map to merge. [`crate::WizardError::UserAborted`]
  /// and [`crate::WizardError::StepNotImplemented`] are distinguished
  /// outcomes the engine treats specially; everything else is fatal.
  pub(crate) async fn execute(
    &self,
    ctx: &WizardContext,
    state: &StateData,
    ui: &dyn WizardUi,
    callbacks: Option<&CallbackRegistry>,
  ) -> WizardResult<StepOutput> {
    match &self.kind {
      StepKind::Form(step) => step.execute(self, ctx, state, ui).await,
      StepKind::Decision(step) => step.execute(self, ctx, ui).await,
      StepKind::Action(step) => step.execute(self, ctx, state, ui, callbacks).await,
      StepKind::Info(step) => step.execute(self, ui).await,
      StepKind::Summary(step) => step.execute(self, state, ui).await,
    }
  }
}
