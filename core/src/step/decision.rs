// sherpa/src/step/decision.rs

//! The decision step: the user picks one of a fixed list of choices. The
//! chosen value is written under `target_key`, and a matching `next_step_map`
//! entry is handed back as the step's recorded branch for the engine's
//! navigation decision.

use crate::context::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::state::WizardState;
use crate::step::{Step, StepOutput};
use crate::ui::WizardUi;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{event, Level};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionStep {
  /// State key the chosen value is written to.
  pub target_key: String,

  pub choices: Vec<String>,

  /// Optional routing: choice value to next-step id.
  #[serde(default, skip_serializing_if = "HashMap::is_empty")]
  pub next_step_map: HashMap<String, String>,
}

impl DecisionStep {
  pub(crate) async fn execute(
    &self,
    step: &Step,
    ctx: &WizardContext,
    ui: &dyn WizardUi,
  ) -> WizardResult<StepOutput> {
    // Also enforced at load time; guard again for programmatically-built steps.
    if self.choices.is_empty() {
      return Err(WizardError::Configuration {
        step_id: step.id().to_string(),
        message: "decision step has no choices".to_string(),
      });
    }

    let choice = ui.select(ctx, step.title(), &self.choices).await?;

    let mut result = WizardState::new();
    result.insert(self.target_key.clone(), Value::String(choice.clone()));

    let next_step = self.next_step_map.get(&choice).cloned();
    if let Some(target) = &next_step {
      event!(
        Level::DEBUG,
        step_id = %step.id(),
        choice = %choice,
        next_step = %target,
        "Decision branch recorded."
      );
    }

    Ok(StepOutput { result, next_step })
  }
}
