// sherpa/src/step/action.rs

//! The action step: runs a named backend function from the action callback
//! registry. Without a registry attached the executor falls back to a
//! simulation mode (fixed delay, placeholder result) so wizards can be
//! authored and exercised before callbacks are wired up.

use crate::context::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::registry::CallbackRegistry;
use crate::state::{StateData, WizardState};
use crate::step::{Step, StepOutput};
use crate::ui::WizardUi;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{event, Level};

/// Fixed delay used by the registry-less simulation mode.
pub const SIMULATED_ACTION_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionStep {
  /// Only `"function"` is supported.
  pub action_type: String,

  #[serde(default)]
  pub function_name: String,

  #[serde(default, skip_serializing_if = "WizardState::is_empty")]
  pub arguments: WizardState,

  /// State key the (interpreted) result is stored under.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub output_key: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub show_progress: Option<bool>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub show_completion: Option<bool>,
}

fn bool_value(v: Option<bool>, default: bool) -> bool {
  v.unwrap_or(default)
}

impl ActionStep {
  pub(crate) async fn execute(
    &self,
    step: &Step,
    ctx: &WizardContext,
    state: &StateData,
    ui: &dyn WizardUi,
    callbacks: Option<&CallbackRegistry>,
  ) -> WizardResult<StepOutput> {
    if self.action_type != "function" {
      return Err(WizardError::Configuration {
        step_id: step.id().to_string(),
        message: format!("unsupported action type: {}", self.action_type),
      });
    }
    if self.function_name.is_empty() {
      return Err(WizardError::Configuration {
        step_id: step.id().to_string(),
        message: "function name not specified for function-type action".to_string(),
      });
    }

    let show_progress = bool_value(self.show_progress, true);
    let show_completion = bool_value(self.show_completion, true);

    if show_progress {
      ui.show_progress(
        step.title(),
        &format!("Executing action: {}\n\nPlease wait...", self.function_name),
      );
    }

    let (data, ui_handled) = match callbacks {
      Some(registry) => {
        let callback = registry.action(&self.function_name).ok_or_else(|| {
          WizardError::Configuration {
            step_id: step.id().to_string(),
            message: format!("action callback '{}' is not registered", self.function_name),
          }
        })?;
        event!(
          Level::DEBUG,
          step_id = %step.id(),
          function = %self.function_name,
          "Executing function via registry."
        );
        let raw = callback(ctx.clone(), state.clone(), self.arguments.clone())
          .await
          .map_err(WizardError::from)?;
        raw.interpret()
      }
      None => {
        // Fallback to simulation for development/testing.
        event!(
          Level::WARN,
          step_id = %step.id(),
          function = %self.function_name,
          "No callback registry attached, simulating function execution."
        );
        tokio::time::sleep(SIMULATED_ACTION_DELAY).await;
        let placeholder = json!({
          "simulated": true,
          "function": self.function_name,
          "message": format!(
            "Simulated result from {} (no callback registry attached)",
            self.function_name
          ),
        });
        (Some(placeholder), false)
      }
    };

    let mut result = WizardState::new();
    if let (Some(output_key), Some(value)) = (&self.output_key, data) {
      event!(
        Level::DEBUG,
        step_id = %step.id(),
        output_key = %output_key,
        "Action result stored in state."
      );
      result.insert(output_key.clone(), value);
    }

    if show_completion && !ui_handled {
      ui.show_note(
        "Action Complete",
        &format!("Action '{}' completed successfully.", self.function_name),
      )
      .await?;
    }

    Ok(StepOutput::with_result(result))
  }
}
