// sherpa/src/step/info.rs

//! The info step: static display content, never mutates state.

use crate::error::WizardResult;
use crate::step::{Step, StepOutput};
use crate::ui::WizardUi;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfoStep {
  #[serde(default)]
  pub content: String,
}

impl InfoStep {
  pub(crate) async fn execute(&self, step: &Step, ui: &dyn WizardUi) -> WizardResult<StepOutput> {
    // The description, when present, heads the content.
    let body = if step.meta.description.is_empty() {
      self.content.clone()
    } else {
      format!("{}\n\n{}", step.meta.description, self.content)
    };

    ui.show_note(step.title(), &body).await?;

    Ok(StepOutput::empty())
  }
}
