// sherpa/src/step/summary.rs

//! The summary step: renders collected state as read-only text, either whole
//! or restricted to the keys its sections name. Review does not mutate state.

use crate::error::WizardResult;
use crate::state::StateData;
use crate::step::{Step, StepOutput};
use crate::ui::WizardUi;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::{event, Level};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarySection {
  #[serde(default)]
  pub title: String,
  /// State keys to display.
  #[serde(default)]
  pub fields: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryStep {
  #[serde(default)]
  pub sections: Vec<SummarySection>,

  /// Declared in the schema but not wired to any backward-navigation
  /// mechanism; acknowledged and otherwise a no-op.
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub editable: bool,

  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub template: String,
}

impl SummaryStep {
  pub(crate) async fn execute(
    &self,
    step: &Step,
    state: &StateData,
    ui: &dyn WizardUi,
  ) -> WizardResult<StepOutput> {
    if !self.template.is_empty() {
      event!(Level::WARN, step_id = %step.id(), "Template-based summary not implemented.");
    }

    let body = self.render(state);

    let body = if step.meta.description.is_empty() {
      body
    } else {
      format!("{}\n\n{}", step.meta.description, body)
    };

    ui.show_note(step.title(), &body).await?;

    if self.editable {
      event!(Level::WARN, step_id = %step.id(), "Editable summary not implemented.");
    }

    Ok(StepOutput::empty())
  }

  fn render(&self, state: &StateData) -> String {
    let guard = state.read();
    let mut out = String::new();

    if self.sections.is_empty() {
      out.push_str("## Current State\n\n");
      for (key, value) in guard.iter() {
        let _ = writeln!(out, "- **{}**: {}", key, value);
      }
      return out;
    }

    for section in &self.sections {
      let _ = writeln!(out, "## {}\n", section.title);

      if section.fields.is_empty() {
        out.push_str("(No fields defined for this section)\n\n");
        continue;
      }

      for field in &section.fields {
        match guard.get(field) {
          Some(value) => {
            let _ = writeln!(out, "- **{}**: {}", field, value);
          }
          None => {
            let _ = writeln!(out, "- **{}**: (not set)", field);
          }
        }
      }
      out.push('\n');
    }

    out
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::state::WizardState;
  use serde_json::json;

  #[test]
  fn renders_sections_with_missing_keys() {
    let mut state = WizardState::new();
    state.insert("name".to_string(), json!("Ada"));
    let state = StateData::new(state);

    let step = SummaryStep {
      sections: vec![SummarySection {
        title: "Profile".to_string(),
        fields: vec!["name".to_string(), "email".to_string()],
      }],
      editable: false,
      template: String::new(),
    };

    let rendered = step.render(&state);
    assert!(rendered.contains("## Profile"));
    assert!(rendered.contains("- **name**: \"Ada\""));
    assert!(rendered.contains("- **email**: (not set)"));
  }

  #[test]
  fn renders_whole_state_without_sections() {
    let mut state = WizardState::new();
    state.insert("a".to_string(), json!(1));
    let state = StateData::new(state);

    let step = SummaryStep::default();
    let rendered = step.render(&state);
    assert!(rendered.contains("## Current State"));
    assert!(rendered.contains("- **a**: 1"));
  }
}
