// sherpa/src/step/form.rs

//! The form step and the embedded declarative form model (groups of typed
//! fields). Rendering and value collection are delegated entirely to the
//! [`crate::ui::WizardUi`] collaborator; the returned field-keyed map passes
//! through unchanged as the step result.

use crate::context::WizardContext;
use crate::error::WizardResult;
use crate::state::StateData;
use crate::step::{Step, StepOutput};
use crate::ui::WizardUi;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A declarative form: one or more named groups of fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Form {
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub name: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub theme: String,
  pub groups: Vec<FormGroup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormGroup {
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub name: String,
  pub fields: Vec<Field>,
}

/// The closed set of field widgets a form may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
  Input,
  Text,
  Select,
  Multiselect,
  Confirm,
  Note,
  Filepicker,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
  #[serde(rename = "type")]
  pub field_type: FieldType,

  /// State key the collected value is stored under. Fields without a key
  /// (e.g. notes) collect nothing.
  #[serde(default)]
  pub key: String,

  #[serde(default)]
  pub title: String,

  #[serde(default)]
  pub description: String,

  /// Default value, used when the current state has nothing for `key`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub value: Option<Value>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub options: Vec<FieldOption>,

  /// Declarative validation entries. Enforcement belongs to the rendering
  /// collaborator; the engine only carries the model.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub validation: Vec<FieldValidation>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub input: Option<InputAttributes>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldOption {
  pub label: String,
  pub value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldValidation {
  pub condition: String,
  pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputAttributes {
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub placeholder: String,
  #[serde(default, skip_serializing_if = "is_zero")]
  pub char_limit: usize,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub echo_mode: String,
}

fn is_zero(n: &usize) -> bool {
  *n == 0
}

/// A step that displays an interactive form.
///
/// Accepts either a full `form:` definition or the `fields:` shorthand, a
/// flat field list translated into a canonical single-group form at load
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FormStepRepr")]
pub struct FormStep {
  pub form: Form,
}

#[derive(Deserialize)]
struct FormStepRepr {
  #[serde(default)]
  form: Option<Form>,
  #[serde(default)]
  fields: Option<Vec<Field>>,
}

impl TryFrom<FormStepRepr> for FormStep {
  type Error = String;

  fn try_from(repr: FormStepRepr) -> Result<Self, Self::Error> {
    match (repr.form, repr.fields) {
      (Some(form), None) => Ok(FormStep { form }),
      (None, Some(fields)) => Ok(FormStep {
        form: Form {
          name: String::new(),
          theme: String::new(),
          groups: vec![FormGroup {
            name: String::new(),
            fields,
          }],
        },
      }),
      (Some(_), Some(_)) => {
        Err("form step accepts either 'form' or the 'fields' shorthand, not both".to_string())
      }
      (None, None) => Err("form step requires a 'form' definition or a 'fields' list".to_string()),
    }
  }
}

impl FormStep {
  pub(crate) async fn execute(
    &self,
    step: &Step,
    ctx: &WizardContext,
    state: &StateData,
    ui: &dyn WizardUi,
  ) -> WizardResult<StepOutput> {
    let snapshot = state.snapshot();
    let values = ui.run_form(ctx, &self.form, &snapshot).await?;
    tracing::debug!(step_id = %step.id(), collected = values.len(), "Form step collected values.");
    Ok(StepOutput::with_result(values))
  }
}
