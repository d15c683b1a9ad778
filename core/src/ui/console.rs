// sherpa/src/ui/console.rs

//! Terminal implementation of the [`WizardUi`] seam, built on `dialoguer`
//! prompts. Blocking prompt calls run on the tokio blocking pool so the
//! engine future stays cancellable.

use crate::context::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::state::WizardState;
use crate::step::form::{Field, FieldType, Form};
use crate::ui::WizardUi;
use async_trait::async_trait;
use dialoguer::console::{style, Key, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Editor, Input, MultiSelect, Password, Select};
use serde_json::Value;

/// Interactive console front end.
#[derive(Debug, Default, Clone)]
pub struct ConsoleUi;

impl ConsoleUi {
  pub fn new() -> Self {
    ConsoleUi
  }
}

async fn run_blocking<T, F>(f: F) -> WizardResult<T>
where
  T: Send + 'static,
  F: FnOnce() -> WizardResult<T> + Send + 'static,
{
  tokio::task::spawn_blocking(f)
    .await
    .map_err(|e| WizardError::External {
      source: anyhow::Error::new(e),
    })?
}

fn map_dialoguer_err(err: dialoguer::Error) -> WizardError {
  match err {
    dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted => {
      WizardError::UserAborted
    }
    dialoguer::Error::IO(io_err) => WizardError::External {
      source: anyhow::Error::new(io_err),
    },
  }
}

#[async_trait]
impl WizardUi for ConsoleUi {
  async fn run_form(
    &self,
    _ctx: &WizardContext,
    form: &Form,
    state: &WizardState,
  ) -> WizardResult<WizardState> {
    let form = form.clone();
    let state = state.clone();
    run_blocking(move || run_form_blocking(&form, &state)).await
  }

  async fn select(&self, _ctx: &WizardContext, prompt: &str, choices: &[String]) -> WizardResult<String> {
    let prompt = prompt.to_string();
    let choices = choices.to_vec();
    run_blocking(move || {
      let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(&prompt)
        .items(&choices)
        .default(0)
        .interact_opt()
        .map_err(map_dialoguer_err)?;
      match picked {
        Some(index) => Ok(choices[index].clone()),
        None => Err(WizardError::UserAborted),
      }
    })
    .await
  }

  async fn show_note(&self, title: &str, body: &str) -> WizardResult<()> {
    let title = title.to_string();
    let body = body.to_string();
    run_blocking(move || {
      let term = Term::stdout();
      println!("\n{}", style(&title).bold());
      println!("{}\n", body);
      println!("{}", style("Press any key to continue (Esc to abort)").dim());
      match term.read_key() {
        Ok(Key::Escape) => Err(WizardError::UserAborted),
        Ok(_) => Ok(()),
        Err(io_err) => Err(WizardError::External {
          source: anyhow::Error::new(io_err),
        }),
      }
    })
    .await
  }

  fn show_progress(&self, title: &str, body: &str) {
    println!("\n{}", style(title).bold());
    println!("{}", style(body).dim());
  }
}

fn run_form_blocking(form: &Form, state: &WizardState) -> WizardResult<WizardState> {
  let theme = ColorfulTheme::default();
  let mut values = WizardState::new();

  for group in &form.groups {
    if !group.name.is_empty() {
      println!("\n{}", style(&group.name).bold().underlined());
    }
    for field in &group.fields {
      if let Some((key, value)) = prompt_field(&theme, field, state)? {
        values.insert(key, value);
      }
    }
  }

  Ok(values)
}

fn prompt_label(field: &Field) -> String {
  if !field.title.is_empty() {
    field.title.clone()
  } else {
    field.key.clone()
  }
}

/// Default shown in the prompt: current state wins over the declared value.
fn default_text(field: &Field, state: &WizardState) -> Option<String> {
  let value = state.get(&field.key).or(field.value.as_ref())?;
  Some(match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  })
}

fn prompt_field(
  theme: &ColorfulTheme,
  field: &Field,
  state: &WizardState,
) -> WizardResult<Option<(String, Value)>> {
  if !field.description.is_empty() {
    println!("{}", style(&field.description).dim());
  }

  match field.field_type {
    FieldType::Note => {
      println!("{}", prompt_label(field));
      Ok(None)
    }
    FieldType::Input | FieldType::Filepicker => {
      if field
        .input
        .as_ref()
        .map_or(false, |attrs| attrs.echo_mode == "password")
      {
        let text = Password::with_theme(theme)
          .with_prompt(prompt_label(field))
          .interact()
          .map_err(map_dialoguer_err)?;
        return Ok(Some((field.key.clone(), Value::String(text))));
      }

      let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt_label(field))
        .allow_empty(true);
      if let Some(default) = default_text(field, state) {
        input = input.default(default);
      }
      let text = input.interact_text().map_err(map_dialoguer_err)?;
      Ok(Some((field.key.clone(), Value::String(text))))
    }
    FieldType::Text => {
      let edited = Editor::new()
        .edit(&prompt_label(field))
        .map_err(map_dialoguer_err)?;
      match edited {
        Some(text) => Ok(Some((field.key.clone(), Value::String(text)))),
        None => Err(WizardError::UserAborted),
      }
    }
    FieldType::Confirm => {
      let default = state
        .get(&field.key)
        .or(field.value.as_ref())
        .and_then(Value::as_bool)
        .unwrap_or(false);
      let answer = Confirm::with_theme(theme)
        .with_prompt(prompt_label(field))
        .default(default)
        .interact()
        .map_err(map_dialoguer_err)?;
      Ok(Some((field.key.clone(), Value::Bool(answer))))
    }
    FieldType::Select => {
      let labels: Vec<&str> = field.options.iter().map(|o| o.label.as_str()).collect();
      let picked = Select::with_theme(theme)
        .with_prompt(prompt_label(field))
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(map_dialoguer_err)?;
      match picked {
        Some(index) => Ok(Some((field.key.clone(), field.options[index].value.clone()))),
        None => Err(WizardError::UserAborted),
      }
    }
    FieldType::Multiselect => {
      let labels: Vec<&str> = field.options.iter().map(|o| o.label.as_str()).collect();
      let picked = MultiSelect::with_theme(theme)
        .with_prompt(prompt_label(field))
        .items(&labels)
        .interact()
        .map_err(map_dialoguer_err)?;
      let chosen: Vec<Value> = picked
        .into_iter()
        .map(|index| field.options[index].value.clone())
        .collect();
      Ok(Some((field.key.clone(), Value::Array(chosen))))
    }
  }
}
