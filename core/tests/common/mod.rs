// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use serde_json::Value;
use sherpa::{
  ActionStep, DecisionStep, Field, Form, FormGroup, FormStep, InfoStep, Step, StepKind,
  SummarySection, SummaryStep, WizardContext, WizardError, WizardResult, WizardState, WizardUi,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::Level;

// --- Scripted UI -----------------------------------------------------------
//
// Stands in for the interactive rendering collaborator: responses are queued
// up front, every interaction is recorded, and the distinguished outcomes
// (user abort, not-implemented) can be injected at any surface.

#[derive(Debug, Clone)]
pub enum UiResponse<T> {
  Value(T),
  Abort,
  NotImplemented,
  Fail(String),
}

#[derive(Default)]
pub struct ScriptedUi {
  form_responses: Mutex<VecDeque<UiResponse<WizardState>>>,
  select_responses: Mutex<VecDeque<UiResponse<String>>>,
  note_responses: Mutex<VecDeque<UiResponse<()>>>,

  pub forms_run: AtomicUsize,
  pub selects_run: AtomicUsize,
  pub notes: Mutex<Vec<String>>,
  pub progress_notes: Mutex<Vec<String>>,
}

impl ScriptedUi {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push_form(&self, entries: &[(&str, Value)]) {
    self
      .form_responses
      .lock()
      .unwrap()
      .push_back(UiResponse::Value(state_of(entries)));
  }

  pub fn push_form_response(&self, response: UiResponse<WizardState>) {
    self.form_responses.lock().unwrap().push_back(response);
  }

  pub fn push_select(&self, choice: &str) {
    self
      .select_responses
      .lock()
      .unwrap()
      .push_back(UiResponse::Value(choice.to_string()));
  }

  pub fn push_select_response(&self, response: UiResponse<String>) {
    self.select_responses.lock().unwrap().push_back(response);
  }

  pub fn push_note_response(&self, response: UiResponse<()>) {
    self.note_responses.lock().unwrap().push_back(response);
  }

  pub fn note_titles(&self) -> Vec<String> {
    self.notes.lock().unwrap().clone()
  }

  fn resolve<T>(response: Option<UiResponse<T>>, default: T) -> WizardResult<T> {
    match response {
      None => Ok(default),
      Some(UiResponse::Value(value)) => Ok(value),
      Some(UiResponse::Abort) => Err(WizardError::UserAborted),
      Some(UiResponse::NotImplemented) => Err(WizardError::StepNotImplemented {
        step_id: "scripted".to_string(),
        step_type: "scripted".to_string(),
      }),
      Some(UiResponse::Fail(message)) => Err(WizardError::External {
        source: anyhow::anyhow!(message),
      }),
    }
  }
}

#[async_trait]
impl WizardUi for ScriptedUi {
  async fn run_form(
    &self,
    _ctx: &WizardContext,
    _form: &Form,
    _state: &WizardState,
  ) -> WizardResult<WizardState> {
    self.forms_run.fetch_add(1, Ordering::SeqCst);
    let next = self.form_responses.lock().unwrap().pop_front();
    ScriptedUi::resolve(next, WizardState::new())
  }

  async fn select(
    &self,
    _ctx: &WizardContext,
    _prompt: &str,
    choices: &[String],
  ) -> WizardResult<String> {
    self.selects_run.fetch_add(1, Ordering::SeqCst);
    let next = self.select_responses.lock().unwrap().pop_front();
    ScriptedUi::resolve(next, choices[0].clone())
  }

  async fn show_note(&self, title: &str, _body: &str) -> WizardResult<()> {
    self.notes.lock().unwrap().push(title.to_string());
    let next = self.note_responses.lock().unwrap().pop_front();
    ScriptedUi::resolve(next, ())
  }

  fn show_progress(&self, title: &str, _body: &str) {
    self.progress_notes.lock().unwrap().push(title.to_string());
  }
}

// --- State & step builders -------------------------------------------------

pub fn state_of(entries: &[(&str, Value)]) -> WizardState {
  let mut state = WizardState::new();
  for (key, value) in entries {
    state.insert(key.to_string(), value.clone());
  }
  state
}

pub fn input_field(key: &str) -> Field {
  Field {
    field_type: sherpa::step::form::FieldType::Input,
    key: key.to_string(),
    title: String::new(),
    description: String::new(),
    value: None,
    options: Vec::new(),
    validation: Vec::new(),
    input: None,
  }
}

pub fn form_step(id: &str, keys: &[&str]) -> Step {
  let fields = keys.iter().map(|key| input_field(key)).collect();
  Step::new(
    id,
    StepKind::Form(FormStep {
      form: Form {
        name: String::new(),
        theme: String::new(),
        groups: vec![FormGroup {
          name: String::new(),
          fields,
        }],
      },
    }),
  )
}

pub fn info_step(id: &str, content: &str) -> Step {
  let mut step = Step::new(
    id,
    StepKind::Info(InfoStep {
      content: content.to_string(),
    }),
  );
  step.meta.title = id.to_string();
  step
}

pub fn summary_step(id: &str, section_title: &str, fields: &[&str]) -> Step {
  let mut step = Step::new(
    id,
    StepKind::Summary(SummaryStep {
      sections: vec![SummarySection {
        title: section_title.to_string(),
        fields: fields.iter().map(|f| f.to_string()).collect(),
      }],
      editable: false,
      template: String::new(),
    }),
  );
  step.meta.title = id.to_string();
  step
}

pub fn decision_step(
  id: &str,
  target_key: &str,
  choices: &[&str],
  next_step_map: &[(&str, &str)],
) -> Step {
  Step::new(
    id,
    StepKind::Decision(DecisionStep {
      target_key: target_key.to_string(),
      choices: choices.iter().map(|c| c.to_string()).collect(),
      next_step_map: next_step_map
        .iter()
        .map(|(choice, target)| (choice.to_string(), target.to_string()))
        .collect::<HashMap<String, String>>(),
    }),
  )
}

pub fn action_step(id: &str, function_name: &str, output_key: Option<&str>) -> Step {
  let mut step = Step::new(
    id,
    StepKind::Action(ActionStep {
      action_type: "function".to_string(),
      function_name: function_name.to_string(),
      arguments: WizardState::new(),
      output_key: output_key.map(str::to_string),
      show_progress: None,
      show_completion: None,
    }),
  );
  step.meta.title = id.to_string();
  step
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
