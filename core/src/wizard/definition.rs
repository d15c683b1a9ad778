// sherpa/src/wizard/definition.rs

//! Contains the `Wizard` struct, its construction from YAML documents or
//! programmatic step lists, and the load-time validation that runs before any
//! step executes.

use crate::error::{WizardError, WizardResult};
use crate::expr::ConditionEvaluator;
use crate::registry::CallbackRegistry;
use crate::state::WizardState;
use crate::step::{Step, StepKind};
use crate::ui::{ConsoleUi, WizardUi};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{event, Level};

/// The raw declarative document, as authored in YAML.
#[derive(Debug, Clone, Deserialize)]
struct WizardDocument {
  name: String,
  #[serde(default)]
  description: String,
  #[serde(default)]
  theme: String,
  #[serde(default, deserialize_with = "nullable")]
  global_state: WizardState,
  #[serde(default, deserialize_with = "nullable")]
  steps: Vec<Step>,
}

/// Accepts an explicit YAML `null` where a collection is expected, so
/// `steps:` with no entries loads as an empty wizard.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: serde::Deserializer<'de>,
  T: serde::Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A loaded, validated wizard, ready to run.
///
/// Collaborators (callback registry, UI, expression helpers, load-time
/// initial state) are attached with the `with_*` builder methods before
/// [`Wizard::run`](crate::Wizard::run) is called.
pub struct Wizard {
  pub name: String,
  pub description: String,
  pub theme: String,

  pub(crate) steps: Vec<Step>,
  pub(crate) global_state: WizardState,
  pub(crate) initial_state: WizardState,
  pub(crate) callbacks: Option<Arc<CallbackRegistry>>,
  pub(crate) evaluator: ConditionEvaluator,
  pub(crate) ui: Arc<dyn WizardUi>,
}

impl std::fmt::Debug for Wizard {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Wizard")
      .field("name", &self.name)
      .field("description", &self.description)
      .field("theme", &self.theme)
      .field("steps", &self.steps)
      .field("global_state", &self.global_state)
      .field("initial_state", &self.initial_state)
      .finish_non_exhaustive()
  }
}

impl Wizard {
  /// Creates a wizard from a programmatic step list. Validation runs
  /// immediately; no step executes before it passes.
  pub fn new(name: impl Into<String>, steps: Vec<Step>) -> WizardResult<Self> {
    validate_steps(&steps)?;
    Ok(Wizard {
      name: name.into(),
      description: String::new(),
      theme: String::new(),
      steps,
      global_state: WizardState::new(),
      initial_state: WizardState::new(),
      callbacks: None,
      evaluator: ConditionEvaluator::new(),
      ui: Arc::new(ConsoleUi::new()),
    })
  }

  /// Loads a wizard definition from a YAML document string.
  pub fn from_yaml_str(yaml: &str) -> WizardResult<Self> {
    let document: WizardDocument = serde_yaml::from_str(yaml)?;
    validate_steps(&document.steps)?;
    event!(
      Level::DEBUG,
      wizard = %document.name,
      num_steps = document.steps.len(),
      "Wizard document loaded."
    );
    Ok(Wizard {
      name: document.name,
      description: document.description,
      theme: document.theme,
      steps: document.steps,
      global_state: document.global_state,
      initial_state: WizardState::new(),
      callbacks: None,
      evaluator: ConditionEvaluator::new(),
      ui: Arc::new(ConsoleUi::new()),
    })
  }

  /// Loads a wizard definition from a YAML file.
  pub fn from_yaml_file(path: impl AsRef<Path>) -> WizardResult<Self> {
    let path = path.as_ref();
    let yaml = std::fs::read_to_string(path).map_err(|source| WizardError::Io {
      path: path.display().to_string(),
      source,
    })?;
    Self::from_yaml_str(&yaml)
  }

  /// Replaces the rendering collaborator (defaults to [`ConsoleUi`]).
  pub fn with_ui(mut self, ui: Arc<dyn WizardUi>) -> Self {
    self.ui = ui;
    self
  }

  /// Attaches the callback registry. Without one, lifecycle callback names
  /// resolve to nothing (warn + proceed) and action steps run in simulation
  /// mode.
  pub fn with_callbacks(mut self, callbacks: Arc<CallbackRegistry>) -> Self {
    self.callbacks = Some(callbacks);
    self
  }

  /// Binds an initial-state object at load time. Overrides `global_state`
  /// keys and is itself overridden by the state passed to `run`.
  pub fn with_initial_state(mut self, initial_state: WizardState) -> Self {
    self.initial_state = initial_state;
    self
  }

  /// Registers a named helper function available to skip-condition
  /// expressions.
  pub fn with_helper<F>(mut self, name: impl Into<String>, helper: F) -> Self
  where
    F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
  {
    self.evaluator.register_helper(name, helper);
    self
  }

  pub fn steps(&self) -> &[Step] {
    &self.steps
  }

  /// Resolves a step id to its index by linear scan.
  pub fn step_index(&self, id: &str) -> Option<usize> {
    self.steps.iter().position(|s| s.id() == id)
  }
}

/// Load-time validation: ids present and unique, per-kind required fields,
/// statically-known navigation targets resolvable.
fn validate_steps(steps: &[Step]) -> WizardResult<()> {
  let mut seen: HashSet<&str> = HashSet::new();
  for (index, step) in steps.iter().enumerate() {
    if step.meta.id.is_empty() {
      return Err(WizardError::Definition {
        message: format!("step {} ({}) is missing required 'id' field", index, step.kind_name()),
      });
    }
    if !seen.insert(step.meta.id.as_str()) {
      return Err(WizardError::Definition {
        message: format!("duplicate step id '{}'", step.meta.id),
      });
    }
  }

  let ids: HashSet<&str> = steps.iter().map(|s| s.id()).collect();
  for step in steps {
    if let Some(target) = step.meta.next_step.as_deref().filter(|t| !t.is_empty()) {
      if !ids.contains(target) {
        return Err(WizardError::NavigationTarget {
          step_id: step.id().to_string(),
          target: target.to_string(),
        });
      }
    }

    if let StepKind::Decision(decision) = &step.kind {
      if decision.choices.is_empty() {
        return Err(WizardError::Configuration {
          step_id: step.id().to_string(),
          message: "decision step has no choices".to_string(),
        });
      }
      for target in decision.next_step_map.values() {
        if !ids.contains(target.as_str()) {
          return Err(WizardError::NavigationTarget {
            step_id: step.id().to_string(),
            target: target.clone(),
          });
        }
      }
    }
  }

  Ok(())
}
