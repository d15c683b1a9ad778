// sherpa/src/registry.rs

//! The `CallbackRegistry`: two independent name-to-function tables, one for
//! lifecycle callbacks (before/after/validation/navigation) and one for
//! action callbacks invoked by action steps.
//!
//! Both tables are populated by the embedding application before the wizard
//! runs and are read-only during execution. Resolution is a plain lookup:
//! the engine warns and proceeds when a named lifecycle callback is missing,
//! while a missing action callback is an error at first use.

use crate::context::WizardContext;
use crate::state::StateData;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{event, Level};

/// Boxed future returned by registered callbacks.
pub type CallbackFuture<T> = Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send>>;

/// What a lifecycle callback hands back to the engine: an optional result
/// value (currently informational) and an optional next-step id, which only
/// the `navigation` slot acts on.
#[derive(Debug, Clone, Default)]
pub struct CallbackOutcome {
  pub result: Option<Value>,
  pub next_step: Option<String>,
}

impl CallbackOutcome {
  /// An outcome carrying nothing: continue as normal.
  pub fn empty() -> Self {
    Self::default()
  }

  /// An outcome redirecting navigation to the step with the given id.
  pub fn goto(next_step: impl Into<String>) -> Self {
    Self {
      result: None,
      next_step: Some(next_step.into()),
    }
  }
}

/// Reserved key an action callback may set in a plain map result to signal it
/// performed its own UI interaction. The key is stripped from the stored data.
pub const UI_HANDLED_KEY: &str = "_sherpa_ui_handled";

/// Result of an action callback.
///
/// `Value` is the common case: plain data to store under the step's
/// `output_key`. `Handled` additionally signals whether the callback drove
/// its own UI (for example, it ran a full-screen process viewer), in which
/// case the action step suppresses its own completion notice. A plain
/// `Value::Object` containing [`UI_HANDLED_KEY`] is interpreted the same way.
#[derive(Debug, Clone)]
pub enum ActionCallbackResult {
  Value(Value),
  Handled { data: Option<Value>, ui_handled: bool },
}

impl ActionCallbackResult {
  /// Splits the callback result into `(data, ui_handled)`, honoring the
  /// reserved-key convention for plain map results.
  pub fn interpret(self) -> (Option<Value>, bool) {
    match self {
      ActionCallbackResult::Handled { data, ui_handled } => (data, ui_handled),
      ActionCallbackResult::Value(Value::Null) => (None, false),
      ActionCallbackResult::Value(Value::Object(map)) => {
        if let Some(handled) = map.get(UI_HANDLED_KEY).and_then(Value::as_bool) {
          let filtered: serde_json::Map<String, Value> = map
            .into_iter()
            .filter(|(key, _)| key != UI_HANDLED_KEY)
            .collect();
          (Some(Value::Object(filtered)), handled)
        } else {
          (Some(Value::Object(map)), false)
        }
      }
      ActionCallbackResult::Value(other) => (Some(other), false),
    }
  }
}

impl From<Value> for ActionCallbackResult {
  fn from(value: Value) -> Self {
    ActionCallbackResult::Value(value)
  }
}

/// A registered lifecycle callback: `(context, state) -> outcome`.
pub type LifecycleCallback =
  Arc<dyn Fn(WizardContext, StateData) -> CallbackFuture<CallbackOutcome> + Send + Sync>;

/// A registered action callback: `(context, state, arguments) -> result`.
pub type ActionCallback = Arc<
  dyn Fn(WizardContext, StateData, crate::state::WizardState) -> CallbackFuture<ActionCallbackResult>
    + Send
    + Sync,
>;

#[derive(Default)]
pub struct CallbackRegistry {
  lifecycle: HashMap<String, LifecycleCallback>,
  actions: HashMap<String, ActionCallback>,
}

impl CallbackRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a lifecycle callback under `name`. The closure receives the
  /// run context and a clone of the shared state handle; its error type is
  /// anything convertible into `anyhow::Error`.
  pub fn register_lifecycle<F, Fut>(&mut self, name: impl Into<String>, callback: F)
  where
    F: Fn(WizardContext, StateData) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<CallbackOutcome>> + Send + 'static,
  {
    let name = name.into();
    event!(Level::DEBUG, callback_name = %name, "Registering lifecycle callback.");
    let wrapped: LifecycleCallback = Arc::new(move |ctx, state| Box::pin(callback(ctx, state)));
    self.lifecycle.insert(name, wrapped);
  }

  /// Registers an action callback under `name`, invokable from action steps
  /// via their `function_name`.
  pub fn register_action<F, Fut>(&mut self, name: impl Into<String>, callback: F)
  where
    F: Fn(WizardContext, StateData, crate::state::WizardState) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<ActionCallbackResult>> + Send + 'static,
  {
    let name = name.into();
    event!(Level::DEBUG, callback_name = %name, "Registering action callback.");
    let wrapped: ActionCallback =
      Arc::new(move |ctx, state, args| Box::pin(callback(ctx, state, args)));
    self.actions.insert(name, wrapped);
  }

  pub fn lifecycle(&self, name: &str) -> Option<LifecycleCallback> {
    self.lifecycle.get(name).cloned()
  }

  pub fn action(&self, name: &str) -> Option<ActionCallback> {
    self.actions.get(name).cloned()
  }

  pub fn has_lifecycle(&self, name: &str) -> bool {
    self.lifecycle.contains_key(name)
  }

  pub fn has_action(&self, name: &str) -> bool {
    self.actions.contains_key(name)
  }
}

impl std::fmt::Debug for CallbackRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CallbackRegistry")
      .field("lifecycle", &self.lifecycle.keys().collect::<Vec<_>>())
      .field("actions", &self.actions.keys().collect::<Vec<_>>())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn interpret_plain_value() {
    let (data, ui_handled) = ActionCallbackResult::Value(json!("done")).interpret();
    assert_eq!(data, Some(json!("done")));
    assert!(!ui_handled);
  }

  #[test]
  fn interpret_null_is_no_data() {
    let (data, ui_handled) = ActionCallbackResult::Value(Value::Null).interpret();
    assert_eq!(data, None);
    assert!(!ui_handled);
  }

  #[test]
  fn interpret_reserved_key_map_strips_marker() {
    let raw = json!({ "status": "ok", UI_HANDLED_KEY: true });
    let (data, ui_handled) = ActionCallbackResult::Value(raw).interpret();
    assert_eq!(data, Some(json!({ "status": "ok" })));
    assert!(ui_handled);
  }

  #[test]
  fn interpret_structured_result() {
    let result = ActionCallbackResult::Handled {
      data: Some(json!(42)),
      ui_handled: true,
    };
    let (data, ui_handled) = result.interpret();
    assert_eq!(data, Some(json!(42)));
    assert!(ui_handled);
  }
}
