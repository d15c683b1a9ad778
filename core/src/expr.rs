// sherpa/src/expr.rs

//! Adapter around the JEXL expression evaluator used for skip conditions.
//!
//! The state map is exposed to expressions under a `state` root, so a
//! condition reads like `state.flag == true`. Named helper functions are
//! registered as JEXL transforms (`state.name|trimmed` style) per wizard.

use crate::error::{WizardError, WizardResult};
use crate::state::WizardState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// A named helper callable from condition expressions. Takes the evaluated
/// argument values and returns a value or an error.
pub type HelperFn = Arc<dyn Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static>;

/// Compiles and evaluates boolean condition strings against the current
/// wizard state.
#[derive(Default, Clone)]
pub struct ConditionEvaluator {
  helpers: HashMap<String, HelperFn>,
}

impl ConditionEvaluator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a named helper function, available to every condition this
  /// evaluator compiles. Later registrations under the same name win.
  pub fn register_helper<F>(&mut self, name: impl Into<String>, helper: F)
  where
    F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
  {
    self.helpers.insert(name.into(), Arc::new(helper));
  }

  pub fn helper_names(&self) -> impl Iterator<Item = &str> {
    self.helpers.keys().map(String::as_str)
  }

  /// Evaluates `expression` against `state`.
  ///
  /// An empty condition string evaluates to `false` ("condition not met")
  /// without invoking the underlying evaluator. Compilation or runtime
  /// failure is surfaced as an error, not coerced to `false`; the caller owns
  /// any fail-open policy. A non-boolean result is an error.
  pub fn evaluate(&self, expression: &str, state: &WizardState) -> WizardResult<bool> {
    if expression.trim().is_empty() {
      return Ok(false);
    }

    let mut evaluator = jexl_eval::Evaluator::new();
    for (name, helper) in &self.helpers {
      let helper = Arc::clone(helper);
      evaluator = evaluator.with_transform(name, move |args: &[Value]| helper(args));
    }

    let context = json!({ "state": Value::Object(state.clone()) });
    match evaluator.eval_in_context(expression, &context) {
      Ok(Value::Bool(b)) => Ok(b),
      Ok(_other) => Err(WizardError::ConditionNotBoolean {
        expression: expression.to_string(),
      }),
      Err(e) => Err(WizardError::Condition {
        expression: expression.to_string(),
        message: e.to_string(),
      }),
    }
  }
}

impl std::fmt::Debug for ConditionEvaluator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ConditionEvaluator")
      .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
      .finish()
  }
}
