// sherpa/src/state.rs

//! The shared wizard state: a string-keyed map of dynamic values, wrapped for
//! shared ownership across the step lifecycle.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde_json::Value;
use std::sync::Arc;

/// The mutable key-value state carried across step executions.
///
/// Values are arbitrary JSON-shaped data (string, boolean, number, list,
/// nested map). The engine mutates the state only by flat-merging a step's
/// result map after that step executes; later writes overwrite earlier ones.
pub type WizardState = serde_json::Map<String, Value>;

/// A wrapper for the wizard state providing shared ownership and interior
/// mutability using parking_lot::RwLock.
///
/// The caller creates one handle, passes a clone into [`crate::Wizard::run`],
/// and keeps its own clone: the accumulated state stays observable after
/// every outcome, including failures.
///
/// IMPORTANT: Lock guards obtained from this struct are blocking and MUST NOT
/// be held across `.await` suspension points in asynchronous code.
#[derive(Debug)]
pub struct StateData(Arc<RwLock<WizardState>>);

impl StateData {
  pub fn new(state: WizardState) -> Self {
    StateData(Arc::new(RwLock::new(state)))
  }

  /// Acquires a read lock. The returned guard MUST be dropped before any
  /// `.await` point.
  pub fn read(&self) -> RwLockReadGuard<'_, WizardState> {
    self.0.read()
  }

  /// Acquires a write lock. The returned guard MUST be dropped before any
  /// `.await` point.
  pub fn write(&self) -> RwLockWriteGuard<'_, WizardState> {
    self.0.write()
  }

  /// An owned copy of the current state, safe to hold across `.await`.
  pub fn snapshot(&self) -> WizardState {
    self.read().clone()
  }

  /// Flat-merges `results` into the state: every key overwrites any existing
  /// value under the same key. No conflict detection, no type checking.
  pub fn merge(&self, results: WizardState) {
    if results.is_empty() {
      return;
    }
    let mut guard = self.write();
    for (key, value) in results {
      guard.insert(key, value);
    }
  }
}

impl Clone for StateData {
  fn clone(&self) -> Self {
    StateData(Arc::clone(&self.0))
  }
}

impl Default for StateData {
  fn default() -> Self {
    Self::new(WizardState::new())
  }
}
