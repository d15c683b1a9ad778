// src/lib.rs

//! Sherpa: a declarative, step-driven wizard engine.
//!
//! Sherpa lets you describe a multi-step interactive guided flow as a
//! sequence of typed steps (form, decision, info, action, summary) sharing a
//! mutable key-value state, with features like:
//!  - Skip conditions evaluated as expressions against the current state.
//!  - Per-step lifecycle callbacks (before/after/validation/navigation).
//!  - Branching navigation via decision steps or navigation callbacks.
//!  - Backend action steps dispatched through a name-keyed callback registry,
//!    with a simulation fallback for wizards authored before callbacks exist.
//!  - A pluggable rendering seam (`WizardUi`), with a console implementation.

pub mod context;
pub mod error;
pub mod expr;
pub mod registry;
pub mod state;
pub mod step;
pub mod ui;
pub mod wizard;

// --- Re-exports for the Public API ---

pub use crate::context::WizardContext;
pub use crate::error::{WizardError, WizardResult};
pub use crate::expr::{ConditionEvaluator, HelperFn};
pub use crate::registry::{
  ActionCallback, ActionCallbackResult, CallbackOutcome, CallbackRegistry, LifecycleCallback,
  UI_HANDLED_KEY,
};
pub use crate::state::{StateData, WizardState};
pub use crate::step::form::FieldType;
pub use crate::step::{
  ActionStep, DecisionStep, Field, FieldOption, FieldValidation, Form, FormGroup, FormStep,
  InfoStep, Step, StepKind, StepMeta, StepOutput, SummarySection, SummaryStep,
};
pub use crate::step::action::SIMULATED_ACTION_DELAY;
pub use crate::ui::{ConsoleUi, WizardUi};
pub use crate::wizard::{Wizard, WizardOutcome};

/*
    Core Workflow:
    1. Author a wizard document in YAML (or build `Vec<Step>` in code) and
       load it with `Wizard::from_yaml_str` / `Wizard::from_yaml_file`.
    2. Register lifecycle and action callbacks on a `CallbackRegistry` and
       attach it with `.with_callbacks(...)`; attach a UI with `.with_ui(...)`.
    3. Create a `StateData` handle and call
       `wizard.run(state.clone(), initial_state).await`.
    4. Inspect `WizardOutcome` (Completed vs Aborted) and read the final
       state from your `StateData` clone; it is valid after failures too.
*/
