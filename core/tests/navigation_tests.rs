// tests/navigation_tests.rs
mod common;

use common::*;
use serde_json::json;
use sherpa::{
  CallbackOutcome, CallbackRegistry, StateData, Wizard, WizardError, WizardOutcome, WizardState,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn decision_branch_routes_without_any_callback() {
  setup_tracing();
  let ui = Arc::new(ScriptedUi::new());
  ui.push_select("y");

  let mut wizard = Wizard::new(
    "branching",
    vec![
      decision_step("pick", "choice", &["x", "y"], &[("x", "stepX"), ("y", "stepY")]),
      info_step("stepX", "branch X"),
      info_step("stepY", "branch Y"),
    ],
  )
  .unwrap()
  .with_ui(ui.clone());

  let state = StateData::default();
  let outcome = wizard.run(state.clone(), WizardState::new()).await.unwrap();

  assert_eq!(outcome, WizardOutcome::Completed);
  assert_eq!(state.read().get("choice"), Some(&json!("y")));
  // stepX was skipped over by the recorded branch; only stepY rendered.
  assert_eq!(ui.note_titles(), vec!["stepY".to_string()]);
  // The decision step recorded its branch on itself.
  assert_eq!(wizard.steps()[0].meta.next_step.as_deref(), Some("stepY"));
}

#[tokio::test]
async fn choice_without_branch_entry_progresses_linearly() {
  setup_tracing();
  let ui = Arc::new(ScriptedUi::new());
  ui.push_select("x");

  let mut wizard = Wizard::new(
    "partial-map",
    vec![
      decision_step("pick", "choice", &["x", "y"], &[("y", "stepY")]),
      info_step("stepX", "branch X"),
      info_step("stepY", "branch Y"),
    ],
  )
  .unwrap()
  .with_ui(ui.clone());

  let state = StateData::default();
  wizard.run(state.clone(), WizardState::new()).await.unwrap();

  // No map entry for "x": both following steps run in order.
  assert_eq!(ui.note_titles(), vec!["stepX".to_string(), "stepY".to_string()]);
}

#[tokio::test]
async fn navigation_callback_takes_precedence_over_decision_branch() {
  setup_tracing();
  let ui = Arc::new(ScriptedUi::new());
  ui.push_select("y");

  let mut registry = CallbackRegistry::new();
  registry.register_lifecycle("force_x", |_ctx, _state| async {
    Ok(CallbackOutcome::goto("stepX"))
  });

  let mut pick = decision_step("pick", "choice", &["x", "y"], &[("y", "stepY")]);
  pick.meta.navigation = Some("force_x".to_string());

  let mut wizard = Wizard::new(
    "precedence",
    vec![
      pick,
      info_step("stepX", "branch X"),
      info_step("stepY", "branch Y"),
    ],
  )
  .unwrap()
  .with_ui(ui.clone())
  .with_callbacks(Arc::new(registry));

  let state = StateData::default();
  wizard.run(state.clone(), WizardState::new()).await.unwrap();

  // The callback override wins over next_step_map; stepX executes first,
  // then falls through linearly to stepY.
  assert_eq!(ui.note_titles(), vec!["stepX".to_string(), "stepY".to_string()]);
}

#[tokio::test]
async fn navigation_callback_with_unknown_target_fails_naming_the_id() {
  setup_tracing();
  let mut registry = CallbackRegistry::new();
  registry.register_lifecycle("lost", |_ctx, _state| async {
    Ok(CallbackOutcome::goto("no_such_step"))
  });

  let mut step = info_step("start", "hello");
  step.meta.navigation = Some("lost".to_string());

  let mut wizard = Wizard::new("lost", vec![step])
    .unwrap()
    .with_ui(Arc::new(ScriptedUi::new()))
    .with_callbacks(Arc::new(registry));

  let state = StateData::default();
  let err = wizard.run(state, WizardState::new()).await.unwrap_err();

  match err {
    WizardError::NavigationTarget { step_id, target } => {
      assert_eq!(step_id, "start");
      assert_eq!(target, "no_such_step");
    }
    other => panic!("expected NavigationTarget error, got {other:?}"),
  }
}

#[tokio::test]
async fn navigation_callback_without_target_falls_through_linearly() {
  setup_tracing();
  let ui = Arc::new(ScriptedUi::new());

  let mut registry = CallbackRegistry::new();
  registry.register_lifecycle("undecided", |_ctx, _state| async {
    Ok(CallbackOutcome::empty())
  });

  let mut first = info_step("first", "one");
  first.meta.navigation = Some("undecided".to_string());

  let mut wizard = Wizard::new("linear-fallback", vec![first, info_step("second", "two")])
    .unwrap()
    .with_ui(ui.clone())
    .with_callbacks(Arc::new(registry));

  let state = StateData::default();
  wizard.run(state, WizardState::new()).await.unwrap();

  assert_eq!(ui.note_titles(), vec!["first".to_string(), "second".to_string()]);
}

#[tokio::test]
async fn static_next_step_hint_jumps_over_steps() {
  setup_tracing();
  let ui = Arc::new(ScriptedUi::new());

  let mut first = info_step("first", "one");
  first.meta.next_step = Some("third".to_string());

  let mut wizard = Wizard::new(
    "static-jump",
    vec![first, info_step("second", "two"), info_step("third", "three")],
  )
  .unwrap()
  .with_ui(ui.clone());

  let state = StateData::default();
  wizard.run(state, WizardState::new()).await.unwrap();

  assert_eq!(ui.note_titles(), vec!["first".to_string(), "third".to_string()]);
}

#[tokio::test]
async fn decision_can_route_backwards_for_a_redo_loop() {
  setup_tracing();
  let ui = Arc::new(ScriptedUi::new());
  ui.push_form(&[("name", json!("Ad"))]);
  ui.push_select("redo");
  ui.push_form(&[("name", json!("Ada"))]);
  ui.push_select("done");

  let mut wizard = Wizard::new(
    "redo-loop",
    vec![
      form_step("details", &["name"]),
      decision_step(
        "confirm",
        "verdict",
        &["redo", "done"],
        &[("redo", "details"), ("done", "finish")],
      ),
      info_step("finish", "all done"),
    ],
  )
  .unwrap()
  .with_ui(ui.clone());

  let state = StateData::default();
  let outcome = wizard.run(state.clone(), WizardState::new()).await.unwrap();

  assert_eq!(outcome, WizardOutcome::Completed);
  assert_eq!(ui.forms_run.load(Ordering::SeqCst), 2);
  assert_eq!(state.read().get("name"), Some(&json!("Ada")));
  assert_eq!(state.read().get("verdict"), Some(&json!("done")));
}

#[tokio::test]
async fn skipped_step_invokes_no_lifecycle_callbacks() {
  setup_tracing();
  let ui = Arc::new(ScriptedUi::new());

  let invocations = Arc::new(AtomicUsize::new(0));
  let mut registry = CallbackRegistry::new();
  {
    let invocations = invocations.clone();
    registry.register_lifecycle("count", move |_ctx, _state| {
      let invocations = invocations.clone();
      async move {
        invocations.fetch_add(1, Ordering::SeqCst);
        Ok(CallbackOutcome::empty())
      }
    });
  }

  let mut gated = form_step("gated", &["a"]);
  gated.meta.skip_condition = "state.flag == true".to_string();
  gated.meta.before = Some("count".to_string());
  gated.meta.after = Some("count".to_string());
  gated.meta.validation = Some("count".to_string());

  let mut wizard = Wizard::new("skip-hooks", vec![gated])
    .unwrap()
    .with_ui(ui.clone())
    .with_callbacks(Arc::new(registry));

  let state = StateData::default();
  wizard
    .run(state, state_of(&[("flag", json!(true))]))
    .await
    .unwrap();

  assert_eq!(ui.forms_run.load(Ordering::SeqCst), 0);
  assert_eq!(invocations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn duplicate_step_ids_are_rejected_before_any_step_executes() {
  setup_tracing();
  let err = Wizard::new(
    "dupes",
    vec![info_step("same", "one"), info_step("same", "two")],
  )
  .err()
  .expect("duplicate ids must be rejected");

  match err {
    WizardError::Definition { message } => assert!(message.contains("same")),
    other => panic!("expected Definition error, got {other:?}"),
  }
}
