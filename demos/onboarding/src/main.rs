// sherpa_project/demos/onboarding/src/main.rs

//! Runs the bundled onboarding wizard: loads the YAML definition, wires up
//! callbacks, and prints the final state as YAML.
//!
//! Usage:
//!   onboarding_demo [WIZARD_FILE] [key=value ...]
//!
//! Positional `key=value` pairs seed the initial state, overwriting any
//! overlapping keys from the document's `global_state`.

use serde_json::{json, Value};
use sherpa::{
  ActionCallbackResult, CallbackOutcome, CallbackRegistry, StateData, Wizard, WizardOutcome,
  WizardState,
};
use std::sync::Arc;
use tracing::Level;

const DEFAULT_WIZARD: &str = include_str!("../wizard.yaml");

fn build_registry() -> CallbackRegistry {
  let mut registry = CallbackRegistry::new();

  registry.register_lifecycle("check_basics", |_ctx, state| async move {
    let named = state
      .read()
      .get("project_name")
      .and_then(Value::as_str)
      .map_or(false, |name| !name.trim().is_empty());
    if named {
      Ok(CallbackOutcome::empty())
    } else {
      Err(anyhow::anyhow!("a project name is required"))
    }
  });

  registry.register_action("create_workspace", |ctx, state, args| async move {
    let dry_run = args.get("dry_run").and_then(Value::as_bool).unwrap_or(false);
    let name = state
      .read()
      .get("project_name")
      .and_then(Value::as_str)
      .unwrap_or("unnamed")
      .to_string();
    tracing::info!(step = %ctx.step_id, %name, dry_run, "Creating workspace.");
    tokio::time::sleep(std::time::Duration::from_millis(400)).await;
    Ok(ActionCallbackResult::Value(json!({
      "created": true,
      "dry_run": dry_run,
      "path": format!("./{}", name),
    })))
  });

  registry
}

/// Parses trailing `key=value` arguments into an initial-state map.
fn parse_initial_state(args: &[String]) -> WizardState {
  let mut state = WizardState::new();
  for arg in args {
    if let Some((key, value)) = arg.split_once('=') {
      state.insert(key.to_string(), Value::String(value.to_string()));
    }
  }
  state
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let args: Vec<String> = std::env::args().skip(1).collect();

  let (wizard_result, state_args) = match args.first() {
    Some(path) if !path.contains('=') => (Wizard::from_yaml_file(path), &args[1..]),
    _ => (Wizard::from_yaml_str(DEFAULT_WIZARD), &args[..]),
  };
  let mut wizard = wizard_result?.with_callbacks(Arc::new(build_registry()));

  let initial_state = parse_initial_state(state_args);

  let state = StateData::default();
  let outcome = wizard.run(state.clone(), initial_state).await;

  // The state handle is valid whatever happened; print it for diagnostics
  // before deciding how to exit.
  println!("\nWizard Results:");
  let final_state = state.snapshot();
  if final_state.is_empty() {
    println!("(No data collected)");
  } else {
    print!("{}", serde_yaml::to_string(&final_state)?);
  }

  match outcome? {
    WizardOutcome::Completed => tracing::info!("Wizard completed."),
    WizardOutcome::Aborted => tracing::warn!("Wizard aborted by user."),
  }

  Ok(())
}
