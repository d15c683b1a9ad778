// sherpa/examples/action_callbacks.rs

use serde_json::json;
use sherpa::{
  ActionCallbackResult, CallbackOutcome, CallbackRegistry, StateData, Wizard, WizardError,
  WizardState,
};
use std::sync::Arc;
use tracing::info;

// An action step dispatched through the callback registry, plus a validation
// callback gating the form step. Remove the registry to see simulation mode.
const WIZARD_YAML: &str = r#"
name: action-callbacks
steps:
  - id: target
    type: form
    title: Deployment target
    validation: check_target
    fields:
      - type: input
        key: host
        title: Host to deploy to
  - id: deploy
    type: action
    title: Deploying
    action_type: function
    function_name: deploy_release
    arguments:
      channel: stable
    output_key: deploy_result
  - id: review
    type: summary
    title: Deployment summary
    sections:
      - title: Result
        fields: [host, deploy_result]
"#;

#[tokio::main]
async fn main() -> Result<(), WizardError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let mut registry = CallbackRegistry::new();

  registry.register_lifecycle("check_target", |_ctx, state| async move {
    let ok = state
      .read()
      .get("host")
      .and_then(|v| v.as_str())
      .map_or(false, |h| !h.is_empty());
    if ok {
      Ok(CallbackOutcome::empty())
    } else {
      Err(anyhow::anyhow!("a deployment host is required"))
    }
  });

  registry.register_action("deploy_release", |ctx, state, args| async move {
    let host = state
      .read()
      .get("host")
      .and_then(|v| v.as_str())
      .unwrap_or("unknown")
      .to_string();
    let channel = args.get("channel").cloned().unwrap_or(json!("default"));
    info!(step = %ctx.step_id, %host, "Pretending to deploy.");
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    Ok(ActionCallbackResult::Value(json!({
      "host": host,
      "channel": channel,
      "status": "deployed",
    })))
  });

  let mut wizard = Wizard::from_yaml_str(WIZARD_YAML)?.with_callbacks(Arc::new(registry));

  let state = StateData::default();
  let outcome = wizard.run(state.clone(), WizardState::new()).await?;
  info!(?outcome, "Run finished.");
  info!("Final state: {}", serde_json::Value::Object(state.snapshot()));
  Ok(())
}
