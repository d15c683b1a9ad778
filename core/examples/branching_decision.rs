// sherpa/examples/branching_decision.rs

use sherpa::{StateData, Wizard, WizardError, WizardState};
use tracing::info;

// A decision step routing to one of two branches via its next_step_map. No
// navigation callback involved: the recorded branch drives the jump.
const WIZARD_YAML: &str = r#"
name: branching-decision
steps:
  - id: pick_path
    type: decision
    title: Which setup do you want?
    target_key: setup_kind
    choices: [quick, custom]
    next_step_map:
      quick: quick_info
      custom: custom_form
  - id: custom_form
    type: form
    title: Custom setup
    next_step: done
    fields:
      - type: input
        key: data_dir
        title: Data directory
      - type: confirm
        key: enable_metrics
        title: Enable metrics?
  - id: quick_info
    type: info
    title: Quick setup
    content: Sensible defaults will be applied.
  - id: done
    type: summary
    title: Chosen configuration
"#;

#[tokio::main]
async fn main() -> Result<(), WizardError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let mut wizard = Wizard::from_yaml_str(WIZARD_YAML)?;

  let state = StateData::default();
  let outcome = wizard.run(state.clone(), WizardState::new()).await?;
  info!(?outcome, "Run finished.");

  info!("Final state: {}", serde_json::Value::Object(state.snapshot()));
  Ok(())
}
