// sherpa/examples/linear_onboarding.rs

use serde_json::json;
use sherpa::{StateData, Wizard, WizardError, WizardOutcome, WizardState};
use tracing::info;

// A linear three-step wizard authored in YAML: collect a name, show it back,
// review. Run it in a terminal; every prompt is interactive.
const WIZARD_YAML: &str = r#"
name: linear-onboarding
description: Minimal linear flow
steps:
  - id: welcome
    type: info
    title: Welcome
    content: This wizard walks you through a two-field profile.
  - id: profile
    type: form
    title: Your profile
    fields:
      - type: input
        key: name
        title: What is your name?
      - type: confirm
        key: subscribed
        title: Subscribe to the newsletter?
  - id: review
    type: summary
    title: Review
    sections:
      - title: Profile
        fields: [name, subscribed]
"#;

#[tokio::main]
async fn main() -> Result<(), WizardError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let mut wizard = Wizard::from_yaml_str(WIZARD_YAML)?;

  let state = StateData::new(WizardState::new());
  let mut initial = WizardState::new();
  initial.insert("source".to_string(), json!("example"));

  let outcome = wizard.run(state.clone(), initial).await?;

  match outcome {
    WizardOutcome::Completed => info!("Wizard completed."),
    WizardOutcome::Aborted => info!("Wizard aborted by user."),
  }

  info!("Final state:");
  for (key, value) in state.read().iter() {
    info!("- {} = {}", key, value);
  }

  Ok(())
}
