// sherpa/src/wizard/execution.rs

//! Contains the `Wizard::run()` method: the step-sequencing loop driving the
//! per-step lifecycle (skip check, before callback, execute, after callback,
//! state merge, validation callback, navigation decision).

use crate::context::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::registry::CallbackOutcome;
use crate::state::{StateData, WizardState};
use crate::step::{CallbackSlot, StepOutput};
use crate::wizard::definition::Wizard;
use crate::wizard::WizardOutcome;
use tracing::{event, instrument, span, Level};

impl Wizard {
  /// Executes the wizard against the given shared state handle.
  ///
  /// The state is seeded by merging, in increasing precedence: the wizard's
  /// `global_state`, the load-time initial state, and `initial_state`. Each
  /// layer fully overwrites overlapping keys (flat merge).
  ///
  /// Because the caller retains its own clone of `state`, the accumulated
  /// state stays observable after every outcome: normal completion, user
  /// abort (`Ok(WizardOutcome::Aborted)`), and fatal errors alike.
  #[instrument(
        name = "Wizard::run",
        skip_all,
        fields(
            wizard = %self.name,
            num_steps = self.steps.len(),
        ),
        err(Display)
    )]
  pub async fn run(
    &mut self,
    state: StateData,
    initial_state: WizardState,
  ) -> WizardResult<WizardOutcome> {
    event!(Level::DEBUG, "Wizard execution starting.");

    {
      let mut guard = state.write();
      for (key, value) in self.global_state.clone() {
        guard.insert(key, value);
      }
      for (key, value) in self.initial_state.clone() {
        guard.insert(key, value);
      }
      for (key, value) in initial_state {
        guard.insert(key, value);
      }
    }

    let mut index = 0usize;
    while index < self.steps.len() {
      let step_id = self.steps[index].id().to_string();
      let step_type = self.steps[index].kind_name();

      let step_span = span!(
        Level::INFO,
        "wizard_step",
        step_id = %step_id,
        step_index = index,
        step_type = step_type
      );
      let _step_span_guard = step_span.enter();
      event!(Level::DEBUG, "Processing step.");

      let ctx = WizardContext {
        wizard_name: self.name.clone(),
        step_id: step_id.clone(),
        step_index: index,
        step_count: self.steps.len(),
      };

      // 1. Skip check. Evaluation failure is fail-open: log and execute the
      //    step rather than aborting the run.
      let condition = self.steps[index].meta.skip_condition.clone();
      if !condition.is_empty() {
        let snapshot = state.snapshot();
        match self.evaluator.evaluate(&condition, &snapshot) {
          Ok(true) => {
            event!(Level::INFO, "Step skipped due to skip condition.");
            index += 1;
            continue;
          }
          Ok(false) => {}
          Err(err) => {
            event!(Level::WARN, error = %err, "Skip condition failed to evaluate; executing step.");
          }
        }
      }

      // 2. BEFORE callback. Only errors matter here; result and next-step
      //    outputs are ignored for this slot.
      match self.invoke_lifecycle(&ctx, &state, index, CallbackSlot::Before).await {
        Ok(_) => {}
        Err(err) if err.is_user_abort() => return Ok(WizardOutcome::Aborted),
        Err(err) => return Err(err),
      }

      // 3. Execute.
      let output = match self.execute_step(index, &ctx, &state).await {
        Ok(output) => output,
        Err(err) if err.is_user_abort() => {
          event!(Level::INFO, "Run aborted by user.");
          return Ok(WizardOutcome::Aborted);
        }
        Err(err) if err.is_not_implemented() => {
          event!(Level::WARN, error = %err, "Step is not implemented; continuing with empty result.");
          StepOutput::empty()
        }
        Err(err) => {
          event!(Level::ERROR, error = %err, "Step execution failed.");
          return Err(attach_step_context(err, &step_id, step_type));
        }
      };

      // 4. AFTER callback. Invoked against the state BEFORE this step's
      //    result is merged, mirroring "before". Callers rely on this
      //    ordering; do not reorder relative to the merge.
      match self.invoke_lifecycle(&ctx, &state, index, CallbackSlot::After).await {
        Ok(_) => {}
        Err(err) if err.is_user_abort() => return Ok(WizardOutcome::Aborted),
        Err(err) => return Err(err),
      }

      // 5. State merge: flat overwrite, no conflict detection.
      if !output.result.is_empty() {
        event!(Level::DEBUG, merged_keys = output.result.len(), "Merging step result into state.");
        state.merge(output.result);
      }

      // The step records its chosen branch on itself; the navigation
      // decision below consumes it when no callback overrides.
      if let Some(target) = output.next_step {
        self.steps[index].meta.next_step = Some(target);
      }

      // 6. VALIDATION callback: gates continuation on the post-merge state.
      match self.invoke_lifecycle(&ctx, &state, index, CallbackSlot::Validation).await {
        Ok(_) => {}
        Err(err) if err.is_user_abort() => return Ok(WizardOutcome::Aborted),
        Err(err) => return Err(err),
      }

      // 7. Navigation decision: callback override wins, then the step's
      //    next_step hint, then linear progression.
      let override_target = match self
        .invoke_lifecycle(&ctx, &state, index, CallbackSlot::Navigation)
        .await
      {
        Ok(outcome) => outcome
          .and_then(|o: CallbackOutcome| o.next_step)
          .filter(|t| !t.is_empty()),
        Err(err) if err.is_user_abort() => return Ok(WizardOutcome::Aborted),
        Err(err) => return Err(err),
      };

      let target = override_target.or_else(|| {
        self.steps[index]
          .meta
          .next_step
          .clone()
          .filter(|t| !t.is_empty())
      });

      index = match target {
        Some(target) => {
          let next = self
            .step_index(&target)
            .ok_or_else(|| WizardError::NavigationTarget {
              step_id: step_id.clone(),
              target: target.clone(),
            })?;
          event!(Level::INFO, next_step = %target, next_index = next, "Navigation redirected.");
          next
        }
        None => index + 1,
      };

      event!(Level::DEBUG, next_index = index, "Step processing finished.");
    }

    event!(Level::DEBUG, "Wizard execution completed.");
    Ok(WizardOutcome::Completed)
  }

  async fn execute_step(
    &self,
    index: usize,
    ctx: &WizardContext,
    state: &StateData,
  ) -> WizardResult<StepOutput> {
    let step = &self.steps[index];
    event!(Level::DEBUG, "Executing step.");
    step
      .execute(ctx, state, self.ui.as_ref(), self.callbacks.as_deref())
      .await
  }

  /// Looks up and invokes the lifecycle callback named for `slot`, if any.
  ///
  /// An unregistered name (or a missing registry) is a warning, not an
  /// error. A failing callback is fatal, unless the failure is the
  /// user-abort sentinel, which is surfaced unwrapped so the run loop can
  /// classify it.
  async fn invoke_lifecycle(
    &self,
    ctx: &WizardContext,
    state: &StateData,
    index: usize,
    slot: CallbackSlot,
  ) -> WizardResult<Option<CallbackOutcome>> {
    let step = &self.steps[index];
    let Some(name) = step.meta.callback_name(slot) else {
      return Ok(None);
    };

    let Some(registry) = self.callbacks.as_deref() else {
      event!(
        Level::WARN,
        callback_name = %name,
        slot = slot.as_str(),
        "Callback named but no registry attached; proceeding."
      );
      return Ok(None);
    };

    let Some(callback) = registry.lifecycle(name) else {
      event!(
        Level::WARN,
        callback_name = %name,
        slot = slot.as_str(),
        "Callback is not registered; proceeding."
      );
      return Ok(None);
    };

    event!(Level::TRACE, callback_name = %name, slot = slot.as_str(), "Invoking lifecycle callback.");
    match callback(ctx.clone(), state.clone()).await {
      Ok(outcome) => Ok(Some(outcome)),
      Err(source) => {
        event!(Level::ERROR, callback_name = %name, slot = slot.as_str(), error = %source, "Lifecycle callback failed.");
        if source
          .downcast_ref::<WizardError>()
          .map_or(false, WizardError::is_user_abort)
        {
          return Err(WizardError::UserAborted);
        }
        Err(WizardError::Callback {
          step_id: step.id().to_string(),
          name: name.to_string(),
          source,
        })
      }
    }
  }
}

/// Wraps a fatal execution error with step id/type context, unless the error
/// already carries it.
fn attach_step_context(err: WizardError, step_id: &str, step_type: &'static str) -> WizardError {
  match err {
    err @ (WizardError::Configuration { .. }
    | WizardError::Callback { .. }
    | WizardError::NavigationTarget { .. }
    | WizardError::StepFailed { .. }) => err,
    other => WizardError::StepFailed {
      step_id: step_id.to_string(),
      step_type: step_type.to_string(),
      source: anyhow::Error::new(other),
    },
  }
}
