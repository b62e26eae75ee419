//! Form engine - owns the form state and drives the submission lifecycle

use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error, info, warn};

use crate::field::FieldName;
use crate::rules::RuleSet;
use crate::state::{FormState, FormValues};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Receives the flattened values of a valid form
///
/// Implemented for any `Fn(FormValues) -> impl Future<Output = anyhow::Result<()>>`.
pub trait SubmitHandler: Send + Sync {
    fn submit(&self, values: FormValues) -> BoxFuture<'_, anyhow::Result<()>>;
}

impl<F, Fut> SubmitHandler for F
where
    F: Fn(FormValues) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    fn submit(&self, values: FormValues) -> BoxFuture<'_, anyhow::Result<()>> {
        Box::pin((self)(values))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
}

/// What a call to [`FormEngine::attempt_submit`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the handler was not called
    Invalid,
    /// Another submit is still pending; nothing changed
    AlreadySubmitting,
    /// Handler succeeded and the form was reset
    Submitted,
    /// Handler failed; the validated form was kept
    HandlerFailed,
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub fields: FormState,
    pub submission: SubmissionState,
    pub is_form_valid: bool,
}

impl FormSnapshot {
    /// Whether a submit control should be enabled
    pub fn can_submit(&self) -> bool {
        self.is_form_valid && self.submission != SubmissionState::Submitting
    }
}

struct EngineState {
    form: FormState,
    submission: SubmissionState,
}

/// Stateful core of one form session
///
/// Cloning gives another handle to the same session.
#[derive(Clone)]
pub struct FormEngine {
    rules: Arc<RuleSet>,
    handler: Arc<dyn SubmitHandler>,
    state: Arc<RwLock<EngineState>>,
}

impl FormEngine {
    pub fn new<H>(rules: RuleSet, handler: H) -> Self
    where
        H: SubmitHandler + 'static,
    {
        Self {
            rules: Arc::new(rules),
            handler: Arc::new(handler),
            state: Arc::new(RwLock::new(EngineState {
                form: FormState::default(),
                submission: SubmissionState::Idle,
            })),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Re-validates `name` with `value`, plus the password/confirmation link
    pub fn edit_field(&self, name: FieldName, value: impl Into<String>) {
        let mut state = write_state(&self.state);
        state.form.apply_edit(&self.rules, name, value.into());

        let field = state.form.field(name);
        debug!(field = %name, valid = field.valid, "field edited");
    }

    pub fn blur_field(&self, name: FieldName) {
        write_state(&self.state).form.apply_blur(name);
        debug!(field = %name, "field blurred");
    }

    /// Validates every field and, if the form passes, hands its values to
    /// the submit handler
    ///
    /// Refuses to start while an earlier submit is pending. The state lock
    /// is released before the handler is awaited. If the returned future is
    /// dropped or the handler panics, the engine goes back to `Idle` with
    /// the validated form kept.
    pub async fn attempt_submit(&self) -> SubmitOutcome {
        let values = {
            let mut state = write_state(&self.state);
            if state.submission == SubmissionState::Submitting {
                warn!("submit ignored, a submission is already in progress");
                return SubmitOutcome::AlreadySubmitting;
            }

            state.form = state.form.validated(&self.rules);
            if !state.form.is_submittable() {
                state.submission = SubmissionState::Idle;
                let invalid: Vec<&str> = state
                    .form
                    .iter()
                    .filter(|(_, field)| !field.valid)
                    .map(|(name, _)| name.as_str())
                    .collect();
                info!(?invalid, "submit blocked by validation");
                return SubmitOutcome::Invalid;
            }

            state.submission = SubmissionState::Submitting;
            state.form.values()
        };

        info!("submitting form");
        let pending = PendingSubmit::new(&self.state);
        let result = self.handler.submit(values).await;
        pending.finish();

        let mut state = write_state(&self.state);
        match result {
            Ok(()) => {
                state.form = FormState::default();
                state.submission = SubmissionState::Success;
                info!("form submitted");
                SubmitOutcome::Submitted
            }
            Err(err) => {
                state.submission = SubmissionState::Idle;
                error!(error = %err, "form submission failed");
                SubmitOutcome::HandlerFailed
            }
        }
    }

    /// Clears every field and returns to `Idle`
    ///
    /// Returns false, and changes nothing, while a submission is pending.
    pub fn reset(&self) -> bool {
        let mut state = write_state(&self.state);
        if state.submission == SubmissionState::Submitting {
            warn!("reset ignored, a submission is in progress");
            return false;
        }
        state.form = FormState::default();
        state.submission = SubmissionState::Idle;
        debug!("form reset");
        true
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let state = read_state(&self.state);
        FormSnapshot {
            fields: state.form.clone(),
            submission: state.submission,
            is_form_valid: state.form.is_submittable(),
        }
    }

    /// Continuous form validity, same predicate the submit path uses
    pub fn is_form_valid(&self) -> bool {
        read_state(&self.state).form.is_submittable()
    }

    pub fn submission_state(&self) -> SubmissionState {
        read_state(&self.state).submission
    }
}

/// Puts the engine back to `Idle` unless the handler ran to completion
struct PendingSubmit<'a> {
    state: &'a RwLock<EngineState>,
    armed: bool,
}

impl<'a> PendingSubmit<'a> {
    fn new(state: &'a RwLock<EngineState>) -> Self {
        Self { state, armed: true }
    }

    fn finish(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = write_state(self.state);
        if state.submission == SubmissionState::Submitting {
            state.submission = SubmissionState::Idle;
            warn!("submission abandoned before the handler finished");
        }
    }
}

// A panic elsewhere cannot leave the form half-written, so poisoning is ignored
fn read_state(lock: &RwLock<EngineState>) -> RwLockReadGuard<'_, EngineState> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_state(lock: &RwLock<EngineState>) -> RwLockWriteGuard<'_, EngineState> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
