use alloy_primitives::U256;
use shared::{
    domain::{ArtistId, CommissionDraft, CommissionRequest, DraftField, Receipt, SubmissionState},
    error::{CommissionError, FailureReason},
};
use tokio::sync::watch;
use tracing::debug;
use url::Url;

/// Draft and modal state for one commission dialog.
///
/// Each `open` starts a new modal session. A submission captures the session it
/// started in. Its outcome always lands in the submission state, but the draft
/// and modal are only touched if that session is still the current, visible one.
pub struct CommissionFormStore {
    draft: CommissionDraft,
    modal_visible: bool,
    session: u64,
    disposed: bool,
    submission: watch::Sender<SubmissionState>,
}

impl Default for CommissionFormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CommissionFormStore {
    pub fn new() -> Self {
        let (submission, _) = watch::channel(SubmissionState::Idle);
        Self {
            draft: CommissionDraft::default(),
            modal_visible: false,
            session: 0,
            disposed: false,
            submission,
        }
    }

    pub fn open(&mut self, artist: ArtistId) {
        self.session += 1;
        self.draft = CommissionDraft::for_artist(artist);
        self.modal_visible = true;
        if !self.submission_state().is_pending() {
            self.set_submission_state(SubmissionState::Idle);
        }
        debug!(artist = artist.0, session = self.session, "commission modal opened");
    }

    pub fn update(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value.into());
    }

    /// Hides the modal and discards the draft. An in-flight submission keeps running.
    pub fn close(&mut self) {
        self.modal_visible = false;
        self.draft = CommissionDraft::default();
        if self.submission_state().is_settled() {
            self.set_submission_state(SubmissionState::Idle);
        }
    }

    pub fn reset(&mut self) {
        self.draft.clear_fields();
    }

    pub fn set_submission_state(&mut self, state: SubmissionState) {
        self.submission.send_replace(state);
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.submission.subscribe()
    }

    pub fn draft(&self) -> &CommissionDraft {
        &self.draft
    }

    pub fn target_artist(&self) -> Option<ArtistId> {
        self.draft.target_artist
    }

    pub fn is_modal_visible(&self) -> bool {
        self.modal_visible
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn validate(&self) -> Result<(), CommissionError> {
        validate_draft(&self.draft)
    }

    /// Validated snapshot of the draft with the fixed fee attached.
    pub fn request(&self, attached_value: U256) -> Result<CommissionRequest, CommissionError> {
        self.validate()?;
        Ok(CommissionRequest {
            title: self.draft.title.trim().to_string(),
            description: self.draft.description.trim().to_string(),
            reference_url: self.draft.reference_url.trim().to_string(),
            attached_value,
        })
    }

    /// Applies the result of a submission started in `session`.
    ///
    /// Returns `false` when the store has been disposed and the result was dropped.
    pub fn settle(&mut self, session: u64, outcome: &Result<Receipt, CommissionError>) -> bool {
        if self.disposed {
            return false;
        }

        let current = session == self.session && self.modal_visible;
        match outcome {
            Ok(receipt) => {
                self.set_submission_state(SubmissionState::Succeeded(receipt.clone()));
                if current {
                    self.reset();
                    self.modal_visible = false;
                }
            }
            Err(err) => {
                self.set_submission_state(SubmissionState::Failed(FailureReason::from(err)));
            }
        }
        if !current {
            debug!(session, current = self.session, "result recorded for a stale modal session");
        }
        true
    }
}

/// Title and description must be non-blank; a reference, if given, must parse as a URL.
pub fn validate_draft(draft: &CommissionDraft) -> Result<(), CommissionError> {
    if draft.title.trim().is_empty() {
        return Err(CommissionError::Validation(DraftField::Title));
    }
    if draft.description.trim().is_empty() {
        return Err(CommissionError::Validation(DraftField::Description));
    }
    let reference = draft.reference_url.trim();
    if !reference.is_empty() && Url::parse(reference).is_err() {
        return Err(CommissionError::Validation(DraftField::ReferenceUrl));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
