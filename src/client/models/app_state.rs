use crate::client::models::selection::{Preview, SelectedFile};
use crate::client::services::response_parser::{classify, Classification, VerificationResponse};
use crate::common::errors::UploadError;
use chrono::{DateTime, Local};
use log::{info, warn};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Ready,
    Submitting,
    Settled,
}

/// What the view needs to launch one upload.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub generation: u64,
    pub file: SelectedFile,
}

/// Whether a finished request was applied to the view or thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Applied,
    Stale,
}

/// Stato della schermata di upload.
#[derive(Debug, Default)]
pub struct UploadState {
    pub selected_file: Option<SelectedFile>,
    pub preview: Option<Preview>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    /// JSON body that came back with a non-2xx status.
    pub error_body: Option<Value>,
    pub last_result: Option<Value>,
    pub settled_at: Option<DateTime<Local>>,
    generation: u64,
}

impl UploadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> UploadPhase {
        if self.is_loading {
            UploadPhase::Submitting
        } else if self.selected_file.is_none() {
            UploadPhase::Idle
        } else if self.error_message.is_some() || self.last_result.is_some() {
            UploadPhase::Settled
        } else {
            UploadPhase::Ready
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && !self.is_loading
    }

    /// Store a newly selected file. The previous preview is dropped (and so
    /// released) before the new one takes its place. A request still in
    /// flight becomes stale.
    pub fn select_file(&mut self, file: SelectedFile, preview: Preview) {
        if self.is_loading {
            info!("[UPLOAD] new selection while request #{} in flight, it will be ignored", self.generation);
        }
        self.preview.take();
        info!("[UPLOAD] selected {} ({} bytes, {})", file.file_name, file.size(), file.mime);
        self.generation += 1;
        self.selected_file = Some(file);
        self.preview = Some(preview);
        self.is_loading = false;
        self.clear_outcome();
    }

    /// A selection that failed validation: back to Idle with a message.
    pub fn reject_selection(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("[UPLOAD] selection rejected: {}", message);
        self.preview.take();
        self.generation += 1;
        self.selected_file = None;
        self.is_loading = false;
        self.clear_outcome();
        self.error_message = Some(message);
    }

    /// Ready -> Submitting. Returns `None` (and changes nothing) when there is
    /// no file or a request is already outstanding.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if !self.can_submit() {
            return None;
        }
        let file = self.selected_file.clone()?;
        self.generation += 1;
        self.is_loading = true;
        self.error_message = None;
        self.error_body = None;
        info!("[UPLOAD] request #{} for {}", self.generation, file.file_name);
        Some(SubmitTicket {
            generation: self.generation,
            file,
        })
    }

    /// Submitting -> Settled, unless the outcome belongs to an older request.
    pub fn settle(&mut self, generation: u64, outcome: Result<Value, UploadError>) -> SettleOutcome {
        if !self.is_loading || generation != self.generation {
            warn!(
                "[UPLOAD] dropping stale response for request #{} (current #{})",
                generation, self.generation
            );
            return SettleOutcome::Stale;
        }
        self.is_loading = false;
        self.settled_at = Some(Local::now());
        match outcome {
            Ok(result) => {
                self.error_message = None;
                self.error_body = None;
                self.last_result = Some(result);
                info!("[UPLOAD] request #{} settled: {:?}", generation, self.classification().label);
            }
            Err(err) => {
                warn!("[UPLOAD] request #{} failed ({}): {}", generation, err.kind(), err);
                self.last_result = None;
                self.error_body = err.body().cloned();
                self.error_message = Some(err.to_string());
            }
        }
        SettleOutcome::Applied
    }

    pub fn classification(&self) -> Classification {
        classify(self.last_result.as_ref())
    }

    pub fn parsed_result(&self) -> Option<VerificationResponse> {
        self.last_result.as_ref().map(VerificationResponse::decode)
    }

    /// Release the preview; the view is going away.
    pub fn teardown(&mut self) {
        self.preview.take();
    }

    fn clear_outcome(&mut self) {
        self.error_message = None;
        self.error_body = None;
        self.last_result = None;
        self.settled_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::selection::PreviewRegistry;
    use crate::client::services::response_parser::StatusTone;
    use serde_json::json;

    fn pick(state: &mut UploadState, registry: &PreviewRegistry, name: &str) -> u64 {
        let file = SelectedFile::new(name, "image/png", vec![1, 2, 3]);
        let preview = registry.acquire(&file);
        let id = preview.id();
        state.select_file(file, preview);
        id
    }

    #[test]
    fn submit_without_file_is_a_no_op() {
        let mut state = UploadState::new();
        assert_eq!(state.phase(), UploadPhase::Idle);
        assert!(state.begin_submit().is_none());
        assert_eq!(state.phase(), UploadPhase::Idle);
        assert!(!state.is_loading);
    }

    #[test]
    fn second_submit_while_loading_is_ignored() {
        let registry = PreviewRegistry::new();
        let mut state = UploadState::new();
        pick(&mut state, &registry, "a.png");
        assert!(state.begin_submit().is_some());
        assert!(state.begin_submit().is_none());
        assert_eq!(state.phase(), UploadPhase::Submitting);
    }

    #[test]
    fn v2_success_settles_with_affirmative_badge() {
        let registry = PreviewRegistry::new();
        let mut state = UploadState::new();
        pick(&mut state, &registry, "a.png");
        let ticket = state.begin_submit().expect("ticket");
        let body = json!({"prediction": {"status": {"success": true}}});
        assert_eq!(state.settle(ticket.generation, Ok(body.clone())), SettleOutcome::Applied);

        assert_eq!(state.phase(), UploadPhase::Settled);
        assert_eq!(state.last_result, Some(body));
        assert!(state.error_message.is_none());
        assert_eq!(state.classification().label, Some("Success"));
        assert_eq!(state.classification().tone(), StatusTone::Affirmative);
        assert!(state.settled_at.is_some());
    }

    #[test]
    fn failure_clears_result_and_loading() {
        let registry = PreviewRegistry::new();
        let mut state = UploadState::new();
        pick(&mut state, &registry, "a.png");
        let first = state.begin_submit().expect("ticket");
        state.settle(first.generation, Ok(json!({"OK": true})));

        // user reselects and tries again, this time the network is down
        pick(&mut state, &registry, "b.png");
        let second = state.begin_submit().expect("ticket");
        state.settle(second.generation, Err(UploadError::Transport("connection refused".into())));

        assert!(!state.is_loading);
        assert!(state.last_result.is_none());
        assert_eq!(state.error_message.as_deref(), Some("Network error: connection refused"));
        assert_eq!(state.classification(), Classification::UNKNOWN);
    }

    #[test]
    fn http_error_body_is_kept_apart_from_result() {
        let registry = PreviewRegistry::new();
        let mut state = UploadState::new();
        pick(&mut state, &registry, "a.gif");
        let ticket = state.begin_submit().expect("ticket");
        let body = json!({"status": "error", "message": "Invalid file type. Use 'jpg', 'jpeg', or 'png'"});
        state.settle(
            ticket.generation,
            Err(UploadError::HttpStatus { status: 400, reason: Some("Bad Request".into()), body: Some(body.clone()) }),
        );
        assert_eq!(state.error_message.as_deref(), Some("Request failed with status code 400"));
        assert_eq!(state.error_body, Some(body));
        assert!(state.last_result.is_none());
    }

    #[test]
    fn reselect_releases_previous_preview_once() {
        let registry = PreviewRegistry::new();
        let mut state = UploadState::new();
        let a = pick(&mut state, &registry, "a.png");
        let b = pick(&mut state, &registry, "b.png");

        assert_eq!(state.preview.as_ref().map(|p| p.id()), Some(b));
        assert_eq!(state.preview.as_ref().map(|p| p.file_name().to_string()).as_deref(), Some("b.png"));
        assert_eq!(registry.release_count(a), 1);
        assert_eq!(registry.release_count(b), 0);
        assert_eq!(registry.live_count(), 1);

        state.teardown();
        assert_eq!(registry.release_count(a), 1);
        assert_eq!(registry.release_count(b), 1);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn response_for_superseded_request_is_dropped() {
        let registry = PreviewRegistry::new();
        let mut state = UploadState::new();
        pick(&mut state, &registry, "a.png");
        let stale = state.begin_submit().expect("ticket");

        pick(&mut state, &registry, "b.png");
        assert_eq!(state.phase(), UploadPhase::Ready);
        assert!(state.can_submit());

        let outcome = state.settle(stale.generation, Ok(json!({"OK": true})));
        assert_eq!(outcome, SettleOutcome::Stale);
        assert!(state.last_result.is_none());
        assert_eq!(state.phase(), UploadPhase::Ready);
    }

    #[test]
    fn rejected_selection_goes_back_to_idle() {
        let registry = PreviewRegistry::new();
        let mut state = UploadState::new();
        let a = pick(&mut state, &registry, "a.png");
        state.reject_selection("File is too large");
        assert_eq!(state.phase(), UploadPhase::Idle);
        assert_eq!(registry.release_count(a), 1);
        assert!(state.preview.is_none());
        assert_eq!(state.error_message.as_deref(), Some("File is too large"));
        assert!(state.begin_submit().is_none());
    }
}
