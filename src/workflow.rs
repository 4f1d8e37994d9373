//! The input-to-artifact workflow.
//!
//! ```text
//!            submit            render ok
//!   Idle ───────────▶ Generating ─────────▶ Displaying
//!    ▲  ▲                │  ▲                 │   │
//!    │  │ clear_error    │  │ submit /        │   │ invalid submit
//!    │  └──── Error ◀────┘  │ change_size     │   ▼
//!    │   render failed ▲    └─────────────────┘  Error
//!    │                 └──────────────────────────┘
//!    └──────────────── reset (from anywhere)
//! ```
//!
//! Rendering is the only step that suspends. Every generation takes a ticket when it starts;
//! a result is applied only if its ticket is still the newest when rendering finishes, so an
//! older request can never overwrite a newer one. `reset` also invalidates tickets.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::config::{Config, PixelSize};
use crate::error::{ExportError, GenerationError, WorkflowError};
use crate::filename::derive_filename;
use crate::helper::{DirectorySink, QrRenderer};
use crate::render::{RenderRequest, Renderer, SaveSink};
use crate::store::{Artifact, ArtifactStore};
use crate::validate::{trim, TextValidator, Validator};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    Idle,
    Generating,
    Displaying,
    Error,
}

/// How a generation request ended, when it did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The result is now the current artifact.
    Displayed(RenderRequest),
    /// A newer request or a reset started while rendering; the result was dropped.
    Superseded,
    /// Nothing to regenerate.
    Unchanged,
}

struct Session<H> {
    state: WorkflowState,
    notice: Option<WorkflowError>,
    store: ArtifactStore<H>,
    size: PixelSize,
    // Ticket of the newest generation started.
    generation: u64,
}

/// One user session: owns the current artifact and drives every transition.
///
/// Actions are expected to arrive one at a time from the presentation layer. Overlapping
/// calls are safe; the newest generation wins.
pub struct Workflow<R: Renderer, S: SaveSink> {
    renderer: R,
    sink: S,
    validator: Box<dyn Validator>,
    session: Mutex<Session<R::Handle>>,
    state_tx: watch::Sender<WorkflowState>,
}

impl Workflow<QrRenderer, DirectorySink> {
    /// A workflow using the bundled encoder that saves exports into `downloads`.
    pub fn bundled(config: &Config, downloads: impl Into<PathBuf>) -> Self {
        Self::new(
            QrRenderer::new(config.style),
            DirectorySink::new(downloads),
            config,
        )
    }
}

impl<R: Renderer, S: SaveSink> Workflow<R, S> {
    pub fn new(renderer: R, sink: S, config: &Config) -> Self {
        let (state_tx, _) = watch::channel(WorkflowState::Idle);
        Self {
            renderer,
            sink,
            validator: Box::new(TextValidator),
            session: Mutex::new(Session {
                state: WorkflowState::Idle,
                notice: None,
                store: ArtifactStore::default(),
                size: config.initial_size,
                generation: 0,
            }),
            state_tx,
        }
    }

    /// Replaces the stock [`TextValidator`].
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn state(&self) -> WorkflowState {
        self.session.lock().state
    }

    /// The error currently shown to the user, if any.
    pub fn last_error(&self) -> Option<WorkflowError> {
        self.session.lock().notice.clone()
    }

    pub fn current_size(&self) -> PixelSize {
        self.session.lock().size
    }

    pub fn current_request(&self) -> Option<RenderRequest> {
        self.session
            .lock()
            .store
            .current()
            .map(|artifact| artifact.request().clone())
    }

    /// Runs `f` on the current artifact. The handle stays owned by the workflow.
    pub fn with_artifact<T>(&self, f: impl FnOnce(&Artifact<R::Handle>) -> T) -> Option<T> {
        self.session.lock().store.current().map(f)
    }

    /// State changes, for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.state_tx.subscribe()
    }

    /// Live feedback while the user types. Clears the error notice once there is something to
    /// submit and returns whether submitting should be enabled.
    pub fn input_changed(&self, raw: &str) -> bool {
        let ready = !trim(raw).is_empty();
        if ready {
            self.clear_error();
        }
        ready
    }

    /// Validates `raw` and renders it at the current size.
    ///
    /// Invalid input moves to [`WorkflowState::Error`] and leaves the current artifact alone.
    pub async fn submit(&self, raw: &str) -> Result<Completion, WorkflowError> {
        let (request, ticket) = {
            let mut session = self.session.lock();
            let content = match self.validator.validate(raw).into_result() {
                Ok(content) => content,
                Err(err) => {
                    debug!("rejected input: {err}");
                    let err = WorkflowError::from(err);
                    self.fail(&mut session, err.clone());
                    return Err(err);
                }
            };
            let request = RenderRequest::new(content, session.size);
            let ticket = self.begin(&mut session);
            (request, ticket)
        };
        self.generate(request, ticket).await
    }

    /// Regenerates the displayed content at `size` without validating it again.
    ///
    /// Only effective while displaying and when the size actually changes.
    pub async fn change_size(&self, size: PixelSize) -> Result<Completion, WorkflowError> {
        let (request, ticket) = {
            let mut session = self.session.lock();
            if session.state != WorkflowState::Displaying {
                return Ok(Completion::Unchanged);
            }
            let request = match session.store.current() {
                Some(artifact) if artifact.size() != size || session.size != size => {
                    artifact.request().resized(size)
                }
                _ => return Ok(Completion::Unchanged),
            };
            session.size = size;
            let ticket = self.begin(&mut session);
            (request, ticket)
        };
        self.generate(request, ticket).await
    }

    /// Drops the current artifact and any pending generation, and returns to idle.
    pub fn reset(&self) {
        let mut session = self.session.lock();
        session.generation += 1;
        session.store.clear();
        session.notice = None;
        self.transition(&mut session, WorkflowState::Idle);
    }

    /// Dismisses the error notice. From [`WorkflowState::Error`] this goes back to displaying
    /// if an artifact is still current, otherwise to idle.
    pub fn clear_error(&self) {
        let mut session = self.session.lock();
        session.notice = None;
        if session.state == WorkflowState::Error {
            let next = if session.store.is_empty() {
                WorkflowState::Idle
            } else {
                WorkflowState::Displaying
            };
            self.transition(&mut session, next);
        }
    }

    /// Encodes the current artifact as PNG and saves it. Returns the file name used.
    pub fn export(&self) -> Result<String, WorkflowError> {
        self.export_at(Utc::now())
    }

    /// [`Workflow::export`] with an explicit timestamp for the file name.
    ///
    /// Failures leave the artifact and the state as they were and only set the error notice.
    /// Exporting with nothing displayed is rejected without touching anything.
    pub fn export_at(&self, timestamp: DateTime<Utc>) -> Result<String, WorkflowError> {
        let mut session = self.session.lock();
        let encoded = match session.store.current() {
            Some(artifact) if session.state == WorkflowState::Displaying => {
                let filename = derive_filename(artifact.content().as_str(), timestamp);
                self.renderer
                    .encode_png(artifact.handle())
                    .map(|bytes| (filename, bytes))
            }
            _ => {
                warn!("no QR code to download");
                return Err(ExportError::NothingToExport.into());
            }
        };

        let saved = encoded
            .map_err(|err| ExportError::Encode {
                detail: err.to_string(),
            })
            .and_then(|(filename, bytes)| {
                self.sink.save(&bytes, &filename)?;
                Ok(filename)
            });

        match saved {
            Ok(filename) => {
                info!("QR code downloaded as {filename}");
                Ok(filename)
            }
            Err(err) => {
                warn!("download failed: {err}");
                let err = WorkflowError::from(err);
                session.notice = Some(err.clone());
                Err(err)
            }
        }
    }

    fn begin(&self, session: &mut Session<R::Handle>) -> u64 {
        session.generation += 1;
        session.notice = None;
        self.transition(session, WorkflowState::Generating);
        session.generation
    }

    async fn generate(&self, request: RenderRequest, ticket: u64) -> Result<Completion, WorkflowError> {
        let rendered = self.renderer.render(&request).await;

        let mut session = self.session.lock();
        if session.generation != ticket {
            debug!(
                "discarding superseded render result (ticket {ticket}, newest {})",
                session.generation
            );
            return Ok(Completion::Superseded);
        }

        match rendered {
            Ok(handle) => {
                info!(
                    "generated QR code for {} characters at {}",
                    request.content().char_len(),
                    request.size()
                );
                session.store.set(request.clone(), handle);
                session.notice = None;
                self.transition(&mut session, WorkflowState::Displaying);
                Ok(Completion::Displayed(request))
            }
            Err(err) => {
                error!("QR code generation failed: {err}");
                let err = WorkflowError::from(GenerationError::from(err));
                self.fail(&mut session, err.clone());
                Err(err)
            }
        }
    }

    fn fail(&self, session: &mut Session<R::Handle>, err: WorkflowError) {
        session.notice = Some(err);
        self.transition(session, WorkflowState::Error);
    }

    fn transition(&self, session: &mut Session<R::Handle>, next: WorkflowState) {
        if session.state != next {
            debug!("workflow {:?} -> {:?}", session.state, next);
        }
        session.state = next;
        self.state_tx.send_replace(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RenderError, SaveError, ValidationError};
    use crate::validate::{validate, ValidationResult};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::oneshot;

    #[derive(Debug)]
    struct Sketch {
        content: String,
        size: u32,
        released: Arc<AtomicUsize>,
    }

    impl Drop for Sketch {
        fn drop(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct Controls {
        renders: AtomicUsize,
        released: Arc<AtomicUsize>,
        fail_render: AtomicBool,
        fail_encode: AtomicBool,
        gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    }

    impl Controls {
        /// Holds rendering of `content` until the returned sender fires.
        fn gate(&self, content: &str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().insert(content.to_owned(), rx);
            tx
        }

        fn renders(&self) -> usize {
            self.renders.load(Ordering::SeqCst)
        }

        fn released(&self) -> usize {
            self.released.load(Ordering::SeqCst)
        }
    }

    struct FakeRenderer(Arc<Controls>);

    #[async_trait]
    impl Renderer for FakeRenderer {
        type Handle = Sketch;

        async fn render(&self, request: &RenderRequest) -> Result<Sketch, RenderError> {
            self.0.renders.fetch_add(1, Ordering::SeqCst);
            let gate = self.0.gates.lock().remove(request.content().as_str());
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if self.0.fail_render.load(Ordering::SeqCst) {
                return Err(RenderError::new("renderer exploded"));
            }
            Ok(Sketch {
                content: request.content().to_string(),
                size: request.size().get(),
                released: self.0.released.clone(),
            })
        }

        fn encode_png(&self, handle: &Sketch) -> Result<Vec<u8>, RenderError> {
            if self.0.fail_encode.load(Ordering::SeqCst) {
                return Err(RenderError::new("canvas tainted"));
            }
            Ok(format!("{}@{}", handle.content, handle.size).into_bytes())
        }
    }

    #[derive(Clone, Default)]
    struct MemorySink {
        saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
        fail: Arc<AtomicBool>,
    }

    impl SaveSink for MemorySink {
        fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(SaveError::InvalidName(filename.to_owned()));
            }
            self.saved.lock().push((filename.to_owned(), bytes.to_vec()));
            Ok(())
        }
    }

    /// Accepts the first input and rejects everything after it.
    struct OnceValidator(Arc<AtomicUsize>);

    impl Validator for OnceValidator {
        fn validate(&self, raw: &str) -> ValidationResult {
            if self.0.fetch_add(1, Ordering::SeqCst) > 0 {
                return ValidationResult::Invalid(ValidationError::Empty);
            }
            validate(raw)
        }
    }

    fn setup() -> (Workflow<FakeRenderer, MemorySink>, Arc<Controls>, MemorySink) {
        let controls = Arc::new(Controls::default());
        let sink = MemorySink::default();
        let workflow = Workflow::new(
            FakeRenderer(controls.clone()),
            sink.clone(),
            &Config::default(),
        );
        (workflow, controls, sink)
    }

    fn displayed_content(workflow: &Workflow<FakeRenderer, MemorySink>) -> Option<String> {
        workflow.with_artifact(|artifact| artifact.handle().content.clone())
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap()
    }

    #[tokio::test]
    async fn test_submit_displays_trimmed_content() {
        let (workflow, controls, _) = setup();
        assert_eq!(workflow.state(), WorkflowState::Idle);

        let completion = workflow.submit("  hello world \n").await.unwrap();
        let Completion::Displayed(request) = completion else {
            panic!("expected a displayed artifact");
        };
        assert_eq!(request.content().as_str(), "hello world");
        assert_eq!(request.size(), PixelSize::MEDIUM);

        assert_eq!(workflow.state(), WorkflowState::Displaying);
        assert_eq!(workflow.current_request(), Some(request));
        assert_eq!(displayed_content(&workflow).as_deref(), Some("hello world"));
        assert_eq!(workflow.last_error(), None);
        assert_eq!(controls.renders(), 1);
    }

    #[tokio::test]
    async fn test_invalid_submit_from_idle() {
        let (workflow, controls, _) = setup();

        let err = workflow.submit("   ").await.unwrap_err();
        assert_eq!(err, WorkflowError::Validation(ValidationError::Empty));
        assert_eq!(workflow.state(), WorkflowState::Error);
        assert_eq!(workflow.last_error(), Some(err));
        assert_eq!(controls.renders(), 0);

        workflow.clear_error();
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert_eq!(workflow.last_error(), None);
    }

    #[tokio::test]
    async fn test_too_long_submit_keeps_current_artifact() {
        let (workflow, _, _) = setup();
        workflow.submit("keep me").await.unwrap();

        let err = workflow.submit(&"x".repeat(2001)).await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Validation(ValidationError::TooLong { length: 2001, max: 2000 })
        ));
        assert_eq!(workflow.state(), WorkflowState::Error);
        assert_eq!(displayed_content(&workflow).as_deref(), Some("keep me"));

        workflow.clear_error();
        assert_eq!(workflow.state(), WorkflowState::Displaying);
    }

    #[tokio::test]
    async fn test_render_failure_is_a_generation_error() {
        let (workflow, controls, _) = setup();
        controls.fail_render.store(true, Ordering::SeqCst);

        let err = workflow.submit("boom").await.unwrap_err();
        assert_eq!(
            err,
            WorkflowError::Generation(GenerationError {
                detail: "renderer exploded".into()
            })
        );
        assert_eq!(workflow.state(), WorkflowState::Error);
        assert!(workflow.current_request().is_none());

        // retry from the error state
        controls.fail_render.store(false, Ordering::SeqCst);
        workflow.submit("boom").await.unwrap();
        assert_eq!(workflow.state(), WorkflowState::Displaying);
        assert_eq!(workflow.last_error(), None);
    }

    #[tokio::test]
    async fn test_render_failure_leaves_previous_artifact() {
        let (workflow, controls, _) = setup();
        workflow.submit("first").await.unwrap();
        controls.fail_render.store(true, Ordering::SeqCst);

        assert!(workflow.submit("second").await.is_err());
        assert_eq!(displayed_content(&workflow).as_deref(), Some("first"));
        assert_eq!(controls.released(), 0);
    }

    #[tokio::test]
    async fn test_change_size_regenerates_without_validation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (workflow, controls, _) = setup();
        let workflow = workflow.with_validator(OnceValidator(calls.clone()));

        workflow.submit("X").await.unwrap();
        let completion = workflow.change_size(PixelSize::XLARGE).await.unwrap();

        let Completion::Displayed(request) = completion else {
            panic!("expected a regeneration");
        };
        assert_eq!(request.content().as_str(), "X");
        assert_eq!(request.size().get(), 512);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(controls.renders(), 2);
        assert_eq!(controls.released(), 1);
        assert_eq!(workflow.current_size(), PixelSize::XLARGE);
        assert_eq!(
            workflow.with_artifact(|artifact| artifact.handle().size),
            Some(512)
        );
    }

    #[tokio::test]
    async fn test_change_size_without_content_is_noop() {
        let (workflow, controls, _) = setup();

        let completion = workflow.change_size(PixelSize::SMALL).await.unwrap();
        assert_eq!(completion, Completion::Unchanged);
        assert_eq!(workflow.current_size(), PixelSize::MEDIUM);
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert_eq!(controls.renders(), 0);
    }

    #[tokio::test]
    async fn test_change_size_to_same_size_is_noop() {
        let (workflow, controls, _) = setup();
        workflow.submit("same").await.unwrap();

        let completion = workflow.change_size(PixelSize::MEDIUM).await.unwrap();
        assert_eq!(completion, Completion::Unchanged);
        assert_eq!(controls.renders(), 1);
    }

    #[tokio::test]
    async fn test_repeated_submit_recreates_handle() {
        let (workflow, controls, _) = setup();
        workflow.submit("again").await.unwrap();
        workflow.submit("again").await.unwrap();

        assert_eq!(controls.renders(), 2);
        assert_eq!(controls.released(), 1);
        assert_eq!(displayed_content(&workflow).as_deref(), Some("again"));
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let (workflow, controls, _) = setup();
        workflow.submit("gone soon").await.unwrap();
        workflow.change_size(PixelSize::LARGE).await.unwrap();

        workflow.reset();
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.current_request().is_none());
        assert_eq!(workflow.last_error(), None);
        assert_eq!(controls.released(), 2);
        // size is a session setting, not part of the artifact
        assert_eq!(workflow.current_size(), PixelSize::LARGE);
    }

    #[tokio::test]
    async fn test_export_saves_png_under_derived_name() {
        let (workflow, _, sink) = setup();
        workflow.submit("Café déjà vu").await.unwrap();

        let filename = workflow.export_at(at()).unwrap();
        assert_eq!(filename, "qrcode-cafe-deja-vu-2024-05-01T12-30-05.png");

        let saved = sink.saved.lock();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, filename);
        assert_eq!(saved[0].1, "Café déjà vu@256".as_bytes());
    }

    #[tokio::test]
    async fn test_export_without_artifact_is_rejected() {
        let (workflow, _, sink) = setup();

        let err = workflow.export_at(at()).unwrap_err();
        assert_eq!(err, WorkflowError::Export(ExportError::NothingToExport));
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert_eq!(workflow.last_error(), None);
        assert!(sink.saved.lock().is_empty());
    }

    #[tokio::test]
    async fn test_export_failures_keep_artifact() {
        let (workflow, controls, sink) = setup();
        workflow.submit("precious").await.unwrap();

        controls.fail_encode.store(true, Ordering::SeqCst);
        let err = workflow.export_at(at()).unwrap_err();
        assert!(matches!(err, WorkflowError::Export(ExportError::Encode { .. })));
        assert_eq!(workflow.state(), WorkflowState::Displaying);
        assert_eq!(workflow.last_error(), Some(err));
        assert_eq!(displayed_content(&workflow).as_deref(), Some("precious"));

        controls.fail_encode.store(false, Ordering::SeqCst);
        sink.fail.store(true, Ordering::SeqCst);
        let err = workflow.export_at(at()).unwrap_err();
        assert!(matches!(err, WorkflowError::Export(ExportError::Save { .. })));
        assert_eq!(workflow.state(), WorkflowState::Displaying);

        workflow.clear_error();
        assert_eq!(workflow.last_error(), None);
        assert_eq!(workflow.state(), WorkflowState::Displaying);
    }

    #[tokio::test]
    async fn test_newer_submit_wins_when_older_resolves_last() {
        let (workflow, controls, _) = setup();
        let open_a = controls.gate("A");
        let open_b = controls.gate("B");

        let (a, b, ()) = tokio::join!(workflow.submit("A"), workflow.submit("B"), async {
            tokio::task::yield_now().await;
            open_b.send(()).unwrap();
            tokio::task::yield_now().await;
            open_a.send(()).unwrap();
        });

        assert_eq!(a, Ok(Completion::Superseded));
        assert!(matches!(b, Ok(Completion::Displayed(_))));
        assert_eq!(displayed_content(&workflow).as_deref(), Some("B"));
        assert_eq!(workflow.state(), WorkflowState::Displaying);
    }

    #[tokio::test]
    async fn test_newer_submit_wins_when_older_resolves_first() {
        let (workflow, controls, _) = setup();
        let open_a = controls.gate("A");
        let open_b = controls.gate("B");

        let (a, b, ()) = tokio::join!(workflow.submit("A"), workflow.submit("B"), async {
            tokio::task::yield_now().await;
            open_a.send(()).unwrap();
            tokio::task::yield_now().await;
            open_b.send(()).unwrap();
        });

        assert_eq!(a, Ok(Completion::Superseded));
        assert!(matches!(b, Ok(Completion::Displayed(_))));
        assert_eq!(displayed_content(&workflow).as_deref(), Some("B"));
        // A's discarded handle was dropped, never stored
        assert_eq!(controls.released(), 1);
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_surface() {
        let (workflow, controls, _) = setup();
        let open_a = controls.gate("A");

        let (a, ()) = tokio::join!(workflow.submit("A"), async {
            tokio::task::yield_now().await;
            workflow.reset();
            controls.fail_render.store(true, Ordering::SeqCst);
            open_a.send(()).unwrap();
        });

        assert_eq!(a, Ok(Completion::Superseded));
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert_eq!(workflow.last_error(), None);
    }

    #[tokio::test]
    async fn test_invalid_input_during_generation_is_cleared_by_result() {
        let (workflow, controls, _) = setup();
        let open = controls.gate("A");

        let (a, invalid) = tokio::join!(workflow.submit("A"), async {
            tokio::task::yield_now().await;
            let invalid = workflow.submit("   ").await;
            open.send(()).unwrap();
            invalid
        });

        assert!(matches!(invalid, Err(WorkflowError::Validation(_))));
        assert!(matches!(a, Ok(Completion::Displayed(_))));
        assert_eq!(workflow.state(), WorkflowState::Displaying);
        assert_eq!(workflow.last_error(), None);
    }

    #[tokio::test]
    async fn test_reset_discards_pending_generation() {
        let (workflow, controls, _) = setup();
        let open = controls.gate("late");

        let (late, ()) = tokio::join!(workflow.submit("late"), async {
            tokio::task::yield_now().await;
            workflow.reset();
            open.send(()).unwrap();
        });

        assert_eq!(late, Ok(Completion::Superseded));
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.current_request().is_none());
    }

    #[tokio::test]
    async fn test_input_changed_clears_error() {
        let (workflow, _, _) = setup();
        workflow.submit("").await.unwrap_err();

        assert!(!workflow.input_changed("  "));
        assert_eq!(workflow.state(), WorkflowState::Error);

        assert!(workflow.input_changed("a"));
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert_eq!(workflow.last_error(), None);
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let (workflow, _, _) = setup();
        let mut rx = workflow.subscribe();
        assert_eq!(*rx.borrow(), WorkflowState::Idle);

        workflow.submit("watch me").await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), WorkflowState::Displaying);

        workflow.reset();
        assert_eq!(*rx.borrow_and_update(), WorkflowState::Idle);
    }
}
