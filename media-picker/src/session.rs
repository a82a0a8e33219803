//! Single-use capture session.
//!
//! ```text
//! Idle -> SourcesBuilt -> Presenting -> PickerActive -> Resolved
//!              |              |
//!              +-> Resolved   +-> Resolved (cancelled)
//! ```
//!
//! Any non-resolved state can additionally be torn down with
//! [`CaptureSession::dismiss`], which ends the session without an outcome.

use crate::callbacks::OutcomeSink;
use crate::config::{LabelKey, PickerConfig};
use crate::error::PickerError;
use crate::host::{ActionSheet, HostSurface, Notice, SheetAction};
use crate::models::{
    CapturedPhoto, CapturedVideo, MediaMetadata, MediaResult, Outcome, OutcomeKind, PickerInfo,
};
use crate::processing;
use crate::request::{MediaType, PickerRequest};
use crate::sources::{build_sources, SourceAction, SourceOption};
use chrono::Utc;
use image::GenericImageView;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    SourcesBuilt(Vec<SourceOption>),
    Presenting(Vec<SourceOption>),
    PickerActive(PickerRequest),
    Resolved(OutcomeKind),
    /// Torn down by the caller before an outcome existed
    Dismissed,
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::SourcesBuilt(_) => "sources-built",
            SessionState::Presenting(_) => "presenting",
            SessionState::PickerActive(_) => "picker-active",
            SessionState::Resolved(_) => "resolved",
            SessionState::Dismissed => "dismissed",
        }
    }
}

pub struct CaptureSession<S: HostSurface> {
    id: Uuid,
    config: PickerConfig,
    surface: S,
    state: SessionState,
    sink: Option<OutcomeSink>,
}

impl<S: HostSurface> CaptureSession<S> {
    pub fn new(
        config: PickerConfig,
        surface: S,
        sink: impl Into<OutcomeSink>,
    ) -> Result<Self, PickerError> {
        config.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            config,
            surface,
            state: SessionState::Idle,
            sink: Some(sink.into()),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Resolved or dismissed; no further events are accepted
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            SessionState::Resolved(_) | SessionState::Dismissed
        )
    }

    /// Shows the selection sheet, or the no-sources notice if nothing is available
    pub fn present(&mut self) -> Result<(), PickerError> {
        self.expect_state(matches!(self.state, SessionState::Idle), "present")?;

        let caps = self.surface.capabilities();
        let sources = build_sources(&self.config, &caps);
        self.state = SessionState::SourcesBuilt(sources.clone());

        if sources.is_empty() {
            log::info!("Session {}: no sources available", self.id);
            let notice = Notice {
                message: self.label(LabelKey::NoSources),
                dismiss_title: self.label(LabelKey::Cancel),
            };
            self.surface.show_notice(&notice);
            self.resolve(Outcome::NoSourcesAvailable);
            return Ok(());
        }

        let sheet = ActionSheet {
            actions: sources
                .iter()
                .map(|source| SheetAction {
                    title: self.label(source.action.label_key()),
                    action: source.action,
                })
                .collect(),
            cancel_title: self.label(LabelKey::Cancel),
            anchor: self.config.anchor,
        };

        log::debug!(
            "Session {}: presenting sheet with {} action(s)",
            self.id,
            sheet.actions.len()
        );
        self.surface.show_sheet(&sheet);
        self.state = SessionState::Presenting(sources);
        Ok(())
    }

    /// The user tapped the sheet's cancel button
    pub fn cancel_sheet(&mut self) -> Result<(), PickerError> {
        self.expect_state(
            matches!(self.state, SessionState::Presenting(_)),
            "cancel_sheet",
        )?;
        self.surface.dismiss_sheet();
        self.resolve(Outcome::Cancelled);
        Ok(())
    }

    /// The user tapped the sheet action at `index`
    pub fn choose(&mut self, index: usize) -> Result<(), PickerError> {
        let action = match &self.state {
            SessionState::Presenting(sources) => sources.get(index).map(|s| s.action),
            _ => None,
        };
        self.expect_state(
            matches!(self.state, SessionState::Presenting(_)),
            "choose",
        )?;
        let action = action.ok_or_else(|| {
            PickerError::InvalidState(format!("no sheet action at index {}", index))
        })?;
        self.open_picker(action);
        Ok(())
    }

    /// Like [`Self::choose`], addressed by action instead of position
    pub fn choose_action(&mut self, action: SourceAction) -> Result<(), PickerError> {
        let index = match &self.state {
            SessionState::Presenting(sources) => sources.iter().position(|s| s.action == action),
            _ => None,
        };
        self.expect_state(
            matches!(self.state, SessionState::Presenting(_)),
            "choose_action",
        )?;
        let index = index.ok_or_else(|| {
            PickerError::InvalidState(format!("{:?} is not offered in this sheet", action))
        })?;
        self.choose(index)
    }

    fn open_picker(&mut self, action: SourceAction) {
        self.surface.dismiss_sheet();

        let caps = self.surface.capabilities();
        let request = PickerRequest::new(&self.config, action, &caps, self.surface.idiom());
        log::debug!(
            "Session {}: opening picker for {:?} ({:?}, editing: {})",
            self.id,
            action,
            request.media_types,
            request.allows_editing
        );
        self.surface.present_picker(&request);
        self.state = SessionState::PickerActive(request);
    }

    /// The native picker finished with a selection
    pub fn finish_picking(&mut self, info: PickerInfo) -> Result<(), PickerError> {
        let request = match &self.state {
            SessionState::PickerActive(request) => request.clone(),
            _ => {
                return Err(self.rejected("finish_picking"));
            }
        };

        let outcome = self.process(info, &request);
        self.surface.dismiss_picker();
        self.resolve(outcome);
        Ok(())
    }

    /// The user cancelled the native picker
    pub fn cancel_picker(&mut self) -> Result<(), PickerError> {
        self.expect_state(
            matches!(self.state, SessionState::PickerActive(_)),
            "cancel_picker",
        )?;
        self.surface.dismiss_picker();
        self.resolve(Outcome::Denied);
        Ok(())
    }

    /// Hides whatever is visible. Safe in every state and never fires a callback.
    pub fn dismiss(&mut self) {
        match self.state {
            SessionState::Presenting(_) => self.surface.dismiss_sheet(),
            SessionState::PickerActive(_) => self.surface.dismiss_picker(),
            _ => {}
        }

        if !self.is_finished() {
            log::debug!("Session {}: dismissed in state {}", self.id, self.state.name());
            self.state = SessionState::Dismissed;
            // Dropping the sink abandons any awaiting receiver
            self.sink = None;
        }
    }

    fn process(&self, info: PickerInfo, request: &PickerRequest) -> Outcome {
        let media_type = match info.media_type {
            Some(media_type) if request.accepts(media_type) => media_type,
            other => {
                log::warn!(
                    "Session {}: picker returned media type {:?}, requested {:?}",
                    self.id,
                    other,
                    request.media_types
                );
                return Outcome::Failed;
            }
        };

        let mut metadata = MediaMetadata {
            session_id: self.id,
            media_type,
            source: request.source,
            edited: false,
            original_width: None,
            original_height: None,
            captured_at: Utc::now(),
            extra: info.extra,
        };

        match media_type {
            MediaType::Movie => match info.media_path {
                Some(path) => {
                    Outcome::Selected(MediaResult::Video(CapturedVideo { path, metadata }))
                }
                None => {
                    log::warn!("Session {}: video result without media path", self.id);
                    Outcome::Failed
                }
            },
            MediaType::Image => {
                let (picked, edited) = match (info.edited_image, info.original_image) {
                    (Some(edited), _) => (edited, true),
                    (None, Some(original)) => (original, false),
                    (None, None) => {
                        log::info!(
                            "Session {}: picker returned neither edited nor original image",
                            self.id
                        );
                        return Outcome::Cancelled;
                    }
                };

                let img = match picked.into_image() {
                    Ok(img) => img,
                    Err(e) => {
                        log::warn!("Session {}: {}", self.id, e);
                        return Outcome::Failed;
                    }
                };

                let (original_width, original_height) = img.dimensions();
                let normalized = processing::normalize(img, &self.config);
                let (data, format) = match processing::encode(&normalized, self.config.output) {
                    Ok(encoded) => encoded,
                    Err(e) => {
                        log::warn!("Session {}: {}", self.id, e);
                        return Outcome::Failed;
                    }
                };

                metadata.edited = edited;
                metadata.original_width = Some(original_width);
                metadata.original_height = Some(original_height);

                Outcome::Selected(MediaResult::Photo(CapturedPhoto {
                    data,
                    format,
                    width: normalized.width(),
                    height: normalized.height(),
                    metadata,
                }))
            }
        }
    }

    fn resolve(&mut self, outcome: Outcome) {
        let kind = outcome.kind();
        log::info!("Session {}: resolved as {:?}", self.id, kind);
        self.state = SessionState::Resolved(kind);
        if let Some(sink) = self.sink.take() {
            sink.deliver(outcome);
        }
    }

    fn label(&self, key: LabelKey) -> String {
        self.config
            .labels
            .resolve(key, |key| self.surface.localize(key))
    }

    fn expect_state(&self, ok: bool, event: &str) -> Result<(), PickerError> {
        if ok {
            Ok(())
        } else {
            Err(self.rejected(event))
        }
    }

    fn rejected(&self, event: &str) -> PickerError {
        log::warn!(
            "Session {}: ignoring {} in state {}",
            self.id,
            event,
            self.state.name()
        );
        PickerError::InvalidState(format!("{} not allowed while {}", event, self.state.name()))
    }
}

impl<S: HostSurface> std::fmt::Debug for CaptureSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish()
    }
}
