use crate::callbacks::{Callbacks, OutcomeReceiver, OutcomeSink};
use crate::config::PickerConfig;
use crate::error::PickerError;
use crate::host::HostSurface;
use crate::models::{CapturedPhoto, CapturedVideo, PickerInfo};
use crate::session::CaptureSession;
use uuid::Uuid;

/// Entry point for hosts: owns the surface and at most one live session.
///
/// Presenting while a session is still open tears the old one down first
/// (its visible sheet or picker is dismissed, no callback fires).
pub struct MediaPicker<S: HostSurface + Clone> {
    surface: S,
    active: Option<CaptureSession<S>>,
}

impl<S: HostSurface + Clone> MediaPicker<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            active: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The most recent session, finished or not
    pub fn session(&self) -> Option<&CaptureSession<S>> {
        self.active.as_ref()
    }

    /// A session is waiting for user input
    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|s| !s.is_finished())
    }

    pub fn present(
        &mut self,
        config: PickerConfig,
        sink: impl Into<OutcomeSink>,
    ) -> Result<Uuid, PickerError> {
        let mut session = CaptureSession::new(config, self.surface.clone(), sink)?;

        if let Some(mut previous) = self.active.take() {
            if !previous.is_finished() {
                log::info!(
                    "Tearing down session {} for new session {}",
                    previous.id(),
                    session.id()
                );
            }
            previous.dismiss();
        }

        let id = session.id();
        session.present()?;
        self.active = Some(session);
        Ok(id)
    }

    /// Like [`Self::present`], delivering the outcome through a future
    pub fn present_async(
        &mut self,
        config: PickerConfig,
    ) -> Result<(Uuid, OutcomeReceiver), PickerError> {
        let (sink, rx) = OutcomeSink::channel();
        let id = self.present(config, sink)?;
        Ok((id, rx))
    }

    /// Photo-only shortcut
    pub fn get_photo(
        &mut self,
        on_photo: impl FnOnce(CapturedPhoto) + 'static,
    ) -> Result<Uuid, PickerError> {
        self.present(
            PickerConfig::photos_only(),
            Callbacks::new().on_photo(on_photo),
        )
    }

    /// Video-only shortcut
    pub fn get_video(
        &mut self,
        on_video: impl FnOnce(CapturedVideo) + 'static,
    ) -> Result<Uuid, PickerError> {
        self.present(
            PickerConfig::videos_only(),
            Callbacks::new().on_video(on_video),
        )
    }

    pub fn choose(&mut self, index: usize) -> Result<(), PickerError> {
        self.with_session("choose", |s| s.choose(index))
    }

    pub fn cancel_sheet(&mut self) -> Result<(), PickerError> {
        self.with_session("cancel_sheet", |s| s.cancel_sheet())
    }

    pub fn finish_picking(&mut self, info: PickerInfo) -> Result<(), PickerError> {
        self.with_session("finish_picking", |s| s.finish_picking(info))
    }

    pub fn cancel_picker(&mut self) -> Result<(), PickerError> {
        self.with_session("cancel_picker", |s| s.cancel_picker())
    }

    /// Hides any visible sheet or picker; no-op without a session
    pub fn dismiss(&mut self) {
        if let Some(session) = self.active.as_mut() {
            session.dismiss();
        }
    }

    fn with_session(
        &mut self,
        event: &str,
        f: impl FnOnce(&mut CaptureSession<S>) -> Result<(), PickerError>,
    ) -> Result<(), PickerError> {
        match self.active.as_mut() {
            Some(session) => f(session),
            None => {
                log::warn!("Ignoring {} without an active session", event);
                Err(PickerError::InvalidState(format!(
                    "{} without an active session",
                    event
                )))
            }
        }
    }
}
