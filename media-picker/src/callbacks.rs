use crate::error::PickerError;
use crate::models::{CapturedPhoto, CapturedVideo, MediaResult, Outcome};
use tokio::sync::oneshot;

type Handler<T> = Option<Box<dyn FnOnce(T)>>;
type Notify = Option<Box<dyn FnOnce()>>;

/// Typed callbacks for a single session; each fires at most once
#[derive(Default)]
pub struct Callbacks {
    photo: Handler<CapturedPhoto>,
    video: Handler<CapturedVideo>,
    denied: Notify,
    cancelled: Notify,
    failed: Notify,
    no_sources: Notify,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// A photo was selected
    pub fn on_photo(mut self, f: impl FnOnce(CapturedPhoto) + 'static) -> Self {
        self.photo = Some(Box::new(f));
        self
    }

    /// A video was selected
    pub fn on_video(mut self, f: impl FnOnce(CapturedVideo) + 'static) -> Self {
        self.video = Some(Box::new(f));
        self
    }

    /// The user backed out of the native picker
    pub fn on_denied(mut self, f: impl FnOnce() + 'static) -> Self {
        self.denied = Some(Box::new(f));
        self
    }

    /// The user dismissed the sheet, or the picker returned no image
    pub fn on_cancelled(mut self, f: impl FnOnce() + 'static) -> Self {
        self.cancelled = Some(Box::new(f));
        self
    }

    pub fn on_failed(mut self, f: impl FnOnce() + 'static) -> Self {
        self.failed = Some(Box::new(f));
        self
    }

    pub fn on_no_sources(mut self, f: impl FnOnce() + 'static) -> Self {
        self.no_sources = Some(Box::new(f));
        self
    }

    fn dispatch(self, outcome: Outcome) {
        let handler: Option<Box<dyn FnOnce()>> = match outcome {
            Outcome::Selected(MediaResult::Photo(photo)) => {
                self.photo.map(|f| Box::new(move || f(photo)) as Box<dyn FnOnce()>)
            }
            Outcome::Selected(MediaResult::Video(video)) => {
                self.video.map(|f| Box::new(move || f(video)) as Box<dyn FnOnce()>)
            }
            Outcome::Cancelled => self.cancelled,
            Outcome::Denied => self.denied,
            Outcome::Failed => self.failed,
            Outcome::NoSourcesAvailable => self.no_sources,
        };

        match handler {
            Some(f) => f(),
            None => log::debug!("No callback registered for this outcome"),
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("photo", &self.photo.is_some())
            .field("video", &self.video.is_some())
            .field("denied", &self.denied.is_some())
            .field("cancelled", &self.cancelled.is_some())
            .field("failed", &self.failed.is_some())
            .field("no_sources", &self.no_sources.is_some())
            .finish()
    }
}

/// Where a session delivers its outcome
#[derive(Debug)]
pub enum OutcomeSink {
    Callbacks(Callbacks),
    Channel(oneshot::Sender<Outcome>),
}

impl OutcomeSink {
    /// Future-style delivery: the receiver resolves once the session does
    pub fn channel() -> (Self, OutcomeReceiver) {
        let (tx, rx) = oneshot::channel();
        (OutcomeSink::Channel(tx), OutcomeReceiver { rx })
    }

    pub(crate) fn deliver(self, outcome: Outcome) {
        match self {
            OutcomeSink::Callbacks(callbacks) => callbacks.dispatch(outcome),
            OutcomeSink::Channel(tx) => {
                if tx.send(outcome).is_err() {
                    log::debug!("Outcome receiver dropped before resolution");
                }
            }
        }
    }
}

impl From<Callbacks> for OutcomeSink {
    fn from(callbacks: Callbacks) -> Self {
        OutcomeSink::Callbacks(callbacks)
    }
}

/// Receiving half of [`OutcomeSink::channel`]
#[derive(Debug)]
pub struct OutcomeReceiver {
    rx: oneshot::Receiver<Outcome>,
}

impl OutcomeReceiver {
    /// Waits for the session to resolve
    pub async fn outcome(self) -> Result<Outcome, PickerError> {
        self.rx.await.map_err(|_| PickerError::SessionAbandoned)
    }

    /// Non-blocking check, `Ok(None)` while the session is still open
    pub fn try_outcome(&mut self) -> Result<Option<Outcome>, PickerError> {
        match self.rx.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(oneshot::error::TryRecvError::Empty) => Ok(None),
            Err(oneshot::error::TryRecvError::Closed) => Err(PickerError::SessionAbandoned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_routes_to_matching_callback() {
        let fired = Rc::new(RefCell::new(Vec::new()));

        let log = fired.clone();
        let log2 = fired.clone();
        let callbacks = Callbacks::new()
            .on_denied(move || log.borrow_mut().push("denied"))
            .on_cancelled(move || log2.borrow_mut().push("cancelled"));

        OutcomeSink::from(callbacks).deliver(Outcome::Denied);
        assert_eq!(*fired.borrow(), vec!["denied"]);
    }

    #[test]
    fn test_missing_callback_is_ignored() {
        OutcomeSink::from(Callbacks::new()).deliver(Outcome::Failed);
    }

    #[test]
    fn test_channel_delivery() {
        let (sink, mut rx) = OutcomeSink::channel();
        assert!(rx.try_outcome().unwrap().is_none());
        sink.deliver(Outcome::NoSourcesAvailable);
        assert!(matches!(
            rx.try_outcome().unwrap(),
            Some(Outcome::NoSourcesAvailable)
        ));
    }

    #[tokio::test]
    async fn test_dropped_sink_abandons_receiver() {
        let (sink, rx) = OutcomeSink::channel();
        drop(sink);
        assert!(matches!(rx.outcome().await, Err(PickerError::SessionAbandoned)));
    }

    #[tokio::test]
    async fn test_awaiting_outcome() {
        let (sink, rx) = OutcomeSink::channel();
        sink.deliver(Outcome::Cancelled);
        assert!(matches!(rx.outcome().await, Ok(Outcome::Cancelled)));
    }
}
