//! # Media Picker
//!
//! A reusable photo/video capture flow, independent of any UI toolkit.
//!
//! This crate provides:
//! - Source selection (take photo, take video, library, photo roll) filtered
//!   by configuration flags and device capabilities
//! - A single-use capture session driving a host-provided selection sheet and
//!   native picker
//! - Still image normalization (orientation flattening, proportional resize,
//!   encoding)
//! - Outcome delivery through typed callbacks or a one-shot future
//!
//! ## Platform Separation
//!
//! Everything that draws on screen lives behind [`HostSurface`]. The
//! application crate implements it for its UI toolkit.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use media_picker::{Callbacks, MediaPicker, PickerConfig};
//!
//! let mut picker = MediaPicker::new(surface);
//! picker.present(
//!     PickerConfig::default(),
//!     Callbacks::new()
//!         .on_photo(|photo| save(photo.data))
//!         .on_cancelled(|| log::info!("cancelled")),
//! )?;
//!
//! // later, from the UI event handlers
//! picker.choose(0)?;
//! picker.finish_picking(info)?;
//! ```

pub mod callbacks;
pub mod config;
pub mod error;
pub mod host;
pub mod models;
pub mod presenter;
pub mod processing;
pub mod request;
pub mod session;
pub mod sources;

#[cfg(test)]
mod test_support;

pub use callbacks::{Callbacks, OutcomeReceiver, OutcomeSink};
pub use config::{LabelKey, Labels, OutputFormat, PickerConfig, Rect, ResizeBounds};
pub use error::PickerError;
pub use host::{ActionSheet, HostSurface, Notice, SheetAction};
pub use models::{
    CapturedPhoto, CapturedVideo, MediaMetadata, MediaResult, Outcome, OutcomeKind, PickedImage,
    PickerInfo,
};
pub use presenter::MediaPicker;
pub use processing::ProcessingError;
pub use request::{CameraDevice, DeviceIdiom, MediaType, PickerRequest, Presentation};
pub use session::{CaptureSession, SessionState};
pub use sources::{build_sources, Capabilities, SourceAction, SourceKind, SourceOption};
