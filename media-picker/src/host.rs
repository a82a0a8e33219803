// The UI the capture flow runs on. Native platforms, a Dioxus app or a test
// double implement this; the session never looks up UI state on its own.

use crate::config::{LabelKey, Rect};
use crate::request::{DeviceIdiom, PickerRequest};
use crate::sources::{Capabilities, SourceAction};

/// One tappable entry of the selection sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetAction {
    pub title: String,
    pub action: SourceAction,
}

/// Selection sheet: one action per source plus a cancel button
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSheet {
    pub actions: Vec<SheetAction>,
    pub cancel_title: String,
    /// Popover anchor on tablets
    pub anchor: Option<Rect>,
}

/// Informational alert shown instead of the sheet when no source exists
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub dismiss_title: String,
}

pub trait HostSurface {
    fn capabilities(&self) -> Capabilities;

    fn idiom(&self) -> DeviceIdiom {
        DeviceIdiom::Phone
    }

    /// Localized text for `key`; label overrides from the config win over this
    fn localize(&self, key: LabelKey) -> String {
        key.default_text().to_string()
    }

    fn show_sheet(&mut self, sheet: &ActionSheet);

    /// Must tolerate being called when no sheet is visible
    fn dismiss_sheet(&mut self);

    fn present_picker(&mut self, request: &PickerRequest);

    /// Must tolerate being called when no picker is visible
    fn dismiss_picker(&mut self);

    fn show_notice(&mut self, notice: &Notice);
}
