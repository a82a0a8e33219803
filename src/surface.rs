use dioxus::prelude::*;
use media_picker::{ActionSheet, Capabilities, HostSurface, Notice, PickerRequest};

/// Host surface backed by Dioxus signals: the session writes what should be
/// visible, the capture screen renders it.
#[derive(Clone, Copy)]
pub struct DioxusSurface {
    caps: Capabilities,
    pub sheet: Signal<Option<ActionSheet>>,
    pub notice: Signal<Option<Notice>>,
    pub picker: Signal<Option<PickerRequest>>,
}

impl DioxusSurface {
    pub fn new(
        caps: Capabilities,
        sheet: Signal<Option<ActionSheet>>,
        notice: Signal<Option<Notice>>,
        picker: Signal<Option<PickerRequest>>,
    ) -> Self {
        Self {
            caps,
            sheet,
            notice,
            picker,
        }
    }
}

impl HostSurface for DioxusSurface {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn show_sheet(&mut self, sheet: &ActionSheet) {
        self.sheet.set(Some(sheet.clone()));
    }

    fn dismiss_sheet(&mut self) {
        self.sheet.set(None);
    }

    fn present_picker(&mut self, request: &PickerRequest) {
        self.picker.set(Some(request.clone()));
    }

    fn dismiss_picker(&mut self) {
        self.picker.set(None);
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.notice.set(Some(notice.clone()));
    }
}
