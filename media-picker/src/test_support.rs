// Test doubles shared by the module tests.

use crate::callbacks::Callbacks;
use crate::host::{ActionSheet, HostSurface, Notice};
use crate::models::{CapturedPhoto, CapturedVideo};
use crate::request::{DeviceIdiom, PickerRequest};
use crate::sources::Capabilities;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    SheetShown(ActionSheet),
    SheetDismissed,
    PickerPresented(PickerRequest),
    PickerDismissed,
    NoticeShown(Notice),
}

/// Host surface that records every call; clones share one log
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub caps: Capabilities,
    pub idiom: DeviceIdiom,
    events: Rc<RefCell<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            idiom: DeviceIdiom::Phone,
            events: Rc::default(),
        }
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }

    pub fn last_sheet(&self) -> Option<ActionSheet> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SurfaceEvent::SheetShown(sheet) => Some(sheet.clone()),
            _ => None,
        })
    }

    pub fn last_request(&self) -> Option<PickerRequest> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SurfaceEvent::PickerPresented(request) => Some(request.clone()),
            _ => None,
        })
    }

    fn record(&self, event: SurfaceEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl HostSurface for RecordingSurface {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn idiom(&self) -> DeviceIdiom {
        self.idiom
    }

    fn show_sheet(&mut self, sheet: &ActionSheet) {
        self.record(SurfaceEvent::SheetShown(sheet.clone()));
    }

    fn dismiss_sheet(&mut self) {
        self.record(SurfaceEvent::SheetDismissed);
    }

    fn present_picker(&mut self, request: &PickerRequest) {
        self.record(SurfaceEvent::PickerPresented(request.clone()));
    }

    fn dismiss_picker(&mut self) {
        self.record(SurfaceEvent::PickerDismissed);
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.record(SurfaceEvent::NoticeShown(notice.clone()));
    }
}

/// Records which callbacks fired and keeps the delivered media
#[derive(Debug, Clone, Default)]
pub struct Fired {
    names: Rc<RefCell<Vec<&'static str>>>,
    photo: Rc<RefCell<Option<CapturedPhoto>>>,
    video: Rc<RefCell<Option<CapturedVideo>>>,
}

impl Fired {
    pub fn callbacks(&self) -> Callbacks {
        let (n1, n2, n3, n4, n5, n6) = (
            self.names.clone(),
            self.names.clone(),
            self.names.clone(),
            self.names.clone(),
            self.names.clone(),
            self.names.clone(),
        );
        let photo = self.photo.clone();
        let video = self.video.clone();

        Callbacks::new()
            .on_photo(move |p| {
                n1.borrow_mut().push("photo");
                *photo.borrow_mut() = Some(p);
            })
            .on_video(move |v| {
                n2.borrow_mut().push("video");
                *video.borrow_mut() = Some(v);
            })
            .on_denied(move || n3.borrow_mut().push("denied"))
            .on_cancelled(move || n4.borrow_mut().push("cancelled"))
            .on_failed(move || n5.borrow_mut().push("failed"))
            .on_no_sources(move || n6.borrow_mut().push("no_sources"))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.names.borrow().clone()
    }

    pub fn photo(&self) -> Option<CapturedPhoto> {
        self.photo.borrow().clone()
    }

    pub fn video(&self) -> Option<CapturedVideo> {
        self.video.borrow().clone()
    }
}
