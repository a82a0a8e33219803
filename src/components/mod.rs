mod action_sheet;
mod capture_screen;

pub use action_sheet::{ActionSheetView, NoticeView};
pub use capture_screen::CaptureScreen;
