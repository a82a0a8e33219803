use dioxus::prelude::*;
use media_picker::{ActionSheet, Notice};

const OVERLAY_STYLE: &str = "position: fixed; inset: 0; background: rgba(0, 0, 0, 0.4); display: flex; flex-direction: column; justify-content: flex-end; padding: 12px;";
const BUTTON_STYLE: &str = "width: 100%; padding: 14px; border: none; background: #ffffff; color: #0066cc; font-size: 17px; cursor: pointer; border-bottom: 1px solid #ddd;";

/// Bottom sheet with one button per source and a separate cancel button
#[component]
pub fn ActionSheetView(
    sheet: ActionSheet,
    on_choose: EventHandler<usize>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div { style: "{OVERLAY_STYLE}",
            div { style: "border-radius: 12px; overflow: hidden; margin-bottom: 8px;",
                for (index, entry) in sheet.actions.iter().enumerate() {
                    button {
                        key: "{index}",
                        style: "{BUTTON_STYLE}",
                        onclick: move |_| on_choose.call(index),
                        {entry.title.clone()}
                    }
                }
            }
            div { style: "border-radius: 12px; overflow: hidden;",
                button {
                    style: "{BUTTON_STYLE} font-weight: bold;",
                    onclick: move |_| on_cancel.call(()),
                    {sheet.cancel_title.clone()}
                }
            }
        }
    }
}

/// Alert shown when there is nothing to pick from
#[component]
pub fn NoticeView(notice: Notice, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0, 0, 0, 0.4); display: flex; align-items: center; justify-content: center;",
            div { style: "background: #ffffff; border-radius: 12px; min-width: 240px; text-align: center; overflow: hidden;",
                p { style: "padding: 20px 16px; margin: 0; font-size: 15px;", {notice.message.clone()} }
                button {
                    style: "{BUTTON_STYLE} border-top: 1px solid #ddd;",
                    onclick: move |_| on_dismiss.call(()),
                    {notice.dismiss_title.clone()}
                }
            }
        }
    }
}
