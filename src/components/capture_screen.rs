use crate::{camera, i18n, image_processing, settings::AppSettings, surface::DioxusSurface};
use dioxus::prelude::*;
use dioxus_i18n::t;
use media_picker::{Callbacks, CapturedPhoto, MediaPicker, PickerConfig};
use std::path::PathBuf;

/// What the last capture session left behind
#[derive(Clone, PartialEq, Debug)]
enum Status {
    Idle,
    Photo,
    Video(PathBuf),
    Cancelled,
    Denied,
    Failed,
    NoSources,
    Saved(PathBuf),
    Error(String),
}

#[component]
pub fn CaptureScreen(settings: AppSettings) -> Element {
    let sheet = use_signal(|| None);
    let mut notice = use_signal(|| None);
    let picker_request = use_signal(|| None);
    let mut media = use_signal(|| {
        MediaPicker::new(DioxusSurface::new(
            camera::device_capabilities(),
            sheet,
            notice,
            picker_request,
        ))
    });
    let mut status = use_signal(|| Status::Idle);
    let mut photo = use_signal(|| None::<CapturedPhoto>);

    // Runs the platform picker whenever the session asks for one
    use_effect(move || {
        let Some(request) = picker_request() else {
            return;
        };
        let session_id = media.peek().session().map(|s| s.id());

        spawn(async move {
            let result = camera::run_picker(&request).await;

            let mut picker = media.write();
            if picker.session().map(|s| s.id()) != session_id || !picker.is_active() {
                log::debug!("Picker result arrived for a replaced session, dropping it");
                return;
            }

            let delivered = match result {
                Ok(Some(info)) => picker.finish_picking(info),
                Ok(None) => picker.cancel_picker(),
                Err(e) => {
                    log::error!("Picker failed: {}", e);
                    picker.dismiss();
                    status.set(Status::Error(e.user_message()));
                    Ok(())
                }
            };
            if let Err(e) = delivered {
                log::warn!("Picker result rejected: {}", e);
            }
        });
    });

    let base_config = settings.picker.clone();
    let output_dir = settings.output_dir.clone();

    let mut open_picker = move || {
        let config = PickerConfig {
            labels: i18n::localized_labels(&base_config.labels),
            ..base_config.clone()
        };

        photo.set(None);
        status.set(Status::Idle);

        let callbacks = Callbacks::new()
            .on_photo(move |captured| {
                photo.set(Some(captured));
                status.set(Status::Photo);
            })
            .on_video(move |video| status.set(Status::Video(video.path)))
            .on_cancelled(move || status.set(Status::Cancelled))
            .on_denied(move || status.set(Status::Denied))
            .on_failed(move || status.set(Status::Failed))
            .on_no_sources(move || status.set(Status::NoSources));

        if let Err(e) = media.write().present(config, callbacks) {
            log::error!("Could not present picker: {}", e);
            status.set(Status::Error(e.to_string()));
        }
    };

    let status_text = match status() {
        Status::Idle | Status::Photo => t!("status-idle"),
        Status::Video(path) => format!("{}: {}", t!("status-video"), path.display()),
        Status::Cancelled => t!("status-cancelled"),
        Status::Denied => t!("status-denied"),
        Status::Failed => t!("status-failed"),
        Status::NoSources => t!("status-no-sources"),
        Status::Saved(path) => format!("{} {}", t!("status-saved"), path.display()),
        Status::Error(message) => format!("{}: {}", t!("error"), message),
    };

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto;",
            h1 { style: "font-size: 22px; margin-bottom: 16px;", {t!("app-title")} }

            button {
                class: "btn-primary",
                style: "width: 100%; padding: 14px; font-size: 16px;",
                disabled: media.read().is_active(),
                onclick: move |_| open_picker(),
                "📷 "
                {t!("action-add-media")}
            }

            if picker_request.read().is_some() {
                div { style: "display: flex; gap: 8px; align-items: center; margin-top: 12px;",
                    span { style: "flex: 1; color: #666;", {t!("picker-open")} }
                    button {
                        class: "btn-secondary",
                        style: "padding: 8px 12px;",
                        onclick: move |_| media.write().dismiss(),
                        {t!("action-close-picker")}
                    }
                }
            }

            if let Some(captured) = photo() {
                div { style: "margin-top: 16px;",
                    img {
                        src: "{image_processing::photo_data_url(&captured)}",
                        style: "width: 100%; border-radius: 8px; object-fit: contain;",
                    }
                    p { style: "font-size: 13px; color: #666;",
                        "{captured.width} × {captured.height}"
                    }
                    button {
                        class: "btn-primary",
                        style: "width: 100%; padding: 12px;",
                        onclick: move |_| {
                            let Some(captured) = photo() else {
                                return;
                            };
                            match image_processing::save_photo(&captured, &output_dir) {
                                Ok(path) => status.set(Status::Saved(path)),
                                Err(e) => {
                                    log::error!("Saving photo failed: {}", e);
                                    status.set(Status::Error(e.user_message()));
                                }
                            }
                        },
                        "💾 "
                        {t!("action-save")}
                    }
                }
            }

            p { style: "margin-top: 16px; font-size: 14px; color: #333;", "{status_text}" }
        }

        if let Some(current) = sheet() {
            super::ActionSheetView {
                sheet: current,
                on_choose: move |index| {
                    if let Err(e) = media.write().choose(index) {
                        log::warn!("Sheet choice rejected: {}", e);
                    }
                },
                on_cancel: move |_| {
                    if let Err(e) = media.write().cancel_sheet() {
                        log::warn!("Sheet cancel rejected: {}", e);
                    }
                },
            }
        }

        if let Some(current) = notice() {
            super::NoticeView { notice: current, on_dismiss: move |_| notice.set(None) }
        }
    }
}
