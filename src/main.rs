use dioxus::prelude::*;
use dioxus_i18n::prelude::use_init_i18n;

mod camera;
mod components;
mod error;
mod i18n;
mod image_processing;
mod settings;
mod surface;

use components::CaptureScreen;

fn main() {
    init_logging();
    dioxus::launch(App);
}

#[cfg(target_os = "android")]
fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("snapsheet"),
    );
}

#[cfg(not(target_os = "android"))]
fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[component]
fn App() -> Element {
    let settings = use_hook(settings::load);
    let language = settings.language.clone();
    use_init_i18n(move || i18n::init_i18n(language.as_deref()));

    rsx! {
        div { style: "display: flex; flex-direction: column; min-height: 100vh; font-family: sans-serif;",
            CaptureScreen { settings }
        }
    }
}
