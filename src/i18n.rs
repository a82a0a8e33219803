use dioxus_i18n::prelude::*;
use dioxus_i18n::t;
use media_picker::Labels;
use unic_langid::{langid, LanguageIdentifier};

const EN_US: &str = include_str!("../locales/en-US.ftl");
const DE_DE: &str = include_str!("../locales/de-DE.ftl");

/// Initialize i18n configuration, English unless German is requested
pub fn init_i18n(language: Option<&str>) -> I18nConfig {
    I18nConfig::new(select_language(language))
        .with_locale(Locale::new_static(langid!("en-US"), EN_US))
        .with_locale(Locale::new_static(langid!("de-DE"), DE_DE))
}

fn select_language(language: Option<&str>) -> LanguageIdentifier {
    let requested = language.and_then(|l| l.parse::<LanguageIdentifier>().ok());
    match requested {
        Some(lang) if lang.language.as_str() == "de" => langid!("de-DE"),
        Some(lang) if lang.language.as_str() != "en" => {
            log::warn!("No translation for {}, falling back to en-US", lang);
            langid!("en-US")
        }
        _ => langid!("en-US"),
    }
}

/// Fills every label the settings leave open with the current translation.
/// Needs the i18n context, so call it from a component or its handlers.
pub fn localized_labels(overrides: &Labels) -> Labels {
    Labels {
        cancel: overrides
            .cancel
            .clone()
            .or_else(|| Some(t!("picker-cancel"))),
        choose_from_library: overrides
            .choose_from_library
            .clone()
            .or_else(|| Some(t!("picker-choose-from-library"))),
        choose_from_photo_roll: overrides
            .choose_from_photo_roll
            .clone()
            .or_else(|| Some(t!("picker-choose-from-photo-roll"))),
        no_sources: overrides
            .no_sources
            .clone()
            .or_else(|| Some(t!("picker-no-sources"))),
        take_photo: overrides
            .take_photo
            .clone()
            .or_else(|| Some(t!("picker-take-photo"))),
        take_video: overrides
            .take_video
            .clone()
            .or_else(|| Some(t!("picker-take-video"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_picker::LabelKey;

    #[test]
    fn test_every_label_is_translated() {
        for key in LabelKey::ALL {
            let needle = format!("{} =", key.message_id());
            assert!(EN_US.contains(&needle), "en-US is missing {}", key.message_id());
            assert!(DE_DE.contains(&needle), "de-DE is missing {}", key.message_id());
        }
    }

    #[test]
    fn test_labels_carry_translator_notes() {
        for key in LabelKey::ALL {
            let annotated = format!("# {}\n{} =", key.comment(), key.message_id());
            assert!(EN_US.contains(&annotated), "en-US note for {}", key.message_id());
            assert!(DE_DE.contains(&annotated), "de-DE note for {}", key.message_id());
        }
    }

    #[test]
    fn test_select_language() {
        assert_eq!(select_language(None), langid!("en-US"));
        assert_eq!(select_language(Some("de-AT")), langid!("de-DE"));
        assert_eq!(select_language(Some("fr-FR")), langid!("en-US"));
        assert_eq!(select_language(Some("not a language!")), langid!("en-US"));
    }
}
