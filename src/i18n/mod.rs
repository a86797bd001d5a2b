//! Localized strings for bot replies and buttons.
//!
//! `t(key, lang)` returns static strings; the helpers re-exported from
//! `format` build strings with interpolation.
//! Supported languages: English (fallback) and Russian.

mod format;
mod labels;
mod messages;

#[cfg(test)]
mod tests;

pub use format::*;

/// Languages with a full translation.
pub const SUPPORTED_LANGUAGES: &[&str] = &["English", "Russian"];

/// Return a localized static string for `key` in the given `lang`.
/// Falls back to English for unsupported languages.
pub fn t(key: &str, lang: &str) -> &'static str {
    if let Some(v) = labels::lookup(key, lang) {
        return v;
    }
    if let Some(v) = messages::lookup(key, lang) {
        return v;
    }
    "???"
}

/// Pick the Russian or English variant.
pub(crate) fn pick(lang: &str, en: &'static str, ru: &'static str) -> &'static str {
    match lang {
        "Russian" => ru,
        _ => en,
    }
}
