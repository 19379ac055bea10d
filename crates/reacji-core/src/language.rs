//! Flag-emoji to language-code mapping used by reacjilation.
//!
//! Codes are lower-case ISO 639-1 (plus `zh`); backends adapt casing to
//! whatever their provider expects.

/// `(emoji name, language code)` pairs. Emoji names are exactly what the
/// platform sends in `reaction_added`, without surrounding colons.
const FLAG_LANGUAGES: &[(&str, &str)] = &[
    // English
    ("flag-us", "en"),
    ("us", "en"),
    ("flag-gb", "en"),
    ("gb", "en"),
    ("flag-england", "en"),
    ("flag-au", "en"),
    ("flag-ca", "en"),
    ("flag-nz", "en"),
    ("flag-ie", "en"),
    ("flag-sg", "en"),
    ("flag-um", "en"),
    ("flag-ag", "en"),
    ("flag-bs", "en"),
    ("flag-jm", "en"),
    // Japanese
    ("flag-jp", "ja"),
    ("jp", "ja"),
    // German
    ("flag-de", "de"),
    ("de", "de"),
    ("flag-at", "de"),
    ("flag-li", "de"),
    // French
    ("flag-fr", "fr"),
    ("fr", "fr"),
    ("flag-mc", "fr"),
    ("flag-pf", "fr"),
    ("flag-nc", "fr"),
    // Spanish
    ("flag-es", "es"),
    ("es", "es"),
    ("flag-mx", "es"),
    ("flag-ar", "es"),
    ("flag-co", "es"),
    ("flag-cl", "es"),
    ("flag-pe", "es"),
    ("flag-ve", "es"),
    ("flag-uy", "es"),
    ("flag-cu", "es"),
    // Italian
    ("flag-it", "it"),
    ("it", "it"),
    ("flag-sm", "it"),
    ("flag-va", "it"),
    // Portuguese
    ("flag-pt", "pt"),
    ("flag-br", "pt"),
    ("flag-ao", "pt"),
    ("flag-mz", "pt"),
    // Russian
    ("flag-ru", "ru"),
    ("ru", "ru"),
    // Chinese
    ("flag-cn", "zh"),
    ("cn", "zh"),
    ("flag-tw", "zh"),
    ("flag-hk", "zh"),
    ("flag-mo", "zh"),
    // Korean
    ("flag-kr", "ko"),
    ("kr", "ko"),
    // Other European languages
    ("flag-nl", "nl"),
    ("flag-pl", "pl"),
    ("flag-se", "sv"),
    ("flag-dk", "da"),
    ("flag-fi", "fi"),
    ("flag-gr", "el"),
    ("flag-cz", "cs"),
    ("flag-hu", "hu"),
    ("flag-ro", "ro"),
    ("flag-bg", "bg"),
    ("flag-sk", "sk"),
    ("flag-si", "sl"),
    ("flag-ee", "et"),
    ("flag-lv", "lv"),
    ("flag-lt", "lt"),
];

/// Look up the language code for a reaction emoji.
///
/// Returns `None` for anything not in the table, including flags of
/// countries without a single obvious language.
pub fn language_for_emoji(emoji: &str) -> Option<&'static str> {
    FLAG_LANGUAGES
        .iter()
        .find(|(name, _)| *name == emoji)
        .map(|(_, code)| *code)
}

/// All emoji names that map to a language.
pub fn supported_emoji() -> impl Iterator<Item = &'static str> {
    FLAG_LANGUAGES.iter().map(|(name, _)| *name)
}
