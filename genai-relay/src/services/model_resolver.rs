//! Short model keys to concrete Gemini model identifiers.

/// Model used for any key not in [`MODEL_TABLE`].
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const MODEL_TABLE: &[(&str, &str)] = &[
    ("flash", "gemini-2.5-flash"),
    ("flash-light", "gemini-2.5-flash-lite"),
    ("pro", "gemini-2.5-pro"),
];

/// Look up `key`, falling back to [`DEFAULT_MODEL`].
pub fn resolve(key: &str) -> &'static str {
    MODEL_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, model)| *model)
        .unwrap_or(DEFAULT_MODEL)
}
