use std::collections::HashMap;

use crate::error::{LessonsplitError, Result};

/// Known production language groups.
///
/// Hand-curated from the published lesson catalog. Order within each tuple is
/// significant: it is the round-robin position of the language in a full
/// recording, and the final entry is the language compact recordings are
/// spoken in.
const BUILTIN_GROUPS: &[(&str, &[&str])] = &[
    ("ENCA", &["EN", "CA"]),
    ("ENDE", &["EN", "DE"]),
    ("ENEL", &["EN", "EL"]),
    ("ENES", &["EN", "ES"]),
    ("ENESM", &["EN", "ESM"]),
    ("ENRU", &["EN", "RU"]),
    ("ENTGL", &["EN", "TGL"]),
    ("ENTR", &["EN", "TR"]),
    ("ENUKR", &["EN", "UKR"]),
    ("ENZS", &["EN", "ZS"]),
    ("ENZT", &["EN", "ZT"]),
    ("PBESM", &["PB", "ESM"]),
    ("PBENFR", &["PB", "EN", "FR"]),
];

/// An ordered tuple of language codes jointly present in one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageGroup {
    codes: Vec<String>,
}

impl LanguageGroup {
    /// Build a group from its ordered language codes. Arity must be at least 2.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        debug_assert!(codes.len() >= 2, "language groups have at least two entries");
        Self { codes }
    }

    /// Number of languages in the group.
    pub fn arity(&self) -> usize {
        self.codes.len()
    }

    /// Language at the given round-robin position. Positions wrap around the
    /// group, so a trimmed chunk index can be passed directly.
    pub fn language_at(&self, position: usize) -> &str {
        &self.codes[position % self.codes.len()]
    }

    /// The language a compact recording is spoken in (the final entry).
    pub fn solo_language(&self) -> &str {
        &self.codes[self.codes.len() - 1]
    }

    /// All language codes in round-robin order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}

/// Immutable mapping from language-group code to its ordered languages.
///
/// Constructed once and injected into the pipeline; tests can supply a
/// fabricated table through [`LanguageRegistry::from_entries`].
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    groups: HashMap<String, LanguageGroup>,
}

impl LanguageRegistry {
    /// Registry of the known production language groups.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_GROUPS)
    }

    /// Build a registry from `(code, languages)` entries.
    pub fn from_entries(entries: &[(&str, &[&str])]) -> Self {
        let groups = entries
            .iter()
            .map(|(code, langs)| (code.to_string(), LanguageGroup::new(langs.iter().copied())))
            .collect();
        Self { groups }
    }

    /// Look up the group for a filename-derived code.
    pub fn resolve(&self, code: &str) -> Result<&LanguageGroup> {
        self.groups
            .get(code)
            .ok_or_else(|| LessonsplitError::UnknownLanguageGroup(code.to_string()))
    }
}
