//! Resolution configuration.

use unic_langid::{LanguageIdentifier, langid};

/// How formatted placeholders are isolated from the surrounding text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BidiIsolation {
    /// Placeholders are inserted as-is.
    #[default]
    None,
    /// Placeholders are wrapped in U+2068 FIRST STRONG ISOLATE and
    /// U+2069 POP DIRECTIONAL ISOLATE.
    Isolate,
}

impl BidiIsolation {
    /// Opening isolate mark.
    pub const FSI: char = '\u{2068}';
    /// Closing isolate mark.
    pub const PDI: char = '\u{2069}';

    /// Appends `text` to `output`, wrapped according to this setting.
    pub fn push_isolated(self, output: &mut String, text: &str) {
        match self {
            Self::None => output.push_str(text),
            Self::Isolate => {
                output.push(Self::FSI);
                output.push_str(text);
                output.push(Self::PDI);
            }
        }
    }
}

/// Configuration for a [`Resolver`](crate::Resolver).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveConfig {
    /// Locale passed to every registry function.
    pub locale: LanguageIdentifier,
    /// Bidi isolation applied to placeholders in string output.
    pub bidi_isolation: BidiIsolation,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            locale: langid!("en"),
            bidi_isolation: BidiIsolation::None,
        }
    }
}

impl ResolveConfig {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: LanguageIdentifier) -> Self {
        self.locale = locale;
        self
    }

    /// Builder method to set bidi isolation.
    #[must_use]
    pub fn with_bidi_isolation(mut self, isolation: BidiIsolation) -> Self {
        self.bidi_isolation = isolation;
        self
    }
}
