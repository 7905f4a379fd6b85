//! CLDR plural categories.

use intl_pluralrules::{PluralCategory, PluralRuleType, PluralRules};
use mf2_foundation::{Error, Result};
use unic_langid::LanguageIdentifier;

/// Keys that name a plural category.
pub(crate) const CATEGORIES: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

/// Cardinal (`1 apple`) or ordinal (`1st`) rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PluralKind {
    Cardinal,
    Ordinal,
}

impl PluralKind {
    fn rule_type(self) -> PluralRuleType {
        match self {
            Self::Cardinal => PluralRuleType::CARDINAL,
            Self::Ordinal => PluralRuleType::ORDINAL,
        }
    }
}

/// Returns the plural category of `number`, given as formatted digits.
///
/// Locales without rules of their own fall back to their bare language.
pub(crate) fn category(
    function: &str,
    locale: &LanguageIdentifier,
    kind: PluralKind,
    number: &str,
) -> Result<&'static str> {
    let rules = PluralRules::create(locale.clone(), kind.rule_type())
        .or_else(|_| {
            let language = LanguageIdentifier::from_parts(locale.language, None, None, &[]);
            PluralRules::create(language, kind.rule_type())
        })
        .map_err(|e| Error::bad_selector(function, format!("{e} ({locale})")))?;

    let category = rules
        .select(number)
        .map_err(|e| Error::bad_selector(function, format!("{e} ({number})")))?;

    Ok(match category {
        PluralCategory::ZERO => "zero",
        PluralCategory::ONE => "one",
        PluralCategory::TWO => "two",
        PluralCategory::FEW => "few",
        PluralCategory::MANY => "many",
        PluralCategory::OTHER => "other",
    })
}
