use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// LanguageError
///

#[derive(Debug, ThisError)]
pub enum LanguageError {
    #[error("language tag `{tag}` is not supported")]
    Unsupported { tag: String },

    #[error("supported-language set is empty")]
    NoLanguages,
}

///
/// LanguageConfig
///
/// The supported-language set plus the caller's active language.
///
/// Request scoped: build one per request (or clone and switch the active
/// tag) instead of consulting process-wide state. The active tag is what
/// an operation resolves to when no explicit language is supplied.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LanguageConfig {
    supported: BTreeSet<String>,
    active: String,
}

impl LanguageConfig {
    /// Build a config from the supported set and the active tag.
    /// The active tag must be a member of the supported set.
    pub fn new(
        supported: impl IntoIterator<Item = impl Into<String>>,
        active: impl Into<String>,
    ) -> Result<Self, LanguageError> {
        let supported: BTreeSet<String> = supported.into_iter().map(Into::into).collect();
        if supported.is_empty() {
            return Err(LanguageError::NoLanguages);
        }

        let active = active.into();
        if !supported.contains(&active) {
            return Err(LanguageError::Unsupported { tag: active });
        }

        Ok(Self { supported, active })
    }

    /// Switch the active language, validating membership.
    pub fn with_active(mut self, active: impl Into<String>) -> Result<Self, LanguageError> {
        let active = active.into();
        if !self.supported.contains(&active) {
            return Err(LanguageError::Unsupported { tag: active });
        }
        self.active = active;

        Ok(self)
    }

    #[must_use]
    pub fn active(&self) -> &str {
        &self.active
    }

    #[must_use]
    pub fn is_supported(&self, tag: &str) -> bool {
        self.supported.contains(tag)
    }

    /// Resolve an optional tag: `None` means the active language.
    /// The resolved tag must be a member of the supported set.
    pub fn resolve<'a>(&'a self, tag: Option<&'a str>) -> Result<&'a str, LanguageError> {
        let tag = tag.unwrap_or(&self.active);
        if self.supported.contains(tag) {
            Ok(tag)
        } else {
            Err(LanguageError::Unsupported {
                tag: tag.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LanguageConfig, LanguageError};

    fn config() -> LanguageConfig {
        LanguageConfig::new(["en", "de"], "en").expect("en/de config should build")
    }

    #[test]
    fn resolve_rejects_unsupported_tag() {
        let err = config().resolve(Some("xx")).unwrap_err();
        assert!(matches!(err, LanguageError::Unsupported { tag } if tag == "xx"));
    }

    #[test]
    fn resolve_defaults_to_active_language() {
        let config = config();
        assert_eq!(config.resolve(None).expect("active tag is supported"), "en");
        assert_eq!(config.resolve(Some("de")).expect("de is supported"), "de");
    }

    #[test]
    fn construction_validates_active_membership() {
        let err = LanguageConfig::new(["en"], "de").unwrap_err();
        assert!(matches!(err, LanguageError::Unsupported { tag } if tag == "de"));

        let empty: [&str; 0] = [];
        let err = LanguageConfig::new(empty, "en").unwrap_err();
        assert!(matches!(err, LanguageError::NoLanguages));
    }

    #[test]
    fn with_active_switches_within_supported_set() {
        let config = config().with_active("de").expect("de is supported");
        assert_eq!(config.active(), "de");
        assert!(config.with_active("fr").is_err());
    }
}
