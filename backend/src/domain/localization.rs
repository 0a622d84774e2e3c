//! Language-tagged message catalog used to localise envelope messages.
//!
//! The catalog is a JSON object keyed by message key, then by language tag:
//!
//! ```json
//! {"forbidden": {"en": {"text": "Forbidden", "status": 403}}}
//! ```
//!
//! Every key must carry an entry for the default language so lookups for an
//! unsupported language always resolve.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Language tag key used in the catalog (for example `en` or `id`).
pub type LanguageTag = String;

/// Catalog shipped with the binary.
pub const BUNDLED_CATALOG: &str = include_str!("../../config/messages.json");

/// Localised text for one key and language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    /// Message shown to the client.
    pub text: String,
    /// Status code the message is meant for, informational only.
    #[serde(default)]
    pub status: Option<u16>,
}

/// Validation errors returned when building a [`MessageCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValidationError {
    Parse { message: String },
    EmptyCatalog,
    InvalidLanguageTag { key: String, language: String },
    EmptyText { key: String, language: String },
    MissingDefault { key: String, language: String },
}

impl fmt::Display for CatalogValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { message } => write!(f, "message catalog is not valid JSON: {message}"),
            Self::EmptyCatalog => write!(f, "message catalog must contain at least one key"),
            Self::InvalidLanguageTag { key, language } => write!(
                f,
                "language tag '{language}' for key '{key}' must not be empty or padded"
            ),
            Self::EmptyText { key, language } => {
                write!(f, "text for key '{key}' in '{language}' must not be empty")
            }
            Self::MissingDefault { key, language } => {
                write!(f, "key '{key}' has no entry for default language '{language}'")
            }
        }
    }
}

impl std::error::Error for CatalogValidationError {}

/// Message catalog keyed by message key, then language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    default_language: LanguageTag,
    entries: BTreeMap<String, BTreeMap<LanguageTag, CatalogEntry>>,
}

impl MessageCatalog {
    /// Validate and build a catalog.
    pub fn new(
        entries: BTreeMap<String, BTreeMap<LanguageTag, CatalogEntry>>,
        default_language: impl Into<LanguageTag>,
    ) -> Result<Self, CatalogValidationError> {
        let default_language = default_language.into();
        if entries.is_empty() {
            return Err(CatalogValidationError::EmptyCatalog);
        }

        for (key, languages) in &entries {
            for (language, entry) in languages {
                if language.trim().is_empty() || language.trim() != language {
                    return Err(CatalogValidationError::InvalidLanguageTag {
                        key: key.clone(),
                        language: language.clone(),
                    });
                }
                if entry.text.trim().is_empty() {
                    return Err(CatalogValidationError::EmptyText {
                        key: key.clone(),
                        language: language.clone(),
                    });
                }
            }
            if !languages.contains_key(&default_language) {
                return Err(CatalogValidationError::MissingDefault {
                    key: key.clone(),
                    language: default_language,
                });
            }
        }

        Ok(Self {
            default_language,
            entries,
        })
    }

    /// Parse and validate a JSON catalog document.
    pub fn from_json(
        json: &str,
        default_language: impl Into<LanguageTag>,
    ) -> Result<Self, CatalogValidationError> {
        let entries = serde_json::from_str(json).map_err(|err| CatalogValidationError::Parse {
            message: err.to_string(),
        })?;
        Self::new(entries, default_language)
    }

    /// Load the catalog shipped with the binary.
    pub fn bundled(default_language: impl Into<LanguageTag>) -> Result<Self, CatalogValidationError> {
        Self::from_json(BUNDLED_CATALOG, default_language)
    }

    /// Language used when a request does not select a supported one.
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Whether any key has text in `language`.
    pub fn supports(&self, language: &str) -> bool {
        self.entries
            .values()
            .any(|languages| languages.contains_key(language))
    }

    /// Pick `requested` when supported, otherwise the default language.
    pub fn resolve_language(&self, requested: Option<&str>) -> String {
        requested
            .filter(|language| self.supports(language))
            .unwrap_or(self.default_language.as_str())
            .to_owned()
    }

    /// Look up `key` in `language`, falling back to the default language.
    pub fn lookup(&self, key: &str, language: &str) -> Option<&CatalogEntry> {
        let languages = self.entries.get(key)?;
        languages
            .get(language)
            .or_else(|| languages.get(&self.default_language))
    }
}
