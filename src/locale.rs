//! Locale tags and the resource-variant fallback chain.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language tag with an optional region, as used in locale-qualified
/// resource names (`app_de_CH.properties`).
///
/// Resolution follows the standard fallback chain: the exact locale,
/// then the language alone, then the unqualified default resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// A language-only locale, e.g. `de`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: None,
        }
    }

    /// A language plus region locale, e.g. `de_CH`.
    pub fn with_region(language: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: Some(region.into().to_uppercase()),
        }
    }

    /// The language subtag, lowercase.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The region subtag, uppercase, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// File-name suffixes to probe, most specific first.
    ///
    /// `de_CH` yields `["_de_CH", "_de"]`; `de` yields `["_de"]`.
    pub fn suffixes(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(2);
        if let Some(region) = &self.region {
            out.push(format!("_{}_{}", self.language, region));
        }
        out.push(format!("_{}", self.language));
        out
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    /// Parse `de`, `de_CH` or `de-CH`.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidLocale {
            tag: tag.to_string(),
        };

        let mut parts = tag.split(['_', '-']);
        let language = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        if !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        match (parts.next(), parts.next()) {
            (None, _) => Ok(Self::new(language)),
            (Some(region), None) if !region.is_empty() => {
                Ok(Self::with_region(language, region))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}
