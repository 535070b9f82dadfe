//! Identity value objects used for layer lookup.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The deployment environment a test run targets.
///
/// The code doubles as the folder name under the configuration root
/// (`{root}/{code}/*.properties`); the optional locale selects
/// locale-qualified resource variants. Supplied once at resolver
/// construction and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    code: String,
    locale: Option<Locale>,
}

impl Environment {
    /// An environment without a locale.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            locale: None,
        }
    }

    /// An environment with a locale for resource-variant resolution.
    pub fn with_locale(code: impl Into<String>, locale: Locale) -> Self {
        Self {
            code: code.into(),
            locale: Some(locale),
        }
    }

    /// The environment code, used as a folder name.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The configured locale, if any.
    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.locale {
            Some(locale) => write!(f, "{} ({})", self.code, locale),
            None => write!(f, "{}", self.code),
        }
    }
}

/// The class-scope descriptor naming `class/{name}.properties`
/// resources.
///
/// A plain string plus an optional file-name override, supplied
/// explicitly by the caller. This replaces any runtime-reflection
/// mechanism for deriving the name from a test class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassScope {
    name: String,
    file_name: Option<String>,
}

impl ClassScope {
    /// A scope whose file name equals the class name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
        }
    }

    /// A scope with an explicit file-name override.
    pub fn with_file_name(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: Some(file_name.into()),
        }
    }

    /// The class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base name used for file lookups: the override when set, else the
    /// class name.
    pub fn file_stem(&self) -> &str {
        self.file_name.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for ClassScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Named slots of the resolution chain.
///
/// Consultation order, highest priority first: test parameters, OS,
/// custom class, environment class, global class, environment, global.
/// The parent resolver, when present, is consulted before all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// `global/*.properties`, merged. The ultimate fallback.
    Global,
    /// `{env}/*.properties`, merged.
    Environment,
    /// `global/class/{Name}.properties`.
    GlobalClass,
    /// `{env}/class/{Name}.properties`.
    EnvironmentClass,
    /// Injected programmatically after construction.
    CustomClass,
    /// `os/{windows,linux,mac}.properties`.
    Os,
    /// Caller-supplied overrides from the test harness.
    TestParams,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Global => write!(f, "global"),
            LayerKind::Environment => write!(f, "environment"),
            LayerKind::GlobalClass => write!(f, "global class"),
            LayerKind::EnvironmentClass => write!(f, "environment class"),
            LayerKind::CustomClass => write!(f, "custom class"),
            LayerKind::Os => write!(f, "os"),
            LayerKind::TestParams => write!(f, "test parameters"),
        }
    }
}
