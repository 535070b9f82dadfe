//! Layer discovery and loading from the configuration tree.
//!
//! Given a layer identity (root, category, optional class scope,
//! optional locale), the loader finds the matching source files and
//! folds them into one [`PropertyLayer`]. File handles are scoped to
//! each read; nothing stays open after loading.

use crate::error::ConfigError;
use crate::layer::PropertyLayer;
use crate::locale::Locale;
use crate::os::OsFamily;
use crate::types::ClassScope;
use regex_lite::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Folder under the root holding global defaults.
pub const GLOBAL_DIR: &str = "global";
/// Folder under a category holding class-scoped files.
pub const CLASS_DIR: &str = "class";
/// Folder under the root holding OS override files.
pub const OS_DIR: &str = "os";

const PROPERTIES_EXT: &str = ".properties";

/// Discovers the property files for one layer identity and folds them
/// into a single merged layer.
#[derive(Debug)]
pub struct LayerLoader {
    root: PathBuf,
    locale: Option<Locale>,
    /// Matches unqualified `*.properties` names. `_` is outside the
    /// class, so locale-qualified variants are never listed directly;
    /// they are resolved per base resource instead.
    filter: Regex,
}

impl LayerLoader {
    pub fn new(root: impl Into<PathBuf>, locale: Option<Locale>) -> Self {
        Self {
            root: root.into(),
            locale,
            filter: Regex::new(r"^[A-Za-z0-9.-]+\.properties$")
                .expect("properties filename pattern is valid"),
        }
    }

    /// The configuration root this loader reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the merged whole-category layer for `category` (`global` or
    /// an environment code).
    ///
    /// Every matching file directly under the category folder is
    /// locale-resolved and folded in, in lexical filename order so the
    /// fold is deterministic. Keys colliding across files of one
    /// category are a caller hazard either way. An existing but empty
    /// directory yields an empty, present layer.
    pub fn load_category(&self, category: &str) -> Result<PropertyLayer, ConfigError> {
        let dir = self.root.join(category);
        if !dir.is_dir() {
            return Err(ConfigError::MissingDirectory { path: dir });
        }

        let entries = std::fs::read_dir(&dir).map_err(|source| ConfigError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut names: Vec<String> = Vec::new();
        for entry in entries.flatten() {
            if let Some(name) = entry.file_name().to_str()
                && self.filter.is_match(name)
                && entry.path().is_file()
            {
                names.push(name.to_string());
            }
        }
        names.sort();

        let mut layer = PropertyLayer::new();
        for name in &names {
            let stem = name.strip_suffix(PROPERTIES_EXT).unwrap_or(name);
            if let Some(source) = self.load_resource(&dir, stem) {
                layer.merge_override(&source);
            }
        }
        Ok(layer)
    }

    /// Load the single class-scoped resource under `category`, if
    /// present.
    ///
    /// The unqualified `{category}/class/{stem}.properties` file gates
    /// the slot; when it exists the resource is loaded locale-aware.
    /// Absence is not an error — the slot simply stays empty.
    pub fn load_class(&self, category: &str, scope: &ClassScope) -> Option<PropertyLayer> {
        let dir = self.root.join(category).join(CLASS_DIR);
        let base = dir.join(format!("{}{}", scope.file_stem(), PROPERTIES_EXT));
        if !base.is_file() {
            return None;
        }
        self.load_resource(&dir, scope.file_stem())
    }

    /// Load the OS override layer for `family`, if the file exists.
    /// OS files never take locale variants.
    pub fn load_os(&self, family: OsFamily) -> Option<PropertyLayer> {
        let path = self
            .root
            .join(OS_DIR)
            .join(format!("{}{}", family.file_stem(), PROPERTIES_EXT));
        if !path.is_file() {
            return None;
        }
        self.read_file(&path)
    }

    /// Locale-aware load of one base resource: fold the default file,
    /// then the language variant, then the exact variant, so the most
    /// specific source wins per key.
    fn load_resource(&self, dir: &Path, stem: &str) -> Option<PropertyLayer> {
        let mut candidates = vec![format!("{stem}{PROPERTIES_EXT}")];
        if let Some(locale) = &self.locale {
            for suffix in locale.suffixes().iter().rev() {
                candidates.push(format!("{stem}{suffix}{PROPERTIES_EXT}"));
            }
        }

        let mut merged: Option<PropertyLayer> = None;
        for name in candidates {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            if let Some(source) = self.read_file(&path) {
                merged
                    .get_or_insert_with(PropertyLayer::new)
                    .merge_override(&source);
            }
        }
        merged
    }

    /// Read one properties file, logging and skipping on IO failure.
    fn read_file(&self, path: &Path) -> Option<PropertyLayer> {
        match PropertyLayer::from_file(path) {
            Ok(layer) => {
                debug!(path = %path.display(), entries = layer.len(), "loaded properties file");
                Some(layer)
            }
            Err(err) => {
                warn!(%err, "skipping unreadable properties file");
                None
            }
        }
    }
}
