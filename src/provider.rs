//! The externally visible configuration resolver.

use crate::chain::ResolutionChain;
use crate::error::ConfigError;
use crate::layer::PropertyLayer;
use crate::loader::{GLOBAL_DIR, LayerLoader};
use crate::os::OsFamily;
use crate::types::{ClassScope, Environment, LayerKind};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use tracing::{debug, error, info, warn};

/// Environment variable naming an alternate configuration root.
pub const CONFIG_DIR_ENV: &str = "PROPSTACK_CONFIG_DIR";
/// Default configuration root, relative to the working directory.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Resolves configuration values for one test-class scope.
///
/// Construction discovers and loads every layer eagerly; afterwards the
/// resolver only answers `get`/`contains` queries, except for the
/// custom-class layer which callers may merge into at any time.
///
/// An optional parent resolver is held as a weak reference: the
/// parent's lifetime is managed externally, and a parent that has been
/// dropped is treated as absent rather than failing the lookup.
#[derive(Debug)]
pub struct ConfigProvider {
    root: PathBuf,
    environment: Option<Environment>,
    class_scope: Option<ClassScope>,
    os_family: Option<OsFamily>,
    parent: Option<Weak<ConfigProvider>>,
    chain: ResolutionChain,
    init_errors: Vec<ConfigError>,
}

impl ConfigProvider {
    /// Start building a resolver rooted at `root`.
    pub fn builder(root: impl Into<PathBuf>) -> ConfigProviderBuilder {
        ConfigProviderBuilder {
            root: root.into(),
            environment: None,
            class_scope: None,
            parent: None,
            test_params: None,
            os_family: None,
        }
    }

    /// Resolve the default configuration root: `PROPSTACK_CONFIG_DIR`
    /// when set, else `./config`.
    pub fn default_root() -> PathBuf {
        std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR))
    }

    /// Get the property value for `key`; `None` if no layer holds it.
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(parent) = self.parent()
            && parent.contains(key)
        {
            debug!(key, "retrieved property from parent config");
            return parent.get(key);
        }
        match self.chain.lookup(key) {
            Some((kind, value)) => {
                debug!(key, layer = %kind, "retrieved property");
                Some(value)
            }
            None => {
                warn!(key, "property not found in any layer, returning default");
                None
            }
        }
    }

    /// Get the property value for `key`, or `default` if no layer
    /// holds it.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Whether `key` is present anywhere in the chain, the parent
    /// included. An absent parent or layer simply does not contribute.
    pub fn contains(&self, key: &str) -> bool {
        if let Some(parent) = self.parent()
            && parent.contains(key)
        {
            return true;
        }
        self.chain.contains(key)
    }

    /// Merge `overrides` into the custom-class layer, creating it on
    /// first call. Visible to the next `get` immediately.
    pub fn load_custom_class_properties(&self, overrides: &PropertyLayer) {
        self.chain.merge_custom(overrides);
    }

    /// Log every key/value pair currently held, one layer at a time,
    /// starting with the lowest-priority layer. Observational only.
    pub fn log_available_properties(&self) {
        self.chain.for_each_low_to_high(|kind, layer| {
            match (&self.environment, kind) {
                (Some(env), LayerKind::Environment | LayerKind::EnvironmentClass) => {
                    info!(layer = %kind, environment = %env, "properties available");
                }
                _ => info!(layer = %kind, "properties available"),
            }
            for (key, value) in layer.iter() {
                info!("\tkey[{key}], value[{value}]");
            }
        });
    }

    /// Union of all keys loaded into this resolver's own chain, for
    /// diagnostics.
    pub fn keys(&self) -> BTreeSet<String> {
        self.chain.keys()
    }

    /// The configuration root this resolver was built from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The environment this resolver was built for, if any.
    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    /// The class scope this resolver was built for, if any.
    pub fn class_scope(&self) -> Option<&ClassScope> {
        self.class_scope.as_ref()
    }

    /// The OS family selected at construction, if recognized.
    pub fn os_family(&self) -> Option<OsFamily> {
        self.os_family
    }

    /// The raw externally supplied test-parameters layer, if any. This
    /// is the contract toward an external object-construction facility.
    pub fn test_params(&self) -> Option<&PropertyLayer> {
        self.chain.test_params.as_ref()
    }

    /// Structural problems encountered while loading, for inspection.
    /// A non-empty list means some slots are absent and lookups degrade
    /// to defaults.
    pub fn init_errors(&self) -> &[ConfigError] {
        &self.init_errors
    }

    fn parent(&self) -> Option<Arc<ConfigProvider>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }
}

/// Builder for [`ConfigProvider`]. `build` performs all layer
/// discovery and loading synchronously; the returned resolver is fully
/// populated and ready for queries.
#[derive(Debug)]
pub struct ConfigProviderBuilder {
    root: PathBuf,
    environment: Option<Environment>,
    class_scope: Option<ClassScope>,
    parent: Option<Weak<ConfigProvider>>,
    test_params: Option<PropertyLayer>,
    os_family: Option<OsFamily>,
}

impl ConfigProviderBuilder {
    /// Target environment; its code names the environment folder and
    /// its locale drives resource-variant resolution.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Class scope for `class/{Name}.properties` lookups.
    pub fn class_scope(mut self, scope: ClassScope) -> Self {
        self.class_scope = Some(scope);
        self
    }

    /// Parent resolver consulted before every own layer. Held weakly;
    /// the parent's lifetime stays with the caller.
    pub fn parent(mut self, parent: &Arc<ConfigProvider>) -> Self {
        self.parent = Some(Arc::downgrade(parent));
        self
    }

    /// Externally supplied test parameters, the highest-priority layer
    /// after the parent.
    pub fn test_params(mut self, params: PropertyLayer) -> Self {
        self.test_params = Some(params);
        self
    }

    /// Override OS-family detection, mainly for tests.
    pub fn os_family(mut self, family: OsFamily) -> Self {
        self.os_family = Some(family);
        self
    }

    /// Discover and load every layer, returning the ready resolver.
    ///
    /// Structural problems (missing root, missing environment folder)
    /// are logged and captured, never fatal: the affected slots stay
    /// absent and lookups degrade to defaults.
    pub fn build(self) -> Arc<ConfigProvider> {
        let Self {
            root,
            environment,
            class_scope,
            parent,
            test_params,
            os_family,
        } = self;

        let os_family = os_family.or_else(OsFamily::detect);
        let locale = environment.as_ref().and_then(|e| e.locale().cloned());
        let loader = LayerLoader::new(&root, locale);

        let mut init_errors = Vec::new();
        let mut chain = ResolutionChain {
            test_params,
            ..Default::default()
        };

        if !root.is_dir() {
            let err = ConfigError::MissingBaseDirectory { path: root.clone() };
            error!(%err, "configuration initialisation error");
            init_errors.push(err);
        } else {
            match loader.load_category(GLOBAL_DIR) {
                Ok(layer) => chain.global = Some(layer),
                Err(err) => {
                    warn!(%err, "global folder not existing, can't load default values");
                    init_errors.push(err);
                }
            }

            if let Some(env) = &environment {
                match loader.load_category(env.code()) {
                    Ok(layer) => chain.env = Some(layer),
                    Err(ConfigError::MissingDirectory { path }) => {
                        let err = ConfigError::MissingEnvironmentDirectory {
                            code: env.code().to_string(),
                            path,
                        };
                        error!(%err, "configuration initialisation error");
                        init_errors.push(err);
                    }
                    Err(err) => {
                        error!(%err, "configuration initialisation error");
                        init_errors.push(err);
                    }
                }
            }

            if let Some(scope) = &class_scope {
                chain.global_class = loader.load_class(GLOBAL_DIR, scope);
                if let Some(env) = &environment {
                    chain.env_class = loader.load_class(env.code(), scope);
                }
            }

            if let Some(family) = os_family {
                chain.os = loader.load_os(family);
            }
        }

        Arc::new(ConfigProvider {
            root,
            environment,
            class_scope,
            os_family,
            parent,
            chain,
            init_errors,
        })
    }
}
