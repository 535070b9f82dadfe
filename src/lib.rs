//! Layered `.properties` configuration resolution for test suites.
//!
//! Resolves configuration values for one test-class scope by merging
//! named layers of key/value property sets under a fixed precedence
//! order, highest first:
//!
//! 1. **Parent resolver** — delegates the whole lookup when present
//! 2. **Test parameters** — caller-supplied overrides from the harness
//! 3. **OS** — `os/{windows,linux,mac}.properties`, picked at build time
//! 4. **Custom class** — injected programmatically after construction
//! 5. **Environment class** — `{env}/class/{Name}.properties`
//! 6. **Global class** — `global/class/{Name}.properties`
//! 7. **Environment** — `{env}/*.properties`, merged
//! 8. **Global** — `global/*.properties`, merged (ultimate fallback)
//!
//! ## Configuration layout
//!
//! ```text
//! config/
//!   global/*.properties
//!   global/class/{Name}.properties
//!   {env}/*.properties
//!   {env}/class/{Name}.properties
//!   os/windows.properties
//!   os/linux.properties
//!   os/mac.properties
//! ```
//!
//! Locale variants follow the `{name}_{locale}.properties` suffix
//! convention and resolve exact locale, then language, then the
//! unqualified default.
//!
//! All discovery and loading happens eagerly at build time. Missing
//! directories are logged and captured on the resolver, never fatal:
//! lookups always degrade to the caller's default.
//!
//! ```no_run
//! use propstack::{ClassScope, ConfigProvider, Environment};
//!
//! let config = ConfigProvider::builder(ConfigProvider::default_root())
//!     .environment(Environment::new("qa"))
//!     .class_scope(ClassScope::new("LoginTest"))
//!     .build();
//!
//! let timeout = config.get_or("timeout", "30");
//! ```

pub mod chain;
pub mod error;
pub mod layer;
pub mod loader;
pub mod locale;
pub mod os;
pub mod props;
pub mod provider;
pub mod types;

pub use error::ConfigError;
pub use layer::PropertyLayer;
pub use loader::LayerLoader;
pub use locale::Locale;
pub use os::OsFamily;
pub use provider::{ConfigProvider, ConfigProviderBuilder};
pub use types::{ClassScope, Environment, LayerKind};
