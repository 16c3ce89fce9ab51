//! # Container Configuration
//!
//! Bindings, singletons, aliases and parameter values declared in TOML:
//!
//! ```toml
//! namespace = "App\\Drivers\\"
//!
//! [bindings]
//! "App\\Contracts\\Cache" = "App\\FileCache"
//!
//! [singletons]
//! "App\\Http\\Kernel" = "App\\Http\\Kernel"
//!
//! [aliases]
//! "App\\Http\\Kernel" = ["kernel", "http"]
//!
//! [parameters]
//! timeout = 30
//! "$region" = "eu-west-1"
//! ```
//!
//! Parameters become unscoped contextual `$name` values, the fallback of
//! binding rule 4 for every call made outside a more specific scope.

use crate::container::Container;
use crate::contextual::{Contextual, UNSCOPED};
use rivet_core::Value;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from loading or applying a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}")]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the expected layout.
    #[error("invalid container configuration")]
    Parse(#[from] toml::de::Error),

    /// A parameter uses a TOML type with no [`Value`] counterpart.
    #[error("unsupported parameter value: {0}")]
    Unsupported(String),
}

/// Declarative container setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerConfig {
    /// Prefix used by [`Container::create_factory_default`].
    pub namespace: String,
    /// Transient bindings: id to concrete class.
    pub bindings: BTreeMap<String, String>,
    /// Shared bindings: id to concrete class.
    pub singletons: BTreeMap<String, String>,
    /// Canonical id to alternate names.
    pub aliases: BTreeMap<String, Vec<String>>,
    /// Unscoped `$name` values.
    pub parameters: BTreeMap<String, toml::Value>,
}

impl ContainerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

fn to_value(key: &str, value: &toml::Value) -> Result<Value, ConfigError> {
    Ok(match value {
        toml::Value::String(s) => Value::Str(s.clone()),
        toml::Value::Integer(i) => Value::Int(*i),
        toml::Value::Float(f) => Value::Float(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(d) => Value::Str(d.to_string()),
        toml::Value::Array(items) => Value::List(
            items
                .iter()
                .map(|item| to_value(key, item))
                .collect::<Result<_, _>>()?,
        ),
        toml::Value::Table(_) => {
            return Err(ConfigError::Unsupported(format!("`{key}` is a table")));
        }
    })
}

impl Container {
    /// Register everything `config` declares.
    ///
    /// Parameter values are converted before anything is registered, so an
    /// unsupported value leaves the container untouched.
    pub fn apply_config(&self, config: &ContainerConfig) -> Result<(), ConfigError> {
        let parameters = config
            .parameters
            .iter()
            .map(|(key, value)| {
                let name = key.strip_prefix('$').unwrap_or(key);
                Ok((format!("${name}"), to_value(key, value)?))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        for (id, concrete) in &config.bindings {
            self.bind(id.as_str(), concrete.as_str());
        }
        for (id, concrete) in &config.singletons {
            self.singleton(id.as_str(), concrete.as_str());
        }
        for (id, aliases) in &config.aliases {
            for alias in aliases {
                self.alias(id.as_str(), alias.as_str());
            }
        }
        for (key, value) in parameters {
            self.add_contextual_binding(UNSCOPED.to_owned(), key, Contextual::Value(value));
        }
        if !config.namespace.is_empty() {
            self.set_namespace(config.namespace.as_str());
        }

        debug!(
            bindings = config.bindings.len(),
            singletons = config.singletons.len(),
            aliases = config.aliases.len(),
            parameters = config.parameters.len(),
            "Applied container configuration"
        );
        Ok(())
    }
}
