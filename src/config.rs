//! Configuration handling for modhook.
//! Loads an optional `modhook.json` / `modhook.yml` / `modhook.yaml` from the
//! source root; every field falls back to the built-in default.

use crate::constants::{
    CONFIG_FILES, DEFAULT_COPY_PATTERNS, DEFAULT_MODULE_PATTERN, DEFAULT_OUTPUT_DIR,
    DEFAULT_PARSER_TOKEN_PREFIX, DEFAULT_RETURN_TYPES, DEFAULT_STATEMENT_ENUM_PREFIX,
    DEFAULT_TEMPLATE_ROOT,
};
use crate::error::{Error, Result};
use crate::generator::HookKind;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Naming conventions shared by the hook generators.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Conventions {
    /// Prefix of statement enum identifiers, e.g. `STMT_MOD_WRITE_BLOCK`
    pub statement_enum_prefix: String,
    /// Prefix of parser token identifiers, e.g. `TMOD_WRITE_BLOCK`
    pub parser_token_prefix: String,
    /// Parameter type to the interpreter call fetching a value of that type
    pub param_fetch: IndexMap<String, String>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            statement_enum_prefix: DEFAULT_STATEMENT_ENUM_PREFIX.to_string(),
            parser_token_prefix: DEFAULT_PARSER_TOKEN_PREFIX.to_string(),
            param_fetch: IndexMap::from([
                ("gchar*".to_string(), "param_string_get".to_string()),
                ("glong".to_string(), "param_int_get".to_string()),
            ]),
        }
    }
}

impl Conventions {
    pub fn enum_identifier(&self, function_name: &str) -> String {
        format!("{}{}", self.statement_enum_prefix, function_name.to_ascii_uppercase())
    }

    pub fn token_identifier(&self, function_name: &str) -> String {
        format!("{}{}", self.parser_token_prefix, function_name.to_ascii_uppercase())
    }

    pub fn fetch_call(&self, param_type: &str) -> Option<&str> {
        self.param_fetch.get(param_type).map(String::as_str)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Return types that mark a line as a module function header
    pub return_types: Vec<String>,
    /// Glob, relative to the source root, selecting module source files
    pub module_pattern: String,
    pub template_root: PathBuf,
    pub output_dir: PathBuf,
    /// Host file, relative to the source root, to the hooks it carries
    pub hooks: IndexMap<String, Vec<HookKind>>,
    /// File name globs of sources copied unchanged into the output directory
    pub copy_patterns: Vec<String>,
    pub conventions: Conventions,
    /// Reject placeholders that are not `<identifier>` before rendering
    pub strict_placeholders: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            return_types: DEFAULT_RETURN_TYPES.iter().map(|t| t.to_string()).collect(),
            module_pattern: DEFAULT_MODULE_PATTERN.to_string(),
            template_root: PathBuf::from(DEFAULT_TEMPLATE_ROOT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            hooks: IndexMap::from([
                ("scanner.l".to_string(), vec![HookKind::ScannerKeyword]),
                ("parser.y".to_string(), vec![HookKind::ParserToken, HookKind::ParserIdentifier]),
                ("statements.h".to_string(), vec![HookKind::StatementEnum]),
                (
                    "interpreter.c".to_string(),
                    vec![HookKind::StatementExec, HookKind::ModuleInclude],
                ),
            ]),
            copy_patterns: DEFAULT_COPY_PATTERNS.iter().map(|p| p.to_string()).collect(),
            conventions: Conventions::default(),
            strict_placeholders: false,
        }
    }
}

impl Config {
    /// Checks invariants serde cannot express.
    ///
    /// # Errors
    /// * `Error::ConfigError` if no return type is recognized or a host file
    ///   path is absolute
    pub fn validate(&self) -> Result<()> {
        if self.return_types.iter().all(|t| t.trim().is_empty()) {
            return Err(Error::ConfigError(
                "'return_types' must name at least one return type".to_string(),
            ));
        }
        if let Some(host) = self.hooks.keys().find(|host| Path::new(host).is_absolute()) {
            return Err(Error::ConfigError(format!(
                "host file '{host}' must be relative to the source root"
            )));
        }
        Ok(())
    }
}

/// Finds the first existing configuration file in `source_root`.
pub fn find_config_file<P: AsRef<Path>>(source_root: P, config_files: &[&str]) -> Option<PathBuf> {
    config_files
        .iter()
        .map(|file| source_root.as_ref().join(file))
        .find(|path| path.exists())
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor YAML
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = match serde_json::from_str(content) {
        Ok(config) => config,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}")))?,
    };
    config.validate()?;
    Ok(config)
}

/// Loads the configuration for a source tree.
///
/// # Arguments
/// * `source_root` - Directory searched for the default configuration files
/// * `explicit` - Configuration file given on the command line, if any
///
/// # Returns
/// * `Result<Config>` - Parsed configuration, or defaults if no file exists
pub fn get_config<P: AsRef<Path>>(source_root: P, explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(&source_root, &CONFIG_FILES),
    };

    match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .map_err(|e| Error::FileIo { path: path.display().to_string(), source: e })?;
            parse_config(&content)
        }
        None => {
            debug!(
                "No configuration file found (tried: {}), using defaults",
                CONFIG_FILES.join(", ")
            );
            Ok(Config::default())
        }
    }
}
