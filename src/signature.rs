//! Function signature extraction for module source files.
//!
//! Only single-line function headers are recognized: the first line that
//! starts with one of the recognized return types, followed by an identifier
//! and a parenthesized parameter list, defines the module signature.

use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// One function parameter, with pointer stars normalized onto the type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub param_type: String,
    pub name: String,
}

impl Parameter {
    pub fn new<T: Into<String>, N: Into<String>>(param_type: T, name: N) -> Self {
        Self { param_type: param_type.into(), name: name.into() }
    }
}

/// Structured function header of a module.
///
/// When `valid` is false no other field carries meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub valid: bool,
    pub return_type: String,
    pub function_name: String,
    pub parameters: Vec<Parameter>,
}

impl Signature {
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Trait for turning module source text into a [`Signature`].
pub trait SignatureExtractor {
    /// Extracts the signature of the first recognized function header.
    /// Returns an invalid signature when no header is found.
    fn extract(&self, source: &str) -> Signature;
}

/// Regex based extractor for single-line C function headers.
pub struct HeaderPatternExtractor {
    pattern: Regex,
}

impl HeaderPatternExtractor {
    /// Creates an extractor that accepts the given return types.
    ///
    /// # Errors
    /// * `Error::ConfigError` if `return_types` is empty
    pub fn new<S: AsRef<str>>(return_types: &[S]) -> Result<Self> {
        if return_types.is_empty() {
            return Err(Error::ConfigError(
                "at least one recognized return type is required".to_string(),
            ));
        }
        let alternatives = return_types
            .iter()
            .map(|t| regex::escape(t.as_ref().trim()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"^[ \t]*(?P<return_type>{alternatives})[ \t]+(?P<function_name>[A-Za-z0-9_]+)[ \t]*\((?P<parameters>[A-Za-z0-9_*, \t]*)\)"
        ))?;
        Ok(Self { pattern })
    }

    fn match_line(&self, line: &str) -> Option<Signature> {
        let caps = self.pattern.captures(line)?;
        let parameters = parse_parameter_list(&caps["parameters"])?;
        Some(Signature {
            valid: true,
            return_type: caps["return_type"].to_string(),
            function_name: caps["function_name"].to_string(),
            parameters,
        })
    }
}

impl SignatureExtractor for HeaderPatternExtractor {
    fn extract(&self, source: &str) -> Signature {
        source.lines().find_map(|line| self.match_line(line)).unwrap_or_default()
    }
}

/// Splits a raw parameter list on commas. `()` and `(void)` have no parameters.
fn parse_parameter_list(raw: &str) -> Option<Vec<Parameter>> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "void" {
        return Some(Vec::new());
    }
    raw.split(',').map(parse_parameter).collect()
}

/// Tokenizes `const gchar *name` into type `gchar*` and name `name`.
fn parse_parameter(token: &str) -> Option<Parameter> {
    let (raw_type, raw_name) = token.trim().rsplit_once(|c: char| c.is_whitespace())?;

    let mut param_type = String::new();
    for part in raw_type.split_whitespace().filter(|part| *part != "const") {
        if !param_type.is_empty() && !part.starts_with('*') {
            param_type.push(' ');
        }
        param_type.push_str(part);
    }

    let mut name = raw_name.trim();
    while let Some(rest) = name.strip_prefix('*') {
        param_type.push('*');
        name = rest;
    }

    if param_type.is_empty() || name.is_empty() {
        return None;
    }
    Some(Parameter::new(param_type, name))
}

/// A module source file together with its extracted signature.
#[derive(Debug, Clone)]
pub struct Module {
    path: PathBuf,
    signature: Signature,
}

impl Module {
    pub fn new<P: Into<PathBuf>>(path: P, signature: Signature) -> Self {
        Self { path: path.into(), signature }
    }

    /// Reads the module file and extracts its signature.
    ///
    /// Bytes that are not UTF-8 are replaced before extraction; they can only
    /// occur outside the ASCII header line. A module without a recognizable
    /// header still loads; check [`Signature::is_valid`] before using it.
    pub fn load<P: AsRef<Path>>(path: P, extractor: &dyn SignatureExtractor) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read(path).map_err(|e| Error::FileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let signature = extractor.extract(&String::from_utf8_lossy(&source));
        debug!("Parameters of module '{}': {:?}", path.display(), signature);
        Ok(Self::new(path, signature))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Final path component, e.g. `dwrite.c`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
