//! Template and brick rendering.
//!
//! A template is a body file plus a directory of brick files:
//!
//! ```text
//! <root>/<template_name>.tpl        template body
//! <root>/<template_name>/           bricks of the template
//!     <brick_name>.tpl
//! ```
//!
//! Body lines get the `body` substitutions. A body line containing
//! `#include: <brick_name>` is replaced by the brick rendered once per
//! instance supplied for that brick name.

use crate::constants::{INCLUDE_DIRECTIVE, TEMPLATE_EXTENSION};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder to replacement text for one repetition of a brick.
pub type BrickInstance = IndexMap<String, String>;

/// Brick instances keyed by brick name, plus the body-level substitutions.
#[derive(Debug, Clone, Default)]
pub struct BrickMap {
    body: BrickInstance,
    bricks: IndexMap<String, Vec<BrickInstance>>,
}

impl BrickMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a brick map that only carries body substitutions.
    pub fn with_body(body: BrickInstance) -> Self {
        Self { body, bricks: IndexMap::new() }
    }

    pub fn body(&self) -> &BrickInstance {
        &self.body
    }

    pub fn set_body(&mut self, body: BrickInstance) {
        self.body = body;
    }

    /// Sets the instance list of a brick, replacing any previous one.
    pub fn insert<S: Into<String>>(&mut self, brick: S, instances: Vec<BrickInstance>) {
        self.bricks.insert(brick.into(), instances);
    }

    /// Appends one instance to a brick.
    pub fn push<S: Into<String>>(&mut self, brick: S, instance: BrickInstance) {
        self.bricks.entry(brick.into()).or_default().push(instance);
    }

    pub fn instances(&self, brick: &str) -> Option<&[BrickInstance]> {
        self.bricks.get(brick).map(Vec::as_slice)
    }

    /// Checks that every placeholder is an angle-bracket delimited identifier.
    ///
    /// # Errors
    /// * `Error::InvalidPlaceholder` naming the first offending key
    pub fn validate_placeholders(&self) -> Result<()> {
        let keys = self.body.keys().chain(self.bricks.values().flatten().flat_map(|i| i.keys()));
        for key in keys {
            if !is_delimited_placeholder(key) {
                return Err(Error::InvalidPlaceholder { placeholder: key.clone() });
            }
        }
        Ok(())
    }
}

fn is_delimited_placeholder(key: &str) -> bool {
    key.strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .is_some_and(|ident| {
            !ident.is_empty() && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Replaces every occurrence of every key, in instance order.
pub fn substitute(line: &str, instance: &BrickInstance) -> String {
    instance
        .iter()
        .filter(|(key, _)| !key.is_empty())
        .fold(line.to_string(), |acc, (key, value)| acc.replace(key.as_str(), value))
}

/// Brick name named by an include directive line, if the line is one.
///
/// `Some(None)` means the line is a directive without a brick name.
fn include_target(line: &str) -> Option<Option<&str>> {
    let (_, rest) = line.split_once(INCLUDE_DIRECTIVE)?;
    Some(rest.split_whitespace().next())
}

/// A named template resolved against a template root.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    body_path: PathBuf,
    brick_dir: PathBuf,
}

impl Template {
    pub fn new<P: AsRef<Path>, S: Into<String>>(template_root: P, name: S) -> Self {
        let name = name.into();
        let root = template_root.as_ref();
        Self {
            body_path: root.join(format!("{name}.{TEMPLATE_EXTENSION}")),
            brick_dir: root.join(&name),
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body_path(&self) -> &Path {
        &self.body_path
    }

    pub fn brick_dir(&self) -> &Path {
        &self.brick_dir
    }

    pub fn brick_path(&self, brick: &str) -> PathBuf {
        self.brick_dir.join(format!("{brick}.{TEMPLATE_EXTENSION}"))
    }

    /// Renders the template with the supplied brick instances.
    ///
    /// # Errors
    /// * `Error::MissingTemplateFile` if the body file does not exist
    /// * `Error::MissingBrick` if an include names a brick absent from `bricks`
    /// * `Error::MissingBrickFile` if an included brick file does not exist
    /// * `Error::MalformedInclude` if an include directive has no brick name
    pub fn render(&self, bricks: &BrickMap) -> Result<String> {
        debug!("Rendering template '{}'", self.name);
        let body = read_template_file(&self.body_path, |path| Error::MissingTemplateFile { path })?;

        let mut code = String::with_capacity(body.len());
        for line in body.split_inclusive('\n') {
            match include_target(line) {
                Some(Some(brick)) => code.push_str(&self.render_brick(bricks, brick)?),
                Some(None) => {
                    return Err(Error::MalformedInclude {
                        path: self.body_path.display().to_string(),
                        line: line.trim_end().to_string(),
                    })
                }
                None => code.push_str(&substitute(line, bricks.body())),
            }
        }
        Ok(code)
    }

    fn render_brick(&self, bricks: &BrickMap, brick: &str) -> Result<String> {
        let instances = bricks.instances(brick).ok_or_else(|| Error::MissingBrick {
            template: self.name.clone(),
            brick: brick.to_string(),
        })?;
        let source = read_template_file(&self.brick_path(brick), |path| {
            Error::MissingBrickFile { path }
        })?;

        debug!("Expanding brick '{}' with {} instance(s)", brick, instances.len());
        let mut code = String::new();
        for instance in instances {
            for line in source.split_inclusive('\n') {
                code.push_str(&substitute(line, instance));
            }
        }
        Ok(code)
    }
}

fn read_template_file(path: &Path, missing: impl FnOnce(String) -> Error) -> Result<String> {
    if !path.is_file() {
        return Err(missing(path.display().to_string()));
    }
    fs::read_to_string(path)
        .map_err(|e| Error::FileIo { path: path.display().to_string(), source: e })
}
