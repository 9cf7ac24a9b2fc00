//! Splicing of accumulated hook code into host source files.
//!
//! Every host line of the form `/* ![ModuleHook] <hook_name> */` (optionally
//! indented with spaces or tabs) is replaced by the code accumulated for
//! `<hook_name>`, bracketed by the generated-code BEGIN and END lines. All
//! other lines pass through untouched.

use crate::constants::{GENERATED_BEGIN, GENERATED_END, HOOK_MARKER_PATTERN};
use crate::error::{Error, Result};
use crate::registry::HookRegistry;
use log::debug;
use regex::bytes::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Recognizes hook marker lines.
///
/// Host files are matched as raw bytes, so sources in any ASCII-compatible
/// encoding pass through unchanged.
#[derive(Debug, Clone)]
pub struct HookMarker {
    pattern: Regex,
}

impl HookMarker {
    /// # Errors
    /// * `Error::RegexError` if the marker pattern does not compile
    pub fn new() -> Result<Self> {
        Ok(Self { pattern: Regex::new(HOOK_MARKER_PATTERN)? })
    }

    /// Hook name of a marker line, or `None` for ordinary lines.
    pub fn hook_name<'a>(&self, line: &'a [u8]) -> Option<&'a str> {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let name = self.pattern.captures(line)?.name("hook_name")?;
        std::str::from_utf8(name.as_bytes()).ok()
    }

    /// Replaces every hook marker line of `source` with its generated block.
    ///
    /// Hooks without contributions yield an empty block between the markers.
    pub fn splice(&self, source: &[u8], registry: &HookRegistry) -> Vec<u8> {
        let mut spliced = Vec::with_capacity(source.len());
        for line in source.split_inclusive(|b| *b == b'\n') {
            match self.hook_name(line) {
                Some(hook) => {
                    debug!("Splicing hook '{hook}'");
                    spliced.extend_from_slice(GENERATED_BEGIN.as_bytes());
                    spliced.extend_from_slice(registry.get(hook).as_bytes());
                    spliced.extend_from_slice(GENERATED_END.as_bytes());
                }
                None => spliced.extend_from_slice(line),
            }
        }
        spliced
    }
}

/// Splices `source` with a freshly compiled [`HookMarker`].
pub fn splice_source(source: &[u8], registry: &HookRegistry) -> Result<Vec<u8>> {
    Ok(HookMarker::new()?.splice(source, registry))
}

#[derive(Debug, Clone)]
struct SpliceTarget {
    source: PathBuf,
    output: PathBuf,
}

/// Writes host files with their hooks replaced by generated code.
///
/// A pure splicer has no host file; template-only flows use it and any
/// attempt to splice with it is an error.
#[derive(Debug, Clone)]
pub struct HookSplicer {
    target: Option<SpliceTarget>,
}

impl HookSplicer {
    pub fn new<S: Into<PathBuf>, O: Into<PathBuf>>(source: S, output: O) -> Self {
        Self { target: Some(SpliceTarget { source: source.into(), output: output.into() }) }
    }

    /// Splicer for `source_root/host` that writes to `output_root/host`.
    pub fn mirrored<R, H, O>(source_root: R, host: H, output_root: O) -> Self
    where
        R: AsRef<Path>,
        H: AsRef<Path>,
        O: AsRef<Path>,
    {
        let host = host.as_ref();
        Self::new(source_root.as_ref().join(host), output_root.as_ref().join(host))
    }

    pub fn pure() -> Self {
        Self { target: None }
    }

    pub fn is_pure(&self) -> bool {
        self.target.is_none()
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.target.as_ref().map(|t| t.output.as_path())
    }

    fn target(&self) -> Result<&SpliceTarget> {
        self.target.as_ref().ok_or(Error::PureSplicer)
    }

    /// Reads the host file and returns its spliced content.
    ///
    /// # Errors
    /// * `Error::PureSplicer` for a pure splicer
    /// * `Error::FileIo` if the host file cannot be read
    /// * `Error::RegexError` if the marker pattern does not compile
    pub fn render(&self, registry: &HookRegistry) -> Result<Vec<u8>> {
        let target = self.target()?;
        let source = fs::read(&target.source).map_err(|e| Error::FileIo {
            path: target.source.display().to_string(),
            source: e,
        })?;
        splice_source(&source, registry)
    }

    /// Splices the host file and commits the result to the output path.
    ///
    /// The output is staged next to its destination and moved into place only
    /// once it is complete, so a failed run never leaves a half-written file.
    /// The output takes the host file's permissions.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - The written output path
    pub fn write(&self, registry: &HookRegistry) -> Result<PathBuf> {
        let spliced = self.render(registry)?;
        let target = self.target()?;
        let output = &target.output;
        let io_error = |e: std::io::Error| Error::FileIo {
            path: output.display().to_string(),
            source: e,
        };

        let parent = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(io_error)?;

        let permissions = fs::metadata(&target.source)
            .map_err(|e| Error::FileIo { path: target.source.display().to_string(), source: e })?
            .permissions();

        let mut staged = NamedTempFile::new_in(&parent).map_err(io_error)?;
        staged.write_all(&spliced).map_err(io_error)?;
        fs::set_permissions(staged.path(), permissions).map_err(io_error)?;
        staged.persist(output).map_err(|e| io_error(e.error))?;

        debug!("Wrote '{}'", output.display());
        Ok(output.clone())
    }
}
