//! Error handling for modhook.
//! Defines the error taxonomy and result type used throughout the crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while extracting signatures, rendering templates,
/// or splicing host files.
#[derive(Error, Debug)]
pub enum Error {
    /// A module or host file could not be read, or spliced output could not be written.
    #[error("Failed to access '{path}': {source}.")]
    FileIo {
        path: String,
        #[source]
        source: io::Error,
    },

    /// No line of the module matched the function header grammar.
    #[error("No function header found in module '{module}'.")]
    SignatureNotFound { module: String },

    #[error("Template file '{path}' does not exist.")]
    MissingTemplateFile { path: String },

    #[error("Brick file '{path}' does not exist.")]
    MissingBrickFile { path: String },

    /// An include directive names a brick that has no entry in the brick map.
    #[error("Template '{template}' includes brick '{brick}' but no instances were supplied.")]
    MissingBrick { template: String, brick: String },

    #[error("Include directive without a brick name in '{path}': '{line}'.")]
    MalformedInclude { path: String, line: String },

    /// A generator was wired to a template that belongs to another hook.
    #[error("Cannot handle integration hook '{template}' with the '{hook}' generator.")]
    UnknownHook { hook: String, template: String },

    #[error("No parameter fetch call configured for type '{param_type}' (module '{module}').")]
    UnsupportedParameterType { param_type: String, module: String },

    #[error("Placeholder '{placeholder}' is not of the form <identifier>.")]
    InvalidPlaceholder { placeholder: String },

    /// Splicing was requested from a splicer created without a host file.
    #[error("Pure splicers cannot write code. Create the splicer with a host file.")]
    PureSplicer,

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Invalid header pattern: {0}.")]
    RegexError(#[from] regex::Error),

    #[error("Invalid glob pattern: {0}.")]
    GlobError(#[from] globset::Error),

    #[error("Directory traversal error: {0}.")]
    WalkDirError(#[from] walkdir::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
