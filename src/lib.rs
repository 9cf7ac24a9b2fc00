//! modhook integrates self-contained module functions into a fixed host
//! source tree. Module signatures are rendered through templates into code
//! fragments, accumulated per hook, and spliced into the host files at their
//! `/* ![ModuleHook] <name> */` markers.

/// Command-line interface module
pub mod cli;

/// Configuration file handling and naming conventions
/// Supports JSON and YAML formats (modhook.json, modhook.yml, modhook.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Per-hook brick map construction and code generation
pub mod generator;

/// Logger initialization
pub mod logger;

/// Generation run orchestration
pub mod processor;

/// Accumulated generated code per hook
pub mod registry;

/// Module function signature extraction
pub mod signature;

/// Module and passthrough source discovery
pub mod sources;

/// Hook marker splicing of host files
pub mod splicer;

/// Template and brick rendering
pub mod template;
