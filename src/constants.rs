//! Common constants used throughout modhook.

/// Supported configuration file names, looked up in the source root
pub const CONFIG_FILES: [&str; 3] = ["modhook.json", "modhook.yml", "modhook.yaml"];

/// File extension of template bodies and bricks
pub const TEMPLATE_EXTENSION: &str = "tpl";

/// Token that turns a template body line into a brick include directive
pub const INCLUDE_DIRECTIVE: &str = "#include:";

/// Host file hook marker, e.g. `/* ![ModuleHook] statement_enum */`
pub const HOOK_MARKER_PATTERN: &str =
    r"^[ \t]*/\*[ ]*!\[ModuleHook\][ ]+(?P<hook_name>[A-Za-z0-9_]+)[ ]*\*/[ \t]*$";

// The leading spaces keep flex from reading the comments as scanner rules.
pub const GENERATED_BEGIN: &str =
    "  /* BEGIN - Automatically generated code. Do not change! */\n";
pub const GENERATED_END: &str = "  /* END - Automatically generated code. Do not change! */\n";

pub const DEFAULT_STATEMENT_ENUM_PREFIX: &str = "STMT_MOD_";
pub const DEFAULT_PARSER_TOKEN_PREFIX: &str = "TMOD_";

pub const DEFAULT_RETURN_TYPES: [&str; 1] = ["IOStatus"];
pub const DEFAULT_MODULE_PATTERN: &str = "modules/*.c";
pub const DEFAULT_TEMPLATE_ROOT: &str = "ppc/tpl";
pub const DEFAULT_OUTPUT_DIR: &str = "gen";
pub const DEFAULT_COPY_PATTERNS: [&str; 4] = ["*.c", "*.h", "*.l", "*.y"];
