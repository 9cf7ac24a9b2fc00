use modhook::config::{find_config_file, get_config, parse_config, Config};
use modhook::constants::CONFIG_FILES;
use modhook::generator::HookKind;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.return_types, ["IOStatus"]);
    assert_eq!(config.module_pattern, "modules/*.c");
    assert_eq!(config.template_root, PathBuf::from("ppc/tpl"));
    assert_eq!(config.output_dir, PathBuf::from("gen"));
    assert_eq!(config.conventions.statement_enum_prefix, "STMT_MOD_");
    assert_eq!(config.conventions.parser_token_prefix, "TMOD_");
    assert_eq!(config.conventions.fetch_call("glong"), Some("param_int_get"));

    let hosts: Vec<&str> = config.hooks.keys().map(String::as_str).collect();
    assert_eq!(hosts, ["scanner.l", "parser.y", "statements.h", "interpreter.c"]);
    assert_eq!(config.hooks["parser.y"], [HookKind::ParserToken, HookKind::ParserIdentifier]);
    assert_eq!(config.hooks["interpreter.c"], [HookKind::StatementExec, HookKind::ModuleInclude]);
}

#[test]
fn test_parse_json_config() {
    let config = parse_config(
        r#"{
            "return_types": ["IOStatus", "gboolean"],
            "hooks": {"statements.h": ["statement_enum"]},
            "conventions": {"statement_enum_prefix": "STMT_EXT_"}
        }"#,
    )
    .unwrap();

    assert_eq!(config.return_types, ["IOStatus", "gboolean"]);
    assert_eq!(config.hooks.len(), 1);
    assert_eq!(config.conventions.enum_identifier("dread"), "STMT_EXT_DREAD");
    assert_eq!(config.conventions.token_identifier("dread"), "TMOD_DREAD");
    assert_eq!(config.output_dir, PathBuf::from("gen"));
}

#[test]
fn test_parse_yaml_config() {
    let config = parse_config(
        "module_pattern: \"kernels/*.c\"\nstrict_placeholders: true\nhooks:\n  interpreter.c: [module_include, statement_exec]\n",
    )
    .unwrap();

    assert_eq!(config.module_pattern, "kernels/*.c");
    assert!(config.strict_placeholders);
    assert_eq!(config.hooks["interpreter.c"], [HookKind::ModuleInclude, HookKind::StatementExec]);
}

#[test]
fn test_parse_config_rejects_unknown_hook() {
    assert!(parse_config("hooks:\n  parser.y: [parser_rule]\n").is_err());
}

#[test]
fn test_parse_config_rejects_empty_return_types() {
    assert!(parse_config(r#"{"return_types": []}"#).is_err());
}

#[test]
fn test_get_config_lookup() {
    let temp_dir = TempDir::new().unwrap();
    assert_eq!(find_config_file(temp_dir.path(), &CONFIG_FILES), None);
    assert_eq!(get_config(temp_dir.path(), None).unwrap(), Config::default());

    let path = temp_dir.path().join("modhook.yml");
    fs::write(&path, "output_dir: build/gen\n").unwrap();
    assert_eq!(find_config_file(temp_dir.path(), &CONFIG_FILES), Some(path));
    assert_eq!(get_config(temp_dir.path(), None).unwrap().output_dir, PathBuf::from("build/gen"));

    let explicit = temp_dir.path().join("other.json");
    fs::write(&explicit, r#"{"output_dir": "out"}"#).unwrap();
    assert_eq!(
        get_config(temp_dir.path(), Some(&explicit)).unwrap().output_dir,
        PathBuf::from("out")
    );
}
