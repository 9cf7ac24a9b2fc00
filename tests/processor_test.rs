use modhook::config::Config;
use modhook::constants::{GENERATED_BEGIN, GENERATED_END};
use modhook::processor::Preprocessor;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config() -> Config {
    Config {
        template_root: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tpl"),
        ..Config::default()
    }
}

fn host_tree(root: &Path) {
    write(
        root,
        "statements.h",
        "typedef enum {\n    /* ![ModuleHook] statement_enum */\n} StatementType;\n",
    );
    write(
        root,
        "parser.y",
        "/* ![ModuleHook] parser_token */\n%%\nstmt:\n/* ![ModuleHook] parser_identifier */\n\t;\n",
    );
    write(root, "scanner.l", "%%\n  /* ![ModuleHook] scanner_keyword */\n%%\n");
    write(
        root,
        "interpreter.c",
        "/* ![ModuleHook] module_include */\nswitch (stmt->type) {\n\t\t/* ![ModuleHook] statement_exec */\n}\n",
    );
}

fn module_tree(root: &Path) {
    write(root, "modules/dwrite.c", "IOStatus dwrite(const gchar* fname, glong size)\n{\n}\n");
    write(root, "modules/dread.c", "IOStatus dread(gchar *fname)\n{\n}\n");
    write(root, "modules/notes.c", "/* helpers only */\nvoid helper(void) {}\n");
    write(root, "modules/README", "IOStatus ignored(glong x)\n");
}

#[test_log::test]
fn test_run_integrates_modules() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    host_tree(root);
    module_tree(root);
    write(root, "common.c", "int common;\n");
    write(root, "common.h", "extern int common;\n");
    write(root, "NOTES.md", "not a source\n");

    let config = config();
    let report = Preprocessor::new(&config, root).unwrap().run().unwrap();

    let names: Vec<String> = report.modules.iter().map(|m| m.file_name()).collect();
    assert_eq!(names, ["dread.c", "dwrite.c"]);
    assert_eq!(report.skipped, [root.join("modules/notes.c")]);
    assert_eq!(report.written.len(), 4);
    assert_eq!(report.copied, [root.join("gen/common.c"), root.join("gen/common.h")]);

    let gen = root.join("gen");
    assert_eq!(
        fs::read_to_string(gen.join("statements.h")).unwrap(),
        format!(
            "typedef enum {{\n{GENERATED_BEGIN}    STMT_MOD_DREAD,\n    STMT_MOD_DWRITE,\n{GENERATED_END}}} StatementType;\n"
        )
    );
    assert_eq!(
        fs::read_to_string(gen.join("parser.y")).unwrap(),
        format!(
            "{GENERATED_BEGIN}%token TMOD_DREAD\n%token TMOD_DWRITE\n{GENERATED_END}%%\nstmt:\n{GENERATED_BEGIN}\t| TMOD_DREAD\t{{ $$ = STMT_MOD_DREAD; }}\n\t| TMOD_DWRITE\t{{ $$ = STMT_MOD_DWRITE; }}\n{GENERATED_END}\t;\n"
        )
    );

    let interpreter = fs::read_to_string(gen.join("interpreter.c")).unwrap();
    assert!(interpreter.starts_with(&format!(
        "{GENERATED_BEGIN}#include \"modules/dread.c\"\n#include \"modules/dwrite.c\"\n{GENERATED_END}"
    )));
    let dread = interpreter.find("case STMT_MOD_DREAD").unwrap();
    let dwrite = interpreter.find("case STMT_MOD_DWRITE").unwrap();
    assert!(dread < dwrite);
    assert!(!interpreter.contains("ignored"));

    assert_eq!(fs::read_to_string(gen.join("common.c")).unwrap(), "int common;\n");
    assert!(!gen.join("NOTES.md").exists());
}

#[test]
fn test_runs_do_not_share_registry_state() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    host_tree(root);
    module_tree(root);

    let config = config();
    let preprocessor = Preprocessor::new(&config, root).unwrap();
    preprocessor.run().unwrap();
    let first = fs::read_to_string(root.join("gen/interpreter.c")).unwrap();
    preprocessor.run().unwrap();
    let second = fs::read_to_string(root.join("gen/interpreter.c")).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.matches("case STMT_MOD_DWRITE").count(), 1);
}

#[test]
fn test_run_without_modules_mirrors_sources() {
    let source_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let output_root = output_dir.path().join("gen");
    for host in ["statements.h", "parser.y", "scanner.l", "interpreter.c"] {
        write(source_dir.path(), host, "int x;\n\t/* plain comment */\n");
    }
    write(source_dir.path(), "common.c", "int common;\n");

    let config = Config { output_dir: output_root.clone(), ..config() };
    let report = Preprocessor::new(&config, source_dir.path()).unwrap().run().unwrap();

    assert!(report.modules.is_empty());
    assert!(!dir_diff::is_different(source_dir.path(), &output_root).unwrap());
}

#[test]
fn test_run_fails_on_missing_template() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    host_tree(root);
    module_tree(root);

    let config = Config { template_root: root.join("no_templates"), ..Config::default() };
    let result = Preprocessor::new(&config, root).unwrap().run();

    assert!(matches!(result, Err(modhook::error::Error::MissingTemplateFile { .. })));
    assert!(!root.join("gen/statements.h").exists());
}

#[test]
fn test_run_fails_on_missing_host_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    module_tree(root);

    let config = config();
    assert!(Preprocessor::new(&config, root).unwrap().run().is_err());
}

#[test]
fn test_run_accepts_latin1_sources() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    host_tree(root);
    module_tree(root);
    fs::write(root.join("modules/dread.c"), b"/* R\xfcnz */\nIOStatus dread(gchar *fname)\n{\n}\n")
        .unwrap();
    fs::write(root.join("common.h"), b"/* Universit\xe4t */\nextern int common;\n").unwrap();

    let config = config();
    let report = Preprocessor::new(&config, root).unwrap().run().unwrap();

    let names: Vec<String> = report.modules.iter().map(|m| m.file_name()).collect();
    assert_eq!(names, ["dread.c", "dwrite.c"]);
    assert_eq!(
        fs::read(root.join("gen/common.h")).unwrap(),
        b"/* Universit\xe4t */\nextern int common;\n"
    );
}
