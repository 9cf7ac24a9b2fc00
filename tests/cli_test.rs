use clap::Parser;
use modhook::cli::Args;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("modhook")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_default_args() {
    let parsed = Args::try_parse_from(make_args(&[])).unwrap();

    assert_eq!(parsed.source_dir, PathBuf::from("."));
    assert!(parsed.config.is_none());
    assert!(parsed.template_root.is_none());
    assert!(parsed.output_dir.is_none());
    assert!(!parsed.verbose);
}

#[test]
fn test_all_options() {
    let parsed = Args::try_parse_from(make_args(&[
        "--config",
        "modhook.yaml",
        "--template-root",
        "ppc/tpl",
        "--output-dir",
        "gen",
        "--verbose",
        "./src",
    ]))
    .unwrap();

    assert_eq!(parsed.source_dir, PathBuf::from("./src"));
    assert_eq!(parsed.config, Some(PathBuf::from("modhook.yaml")));
    assert_eq!(parsed.template_root, Some(PathBuf::from("ppc/tpl")));
    assert_eq!(parsed.output_dir, Some(PathBuf::from("gen")));
    assert!(parsed.verbose);
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-v", "-o", "out", "-t", "tpl", "-c", "cfg.json"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    assert_eq!(parsed.output_dir, Some(PathBuf::from("out")));
    assert_eq!(parsed.template_root, Some(PathBuf::from("tpl")));
    assert_eq!(parsed.config, Some(PathBuf::from("cfg.json")));
}

#[test]
fn test_unknown_flag() {
    assert!(Args::try_parse_from(make_args(&["--force"])).is_err());
}
