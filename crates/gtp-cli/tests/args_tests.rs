use super::*;
use clap::Parser;

#[test]
fn test_defaults() {
    let args = CliArgs::parse_from(["gtp", "tree.json"]);
    assert_eq!(args.input, PathBuf::from("tree.json"));
    assert_eq!(args.emit, Emit::Js);
    assert!(args.config.is_none());
    assert!(args.out.is_none());
    assert!(args.identifier_prefix.is_none());
    assert!(args.max_function_depth.is_none());
    assert!(args.pretty.is_none());
}

#[test]
fn test_camel_case_and_kebab_case_flags() {
    let camel = CliArgs::parse_from([
        "gtp",
        "tree.json",
        "--identifierPrefix",
        "_t",
        "--maxFunctionDepth",
        "8",
    ]);
    let kebab = CliArgs::parse_from([
        "gtp",
        "tree.json",
        "--identifier-prefix",
        "_t",
        "--max-function-depth",
        "8",
    ]);
    for args in [camel, kebab] {
        assert_eq!(args.identifier_prefix.as_deref(), Some("_t"));
        assert_eq!(args.max_function_depth, Some(8));
    }
}

#[test]
fn test_emit_and_output_flags() {
    let args = CliArgs::parse_from([
        "gtp", "tree.json", "--emit", "FACTS", "-o", "out.json", "-c", "gtp.json",
    ]);
    assert_eq!(args.emit, Emit::Facts);
    assert_eq!(args.out, Some(PathBuf::from("out.json")));
    assert_eq!(args.config, Some(PathBuf::from("gtp.json")));
}

#[test]
fn test_rejects_unknown_emit() {
    assert!(CliArgs::try_parse_from(["gtp", "tree.json", "--emit", "wasm"]).is_err());
    assert!(CliArgs::try_parse_from(["gtp"]).is_err());
}
