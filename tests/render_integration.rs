/*!
 * Integration tests for the public render API
 */

use std::fs;
use std::path::PathBuf;

use dirclip::{minify, render, DirClipError, Settings, Sink};
use tempfile::tempdir;

fn cs_settings() -> Settings {
    Settings {
        include_extensions: vec![".cs".to_string()],
        skip_directories: vec!["bin".to_string(), "obj".to_string()],
        max_file_size_kb: 500,
        ..Settings::default()
    }
}

#[test]
fn test_render_then_minify_to_file() {
    let temp_dir = tempdir().unwrap();
    let project = temp_dir.path().join("Project");
    fs::create_dir_all(project.join("obj").join("Debug")).unwrap();
    fs::write(project.join("Program.cs"), "class  Program\n{\n}\n").unwrap();
    fs::write(project.join("obj").join("Debug").join("Gen.cs"), "// generated\n").unwrap();

    let rendered = render(&project, &cs_settings()).unwrap();
    assert!(rendered.contains("[DIR] Project/"));
    assert!(rendered.contains("    [FILE] Program.cs\n    Content:\n    class  Program\n"));
    assert!(!rendered.contains("Gen.cs"));

    let minified = minify(&rendered);
    assert!(minified.contains("[DIR] Project/[FILE] Program.csContent:class Program{}"));

    let out = temp_dir.path().join("context.txt");
    Sink::File(out.clone()).deliver(&minified).unwrap();
    assert_eq!(fs::read_to_string(out).unwrap(), minified);
}

#[test]
fn test_render_is_deterministic() {
    let temp_dir = tempdir().unwrap();
    for name in ["zeta.cs", "alpha.cs", "Beta.cs", "mid.cs"] {
        fs::write(temp_dir.path().join(name), name).unwrap();
    }
    fs::create_dir(temp_dir.path().join("b")).unwrap();
    fs::create_dir(temp_dir.path().join("a")).unwrap();

    let first = render(temp_dir.path(), &cs_settings()).unwrap();
    let second = render(temp_dir.path(), &cs_settings()).unwrap();
    assert_eq!(first, second);

    let files: Vec<&str> = first
        .lines()
        .filter_map(|l| l.trim_start().strip_prefix("[FILE] "))
        .collect();
    // Ordinal order puts upper case first
    assert_eq!(files, vec!["Beta.cs", "alpha.cs", "mid.cs", "zeta.cs"]);

    let a = first.find("[DIR] a/").unwrap();
    let b = first.find("[DIR] b/").unwrap();
    assert!(a < b);
}

#[test]
fn test_render_missing_root() {
    let missing = PathBuf::from("/definitely/not/a/real/dirclip/root");
    let err = render(&missing, &cs_settings()).unwrap_err();

    assert!(matches!(err, DirClipError::RootNotFound(_)));
    assert_eq!(
        err.to_string(),
        "Directory not found: /definitely/not/a/real/dirclip/root"
    );
}
