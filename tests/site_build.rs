use std::fs;
use std::path::Path;

use mdsite::site::{self, SiteError};
use mdsite::{BuildConfig, Config, PathsConfig};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const TEMPLATE: &str = "<title>{{ Title }}</title><main>{{ Content }}</main>";

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn site_config(root: &Path, fail_fast: bool) -> Config {
    Config {
        paths: PathsConfig {
            content: root.join("content"),
            static_dir: root.join("static"),
            output: root.join("public"),
            template: root.join("template.html"),
        },
        build: BuildConfig {
            fail_fast,
            ..BuildConfig::default()
        },
    }
}

fn scaffold(root: &Path) {
    write(&root.join("template.html"), TEMPLATE);
    write(&root.join("static/index.css"), "body { margin: 0 }");
    write(&root.join("static/images/logo.png"), "png");
    write(
        &root.join("content/index.md"),
        "# Home\n\nWelcome to **the** site.\n\n* [Blog](/blog/first.html)",
    );
    write(
        &root.join("content/blog/first.md"),
        "Posted today\n\n# First Post\n\n```\nlet *x* = 1;\n```",
    );
}

#[test]
fn builds_pages_and_copies_static_files() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    scaffold(root);

    let report = site::build(&site_config(root, false)).unwrap();

    assert_eq!(report.copied, 2);
    assert_eq!(
        report.pages,
        vec![
            root.join("public/blog/first.html"),
            root.join("public/index.html"),
        ]
    );
    assert!(report.skipped.is_empty());

    assert_eq!(
        fs::read_to_string(root.join("public/index.html")).unwrap(),
        concat!(
            "<title>Home</title><main><div>",
            "<h1>Home</h1>",
            "<p>Welcome to <b>the</b> site.</p>",
            r#"<ul><li><a href="/blog/first.html">Blog</a></li></ul>"#,
            "</div></main>",
        )
    );
    assert_eq!(
        fs::read_to_string(root.join("public/blog/first.html")).unwrap(),
        concat!(
            "<title>First Post</title><main><div>",
            "<p>Posted today</p>",
            "<h1>First Post</h1>",
            "<pre><code>let *x* = 1;</code></pre>",
            "</div></main>",
        )
    );
    assert_eq!(
        fs::read_to_string(root.join("public/index.css")).unwrap(),
        "body { margin: 0 }"
    );
    assert!(root.join("public/images/logo.png").is_file());
}

#[test]
fn clean_build_removes_stale_output() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    scaffold(root);
    write(&root.join("public/old.html"), "stale");

    site::build(&site_config(root, false)).unwrap();

    assert!(!root.join("public/old.html").exists());
    assert!(root.join("public/index.html").is_file());
}

#[test]
fn broken_pages_are_skipped() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    scaffold(root);
    write(&root.join("content/untitled.md"), "no heading at all");
    write(&root.join("content/broken.md"), "# Broken\n\nthis is **unclosed");

    let report = site::build(&site_config(root, false)).unwrap();

    assert_eq!(report.pages.len(), 2);
    let skipped: Vec<_> = report.skipped.iter().map(|(path, _)| path.clone()).collect();
    assert_eq!(
        skipped,
        vec![
            root.join("content/broken.md"),
            root.join("content/untitled.md"),
        ]
    );
    assert!(!root.join("public/untitled.html").exists());
}

#[test]
fn fail_fast_stops_on_first_broken_page() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    scaffold(root);
    write(&root.join("content/broken.md"), "# Broken\n\n`unclosed");

    let err = site::build(&site_config(root, true)).unwrap_err();

    match err {
        SiteError::Render { path, source } => {
            assert_eq!(path, root.join("content/broken.md"));
            assert_eq!(source, mdsite::Error::MalformedMarkup { delimiter: "`" });
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_template_is_reported() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    scaffold(root);
    fs::remove_file(root.join("template.html")).unwrap();

    let err = site::build(&site_config(root, false)).unwrap_err();
    assert!(matches!(err, SiteError::MissingTemplate(_)));
}

#[test]
fn missing_static_dir_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    scaffold(root);
    fs::remove_dir_all(root.join("static")).unwrap();

    let report = site::build(&site_config(root, false)).unwrap();
    assert_eq!(report.copied, 0);
    assert_eq!(report.pages.len(), 2);
}
