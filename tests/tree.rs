//! End-to-end tests of the directory-to-tree crawler.

use std::{fs, path::Path};

use livingdoc::{tree::Crawler, Config, ErrorHandling, NodeKind};
use tempfile::TempDir;

const FEATURE: &str = "\
Feature: Sample
  Scenario: Works
    Given something
";

const TAGGED_FEATURE: &str = "\
@manual
Feature: Tagged
  Scenario: Ignored anyway
    Given something
";

const MIXED_FEATURE: &str = "\
Feature: Mixed
  @wip
  Scenario: In progress
    Given something

  @automated
  Scenario: Stable
    Given something
";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn crawl_builds_ordered_tree_and_skips_ignorable_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.feature", FEATURE);
    write(dir.path(), "b/b1.feature", FEATURE);
    write(dir.path(), "b/b2.feature", FEATURE);
    write(dir.path(), "b/x.ignore", "scratch");

    let config = Config::new(dir.path());
    let report = Crawler::new(&config).crawl().unwrap();

    let listed: Vec<_> = report
        .tree
        .iter()
        .map(|n| (n.relative_path().to_owned(), n.kind().label()))
        .collect();
    assert_eq!(listed, [
        ("a.feature".to_owned(), "feature"),
        ("b".to_owned(), "folder"),
        ("b/b1.feature".to_owned(), "feature"),
        ("b/b2.feature".to_owned(), "feature"),
    ]);
    assert!(report.errors.is_empty());
}

#[test]
fn content_and_passthrough_files_become_nodes() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "index.md", "# Overview\n");
    write(dir.path(), "logo.png", "not really a png");
    write(dir.path(), "sample.feature", FEATURE);

    let config = Config::new(dir.path());
    let report = Crawler::new(&config).crawl().unwrap();

    let index = report.tree.find("index.md").unwrap();
    match index.kind() {
        NodeKind::Content(text) => assert_eq!(text, "# Overview\n"),
        other => panic!("expected content node, got {}", other.label()),
    }
    assert!(matches!(
        report.tree.find("logo.png").unwrap().kind(),
        NodeKind::Other,
    ));
}

#[test]
fn empty_folders_are_pruned() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "kept/sample.feature", FEATURE);
    write(dir.path(), "empty/only.ignore", "");
    fs::create_dir_all(dir.path().join("really-empty")).unwrap();

    let config = Config::new(dir.path());
    let report = Crawler::new(&config).crawl().unwrap();

    assert!(report.tree.find("kept").is_some());
    assert!(report.tree.find("empty").is_none());
    assert!(report.tree.find("really-empty").is_none());
}

#[test]
fn exclude_tags_remove_scenarios_and_whole_features() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "mixed.feature", MIXED_FEATURE);
    write(dir.path(), "tagged.feature", TAGGED_FEATURE);

    let config = Config::new(dir.path()).exclude_tags("wip;manual");
    let report = Crawler::new(&config).crawl().unwrap();

    // The feature-level tag removes the whole node.
    assert!(report.tree.find("tagged.feature").is_none());

    let mixed = report.tree.find("mixed.feature").unwrap().feature().unwrap();
    let names: Vec<_> =
        mixed.elements.iter().map(|el| el.name().to_owned()).collect();
    assert_eq!(names, ["Stable"]);
}

#[test]
fn hide_tags_only_annotate() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "mixed.feature", MIXED_FEATURE);

    let config = Config::new(dir.path()).hide_tags("automated");
    let report = Crawler::new(&config).crawl().unwrap();

    let mixed = report.tree.find("mixed.feature").unwrap().feature().unwrap();
    assert_eq!(mixed.elements.len(), 2);
    assert!(!mixed.elements[0].is_hidden());
    assert!(mixed.elements[1].is_hidden());
    assert!(!mixed.hidden);
}

#[test]
fn malformed_feature_aborts_by_default() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "good.feature", FEATURE);
    write(dir.path(), "bad.feature", "This is not Gherkin");

    let config = Config::new(dir.path());
    let err = Crawler::new(&config).crawl().unwrap_err();

    assert!(err.to_string().contains("bad.feature"));
}

#[test]
fn malformed_feature_is_collected_when_configured() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "good.feature", FEATURE);
    write(dir.path(), "bad.feature", "This is not Gherkin");

    let config =
        Config::new(dir.path()).error_handling(ErrorHandling::Collect);
    let report = Crawler::new(&config).crawl().unwrap();

    assert!(report.tree.find("good.feature").is_some());
    assert!(report.tree.find("bad.feature").is_none());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].path.ends_with("bad.feature"));
}

#[test]
fn relative_paths_use_forward_slashes_and_are_unique() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a/b/c/deep.feature", FEATURE);

    let config = Config::new(dir.path());
    let report = Crawler::new(&config).crawl().unwrap();

    let paths: Vec<_> =
        report.tree.iter().map(|n| n.relative_path().to_owned()).collect();
    assert_eq!(paths, ["a", "a/b", "a/b/c", "a/b/c/deep.feature"]);
    assert!(paths.iter().all(|p| !p.contains('\\')));
}
