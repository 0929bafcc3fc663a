mod common;

use assert2::{check, let_assert};
use common::{QUICKSTART_EN, TempWorkspace, built_site, docs_site};
use docsift::{BuildError, IndexBuilder, IndexDigest, IndexEntry, WriteOutcome};
use rstest::rstest;

fn load_index(workspace: &TempWorkspace) -> Vec<IndexEntry> {
    serde_json::from_str(&workspace.read_file("public/search-index.json"))
        .expect("index should be valid JSON")
}

#[rstest]
fn build_extracts_every_recognized_file(docs_site: TempWorkspace) {
    let outcome = docs_site.build();
    check!(matches!(outcome, WriteOutcome::Written(_)));

    let entries = load_index(&docs_site);
    check!(entries.len() == 3);

    let quickstart = entries
        .iter()
        .find(|e| e.slug == "quickstart" && e.lang == "en")
        .expect("quickstart.en should be indexed");
    check!(quickstart.title == "Getting Started");
    check!(quickstart.headings.len() == 1);
    check!(quickstart.headings[0].text == "Configuration");
    check!(quickstart.headings[0].id == "Configuration");
    check!(quickstart.excerpt == "Install the tool. Configuration Set your API key.");

    let zh = entries
        .iter()
        .find(|e| e.slug == "quickstart" && e.lang == "zh")
        .expect("quickstart.zh should be indexed");
    check!(zh.headings[0].id == "配置");
}

#[rstest]
fn build_skips_unrecognized_names(docs_site: TempWorkspace) {
    docs_site.create_file("docs/README.md", "# Readme");
    docs_site.create_file("docs/notes.fr.md", "# Notes");
    docs_site.create_file("docs/image.en.png", "not markdown");
    docs_site.create_file("docs/nested/deep.en.md", "# Deep");

    let entries = IndexBuilder::default().build(&docs_site.docs_dir()).unwrap();
    check!(entries.len() == 3);
    check!(entries.iter().all(|e| e.slug != "deep" && e.slug != "notes"));
}

#[rstest]
fn build_recognizes_configured_languages(docs_site: TempWorkspace) {
    docs_site.create_file("docs/notes.fr.md", "# Notes");

    let builder = IndexBuilder::new(vec!["fr".to_string()]);
    let entries = builder.build(&docs_site.docs_dir()).unwrap();
    check!(entries.len() == 1);
    check!(entries[0].slug == "notes");
    check!(entries[0].lang == "fr");
}

#[test]
fn build_fails_on_missing_directory() {
    let workspace = TempWorkspace::new();
    let result = IndexBuilder::default().build(&workspace.path().join("missing"));
    let_assert!(Err(BuildError::ScanDir { .. }) = result);
}

#[test]
fn build_fails_on_unreadable_file() {
    let workspace = TempWorkspace::new();
    workspace.create_file("docs/good.en.md", QUICKSTART_EN);
    std::fs::write(workspace.docs_dir().join("bad.en.md"), [0xff, 0xfe, 0x00, 0xc3])
        .expect("write invalid utf-8");

    let result = IndexBuilder::default().build_to(&workspace.docs_dir(), &workspace.index_path());
    let_assert!(Err(BuildError::ReadFile { path, .. }) = result);
    check!(path.ends_with("bad.en.md"));
    check!(!workspace.index_path().exists());
}

#[rstest]
fn rebuild_without_changes_is_unchanged(built_site: TempWorkspace) {
    let before = built_site.read_file("public/search-index.json");
    let outcome = built_site.build();

    let_assert!(WriteOutcome::Unchanged(digest) = outcome);
    check!(digest == IndexDigest::of(&load_index(&built_site)));
    check!(outcome.digest() == digest);
    check!(built_site.read_file("public/search-index.json") == before);
}

#[rstest]
fn rebuild_after_edit_rewrites(built_site: TempWorkspace) {
    let first = IndexDigest::of(&load_index(&built_site));
    built_site.create_file("docs/faq.en.md", "# FAQ\n\nCommon questions.");

    let_assert!(WriteOutcome::Written(digest) = built_site.build());
    check!(digest != first);
    check!(load_index(&built_site).len() == 4);
    check!(!built_site.path().join("public/search-index.json.tmp").exists());
}

#[rstest]
fn build_is_deterministic(docs_site: TempWorkspace) {
    let a = IndexBuilder::default().build(&docs_site.docs_dir()).unwrap();
    let b = IndexBuilder::default().build(&docs_site.docs_dir()).unwrap();
    check!(a == b);
}
