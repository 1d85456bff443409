use std::path::Path;

use ui_navigator::error::ErrorKind;
use ui_navigator::repository::store::Repository;

use crate::common::utils::fixture;

mod common;

#[test]
fn parse_splits_on_first_equals_and_trims() {
    let repository = Repository::parse("btn_ok = /form/button[@id='ok']\n");
    assert_eq!(repository.len(), 1);
    assert_eq!(repository.lookup("btn_ok"), "/form/button[@id='ok']");
}

#[test]
fn lines_without_equals_are_skipped() {
    let repository = Repository::parse("# buttons\n\nbtn_ok=/button\njunk line\n");
    assert_eq!(repository.len(), 1);
    assert_eq!(repository.entries()[0].key, "btn_ok");
}

#[test]
fn leading_bom_is_ignored() {
    let repository = Repository::parse("\u{feff}btn_ok=/button");
    assert_eq!(repository.lookup("btn_ok"), "/button");
}

#[test]
fn unknown_name_falls_back_to_itself() {
    let repository = Repository::parse("btn_ok=/button");
    assert_eq!(repository.lookup("/form/text[@id='x']"), "/form/text[@id='x']");
}

#[test]
fn lookup_matches_by_substring_first_entry_wins() {
    // `ok` is contained in `btn_ok_large`, which is declared first
    let repository = Repository::parse("btn_ok_large=/button[@id='large']\nok=/button[@id='ok']\n");
    assert_eq!(repository.lookup("ok"), "/button[@id='large']");
    assert_eq!(repository.find("ok").unwrap().key, "btn_ok_large");
}

#[test]
fn insert_appends_in_order() {
    let mut repository = Repository::new();
    assert!(repository.is_empty());
    repository.insert("first", "/a");
    repository.insert("first_again", "/b");
    assert_eq!(repository.lookup("first"), "/a");
}

#[test]
fn load_reads_file() {
    let path = fixture("repo_load.txt", "txt_user = /form/text[@id='user']\n");
    let repository = Repository::load(&path).unwrap();
    assert_eq!(repository.lookup("txt_user"), "/form/text[@id='user']");
}

#[test]
fn missing_file_is_not_found() {
    let err = Repository::load(Path::new("/nonexistent/ui-navigator/repo.txt")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("repository"));
}
