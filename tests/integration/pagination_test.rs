//! Integration tests for cursor pagination of directory listings.

mod helpers;

use std::collections::HashSet;

use officex_api::directory::list::ListDirectoryRequest;
use officex_core::types::SortDirection;

use helpers::TestDrive;

fn listed_names(drive: &TestDrive, mut request: ListDirectoryRequest) -> Vec<String> {
    let mut names = Vec::new();
    loop {
        let page = drive
            .service
            .list_directory(&drive.owner, &request)
            .expect("Failed to list directory");
        names.extend(page.folders.iter().map(|f| f.record.name.clone()));
        names.extend(page.files.iter().map(|f| f.record.name.clone()));
        match page.cursor {
            Some(cursor) => request.cursor = Some(cursor),
            None => break,
        }
    }
    names
}

#[test]
fn test_cursor_walk_has_no_overlap_or_gap() {
    let drive = TestDrive::new();
    let root = drive.root();
    for i in 0..4 {
        drive.mkdir(&root, &format!("folder-{i}"));
    }
    for i in 0..9 {
        drive.touch(&root, &format!("file-{i}.txt"));
    }

    let mut request = ListDirectoryRequest::folder(root);
    request.page_size = Some(5);
    let names = listed_names(&drive, request);

    assert_eq!(names.len(), 13);
    let unique: HashSet<_> = names.iter().collect();
    assert_eq!(unique.len(), 13);
    assert!(names[..4].iter().all(|n| n.starts_with("folder-")));
    assert!(names[4..].iter().all(|n| n.starts_with("file-")));
}

#[test]
fn test_totals_cover_every_page() {
    let drive = TestDrive::new();
    let root = drive.root();
    drive.mkdir(&root, "a");
    drive.mkdir(&root, "b");
    drive.touch(&root, "c.txt");

    let mut request = ListDirectoryRequest::folder(root);
    request.page_size = Some(1);
    let first = drive.service.list_directory(&drive.owner, &request).unwrap();
    assert_eq!(first.total_folders, 2);
    assert_eq!(first.total_files, 1);
    assert_eq!(first.folders.len() + first.files.len(), 1);
    assert!(first.cursor.is_some());
}

#[test]
fn test_descending_walk_reverses_order() {
    let drive = TestDrive::new();
    let root = drive.root();
    for name in ["alpha", "beta", "gamma"] {
        drive.mkdir(&root, name);
    }

    let mut request = ListDirectoryRequest::folder(root);
    request.page_size = Some(2);
    request.direction = SortDirection::Desc;
    assert_eq!(listed_names(&drive, request), vec!["gamma", "beta", "alpha"]);
}

#[test]
fn test_trash_is_not_listed_under_root() {
    let drive = TestDrive::new();
    let root = drive.root();
    drive.mkdir(&root, "Docs");

    let names = listed_names(&drive, ListDirectoryRequest::folder(root));
    assert_eq!(names, vec!["Docs"]);
}

#[test]
fn test_invalid_cursor_is_rejected() {
    let drive = TestDrive::new();
    let mut request = ListDirectoryRequest::folder(drive.root());
    request.cursor = Some("not-a-cursor".into());
    let err = drive.service.list_directory(&drive.owner, &request).unwrap_err();
    assert_eq!(err.code(), 400);
}
