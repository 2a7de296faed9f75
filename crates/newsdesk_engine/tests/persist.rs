use std::fs;

use newsdesk_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_download_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("nested").join("downloads");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("news.csv", b"title\nA\n").unwrap();
    assert_eq!(first.file_name().unwrap(), "news.csv");
    assert_eq!(fs::read(&first).unwrap(), b"title\nA\n");

    let second = writer.write("news.csv", b"title\nB\n").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"title\nB\n");

    let leftovers = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("news.csv", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("news.csv").exists());
}
