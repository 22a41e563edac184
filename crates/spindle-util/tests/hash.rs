use std::io::Write;
use std::path::Path;

use spindle_util::hash::{md5_bytes, sha1_bytes, sha256_bytes, sha256_file};
use tempfile::NamedTempFile;

#[test]
fn test_sha256_bytes_empty() {
    let hash = sha256_bytes(b"");
    assert_eq!(
        hash,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_sha256_bytes_known_vector() {
    let hash = sha256_bytes(b"hello world");
    assert_eq!(
        hash,
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
}

#[test]
fn test_sha1_bytes_known_vector() {
    let hash = sha1_bytes(b"hello world");
    assert_eq!(hash, "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
}

#[test]
fn test_md5_bytes_known_vector() {
    let hash = md5_bytes(b"hello world");
    assert_eq!(hash, "5eb63bbbe01eeed093cb22bb8f5acdc3");
}

#[test]
fn test_sha256_file_matches_bytes() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(b"hello world").unwrap();
    tmp.flush().unwrap();
    let file_hash = sha256_file(tmp.path()).unwrap();
    assert_eq!(file_hash, sha256_bytes(b"hello world"));
}

#[test]
fn test_sha256_file_empty() {
    let tmp = NamedTempFile::new().unwrap();
    let hash = sha256_file(tmp.path()).unwrap();
    assert_eq!(hash, sha256_bytes(b""));
}

#[test]
fn test_sha256_file_not_found() {
    let result = sha256_file(Path::new("/nonexistent/path/file.jar"));
    assert!(result.is_err());
}
