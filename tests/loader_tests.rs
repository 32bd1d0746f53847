//! Document loading tests: plain text, PDFs, and failure paths.

mod common;

use ragstack::{RagError, load_documents};

#[test]
fn loads_text_files_as_utf8() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cat.txt"), "The cat sat on the mat.").unwrap();

    let documents = load_documents(dir.path()).unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, "cat.txt");
    assert_eq!(documents[0].text, "The cat sat on the mat.");
    assert!(documents[0].source.as_deref().unwrap().ends_with("cat.txt"));
}

#[test]
fn extracts_pdf_text_page_by_page() {
    let dir = tempfile::tempdir().unwrap();
    common::write_pdf(&dir.path().join("capital.pdf"), "Paris is the capital of France.");

    let documents = load_documents(dir.path()).unwrap();
    assert_eq!(documents.len(), 1);
    assert!(documents[0].text.contains("Paris is the capital of France."));
}

#[test]
fn documents_come_back_in_file_name_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.txt"), "second").unwrap();
    std::fs::write(dir.path().join("a.txt"), "first").unwrap();
    std::fs::write(dir.path().join("c.txt"), "third").unwrap();

    let documents = load_documents(dir.path()).unwrap();
    let ids: Vec<&str> = documents.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["a.txt", "b.txt", "c.txt"]);
}

#[test]
fn subdirectories_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    std::fs::write(dir.path().join("only.txt"), "content").unwrap();

    let documents = load_documents(dir.path()).unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, "only.txt");
}

#[test]
fn missing_directory_is_a_document_error() {
    let result = load_documents("/definitely/not/a/real/dir");
    assert!(matches!(result, Err(RagError::DocumentError { .. })));
}

#[test]
fn invalid_utf8_is_a_document_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0xfd]).unwrap();

    let result = load_documents(dir.path());
    assert!(matches!(result, Err(RagError::DocumentError { .. })));
}

#[test]
fn garbage_pdf_is_a_document_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.pdf"), b"not a pdf at all").unwrap();

    let result = load_documents(dir.path());
    assert!(matches!(result, Err(RagError::DocumentError { .. })));
}
