//! Document loading from a directory of text and PDF files.

use std::path::Path;

use tracing::{debug, info};

use crate::document::Document;
use crate::error::{RagError, Result};

/// Load every file in `dir` as a [`Document`].
///
/// Files with a `.pdf` extension have their text extracted page by page
/// and concatenated in page order; everything else is read as UTF-8
/// plain text. Subdirectories are skipped. Entries are visited in file
/// name order so repeated runs produce the same documents.
///
/// # Errors
///
/// Returns [`RagError::DocumentError`] if the directory cannot be read,
/// a text file is not valid UTF-8, or a PDF cannot be parsed.
pub fn load_documents(dir: impl AsRef<Path>) -> Result<Vec<Document>> {
    let dir = dir.as_ref();
    let read_error = |path: &Path, message: String| RagError::DocumentError {
        path: path.display().to_string(),
        message,
    };

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| read_error(dir, e.to_string()))?
        .collect::<std::io::Result<_>>()
        .map_err(|e| read_error(dir, e.to_string()))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut documents = Vec::new();
    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        let text = if is_pdf {
            extract_pdf_text(&path)?
        } else {
            std::fs::read_to_string(&path).map_err(|e| read_error(&path, e.to_string()))?
        };

        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!(path = %path.display(), chars = text.len(), "loaded document");
        documents.push(Document::new(id, text).with_source(path.display().to_string()));
    }

    info!(dir = %dir.display(), count = documents.len(), "loaded documents");
    Ok(documents)
}

/// Extract text from a PDF, page by page in page order.
fn extract_pdf_text(path: &Path) -> Result<String> {
    let pdf_error = |message: String| RagError::DocumentError {
        path: path.display().to_string(),
        message,
    };

    let doc = lopdf::Document::load(path).map_err(|e| pdf_error(format!("cannot load PDF: {e}")))?;

    let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    page_numbers.sort_unstable();

    let mut text = String::new();
    for page_number in page_numbers {
        let page_text = doc
            .extract_text(&[page_number])
            .map_err(|e| pdf_error(format!("cannot extract text from page {page_number}: {e}")))?;
        text.push_str(&page_text);
    }
    Ok(text)
}
