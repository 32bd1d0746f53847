//! Document chunking strategies.
//!
//! Chunk sizes are counted in characters, and splits always land on
//! character boundaries, so multi-byte text never tears.

use crate::document::{Chunk, Document};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text and metadata but no
/// embeddings; the pipeline attaches embeddings afterwards. A document
/// with empty text yields no chunks.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text into fixed-size character windows with overlap.
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a chunker producing windows of at most `chunk_size`
    /// characters, consecutive windows sharing `chunk_overlap` characters.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        let pieces = split_by_chars(&document.text, self.chunk_size, self.chunk_overlap);
        attach(document, pieces)
    }
}

/// Splits text hierarchically: paragraphs, then sentences, then words,
/// falling back to character windows for unbreakable runs.
///
/// Segments are greedily merged up to the chunk size, with the separator
/// kept attached to the preceding segment. This is the splitter the
/// ingestion pipeline uses by default.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveChunker {
    /// Create a recursive chunker with the given size bound and the
    /// overlap applied by the character-window fallback.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }
}

const SEPARATORS: [&str; 5] = ["\n\n", ". ", "! ", "? ", " "];

impl Chunker for RecursiveChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }
        let pieces =
            split_recursive(&document.text, self.chunk_size, self.chunk_overlap, &SEPARATORS);
        attach(document, pieces)
    }
}

/// Wrap raw text pieces into [`Chunk`]s carrying the parent document's
/// metadata plus a `chunk_index` field.
fn attach(document: &Document, pieces: Vec<String>) -> Vec<Chunk> {
    pieces
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let mut metadata = document.metadata.clone();
            metadata.insert("chunk_index".to_string(), i.to_string());
            Chunk {
                id: format!("{}_{i}", document.id),
                text,
                embedding: Vec::new(),
                metadata,
                document_id: document.id.clone(),
            }
        })
        .collect()
}

/// Character-window splitting with overlap. The last window may be short.
fn split_by_chars(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    if text.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let total = offsets.len();
    let step = chunk_size.saturating_sub(chunk_overlap);

    let mut pieces = Vec::new();
    let mut start = 0;
    while start < total {
        let end = (start + chunk_size).min(total);
        let byte_start = offsets[start];
        let byte_end = if end == total { text.len() } else { offsets[end] };
        pieces.push(text[byte_start..byte_end].to_string());
        if step == 0 {
            break;
        }
        start += step;
    }
    pieces
}

/// Split on the first separator level, merge greedily up to the size
/// bound, and recurse into the next level for oversized segments.
fn split_recursive(
    text: &str,
    chunk_size: usize,
    chunk_overlap: usize,
    separators: &[&str],
) -> Vec<String> {
    if text.chars().count() <= chunk_size {
        return vec![text.to_string()];
    }
    let Some((separator, rest)) = separators.split_first() else {
        return split_by_chars(text, chunk_size, chunk_overlap);
    };

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    let flush = |current: &mut String, current_len: &mut usize, pieces: &mut Vec<String>| {
        if current.is_empty() {
            return;
        }
        if *current_len > chunk_size {
            pieces.extend(split_recursive(current, chunk_size, chunk_overlap, rest));
        } else {
            pieces.push(std::mem::take(current));
        }
        current.clear();
        *current_len = 0;
    };

    for segment in split_inclusive_str(text, separator) {
        let segment_len = segment.chars().count();
        if !current.is_empty() && current_len + segment_len > chunk_size {
            flush(&mut current, &mut current_len, &mut pieces);
        }
        current.push_str(segment);
        current_len += segment_len;
    }
    flush(&mut current, &mut current_len, &mut pieces);

    pieces
}

/// Split at each occurrence of `separator`, keeping the separator
/// attached to the preceding segment.
fn split_inclusive_str<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut segments = Vec::new();
    let mut start = 0;
    while let Some(pos) = text[start..].find(separator) {
        let end = start + pos + separator.len();
        segments.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        segments.push(&text[start..]);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn doc(text: &str) -> Document {
        Document::new("doc", text)
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        assert!(FixedSizeChunker::new(10, 2).chunk(&doc("")).is_empty());
        assert!(RecursiveChunker::new(10, 2).chunk(&doc("")).is_empty());
    }

    #[test]
    fn fixed_size_windows_respect_size_and_overlap() {
        let chunks = FixedSizeChunker::new(4, 1).chunk(&doc("abcdefgh"));
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["abcd", "defg", "gh"]);
    }

    #[test]
    fn fixed_size_never_tears_multibyte_text() {
        let chunks = FixedSizeChunker::new(3, 1).chunk(&doc("größer käse"));
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 3);
        }
        assert_eq!(chunks.concat_text(), "größer käse");
    }

    #[test]
    fn recursive_prefers_paragraph_boundaries() {
        let text = "First paragraph here.\n\nSecond paragraph here.";
        let chunks = RecursiveChunker::new(30, 0).chunk(&doc(text));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "First paragraph here.\n\n");
        assert_eq!(chunks[1].text, "Second paragraph here.");
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = RecursiveChunker::new(500, 50).chunk(&doc("The cat sat on the mat."));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].id, "doc_0");
        assert_eq!(chunks[0].metadata.get("chunk_index").unwrap(), "0");
    }

    #[test]
    fn chunks_carry_parent_metadata() {
        let document = Document::new("d1", "hello world").with_source("/tmp/d1.txt");
        let chunks = RecursiveChunker::new(100, 0).chunk(&document);
        assert_eq!(chunks[0].document_id, "d1");
        assert_eq!(chunks[0].metadata.get("source").unwrap(), "/tmp/d1.txt");
    }

    trait ConcatText {
        fn concat_text(&self) -> String;
    }

    impl ConcatText for Vec<Chunk> {
        fn concat_text(&self) -> String {
            // Reverse the overlap of 1 used in the test above.
            let mut out = String::new();
            for (i, chunk) in self.iter().enumerate() {
                let mut chars = chunk.text.chars();
                if i > 0 {
                    chars.next();
                }
                out.extend(chars);
            }
            out
        }
    }
}
