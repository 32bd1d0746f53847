//! Contract tests for the [`Embedder`] trait's provided methods, run
//! against a deterministic stub backend.

mod common;

use common::KeywordEmbedder;
use ragstack::Embedder;

#[tokio::test]
async fn embed_documents_preserves_order_and_length() {
    let embedder = KeywordEmbedder;
    let texts = ["the cat", "paris", "nothing relevant", "the cat"];

    let vectors = embedder.embed_documents(&texts).await.unwrap();

    assert_eq!(vectors.len(), texts.len());
    for (text, vector) in texts.iter().zip(&vectors) {
        assert_eq!(vector, &embedder.embed_text(text).await.unwrap());
    }
    // Duplicated inputs are embedded twice, not deduplicated.
    assert_eq!(vectors[0], vectors[3]);
}

#[tokio::test]
async fn embed_query_aliases_embed_text() {
    let embedder = KeywordEmbedder;
    for text in ["", "cat", "Where is the capital of France?"] {
        assert_eq!(
            embedder.embed_query(text).await.unwrap(),
            embedder.embed_text(text).await.unwrap()
        );
    }
}

#[tokio::test]
async fn embedding_is_deterministic() {
    let embedder = KeywordEmbedder;
    let first = embedder.embed_text("the cat sat on the mat").await.unwrap();
    let second = embedder.embed_text("the cat sat on the mat").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_input_embeds_without_error() {
    let embedder = KeywordEmbedder;
    let vector = embedder.embed_text("").await.unwrap();
    assert_eq!(vector.len(), embedder.dimensions());
}

#[tokio::test]
async fn vector_length_matches_dimensions() {
    let embedder = KeywordEmbedder;
    for text in ["a", "the cat sat", "völlig unbekannte Wörter"] {
        let vector = embedder.embed_text(text).await.unwrap();
        assert_eq!(vector.len(), embedder.dimensions());
    }
}

#[tokio::test]
async fn embed_documents_of_empty_slice_is_empty() {
    let embedder = KeywordEmbedder;
    let vectors = embedder.embed_documents(&[]).await.unwrap();
    assert!(vectors.is_empty());
}
