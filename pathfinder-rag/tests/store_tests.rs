//! Index persistence and cache lifecycle.

use std::sync::Arc;

use pathfinder_rag::{
    Document, IndexBuilder, IndexOrigin, IndexStore, MockEmbeddingProvider, RagConfig, RagError,
    SimilarityIndex,
};

const RESUME: &str = "Marketing lead with eight years of campaign strategy, brand positioning, \
                      and analytics. Built a content team of six and launched an AI-assisted \
                      newsletter that grew subscribers fourfold. Comfortable with SQL, Looker, \
                      and budget ownership across paid and organic channels.";

fn store_with(provider: Arc<MockEmbeddingProvider>) -> IndexStore {
    let config = RagConfig::builder().chunk_size(80).chunk_overlap(20).build().unwrap();
    IndexStore::new(IndexBuilder::new(provider, config))
}

#[tokio::test]
async fn save_then_load_answers_queries_identically() {
    let provider = Arc::new(MockEmbeddingProvider::new(24));
    let store = store_with(provider.clone());
    let built = store.ensure(&Document::from_text(RESUME)).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume-index.json");
    built.save(&path).await.unwrap();

    let loaded = SimilarityIndex::load(&path).await.unwrap();
    assert_eq!(*built, loaded);

    let query = provider.vector_for("brand positioning");
    assert_eq!(built.query(&query, 3).unwrap(), loaded.query(&query, 3).unwrap());
}

#[tokio::test]
async fn missing_index_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = SimilarityIndex::load(dir.path().join("absent.json")).await.unwrap_err();
    assert!(matches!(err, RagError::NotFound { .. }));
}

#[tokio::test]
async fn garbage_index_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");
    std::fs::write(&path, b"{\"format_version\": 1, \"entries\": [").unwrap();
    let err = SimilarityIndex::load(&path).await.unwrap_err();
    assert!(matches!(err, RagError::CorruptIndex { .. }));
}

#[tokio::test]
async fn inconsistent_dimension_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");
    let body = serde_json::json!({
        "format_version": 1,
        "metric": "squared_euclidean",
        "dimension": 3,
        "entries": [{
            "segment": {"id": "d_0", "document_id": "d", "ordinal": 0, "offset": 0, "text": "x"},
            "vector": [0.1, 0.2]
        }]
    });
    std::fs::write(&path, serde_json::to_vec(&body).unwrap()).unwrap();
    let err = SimilarityIndex::load(&path).await.unwrap_err();
    assert!(matches!(err, RagError::CorruptIndex { .. }));
}

#[tokio::test]
async fn unknown_format_version_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");
    let body = serde_json::json!({
        "format_version": 7,
        "metric": "cosine",
        "dimension": 0,
        "entries": []
    });
    std::fs::write(&path, serde_json::to_vec(&body).unwrap()).unwrap();
    let err = SimilarityIndex::load(&path).await.unwrap_err();
    assert!(matches!(err, RagError::CorruptIndex { .. }));
}

#[tokio::test]
async fn ensure_builds_once_per_document() {
    let provider = Arc::new(MockEmbeddingProvider::new(8));
    let store = store_with(provider.clone());
    let doc = Document::from_text(RESUME);

    let first = store.ensure(&doc).await.unwrap();
    let embedded = provider.embedded_count();
    let second = store.ensure(&doc).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(provider.embedded_count(), embedded);
    assert_eq!(store.origin().await, Some(IndexOrigin::Document(doc.id.clone())));
}

#[tokio::test]
async fn different_document_triggers_rebuild() {
    let provider = Arc::new(MockEmbeddingProvider::new(8));
    let store = store_with(provider.clone());

    let first = store.ensure(&Document::from_text(RESUME)).await.unwrap();
    let second = store.ensure(&Document::from_text("Nurse practitioner")).await.unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.len(), 1);
}

#[tokio::test]
async fn failed_build_caches_nothing() {
    let store = store_with(Arc::new(MockEmbeddingProvider::failing(8)));
    let err = store.ensure(&Document::from_text(RESUME)).await.unwrap_err();

    assert!(matches!(err, RagError::EmbeddingService { .. }));
    assert!(store.current().await.is_none());
    assert!(matches!(store.retrieve("anything", 2).await, Err(RagError::IndexUnavailable)));
}

#[tokio::test]
async fn failed_load_keeps_previous_index() {
    let store = store_with(Arc::new(MockEmbeddingProvider::new(8)));
    let built = store.ensure(&Document::from_text(RESUME)).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let err = store.load(dir.path().join("missing.json")).await.unwrap_err();
    assert!(matches!(err, RagError::NotFound { .. }));

    let current = store.current().await.unwrap();
    assert!(Arc::ptr_eq(&built, &current));
}

#[tokio::test]
async fn failed_rebuild_keeps_previous_index() {
    let provider = Arc::new(MockEmbeddingProvider::new(8));
    let store = store_with(provider.clone());
    let first_doc = Document::from_text(RESUME);
    let built = store.ensure(&first_doc).await.unwrap();

    provider.set_failing(true);
    let other = Document::from_text("Operations manager for a regional logistics fleet.");

    let err = store.ensure(&other).await.unwrap_err();
    assert!(matches!(err, RagError::EmbeddingService { .. }));
    let err = store.rebuild(&first_doc).await.unwrap_err();
    assert!(matches!(err, RagError::EmbeddingService { .. }));

    let current = store.current().await.unwrap();
    assert!(Arc::ptr_eq(&built, &current));
    assert_eq!(store.origin().await, Some(IndexOrigin::Document(first_doc.id.clone())));

    provider.set_failing(false);
    assert!(Arc::ptr_eq(&built, &store.ensure(&first_doc).await.unwrap()));
}

#[tokio::test]
async fn load_replaces_cache_and_clear_empties_it() {
    let provider = Arc::new(MockEmbeddingProvider::new(8));
    let store = store_with(provider.clone());
    let built = store.ensure(&Document::from_text(RESUME)).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");
    built.save(&path).await.unwrap();

    store.clear().await;
    assert!(store.current().await.is_none());

    store.load(&path).await.unwrap();
    assert_eq!(store.origin().await, Some(IndexOrigin::Storage(path.clone())));
    assert_eq!(store.retrieve("", 2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn rebuild_always_embeds() {
    let provider = Arc::new(MockEmbeddingProvider::new(8));
    let store = store_with(provider.clone());
    let doc = Document::from_text(RESUME);

    store.ensure(&doc).await.unwrap();
    let after_first = provider.embedded_count();
    store.rebuild(&doc).await.unwrap();
    assert_eq!(provider.embedded_count(), after_first * 2);
}
