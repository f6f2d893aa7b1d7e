use std::collections::HashMap;

use qdrant_client::qdrant::ScoredPoint;

use super::*;

fn scored_point(payload: &[(&str, &str)], score: f32) -> ScoredPoint {
    let payload: HashMap<String, qdrant_client::qdrant::Value> = payload
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string().into()))
        .collect();

    ScoredPoint {
        payload,
        score,
        ..Default::default()
    }
}

#[test]
fn test_product_id_strips_three_char_suffix() {
    let result = NeighborResult::new("ABC123xyz", 0.1);
    assert_eq!(result.product_id().unwrap(), "ABC123");
}

#[test]
fn test_product_id_rejects_short_identifier() {
    let result = NeighborResult::new("xyz", 0.1);
    assert!(matches!(
        result.product_id(),
        Err(VectorDbError::MalformedIdentifier { suffix_len: 3, .. })
    ));
}

#[test]
fn test_score_to_distance() {
    assert_eq!(score_to_distance(1.0), 0.0);
    assert!((score_to_distance(0.75) - 0.25).abs() < 1e-6);
    assert_eq!(score_to_distance(-0.5), 1.0);
    assert_eq!(score_to_distance(1.2), 0.0);
}

#[test]
fn test_from_scored_point_reads_id_field() {
    let point = scored_point(&[("identifier", "SKU42_00"), ("title", "x")], 0.9);

    let result = NeighborResult::from_scored_point(&point, "identifier", "c").unwrap();

    assert_eq!(result.identifier, "SKU42_00");
    assert!((result.distance - 0.1).abs() < 1e-6);
}

#[test]
fn test_from_scored_point_missing_field_is_malformed() {
    let point = scored_point(&[("title", "x")], 0.9);

    let err = NeighborResult::from_scored_point(&point, "identifier", "c").unwrap_err();

    assert!(matches!(err, VectorDbError::MalformedResult { .. }));
}

#[test]
fn test_from_scored_point_nan_score_is_malformed() {
    let point = scored_point(&[("identifier", "SKU42_00")], f32::NAN);

    let err = NeighborResult::from_scored_point(&point, "identifier", "c").unwrap_err();

    assert!(matches!(err, VectorDbError::MalformedResult { .. }));
}

#[test]
fn test_qdrant_config_builder() {
    let config = QdrantNeighborConfig::default()
        .collection("catalog")
        .id_field("pid");
    assert_eq!(config.collection, "catalog");
    assert_eq!(config.id_field, "pid");
    assert_eq!(QdrantNeighborConfig::default().collection, DEFAULT_COLLECTION_NAME);
}

#[tokio::test]
async fn test_mock_returns_one_list_per_vector() {
    let index = MockNeighborIndex::new();
    index.respond(0, vec![NeighborResult::new("A__001", 0.2)]);
    index.respond(1, vec![NeighborResult::new("B__001", 0.4)]);

    let results = index
        .nearest_neighbors(&[vec![1.0], vec![0.5]], 5)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0][0].identifier, "A__001");
    assert_eq!(results[1][0].identifier, "B__001");
    assert_eq!(index.calls(), vec![(2, 5)]);
}

#[tokio::test]
async fn test_mock_truncates_to_k() {
    let index = MockNeighborIndex::new();
    index.respond(
        0,
        (0..10)
            .map(|i| NeighborResult::new(format!("P{i}abc"), i as f32 / 10.0))
            .collect(),
    );

    let results = index.nearest_neighbors(&[vec![1.0]], 3).await.unwrap();

    assert_eq!(results[0].len(), 3);
}

#[tokio::test]
async fn test_mock_unscripted_vector_has_no_matches() {
    let index = MockNeighborIndex::new();

    let results = index.nearest_neighbors(&[vec![1.0]], 3).await.unwrap();

    assert_eq!(results, vec![Vec::<NeighborResult>::new()]);
}

#[tokio::test]
async fn test_mock_failure_and_empty_vector() {
    let index = MockNeighborIndex::new();
    let err = index.nearest_neighbors(&[vec![]], 3).await.unwrap_err();
    assert!(matches!(err, VectorDbError::EmptyVector { index: 0 }));

    index.fail_searches("unreachable");
    let err = index.nearest_neighbors(&[vec![1.0]], 3).await.unwrap_err();
    assert!(matches!(err, VectorDbError::SearchFailed { .. }));
}
