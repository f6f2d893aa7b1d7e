use std::collections::BTreeSet;

use super::*;
use crate::catalog::postgres::build_category_query;

const COLUMNS: [&str; 3] = ["c0_name", "c1_name", "c2_name"];

fn ids(values: &[&str]) -> BTreeSet<ProductId> {
    values.iter().map(|v| v.to_string()).collect()
}

fn resolver(store: MockCategoryStore) -> CategoryResolver<MockCategoryStore> {
    let config = ResolverConfig::new(COLUMNS.iter().map(|c| c.to_string()).collect());
    CategoryResolver::new(store, config).expect("valid resolver config")
}

fn seeded_store() -> MockCategoryStore {
    let store = MockCategoryStore::new();
    store.insert(
        "A",
        &COLUMNS,
        &[Some("Shoes"), Some("Running"), Some("Trail")],
    );
    store.insert("B", &COLUMNS, &[Some("Shoes"), Some("Casual"), None]);
    store.insert("C", &COLUMNS, &[Some("Apparel"), None, Some("Socks")]);
    store
}

#[test]
fn test_category_path_display_and_parse() {
    let path = CategoryPath::from(vec!["Shoes", "Running"]);
    assert_eq!(path.to_string(), "Shoes->Running");
    assert_eq!(CategoryPath::parse("Shoes->Running"), path);
    assert_eq!(path.root(), Some("Shoes"));
    assert_eq!(path.leaf(), Some("Running"));
    assert_eq!(path.depth(), 2);
}

#[test]
fn test_category_path_serializes_as_array() {
    let path = CategoryPath::from(vec!["Shoes", "Casual"]);
    let json = serde_json::to_string(&path).unwrap();
    assert_eq!(json, r#"["Shoes","Casual"]"#);
}

#[test]
fn test_category_row_treats_empty_string_as_null() {
    let row = CategoryRow::new("X", vec![Some("Shoes".into()), Some(String::new()), None]);
    assert_eq!(row.value(0), Some("Shoes"));
    assert_eq!(row.value(1), None);
    assert_eq!(row.value(2), None);
    assert_eq!(row.value(3), None);
}

#[tokio::test]
async fn test_resolve_full_paths() {
    let resolver = resolver(seeded_store());

    let result = resolver.resolve(&ids(&["A"]), 3, false).await.unwrap();

    assert_eq!(
        result.get("A"),
        Some(&CategoryPath::from(vec!["Shoes", "Running", "Trail"]))
    );
}

#[tokio::test]
async fn test_resolve_missing_ids_are_absent() {
    let resolver = resolver(seeded_store());

    let result = resolver
        .resolve(&ids(&["A", "missing", "also-missing"]), 2, false)
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    assert!(result.contains_key("A"));
    assert!(!result.contains_key("missing"));
}

#[tokio::test]
async fn test_resolve_truncates_to_depth() {
    let resolver = resolver(seeded_store());

    let result = resolver.resolve(&ids(&["A", "B"]), 2, false).await.unwrap();

    assert_eq!(result["A"], CategoryPath::from(vec!["Shoes", "Running"]));
    assert_eq!(result["B"], CategoryPath::from(vec!["Shoes", "Casual"]));
}

#[tokio::test]
async fn test_resolve_trailing_null_truncates_when_allowed() {
    let resolver = resolver(seeded_store());

    let result = resolver
        .resolve(&ids(&["B", "C"]), 3, true)
        .await
        .unwrap();

    assert_eq!(result["B"], CategoryPath::from(vec!["Shoes", "Casual"]));
    // Stops at the first null; the populated column after it is not used.
    assert_eq!(result["C"], CategoryPath::from(vec!["Apparel"]));
}

#[tokio::test]
async fn test_resolve_null_rejected_when_disallowed() {
    let resolver = resolver(seeded_store());

    let err = resolver
        .resolve(&ids(&["B"]), 3, false)
        .await
        .unwrap_err();

    match err {
        CatalogError::InvalidData(InvalidDataError::NullCategory { product_id, column }) => {
            assert_eq!(product_id, "B");
            assert_eq!(column, "c2_name");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_resolve_root_null_always_rejected() {
    let store = MockCategoryStore::new();
    store.insert("R", &COLUMNS, &[None, Some("Running"), None]);
    store.insert("E", &COLUMNS, &[Some(""), Some("Running"), None]);
    let resolver = resolver(store);

    for allow in [true, false] {
        let err = resolver.resolve(&ids(&["R"]), 2, allow).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidData(InvalidDataError::RootCategoryNull { .. })
        ));

        let err = resolver.resolve(&ids(&["E"]), 2, allow).await.unwrap_err();
        match err {
            CatalogError::InvalidData(e) => assert_eq!(e.product_id(), "E"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_resolve_issues_single_batched_query() {
    let store = seeded_store();
    let resolver = resolver(store.clone());

    resolver
        .resolve(&ids(&["A", "B", "Z"]), 2, true)
        .await
        .unwrap();

    let queries = store.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0], vec!["A", "B", "Z"]);
}

#[tokio::test]
async fn test_resolve_rejects_empty_ids() {
    let resolver = resolver(seeded_store());

    let err = resolver.resolve(&BTreeSet::new(), 2, true).await.unwrap_err();

    assert!(matches!(err, CatalogError::InvalidRequest { .. }));
}

#[tokio::test]
async fn test_resolve_rejects_depth_out_of_range() {
    let resolver = resolver(seeded_store());

    for depth in [0, 4] {
        let err = resolver.resolve(&ids(&["A"]), depth, true).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRequest { .. }));
    }
}

#[tokio::test]
async fn test_resolve_default_uses_config() {
    let config = ResolverConfig::new(COLUMNS.iter().map(|c| c.to_string()).collect())
        .depth(1)
        .allow_trailing_nulls(false);
    let resolver = CategoryResolver::new(seeded_store(), config).unwrap();

    let result = resolver.resolve_default(&ids(&["A", "C"])).await.unwrap();

    assert_eq!(result["A"], CategoryPath::from(vec!["Shoes"]));
    assert_eq!(result["C"], CategoryPath::from(vec!["Apparel"]));
}

#[tokio::test]
async fn test_resolve_propagates_store_failure() {
    let store = seeded_store();
    store.fail_queries("connection reset");
    let resolver = resolver(store);

    let err = resolver.resolve(&ids(&["A"]), 2, true).await.unwrap_err();

    assert!(matches!(err, CatalogError::QueryFailed { .. }));
    assert!(err.to_string().contains("connection reset"));
}

#[test]
fn test_resolver_config_validation() {
    assert!(ResolverConfig::default().validate().is_ok());
    assert!(ResolverConfig::new(vec![]).validate().is_err());
    assert!(
        ResolverConfig::new(vec!["a".into(), " ".into()])
            .validate()
            .is_err()
    );
    assert!(ResolverConfig::new(vec!["a".into()]).depth(2).validate().is_err());
}

#[test]
fn test_build_category_query_quotes_identifiers() {
    let config = PostgresStoreConfig {
        table: "catalog\"x".to_string(),
        id_column: "id".to_string(),
    };
    let sql = build_category_query(&config, &["c0_name".to_string(), "c1_name".to_string()]);

    assert_eq!(
        sql,
        r#"SELECT "id", "c0_name", "c1_name" FROM "catalog""x" WHERE "id" = ANY($1)"#
    );
}

#[test]
fn test_build_category_query_schema_qualified_table() {
    let config = PostgresStoreConfig {
        table: "catalog.items".to_string(),
        id_column: "item_id".to_string(),
    };
    let sql = build_category_query(&config, &["l0".to_string()]);

    assert_eq!(
        sql,
        r#"SELECT "item_id", "l0" FROM "catalog"."items" WHERE "item_id" = ANY($1)"#
    );
}
