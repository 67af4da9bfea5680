use std::fs;

use tempfile::TempDir;

use menurec_core::config::{CacheValidation, Config};
use menurec_core::error::Error;
use menurec_core::records::{load_catalog, load_history, parse_catalog, parse_history};
use menurec_core::types::{reference_item, HistoryOrder, ItemId, OrderLine, TfIdfModel};

#[test]
fn load_catalog_skips_invalid_and_duplicate_records() -> anyhow::Result<()> {
    let tmp = TempDir::new()?;
    let path = tmp.path().join("menu.json");
    fs::write(
        &path,
        r#"[
            {"id": 1, "name": "Veg Biryani", "category": "Rice", "veg": true, "price": 120},
            {"id": 2, "name": "", "category": "Rice", "veg": false, "price": 150},
            {"id": 3, "name": "Gulab Jamun", "category": "Dessert", "veg": true, "price": "abc"},
            {"id": 1, "name": "Imposter", "category": "Rice", "veg": true, "price": 10},
            {"id": "dish_42", "name": "Paneer Tikka", "category": "Snacks", "veg": true, "price": 99.5}
        ]"#,
    )?;

    let items = load_catalog(&path)?;
    let ids: Vec<ItemId> = items.iter().map(|i| i.id.clone()).collect();
    assert_eq!(ids, vec![ItemId::Int(1), ItemId::from("dish_42")]);
    assert_eq!(items[0].name, "Veg Biryani", "first record with a given id wins");
    Ok(())
}

#[test]
fn missing_catalog_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = load_catalog(&tmp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
}

#[test]
fn catalog_must_be_an_array() {
    let err = parse_catalog(r#"{"id": 1}"#).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn missing_history_is_empty() {
    let tmp = TempDir::new().unwrap();
    let orders = load_history(&tmp.path().join("orders.json")).expect("history");
    assert!(orders.is_empty());
}

#[test]
fn history_keeps_orders_and_drops_lines_without_ids() {
    let orders = parse_history(
        r#"[
            {"id": "ord_1", "createdAt": "2024-03-01T12:00:00.000Z", "items": [{"id": 3, "name": "Gulab Jamun", "qty": 2, "price": 50}], "total": 100},
            {"id": "ord_2", "items": [{"name": "ghost"}, {"id": "dish_9", "qty": 1}]},
            {"id": "ord_3"}
        ]"#,
    )
    .expect("history");

    assert_eq!(orders.len(), 3);
    assert_eq!(orders[0].items[0].qty, Some(2));
    assert!(orders[0].created_at.is_some());
    assert_eq!(orders[1].items.len(), 1);
    assert_eq!(orders[1].items[0].id, ItemId::from("dish_9"));
    assert!(orders[2].items.is_empty());
    assert_eq!(reference_item(&orders), None, "last order has no items");
}

#[test]
fn reference_item_is_first_line_of_last_order() {
    let history = vec![
        HistoryOrder::with_items(vec![OrderLine::new(7)]),
        HistoryOrder::with_items(vec![OrderLine::new(2), OrderLine::new(3)]),
    ];
    assert_eq!(reference_item(&history), Some(&ItemId::Int(2)));
    assert_eq!(reference_item(&[]), None);
}

#[test]
fn model_blob_accepts_legacy_keys() {
    let model: TfIdfModel = serde_json::from_str(
        r#"{"vocab": ["veg", "biryani"], "vectors": [{"id": 1, "vector": [0.5, 0.25]}], "createdAt": 1700000000000}"#,
    )
    .expect("legacy blob");
    assert_eq!(model.dim(), 2);
    assert_eq!(model.built_at, 1_700_000_000_000);
    assert_eq!(model.vector_for(&ItemId::Int(1)), Some(&[0.5, 0.25][..]));
    assert_eq!(model.vector_for(&ItemId::from("1")), None, "numeric and string ids are distinct");
}

#[test]
fn config_merges_files_and_env() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
                [cache]
                path = "cache/model.json"

                [recommend]
                top_n = 6
            "#,
        )?;
        jail.create_file(
            "config.test.toml",
            r#"
                [cache]
                validation = "digest"
            "#,
        )?;
        jail.set_env("APP_DOCUMENT__CURRENCY_SYMBOL", "$");

        let config = Config::load_in(jail.directory(), "test").map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.cache.path, "cache/model.json");
        assert_eq!(settings.cache.validation, CacheValidation::Digest);
        assert_eq!(settings.recommend.top_n, 6);
        assert_eq!(settings.document.currency_symbol, "$");
        assert_eq!(settings.data.catalog_path, "data/menu.json", "defaults fill the gaps");

        let top_n: usize = config.get("recommend.top_n").map_err(|e| e.to_string())?;
        assert_eq!(top_n, 6);
        assert_eq!(
            settings.cache.resolved_path(jail.directory()),
            jail.directory().join("cache/model.json")
        );
        Ok(())
    });
}

#[test]
fn config_rejects_empty_cache_path() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[cache]\npath = \"  \"\n")?;
        let result = Config::load_in(jail.directory(), "dev");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
        Ok(())
    });
}
