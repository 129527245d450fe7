//! Tests for the generic CRUD handler

use super::*;
use crate::error::Error;
use crate::schema::{ADMIN, ENGINEERING, SECURITY};
use crate::store::{MemoryStore, SharedStore, UnavailableStore};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn body(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn memory_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let handler = CrudHandler::new(&ENGINEERING, memory_store());

    let created = handler
        .create(&body(json!({"name": "Ada", "project": "Reactor-Core"})))
        .await
        .unwrap();
    assert_eq!(created.get("name"), Some("Ada"));

    let fetched = handler.get_by_id(&created.id.to_string()).await.unwrap();
    assert_eq!(fetched, created);

    // Repeated reads agree
    let again = handler.get_by_id(&created.id.to_string()).await.unwrap();
    assert_eq!(again, fetched);
}

#[tokio::test]
async fn test_create_missing_field_persists_nothing() {
    let handler = CrudHandler::new(&ADMIN, memory_store());

    let err = handler
        .create(&body(json!({"name": "Grace"})))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    assert!(handler.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_keeps_untouched_fields() {
    let handler = CrudHandler::new(&ENGINEERING, memory_store());
    let created = handler
        .create(&body(json!({"name": "Ada", "project": "Reactor-Core"})))
        .await
        .unwrap();
    let id = created.id.to_string();

    let updated = handler
        .update_by_id(&id, &body(json!({"project": "Turbine"})))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.get("name"), Some("Ada"));
    assert_eq!(updated.get("project"), Some("Turbine"));
    assert_eq!(handler.get_by_id(&id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_rejects_clearing_required_field() {
    let handler = CrudHandler::new(&ADMIN, memory_store());
    let created = handler
        .create(&body(json!({"name": "Grace", "role": "Director"})))
        .await
        .unwrap();
    let id = created.id.to_string();

    let err = handler
        .update_by_id(&id, &body(json!({"role": ""})))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    // Stored record unchanged
    assert_eq!(handler.get_by_id(&id).await.unwrap(), created);
}

#[tokio::test]
async fn test_update_missing_record() {
    let handler = CrudHandler::new(&ADMIN, memory_store());
    let id = crate::store::RecordId::generate().to_string();

    let err = handler
        .update_by_id(&id, &body(json!({"role": "Clerk"})))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Admin not found");
}

#[tokio::test]
async fn test_delete_is_final() {
    let handler = CrudHandler::new(&SECURITY, memory_store());
    let created = handler
        .create(&body(json!({"name": "Kim", "clearanceLevel": "L4"})))
        .await
        .unwrap();
    let id = created.id.to_string();

    handler.delete_by_id(&id).await.unwrap();

    let err = handler.get_by_id(&id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { ref entity } if entity == "Staff"));

    let err = handler.delete_by_id(&id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn test_malformed_id_on_read_and_delete_is_store_fault() {
    let handler = CrudHandler::new(&ADMIN, memory_store());

    for err in [
        handler.get_by_id("12345").await.unwrap_err(),
        handler.delete_by_id("12345").await.unwrap_err(),
    ] {
        assert!(matches!(err, Error::InvalidId { .. }), "{err:?}");
        assert_eq!(err.status_code().as_u16(), 500);
    }
}

#[tokio::test]
async fn test_malformed_id_on_update_is_bad_request() {
    let handler = CrudHandler::new(&ADMIN, memory_store());

    let err = handler
        .update_by_id("12345", &body(json!({"role": "Clerk"})))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }), "{err:?}");
    assert_eq!(err.to_string(), "Cast to record id failed for value \"12345\"");
    assert_eq!(err.status_code().as_u16(), 400);
}

#[tokio::test]
async fn test_collections_are_isolated() {
    let store = memory_store();
    let security = CrudHandler::new(&SECURITY, store.clone());
    let engineering = CrudHandler::new(&ENGINEERING, store);

    let created = security
        .create(&body(json!({"name": "Ada", "clearanceLevel": "Reactor-Core"})))
        .await
        .unwrap();

    assert!(engineering.list().await.unwrap().is_empty());
    let err = engineering
        .get_by_id(&created.id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(security.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_store_failures_map_per_operation() {
    let handler = CrudHandler::new(&ADMIN, Arc::new(UnavailableStore::new("no route")));
    let id = crate::store::RecordId::generate().to_string();

    // Writes report store failures as validation errors
    let err = handler
        .create(&body(json!({"name": "Grace", "role": "Director"})))
        .await
        .unwrap_err();
    assert_eq!(err.status_code().as_u16(), 400);

    let err = handler
        .update_by_id(&id, &body(json!({"role": "Clerk"})))
        .await
        .unwrap_err();
    assert_eq!(err.status_code().as_u16(), 400);

    // Reads and deletes report them as store errors
    assert_eq!(handler.list().await.unwrap_err().status_code().as_u16(), 500);
    assert_eq!(
        handler.get_by_id(&id).await.unwrap_err().status_code().as_u16(),
        500
    );
    assert_eq!(
        handler.delete_by_id(&id).await.unwrap_err().status_code().as_u16(),
        500
    );
}

#[tokio::test]
async fn test_concurrent_updates_last_write_wins() {
    let handler = CrudHandler::new(&ADMIN, memory_store());
    let created = handler
        .create(&body(json!({"name": "Grace", "role": "Director"})))
        .await
        .unwrap();
    let id = created.id.to_string();

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let handler = handler.clone();
            let id = id.clone();
            tokio::spawn(async move {
                handler
                    .update_by_id(&id, &body(json!({"role": format!("Role {i}")})))
                    .await
            })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().is_ok());
    }

    let role = handler.get_by_id(&id).await.unwrap().fields["role"].clone();
    assert!(role.starts_with("Role "));
    assert_eq!(handler.list().await.unwrap().len(), 1);
}
