//! HTTP surface of a CRUD handler

use super::handler::CrudHandler;
use crate::error::Result;
use crate::schema::parse_body;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

impl CrudHandler {
    /// Routes for `/api/{collection}` and `/api/{collection}/:id`
    pub fn router(&self) -> Router {
        let base = self.schema().base_path();

        Router::new()
            .route(&base, get(list_records).post(create_record))
            .route(
                &format!("{base}/:id"),
                get(get_record).put(update_record).delete(delete_record),
            )
            .with_state(self.clone())
    }
}

async fn create_record(
    State(handler): State<CrudHandler>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let body = parse_body(&body)?;
    let record = handler.create(&body).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_records(State(handler): State<CrudHandler>) -> Result<impl IntoResponse> {
    Ok(Json(handler.list().await?))
}

async fn get_record(
    State(handler): State<CrudHandler>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    Ok(Json(handler.get_by_id(&id).await?))
}

async fn update_record(
    State(handler): State<CrudHandler>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let body = parse_body(&body)?;
    Ok(Json(handler.update_by_id(&id, &body).await?))
}

async fn delete_record(
    State(handler): State<CrudHandler>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    handler.delete_by_id(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
