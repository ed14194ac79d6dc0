use crate::core::service::PersonService;
use crate::domain::model::{CreatePersonRequest, PersonFilter, PersonResponse, UpdatePersonRequest};
use crate::domain::ports::{NameLookup, PersonStore};
use crate::utils::error::{AppError, Result as AppResult};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/personApi/v1";

pub struct AppState<L: NameLookup + 'static, S: PersonStore + 'static> {
    pub service: Arc<PersonService<L, S>>,
}

impl<L: NameLookup + 'static, S: PersonStore + 'static> Clone for AppState<L, S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed ({:?}): {}", self.category(), self);
        } else {
            tracing::debug!("Request rejected ({:?}): {}", self.category(), self);
        }
        (status, Json(json!({ "error": self.user_friendly_message() }))).into_response()
    }
}

fn bad_request(message: impl ToString) -> AppError {
    AppError::ValidationError {
        message: message.to_string(),
    }
}

pub fn create_router<L, S>(service: PersonService<L, S>) -> Router
where
    L: NameLookup + 'static,
    S: PersonStore + 'static,
{
    let state = AppState {
        service: Arc::new(service),
    };

    let persons = Router::new()
        .route(
            "/persons",
            get(list_persons::<L, S>).post(create_person::<L, S>),
        )
        .route(
            "/persons/:id",
            get(get_person::<L, S>)
                .put(update_person::<L, S>)
                .delete(delete_person::<L, S>),
        );

    Router::new()
        .nest(API_PREFIX, persons)
        .route("/health", get(health_check))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// 綁定 0.0.0.0:{port}，失敗時回傳 `AppError::IoError`
pub async fn bind_listener(port: u16) -> AppResult<TcpListener> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    Ok(listener)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn create_person<L: NameLookup + 'static, S: PersonStore + 'static>(
    State(state): State<AppState<L, S>>,
    payload: Result<Json<CreatePersonRequest>, JsonRejection>,
) -> Result<Json<PersonResponse>, AppError> {
    let Json(request) = payload.map_err(|e| bad_request(e.body_text()))?;
    let person = state.service.create_person(request).await?;
    Ok(Json(person.into()))
}

async fn list_persons<L: NameLookup + 'static, S: PersonStore + 'static>(
    State(state): State<AppState<L, S>>,
    filter: Result<Query<PersonFilter>, QueryRejection>,
) -> Result<Json<Vec<PersonResponse>>, AppError> {
    let Query(filter) = filter.map_err(|e| bad_request(e.body_text()))?;
    let persons = state.service.list_persons(filter).await?;
    Ok(Json(persons.into_iter().map(PersonResponse::from).collect()))
}

async fn get_person<L: NameLookup + 'static, S: PersonStore + 'static>(
    State(state): State<AppState<L, S>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<PersonResponse>, AppError> {
    let Path(id) = id.map_err(|_| bad_request("invalid ID"))?;
    let person = state.service.get_person(id).await?;
    Ok(Json(person.into()))
}

async fn update_person<L: NameLookup + 'static, S: PersonStore + 'static>(
    State(state): State<AppState<L, S>>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<UpdatePersonRequest>, JsonRejection>,
) -> Result<Json<PersonResponse>, AppError> {
    let Path(id) = id.map_err(|_| bad_request("invalid ID"))?;
    let Json(update) = payload.map_err(|e| bad_request(e.body_text()))?;
    let person = state.service.update_person(id, update).await?;
    Ok(Json(person.into()))
}

async fn delete_person<L: NameLookup + 'static, S: PersonStore + 'static>(
    State(state): State<AppState<L, S>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let Path(id) = id.map_err(|_| bad_request("invalid ID"))?;
    state.service.delete_person(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "person deleted successfully" })),
    ))
}
