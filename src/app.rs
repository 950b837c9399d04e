use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{Method, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::error::StoreError;
use crate::store::{FileStore, ListQuery, RecordStore};

const DEFAULT_FILE_NAME: &str = "certificate";
const CRUD_METHODS: &str = "GET, POST, PUT, DELETE";

pub struct AppState {
    store: FileStore,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrudParams {
    file_name: Option<String>,
    page: Option<String>,
    limit: Option<String>,
    keyword: Option<String>,
    #[serde(rename = "Cmdb_id")]
    cmdb_id: Option<String>,
    sort_key: Option<String>,
    sort_order: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadParams {
    file_name: Option<String>,
}

pub async fn run(addr: &str, uploads_dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app_state = Arc::new(AppState {
        store: FileStore::new(uploads_dir),
    });

    // Build router
    let app = Router::new()
        .route("/", get(serve_landing))
        .route(
            "/crud",
            get(crud_read)
                .post(crud_create)
                .put(crud_update)
                .delete(crud_delete)
                .fallback(crud_method_not_allowed),
        )
        .route(
            "/download",
            get(download).fallback(download_method_not_allowed),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = TcpListener::bind(addr).await?;
    log::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_landing() -> Html<&'static str> {
    Html(include_str!("./static/landing.html"))
}

async fn crud_read(
    Query(params): Query<CrudParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let file_name = match required_file_name(&params.file_name) {
        Ok(name) => name,
        Err(response) => return response,
    };

    // A non-empty Cmdb_id switches the read from a list page to a single
    // record.
    if let Some(id) = params.cmdb_id.as_deref().filter(|id| !id.is_empty()) {
        log::info!("GET /crud fileName={} Cmdb_id={}", file_name, id);
        return match state.store.get(&file_name, id) {
            Ok(result) => success_response(
                StatusCode::OK,
                json!({
                    "success": true,
                    "data": result.record,
                    "headers": result.headers,
                    "nonEditableHeaders": result.non_editable,
                }),
            ),
            Err(err) => error_response(&err),
        };
    }

    let query = ListQuery {
        keyword: params.keyword.clone().unwrap_or_default(),
        sort_key: params.sort_key.clone().unwrap_or_default(),
        sort_order: params.sort_order.clone().unwrap_or_default(),
        page: parse_or(&params.page, 1),
        limit: parse_or(&params.limit, 10),
    };

    log::info!(
        "GET /crud fileName={} page={} limit={} keyword={:?}",
        file_name,
        query.page,
        query.limit,
        query.keyword
    );

    match state.store.list(&file_name, &query) {
        Ok(result) => success_response(
            StatusCode::OK,
            json!({
                "success": true,
                "headers": result.headers,
                "data": result.page.items,
                "total": result.page.total,
                "page": result.page.page,
                "limit": result.page.limit,
            }),
        ),
        Err(err) => error_response(&err),
    }
}

async fn crud_create(
    Query(params): Query<CrudParams>,
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Response {
    let file_name = match required_file_name(&params.file_name) {
        Ok(name) => name,
        Err(response) => return response,
    };

    let body = body.map(|Json(value)| value).unwrap_or(Value::Null);

    log::info!("POST /crud fileName={}", file_name);

    match state.store.create(&file_name, &body) {
        Ok(new_record) => success_response(
            StatusCode::CREATED,
            json!({ "success": true, "newData": new_record }),
        ),
        Err(err) => error_response(&err),
    }
}

async fn crud_update(
    Query(params): Query<CrudParams>,
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Response {
    let file_name = match required_file_name(&params.file_name) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let id = match required_id(&params.cmdb_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let body = body.map(|Json(value)| value).unwrap_or(Value::Null);

    log::info!("PUT /crud fileName={} Cmdb_id={}", file_name, id);

    match state.store.update(&file_name, &id, &body) {
        Ok(updated) => success_response(
            StatusCode::OK,
            json!({ "success": true, "updatedRecord": updated }),
        ),
        Err(err) => error_response(&err),
    }
}

async fn crud_delete(
    Query(params): Query<CrudParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let file_name = match required_file_name(&params.file_name) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let id = match required_id(&params.cmdb_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    log::info!("DELETE /crud fileName={} Cmdb_id={}", file_name, id);

    match state.store.delete(&file_name, &id) {
        Ok(deleted) => success_response(
            StatusCode::OK,
            json!({ "success": true, "deletedRecord": deleted }),
        ),
        Err(err) => error_response(&err),
    }
}

async fn crud_method_not_allowed(method: Method) -> Response {
    method_not_allowed(method, CRUD_METHODS)
}

async fn download(
    Query(params): Query<DownloadParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let file_name = match required_file_name(&params.file_name) {
        Ok(name) => name,
        Err(response) => return response,
    };

    log::info!("GET /download fileName={}", file_name);

    match state.store.raw_bytes(&file_name) {
        Ok(bytes) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.xlsx\"", file_name),
            )
            .body(Body::from(bytes))
            .unwrap(),
        Err(err) => {
            log::error!("download failed for {}: {}", file_name, err);
            envelope_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Failed to download file: {}", err),
            )
        }
    }
}

async fn download_method_not_allowed(method: Method) -> Response {
    method_not_allowed(method, "GET")
}

// The default dataset keeps the dashboard working with no query string;
// an explicitly empty fileName= is a caller error.
fn required_file_name(file_name: &Option<String>) -> Result<String, Response> {
    match file_name {
        None => Ok(DEFAULT_FILE_NAME.to_string()),
        Some(name) if name.is_empty() => Err(error_response(&StoreError::Validation(
            "Missing fileName parameter".to_string(),
        ))),
        Some(name) => Ok(name.clone()),
    }
}

fn required_id(cmdb_id: &Option<String>) -> Result<String, Response> {
    match cmdb_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => Ok(id.to_string()),
        None => Err(error_response(&StoreError::Validation(
            "Missing Cmdb_id parameter".to_string(),
        ))),
    }
}

fn parse_or(raw: &Option<String>, default: usize) -> usize {
    raw.as_deref()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn success_response(status: StatusCode, payload: Value) -> Response {
    (status, Json(payload)).into_response()
}

fn error_response(err: &StoreError) -> Response {
    let status = match err {
        StoreError::Validation(_) => StatusCode::BAD_REQUEST,
        StoreError::DatasetNotFound(_) | StoreError::RecordNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Parse(_) | StoreError::Io(_) | StoreError::Codec(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        log::error!("request failed: {}", err);
    } else {
        log::warn!("request rejected: {}", err);
    }
    envelope_error(status, &err.to_string())
}

fn envelope_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "message": message })),
    )
        .into_response()
}

fn method_not_allowed(method: Method, allow: &'static str) -> Response {
    let mut response = envelope_error(
        StatusCode::METHOD_NOT_ALLOWED,
        &format!("Method {} Not Allowed", method),
    );
    response
        .headers_mut()
        .insert(header::ALLOW, header::HeaderValue::from_static(allow));
    response
}
