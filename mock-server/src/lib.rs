use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Host {
    pub id: u64,
    pub name: String,
    pub mac: String,
    pub hostgroup_id: u64,
    pub build: bool,
}

#[derive(Deserialize)]
pub struct CreateHost {
    pub host: HostAttributes,
}

#[derive(Deserialize)]
pub struct HostAttributes {
    pub hostgroup_id: String,
    pub name: String,
    pub mac: String,
    #[serde(default)]
    pub build: bool,
}

pub struct AppState {
    hosts: RwLock<BTreeMap<u64, Host>>,
    next_id: AtomicU64,
    authorization: String,
}

pub type Db = Arc<AppState>;

type ApiResult = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;

/// Router for `/api/*` accepting only the given Basic credentials.
pub fn app(username: &str, password: &str) -> Router {
    let db: Db = Arc::new(AppState {
        hosts: RwLock::new(BTreeMap::new()),
        next_id: AtomicU64::new(1),
        authorization: format!("Basic {}", STANDARD.encode(format!("{username}:{password}"))),
    });
    Router::new()
        .route("/api/status", get(status))
        .route("/api/hosts", get(list_hosts).post(create_host))
        .route("/api/hosts/{id}", get(get_host).delete(delete_host))
        .with_state(db)
}

pub async fn run(listener: TcpListener, username: &str, password: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(username, password)).await
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": { "message": message } })))
}

fn authorize(db: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let supplied = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if supplied == Some(db.authorization.as_str()) {
        Ok(())
    } else {
        debug!("rejecting request with missing or wrong credentials");
        Err(error(StatusCode::UNAUTHORIZED, "Unable to authenticate user"))
    }
}

async fn status(State(db): State<Db>, headers: HeaderMap) -> ApiResult {
    authorize(&db, &headers)?;
    Ok((
        StatusCode::OK,
        Json(json!({ "result": "ok", "status": 200, "version": "mock", "api_version": 2 })),
    ))
}

async fn list_hosts(State(db): State<Db>, headers: HeaderMap) -> ApiResult {
    authorize(&db, &headers)?;
    let hosts = db.hosts.read().await;
    let results: Vec<&Host> = hosts.values().collect();
    Ok((
        StatusCode::OK,
        Json(json!({ "total": results.len(), "results": results })),
    ))
}

async fn create_host(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateHost>,
) -> ApiResult {
    authorize(&db, &headers)?;
    let hostgroup_id = input
        .host
        .hostgroup_id
        .parse()
        .map_err(|_| error(StatusCode::UNPROCESSABLE_ENTITY, "hostgroup_id is invalid"))?;

    let mut hosts = db.hosts.write().await;
    if hosts.values().any(|host| host.name == input.host.name) {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "Name has already been taken"));
    }
    let host = Host {
        id: db.next_id.fetch_add(1, Ordering::Relaxed),
        name: input.host.name,
        mac: input.host.mac,
        hostgroup_id,
        build: input.host.build,
    };
    debug!("created host {} ({})", host.id, host.name);
    hosts.insert(host.id, host.clone());
    Ok((StatusCode::CREATED, Json(json!(host))))
}

async fn get_host(State(db): State<Db>, headers: HeaderMap, Path(id): Path<u64>) -> ApiResult {
    authorize(&db, &headers)?;
    let hosts = db.hosts.read().await;
    hosts
        .get(&id)
        .map(|host| (StatusCode::OK, Json(json!(host))))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Resource host not found"))
}

async fn delete_host(State(db): State<Db>, headers: HeaderMap, Path(id): Path<u64>) -> ApiResult {
    authorize(&db, &headers)?;
    let mut hosts = db.hosts.write().await;
    hosts
        .remove(&id)
        .map(|host| (StatusCode::OK, Json(json!(host))))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Resource host not found"))
}
