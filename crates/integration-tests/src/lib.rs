//! Integration tests for Homestore.
//!
//! The tests drive the real storefront (reqwest client, session file, page
//! controllers) against [`FakeCatalog`], an in-process `axum` stand-in for the
//! json-server catalog service. It understands the query subset the
//! storefront sends: `_page`, `_limit`, `_sort`, `_order`, `q`, `*_gte`,
//! `*_lte`, `*_like`, `id_in` and plain field equality. Repeated keys are
//! OR-ed, different keys AND-ed, and every list response carries
//! `X-Total-Count`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p homestore-integration-tests
//! ```

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path as UrlPath, RawQuery, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use homestore_core::{Role, UserId};
use homestore_storefront::Storefront;
use homestore_storefront::catalog::TOTAL_COUNT_HEADER;
use homestore_storefront::config::{CatalogConfig, StorefrontConfig};
use homestore_storefront::models::Session;
use serde_json::{Value, json};
use tempfile::TempDir;
use url::Url;

/// Query parameters in request order.
type Params = Vec<(String, String)>;

/// Parameters that shape the result instead of filtering it.
const CONTROL_PARAMS: [&str; 4] = ["_page", "_limit", "_sort", "_order"];

/// `_limit` used when only `_page` is given.
const DEFAULT_LIMIT: usize = 10;

// =============================================================================
// In-memory tables
// =============================================================================

#[derive(Debug, Default)]
struct Tables {
    records: HashMap<String, Vec<Value>>,
    failing: HashSet<String>,
}

#[derive(Debug, Clone, Default)]
struct Db(Arc<Mutex<Tables>>);

impl Db {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(tables: &Tables, resource: &str) -> Result<(), StatusCode> {
        if tables.failing.contains(resource) {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(())
    }

    fn list(&self, resource: &str, params: &Params) -> Result<(Vec<Value>, usize), StatusCode> {
        let tables = self.lock();
        Self::check(&tables, resource)?;
        let mut rows: Vec<Value> = tables
            .records
            .get(resource)
            .map(|rows| rows.iter().filter(|r| matches(r, params)).cloned().collect())
            .unwrap_or_default();
        drop(tables);

        sort_rows(&mut rows, params);
        let total = rows.len();
        Ok((paginate(rows, params), total))
    }

    fn get(&self, resource: &str, id: i64) -> Result<Value, StatusCode> {
        let tables = self.lock();
        Self::check(&tables, resource)?;
        tables
            .records
            .get(resource)
            .and_then(|rows| rows.iter().find(|r| record_id(r) == Some(id)))
            .cloned()
            .ok_or(StatusCode::NOT_FOUND)
    }

    fn insert(&self, resource: &str, record: Value, check: bool) -> Result<Value, StatusCode> {
        let mut tables = self.lock();
        if check {
            Self::check(&tables, resource)?;
        }
        let rows = tables.records.entry(resource.to_string()).or_default();

        let mut record = record;
        let next_id = rows.iter().filter_map(record_id).max().unwrap_or(0) + 1;
        let object = record.as_object_mut().ok_or(StatusCode::BAD_REQUEST)?;
        object.entry("id").or_insert_with(|| json!(next_id));

        rows.push(record.clone());
        Ok(record)
    }

    fn patch(&self, resource: &str, id: i64, patch: Value) -> Result<Value, StatusCode> {
        let mut tables = self.lock();
        Self::check(&tables, resource)?;
        let record = tables
            .records
            .get_mut(resource)
            .and_then(|rows| rows.iter_mut().find(|r| record_id(r) == Some(id)))
            .ok_or(StatusCode::NOT_FOUND)?;

        let Value::Object(changes) = patch else {
            return Err(StatusCode::BAD_REQUEST);
        };
        if let Some(object) = record.as_object_mut() {
            for (key, value) in changes {
                if key != "id" {
                    object.insert(key, value);
                }
            }
        }
        Ok(record.clone())
    }

    fn remove(&self, resource: &str, id: i64) -> Result<(), StatusCode> {
        let mut tables = self.lock();
        Self::check(&tables, resource)?;
        let rows = tables.records.get_mut(resource).ok_or(StatusCode::NOT_FOUND)?;
        let position = rows
            .iter()
            .position(|r| record_id(r) == Some(id))
            .ok_or(StatusCode::NOT_FOUND)?;
        rows.remove(position);
        Ok(())
    }
}

fn record_id(record: &Value) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

// =============================================================================
// Query semantics
// =============================================================================

fn param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn matches(record: &Value, params: &Params) -> bool {
    let mut clauses: HashMap<&str, Vec<&str>> = HashMap::new();
    for (key, value) in params {
        if !CONTROL_PARAMS.contains(&key.as_str()) {
            clauses.entry(key.as_str()).or_default().push(value.as_str());
        }
    }
    clauses
        .iter()
        .all(|(key, values)| values.iter().any(|value| clause(record, key, value)))
}

fn clause(record: &Value, key: &str, value: &str) -> bool {
    if key == "q" {
        return full_text(record, value);
    }
    if key == "id_in" {
        let id = field_text(record, "id");
        return value.split(',').any(|v| id.as_deref() == Some(v.trim()));
    }
    if let Some(field) = key.strip_suffix("_gte") {
        return compare_number(record, field, value).is_some_and(Ordering::is_ge);
    }
    if let Some(field) = key.strip_suffix("_lte") {
        return compare_number(record, field, value).is_some_and(Ordering::is_le);
    }
    if let Some(field) = key.strip_suffix("_like") {
        let needle = value.to_lowercase();
        return field_text(record, field).is_some_and(|text| text.to_lowercase().contains(&needle));
    }
    field_text(record, key).as_deref() == Some(value)
}

fn field_text(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn compare_number(record: &Value, field: &str, value: &str) -> Option<Ordering> {
    let actual = record.get(field)?.as_f64()?;
    let bound = value.parse::<f64>().ok()?;
    actual.partial_cmp(&bound)
}

fn full_text(record: &Value, query: &str) -> bool {
    let query = query.to_lowercase();
    record.as_object().is_some_and(|object| {
        object
            .values()
            .filter_map(Value::as_str)
            .any(|text| text.to_lowercase().contains(&query))
    })
}

fn sort_rows(rows: &mut [Value], params: &Params) {
    let Some(field) = param(params, "_sort") else {
        return;
    };
    let descending = param(params, "_order") == Some("desc");
    rows.sort_by(|a, b| {
        let (a, b) = (a.get(field), b.get(field));
        let ordering = match (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => {
                let text = |v: Option<&Value>| v.and_then(Value::as_str).unwrap_or_default().to_string();
                text(a).cmp(&text(b))
            }
        };
        if descending { ordering.reverse() } else { ordering }
    });
}

fn paginate(rows: Vec<Value>, params: &Params) -> Vec<Value> {
    let page = param(params, "_page").and_then(|v| v.parse::<usize>().ok());
    let limit = param(params, "_limit").and_then(|v| v.parse::<usize>().ok());
    if page.is_none() && limit.is_none() {
        return rows;
    }
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    let skip = page.unwrap_or(1).max(1).saturating_sub(1).saturating_mul(limit);
    rows.into_iter().skip(skip).take(limit).collect()
}

// =============================================================================
// HTTP handlers
// =============================================================================

fn router(db: Db) -> Router {
    Router::new()
        .route("/{resource}", get(list).post(create))
        .route("/{resource}/{id}", get(show).patch(update).delete(remove))
        .with_state(db)
}

fn status_response(status: StatusCode) -> Response {
    (status, Json(json!({}))).into_response()
}

async fn list(
    State(db): State<Db>,
    UrlPath(resource): UrlPath<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let params: Params = query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    match db.list(&resource, &params) {
        Ok((rows, total)) => {
            let mut headers = HeaderMap::new();
            headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
            (headers, Json(rows)).into_response()
        }
        Err(status) => status_response(status),
    }
}

async fn show(State(db): State<Db>, UrlPath((resource, id)): UrlPath<(String, i64)>) -> Response {
    match db.get(&resource, id) {
        Ok(record) => Json(record).into_response(),
        Err(status) => status_response(status),
    }
}

async fn create(
    State(db): State<Db>,
    UrlPath(resource): UrlPath<String>,
    Json(record): Json<Value>,
) -> Response {
    match db.insert(&resource, record, true) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(status) => status_response(status),
    }
}

async fn update(
    State(db): State<Db>,
    UrlPath((resource, id)): UrlPath<(String, i64)>,
    Json(patch): Json<Value>,
) -> Response {
    match db.patch(&resource, id, patch) {
        Ok(record) => Json(record).into_response(),
        Err(status) => status_response(status),
    }
}

async fn remove(State(db): State<Db>, UrlPath((resource, id)): UrlPath<(String, i64)>) -> Response {
    match db.remove(&resource, id) {
        Ok(()) => status_response(StatusCode::OK),
        Err(status) => status_response(status),
    }
}

// =============================================================================
// FakeCatalog
// =============================================================================

/// A json-server look-alike listening on `127.0.0.1` on a free port.
///
/// The server task is aborted when the value is dropped.
pub struct FakeCatalog {
    addr: SocketAddr,
    db: Db,
    server: tokio::task::JoinHandle<()>,
}

impl FakeCatalog {
    /// Bind and start serving.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let db = Db::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake catalog");
        let addr = listener
            .local_addr()
            .expect("Failed to read fake catalog address");
        let app = router(db.clone());
        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                panic!("fake catalog stopped: {e}");
            }
        });
        Self { addr, db, server }
    }

    /// Base URL to point the storefront at.
    ///
    /// # Panics
    ///
    /// Never in practice; the address is always a valid URL host.
    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("Fake catalog URL")
    }

    /// A storefront talking to this catalog and keeping its session in
    /// `session_file`.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn storefront(&self, session_file: &Path) -> Storefront {
        Storefront::new(StorefrontConfig {
            catalog: CatalogConfig::new(self.url()),
            session_file: session_file.to_path_buf(),
        })
        .expect("Failed to build storefront")
    }

    /// Store a record directly, assigning the next id when it has none.
    /// Returns the id.
    ///
    /// # Panics
    ///
    /// Panics if `record` is not a JSON object.
    pub fn insert(&self, resource: &str, record: Value) -> i64 {
        let stored = self
            .db
            .insert(resource, record, false)
            .expect("Seed records must be JSON objects");
        record_id(&stored).unwrap_or_default()
    }

    /// Every record of a collection, in insertion order.
    #[must_use]
    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.db.lock().records.get(resource).cloned().unwrap_or_default()
    }

    /// One record by id.
    #[must_use]
    pub fn record(&self, resource: &str, id: i64) -> Option<Value> {
        self.records(resource)
            .into_iter()
            .find(|r| record_id(r) == Some(id))
    }

    /// Answer every request for `resource` with 500 until [`Self::recover`].
    pub fn fail(&self, resource: &str) {
        self.db.lock().failing.insert(resource.to_string());
    }

    pub fn recover(&self, resource: &str) {
        self.db.lock().failing.remove(resource);
    }
}

impl Drop for FakeCatalog {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// =============================================================================
// TestContext
// =============================================================================

/// A fake catalog plus a storefront whose session lives in a temp dir.
pub struct TestContext {
    pub catalog: FakeCatalog,
    pub store: Storefront,
    _session_dir: TempDir,
}

impl TestContext {
    /// # Panics
    ///
    /// Panics if the fake catalog or the temp dir cannot be created.
    pub async fn new() -> Self {
        let catalog = FakeCatalog::start().await;
        let session_dir = tempfile::tempdir().expect("Failed to create session dir");
        let store = catalog.storefront(&session_dir.path().join("session.json"));
        Self {
            catalog,
            store,
            _session_dir: session_dir,
        }
    }

    /// Store a session for `user_id` as if they had logged in.
    ///
    /// # Panics
    ///
    /// Panics if the session file cannot be written.
    pub async fn login_as(&self, user_id: i64, role: Role) -> Session {
        let session = Session::new(UserId::new(user_id), role);
        self.store
            .sessions()
            .save(&session)
            .await
            .expect("Failed to save session");
        session
    }

    /// Seed `count` products named `{category} 1..=count` priced 10, 20, ...
    pub fn seed_products(&self, count: u32, category: &str) -> Vec<i64> {
        (1..=count)
            .map(|n| {
                self.catalog.insert(
                    "products",
                    product(&format!("{category} {n}"), f64::from(n) * 10.0, category),
                )
            })
            .collect()
    }
}

// =============================================================================
// Sample records
// =============================================================================

/// A product record without id.
#[must_use]
pub fn product(name: &str, price: f64, category: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{name} for your home"),
        "price": price,
        "category": category,
        "rating": 0,
    })
}

/// A user record without id.
#[must_use]
pub fn user(phone: &str, email: &str, nickname: &str, password: &str, role: Role) -> Value {
    json!({
        "phone": phone,
        "email": email,
        "birthdate": "1990-04-12",
        "password": password,
        "firstName": "Olga",
        "lastName": "Ivanova",
        "middleName": "",
        "nickname": nickname,
        "role": role.to_string(),
    })
}
