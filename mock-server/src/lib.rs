//! In-memory mock of the domain records API.
//!
//! Serves `/domains/{domain}/records` and `/domains/{domain}/records/{id}`
//! with the same envelopes as the real API. Domains must be registered up
//! front; records under an unknown domain are 404.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub const RECORD_TYPES: [&str; 8] = ["A", "AAAA", "CNAME", "TXT", "NS", "SRV", "MX", "CAA"];
pub const DEFAULT_TTL: u32 = 1800;
pub const DEFAULT_PER_PAGE: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub data: String,
    pub priority: Option<u32>,
    pub port: Option<u32>,
    pub ttl: Option<u32>,
    pub weight: Option<u32>,
    pub flags: Option<u8>,
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: Option<String>,
    pub data: Option<String>,
    pub priority: Option<u32>,
    pub port: Option<u32>,
    pub ttl: Option<u32>,
    pub weight: Option<u32>,
    pub flags: Option<u8>,
    pub tag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRecord {
    pub name: Option<String>,
    pub data: Option<String>,
    pub priority: Option<u32>,
    pub port: Option<u32>,
    pub ttl: Option<u32>,
    pub weight: Option<u32>,
    pub flags: Option<u8>,
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub per_page: Option<usize>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordEnvelope {
    pub domain_record: DomainRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordsEnvelope {
    pub domain_records: Vec<DomainRecord>,
    pub links: serde_json::Value,
    pub meta: Meta,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Meta {
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    domains: HashMap<String, BTreeMap<u64, DomainRecord>>,
}

pub type Db = Arc<RwLock<Store>>;

/// Failure response in the API's `{"id": ..., "message": ...}` shape.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    id: &'static str,
    message: String,
}

impl ApiFailure {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            id: "not_found",
            message: "The resource you were accessing could not be found.".to_string(),
        }
    }

    fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            id: "unprocessable_entity",
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            id: self.id.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Router with no domains registered.
pub fn app() -> Router {
    app_with_domains::<&str>(&[])
}

pub fn app_with_domains<S: AsRef<str>>(domains: &[S]) -> Router {
    let store = Store {
        next_id: 1,
        domains: domains
            .iter()
            .map(|d| (d.as_ref().to_string(), BTreeMap::new()))
            .collect(),
    };
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/domains/{domain}/records", get(list_records).post(create_record))
        .route(
            "/domains/{domain}/records/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .with_state(db)
}

pub async fn run<S: AsRef<str>>(listener: TcpListener, domains: &[S]) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_domains(domains)).await
}

async fn list_records(
    State(db): State<Db>,
    Path(domain): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<RecordsEnvelope>, ApiFailure> {
    let store = db.read().await;
    let records = store.domains.get(&domain).ok_or_else(ApiFailure::not_found)?;
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE).max(1);
    let page = params.page.unwrap_or(1).max(1);
    debug!(%domain, per_page, page, "listing records");

    let domain_records = records
        .values()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .cloned()
        .collect();
    Ok(Json(RecordsEnvelope {
        domain_records,
        links: serde_json::json!({}),
        meta: Meta { total: records.len() },
    }))
}

async fn create_record(
    State(db): State<Db>,
    Path(domain): Path<String>,
    Json(input): Json<CreateRecord>,
) -> Result<(StatusCode, Json<RecordEnvelope>), ApiFailure> {
    let mut store = db.write().await;
    if !store.domains.contains_key(&domain) {
        return Err(ApiFailure::not_found());
    }
    let record_type = input.record_type.to_ascii_uppercase();
    if !RECORD_TYPES.contains(&record_type.as_str()) {
        return Err(ApiFailure::unprocessable(format!("Type {record_type} is not supported")));
    }
    let data = input
        .data
        .ok_or_else(|| ApiFailure::unprocessable("Data needs to be present"))?;

    let id = store.next_id;
    store.next_id += 1;
    let record = DomainRecord {
        id,
        record_type,
        name: input.name.unwrap_or_else(|| "@".to_string()),
        data,
        priority: input.priority,
        port: input.port,
        ttl: Some(input.ttl.unwrap_or(DEFAULT_TTL)),
        weight: input.weight,
        flags: input.flags,
        tag: input.tag,
    };
    debug!(%domain, id, "created record");
    store
        .domains
        .entry(domain)
        .or_default()
        .insert(id, record.clone());
    Ok((StatusCode::CREATED, Json(RecordEnvelope { domain_record: record })))
}

async fn get_record(
    State(db): State<Db>,
    Path((domain, id)): Path<(String, u64)>,
) -> Result<Json<RecordEnvelope>, ApiFailure> {
    let store = db.read().await;
    store
        .domains
        .get(&domain)
        .and_then(|records| records.get(&id))
        .cloned()
        .map(|domain_record| Json(RecordEnvelope { domain_record }))
        .ok_or_else(ApiFailure::not_found)
}

async fn update_record(
    State(db): State<Db>,
    Path((domain, id)): Path<(String, u64)>,
    Json(input): Json<UpdateRecord>,
) -> Result<Json<RecordEnvelope>, ApiFailure> {
    let mut store = db.write().await;
    let record = store
        .domains
        .get_mut(&domain)
        .and_then(|records| records.get_mut(&id))
        .ok_or_else(ApiFailure::not_found)?;
    if let Some(name) = input.name {
        record.name = name;
    }
    if let Some(data) = input.data {
        record.data = data;
    }
    if input.priority.is_some() {
        record.priority = input.priority;
    }
    if input.port.is_some() {
        record.port = input.port;
    }
    if input.ttl.is_some() {
        record.ttl = input.ttl;
    }
    if input.weight.is_some() {
        record.weight = input.weight;
    }
    if input.flags.is_some() {
        record.flags = input.flags;
    }
    if input.tag.is_some() {
        record.tag = input.tag;
    }
    Ok(Json(RecordEnvelope {
        domain_record: record.clone(),
    }))
}

async fn delete_record(
    State(db): State<Db>,
    Path((domain, id)): Path<(String, u64)>,
) -> Result<StatusCode, ApiFailure> {
    let mut store = db.write().await;
    store
        .domains
        .get_mut(&domain)
        .and_then(|records| records.remove(&id))
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(ApiFailure::not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_nulls_for_absent_fields() {
        let record = DomainRecord {
            id: 1,
            record_type: "A".to_string(),
            name: "www".to_string(),
            data: "1.2.3.4".to_string(),
            priority: None,
            port: None,
            ttl: Some(1800),
            weight: None,
            flags: None,
            tag: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "A");
        assert_eq!(json["ttl"], 1800);
        assert!(json["priority"].is_null());
    }

    #[test]
    fn create_record_requires_type() {
        let result: Result<CreateRecord, _> = serde_json::from_str(r#"{"name":"www","data":"1.2.3.4"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_record_accepts_null_priority() {
        let input: CreateRecord =
            serde_json::from_str(r#"{"type":"MX","name":"@","data":"mail.example.com","priority":null}"#).unwrap();
        assert!(input.priority.is_none());
    }

    #[test]
    fn update_record_all_fields_optional() {
        let input: UpdateRecord = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.name.is_none());
        assert!(input.data.is_none());
        assert!(input.ttl.is_none());
    }
}
