//! Stateless HTTP request builder and response parser for domain records.
//!
//! # Design
//! `DomainRecordClient` holds only the API endpoint and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the HTTP round-trip, keeping this type
//! deterministic and free of I/O.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreateBody, CreateRecord, DomainRecord, ErrorBody, Fields, NewRecord, RecordEnvelope, RecordList,
    RecordsEnvelope, UpdateRecord,
};

/// Page size requested by `build_get_all`.
pub const PER_PAGE: u32 = 200;

/// Synchronous, stateless request builder and response parser.
#[derive(Debug, Clone)]
pub struct DomainRecordClient {
    endpoint: String,
}

impl DomainRecordClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn records_path(&self, domain_name: &str) -> String {
        format!("{}/domains/{domain_name}/records", self.endpoint)
    }

    fn record_path(&self, domain_name: &str, record_id: u64) -> String {
        format!("{}/domains/{domain_name}/records/{record_id}", self.endpoint)
    }

    pub fn build_get_all(&self, domain_name: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}?per_page={PER_PAGE}", self.records_path(domain_name)),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_by_id(&self, domain_name: &str, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.record_path(domain_name, id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Fails with `InvalidRecordType` or `InvalidField` before any request
    /// exists.
    pub fn build_create(&self, domain_name: &str, input: &CreateRecord) -> Result<HttpRequest, ApiError> {
        let record = NewRecord::from_input(input)?;
        let body = CreateBody {
            record: &record,
            ttl: input.ttl,
        };
        json_request(HttpMethod::Post, self.records_path(domain_name), &body)
    }

    /// Sends every `Some` field of `input`; absent fields are filtered out.
    pub fn build_update(&self, domain_name: &str, record_id: u64, input: &UpdateRecord) -> Result<HttpRequest, ApiError> {
        let fields = match serde_json::to_value(input).map_err(|e| ApiError::Serialization(e.to_string()))? {
            serde_json::Value::Object(map) => map,
            other => return Err(ApiError::Serialization(format!("expected an object, got {other}"))),
        };
        self.build_update_fields(domain_name, record_id, &fields)
    }

    pub fn build_update_data(&self, domain_name: &str, record_id: u64, data: &str) -> Result<HttpRequest, ApiError> {
        let mut fields = Fields::new();
        fields.insert("data".to_string(), serde_json::Value::from(data));
        self.build_update_fields(domain_name, record_id, &fields)
    }

    /// PUTs `fields` verbatim. Shared by `build_update` and `build_update_data`.
    pub fn build_update_fields(&self, domain_name: &str, record_id: u64, fields: &Fields) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.record_path(domain_name, record_id), fields)
    }

    pub fn build_delete(&self, domain_name: &str, record_id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.record_path(domain_name, record_id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_get_all(&self, response: HttpResponse) -> Result<RecordList, ApiError> {
        check_status(&response)?;
        let envelope: RecordsEnvelope = decode(&response.body)?;
        Ok(RecordList::from_envelope(envelope))
    }

    pub fn parse_get_by_id(&self, response: HttpResponse) -> Result<DomainRecord, ApiError> {
        parse_record(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<DomainRecord, ApiError> {
        parse_record(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<DomainRecord, ApiError> {
        parse_record(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn json_request<T: serde::Serialize + ?Sized>(method: HttpMethod, path: String, body: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_record(response: HttpResponse) -> Result<DomainRecord, ApiError> {
    check_status(&response)?;
    let envelope: RecordEnvelope = decode(&response.body)?;
    Ok(envelope.domain_record)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| "the resource you requested could not be found".to_string());
        return Err(ApiError::NotFound { message });
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    const ENDPOINT: &str = "https://api.example.test/v2";

    fn client() -> DomainRecordClient {
        DomainRecordClient::new(ENDPOINT)
    }

    fn body_of(req: &HttpRequest) -> Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_all_requests_a_page_of_200() {
        let req = client().build_get_all("example.com");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "https://api.example.test/v2/domains/example.com/records?per_page=200");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_by_id_produces_correct_request() {
        let req = client().build_get_by_id("example.com", 42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "https://api.example.test/v2/domains/example.com/records/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_simple_types_send_name_type_data() {
        for record_type in ["A", "aaaa", "Cname", "txt"] {
            let input = CreateRecord::new(record_type, "www", "target")
                .priority(1)
                .port(2)
                .weight(3)
                .flags(0)
                .tag("issue");
            let req = client().build_create("example.com", &input).unwrap();
            assert_eq!(req.method, HttpMethod::Post);
            assert_eq!(req.path, "https://api.example.test/v2/domains/example.com/records");
            assert_eq!(
                req.headers,
                vec![("content-type".to_string(), "application/json".to_string())]
            );
            assert_eq!(
                body_of(&req),
                json!({"name": "www", "type": record_type.to_uppercase(), "data": "target"}),
                "{record_type}"
            );
        }
    }

    #[test]
    fn build_create_appends_ttl_when_supplied() {
        let input = CreateRecord::new("ns", "@", "ns1.example.com").ttl(1800);
        let req = client().build_create("example.com", &input).unwrap();
        assert_eq!(body_of(&req), json!({"type": "NS", "data": "ns1.example.com", "ttl": 1800}));
    }

    #[test]
    fn build_create_srv_coerces_numeric_strings() {
        let input = CreateRecord::new("srv", "_sip._tcp", "sip.example.com")
            .priority("10")
            .port("5060")
            .weight("0");
        let req = client().build_create("example.com", &input).unwrap();
        assert_eq!(
            body_of(&req),
            json!({
                "name": "_sip._tcp",
                "type": "SRV",
                "data": "sip.example.com",
                "priority": 10,
                "port": 5060,
                "weight": 0
            })
        );
    }

    #[test]
    fn build_create_mx_and_caa_shapes() {
        let mx = CreateRecord::new("mx", "@", "mail.example.com").priority(10).port(25);
        assert_eq!(
            body_of(&client().build_create("example.com", &mx).unwrap()),
            json!({"type": "MX", "name": "@", "data": "mail.example.com", "priority": 10})
        );

        let caa = CreateRecord::new("caa", "@", "letsencrypt.org").flags(0).tag("issue").priority(5);
        assert_eq!(
            body_of(&client().build_create("example.com", &caa).unwrap()),
            json!({"type": "CAA", "name": "@", "data": "letsencrypt.org", "flags": 0, "tag": "issue"})
        );
    }

    #[test]
    fn build_create_rejects_unknown_type() {
        let input = CreateRecord::new("PTR", "1", "host.example.com");
        let err = client().build_create("example.com", &input).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRecordType(ref t) if t == "PTR"));
    }

    #[test]
    fn build_create_rejects_non_numeric_port() {
        let input = CreateRecord::new("SRV", "_sip._tcp", "sip.example.com").port("sip");
        let err = client().build_create("example.com", &input).unwrap_err();
        assert!(matches!(err, ApiError::InvalidField { field: "port", .. }));
    }

    #[test]
    fn build_update_sends_only_present_fields() {
        let input = UpdateRecord {
            data: Some("1.2.3.4".to_string()),
            ..UpdateRecord::default()
        };
        let req = client().build_update("example.com", 7, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "https://api.example.test/v2/domains/example.com/records/7");
        assert_eq!(body_of(&req), json!({"data": "1.2.3.4"}));
    }

    #[test]
    fn build_update_does_not_filter_by_type() {
        let input = UpdateRecord {
            flags: Some(128),
            tag: Some("iodef".to_string()),
            ttl: Some(60),
            ..UpdateRecord::default()
        };
        let req = client().build_update("example.com", 7, &input).unwrap();
        assert_eq!(body_of(&req), json!({"flags": 128, "tag": "iodef", "ttl": 60}));
    }

    #[test]
    fn build_update_data_matches_update_fields() {
        let mut fields = Fields::new();
        fields.insert("data".to_string(), json!("1.2.3.4"));
        let via_data = client().build_update_data("example.com", 7, "1.2.3.4").unwrap();
        let via_fields = client().build_update_fields("example.com", 7, &fields).unwrap();
        assert_eq!(via_data, via_fields);
    }

    #[test]
    fn build_delete_produces_correct_request() {
        let req = client().build_delete("example.com", 7);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "https://api.example.test/v2/domains/example.com/records/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_get_all_keeps_server_order_and_meta() {
        let body = r#"{
            "domain_records": [
                {"id": 9, "type": "A", "name": "b", "data": "1.1.1.1"},
                {"id": 2, "type": "TXT", "name": "a", "data": "v=spf1 -all"}
            ],
            "links": {},
            "meta": {"total": 2}
        }"#;
        let list = client().parse_get_all(response(200, body)).unwrap();
        let ids: Vec<u64> = list.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![9, 2]);
        assert_eq!(list.meta().and_then(|m| m.total), Some(2));
    }

    #[test]
    fn parse_get_all_decodes_page_links() {
        let body = r#"{
            "domain_records": [{"id": 1, "type": "A", "name": "www", "data": "1.1.1.1"}],
            "links": {
                "pages": {
                    "next": "https://api.example.test/v2/domains/example.com/records?page=2&per_page=200",
                    "last": "https://api.example.test/v2/domains/example.com/records?page=3&per_page=200"
                }
            },
            "meta": {"total": 401}
        }"#;
        let list = client().parse_get_all(response(200, body)).unwrap();
        let pages = list.links().and_then(|l| l.pages.as_ref()).unwrap();
        assert_eq!(
            pages.next.as_deref(),
            Some("https://api.example.test/v2/domains/example.com/records?page=2&per_page=200")
        );
        assert_eq!(
            pages.last.as_deref(),
            Some("https://api.example.test/v2/domains/example.com/records?page=3&per_page=200")
        );
        assert!(pages.first.is_none());
        assert!(pages.prev.is_none());
        assert_eq!(list.meta().and_then(|m| m.total), Some(401));

        let records = list.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "www");
    }

    #[test]
    fn parse_get_all_empty_links_has_no_pages() {
        let body = r#"{"domain_records": [], "links": {}, "meta": {"total": 0}}"#;
        let list = client().parse_get_all(response(200, body)).unwrap();
        assert!(list.links().unwrap().pages.is_none());
    }

    #[test]
    fn parse_get_all_not_found_uses_server_message() {
        let body = r#"{"id":"not_found","message":"The resource you were accessing could not be found."}"#;
        let err = client().parse_get_all(response(404, body)).unwrap_err();
        match err {
            ApiError::NotFound { message } => {
                assert_eq!(message, "The resource you were accessing could not be found.");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn parse_create_accepts_201() {
        let body = r#"{"domain_record":{"id":1,"type":"A","name":"www","data":"1.2.3.4","ttl":1800}}"#;
        let record = client().parse_create(response(201, body)).unwrap();
        assert_eq!(record.name, "www");
        assert_eq!(record.ttl, Some(1800));
    }

    #[test]
    fn parse_update_wrong_status() {
        let err = client().parse_update(response(500, "internal error")).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[test]
    fn parse_get_by_id_bad_json() {
        let err = client().parse_get_by_id(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_delete_success_and_not_found() {
        assert!(client().parse_delete(response(204, "")).is_ok());
        let err = client().parse_delete(response(404, "")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = DomainRecordClient::new("https://api.example.test/v2/");
        assert_eq!(client.endpoint(), "https://api.example.test/v2");
    }
}
