//! One-call-per-operation facade over `DomainRecordClient` and an
//! `HttpClient`.
//!
//! Every method is build → execute → parse. Input validation happens in the
//! build step, so an invalid record type never reaches the transport.

use crate::client::DomainRecordClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::transport::UreqClient;
use crate::types::{CreateRecord, DomainRecord, Fields, RecordList, UpdateRecord};

/// Domain record operations for the domains of one API endpoint.
#[derive(Debug, Clone)]
pub struct DomainRecordApi<C> {
    client: DomainRecordClient,
    http: C,
}

impl DomainRecordApi<UreqClient> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(DomainRecordClient::new(&config.endpoint), UreqClient::new(config))
    }
}

impl<C: HttpClient> DomainRecordApi<C> {
    pub fn new(client: DomainRecordClient, http: C) -> Self {
        Self { client, http }
    }

    pub fn client(&self) -> &DomainRecordClient {
        &self.client
    }

    /// Lists up to one page of 200 records, in server order.
    pub fn get_all(&self, domain_name: &str) -> Result<RecordList, ApiError> {
        let response = self.http.execute(self.client.build_get_all(domain_name))?;
        self.client.parse_get_all(response)
    }

    pub fn get_by_id(&self, domain_name: &str, id: u64) -> Result<DomainRecord, ApiError> {
        let response = self.http.execute(self.client.build_get_by_id(domain_name, id))?;
        self.client.parse_get_by_id(response)
    }

    pub fn create(&self, domain_name: &str, input: &CreateRecord) -> Result<DomainRecord, ApiError> {
        let request = self.client.build_create(domain_name, input)?;
        let response = self.http.execute(request)?;
        self.client.parse_create(response)
    }

    pub fn update(&self, domain_name: &str, record_id: u64, input: &UpdateRecord) -> Result<DomainRecord, ApiError> {
        let request = self.client.build_update(domain_name, record_id, input)?;
        let response = self.http.execute(request)?;
        self.client.parse_update(response)
    }

    pub fn update_data(&self, domain_name: &str, record_id: u64, data: &str) -> Result<DomainRecord, ApiError> {
        let request = self.client.build_update_data(domain_name, record_id, data)?;
        let response = self.http.execute(request)?;
        self.client.parse_update(response)
    }

    pub fn update_fields(&self, domain_name: &str, record_id: u64, fields: &Fields) -> Result<DomainRecord, ApiError> {
        let request = self.client.build_update_fields(domain_name, record_id, fields)?;
        let response = self.http.execute(request)?;
        self.client.parse_update(response)
    }

    pub fn delete(&self, domain_name: &str, record_id: u64) -> Result<(), ApiError> {
        let response = self.http.execute(self.client.build_delete(domain_name, record_id))?;
        self.client.parse_delete(response)
    }
}
