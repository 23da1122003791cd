//! Synchronous client for the domain records of a cloud DNS API.
//!
//! # Overview
//! Manages the DNS records under a named domain: list, get, create, update,
//! delete. `DomainRecordClient` builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network (host-does-IO pattern).
//! `DomainRecordApi` pairs it with an `HttpClient` so each operation is a
//! single call; `UreqClient` is the bundled blocking transport.
//!
//! # Design
//! - `DomainRecordClient` is stateless; it holds only the endpoint.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Record creation dispatches on `NewRecord`, one variant per record type,
//!   so fields a type does not accept are never sent.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! # Example
//! ```no_run
//! use domain_record_core::{ClientConfig, CreateRecord, DomainRecordApi};
//!
//! let config = ClientConfig::from_env()?;
//! let api = DomainRecordApi::from_config(&config);
//! let record = api.create(
//!     "example.com",
//!     &CreateRecord::new("srv", "_sip._tcp", "sip.example.com")
//!         .priority("10")
//!         .port("5060")
//!         .weight("0"),
//! )?;
//! api.update_data("example.com", record.id, "sip2.example.com")?;
//! # Ok::<(), domain_record_core::ApiError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::DomainRecordApi;
pub use client::{DomainRecordClient, PER_PAGE};
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use transport::UreqClient;
pub use types::{
    CreateRecord, DomainRecord, Fields, Links, Meta, NewRecord, Numeric, Pages, RecordList, RecordType, UpdateRecord,
};
