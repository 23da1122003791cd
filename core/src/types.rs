//! Domain record DTOs.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates.
//!
//! Creation goes through `NewRecord`, a sum type with one variant per record
//! type carrying only the fields that type accepts. `NewRecord::from_input`
//! is the single place where a type string selects a field shape, so fields
//! that do not apply to a type can never reach the request body.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A DNS record under a domain, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub name: String,
    pub data: String,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default)]
    pub port: Option<u32>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub flags: Option<u8>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// The record types accepted by `create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Ns,
    Srv,
    Mx,
    Caa,
}

impl RecordType {
    pub const ALL: [RecordType; 8] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Cname,
        RecordType::Txt,
        RecordType::Ns,
        RecordType::Srv,
        RecordType::Mx,
        RecordType::Caa,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Txt => "TXT",
            RecordType::Ns => "NS",
            RecordType::Srv => "SRV",
            RecordType::Mx => "MX",
            RecordType::Caa => "CAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ApiError;

    /// Case-insensitive; `"srv"` and `"SRV"` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        RecordType::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or(ApiError::InvalidRecordType(upper))
    }
}

/// A numeric input that may arrive as an integer or as a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Text(String),
}

impl Numeric {
    /// Coerce to an integer. Surrounding whitespace in text is ignored.
    pub fn to_int(&self, field: &'static str) -> Result<i64, ApiError> {
        match self {
            Numeric::Int(n) => Ok(*n),
            Numeric::Text(s) => s.trim().parse().map_err(|_| ApiError::InvalidField {
                field,
                value: s.clone(),
            }),
        }
    }
}

impl From<i64> for Numeric {
    fn from(n: i64) -> Self {
        Numeric::Int(n)
    }
}

impl From<i32> for Numeric {
    fn from(n: i32) -> Self {
        Numeric::Int(i64::from(n))
    }
}

impl From<u32> for Numeric {
    fn from(n: u32) -> Self {
        Numeric::Int(i64::from(n))
    }
}

impl From<u16> for Numeric {
    fn from(n: u16) -> Self {
        Numeric::Int(i64::from(n))
    }
}

impl From<u8> for Numeric {
    fn from(n: u8) -> Self {
        Numeric::Int(i64::from(n))
    }
}

impl From<&str> for Numeric {
    fn from(s: &str) -> Self {
        Numeric::Text(s.to_string())
    }
}

impl From<String> for Numeric {
    fn from(s: String) -> Self {
        Numeric::Text(s)
    }
}

/// Caller input for creating a record.
///
/// Every optional field may be supplied for any type; `NewRecord::from_input`
/// keeps only the ones the type accepts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub name: String,
    pub data: String,
    pub priority: Option<Numeric>,
    pub port: Option<Numeric>,
    pub weight: Option<Numeric>,
    pub flags: Option<Numeric>,
    pub tag: Option<String>,
    pub ttl: Option<u32>,
}

impl CreateRecord {
    pub fn new(record_type: impl Into<String>, name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            name: name.into(),
            data: data.into(),
            ..Self::default()
        }
    }

    pub fn priority(mut self, priority: impl Into<Numeric>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn port(mut self, port: impl Into<Numeric>) -> Self {
        self.port = Some(port.into());
        self
    }

    pub fn weight(mut self, weight: impl Into<Numeric>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    pub fn flags(mut self, flags: impl Into<Numeric>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// The type-shaped body of a create request.
///
/// Serializes with a `type` key holding the upper-case type name. MX and CAA
/// always carry their type-specific keys, as `null` when not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum NewRecord {
    A { name: String, data: String },
    Aaaa { name: String, data: String },
    Cname { name: String, data: String },
    Txt { name: String, data: String },
    Ns { data: String },
    Srv {
        name: String,
        data: String,
        priority: i64,
        port: i64,
        weight: i64,
    },
    Mx {
        name: String,
        data: String,
        priority: Option<i64>,
    },
    Caa {
        name: String,
        data: String,
        flags: Option<i64>,
        tag: Option<String>,
    },
}

impl NewRecord {
    /// Validate the type and keep only the fields it accepts.
    pub fn from_input(input: &CreateRecord) -> Result<Self, ApiError> {
        let record_type: RecordType = input.record_type.parse()?;
        let name = input.name.clone();
        let data = input.data.clone();

        let record = match record_type {
            RecordType::A => NewRecord::A { name, data },
            RecordType::Aaaa => NewRecord::Aaaa { name, data },
            RecordType::Cname => NewRecord::Cname { name, data },
            RecordType::Txt => NewRecord::Txt { name, data },
            RecordType::Ns => NewRecord::Ns { data },
            RecordType::Srv => NewRecord::Srv {
                name,
                data,
                priority: coerce(input.priority.as_ref(), "priority")?.unwrap_or(0),
                port: coerce(input.port.as_ref(), "port")?.unwrap_or(0),
                weight: coerce(input.weight.as_ref(), "weight")?.unwrap_or(0),
            },
            RecordType::Mx => NewRecord::Mx {
                name,
                data,
                priority: coerce(input.priority.as_ref(), "priority")?,
            },
            RecordType::Caa => NewRecord::Caa {
                name,
                data,
                flags: coerce(input.flags.as_ref(), "flags")?,
                tag: input.tag.clone(),
            },
        };
        Ok(record)
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            NewRecord::A { .. } => RecordType::A,
            NewRecord::Aaaa { .. } => RecordType::Aaaa,
            NewRecord::Cname { .. } => RecordType::Cname,
            NewRecord::Txt { .. } => RecordType::Txt,
            NewRecord::Ns { .. } => RecordType::Ns,
            NewRecord::Srv { .. } => RecordType::Srv,
            NewRecord::Mx { .. } => RecordType::Mx,
            NewRecord::Caa { .. } => RecordType::Caa,
        }
    }
}

fn coerce(value: Option<&Numeric>, field: &'static str) -> Result<Option<i64>, ApiError> {
    value.map(|v| v.to_int(field)).transpose()
}

/// Wire body for a create request: the type-shaped record plus `ttl` when
/// supplied.
#[derive(Debug, Serialize)]
pub(crate) struct CreateBody<'a> {
    #[serde(flatten)]
    pub record: &'a NewRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Request payload for a partial update. Only the fields that are `Some` are
/// sent; omitted fields remain unchanged on the server.
///
/// No per-type filtering happens here; the server decides which fields apply
/// to the record being updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Field mapping sent verbatim by `update_fields`.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// The `meta` block of a list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meta {
    #[serde(default)]
    pub total: Option<u64>,
}

/// The `links` block of a list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Links {
    #[serde(default)]
    pub pages: Option<Pages>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pages {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

/// Records of one list call, in server order, with the response's
/// pagination blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordList {
    records: Vec<DomainRecord>,
    meta: Option<Meta>,
    links: Option<Links>,
}

impl RecordList {
    pub(crate) fn from_envelope(envelope: RecordsEnvelope) -> Self {
        Self {
            records: envelope.domain_records,
            meta: envelope.meta,
            links: envelope.links,
        }
    }

    pub fn records(&self) -> &[DomainRecord] {
        &self.records
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn links(&self) -> Option<&Links> {
        self.links.as_ref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<DomainRecord> {
        self.records
    }
}

impl IntoIterator for RecordList {
    type Item = DomainRecord;
    type IntoIter = std::vec::IntoIter<DomainRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a DomainRecord;
    type IntoIter = std::slice::Iter<'a, DomainRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// `{ "domain_record": {...} }`
#[derive(Debug, Deserialize)]
pub(crate) struct RecordEnvelope {
    pub domain_record: DomainRecord,
}

/// `{ "domain_records": [...], "links": {...}, "meta": {...} }`
#[derive(Debug, Deserialize)]
pub(crate) struct RecordsEnvelope {
    pub domain_records: Vec<DomainRecord>,
    #[serde(default)]
    pub meta: Option<Meta>,
    #[serde(default)]
    pub links: Option<Links>,
}

/// Error body returned by the API, e.g. `{"id":"not_found","message":"..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
