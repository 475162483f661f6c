use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single student record as the server sends it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub department: String,
    pub enrollment_number: String,
    pub dob: NaiveDate,
    pub address: String,
    pub joining_date: NaiveDate,
}

/// Wire shape of the offset endpoint: a page of records wrapped in an
/// envelope carrying server-side pagination metadata.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OffsetEnvelope {
    pub content: Vec<Student>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// Zero-based index of the page this envelope holds.
    pub number: u64,
    pub last: bool,
}

/// Offset-mode metadata, detached from the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetMeta {
    pub total_elements: u64,
    pub total_pages: u64,
    pub page_number: u64,
    pub last: bool,
}

/// One fetched page, normalized. The offset endpoint yields `meta: Some`,
/// the cursor endpoint yields `meta: None` — that difference is the only
/// thing the orchestrator ever learns about which endpoint was hit.
#[derive(Debug, Clone)]
pub struct Page {
    pub students: Vec<Student>,
    pub meta: Option<OffsetMeta>,
}

impl From<OffsetEnvelope> for Page {
    fn from(envelope: OffsetEnvelope) -> Self {
        Page {
            meta: Some(OffsetMeta {
                total_elements: envelope.total_elements,
                total_pages: envelope.total_pages,
                page_number: envelope.number,
                last: envelope.last,
            }),
            students: envelope.content,
        }
    }
}

impl From<Vec<Student>> for Page {
    fn from(students: Vec<Student>) -> Self {
        Page {
            students,
            meta: None,
        }
    }
}
