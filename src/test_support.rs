//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{ApiError, OffsetEnvelope, Student, StudentApi};

/// A student fixture with fields derived from the id.
pub fn student(id: i64) -> Student {
    Student {
        id,
        name: format!("Student {}", id),
        email: format!("student{}@example.edu", id),
        phone_number: format!("555-{:04}", id),
        department: "CS".to_string(),
        enrollment_number: format!("EN-{:04}", id),
        dob: NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid fixture date"),
        address: format!("{} University Way", id),
        joining_date: NaiveDate::from_ymd_opt(2023, 9, 1).expect("valid fixture date"),
    }
}

pub fn students(ids: &[i64]) -> Vec<Student> {
    ids.iter().copied().map(student).collect()
}

/// An offset-endpoint envelope over the given fixture ids.
pub fn envelope(
    ids: &[i64],
    total_elements: u64,
    total_pages: u64,
    number: u64,
    last: bool,
) -> OffsetEnvelope {
    OffsetEnvelope {
        content: students(ids),
        total_elements,
        total_pages,
        number,
        last,
    }
}

/// A [`StudentApi`] fake that replays queued responses and records the
/// query parameters of every call, so tests can assert on both sides of
/// the wire without a server.
pub struct ScriptedApi {
    offset_responses: Mutex<VecDeque<Result<OffsetEnvelope, ApiError>>>,
    cursor_responses: Mutex<VecDeque<Result<Vec<Student>, ApiError>>>,
    offset_queries: Mutex<Vec<Vec<(String, String)>>>,
    cursor_queries: Mutex<Vec<Vec<(String, String)>>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            offset_responses: Mutex::new(VecDeque::new()),
            cursor_responses: Mutex::new(VecDeque::new()),
            offset_queries: Mutex::new(Vec::new()),
            cursor_queries: Mutex::new(Vec::new()),
        }
    }

    pub fn push_offset(&self, response: Result<OffsetEnvelope, ApiError>) {
        self.offset_responses.lock().unwrap().push_back(response);
    }

    pub fn push_cursor(&self, response: Result<Vec<Student>, ApiError>) {
        self.cursor_responses.lock().unwrap().push_back(response);
    }

    pub fn offset_calls(&self) -> usize {
        self.offset_queries.lock().unwrap().len()
    }

    pub fn offset_queries(&self) -> Vec<Vec<(String, String)>> {
        self.offset_queries.lock().unwrap().clone()
    }

    pub fn cursor_queries(&self) -> Vec<Vec<(String, String)>> {
        self.cursor_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl StudentApi for ScriptedApi {
    async fn offset_page(&self, query: &[(String, String)]) -> Result<OffsetEnvelope, ApiError> {
        self.offset_queries.lock().unwrap().push(query.to_vec());
        self.offset_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
    }

    async fn cursor_page(&self, query: &[(String, String)]) -> Result<Vec<Student>, ApiError> {
        self.cursor_queries.lock().unwrap().push(query.to_vec());
        self.cursor_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
    }
}
