//! # Student API
//!
//! Transport layer for the student directory service. Two read-only GET
//! endpoints expose the same logical collection with different pagination
//! strategies:
//!
//! - `/api/students` — offset pagination. Returns a JSON envelope with
//!   `content`, totals, the page number, and a `last` flag. Supports `sort`.
//! - `/api/students/cursor` — cursor pagination. Returns a bare JSON array
//!   ordered by id descending. No totals, no sorting.
//!
//! Both shapes are normalized into [`types::Page`] right here at the
//! boundary; nothing past this module sees which endpoint a page came from.

pub mod client;
pub mod types;

pub use client::{ApiError, HttpStudentApi, StudentApi};
pub use types::{OffsetEnvelope, OffsetMeta, Page, Student};
