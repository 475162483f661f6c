//! # Core Directory Logic
//!
//! The data-fetching/pagination state machine. It knows nothing about any
//! specific UI technology.
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!                    │            CORE              │
//!                    │  (this module)               │
//!                    │                              │
//!                    │  • Directory (state machine) │
//!                    │  • Progress (page / cursor)  │
//!                    │  • query (param builder)     │
//!                    │  • SearchFilters / SortSpec  │
//!                    │                              │
//!                    │  Transport behind a trait.   │
//!                    └──────────────┬───────────────┘
//!                                   │
//!               ┌───────────────────┼───────────────────┐
//!               ▼                   ▼                   ▼
//!        ┌────────────┐      ┌────────────┐      ┌────────────┐
//!        │    TUI     │      │    Web     │      │  Scripted  │
//!        │  Adapter   │      │  (future)  │      │  (tests)   │
//!        │ (ratatui)  │      │            │      │            │
//!        └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! All mutation goes through [`directory::Directory`]'s entry points; the
//! adapters only read snapshots and ask for the next page.
//!
//! ## Modules
//!
//! - [`directory`]: The `Directory` struct — the fetch orchestrator
//! - [`filters`]: User-editable search criteria, sort spec, pagination mode
//! - [`pagination`]: Per-mode progress markers
//! - [`query`]: Pure query-parameter builder
//! - [`config`]: `~/.roster/config.toml` loading and resolution

pub mod config;
pub mod directory;
pub mod filters;
pub mod pagination;
pub mod query;
