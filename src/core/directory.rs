//! # Fetch Orchestrator
//!
//! `Directory` is the one state machine behind the browser. Everything the
//! UI shows lives here, and every mutation goes through the entry points
//! below — adapters never poke fields.
//!
//! ```text
//! Directory
//! ├── filters: SearchFilters    // user-editable search criteria
//! ├── sort: Option<SortSpec>    // offset mode only
//! ├── mode: Mode                // offset or cursor pagination
//! ├── progress: Progress        // marker for the active mode
//! ├── status: FetchStatus       // Idle | Loading | Error(message)
//! ├── students: Vec<Student>    // accumulated results, arrival order
//! └── epoch: u64                // bumped on every reset
//! ```
//!
//! The fetch cycle is split so the I/O can run on a spawned task:
//! `begin_fetch()` guards and transitions to Loading, returning a
//! [`FetchPlan`]; [`run_plan`] executes it against a [`StudentApi`];
//! `apply()` folds the outcome back in. `fetch_next()` chains the three for
//! callers that can await inline.
//!
//! Each plan carries the epoch it was built under. A reset (filter, sort,
//! or mode change) bumps the epoch, so a response that raced with the reset
//! arrives stale and is discarded instead of corrupting the fresh session.

use log::{info, warn};

use crate::api::{ApiError, Page, StudentApi};
use crate::api::types::Student;
use crate::core::filters::{Mode, SearchFilters, SortDirection, SortSpec};
use crate::core::pagination::{PAGE_SIZE, Progress};
use crate::core::query::build_query;

/// Where the orchestrator is in its request cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Error(String),
}

/// Everything a dispatched fetch needs: which endpoint family to hit, the
/// prebuilt query, and the epoch the plan belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub mode: Mode,
    pub query: Vec<(String, String)>,
    pub epoch: u64,
}

/// Counters for the UI's "Showing N of M" line. `total` is only known
/// under offset pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub loaded: usize,
    pub total: Option<u64>,
}

/// Executes a plan against the transport and normalizes the response.
/// The enveloped/bare-array distinction dies right here.
pub async fn run_plan(api: &dyn StudentApi, plan: &FetchPlan) -> Result<Page, ApiError> {
    match plan.mode {
        Mode::Offset => api.offset_page(&plan.query).await.map(Page::from),
        Mode::Cursor => api.cursor_page(&plan.query).await.map(Page::from),
    }
}

pub struct Directory {
    filters: SearchFilters,
    sort: Option<SortSpec>,
    mode: Mode,
    progress: Progress,
    status: FetchStatus,
    students: Vec<Student>,
    epoch: u64,
}

impl Directory {
    pub fn new(mode: Mode) -> Self {
        Self {
            filters: SearchFilters::default(),
            sort: None,
            mode,
            progress: Progress::new(mode),
            status: FetchStatus::Idle,
            students: Vec::new(),
            epoch: 0,
        }
    }

    // ------------------------------------------------------------------
    // Fetch cycle
    // ------------------------------------------------------------------

    /// Starts the next fetch, or refuses.
    ///
    /// Returns `None` while a request is already in flight or once the end
    /// of the collection was reached — calling this from a scroll handler
    /// any number of times is safe. From Idle or Error it transitions to
    /// Loading and hands back the plan to execute.
    pub fn begin_fetch(&mut self) -> Option<FetchPlan> {
        if self.status == FetchStatus::Loading || self.progress.is_last() {
            return None;
        }
        self.status = FetchStatus::Loading;
        Some(FetchPlan {
            mode: self.mode,
            query: build_query(&self.filters, self.sort.as_ref(), &self.progress),
            epoch: self.epoch,
        })
    }

    /// Folds a completed fetch back into the state machine.
    ///
    /// A plan from before the most recent reset is stale: its result is
    /// dropped wholesale, success or failure. Failures keep the records and
    /// progress already accumulated and only record the message.
    pub fn apply(&mut self, epoch: u64, result: Result<Page, ApiError>) {
        if epoch != self.epoch {
            info!(
                "Discarding stale fetch outcome (epoch {}, current {})",
                epoch, self.epoch
            );
            return;
        }

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                warn!("Fetch failed: {}", e);
                self.status = FetchStatus::Error(e.to_string());
                return;
            }
        };

        match &mut self.progress {
            Progress::Offset(p) => {
                if let Some(meta) = page.meta {
                    p.current_page = meta.page_number;
                    p.total_elements = meta.total_elements;
                    p.total_pages = meta.total_pages;
                    p.last = meta.last;
                    p.next_page += 1;
                } else {
                    warn!("Offset page arrived without metadata; treating as terminal");
                    p.last = true;
                }
            }
            Progress::Cursor(p) => {
                if let Some(last_seen) = page.students.last() {
                    p.cursor = Some(last_seen.id);
                    // Heuristic: a short page means the collection is
                    // exhausted. The server gives no explicit signal.
                    p.last = page.students.len() < PAGE_SIZE;
                } else {
                    p.last = true;
                }
            }
        }

        info!(
            "Applied page of {} records ({} total loaded)",
            page.students.len(),
            self.students.len() + page.students.len()
        );
        self.students.extend(page.students);
        self.status = FetchStatus::Idle;
    }

    /// One full fetch cycle for callers that can await inline: guard,
    /// execute, apply. Returns false when the guard refused to dispatch.
    pub async fn fetch_next(&mut self, api: &dyn StudentApi) -> bool {
        let Some(plan) = self.begin_fetch() else {
            return false;
        };
        let result = run_plan(api, &plan).await;
        self.apply(plan.epoch, result);
        true
    }

    // ------------------------------------------------------------------
    // Controller entry points
    // ------------------------------------------------------------------

    /// Replaces the search criteria. A changed value resets the session;
    /// re-submitting identical criteria does nothing.
    pub fn set_filters(&mut self, filters: SearchFilters) {
        if filters == self.filters {
            return;
        }
        self.filters = filters;
        self.reset();
    }

    /// Sets the sort for offset-mode queries. No-op when unchanged.
    pub fn set_sort(&mut self, field: &str, direction: SortDirection) {
        let spec = SortSpec::new(field, direction);
        if self.sort.as_ref() == Some(&spec) {
            return;
        }
        self.sort = Some(spec);
        self.reset();
    }

    /// Switches pagination strategy. Destructive; idempotent when the mode
    /// is already active.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.reset();
    }

    /// Drops all criteria and the sort, then starts the session over.
    pub fn clear(&mut self) {
        self.filters = SearchFilters::default();
        self.sort = None;
        self.reset();
    }

    fn reset(&mut self) {
        self.students.clear();
        self.progress = Progress::new(self.mode);
        self.status = FetchStatus::Idle;
        self.epoch += 1;
        info!("Session reset (epoch {})", self.epoch);
    }

    // ------------------------------------------------------------------
    // Snapshot surface for the presentation layer
    // ------------------------------------------------------------------

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn has_more(&self) -> bool {
        !self.progress.is_last()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn summary(&self) -> Summary {
        Summary {
            loaded: self.students.len(),
            total: match &self.progress {
                Progress::Offset(p) => Some(p.total_elements),
                Progress::Cursor(_) => None,
            },
        }
    }
}
