//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the card
//! list, and translates keyboard events into calls on the core
//! [`Directory`]. This is the only module that knows about ratatui and
//! crossterm.
//!
//! ## Fetch plumbing
//!
//! Requests must not block the event loop, so the cycle is split across a
//! channel: `begin_fetch()` runs synchronously here (flipping the core to
//! Loading), the plan is executed on a spawned tokio task, and the outcome
//! comes back over an mpsc channel to be folded in with `apply()` on the
//! next tick. At most one task is in flight; its abort handle is kept so a
//! filter/sort/mode change can cancel the now-obsolete request. Even
//! without the abort, the epoch stamped into each plan makes a late
//! response from a previous session fall on the floor.
//!
//! ## Scroll trigger
//!
//! Infinite scroll works off the rendered layout: after each draw the UI
//! records which card is the last one visible. When that is the final
//! loaded card, more data exists, and the core is idle, the next page is
//! dispatched — the terminal equivalent of the "sentinel row came into
//! view" trick.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::api::{ApiError, HttpStudentApi, Page, StudentApi};
use crate::core::config::ResolvedConfig;
use crate::core::directory::{Directory, FetchStatus, run_plan};
use crate::core::filters::{Mode, SortDirection};
use crate::tui::component::EventHandler;
use crate::tui::components::{FilterForm, FilterFormEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Result of one spawned fetch, tagged with the epoch its plan was built
/// under so the core can recognize stale outcomes.
struct FetchOutcome {
    epoch: u64,
    result: Result<Page, ApiError>,
}

/// TUI-specific presentation state (not part of core logic)
pub struct TuiState {
    /// Index of the first visible card.
    pub scroll_offset: usize,
    /// Set during draw: number of cards in the list.
    pub cards_total: usize,
    /// Set during draw: index of the last card that made it on screen.
    pub last_visible_card: usize,
    /// Filter editing overlay (None = hidden)
    pub filter_form: Option<FilterForm>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            cards_total: 0,
            last_visible_card: 0,
            filter_form: None,
        }
    }

    fn scroll_up(&mut self, cards: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(cards);
    }

    fn scroll_down(&mut self, cards: usize) {
        let max = self.cards_total.saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + cards).min(max);
    }

    /// True when the final loaded card is on screen (or nothing is loaded),
    /// i.e. the sentinel position for the infinite-scroll trigger.
    fn at_bottom(&self) -> bool {
        self.cards_total == 0 || self.last_visible_card + 1 >= self.cards_total
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn StudentApi> = Arc::new(HttpStudentApi::new(Some(config.base_url.clone())));
    let mut directory = Directory::new(config.mode);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for outcomes from spawned fetch tasks
    let (tx, rx) = mpsc::channel();

    // Abort handle for the in-flight fetch (cancelled on reset)
    let mut in_flight: Option<AbortHandle> = None;

    // Kick off the first page before the first frame
    start_fetch(&mut directory, &api, &tx, &mut in_flight);

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &directory, &mut tui))?;
            needs_redraw = false;

            // The draw refreshed the visibility bookkeeping, so this is the
            // moment the scroll trigger has accurate data.
            if tui.filter_form.is_none()
                && tui.at_bottom()
                && directory.has_more()
                && directory.status() == &FetchStatus::Idle
            {
                start_fetch(&mut directory, &api, &tx, &mut in_flight);
                needs_redraw = true;
            }
        }

        // Short poll while loading keeps the spinner areas fresh; long poll
        // when idle avoids spinning the CPU.
        let timeout = if directory.is_loading() {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);

        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if matches!(event, TuiEvent::ForceQuit) {
                should_quit = true;
                continue;
            }

            // When the filter form is open, it captures all events
            if let Some(ref mut form) = tui.filter_form {
                if let Some(form_event) = form.handle_event(&event) {
                    match form_event {
                        FilterFormEvent::Apply(filters) => {
                            tui.filter_form = None;
                            if &filters != directory.filters() {
                                abort_in_flight(&mut in_flight);
                                directory.set_filters(filters);
                                tui.scroll_offset = 0;
                                start_fetch(&mut directory, &api, &tx, &mut in_flight);
                            }
                        }
                        FilterFormEvent::Dismiss => {
                            tui.filter_form = None;
                        }
                    }
                }
                continue;
            }

            match event {
                TuiEvent::ScrollUp => tui.scroll_up(1),
                TuiEvent::ScrollDown => {
                    tui.scroll_down(1);
                    // Scrolling at the bottom retries after a failure.
                    if tui.at_bottom()
                        && directory.has_more()
                        && matches!(directory.status(), FetchStatus::Error(_))
                    {
                        start_fetch(&mut directory, &api, &tx, &mut in_flight);
                    }
                }
                TuiEvent::ScrollPageUp => tui.scroll_up(3),
                TuiEvent::ScrollPageDown => tui.scroll_down(3),
                TuiEvent::ScrollToTop => tui.scroll_offset = 0,
                TuiEvent::ScrollToBottom => tui.scroll_offset = tui.cards_total.saturating_sub(1),

                TuiEvent::InputChar('f') => {
                    tui.filter_form = Some(FilterForm::new(directory.filters()));
                }
                TuiEvent::InputChar('m') => {
                    abort_in_flight(&mut in_flight);
                    directory.set_mode(directory.mode().toggled());
                    tui.scroll_offset = 0;
                    start_fetch(&mut directory, &api, &tx, &mut in_flight);
                }
                TuiEvent::InputChar('c') => {
                    abort_in_flight(&mut in_flight);
                    directory.clear();
                    tui.scroll_offset = 0;
                    start_fetch(&mut directory, &api, &tx, &mut in_flight);
                }
                TuiEvent::InputChar('n') => {
                    apply_sort(&mut directory, "name", &api, &tx, &mut in_flight, &mut tui);
                }
                TuiEvent::InputChar('d') => {
                    apply_sort(&mut directory, "department", &api, &tx, &mut in_flight, &mut tui);
                }
                TuiEvent::InputChar('j') => {
                    apply_sort(&mut directory, "joiningDate", &api, &tx, &mut in_flight, &mut tui);
                }
                TuiEvent::InputChar('q') | TuiEvent::Escape => {
                    should_quit = true;
                }
                _ => {}
            }
        }

        if should_quit {
            break;
        }

        // Fold in completed fetches
        while let Ok(outcome) = rx.try_recv() {
            needs_redraw = true;
            directory.apply(outcome.epoch, outcome.result);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Starts the next fetch unless the core refuses (already loading, or no
/// more data). The request runs on a spawned task; the outcome comes back
/// over the channel.
fn start_fetch(
    directory: &mut Directory,
    api: &Arc<dyn StudentApi>,
    tx: &mpsc::Sender<FetchOutcome>,
    in_flight: &mut Option<AbortHandle>,
) {
    let Some(plan) = directory.begin_fetch() else {
        return;
    };
    info!(
        "Dispatching fetch (epoch {}, {} mode)",
        plan.epoch,
        plan.mode.label()
    );

    let api = Arc::clone(api);
    let tx = tx.clone();
    let handle = tokio::spawn(async move {
        let result = run_plan(api.as_ref(), &plan).await;
        if tx
            .send(FetchOutcome {
                epoch: plan.epoch,
                result,
            })
            .is_err()
        {
            warn!("Fetch outcome dropped: receiver gone");
        }
    });
    *in_flight = Some(handle.abort_handle());
}

/// Sort toggling: the first press on a field sorts ascending, pressing the
/// same field again flips the direction. Ignored in cursor mode, where the
/// server order is fixed.
fn apply_sort(
    directory: &mut Directory,
    field: &str,
    api: &Arc<dyn StudentApi>,
    tx: &mpsc::Sender<FetchOutcome>,
    in_flight: &mut Option<AbortHandle>,
    tui: &mut TuiState,
) {
    if directory.mode() != Mode::Offset {
        return;
    }
    let direction = match directory.sort() {
        Some(spec) if spec.field == field => spec.direction.toggled(),
        _ => SortDirection::Asc,
    };
    abort_in_flight(in_flight);
    directory.set_sort(field, direction);
    tui.scroll_offset = 0;
    start_fetch(directory, api, tx, in_flight);
}

fn abort_in_flight(in_flight: &mut Option<AbortHandle>) {
    if let Some(handle) = in_flight.take() {
        handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_clamps_to_card_range() {
        let mut tui = TuiState::new();
        tui.cards_total = 5;

        tui.scroll_down(3);
        assert_eq!(tui.scroll_offset, 3);
        tui.scroll_down(10);
        assert_eq!(tui.scroll_offset, 4);
        tui.scroll_up(100);
        assert_eq!(tui.scroll_offset, 0);
    }

    #[test]
    fn test_at_bottom_tracks_last_visible_card() {
        let mut tui = TuiState::new();
        assert!(tui.at_bottom()); // empty list counts as bottom

        tui.cards_total = 10;
        tui.last_visible_card = 4;
        assert!(!tui.at_bottom());

        tui.last_visible_card = 9;
        assert!(tui.at_bottom());
    }
}
