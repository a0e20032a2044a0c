use crate::client::{
    page_count, sort_studies, SortDir, SortKey, StudiesClient, Study, PAGE_SIZE,
};
use crate::query::{Chip, QueryEditor};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::process::Command;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Edit,
    Results,
    Help,
}

/// Fetch execution state for non-blocking lookups
pub enum FetchState {
    /// No lookup in progress
    Idle,
    /// Lookup is running in background
    Fetching {
        query: String,
        receiver: Receiver<FetchResult>,
        start_time: Instant,
    },
}

/// Result from a background lookup
pub struct FetchResult {
    pub rows: Vec<Study>,
    pub query: String,
}

/// LRU cache size for lookup results (larger = more memory, faster re-queries)
const FETCH_CACHE_SIZE: usize = 64;

/// Status line shown before any query is committed.
pub const PLACEHOLDER: &str = "Enter a query to search studies";

/// Application state
pub struct App {
    /// The query editor: the single owned string plus its chip projection
    pub editor: QueryEditor,
    /// Client for the remote study index (shared with fetch threads)
    client: Arc<StudiesClient>,
    /// Rows for the last applied lookup
    pub rows: Vec<Study>,
    /// The query the current rows (or in-flight fetch) belong to
    committed: String,
    /// Background fetch state
    fetch_state: FetchState,
    /// LRU cache of recent lookups for instant recall
    fetch_cache: LruCache<String, Vec<Study>>,
    /// Selected chip, if any (None = editing raw text)
    pub chip_cursor: Option<usize>,
    /// Selected row within the visible page
    pub selected: usize,
    /// Current results page, 1-based
    pub page: usize,
    pub sort_key: SortKey,
    pub sort_dir: SortDir,
    pub mode: Mode,
    /// Previous mode before entering help (to return to)
    pub previous_mode: Mode,
    pub status_message: String,
}

impl App {
    pub fn new(base: impl Into<String>, initial_query: Option<String>) -> Self {
        let mut app = Self {
            editor: QueryEditor::new(),
            client: Arc::new(StudiesClient::new(base)),
            rows: Vec::new(),
            committed: String::new(),
            fetch_state: FetchState::Idle,
            fetch_cache: LruCache::new(NonZeroUsize::new(FETCH_CACHE_SIZE).unwrap()),
            chip_cursor: None,
            selected: 0,
            page: 1,
            sort_key: SortKey::Year,
            sort_dir: SortDir::Desc,
            mode: Mode::Edit,
            previous_mode: Mode::Edit,
            status_message: PLACEHOLDER.to_string(),
        };
        if let Some(query) = initial_query {
            app.editor.set(&query);
            app.commit_input();
        }
        app
    }

    pub fn chips(&self) -> Vec<Chip> {
        self.editor.chips()
    }

    // --- edit-mode actions ---

    /// Commit the text box (Enter): whitespace collapse only, then fetch.
    pub fn commit_input(&mut self) {
        self.editor.commit();
        self.commit_fetch();
    }

    /// Append a structural token (operator key). Appending never
    /// normalizes; the new string is committed as-is.
    pub fn append_operator(&mut self, token: &str) {
        self.editor.append(token);
        self.commit_fetch();
    }

    /// Reset button: clear the query.
    pub fn reset(&mut self) {
        self.editor.reset();
        self.chip_cursor = None;
        self.commit_fetch();
    }

    /// Remove the selected chip (its `×` action) and commit the repaired
    /// query.
    pub fn remove_selected_chip(&mut self) {
        let Some(cursor) = self.chip_cursor else {
            return;
        };
        if !self.editor.remove_chip(cursor) {
            self.chip_cursor = None;
            return;
        }
        let remaining = self.editor.chips().len();
        self.chip_cursor = if remaining == 0 {
            None
        } else {
            Some(cursor.min(remaining - 1))
        };
        self.commit_fetch();
    }

    /// Cycle chip selection forward: none -> first -> ... -> last -> none.
    pub fn chip_next(&mut self) {
        let count = self.editor.chips().len();
        self.chip_cursor = match self.chip_cursor {
            None if count > 0 => Some(0),
            Some(i) if i + 1 < count => Some(i + 1),
            _ => None,
        };
    }

    /// Cycle chip selection backward.
    pub fn chip_prev(&mut self) {
        let count = self.editor.chips().len();
        self.chip_cursor = match self.chip_cursor {
            None if count > 0 => Some(count - 1),
            Some(0) => None,
            Some(i) => Some(i - 1),
            None => None,
        };
    }

    // --- lookup plumbing ---

    /// Commit the current editor string and start (or skip) a lookup.
    fn commit_fetch(&mut self) {
        self.committed = self.editor.query().to_string();
        self.page = 1;
        self.selected = 0;

        if self.committed.is_empty() {
            // never invoke the collaborator for an empty query
            self.rows.clear();
            self.fetch_state = FetchState::Idle;
            self.status_message = PLACEHOLDER.to_string();
            return;
        }

        if let Some(cached) = self.fetch_cache.get(&self.committed) {
            self.rows = cached.clone();
            self.fetch_state = FetchState::Idle;
            self.status_message = format!("{} studies (cached)", self.rows.len());
            return;
        }

        // Clear stale rows immediately when starting a new lookup
        self.rows.clear();

        let client = Arc::clone(&self.client);
        let (tx, rx) = mpsc::channel();
        let query = self.committed.clone();
        let query_for_thread = query.clone();

        self.status_message = "Searching...".to_string();
        self.fetch_state = FetchState::Fetching {
            query,
            receiver: rx,
            start_time: Instant::now(),
        };

        thread::spawn(move || {
            // failures are swallowed into an empty list inside fetch()
            let rows = client.fetch(&query_for_thread);
            let _ = tx.send(FetchResult {
                rows,
                query: query_for_thread,
            });
        });
    }

    /// Poll for background lookup completion (call this in the event loop)
    pub fn poll_fetch(&mut self) {
        let current_state = std::mem::replace(&mut self.fetch_state, FetchState::Idle);

        match current_state {
            FetchState::Fetching {
                query,
                receiver,
                start_time,
            } => {
                match receiver.try_recv() {
                    Ok(result) => {
                        // Only apply results if the query is still current
                        // (a newer commit supersedes this fetch)
                        if result.query == self.committed {
                            let elapsed = start_time.elapsed();
                            self.status_message = format!(
                                "{} studies ({:.1}ms)",
                                result.rows.len(),
                                elapsed.as_secs_f64() * 1000.0
                            );
                            self.fetch_cache.put(result.query, result.rows.clone());
                            self.rows = result.rows;
                            self.selected = 0;
                        }
                        // state is already Idle from the replace
                    }
                    Err(TryRecvError::Empty) => {
                        // Still fetching, put the state back
                        self.fetch_state = FetchState::Fetching {
                            query,
                            receiver,
                            start_time,
                        };
                    }
                    Err(TryRecvError::Disconnected) => {
                        self.status_message = "Lookup thread terminated unexpectedly".to_string();
                    }
                }
            }
            FetchState::Idle => {}
        }
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.fetch_state, FetchState::Fetching { .. })
    }

    /// The query the rows on screen belong to.
    pub fn committed_query(&self) -> &str {
        &self.committed
    }

    // --- results pane ---

    /// Rows of the current page, in display order.
    pub fn visible_rows(&self) -> Vec<&Study> {
        let sorted = sort_studies(&self.rows, self.sort_key, self.sort_dir);
        let start = (self.page - 1) * PAGE_SIZE;
        sorted.into_iter().skip(start).take(PAGE_SIZE).collect()
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.rows.len())
    }

    pub fn selected_study(&self) -> Option<&Study> {
        self.visible_rows().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let count = self.visible_rows().len();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn page_next(&mut self) {
        if self.page < self.total_pages() {
            self.page += 1;
            self.selected = 0;
        }
    }

    pub fn page_prev(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.selected = 0;
        }
    }

    pub fn page_first(&mut self) {
        self.page = 1;
        self.selected = 0;
    }

    pub fn page_last(&mut self) {
        self.page = self.total_pages();
        self.selected = 0;
    }

    /// Select a sort key: a new key starts ascending, re-selecting the
    /// active key flips direction.
    pub fn set_sort(&mut self, key: SortKey) {
        if key == self.sort_key {
            self.sort_dir = self.sort_dir.toggled();
        } else {
            self.sort_key = key;
            self.sort_dir = SortDir::Asc;
        }
        self.selected = 0;
    }

    pub fn cycle_sort_key(&mut self) {
        self.set_sort(self.sort_key.next());
    }

    pub fn toggle_sort_dir(&mut self) {
        self.sort_dir = self.sort_dir.toggled();
        self.selected = 0;
    }

    /// Open the selected study on PubMed with the platform opener.
    pub fn open_selected(&mut self) {
        if let Some(url) = self.selected_study().and_then(|s| s.pubmed_url()) {
            let opener = if cfg!(target_os = "macos") {
                "open"
            } else {
                "xdg-open"
            };
            let _ = Command::new(opener).arg(&url).status();
        }
    }

    // --- mode switching ---

    pub fn show_help(&mut self) {
        if self.mode != Mode::Help {
            self.previous_mode = self.mode;
            self.mode = Mode::Help;
        }
    }

    pub fn hide_help(&mut self) {
        if self.mode == Mode::Help {
            self.mode = self.previous_mode;
        }
    }
}
