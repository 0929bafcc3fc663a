//! Session-scoped index state.
//!
//! A session owns one loaded index at a time. The index is fetched once when the
//! session opens and replaced wholesale on reload; while a fetch is pending every
//! query reports [`SearchOutcome::Loading`]. Fetch failures never reach callers:
//! they are logged and the session continues with an empty index.

use crate::config::SearchSettings;
use crate::search::{Memo, SearchHit, Searcher};
use crate::source::IndexSource;
use crate::types::IndexEntry;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared in-flight fetch; every waiter observes the same entry list.
type SharedLoad = Shared<BoxFuture<'static, Arc<Vec<IndexEntry>>>>;

/// Result of running a query against a session.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The index is still being fetched.
    Loading,
    /// The query was empty after trimming.
    EmptyQuery,
    /// The index is loaded but nothing matched.
    NoResults,
    /// Ranked hits, best first.
    Results(Arc<Vec<SearchHit>>),
}

impl SearchOutcome {
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            Self::Results(hits) => hits.as_slice(),
            _ => &[],
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Snapshot of a session's load state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Loading {
        source: String,
    },
    Ready {
        source: String,
        entries: usize,
        languages: Vec<String>,
    },
}

enum Phase {
    Loading(SharedLoad),
    Ready(Arc<Vec<IndexEntry>>),
}

/// Generation, source and phase change together under one lock, so a reader
/// never pairs one source with another source's entries.
struct LoadState {
    generation: u64,
    source: Arc<dyn IndexSource>,
    phase: Phase,
}

type SearcherKey = (String, u64);
type ResultsKey = (String, u64, String);

struct Inner {
    settings: SearchSettings,
    state: RwLock<LoadState>,
    searchers: Memo<SearcherKey, Arc<Searcher>>,
    results: Memo<ResultsKey, Arc<Vec<SearchHit>>>,
}

/// Handle to a search session. Clones share the same state.
#[derive(Clone)]
pub struct SearchSession {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SearchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("status", &self.status())
            .finish()
    }
}

impl SearchSession {
    /// Opens a session and starts fetching from `source` in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(source: Arc<dyn IndexSource>, settings: SearchSettings) -> Self {
        let load = start_load(&source);
        let inner = Arc::new(Inner {
            settings,
            state: RwLock::new(LoadState {
                generation: 0,
                source,
                phase: Phase::Loading(load.clone()),
            }),
            searchers: Memo::default(),
            results: Memo::default(),
        });
        spawn_completion(&inner, 0, load);
        Self { inner }
    }

    /// Replaces the index source and re-fetches. Results computed against the
    /// previous index are discarded once the new one is ready.
    ///
    /// Of several concurrent reloads, the one that takes the state lock last wins;
    /// completions of the others are ignored.
    pub fn reload(&self, source: Arc<dyn IndexSource>) {
        let load = start_load(&source);
        let generation = {
            let mut state = self.inner.write_state();
            let generation = state.generation + 1;
            *state = LoadState {
                generation,
                source,
                phase: Phase::Loading(load.clone()),
            };
            generation
        };

        spawn_completion(&self.inner, generation, load);
    }

    /// Waits until the current index is loaded and returns it.
    ///
    /// If a reload happens while waiting, waits for the newer index instead.
    pub async fn wait_ready(&self) -> Arc<Vec<IndexEntry>> {
        loop {
            let (generation, load) = {
                let state = self.inner.read_state();
                match &state.phase {
                    Phase::Ready(entries) => return entries.clone(),
                    Phase::Loading(load) => (state.generation, load.clone()),
                }
            };
            let entries = load.await;
            self.inner.complete(generation, entries);
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.inner.settings
    }

    pub fn source(&self) -> Arc<dyn IndexSource> {
        self.inner.read_state().source.clone()
    }

    pub fn status(&self) -> SessionStatus {
        let state = self.inner.read_state();
        let source = state.source.describe();
        match &state.phase {
            Phase::Loading(_) => SessionStatus::Loading { source },
            Phase::Ready(entries) => {
                let languages: BTreeSet<&str> = entries.iter().map(|e| e.lang.as_str()).collect();
                SessionStatus::Ready {
                    source,
                    entries: entries.len(),
                    languages: languages.into_iter().map(str::to_string).collect(),
                }
            }
        }
    }

    /// Runs `query` against the loaded index for `lang`.
    ///
    /// Never blocks: while the index is loading this returns
    /// [`SearchOutcome::Loading`] regardless of the query.
    pub fn search(&self, query: &str, lang: &str) -> SearchOutcome {
        let (generation, entries) = {
            let state = self.inner.read_state();
            match &state.phase {
                Phase::Loading(_) => return SearchOutcome::Loading,
                Phase::Ready(entries) => (state.generation, entries.clone()),
            }
        };

        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::EmptyQuery;
        }

        let searcher = self.searcher(lang, generation, &entries);
        let hits = self.inner.results.get_or_compute(
            (lang.to_string(), generation, query.to_string()),
            |(_, _, query)| Arc::new(searcher.search(query)),
        );

        if hits.is_empty() {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Results(hits)
        }
    }

    fn searcher(&self, lang: &str, generation: u64, entries: &[IndexEntry]) -> Arc<Searcher> {
        let settings = self.inner.settings;
        self.inner
            .searchers
            .get_or_compute((lang.to_string(), generation), |(lang, _)| {
                Arc::new(Searcher::new(entries, lang, settings))
            })
    }
}

impl Inner {
    fn read_state(&self) -> RwLockReadGuard<'_, LoadState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, LoadState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves `generation` from loading to ready. Completions of any other
    /// generation are stale and ignored.
    fn complete(&self, generation: u64, entries: Arc<Vec<IndexEntry>>) {
        let mut state = self.write_state();
        if state.generation != generation || matches!(state.phase, Phase::Ready(_)) {
            tracing::debug!(
                "Ignoring completion of generation {} (current {})",
                generation,
                state.generation
            );
            return;
        }

        tracing::info!(
            "Index from {} ready with {} entries",
            state.source.describe(),
            entries.len()
        );
        state.phase = Phase::Ready(entries);
        drop(state);
        self.searchers.clear();
        self.results.clear();
    }
}

fn start_load(source: &Arc<dyn IndexSource>) -> SharedLoad {
    let description = source.describe();
    let fetch = source.fetch();
    tracing::info!("Loading search index from {}", description);

    async move {
        match fetch.await {
            Ok(entries) => Arc::new(entries),
            Err(e) => {
                tracing::warn!(
                    "Failed to load search index from {}, continuing with an empty index: {}",
                    description,
                    e
                );
                Arc::new(Vec::new())
            }
        }
    }
    .boxed()
    .shared()
}

fn spawn_completion(inner: &Arc<Inner>, generation: u64, load: SharedLoad) {
    let inner = inner.clone();
    tokio::spawn(async move {
        let entries = load.await;
        inner.complete(generation, entries);
    });
}
