//! Debounced search session driving a [`SearchBox`]
//!
//! One session runs per connected search box. Keystrokes arrive as
//! [`SearchCommand`]s; dropdown changes leave as [`SearchUpdate`]s.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use super::state::{Dropdown, SearchBox, SearchResult, Ticket};
use crate::api::{queries, ContentSource};

/// Quiet period after the last keystroke before a request is sent
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Input from the search box
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchCommand {
    Input { query: String },
    Select { slug: String },
    Dismiss,
    ToggleMenu,
}

/// Change to show in the search box
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchUpdate {
    Loading,
    Results {
        query: String,
        results: Vec<SearchResult>,
    },
    Closed,
    Navigate {
        url: String,
    },
    Menu {
        open: bool,
    },
}

/// A debounced search box bound to a content source
pub struct SearchSession<S: ?Sized> {
    source: Arc<S>,
    debounce: Duration,
}

impl<S> SearchSession<S>
where
    S: ContentSource + ?Sized + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            debounce: DEBOUNCE,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Run until the command channel closes or the update receiver goes away
    pub async fn run(
        self,
        mut commands: mpsc::Receiver<SearchCommand>,
        updates: mpsc::Sender<SearchUpdate>,
    ) {
        let mut search = SearchBox::new();
        let mut pending: Option<(Instant, Ticket)> = None;
        let (done_tx, mut done_rx) = mpsc::channel::<(Ticket, Vec<SearchResult>)>(8);

        loop {
            let wake = pending.as_ref().map(|(at, _)| *at);

            let update = tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    match command {
                        SearchCommand::Input { query } => match search.input(&query) {
                            Some(ticket) => {
                                pending = Some((Instant::now() + self.debounce, ticket));
                                None
                            }
                            None => {
                                pending = None;
                                Some(SearchUpdate::Closed)
                            }
                        },
                        SearchCommand::Select { slug } => {
                            pending = None;
                            Some(SearchUpdate::Navigate { url: search.select(&slug) })
                        }
                        SearchCommand::Dismiss => {
                            search.dismiss();
                            Some(SearchUpdate::Closed)
                        }
                        SearchCommand::ToggleMenu => {
                            search.toggle_menu();
                            Some(SearchUpdate::Menu { open: search.menu_open })
                        }
                    }
                }

                _ = sleep_until(wake.unwrap_or_else(Instant::now)), if wake.is_some() => {
                    match pending.take() {
                        Some((_, ticket)) if search.fire(&ticket) => {
                            self.spawn_request(ticket, done_tx.clone());
                            Some(SearchUpdate::Loading)
                        }
                        _ => None,
                    }
                }

                Some((ticket, results)) = done_rx.recv() => {
                    if search.resolve(&ticket, results) {
                        dropdown_update(&search)
                    } else {
                        tracing::debug!("Discarding stale results for {:?}", ticket.query);
                        None
                    }
                }
            };

            if let Some(update) = update {
                if updates.send(update).await.is_err() {
                    break;
                }
            }
        }

        tracing::debug!("Search session ended");
    }

    fn spawn_request(&self, ticket: Ticket, done: mpsc::Sender<(Ticket, Vec<SearchResult>)>) {
        let source = Arc::clone(&self.source);

        tokio::spawn(async move {
            let results = match queries::search_posts(&*source, &ticket.query).await {
                Ok(posts) => posts.iter().map(SearchResult::from_post).collect(),
                Err(e) => {
                    tracing::warn!("Search failed for {:?}: {}", ticket.query, e);
                    Vec::new()
                }
            };
            // the session may be gone already
            let _ = done.send((ticket, results)).await;
        });
    }
}

fn dropdown_update(search: &SearchBox) -> Option<SearchUpdate> {
    let query = search.query.clone();
    match search.dropdown() {
        Dropdown::Results(results) => Some(SearchUpdate::Results {
            query,
            results: results.to_vec(),
        }),
        Dropdown::NoResults => Some(SearchUpdate::Results {
            query,
            results: Vec::new(),
        }),
        // dismissed while loading
        Dropdown::Hidden | Dropdown::Loading => None,
    }
}
