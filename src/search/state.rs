//! Header search box state machine
//!
//! `Idle` (no query) -> `Pending` (debouncing, then in flight) -> `Loaded`.
//! Every request is tagged with a [`Ticket`]; a response is applied only if
//! its ticket is still the latest one issued.

use serde::Serialize;

use crate::content::Post;
use crate::helpers::{post_path, teaser};

/// Identifies one search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub query: String,
}

/// One entry of the results dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub url: String,
}

impl SearchResult {
    pub fn from_post(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: teaser(post.excerpt.as_deref(), &post.body),
            url: post_path(&post.slug),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending {
        ticket: Ticket,
        in_flight: bool,
    },
    Loaded {
        query: String,
        results: Vec<SearchResult>,
    },
}

/// What the dropdown shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dropdown<'a> {
    Hidden,
    Loading,
    Results(&'a [SearchResult]),
    NoResults,
}

/// Search UI state owned by the header
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    pub query: String,
    pub phase: Phase,
    pub show_results: bool,
    pub menu_open: bool,
    last_seq: u64,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// The query changed. Returns the ticket to debounce, or `None` when the
    /// query is blank and the box went idle.
    pub fn input(&mut self, query: &str) -> Option<Ticket> {
        self.query = query.to_string();

        if query.trim().is_empty() {
            self.phase = Phase::Idle;
            self.show_results = false;
            return None;
        }

        self.last_seq += 1;
        let ticket = Ticket {
            seq: self.last_seq,
            query: query.to_string(),
        };
        self.phase = Phase::Pending {
            ticket: ticket.clone(),
            in_flight: false,
        };
        Some(ticket)
    }

    /// The debounce window for `ticket` elapsed. Returns true if a request
    /// should be issued for it.
    pub fn fire(&mut self, ticket: &Ticket) -> bool {
        match &mut self.phase {
            Phase::Pending {
                ticket: current,
                in_flight,
            } if current.seq == ticket.seq && !*in_flight => {
                *in_flight = true;
                self.show_results = true;
                true
            }
            _ => false,
        }
    }

    /// A response arrived. Returns false (and changes nothing) when the
    /// ticket is stale.
    pub fn resolve(&mut self, ticket: &Ticket, results: Vec<SearchResult>) -> bool {
        let latest = matches!(
            &self.phase,
            Phase::Pending { ticket: current, in_flight: true } if current.seq == ticket.seq
        );
        if !latest {
            return false;
        }

        self.phase = Phase::Loaded {
            query: ticket.query.clone(),
            results,
        };
        true
    }

    /// A result was clicked: reset everything and return the route to open
    pub fn select(&mut self, slug: &str) -> String {
        self.query.clear();
        self.phase = Phase::Idle;
        self.show_results = false;
        self.menu_open = false;
        post_path(slug)
    }

    /// Click outside the dropdown
    pub fn dismiss(&mut self) {
        self.show_results = false;
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn dropdown(&self) -> Dropdown<'_> {
        if !self.show_results {
            return Dropdown::Hidden;
        }
        match &self.phase {
            Phase::Idle => Dropdown::Hidden,
            Phase::Pending { in_flight: true, .. } => Dropdown::Loading,
            // debouncing a new query: nothing to show until the request fires
            Phase::Pending { .. } => Dropdown::Hidden,
            Phase::Loaded { results, .. } if results.is_empty() => Dropdown::NoResults,
            Phase::Loaded { results, .. } => Dropdown::Results(results),
        }
    }
}
