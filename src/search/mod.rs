//! Live search for the site header

mod session;
mod state;

pub use session::{SearchCommand, SearchSession, SearchUpdate, DEBOUNCE};
pub use state::{Dropdown, Phase, SearchBox, SearchResult, Ticket};
