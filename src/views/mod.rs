//! View models handed to the templates

mod card;
mod schema;
mod state;

pub use card::{CardContext, CardStyle, PostCard};
pub use schema::NewsArticle;
pub use state::{BodyToggle, ExpandableList};
