//! Content model - posts, categories and how they are grouped for display

pub mod buckets;
mod category;
mod flags;
mod post;
pub mod related;

pub use buckets::HomeBuckets;
pub use category::Category;
pub use flags::truthy;
pub use post::{Post, ResourceId, TermRef, DEFAULT_CATEGORY_LABEL};
pub use related::RelatedGroups;
