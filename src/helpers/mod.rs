//! Helper functions shared by page assembly and templates

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
