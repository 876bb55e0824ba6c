//! Input parsing: link classification and link-list reading.
//!
//! - [`link`] - classifies a raw URL into a (kind, identifier) pair plus an
//!   optional access key
//! - [`list`] - reads the newline-delimited link-list file

mod link;
mod list;

pub use link::{ClassifiedLink, LinkKind, classify, extract_access_key};
pub use list::read_link_list;
