//! Page lookup services.

pub mod resolver;

pub use resolver::{load_pages, save_pages, PageLookup, PageResolver};
