//! Page entities.

pub mod page;

pub use page::DynamicPage;
