//! # Sitegate Pages Crate
//!
//! Pages authored through the admin screens live as one ordered JSON array
//! under `site_pages`. This crate reads that array and resolves a slug to a
//! page; writing is limited to replacing the whole array, which is what the
//! admin screens do.

pub mod entities;
pub mod services;

pub use entities::DynamicPage;
pub use services::{load_pages, save_pages, PageLookup, PageResolver};
