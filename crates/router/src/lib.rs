//! # Sitegate Router Crate
//!
//! Client-side routing for the site: hash locations are matched against a
//! declarative route table, each route's access policy is checked by a single
//! guard function, and the resulting screen is described as a [`View`] for
//! the renderers.
//!
//! ## Architecture
//!
//! - **Location**: hash URL normalisation
//! - **Routes**: the route table and path matching
//! - **Guard**: access policy evaluation, independent of rendering
//! - **History**: the back/forward stack
//! - **Site**: the shell that owns the session and drives navigation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sitegate_config::RouterConfig;
//! use sitegate_router::{Site, View};
//! use sitegate_store::MemoryStore;
//!
//! # async fn demo() -> sitegate_store::StoreResult<()> {
//! let mut site = Site::open(MemoryStore::new(), RouterConfig::default()).await?;
//! let navigation = site.navigate("#/admin").await?;
//! assert_eq!(navigation.location, "/login");
//! assert_eq!(navigation.view, View::Login);
//! # Ok(())
//! # }
//! ```

pub mod guard;
pub mod history;
pub mod location;
pub mod routes;
pub mod site;
pub mod view;

pub use guard::{check_access, GuardDecision, RedirectReason};
pub use history::History;
pub use location::{href, normalize_location};
pub use routes::{match_route, Access, RouteMatch, RouteSpec, Screen, ROUTE_TABLE, STAFF_ROLES};
pub use site::{Hop, Navigation, Site};
pub use view::View;

/// Where unknown paths and signed-in visitors to the auth screens are sent.
pub const HOME_PATH: &str = "/";

/// Where visitors lacking a session or role are sent.
pub const LOGIN_PATH: &str = "/login";
