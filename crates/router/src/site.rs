//! The site shell: owns the session, the page resolver and the history, and
//! turns each navigation into exactly one rendered view.

use crate::guard::{check_access, GuardDecision, RedirectReason};
use crate::history::History;
use crate::location::{href, normalize_location};
use crate::routes::{match_route, Access, Screen};
use crate::view::View;
use crate::HOME_PATH;
use sitegate_config::RouterConfig;
use sitegate_pages::{PageLookup, PageResolver};
use sitegate_store::{KeyValueStore, StoreResult};
use sitegate_users::{SessionManager, User};
use tracing::{debug, warn};

/// One redirect taken while settling a navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Hop {
    pub from: String,
    pub to: String,
    pub reason: RedirectReason,
    /// View displayed at `from` while the redirect happens, if any.
    pub shown: Option<View>,
}

/// The settled result of a navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    /// Location as requested, normalized.
    pub requested: String,
    pub hops: Vec<Hop>,
    /// Location the navigation settled on.
    pub location: String,
    pub view: View,
    /// Session generation this view was computed for.
    pub generation: u64,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        !self.hops.is_empty()
    }

    /// Views shown only for the duration of a redirect, in order.
    pub fn transient_views(&self) -> impl Iterator<Item = &View> {
        self.hops.iter().filter_map(|hop| hop.shown.as_ref())
    }

    pub fn href(&self) -> String {
        href(&self.location)
    }
}

enum Step {
    Render(View),
    Redirect {
        to: &'static str,
        reason: RedirectReason,
        shown: Option<View>,
    },
}

impl Step {
    /// The redirect `check_access` demands, if any.
    fn guarded(access: Access, user: Option<&User>) -> Option<Step> {
        match check_access(access, user) {
            GuardDecision::Allow => None,
            GuardDecision::Redirect { to, reason } => Some(Step::Redirect {
                to,
                reason,
                shown: None,
            }),
        }
    }
}

pub struct Site<S> {
    session: SessionManager<S>,
    pages: PageResolver<S>,
    history: History,
    max_redirects: usize,
    current: Navigation,
}

impl<S: KeyValueStore + Clone> Site<S> {
    /// Restore the persisted session and render `/`.
    pub async fn open(store: S, config: RouterConfig) -> StoreResult<Self> {
        Self::open_at(store, config, HOME_PATH).await
    }

    /// Restore the persisted session and render `location`, as when the site
    /// is loaded with a hash already in the address bar.
    pub async fn open_at(store: S, config: RouterConfig, location: &str) -> StoreResult<Self> {
        let session = SessionManager::initialize(store.clone()).await?;
        let start = normalize_location(location);

        let mut site = Self {
            session,
            pages: PageResolver::new(store),
            history: History::starting_at(start.clone(), config.history_limit),
            max_redirects: config.max_redirects,
            current: Navigation {
                requested: start.clone(),
                hops: Vec::new(),
                location: start,
                view: View::Home,
                generation: u64::MAX,
            },
        };
        site.render_current().await?;
        Ok(site)
    }

    pub fn current(&self) -> &Navigation {
        &self.current
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    pub fn pages(&self) -> &PageResolver<S> {
        &self.pages
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// True once the session has changed since the current view was built.
    pub fn is_stale(&self) -> bool {
        self.current.generation != self.session.generation()
    }

    /// Push `target` onto the history and render it.
    pub async fn navigate(&mut self, target: &str) -> StoreResult<&Navigation> {
        self.history.push(normalize_location(target));
        self.render_current().await
    }

    /// Go back one entry and re-run its guard. `None` at the start of history.
    pub async fn back(&mut self) -> StoreResult<Option<&Navigation>> {
        if !self.history.back() {
            return Ok(None);
        }
        self.render_current().await.map(Some)
    }

    /// Go forward one entry and re-run its guard. `None` at the end of history.
    pub async fn forward(&mut self) -> StoreResult<Option<&Navigation>> {
        if !self.history.forward() {
            return Ok(None);
        }
        self.render_current().await.map(Some)
    }

    /// The current view, recomputed first if the session changed underneath it.
    pub async fn render(&mut self) -> StoreResult<&Navigation> {
        if self.is_stale() {
            self.render_current().await?;
        }
        Ok(&self.current)
    }

    /// Sign `user` in and re-evaluate the current location.
    pub async fn login(&mut self, user: User) -> StoreResult<&Navigation> {
        self.session.login(user).await?;
        self.render_current().await
    }

    /// Profile edits persist through the same path as a login.
    pub async fn update_profile(&mut self, user: User) -> StoreResult<&Navigation> {
        self.login(user).await
    }

    /// Sign out and re-evaluate the current location.
    pub async fn logout(&mut self) -> StoreResult<&Navigation> {
        self.session.logout().await?;
        self.render_current().await
    }

    async fn render_current(&mut self) -> StoreResult<&Navigation> {
        let requested = self.history.current().to_string();
        let mut location = requested.clone();
        let mut hops: Vec<Hop> = Vec::new();

        let view = loop {
            match self.resolve(&location).await? {
                Step::Render(view) => break view,
                Step::Redirect { to, reason, shown } => {
                    if hops.len() >= self.max_redirects {
                        warn!(%requested, hops = hops.len(), "redirect limit reached, showing home");
                        if location != HOME_PATH {
                            self.history.push(HOME_PATH);
                        }
                        location = HOME_PATH.to_string();
                        break View::Home;
                    }

                    debug!(from = %location, to, ?reason, "redirecting");
                    self.history.push(to);
                    let from = std::mem::replace(&mut location, to.to_string());
                    hops.push(Hop {
                        from,
                        to: to.to_string(),
                        reason,
                        shown,
                    });
                }
            }
        };

        debug!(%requested, %location, view = view.title(), "navigation settled");
        self.current = Navigation {
            requested,
            hops,
            location,
            view,
            generation: self.session.generation(),
        };
        Ok(&self.current)
    }

    async fn resolve(&self, location: &str) -> StoreResult<Step> {
        let Some(route) = match_route(location) else {
            return Ok(Step::Redirect {
                to: HOME_PATH,
                reason: RedirectReason::UnknownRoute,
                shown: None,
            });
        };

        let user = self.session.current_user();
        if let Some(step) = Step::guarded(route.access(), user) {
            return Ok(step);
        }

        let view = match route.screen() {
            Screen::Home => View::Home,
            Screen::SmsZone => View::SmsZone,
            Screen::Stories => View::Stories,
            Screen::BdJobs => View::BdJobs,
            Screen::JobExam => View::JobExam,
            Screen::Login => View::Login,
            Screen::Register => View::Register,
            Screen::AdminDashboard => View::AdminDashboard,
            Screen::Profile => {
                // profile screens always need a session, whatever the table says
                let Some(user) = user else {
                    return Ok(Step::guarded(Access::Authenticated, None).unwrap_or(
                        Step::Redirect {
                            to: HOME_PATH,
                            reason: RedirectReason::UnknownRoute,
                            shown: None,
                        },
                    ));
                };
                View::Profile {
                    user: user.clone(),
                    username: route.param("username").map(str::to_string),
                }
            }
            Screen::DynamicPage => {
                let slug = route.param("slug").unwrap_or_default();
                match self.pages.resolve(slug).await? {
                    PageLookup::Found(page) => View::DynamicPage(page),
                    PageLookup::NotFound => {
                        return Ok(Step::Redirect {
                            to: HOME_PATH,
                            reason: RedirectReason::PageNotFound,
                            shown: Some(View::PageNotFound {
                                slug: slug.to_string(),
                            }),
                        })
                    }
                }
            }
        };

        Ok(Step::Render(view))
    }
}
