use anyhow::{Context, Result};
use sitegate_config::AppConfig;
use sitegate_router::Site;
use sitegate_store::{open_store, SqliteStore};
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    /// Install the global subscriber. Output goes to stderr so the console's
    /// own stdout stays readable.
    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::INFO)
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Everything a running site needs, built from configuration.
#[derive(Clone)]
pub struct SiteServices {
    pub store: SqliteStore,
    pub config: AppConfig,
}

impl SiteServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let store = open_store(&config.store)
            .await
            .with_context(|| format!("failed to open store {}", config.store.url))?;

        info!(url = %config.store.url, "site store ready");

        Ok(Self {
            store,
            config: config.clone(),
        })
    }

    /// Open the site at `location`, restoring any persisted session.
    pub async fn open_site(&self, location: &str) -> Result<Site<SqliteStore>> {
        let site = Site::open_at(self.store.clone(), self.config.router.clone(), location)
            .await
            .context("failed to open site")?;

        match site.current_user() {
            Some(user) => info!(user = %user.username, location = %site.current().location, "site opened"),
            None => info!(location = %site.current().location, "site opened anonymously"),
        }
        Ok(site)
    }
}
