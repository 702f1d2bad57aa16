use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sitegate_config::load as load_config;
use sitegate_pages::{load_pages, save_pages, DynamicPage};
use sitegate_router::{Navigation, Site, View};
use sitegate_runtime::{telemetry, SiteServices};
use sitegate_store::SqliteStore;
use sitegate_users::{SessionManager, User};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser)]
#[command(name = "sitegate")]
#[command(about = "Sitegate content site (console by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive console (default)
    Console,
    /// Open the site at a location and print where it settles
    Navigate { path: String },
    /// Replace the stored page list with the JSON array in a file
    SeedPages { file: PathBuf },
    /// Print the stored page list
    DumpPages,
    /// Sign out whoever is persisted as the current user
    ClearSession,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;
    let services = SiteServices::initialise(&config)
        .await
        .context("failed to initialise site services")?;

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => run_console(&services).await,
        Commands::Navigate { path } => navigate_once(&services, &path).await,
        Commands::SeedPages { file } => seed_pages(&services, file).await,
        Commands::DumpPages => dump_pages(&services).await,
        Commands::ClearSession => clear_session(&services).await,
    }
}

async fn navigate_once(services: &SiteServices, path: &str) -> anyhow::Result<()> {
    let site = services.open_site(path).await?;
    print_navigation(site.current());
    Ok(())
}

async fn seed_pages(services: &SiteServices, file: PathBuf) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let pages: Vec<DynamicPage> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of pages", file.display()))?;

    save_pages(&services.store, &pages)
        .await
        .context("failed to write pages")?;

    info!(count = pages.len(), "pages seeded");
    println!("Stored {} pages:", pages.len());
    for page in &pages {
        println!("  {:<30} {}", page.path(), page.title);
    }
    Ok(())
}

async fn dump_pages(services: &SiteServices) -> anyhow::Result<()> {
    let pages = load_pages(&services.store)
        .await
        .context("failed to read pages")?;

    println!("=== PAGES ===");
    if pages.is_empty() {
        println!("No pages stored");
        return Ok(());
    }

    println!("Found {} pages:", pages.len());
    println!("{:<30} {:<30} {:<50}", "Path", "Title", "Content (truncated)");
    println!("{}", "-".repeat(110));
    for page in pages {
        println!(
            "{:<30} {:<30} {:<50}",
            page.path(),
            page.title,
            truncate(&page.content, 47)
        );
    }
    Ok(())
}

async fn clear_session(services: &SiteServices) -> anyhow::Result<()> {
    let mut session = SessionManager::initialize(services.store.clone())
        .await
        .context("failed to read session")?;

    let previous = session.current_user().map(|user| user.username.clone());
    // remove the key even when nothing decoded; a malformed record reads as no session
    session.logout().await.context("failed to clear session")?;

    match previous {
        Some(username) => println!("Signed out {username}"),
        None => println!("No session stored"),
    }
    Ok(())
}

async fn run_console(services: &SiteServices) -> anyhow::Result<()> {
    info!("starting interactive console");

    let mut site = services.open_site("/").await?;

    println!("Sitegate Interactive Console");
    println!("Type 'help' for commands, 'quit' to exit");
    println!("---");
    print_navigation(site.current());

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        print!("{}> ", site.current().href());
        std::io::Write::flush(&mut std::io::stdout())?;

        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let (command, argument) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "help" | "h" => print_help(),
            "go" | "g" => {
                if argument.is_empty() {
                    println!("Usage: go <path>");
                    continue;
                }
                print_navigation(site.navigate(argument).await?);
            }
            "back" | "b" => match site.back().await? {
                Some(nav) => print_navigation(nav),
                None => println!("Already at the start of history"),
            },
            "forward" | "f" => match site.forward().await? {
                Some(nav) => print_navigation(nav),
                None => println!("Already at the end of history"),
            },
            "login" => match serde_json::from_str::<User>(argument) {
                Ok(user) => print_navigation(site.login(user).await?),
                Err(error) => println!("Not a user record: {error}"),
            },
            "logout" => print_navigation(site.logout().await?),
            "whoami" | "w" => print_session(&site),
            "history" => {
                let position = site.history().position();
                for (index, entry) in site.history().entries().enumerate() {
                    let marker = if index == position { "*" } else { " " };
                    println!(" {marker} {entry}");
                }
            }
            _ => {
                println!("Unknown command: {command}");
                println!("Type 'help' for available commands");
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("Available commands:");
    println!("  go <path>, g       - Navigate to a path or #/hash location");
    println!("  back, b            - Go back one history entry");
    println!("  forward, f         - Go forward one history entry");
    println!("  login <json>       - Sign in with a user record");
    println!("  logout             - Sign out");
    println!("  whoami, w          - Show the signed-in user");
    println!("  history            - Show the history stack");
    println!("  quit, exit, q      - Exit console");
}

fn print_session(site: &Site<SqliteStore>) {
    match site.current_user() {
        Some(user) => println!(
            "{} (@{}, {})",
            user.display_name_or_fallback(),
            user.username,
            user.role
        ),
        None => println!("Not signed in"),
    }
}

fn print_navigation(nav: &Navigation) {
    for hop in &nav.hops {
        if let Some(view) = &hop.shown {
            println!("  [{}] {}", hop.from, describe(view));
        }
        println!("  {} -> {} ({:?})", hop.from, hop.to, hop.reason);
    }
    println!("{} | {}", nav.href(), describe(&nav.view));
}

fn describe(view: &View) -> String {
    match view {
        View::Profile { user, username } => match username {
            Some(username) => format!("Profile of @{username} (viewing as @{})", user.username),
            None => format!("Profile of @{}", user.username),
        },
        View::DynamicPage(page) => format!("{}: {}", page.title, truncate(&page.content, 60)),
        View::PageNotFound { slug } => format!("404: no page \"{slug}\""),
        other => other.title().to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
