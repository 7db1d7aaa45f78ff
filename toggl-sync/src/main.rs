mod cli;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use toggl_sync::api::{DevBackend, TimeTrackingApi, TogglApi, DEV_PASSWORD, DEV_USERNAME};
use toggl_sync::app::{App, InputField};
use toggl_sync::config::TogglConfig;
use toggl_sync::session_store::{FileStore, KeyValueStore, MemoryStore};
use toggl_sync::{render, time_utils};

use crate::cli::{Cli, Commands};

// The app is driven from a single task.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let mut app = real_app()?;
            if let Err(e) = app.start().await {
                eprintln!("Sync failed: {}", e);
            }
            print_view(&app);
        }
        Commands::Login => {
            let mut app = real_app()?;
            prompt_credentials(&mut app)?;
            match app.submit_login().await {
                Ok(()) => {
                    if let Some(wid) = app.session().workspace_id {
                        println!("Logged in. Workspace {}.\n", wid);
                    }
                }
                Err(e) => eprintln!("Error: {}", e),
            }
            print_view(&app);
        }
        Commands::Dev => {
            let api: Arc<dyn TimeTrackingApi> = Arc::new(DevBackend::new());
            let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
            let mut app = App::new(api, store);
            app.on_input_change(InputField::Username, DEV_USERNAME);
            app.on_input_change(InputField::Password, DEV_PASSWORD);
            app.submit_login().await.context("Dev login failed")?;
            print_view(&app);
        }
        Commands::ConfigPath => {
            let path = TogglConfig::config_path()?;
            if !path.exists() {
                TogglConfig::default().save()?;
                println!("Created default config at: {}", path.display());
            } else {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("toggl_sync=info,toggl=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn real_app() -> Result<App> {
    let config = TogglConfig::load()?;
    tracing::debug!(api_url = %config.api_url, "Loaded config");
    let api: Arc<dyn TimeTrackingApi> = Arc::new(TogglApi::new(&config.api_url)?);
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open_default()?);
    Ok(App::new(api, store))
}

fn prompt_credentials(app: &mut App) -> Result<()> {
    print!("Username: ");
    io::stdout().flush()?;
    let mut username = String::new();
    io::stdin()
        .read_line(&mut username)
        .context("Failed to read username")?;
    app.on_input_change(InputField::Username, username.trim());

    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    app.on_input_change(InputField::Password, password);
    Ok(())
}

fn print_view(app: &App) {
    print!(
        "{}",
        render::render(&app.view_model(), time_utils::local_offset())
    );
}
