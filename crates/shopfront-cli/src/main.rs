//! shopfront - storefront client for the terminal.
//!
//! Drives the session store from the command line: sign in, manage the cart
//! and check out. Each command prints the notice the storefront would pop up
//! and the page it would navigate to.

mod cli;
mod render;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use shopfront_core::{Action, CartItem, Config, Feedback, LoginForm, SessionStore};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{CartCommand, Cli, Command, ShopCommand};

/// Log file name inside the data directory
const LOG_FILE: &str = "shopfront.log";

/// Initialize the tracing subscriber for logging.
/// Returns the file writer guard, which must live until exit.
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match Config::data_dir() {
        Ok(dir) if std::fs::create_dir_all(&dir).is_ok() => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing();

    let mut config = Config::load().context("Failed to load configuration")?;

    let command = match cli.command {
        Command::Config { set_api } => return show_config(&mut config, set_api),
        Command::Shop(command) => command,
    };

    let api = config.api_client()?;
    info!(base_url = %api.transport().base_url(), "shopfront starting");
    let mut store = SessionStore::new(api, config.token_store()?);

    run(&mut store, command).await
}

async fn run(store: &mut SessionStore, command: ShopCommand) -> Result<()> {
    match command {
        ShopCommand::Login { account, password } => {
            let password = match password {
                Some(password) => password,
                None => rpassword::prompt_password("Password: ")?,
            };
            let result = store.login(&LoginForm::new(account, password)).await;
            render::feedback(&Feedback::for_result(Action::Login, &result));
        }
        ShopCommand::Logout => {
            let result = store.logout().await;
            render::feedback(&Feedback::for_result(Action::Logout, &result));
        }
        ShopCommand::Whoami => {
            let result = store.get_user().await;
            render::feedback(&Feedback::for_result(Action::GetUser, &result));
            render::session(store.session());
        }
        ShopCommand::Cart(CartCommand::Add { product, quantity }) => {
            let result = store.add_cart(&CartItem::new(product, quantity)).await;
            render::feedback(&Feedback::for_result(Action::AddCart, &result));
            if let Ok(cart) = result {
                println!("Cart: {} item(s)", cart);
            }
        }
        ShopCommand::Cart(CartCommand::Update { product, quantity }) => {
            let result = store.update_cart(&CartItem::new(product, quantity)).await;
            render::feedback(&Feedback::for_result(Action::UpdateCart, &result));
            println!("Updated: {}", result.is_ok());
        }
        ShopCommand::Checkout => {
            let result = store.checkout().await;
            render::feedback(&Feedback::for_result(Action::Checkout, &result));
        }
    }
    Ok(())
}

fn show_config(config: &mut Config, set_api: Option<String>) -> Result<()> {
    if let Some(url) = set_api {
        config.api_base_url = Some(url);
        config.save().context("Failed to save configuration")?;
        println!("Saved {}", Config::config_path()?.display());
    }

    println!("Config file:   {}", Config::config_path()?.display());
    match config.base_url() {
        Ok(url) => println!("API base URL:  {}", url),
        Err(e) => println!("API base URL:  (unset) {}", e),
    }
    println!("Token store:   {:?}", config.token_store);
    println!("Timeout:       {}s", config.request_timeout_secs);
    Ok(())
}
