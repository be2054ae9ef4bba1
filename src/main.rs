use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use billed::config::Config;
use billed::containers::{BillsConfig, BillsController, NewBillConfig, NewBillController};
use billed::models::{ReceiptFile, User};
use billed::navigation::{HistoryNavigator, Navigator};
use billed::overlay::{ModalOverlay, Overlay};
use billed::page::RenderTarget;
use billed::session::{self, SessionStore, SqliteSessionStore, JWT_KEY};
use billed::store::{ApiStore, BillStore, MemoryStore};
use billed::views;
use billed::views::bills::BillsState;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "billed=info");
    }

    // Initialize logging to both console and file
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let file_appender = tracing_appender::rolling::never(".", "billed.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env()),
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    config.validate()?;

    let session: Arc<dyn SessionStore> = Arc::new(
        SqliteSessionStore::new(config.session_db_path_str())
            .await
            .context("Failed to open session store")?,
    );

    match &cli.command {
        Commands::Login {
            email,
            user_type,
            jwt,
        } => {
            let user = User {
                user_type: Commands::parse_user_type(user_type)?,
                email: email.clone(),
            };
            session::save_user(session.as_ref(), &user).await?;
            if let Some(token) = jwt {
                session.set_item(JWT_KEY, token).await?;
            }
            info!("Logged in as {}", email);
        }

        Commands::Bills { output } => {
            let store = build_store(&config, cli.demo, session.as_ref()).await?;
            let mut bills = bills_controller(&config, store)?;
            bills.initialize(None, None).await;

            if let BillsState::Error(message) = bills.state() {
                error!("Bill list failed: {}", message);
            }
            write_output(bills.target().html(), output.as_deref()).await?;
        }

        Commands::Form { output } => {
            let html = views::new_bill::render_empty().into_string();
            write_output(&html, output.as_deref()).await?;
        }

        Commands::NewBill { file, .. } => {
            let store = build_store(&config, cli.demo, session.as_ref()).await?;
            let navigator = Arc::new(HistoryNavigator::new());
            let mut new_bill = NewBillController::new(
                NewBillConfig::new(RenderTarget::new())
                    .with_store(store)
                    .with_navigator(navigator.clone())
                    .with_session(session.clone()),
            )?;

            let receipt = ReceiptFile::read(Path::new(file))
                .await
                .with_context(|| format!("Cannot read receipt: {}", file))?;
            new_bill.on_file_chosen(receipt)?;

            let form = cli
                .command
                .new_bill_form()
                .context("new-bill command carries form values")?;
            let bill = new_bill.on_submit(form).await?;
            info!("Created bill {} ({})", bill.id, bill.bill_type);

            if let Some(route) = navigator.current() {
                println!("{}", route);
            }
        }

        Commands::Preview { row } => {
            let store = build_store(&config, cli.demo, session.as_ref()).await?;
            let mut bills = bills_controller(&config, store)?;
            bills.initialize(None, None).await;
            if let BillsState::Error(message) = bills.state() {
                anyhow::bail!("Bill list failed: {}", message);
            }

            bills.on_view_receipt_requested(*row)?;
            println!("{}", bills.overlay().render().into_string());
        }
    }

    Ok(())
}

async fn build_store(
    config: &Config,
    demo: bool,
    session: &dyn SessionStore,
) -> Result<Arc<dyn BillStore>> {
    if demo {
        info!("Using sample bills");
        return Ok(Arc::new(MemoryStore::with_fixtures()));
    }

    let token = session.get_item(JWT_KEY).await?;
    Ok(Arc::new(ApiStore::new(config)?.with_token(token)))
}

fn bills_controller(config: &Config, store: Arc<dyn BillStore>) -> Result<BillsController> {
    let navigator: Arc<dyn Navigator> = Arc::new(HistoryNavigator::new());
    let bills_config = BillsConfig::new(RenderTarget::new())
        .with_navigator(navigator)
        .with_overlay(Box::new(ModalOverlay::new(config.overlay_width)))
        .with_store(store);
    Ok(BillsController::new(bills_config)?)
}

async fn write_output(html: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, html)
                .await
                .with_context(|| format!("Cannot write {}", path))?;
            info!("Wrote {}", path);
        }
        None => println!("{}", html),
    }
    Ok(())
}
