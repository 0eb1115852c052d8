// Interactive AutoStylist shell
use std::io::{stdout, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use autostylist_core::config::TokenStoreKind;
use autostylist_core::session::build_token_store;
use autostylist_core::{ApiClient, AuthEvent, ClientConfig, Session};
use autostylist_tui::{commands::dispatch, TuiModule};

#[derive(Parser, Debug, Clone)]
#[command(name = "autostylist")]
#[command(author, version, about = "AutoStylist - wardrobe and outfit recommendation client")]
struct Args {
    /// Backend root, e.g. http://localhost:8000
    #[arg(long)]
    base_url: Option<String>,

    /// Where to keep the login token: keyring, file or memory
    #[arg(long)]
    token_store: Option<TokenStoreKind>,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Require login for uploads
    #[arg(long)]
    upload_auth: Option<bool>,

    /// Require login for recommendations and context
    #[arg(long)]
    recommend_auth: Option<bool>,

    /// Require login for wardrobe listings
    #[arg(long)]
    wardrobe_auth: Option<bool>,
}

impl Args {
    fn apply(&self, cfg: &mut ClientConfig) -> anyhow::Result<()> {
        if let Some(url) = &self.base_url {
            cfg.set_base_url(url).context("invalid --base-url")?;
        }
        if let Some(kind) = self.token_store {
            cfg.token_store = kind;
        }
        if let Some(secs) = self.timeout_secs {
            cfg.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(v) = self.upload_auth {
            cfg.auth_policy.upload = v;
        }
        if let Some(v) = self.recommend_auth {
            cfg.auth_policy.recommend = v;
        }
        if let Some(v) = self.wardrobe_auth {
            cfg.auth_policy.wardrobe = v;
        }
        Ok(())
    }
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("autostylist=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {e}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = ClientConfig::from_env().context("reading AUTOSTYLIST_* settings")?;
    args.apply(&mut config)?;
    info!("AutoStylist starting. backend={}, token_store={}", config.base_url(), config.token_store);

    let store = build_token_store(config.token_store)?;
    let session = Arc::new(Session::new(store, Default::default()));
    let client = Arc::new(ApiClient::new(config)?);
    let tui = TuiModule::new(client, session.clone());

    // Log every auth transition.
    let mut events = session.subscribe().await;
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match &event {
                AuthEvent::LoggedIn { fingerprint } => info!("{}: {fingerprint}", event.event_type()),
                AuthEvent::LoggedOut { reason } => info!("{}: {reason:?}", event.event_type()),
            }
        }
    });

    match tui.account.restore().await {
        Ok(Some(user)) => println!("Welcome back, {}.", user.full_name),
        Ok(None) => {}
        Err(e) => error!("Could not restore previous session: {e}"),
    }

    println!("AutoStylist. Type 'help' for available commands.\n");

    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", tui.prompt_string());
        stdout().flush()?;

        let line = match reader.next_line().await? {
            Some(line) => line.trim().to_string(),
            None => break,
        };

        let (quit_requested, output) = dispatch(&line, &tui).await;
        if let Some(msg) = output {
            println!("{}", msg.trim_end());
        }
        if quit_requested {
            break;
        }
    }

    session.events().shutdown();
    info!("Goodbye!");
    Ok(())
}
