//! mail3-reader - preview a Mail3 message from the terminal
//!
//! Loads one message through the preview controller, prints it, and
//! optionally replies to, forwards or deletes it.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use mail3::{
    ClientConfig, DeleteOutcome, LoadState, MailApiClient, MessageId, MessagePreview,
    PreviewController,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Handle;

mod navigator;

use navigator::LogNavigator;

#[derive(Parser)]
#[command(name = "mail3-reader", about = "Preview a Mail3 message from the terminal")]
struct Cli {
    /// Message id to open
    message_id: String,

    /// Action to run once the message has loaded
    #[arg(value_enum)]
    action: Option<Action>,

    /// Print the preview as JSON
    #[arg(long)]
    json: bool,

    /// Client config file (defaults to ~/.config/mail3/client.json)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Action {
    Reply,
    Forward,
    Delete,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let client_config = load_client_config(cli.config.as_deref())?;
    info!("Using mailbox {}", client_config.address);

    let api = Arc::new(MailApiClient::new(&client_config));
    let navigator = Arc::new(LogNavigator::default());
    let controller = PreviewController::with_date_format(
        api,
        Arc::clone(&navigator),
        Handle::current(),
        client_config.date_format.clone(),
    );

    controller.set_message_id(Some(MessageId::new(cli.message_id)));
    let snapshot = {
        let mut rx = controller.subscribe();
        let snapshot = rx
            .wait_for(|s| s.state.is_settled())
            .await
            .context("Preview controller closed")?;
        (*snapshot).clone()
    };

    if let LoadState::Failed(e) = snapshot.state {
        return Err(e.into());
    }
    let preview = snapshot
        .preview
        .context("Message loaded without a preview")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        print_preview(&preview);
    }

    controller.flush_seen_flag().await;

    match cli.action {
        Some(Action::Reply) => {
            controller.reply();
        }
        Some(Action::Forward) => {
            controller.forward();
        }
        Some(Action::Delete) => match controller.delete().await {
            Ok(DeleteOutcome::Deleted) => info!("Message deleted"),
            Ok(outcome) => warn!("Delete not sent: {:?}", outcome),
            Err(e) => {
                error!("{}", e);
                return Err(e.into());
            }
        },
        None => {}
    }

    for entry in navigator.history() {
        println!("-> {}", entry);
    }
    Ok(())
}

fn load_client_config(path: Option<&std::path::Path>) -> Result<ClientConfig> {
    if let Some(path) = path {
        return ClientConfig::from_file(path);
    }

    ClientConfig::load().inspect_err(|_| {
        if let Some(path) = ClientConfig::default_config_path() {
            warn!(
                "To configure Mail3 access, either:\n\
                 1. Write your client settings to: {}\n\
                 2. Or set environment variables: MAIL3_SERVER_URL, MAIL3_ADDRESS and MAIL3_SESSION_TOKEN",
                path.display()
            );
        }
    })
}

fn print_preview(preview: &MessagePreview) {
    println!("Subject: {}", preview.subject);
    println!("From:    {}", preview.from.display());
    println!("To:      {}", preview.recipients_line());
    println!("Date:    {}", preview.date);
    println!();
    println!("{}", preview.body_html);
}
