use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};
use teloxide::utils::html;
use tokio::sync::Mutex;

mod callback_handlers;
mod helpers;
mod message_handlers;

use callback_handlers::handle_callback;
use message_handlers::handle_message;

// Telegram rejects callback_data longer than this.
const CALLBACK_DATA_LIMIT: usize = 64;

const HELP_TEXT: &str = "<b>Simple list bot</b>\n\
Available commands:\n\n\
/help\n\
Show this help\n\n\
/list\n\
List all items\n\n\
/del id\n\
Delete item at index id\n\n\
Send any message without / prefix to append a string to the list.";

#[derive(Debug, Deserialize, Clone)]
struct Config {
    token: String,
    allowed_user_ids: Vec<u64>,
    #[serde(default)]
    initial_items: Vec<String>,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    config: PathBuf,
}

struct AppState {
    config: Config,
    items: Mutex<Vec<String>>,
}

// Inline button payload, round-tripped through Telegram as compact JSON.
// Unknown `command` tags fail to decode and are rejected by the callback
// handler.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "command", rename_all = "lowercase")]
enum CallbackPayload {
    Del { option: String, idx: usize },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = load_config(&args.config)?;

    let state = AppState {
        items: Mutex::new(config.initial_items.clone()),
        config,
    };
    let state = std::sync::Arc::new(state);

    let bot = Bot::new(state.config.token.clone());

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    info!("Listening...");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "update handler failed",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config: Config = toml::from_str(&contents).context("parse config")?;
    Ok(config)
}
