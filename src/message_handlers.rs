use super::*;
use crate::helpers::{
    appended_reply, build_confirm_keyboard, confirmation_text, format_list_lines, parse_command,
    validate_delete_request,
};

pub(super) async fn handle_message(
    bot: Bot,
    msg: Message,
    state: std::sync::Arc<AppState>,
) -> Result<()> {
    let user_id = match msg.from() {
        Some(user) => user.id.0,
        None => return Ok(()),
    };

    if !state.config.allowed_user_ids.contains(&user_id) {
        return Ok(());
    }

    let text = match msg.text() {
        Some(text) => text.to_string(),
        None => return Ok(()),
    };

    if let Some(cmd) = parse_command(&text) {
        match cmd {
            "start" | "help" => {
                bot.send_message(msg.chat.id, HELP_TEXT)
                    .parse_mode(ParseMode::Html)
                    .await?;
                return Ok(());
            }
            "list" => {
                handle_list_command(bot, msg, state).await?;
                return Ok(());
            }
            "del" => {
                let args: Vec<&str> = text.split_whitespace().skip(1).collect();
                handle_delete_command(bot, msg, state, &args).await?;
                return Ok(());
            }
            _ => {
                // Unknown command, fall through as text.
            }
        }
    }

    handle_append(bot, msg.chat.id, state, &text).await?;
    Ok(())
}

async fn handle_list_command(
    bot: Bot,
    msg: Message,
    state: std::sync::Arc<AppState>,
) -> Result<()> {
    let lines = {
        let items = state.items.lock().await;
        format_list_lines(&items)
    };

    if lines.is_empty() {
        bot.send_message(msg.chat.id, "No items in the list.").await?;
        return Ok(());
    }

    // One message per item, in index order.
    for line in lines {
        bot.send_message(msg.chat.id, line).await?;
    }
    Ok(())
}

async fn handle_delete_command(
    bot: Bot,
    msg: Message,
    state: std::sync::Arc<AppState>,
    args: &[&str],
) -> Result<()> {
    let request = {
        let items = state.items.lock().await;
        validate_delete_request(args, &items)
    };

    let (idx, item) = match request {
        Ok(pair) => pair,
        Err(err) => {
            bot.send_message(msg.chat.id, err.reply_text()).await?;
            return Ok(());
        }
    };

    let kb = build_confirm_keyboard(idx)?;
    bot.send_message(msg.chat.id, confirmation_text(&item))
        .parse_mode(ParseMode::Html)
        .reply_markup(kb)
        .await?;
    Ok(())
}

async fn handle_append(
    bot: Bot,
    chat_id: ChatId,
    state: std::sync::Arc<AppState>,
    text: &str,
) -> Result<()> {
    let idx = {
        let mut items = state.items.lock().await;
        items.push(text.to_string());
        items.len() - 1
    };
    bot.send_message(chat_id, appended_reply(text, idx)).await?;
    Ok(())
}
