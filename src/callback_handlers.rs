use super::*;
use crate::helpers::{resolution_text, resolve_delete, DeleteResolution};

pub(super) async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: std::sync::Arc<AppState>,
) -> Result<()> {
    if !state.config.allowed_user_ids.contains(&q.from.id.0) {
        return Ok(());
    }

    let Some(data) = q.data.as_deref() else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    let payload = match serde_json::from_str::<CallbackPayload>(data) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("rejecting callback payload {:?}: {}", data, err);
            bot.answer_callback_query(q.id).await?;
            return Ok(());
        }
    };

    match payload {
        CallbackPayload::Del { option, idx } => {
            handle_delete_callback(&bot, &q, &state, &option, idx).await?;
        }
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}

async fn handle_delete_callback(
    bot: &Bot,
    q: &CallbackQuery,
    state: &std::sync::Arc<AppState>,
    option: &str,
    idx: usize,
) -> Result<()> {
    let resolution = {
        let mut items = state.items.lock().await;
        resolve_delete(&mut items, option, idx)
    };

    if matches!(resolution, DeleteResolution::Missing) {
        warn!("delete confirmation for index {} arrived after the list shrank", idx);
    }

    let Some(message) = q.message.clone() else {
        return Ok(());
    };

    // Edit the confirmation message in place; dropping the reply markup also
    // removes the buttons.
    let previous = message.text().unwrap_or_default();
    bot.edit_message_text(
        message.chat.id,
        message.id,
        resolution_text(previous, option, &resolution),
    )
    .parse_mode(ParseMode::Html)
    .await?;
    Ok(())
}
