use super::*;

pub(super) fn parse_command(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    if !first.starts_with('/') {
        return None;
    }
    let cmd = first.trim_start_matches('/');
    Some(cmd.split('@').next().unwrap_or(cmd))
}

#[derive(Debug)]
pub(super) enum DeleteArgError {
    EmptyList,
    NoArgs,
    TooManyArgs,
    NotAnIndex(String),
    OutOfRange { idx: usize, len: usize },
}

impl DeleteArgError {
    pub(super) fn reply_text(&self) -> String {
        match self {
            DeleteArgError::EmptyList => "No item in the list".to_string(),
            DeleteArgError::NoArgs => {
                "No arguments. You need to specify the index of the list.".to_string()
            }
            DeleteArgError::TooManyArgs => {
                "Too many arguments. You need to specify the index of the list.".to_string()
            }
            DeleteArgError::NotAnIndex(arg) => {
                format!("'{}' is not a valid index. Use a non-negative number.", arg)
            }
            DeleteArgError::OutOfRange { idx, len } => format!(
                "Index {} is out of range. Valid indices are 0 to {}.",
                idx,
                len - 1
            ),
        }
    }
}

// The empty-list check precedes the argument checks.
pub(super) fn validate_delete_request(
    args: &[&str],
    items: &[String],
) -> Result<(usize, String), DeleteArgError> {
    if items.is_empty() {
        return Err(DeleteArgError::EmptyList);
    }
    if args.is_empty() {
        return Err(DeleteArgError::NoArgs);
    }
    if args.len() > 1 {
        return Err(DeleteArgError::TooManyArgs);
    }
    let raw = args[0];
    let idx: usize = raw
        .parse()
        .map_err(|_| DeleteArgError::NotAnIndex(raw.to_string()))?;
    match items.get(idx) {
        Some(item) => Ok((idx, item.clone())),
        None => Err(DeleteArgError::OutOfRange {
            idx,
            len: items.len(),
        }),
    }
}

#[derive(Debug)]
pub(super) enum DeleteResolution {
    Removed,
    Cancelled,
    Missing,
}

impl DeleteResolution {
    pub(super) fn result_line(&self) -> &'static str {
        match self {
            DeleteResolution::Removed => "Successfully removed from the list!",
            DeleteResolution::Cancelled => "Operation cancelled.",
            DeleteResolution::Missing => "This item no longer exists; nothing was removed.",
        }
    }
}

pub(super) fn resolve_delete(
    items: &mut Vec<String>,
    option: &str,
    idx: usize,
) -> DeleteResolution {
    if option != "Yes" {
        return DeleteResolution::Cancelled;
    }
    // The index was valid when the buttons were issued; the list may have
    // shrunk since.
    if idx >= items.len() {
        return DeleteResolution::Missing;
    }
    items.remove(idx);
    DeleteResolution::Removed
}

pub(super) fn format_list_lines(items: &[String]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| format!("{}: {}", idx, item))
        .collect()
}

pub(super) fn appended_reply(text: &str, idx: usize) -> String {
    format!("'{}' added to the list at index {}", text, idx)
}

pub(super) fn confirmation_text(item: &str) -> String {
    format!(
        "<b>Are you sure you want to remove this?</b>\n\n{}",
        html::escape(item)
    )
}

pub(super) fn resolution_text(
    previous: &str,
    option: &str,
    resolution: &DeleteResolution,
) -> String {
    format!(
        "{}\n\n<b>Selected option: {}</b>\n\n{}",
        html::escape(previous),
        html::escape(option),
        resolution.result_line()
    )
}

pub(super) fn encode_callback(payload: &CallbackPayload) -> Result<String> {
    let data = serde_json::to_string(payload).context("serialize callback payload")?;
    if data.len() > CALLBACK_DATA_LIMIT {
        return Err(anyhow!(
            "callback payload is {} bytes, limit is {}",
            data.len(),
            CALLBACK_DATA_LIMIT
        ));
    }
    Ok(data)
}

pub(super) fn build_confirm_keyboard(idx: usize) -> Result<InlineKeyboardMarkup> {
    let mut row = Vec::new();
    for option in ["Yes", "No"] {
        let payload = CallbackPayload::Del {
            option: option.to_string(),
            idx,
        };
        row.push(InlineKeyboardButton::callback(
            option,
            encode_callback(&payload)?,
        ));
    }
    Ok(InlineKeyboardMarkup::new(vec![row]))
}
