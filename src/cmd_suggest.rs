//! One-shot suggestion command.

use replykit::ReplykitError;
use replykit::ai::GenerationJob;
use replykit::ai::worker::generate_blocking;
use replykit::chat::{Message, Role, extract::extract_text};
use replykit::settings::SettingsStore;

/// Generate replies for `message` and print them, one per line
pub(crate) fn handle_suggest_command(
    message: &str,
    context: &[String],
    mut store: SettingsStore,
) -> Result<(), ReplykitError> {
    let settings = store.load_checked()?;
    let message = extract_text(message)
        .ok_or_else(|| ReplykitError::InvalidEvent("message has no visible text".to_string()))?;

    let mut history: Vec<Message> = context.iter().filter_map(|line| parse_context_line(line)).collect();
    history.push(Message::client(message.clone()));
    let start = history.len().saturating_sub(settings.context_messages);

    let job = GenerationJob {
        message,
        context: history.split_off(start),
        settings,
    };
    let (set, usage) = generate_blocking(&job)?;

    if let Some(usage) = usage {
        log::info!(
            "Tokens used: {} prompt, {} completion",
            usage.prompt_tokens,
            usage.completion_tokens
        );
    }
    if set.fallback {
        eprintln!("Model reply was unreadable; showing canned replies");
    }
    for (i, suggestion) in set.items.iter().enumerate() {
        println!("{}. {}: {}", i + 1, suggestion.label(), suggestion.text);
    }
    Ok(())
}

/// `client: text` or `operator: text`; unprefixed lines are the customer's
fn parse_context_line(line: &str) -> Option<Message> {
    let (role, text) = match line.split_once(':') {
        Some((prefix, rest)) => match prefix.trim().to_ascii_lowercase().as_str() {
            "client" => (Role::Client, rest),
            "operator" | "manager" | "agent" => (Role::Operator, rest),
            _ => (Role::Client, line),
        },
        None => (Role::Client, line),
    };
    extract_text(text).map(|text| Message { role, text })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_context_line_prefixes() {
        assert_eq!(
            parse_context_line("operator: Hello, how can I help?"),
            Some(Message::operator("Hello, how can I help?"))
        );
        assert_eq!(
            parse_context_line("Client: Is it in stock?"),
            Some(Message::client("Is it in stock?"))
        );
        assert_eq!(
            parse_context_line("Manager:  one sec "),
            Some(Message::operator("one sec"))
        );
    }

    #[test]
    fn test_parse_context_line_without_prefix_is_client() {
        assert_eq!(
            parse_context_line("price: 20 dollars?"),
            Some(Message::client("price: 20 dollars?"))
        );
        assert_eq!(parse_context_line("operator:   "), None);
    }
}
