//! Prompt templates for reply generation
//!
//! Builds the system and user messages sent to the chat-completion API.

use super::provider::ChatMessage;
use crate::chat::Message;

/// System message framing the assistant's role
pub const SYSTEM_PROMPT: &str = "You are an assistant for a customer support operator. \
Write three candidate replies to the customer's latest message.";

const BASE_INSTRUCTIONS: &str = "\
You help a support operator answer customers in a live chat. Analyse the customer's \
messages and propose three reply options for the operator to choose from. Replies must \
be clear, helpful and match the customer's tone.

Tone:
- Friendly and professional.
- Mirror the customer's style: formal when they are formal, simpler when they are casual.
- Answer short questions briefly; give detail when the customer asks for it.
";

const OUTPUT_INSTRUCTIONS: &str = r#"Write 3 reply options:
1. Short and to the point (1-2 sentences)
2. Detailed with extra information (2-4 sentences)
3. Friendly with a recommendation (2-3 sentences)

IMPORTANT: return ONLY JSON in this format:
{
  "variant1": "short reply text",
  "variant2": "detailed reply text",
  "variant3": "friendly reply text"
}

No other text, only JSON!"#;

/// Build the user prompt for a customer message
///
/// `context` is the recent conversation, oldest first. A blank
/// `custom_prompt` adds nothing.
pub fn build_prompt(client_message: &str, context: &[Message], custom_prompt: &str) -> String {
    let mut prompt = String::from(BASE_INSTRUCTIONS);

    let custom_prompt = custom_prompt.trim();
    if !custom_prompt.is_empty() {
        prompt.push_str(&format!("\nAdditional instructions: {}\n", custom_prompt));
    }

    if !context.is_empty() {
        prompt.push_str("\nConversation so far:\n");
        for message in context {
            prompt.push_str(&format!("{}: {}\n", message.role.speaker(), message.text));
        }
    }

    prompt.push_str(&format!(
        "\nLatest customer message: \"{}\"\n\n",
        client_message
    ));
    prompt.push_str(OUTPUT_INSTRUCTIONS);
    prompt
}

/// Build the full `messages` array: system framing plus the user prompt
pub fn build_messages(
    client_message: &str,
    context: &[Message],
    custom_prompt: &str,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_prompt(client_message, context, custom_prompt)),
    ]
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod prompt_tests;
