use serde_json::Value;

/// Extract the reply text from an arbitrary `/api/chat` JSON body.
///
/// Order of preference:
/// 1. `message.content`
/// 2. every `messages[].content` joined with newlines (missing content is empty)
/// 3. the whole body rendered as a JSON string
pub fn extract_reply(body: &Value) -> String {
    if let Some(content) = body
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
    {
        return content.to_string();
    }

    if let Some(messages) = body.get("messages").and_then(Value::as_array) {
        return messages
            .iter()
            .map(|message| message.get("content").and_then(Value::as_str).unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n");
    }

    body.to_string()
}
