//! Single-step tool planning with a language model.
//!
//! The model is asked for one JSON object choosing either a tool call or a
//! direct answer. After a tool runs, a second prompt asks it to summarize
//! the result for the user.

use serde::Serialize;
use serde_json::{Value, json};

use super::backend::ToolSchema;
use crate::ollama::ChatMessage;

const PLANNER_TEMPLATE: &str = include_str!("../../prompts/planner.txt");

const REFLECT_PROMPT: &str = "Summarize the tool result concisely for the user. \
Use only facts present in the result. Markdown is allowed.";

/// Longest slice of unparseable model output echoed back to the user
const ECHO_LIMIT: usize = 400;

/// What the model decided to do with a user message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    CallTool {
        tool_name: String,
        args: Value,
        reason: Option<String>,
    },
    Final(String),
}

/// Messages asking the model to plan one step
pub fn plan_messages(tools: &[ToolSchema], user_message: &str) -> Vec<ChatMessage> {
    let connected_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let system = PLANNER_TEMPLATE.replace("{connected_at}", &connected_at);
    let tools_json = serde_json::to_string_pretty(tools).unwrap_or_else(|_| "[]".to_string());

    vec![
        ChatMessage::system(system),
        ChatMessage::user(format!(
            "TOOLS:\n{}\n\nUSER:\n{}\nReturn ONLY one JSON object.",
            tools_json, user_message
        )),
    ]
}

/// Messages asking the model to summarize a tool result
pub fn reflect_messages(
    user_message: &str,
    tool_name: &str,
    args: &Value,
    result: &Value,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(REFLECT_PROMPT),
        ChatMessage::user(format!(
            "USER: {}\n\nTOOL: {}\nARGS: {}\nRESULT: {}",
            user_message, tool_name, args, result
        )),
    ]
}

/// Interpret the model's planning reply.
///
/// Never fails: output that is not a plan becomes a `Final` explaining why.
pub fn parse_plan(reply: &str) -> Plan {
    let Some(value) = extract_object(reply) else {
        let echo: String = reply.trim().chars().take(ECHO_LIMIT).collect();
        return Plan::Final(format!("Could not parse model JSON: {}", echo));
    };

    if let Some(answer) = value.get("final") {
        return Plan::Final(match answer {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        });
    }

    match value.get("tool_name").and_then(Value::as_str).map(str::trim) {
        Some(name) if !name.is_empty() => {
            let args = match value.get("args") {
                Some(Value::Object(map)) => Value::Object(map.clone()),
                _ => json!({}),
            };
            Plan::CallTool {
                tool_name: name.to_string(),
                args,
                reason: value
                    .get("reason")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }
        }
        _ => Plan::Final(
            "Planner did not choose a tool. Provide missing parameters and try again.".to_string(),
        ),
    }
}

/// First JSON object in the reply, tolerating code fences and chatter
fn extract_object(reply: &str) -> Option<serde_json::Map<String, Value>> {
    if let Ok(Value::Object(map)) = serde_json::from_str(reply.trim()) {
        return Some(map);
    }
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str(&reply[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
