//! Utility tool implementations.

use serde_json::{Value, json};

use super::ToolOutput;
use super::args::{self, NoArgs, ToolSearchArgs};
use super::tool_search::TOOL_SEARCH_INDEX;
use crate::error::ToolResult;

const DEFAULT_SEARCH_LIMIT: usize = 5;
const MAX_SEARCH_LIMIT: usize = 10;

pub(super) fn execute_date(arguments: Value) -> ToolResult<ToolOutput> {
    let _: NoArgs = args::parse("date", arguments)?;
    Ok(ToolOutput::Text(
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    ))
}

pub(super) fn execute_tool_search(arguments: Value) -> ToolResult<ToolOutput> {
    let args: ToolSearchArgs = args::parse("tool_search", arguments)?;
    args::require_non_empty("query", &args.query)?;
    let limit = args
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    let results = TOOL_SEARCH_INDEX.search(&args.query, limit);
    Ok(ToolOutput::Json(json!(results)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;

    #[test]
    fn test_date_format() {
        let ToolOutput::Text(text) = execute_date(Value::Null).unwrap() else {
            panic!("date returns text");
        };
        assert!(chrono::NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_tool_search_limit_capped() {
        let ToolOutput::Json(value) =
            execute_tool_search(json!({"query": "game team player stats", "limit": 50})).unwrap()
        else {
            panic!("tool_search returns JSON");
        };
        let names = value.as_array().unwrap();
        assert!(!names.is_empty());
        assert!(names.len() <= MAX_SEARCH_LIMIT);
    }

    #[test]
    fn test_tool_search_requires_query() {
        let err = execute_tool_search(json!({"query": ""})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
    }
}
