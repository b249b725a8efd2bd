//! Utility tool definitions.
//!
//! These tools need no Stats API call: the clock and tool discovery.

use std::collections::HashMap;

use crate::tools::{
    args::{self, NoArgs, ToolSearchArgs},
    registry::{ToolMetadata, ToolName},
};

pub fn register(registry: &mut HashMap<ToolName, ToolMetadata>) {
    let tools = [date(), tool_search()];
    for tool in tools {
        registry.insert(tool.name, tool);
    }
}

fn date() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::Date,
        description: "Get the current local date and time (YYYY-MM-DD HH:MM:SS). Use it to resolve 'today', 'yesterday' or 'this season'.",
        category: "utility",
        parameters: args::schema::<NoArgs>,
    }
}

fn tool_search() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::ToolSearch,
        description: "Search for available tools using natural language. Returns the names of matching tools. Use this to find the right tool for a task.",
        category: "utility",
        parameters: args::schema::<ToolSearchArgs>,
    }
}
