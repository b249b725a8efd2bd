//! BM25-based tool search.
//!
//! Natural language search over the registry, so callers can discover
//! tools with queries like "team roster" or "who leads in home runs".

use std::sync::LazyLock;

use bm25::{Document, Language, SearchEngine, SearchEngineBuilder};

use super::registry::REGISTRY;

/// BM25 search index for tool discovery.
pub struct ToolSearchIndex {
    /// BM25 search engine keyed by tool name
    engine: SearchEngine<String>,
}

impl ToolSearchIndex {
    /// Build the index from every registered tool.
    ///
    /// Each tool is indexed as one document: its name with underscores as
    /// spaces, its description, then each parameter name and description.
    pub fn new() -> Self {
        let documents: Vec<Document<String>> = REGISTRY
            .mcp_definitions()
            .into_iter()
            .map(|tool| {
                let mut content = format!("{} {}", tool.name.replace('_', " "), tool.description);

                if let Some(properties) = tool
                    .input_schema
                    .get("properties")
                    .and_then(|p| p.as_object())
                {
                    for (param_name, param_schema) in properties {
                        content.push(' ');
                        content.push_str(&param_name.replace('_', " "));
                        if let Some(desc) = param_schema.get("description").and_then(|d| d.as_str()) {
                            content.push(' ');
                            content.push_str(desc);
                        }
                    }
                }

                Document {
                    id: tool.name,
                    contents: content,
                }
            })
            .collect();

        let engine: SearchEngine<String> =
            SearchEngineBuilder::with_documents(Language::English, documents).build();

        Self { engine }
    }

    /// Up to `limit` tool names, most relevant first
    pub fn search(&self, query: &str, limit: usize) -> Vec<String> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        self.engine
            .search(query, limit)
            .into_iter()
            .map(|result| result.document.id)
            .collect()
    }
}

impl Default for ToolSearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Global singleton tool search index, built on first use.
pub static TOOL_SEARCH_INDEX: LazyLock<ToolSearchIndex> = LazyLock::new(ToolSearchIndex::new);
