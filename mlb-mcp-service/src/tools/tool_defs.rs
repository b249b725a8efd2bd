//! Tool definitions organized by category.
//!
//! Each submodule defines tools for a specific category and provides
//! a registration function that adds them to the registry.

mod game;
mod league;
mod player;
mod team;
mod utility;

use std::collections::HashMap;

use super::registry::{ToolMetadata, ToolName};

/// Register all tools from all categories into the registry.
pub fn register_all_tools(registry: &mut HashMap<ToolName, ToolMetadata>) {
    game::register(registry);
    team::register(registry);
    player::register(registry);
    league::register(registry);
    utility::register(registry);
}
