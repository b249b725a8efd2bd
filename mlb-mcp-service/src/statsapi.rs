//! MLB Stats API integration.
//!
//! This module provides a client for the public MLB Stats API
//! (https://statsapi.mlb.com/api) plus the derived data and text
//! renderings the tools hand back to callers.

mod client;
pub mod data;
mod error;
pub mod format;
mod options;
pub mod responses;

pub use client::StatsApiClient;
pub use error::StatsApiError;
pub use options::{
    BoxscoreSections, LeadersQuery, PersonStatsQuery, RosterQuery, ScheduleQuery, StandingsQuery,
    TeamLeadersQuery, TeamsQuery,
};
