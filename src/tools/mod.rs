//! LeanLog Tools module
//!
//! Tool implementations shared by the MCP and HTTP surfaces.

pub mod body;
pub mod food_log;
pub mod foods;
pub mod status;
