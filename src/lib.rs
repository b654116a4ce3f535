//! LeanLog Library
//!
//! Food lookup with serving normalization, food logging, and body
//! composition estimates for a weight-loss program.

pub mod body;
pub mod build_info;
pub mod config;
pub mod db;
pub mod http;
pub mod lookup;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
