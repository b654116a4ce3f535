//! MCP surface

mod server;

pub use server::LeanlogService;
