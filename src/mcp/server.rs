//! LeanLog MCP Server Implementation
//!
//! Exposes food lookup, body composition and the food log as MCP tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::lookup::FoodSource;
use crate::models::{Macros, ServingOption};
use crate::tools::food_log::{self, LogFoodRequest};
use crate::tools::status::{StatusTracker, USAGE_INSTRUCTIONS};
use crate::tools::{body, foods};

/// LeanLog MCP Service
#[derive(Clone)]
pub struct LeanlogService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    source: Arc<dyn FoodSource>,
    tool_router: ToolRouter<LeanlogService>,
}

impl LeanlogService {
    pub fn new(database_path: PathBuf, database: Database, source: Arc<dyn FoodSource>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            source,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFoodsParams {
    /// Free-text food query
    pub query: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScaleServingParams {
    /// Query the food was found with
    pub query: String,
    /// fdcId of the search result
    pub fdc_id: i64,
    /// Label of one of the result's serving options
    pub serving_label: Option<String>,
    /// Explicit serving weight in grams, instead of a label
    pub serving_grams: Option<f64>,
    /// Servings eaten (default 1)
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

fn default_quantity() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateBodyCompositionParams {
    /// "male" or "female"
    pub sex: String,
    /// "imperial" (inches, pounds; default) or "metric" (cm, kg)
    pub unit_system: Option<String>,
    pub height: f64,
    pub weight: f64,
    pub waist: f64,
    pub neck: f64,
    /// Required for women
    pub hip: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateBmiParams {
    /// "imperial" (inches, pounds; default) or "metric" (cm, kg)
    pub unit_system: Option<String>,
    pub height: f64,
    pub weight: f64,
    /// Diagnosed weight-related condition
    #[serde(default)]
    pub has_weight_related_condition: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogFoodParams {
    pub user_id: String,
    /// YYYY-MM-DD (default today)
    pub date: Option<String>,
    pub fdc_id: Option<i64>,
    pub food_name: String,
    /// Calories per 100 g
    pub calories: f64,
    /// Protein grams per 100 g
    pub protein: f64,
    /// Carb grams per 100 g
    pub carbs: f64,
    /// Fat grams per 100 g
    pub fat: f64,
    pub serving_label: String,
    pub serving_grams: f64,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetDayLogParams {
    pub user_id: String,
    /// YYYY-MM-DD
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFoodLogEntryParams {
    /// Food log entry ID to delete
    pub id: i64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl LeanlogService {
    // --- Status ---

    #[tool(description = "Get the current status of the LeanLog service including build info, database status, and process information")]
    async fn leanlog_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.database);
        to_json(&status)
    }

    #[tool(description = "Get instructions for looking up foods, logging servings and estimating body composition. Call this when unsure how to use the tools.")]
    fn usage_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(USAGE_INSTRUCTIONS)]))
    }

    // --- Foods ---

    #[tool(description = "Search USDA FoodData Central. Returns up to 10 foods with nutrients per 100 g and serving options sorted by weight.")]
    async fn search_foods(&self, Parameters(p): Parameters<SearchFoodsParams>) -> Result<CallToolResult, McpError> {
        let result = foods::search_foods(self.source.as_ref(), &p.query)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Scale a search result to a serving and quantity. Pick the serving by label or give grams.")]
    async fn scale_serving(&self, Parameters(p): Parameters<ScaleServingParams>) -> Result<CallToolResult, McpError> {
        let result = foods::scale_search_result(
            self.source.as_ref(),
            &p.query,
            p.fdc_id,
            p.serving_label.as_deref(),
            p.serving_grams,
            p.quantity,
        )
        .await
        .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- Body ---

    #[tool(description = "Estimate body-fat percentage with the U.S. Navy tape method. Hip is required for women.")]
    fn estimate_body_composition(&self, Parameters(p): Parameters<EstimateBodyCompositionParams>) -> Result<CallToolResult, McpError> {
        let result = body::estimate_body_composition(
            &p.sex,
            p.unit_system.as_deref(),
            p.height,
            p.weight,
            p.waist,
            p.neck,
            p.hip,
        )
        .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Calculate BMI, WHO category and weight-loss program eligibility")]
    fn calculate_bmi(&self, Parameters(p): Parameters<CalculateBmiParams>) -> Result<CallToolResult, McpError> {
        let result = body::calculate_bmi(
            p.unit_system.as_deref(),
            p.height,
            p.weight,
            p.has_weight_related_condition,
        )
        .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- Food Log ---

    #[tool(description = "Log a serving of food for a user. Pass nutrients per 100 g; they are scaled to servingGrams x quantity.")]
    fn log_food(&self, Parameters(p): Parameters<LogFoodParams>) -> Result<CallToolResult, McpError> {
        let request = LogFoodRequest {
            user_id: p.user_id,
            date: p.date,
            fdc_id: p.fdc_id,
            food_name: p.food_name,
            per_100g: Macros::new(p.calories, p.protein, p.carbs, p.fat),
            serving: ServingOption::new(p.serving_label, p.serving_grams),
            quantity: p.quantity,
        };
        let data = food_log::build_entry(&request).map_err(|e| McpError::invalid_params(e, None))?;
        let result = food_log::store_entry(&self.database, &data)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a user's food log for a day with nutrition totals")]
    fn get_day_log(&self, Parameters(p): Parameters<GetDayLogParams>) -> Result<CallToolResult, McpError> {
        food_log::validate_user_id(&p.user_id).map_err(|e| McpError::invalid_params(e, None))?;
        food_log::validate_date(&p.date).map_err(|e| McpError::invalid_params(e, None))?;

        let result = food_log::get_day_log(&self.database, &p.user_id, &p.date)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a food log entry")]
    fn delete_food_log_entry(&self, Parameters(p): Parameters<DeleteFoodLogEntryParams>) -> Result<CallToolResult, McpError> {
        let result = food_log::delete_food_log_entry(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for LeanlogService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "leanlog".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("LeanLog".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "LeanLog - food lookup, food logging and body composition for weight loss. \
                 Call usage_instructions first. \
                 Foods: search_foods, scale_serving. \
                 Log: log_food, get_day_log, delete_food_log_entry. \
                 Body: estimate_body_composition, calculate_bmi. \
                 Status: leanlog_status."
                    .into(),
            ),
        }
    }
}
