use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::ChartConfig;
use super::validation::validate_chart_config;

pub const CHART_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ChartConfig,
}

impl ChartConfig {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartConfigJsonContractV1 {
            schema_version: CHART_CONFIG_JSON_SCHEMA_V1,
            config: *self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config contract v1: {e}"))
        })
    }

    /// Parses either a bare config or a v1 contract envelope, then validates it.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart config json: {e}"))
        })?;
        // All config fields have defaults; only the envelope carries a version.
        if value.get("schema_version").is_none() {
            let config: ChartConfig = serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse chart config json: {e}"))
            })?;
            return validate_chart_config(config);
        }
        let payload: ChartConfigJsonContractV1 = serde_json::from_value(value).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart config json payload: {e}"))
        })?;
        if payload.schema_version != CHART_CONFIG_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart config schema version: {}",
                payload.schema_version
            )));
        }
        validate_chart_config(payload.config)
    }
}
