use serde::Serialize;

use crate::error::{ChartError, ChartResult};

use super::ChartUpdate;

pub const CHART_UPDATE_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartUpdateJsonContractV1<'a> {
    pub schema_version: u32,
    pub update: &'a ChartUpdate,
}

impl ChartUpdate {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartUpdateJsonContractV1 {
            schema_version: CHART_UPDATE_JSON_SCHEMA_V1,
            update: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart update contract v1: {e}"))
        })
    }

    pub fn to_json_value(&self) -> ChartResult<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart update: {e}")))
    }
}
