use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::ViewModel;

pub const VIEW_MODEL_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModelJsonContractV1 {
    pub schema_version: u32,
    pub view_model: ViewModel,
}

impl ViewModel {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ViewModelJsonContractV1 {
            schema_version: VIEW_MODEL_JSON_SCHEMA_V1,
            view_model: self.clone(),
        };
        serde_json::to_string_pretty(&payload)
            .map_err(ChartError::json("failed to serialize view model contract v1"))
    }

    /// Accepts either a bare view model or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(view_model) = serde_json::from_str::<ViewModel>(input) {
            return Ok(view_model);
        }
        let payload: ViewModelJsonContractV1 = serde_json::from_str(input)
            .map_err(ChartError::json("failed to parse view model json payload"))?;
        if payload.schema_version != VIEW_MODEL_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported view model schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.view_model)
    }
}
