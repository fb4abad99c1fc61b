use serde::Deserialize;
use serde_json::Value;

use super::prompts::{field_text, SuggestionInput};

/// Body of `POST /analyze`. Values may be numbers or strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub price: Option<Value>,
    pub risk: Option<Value>,
    pub investment_type: Option<Value>,
    pub duration: Option<Value>,
}

impl AnalyzeRequest {
    /// `None` if any field is missing.
    pub fn into_input(self) -> Option<SuggestionInput> {
        Some(SuggestionInput {
            price: required(self.price)?,
            risk: required(self.risk)?,
            investment_type: required(self.investment_type)?,
            duration: required(self.duration)?,
        })
    }
}

/// Absent, null, false, zero and blank strings all count as missing.
fn required(v: Option<Value>) -> Option<String> {
    match v? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => Some(field_text(&other)),
    }
}
