use serde_json::Value;

pub const MARKET_SUMMARY_PROMPT: &str = r#"
Provide the current market summary for these indices/commodities:
- Nifty50
- Sensex
- Bank Nifty
- Gold (1g)
- Silver (1kg)
- Crude Oil (per barrel)
- USD/INR exchange rate

For each item include: name, current (numeric), change (absolute numeric), change_pct (numeric)
Return strictly valid JSON only in this exact shape:
{
"indices": [
    { "name": "Nifty50", "current": 0, "change": 0, "change_pct": 0 }
]
}
Use numbers only for numeric fields (no commas). Do not include extra commentary.
"#;

/// Validated inputs for the suggestion prompt.
#[derive(Debug, Clone)]
pub struct SuggestionInput {
    pub price: String,
    pub risk: String,
    pub investment_type: String,
    pub duration: String,
}

pub fn suggestion_prompt(input: &SuggestionInput) -> String {
    format!(
        r#"
You are a financial advisor. Based on:
- Investment: ₹{price}
- Risk level: {risk} (1=Low, 5=High)
- Investment type: {kind}
- Time duration: {duration}
Suggest 5 investments with:
- name
- description
- current_price
- sell_price
- stop_loss

Return strictly valid JSON only, in this shape:
{{
"suggestions": [
    {{ "name": "", "description": "", "current_price": "", "sell_price": "", "stop_loss": "" }}
]
}}
"#,
        price = input.price,
        risk = input.risk,
        kind = input.investment_type,
        duration = input.duration,
    )
}

/// Renders a request field the way a person would type it into the prompt.
pub fn field_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
