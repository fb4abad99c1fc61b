pub mod client;
pub mod extract;

pub use client::{ChatCompletionsClient, CompletionClient};
pub use extract::extract_json;
