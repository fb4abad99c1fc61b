use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
mod prompts;
mod services;

pub fn router() -> Router<AppState> {
    handlers::market_routes()
}
