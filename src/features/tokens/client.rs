//! Client wrapper for the token-metering API.

use crate::app_lib::{AppError, RequestOptions, get_json};

use super::types::TokenBalance;

/// Fetches the authoritative token balance for the signed-in account.
pub async fn fetch_balance(bearer: Option<&str>) -> Result<TokenBalance, AppError> {
    let options = match bearer {
        Some(token) => RequestOptions::new().bearer(token),
        None => RequestOptions::new(),
    };
    get_json("user/tokens", &options).await
}
