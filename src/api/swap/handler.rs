//! DEX swap API handlers

use super::types::*;
use crate::api::server::AppState;
use crate::api::types::ErrorResponse;
use crate::core::errors::SwapError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Indicative price request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    pub network: Network,
    pub sell_asset: Asset,
    pub buy_asset: Asset,
    pub amount: String,
}

fn error_response(err: &SwapError) -> Response {
    let status = match err {
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        SwapError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ErrorResponse { error: err.to_string(), code: err.code().to_string() }),
    )
        .into_response()
}

/// Unreadable request bodies get the same `{error, code}` shape as service errors.
fn rejection_response(rejection: JsonRejection) -> Response {
    warn!("Rejected request body: {}", rejection.body_text());
    error_response(&SwapError::InvalidInput(rejection.body_text()))
}

/// POST /api/swap/order
///
/// Build the approval and trade transactions for a swap
pub async fn swap_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    info!(
        "Swap order request: {} {} -> {} ({:?}, chain {})",
        req.amount, req.sell_asset.ticker, req.buy_asset.ticker, req.side, req.network.chain_id
    );

    if req.sell_asset.uuid == req.buy_asset.uuid {
        return error_response(&SwapError::InvalidInput(
            "sell and buy asset must differ".to_string(),
        ));
    }

    match state.dex.get_order_details(&req).await {
        Ok(order) => Json(order).into_response(),
        Err(e) => {
            error!("Swap order failed: {}", e);
            error_response(&e)
        }
    }
}

/// POST /api/swap/price
///
/// Indicative price without call data
pub async fn swap_price(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match state
        .dex
        .get_token_price_from(&req.network, &req.sell_asset, &req.buy_asset, &req.amount)
        .await
    {
        Ok(price) => Json(price).into_response(),
        Err(e) => {
            error!("Swap price failed: {}", e);
            error_response(&e)
        }
    }
}
