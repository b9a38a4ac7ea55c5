//! HTTP router and the conversion handler.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fiat2btc_common::now_unix;
use fiat2btc_rates::{convert, format_rate, RateResolver};

use crate::error::{ApiError, ApiResult};
use crate::response::{BtcInfo, BtcResponse, CacheInfo, InputInfo, RateInfo};
use crate::validate::{validate, ConversionQuery};

/// CDN cacheability window, numerically aligned with the snapshot TTL by
/// convention; the core's own freshness window is independent of it.
const CDN_S_MAXAGE_SECONDS: i64 = 30 * 60;

/// How long the CDN may serve a stale response while revalidating.
const CDN_STALE_WHILE_REVALIDATE_SECONDS: i64 = 24 * 60 * 60;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<RateResolver>,
}

/// Build the application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/btc", get(convert_btc))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn convert_btc(
    State(state): State<AppState>,
    Query(query): Query<ConversionQuery>,
) -> ApiResult<impl IntoResponse> {
    let request = validate(&query)?;

    let resolved = state.resolver.resolve(request.currency, now_unix()).await?;

    // Validation bounds the shape of the amount, not its size; an amount
    // too large to represent exactly is rejected rather than rounded.
    let amount_btc = convert(&request.amount, resolved.btc_per_unit).map_err(|e| {
        ApiError::Validation(format!("Query param 'amount' exceeds supported precision: {e}"))
    })?;

    let body = BtcResponse {
        input: InputInfo {
            currency: request.currency,
            amount: request.amount,
        },
        btc: BtcInfo { amount: amount_btc },
        rate: RateInfo {
            btc_per_unit: format_rate(resolved.btc_per_unit),
            as_of_unix: resolved.as_of_unix,
            source: "exchangerate.host",
        },
        cache: CacheInfo {
            ttl_seconds: resolved.ttl_seconds_remaining,
            served_from: resolved.served_from,
            fetched_at_unix: resolved.fetched_at_unix,
        },
    };

    Ok((
        [(
            header::CACHE_CONTROL,
            format!(
                "public, s-maxage={CDN_S_MAXAGE_SECONDS}, \
                 stale-while-revalidate={CDN_STALE_WHILE_REVALIDATE_SECONDS}"
            ),
        )],
        Json(body),
    ))
}
