//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use fish_trade::Error as ChaincodeError;
use serde::{Deserialize, Serialize};

use crate::db;
use crate::errors::LedgerError;
use crate::ledger::Ledger;
use crate::records::TransactionRecord;

#[derive(Clone)]
pub struct ApiState {
    pub ledger: Arc<Ledger>,
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChaincodeRequest {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Serialize)]
pub struct TransactionsResponse {
    pub count: usize,
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Chaincode error code, absent for host failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
}

// ─────────────────────────────────────────────────────────
// Error mapping
// ─────────────────────────────────────────────────────────

pub fn status_for(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::TransactionNotFound(_) => StatusCode::NOT_FOUND,
        LedgerError::Chaincode(e) => match e {
            ChaincodeError::AssetNotFound(_) | ChaincodeError::ContractNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ChaincodeError::InvalidArgumentCount { .. }
            | ChaincodeError::ParseError { .. }
            | ChaincodeError::UnknownFunction(_) => StatusCode::BAD_REQUEST,
            ChaincodeError::TemperatureOutOfRangeHigh { .. }
            | ChaincodeError::TemperatureOutOfRangeLow { .. }
            | ChaincodeError::ContractAlreadyCompleted(_) => StatusCode::CONFLICT,
            ChaincodeError::AssetDecodeError { .. }
            | ChaincodeError::ContractDecodeError { .. }
            | ChaincodeError::SerializationError(_)
            | ChaincodeError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
        LedgerError::Database(_)
        | LedgerError::Migrate(_)
        | LedgerError::Json(_)
        | LedgerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let code = match &self {
            LedgerError::Chaincode(e) => Some(e.code()),
            _ => None,
        };
        (
            status_for(&self),
            Json(ErrorResponse {
                error: self.to_string(),
                code,
            }),
        )
            .into_response()
    }
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /invoke`
///
/// Runs a state-changing chaincode operation as a new transaction.
pub async fn invoke(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ChaincodeRequest>,
) -> Result<Response, LedgerError> {
    let receipt = state.ledger.invoke(&request.function, request.args).await?;
    Ok((StatusCode::OK, Json(receipt)).into_response())
}

/// `POST /query`
///
/// Returns the chaincode's JSON payload unchanged.
pub async fn query(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ChaincodeRequest>,
) -> Result<Response, LedgerError> {
    let payload = state.ledger.query(&request.function, &request.args).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        payload,
    )
        .into_response())
}

/// `GET /transactions`
///
/// Returns the committed transaction log, oldest first.
pub async fn get_transactions(
    State(state): State<Arc<ApiState>>,
) -> Result<Response, LedgerError> {
    let transactions = db::get_transactions(&state.ledger.pool).await?;
    let count = transactions.len();
    Ok((
        StatusCode::OK,
        Json(TransactionsResponse {
            count,
            transactions,
        }),
    )
        .into_response())
}

/// `GET /transactions/:tx_id`
///
/// Returns one transaction together with the keys it wrote.
pub async fn get_transaction(
    State(state): State<Arc<ApiState>>,
    Path(tx_id): Path<String>,
) -> Result<Response, LedgerError> {
    let detail = db::get_transaction(&state.ledger.pool, &tx_id).await?;
    Ok((StatusCode::OK, Json(detail)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chaincode_errors_map_to_client_statuses() {
        let cases = [
            (ChaincodeError::AssetNotFound("F1".into()), StatusCode::NOT_FOUND),
            (ChaincodeError::ContractNotFound("tx".into()), StatusCode::NOT_FOUND),
            (ChaincodeError::UnknownFunction("x".into()), StatusCode::BAD_REQUEST),
            (
                ChaincodeError::ParseError {
                    field: "price",
                    value: "x".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ChaincodeError::TemperatureOutOfRangeLow {
                    asset_min: 1,
                    acceptable_min: 2,
                },
                StatusCode::CONFLICT,
            ),
            (
                ChaincodeError::ContractAlreadyCompleted("tx".into()),
                StatusCode::CONFLICT,
            ),
            (
                ChaincodeError::Store("read-only".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(status_for(&LedgerError::Chaincode(err)), status);
        }
        assert_eq!(
            status_for(&LedgerError::TransactionNotFound("tx".into())),
            StatusCode::NOT_FOUND
        );
    }
}
