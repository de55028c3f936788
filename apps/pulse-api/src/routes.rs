use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use pulse_domain::DashboardProfile;
use pulse_service::{
	ConversionsResponse, Error as ServiceError, MetricsResponse, RefreshResponse,
	SmsCostsResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/metrics", get(metrics))
		.route("/v1/metrics/refresh", post(refresh_metrics))
		.route("/v1/conversions", post(conversions))
		.route("/v1/sms/costs", post(sms_costs))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn metrics(State(state): State<AppState>) -> Result<Json<MetricsResponse>, ApiError> {
	let response = state.service.call_metrics().await?;

	Ok(Json(response))
}

async fn refresh_metrics(
	State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, ApiError> {
	let response = state.service.refresh_metrics().await?;

	Ok(Json(response))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConversionsRequest {
	dashboard_type: Option<String>,
}

async fn conversions(
	State(state): State<AppState>,
	payload: Option<Json<ConversionsRequest>>,
) -> Result<Json<ConversionsResponse>, ApiError> {
	let request = payload.map(|Json(request)| request).unwrap_or_default();
	let profile = DashboardProfile::from_selector(request.dashboard_type.as_deref());
	let response = state.service.conversions(profile).await?;

	Ok(Json(response))
}

#[derive(Debug, Default, Deserialize)]
struct SmsCostsRequest {
	status: Option<String>,
}

async fn sms_costs(
	State(state): State<AppState>,
	payload: Option<Json<SmsCostsRequest>>,
) -> Result<Json<SmsCostsResponse>, ApiError> {
	let request = payload.map(|Json(request)| request).unwrap_or_default();
	let response = state.service.sms_costs(request.status.as_deref()).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	details: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	message: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	body: ErrorBody,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::Upstream { details, .. } => Self {
				status: StatusCode::BAD_GATEWAY,
				body: ErrorBody {
					error: "GHL request failed".to_string(),
					details: Some(details),
					message: None,
				},
			},
			other => Self {
				status: StatusCode::INTERNAL_SERVER_ERROR,
				body: ErrorBody {
					error: "Request failed".to_string(),
					details: None,
					message: Some(other.to_string()),
				},
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(self.body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn upstream_failures_map_to_a_502_envelope() {
		let err = ApiError::from(ServiceError::Upstream {
			status: 502,
			details: "rate limited".to_string(),
		});

		assert_eq!(err.status, StatusCode::BAD_GATEWAY);
		assert_eq!(err.body.error, "GHL request failed");
		assert_eq!(err.body.details.as_deref(), Some("rate limited"));
		assert!(err.body.message.is_none());
	}

	#[test]
	fn other_failures_map_to_a_500_envelope() {
		let err = ApiError::from(ServiceError::Storage { message: "pool closed".to_string() });

		assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(err.body.message.as_deref(), Some("Storage error: pool closed"));

		let response = err.into_response();
		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}
