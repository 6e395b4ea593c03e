use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{sse::Event, IntoResponse, Response, Sse},
    Json,
};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, ClientIp};
use crate::features::rate_limits::RateLimitService;
use crate::features::reports::dtos::{CreateReportDto, ReportListQuery, ReportResponseDto};
use crate::features::reports::services::ReportService;
use crate::shared::constants::{
    ACTION_CREATE_REPORT, DEFAULT_REPORT_WINDOW_HOURS, MSG_REPORT_RATE_LIMITED,
    REPORT_WINDOW_HOURS,
};
use crate::shared::types::{ApiResponse, Meta};

/// State for report handlers
#[derive(Clone)]
pub struct ReportsState {
    pub report_service: Arc<ReportService>,
    pub rate_limit_service: Arc<RateLimitService>,
}

/// Submit an anonymous incident report
///
/// Throttled per IP. The report becomes invisible 24 hours after creation.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 429, description = "Too many reports from this IP")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(state): State<ReportsState>,
    ClientIp(ip): ClientIp,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let allowed = state
        .rate_limit_service
        .check_and_record(ip.as_deref(), ACTION_CREATE_REPORT)
        .await?;
    if !allowed {
        return Err(AppError::RateLimitExceeded(
            MSG_REPORT_RATE_LIMITED.to_string(),
        ));
    }

    let report = state.report_service.create(dto, ip).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report), None, None)),
    ))
}

/// List recent incident reports
///
/// Only reports created within the chosen window and not yet expired.
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportListQuery),
    responses(
        (status = 200, description = "Reports retrieved", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 400, description = "Invalid time window")
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(state): State<ReportsState>,
    Query(params): Query<ReportListQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let hours = params.hours.unwrap_or(DEFAULT_REPORT_WINDOW_HOURS);
    if !REPORT_WINDOW_HOURS.contains(&hours) {
        return Err(AppError::Validation(
            "Janela de tempo inválida. Use 6, 12 ou 24 horas.".to_string(),
        ));
    }

    let reports = state.report_service.list(hours).await?;
    let total = reports.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(reports),
        None,
        Some(Meta { total }),
    )))
}

/// Live feed of incident reports
///
/// Server-sent events; every new report arrives as a `report` event.
#[utoipa::path(
    get,
    path = "/api/reports/feed",
    responses(
        (status = 200, description = "SSE stream of report events", content_type = "text/event-stream")
    ),
    tag = "reports"
)]
pub async fn report_feed(State(state): State<ReportsState>) -> Response {
    let receiver = state.report_service.subscribe();

    // Lagged subscribers skip missed events instead of closing the stream
    let stream = BroadcastStream::new(receiver).filter_map(|item| {
        let report = item.ok()?;
        let event = Event::default()
            .event("report")
            .json_data(&report)
            .ok()?;
        Some(Ok::<_, std::convert::Infallible>(event))
    });

    let sse = Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("ping"),
    );

    sse.into_response()
}
