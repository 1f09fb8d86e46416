use crate::error::AppError;
use crate::infra::{AppState, PipelineState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;

use credit_ai::workflows::documents::{extract, DocumentType, ExtractedDocument};
use credit_ai::workflows::eligibility::{EligibilityInput, EligibilityResult};
use credit_ai::workflows::roster::portfolio_from_reader;
use credit_ai::workflows::risk::PortfolioRiskSummary;
use credit_ai::workflows::underwriting::{assess_quality, CibilDataContext, QualityAssessment};

pub(crate) fn router(pipeline: PipelineState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/documents/extract", post(extract_endpoint))
        .route("/api/v1/underwriting/quality", post(quality_endpoint))
        .route("/api/v1/eligibility", post(eligibility_endpoint))
        .route("/api/v1/risk/portfolio", post(portfolio_endpoint))
        .with_state(pipeline)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExtractRequest {
    pub(crate) document_type: String,
    pub(crate) file_name: String,
    pub(crate) raw_text: String,
}

pub(crate) async fn extract_endpoint(
    Json(payload): Json<ExtractRequest>,
) -> Result<Json<ExtractedDocument>, AppError> {
    let document_type: DocumentType = payload.document_type.parse()?;
    let document = extract(document_type, &payload.raw_text, &payload.file_name);
    Ok(Json(document))
}

#[derive(Debug, Deserialize)]
pub(crate) struct QualityRequest {
    #[serde(flatten)]
    pub(crate) context: CibilDataContext,
    #[serde(default)]
    pub(crate) processing_methods: Vec<String>,
}

pub(crate) async fn quality_endpoint(
    Json(payload): Json<QualityRequest>,
) -> Json<QualityAssessment> {
    Json(assess_quality(&payload.context, &payload.processing_methods))
}

pub(crate) async fn eligibility_endpoint(
    State(pipeline): State<PipelineState>,
    Json(payload): Json<EligibilityInput>,
) -> Json<EligibilityResult> {
    Json(pipeline.engine.calculate(&payload))
}

#[derive(Debug, Deserialize)]
pub(crate) struct PortfolioRequest {
    pub(crate) roster_csv: String,
}

pub(crate) async fn portfolio_endpoint(
    Json(payload): Json<PortfolioRequest>,
) -> Result<Json<PortfolioRiskSummary>, AppError> {
    let reader = Cursor::new(payload.roster_csv.into_bytes());
    let summary = portfolio_from_reader(reader)?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_ai::workflows::documents::ExtractionConfidence;
    use credit_ai::workflows::eligibility::UnderwritingConfig;

    #[tokio::test]
    async fn extract_endpoint_returns_typed_document() {
        let request = ExtractRequest {
            document_type: "balance_sheet".to_string(),
            file_name: "balance.txt".to_string(),
            raw_text: "Total Assets: ₹500,000\nTotal Liabilities: ₹250,000".to_string(),
        };

        let Json(document) = extract_endpoint(Json(request)).await.expect("extracts");

        assert_eq!(document.document_type, DocumentType::BalanceSheet);
        assert_eq!(document.extraction_confidence, ExtractionConfidence::Medium);
    }

    #[tokio::test]
    async fn extract_endpoint_rejects_unknown_document_type() {
        let request = ExtractRequest {
            document_type: "payslip".to_string(),
            file_name: "payslip.txt".to_string(),
            raw_text: String::new(),
        };

        let error = extract_endpoint(Json(request)).await.expect_err("rejects");
        assert!(matches!(error, AppError::Document(_)));
    }

    #[tokio::test]
    async fn quality_endpoint_assesses_a_snapshot() {
        let request = QualityRequest {
            context: CibilDataContext {
                cibil_score: Some("750".to_string()),
                number_of_loans: Some("5".to_string()),
                total_loan_amount: Some("₹25.00 L".to_string()),
                amount_overdue: Some("₹50,000".to_string()),
                settled_and_written_off: None,
                suit_filed_status: None,
            },
            processing_methods: vec!["pattern_extraction".to_string()],
        };

        let Json(assessment) = quality_endpoint(Json(request)).await;

        assert!(assessment.quality_score > 0.0);
        assert!(!assessment.anomaly.has_anomalies);
    }

    #[tokio::test]
    async fn eligibility_endpoint_applies_the_configured_gates() {
        let pipeline = PipelineState::new(UnderwritingConfig::default());
        let input = EligibilityInput {
            business_type: "Technology".to_string(),
            annual_revenue: 12_000_000.0,
            loan_amount: 1_000_000.0,
            existing_loan_amount: 0.0,
            loan_term_months: 36,
            credit_score: 550,
            documents: Vec::new(),
        };

        let Json(result) = eligibility_endpoint(State(pipeline), Json(input)).await;

        assert!(!result.is_eligible);
        assert!(result
            .rejection_reason
            .expect("reason")
            .contains("Credit score"));
    }

    #[tokio::test]
    async fn portfolio_endpoint_summarizes_an_inline_roster() {
        let request = PortfolioRequest {
            roster_csv: "Application Id,Business Name,Business Type,Loan Amount,Credit Score,Submitted At\n\
                app-000001,Sharma Fabrication Works,Manufacturing,₹25.00 L,712,2025-11-04T09:30:00Z\n"
                .to_string(),
        };

        let Json(summary) = portfolio_endpoint(Json(request)).await.expect("summarizes");

        assert_eq!(summary.total_applications, 1);
        assert_eq!(summary.concentration[0].business_type, "Manufacturing");
    }
}
