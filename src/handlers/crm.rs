// src/handlers/crm.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        analysis::{AnalysisResponse, PostCallAnalysisResponse, RecommendationsResponse},
        crm::CustomerSummary,
    },
};

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PhoneNumberPayload {
    #[validate(length(min = 1, message = "phone_number is required"))]
    #[schema(example = "(555) 010-4477")]
    pub phone_number: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SpeechPayload {
    // Transcrição vazia é aceita e vai para a análise do jeito que veio
    #[schema(example = "Honestly the price is too high for what it does.")]
    pub text_data: String,

    #[validate(length(min = 1, message = "phone_number is required"))]
    #[schema(example = "(555) 010-4477")]
    pub phone_number: String,
}

// =============================================================================
//  ROTAS
// =============================================================================

// POST /lookup-customer
#[utoipa::path(
    post,
    path = "/lookup-customer",
    tag = "CRM",
    request_body = PhoneNumberPayload,
    responses(
        (status = 200, description = "Dados do cliente", body = CustomerSummary),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn lookup_customer(
    State(app_state): State<AppState>,
    payload: Result<Json<PhoneNumberPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;
    tracing::info!("Looking up customer with phone number: {}", payload.phone_number);

    let customer = app_state.crm_service
        .lookup_customer(&payload.phone_number)
        .await?;

    Ok((StatusCode::OK, Json(customer)))
}

// POST /analyze-speech
#[utoipa::path(
    post,
    path = "/analyze-speech",
    tag = "Analysis",
    request_body = SpeechPayload,
    responses(
        (status = 200, description = "Análise da transcrição (já registrada no histórico)", body = AnalysisResponse),
        (status = 404, description = "Cliente não encontrado"),
        (status = 500, description = "Serviço de análise indisponível ou não configurado")
    )
)]
pub async fn analyze_speech(
    State(app_state): State<AppState>,
    payload: Result<Json<SpeechPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;
    tracing::info!("Analyzing speech for phone number: {}", payload.phone_number);

    let analysis = app_state.crm_service
        .analyze_speech(&payload.phone_number, &payload.text_data)
        .await?;

    Ok((StatusCode::OK, Json(AnalysisResponse { analysis })))
}

// POST /get-recommendations
#[utoipa::path(
    post,
    path = "/get-recommendations",
    tag = "Analysis",
    request_body = PhoneNumberPayload,
    responses(
        (status = 200, description = "Até 3 argumentos de negociação", body = RecommendationsResponse),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_recommendations(
    State(app_state): State<AppState>,
    payload: Result<Json<PhoneNumberPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let recommendations = app_state.crm_service
        .get_recommendations(&payload.phone_number)
        .await?;

    Ok((StatusCode::OK, Json(RecommendationsResponse { recommendations })))
}

// POST /post-call-analysis
#[utoipa::path(
    post,
    path = "/post-call-analysis",
    tag = "Analysis",
    request_body = PhoneNumberPayload,
    responses(
        (status = 200, description = "Resumo pós-ligação da última interação", body = PostCallAnalysisResponse),
        (status = 404, description = "Cliente não encontrado"),
        (status = 500, description = "Serviço de análise indisponível ou não configurado")
    )
)]
pub async fn post_call_analysis(
    State(app_state): State<AppState>,
    payload: Result<Json<PhoneNumberPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let post_call_analysis = app_state.crm_service
        .post_call_analysis(&payload.phone_number)
        .await?;

    Ok((StatusCode::OK, Json(PostCallAnalysisResponse { post_call_analysis })))
}
