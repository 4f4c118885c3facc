// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- CRM ---
        handlers::crm::lookup_customer,

        // --- Analysis ---
        handlers::crm::analyze_speech,
        handlers::crm::get_recommendations,
        handlers::crm::post_call_analysis,
    ),
    components(
        schemas(
            // --- CRM ---
            models::crm::CustomerSegment,
            models::crm::CustomerSummary,

            // --- Analysis ---
            models::analysis::FeedbackCategory,
            models::analysis::AnalysisResponse,
            models::analysis::RecommendationsResponse,
            models::analysis::PostCallAnalysisResponse,

            // --- Payloads ---
            handlers::crm::PhoneNumberPayload,
            handlers::crm::SpeechPayload,
        )
    ),
    tags(
        (name = "CRM", description = "Consulta de clientes"),
        (name = "Analysis", description = "Análise de ligações e sugestões de negociação")
    )
)]
pub struct ApiDoc;
