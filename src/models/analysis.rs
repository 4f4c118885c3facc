// src/models/analysis.rs

use serde::Serialize;
use utoipa::ToSchema;

// As seis categorias de feedback. A ordem de declaração é a ordem de prioridade
// usada pelo classificador.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    ProductQuality,
    UiUx,
    Pricing,
    DeliveryIssues,
    CustomerSupport,
    GeneralFeedback,
}

impl FeedbackCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackCategory::ProductQuality => "product_quality",
            FeedbackCategory::UiUx => "ui_ux",
            FeedbackCategory::Pricing => "pricing",
            FeedbackCategory::DeliveryIssues => "delivery_issues",
            FeedbackCategory::CustomerSupport => "customer_support",
            FeedbackCategory::GeneralFeedback => "general_feedback",
        }
    }
}

impl std::fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- RESPOSTAS DOS ENDPOINTS ---

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisResponse {
    #[schema(example = "- Sentiment: frustrated\n- Intent: wants a refund")]
    pub analysis: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostCallAnalysisResponse {
    pub post_call_analysis: String,
}
