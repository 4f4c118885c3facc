// src/services/feedback.rs

use crate::models::analysis::FeedbackCategory;

// Palavras-chave por categoria, na ordem de prioridade. A primeira que casar vence.
const KEYWORDS: &[(FeedbackCategory, &[&str])] = &[
    (FeedbackCategory::ProductQuality, &["quality", "build", "durability", "performance"]),
    (FeedbackCategory::UiUx, &["ui", "interface", "design", "usability"]),
    (FeedbackCategory::Pricing, &["price", "cost", "expensive", "cheap"]),
    (FeedbackCategory::DeliveryIssues, &["delivery", "shipping", "delay"]),
    (FeedbackCategory::CustomerSupport, &["support", "service", "help"]),
];

// Quantas sugestões no máximo devolvemos
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Classifica o feedback por substring (sem diferenciar maiúsculas).
pub fn classify(text: &str) -> FeedbackCategory {
    let text = text.to_lowercase();

    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| text.contains(word)))
        .map(|(category, _)| *category)
        .unwrap_or(FeedbackCategory::GeneralFeedback)
}

/// Argumentos de negociação para a categoria, no máximo três.
pub fn recommend(category: FeedbackCategory) -> Vec<String> {
    negotiation_terms(category)
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|term| term.to_string())
        .collect()
}

fn negotiation_terms(category: FeedbackCategory) -> &'static [&'static str] {
    match category {
        FeedbackCategory::ProductQuality => &[
            "We are committed to improving our product quality and welcome your detailed suggestions.",
            "We can offer you a free replacement or upgrade for the product.",
            "Our team will prioritize addressing quality issues in the upcoming releases.",
        ],
        FeedbackCategory::UiUx => &[
            "We can improve the UI/UX experience by 20% based on your feedback.",
            "Our team is focused on enhancing usability and aesthetics; stay tuned for updates.",
            "We can offer early access to our redesigned user interface for your review.",
        ],
        FeedbackCategory::Pricing => &[
            "We can offer a 10% discount on your next purchase.",
            "We are working on competitive pricing strategies to benefit customers.",
            "We can provide additional loyalty points for future transactions.",
        ],
        FeedbackCategory::DeliveryIssues => &[
            "We will prioritize your future deliveries at no extra cost.",
            "We can offer free express shipping for your next order.",
            "Our logistics team is actively improving delivery timelines.",
        ],
        FeedbackCategory::CustomerSupport => &[
            "We will assign a dedicated support representative to address your concerns.",
            "Our team is enhancing the support system for faster resolutions.",
            "We can provide 24/7 support access to resolve your issues quickly.",
        ],
        FeedbackCategory::GeneralFeedback => &[
            "Thank you for your feedback; we are committed to continuous improvement.",
            "We value your suggestions and are working to enhance our services.",
            "We would love to hear more about how we can improve; please share detailed feedback.",
        ],
    }
}
