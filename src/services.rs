pub mod analyzer;
pub use analyzer::{GroqAnalyzer, SpeechAnalyzer};
pub mod crm_service;
pub use crm_service::CrmService;
pub mod feedback;
pub mod interaction_log;
