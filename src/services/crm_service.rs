// src/services/crm_service.rs

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    common::error::AppError,
    db::CustomerRepository,
    models::crm::CustomerSummary,
    services::{analyzer::SpeechAnalyzer, feedback, interaction_log},
};

pub const NO_INTERACTIONS_RECOMMENDATION: &str =
    "No interactions found to generate recommendations.";
pub const NO_INTERACTIONS_ANALYSIS: &str = "No interactions found to analyze.";

#[derive(Clone)]
pub struct CrmService {
    repo: CustomerRepository,
    analyzer: Arc<dyn SpeechAnalyzer>,
    // Um único escritor: load -> muta -> save acontece inteiro dentro do lock,
    // senão duas requisições sobrescrevem o trabalho uma da outra.
    store_lock: Arc<Mutex<()>>,
}

impl CrmService {
    pub fn new(repo: CustomerRepository, analyzer: Arc<dyn SpeechAnalyzer>) -> Self {
        Self {
            repo,
            analyzer,
            store_lock: Arc::new(Mutex::new(())),
        }
    }

    // =========================================================================
    //  1. CONSULTA
    // =========================================================================

    pub async fn lookup_customer(&self, phone_number: &str) -> Result<CustomerSummary, AppError> {
        let table = {
            let _guard = self.store_lock.lock().await;
            self.repo.load().await?
        };

        let customer = table
            .find_by_phone(phone_number)
            .ok_or(AppError::CustomerNotFound)?;

        Ok(CustomerSummary::from(customer))
    }

    // =========================================================================
    //  2. ANÁLISE DA FALA (única operação que grava)
    // =========================================================================

    pub async fn analyze_speech(
        &self,
        phone_number: &str,
        transcript: &str,
    ) -> Result<String, AppError> {
        let _guard = self.store_lock.lock().await;

        // 1. Carrega e confere se o cliente existe antes de gastar a chamada externa
        let mut table = self.repo.load().await?;
        let customer = table
            .find_by_phone(phone_number)
            .ok_or(AppError::CustomerNotFound)?;
        tracing::debug!(
            "Analyzing speech for {} ({:?})",
            phone_number,
            customer.customer_segment
        );

        // 2. Chamada externa. Se falhar, nada foi gravado.
        let analysis = self.analyzer.analyze_speech(transcript).await?;

        // 3. Registra o par interação/sentimento e só então persiste
        interaction_log::append(&mut table, phone_number, transcript, &analysis)?;
        self.repo.save(table).await?;

        Ok(analysis)
    }

    // =========================================================================
    //  3. RECOMENDAÇÕES (a partir da última interação)
    // =========================================================================

    pub async fn get_recommendations(&self, phone_number: &str) -> Result<Vec<String>, AppError> {
        let Some(latest) = self.latest_interaction(phone_number).await? else {
            return Ok(vec![NO_INTERACTIONS_RECOMMENDATION.to_string()]);
        };

        let category = feedback::classify(&latest);
        tracing::info!("Latest interaction for {} classified as {}", phone_number, category);

        Ok(feedback::recommend(category))
    }

    // =========================================================================
    //  4. ANÁLISE PÓS-LIGAÇÃO
    // =========================================================================

    pub async fn post_call_analysis(&self, phone_number: &str) -> Result<String, AppError> {
        let Some(latest) = self.latest_interaction(phone_number).await? else {
            return Ok(NO_INTERACTIONS_ANALYSIS.to_string());
        };

        self.analyzer.post_call_analysis(&latest).await
    }

    // Texto cru da última interação (sem o "[timestamp] "), ou None se não houver
    async fn latest_interaction(&self, phone_number: &str) -> Result<Option<String>, AppError> {
        let table = {
            let _guard = self.store_lock.lock().await;
            self.repo.load().await?
        };

        let customer = table
            .find_by_phone(phone_number)
            .ok_or(AppError::CustomerNotFound)?;

        Ok(customer.latest_interaction().map(str::to_string))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    use crate::models::crm::{Customer, CustomerSegment, CustomerTable};

    // Analisador falso: devolve texto fixo ou falha, e conta as chamadas
    pub(crate) struct FakeAnalyzer {
        pub fail: bool,
        pub calls: AtomicUsize,
    }

    impl FakeAnalyzer {
        pub(crate) fn ok() -> Self {
            Self { fail: false, calls: AtomicUsize::new(0) }
        }

        pub(crate) fn failing() -> Self {
            Self { fail: true, calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl SpeechAnalyzer for FakeAnalyzer {
        async fn analyze_speech(&self, transcript: &str) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::ExternalServiceError("service unreachable".into()));
            }
            Ok(format!("analysis of: {}", transcript))
        }

        async fn post_call_analysis(&self, transcript: &str) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::ExternalServiceError("service unreachable".into()));
            }
            Ok(format!("summary of: {}", transcript))
        }
    }

    pub(crate) const KNOWN_PHONE: &str = "(555) 010-4477";

    pub(crate) fn seeded_repo(dir: &TempDir) -> CustomerRepository {
        let repo = CustomerRepository::new(dir.path().join("crm.csv"));
        let customer = Customer {
            phone_number: KNOWN_PHONE.to_string(),
            customer_name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            last_purchase_date: chrono::NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            purchase_history: 4200,
            customer_segment: CustomerSegment::Premium,
            interaction_history: Vec::new(),
            sentiment_history: Vec::new(),
        };
        repo.save_blocking(&CustomerTable::new(vec![customer])).unwrap();
        repo
    }

    fn service(dir: &TempDir, analyzer: Arc<FakeAnalyzer>) -> (CrmService, CustomerRepository) {
        let repo = seeded_repo(dir);
        (CrmService::new(repo.clone(), analyzer), repo)
    }

    #[tokio::test]
    async fn lookup_returns_summary() {
        let dir = TempDir::new().unwrap();
        let (service, _) = service(&dir, Arc::new(FakeAnalyzer::ok()));

        let summary = service.lookup_customer(KNOWN_PHONE).await.unwrap();
        assert_eq!(summary.customer_name, "Maria Silva");
        assert_eq!(summary.last_purchase_date, "2024-05-20");
        assert_eq!(summary.purchase_history, 4200.0);
        assert!(summary.interaction_history.is_empty());
    }

    #[tokio::test]
    async fn lookup_unknown_phone_is_not_found() {
        let dir = TempDir::new().unwrap();
        let (service, _) = service(&dir, Arc::new(FakeAnalyzer::ok()));

        let err = service.lookup_customer("000").await.unwrap_err();
        assert!(matches!(err, AppError::CustomerNotFound));
    }

    #[tokio::test]
    async fn analyze_speech_logs_and_persists() {
        let dir = TempDir::new().unwrap();
        let (service, repo) = service(&dir, Arc::new(FakeAnalyzer::ok()));

        let analysis = service.analyze_speech(KNOWN_PHONE, "The price is too high").await.unwrap();
        assert_eq!(analysis, "analysis of: The price is too high");

        let table = repo.load().await.unwrap();
        let customer = table.find_by_phone(KNOWN_PHONE).unwrap();
        assert_eq!(customer.interaction_history.len(), 1);
        assert_eq!(customer.sentiment_history.len(), 1);
        assert_eq!(customer.latest_interaction(), Some("The price is too high"));
        assert!(customer.sentiment_history[0].ends_with("] analysis of: The price is too high"));
    }

    #[tokio::test]
    async fn analyze_speech_for_unknown_phone_skips_the_analyzer() {
        let dir = TempDir::new().unwrap();
        let analyzer = Arc::new(FakeAnalyzer::ok());
        let (service, _) = service(&dir, analyzer.clone());

        let err = service.analyze_speech("000", "hello").await.unwrap_err();
        assert!(matches!(err, AppError::CustomerNotFound));
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_analysis_persists_nothing() {
        let dir = TempDir::new().unwrap();
        let (service, repo) = service(&dir, Arc::new(FakeAnalyzer::failing()));
        let before = std::fs::read_to_string(repo.path()).unwrap();

        let err = service.analyze_speech(KNOWN_PHONE, "hello").await.unwrap_err();

        assert!(matches!(err, AppError::ExternalServiceError(_)));
        assert_eq!(std::fs::read_to_string(repo.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn recommendations_fall_back_when_history_is_empty() {
        let dir = TempDir::new().unwrap();
        let (service, _) = service(&dir, Arc::new(FakeAnalyzer::ok()));

        let recs = service.get_recommendations(KNOWN_PHONE).await.unwrap();
        assert_eq!(recs, vec![NO_INTERACTIONS_RECOMMENDATION.to_string()]);
    }

    #[tokio::test]
    async fn recommendations_follow_latest_interaction() {
        let dir = TempDir::new().unwrap();
        let (service, _) = service(&dir, Arc::new(FakeAnalyzer::ok()));

        service.analyze_speech(KNOWN_PHONE, "Shipping took two weeks").await.unwrap();
        service.analyze_speech(KNOWN_PHONE, "It is way too expensive").await.unwrap();

        let recs = service.get_recommendations(KNOWN_PHONE).await.unwrap();
        assert_eq!(recs, feedback::recommend(crate::models::analysis::FeedbackCategory::Pricing));
    }

    #[tokio::test]
    async fn post_call_uses_raw_latest_text() {
        let dir = TempDir::new().unwrap();
        let (service, _) = service(&dir, Arc::new(FakeAnalyzer::ok()));

        assert_eq!(
            service.post_call_analysis(KNOWN_PHONE).await.unwrap(),
            NO_INTERACTIONS_ANALYSIS
        );

        service.analyze_speech(KNOWN_PHONE, "Need help with my order").await.unwrap();
        assert_eq!(
            service.post_call_analysis(KNOWN_PHONE).await.unwrap(),
            "summary of: Need help with my order"
        );
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let (service, repo) = service(&dir, Arc::new(FakeAnalyzer::ok()));

        let mut handles = Vec::new();
        for i in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.analyze_speech(KNOWN_PHONE, &format!("call {}", i)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let table = repo.load().await.unwrap();
        let customer = table.find_by_phone(KNOWN_PHONE).unwrap();
        assert_eq!(customer.interaction_history.len(), 8);
        assert_eq!(customer.sentiment_history.len(), 8);
    }
}
