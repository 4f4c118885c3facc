// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use crate::{
    db::CustomerRepository,
    services::{
        analyzer::{self, AnalyzerConfig},
        CrmService, GroqAnalyzer, SpeechAnalyzer,
    },
};

const DEFAULT_CRM_FILE: &str = "crm_data.csv";
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_ANALYZER_TIMEOUT_SECS: u64 = 30;

// Configurações lidas do ambiente (.env incluso)
#[derive(Debug, Clone)]
pub struct Settings {
    pub crm_file: PathBuf,
    pub server_addr: String,
    pub analyzer: AnalyzerConfig,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let timeout_secs = match env::var("ANALYZER_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                anyhow::anyhow!("ANALYZER_TIMEOUT_SECS deve ser um número inteiro: {}", e)
            })?,
            Err(_) => DEFAULT_ANALYZER_TIMEOUT_SECS,
        };

        Ok(Self {
            crm_file: env::var("CRM_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CRM_FILE)),
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string()),
            analyzer: AnalyzerConfig {
                // Sem chave o servidor sobe mesmo assim; as análises é que falham
                api_key: env::var("GROQ_API_KEY").ok(),
                base_url: env::var("GROQ_BASE_URL")
                    .unwrap_or_else(|_| analyzer::DEFAULT_BASE_URL.to_string()),
                model: env::var("GROQ_MODEL")
                    .unwrap_or_else(|_| analyzer::DEFAULT_MODEL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub crm_service: CrmService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        if settings.analyzer.api_key.is_none() {
            tracing::warn!("⚠ GROQ_API_KEY não definida: análises vão responder 500");
        }

        // --- Monta o gráfico de dependências ---
        let repo = CustomerRepository::new(settings.crm_file.clone());
        if repo.initialize().await? {
            tracing::info!("✅ CRM sintético criado em {}", repo.path().display());
        }

        let analyzer = GroqAnalyzer::new(settings.analyzer.clone())?;

        Ok(Self::with_analyzer(repo, Arc::new(analyzer)))
    }

    // Usado também nos testes, com um analisador falso
    pub fn with_analyzer(repo: CustomerRepository, analyzer: Arc<dyn SpeechAnalyzer>) -> Self {
        Self {
            crm_service: CrmService::new(repo, analyzer),
        }
    }
}
