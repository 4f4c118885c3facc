// src/db/customer_repo.rs

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    common::error::AppError,
    db::{history_codec, seed},
    models::crm::{Customer, CustomerSegment, CustomerTable},
};

// Uma linha do arquivo. Os históricos ficam codificados como texto na célula.
#[derive(Debug, Serialize, Deserialize)]
struct CustomerRow {
    phone_number: String,
    customer_name: String,
    email: String,
    last_purchase_date: NaiveDate,
    purchase_history: i64,
    customer_segment: CustomerSegment,
    interaction_history: String,
    sentiment_history: String,
}

impl CustomerRow {
    fn from_customer(customer: &Customer) -> Result<Self, AppError> {
        Ok(Self {
            phone_number: customer.phone_number.clone(),
            customer_name: customer.customer_name.clone(),
            email: customer.email.clone(),
            last_purchase_date: customer.last_purchase_date,
            purchase_history: customer.purchase_history,
            customer_segment: customer.customer_segment,
            interaction_history: history_codec::encode(&customer.interaction_history)?,
            sentiment_history: history_codec::encode(&customer.sentiment_history)?,
        })
    }

    fn into_customer(self) -> Result<Customer, AppError> {
        let interaction_history = history_codec::decode(&self.interaction_history)?;
        let sentiment_history = history_codec::decode(&self.sentiment_history)?;

        // Os dois históricos andam juntos; tamanhos diferentes = arquivo corrompido
        if interaction_history.len() != sentiment_history.len() {
            return Err(AppError::StorageError(format!(
                "customer {} has {} interactions but {} sentiments",
                self.phone_number,
                interaction_history.len(),
                sentiment_history.len()
            )));
        }

        Ok(Customer {
            phone_number: self.phone_number,
            customer_name: self.customer_name,
            email: self.email,
            last_purchase_date: self.last_purchase_date,
            purchase_history: self.purchase_history,
            customer_segment: self.customer_segment,
            interaction_history,
            sentiment_history,
        })
    }
}

// O "banco de dados" do CRM: um arquivo CSV lido e regravado por inteiro.
// Não faz controle de concorrência; quem chama (CrmService) serializa o acesso.
#[derive(Clone)]
pub struct CustomerRepository {
    path: PathBuf,
}

impl CustomerRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    //  API ASSÍNCRONA (I/O de arquivo vai para o pool bloqueante)
    // =========================================================================

    /// Carrega a tabela inteira, criando o CRM sintético se o arquivo não existir.
    pub async fn load(&self) -> Result<CustomerTable, AppError> {
        let repo = self.clone();
        tokio::task::spawn_blocking(move || repo.load_blocking()).await?
    }

    /// Regrava a tabela inteira.
    pub async fn save(&self, table: CustomerTable) -> Result<(), AppError> {
        let repo = self.clone();
        tokio::task::spawn_blocking(move || repo.save_blocking(&table)).await?
    }

    /// Cria o arquivo com clientes sintéticos caso ainda não exista.
    /// Retorna `true` se criou.
    pub async fn initialize(&self) -> Result<bool, AppError> {
        let repo = self.clone();
        tokio::task::spawn_blocking(move || repo.initialize_blocking()).await?
    }

    // =========================================================================
    //  IMPLEMENTAÇÃO SÍNCRONA
    // =========================================================================

    pub fn initialize_blocking(&self) -> Result<bool, AppError> {
        if self.path.exists() {
            return Ok(false);
        }

        tracing::info!("CRM file not found at {}. Creating new one...", self.path.display());

        let today = Local::now().date_naive();
        let customers = seed::generate_customers(
            &mut rand::thread_rng(),
            seed::SEED_CUSTOMER_COUNT,
            today,
        );
        self.save_blocking(&CustomerTable::new(customers))?;

        tracing::info!("✅ New CRM file created successfully");
        Ok(true)
    }

    pub fn load_blocking(&self) -> Result<CustomerTable, AppError> {
        self.initialize_blocking()?;

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            AppError::StorageError(format!("failed to open {}: {}", self.path.display(), e))
        })?;

        let mut customers = Vec::new();
        for row in reader.deserialize::<CustomerRow>() {
            customers.push(row?.into_customer()?);
        }

        tracing::debug!("Loaded {} customers from {}", customers.len(), self.path.display());
        Ok(CustomerTable::new(customers))
    }

    // Escreve num arquivo temporário ao lado e renomeia por cima do original,
    // assim um crash no meio nunca deixa a planilha pela metade.
    pub fn save_blocking(&self, table: &CustomerTable) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path()?;
        let written = Self::write_rows(&tmp_path, table)
            .and_then(|()| fs::rename(&tmp_path, &self.path).map_err(AppError::from));
        if let Err(e) = written {
            // Não deixa o .tmp órfão ao lado da planilha (melhor esforço)
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        tracing::info!("CRM data saved successfully ({} customers)", table.len());
        Ok(())
    }

    fn write_rows(tmp_path: &Path, table: &CustomerTable) -> Result<(), AppError> {
        let file = File::create(tmp_path)?;
        let mut writer = csv::Writer::from_writer(file);
        for customer in table.iter() {
            writer.serialize(CustomerRow::from_customer(customer)?)?;
        }
        let file = writer
            .into_inner()
            .map_err(|e| AppError::StorageError(e.to_string()))?;
        file.sync_all()?;
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf, AppError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            AppError::StorageError(format!("invalid CRM file path: {}", self.path.display()))
        })?;

        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        Ok(self.path.with_file_name(tmp_name))
    }
}
