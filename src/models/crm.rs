// src/models/crm.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- ENUMS ---

// Segmento comercial do cliente. Gravado no arquivo exatamente como aparece aqui.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum CustomerSegment {
    Premium,
    Standard,
    Basic,
}

impl CustomerSegment {
    pub const ALL: [CustomerSegment; 3] = [
        CustomerSegment::Premium,
        CustomerSegment::Standard,
        CustomerSegment::Basic,
    ];
}

// --- CLIENTE (A linha da planilha) ---

// Persistência passa por `CustomerRow`; a API devolve `CustomerSummary`.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    // Chave única, nunca muda depois de criada
    pub phone_number: String,

    pub customer_name: String,
    pub email: String,

    pub last_purchase_date: NaiveDate,

    // Valor total comprado (inteiro)
    pub purchase_history: i64,

    pub customer_segment: CustomerSegment,

    // Históricos paralelos: a entrada i de cada um foi gravada junto.
    // Só crescem (append), nunca são editados.
    pub interaction_history: Vec<String>,
    pub sentiment_history: Vec<String>,
}

impl Customer {
    /// Última interação registrada, sem o prefixo "[timestamp] ".
    pub fn latest_interaction(&self) -> Option<&str> {
        self.interaction_history
            .last()
            .map(|entry| strip_timestamp(entry))
    }
}

/// Remove o prefixo "[YYYY-MM-DD HH:MM:SS] " de uma entrada do histórico.
/// Entradas sem o prefixo voltam inteiras.
pub fn strip_timestamp(entry: &str) -> &str {
    if !entry.contains(']') {
        return entry;
    }
    match entry.split_once("] ") {
        Some((_, text)) => text,
        None => entry,
    }
}

// --- A TABELA INTEIRA ---
// A unidade de leitura/gravação é sempre a tabela completa.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerTable {
    customers: Vec<Customer>,
}

impl CustomerTable {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    // Telefones deveriam ser únicos; se não forem, vale o primeiro.
    pub fn find_by_phone(&self, phone_number: &str) -> Option<&Customer> {
        self.customers
            .iter()
            .find(|c| c.phone_number == phone_number)
    }

    pub fn find_by_phone_mut(&mut self, phone_number: &str) -> Option<&mut Customer> {
        self.customers
            .iter_mut()
            .find(|c| c.phone_number == phone_number)
    }
}

// --- RESPOSTAS ---

// Resumo devolvido no lookup (sem o histórico de sentimento)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerSummary {
    pub customer_name: String,
    pub email: String,
    #[schema(example = "2024-05-20")]
    pub last_purchase_date: String,
    pub purchase_history: f64,
    pub customer_segment: CustomerSegment,
    pub interaction_history: Vec<String>,
}

impl From<&Customer> for CustomerSummary {
    fn from(customer: &Customer) -> Self {
        Self {
            customer_name: customer.customer_name.clone(),
            email: customer.email.clone(),
            last_purchase_date: customer.last_purchase_date.format("%Y-%m-%d").to_string(),
            purchase_history: customer.purchase_history as f64,
            customer_segment: customer.customer_segment,
            interaction_history: customer.interaction_history.clone(),
        }
    }
}
