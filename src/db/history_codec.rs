// src/db/history_codec.rs

//! Codificação das colunas de histórico dentro de uma célula da planilha.
//!
//! Formato v1: um array JSON de strings, ex. `["[2024-01-02 10:11:12] oi"]`.
//! Célula vazia e `[]` valem lista vazia. Qualquer outro texto é rejeitado;
//! o conteúdo da célula nunca é interpretado como código.

use crate::common::error::AppError;

pub fn encode(entries: &[String]) -> Result<String, AppError> {
    serde_json::to_string(entries)
        .map_err(|e| AppError::StorageError(format!("failed to encode history: {}", e)))
}

pub fn decode(cell: &str) -> Result<Vec<String>, AppError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Vec<String>>(cell)
        .map_err(|e| AppError::StorageError(format!("invalid history cell {:?}: {}", cell, e)))
}
