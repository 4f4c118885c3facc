// src/services/interaction_log.rs

use chrono::{Local, NaiveDateTime};

use crate::{common::error::AppError, models::crm::CustomerTable};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Registra a interação e o sentimento do cliente com o horário atual.
/// Não grava nada em disco: persistir é responsabilidade de quem chama.
/// Se o telefone não existir, a tabela fica intacta.
pub fn append(
    table: &mut CustomerTable,
    phone_number: &str,
    interaction: &str,
    sentiment: &str,
) -> Result<(), AppError> {
    append_at(table, phone_number, interaction, sentiment, Local::now().naive_local())
}

/// Igual a `append`, mas com o horário informado.
pub fn append_at(
    table: &mut CustomerTable,
    phone_number: &str,
    interaction: &str,
    sentiment: &str,
    at: NaiveDateTime,
) -> Result<(), AppError> {
    let customer = table
        .find_by_phone_mut(phone_number)
        .ok_or(AppError::CustomerNotFound)?;

    // Mesmo timestamp nos dois históricos; daqui pra baixo nada falha,
    // então os dois pushes acontecem juntos.
    let timestamp = at.format(TIMESTAMP_FORMAT).to_string();
    customer.interaction_history.push(format!("[{}] {}", timestamp, interaction));
    customer.sentiment_history.push(format!("[{}] {}", timestamp, sentiment));

    Ok(())
}
