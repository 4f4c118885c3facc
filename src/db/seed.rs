// src/db/seed.rs

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use rand::{seq::SliceRandom, Rng};

use crate::models::crm::{Customer, CustomerSegment};

// Tamanho fixo do CRM inicial
pub const SEED_CUSTOMER_COUNT: usize = 100;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda",
    "David", "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
    "Thomas", "Sarah", "Carlos", "Ana", "Daniel", "Karen", "Lucas", "Nancy",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas",
    "Taylor", "Moore", "Jackson", "Martin", "Lee", "Silva", "Thompson", "White",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

/// Gera `count` clientes sintéticos com telefones únicos e históricos vazios.
/// A data da última compra cai no último ano, contando a partir de `today`.
pub fn generate_customers<R: Rng>(rng: &mut R, count: usize, today: NaiveDate) -> Vec<Customer> {
    let mut used_phones = HashSet::with_capacity(count);
    let mut customers = Vec::with_capacity(count);

    while customers.len() < count {
        let phone_number = fake_phone(rng);
        // Telefone é a chave; sorteia de novo se repetir
        if !used_phones.insert(phone_number.clone()) {
            continue;
        }

        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
        let domain = EMAIL_DOMAINS.choose(rng).copied().unwrap_or("example.com");
        let email = format!(
            "{}.{}{}@{}",
            first.to_lowercase(),
            last.to_lowercase(),
            rng.gen_range(1..100),
            domain
        );

        let days_ago = rng.gen_range(0..=365);
        let last_purchase_date = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);

        let customer_segment = CustomerSegment::ALL
            .choose(rng)
            .copied()
            .unwrap_or(CustomerSegment::Standard);

        customers.push(Customer {
            phone_number,
            customer_name: format!("{} {}", first, last),
            email,
            last_purchase_date,
            purchase_history: rng.gen_range(100..=10_000),
            customer_segment,
            interaction_history: Vec::new(),
            sentiment_history: Vec::new(),
        });
    }

    customers
}

fn fake_phone<R: Rng>(rng: &mut R) -> String {
    format!(
        "({:03}) {:03}-{:04}",
        rng.gen_range(200..1000),
        rng.gen_range(200..1000),
        rng.gen_range(0..10_000)
    )
}
