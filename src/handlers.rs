pub mod crm;
pub mod health;
