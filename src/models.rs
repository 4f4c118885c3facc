pub mod analysis;
pub mod crm;
