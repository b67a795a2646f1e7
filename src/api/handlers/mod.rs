pub mod health;
pub mod participant;
