pub mod event;
pub mod job;
pub mod participant;
pub mod user;
