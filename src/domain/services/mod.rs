pub mod authorization;
pub mod notification;
pub mod ticket;
