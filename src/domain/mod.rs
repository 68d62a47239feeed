pub mod ticket;
pub mod validation;
