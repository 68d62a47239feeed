pub mod intake;

pub use intake::{IntakeReceipt, IntakeService};
