pub mod db;
pub mod logic;
pub mod session;

pub use db::{DbClient, TableRef};
pub use session::{AuditEntry, AuditLog, CleaningSession};
