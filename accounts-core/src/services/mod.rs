//! Service layer - business logic orchestration
//!
//! Services coordinate validation, the store port and the event log.

mod account;
pub mod logging;
pub mod migration;

pub use account::AccountService;
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use migration::{MigrationResult, MigrationService};
