pub mod app;
pub mod calendar;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod convert;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;

pub use app::router;
pub use config::Config;
pub use errors::{AppError, LedgerError};
pub use ledger::LedgerStore;
pub use models::{ConsumptionEntry, Ledger};
pub use state::AppState;
pub use storage::{Backend, FileBackend, MemoryBackend};
