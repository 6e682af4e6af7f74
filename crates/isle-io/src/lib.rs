//! `isle-io` — file edges of islander-sim: CSV input loaders and the two log
//! writers.
//!
//! | Module            | Contents                                        |
//! |-------------------|-------------------------------------------------|
//! | [`loader`]        | strategies / initial-data / geography loaders   |
//! | [`observer_log`]  | `ObserverLogWriter` (main output file)          |
//! | [`knowledge_log`] | `KnowledgeLogWriter` (per-agent change logs)    |
//! | [`error`]         | `IoError`                                       |

pub mod error;
pub mod knowledge_log;
pub mod loader;
pub mod observer_log;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{IoError, IoResult};
pub use knowledge_log::KnowledgeLogWriter;
pub use loader::{
    Strategy, load_geography, load_geography_reader, load_initial_data,
    load_initial_data_reader, load_strategies, load_strategies_reader,
};
pub use observer_log::ObserverLogWriter;
