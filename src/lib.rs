//! Cloudburst early-warning service.
//!
//! Sensor readings arrive over HTTP, are classified against fixed rainfall,
//! humidity and pressure thresholds, kept in a bounded rolling history, and
//! dangerous ones raise SMS alerts through a best-effort notifier.
//!
//! Module layout follows the Explicit Module Boundary Pattern (EMBP): each
//! module reaches its siblings only through the re-exports below, never by
//! path into another module's internals.

pub mod classifier;
pub mod config;
pub mod error;
pub mod generator;
pub mod history;
pub mod ingest;
pub mod models;
pub mod notifier;
pub mod query;
pub mod routes;
pub mod telemetry;

pub use config::{Config, TwilioConfig};
pub use error::{ChannelError, IngestError};
pub use history::HistoryStore;
pub use ingest::IngestService;
pub use models::{ClassifiedRecord, Reading, Status};
pub use notifier::Notifier;
pub use query::QuerySurface;
