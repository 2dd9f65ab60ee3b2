// Tablero Core Library
// Territorial analytics dashboard: scope state, fetch batches, view derivation

pub mod api;
pub mod config;
pub mod derive;
pub mod map;
pub mod records;
pub mod scope;
pub mod store;
pub mod telemetry;

// Export core types
pub use api::{AnalyticsApi, HttpAnalyticsApi};
pub use config::ApiConfig;
pub use map::{BoundaryDocument, MapView, RegionFeature};
pub use records::Summary;
pub use scope::{RegionClick, Scope};
pub use store::{DashboardStore, DashboardViews};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableroError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Map error: {0}")]
    MapError(String),

    #[error("Scope error: {0}")]
    ScopeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
pub type Result<T> = std::result::Result<T, TableroError>;
