//! Agency Core - data access and the dashboard service
//!
//! - Store traits per record kind, consumed only by [`Dashboard`]
//! - [`InMemoryStore`] seeded from a JSON [`Dataset`]
//! - [`AgencyConfig`] from TOML plus environment overrides
//! - [`AgencyError`] rolling up model, filter, store, dataset and config errors
//!
//! # Example
//!
//! ```rust,ignore
//! use agency_core::prelude::*;
//!
//! let config = AgencyConfig::load(Some(Path::new("agency.toml")))?;
//! let dashboard = Dashboard::open(&config).await?;
//! let board = dashboard.task_board(&TaskFilter::from_pairs([("priority", "High")])?).await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod input;
pub mod memory;
pub mod store;

pub use config::AgencyConfig;
pub use dashboard::{Dashboard, ProjectOverview, RecentFiles, ReportSeries, Stores, TaskRow};
pub use dataset::Dataset;
pub use error::{AgencyError, AgencyResult, ConfigError, DatasetError, StoreError, StoreResult};
pub use input::{NewDocument, NewTask};
pub use memory::InMemoryStore;
pub use store::{ClientStore, DocumentStore, EventStore, MeetingStore, MessageStore, ProjectStore, TaskStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the dashboard service
    pub use crate::{AgencyConfig, AgencyError, AgencyResult, Dashboard, Dataset, InMemoryStore, NewTask, Stores};
    pub use crate::{DocumentStore, MessageStore, TaskStore};
    pub use agency_view::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
