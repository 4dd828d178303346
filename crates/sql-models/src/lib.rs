//! Azure SQL management request records.
//!
//! This crate provides the structured request bodies that command-line
//! arguments are assembled into, together with the per-type property
//! metadata (which properties exist and which are required) that drives
//! flag registration:
//!
//! - [`Value`] - A dynamically typed namespace value
//! - [`ComplexType`] - The builder contract each record implements
//! - [`Properties`] - Property bag handed to a builder
//! - [`ModelObject`] - A built record with its type erased
//!
//! # Example
//!
//! ```rust
//! use sql_models::{ComplexType, Properties, Sku};
//!
//! let props = Properties::for_type::<Sku>()
//!     .with("name", "GP_Gen5_2")
//!     .with("capacity", 2i64);
//! let sku = Sku::build(props).unwrap();
//!
//! assert_eq!(sku.capacity, Some(2));
//! assert!(Sku::is_required("name"));
//! ```

pub mod database;
mod error;
pub mod job;
pub mod managed;
pub mod model;
pub mod server;
pub mod transfer;
pub mod value;

pub use database::{Database, ElasticPool, ElasticPoolPerDatabaseSettings, Sku};
pub use error::{ModelError, Result};
pub use job::{JobSchedule, JobStep, JobStepAction, JobStepExecutionOptions, JobStepOutput};
pub use managed::{ManagedDatabase, ManagedInstance};
pub use model::{ComplexType, Properties, PropertySpec};
pub use server::{Server, ServerAzureADAdministrator};
pub use transfer::{ExportRequest, ImportExtensionRequest};
pub use value::{ModelObject, Value};
