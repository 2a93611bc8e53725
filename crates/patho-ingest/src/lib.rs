//! Loading lab-result batches, QC samples, reports and configuration.
//!
//! Lab results and QC samples are read from CSV or JSON, chosen by file
//! extension. CSV rows that cannot be turned into a record are returned as
//! [`RejectedRow`]s alongside the loaded records instead of failing the
//! whole file.

pub mod config;
pub mod csv_rows;
pub mod error;
pub mod format;
pub mod reports;
pub mod results;

pub use config::{CONFIG_ENV_VAR, PathoConfig, load_config, resolve_config};
pub use error::{IngestError, Result};
pub use format::InputFormat;
pub use reports::{load_reports, save_reports};
pub use results::{Batch, RejectedRow, load_lab_results, load_qc_samples};
