//! donorpanel-core — donor giving feature panel pipeline.
//!
//! Turns a sparse per-transaction giving ledger into a dense donor ×
//! fiscal-year panel: aggregated totals and counts, a forward-looking
//! churn label, and windowed velocity/acceleration features. The
//! pipeline is a pure, deterministic, in-memory batch; persistence is
//! an export concern (`store`), not a pipeline one.

pub mod accel;
pub mod aggregate;
pub mod churn;
pub mod config;
pub mod error;
pub mod grid;
pub mod ledger;
pub mod panel;
pub mod pipeline;
pub mod rng;
pub mod store;
pub mod synthetic;
pub mod types;
pub mod velocity;

pub use config::{FinalYearPolicy, PanelConfig};
pub use error::{PanelError, PanelResult};
pub use ledger::{GivingLedger, Transaction};
pub use panel::FeaturePanelRow;
pub use pipeline::FeaturePipeline;
