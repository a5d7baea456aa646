//! # carbonmap
//!
//! Client-side controller for the biomass map analysis pipeline.
//!
//! This crate implements the geospatial selection and analysis request
//! controller that sits between an interactive map widget and the external
//! raster-analysis service. A user draws or imports a region, the controller
//! submits it for biomass/carbon estimation, and the decoded result (a
//! GeoTIFF raster plus summary statistics) is handed to the overlay layer.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Geometry and statistics domain types, GeoJSON interchange
//! - [`store`]: The in-memory region store awaiting submission
//! - [`draw`]: Pure state machine for the interactive draw tools
//! - [`import`]: All-or-nothing GeoJSON file import
//! - [`client`]: Analysis service transport, response decode, and request
//!   tracking with supersede semantics
//! - [`overlay`]: Single-slot raster overlay and statistics formatting
//! - [`controller`]: Event facade tying the pieces together
//!
//! ## Concurrency
//!
//! All controller state is mutated from a single logical thread of events.
//! Network submissions run as spawned tasks; their resolutions re-enter
//! through [`client::tracker::RequestTracker`], which discards results for
//! any request that is no longer current.

pub mod client;
pub mod config;
pub mod controller;
pub mod draw;
pub mod error;
pub mod import;
pub mod models;
pub mod overlay;
pub mod store;

pub use client::orchestrator::AnalysisOrchestrator;
pub use client::response::Estimation;
pub use client::tracker::{DisplayState, RequestTracker};
pub use client::transport::{AnalysisTransport, Credentials, HttpTransport, ServiceReply, Tier};
pub use config::AnalysisConfig;
pub use controller::MapController;
pub use draw::{CompletedShape, DrawEvent, DrawMode, DrawTool, ToolKind};
pub use error::{AnalysisError, Result};
pub use import::{ImportError, ImportLimits, ImportOutcome};
pub use models::{Bounds, FeatureCollection, Geometry, LatLng, Statistic, StatisticsSet};
pub use overlay::{OverlayHandle, OverlayRenderer, RasterArtifact};
pub use store::RegionStore;
