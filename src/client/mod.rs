//! Analysis service client: transport boundary, response decoding, and
//! request tracking with supersede semantics.

pub mod orchestrator;
pub mod response;
pub mod tracker;
pub mod transport;

pub use orchestrator::AnalysisOrchestrator;
pub use response::{decode_reply, Estimation};
pub use tracker::{AnalysisRequest, DisplayState, Outcome, RequestTracker};
pub use transport::{
    AnalysisTransport, Credentials, HttpTransport, ServiceReply, Tier, TransportError,
};
