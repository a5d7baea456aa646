//! Dual-channel response decoding.
//!
//! A successful analysis response carries two channels in one HTTP reply:
//! the binary GeoTIFF body and a JSON statistics array in a side-channel
//! header. Decoding is a single step from the captured [`ServiceReply`] to a
//! composite [`Estimation`], so a partially decoded result can never leak
//! out of the client.

use serde::Deserialize;

use crate::client::transport::ServiceReply;
use crate::error::AnalysisError;
use crate::models::StatisticsSet;
use crate::overlay::RasterArtifact;

/// Decoded analysis result: the renderable raster plus its statistics.
#[derive(Debug, Clone)]
pub struct Estimation {
    pub raster: RasterArtifact,
    pub statistics: StatisticsSet,
}

#[derive(Deserialize)]
struct ValidationBody {
    detail: String,
}

/// Decode a captured reply into an [`Estimation`] or the matching failure.
///
/// - 2xx: body becomes the raster; an absent statistics header means an
///   empty set (not an error). A present but malformed header is a decode
///   failure for the whole request.
/// - 400 with `{"detail": ...}`: the detail string is surfaced verbatim.
/// - 401/403: the caller must re-authenticate.
/// - anything else: generic service failure.
pub fn decode_reply(reply: ServiceReply) -> Result<Estimation, AnalysisError> {
    match reply.status {
        200..=299 => {
            let statistics = match reply.statistics_header {
                None => StatisticsSet::empty(),
                Some(raw) => serde_json::from_str(&raw)
                    .map_err(|e| AnalysisError::Decode(format!("statistics header: {e}")))?,
            };
            Ok(Estimation {
                raster: RasterArtifact::geotiff(reply.body),
                statistics,
            })
        }
        400 => match serde_json::from_slice::<ValidationBody>(&reply.body) {
            Ok(body) => Err(AnalysisError::Validation(body.detail)),
            Err(_) => Err(AnalysisError::Service { status: 400 }),
        },
        401 | 403 => Err(AnalysisError::Unauthenticated),
        status => Err(AnalysisError::Service { status }),
    }
}
