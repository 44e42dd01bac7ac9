//! Decoding of `/api/lidar-data` responses on the client side

use thiserror::Error;
use tracing::{trace, warn};

use super::data::Sweep;
use super::generator::POINTS_PER_SWEEP;

/// Why an update cycle failed to produce a sweep
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure, CORS rejection, aborted request...
    #[error("request failed: {0}")]
    Transport(String),
    /// Server answered with a non-success status
    #[error("server responded with status {0}")]
    Status(u16),
    /// Body was not a sweep
    #[error("malformed sweep payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Parse a response body into a sweep
pub fn parse_sweep(body: &str) -> Result<Sweep, FetchError> {
    trace!(len = body.len(), "Parsing sweep");

    let sweep: Sweep = serde_json::from_str(body)?;

    if sweep.count != sweep.points.len() {
        warn!(
            count = sweep.count,
            points = sweep.points.len(),
            "Sweep count does not match point list"
        );
    } else if sweep.count != POINTS_PER_SWEEP {
        trace!(count = sweep.count, "Sweep with unusual point count");
    }

    Ok(sweep)
}
