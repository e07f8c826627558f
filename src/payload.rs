//! Decoding of response bodies into core types.
//!
//! Scalars arrive as bare numeric strings, logs and scans as JSON. A body that
//! fails to decode is an error for that one update; the caller logs it and the
//! widget keeps its previous state.

use serde::Deserialize;
use serde_json::{Map, Value};
use telemetry_common::{LogMessage, RangeScan, ScanPoint};
use tracing::trace;

use crate::error::PayloadError;

/// Key carrying the sensor's rotation speed in a scan object.
const ROTATION_SPEED_KEY: &str = "ROTATION_SPEED";

/// `[severity, source, body]`
#[derive(Debug, Deserialize)]
struct RawLogEntry(String, String, String);

/// `[distance_mm, intensity, error_code]`
#[derive(Debug, Deserialize)]
struct RawReading(f32, f64, i64);

/// Parse a bare numeric body such as `"87.5"` or `"1\n"`.
pub fn parse_number(body: &str) -> Result<f32, PayloadError> {
    let trimmed = body.trim();
    match trimmed.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(PayloadError::NotANumber(trimmed.to_owned())),
    }
}

/// Parse a 0/1 flag. Any non-zero number is `true`.
pub fn parse_flag(body: &str) -> Result<bool, PayloadError> { parse_number(body).map(|v| v != 0.0) }

/// Parse a batch of log messages, preserving order.
pub fn parse_logs(body: &str) -> Result<Vec<LogMessage>, PayloadError> {
    let entries: Vec<RawLogEntry> = serde_json::from_str(body)?;
    Ok(entries
        .iter()
        .map(|RawLogEntry(label, source, text)| LogMessage::new(label, source, text))
        .collect())
}

/// Parse one sweep.
///
/// Readings with a non-zero error code are treated as absent. Keys that are
/// not angles are skipped, except the rotation speed, which is kept on the
/// scan. Angles outside `0..360` are skipped.
pub fn parse_scan(body: &str) -> Result<RangeScan, PayloadError> {
    let object: Map<String, Value> = serde_json::from_str(body)?;
    let mut scan = RangeScan::new();

    for (key, value) in object {
        if key == ROTATION_SPEED_KEY {
            scan.rotation_speed = value.as_f64().map(|v| v as f32).filter(|v| v.is_finite());
            continue;
        }
        let Ok(angle) = key.trim().parse::<usize>() else {
            trace!(%key, "skipping non-angle key");
            continue;
        };

        let RawReading(distance, intensity, error) =
            serde_json::from_value(value).map_err(|_| PayloadError::ScanEntry {
                key: key.clone(),
                reason: "expected [distance, intensity, error]",
            })?;
        if error != 0 {
            continue;
        }

        let point = ScanPoint {
            distance,
            intensity: intensity.clamp(0.0, f64::from(u16::MAX)) as u16,
        };
        if !scan.insert(angle, point) {
            trace!(angle, distance, "reading rejected");
        }
    }

    Ok(scan)
}
