#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Save/load codec for Torus Life grid snapshots.
//!
//! Snapshots are single-line strings carrying a domain prefix, a format
//! version, the grid dimensions, and a base64 payload, in that order. The
//! dimensions travel ahead of the payload so a corrupted or truncated file is
//! rejected before any cell data is interpreted, and the decoded cell count
//! is cross-checked against the declared dimensions. Save files are named
//! after the wall-clock save time so repeated saves never overwrite each
//! other; loading validates the entire snapshot before returning, which lets
//! callers swap their live grid atomically or keep it untouched on failure.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use torus_life_core::{GridError, GridState};

const SNAPSHOT_DOMAIN: &str = "life";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub const SNAPSHOT_HEADER: &str = "life:v1";
/// Extension applied to snapshot files written by [`save_to_dir`].
pub const SNAPSHOT_EXTENSION: &str = "life";
/// Stem shared by all snapshot files, completed by a timestamp.
const SNAPSHOT_FILE_STEM: &str = "saved_game_state";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableSnapshot {
    cells: Vec<bool>,
}

/// Errors that can occur while saving or loading grid snapshots.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The underlying storage could not be read or written.
    #[error("snapshot storage failed: {0}")]
    Io(#[from] io::Error),
    /// The provided snapshot was empty or contained only whitespace.
    #[error("snapshot payload was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    #[error("snapshot is missing the prefix")]
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    #[error("snapshot is missing the version")]
    MissingVersion,
    /// The encoded snapshot did not include grid dimensions.
    #[error("snapshot is missing the grid dimensions")]
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    #[error("snapshot is missing the payload")]
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    #[error("snapshot prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    #[error("snapshot version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the encoded snapshot.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode snapshot payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse snapshot payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    /// The decoded cells disagreed with the declared dimensions.
    #[error("snapshot declares {expected} cells but the payload holds {actual}")]
    CellCountMismatch {
        /// Cell count required by the declared dimensions.
        expected: usize,
        /// Cell count actually decoded from the payload.
        actual: usize,
    },
}

impl PersistenceError {
    /// Reports whether the error indicates a corrupt record rather than an
    /// I/O failure, so callers can phrase user-facing messages accordingly.
    #[must_use]
    pub fn is_corrupt_record(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

/// Encodes a grid into a single-line snapshot string.
#[must_use]
pub fn encode_grid(grid: &GridState) -> String {
    let payload = SerializableSnapshot {
        cells: grid.view().iter().collect(),
    };
    let json = serde_json::to_vec(&payload).expect("grid snapshot serialization never fails");
    let encoded = STANDARD_NO_PAD.encode(json);
    format!(
        "{SNAPSHOT_HEADER}:{}x{}:{encoded}",
        grid.width(),
        grid.height()
    )
}

/// Decodes a snapshot string back into a grid.
pub fn decode_grid(value: &str) -> Result<GridState, PersistenceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PersistenceError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(PersistenceError::MissingPrefix)?;
    let version = parts.next().ok_or(PersistenceError::MissingVersion)?;
    let dimensions = parts.next().ok_or(PersistenceError::MissingDimensions)?;
    let payload = parts.next().ok_or(PersistenceError::MissingPayload)?;

    if domain != SNAPSHOT_DOMAIN {
        return Err(PersistenceError::InvalidPrefix(domain.to_owned()));
    }
    if version != SNAPSHOT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(version.to_owned()));
    }

    let (width, height) = parse_dimensions(dimensions)?;
    let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
    let decoded: SerializableSnapshot = serde_json::from_slice(&bytes)?;

    GridState::from_cells(width, height, decoded.cells).map_err(|error| match error {
        GridError::CellCountMismatch { expected, actual } => {
            PersistenceError::CellCountMismatch { expected, actual }
        }
        _ => PersistenceError::InvalidDimensions(dimensions.to_owned()),
    })
}

/// Writes a snapshot of the grid into `dir` under a timestamped name.
///
/// The file name follows `saved_game_state_<YYYYMMDD_HHMMSS>.life` using the
/// UTC save time; when two saves land within the same second, a numeric
/// suffix keeps the names distinct so no snapshot is ever overwritten.
/// Returns the path of the created file.
pub fn save_to_dir(dir: &Path, grid: &GridState) -> Result<PathBuf, PersistenceError> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let path = unique_snapshot_path(dir, timestamp);
    fs::write(&path, encode_grid(grid))?;
    Ok(path)
}

/// Reads a snapshot file and reconstructs the grid it describes.
pub fn load(path: &Path) -> Result<GridState, PersistenceError> {
    let contents = fs::read_to_string(path)?;
    decode_grid(&contents)
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), PersistenceError> {
    let (width, height) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| PersistenceError::InvalidDimensions(dimensions.to_owned()))?;

    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|_| PersistenceError::InvalidDimensions(dimensions.to_owned()))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|_| PersistenceError::InvalidDimensions(dimensions.to_owned()))?;

    if width == 0 || height == 0 {
        return Err(PersistenceError::InvalidDimensions(dimensions.to_owned()));
    }

    Ok((width, height))
}

fn unique_snapshot_path(dir: &Path, timestamp_secs: u64) -> PathBuf {
    let stamp = format_timestamp(timestamp_secs);
    let mut path = dir.join(format!("{SNAPSHOT_FILE_STEM}_{stamp}.{SNAPSHOT_EXTENSION}"));
    let mut suffix = 1u32;
    while path.exists() {
        path = dir.join(format!(
            "{SNAPSHOT_FILE_STEM}_{stamp}_{suffix}.{SNAPSHOT_EXTENSION}"
        ));
        suffix += 1;
    }
    path
}

/// Formats seconds since the Unix epoch as `YYYYMMDD_HHMMSS` in UTC.
fn format_timestamp(timestamp_secs: u64) -> String {
    let days = (timestamp_secs / 86_400) as i64;
    let seconds_of_day = timestamp_secs % 86_400;
    let (year, month, day) = civil_from_days(days);
    let hours = seconds_of_day / 3_600;
    let minutes = seconds_of_day % 3_600 / 60;
    let seconds = seconds_of_day % 60;
    format!("{year:04}{month:02}{day:02}_{hours:02}{minutes:02}{seconds:02}")
}

/// Converts days since 1970-01-01 into a UTC civil date.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let day_of_era = z - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_index = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * month_index + 2) / 5 + 1) as u32;
    let month = if month_index < 10 {
        (month_index + 3) as u32
    } else {
        (month_index - 9) as u32
    };
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
