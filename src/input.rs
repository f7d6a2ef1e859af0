//! Coordinate CSV input.
//!
//! Reads coordinate rows from a CSV file with a header row. By default the
//! columns are located by their canonical header names (`latitude`,
//! `longitude`, and optionally `distance_km`, `bearing_degrees`); the CLI can
//! override the selection with explicit header names or positional indexes.
//!
//! Rows that cannot be parsed or whose coordinates are outside geographic
//! range are skipped with a warning; a bad row never aborts the read.

use std::path::Path;

use csv::StringRecord;
use log::{debug, warn};

use crate::config::{BEARING_COLUMN, DISTANCE_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN};
use crate::error_handling::InputError;
use crate::models::CoordinateRecord;

/// Which CSV columns carry the coordinate fields.
///
/// The first two selected columns are latitude and longitude; a third and
/// fourth, when given, are the distance and bearing columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelection {
    /// Locate columns by their canonical header names.
    All,
    /// Locate columns by explicit header names.
    Names(Vec<String>),
    /// Locate columns by zero-based positional index.
    Indexes(Vec<usize>),
}

impl ColumnSelection {
    /// Builds a selection from the mutually exclusive CLI options.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ColumnSpec`] when a provided spec cannot be
    /// parsed or selects fewer than two columns.
    pub fn from_cli(
        names: Option<&str>,
        indexes: Option<&str>,
    ) -> Result<ColumnSelection, InputError> {
        match (names, indexes) {
            (Some(spec), _) => Self::parse_names(spec),
            (None, Some(spec)) => Self::parse_indexes(spec),
            (None, None) => Ok(ColumnSelection::All),
        }
    }

    fn parse_names(spec: &str) -> Result<ColumnSelection, InputError> {
        let names: Vec<String> = spec
            .split(',')
            .map(|name| name.trim().to_string())
            .collect();
        if names.len() < 2 || names.len() > 4 || names.iter().any(String::is_empty) {
            return Err(InputError::ColumnSpec(spec.to_string()));
        }
        Ok(ColumnSelection::Names(names))
    }

    fn parse_indexes(spec: &str) -> Result<ColumnSelection, InputError> {
        let indexes: Vec<usize> = spec
            .split(',')
            .map(|index| index.trim().parse::<usize>())
            .collect::<Result<_, _>>()
            .map_err(|_| InputError::ColumnSpec(spec.to_string()))?;
        if indexes.len() < 2 || indexes.len() > 4 {
            return Err(InputError::ColumnSpec(spec.to_string()));
        }
        Ok(ColumnSelection::Indexes(indexes))
    }
}

/// Resolved positions of the coordinate columns within a CSV header.
#[derive(Debug)]
struct ColumnLayout {
    latitude: usize,
    longitude: usize,
    distance_km: Option<usize>,
    bearing_degrees: Option<usize>,
}

fn position_of(headers: &StringRecord, name: &str) -> Result<usize, InputError> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| InputError::MissingColumn(name.to_string()))
}

fn resolve_layout(
    headers: &StringRecord,
    selection: &ColumnSelection,
) -> Result<ColumnLayout, InputError> {
    match selection {
        ColumnSelection::All => Ok(ColumnLayout {
            latitude: position_of(headers, LATITUDE_COLUMN)?,
            longitude: position_of(headers, LONGITUDE_COLUMN)?,
            distance_km: position_of(headers, DISTANCE_COLUMN).ok(),
            bearing_degrees: position_of(headers, BEARING_COLUMN).ok(),
        }),
        ColumnSelection::Names(names) => Ok(ColumnLayout {
            latitude: position_of(headers, &names[0])?,
            longitude: position_of(headers, &names[1])?,
            distance_km: names.get(2).map(|n| position_of(headers, n)).transpose()?,
            bearing_degrees: names.get(3).map(|n| position_of(headers, n)).transpose()?,
        }),
        ColumnSelection::Indexes(indexes) => {
            for &index in indexes {
                if index >= headers.len() {
                    return Err(InputError::MissingColumn(format!("index {index}")));
                }
            }
            Ok(ColumnLayout {
                latitude: indexes[0],
                longitude: indexes[1],
                distance_km: indexes.get(2).copied(),
                bearing_degrees: indexes.get(3).copied(),
            })
        }
    }
}

/// Reads coordinate rows from a CSV file.
///
/// The file must have a header row. Unparseable rows and coordinates outside
/// geographic range are skipped with a warning.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or the selected columns
/// are not present in the header.
pub fn read_coordinates(
    path: &Path,
    selection: &ColumnSelection,
) -> Result<Vec<CoordinateRecord>, InputError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let layout = resolve_layout(&headers, selection)?;
    debug!("Resolved CSV columns: {layout:?}");

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Failed to read CSV record on line {}: {e}", line + 2);
                continue;
            }
        };
        if let Some(row) = parse_row(&record, &layout, line + 2) {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn parse_row(record: &StringRecord, layout: &ColumnLayout, line: usize) -> Option<CoordinateRecord> {
    let latitude = parse_required(record, layout.latitude, "latitude", line)?;
    let longitude = parse_required(record, layout.longitude, "longitude", line)?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        warn!("Skipping line {line}: coordinate ({latitude}, {longitude}) out of range");
        return None;
    }

    let distance_km = layout
        .distance_km
        .and_then(|index| parse_optional(record, index, "distance_km", line))
        .filter(|&distance| {
            if distance >= 0.0 {
                true
            } else {
                warn!("Ignoring negative distance_km on line {line}: {distance}");
                false
            }
        });
    let bearing_degrees = layout
        .bearing_degrees
        .and_then(|index| parse_optional(record, index, "bearing_degrees", line))
        .filter(|&bearing| {
            if (0.0..=360.0).contains(&bearing) {
                true
            } else {
                warn!("Ignoring out-of-range bearing_degrees on line {line}: {bearing}");
                false
            }
        });

    Some(CoordinateRecord {
        latitude,
        longitude,
        distance_km,
        bearing_degrees,
    })
}

fn parse_required(record: &StringRecord, index: usize, field: &str, line: usize) -> Option<f64> {
    let raw = record.get(index).map(str::trim).unwrap_or("");
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!("Skipping line {line}: unparseable {field} value {raw:?}");
            None
        }
    }
}

fn parse_optional(record: &StringRecord, index: usize, field: &str, line: usize) -> Option<f64> {
    let raw = record.get(index).map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!("Ignoring unparseable {field} value on line {line}: {raw:?}");
            None
        }
    }
}
