// FleetDex - core/export.rs
//
// CSV and JSON export of filtered directory records.
// Core layer: writes to any Write trait object.

use crate::core::model::{BrandRecord, LocationRecord};
use crate::util::constants;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Export filtered locations to CSV format.
///
/// Writes: id, name, city, vehicles, services, rating, trending, featured
pub fn export_locations_csv<W: Write>(
    records: &[&LocationRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_export_size(records.len())?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "id", "name", "city", "vehicles", "services", "rating", "trending", "featured",
        ])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for record in records {
        csv_writer
            .write_record([
                &record.id,
                &record.name,
                &record.city,
                &record.vehicle_count.to_string(),
                &record.service_count.to_string(),
                &format!("{:.1}", record.rating),
                &record.trending.to_string(),
                &record.featured.to_string(),
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export filtered brands to CSV format.
///
/// Writes: id, name, category, country, established, vehicles, rating, featured
pub fn export_brands_csv<W: Write>(
    records: &[&BrandRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_export_size(records.len())?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "id",
            "name",
            "category",
            "country",
            "established",
            "vehicles",
            "rating",
            "featured",
        ])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for record in records {
        csv_writer
            .write_record([
                &record.id,
                &record.name,
                &record.category,
                &record.country,
                &record.established.to_string(),
                &record.vehicle_count.to_string(),
                &format!("{:.1}", record.rating),
                &record.featured.to_string(),
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export filtered records to JSON format (array of objects).
pub fn export_json<T: Serialize, W: Write>(
    records: &[&T],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_export_size(records.len())?;
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

fn check_export_size(count: usize) -> Result<(), ExportError> {
    if count > constants::MAX_EXPORT_RECORDS {
        return Err(ExportError::TooManyRecords {
            count,
            max: constants::MAX_EXPORT_RECORDS,
        });
    }
    Ok(())
}
