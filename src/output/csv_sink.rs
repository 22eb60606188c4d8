//! CSV output of the collected catalog
//!
//! The file starts with a fixed header row followed by one row per record,
//! fields written exactly as extracted. Output is UTF-8.

use crate::crawler::Record;
use crate::WriteFailure;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Column names of the output file
pub const HEADER: [&str; 5] = ["Title", "Price", "Availability", "Rating", "Product URL"];

/// Writes the header and the records to any writer
///
/// The writer is flushed before returning.
pub fn write_records<W: Write>(records: &[Record], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for record in records {
        wtr.write_record(record.fields())?;
    }
    wtr.flush()?;

    Ok(())
}

/// Writes the catalog to a CSV file
///
/// Any existing file at `destination` is truncated. The file handle is
/// closed on every return path.
///
/// # Returns
///
/// * `Ok(())` - Header and all rows written
/// * `Err(WriteFailure)` - The file could not be created or written
pub fn write_catalog(records: &[Record], destination: &Path) -> Result<(), WriteFailure> {
    let file = File::create(destination).map_err(|source| WriteFailure::Open {
        path: destination.to_path_buf(),
        source,
    })?;

    write_records(records, file).map_err(|source| WriteFailure::Write {
        path: destination.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "Wrote {} rows to {}",
        records.len() + 1,
        destination.display()
    );

    Ok(())
}
