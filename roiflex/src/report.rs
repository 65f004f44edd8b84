//! CSV files: overlap reports, box lists and key tables.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, info};

use crate::contour::BoxRecord;
use crate::error::{Error, Result};
use crate::overlap::{KeyCoords, KeyTable, OverlapRecord};

const OVERLAP_COLUMNS: [&str; 3] = ["roi_index", "ims_index", "percentage"];
const KEY_COLUMNS: [&str; 4] = ["x_original", "y_original", "x_minimized", "y_minimized"];
/// Key table columns holding, in order, the four [`KeyCoords`] fields.
const KEY_TABLE_COLUMNS: [&str; 4] = ["x", "y", "x_minimized", "y_minimized"];

// ============================================================================
// Writers
// ============================================================================

/// Writes `roi_index,ims_index,percentage`, plus the four key columns when
/// any record carries key coordinates. Records without coordinates leave
/// those columns empty.
///
/// Coverage always carries a decimal point (`2.0`, `0.25`).
pub fn write_overlap_csv(records: &[OverlapRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = WriterBuilder::new().from_writer(BufWriter::new(file));
    write_overlap(records, &mut writer)?;
    writer.flush().map_err(|e| Error::io(path, e))?;

    info!("Wrote {} overlap records to {}", records.len(), path.display());
    Ok(())
}

fn write_overlap<W: Write>(records: &[OverlapRecord], writer: &mut csv::Writer<W>) -> Result<()> {
    let with_key = records.iter().any(|r| r.key.is_some());

    let mut header: Vec<&str> = OVERLAP_COLUMNS.to_vec();
    if with_key {
        header.extend(KEY_COLUMNS);
    }
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.roi_index.to_string(),
            record.grid_value.to_string(),
            format_coverage(record.coverage),
        ];
        if with_key {
            match record.key {
                Some(key) => row.extend(
                    [key.x_original, key.y_original, key.x_minimized, key.y_minimized]
                        .iter()
                        .map(i64::to_string),
                ),
                None => row.extend(std::iter::repeat_n(String::new(), KEY_COLUMNS.len())),
            }
        }
        writer.write_record(&row)?;
    }

    Ok(())
}

/// Shortest round-trip form that keeps a decimal point on whole numbers.
fn format_coverage(coverage: f64) -> String {
    format!("{:?}", coverage)
}

/// Writes `index,x1,y1,x2,y2,p1,p2`.
pub fn write_boxes_csv(boxes: &[BoxRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = WriterBuilder::new().from_writer(BufWriter::new(file));

    for record in boxes {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|e| Error::io(path, e))?;

    info!("Wrote {} boxes to {}", boxes.len(), path.display());
    Ok(())
}

// ============================================================================
// Readers
// ============================================================================

/// Reads a box list written by [`write_boxes_csv`].
pub fn read_boxes_csv(path: impl AsRef<Path>) -> Result<Vec<BoxRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = ReaderBuilder::new().from_reader(BufReader::new(file));

    let boxes = reader
        .deserialize()
        .collect::<std::result::Result<Vec<BoxRecord>, csv::Error>>()?;

    debug!("Read {} boxes from {}", boxes.len(), path.display());
    Ok(boxes)
}

/// Reads a key table.
///
/// The first column holds the index value; `x`, `y`, `x_minimized` and
/// `y_minimized` are located by header name and may appear in any order.
pub fn read_key_table(path: impl AsRef<Path>) -> Result<KeyTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let table = parse_key_table(BufReader::new(file))?;

    debug!("Read {} key table rows from {}", table.len(), path.display());
    Ok(table)
}

fn parse_key_table<R: Read>(input: R) -> Result<KeyTable> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(Error::Config("key table has no columns".to_string()));
    }
    let mut columns = [0usize; 4];
    for (slot, name) in columns.iter_mut().zip(KEY_TABLE_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::Config(format!("key table is missing the '{}' column", name)))?;
    }

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let field = |col: usize| parse_integer(&record, col, line + 2);
        let key = field(0)?;
        let coords = KeyCoords {
            x_original: field(columns[0])?,
            y_original: field(columns[1])?,
            x_minimized: field(columns[2])?,
            y_minimized: field(columns[3])?,
        };
        rows.push((key, coords));
    }

    Ok(KeyTable::new(rows))
}

/// Integer cell; whole-valued floats such as `12.0` are accepted.
fn parse_integer(record: &StringRecord, col: usize, line: usize) -> Result<i64> {
    let text = record.get(col).unwrap_or_default();
    if let Ok(v) = text.parse::<i64>() {
        return Ok(v);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        _ => Err(Error::Config(format!(
            "key table line {}, column {}: '{}' is not an integer",
            line,
            col + 1,
            text
        ))),
    }
}
