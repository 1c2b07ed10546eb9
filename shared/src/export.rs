//! CSV export of saved locations

use csv::{QuoteStyle, WriterBuilder};
use thiserror::Error;

use crate::models::SavedLocation;

/// Header row of the NDVI export
pub const CSV_HEADER: &str = "Location,Lat,Lon,Date,NDVI";

/// Suggested download name
pub const CSV_FILE_NAME: &str = "nasa_ndvi.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

/// Export every location's full NDVI series, one row per (location, bucket).
///
/// Location name and month label are always quoted, even when they look
/// numeric. NDVI is written with 4 decimals.
pub fn export_locations_csv(locations: &[SavedLocation]) -> Result<String, ExportError> {
    let mut buffer = Vec::with_capacity(64 + locations.len() * 10 * 48);
    buffer.extend_from_slice(CSV_HEADER.as_bytes());
    buffer.push(b'\n');

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(buffer);

    for location in locations {
        let lat = location.lat.to_string();
        let lon = location.lon.to_string();
        let name = quoted(&location.name);
        for (label, value) in location.ndvi.labelled() {
            let ndvi = format!("{:.4}", value);
            wtr.write_record([
                name.as_str(),
                lat.as_str(),
                lon.as_str(),
                quoted(label).as_str(),
                ndvi.as_str(),
            ])?;
        }
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}

/// Wrap a text field in quotes, doubling any embedded quote
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthlySeries;
    use crate::types::Coordinate;

    fn location(name: &str, lat: f64, lon: f64, value: f64) -> SavedLocation {
        SavedLocation::new(
            name,
            Coordinate::new(lat, lon).unwrap(),
            MonthlySeries::new([value; 10]),
        )
    }

    #[test]
    fn test_export_header_and_row_format() {
        let csv = export_locations_csv(&[location("Kyiv", 50.45, 30.52, 0.16)]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(lines.next(), Some("\"Kyiv\",50.45,30.52,\"Jan\",0.1600"));
        assert_eq!(lines.last(), Some("\"Kyiv\",50.45,30.52,\"Oct\",0.1600"));
    }

    #[test]
    fn test_export_row_count() {
        let locations = vec![
            location("A", 1.0, 2.0, 0.1),
            location("B", -3.0, 4.5, 0.9),
            location("C", 0.0, 0.0, 0.5),
        ];
        let csv = export_locations_csv(&locations).unwrap();
        assert_eq!(csv.lines().count(), 1 + locations.len() * 10);
    }

    #[test]
    fn test_export_escapes_quotes_in_names() {
        let csv = export_locations_csv(&[location("The \"Park\", North", 1.0, 2.0, 0.5)]).unwrap();
        assert!(csv.contains("\"The \"\"Park\"\", North\",1,2,\"Jan\",0.5000"));
    }

    #[test]
    fn test_export_quotes_numeric_looking_names() {
        let csv = export_locations_csv(&[location("1984", 1.0, 2.0, 0.5)]).unwrap();
        assert_eq!(csv.lines().nth(1), Some("\"1984\",1,2,\"Jan\",0.5000"));
    }

    #[test]
    fn test_export_empty() {
        assert_eq!(export_locations_csv(&[]).unwrap(), format!("{}\n", CSV_HEADER));
    }
}
