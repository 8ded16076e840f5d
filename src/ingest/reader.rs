//! Delimited-text reader and per-row validation

use super::report::IngestReport;
use crate::error::RecordError;
use crate::model::{split_attribute_year, state_name, Record};
use crate::Result;
use log::debug;
use std::io::Read;

/// Cells per row: id, state code, county, attribute, value
pub const COLUMNS: usize = 5;

/// Validate one row's cells into a record
pub fn parse_row(cells: &[&str]) -> std::result::Result<Record, RecordError> {
    if cells.len() < COLUMNS {
        return Err(RecordError::MissingColumns(cells.len()));
    }
    let [id, state_code, county, attribute, value] =
        [cells[0], cells[1], cells[2], cells[3], cells[4]];

    if id.is_empty() {
        return Err(RecordError::EmptyIdentifier("id"));
    }
    if state_name(state_code).is_none() {
        return Err(RecordError::UnknownStateCode(state_code.to_string()));
    }
    if county.is_empty() {
        return Err(RecordError::EmptyIdentifier("county"));
    }
    if attribute.is_empty() {
        return Err(RecordError::EmptyAttribute);
    }
    let value = value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RecordError::InvalidValue(value.to_string()))?;
    let (base, year) = split_attribute_year(attribute)
        .ok_or_else(|| RecordError::MalformedAttribute(attribute.to_string()))?;

    Ok(Record::new(state_code, county, base, year, value))
}

/// Check a record built outside the reader against the same rules
pub fn validate_record(record: &Record) -> std::result::Result<(), RecordError> {
    if state_name(&record.state_code).is_none() {
        return Err(RecordError::UnknownStateCode(record.state_code.clone()));
    }
    if record.county.is_empty() {
        return Err(RecordError::EmptyIdentifier("county"));
    }
    if record.attribute.is_empty() {
        return Err(RecordError::EmptyAttribute);
    }
    if !record.value.is_finite() {
        return Err(RecordError::InvalidValue(record.value.to_string()));
    }
    Ok(())
}

/// Read every row after the header, keeping valid records
///
/// Cells follow CSV quoting, so a quoted cell may hold commas. Blank lines
/// are ignored. Invalid rows are logged and listed in the report; only I/O
/// failures abort the read.
pub fn read_records<R: Read>(reader: R) -> Result<(Vec<Record>, IngestReport)> {
    let mut rows = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();
    let mut report = IngestReport::default();

    for row in rows.records() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                if let csv::ErrorKind::Utf8 { pos, .. } = err.kind() {
                    let line_no = pos.as_ref().map_or(0, |p| p.line() as usize);
                    debug!("Skipping line {}: {}", line_no, err);
                    report.rows += 1;
                    report.skip(line_no, RecordError::InvalidEncoding);
                    continue;
                }
                return Err(err.into());
            }
        };
        report.rows += 1;
        let line_no = row.position().map_or(0, |p| p.line() as usize);
        let cells: Vec<&str> = row.iter().collect();
        match parse_row(&cells) {
            Ok(record) => records.push(record),
            Err(err) => {
                debug!("Skipping line {}: {}", line_no, err);
                report.skip(line_no, err);
            }
        }
    }

    report.accepted = records.len();
    Ok((records, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_row() {
        let record = parse_row(&["12001", "FL", "Alachua", "Unemployment_rate_2001", "3.5"]).unwrap();
        assert_eq!(
            record,
            Record::new("FL", "Alachua", "Unemployment_rate", 2001, 3.5)
        );
    }

    #[test]
    fn test_parse_row_errors() {
        assert_eq!(
            parse_row(&["1", "FL", "Alachua", "Employed_2001"]),
            Err(RecordError::MissingColumns(4))
        );
        assert_eq!(
            parse_row(&["", "FL", "Alachua", "Employed_2001", "1"]),
            Err(RecordError::EmptyIdentifier("id"))
        );
        assert_eq!(
            parse_row(&["1", "PR", "Adjuntas", "Employed_2001", "1"]),
            Err(RecordError::UnknownStateCode("PR".into()))
        );
        assert_eq!(
            parse_row(&["1", "FL", "", "Employed_2001", "1"]),
            Err(RecordError::EmptyIdentifier("county"))
        );
        assert_eq!(
            parse_row(&["1", "FL", "Alachua", "", "1"]),
            Err(RecordError::EmptyAttribute)
        );
        assert_eq!(
            parse_row(&["1", "FL", "Alachua", "Employed_2001", "n/a"]),
            Err(RecordError::InvalidValue("n/a".into()))
        );
        assert_eq!(
            parse_row(&["1", "FL", "Alachua", "Employed_2001", "NaN"]),
            Err(RecordError::InvalidValue("NaN".into()))
        );
        assert_eq!(
            parse_row(&["1", "FL", "Alachua", "Employed_2001", "inf"]),
            Err(RecordError::InvalidValue("inf".into()))
        );
        assert_eq!(
            parse_row(&["1", "FL", "Alachua", "Employed_2001", "1e39"]),
            Err(RecordError::InvalidValue("1e39".into()))
        );
        assert_eq!(
            parse_row(&["1", "FL", "Alachua", "Employed_01", "1"]),
            Err(RecordError::MalformedAttribute("Employed_01".into()))
        );
    }

    #[test]
    fn test_read_records_skips_header_and_bad_rows() {
        let csv = "\
FIPS_Code,State,Area_Name,Attribute,Value
12001,FL,Alachua,Unemployment_rate_2001,3.5

1001,XX,Nowhere,Employed_2001,1
1001,AL,Autauga,Civilian_labor_force_2001,22081
";
        let (records, report) = read_records(Cursor::new(csv)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(report.rows, 3);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 4);
        assert_eq!(
            report.skipped[0].error,
            RecordError::UnknownStateCode("XX".into())
        );
    }

    #[test]
    fn test_read_records_quoted_cells() {
        let csv = "FIPS_Code,State,Area_Name,Attribute,Value\r\n\
\"1001\",\"AL\",\"Autauga County, AL\",\"Employed_2001\",\"1\"\r\n\
\"1003\",\"AL\",\"Baldwin\",\"Employed_2001\",\" 2.5 \"\r\n";
        let (records, report) = read_records(Cursor::new(csv)).unwrap();

        assert!(report.skipped.is_empty(), "{:?}", report.skipped);
        assert_eq!(
            records,
            vec![
                Record::new("AL", "Autauga County, AL", "Employed", 2001, 1.0),
                Record::new("AL", "Baldwin", "Employed", 2001, 2.5),
            ]
        );
    }

    #[test]
    fn test_read_records_rejects_non_finite_value() {
        let csv = "\
FIPS_Code,State,Area_Name,Attribute,Value
1,FL,Alachua,Employed_2001,NaN
";
        let (records, report) = read_records(Cursor::new(csv)).unwrap();

        assert!(records.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
        assert_eq!(
            report.skipped[0].error,
            RecordError::InvalidValue("NaN".into())
        );
    }

    #[test]
    fn test_validate_record() {
        assert!(validate_record(&Record::new("FL", "Alachua", "Employed", 2001, 1.0)).is_ok());
        assert_eq!(
            validate_record(&Record::new("ZZ", "Alachua", "Employed", 2001, 1.0)),
            Err(RecordError::UnknownStateCode("ZZ".into()))
        );
        assert_eq!(
            validate_record(&Record::new("FL", "Alachua", "Employed", 2001, f32::NAN)),
            Err(RecordError::InvalidValue("NaN".into()))
        );
    }
}
