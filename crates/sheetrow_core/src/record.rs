use sheetrow_error::{Result, SheetError};

use crate::cell::{CellValue, format_row};

/// One row of the table.
///
/// Field order is the column order in the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub birthdate: String,
    pub age: String,
    pub eyecolor: String,
}

/// Describes one field of a [`Record`]: its header name and how to read and
/// write it.
#[derive(Clone, Copy)]
pub struct RecordField {
    pub header: &'static str,
    pub get: fn(&Record) -> &str,
    pub set: fn(&mut Record, String),
}

impl std::fmt::Debug for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordField")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// Fields of a record, in column order.
pub const RECORD_FIELDS: &[RecordField] = &[
    RecordField {
        header: "Name",
        get: |r| r.name.as_str(),
        set: |r, v| r.name = v,
    },
    RecordField {
        header: "Birthdate",
        get: |r| r.birthdate.as_str(),
        set: |r, v| r.birthdate = v,
    },
    RecordField {
        header: "Age",
        get: |r| r.age.as_str(),
        set: |r, v| r.age = v,
    },
    RecordField {
        header: "Eyecolor",
        get: |r| r.eyecolor.as_str(),
        set: |r, v| r.eyecolor = v,
    },
];

impl Record {
    pub fn new(
        name: impl Into<String>,
        birthdate: impl Into<String>,
        age: impl Into<String>,
        eyecolor: impl Into<String>,
    ) -> Self {
        Record {
            name: name.into(),
            birthdate: birthdate.into(),
            age: age.into(),
            eyecolor: eyecolor.into(),
        }
    }

    /// Number of columns a record occupies.
    pub const fn width() -> usize {
        RECORD_FIELDS.len()
    }

    /// The header row, one cell per field name.
    pub fn header() -> Vec<CellValue> {
        RECORD_FIELDS
            .iter()
            .map(|field| CellValue::text(field.header))
            .collect()
    }

    /// Encode this record as a row of text cells.
    pub fn encode(&self) -> Vec<CellValue> {
        RECORD_FIELDS
            .iter()
            .map(|field| CellValue::text((field.get)(self)))
            .collect()
    }

    /// Decode a record from a row.
    ///
    /// Cells map to fields by position. Errors if the row is shorter than a
    /// record or if any of the record's cells isn't text. Cells past the
    /// record's width are ignored.
    pub fn decode(row: &[CellValue]) -> Result<Self> {
        if row.len() < Self::width() {
            return Err(SheetError::new("Row too short to decode record")
                .with_field("expected", Self::width())
                .with_field("got", row.len())
                .with_field("row", format_row(row)));
        }

        let mut record = Record::default();
        for (field, cell) in RECORD_FIELDS.iter().zip(row) {
            let text = cell.as_text().ok_or_else(|| {
                SheetError::new("Expected text cell")
                    .with_field("field", field.header)
                    .with_field("kind", cell.kind())
            })?;
            (field.set)(&mut record, text.to_string());
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_in_order() {
        assert_eq!(
            vec![
                CellValue::text("Name"),
                CellValue::text("Birthdate"),
                CellValue::text("Age"),
                CellValue::text("Eyecolor"),
            ],
            Record::header()
        );
    }

    #[test]
    fn encode_in_field_order() {
        let rec = Record::new("John", "1/1/1990", "100", "Gray");
        assert_eq!(
            vec![
                CellValue::text("John"),
                CellValue::text("1/1/1990"),
                CellValue::text("100"),
                CellValue::text("Gray"),
            ],
            rec.encode()
        );
    }

    #[test]
    fn decode_encode_round_trip() {
        let records = [
            Record::new("John", "1/1/1990", "100", "Gray"),
            Record::new("", "", "", ""),
            Record::new("Zoë, Jr.", "2000-02-29", "24", "=green"),
        ];
        for rec in records {
            assert_eq!(rec, Record::decode(&rec.encode()).unwrap());
        }
    }

    #[test]
    fn decode_short_row() {
        let row = vec![CellValue::text("John"), CellValue::text("1/1/1990")];
        let err = Record::decode(&row).unwrap_err();
        assert_eq!("Row too short to decode record", err.get_msg());
        assert_eq!(Some("2"), err.get_field("got"));
    }

    #[test]
    fn decode_non_text_cell() {
        let row = vec![
            CellValue::text("John"),
            CellValue::text("1/1/1990"),
            CellValue::Number(100.0),
            CellValue::text("Gray"),
        ];
        let err = Record::decode(&row).unwrap_err();
        assert_eq!("Expected text cell", err.get_msg());
        assert_eq!(Some("Age"), err.get_field("field"));
        assert_eq!(Some("number"), err.get_field("kind"));
    }

    #[test]
    fn decode_ignores_extra_cells() {
        let mut row = Record::new("a", "b", "c", "d").encode();
        row.push(CellValue::text("extra"));
        assert_eq!(Record::new("a", "b", "c", "d"), Record::decode(&row).unwrap());
    }
}
