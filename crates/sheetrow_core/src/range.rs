//! A1 notation ranges.
//!
//! Ranges are `<sheet>!<start>[:<end>]` where each end is a column (`A`), a
//! row (`2`), or both (`A2`). Open ends run to the edge of the sheet, so
//! `Users!A2:D` is every row from the second one on in columns A to D.

use std::fmt;

use sheetrow_error::{Result, SheetError};

/// Convert a zero-based column index to its letters, `0 -> A`, `26 -> AA`.
pub fn column_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    // Only ascii uppercase pushed above.
    String::from_utf8(letters).unwrap_or_default()
}

/// Convert column letters to a zero-based index, `A -> 0`, `AA -> 26`.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        let v = (b.to_ascii_uppercase() - b'A') as usize + 1;
        n = n.checked_mul(26)?.checked_add(v)?;
    }
    Some(n - 1)
}

/// One end of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    /// Zero-based column index.
    pub column: Option<usize>,
    /// One-based row number.
    pub row: Option<usize>,
}

impl CellRef {
    pub const fn cell(column: usize, row: usize) -> Self {
        CellRef {
            column: Some(column),
            row: Some(row),
        }
    }

    pub const fn column(column: usize) -> Self {
        CellRef {
            column: Some(column),
            row: None,
        }
    }

    fn parse(s: &str) -> Result<Self> {
        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, digits) = s.split_at(split);

        let column = if letters.is_empty() {
            None
        } else {
            Some(column_index(letters).ok_or_else(|| {
                SheetError::new("Invalid column in cell reference").with_field("cell", s)
            })?)
        };

        let row = if digits.is_empty() {
            None
        } else {
            let row: usize = digits.parse().map_err(|_| {
                SheetError::new("Invalid row in cell reference").with_field("cell", s)
            })?;
            if row == 0 {
                return Err(SheetError::new("Rows start at 1").with_field("cell", s));
            }
            Some(row)
        };

        if column.is_none() && row.is_none() {
            return Err(SheetError::new("Empty cell reference"));
        }

        Ok(CellRef { column, row })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(col) = self.column {
            write!(f, "{}", column_letters(col))?;
        }
        if let Some(row) = self.row {
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    pub sheet: String,
    pub start: CellRef,
    pub end: Option<CellRef>,
}

impl A1Range {
    pub fn parse(s: &str) -> Result<Self> {
        let (sheet, cells) = split_sheet(s)?;

        let (start, end) = match cells.split_once(':') {
            Some((start, end)) => (CellRef::parse(start)?, Some(CellRef::parse(end)?)),
            None => (CellRef::parse(cells)?, None),
        };

        Ok(A1Range { sheet, start, end })
    }

    /// First column covered by this range.
    pub fn first_column(&self) -> usize {
        self.start.column.unwrap_or(0)
    }

    /// Last column covered by this range, None if unbounded.
    pub fn last_column(&self) -> Option<usize> {
        match &self.end {
            Some(end) => end.column,
            None => self.start.column,
        }
    }

    /// First row covered by this range.
    pub fn first_row(&self) -> usize {
        self.start.row.unwrap_or(1)
    }

    /// Last row covered by this range, None if unbounded.
    pub fn last_row(&self) -> Option<usize> {
        match &self.end {
            Some(end) => end.row,
            None => self.start.row,
        }
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sheet_name(f, &self.sheet)?;
        write!(f, "!{}", self.start)?;
        if let Some(end) = &self.end {
            write!(f, ":{end}")?;
        }
        Ok(())
    }
}

fn needs_quoting(sheet: &str) -> bool {
    let mut chars = sheet.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => (),
        _ => return true,
    }
    !chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn write_sheet_name(f: &mut fmt::Formatter<'_>, sheet: &str) -> fmt::Result {
    if needs_quoting(sheet) {
        write!(f, "'{}'", sheet.replace('\'', "''"))
    } else {
        write!(f, "{sheet}")
    }
}

/// Split `<sheet>!<cells>`, unquoting the sheet name if needed.
fn split_sheet(s: &str) -> Result<(String, &str)> {
    if let Some(rest) = s.strip_prefix('\'') {
        let mut sheet = String::new();
        let mut chars = rest.char_indices().peekable();
        while let Some((idx, c)) = chars.next() {
            if c != '\'' {
                sheet.push(c);
                continue;
            }
            if matches!(chars.peek(), Some((_, '\''))) {
                chars.next();
                sheet.push('\'');
                continue;
            }
            // Closing quote.
            let after = &rest[idx + 1..];
            let cells = after.strip_prefix('!').ok_or_else(|| {
                SheetError::new("Expected '!' after quoted sheet name").with_field("range", s)
            })?;
            return Ok((sheet, cells));
        }
        return Err(SheetError::new("Unterminated quoted sheet name").with_field("range", s));
    }

    match s.rsplit_once('!') {
        Some((sheet, cells)) if !sheet.is_empty() => Ok((sheet.to_string(), cells)),
        _ => Err(SheetError::new("Range is missing a sheet name").with_field("range", s)),
    }
}

/// Builds the ranges used by the table operations for one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRanges {
    sheet: String,
    width: usize,
}

impl SheetRanges {
    /// Ranges for `sheet` where each row is `width` columns wide.
    pub fn new(sheet: impl Into<String>, width: usize) -> Self {
        SheetRanges {
            sheet: sheet.into(),
            width: usize::max(width, 1),
        }
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    fn last_column(&self) -> usize {
        self.width - 1
    }

    /// The header row, e.g. `Users!A1:D1`.
    pub fn header(&self) -> A1Range {
        A1Range {
            sheet: self.sheet.clone(),
            start: CellRef::cell(0, 1),
            end: Some(CellRef::cell(self.last_column(), 1)),
        }
    }

    /// All data rows, e.g. `Users!A2:D`.
    pub fn data_rows(&self) -> A1Range {
        A1Range {
            sheet: self.sheet.clone(),
            start: CellRef::cell(0, 2),
            end: Some(CellRef::column(self.last_column())),
        }
    }

    /// The first two columns of every row including the header, e.g.
    /// `Users!A:B`.
    pub fn key_columns(&self) -> A1Range {
        A1Range {
            sheet: self.sheet.clone(),
            start: CellRef::column(0),
            end: Some(CellRef::column(usize::min(1, self.last_column()))),
        }
    }

    /// The first cell of a row, e.g. `Users!A5`.
    pub fn row_start(&self, row: usize) -> A1Range {
        A1Range {
            sheet: self.sheet.clone(),
            start: CellRef::cell(0, row),
            end: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_round_trip() {
        let cases = [(0, "A"), (3, "D"), (25, "Z"), (26, "AA"), (27, "AB"), (701, "ZZ"), (702, "AAA")];
        for (idx, letters) in cases {
            assert_eq!(letters, column_letters(idx));
            assert_eq!(Some(idx), column_index(letters));
        }
        assert_eq!(Some(3), column_index("d"));
        assert_eq!(None, column_index(""));
        assert_eq!(None, column_index("A1"));
    }

    #[test]
    fn sheet_ranges() {
        let ranges = SheetRanges::new("Users", 4);
        assert_eq!("Users!A1:D1", ranges.header().to_string());
        assert_eq!("Users!A2:D", ranges.data_rows().to_string());
        assert_eq!("Users!A:B", ranges.key_columns().to_string());
        assert_eq!("Users!A5", ranges.row_start(5).to_string());
    }

    #[test]
    fn quoted_sheet_names() {
        let ranges = SheetRanges::new("My Users", 4);
        assert_eq!("'My Users'!A1:D1", ranges.header().to_string());

        let ranges = SheetRanges::new("Bob's", 4);
        assert_eq!("'Bob''s'!A5", ranges.row_start(5).to_string());

        let ranges = SheetRanges::new("2024", 4);
        assert_eq!("'2024'!A:B", ranges.key_columns().to_string());
    }

    #[test]
    fn parse_ranges() {
        let r = A1Range::parse("Users!A2:D").unwrap();
        assert_eq!("Users", r.sheet);
        assert_eq!(0, r.first_column());
        assert_eq!(Some(3), r.last_column());
        assert_eq!(2, r.first_row());
        assert_eq!(None, r.last_row());

        let r = A1Range::parse("Users!A:B").unwrap();
        assert_eq!(1, r.first_row());
        assert_eq!(None, r.last_row());
        assert_eq!(Some(1), r.last_column());

        let r = A1Range::parse("Users!A5").unwrap();
        assert_eq!(5, r.first_row());
        assert_eq!(Some(5), r.last_row());
        assert_eq!(Some(0), r.last_column());

        let r = A1Range::parse("'Bob''s sheet'!B2:C3").unwrap();
        assert_eq!("Bob's sheet", r.sheet);
        assert_eq!(1, r.first_column());
        assert_eq!(Some(3), r.last_row());
    }

    #[test]
    fn parse_display_round_trip() {
        for s in ["Users!A1:D1", "Users!A2:D", "Users!A:B", "Users!A5", "'My Users'!AA10:AB"] {
            assert_eq!(s, A1Range::parse(s).unwrap().to_string());
        }
    }

    #[test]
    fn parse_invalid() {
        A1Range::parse("A1:D1").unwrap_err();
        A1Range::parse("!A1").unwrap_err();
        A1Range::parse("Users!").unwrap_err();
        A1Range::parse("Users!A0").unwrap_err();
        A1Range::parse("'Users!A1").unwrap_err();
        A1Range::parse("'Users'A1").unwrap_err();
    }
}
