//! Cell coordinate conversion utilities (A1 notation).
//!
//! Columns use bijective base-26 numbering: digits run 1..=26 mapped to
//! `A..=Z` and there is no zero digit, so `Z` (26) is followed by `AA` (27).
//! Column numbers and rows are 1-based throughout.
//!
//! - Column number ↔ column name: [`column_name`], [`column_number`]
//! - Full addresses: [`Coordinate`] (`"B12"`)
//! - Ranges: [`CellRange`] (`"A1:C3"`)

use crate::common::{Error, Result};
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;

/// Highest addressable column number (`ZZZ` = 26 + 26² + 26³).
pub const MAX_COLUMN: u32 = 18_278;

/// Highest addressable row number (seven decimal digits).
pub const MAX_ROW: u32 = 9_999_999;

const MAX_COLUMN_LETTERS: usize = 3;
const MAX_ROW_DIGITS: usize = 7;

/// Every column name, indexed by `column - 1`; built once and never mutated.
static COLUMN_NAMES: Lazy<Vec<String>> =
    Lazy::new(|| (1..=MAX_COLUMN).map(compute_column_name).collect());

fn compute_column_name(column: u32) -> String {
    let index = column - 1;
    let letter = |offset: u32| char::from(b'A' + (offset % 26) as u8);

    if index < 26 {
        letter(index).to_string()
    } else if index < 702 {
        [letter(index / 26 - 1), letter(index % 26)].iter().collect()
    } else {
        [
            letter((index - 26) / 676 - 1),
            letter((index - 26) % 676 / 26),
            letter(index % 26),
        ]
        .iter()
        .collect()
    }
}

/// Convert a 1-based column number to its name.
///
/// # Examples
///
/// ```
/// use longan::sheet::coordinates::column_name;
///
/// assert_eq!(column_name(1).unwrap(), "A");
/// assert_eq!(column_name(27).unwrap(), "AA");
/// assert_eq!(column_name(18278).unwrap(), "ZZZ");
/// assert!(column_name(0).is_err());
/// ```
pub fn column_name(column: u32) -> Result<&'static str> {
    if !(1..=MAX_COLUMN).contains(&column) {
        return Err(Error::OutOfRange(format!(
            "column {column} is outside 1..={MAX_COLUMN}"
        )));
    }
    Ok(COLUMN_NAMES[(column - 1) as usize].as_str())
}

/// Convert a column name (`A`..`ZZZ`, uppercase) to its 1-based number.
///
/// # Examples
///
/// ```
/// use longan::sheet::coordinates::column_number;
///
/// assert_eq!(column_number("A").unwrap(), 1);
/// assert_eq!(column_number("AB").unwrap(), 28);
/// assert!(column_number("a").is_err());
/// ```
pub fn column_number(name: &str) -> Result<u32> {
    let bytes = name.as_bytes();
    if bytes.is_empty()
        || bytes.len() > MAX_COLUMN_LETTERS
        || !bytes.iter().all(u8::is_ascii_uppercase)
    {
        return Err(Error::InvalidFormat(format!(
            "'{name}' is not a column name of 1-{MAX_COLUMN_LETTERS} uppercase letters"
        )));
    }

    Ok(bytes
        .iter()
        .fold(0u32, |acc, &b| acc * 26 + u32::from(b - b'A' + 1)))
}

/// Split `"AB12"` into `("AB", 12)`.
///
/// The address must match `^[A-Z]{1,3}[0-9]{1,7}$`.
pub fn split_address(address: &str) -> Result<(&str, u32)> {
    let invalid = || Error::InvalidFormat(format!("'{address}' is not a cell address"));

    let letters = address
        .bytes()
        .take_while(u8::is_ascii_uppercase)
        .count();
    let (column, digits) = address.split_at(letters);

    if !(1..=MAX_COLUMN_LETTERS).contains(&column.len())
        || !(1..=MAX_ROW_DIGITS).contains(&digits.len())
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let row = digits.parse::<u32>().map_err(|_| invalid())?;
    Ok((column, row))
}

/// A validated cell address.
///
/// Immutable: every constructor validates its input, and a different cell is
/// a different `Coordinate`.
///
/// # Examples
///
/// ```
/// use longan::sheet::coordinates::Coordinate;
///
/// let coord: Coordinate = "B12".parse().unwrap();
/// assert_eq!(coord.column(), 2);
/// assert_eq!(coord.row(), 12);
/// assert_eq!(coord.to_string(), "B12");
///
/// let coord = Coordinate::new(28, 3).unwrap();
/// assert_eq!(coord.column_name(), "AB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    column: u32,
    row: u32,
}

impl Coordinate {
    /// The top-left cell.
    pub const A1: Coordinate = Coordinate { column: 1, row: 1 };

    /// Create a coordinate from a 1-based column number and row.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if the column is outside `1..=18278` or the row
    /// outside `1..=9999999`.
    pub fn new(column: u32, row: u32) -> Result<Self> {
        if !(1..=MAX_COLUMN).contains(&column) {
            return Err(Error::OutOfRange(format!(
                "column {column} is outside 1..={MAX_COLUMN}"
            )));
        }
        if !(1..=MAX_ROW).contains(&row) {
            return Err(Error::OutOfRange(format!("row {row} is outside 1..={MAX_ROW}")));
        }
        Ok(Self { column, row })
    }

    /// Parse an A1-style address such as `"C7"`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFormat`] for anything but `^[A-Z]{1,3}[0-9]{1,7}$`
    /// with a non-zero row.
    pub fn parse(address: &str) -> Result<Self> {
        let (column, row) = split_address(address)?;
        if row == 0 {
            return Err(Error::InvalidFormat(format!(
                "'{address}' has row 0; rows start at 1"
            )));
        }
        Ok(Self {
            column: column_number(column)?,
            row,
        })
    }

    /// 1-based column number.
    #[inline]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// 1-based row number.
    #[inline]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Column letters, e.g. `"AB"`.
    pub fn column_name(&self) -> &'static str {
        COLUMN_NAMES[(self.column - 1) as usize].as_str()
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    /// Row-major order: `A1 < B1 < A2`.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.column).cmp(&(other.row, other.column))
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_name(), self.row)
    }
}

/// Rectangular block of cells (start cell, end cell)
///
/// # Examples
///
/// ```
/// use longan::sheet::coordinates::CellRange;
///
/// let range: CellRange = "A1:C3".parse().unwrap();
/// assert_eq!(range.width(), 3);
/// assert_eq!(range.to_string(), "A1:C3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    start: Coordinate,
    end: Coordinate,
}

impl CellRange {
    /// Create a range; the corners are normalized to top-left/bottom-right.
    pub fn new(a: Coordinate, b: Coordinate) -> Self {
        let start = Coordinate {
            column: a.column.min(b.column),
            row: a.row.min(b.row),
        };
        let end = Coordinate {
            column: a.column.max(b.column),
            row: a.row.max(b.row),
        };
        Self { start, end }
    }

    /// Top-left cell
    #[inline]
    pub const fn start(&self) -> Coordinate {
        self.start
    }

    /// Bottom-right cell
    #[inline]
    pub const fn end(&self) -> Coordinate {
        self.end
    }

    /// Number of columns in the range
    #[inline]
    pub const fn width(&self) -> u32 {
        self.end.column - self.start.column + 1
    }

    /// Number of rows in the range
    #[inline]
    pub const fn height(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        (self.start.column..=self.end.column).contains(&coord.column)
            && (self.start.row..=self.end.row).contains(&coord.row)
    }
}

impl FromStr for CellRange {
    type Err = Error;

    /// Parse `"A1:B3"`; a single address is a one-cell range.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((start, end)) => Ok(Self::new(start.parse()?, end.parse()?)),
            None => {
                let cell: Coordinate = s.parse()?;
                Ok(Self::new(cell, cell))
            },
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_name_boundaries() {
        assert_eq!(column_name(1).unwrap(), "A");
        assert_eq!(column_name(26).unwrap(), "Z");
        assert_eq!(column_name(27).unwrap(), "AA");
        assert_eq!(column_name(52).unwrap(), "AZ");
        assert_eq!(column_name(702).unwrap(), "ZZ");
        assert_eq!(column_name(703).unwrap(), "AAA");
        assert_eq!(column_name(18278).unwrap(), "ZZZ");
    }

    #[test]
    fn test_column_name_out_of_range() {
        assert!(matches!(column_name(0), Err(Error::OutOfRange(_))));
        assert!(matches!(column_name(18279), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_column_number() {
        assert_eq!(column_number("A").unwrap(), 1);
        assert_eq!(column_number("Z").unwrap(), 26);
        assert_eq!(column_number("AA").unwrap(), 27);
        assert_eq!(column_number("ZZZ").unwrap(), 18278);
    }

    #[test]
    fn test_column_number_invalid() {
        for bad in ["", "a", "AAAA", "A1", "Ä", " A"] {
            assert!(
                matches!(column_number(bad), Err(Error::InvalidFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse() {
        let coord = Coordinate::parse("A1").unwrap();
        assert_eq!(coord.to_string(), "A1");
        assert_eq!((coord.column(), coord.row()), (1, 1));

        let coord = Coordinate::parse("ZZZ9999999").unwrap();
        assert_eq!(coord.row(), 9_999_999);
        assert_eq!(coord.column(), MAX_COLUMN);

        // leading zeros are only constrained by shape
        assert_eq!(Coordinate::parse("B007").unwrap().row(), 7);
    }

    #[test]
    fn test_parse_invalid() {
        for bad in ["AAAA1", "A0", "A", "1", "a1", "A12345678", "A1B", "", "$A$1"] {
            assert!(
                matches!(Coordinate::parse(bad), Err(Error::InvalidFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_new_out_of_range() {
        assert!(matches!(Coordinate::new(0, 1), Err(Error::OutOfRange(_))));
        assert!(matches!(Coordinate::new(18279, 1), Err(Error::OutOfRange(_))));
        assert!(matches!(Coordinate::new(1, 0), Err(Error::OutOfRange(_))));
        assert!(Coordinate::new(18278, MAX_ROW).is_ok());
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut coords: Vec<Coordinate> = ["B2", "A2", "C1", "A1"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        coords.sort();
        let names: Vec<String> = coords.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["A1", "C1", "A2", "B2"]);
    }

    #[test]
    fn test_split_address() {
        assert_eq!(split_address("AB12").unwrap(), ("AB", 12));
        assert!(split_address("AB").is_err());
    }

    #[test]
    fn test_range() {
        let range: CellRange = "C3:A1".parse().unwrap();
        assert_eq!(range.to_string(), "A1:C3");
        assert_eq!((range.width(), range.height()), (3, 3));
        assert!(range.contains(&"B2".parse().unwrap()));
        assert!(!range.contains(&"D2".parse().unwrap()));

        let single: CellRange = "B2".parse().unwrap();
        assert_eq!(single.to_string(), "B2:B2");
        assert!("A1:".parse::<CellRange>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn prop_number_name_round_trip(n in 1u32..=MAX_COLUMN) {
            let name = column_name(n).unwrap();
            prop_assert_eq!(column_number(name).unwrap(), n);
        }

        #[test]
        fn prop_name_number_round_trip(name in "[A-Z]{1,3}") {
            let n = column_number(&name).unwrap();
            prop_assert!(n <= MAX_COLUMN);
            prop_assert_eq!(column_name(n).unwrap(), name.as_str());
        }

        #[test]
        fn prop_address_round_trip(column in 1u32..=MAX_COLUMN, row in 1u32..=MAX_ROW) {
            let coord = Coordinate::new(column, row).unwrap();
            let parsed = Coordinate::parse(&coord.to_string()).unwrap();
            prop_assert_eq!(parsed, coord);
        }
    }

    #[test]
    fn test_exhaustive_round_trip() {
        for n in 1..=MAX_COLUMN {
            assert_eq!(column_number(column_name(n).unwrap()).unwrap(), n);
        }
    }
}
