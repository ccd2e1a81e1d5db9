//! Workbook: an ordered collection of worksheets.

use super::worksheet::Worksheet;

/// An in-memory spreadsheet produced by a reader.
///
/// Delimited text always yields exactly one sheet, but the model itself
/// holds any number.
///
/// # Examples
///
/// ```
/// use longan::sheet::Workbook;
///
/// let mut workbook = Workbook::new();
/// let sheet = workbook.create_sheet();
/// assert_eq!(sheet.title(), "Sheet1");
/// assert_eq!(workbook.sheet_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create a workbook without sheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new empty sheet named `Sheet<n>` and return it.
    pub fn create_sheet(&mut self) -> &mut Worksheet {
        let mut n = self.sheets.len() + 1;
        while self.sheet_by_name(&format!("Sheet{n}")).is_some() {
            n += 1;
        }
        let index = self.sheets.len();
        self.sheets.push(Worksheet::new(format!("Sheet{n}")));
        &mut self.sheets[index]
    }

    /// Sheet by 0-based index
    pub fn sheet(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.sheets.get_mut(index)
    }

    pub fn sheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|sheet| sheet.title() == name)
    }

    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Names of all sheets in order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets
            .iter()
            .map(|sheet| sheet.title().to_string())
            .collect()
    }
}
