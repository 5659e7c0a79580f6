//! Spreadsheet export of the filtered user list.
//!
//! One sheet named `Users`, a header row of record field names, then one row
//! per record. Numeric fields are written as numbers.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::error::{Context, Result, simple_error};
use crate::model::{SortKey, UserRecord};

pub const SHEET_NAME: &str = "Users";
pub const FILE_NAME: &str = "UsersData.xlsx";

/// Column order of the export, matching the record's field order.
pub const COLUMNS: [SortKey; 7] = SortKey::ALL;

fn build_worksheet(users: &[UserRecord]) -> std::result::Result<Worksheet, XlsxError> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(SHEET_NAME)?;

    for (col, key) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, key.field_name())?;
    }

    for (i, u) in users.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_number(row, 0, u.id)?;
        worksheet.write_string(row, 1, &u.first_name)?;
        worksheet.write_string(row, 2, &u.last_name)?;
        worksheet.write_string(row, 3, &u.email)?;
        worksheet.write_string(row, 4, u.gender.as_str())?;
        worksheet.write_number(row, 5, u.age)?;
        worksheet.write_string(row, 6, &u.city)?;
    }
    Ok(worksheet)
}

fn build_workbook(users: &[UserRecord]) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    workbook.push_worksheet(build_worksheet(users)?);
    Ok(workbook)
}

/// Encode `users` as an xlsx file held in memory.
pub fn to_xlsx(users: &[UserRecord]) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(users).with_ctx(|| "build workbook".to_string())?;
    workbook
        .save_to_buffer()
        .with_ctx(|| "encode workbook".to_string())
}

/// Write `users` to `<dir>/UsersData.xlsx` and return the written path.
pub fn write_xlsx(users: &[UserRecord], dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(simple_error(format!(
            "export directory {} does not exist",
            dir.display()
        )));
    }
    let path = dir.join(FILE_NAME);
    let bytes = to_xlsx(users)?;
    std::fs::write(&path, bytes).with_ctx(|| format!("write {}", path.display()))?;
    tracing::info!(rows = users.len(), path = %path.display(), "exported users");
    Ok(path)
}
