//! Parses uploaded files into transaction drafts.

use std::str::FromStr;

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    transaction::{Category, Transaction, TransactionDraft, TransactionKind},
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Turns the text of an uploaded file into transaction drafts.
///
/// Parsing is all-or-nothing: an error anywhere in the file means nothing
/// is imported, so a file never half-applies.
pub trait ImportParser {
    /// Parse `text` into drafts ready for [crate::TransactionStore::add_all].
    ///
    /// # Errors
    /// Returns an [Error::InvalidCsv] naming the offending line if the text
    /// cannot be parsed.
    fn parse(&self, text: &str) -> Result<Vec<TransactionDraft>, Error>;
}

/// Parses CSV files with the columns `date,type,category,amount,description`.
///
/// This is the same column set the export endpoint writes, so an exported
/// file can be imported back without editing. A header row is required;
/// field values are matched case-insensitively and dates use `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvImportParser;

const DATE_COLUMN: usize = 0;
const KIND_COLUMN: usize = 1;
const CATEGORY_COLUMN: usize = 2;
const AMOUNT_COLUMN: usize = 3;
const DESCRIPTION_COLUMN: usize = 4;
const COLUMN_COUNT: usize = 5;

impl ImportParser for CsvImportParser {
    fn parse(&self, text: &str) -> Result<Vec<TransactionDraft>, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut drafts = Vec::new();

        for (record_index, result) in reader.records().enumerate() {
            // Line 1 is the header row.
            let line_number = record_index + 2;

            let record = result.map_err(|error| {
                Error::InvalidCsv(format!("line {line_number}: {error}"))
            })?;

            if record.len() != COLUMN_COUNT {
                return Err(Error::InvalidCsv(format!(
                    "line {line_number}: expected {COLUMN_COUNT} columns, got {}",
                    record.len()
                )));
            }

            let date = Date::parse(&record[DATE_COLUMN], &DATE_FORMAT).map_err(|error| {
                Error::InvalidCsv(format!(
                    "line {line_number}: could not parse \"{}\" as a date: {error}",
                    &record[DATE_COLUMN]
                ))
            })?;

            let kind = TransactionKind::from_str(&record[KIND_COLUMN]).map_err(|error| {
                Error::InvalidCsv(format!("line {line_number}: {error}"))
            })?;

            let category = Category::from_str(&record[CATEGORY_COLUMN]).map_err(|error| {
                Error::InvalidCsv(format!("line {line_number}: {error}"))
            })?;

            let amount: f64 = record[AMOUNT_COLUMN].parse().map_err(|error| {
                Error::InvalidCsv(format!(
                    "line {line_number}: could not parse \"{}\" as an amount: {error}",
                    &record[AMOUNT_COLUMN]
                ))
            })?;

            let draft =
                Transaction::draft(kind, category, amount, date, &record[DESCRIPTION_COLUMN])
                    .map_err(|error| Error::InvalidCsv(format!("line {line_number}: {error}")))?;

            drafts.push(draft);
        }

        Ok(drafts)
    }
}
