//! Workbook to IR parser
//!
//! Reads the `Types` and `Messages` sheets of a profile workbook into the
//! intermediate representation.
//!
//! # Sheet layout
//!
//! `Types`: A type name, B base type, C value name, D value, E comment.
//! A row with a type name opens a type; following rows add values to it.
//!
//! `Messages`: A message name, B field number, C field name, D field type,
//! E array marker, G scale, H offset, I units. A row with a message name opens
//! a message; following rows with a field number add fields. Rows without a
//! field number (dynamic sub-fields) and section title rows are skipped.

use std::io::Cursor;

use once_cell::sync::Lazy;
use regex::Regex;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::error::{Result, WorkbookError};
use crate::ir::*;

/// Name of the sheet holding type definitions
pub const TYPES_SHEET: &str = "Types";

/// Name of the sheet holding message definitions
pub const MESSAGES_SHEET: &str = "Messages";

static VALUE_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[xX][0-9a-fA-F]+|[0-9]+)$").expect("valid value regex"));

/// Detected container format of raw workbook bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Office Open XML (zip container)
    Xlsx,
    /// Legacy OLE2 compound document
    Xls,
    /// Neither
    Unknown,
}

impl WorkbookFormat {
    /// Sniff the format from leading magic bytes
    pub fn detect(bytes: &[u8]) -> Self {
        const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
        const OLE2_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

        if bytes.starts_with(ZIP_MAGIC) {
            WorkbookFormat::Xlsx
        } else if bytes.starts_with(OLE2_MAGIC) {
            WorkbookFormat::Xls
        } else {
            WorkbookFormat::Unknown
        }
    }
}

/// Parser for profile workbooks
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkbookParser;

impl WorkbookParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse raw workbook bytes into IR
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ProfileIr> {
        match WorkbookFormat::detect(bytes) {
            WorkbookFormat::Xlsx => {}
            WorkbookFormat::Xls => return Err(WorkbookError::LegacyFormat),
            WorkbookFormat::Unknown => return Err(WorkbookError::UnknownFormat),
        }

        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true)
            .map_err(|e| WorkbookError::Read(e.to_string()))?;
        self.parse_book(&book)
    }

    /// Parse an already loaded spreadsheet into IR
    pub fn parse_book(&self, book: &Spreadsheet) -> Result<ProfileIr> {
        let types = book
            .get_sheet_by_name(TYPES_SHEET)
            .ok_or(WorkbookError::MissingSheet(TYPES_SHEET))?;
        let messages = book
            .get_sheet_by_name(MESSAGES_SHEET)
            .ok_or(WorkbookError::MissingSheet(MESSAGES_SHEET))?;

        Ok(ProfileIr {
            types: self.parse_types(types)?,
            messages: self.parse_messages(messages)?,
        })
    }

    fn parse_types(&self, sheet: &Worksheet) -> Result<Vec<TypeDef>> {
        let (_, max_row) = sheet.get_highest_column_and_row();
        let mut types: Vec<TypeDef> = Vec::new();

        // Row 1 is the header.
        for row in 2..=max_row {
            let type_name = cell(sheet, "A", row);
            let base_type = cell(sheet, "B", row);
            let value_name = cell(sheet, "C", row);

            if !type_name.is_empty() {
                let base = base_type.parse().map_err(|_| WorkbookError::UnknownType {
                    type_name: base_type.clone(),
                    context: format!("type {type_name:?}"),
                })?;
                types.push(TypeDef {
                    name: type_name,
                    base_type: base,
                    values: Vec::new(),
                });
                continue;
            }

            if value_name.is_empty() {
                continue;
            }

            let value = cell(sheet, "D", row);
            if !VALUE_LITERAL.is_match(&value) {
                return Err(invalid_row(
                    TYPES_SHEET,
                    row,
                    format!("value {value:?} of {value_name:?} is not an integer literal"),
                ));
            }

            let Some(current) = types.last_mut() else {
                return Err(invalid_row(
                    TYPES_SHEET,
                    row,
                    format!("value {value_name:?} appears before any type"),
                ));
            };
            let comment = cell(sheet, "E", row);
            current.values.push(ValueDef {
                name: value_name,
                value,
                comment: non_empty(comment),
            });
        }

        Ok(types)
    }

    fn parse_messages(&self, sheet: &Worksheet) -> Result<Vec<MessageDef>> {
        let (_, max_row) = sheet.get_highest_column_and_row();
        let mut messages: Vec<MessageDef> = Vec::new();

        for row in 2..=max_row {
            let message_name = cell(sheet, "A", row);
            if !message_name.is_empty() {
                messages.push(MessageDef {
                    name: message_name,
                    fields: Vec::new(),
                });
                continue;
            }

            let number = cell(sheet, "B", row);
            let field_name = cell(sheet, "C", row);
            if number.is_empty() || field_name.is_empty() {
                continue;
            }

            let number: u8 = number.parse().map_err(|_| {
                invalid_row(
                    MESSAGES_SHEET,
                    row,
                    format!("field number {number:?} is not a byte"),
                )
            })?;

            let Some(current) = messages.last_mut() else {
                return Err(invalid_row(
                    MESSAGES_SHEET,
                    row,
                    format!("field {field_name:?} appears before any message"),
                ));
            };
            current.fields.push(FieldDef {
                number,
                name: field_name,
                type_name: cell(sheet, "D", row),
                array: !cell(sheet, "E", row).is_empty(),
                scale: non_empty(cell(sheet, "G", row)),
                offset: non_empty(cell(sheet, "H", row)),
                units: non_empty(cell(sheet, "I", row)),
            });
        }

        Ok(messages)
    }
}

fn cell(sheet: &Worksheet, column: &str, row: u32) -> String {
    let address = format!("{column}{row}");
    sheet
        .get_cell(address.as_str())
        .map(|cell| cell.get_value().trim().to_string())
        .unwrap_or_default()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn invalid_row(sheet: &'static str, row: u32, message: String) -> WorkbookError {
    WorkbookError::InvalidRow {
        sheet,
        row,
        message,
    }
}
