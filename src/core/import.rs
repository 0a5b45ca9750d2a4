//! CSV import: header mapping, validation and conversion to drafts.

use crate::errors::{AppError, AppResult};
use crate::models::AttendeeDraft;
use crate::models::attendee::is_core_field;
use csv::{ReaderBuilder, Trim};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Attendee field a CSV column can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppField {
    Name,
    Email,
    Phone,
    Company,
    UniqueId,
    QrCodeData,
}

impl AppField {
    pub const ALL: [AppField; 6] = [
        AppField::Name,
        AppField::Email,
        AppField::Phone,
        AppField::Company,
        AppField::UniqueId,
        AppField::QrCodeData,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AppField::Name => "name",
            AppField::Email => "email",
            AppField::Phone => "phone",
            AppField::Company => "company",
            AppField::UniqueId => "uniqueId",
            AppField::QrCodeData => "qrCodeData",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, AppField::Name | AppField::Email)
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for AppField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Binding of one CSV header to an attendee field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Empty when no column is bound.
    pub csv_header: String,
    pub app_field: AppField,
    pub required: bool,
}

impl FieldMapping {
    pub fn is_bound(&self) -> bool {
        !self.csv_header.is_empty()
    }
}

/// Parsed CSV: header row plus data rows.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    fn cell<'a>(&'a self, row: &'a [String], header: &str) -> &'a str {
        self.column(header)
            .and_then(|i| row.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn resolve_header(&self, wanted: &str) -> Option<&str> {
        let wanted = wanted.trim();
        self.headers
            .iter()
            .find(|h| h.as_str() == wanted)
            .or_else(|| self.headers.iter().find(|h| h.eq_ignore_ascii_case(wanted)))
            .map(String::as_str)
    }
}

pub fn parse_csv<R: Read>(reader: R) -> AppResult<CsvTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        rows.push(rec.iter().map(str::to_string).collect());
    }

    Ok(CsvTable { headers, rows })
}

pub fn parse_csv_file(path: &Path) -> AppResult<CsvTable> {
    let file = std::fs::File::open(path)?;
    parse_csv(file)
}

/// Bind each field to the first header equal to its name (case-insensitive),
/// falling back to the first header containing it. A header is bound at
/// most once.
pub fn auto_map(headers: &[String]) -> Vec<FieldMapping> {
    let lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    let mut used = vec![false; headers.len()];

    AppField::ALL
        .into_iter()
        .map(|field| {
            let key = field.key().to_lowercase();
            let idx = lower
                .iter()
                .enumerate()
                .find(|(i, h)| !used[*i] && **h == key)
                .or_else(|| {
                    lower
                        .iter()
                        .enumerate()
                        .find(|(i, h)| !used[*i] && h.contains(&key))
                })
                .map(|(i, _)| i);

            let csv_header = match idx {
                Some(i) => {
                    used[i] = true;
                    headers[i].clone()
                }
                None => String::new(),
            };

            FieldMapping {
                csv_header,
                app_field: field,
                required: field.is_required(),
            }
        })
        .collect()
}

/// Apply `field=Header` overrides on top of `mapping`.
pub fn apply_overrides(
    table: &CsvTable,
    mapping: &mut [FieldMapping],
    overrides: &[String],
) -> AppResult<()> {
    for raw in overrides {
        let (field, header) = raw.split_once('=').ok_or_else(|| {
            AppError::InvalidMapping(format!("'{raw}' is not in the form field=Header"))
        })?;

        let field = AppField::from_key(field)
            .ok_or_else(|| AppError::InvalidMapping(format!("unknown field '{}'", field.trim())))?;

        let header = if header.trim().is_empty() {
            String::new()
        } else {
            table
                .resolve_header(header)
                .ok_or_else(|| {
                    AppError::InvalidMapping(format!("no column named '{}'", header.trim()))
                })?
                .to_string()
        };

        if let Some(m) = mapping.iter_mut().find(|m| m.app_field == field) {
            m.csv_header = header;
        }
    }
    Ok(())
}

/// Every problem preventing the import, in row order.
pub fn validate_required_fields(table: &CsvTable, mapping: &[FieldMapping]) -> Vec<String> {
    let mut errors = Vec::new();

    for m in mapping.iter().filter(|m| m.required && !m.is_bound()) {
        errors.push(format!("No column mapped for required field '{}'", m.app_field));
    }

    let required: Vec<&FieldMapping> = mapping
        .iter()
        .filter(|m| m.required && m.is_bound())
        .collect();

    for (i, row) in table.rows.iter().enumerate() {
        for m in &required {
            if table.cell(row, &m.csv_header).trim().is_empty() {
                errors.push(format!(
                    "Row {}: Missing required field '{}'",
                    i + 1,
                    m.csv_header
                ));
            }
        }
    }

    errors
}

/// Convert rows to drafts. Unbound columns are kept as extra attributes.
pub fn map_rows(table: &CsvTable, mapping: &[FieldMapping]) -> Vec<AttendeeDraft> {
    let bound: Vec<&str> = mapping
        .iter()
        .filter(|m| m.is_bound())
        .map(|m| m.csv_header.as_str())
        .collect();

    table
        .rows
        .iter()
        .map(|row| {
            let mut d = AttendeeDraft::default();

            for m in mapping.iter().filter(|m| m.is_bound()) {
                let v = table.cell(row, &m.csv_header).trim().to_string();
                let opt = if v.is_empty() { None } else { Some(v.clone()) };
                match m.app_field {
                    AppField::Name => d.name = v,
                    AppField::Email => d.email = v,
                    AppField::Phone => d.phone = opt,
                    AppField::Company => d.company = opt,
                    AppField::UniqueId => d.unique_id = opt,
                    AppField::QrCodeData => d.qr_code_data = opt,
                }
            }

            let mut extra = BTreeMap::new();
            for (i, h) in table.headers.iter().enumerate() {
                if h.is_empty() || bound.contains(&h.as_str()) || is_core_field(h) {
                    continue;
                }
                if let Some(v) = row.get(i).filter(|v| !v.trim().is_empty()) {
                    extra.insert(h.clone(), v.trim().to_string());
                }
            }
            d.extra = extra;

            d
        })
        .collect()
}

/// Outcome of preparing an import: the final mapping and the drafts.
#[derive(Debug, Clone)]
pub struct ImportPlan {
    pub mapping: Vec<FieldMapping>,
    pub drafts: Vec<AttendeeDraft>,
}

/// Auto-map, apply overrides, validate and convert. Validation problems are
/// returned together as [`AppError::ImportValidation`].
pub fn prepare_import(table: &CsvTable, overrides: &[String]) -> AppResult<ImportPlan> {
    let mut mapping = auto_map(&table.headers);
    apply_overrides(table, &mut mapping, overrides)?;

    let errors = validate_required_fields(table, &mapping);
    if !errors.is_empty() {
        return Err(AppError::ImportValidation(errors));
    }

    let drafts = map_rows(table, &mapping);
    Ok(ImportPlan { mapping, drafts })
}
