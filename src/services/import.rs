//! Contact CSV import
//!
//! Parses a CSV file client-side into the row payloads posted to the batch
//! endpoint. Invalid rows are reported and skipped.

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

/// International phone format accepted by the backend
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap());

/// Largest batch the contacts endpoint accepts
pub const MAX_BATCH_ROWS: usize = 1000;

const COLUMNS: [&str; 5] = ["name", "phone_number", "company_name", "email", "tags"];

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Rows ready to post plus the rows that were rejected
#[derive(Debug, Default)]
pub struct ImportPlan {
    pub rows: Vec<Map<String, Value>>,
    pub errors: Vec<String>,
}

impl ImportPlan {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse contact rows from CSV with a header line
///
/// Rows are numbered from 1, not counting the header.
pub fn parse_contacts_csv<R: Read>(source: R) -> Result<ImportPlan> {
    let mut reader = csv::Reader::from_reader(source);

    let headers = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<String>>();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let indices: Vec<(&str, Option<usize>)> = COLUMNS.iter().map(|c| (*c, column(c))).collect();

    let mut plan = ImportPlan::default();
    for (idx, result) in reader.records().enumerate() {
        let row_num = idx + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                plan.errors.push(format!("Row {}: {}", row_num, e));
                continue;
            }
        };

        let cell = |i: Option<usize>| {
            i.and_then(|i| record.get(i))
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        };

        let mut row = Map::new();
        for (name, i) in &indices {
            let value = cell(*i);
            let required = matches!(*name, "name" | "phone_number");
            row.insert(
                name.to_string(),
                if value.is_empty() && !required {
                    Value::Null
                } else {
                    Value::String(value)
                },
            );
        }

        let name = row["name"].as_str().unwrap_or_default();
        let phone = row["phone_number"].as_str().unwrap_or_default();
        if name.is_empty() {
            plan.errors.push(format!("Row {}: Name is required", row_num));
            continue;
        }
        if phone.is_empty() {
            plan.errors
                .push(format!("Row {}: Phone number is required", row_num));
            continue;
        }
        if !is_valid_phone(phone) {
            plan.errors
                .push(format!("Row {}: Invalid phone number '{}'", row_num, phone));
            continue;
        }

        plan.rows.push(row);
    }

    Ok(plan)
}

/// Read and parse a CSV file from disk
pub fn load_contacts_csv(path: &Path) -> Result<ImportPlan> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    parse_contacts_csv(file)
}
