//! Country reference data.
//!
//! The form's country choices come from a CSV resource with a `name`
//! column. A copy ships inside the binary; `countries_path` in
//! `config.toml` points at a replacement.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use fitcoach_types::country::CountryList;
use fitcoach_types::error::ReferenceDataError;

/// The bundled `countries.csv`.
pub const BUNDLED_COUNTRIES_CSV: &str = include_str!("../../data/countries.csv");

/// One row of the countries CSV. Other columns are ignored.
#[derive(Debug, Deserialize)]
struct CountryRow {
    name: String,
}

/// Parse a countries CSV from any reader.
///
/// Rows keep file order. Blank names are skipped; a missing `name` column,
/// a malformed row or zero usable rows is an error.
pub fn parse_countries<R: Read>(input: R) -> Result<CountryList, ReferenceDataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| ReferenceDataError::Malformed(e.to_string()))?;
    if headers.is_empty() {
        return Err(ReferenceDataError::Empty);
    }
    if !headers.iter().any(|h| h == "name") {
        return Err(ReferenceDataError::Malformed(
            "missing `name` column".to_string(),
        ));
    }

    let mut names = Vec::new();
    for (index, row) in reader.deserialize::<CountryRow>().enumerate() {
        // Row 1 is the header line.
        let row = row.map_err(|e| {
            ReferenceDataError::Malformed(format!("row {}: {e}", index + 2))
        })?;
        names.push(row.name);
    }

    CountryList::new(names)
}

/// The list compiled into the binary.
pub fn bundled_countries() -> Result<CountryList, ReferenceDataError> {
    parse_countries(BUNDLED_COUNTRIES_CSV.as_bytes())
}

/// Load the country list from `path`, or the bundled list when `None`.
pub async fn load_countries(path: Option<&Path>) -> Result<CountryList, ReferenceDataError> {
    let Some(path) = path else {
        tracing::debug!("Using bundled country list");
        return bundled_countries();
    };

    let content = tokio::fs::read(path)
        .await
        .map_err(|e| ReferenceDataError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let countries = parse_countries(content.as_slice())?;
    tracing::debug!(
        count = countries.len(),
        path = %path.display(),
        "Loaded country list"
    );
    Ok(countries)
}
