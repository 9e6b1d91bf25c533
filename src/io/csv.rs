//! Block population tables (PL 94-171 style CSV) joined onto units by GEOID.

use std::{fs::File, io::Cursor, path::Path};

use ahash::AHashMap;
use polars::{
    frame::DataFrame,
    io::SerReader,
    prelude::{CsvReadOptions, DataType},
};
use tracing::{info, warn};

use crate::{
    common::{DistrictError, Result},
    unit::Unit,
};

/// Block population keyed by GEOID.
pub type PopulationTable = AHashMap<String, u64>;

/// Columns concatenated, in this order, into a GEOID when the table has none.
const GEOID_PARTS: [&str; 4] = ["state", "county", "tract", "block"];

/// Read a population table from a CSV file.
///
/// Every column is read as text so GEOIDs and their parts keep leading zeros.
/// The GEOID is the first column named `geoid` or starting with `GEOID`
/// (case-insensitive); without one it is built from `state`, `county`,
/// `tract` and `block`. Population comes from the first of
/// `population_columns` present; blank or non-numeric cells count as 0.
pub fn read_population_csv(path: &Path, population_columns: &[String]) -> Result<PopulationTable> {
    let df = csv_options()
        .into_reader_with_file_handle(File::open(path)?)
        .finish()?;
    population_table(&df, population_columns)
}

/// Parse a population table from CSV text.
pub fn parse_population_csv(text: &str, population_columns: &[String]) -> Result<PopulationTable> {
    let df = csv_options()
        .into_reader_with_file_handle(Cursor::new(text.as_bytes()))
        .finish()?;
    population_table(&df, population_columns)
}

/// Set each unit's population from `table`. Units without a row get 0.
///
/// Returns the number of unmatched units.
pub fn attach_population(units: &mut [Unit], table: &PopulationTable) -> usize {
    let mut unmatched = 0;
    for unit in units.iter_mut() {
        unit.population = match table.get(&unit.id) {
            Some(&population) => population,
            None => { unmatched += 1; 0 }
        };
    }

    if unmatched > 0 {
        warn!(unmatched, units = units.len(), "units without a population row set to 0");
    }
    info!(rows = table.len(), units = units.len(), "attached block populations");
    unmatched
}

fn csv_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
}

fn population_table(df: &DataFrame, population_columns: &[String]) -> Result<PopulationTable> {
    let names = df.get_column_names().iter().map(|name| name.to_string()).collect::<Vec<_>>();
    let find = |wanted: &str| names.iter().find(|name| name.eq_ignore_ascii_case(wanted));

    let geoids = match names.iter().find(|name| name.to_uppercase().starts_with("GEOID")) {
        Some(column) => text_column(df, column)?,
        None => {
            let parts = GEOID_PARTS.iter()
                .map(|part| find(*part).ok_or_else(|| missing("GEOID or state/county/tract/block", &names)))
                .map(|column| text_column(df, column?))
                .collect::<Result<Vec<_>>>()?;
            (0..df.height())
                .map(|row| parts.iter().map(|part| part[row].as_deref()).collect::<Option<String>>())
                .collect()
        }
    };

    let population_column = population_columns.iter()
        .find_map(|wanted| find(wanted.as_str()))
        .ok_or_else(|| missing("population", &names))?;
    let populations = text_column(df, population_column)?;

    let mut table = PopulationTable::with_capacity(df.height());
    for (geoid, cell) in geoids.into_iter().zip(populations) {
        let Some(geoid) = geoid else { continue };
        let population = parse_count(cell.as_deref())
            .map_err(|msg| DistrictError::InvalidInput(format!("population row '{geoid}': {msg}")))?;
        if table.insert(geoid.clone(), population).is_some() {
            return Err(DistrictError::InvalidInput(format!("duplicate GEOID '{geoid}' in population table")));
        }
    }
    Ok(table)
}

fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column.str()?.into_iter().map(|cell| cell.map(str::to_owned)).collect())
}

fn parse_count(cell: Option<&str>) -> std::result::Result<u64, String> {
    match cell.and_then(|s| s.trim().parse::<f64>().ok()) {
        Some(c) if c < 0.0 => Err(format!("negative population {c}")),
        Some(c) if c.is_finite() => Ok(c as u64),
        _ => Ok(0),
    }
}

fn missing(what: &str, names: &[String]) -> DistrictError {
    DistrictError::InvalidInput(format!("no {what} column in population table; columns are {names:?}"))
}
