use std::{fs::File, io::BufWriter, path::Path};

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::{
    common::{DistrictError, Result},
    io::csv,
    plan::{DistrictShape, Plan},
    unit::Unit,
};

/// Read units from a GeoJSON FeatureCollection file.
pub fn read_units(path: &Path, population_columns: &[String]) -> Result<Vec<Unit>> {
    parse_units(&std::fs::read_to_string(path)?, population_columns)
}

/// Read units from a GeoJSON FeatureCollection, taking populations from a
/// block population CSV when the features carry no population column.
///
/// A population column on the features wins over the CSV. Otherwise every
/// unit is joined to the CSV by id, and units without a row get 0.
pub fn read_units_with_population(
    path: &Path,
    population_csv: &Path,
    population_columns: &[String],
) -> Result<Vec<Unit>> {
    let (mut units, has_population) =
        units_from_features(&std::fs::read_to_string(path)?, population_columns, false)?;
    if has_population {
        info!("population column found on units; ignoring {}", population_csv.display());
    } else {
        let table = csv::read_population_csv(population_csv, population_columns)?;
        csv::attach_population(&mut units, &table);
    }
    Ok(units)
}

/// Parse units from GeoJSON text.
///
/// The unit id is the first property whose name starts with `GEOID`
/// (case-insensitive), falling back to the feature `id`. Population comes
/// from the first of `population_columns` present on the first feature;
/// null or non-numeric values count as 0. Null geometries become empty
/// units with no neighbors.
pub fn parse_units(text: &str, population_columns: &[String]) -> Result<Vec<Unit>> {
    units_from_features(text, population_columns, true).map(|(units, _)| units)
}

/// Parse units, reporting whether a population column was found. Without
/// one, populations are 0 unless `require_population` makes it an error.
fn units_from_features(
    text: &str,
    population_columns: &[String],
    require_population: bool,
) -> Result<(Vec<Unit>, bool)> {
    let features = parse_features(text)?;
    let Some(first) = features.first() else { return Ok((Vec::new(), false)) };

    let first_props = properties(first);
    let id_column = first_props.keys()
        .find(|key| key.to_uppercase().starts_with("GEOID"))
        .cloned();
    let population_column = find_column(first_props, population_columns);
    if population_column.is_none() && require_population {
        return Err(DistrictError::InvalidInput(format!(
            "no population column among {population_columns:?}; properties are {:?}",
            first_props.keys().collect::<Vec<_>>()
        )));
    }

    let units = features.iter().enumerate()
        .map(|(i, feature)| -> Result<Unit> {
            let props = properties(feature);
            let id = match &id_column {
                Some(column) => props.get(column),
                None => feature.get("id"),
            }
            .and_then(id_to_string)
            .ok_or_else(|| DistrictError::InvalidInput(format!("feature {i} has no GEOID or id")))?;

            let population = match &population_column {
                Some(column) => parse_population(props.get(column))
                    .map_err(|msg| DistrictError::InvalidInput(format!("unit '{id}': {msg}")))?,
                None => 0,
            };
            let geometry = parse_geometry(feature.get("geometry").unwrap_or(&Value::Null))
                .map_err(|msg| DistrictError::InvalidInput(format!("unit '{id}': {msg}")))?;

            Ok(Unit { id, geometry, population })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((units, population_column.is_some()))
}

/// Read dissolved districts (with `district` and population properties) for scoring.
pub fn read_districts(path: &Path, population_columns: &[String]) -> Result<Vec<DistrictShape>> {
    parse_districts(&std::fs::read_to_string(path)?, population_columns)
}

/// Parse dissolved districts from GeoJSON text.
pub fn parse_districts(text: &str, population_columns: &[String]) -> Result<Vec<DistrictShape>> {
    parse_features(text)?.iter().enumerate()
        .map(|(i, feature)| -> Result<DistrictShape> {
            let props = properties(feature);
            let district = props.get("district")
                .and_then(Value::as_u64)
                .ok_or_else(|| DistrictError::InvalidInput(format!("feature {i} has no numeric 'district' property")))?;
            let column = find_column(props, population_columns)
                .ok_or_else(|| DistrictError::InvalidInput(format!("district {district} has no population property")))?;
            let population = parse_population(props.get(&column))
                .map_err(|msg| DistrictError::InvalidInput(format!("district {district}: {msg}")))?;
            let geometry = parse_geometry(feature.get("geometry").unwrap_or(&Value::Null))
                .map_err(|msg| DistrictError::InvalidInput(format!("district {district}: {msg}")))?;

            Ok(DistrictShape {
                district: district as u32,
                population,
                geometry: (!geometry.0.is_empty()).then_some(geometry),
            })
        })
        .collect()
}

/// Export a plan as a FeatureCollection of dissolved districts.
pub fn districts_to_geojson(plan: &Plan) -> Value {
    let score = plan.score();
    let features = plan.district_shapes().into_iter().zip(score.districts)
        .map(|(shape, row)| {
            json!({
                "type": "Feature",
                "id": shape.district,
                "geometry": shape.geometry.as_ref().map_or(Value::Null, multipolygon_to_geojson),
                "properties": {
                    "district": shape.district,
                    "pop": shape.population,
                    "pp": row.pp,
                },
            })
        })
        .collect::<Vec<_>>();

    json!({ "type": "FeatureCollection", "features": features })
}

/// Write dissolved districts to a GeoJSON file.
pub fn write_districts(plan: &Plan, path: &Path) -> Result<()> {
    serde_json::to_writer(BufWriter::new(File::create(path)?), &districts_to_geojson(plan))?;
    Ok(())
}

fn parse_features(text: &str) -> Result<Vec<Value>> {
    let mut root: Value = serde_json::from_str(text)?;
    match root.get_mut("features").map(Value::take) {
        Some(Value::Array(features)) => Ok(features),
        _ => Err(DistrictError::InvalidInput("expected a GeoJSON FeatureCollection".into())),
    }
}

fn properties(feature: &Value) -> &Map<String, Value> {
    static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();
    feature.get("properties")
        .and_then(Value::as_object)
        .unwrap_or_else(|| EMPTY.get_or_init(Map::new))
}

/// First candidate column present in `props`, matched case-insensitively.
fn find_column(props: &Map<String, Value>, candidates: &[String]) -> Option<String> {
    candidates.iter()
        .find_map(|name| props.keys().find(|key| key.eq_ignore_ascii_case(name)))
        .cloned()
}

fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_population(value: Option<&Value>) -> std::result::Result<u64, String> {
    let count = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match count {
        Some(c) if c < 0.0 => Err(format!("negative population {c}")),
        Some(c) if c.is_finite() => Ok(c as u64),
        _ => Ok(0),
    }
}

fn parse_geometry(value: &Value) -> std::result::Result<MultiPolygon<f64>, String> {
    if value.is_null() { return Ok(MultiPolygon::new(vec![])) }

    let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
    let coordinates = value.get("coordinates").ok_or("geometry has no coordinates")?;
    match kind {
        "Polygon" => parse_polygon(coordinates)
            .map(|polygon| MultiPolygon::new(vec![polygon]))
            .ok_or_else(|| "malformed Polygon coordinates".to_string()),
        "MultiPolygon" => coordinates.as_array()
            .and_then(|polygons| polygons.iter().map(parse_polygon).collect::<Option<Vec<_>>>())
            .map(MultiPolygon::new)
            .ok_or_else(|| "malformed MultiPolygon coordinates".to_string()),
        other => Err(format!("unsupported geometry type '{other}'")),
    }
}

fn parse_polygon(value: &Value) -> Option<Polygon<f64>> {
    let mut rings = value.as_array()?.iter()
        .map(parse_ring)
        .collect::<Option<Vec<_>>>()?
        .into_iter();
    let exterior = rings.next()?;
    Some(Polygon::new(exterior, rings.collect()))
}

fn parse_ring(value: &Value) -> Option<LineString<f64>> {
    value.as_array()?.iter()
        .map(|position| {
            let position = position.as_array()?;
            Some(Coord { x: position.first()?.as_f64()?, y: position.get(1)?.as_f64()? })
        })
        .collect::<Option<Vec<_>>>()
        .map(LineString::from)
}

/// Convert a MultiPolygon to a GeoJSON geometry object.
fn multipolygon_to_geojson(shape: &MultiPolygon<f64>) -> Value {
    let polygons = shape.iter()
        .map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(|ring| ring.coords().map(|c| vec![c.x, c.y]).collect::<Vec<_>>())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    json!({ "type": "MultiPolygon", "coordinates": polygons })
}
