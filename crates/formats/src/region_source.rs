use foundation::LonLat;
use serde_json::{Map, Value};
use tracing::warn;

use crate::region::{Region, RegionAttributes, RegionId, RegionSet, VoteCount};

#[derive(Debug, Clone, PartialEq)]
pub enum RegionSourceError {
    Json(String),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for RegionSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionSourceError::Json(msg) => write!(f, "JSON parse error: {msg}"),
            RegionSourceError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            RegionSourceError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for RegionSourceError {}

/// Parses a GeoJSON FeatureCollection of polygon regions.
pub fn regions_from_geojson_str(payload: &str) -> Result<RegionSet, RegionSourceError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| RegionSourceError::Json(e.to_string()))?;
    regions_from_geojson_value(&value)
}

pub fn regions_from_geojson_value(value: &Value) -> Result<RegionSet, RegionSourceError> {
    let obj = value
        .as_object()
        .ok_or(RegionSourceError::NotAFeatureCollection)?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(RegionSourceError::NotAFeatureCollection)?;
    if ty != "FeatureCollection" {
        return Err(RegionSourceError::NotAFeatureCollection);
    }
    let features = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(RegionSourceError::NotAFeatureCollection)?;

    let mut regions = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        let region = parse_region(feature)
            .map_err(|reason| RegionSourceError::InvalidFeature { index, reason })?;
        regions.push(region);
    }
    Ok(RegionSet::new(regions))
}

fn parse_region(value: &Value) -> Result<Region, String> {
    let obj = value
        .as_object()
        .ok_or("feature must be an object".to_string())?;
    match obj.get("type").and_then(|v| v.as_str()) {
        Some("Feature") => {}
        Some(other) => return Err(format!("unexpected feature type: {other}")),
        None => return Err("feature missing type".to_string()),
    }

    let empty = Map::new();
    let props = obj
        .get("properties")
        .and_then(|v| v.as_object())
        .unwrap_or(&empty);
    let name = props.get("name").and_then(|v| v.as_str());

    let id = match obj.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => name
            .map(str::to_string)
            .ok_or("feature has neither id nor name".to_string())?,
    };
    let name = name.map(str::to_string).unwrap_or_else(|| id.clone());

    let geometry = obj
        .get("geometry")
        .ok_or("feature missing geometry".to_string())?;
    let rings = parse_polygon_geometry(geometry)?;
    if rings.first().is_none_or(|outer| outer.is_empty()) {
        return Err("polygon outer ring is empty".to_string());
    }

    let attributes = parse_attributes(&id, props);
    Ok(Region {
        id: RegionId(id),
        name,
        rings,
        attributes,
    })
}

fn parse_polygon_geometry(value: &Value) -> Result<Vec<Vec<LonLat>>, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;
    if ty != "Polygon" {
        return Err(format!("unsupported geometry type: {ty}"));
    }
    let rings = obj
        .get("coordinates")
        .and_then(|v| v.as_array())
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    rings.iter().map(parse_ring).collect()
}

fn parse_ring(value: &Value) -> Result<Vec<LonLat>, String> {
    let arr = value
        .as_array()
        .ok_or("ring must be an array".to_string())?;
    arr.iter().map(parse_position).collect()
}

fn parse_position(value: &Value) -> Result<LonLat, String> {
    let arr = value
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(LonLat::new(lon, lat))
}

fn parse_attributes(id: &str, props: &Map<String, Value>) -> RegionAttributes {
    RegionAttributes {
        region_label: props
            .get("region")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        flood_projects: props
            .get("flood_projects")
            .map(|v| coerce_count(id, "flood_projects", v))
            .unwrap_or(0),
        president_votes: parse_vote_map(id, "president_votes", props.get("president_votes")),
        vice_votes: parse_vote_map(id, "vice_votes", props.get("vice_votes")),
        senatorial: parse_vote_pairs(id, props.get("senatorial")),
    }
}

fn parse_vote_map(id: &str, field: &str, value: Option<&Value>) -> Vec<VoteCount> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(name, v)| VoteCount::new(name.clone(), coerce_count(id, field, v)))
            .collect(),
        Some(_) => {
            warn!(region = id, field, "vote map is not an object; treating as empty");
            Vec::new()
        }
    }
}

fn parse_vote_pairs(id: &str, value: Option<&Value>) -> Vec<VoteCount> {
    let Some(value) = value else {
        return Vec::new();
    };
    let Some(entries) = value.as_array() else {
        if !value.is_null() {
            warn!(region = id, "senatorial is not an array; treating as empty");
        }
        return Vec::new();
    };

    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        let pair = entry.as_array().map(Vec::as_slice).unwrap_or(&[]);
        let Some(name) = pair.first().and_then(|v| v.as_str()) else {
            warn!(region = id, "skipping senatorial entry without a name");
            continue;
        };
        let votes = pair
            .get(1)
            .map(|v| coerce_count(id, "senatorial", v))
            .unwrap_or(0);
        out.push(VoteCount::new(name, votes));
    }
    out
}

/// Counts are non-negative integers; anything else degrades to zero.
fn coerce_count(id: &str, field: &str, value: &Value) -> u64 {
    if let Some(n) = value.as_u64() {
        return n;
    }
    match value.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 => f.round() as u64,
        _ => {
            if !value.is_null() {
                warn!(region = id, field, %value, "non-numeric count coerced to 0");
            }
            0
        }
    }
}
