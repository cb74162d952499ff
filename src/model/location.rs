use crate::model::OverpassElement;
use serde::{Deserialize, Serialize};
use time::Date;

pub static SOURCE: &str = "openstreetmap";

// location_desc column limit in the backing store
const MAX_DESC_CHARS: usize = 500;

/// Canonical row persisted to the backing store. The id is derived from the
/// OSM element so re-importing the same element always upserts the same row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub location_desc: String,
    pub operator_id: String,
    pub source: String,
    pub added: Date,
}

impl LocationRecord {
    /// Normalizes an Overpass element into a store row. Elements without a
    /// resolvable position are dropped, missing tags degrade to shorter
    /// descriptions.
    pub fn from_overpass(
        element: &OverpassElement,
        operator_id: &str,
        operator_name: &str,
        added: Date,
    ) -> Option<LocationRecord> {
        let (lat, lng) = element.coord()?;
        let kind_initial = element.r#type.chars().next()?;

        let name = match element.tag("name") {
            "" => operator_name,
            name => name,
        };
        let street = element.tag("addr:street");
        let housenumber = element.tag("addr:housenumber");
        let city = ["addr:city", "addr:town", "addr:suburb"]
            .iter()
            .map(|it| element.tag(it))
            .find(|it| !it.is_empty())
            .unwrap_or("");

        let mut desc_parts: Vec<String> = vec![name.into()];
        if !housenumber.is_empty() && !street.is_empty() {
            desc_parts.push(format!("{housenumber} {street}"));
        } else if !street.is_empty() {
            desc_parts.push(street.into());
        }
        if !city.is_empty() {
            desc_parts.push(city.into());
        }

        Some(LocationRecord {
            id: format!("{}-osm-{}{}", operator_id, kind_initial, element.id),
            lat: round_coord(lat),
            lng: round_coord(lng),
            location_desc: truncate_chars(&desc_parts.join(", "), MAX_DESC_CHARS),
            operator_id: operator_id.into(),
            source: SOURCE.into(),
            added,
        })
    }

    #[cfg(test)]
    pub fn mock(id: i64) -> LocationRecord {
        use time::macros::date;
        LocationRecord {
            id: format!("tesco-osm-n{id}"),
            lat: 0.0,
            lng: 0.0,
            location_desc: "Tesco".into(),
            operator_id: "tesco".into(),
            source: SOURCE.into(),
            added: date!(2025 - 01 - 15),
        }
    }
}

/// 6 decimal places, roughly 0.11 m of precision.
fn round_coord(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Truncates on a char boundary so multibyte text never ends up corrupted.
fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}
