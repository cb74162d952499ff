use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OverpassElement {
    pub r#type: String,
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>, // for nodes only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>, // for nodes only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Center>, // for ways and relations only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
}

/// Centroid computed server-side by Overpass (`out center`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// Coordinates from the kind-appropriate source. Nodes carry their own
    /// lat/lon, everything else gets a centroid, and an element with neither
    /// has no usable position.
    pub fn coord(&self) -> Option<(f64, f64)> {
        match self.r#type.as_str() {
            "node" => Some((self.lat?, self.lon?)),
            _ => self.center.as_ref().map(|it| (it.lat, it.lon)),
        }
    }

    pub fn tag(&self, name: &str) -> &str {
        match &self.tags {
            Some(tags) => tags.get(name).map(|it| it.as_str()).unwrap_or(""),
            None => "",
        }
    }

    #[cfg(test)]
    pub fn mock(id: i64) -> OverpassElement {
        OverpassElement {
            r#type: "node".into(),
            id,
            lat: Some(0.0),
            lon: Some(0.0),
            center: None,
            tags: Some(HashMap::new()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Center, OverpassElement};
    use std::collections::HashMap;

    #[test]
    fn tag() {
        let mut tags = HashMap::new();
        tags.insert("foo".into(), "bar".into());
        let element = OverpassElement {
            tags: Some(tags),
            ..OverpassElement::mock(1)
        };
        assert_eq!("bar", element.tag("foo"));
        assert_eq!("", element.tag("missing"));
        let element = OverpassElement {
            tags: None,
            ..OverpassElement::mock(1)
        };
        assert_eq!("", element.tag("foo"));
    }

    #[test]
    fn coord_prefers_kind_appropriate_source() {
        // A node ignores any centroid
        let node = OverpassElement {
            lat: Some(1.0),
            lon: Some(2.0),
            center: Some(Center { lat: 9.0, lon: 9.0 }),
            ..OverpassElement::mock(1)
        };
        assert_eq!(Some((1.0, 2.0)), node.coord());
        // A way ignores stray lat/lon fields
        let way = OverpassElement {
            r#type: "way".into(),
            lat: Some(9.0),
            lon: Some(9.0),
            center: Some(Center { lat: 3.0, lon: 4.0 }),
            ..OverpassElement::mock(1)
        };
        assert_eq!(Some((3.0, 4.0)), way.coord());
    }

    #[test]
    fn coord_absent_when_way_has_no_center() {
        let way = OverpassElement {
            r#type: "way".into(),
            lat: None,
            lon: None,
            center: None,
            ..OverpassElement::mock(1)
        };
        assert_eq!(None, way.coord());
    }

    #[test]
    fn deserialize_out_center_shape() {
        let json = r#"{"type":"way","id":42,"center":{"lat":51.5,"lon":-0.1},"tags":{"name":"Tesco"}}"#;
        let element: OverpassElement = serde_json::from_str(json).unwrap();
        assert_eq!("way", element.r#type);
        assert_eq!(Some((51.5, -0.1)), element.coord());
        assert_eq!("Tesco", element.tag("name"));
    }
}
