//! Overpass QL query construction and response decoding.

use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{Anchor, RawBuilding};

/// Build a query for every named building way/relation within `radius_m`
/// of `anchor`, returning centroids and tags.
pub fn building_query(anchor: Anchor, radius_m: u32, timeout_secs: u64) -> String {
    format!(
        r#"
    [out:json][timeout:{timeout}];
    (
      way["building"]["name"](around:{radius},{lat},{lon});
      relation["building"]["name"](around:{radius},{lat},{lon});
    );
    out center tags;
    "#,
        timeout = timeout_secs,
        radius = radius_m,
        lat = anchor.lat,
        lon = anchor.lon,
    )
}

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// Centroid if Overpass computed one, otherwise the element's own point.
    fn position(&self) -> Option<(f64, f64)> {
        match (self.center, self.lat, self.lon) {
            (Some(center), _, _) => Some((center.lat, center.lon)),
            (None, Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn to_building(&self) -> Option<RawBuilding> {
        let name = self.tag("name")?;
        let (lat, lon) = self.position()?;

        let mut building = RawBuilding::new(name, lat, lon);
        building.alt_name = self.tag("alt_name").map(String::from);
        Some(building)
    }
}

impl OverpassResponse {
    /// Named, positioned buildings in response order; anything else is dropped.
    pub fn into_buildings(self) -> Vec<RawBuilding> {
        self.elements
            .iter()
            .filter_map(OverpassElement::to_building)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_contains_bounds() {
        let query = building_query(Anchor::new(34.0689, -118.4452), 1500, 25);

        assert!(query.contains("[out:json][timeout:25];"));
        assert!(query.contains(r#"way["building"]["name"](around:1500,34.0689,-118.4452);"#));
        assert!(query.contains(r#"relation["building"]["name"](around:1500,34.0689,-118.4452);"#));
        assert!(query.contains("out center tags;"));
    }

    #[test]
    fn test_parse_elements() {
        let body = json!({
            "version": 0.6,
            "elements": [
                {
                    "type": "way",
                    "id": 1,
                    "center": { "lat": 34.07, "lon": -118.44 },
                    "tags": { "building": "university", "name": "Royce Hall", "alt_name": "Royce" }
                },
                {
                    "type": "relation",
                    "id": 2,
                    "lat": 34.06,
                    "lon": -118.45,
                    "tags": { "building": "yes", "name": "Powell Library" }
                },
                {
                    "type": "way",
                    "id": 3,
                    "center": { "lat": 34.0, "lon": -118.0 },
                    "tags": { "building": "yes" }
                },
                {
                    "type": "way",
                    "id": 4,
                    "tags": { "building": "yes", "name": "Nowhere Hall" }
                },
                {
                    "type": "way",
                    "id": 5,
                    "lat": 34.0,
                    "tags": { "building": "yes", "name": "Half Hall" }
                }
            ]
        });

        let response: OverpassResponse = serde_json::from_value(body).unwrap();
        let buildings = response.into_buildings();

        assert_eq!(buildings.len(), 2);
        assert_eq!(
            buildings[0],
            RawBuilding::new("Royce Hall", 34.07, -118.44).with_alt_name("Royce")
        );
        assert_eq!(buildings[1], RawBuilding::new("Powell Library", 34.06, -118.45));
    }

    #[test]
    fn test_center_preferred_over_point() {
        let element: OverpassElement = serde_json::from_value(json!({
            "lat": 1.0,
            "lon": 1.0,
            "center": { "lat": 2.0, "lon": 3.0 },
            "tags": { "name": "Math Sciences" }
        }))
        .unwrap();

        let building = element.to_building().unwrap();
        assert_eq!((building.lat, building.lon), (2.0, 3.0));
    }

    #[test]
    fn test_missing_elements_field() {
        let response: OverpassResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_buildings().is_empty());
    }
}
