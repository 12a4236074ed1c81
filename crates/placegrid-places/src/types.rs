//! Typed wire format of the nearby-search endpoint.

use placegrid_core::models::{Coordinate, PlaceRecord};
use serde::Deserialize;

/// Envelope returned by the nearby-search endpoint.
///
/// `status` carries the application-level outcome; `results` is absent on
/// errors and on `ZERO_RESULTS`.
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,

    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

/// One place item from a search response.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub place_id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub business_status: Option<String>,

    #[serde(default)]
    pub types: Vec<String>,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub user_ratings_total: Option<u64>,

    #[serde(default)]
    pub vicinity: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: Location,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl PlaceResult {
    /// Convert into the core record type.
    ///
    /// An absent or out-of-range location maps to `coordinate: None`; the
    /// deduplicator downstream drops and counts such records.
    pub fn into_record(self) -> PlaceRecord {
        let coordinate = self
            .geometry
            .as_ref()
            .and_then(|g| Coordinate::new(g.location.lat, g.location.lng).ok());
        PlaceRecord {
            id: self.place_id,
            name: self.name,
            coordinate,
            categories: self.types,
            status: self.business_status,
            rating: self.rating,
            user_ratings_total: self.user_ratings_total,
            address: self.vicinity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_record_maps_fields() {
        let result: PlaceResult = serde_json::from_value(serde_json::json!({
            "place_id": "abc123",
            "name": "City Hospital",
            "geometry": { "location": { "lat": 24.86, "lng": 67.0 } },
            "business_status": "OPERATIONAL",
            "types": ["hospital", "health"],
            "rating": 4.2,
            "user_ratings_total": 120,
            "vicinity": "Shahrah-e-Faisal, Karachi"
        }))
        .unwrap();

        let record = result.into_record();
        assert_eq!(record.id.as_deref(), Some("abc123"));
        assert_eq!(record.name, "City Hospital");
        assert_eq!(record.coordinate, Some(Coordinate::new(24.86, 67.0).unwrap()));
        assert_eq!(record.categories, vec!["hospital", "health"]);
        assert_eq!(record.status.as_deref(), Some("OPERATIONAL"));
        assert_eq!(record.rating, Some(4.2));
        assert_eq!(record.address.as_deref(), Some("Shahrah-e-Faisal, Karachi"));
    }

    #[test]
    fn test_missing_geometry_maps_to_no_coordinate() {
        let result: PlaceResult =
            serde_json::from_value(serde_json::json!({ "name": "Nameless" })).unwrap();
        assert!(result.into_record().coordinate.is_none());
    }

    #[test]
    fn test_out_of_range_location_maps_to_no_coordinate() {
        let result: PlaceResult = serde_json::from_value(serde_json::json!({
            "name": "Broken",
            "geometry": { "location": { "lat": 224.0, "lng": 67.0 } }
        }))
        .unwrap();
        assert!(result.into_record().coordinate.is_none());
    }
}
