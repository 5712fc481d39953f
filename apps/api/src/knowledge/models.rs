use serde::{Deserialize, Serialize};

/// Verified structured knowledge about one city.
///
/// Loaded from JSON (the aggregate dataset or a per-city file) and treated
/// as immutable for the lifetime of the process once cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInfo {
    pub description: String,
    /// Display order; rendered into prompts in this exact sequence.
    pub attractions: Vec<Attraction>,
    pub culture: Culture,
    pub practical_info: PracticalInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub name: String,
    pub description: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Culture {
    pub history: String,
    pub customs: String,
    pub food: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticalInfo {
    pub transportation: String,
    pub accommodation: String,
    pub emergency_contacts: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_info_deserializes_camel_case() {
        let json = r#"{
            "description": "Capital of Albania",
            "attractions": [
                {"name": "Skanderbeg Square", "description": "Main plaza", "location": "City centre"},
                {"name": "Dajti Ekspres", "description": "Cable car"}
            ],
            "culture": {"history": "Ottoman and communist past", "customs": "Coffee culture", "food": "Byrek"},
            "practicalInfo": {
                "transportation": "Buses",
                "accommodation": "Hotels around the centre",
                "emergencyContacts": "Dial 112"
            }
        }"#;

        let info: CityInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.attractions.len(), 2);
        assert_eq!(info.attractions[0].location.as_deref(), Some("City centre"));
        assert!(info.attractions[1].location.is_none());
        assert_eq!(info.practical_info.emergency_contacts, "Dial 112");
    }

    #[test]
    fn test_city_info_rejects_missing_culture_field() {
        // culture.food is required; records without it are malformed
        let json = r#"{
            "description": "x",
            "attractions": [],
            "culture": {"history": "x", "customs": "x"},
            "practicalInfo": {"transportation": "x", "accommodation": "x", "emergencyContacts": "x"}
        }"#;
        assert!(serde_json::from_str::<CityInfo>(json).is_err());
    }
}
