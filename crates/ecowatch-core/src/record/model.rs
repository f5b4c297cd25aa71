//! Record domain models.

use serde::{Deserialize, Serialize};

use crate::error::{EcowatchError, Result};

pub type RecordId = i64;

/// Author of a record as embedded by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A pollution report in canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "RawRecord")]
pub struct Record {
    pub id: Option<RecordId>,
    pub title: String,
    /// Pollution category ("Plastique", "Eau", ...)
    pub kind: String,
    pub description: String,
    /// Observation date as sent by the API (ISO date)
    pub observed_on: String,
    /// Free-text location label
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// URL or data URI of the photo
    pub photo: Option<String>,
    pub author_id: Option<i64>,
    pub author: Option<Author>,
}

impl Record {
    /// Case-insensitive substring match over title, location and kind.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.title, &self.location, &self.kind]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Wire shape accepted from the API, every known spelling included.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    id: Option<RecordId>,
    #[serde(alias = "title")]
    titre: Option<String>,
    #[serde(rename = "type", alias = "kind")]
    kind: Option<String>,
    type_pollution: Option<String>,
    description: Option<String>,
    #[serde(rename = "dateObservation")]
    date_observation_camel: Option<String>,
    #[serde(alias = "observed_on")]
    date_observation: Option<String>,
    date: Option<String>,
    #[serde(alias = "location")]
    lieu: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    longitude: Option<f64>,
    photo: Option<String>,
    photo_url: Option<String>,
    #[serde(rename = "photoUrl")]
    photo_url_camel: Option<String>,
    #[serde(rename = "utilisateurId", alias = "author_id")]
    author_id: Option<i64>,
    #[serde(alias = "author")]
    auteur: Option<Author>,
}

/// The API stores coordinates as DECIMAL and may send them as strings.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Number>::deserialize(deserializer)? {
        Some(Number::Float(value)) => Some(value),
        Some(Number::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

/// First alternative that is present and not blank.
fn first_filled(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Self {
            id: raw.id,
            title: raw.titre.unwrap_or_default(),
            kind: first_filled([raw.kind, raw.type_pollution]).unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            observed_on: first_filled([raw.date_observation_camel, raw.date_observation, raw.date])
                .unwrap_or_default(),
            location: raw.lieu.unwrap_or_default(),
            latitude: raw.latitude.unwrap_or_default(),
            longitude: raw.longitude.unwrap_or_default(),
            photo: first_filled([raw.photo, raw.photo_url, raw.photo_url_camel]),
            author_id: raw.author_id.or(raw.auteur.as_ref().map(|author| author.id)),
            author: raw.auteur,
        }
    }
}

/// Body of a create or update request, in the API's field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordPayload {
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(rename = "dateObservation")]
    pub observed_on: String,
    #[serde(rename = "lieu")]
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl RecordPayload {
    /// Checks required fields the way the report form does.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("title", &self.title),
            ("type", &self.kind),
            ("description", &self.description),
            ("date", &self.observed_on),
            ("location", &self.location),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(EcowatchError::validation(field, format!("{field} is required")));
            }
        }
        if !self.latitude.is_finite() {
            return Err(EcowatchError::validation("latitude", "latitude must be a number"));
        }
        if !self.longitude.is_finite() {
            return Err(EcowatchError::validation("longitude", "longitude must be a number"));
        }
        Ok(())
    }
}

impl From<&Record> for RecordPayload {
    fn from(record: &Record) -> Self {
        Self {
            title: record.title.clone(),
            kind: record.kind.clone(),
            description: record.description.clone(),
            observed_on: record.observed_on.clone(),
            location: record.location.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            photo: record.photo.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_api_payload() {
        let record: Record = serde_json::from_value(serde_json::json!({
            "id": 7,
            "titre": "Sacs plastiques",
            "type_pollution": "Plastique",
            "description": "Plage couverte",
            "date_observation": "2025-01-04",
            "lieu": "Marseille",
            "latitude": "43.29",
            "longitude": 5.37,
            "photo_url": "https://example.org/p.jpg",
            "utilisateurId": 3,
            "auteur": { "id": 3, "name": "Zoe", "email": "z@b.com" }
        }))
        .unwrap();

        assert_eq!(record.id, Some(7));
        assert_eq!(record.title, "Sacs plastiques");
        assert_eq!(record.kind, "Plastique");
        assert_eq!(record.observed_on, "2025-01-04");
        assert_eq!(record.location, "Marseille");
        assert_eq!(record.latitude, 43.29);
        assert_eq!(record.photo.as_deref(), Some("https://example.org/p.jpg"));
        assert_eq!(record.author_id, Some(3));
        assert_eq!(record.author.as_ref().map(|a| a.name.as_str()), Some("Zoe"));
    }

    #[test]
    fn test_prefers_primary_spellings() {
        let record: Record = serde_json::from_value(serde_json::json!({
            "titre": "Fuite",
            "type": "Chimique",
            "type_pollution": "Autre",
            "photo": "",
            "photoUrl": "data:image/png;base64,AAAA",
            "dateObservation": "2025-02-01",
            "date": "1999-01-01"
        }))
        .unwrap();

        assert_eq!(record.kind, "Chimique");
        assert_eq!(record.photo.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(record.observed_on, "2025-02-01");
        assert_eq!(record.id, None);
    }

    #[test]
    fn test_matches_title_location_and_kind() {
        let record = Record {
            title: "Dépôt sauvage".to_string(),
            location: "Lyon".to_string(),
            kind: "Plastique".to_string(),
            description: "pneus".to_string(),
            ..Record::default()
        };
        assert!(record.matches("dépôt"));
        assert!(record.matches("lyon"));
        assert!(record.matches("plast"));
        assert!(!record.matches("pneus"));
    }

    #[test]
    fn test_payload_uses_api_field_names() {
        let payload = RecordPayload {
            title: "Fuite".to_string(),
            kind: "Eau".to_string(),
            description: "huile".to_string(),
            observed_on: "2025-03-01".to_string(),
            location: "Nantes".to_string(),
            latitude: 47.2,
            longitude: -1.55,
            photo: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["titre"], "Fuite");
        assert_eq!(json["type"], "Eau");
        assert_eq!(json["dateObservation"], "2025-03-01");
        assert_eq!(json["lieu"], "Nantes");
        assert!(json.get("photo").is_none());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_payload_validation() {
        let payload = RecordPayload {
            title: " ".to_string(),
            kind: "Eau".to_string(),
            description: "x".to_string(),
            observed_on: "2025-03-01".to_string(),
            location: "Nantes".to_string(),
            latitude: 0.0,
            longitude: f64::NAN,
            photo: None,
        };
        let err = payload.validate().unwrap_err();
        assert!(matches!(err, EcowatchError::Validation { field: "title", .. }));

        let payload = RecordPayload {
            title: "ok".to_string(),
            ..payload
        };
        let err = payload.validate().unwrap_err();
        assert!(matches!(
            err,
            EcowatchError::Validation { field: "longitude", .. }
        ));
    }
}
