//! Pollution report domain model.
//!
//! A [`Report`] is one user-submitted observation of environmental pollution. Reports
//! are immutable once fetched; the controller only ever replaces the whole list or
//! prunes a report after it has been deleted.
//!
//! Field names on the wire follow the collection API (`type`, `dateObservation`,
//! `photoUrl`, `createdBy`), so JSON produced by the service deserializes as-is.

use super::error::CatalogError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable, unique identifier of a report.
pub type ReportId = i64;

/// Kind of pollution a report describes.
///
/// Serialized with the labels used by the collection API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Plastique")]
    Plastic,
    #[serde(rename = "Chimique")]
    Chemical,
    #[serde(rename = "Dépôt sauvage")]
    IllegalDumping,
    #[serde(rename = "Eau")]
    Water,
    #[serde(rename = "Air")]
    Air,
    #[serde(rename = "Autre")]
    Other,
}

impl Category {
    /// Every category, in the order the filter selector lists them.
    pub const ALL: [Self; 6] = [
        Self::Plastic,
        Self::Chemical,
        Self::IllegalDumping,
        Self::Water,
        Self::Air,
        Self::Other,
    ];

    /// Label used by the collection API and shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Plastic => "Plastique",
            Self::Chemical => "Chimique",
            Self::IllegalDumping => "Dépôt sauvage",
            Self::Water => "Eau",
            Self::Air => "Air",
            Self::Other => "Autre",
        }
    }

    /// Short English identifier, accepted by [`FromStr`] alongside the label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plastic => "plastic",
            Self::Chemical => "chemical",
            Self::IllegalDumping => "illegal-dumping",
            Self::Water => "water",
            Self::Air => "air",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    /// Parses either the API label or the English identifier, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == needle || c.name() == needle)
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Geographic position of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// User who submitted a report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Creator {
    pub id: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    #[serde(rename = "nom")]
    pub last_name: String,
}

impl Creator {
    /// Display name, "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// A user-submitted pollution report.
///
/// # Fields
///
/// - `id`: Stable identifier assigned by the collection service
/// - `title`: Short headline, the field searched by title queries
/// - `category`: Pollution kind, the field matched by category filters
/// - `observed_at`: Calendar date of the observation
/// - `coordinates`: Flattened `latitude`/`longitude` on the wire
/// - `photo_ref`: Optional reference to an uploaded photo
/// - `creator`: Submitting user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "dateObservation")]
    pub observed_at: NaiveDate,
    #[serde(default)]
    pub location: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    #[serde(rename = "photoUrl", default, skip_serializing_if = "Option::is_none")]
    pub photo_ref: Option<String>,
    #[serde(rename = "createdBy", default)]
    pub creator: Creator,
}

impl Report {
    /// Creates a report with the required fields; everything else is left empty.
    #[must_use]
    pub fn new(id: ReportId, title: impl Into<String>, category: Category, observed_at: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            category,
            description: String::new(),
            observed_at,
            location: String::new(),
            coordinates: Coordinates::default(),
            photo_ref: None,
            creator: Creator::default(),
        }
    }

    /// Observation date formatted for list rows, e.g. `3 May 2024`.
    #[must_use]
    pub fn observed_on(&self) -> String {
        self.observed_at.format("%-d %b %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_label_and_name() {
        assert_eq!("Plastique".parse::<Category>().unwrap(), Category::Plastic);
        assert_eq!("dépôt sauvage".parse::<Category>().unwrap(), Category::IllegalDumping);
        assert_eq!("WATER".parse::<Category>().unwrap(), Category::Water);
        assert!(matches!(
            "radioactive".parse::<Category>(),
            Err(CatalogError::UnknownCategory(_))
        ));
    }

    #[test]
    fn report_reads_api_field_names() {
        let json = r#"{
            "id": 7,
            "title": "Bidons abandonnés",
            "type": "Chimique",
            "description": "Trois bidons près du ruisseau",
            "dateObservation": "2024-05-03",
            "location": "Lyon",
            "latitude": 45.76,
            "longitude": 4.83,
            "createdBy": { "id": "u1", "nom": "Martin", "prenom": "Emma" }
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.id, 7);
        assert_eq!(report.category, Category::Chemical);
        assert_eq!(report.photo_ref, None);
        assert_eq!(report.creator.full_name(), "Emma Martin");
        assert_eq!(report.observed_on(), "3 May 2024");

        let back = serde_json::to_value(&report).unwrap();
        assert_eq!(back["type"], "Chimique");
        assert_eq!(back["latitude"], 45.76);
        assert!(back.get("photoUrl").is_none());
    }
}
