//! Record types for the harvest pipeline
//!
//! `ProfileRecord` is produced by the list phase, `DetailRecord` by the
//! detail phase, and `EnrichedRecord` combines the two. The JSON field names
//! (camelCase) and the CSV row shapes are the persisted artifact contract:
//! the unique-list JSON file written by the list phase is the sole input to
//! the detail phase.

use serde::{Deserialize, Serialize};

/// A single office location attached to a profile.
///
/// Fields other than `branch` are positional guesses from an ambiguous
/// address blob (see [`crate::extract`]) and may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Location {
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl Location {
    /// Flatten to the non-empty components joined by single spaces.
    pub fn flattened(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if !self.branch.is_empty() {
            parts.push(&self.branch);
        }
        for field in [&self.address, &self.city, &self.state, &self.zip] {
            if let Some(value) = field {
                if !value.is_empty() {
                    parts.push(value);
                }
            }
        }
        parts.join(" ")
    }
}

/// A flat profile record extracted from one listing result node.
///
/// `id` is the deduplication key and the lookup key for the detail phase.
/// An empty `id` is a valid-but-degenerate value (the source link did not
/// encode one), never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub id: String,
    pub name: String,
    pub title: String,
    pub designation: String,
    pub locations: Vec<Location>,
    pub phone_numbers: Vec<String>,
}

/// Professional experience section of a detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Experience {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<u32>,
    pub positions: Vec<String>,
}

/// Branch information section of a detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BranchInformation {
    pub details: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_link: Option<String>,
}

/// The richer record extracted from a per-profile detail page.
///
/// Carries no identity of its own; it is attached to a [`ProfileRecord`] by
/// the id used to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    pub financial_credentials: Vec<String>,
    pub experience: Experience,
    pub education: Vec<String>,
    pub branch_information: BranchInformation,
}

/// A profile merged with its detail-phase result.
///
/// `scraped_details` is `None` and `error` is set when the detail fetch
/// exhausted its retries; otherwise `error` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub profile: ProfileRecord,
    pub scraped_details: Option<DetailRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Join multi-valued fields for tabular output.
fn join_multi(values: &[String]) -> String {
    values.join("; ")
}

/// Flatten a location list for tabular output.
fn join_locations(locations: &[Location]) -> String {
    locations
        .iter()
        .map(Location::flattened)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Tabular projection of a [`ProfileRecord`] for CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Designation")]
    pub designation: String,
    #[serde(rename = "Locations")]
    pub locations: String,
    #[serde(rename = "PhoneNumbers")]
    pub phone_numbers: String,
}

impl From<&ProfileRecord> for ListRow {
    fn from(record: &ProfileRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            title: record.title.clone(),
            designation: record.designation.clone(),
            locations: join_locations(&record.locations),
            phone_numbers: join_multi(&record.phone_numbers),
        }
    }
}

/// Tabular projection of an [`EnrichedRecord`] for CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Designation")]
    pub designation: String,
    #[serde(rename = "Locations")]
    pub locations: String,
    #[serde(rename = "PhoneNumbers")]
    pub phone_numbers: String,
    #[serde(rename = "FinancialCredentials")]
    pub financial_credentials: String,
    #[serde(rename = "ExperienceYears")]
    pub experience_years: String,
    #[serde(rename = "ExperiencePositions")]
    pub experience_positions: String,
    #[serde(rename = "Education")]
    pub education: String,
    #[serde(rename = "BranchInformation")]
    pub branch_information: String,
    #[serde(rename = "BranchMapLink")]
    pub branch_map_link: String,
}

impl From<&EnrichedRecord> for DetailRow {
    fn from(record: &EnrichedRecord) -> Self {
        let base = ListRow::from(&record.profile);
        let details = record.scraped_details.as_ref();
        Self {
            id: base.id,
            name: base.name,
            title: base.title,
            designation: base.designation,
            locations: base.locations,
            phone_numbers: base.phone_numbers,
            financial_credentials: details
                .map(|d| join_multi(&d.financial_credentials))
                .unwrap_or_default(),
            experience_years: details
                .and_then(|d| d.experience.years)
                .map(|y| y.to_string())
                .unwrap_or_default(),
            experience_positions: details
                .map(|d| join_multi(&d.experience.positions))
                .unwrap_or_default(),
            education: details.map(|d| join_multi(&d.education)).unwrap_or_default(),
            branch_information: details
                .map(|d| d.branch_information.details.join(" "))
                .unwrap_or_default(),
            branch_map_link: details
                .and_then(|d| d.branch_information.map_link.clone())
                .unwrap_or_default(),
        }
    }
}
