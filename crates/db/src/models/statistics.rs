//! Singleton site statistics shown on the marketing page.

use kontrola_core::fields;
use kontrola_core::types::Timestamp;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PERFORMED_INSPECTIONS: i64 = 15_000;
pub const DEFAULT_YEARS_EXPERIENCE_START: i32 = 2014;
pub const DEFAULT_SATISFACTION_PERCENTAGE: f64 = 98.0;

/// A row from the `statistics` table. Every column may be null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticsRow {
    #[serde(default)]
    pub performed_inspections: Option<i64>,
    #[serde(default)]
    pub years_experience_start: Option<i32>,
    #[serde(default)]
    pub satisfaction_percentage: Option<f64>,
    #[serde(default)]
    pub google_place_id: Option<String>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub performed_inspections: i64,
    pub years_experience_start: i32,
    pub satisfaction_percentage: f64,
    pub google_place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            performed_inspections: DEFAULT_PERFORMED_INSPECTIONS,
            years_experience_start: DEFAULT_YEARS_EXPERIENCE_START,
            satisfaction_percentage: DEFAULT_SATISFACTION_PERCENTAGE,
            google_place_id: None,
            updated_at: None,
        }
    }
}

impl From<StatisticsRow> for Statistics {
    fn from(row: StatisticsRow) -> Self {
        let defaults = Statistics::default();
        Self {
            performed_inspections: row
                .performed_inspections
                .unwrap_or(defaults.performed_inspections),
            years_experience_start: row
                .years_experience_start
                .unwrap_or(defaults.years_experience_start),
            satisfaction_percentage: row
                .satisfaction_percentage
                .unwrap_or(defaults.satisfaction_percentage),
            google_place_id: row.google_place_id,
            updated_at: row.updated_at,
        }
    }
}

impl Statistics {
    /// Whole years since `years_experience_start`, never negative.
    pub fn years_experience(&self, current_year: i32) -> i32 {
        (current_year - self.years_experience_start).max(0)
    }

    /// Apply a partial update. Absent fields keep their current value; an
    /// explicit `googlePlaceId: null` clears the place id.
    pub fn merged(&self, input: &StatisticsInput) -> Statistics {
        Statistics {
            performed_inspections: input
                .performed_inspections
                .unwrap_or(self.performed_inspections),
            years_experience_start: input
                .years_experience_start
                .unwrap_or(self.years_experience_start),
            satisfaction_percentage: input
                .satisfaction_percentage
                .unwrap_or(self.satisfaction_percentage),
            google_place_id: match &input.google_place_id {
                Some(place_id) => place_id.clone(),
                None => self.google_place_id.clone(),
            },
            updated_at: self.updated_at,
        }
    }
}

/// `GET /api/statistics` payload: stored values plus the derived
/// `yearsExperience`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsView {
    pub performed_inspections: i64,
    pub years_experience: i32,
    pub satisfaction_percentage: f64,
    pub years_experience_start: i32,
    pub google_place_id: Option<String>,
}

impl StatisticsView {
    pub fn new(stats: &Statistics, current_year: i32) -> Self {
        Self {
            performed_inspections: stats.performed_inspections,
            years_experience: stats.years_experience(current_year),
            satisfaction_percentage: stats.satisfaction_percentage,
            years_experience_start: stats.years_experience_start,
            google_place_id: stats.google_place_id.clone(),
        }
    }
}

/// DTO for `PUT /api/statistics`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsInput {
    #[serde(default, deserialize_with = "fields::optional_integer")]
    pub performed_inspections: Option<i64>,
    #[serde(default, deserialize_with = "fields::optional_integer")]
    pub years_experience_start: Option<i32>,
    pub satisfaction_percentage: Option<f64>,
    #[serde(default, deserialize_with = "fields::nullable")]
    pub google_place_id: Option<Option<String>>,
}
