//! Asset models: charts, insights and audience segments.
//!
//! Assets are immutable reference data, seeded at startup and never mutated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of asset kinds a favourite can point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Chart,
    Insight,
    Audience,
}

/// A single named point in a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// A chart with titled axes and an ordered series of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub id: Uuid,
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub data: Vec<ChartPoint>,
}

/// A free-text insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: Uuid,
    pub text: String,
}

/// An audience segment described by demographic attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audience {
    pub id: Uuid,
    pub gender: String,
    pub birth_country: String,
    pub age_group: String,
    pub social_media_hours: f64,
    pub purchases_last_month: i64,
}
