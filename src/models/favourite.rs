//! Favourite model and the denormalized response projection.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AssetType, Audience, Chart, Insight};

/// A user-owned bookmark pointing at exactly one asset.
///
/// `asset_type` matches the actual type of the asset behind `asset_id` at
/// creation time; the store itself is not user-scoped, so ownership is
/// enforced at the service layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favourite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub description: String,
}

/// A favourite joined with its resolved chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFavourite {
    pub id: Uuid,
    pub description: String,
    pub info: Chart,
}

/// A favourite joined with its resolved insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightFavourite {
    pub id: Uuid,
    pub description: String,
    pub info: Insight,
}

/// A favourite joined with its resolved audience segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceFavourite {
    pub id: Uuid,
    pub description: String,
    pub info: Audience,
}

/// One page of a user's favourites, grouped by asset type.
///
/// Built fresh per request; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFavourites {
    pub charts: Vec<ChartFavourite>,
    pub insights: Vec<InsightFavourite>,
    pub audiences: Vec<AudienceFavourite>,
}

/// Request body for creating a new favourite.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavouriteRequest {
    pub asset_id: Uuid,
    #[serde(default)]
    pub description: String,
}

/// Request body for updating a favourite's description.
///
/// An empty description keeps the current value; this path cannot be used to
/// clear a description.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFavouriteRequest {
    #[serde(default)]
    pub description: String,
}
