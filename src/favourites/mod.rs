//! Favourite aggregation service.
//!
//! Orchestrates the favourite store and the three asset registries: pages
//! through a user's favourites, fans out one concurrent batch lookup per
//! registry, joins the resolved assets back to their favourites and builds
//! the grouped response. Also owns the write paths with their ownership
//! checks.

use std::sync::Arc;

use uuid::Uuid;

use crate::db::{AudienceRegistry, ChartRegistry, Database, FavouriteRepository, InsightRegistry};
use crate::errors::AppError;
use crate::models::{
    AssetFavourites, AssetType, AudienceFavourite, ChartFavourite, Favourite, InsightFavourite,
};
use crate::pagination::Pagination;

/// Service backing the favourites endpoints.
#[derive(Clone)]
pub struct FavouriteService {
    favourites: FavouriteRepository,
    charts: ChartRegistry,
    insights: InsightRegistry,
    audiences: AudienceRegistry,
}

impl FavouriteService {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            favourites: FavouriteRepository::new(db.clone()),
            charts: ChartRegistry::new(db.clone()),
            insights: InsightRegistry::new(db.clone()),
            audiences: AudienceRegistry::new(db),
        }
    }

    /// Fetch one page of a user's favourites with every entry resolved to
    /// its concrete asset, grouped by asset type.
    ///
    /// The three registry lookups run concurrently and all must succeed; on
    /// any failure the whole call fails and partial results are discarded.
    /// The pagination metadata is the store's, computed before resolution.
    pub async fn get_paginated_for_user(
        &self,
        user_id: Uuid,
        page_size: usize,
        page_number: usize,
    ) -> Result<(AssetFavourites, Pagination), AppError> {
        let (favourites, pagination) = self
            .favourites
            .get_by_user_paginated(user_id, page_size, page_number)
            .await?;

        let chart_ids = asset_ids_of(AssetType::Chart, &favourites);
        let insight_ids = asset_ids_of(AssetType::Insight, &favourites);
        let audience_ids = asset_ids_of(AssetType::Audience, &favourites);

        // Each branch writes its own result slot; errors are checked after
        // the barrier, chart branch first.
        let (charts, insights, audiences) = tokio::join!(
            self.charts.get_by_ids(&chart_ids),
            self.insights.get_by_ids(&insight_ids),
            self.audiences.get_by_ids(&audience_ids),
        );
        let (charts, insights, audiences) = (charts?, insights?, audiences?);

        let grouped = assemble(&favourites, charts, insights, audiences)?;

        Ok((grouped, pagination))
    }

    /// Classify an unknown asset id by probing all three registries
    /// concurrently.
    ///
    /// If more than one registry claims the id, chart wins, then insight,
    /// then audience. A registry failure counts as a miss in that registry;
    /// that trades error visibility for resilience of the create path.
    async fn detect_asset_type(&self, asset_id: Uuid) -> Result<AssetType, AppError> {
        let (chart, insight, audience) = tokio::join!(
            self.charts.get_by_id(asset_id),
            self.insights.get_by_id(asset_id),
            self.audiences.get_by_id(asset_id),
        );

        let chart = chart.unwrap_or_else(|err| {
            tracing::warn!("Chart registry probe failed, treating as miss: {}", err);
            None
        });
        let insight = insight.unwrap_or_else(|err| {
            tracing::warn!("Insight registry probe failed, treating as miss: {}", err);
            None
        });
        let audience = audience.unwrap_or_else(|err| {
            tracing::warn!("Audience registry probe failed, treating as miss: {}", err);
            None
        });

        if chart.is_some() {
            Ok(AssetType::Chart)
        } else if insight.is_some() {
            Ok(AssetType::Insight)
        } else if audience.is_some() {
            Ok(AssetType::Audience)
        } else {
            Err(AppError::AssetNotFound)
        }
    }

    /// Create a favourite for the user, resolving the asset's type first.
    pub async fn create_for_user(
        &self,
        user_id: Uuid,
        asset_id: Uuid,
        description: String,
    ) -> Result<Favourite, AppError> {
        let asset_type = self.detect_asset_type(asset_id).await?;

        let favourite = Favourite {
            id: Uuid::new_v4(),
            user_id,
            asset_id,
            asset_type,
            description,
        };

        self.favourites.create(favourite).await.map_err(|err| {
            tracing::error!("Failed to persist favourite: {}", err);
            AppError::CouldNotSaveFavourite
        })
    }

    /// Update a favourite's description.
    ///
    /// An empty new description keeps the current value; this path cannot
    /// clear a description.
    pub async fn update(
        &self,
        user_id: Uuid,
        favourite_id: Uuid,
        new_description: String,
    ) -> Result<Favourite, AppError> {
        let mut favourite = self.fetch_owned(user_id, favourite_id).await?;

        if !new_description.is_empty() {
            favourite.description = new_description;
        }

        self.favourites.update(favourite).await.map_err(|err| {
            tracing::error!("Failed to persist favourite update: {}", err);
            AppError::Unexpected
        })
    }

    /// Delete a favourite after the same ownership check as update.
    pub async fn delete(&self, user_id: Uuid, favourite_id: Uuid) -> Result<(), AppError> {
        let favourite = self.fetch_owned(user_id, favourite_id).await?;

        self.favourites.delete(favourite.id).await
    }

    /// Fetch a favourite and enforce that it belongs to the given user —
    /// the access-control boundary for this subsystem.
    async fn fetch_owned(&self, user_id: Uuid, favourite_id: Uuid) -> Result<Favourite, AppError> {
        let favourite = match self.favourites.get_by_id(favourite_id).await {
            Ok(Some(favourite)) => favourite,
            Ok(None) => return Err(AppError::FavouriteNotFound),
            Err(err) => {
                tracing::error!("Favourite lookup failed: {}", err);
                return Err(AppError::Unexpected);
            }
        };

        if favourite.user_id != user_id {
            return Err(AppError::FavouriteNotOwned);
        }

        Ok(favourite)
    }
}

/// Collect the asset ids of a page's favourites of one type.
fn asset_ids_of(asset_type: AssetType, favourites: &[Favourite]) -> Vec<Uuid> {
    favourites
        .iter()
        .filter(|favourite| favourite.asset_type == asset_type)
        .map(|favourite| favourite.asset_id)
        .collect()
}

/// Join resolved assets back to their favourites, preserving each registry's
/// return order within its group.
///
/// Every asset a registry returned must trace back to a favourite on the
/// page; a miss means the partitioning invariant broke and the whole call
/// fails rather than silently dropping the asset. The scan is linear — pages
/// hold at most 100 favourites.
fn assemble(
    favourites: &[Favourite],
    charts: Vec<crate::models::Chart>,
    insights: Vec<crate::models::Insight>,
    audiences: Vec<crate::models::Audience>,
) -> Result<AssetFavourites, AppError> {
    let mut grouped = AssetFavourites::default();

    for chart in charts {
        let favourite = favourite_for_asset(favourites, chart.id)?;
        grouped.charts.push(ChartFavourite {
            id: favourite.id,
            description: favourite.description.clone(),
            info: chart,
        });
    }

    for insight in insights {
        let favourite = favourite_for_asset(favourites, insight.id)?;
        grouped.insights.push(InsightFavourite {
            id: favourite.id,
            description: favourite.description.clone(),
            info: insight,
        });
    }

    for audience in audiences {
        let favourite = favourite_for_asset(favourites, audience.id)?;
        grouped.audiences.push(AudienceFavourite {
            id: favourite.id,
            description: favourite.description.clone(),
            info: audience,
        });
    }

    Ok(grouped)
}

fn favourite_for_asset(favourites: &[Favourite], asset_id: Uuid) -> Result<&Favourite, AppError> {
    favourites
        .iter()
        .find(|favourite| favourite.asset_id == asset_id)
        .ok_or_else(|| {
            tracing::error!("No favourite on this page references asset {}", asset_id);
            AppError::FavouriteMissingForAsset
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed;
    use crate::models::{Chart, Insight};

    async fn seeded_service() -> (FavouriteService, Arc<Database>) {
        let db = Arc::new(Database::new());
        db.seed_dev(|p| p.to_string()).await;
        (FavouriteService::new(db.clone()), db)
    }

    #[tokio::test]
    async fn test_read_path_groups_by_asset_type() {
        let (service, _db) = seeded_service().await;

        let (grouped, pagination) = service
            .get_paginated_for_user(seed::USER_ID, 10, 0)
            .await
            .unwrap();

        assert_eq!(grouped.charts.len(), 1);
        assert_eq!(grouped.insights.len(), 1);
        assert_eq!(grouped.audiences.len(), 1);

        let chart_entry = &grouped.charts[0];
        assert_eq!(chart_entry.id, seed::FAVOURITE_CHART_ID);
        assert_eq!(chart_entry.description, "Main performance chart");
        assert_eq!(chart_entry.info.id, seed::CHART_ID);
        assert_eq!(chart_entry.info.data.len(), 3);

        assert_eq!(
            pagination,
            Pagination {
                page: 0,
                page_size: 10,
                max_page: 0
            }
        );
    }

    #[tokio::test]
    async fn test_read_path_never_shows_other_users_favourites() {
        let (service, _db) = seeded_service().await;
        let other_user = Uuid::new_v4();

        // Second insight favourited by a different user
        service
            .create_for_user(other_user, seed::INSIGHT_ID_2, "not yours".to_string())
            .await
            .unwrap();

        let (grouped, _) = service
            .get_paginated_for_user(seed::USER_ID, 10, 0)
            .await
            .unwrap();
        assert_eq!(grouped.insights.len(), 1);
        assert_eq!(grouped.insights[0].info.id, seed::INSIGHT_ID);

        let (grouped, _) = service
            .get_paginated_for_user(other_user, 10, 0)
            .await
            .unwrap();
        assert!(grouped.charts.is_empty());
        assert_eq!(grouped.insights.len(), 1);
        assert_eq!(grouped.insights[0].info.id, seed::INSIGHT_ID_2);
        assert!(grouped.audiences.is_empty());
    }

    #[tokio::test]
    async fn test_read_path_empty_page_past_the_end() {
        let (service, _db) = seeded_service().await;

        let (grouped, pagination) = service
            .get_paginated_for_user(seed::USER_ID, 10, 3)
            .await
            .unwrap();

        assert_eq!(grouped, AssetFavourites::default());
        assert_eq!(pagination.max_page, 0);
    }

    #[tokio::test]
    async fn test_create_resolves_asset_type_per_owning_registry() {
        let (service, _db) = seeded_service().await;
        let user = Uuid::new_v4();

        let favourite = service
            .create_for_user(user, seed::AUDIENCE_ID, "segment".to_string())
            .await
            .unwrap();
        assert_eq!(favourite.asset_type, AssetType::Audience);
        assert_eq!(favourite.user_id, user);

        // Round trip: the new favourite shows up under the right group
        let (grouped, _) = service.get_paginated_for_user(user, 10, 0).await.unwrap();
        assert_eq!(grouped.audiences.len(), 1);
        assert_eq!(grouped.audiences[0].id, favourite.id);
        assert_eq!(grouped.audiences[0].description, "segment");
    }

    #[tokio::test]
    async fn test_create_unknown_asset_fails_with_asset_not_found() {
        let (service, _db) = seeded_service().await;

        let result = service
            .create_for_user(Uuid::new_v4(), Uuid::new_v4(), "nope".to_string())
            .await;

        assert_eq!(result, Err(AppError::AssetNotFound));
    }

    #[tokio::test]
    async fn test_detect_prefers_chart_when_two_registries_claim_an_id() {
        let (service, db) = seeded_service().await;

        // Should not happen under correct data, but the priority is fixed
        let shared_id = Uuid::new_v4();
        db.charts.write().await.insert(
            shared_id,
            Chart {
                id: shared_id,
                title: "claimed twice".to_string(),
                x_axis_title: "x".to_string(),
                y_axis_title: "y".to_string(),
                data: vec![],
            },
        );
        db.insights.write().await.insert(
            shared_id,
            Insight {
                id: shared_id,
                text: "claimed twice".to_string(),
            },
        );

        let favourite = service
            .create_for_user(Uuid::new_v4(), shared_id, String::new())
            .await
            .unwrap();
        assert_eq!(favourite.asset_type, AssetType::Chart);
    }

    #[tokio::test]
    async fn test_update_sets_non_empty_description() {
        let (service, _db) = seeded_service().await;

        let updated = service
            .update(seed::USER_ID, seed::FAVOURITE_CHART_ID, "X".to_string())
            .await
            .unwrap();
        assert_eq!(updated.description, "X");

        let (grouped, _) = service
            .get_paginated_for_user(seed::USER_ID, 10, 0)
            .await
            .unwrap();
        assert_eq!(grouped.charts[0].description, "X");
    }

    #[tokio::test]
    async fn test_update_with_empty_description_keeps_current_value() {
        let (service, _db) = seeded_service().await;

        let updated = service
            .update(seed::USER_ID, seed::FAVOURITE_CHART_ID, String::new())
            .await
            .unwrap();
        assert_eq!(updated.description, "Main performance chart");
    }

    #[tokio::test]
    async fn test_update_enforces_ownership() {
        let (service, _db) = seeded_service().await;

        let result = service
            .update(Uuid::new_v4(), seed::FAVOURITE_CHART_ID, "X".to_string())
            .await;
        assert_eq!(result, Err(AppError::FavouriteNotOwned));
    }

    #[tokio::test]
    async fn test_update_unknown_favourite() {
        let (service, _db) = seeded_service().await;

        let result = service
            .update(seed::USER_ID, Uuid::new_v4(), "X".to_string())
            .await;
        assert_eq!(result, Err(AppError::FavouriteNotFound));
    }

    #[tokio::test]
    async fn test_delete_then_delete_again() {
        let (service, _db) = seeded_service().await;

        service
            .delete(seed::USER_ID, seed::FAVOURITE_INSIGHT_ID)
            .await
            .unwrap();

        let result = service
            .delete(seed::USER_ID, seed::FAVOURITE_INSIGHT_ID)
            .await;
        assert_eq!(result, Err(AppError::FavouriteNotFound));

        let (grouped, _) = service
            .get_paginated_for_user(seed::USER_ID, 10, 0)
            .await
            .unwrap();
        assert!(grouped.insights.is_empty());
    }

    #[tokio::test]
    async fn test_delete_enforces_ownership() {
        let (service, _db) = seeded_service().await;

        let result = service
            .delete(Uuid::new_v4(), seed::FAVOURITE_CHART_ID)
            .await;
        assert_eq!(result, Err(AppError::FavouriteNotOwned));

        // Still there for the owner
        assert!(service
            .delete(seed::USER_ID, seed::FAVOURITE_CHART_ID)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_assemble_fails_loud_on_unmatched_asset() {
        let favourites = vec![];
        let charts = vec![Chart {
            id: Uuid::new_v4(),
            title: "orphan".to_string(),
            x_axis_title: "x".to_string(),
            y_axis_title: "y".to_string(),
            data: vec![],
        }];

        let result = assemble(&favourites, charts, vec![], vec![]);
        assert_eq!(result, Err(AppError::FavouriteMissingForAsset));
    }

    #[tokio::test]
    async fn test_pagination_metadata_reflects_favourite_count_not_assets() {
        let (service, _db) = seeded_service().await;

        // pageSize 2 over 3 favourites: page 0 holds two, page 1 holds one
        let (page0, pagination) = service
            .get_paginated_for_user(seed::USER_ID, 2, 0)
            .await
            .unwrap();
        let count0 = page0.charts.len() + page0.insights.len() + page0.audiences.len();
        assert_eq!(count0, 2);
        assert_eq!(pagination.max_page, 1);

        let (page1, pagination) = service
            .get_paginated_for_user(seed::USER_ID, 2, 1)
            .await
            .unwrap();
        let count1 = page1.charts.len() + page1.insights.len() + page1.audiences.len();
        assert_eq!(count1, 1);
        assert_eq!(pagination.max_page, 1);
    }
}
