//! In-memory storage for the favourites backend.
//!
//! All data lives in id-keyed maps behind async read/write locks; the store
//! is volatile and resettable. The repository layer is the seam where a real
//! database would be substituted — everything above it depends only on the
//! repository methods.

mod repository;

pub use repository::*;

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{AssetType, Audience, Chart, ChartPoint, Favourite, Insight, User};

/// Deterministic ids and credentials for the dev/test dataset.
pub mod seed {
    use uuid::{uuid, Uuid};

    pub const USER_ID: Uuid = uuid!("a3973a1c-a77b-4a04-a296-ddec19034419");
    pub const USER_EMAIL: &str = "test@test.com";
    pub const USER_PASSWORD: &str = "pass";

    pub const CHART_ID: Uuid = uuid!("11111111-1111-1111-1111-111111111111");
    pub const INSIGHT_ID: Uuid = uuid!("22222222-2222-2222-2222-222222222222");
    pub const INSIGHT_ID_2: Uuid = uuid!("22222222-2222-2222-2222-222222222223");
    pub const AUDIENCE_ID: Uuid = uuid!("33333333-3333-3333-3333-333333333333");

    pub const FAVOURITE_CHART_ID: Uuid = uuid!("44444444-4444-4444-4444-444444444444");
    pub const FAVOURITE_INSIGHT_ID: Uuid = uuid!("55555555-5555-5555-5555-555555555555");
    pub const FAVOURITE_AUDIENCE_ID: Uuid = uuid!("66666666-6666-6666-6666-666666666666");
}

/// Shared in-memory database. Reads may run concurrently (pagination plus
/// registry fan-out); writes take the coarse per-storage write lock.
#[derive(Debug, Default)]
pub struct Database {
    pub users: RwLock<HashMap<Uuid, User>>,
    pub charts: RwLock<HashMap<Uuid, Chart>>,
    pub insights: RwLock<HashMap<Uuid, Insight>>,
    pub audiences: RwLock<HashMap<Uuid, Audience>>,
    pub favourites: RwLock<HashMap<Uuid, Favourite>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the deterministic dev dataset: one user, one chart, two insights,
    /// one audience segment and three favourites pre-linking the user to one
    /// asset of each kind.
    pub async fn seed_dev(&self, hash_password: impl Fn(&str) -> String) {
        let user = User {
            id: seed::USER_ID,
            email: seed::USER_EMAIL.to_string(),
            password_hash: hash_password(seed::USER_PASSWORD),
        };
        self.users.write().await.insert(user.id, user);

        let chart = Chart {
            id: seed::CHART_ID,
            title: "test chart".to_string(),
            x_axis_title: "commit number".to_string(),
            y_axis_title: "lines of code".to_string(),
            data: vec![
                ChartPoint { x: 1.0, y: 100.0 },
                ChartPoint { x: 2.0, y: 300.0 },
                ChartPoint { x: 3.0, y: 500.0 },
            ],
        };
        self.charts.write().await.insert(chart.id, chart);

        let mut insights = self.insights.write().await;
        insights.insert(
            seed::INSIGHT_ID,
            Insight {
                id: seed::INSIGHT_ID,
                text: "40% of millennials spend more than 3 hours on social media daily"
                    .to_string(),
            },
        );
        insights.insert(
            seed::INSIGHT_ID_2,
            Insight {
                id: seed::INSIGHT_ID_2,
                text: "100% of zoomers spend more than 8 hours on watching memes".to_string(),
            },
        );
        drop(insights);

        let audience = Audience {
            id: seed::AUDIENCE_ID,
            gender: "Male".to_string(),
            birth_country: "United Kingdom".to_string(),
            age_group: "25-34".to_string(),
            social_media_hours: 3.5,
            purchases_last_month: 7,
        };
        self.audiences.write().await.insert(audience.id, audience);

        let mut favourites = self.favourites.write().await;
        for favourite in [
            Favourite {
                id: seed::FAVOURITE_CHART_ID,
                user_id: seed::USER_ID,
                asset_id: seed::CHART_ID,
                asset_type: AssetType::Chart,
                description: "Main performance chart".to_string(),
            },
            Favourite {
                id: seed::FAVOURITE_INSIGHT_ID,
                user_id: seed::USER_ID,
                asset_id: seed::INSIGHT_ID,
                asset_type: AssetType::Insight,
                description: "Great for Q2 presentation".to_string(),
            },
            Favourite {
                id: seed::FAVOURITE_AUDIENCE_ID,
                user_id: seed::USER_ID,
                asset_id: seed::AUDIENCE_ID,
                asset_type: AssetType::Audience,
                description: "Target audience for campaign".to_string(),
            },
        ] {
            favourites.insert(favourite.id, favourite);
        }
    }
}
