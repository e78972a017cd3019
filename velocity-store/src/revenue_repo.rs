use async_trait::async_trait;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use velocity_core::repository::{
    AllocationRepository, ForecastRepository, RecommendationRepository, RepoResult,
};
use velocity_core::DateWindow;
use velocity_shared::{DemandForecast, InventoryAllocation, ParseEnumError, RateRecommendation};

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct ForecastRow {
    id: Uuid,
    hotel_id: Uuid,
    date: DateTime<Utc>,
    room_type: String,
    predicted_demand: f64,
    predicted_adr: f64,
    confidence_score: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<ForecastRow> for DemandForecast {
    type Error = ParseEnumError;

    fn try_from(row: ForecastRow) -> Result<Self, Self::Error> {
        Ok(DemandForecast {
            id: row.id,
            hotel_id: row.hotel_id,
            date: row.date,
            room_type: row.room_type.parse()?,
            predicted_demand: row.predicted_demand,
            predicted_adr: row.predicted_adr,
            confidence_score: row.confidence_score,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AllocationRow {
    id: Uuid,
    hotel_id: Uuid,
    room_type: String,
    date: DateTime<Utc>,
    channel: String,
    allocated_rooms: i32,
    rate: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<AllocationRow> for InventoryAllocation {
    type Error = ParseEnumError;

    fn try_from(row: AllocationRow) -> Result<Self, Self::Error> {
        Ok(InventoryAllocation {
            id: row.id,
            hotel_id: row.hotel_id,
            room_type: row.room_type.parse()?,
            date: row.date,
            channel: row.channel.parse()?,
            allocated_rooms: row.allocated_rooms,
            rate: row.rate,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RecommendationRow {
    id: Uuid,
    hotel_id: Uuid,
    room_type: String,
    date: DateTime<Utc>,
    current_rate: f64,
    recommended_rate: f64,
    expected_revenue_lift: f64,
    reason: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<RecommendationRow> for RateRecommendation {
    type Error = ParseEnumError;

    fn try_from(row: RecommendationRow) -> Result<Self, Self::Error> {
        Ok(RateRecommendation {
            id: row.id,
            hotel_id: row.hotel_id,
            room_type: row.room_type.parse()?,
            date: row.date,
            current_rate: row.current_rate,
            recommended_rate: row.recommended_rate,
            expected_revenue_lift: row.expected_revenue_lift,
            reason: row.reason,
            created_at: row.created_at,
        })
    }
}

pub struct PgForecastRepository {
    pool: PgPool,
}

impl PgForecastRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForecastRepository for PgForecastRepository {
    async fn insert_forecasts(&self, forecasts: &[DemandForecast]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        for forecast in forecasts {
            sqlx::query(
                r#"
                INSERT INTO demand_forecasts (id, hotel_id, date, room_type, predicted_demand, predicted_adr, confidence_score, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(forecast.id)
            .bind(forecast.hotel_id)
            .bind(forecast.date)
            .bind(forecast.room_type.as_str())
            .bind(forecast.predicted_demand)
            .bind(forecast.predicted_adr)
            .bind(forecast.confidence_score)
            .bind(forecast.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!("Inserted {} demand forecasts", forecasts.len());
        Ok(())
    }

    async fn forecasts_in_window(
        &self,
        hotel_id: Uuid,
        window: DateWindow,
    ) -> RepoResult<Vec<DemandForecast>> {
        let rows = sqlx::query_as::<_, ForecastRow>(
            r#"
            SELECT id, hotel_id, date, room_type, predicted_demand, predicted_adr, confidence_score, created_at
            FROM demand_forecasts
            WHERE hotel_id = $1 AND date >= $2 AND date <= $3
            ORDER BY seq
            "#,
        )
        .bind(hotel_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        let forecasts = rows
            .into_iter()
            .map(DemandForecast::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(forecasts)
    }
}

pub struct PgAllocationRepository {
    pool: PgPool,
}

impl PgAllocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AllocationRepository for PgAllocationRepository {
    async fn insert_allocations(&self, allocations: &[InventoryAllocation]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        for allocation in allocations {
            sqlx::query(
                r#"
                INSERT INTO inventory_allocations (id, hotel_id, room_type, date, channel, allocated_rooms, rate, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(allocation.id)
            .bind(allocation.hotel_id)
            .bind(allocation.room_type.as_str())
            .bind(allocation.date)
            .bind(allocation.channel.as_str())
            .bind(allocation.allocated_rooms)
            .bind(allocation.rate)
            .bind(allocation.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!("Inserted {} inventory allocations", allocations.len());
        Ok(())
    }

    async fn allocations_in_window(
        &self,
        hotel_id: Uuid,
        window: DateWindow,
    ) -> RepoResult<Vec<InventoryAllocation>> {
        let rows = sqlx::query_as::<_, AllocationRow>(
            r#"
            SELECT id, hotel_id, room_type, date, channel, allocated_rooms, rate, created_at
            FROM inventory_allocations
            WHERE hotel_id = $1 AND date >= $2 AND date <= $3
            ORDER BY seq
            "#,
        )
        .bind(hotel_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        let allocations = rows
            .into_iter()
            .map(InventoryAllocation::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(allocations)
    }
}

pub struct PgRecommendationRepository {
    pool: PgPool,
}

impl PgRecommendationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationRepository for PgRecommendationRepository {
    async fn insert_recommendations(&self, recommendations: &[RateRecommendation]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        for recommendation in recommendations {
            sqlx::query(
                r#"
                INSERT INTO rate_recommendations (id, hotel_id, room_type, date, current_rate, recommended_rate, expected_revenue_lift, reason, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(recommendation.id)
            .bind(recommendation.hotel_id)
            .bind(recommendation.room_type.as_str())
            .bind(recommendation.date)
            .bind(recommendation.current_rate)
            .bind(recommendation.recommended_rate)
            .bind(recommendation.expected_revenue_lift)
            .bind(&recommendation.reason)
            .bind(recommendation.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!("Inserted {} rate recommendations", recommendations.len());
        Ok(())
    }

    async fn recommendations_in_window(
        &self,
        hotel_id: Uuid,
        window: DateWindow,
    ) -> RepoResult<Vec<RateRecommendation>> {
        let rows = sqlx::query_as::<_, RecommendationRow>(
            r#"
            SELECT id, hotel_id, room_type, date, current_rate, recommended_rate, expected_revenue_lift, reason, created_at
            FROM rate_recommendations
            WHERE hotel_id = $1 AND date >= $2 AND date <= $3
            ORDER BY seq
            "#,
        )
        .bind(hotel_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        let recommendations = rows
            .into_iter()
            .map(RateRecommendation::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(recommendations)
    }
}
