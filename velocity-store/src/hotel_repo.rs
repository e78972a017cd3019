use async_trait::async_trait;
use uuid::Uuid;
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::BTreeMap;
use tracing::info;
use velocity_core::repository::{HotelRepository, RepoResult};
use velocity_shared::{Hotel, Room, RoomType};

pub struct PgHotelRepository {
    pool: PgPool,
}

impl PgHotelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct HotelRow {
    id: Uuid,
    name: String,
    location: String,
    total_rooms: i32,
    room_types: Json<BTreeMap<RoomType, i32>>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Hotel {
            id: row.id,
            name: row.name,
            location: row.location,
            total_rooms: row.total_rooms,
            room_types: row.room_types.0,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    hotel_id: Uuid,
    room_number: String,
    room_type: String,
    base_rate: f64,
    is_available: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<RoomRow> for Room {
    type Error = velocity_shared::ParseEnumError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Room {
            id: row.id,
            hotel_id: row.hotel_id,
            room_number: row.room_number,
            room_type: row.room_type.parse()?,
            base_rate: row.base_rate,
            is_available: row.is_available,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl HotelRepository for PgHotelRepository {
    async fn create_hotel(&self, hotel: &Hotel, rooms: &[Room]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO hotels (id, name, location, total_rooms, room_types, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(hotel.id)
        .bind(&hotel.name)
        .bind(&hotel.location)
        .bind(hotel.total_rooms)
        .bind(Json(hotel.room_types.clone()))
        .bind(hotel.created_at)
        .execute(&mut *tx)
        .await?;

        for room in rooms {
            sqlx::query(
                r#"
                INSERT INTO rooms (id, hotel_id, room_number, room_type, base_rate, is_available, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(room.id)
            .bind(room.hotel_id)
            .bind(&room.room_number)
            .bind(room.room_type.as_str())
            .bind(room.base_rate)
            .bind(room.is_available)
            .bind(room.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!("Hotel {} stored with {} rooms", hotel.id, rooms.len());
        Ok(())
    }

    async fn get_hotel(&self, id: Uuid) -> RepoResult<Option<Hotel>> {
        let row = sqlx::query_as::<_, HotelRow>(
            "SELECT id, name, location, total_rooms, room_types, created_at FROM hotels WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Hotel::from))
    }

    async fn list_hotels(&self) -> RepoResult<Vec<Hotel>> {
        let rows = sqlx::query_as::<_, HotelRow>(
            "SELECT id, name, location, total_rooms, room_types, created_at FROM hotels ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Hotel::from).collect())
    }

    async fn list_rooms(&self, hotel_id: Uuid) -> RepoResult<Vec<Room>> {
        let rows = sqlx::query_as::<_, RoomRow>(
            "SELECT id, hotel_id, room_number, room_type, base_rate, is_available, created_at FROM rooms WHERE hotel_id = $1 ORDER BY seq",
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await?;

        let rooms = rows
            .into_iter()
            .map(Room::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rooms)
    }
}
