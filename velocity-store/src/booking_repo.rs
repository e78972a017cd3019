use async_trait::async_trait;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use velocity_core::repository::{BookingRepository, RepoResult};
use velocity_shared::{Booking, Masked};

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const BOOKING_COLUMNS: &str = "id, hotel_id, room_id, guest_name, guest_email, check_in_date, check_out_date, room_type, channel, rate, status, created_at";

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    hotel_id: Uuid,
    room_id: Uuid,
    guest_name: String,
    guest_email: String,
    check_in_date: DateTime<Utc>,
    check_out_date: DateTime<Utc>,
    room_type: String,
    channel: String,
    rate: f64,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = velocity_shared::ParseEnumError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            hotel_id: row.hotel_id,
            room_id: row.room_id,
            guest_name: row.guest_name,
            guest_email: Masked(row.guest_email),
            check_in_date: row.check_in_date,
            check_out_date: row.check_out_date,
            room_type: row.room_type.parse()?,
            channel: row.channel.parse()?,
            rate: row.rate,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

fn into_bookings(rows: Vec<BookingRow>) -> RepoResult<Vec<Booking>> {
    let bookings = rows
        .into_iter()
        .map(Booking::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(bookings)
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create_booking(&self, booking: &Booking) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, hotel_id, room_id, guest_name, guest_email, check_in_date, check_out_date, room_type, channel, rate, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(booking.id)
        .bind(booking.hotel_id)
        .bind(booking.room_id)
        .bind(&booking.guest_name)
        .bind(booking.guest_email.expose())
        .bind(booking.check_in_date)
        .bind(booking.check_out_date)
        .bind(booking.room_type.as_str())
        .bind(booking.channel.as_str())
        .bind(booking.rate)
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn bookings_since(
        &self,
        hotel_id: Uuid,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<Booking>> {
        let sql = format!(
            "SELECT {} FROM bookings WHERE hotel_id = $1 AND check_in_date >= $2 ORDER BY check_in_date",
            BOOKING_COLUMNS
        );
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(hotel_id)
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        into_bookings(rows)
    }

    async fn bookings_until(
        &self,
        hotel_id: Option<Uuid>,
        until: DateTime<Utc>,
    ) -> RepoResult<Vec<Booking>> {
        let filter = if hotel_id.is_some() {
            "hotel_id = $2 AND check_in_date <= $1"
        } else {
            "check_in_date <= $1"
        };
        let sql = format!(
            "SELECT {} FROM bookings WHERE {} ORDER BY check_in_date",
            BOOKING_COLUMNS, filter
        );

        let mut query = sqlx::query_as::<_, BookingRow>(&sql).bind(until);
        if let Some(hotel_id) = hotel_id {
            query = query.bind(hotel_id);
        }
        let rows = query.fetch_all(&self.pool).await?;

        into_bookings(rows)
    }
}
