use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use velocity_core::{RevenueError, RevenueResult};
use velocity_shared::{Booking, RoomType};
use velocity_store::app_config::ForecastingConfig;

/// Bookings and mean charged rate for one room type on one check-in day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDemandPoint {
    pub date: NaiveDate,
    pub room_type: RoomType,
    pub demand: u32,
    pub avg_rate: f64,
}

/// Daily series per room type, each ordered by date
pub type DemandSeries = BTreeMap<RoomType, Vec<DailyDemandPoint>>;

/// Collapses raw booking history into per-day, per-room-type demand points
pub struct HistoryAggregator {
    lookback_days: i64,
    min_history_bookings: usize,
}

impl HistoryAggregator {
    pub fn new(config: &ForecastingConfig) -> Self {
        Self {
            lookback_days: config.lookback_days,
            min_history_bookings: config.min_history_bookings,
        }
    }

    /// Earliest check-in date that still counts as history for a run at `now`
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.lookback_days)
    }

    /// Group bookings by (UTC check-in day, room type).
    ///
    /// Fails before any grouping when the history holds fewer bookings than
    /// the configured minimum.
    pub fn aggregate(&self, bookings: &[Booking]) -> RevenueResult<DemandSeries> {
        if bookings.len() < self.min_history_bookings {
            return Err(RevenueError::InsufficientData {
                found: bookings.len(),
                required: self.min_history_bookings,
            });
        }

        let mut groups: BTreeMap<(NaiveDate, RoomType), (u32, f64)> = BTreeMap::new();
        for booking in bookings {
            let entry = groups
                .entry((booking.check_in_date.date_naive(), booking.room_type))
                .or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += booking.rate;
        }

        let mut series = DemandSeries::new();
        for ((date, room_type), (count, rate_sum)) in groups {
            series.entry(room_type).or_default().push(DailyDemandPoint {
                date,
                room_type,
                demand: count,
                avg_rate: rate_sum / count as f64,
            });
        }

        debug!(
            "Aggregated {} bookings into {} room type series",
            bookings.len(),
            series.len()
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;
    use velocity_shared::{BookingChannel, NewBooking};

    fn booking(day: u32, room_type: RoomType, rate: f64) -> Booking {
        let check_in = Utc.with_ymd_and_hms(2024, 5, day, 15, 0, 0).unwrap();
        Booking::new(NewBooking {
            hotel_id: Uuid::nil(),
            room_id: Uuid::new_v4(),
            guest_name: "Guest".to_string(),
            guest_email: "guest@example.com".to_string().into(),
            check_in_date: check_in,
            check_out_date: check_in + Duration::days(1),
            room_type,
            channel: BookingChannel::Direct,
            rate,
            status: Default::default(),
        })
    }

    #[test]
    fn test_rejects_short_history() {
        let aggregator = HistoryAggregator::new(&ForecastingConfig::default());
        let bookings: Vec<Booking> = (1..=9).map(|d| booking(d, RoomType::Standard, 100.0)).collect();

        let err = aggregator.aggregate(&bookings).unwrap_err();
        assert!(matches!(err, RevenueError::InsufficientData { found: 9, required: 10 }));
    }

    #[test]
    fn test_groups_by_day_and_room_type() {
        let aggregator = HistoryAggregator::new(&ForecastingConfig::default());
        let mut bookings = vec![
            booking(3, RoomType::Standard, 100.0),
            booking(1, RoomType::Standard, 120.0),
            booking(1, RoomType::Standard, 80.0),
            booking(1, RoomType::Suite, 300.0),
        ];
        bookings.extend((10..16).map(|d| booking(d, RoomType::Deluxe, 150.0)));

        let series = aggregator.aggregate(&bookings).unwrap();

        let standard = &series[&RoomType::Standard];
        assert_eq!(standard.len(), 2);
        // Ordered by date regardless of input order
        assert_eq!(standard[0].date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(standard[0].demand, 2);
        assert_eq!(standard[0].avg_rate, 100.0);
        assert_eq!(standard[1].demand, 1);

        assert_eq!(series[&RoomType::Suite].len(), 1);
        assert_eq!(series[&RoomType::Deluxe].len(), 6);
        assert!(!series.contains_key(&RoomType::Presidential));
    }

    #[test]
    fn test_window_start_uses_lookback() {
        let aggregator = HistoryAggregator::new(&ForecastingConfig::default());
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();
        assert_eq!(aggregator.window_start(now), now - Duration::days(90));
    }
}
