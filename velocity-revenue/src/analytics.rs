use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;
use velocity_shared::{Booking, BookingChannel, Hotel, RoomType};

use crate::round2;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentPerformance {
    pub bookings: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub total_revenue: f64,
    pub total_bookings: usize,
    pub occupancy_rate: f64,
    pub adr: f64,
    pub revpar: f64,
}

/// Point-in-time revenue snapshot for one hotel
#[derive(Debug, Clone, Serialize)]
pub struct RevenueDashboard {
    pub hotel_id: Uuid,
    pub hotel_name: String,
    pub total_rooms: i32,
    pub generated_at: DateTime<Utc>,
    pub metrics: DashboardMetrics,
    pub channel_performance: BTreeMap<BookingChannel, SegmentPerformance>,
    pub room_type_performance: BTreeMap<RoomType, SegmentPerformance>,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

impl RevenueDashboard {
    /// Summarize `bookings`, which the caller has already limited to the
    /// period of interest.
    pub fn build(hotel: &Hotel, bookings: &[Booking], generated_at: DateTime<Utc>) -> Self {
        let mut channel_performance: BTreeMap<BookingChannel, SegmentPerformance> = BTreeMap::new();
        let mut room_type_performance: BTreeMap<RoomType, SegmentPerformance> = BTreeMap::new();
        let mut total_revenue = 0.0;

        for booking in bookings {
            total_revenue += booking.rate;

            let channel = channel_performance.entry(booking.channel).or_default();
            channel.bookings += 1;
            channel.revenue += booking.rate;

            let room_type = room_type_performance.entry(booking.room_type).or_default();
            room_type.bookings += 1;
            room_type.revenue += booking.rate;
        }

        for segment in channel_performance.values_mut().chain(room_type_performance.values_mut()) {
            segment.revenue = round2(segment.revenue);
        }

        let total_bookings = bookings.len();
        let rooms = hotel.total_rooms as f64;

        Self {
            hotel_id: hotel.id,
            hotel_name: hotel.name.clone(),
            total_rooms: hotel.total_rooms,
            generated_at,
            metrics: DashboardMetrics {
                total_revenue: round2(total_revenue),
                total_bookings,
                occupancy_rate: round2(ratio(total_bookings as f64, rooms) * 100.0),
                adr: round2(ratio(total_revenue, total_bookings as f64)),
                revpar: round2(ratio(total_revenue, rooms)),
            },
            channel_performance,
            room_type_performance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use velocity_shared::{NewBooking, NewHotel};

    fn hotel(total_rooms: i32) -> Hotel {
        Hotel::new(NewHotel {
            name: "Harbour View".to_string(),
            location: "Halifax".to_string(),
            total_rooms,
            room_types: [(RoomType::Standard, total_rooms)].into_iter().collect(),
        })
    }

    fn booking(hotel: &Hotel, room_type: RoomType, channel: BookingChannel, rate: f64) -> Booking {
        let check_in = Utc::now() + Duration::days(1);
        Booking::new(NewBooking {
            hotel_id: hotel.id,
            room_id: Uuid::new_v4(),
            guest_name: "Ada".to_string(),
            guest_email: "ada@example.com".to_string().into(),
            check_in_date: check_in,
            check_out_date: check_in + Duration::days(2),
            room_type,
            channel,
            rate,
            status: Default::default(),
        })
    }

    #[test]
    fn test_metrics_and_breakdowns() {
        let hotel = hotel(10);
        let bookings = vec![
            booking(&hotel, RoomType::Standard, BookingChannel::Direct, 100.0),
            booking(&hotel, RoomType::Standard, BookingChannel::Expedia, 120.5),
            booking(&hotel, RoomType::Suite, BookingChannel::Direct, 300.0),
        ];

        let dashboard = RevenueDashboard::build(&hotel, &bookings, Utc::now());

        assert_eq!(dashboard.hotel_name, "Harbour View");
        assert_eq!(dashboard.metrics.total_bookings, 3);
        assert_eq!(dashboard.metrics.total_revenue, 520.5);
        assert_eq!(dashboard.metrics.occupancy_rate, 30.0);
        assert_eq!(dashboard.metrics.adr, 173.5);
        assert_eq!(dashboard.metrics.revpar, 52.05);

        let direct = &dashboard.channel_performance[&BookingChannel::Direct];
        assert_eq!(direct.bookings, 2);
        assert_eq!(direct.revenue, 400.0);
        assert!(!dashboard.channel_performance.contains_key(&BookingChannel::Airbnb));
        assert_eq!(dashboard.room_type_performance[&RoomType::Suite].bookings, 1);
    }

    #[test]
    fn test_empty_hotel_has_zero_metrics() {
        let dashboard = RevenueDashboard::build(&hotel(0), &[], Utc::now());
        assert_eq!(dashboard.metrics.adr, 0.0);
        assert_eq!(dashboard.metrics.revpar, 0.0);
        assert_eq!(dashboard.metrics.occupancy_rate, 0.0);
        assert!(dashboard.channel_performance.is_empty());
    }

    #[test]
    fn test_serializes_channel_keys_as_wire_names() {
        let hotel = hotel(5);
        let bookings = vec![booking(&hotel, RoomType::Standard, BookingChannel::BookingCom, 90.0)];
        let json = serde_json::to_value(RevenueDashboard::build(&hotel, &bookings, Utc::now())).unwrap();

        assert_eq!(json["channel_performance"]["booking.com"]["bookings"], 1);
        assert_eq!(json["room_type_performance"]["standard"]["revenue"], 90.0);
    }
}
