use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use velocity_shared::{BookingChannel, DemandForecast, Hotel, InventoryAllocation, NewAllocation};

use crate::round2;

/// Share of inventory and price adjustment for one sales channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelPolicy {
    pub channel: BookingChannel,
    pub allocation_ratio: f64,
    pub rate_multiplier: f64,
}

/// Splits forecast demand and room inventory across sales channels.
///
/// Channels are evaluated independently: each one takes its ratio of the
/// full room count and of the full predicted demand, so the allocations
/// for a day are not guaranteed to fit the hotel's capacity together.
pub struct ChannelAllocator {
    policies: Vec<ChannelPolicy>,
}

impl ChannelAllocator {
    pub fn new(policies: Vec<ChannelPolicy>) -> Self {
        Self { policies }
    }

    /// Allocations for one forecast. Channels that would get no room are
    /// left out.
    pub fn allocate(
        &self,
        hotel: &Hotel,
        forecast: &DemandForecast,
        now: DateTime<Utc>,
    ) -> Vec<InventoryAllocation> {
        let available_rooms = hotel.rooms_of(forecast.room_type).max(0) as f64;

        self.policies
            .iter()
            .filter_map(|policy| {
                let by_inventory = (available_rooms * policy.allocation_ratio).floor() as i32;
                let by_demand = (forecast.predicted_demand.max(0.0) * policy.allocation_ratio).floor() as i32;
                let allocated_rooms = by_inventory.min(by_demand);

                if allocated_rooms <= 0 {
                    return None;
                }

                Some(InventoryAllocation::new(
                    NewAllocation {
                        hotel_id: hotel.id,
                        room_type: forecast.room_type,
                        date: forecast.date,
                        channel: policy.channel,
                        allocated_rooms,
                        rate: round2(forecast.predicted_adr * policy.rate_multiplier),
                    },
                    now,
                ))
            })
            .collect()
    }

    pub fn allocate_all(
        &self,
        hotel: &Hotel,
        forecasts: &[DemandForecast],
        now: DateTime<Utc>,
    ) -> Vec<InventoryAllocation> {
        let allocations: Vec<InventoryAllocation> = forecasts
            .iter()
            .flat_map(|forecast| self.allocate(hotel, forecast, now))
            .collect();

        debug!(
            "Allocated {} channel entries from {} forecasts for hotel {}",
            allocations.len(),
            forecasts.len(),
            hotel.id
        );
        allocations
    }
}

impl Default for ChannelAllocator {
    /// Direct 40%, booking.com 30% (10% commission), Expedia 20% (15%
    /// commission), walk-in 10% at a 10% premium. Airbnb takes bookings but
    /// has no allocation.
    fn default() -> Self {
        Self::new(vec![
            ChannelPolicy { channel: BookingChannel::Direct, allocation_ratio: 0.4, rate_multiplier: 1.0 },
            ChannelPolicy { channel: BookingChannel::BookingCom, allocation_ratio: 0.3, rate_multiplier: 0.9 },
            ChannelPolicy { channel: BookingChannel::Expedia, allocation_ratio: 0.2, rate_multiplier: 0.85 },
            ChannelPolicy { channel: BookingChannel::WalkIn, allocation_ratio: 0.1, rate_multiplier: 1.1 },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use velocity_shared::{NewHotel, RoomType};

    fn hotel_with(room_type: RoomType, rooms: i32) -> Hotel {
        let mut room_types = BTreeMap::new();
        room_types.insert(room_type, rooms);
        Hotel::new(NewHotel {
            name: "Ribeira Suites".to_string(),
            location: "Porto".to_string(),
            total_rooms: rooms,
            room_types,
        })
    }

    fn forecast(hotel: &Hotel, room_type: RoomType, demand: f64, adr: f64) -> DemandForecast {
        DemandForecast::new(hotel.id, Utc::now(), room_type, demand, adr, 0.9, Utc::now())
    }

    #[test]
    fn test_direct_channel_bounded_by_demand() {
        let allocator = ChannelAllocator::default();
        let hotel = hotel_with(RoomType::Standard, 20);
        let allocations = allocator.allocate(&hotel, &forecast(&hotel, RoomType::Standard, 10.0, 150.0), Utc::now());

        let direct = allocations.iter().find(|a| a.channel == BookingChannel::Direct).unwrap();
        // min(floor(20 * 0.4), floor(10 * 0.4)) = min(8, 4)
        assert_eq!(direct.allocated_rooms, 4);
        assert_eq!(direct.rate, 150.0);

        let booking_com = allocations.iter().find(|a| a.channel == BookingChannel::BookingCom).unwrap();
        assert_eq!(booking_com.allocated_rooms, 3);
        assert_eq!(booking_com.rate, 135.0);

        let expedia = allocations.iter().find(|a| a.channel == BookingChannel::Expedia).unwrap();
        assert_eq!(expedia.allocated_rooms, 2);
        assert_eq!(expedia.rate, 127.5);

        let walk_in = allocations.iter().find(|a| a.channel == BookingChannel::WalkIn).unwrap();
        assert_eq!(walk_in.allocated_rooms, 1);
        assert_eq!(walk_in.rate, 165.0);
    }

    #[test]
    fn test_zero_allocations_are_dropped() {
        let allocator = ChannelAllocator::default();
        let hotel = hotel_with(RoomType::Deluxe, 20);
        // floor(4 * 0.1) = 0 for walk-in, floor(4 * 0.2) = 0 for expedia
        let allocations = allocator.allocate(&hotel, &forecast(&hotel, RoomType::Deluxe, 4.0, 200.0), Utc::now());

        let channels: Vec<BookingChannel> = allocations.iter().map(|a| a.channel).collect();
        assert_eq!(channels, vec![BookingChannel::Direct, BookingChannel::BookingCom]);
        assert!(allocations.iter().all(|a| a.allocated_rooms > 0));
    }

    #[test]
    fn test_room_type_missing_from_hotel_gets_nothing() {
        let allocator = ChannelAllocator::default();
        let hotel = hotel_with(RoomType::Standard, 20);
        let allocations = allocator.allocate(&hotel, &forecast(&hotel, RoomType::Suite, 30.0, 400.0), Utc::now());
        assert!(allocations.is_empty());
    }

    #[test]
    fn test_airbnb_never_allocated() {
        let allocator = ChannelAllocator::default();
        let hotel = hotel_with(RoomType::Standard, 100);
        let forecasts = vec![
            forecast(&hotel, RoomType::Standard, 50.0, 120.0),
            forecast(&hotel, RoomType::Standard, 80.0, 130.0),
        ];
        let allocations = allocator.allocate_all(&hotel, &forecasts, Utc::now());
        assert_eq!(allocations.len(), 8);
        assert!(allocations.iter().all(|a| a.channel != BookingChannel::Airbnb));
    }
}
