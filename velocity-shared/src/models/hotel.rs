use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ParseEnumError;

/// Room categories sold by a hotel. The set is closed: forecasts,
/// allocations and recommendations are only ever produced for these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
    Presidential,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::Standard,
        RoomType::Deluxe,
        RoomType::Suite,
        RoomType::Presidential,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Standard => "standard",
            RoomType::Deluxe => "deluxe",
            RoomType::Suite => "suite",
            RoomType::Presidential => "presidential",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomType::ALL
            .into_iter()
            .find(|rt| rt.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("room type", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub total_rooms: i32,
    /// Room count per room type
    pub room_types: BTreeMap<RoomType, i32>,
    pub created_at: DateTime<Utc>,
}

impl Hotel {
    pub fn new(request: NewHotel) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            location: request.location,
            total_rooms: request.total_rooms,
            room_types: request.room_types,
            created_at: Utc::now(),
        }
    }

    /// Rooms of the given type, 0 when the hotel does not sell it.
    pub fn rooms_of(&self, room_type: RoomType) -> i32 {
        self.room_types.get(&room_type).copied().unwrap_or(0)
    }

    /// Build the physical room inventory for a freshly created hotel.
    ///
    /// Rooms are numbered `{TYPE}-{nnn}` and the i-th room of a type is
    /// priced at `100 + 10 * i`.
    pub fn provision_rooms(&self) -> Vec<Room> {
        let mut rooms = Vec::new();
        for (room_type, count) in &self.room_types {
            for i in 0..(*count).max(0) {
                rooms.push(Room {
                    id: Uuid::new_v4(),
                    hotel_id: self.id,
                    room_number: format!("{}-{:03}", room_type.as_str().to_uppercase(), i + 1),
                    room_type: *room_type,
                    base_rate: 100.0 + (i as f64 * 10.0),
                    is_available: true,
                    created_at: self.created_at,
                });
            }
        }
        rooms
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHotel {
    pub name: String,
    pub location: String,
    pub total_rooms: i32,
    pub room_types: BTreeMap<RoomType, i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_number: String,
    pub room_type: RoomType,
    pub base_rate: f64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}
