use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use super::hotel::RoomType;
use super::ParseEnumError;
use crate::pii::Masked;

/// Distribution path a booking came through
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BookingChannel {
    #[serde(rename = "direct")]
    Direct,
    #[serde(rename = "booking.com")]
    BookingCom,
    #[serde(rename = "expedia")]
    Expedia,
    #[serde(rename = "airbnb")]
    Airbnb,
    #[serde(rename = "walk-in")]
    WalkIn,
}

impl BookingChannel {
    pub const ALL: [BookingChannel; 5] = [
        BookingChannel::Direct,
        BookingChannel::BookingCom,
        BookingChannel::Expedia,
        BookingChannel::Airbnb,
        BookingChannel::WalkIn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingChannel::Direct => "direct",
            BookingChannel::BookingCom => "booking.com",
            BookingChannel::Expedia => "expedia",
            BookingChannel::Airbnb => "airbnb",
            BookingChannel::WalkIn => "walk-in",
        }
    }
}

impl fmt::Display for BookingChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingChannel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingChannel::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("booking channel", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
    CheckedIn,
    CheckedOut,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Confirmed,
        BookingStatus::Pending,
        BookingStatus::Cancelled,
        BookingStatus::CheckedIn,
        BookingStatus::CheckedOut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Pending => "pending",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("booking status", s))
    }
}

/// A guest reservation. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    pub guest_name: String,
    pub guest_email: Masked<String>,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub room_type: RoomType,
    pub channel: BookingChannel,
    pub rate: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(request: NewBooking) -> Self {
        Self {
            id: Uuid::new_v4(),
            hotel_id: request.hotel_id,
            room_id: request.room_id,
            guest_name: request.guest_name,
            guest_email: request.guest_email,
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            room_type: request.room_type,
            channel: request.channel,
            rate: request.rate,
            status: request.status,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    pub guest_name: String,
    pub guest_email: Masked<String>,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub room_type: RoomType,
    pub channel: BookingChannel,
    pub rate: f64,
    #[serde(default)]
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_wire_names() {
        let json = serde_json::to_string(&BookingChannel::BookingCom).unwrap();
        assert_eq!(json, "\"booking.com\"");
        let parsed: BookingChannel = serde_json::from_str("\"walk-in\"").unwrap();
        assert_eq!(parsed, BookingChannel::WalkIn);
        assert_eq!("airbnb".parse::<BookingChannel>().unwrap(), BookingChannel::Airbnb);
        assert!("telephone".parse::<BookingChannel>().is_err());
    }

    #[test]
    fn test_new_booking_defaults_to_confirmed() {
        let json = r#"
            {
                "hotel_id": "6f1c1d9e-2d0c-4a49-9a3f-6d3f0f1b2c11",
                "room_id": "0b8f5f0e-8f57-4c5e-a0a4-1a7b3f2d9e42",
                "guest_name": "Ana Costa",
                "guest_email": "ana@example.com",
                "check_in_date": "2024-12-25T14:00:00Z",
                "check_out_date": "2024-12-27T11:00:00Z",
                "room_type": "suite",
                "channel": "expedia",
                "rate": 240.0
            }
        "#;
        let request: NewBooking = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(request.status, BookingStatus::Confirmed);
        assert_eq!(request.room_type, RoomType::Suite);

        let booking = Booking::new(request);
        assert_eq!(booking.guest_email.expose(), "ana@example.com");
        assert!(!format!("{:?}", booking).contains("ana@example.com"));
    }

    #[test]
    fn test_status_snake_case() {
        assert_eq!(serde_json::to_string(&BookingStatus::CheckedIn).unwrap(), "\"checked_in\"");
        assert_eq!("checked_out".parse::<BookingStatus>().unwrap(), BookingStatus::CheckedOut);
    }
}
