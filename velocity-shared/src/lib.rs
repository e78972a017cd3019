pub mod models;
pub mod pii;

pub use models::booking::{Booking, BookingChannel, BookingStatus, NewBooking};
pub use models::hotel::{Hotel, NewHotel, Room, RoomType};
pub use models::revenue::{DemandForecast, InventoryAllocation, NewAllocation, RateRecommendation};
pub use models::ParseEnumError;
pub use pii::Masked;
