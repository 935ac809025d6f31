use serde::{Deserialize, Serialize};

/// Reference data: a bookable service with its current price. Bookings copy
/// name and price at creation time, so services can be edited freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub price: f64,
}
