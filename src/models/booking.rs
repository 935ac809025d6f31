use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub customer_email: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    pub time: String,
    /// Service name and price are snapshotted at reservation time so later
    /// service edits never change historical bookings.
    pub service_name: String,
    pub price: f64,
    pub status: BookingStatus,
    pub payment_method: Option<String>,
    pub deposit_applied: bool,
    pub amount_paid: f64,
    pub comment: Option<String>,
    pub reference: Option<String>,
    pub staff_created: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Accepts the canonical vocabulary plus the spellings found in data
    /// migrated from the legacy system ("activa", "atendido", "culminada",
    /// "finalizada", "cancelada").
    pub fn parse(s: &str) -> Self {
        match s {
            "completed" | "atendido" | "culminada" | "finalizada" => BookingStatus::Completed,
            "cancelled" | "cancelada" => BookingStatus::Cancelled,
            _ => BookingStatus::Active,
        }
    }
}
