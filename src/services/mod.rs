pub mod notify;
pub mod reservation;
