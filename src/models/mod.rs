pub mod booking;
pub mod service;
pub mod session;
pub mod slot;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use service::Service;
pub use session::Session;
pub use slot::{Slot, SlotState, DAILY_HOURS};
pub use user::{Role, UserProfile};
