use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::db::queries;
use crate::models::slot::is_daily_hour;
use crate::models::{Booking, BookingStatus, Session, Slot, SlotState, UserProfile, DAILY_HOURS};

/// Workflow errors. Display strings are what the customer or staff member
/// sees next to the action button.
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("unknown service")]
    UnknownService,

    #[error("{0} is not a bookable hour")]
    InvalidTime(String),

    #[error("that time slot is no longer available, please pick another one")]
    SlotUnavailable,

    #[error("slot is reserved; cancel its booking first")]
    SlotReserved,

    #[error("a 50% deposit is required before booking; please contact us at {contact}")]
    DepositRequired { contact: String },

    #[error("booking not found")]
    BookingNotFound,

    #[error("booking is already cancelled")]
    AlreadyCancelled,

    #[error("booking is not active")]
    NotActive,

    #[error("not allowed")]
    Forbidden,

    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct ReserveRequest {
    pub slot_id: String,
    pub service_id: String,
    pub payment_method: Option<String>,
    pub comment: Option<String>,
    pub reference: Option<String>,
    /// Staff override for deposit-gated customers: a 50% deposit was
    /// received out-of-band.
    pub deposit_paid: bool,
}

#[derive(Debug)]
pub struct ReservationOutcome {
    pub booking: Booking,
    /// Human-readable confirmation handed to the notification sink.
    pub summary: String,
}

pub fn list_available_slots(
    conn: &Connection,
    date: NaiveDate,
) -> Result<Vec<Slot>, ReservationError> {
    Ok(queries::get_open_slots(conn, date)?)
}

/// One entry per hour of the daily template, for the staff day view.
#[derive(Debug, Serialize)]
pub struct DaySlot {
    pub time: &'static str,
    pub state: DayState,
    pub slot_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayState {
    Unconfigured,
    Open,
    Closed,
    Reserved,
}

pub fn day_overview(conn: &Connection, date: NaiveDate) -> Result<Vec<DaySlot>, ReservationError> {
    let stored = queries::get_slots_for_date(conn, date)?;

    let day = DAILY_HOURS
        .iter()
        .map(|&time| match stored.iter().find(|s| s.time == time) {
            Some(slot) => DaySlot {
                time,
                state: match slot.state() {
                    SlotState::Open => DayState::Open,
                    SlotState::Closed => DayState::Closed,
                    SlotState::Reserved => DayState::Reserved,
                },
                slot_id: Some(slot.id.clone()),
            },
            None => DaySlot {
                time,
                state: DayState::Unconfigured,
                slot_id: None,
            },
        })
        .collect();

    Ok(day)
}

/// Reserves a slot and creates the booking in a single transaction. The
/// conditional update on the slot row is the authoritative check: if another
/// actor claimed the slot first, the whole operation fails and no booking
/// is written.
pub fn reserve(
    conn: &mut Connection,
    session: &Session,
    customer: &UserProfile,
    req: &ReserveRequest,
    staff_contact: &str,
) -> Result<ReservationOutcome, ReservationError> {
    let staff_created = customer.id != session.user.id;
    if staff_created && !session.is_staff() {
        return Err(ReservationError::Forbidden);
    }
    // Only staff may record a deposit as received.
    if req.deposit_paid && !session.is_staff() {
        return Err(ReservationError::Forbidden);
    }

    if customer.email.trim().is_empty() {
        return Err(ReservationError::MissingField("customer email"));
    }
    let payment_method = req
        .payment_method
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());
    if !staff_created && payment_method.is_none() {
        return Err(ReservationError::MissingField("payment method"));
    }

    // Deposit gate: self-service is refused outright; staff must flag the
    // deposit explicitly when booking on the customer's behalf.
    if customer.requires_deposit && !(staff_created && req.deposit_paid) {
        return Err(ReservationError::DepositRequired {
            contact: staff_contact.to_string(),
        });
    }

    let service =
        queries::get_service(conn, &req.service_id)?.ok_or(ReservationError::UnknownService)?;
    let slot = queries::get_slot(conn, &req.slot_id)?.ok_or(ReservationError::SlotUnavailable)?;
    if slot.reserved || !slot.available {
        return Err(ReservationError::SlotUnavailable);
    }

    let amount_paid = if req.deposit_paid {
        service.price / 2.0
    } else {
        0.0
    };

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        customer_email: customer.email.clone(),
        customer_name: customer.name.clone(),
        customer_phone: customer.phone.clone(),
        date: slot.date,
        time: slot.time.clone(),
        service_name: service.name.clone(),
        price: service.price,
        status: BookingStatus::Active,
        payment_method: payment_method.map(str::to_string),
        deposit_applied: req.deposit_paid,
        amount_paid,
        comment: req.comment.clone(),
        reference: req.reference.clone(),
        staff_created,
        created_at: Utc::now().naive_utc(),
    };

    let tx = conn.transaction().map_err(anyhow::Error::from)?;
    if !queries::try_reserve_slot(&tx, &slot.id)? {
        // Claimed between the read above and here; dropping tx rolls back.
        return Err(ReservationError::SlotUnavailable);
    }
    queries::insert_booking(&tx, &booking)?;
    tx.commit().map_err(anyhow::Error::from)?;

    let summary = confirmation_summary(&booking);
    Ok(ReservationOutcome { booking, summary })
}

/// Cancels an active booking and releases its slot in one transaction.
/// `reopen_on_cancel` decides whether the freed slot goes back on offer or
/// stays closed until staff re-enable it. A booking whose slot row has been
/// deleted still cancels; the release is a logged no-op.
pub fn cancel_booking(
    conn: &mut Connection,
    session: &Session,
    booking_id: &str,
    reopen_on_cancel: bool,
) -> Result<Booking, ReservationError> {
    if !session.is_staff() {
        return Err(ReservationError::Forbidden);
    }

    let mut booking =
        queries::get_booking(conn, booking_id)?.ok_or(ReservationError::BookingNotFound)?;
    match booking.status {
        BookingStatus::Cancelled => return Err(ReservationError::AlreadyCancelled),
        BookingStatus::Completed => return Err(ReservationError::NotActive),
        BookingStatus::Active => {}
    }

    let tx = conn.transaction().map_err(anyhow::Error::from)?;
    queries::set_booking_status(&tx, booking_id, BookingStatus::Cancelled)?;
    let released = queries::release_slot(&tx, booking.date, booking.time.as_str(), reopen_on_cancel)?;
    tx.commit().map_err(anyhow::Error::from)?;

    if !released {
        tracing::warn!(
            booking_id,
            date = %booking.date,
            time = %booking.time,
            "cancelled booking had no slot row to release"
        );
    }

    booking.status = BookingStatus::Cancelled;
    Ok(booking)
}

/// Marks an active booking as completed. The slot stays reserved; the hour
/// has been consumed either way.
pub fn complete_booking(
    conn: &Connection,
    session: &Session,
    booking_id: &str,
) -> Result<Booking, ReservationError> {
    if !session.is_staff() {
        return Err(ReservationError::Forbidden);
    }

    let mut booking =
        queries::get_booking(conn, booking_id)?.ok_or(ReservationError::BookingNotFound)?;
    if booking.status != BookingStatus::Active {
        return Err(ReservationError::NotActive);
    }

    queries::set_booking_status(conn, booking_id, BookingStatus::Completed)?;
    booking.status = BookingStatus::Completed;
    Ok(booking)
}

/// Staff toggle for one (date, time) key:
/// no row -> create open; unreserved row -> flip available; reserved -> refuse.
pub fn toggle_slot(
    conn: &Connection,
    session: &Session,
    date: NaiveDate,
    time: &str,
) -> Result<Slot, ReservationError> {
    if !session.is_staff() {
        return Err(ReservationError::Forbidden);
    }
    if !is_daily_hour(time) {
        return Err(ReservationError::InvalidTime(time.to_string()));
    }

    match queries::get_slot_by_key(conn, date, time)? {
        None => {
            let slot = Slot {
                id: Uuid::new_v4().to_string(),
                date,
                time: time.to_string(),
                available: true,
                reserved: false,
            };
            queries::insert_slot(conn, &slot)?;
            Ok(slot)
        }
        Some(slot) if slot.reserved => Err(ReservationError::SlotReserved),
        Some(mut slot) => {
            slot.available = !slot.available;
            queries::set_slot_availability(conn, &slot.id, slot.available)?;
            Ok(slot)
        }
    }
}

fn confirmation_summary(booking: &Booking) -> String {
    let name = if booking.customer_name.is_empty() {
        "A customer"
    } else {
        booking.customer_name.as_str()
    };

    let mut summary = format!(
        "{name} booked {service} (S/. {price}) on {date} at {time}.",
        service = booking.service_name,
        price = booking.price,
        date = booking.date.format("%Y-%m-%d"),
        time = booking.time,
    );
    if let Some(method) = &booking.payment_method {
        summary.push_str(&format!(" Payment: {method}."));
    }
    if booking.deposit_applied {
        summary.push_str(" 50% deposit received.");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::{Role, Service};

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn profile(id: &str, role: Role, requires_deposit: bool) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: format!("User {id}"),
            email: format!("{id}@example.com"),
            phone: "+51999000111".to_string(),
            role,
            requires_deposit,
        }
    }

    fn customer_session() -> (Session, UserProfile) {
        let user = profile("cust-1", Role::Customer, false);
        (Session::new(user.clone()), user)
    }

    fn staff_session() -> Session {
        Session::new(profile("staff-1", Role::Staff, false))
    }

    fn seed_service(conn: &Connection, name: &str, price: f64) -> Service {
        let service = Service {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price,
        };
        queries::insert_service(conn, &service).unwrap();
        service
    }

    fn seed_open_slot(conn: &Connection, date_str: &str, time: &str) -> Slot {
        let slot = Slot {
            id: Uuid::new_v4().to_string(),
            date: date(date_str),
            time: time.to_string(),
            available: true,
            reserved: false,
        };
        queries::insert_slot(conn, &slot).unwrap();
        slot
    }

    fn reserve_request(slot: &Slot, service: &Service) -> ReserveRequest {
        ReserveRequest {
            slot_id: slot.id.clone(),
            service_id: service.id.clone(),
            payment_method: Some("cash".to_string()),
            comment: None,
            reference: None,
            deposit_paid: false,
        }
    }

    #[test]
    fn test_reserve_creates_booking_and_flags_slot() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let outcome = reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&slot, &service),
            "+51907011564",
        )
        .unwrap();

        assert_eq!(outcome.booking.status, BookingStatus::Active);
        assert_eq!(outcome.booking.service_name, "Fade");
        assert_eq!(outcome.booking.price, 30.0);
        assert!(!outcome.booking.staff_created);

        let stored = queries::get_slot(&conn, &slot.id).unwrap().unwrap();
        assert!(stored.reserved);
        assert!(!stored.available);

        assert!(outcome.summary.contains("Fade"));
        assert!(outcome.summary.contains("2024-06-03"));
        assert!(outcome.summary.contains("14:00"));
    }

    #[test]
    fn test_second_reserve_fails_and_writes_nothing() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let other = profile("cust-2", Role::Customer, false);
        let other_session = Session::new(other.clone());
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");
        let req = reserve_request(&slot, &service);

        reserve(&mut conn, &session, &customer, &req, "+51907011564").unwrap();
        let result = reserve(&mut conn, &other_session, &other, &req, "+51907011564");
        assert!(matches!(result, Err(ReservationError::SlotUnavailable)));

        // Exactly one active booking for the pair; slot still reserved.
        let active =
            queries::get_active_bookings_for_key(&conn, date("2024-06-03"), "14:00").unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].customer_email, customer.email);
    }

    #[test]
    fn test_reserve_closed_or_missing_slot_fails() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let service = seed_service(&conn, "Fade", 30.0);

        let closed = Slot {
            id: Uuid::new_v4().to_string(),
            date: date("2024-06-03"),
            time: "15:00".to_string(),
            available: false,
            reserved: false,
        };
        queries::insert_slot(&conn, &closed).unwrap();

        let result = reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&closed, &service),
            "+51907011564",
        );
        assert!(matches!(result, Err(ReservationError::SlotUnavailable)));

        let mut req = reserve_request(&closed, &service);
        req.slot_id = "no-such-slot".to_string();
        let result = reserve(&mut conn, &session, &customer, &req, "+51907011564");
        assert!(matches!(result, Err(ReservationError::SlotUnavailable)));
    }

    #[test]
    fn test_reserve_requires_payment_method() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let mut req = reserve_request(&slot, &service);
        req.payment_method = None;
        let result = reserve(&mut conn, &session, &customer, &req, "+51907011564");
        assert!(matches!(
            result,
            Err(ReservationError::MissingField("payment method"))
        ));
    }

    #[test]
    fn test_reserve_unknown_service() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let mut req = reserve_request(&slot, &service);
        req.service_id = "no-such-service".to_string();
        let result = reserve(&mut conn, &session, &customer, &req, "+51907011564");
        assert!(matches!(result, Err(ReservationError::UnknownService)));
    }

    #[test]
    fn test_deposit_gate_refuses_self_service() {
        let mut conn = setup_db();
        let customer = profile("cust-vip", Role::Premium, true);
        let session = Session::new(customer.clone());
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let result = reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&slot, &service),
            "+51907011564",
        );
        match result {
            Err(ReservationError::DepositRequired { contact }) => {
                assert_eq!(contact, "+51907011564");
            }
            other => panic!("expected DepositRequired, got {other:?}"),
        }

        // Nothing was written.
        let stored = queries::get_slot(&conn, &slot.id).unwrap().unwrap();
        assert!(!stored.reserved);
    }

    #[test]
    fn test_staff_deposit_override_stores_half_price() {
        let mut conn = setup_db();
        let session = staff_session();
        let customer = profile("cust-vip", Role::Premium, true);
        queries::insert_user(&conn, &customer).unwrap();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let mut req = reserve_request(&slot, &service);
        req.deposit_paid = true;
        let outcome = reserve(&mut conn, &session, &customer, &req, "+51907011564").unwrap();

        assert!(outcome.booking.deposit_applied);
        assert_eq!(outcome.booking.amount_paid, 15.0);
        assert!(outcome.booking.staff_created);
        assert!(outcome.summary.contains("50% deposit received"));
    }

    #[test]
    fn test_staff_without_deposit_flag_still_gated() {
        let mut conn = setup_db();
        let session = staff_session();
        let customer = profile("cust-vip", Role::Premium, true);
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let result = reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&slot, &service),
            "+51907011564",
        );
        assert!(matches!(
            result,
            Err(ReservationError::DepositRequired { .. })
        ));
    }

    #[test]
    fn test_customer_cannot_book_for_someone_else() {
        let mut conn = setup_db();
        let (session, _) = customer_session();
        let other = profile("cust-2", Role::Customer, false);
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let result = reserve(
            &mut conn,
            &session,
            &other,
            &reserve_request(&slot, &service),
            "+51907011564",
        );
        assert!(matches!(result, Err(ReservationError::Forbidden)));
    }

    #[test]
    fn test_customer_cannot_self_flag_deposit() {
        let mut conn = setup_db();
        let customer = profile("cust-vip", Role::Premium, true);
        let session = Session::new(customer.clone());
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let mut req = reserve_request(&slot, &service);
        req.deposit_paid = true;
        let result = reserve(&mut conn, &session, &customer, &req, "+51907011564");
        assert!(matches!(result, Err(ReservationError::Forbidden)));
    }

    #[test]
    fn test_price_snapshot_survives_service_edit() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let outcome = reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&slot, &service),
            "+51907011564",
        )
        .unwrap();

        queries::update_service(&conn, &service.id, "Fade Deluxe", 45.0).unwrap();

        let stored = queries::get_booking(&conn, &outcome.booking.id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.service_name, "Fade");
        assert_eq!(stored.price, 30.0);
    }

    #[test]
    fn test_cancel_releases_slot_closed_by_default() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let staff = staff_session();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let outcome = reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&slot, &service),
            "+51907011564",
        )
        .unwrap();

        let cancelled = cancel_booking(&mut conn, &staff, &outcome.booking.id, false).unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        let stored = queries::get_slot(&conn, &slot.id).unwrap().unwrap();
        assert!(!stored.reserved);
        assert!(!stored.available);
    }

    #[test]
    fn test_cancel_reopens_slot_when_configured() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let staff = staff_session();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let outcome = reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&slot, &service),
            "+51907011564",
        )
        .unwrap();

        cancel_booking(&mut conn, &staff, &outcome.booking.id, true).unwrap();

        let stored = queries::get_slot(&conn, &slot.id).unwrap().unwrap();
        assert!(!stored.reserved);
        assert!(stored.available);

        // The freed slot is offered again.
        let open = list_available_slots(&conn, date("2024-06-03")).unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, slot.id);
    }

    #[test]
    fn test_cancel_with_missing_slot_is_a_noop_release() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let staff = staff_session();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let outcome = reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&slot, &service),
            "+51907011564",
        )
        .unwrap();

        // Staff deleted the slot row out-of-band.
        conn.execute("DELETE FROM slots WHERE id = ?1", [slot.id.as_str()])
            .unwrap();

        let cancelled = cancel_booking(&mut conn, &staff, &outcome.booking.id, true).unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
    }

    #[test]
    fn test_cancel_requires_staff() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let outcome = reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&slot, &service),
            "+51907011564",
        )
        .unwrap();

        let result = cancel_booking(&mut conn, &session, &outcome.booking.id, false);
        assert!(matches!(result, Err(ReservationError::Forbidden)));
    }

    #[test]
    fn test_cancel_twice_rejected() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let staff = staff_session();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let outcome = reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&slot, &service),
            "+51907011564",
        )
        .unwrap();

        cancel_booking(&mut conn, &staff, &outcome.booking.id, false).unwrap();
        let result = cancel_booking(&mut conn, &staff, &outcome.booking.id, false);
        assert!(matches!(result, Err(ReservationError::AlreadyCancelled)));
    }

    #[test]
    fn test_complete_booking() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let staff = staff_session();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        let outcome = reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&slot, &service),
            "+51907011564",
        )
        .unwrap();

        let completed = complete_booking(&conn, &staff, &outcome.booking.id).unwrap();
        assert_eq!(completed.status, BookingStatus::Completed);

        // Completed bookings cannot be cancelled afterwards.
        let result = cancel_booking(&mut conn, &staff, &outcome.booking.id, false);
        assert!(matches!(result, Err(ReservationError::NotActive)));
    }

    #[test]
    fn test_list_excludes_reserved_even_without_booking() {
        let conn = setup_db();
        // Corrupted state: reserved slot with no booking record.
        let slot = Slot {
            id: Uuid::new_v4().to_string(),
            date: date("2024-06-03"),
            time: "14:00".to_string(),
            available: false,
            reserved: true,
        };
        queries::insert_slot(&conn, &slot).unwrap();

        let open = list_available_slots(&conn, date("2024-06-03")).unwrap();
        assert!(open.is_empty());
    }

    #[test]
    fn test_list_is_ordered_by_time_and_scoped_to_date() {
        let conn = setup_db();
        seed_open_slot(&conn, "2024-06-03", "16:00");
        seed_open_slot(&conn, "2024-06-03", "11:00");
        seed_open_slot(&conn, "2024-06-04", "12:00");

        let open = list_available_slots(&conn, date("2024-06-03")).unwrap();
        let times: Vec<&str> = open.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["11:00", "16:00"]);
    }

    #[test]
    fn test_toggle_creates_open_slot() {
        let conn = setup_db();
        let staff = staff_session();

        let slot = toggle_slot(&conn, &staff, date("2024-06-03"), "14:00").unwrap();
        assert!(slot.available);
        assert!(!slot.reserved);

        let stored = queries::get_slot_by_key(&conn, date("2024-06-03"), "14:00")
            .unwrap()
            .unwrap();
        assert!(stored.available);
    }

    #[test]
    fn test_toggle_twice_returns_to_original_state() {
        let conn = setup_db();
        let staff = staff_session();
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        toggle_slot(&conn, &staff, date("2024-06-03"), "14:00").unwrap();
        toggle_slot(&conn, &staff, date("2024-06-03"), "14:00").unwrap();

        let stored = queries::get_slot(&conn, &slot.id).unwrap().unwrap();
        assert_eq!(stored.available, slot.available);
    }

    #[test]
    fn test_toggle_refuses_reserved_slot() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let staff = staff_session();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");

        reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&slot, &service),
            "+51907011564",
        )
        .unwrap();

        let result = toggle_slot(&conn, &staff, date("2024-06-03"), "14:00");
        assert!(matches!(result, Err(ReservationError::SlotReserved)));
    }

    #[test]
    fn test_toggle_rejects_off_template_hour() {
        let conn = setup_db();
        let staff = staff_session();

        let result = toggle_slot(&conn, &staff, date("2024-06-03"), "09:00");
        assert!(matches!(result, Err(ReservationError::InvalidTime(_))));
    }

    #[test]
    fn test_toggle_requires_staff() {
        let conn = setup_db();
        let (session, _) = customer_session();

        let result = toggle_slot(&conn, &session, date("2024-06-03"), "14:00");
        assert!(matches!(result, Err(ReservationError::Forbidden)));
    }

    #[test]
    fn test_day_overview_covers_template() {
        let mut conn = setup_db();
        let (session, customer) = customer_session();
        let service = seed_service(&conn, "Fade", 30.0);
        let slot = seed_open_slot(&conn, "2024-06-03", "14:00");
        seed_open_slot(&conn, "2024-06-03", "11:00");
        reserve(
            &mut conn,
            &session,
            &customer,
            &reserve_request(&slot, &service),
            "+51907011564",
        )
        .unwrap();

        let day = day_overview(&conn, date("2024-06-03")).unwrap();
        assert_eq!(day.len(), DAILY_HOURS.len());

        let by_time = |t: &str| day.iter().find(|d| d.time == t).unwrap();
        assert_eq!(by_time("11:00").state, DayState::Open);
        assert_eq!(by_time("14:00").state, DayState::Reserved);
        assert_eq!(by_time("12:00").state, DayState::Unconfigured);
        assert!(by_time("12:00").slot_id.is_none());
    }
}
