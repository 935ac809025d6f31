use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus, Role, Service, Slot, UserProfile};

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

// ── Slots ──

pub fn insert_slot(conn: &Connection, slot: &Slot) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO slots (id, date, time, available, reserved) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            slot.id,
            slot.date.format(DATE_FMT).to_string(),
            slot.time,
            slot.available as i32,
            slot.reserved as i32,
        ],
    )?;
    Ok(())
}

pub fn get_slot(conn: &Connection, id: &str) -> anyhow::Result<Option<Slot>> {
    let result = conn.query_row(
        "SELECT id, date, time, available, reserved FROM slots WHERE id = ?1",
        params![id],
        |row| Ok(parse_slot_row(row)),
    );

    match result {
        Ok(slot) => Ok(Some(slot?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_slot_by_key(
    conn: &Connection,
    date: NaiveDate,
    time: &str,
) -> anyhow::Result<Option<Slot>> {
    let result = conn.query_row(
        "SELECT id, date, time, available, reserved FROM slots WHERE date = ?1 AND time = ?2",
        params![date.format(DATE_FMT).to_string(), time],
        |row| Ok(parse_slot_row(row)),
    );

    match result {
        Ok(slot) => Ok(Some(slot?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Slots offered to customers: available and not reserved, ordered by time.
/// The hour labels are zero-padded HH:MM, so lexical order is chronological.
pub fn get_open_slots(conn: &Connection, date: NaiveDate) -> anyhow::Result<Vec<Slot>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, time, available, reserved FROM slots
         WHERE date = ?1 AND available = 1 AND reserved = 0 ORDER BY time ASC",
    )?;

    let rows = stmt.query_map(params![date.format(DATE_FMT).to_string()], |row| {
        Ok(parse_slot_row(row))
    })?;

    let mut slots = vec![];
    for row in rows {
        slots.push(row??);
    }
    Ok(slots)
}

pub fn get_slots_for_date(conn: &Connection, date: NaiveDate) -> anyhow::Result<Vec<Slot>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, time, available, reserved FROM slots WHERE date = ?1 ORDER BY time ASC",
    )?;

    let rows = stmt.query_map(params![date.format(DATE_FMT).to_string()], |row| {
        Ok(parse_slot_row(row))
    })?;

    let mut slots = vec![];
    for row in rows {
        slots.push(row??);
    }
    Ok(slots)
}

pub fn set_slot_availability(conn: &Connection, id: &str, available: bool) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE slots SET available = ?1 WHERE id = ?2",
        params![available as i32, id],
    )?;
    Ok(count > 0)
}

/// Conditionally claims a slot. The WHERE clause is the compare-and-swap:
/// zero rows updated means the slot was taken or closed in the meantime.
pub fn try_reserve_slot(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE slots SET reserved = 1, available = 0
         WHERE id = ?1 AND available = 1 AND reserved = 0",
        params![id],
    )?;
    Ok(count > 0)
}

pub fn release_slot(
    conn: &Connection,
    date: NaiveDate,
    time: &str,
    reopen: bool,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE slots SET reserved = 0, available = ?1 WHERE date = ?2 AND time = ?3",
        params![reopen as i32, date.format(DATE_FMT).to_string(), time],
    )?;
    Ok(count > 0)
}

fn parse_slot_row(row: &rusqlite::Row) -> anyhow::Result<Slot> {
    let id: String = row.get(0)?;
    let date_str: String = row.get(1)?;
    let time: String = row.get(2)?;
    let available: i32 = row.get(3)?;
    let reserved: i32 = row.get(4)?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FMT)?;

    Ok(Slot {
        id,
        date,
        time,
        available: available != 0,
        reserved: reserved != 0,
    })
}

// ── Bookings ──

pub fn insert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, customer_email, customer_name, customer_phone, date, time,
                               service_name, price, status, payment_method, deposit_applied,
                               amount_paid, comment, reference, staff_created, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            booking.id,
            booking.customer_email,
            booking.customer_name,
            booking.customer_phone,
            booking.date.format(DATE_FMT).to_string(),
            booking.time,
            booking.service_name,
            booking.price,
            booking.status.as_str(),
            booking.payment_method,
            booking.deposit_applied as i32,
            booking.amount_paid,
            booking.comment,
            booking.reference,
            booking.staff_created as i32,
            booking.created_at.format(DATETIME_FMT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_booking(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("{BOOKING_SELECT} WHERE id = ?1"),
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_bookings_for_email(conn: &Connection, email: &str) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "{BOOKING_SELECT} WHERE customer_email = ?1 ORDER BY date DESC, time DESC"
    ))?;

    let rows = stmt.query_map(params![email], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Active bookings for a (date, time) pair. A reserved slot should have
/// exactly one of these.
pub fn get_active_bookings_for_key(
    conn: &Connection,
    date: NaiveDate,
    time: &str,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "{BOOKING_SELECT} WHERE date = ?1 AND time = ?2 AND status = 'active'"
    ))?;

    let rows = stmt.query_map(
        params![date.format(DATE_FMT).to_string(), time],
        |row| Ok(parse_booking_row(row)),
    )?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_all_bookings(
    conn: &Connection,
    status_filter: Option<BookingStatus>,
    limit: i64,
) -> anyhow::Result<Vec<Booking>> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match status_filter {
        Some(status) => (
            format!("{BOOKING_SELECT} WHERE status = ?1 ORDER BY date DESC, time DESC LIMIT ?2"),
            vec![
                Box::new(status.as_str().to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(limit),
            ],
        ),
        None => (
            format!("{BOOKING_SELECT} ORDER BY date DESC, time DESC LIMIT ?1"),
            vec![Box::new(limit) as Box<dyn rusqlite::types::ToSql>],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn set_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

const BOOKING_SELECT: &str =
    "SELECT id, customer_email, customer_name, customer_phone, date, time, service_name, price,
            status, payment_method, deposit_applied, amount_paid, comment, reference,
            staff_created, created_at
     FROM bookings";

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let customer_email: String = row.get(1)?;
    let customer_name: String = row.get(2)?;
    let customer_phone: String = row.get(3)?;
    let date_str: String = row.get(4)?;
    let time: String = row.get(5)?;
    let service_name: String = row.get(6)?;
    let price: f64 = row.get(7)?;
    let status_str: String = row.get(8)?;
    let payment_method: Option<String> = row.get(9)?;
    let deposit_applied: i32 = row.get(10)?;
    let amount_paid: f64 = row.get(11)?;
    let comment: Option<String> = row.get(12)?;
    let reference: Option<String> = row.get(13)?;
    let staff_created: i32 = row.get(14)?;
    let created_at_str: String = row.get(15)?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FMT)?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, DATETIME_FMT)?;

    Ok(Booking {
        id,
        customer_email,
        customer_name,
        customer_phone,
        date,
        time,
        service_name,
        price,
        status: BookingStatus::parse(&status_str),
        payment_method,
        deposit_applied: deposit_applied != 0,
        amount_paid,
        comment,
        reference,
        staff_created: staff_created != 0,
        created_at,
    })
}

// ── Services ──

pub fn insert_service(conn: &Connection, service: &Service) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO services (id, name, price) VALUES (?1, ?2, ?3)",
        params![service.id, service.name, service.price],
    )?;
    Ok(())
}

pub fn get_service(conn: &Connection, id: &str) -> anyhow::Result<Option<Service>> {
    let result = conn.query_row(
        "SELECT id, name, price FROM services WHERE id = ?1",
        params![id],
        |row| {
            Ok(Service {
                id: row.get(0)?,
                name: row.get(1)?,
                price: row.get(2)?,
            })
        },
    );

    match result {
        Ok(service) => Ok(Some(service)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_services(conn: &Connection) -> anyhow::Result<Vec<Service>> {
    let mut stmt = conn.prepare("SELECT id, name, price FROM services ORDER BY name ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Service {
            id: row.get(0)?,
            name: row.get(1)?,
            price: row.get(2)?,
        })
    })?;

    let mut services = vec![];
    for row in rows {
        services.push(row?);
    }
    Ok(services)
}

pub fn update_service(
    conn: &Connection,
    id: &str,
    name: &str,
    price: f64,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE services SET name = ?1, price = ?2 WHERE id = ?3",
        params![name, price, id],
    )?;
    Ok(count > 0)
}

pub fn delete_service(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM services WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

// ── Users ──

pub fn insert_user(conn: &Connection, user: &UserProfile) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO users (id, name, email, phone, role, requires_deposit)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.id,
            user.name,
            user.email,
            user.phone,
            user.role.as_str(),
            user.requires_deposit as i32,
        ],
    )?;
    Ok(())
}

pub fn get_user(conn: &Connection, id: &str) -> anyhow::Result<Option<UserProfile>> {
    let result = conn.query_row(
        "SELECT id, name, email, phone, role, requires_deposit FROM users WHERE id = ?1",
        params![id],
        |row| Ok(parse_user_row(row)),
    );

    match result {
        Ok(user) => Ok(Some(user?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> anyhow::Result<Option<UserProfile>> {
    let result = conn.query_row(
        "SELECT id, name, email, phone, role, requires_deposit FROM users WHERE email = ?1",
        params![email],
        |row| Ok(parse_user_row(row)),
    );

    match result {
        Ok(user) => Ok(Some(user?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_users(conn: &Connection) -> anyhow::Result<Vec<UserProfile>> {
    let mut stmt = conn
        .prepare("SELECT id, name, email, phone, role, requires_deposit FROM users ORDER BY name ASC")?;
    let rows = stmt.query_map([], |row| Ok(parse_user_row(row)))?;

    let mut users = vec![];
    for row in rows {
        users.push(row??);
    }
    Ok(users)
}

pub fn set_user_role(conn: &Connection, id: &str, role: Role) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE users SET role = ?1 WHERE id = ?2",
        params![role.as_str(), id],
    )?;
    Ok(count > 0)
}

pub fn set_requires_deposit(
    conn: &Connection,
    id: &str,
    requires_deposit: bool,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE users SET requires_deposit = ?1 WHERE id = ?2",
        params![requires_deposit as i32, id],
    )?;
    Ok(count > 0)
}

pub fn delete_user(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_user_row(row: &rusqlite::Row) -> anyhow::Result<UserProfile> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let email: String = row.get(2)?;
    let phone: String = row.get(3)?;
    let role_str: String = row.get(4)?;
    let requires_deposit: i32 = row.get(5)?;

    Ok(UserProfile {
        id,
        name,
        email,
        phone,
        role: Role::parse(&role_str),
        requires_deposit: requires_deposit != 0,
    })
}
