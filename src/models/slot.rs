use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The fixed daily template: nine one-hour slots from 11:00 to 19:00.
/// A (date, time) pair with no stored row is unconfigured and never offered.
pub const DAILY_HOURS: [&str; 9] = [
    "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00", "18:00", "19:00",
];

pub fn is_daily_hour(time: &str) -> bool {
    DAILY_HOURS.contains(&time)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub available: bool,
    pub reserved: bool,
}

/// Staff-facing state of a stored slot. Unconfigured hours have no row
/// and therefore no `SlotState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    Open,
    Closed,
    Reserved,
}

impl Slot {
    pub fn state(&self) -> SlotState {
        if self.reserved {
            SlotState::Reserved
        } else if self.available {
            SlotState::Open
        } else {
            SlotState::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_hours_are_ordered() {
        let mut sorted = DAILY_HOURS.to_vec();
        sorted.sort();
        assert_eq!(sorted, DAILY_HOURS.to_vec());
    }

    #[test]
    fn test_is_daily_hour() {
        assert!(is_daily_hour("11:00"));
        assert!(is_daily_hour("19:00"));
        assert!(!is_daily_hour("10:00"));
        assert!(!is_daily_hour("20:00"));
        assert!(!is_daily_hour("11:30"));
    }

    #[test]
    fn test_state() {
        let mut slot = Slot {
            id: "s1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            time: "14:00".to_string(),
            available: true,
            reserved: false,
        };
        assert_eq!(slot.state(), SlotState::Open);

        slot.available = false;
        assert_eq!(slot.state(), SlotState::Closed);

        // Reserved wins regardless of the available flag
        slot.reserved = true;
        assert_eq!(slot.state(), SlotState::Reserved);
    }
}
