//! Staff profile, shifts and attendance records.
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A scheduled shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: u64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Shift {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockMode {
    ClockIn,
    ClockOut,
    #[serde(other)]
    Other,
}

/// One attendance record. A shift may have several (clock in, clock out, absence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub staff_shift_id: u64,
    /// `present` or `absent`.
    pub status: String,
    #[serde(default)]
    pub mode: Option<ClockMode>,
    #[serde(default)]
    pub late_minutes: Option<u32>,
    #[serde(default)]
    pub early_minutes: Option<u32>,
    #[serde(default, deserialize_with = "flag")]
    pub late_approved: bool,
    #[serde(default, deserialize_with = "flag")]
    pub early_approved: bool,
    #[serde(default, deserialize_with = "flag")]
    pub approved_by_admin: bool,
}

/// The backend sends approval flags as `0` / `1`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(n)) => n == 1,
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_flags_and_mode() {
        let record: AttendanceRecord = serde_json::from_str(
            r#"{"staff_shift_id": 3, "status": "present", "mode": "clock_in",
                "late_minutes": 12, "late_approved": 1, "early_approved": 0,
                "approved_by_admin": null}"#,
        )
        .unwrap();
        assert_eq!(record.mode, Some(ClockMode::ClockIn));
        assert_eq!(record.late_minutes, Some(12));
        assert!(record.late_approved);
        assert!(!record.early_approved);
        assert!(!record.approved_by_admin);
    }

    #[test]
    fn test_shift_times_parse() {
        let shift: Shift = serde_json::from_str(
            r#"{"id": 1, "date": "2024-05-06", "start_time": "09:00:00", "end_time": "17:30:00"}"#,
        )
        .unwrap();
        assert_eq!(shift.ends_at() - shift.starts_at(), chrono::Duration::minutes(510));
    }
}
