//! # Shift Summaries
//!
//! Pure transforms over a staff member's shifts and attendance records: the labels,
//! countdowns and counters shown on the dashboard and the "my shifts" list.
//!
//! Every function takes `now` explicitly; nothing here reads the clock.

use crate::model::{AttendanceRecord, ClockMode, Shift};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Length of a shift: `"7h 30m"`, or `"45m"` under an hour.
pub fn shift_duration(start: NaiveTime, end: NaiveTime) -> String {
    let minutes = (end - start).num_minutes();
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// What the attendance records say about one shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceState {
    Present,
    Absent,
    /// Both present and absent records exist.
    Partial,
    /// Records exist, but none is present or absent.
    Unknown,
    NoRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSummary {
    pub state: AttendanceState,
    pub clock_in: Option<AttendanceRecord>,
    pub clock_out: Option<AttendanceRecord>,
    /// From the clock-in record.
    pub late_minutes: u32,
    /// From the clock-out record.
    pub early_minutes: u32,
    pub late_approved: bool,
    pub early_approved: bool,
    pub absence_approved: bool,
}

impl AttendanceSummary {
    fn none() -> Self {
        Self {
            state: AttendanceState::NoRecord,
            clock_in: None,
            clock_out: None,
            late_minutes: 0,
            early_minutes: 0,
            late_approved: false,
            early_approved: false,
            absence_approved: false,
        }
    }
}

/// Folds every record of `shift_id` into one summary.
pub fn attendance_status(shift_id: u64, records: &[AttendanceRecord]) -> AttendanceSummary {
    let records: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.staff_shift_id == shift_id)
        .collect();
    if records.is_empty() {
        return AttendanceSummary::none();
    }

    let present = records.iter().any(|r| r.status == "present");
    let absent = records.iter().any(|r| r.status == "absent");
    let state = match (present, absent) {
        (true, false) => AttendanceState::Present,
        (false, true) => AttendanceState::Absent,
        (true, true) => AttendanceState::Partial,
        (false, false) => AttendanceState::Unknown,
    };

    let find_mode = |mode: ClockMode| records.iter().find(|r| r.mode == Some(mode)).map(|r| (*r).clone());
    let clock_in = find_mode(ClockMode::ClockIn);
    let clock_out = find_mode(ClockMode::ClockOut);

    AttendanceSummary {
        state,
        late_minutes: clock_in.as_ref().and_then(|r| r.late_minutes).unwrap_or(0),
        early_minutes: clock_out.as_ref().and_then(|r| r.early_minutes).unwrap_or(0),
        clock_in,
        clock_out,
        late_approved: records.iter().any(|r| r.late_approved),
        early_approved: records.iter().any(|r| r.early_approved),
        absence_approved: records.iter().any(|r| r.approved_by_admin),
    }
}

/// The badge shown next to a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftLabel {
    Present,
    Absent,
    ApprovedAbsence,
    Partial,
    NoRecord,
    Today,
    Upcoming,
}

impl fmt::Display for ShiftLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShiftLabel::Present => "Present",
            ShiftLabel::Absent => "Absent",
            ShiftLabel::ApprovedAbsence => "Approved Absence",
            ShiftLabel::Partial => "Partial",
            ShiftLabel::NoRecord => "No Record",
            ShiftLabel::Today => "Today",
            ShiftLabel::Upcoming => "Upcoming",
        })
    }
}

/// Past shifts are labelled by attendance; others by whether they are today.
pub fn shift_label(shift: &Shift, attendance: &AttendanceSummary, now: NaiveDateTime) -> ShiftLabel {
    if shift.ends_at() < now {
        return match attendance.state {
            AttendanceState::Present => ShiftLabel::Present,
            AttendanceState::Absent if attendance.absence_approved => ShiftLabel::ApprovedAbsence,
            AttendanceState::Absent => ShiftLabel::Absent,
            AttendanceState::Partial => ShiftLabel::Partial,
            AttendanceState::Unknown | AttendanceState::NoRecord => ShiftLabel::NoRecord,
        };
    }
    if shift.date == now.date() {
        ShiftLabel::Today
    } else {
        ShiftLabel::Upcoming
    }
}

/// The earliest shift that starts strictly after `now`.
pub fn nearest_shift(shifts: &[Shift], now: NaiveDateTime) -> Option<&Shift> {
    shifts
        .iter()
        .filter(|s| s.starts_at() > now)
        .min_by_key(|s| s.starts_at())
}

/// Countdown to a shift's start: whole days, else whole hours, else whole minutes.
pub fn time_until(shift: &Shift, now: NaiveDateTime) -> String {
    let diff = shift.starts_at() - now;
    if diff <= Duration::zero() {
        return "Starting soon".to_string();
    }
    let plural = |n: i64, unit: &str| format!("{n} {unit}{}", if n > 1 { "s" } else { "" });

    let hours = diff.num_hours();
    match (hours / 24, hours) {
        (days, _) if days > 0 => plural(days, "day"),
        (_, hours) if hours > 0 => plural(hours, "hour"),
        _ => plural(diff.num_minutes(), "minute"),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftStats {
    /// Shifts dated on or after Sunday of the current week.
    pub this_week: usize,
    /// Shifts dated on or after the 1st of the current month.
    pub this_month: usize,
    /// Shifts with at least one attendance record.
    pub completed: usize,
    /// Shifts with at least one present record.
    pub present: usize,
    /// Shifts with at least one absent record.
    pub absent: usize,
    pub total: usize,
}

pub fn shift_stats(shifts: &[Shift], attendance: &[AttendanceRecord], now: NaiveDateTime) -> ShiftStats {
    let today = now.date();
    let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    let month_start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);

    let has_record = |shift: &Shift, status: Option<&str>| {
        attendance
            .iter()
            .any(|r| r.staff_shift_id == shift.id && status.map_or(true, |s| r.status == s))
    };

    ShiftStats {
        this_week: shifts.iter().filter(|s| s.date >= week_start).count(),
        this_month: shifts.iter().filter(|s| s.date >= month_start).count(),
        completed: shifts.iter().filter(|s| has_record(s, None)).count(),
        present: shifts.iter().filter(|s| has_record(s, Some("present"))).count(),
        absent: shifts.iter().filter(|s| has_record(s, Some("absent"))).count(),
        total: shifts.len(),
    }
}

/// Shifts ordered by start, earliest first.
pub fn sorted_by_start(shifts: &[Shift]) -> Vec<Shift> {
    let mut sorted = shifts.to_vec();
    sorted.sort_by_key(Shift::starts_at);
    sorted
}
