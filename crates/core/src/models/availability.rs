use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

use crate::{
    errors::ClinicError,
    ids::{FacilityId, ResourceId},
    models::time_slot::SlotKind,
};

/// Days of the week on which an availability window recurs.
///
/// Stored as text. Numeric tokens count from Sunday (`1` = Sunday,
/// `7` = Saturday); names may be short (`Mon`) or full (`Monday`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdaySet(u8);

const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

const NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

impl WeekdaySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0b111_1111)
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_sunday()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Member days in Sunday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.iter().copied().filter(|day| self.contains(*day))
    }

    fn parse_token(token: &str) -> Result<Weekday, ClinicError> {
        if let Ok(n) = token.parse::<usize>() {
            return match n {
                1..=7 => Ok(WEEK[n - 1]),
                _ => Err(ClinicError::Validation(format!(
                    "weekday number must be 1 (Sunday) to 7 (Saturday), got {}",
                    n
                ))),
            };
        }

        let lower = token.to_ascii_lowercase();
        NAMES
            .iter()
            .position(|name| lower.len() >= 3 && name.starts_with(lower.as_str()))
            .map(|idx| WEEK[idx])
            .ok_or_else(|| ClinicError::Validation(format!("unknown weekday: {:?}", token)))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl FromStr for WeekdaySet {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(WeekdaySet::parse_token)
            .collect()
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|day| day.to_string()).collect();
        write!(f, "{}", names.join(","))
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// A recurring block of time during which a resource can be booked.
///
/// Owned and edited by facility management; the slot generator only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub id: i64,
    pub resource_id: ResourceId,
    pub facility_id: Option<FacilityId>,
    pub start_date: NaiveDate,
    /// Inclusive; `None` leaves the window open-ended.
    pub end_date: Option<NaiveDate>,
    pub week_days: WeekdaySet,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Minutes per consultation slot.
    pub consultation_duration: i32,
    /// Minutes per follow-up slot.
    pub followup_duration: i32,
    /// Recorded only; slot generation ignores it.
    pub is_recurring: bool,
}

impl AvailabilityWindow {
    /// Slot length in minutes for the requested kind of appointment.
    pub fn duration_for(&self, kind: SlotKind) -> i32 {
        match kind {
            SlotKind::Consultation => self.consultation_duration,
            SlotKind::Followup => self.followup_duration,
        }
    }

    /// Whether `date` falls inside `[start_date, end_date]`.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.is_none_or(|end| date <= end)
    }

    pub fn recurs_on(&self, date: NaiveDate) -> bool {
        self.week_days.contains(date.weekday())
    }
}
