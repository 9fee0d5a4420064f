//! Calendar arithmetic and the broken-down time representation.
//!
//! The PCF8523 does not store a day-of-year; it is always recomputed here
//! from (year, month, day) so the two can never disagree. Daylight saving
//! time is never observed by this crate.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Cumulative day counts at the start of each month, for non-leap and leap
/// years.
const CUMULATIVE_DAYS: [[u16; 12]; 2] = [
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334],
    [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335],
];

/// Returns whether `year` is a leap year under the Gregorian rule.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns the 0-based day-of-year index for a date.
///
/// `month` is 0-based (0=January..11=December), `day` is 1-based.
///
/// # Panics
/// Panics if `month` is greater than 11.
pub const fn day_of_year(month: u32, day: u32, year: i32) -> u16 {
    let leap = is_leap_year(year) as usize;
    CUMULATIVE_DAYS[leap][month as usize] + day as u16 - 1
}

/// Broken-down calendar time as handed out by the driver.
///
/// All fields are plain decoded values; `weekday` and `day_of_year` are
/// derived from the date, never read from the device.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalendarTime {
    /// Full Gregorian year (2000-2099 when read from the device)
    pub year: i32,
    /// Month of the year (1-12)
    pub month: u8,
    /// Day of the month (1-31)
    pub day: u8,
    /// Hour of the day (0-23, 24-hour convention)
    pub hour: u8,
    /// Minute of the hour (0-59)
    pub minute: u8,
    /// Second of the minute (0-59)
    pub second: u8,
    /// Day of the week (0=Sunday..6=Saturday)
    pub weekday: u8,
    /// 0-based day of the year, consistent with (year, month, day)
    pub day_of_year: u16,
}

impl From<NaiveDateTime> for CalendarTime {
    fn from(dt: NaiveDateTime) -> Self {
        CalendarTime {
            year: dt.year(),
            month: dt.month() as u8,
            day: dt.day() as u8,
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            second: dt.second() as u8,
            weekday: dt.weekday().num_days_from_sunday() as u8,
            day_of_year: day_of_year(dt.month0(), dt.day(), dt.year()),
        }
    }
}
