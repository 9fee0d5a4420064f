//! `DateTime` conversion and register utilities for the PCF8523 RTC.
//!
//! This module provides the internal representation and conversion logic for the PCF8523's date and time registers.
//! It enables safe, validated conversion between the PCF8523's BCD-encoded registers and chrono's `NaiveDateTime`.
//!
//! # Features
//!
//! - Conversion to/from chrono `NaiveDateTime`
//! - Error handling for invalid or out-of-range values
//!
//! # Register Model
//!
//! The PCF8523 stores date and time in 7 consecutive registers:
//! - Seconds, Minutes, Hours, Days, Weekdays, Months, Years
//!
//! The weekday is stored raw (0=Sunday..6=Saturday); everything else is BCD.
//! The seconds register shares its byte with the oscillator stop flag, which
//! is never part of the decoded time value.
//!
//! # Error Handling
//!
//! Conversion errors are reported via [`Pcf8523DateTimeError`].

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::{Days, Hours, Minutes, Months, Seconds, Weekdays, Years};

/// Internal representation of the PCF8523 RTC date and time.
///
/// This struct models the 7 date/time registers of the PCF8523, using strongly-typed bitfield wrappers for each field.
/// It is used for register-level I/O and conversion to/from chrono's `NaiveDateTime`.
///
/// Values are always validated and encoded/decoded as BCD (weekday excepted).
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Pcf8523DateTime {
    seconds: Seconds,
    minutes: Minutes,
    hours: Hours,
    days: Days,
    weekdays: Weekdays,
    months: Months,
    years: Years,
}

impl Pcf8523DateTime {
    /// Helper function to convert a number to BCD format with validation
    pub(crate) fn make_bcd(value: u32, max_value: u32) -> Result<(u8, u8), Pcf8523DateTimeError> {
        if value > max_value {
            return Err(Pcf8523DateTimeError::InvalidDateTime);
        }
        let ones = u8::try_from(value % 10).map_err(|_| Pcf8523DateTimeError::InvalidDateTime)?;
        let tens = u8::try_from(value / 10).map_err(|_| Pcf8523DateTimeError::InvalidDateTime)?;
        Ok((ones, tens))
    }

    fn convert_seconds(seconds: u32) -> Result<Seconds, Pcf8523DateTimeError> {
        let (ones, tens) = Self::make_bcd(seconds, 59)?;
        let mut value = Seconds::default();
        value.set_seconds(ones);
        value.set_ten_seconds(tens);
        Ok(value)
    }

    fn convert_minutes(minutes: u32) -> Result<Minutes, Pcf8523DateTimeError> {
        let (ones, tens) = Self::make_bcd(minutes, 59)?;
        let mut value = Minutes::default();
        value.set_minutes(ones);
        value.set_ten_minutes(tens);
        Ok(value)
    }

    // The device is always operated in 24-hour mode.
    fn convert_hours(hours: u32) -> Result<Hours, Pcf8523DateTimeError> {
        let (ones, tens) = Self::make_bcd(hours, 23)?;
        let mut value = Hours::default();
        value.set_hours(ones);
        value.set_ten_hours(tens);
        Ok(value)
    }

    fn convert_days(days: u32) -> Result<Days, Pcf8523DateTimeError> {
        let (ones, tens) = Self::make_bcd(days, 31)?;
        let mut value = Days::default();
        value.set_days(ones);
        value.set_ten_days(tens);
        Ok(value)
    }

    fn convert_weekdays(weekday: u32) -> Result<Weekdays, Pcf8523DateTimeError> {
        if weekday > 6 {
            return Err(Pcf8523DateTimeError::InvalidDateTime);
        }
        let mut value = Weekdays::default();
        value.set_weekdays(
            u8::try_from(weekday).map_err(|_| Pcf8523DateTimeError::InvalidDateTime)?,
        );
        Ok(value)
    }

    fn convert_months(months: u32) -> Result<Months, Pcf8523DateTimeError> {
        let (ones, tens) = Self::make_bcd(months, 12)?;
        let mut value = Months::default();
        value.set_months(ones);
        value.set_ten_months(tens);
        Ok(value)
    }

    fn convert_years(year: i32) -> Result<Years, Pcf8523DateTimeError> {
        if year > 2099 {
            error!("Year {} is too late! must be before 2100", year);
            return Err(Pcf8523DateTimeError::YearNotBefore2100);
        }
        if year < 2000 {
            error!("Year {} is too early! must be greater than 1999", year);
            return Err(Pcf8523DateTimeError::YearNotAfter1999);
        }

        let year_offset =
            u8::try_from(year - 2000).map_err(|_| Pcf8523DateTimeError::InvalidDateTime)?;
        let ones = year_offset % 10;
        let tens = year_offset / 10;

        let mut value = Years::default();
        value.set_years(ones);
        value.set_ten_years(tens);
        Ok(value)
    }

    pub(crate) fn from_datetime(datetime: &NaiveDateTime) -> Result<Self, Pcf8523DateTimeError> {
        let seconds = Self::convert_seconds(datetime.second())?;
        let minutes = Self::convert_minutes(datetime.minute())?;
        let hours = Self::convert_hours(datetime.hour())?;
        let days = Self::convert_days(datetime.day())?;
        let weekdays = Self::convert_weekdays(datetime.weekday().num_days_from_sunday())?;
        let months = Self::convert_months(datetime.month())?;
        let years = Self::convert_years(datetime.year())?;

        let raw = Pcf8523DateTime {
            seconds,
            minutes,
            hours,
            days,
            weekdays,
            months,
            years,
        };

        debug!("raw={:?}", raw);

        Ok(raw)
    }

    pub(crate) fn into_datetime(self) -> Result<NaiveDateTime, Pcf8523DateTimeError> {
        // The bitfield getters apply each field's mask, so the oscillator
        // stop flag in the seconds byte never reaches the decoded value.
        let seconds =
            10 * u32::from(self.seconds.ten_seconds()) + u32::from(self.seconds.seconds());
        let minutes =
            10 * u32::from(self.minutes.ten_minutes()) + u32::from(self.minutes.minutes());
        let hours = 10 * u32::from(self.hours.ten_hours()) + u32::from(self.hours.hours());

        let year = 2000_i32
            + i32::from(10 * self.years.ten_years() + self.years.years());
        let month = 10 * u32::from(self.months.ten_months()) + u32::from(self.months.months());
        let day = 10 * u32::from(self.days.ten_days()) + u32::from(self.days.days());

        // The stored weekday is not consulted: chrono derives it from the
        // date, which keeps a device holding an inconsistent weekday from
        // corrupting the result.
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hours, minutes, seconds))
            .ok_or(Pcf8523DateTimeError::InvalidDateTime)
    }
}

impl From<[u8; 7]> for Pcf8523DateTime {
    fn from(data: [u8; 7]) -> Self {
        Pcf8523DateTime {
            seconds: Seconds(data[0]),
            minutes: Minutes(data[1]),
            hours: Hours(data[2]),
            days: Days(data[3]),
            weekdays: Weekdays(data[4]),
            months: Months(data[5]),
            years: Years(data[6]),
        }
    }
}

impl From<&Pcf8523DateTime> for [u8; 7] {
    fn from(dt: &Pcf8523DateTime) -> [u8; 7] {
        [
            dt.seconds.0,
            dt.minutes.0,
            dt.hours.0,
            dt.days.0,
            dt.weekdays.0,
            dt.months.0,
            dt.years.0,
        ]
    }
}

#[derive(Debug)]
/// Errors that can occur during PCF8523 date/time conversion or validation.
pub enum Pcf8523DateTimeError {
    /// The provided or decoded date/time is invalid (e.g., out of range, not representable)
    InvalidDateTime,
    /// The year is not before 2100 (PCF8523 only supports years < 2100)
    YearNotBefore2100,
    /// The year is not after 1999 (PCF8523 only supports years >= 2000)
    YearNotAfter1999,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_make_bcd_valid() {
        assert_eq!(Pcf8523DateTime::make_bcd(0, 59).unwrap(), (0, 0));
        assert_eq!(Pcf8523DateTime::make_bcd(9, 59).unwrap(), (9, 0));
        assert_eq!(Pcf8523DateTime::make_bcd(10, 59).unwrap(), (0, 1));
        assert_eq!(Pcf8523DateTime::make_bcd(45, 59).unwrap(), (5, 4));
        assert_eq!(Pcf8523DateTime::make_bcd(59, 59).unwrap(), (9, 5));
    }

    #[test]
    fn test_make_bcd_invalid() {
        // Values exceeding max_value
        assert!(matches!(
            Pcf8523DateTime::make_bcd(60, 59),
            Err(Pcf8523DateTimeError::InvalidDateTime)
        ));
        assert!(matches!(
            Pcf8523DateTime::make_bcd(99, 59),
            Err(Pcf8523DateTimeError::InvalidDateTime)
        ));
        assert!(matches!(
            Pcf8523DateTime::make_bcd(32, 31),
            Err(Pcf8523DateTimeError::InvalidDateTime)
        ));
        assert!(matches!(
            Pcf8523DateTime::make_bcd(13, 12),
            Err(Pcf8523DateTimeError::InvalidDateTime)
        ));
    }

    #[test]
    fn test_from_datetime_and_into_datetime_roundtrip() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap();
        let raw = Pcf8523DateTime::from_datetime(&dt).unwrap();
        let dt2 = raw.into_datetime().unwrap();
        core::assert_eq!(dt, dt2);
    }

    #[test]
    fn test_from_datetime_year_too_early() {
        let dt = NaiveDate::from_ymd_opt(1999, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let err = Pcf8523DateTime::from_datetime(&dt).unwrap_err();
        assert!(matches!(err, Pcf8523DateTimeError::YearNotAfter1999));
    }

    #[test]
    fn test_from_datetime_year_too_late() {
        let dt = NaiveDate::from_ymd_opt(2100, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let err = Pcf8523DateTime::from_datetime(&dt).unwrap_err();
        assert!(matches!(err, Pcf8523DateTimeError::YearNotBefore2100));
    }

    #[test]
    fn test_from_and_into_bcd_array() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap();
        let raw = Pcf8523DateTime::from_datetime(&dt).unwrap();
        let arr: [u8; 7] = (&raw).into();
        let raw2 = Pcf8523DateTime::from(arr);
        let dt2 = raw2.into_datetime().unwrap();
        core::assert_eq!(dt, dt2);
    }

    #[test]
    fn test_known_register_fixture() {
        // 2022-09-30 03:00:05 UTC, a Friday
        let arr = [0x05, 0x00, 0x03, 0x30, 0x05, 0x09, 0x22];
        let raw = Pcf8523DateTime::from(arr);
        let dt = raw.into_datetime().unwrap();
        assert_eq!(dt.year(), 2022);
        assert_eq!(dt.month(), 9);
        assert_eq!(dt.day(), 30);
        assert_eq!(dt.hour(), 3);
        assert_eq!(dt.minute(), 0);
        assert_eq!(dt.second(), 5);
        assert_eq!(dt.weekday().num_days_from_sunday(), 5);

        // And back: identical register bytes, weekday included
        let raw2 = Pcf8523DateTime::from_datetime(&dt).unwrap();
        let arr2: [u8; 7] = (&raw2).into();
        assert_eq!(arr, arr2);
    }

    #[test]
    fn test_oscillator_stop_flag_does_not_corrupt_seconds() {
        // Same fixture with the OS flag raised in the seconds byte
        let arr = [0x85, 0x00, 0x03, 0x30, 0x05, 0x09, 0x22];
        let raw = Pcf8523DateTime::from(arr);
        let dt = raw.into_datetime().unwrap();
        assert_eq!(dt.second(), 5);
        assert_eq!(dt.hour(), 3);
    }

    #[test]
    fn test_invalid_bcd_to_datetime() {
        // Invalid month (0x13 = 13)
        let arr = [0x00, 0x00, 0x00, 0x01, 0x01, 0x13, 0x24];
        let raw = Pcf8523DateTime::from(arr);
        let result = raw.into_datetime();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            Pcf8523DateTimeError::InvalidDateTime
        ));
    }

    #[test]
    fn test_valid_edge_cases() {
        // Maximum valid values
        let dt = NaiveDate::from_ymd_opt(2099, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let result = Pcf8523DateTime::from_datetime(&dt);
        assert!(result.is_ok());

        // Minimum valid values
        let dt = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let result = Pcf8523DateTime::from_datetime(&dt);
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_bcd_values() {
        // Invalid seconds BCD (0x6A decodes to 70)
        let invalid_seconds = Pcf8523DateTime::from([0x6A, 0x00, 0x00, 0x01, 0x01, 0x01, 0x00]);
        assert!(invalid_seconds.into_datetime().is_err());

        // Invalid minutes BCD
        let invalid_minutes = Pcf8523DateTime::from([0x00, 0x6A, 0x00, 0x01, 0x01, 0x01, 0x00]);
        assert!(invalid_minutes.into_datetime().is_err());

        // The 32nd day doesn't exist
        let invalid_days = Pcf8523DateTime::from([0x00, 0x00, 0x00, 0x32, 0x01, 0x01, 0x00]);
        assert!(invalid_days.into_datetime().is_err());
    }

    #[test]
    fn test_leap_year_handling() {
        // Leap year (2024)
        let leap_year_dt = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let raw = Pcf8523DateTime::from_datetime(&leap_year_dt).unwrap();
        let converted_back = raw.into_datetime().unwrap();
        assert_eq!(leap_year_dt, converted_back);

        // Feb 29 does not exist in a non-leap year
        let bad = Pcf8523DateTime::from([0x00, 0x00, 0x00, 0x29, 0x02, 0x02, 0x23]);
        assert!(bad.into_datetime().is_err());

        // Non-leap year boundary
        let non_leap_year_dt = NaiveDate::from_ymd_opt(2023, 2, 28)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let raw = Pcf8523DateTime::from_datetime(&non_leap_year_dt).unwrap();
        let converted_back = raw.into_datetime().unwrap();
        assert_eq!(non_leap_year_dt, converted_back);
    }

    #[test]
    fn test_weekday_conversion() {
        let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(); // Sunday
        let raw = Pcf8523DateTime::from_datetime(&sunday.and_hms_opt(0, 0, 0).unwrap()).unwrap();
        assert_eq!(raw.weekdays.weekdays(), 0); // Sunday = 0 on the PCF8523

        let monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(); // Monday
        let raw = Pcf8523DateTime::from_datetime(&monday.and_hms_opt(0, 0, 0).unwrap()).unwrap();
        assert_eq!(raw.weekdays.weekdays(), 1);

        let saturday = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(); // Saturday
        let raw = Pcf8523DateTime::from_datetime(&saturday.and_hms_opt(0, 0, 0).unwrap()).unwrap();
        assert_eq!(raw.weekdays.weekdays(), 6);
    }

    #[test]
    fn test_error_debug_formatting() {
        extern crate alloc;

        let invalid_error = Pcf8523DateTimeError::InvalidDateTime;
        let debug_str = alloc::format!("{:?}", invalid_error);
        assert!(debug_str.contains("InvalidDateTime"));

        let year_early_error = Pcf8523DateTimeError::YearNotAfter1999;
        let debug_str = alloc::format!("{:?}", year_early_error);
        assert!(debug_str.contains("YearNotAfter1999"));

        let year_late_error = Pcf8523DateTimeError::YearNotBefore2100;
        let debug_str = alloc::format!("{:?}", year_late_error);
        assert!(debug_str.contains("YearNotBefore2100"));
    }
}
