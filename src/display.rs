//! Fixed-width ASCII rendering of clock and date values.
//!
//! Pure formatting over an already-decoded [`CalendarTime`]; no device I/O
//! happens here. Every field is zero-padded to exactly two digits, which
//! keeps the output suitable for fixed-column diagnostic displays.

use core::fmt::Write;

use heapless::String;

use crate::calendar::CalendarTime;

/// Length of the rendered time string, `"HH:MM:SS"`.
pub const TIME_TEXT_LEN: usize = 8;
/// Length of the rendered date string, `"DD/MM/YY"`.
pub const DATE_TEXT_LEN: usize = 8;

/// Renders the time of day as `"HH:MM:SS"` (24-hour convention).
pub fn time_text(time: &CalendarTime) -> String<TIME_TEXT_LEN> {
    let mut text = String::new();
    // "HH:MM:SS" is exactly TIME_TEXT_LEN bytes, the buffer cannot overflow
    write!(
        text,
        "{:02}:{:02}:{:02}",
        time.hour, time.minute, time.second
    )
    .ok();
    text
}

/// Renders the date as `"DD/MM/YY"`, the year cropped to its final two
/// digits (the same two digits the device stores in BCD).
pub fn date_text(time: &CalendarTime) -> String<DATE_TEXT_LEN> {
    let mut text = String::new();
    write!(
        text,
        "{:02}/{:02}/{:02}",
        time.day,
        time.month,
        time.year.rem_euclid(100)
    )
    .ok();
    text
}

/// Renders both the time and date strings for a calendar value.
pub fn render(time: &CalendarTime) -> (String<TIME_TEXT_LEN>, String<DATE_TEXT_LEN>) {
    (time_text(time), date_text(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> CalendarTime {
        CalendarTime::from(
            NaiveDate::from_ymd_opt(year, month, day)
                .unwrap()
                .and_hms_opt(hour, minute, second)
                .unwrap(),
        )
    }

    #[test]
    fn test_time_text_zero_pads_single_digits() {
        let time = calendar(2022, 9, 30, 5, 30, 9);
        assert_eq!(time_text(&time).as_str(), "05:30:09");
    }

    #[test]
    fn test_time_text_two_digit_fields() {
        let time = calendar(2022, 9, 30, 23, 5, 0);
        assert_eq!(time_text(&time).as_str(), "23:05:00");
    }

    #[test]
    fn test_date_text() {
        let time = calendar(2022, 9, 30, 3, 0, 5);
        assert_eq!(date_text(&time).as_str(), "30/09/22");

        // Year 2000 renders as "00", single-digit day and month keep their
        // leading zeros
        let time = calendar(2000, 1, 1, 0, 0, 0);
        assert_eq!(date_text(&time).as_str(), "01/01/00");

        let time = calendar(2099, 12, 31, 23, 59, 59);
        assert_eq!(date_text(&time).as_str(), "31/12/99");
    }

    #[test]
    fn test_render_pair() {
        let time = calendar(2022, 9, 30, 3, 0, 5);
        let (tstr, dstr) = render(&time);
        assert_eq!(tstr.as_str(), "03:00:05");
        assert_eq!(dstr.as_str(), "30/09/22");
    }
}
