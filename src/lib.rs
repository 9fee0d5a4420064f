//! A platform-agnostic driver for the NXP PCF8523 real-time clock.
//!
//! The PCF8523 is a battery-backed RTC addressed over I2C. It keeps the
//! date and time in seven BCD-encoded registers, switches to a backup
//! battery when the main supply drops, and latches a flag when that
//! switch-over happens. This crate translates between host-side time
//! representations (a Unix epoch count, chrono's [`NaiveDateTime`], or a
//! broken-down [`CalendarTime`]) and the device's packed register layout,
//! and exposes the power-management status bits.
//!
//! The driver is `no_std` and bus-agnostic: it consumes any
//! `embedded_hal::i2c::I2c` implementation (or the `embedded-hal-async`
//! equivalent with the `async` feature; see [`asynch`]). The I2C bus clock
//! speed is owned by the HAL that constructs the bus, not by this driver.
//!
//! # Features
//!
//! - `async`: async driver in the [`asynch`] module
//! - `log`: debug/error logging via the `log` crate
//! - `defmt`: debug/error logging and `defmt::Format` impls via `defmt`
//!
//! # Example
//!
//! ```rust,ignore
//! use pcf8523::{Config, Pcf8523, DEFAULT_ADDRESS};
//!
//! let mut rtc = Pcf8523::new(i2c, DEFAULT_ADDRESS);
//!
//! // Check for a power event before trusting the clock, then configure
//! // power management (the switch-over flag survives configuration).
//! if rtc.switchover_occurred()? {
//!     // clock contents may date from before the power loss
//! }
//! rtc.configure(&Config::default())?;
//!
//! rtc.set_time(1_664_506_805)?; // 2022-09-30 03:00:05 UTC
//! let now = rtc.calendar_time()?;
//! let (time, date) = pcf8523::display::render(&now);
//! ```

#![no_std]

use chrono::{DateTime, NaiveDateTime, Utc};
use embedded_hal::i2c::I2c;
use paste::paste;

cfg_if::cfg_if! {
    if #[cfg(feature = "log")] {
        macro_rules! debug {
            ($($arg:tt)*) => { ::log::debug!($($arg)*) };
        }
        macro_rules! error {
            ($($arg:tt)*) => { ::log::error!($($arg)*) };
        }
    } else if #[cfg(feature = "defmt")] {
        macro_rules! debug {
            ($($arg:tt)*) => { ::defmt::debug!($($arg)*) };
        }
        macro_rules! error {
            ($($arg:tt)*) => { ::defmt::error!($($arg)*) };
        }
    } else {
        macro_rules! debug {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! error {
            ($($arg:tt)*) => {{}};
        }
    }
}

#[cfg(feature = "async")]
pub mod asynch;
pub mod calendar;
mod datetime;
pub mod display;
mod registers;

pub use crate::calendar::CalendarTime;
pub(crate) use crate::datetime::Pcf8523DateTime;
pub use crate::datetime::Pcf8523DateTimeError;
pub use crate::registers::*;

/// Default I2C address of the PCF8523.
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Power-management configuration applied by [`Pcf8523::configure`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Battery switch-over / battery low detection mode (Control_3)
    pub power_mode: PowerMode,
}

impl Default for Config {
    /// Standard switch-over mode with battery low detection disabled.
    fn default() -> Self {
        Config {
            power_mode: PowerMode::Standard,
        }
    }
}

/// Errors returned by the PCF8523 driver.
#[derive(Debug)]
pub enum Pcf8523Error<I2CE> {
    /// An I2C bus transfer failed. Propagated verbatim and never retried;
    /// a failure during the 7-byte time write can leave the device holding
    /// a mix of old and new time, and recovery is the caller's decision.
    I2c(I2CE),
    /// A date/time value could not be converted or validated
    DateTime(Pcf8523DateTimeError),
}

impl<I2CE> From<I2CE> for Pcf8523Error<I2CE> {
    fn from(e: I2CE) -> Self {
        Pcf8523Error::I2c(e)
    }
}

/// PCF8523 Real-Time Clock driver.
///
/// Every operation is a blocking call chain down to the bus; the driver
/// holds no state beyond the bus handle and device address. Callers that
/// share the bus across contexts must serialize access themselves.
pub struct Pcf8523<I2C: I2c> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Pcf8523<I2C> {
    /// Creates a new PCF8523 driver instance.
    ///
    /// # Arguments
    /// * `i2c` - The I2C bus implementation
    /// * `address` - The I2C address of the device (typically [`DEFAULT_ADDRESS`])
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Configures battery power management (Control_3).
    ///
    /// Writes the configured power mode into the mode selector bits. If the
    /// switch-over flag is currently set, the written byte keeps it set:
    /// configuring the device never destroys the evidence that a power
    /// event occurred before a caller has had the chance to observe it.
    /// Clearing the flag is left to an explicit [`set_control_3`] write.
    ///
    /// [`set_control_3`]: Self::set_control_3
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(Pcf8523Error)` on error
    pub fn configure(&mut self, config: &Config) -> Result<(), Pcf8523Error<I2C::Error>> {
        let occurred = self.switchover_occurred()?;
        let mut control = Control3::default();
        control.set_power_mode(config.power_mode);
        if occurred {
            control.set_battery_switchover_flag(true);
        }
        debug!("control_3: {:?}", control);
        self.set_control_3(control)?;
        Ok(())
    }

    /// Returns whether a battery switch-over event has occurred since the
    /// flag was last cleared.
    ///
    /// Typically queried once at startup, before the clock contents are
    /// trusted.
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether the switch-over flag is set
    /// * `Err(Pcf8523Error)` on error
    pub fn switchover_occurred(&mut self) -> Result<bool, Pcf8523Error<I2C::Error>> {
        Ok(self.control_3()?.battery_switchover_flag())
    }

    /// Returns whether the backup battery is low (read-only hardware flag).
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether the battery low flag is set
    /// * `Err(Pcf8523Error)` on error
    pub fn battery_low(&mut self) -> Result<bool, Pcf8523Error<I2C::Error>> {
        Ok(self.control_3()?.battery_low_flag())
    }

    /// Returns whether the oscillator has stopped since the flag was last
    /// cleared, in which case the time value is not reliable.
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether the oscillator stop flag is set
    /// * `Err(Pcf8523Error)` on error
    pub fn oscillator_stopped(&mut self) -> Result<bool, Pcf8523Error<I2C::Error>> {
        Ok(self.second()?.oscillator_stop_flag())
    }

    /// Reads the raw datetime registers from the device.
    fn read_raw_datetime(&mut self) -> Result<Pcf8523DateTime, Pcf8523Error<I2C::Error>> {
        let mut data = [0; 7];
        self.i2c
            .write_read(self.address, &[RegAddr::Seconds as u8], &mut data)?;
        Ok(data.into())
    }

    /// Writes raw datetime values to the device registers.
    fn write_raw_datetime(
        &mut self,
        datetime: &Pcf8523DateTime,
    ) -> Result<(), Pcf8523Error<I2C::Error>> {
        let data: [u8; 7] = datetime.into();
        self.i2c.write(
            self.address,
            &[
                RegAddr::Seconds as u8,
                data[0],
                data[1],
                data[2],
                data[3],
                data[4],
                data[5],
                data[6],
            ],
        )?;
        Ok(())
    }

    /// Gets the current date and time from the device.
    ///
    /// Performs a single 7-byte burst read starting at the seconds
    /// register.
    ///
    /// # Returns
    /// * `Ok(NaiveDateTime)` - The current date and time (UTC)
    /// * `Err(Pcf8523Error)` on error
    pub fn datetime(&mut self) -> Result<NaiveDateTime, Pcf8523Error<I2C::Error>> {
        let raw = self.read_raw_datetime()?;
        raw.into_datetime().map_err(Pcf8523Error::DateTime)
    }

    /// Sets the current date and time on the device.
    ///
    /// Performs a single 7-byte burst write starting at the seconds
    /// register. The write is not atomic on the device side; if the bus
    /// fails partway the device may hold a mix of old and new time, and
    /// the error is surfaced without any repair attempt.
    ///
    /// # Arguments
    /// * `datetime` - The date and time to set (UTC, year 2000-2099)
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(Pcf8523Error)` on error
    pub fn set_datetime(
        &mut self,
        datetime: &NaiveDateTime,
    ) -> Result<(), Pcf8523Error<I2C::Error>> {
        let raw = Pcf8523DateTime::from_datetime(datetime).map_err(Pcf8523Error::DateTime)?;
        self.write_raw_datetime(&raw)?;
        Ok(())
    }

    /// Sets the clock from a Unix epoch value (seconds since
    /// 1970-01-01T00:00:00 UTC).
    ///
    /// # Arguments
    /// * `epoch` - Seconds since the Unix epoch; must fall in 2000-2099
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(Pcf8523Error::DateTime)` if the value is not representable
    /// * `Err(Pcf8523Error::I2c)` on bus error
    pub fn set_time(&mut self, epoch: i64) -> Result<(), Pcf8523Error<I2C::Error>> {
        let datetime = DateTime::<Utc>::from_timestamp(epoch, 0)
            .ok_or(Pcf8523Error::DateTime(Pcf8523DateTimeError::InvalidDateTime))?
            .naive_utc();
        self.set_datetime(&datetime)
    }

    /// Reads the clock as a Unix epoch value (seconds since
    /// 1970-01-01T00:00:00 UTC).
    ///
    /// # Returns
    /// * `Ok(i64)` - The current time as an epoch count
    /// * `Err(Pcf8523Error)` on error
    pub fn time(&mut self) -> Result<i64, Pcf8523Error<I2C::Error>> {
        Ok(self.datetime()?.and_utc().timestamp())
    }

    /// Reads the clock as a broken-down [`CalendarTime`], with the weekday
    /// and 0-based day-of-year derived from the date.
    ///
    /// # Returns
    /// * `Ok(CalendarTime)` - The current broken-down time
    /// * `Err(Pcf8523Error)` on error
    pub fn calendar_time(&mut self) -> Result<CalendarTime, Pcf8523Error<I2C::Error>> {
        Ok(self.datetime()?.into())
    }
}

// Register access implementations
macro_rules! impl_register_access {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+) => {
        impl<I2C: I2c> Pcf8523<I2C> {
            $(
                paste! {
                    #[doc = concat!("Gets the value of the ", stringify!($name), " register.")]
                    #[doc = "\n\n# Returns"]
                    #[doc = concat!("* `Ok(", stringify!($typ), ")` - The register value on success")]
                    #[doc = "* `Err(Pcf8523Error)` on error"]
                    pub fn $name(&mut self) -> Result<$typ, Pcf8523Error<I2C::Error>> {
                        let mut data = [0];
                        self.i2c
                            .write_read(self.address, &[$regaddr as u8], &mut data)?;
                        Ok($typ(data[0]))
                    }

                    #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                    #[doc = "\n\n# Arguments"]
                    #[doc = concat!("* `value` - The value to write to the ", stringify!($name), " register")]
                    #[doc = "\n\n# Returns"]
                    #[doc = "* `Ok(())` on success"]
                    #[doc = "* `Err(Pcf8523Error)` on error"]
                    pub fn [<set_ $name>](&mut self, value: $typ) -> Result<(), Pcf8523Error<I2C::Error>> {
                        self.i2c.write(
                            self.address,
                            &[$regaddr as u8, value.into()],
                        )?;
                        Ok(())
                    }
                }
            )+
        }
    }
}

impl_register_access!(
    (control_1, RegAddr::Control1, Control1),
    (control_2, RegAddr::Control2, Control2),
    (control_3, RegAddr::Control3, Control3),
    (second, RegAddr::Seconds, Seconds),
    (minute, RegAddr::Minutes, Minutes),
    (hour, RegAddr::Hours, Hours),
    (day, RegAddr::Days, Days),
    (weekday, RegAddr::Weekdays, Weekdays),
    (month, RegAddr::Months, Months),
    (year, RegAddr::Years, Years)
);
