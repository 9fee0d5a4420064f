//! Async implementation of the PCF8523 driver.
//!
//! This module provides an async interface to the PCF8523 RTC device using
//! `embedded-hal-async` traits. It is only available when the `async`
//! feature is enabled.
//!
//! # Example
//!
//! ```rust,ignore
//! use pcf8523::asynch::Pcf8523;
//!
//! // Initialize device
//! let mut rtc = Pcf8523::new(i2c, 0x68);
//!
//! // Configure power management asynchronously
//! rtc.configure(&config).await?;
//!
//! // Get current date/time asynchronously
//! let datetime = rtc.datetime().await?;
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use embedded_hal_async::i2c::I2c;
use paste::paste;

use crate::{
    CalendarTime, Config, Control1, Control2, Control3, Days, Hours, Minutes, Months,
    Pcf8523DateTime, Pcf8523DateTimeError, Pcf8523Error, RegAddr, Seconds, Weekdays, Years,
};

/// PCF8523 Real-Time Clock async driver.
///
/// This struct provides the async interface to the PCF8523 RTC device.
/// It supports async I2C operations through the `embedded-hal-async` traits.
pub struct Pcf8523<I2C: I2c> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Pcf8523<I2C> {
    /// Creates a new PCF8523 async driver instance.
    ///
    /// # Arguments
    /// * `i2c` - The async I2C bus implementation
    /// * `address` - The I2C address of the device (typically 0x68)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Configures battery power management (Control_3).
    ///
    /// Writes the configured power mode into the mode selector bits. If the
    /// switch-over flag is currently set, the written byte keeps it set so
    /// the evidence of a power event is not lost before a caller observes
    /// it.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(Pcf8523Error)` on error
    pub async fn configure(&mut self, config: &Config) -> Result<(), Pcf8523Error<I2C::Error>> {
        let occurred = self.switchover_occurred().await?;
        let mut control = Control3::default();
        control.set_power_mode(config.power_mode);
        if occurred {
            control.set_battery_switchover_flag(true);
        }
        self.set_control_3(control).await?;
        Ok(())
    }

    /// Returns whether a battery switch-over event has occurred since the
    /// flag was last cleared.
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether the switch-over flag is set
    /// * `Err(Pcf8523Error)` on error
    pub async fn switchover_occurred(&mut self) -> Result<bool, Pcf8523Error<I2C::Error>> {
        Ok(self.control_3().await?.battery_switchover_flag())
    }

    /// Returns whether the backup battery is low (read-only hardware flag).
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether the battery low flag is set
    /// * `Err(Pcf8523Error)` on error
    pub async fn battery_low(&mut self) -> Result<bool, Pcf8523Error<I2C::Error>> {
        Ok(self.control_3().await?.battery_low_flag())
    }

    /// Returns whether the oscillator has stopped since the flag was last
    /// cleared, in which case the time value is not reliable.
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether the oscillator stop flag is set
    /// * `Err(Pcf8523Error)` on error
    pub async fn oscillator_stopped(&mut self) -> Result<bool, Pcf8523Error<I2C::Error>> {
        Ok(self.second().await?.oscillator_stop_flag())
    }

    /// Reads the raw datetime registers from the device.
    async fn read_raw_datetime(&mut self) -> Result<Pcf8523DateTime, Pcf8523Error<I2C::Error>> {
        let mut data = [0; 7];
        self.i2c
            .write_read(self.address, &[RegAddr::Seconds as u8], &mut data)
            .await?;
        Ok(data.into())
    }

    /// Writes raw datetime values to the device registers.
    async fn write_raw_datetime(
        &mut self,
        datetime: &Pcf8523DateTime,
    ) -> Result<(), Pcf8523Error<I2C::Error>> {
        let data: [u8; 7] = datetime.into();
        self.i2c
            .write(
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
            )
            .await?;
        Ok(())
    }

    /// Gets the current date and time from the device.
    ///
    /// # Returns
    /// * `Ok(NaiveDateTime)` - The current date and time (UTC)
    /// * `Err(Pcf8523Error)` on error
    pub async fn datetime(&mut self) -> Result<NaiveDateTime, Pcf8523Error<I2C::Error>> {
        let raw = self.read_raw_datetime().await?;
        raw.into_datetime().map_err(Pcf8523Error::DateTime)
    }

    /// Sets the current date and time on the device.
    ///
    /// The 7-byte burst write is not atomic on the device side; a bus
    /// failure partway through can leave a mix of old and new time, and the
    /// error is surfaced without any repair attempt.
    ///
    /// # Arguments
    /// * `datetime` - The date and time to set (UTC, year 2000-2099)
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(Pcf8523Error)` on error
    pub async fn set_datetime(
        &mut self,
        datetime: &NaiveDateTime,
    ) -> Result<(), Pcf8523Error<I2C::Error>> {
        let raw = Pcf8523DateTime::from_datetime(datetime).map_err(Pcf8523Error::DateTime)?;
        self.write_raw_datetime(&raw).await?;
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
    pub async fn set_time(&mut self, epoch: i64) -> Result<(), Pcf8523Error<I2C::Error>> {
        let datetime = DateTime::<Utc>::from_timestamp(epoch, 0)
            .ok_or(Pcf8523Error::DateTime(Pcf8523DateTimeError::InvalidDateTime))?
            .naive_utc();
        self.set_datetime(&datetime).await
    }

    /// Reads the clock as a Unix epoch value (seconds since
    /// 1970-01-01T00:00:00 UTC).
    ///
    /// # Returns
    /// * `Ok(i64)` - The current time as an epoch count
    /// * `Err(Pcf8523Error)` on error
    pub async fn time(&mut self) -> Result<i64, Pcf8523Error<I2C::Error>> {
        Ok(self.datetime().await?.and_utc().timestamp())
    }

    /// Reads the clock as a broken-down [`CalendarTime`], with the weekday
    /// and 0-based day-of-year derived from the date.
    ///
    /// # Returns
    /// * `Ok(CalendarTime)` - The current broken-down time
    /// * `Err(Pcf8523Error)` on error
    pub async fn calendar_time(&mut self) -> Result<CalendarTime, Pcf8523Error<I2C::Error>> {
        Ok(self.datetime().await?.into())
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
                    pub async fn $name(&mut self) -> Result<$typ, Pcf8523Error<I2C::Error>> {
                        let mut data = [0];
                        self.i2c
                            .write_read(self.address, &[$regaddr as u8], &mut data)
                            .await?;
                        Ok($typ(data[0]))
                    }

                    #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                    #[doc = "\n\n# Arguments"]
                    #[doc = concat!("* `value` - The value to write to the ", stringify!($name), " register")]
                    #[doc = "\n\n# Returns"]
                    #[doc = "* `Ok(())` on success"]
                    #[doc = "* `Err(Pcf8523Error)` on error"]
                    pub async fn [<set_ $name>](&mut self, value: $typ) -> Result<(), Pcf8523Error<I2C::Error>> {
                        self.i2c.write(
                            self.address,
                            &[$regaddr as u8, value.into()],
                        ).await?;
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
