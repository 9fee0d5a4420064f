//! Register definitions and bitfield structures for the PCF8523 RTC.
//!
//! This module contains all register addresses, bitfield definitions, and
//! related types for interacting with the PCF8523 Real-Time Clock registers.

use bitfield::bitfield;

/// Register addresses for the PCF8523 RTC.
#[allow(unused)]
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegAddr {
    /// Control_1 register (mode, stop, reset, interrupt enables)
    Control1 = 0x00,
    /// Control_2 register (timer/alarm flags and interrupt enables)
    Control2 = 0x01,
    /// Control_3 register (power management and battery flags)
    Control3 = 0x02,
    /// Seconds register (0-59, bit 7 = oscillator stop flag)
    Seconds = 0x03,
    /// Minutes register (0-59)
    Minutes = 0x04,
    /// Hours register (0-23)
    Hours = 0x05,
    /// Days register (1-31)
    Days = 0x06,
    /// Weekdays register (0=Sunday..6=Saturday)
    Weekdays = 0x07,
    /// Months register (1-12)
    Months = 0x08,
    /// Years register (0-99, offset from 2000)
    Years = 0x09,
}

/// Time representation format for the PCF8523.
///
/// The driver always operates the device in 24-hour mode; the 12-hour
/// setting is modelled for completeness of the Control_1 layout.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeRepresentation {
    /// 24-hour format (0-23)
    TwentyFourHour = 0,
    /// 12-hour format (1-12 + AM/PM)
    TwelveHour = 1,
}
impl From<u8> for TimeRepresentation {
    /// Creates a `TimeRepresentation` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => TimeRepresentation::TwentyFourHour,
            1 => TimeRepresentation::TwelveHour,
            _ => panic!("Invalid value for TimeRepresentation: {}", v),
        }
    }
}
impl From<TimeRepresentation> for u8 {
    /// Converts a `TimeRepresentation` to its raw register value.
    fn from(v: TimeRepresentation) -> Self {
        v as u8
    }
}

/// Oscillator load capacitance selection (Control_1, CAP_SEL).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadCapacitance {
    /// 7.0 pF quartz load capacitance
    Cap7pF = 0,
    /// 12.5 pF quartz load capacitance
    Cap12pF5 = 1,
}
impl From<u8> for LoadCapacitance {
    /// Creates a `LoadCapacitance` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => LoadCapacitance::Cap7pF,
            1 => LoadCapacitance::Cap12pF5,
            _ => panic!("Invalid value for LoadCapacitance: {}", v),
        }
    }
}
impl From<LoadCapacitance> for u8 {
    /// Converts a `LoadCapacitance` to its raw register value.
    fn from(v: LoadCapacitance) -> Self {
        v as u8
    }
}

/// Battery switch-over and battery-low-detection mode (Control_3, bits 7-5).
///
/// The datasheet encodes "switch-over disabled" with two codes per
/// detection setting; decoding folds the aliases onto one variant and
/// encoding always emits the canonical code.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Switch-over in standard mode, battery low detection enabled
    StandardWithBatteryLowDetection = 0b000,
    /// Switch-over in direct switching mode, battery low detection enabled
    DirectSwitchingWithBatteryLowDetection = 0b001,
    /// Switch-over disabled (single supply), battery low detection enabled
    SwitchoverDisabledWithBatteryLowDetection = 0b010,
    /// Switch-over in standard mode, battery low detection disabled
    Standard = 0b100,
    /// Switch-over in direct switching mode, battery low detection disabled
    DirectSwitching = 0b101,
    /// Switch-over disabled (single supply), battery low detection disabled
    SwitchoverDisabled = 0b111,
}
impl From<u8> for PowerMode {
    /// Creates a `PowerMode` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value does not fit in 3 bits.
    fn from(v: u8) -> Self {
        match v {
            0b000 => PowerMode::StandardWithBatteryLowDetection,
            0b001 => PowerMode::DirectSwitchingWithBatteryLowDetection,
            0b010 | 0b011 => PowerMode::SwitchoverDisabledWithBatteryLowDetection,
            0b100 => PowerMode::Standard,
            0b101 => PowerMode::DirectSwitching,
            0b110 | 0b111 => PowerMode::SwitchoverDisabled,
            _ => panic!("Invalid value for PowerMode: {}", v),
        }
    }
}
impl From<PowerMode> for u8 {
    /// Converts a `PowerMode` to its raw register value.
    fn from(v: PowerMode) -> Self {
        v as u8
    }
}

// This macro generates the From<u8> and Into<u8> implementations for the
// register type
macro_rules! from_register_u8 {
    ($typ:ty) => {
        impl From<u8> for $typ {
            fn from(v: u8) -> Self {
                paste::paste!([< $typ >](v))
            }
        }
        impl From<$typ> for u8 {
            fn from(v: $typ) -> Self {
                v.0
            }
        }
    };
}

bitfield! {
    /// Control_1 register: operating mode and interrupt enables.
    ///
    /// Not touched by the time/date paths; defaults are left in place.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Control1(u8);
    impl Debug;
    /// Quartz load capacitance selection
    pub from into LoadCapacitance, load_capacitance, set_load_capacitance: 7, 7;
    /// Freeze the RTC time circuits
    pub stop, set_stop: 5;
    /// Initiate a software reset
    pub software_reset, set_software_reset: 4;
    /// 12/24 hour mode selection
    pub from into TimeRepresentation, time_representation, set_time_representation: 3, 3;
    /// Enable second interrupt
    pub second_interrupt_enable, set_second_interrupt_enable: 2;
    /// Enable alarm interrupt
    pub alarm_interrupt_enable, set_alarm_interrupt_enable: 1;
    /// Generate interrupt pulses at every correction cycle
    pub correction_interrupt_enable, set_correction_interrupt_enable: 0;
}
from_register_u8!(Control1);

#[cfg(feature = "defmt")]
impl defmt::Format for Control1 {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Control1(");
        match self.load_capacitance() {
            LoadCapacitance::Cap7pF => defmt::write!(f, "7pF"),
            LoadCapacitance::Cap12pF5 => defmt::write!(f, "12.5pF"),
        }
        if self.stop() {
            defmt::write!(f, ", STOP");
        }
        if self.software_reset() {
            defmt::write!(f, ", SR");
        }
        match self.time_representation() {
            TimeRepresentation::TwentyFourHour => defmt::write!(f, ", 24h"),
            TimeRepresentation::TwelveHour => defmt::write!(f, ", 12h"),
        }
        if self.second_interrupt_enable() {
            defmt::write!(f, ", SIE");
        }
        if self.alarm_interrupt_enable() {
            defmt::write!(f, ", AIE");
        }
        if self.correction_interrupt_enable() {
            defmt::write!(f, ", CIE");
        }
        defmt::write!(f, ")");
    }
}

bitfield! {
    /// Control_2 register: timer/alarm flags and interrupt enables.
    ///
    /// Present in the register map; the alarm and countdown timer features
    /// themselves are outside this driver's scope.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Control2(u8);
    impl Debug;
    /// Watchdog timer A triggered flag (read-only, cleared on read)
    pub watchdog_timer_a_flag, set_watchdog_timer_a_flag: 7;
    /// Countdown timer A triggered flag
    pub countdown_timer_a_flag, set_countdown_timer_a_flag: 6;
    /// Countdown timer B triggered flag
    pub countdown_timer_b_flag, set_countdown_timer_b_flag: 5;
    /// Second interrupt generated flag
    pub second_interrupt_flag, set_second_interrupt_flag: 4;
    /// Alarm triggered flag
    pub alarm_flag, set_alarm_flag: 3;
    /// Enable watchdog timer A interrupt
    pub watchdog_timer_a_interrupt_enable, set_watchdog_timer_a_interrupt_enable: 2;
    /// Enable countdown timer A interrupt
    pub countdown_timer_a_interrupt_enable, set_countdown_timer_a_interrupt_enable: 1;
    /// Enable countdown timer B interrupt
    pub countdown_timer_b_interrupt_enable, set_countdown_timer_b_interrupt_enable: 0;
}
from_register_u8!(Control2);

#[cfg(feature = "defmt")]
impl defmt::Format for Control2 {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Control2(");
        let mut first = true;
        if self.watchdog_timer_a_flag() {
            defmt::write!(f, "WTAF");
            first = false;
        }
        if self.countdown_timer_a_flag() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "CTAF");
            first = false;
        }
        if self.countdown_timer_b_flag() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "CTBF");
            first = false;
        }
        if self.second_interrupt_flag() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "SF");
            first = false;
        }
        if self.alarm_flag() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "AF");
            first = false;
        }
        if first {
            defmt::write!(f, "clear");
        }
        defmt::write!(f, ")");
    }
}

bitfield! {
    /// Control_3 register: battery switch-over configuration and status.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Control3(u8);
    impl Debug;
    /// Battery switch-over / battery low detection mode
    pub from into PowerMode, power_mode, set_power_mode: 7, 5;
    /// Battery switch-over occurred flag (set by hardware)
    pub battery_switchover_flag, set_battery_switchover_flag: 3;
    /// Battery low flag (read-only)
    pub battery_low_flag, set_battery_low_flag: 2;
    /// Enable interrupt when the switch-over flag gets set
    pub battery_switchover_interrupt_enable, set_battery_switchover_interrupt_enable: 1;
    /// Enable interrupt when the battery low flag gets set
    pub battery_low_interrupt_enable, set_battery_low_interrupt_enable: 0;
}
from_register_u8!(Control3);

#[cfg(feature = "defmt")]
impl defmt::Format for Control3 {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Control3({}", self.power_mode());
        if self.battery_switchover_flag() {
            defmt::write!(f, ", BSF");
        }
        if self.battery_low_flag() {
            defmt::write!(f, ", BLF");
        }
        if self.battery_switchover_interrupt_enable() {
            defmt::write!(f, ", BSIE");
        }
        if self.battery_low_interrupt_enable() {
            defmt::write!(f, ", BLIE");
        }
        defmt::write!(f, ")");
    }
}

bitfield! {
    /// Seconds register (0-59) with BCD encoding.
    ///
    /// Bit 7 is the oscillator stop flag, not part of the time value; the
    /// tens range stops at bit 6 so a set flag never corrupts the decoded
    /// seconds.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Seconds(u8);
    impl Debug;
    /// Oscillator stop flag
    pub oscillator_stop_flag, set_oscillator_stop_flag: 7;
    /// Tens place of seconds (0-5)
    pub ten_seconds, set_ten_seconds: 6, 4;
    /// Ones place of seconds (0-9)
    pub seconds, set_seconds: 3, 0;
}
from_register_u8!(Seconds);

#[cfg(feature = "defmt")]
impl defmt::Format for Seconds {
    fn format(&self, f: defmt::Formatter) {
        let seconds = 10 * self.ten_seconds() + self.seconds();
        defmt::write!(f, "Seconds({}s", seconds);
        if self.oscillator_stop_flag() {
            defmt::write!(f, ", OS");
        }
        defmt::write!(f, ")");
    }
}

bitfield! {
    /// Minutes register (0-59) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Minutes(u8);
    impl Debug;
    /// Tens place of minutes (0-5)
    pub ten_minutes, set_ten_minutes: 6, 4;
    /// Ones place of minutes (0-9)
    pub minutes, set_minutes: 3, 0;
}
from_register_u8!(Minutes);

#[cfg(feature = "defmt")]
impl defmt::Format for Minutes {
    fn format(&self, f: defmt::Formatter) {
        let minutes = 10 * self.ten_minutes() + self.minutes();
        defmt::write!(f, "Minutes({}m)", minutes);
    }
}

bitfield! {
    /// Hours register (0-23) with BCD encoding, 24-hour mode.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Hours(u8);
    impl Debug;
    /// Tens place of hours (0-2)
    pub ten_hours, set_ten_hours: 5, 4;
    /// Ones place of hours (0-9)
    pub hours, set_hours: 3, 0;
}
from_register_u8!(Hours);

#[cfg(feature = "defmt")]
impl defmt::Format for Hours {
    fn format(&self, f: defmt::Formatter) {
        let hours = 10 * self.ten_hours() + self.hours();
        defmt::write!(f, "Hours({}h)", hours);
    }
}

bitfield! {
    /// Days register (1-31, day of month) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Days(u8);
    impl Debug;
    /// Tens place of the day of month (0-3)
    pub ten_days, set_ten_days: 5, 4;
    /// Ones place of the day of month (0-9)
    pub days, set_days: 3, 0;
}
from_register_u8!(Days);

#[cfg(feature = "defmt")]
impl defmt::Format for Days {
    fn format(&self, f: defmt::Formatter) {
        let days = 10 * self.ten_days() + self.days();
        defmt::write!(f, "Days({})", days);
    }
}

bitfield! {
    /// Weekdays register (0=Sunday..6=Saturday), stored raw without BCD.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Weekdays(u8);
    impl Debug;
    /// Day of week (0-6)
    pub weekdays, set_weekdays: 2, 0;
}
from_register_u8!(Weekdays);

#[cfg(feature = "defmt")]
impl defmt::Format for Weekdays {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Weekdays({})", self.weekdays());
    }
}

bitfield! {
    /// Months register (1-12) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Months(u8);
    impl Debug;
    /// Tens place of the month (0-1)
    pub ten_months, set_ten_months: 4, 4;
    /// Ones place of the month (0-9)
    pub months, set_months: 3, 0;
}
from_register_u8!(Months);

#[cfg(feature = "defmt")]
impl defmt::Format for Months {
    fn format(&self, f: defmt::Formatter) {
        let months = 10 * self.ten_months() + self.months();
        defmt::write!(f, "Months({})", months);
    }
}

bitfield! {
    /// Years register (0-99, offset from 2000) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Years(u8);
    impl Debug;
    /// Tens place of the year (0-9)
    pub ten_years, set_ten_years: 7, 4;
    /// Ones place of the year (0-9)
    pub years, set_years: 3, 0;
}
from_register_u8!(Years);

#[cfg(feature = "defmt")]
impl defmt::Format for Years {
    fn format(&self, f: defmt::Formatter) {
        let years = 10 * self.ten_years() + self.years();
        defmt::write!(f, "Years({})", years);
    }
}
