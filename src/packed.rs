//! Packed temporal codec.
//!
//! A calendar date-time is stored as one non-negative `i64` at minute
//! precision, one field per byte group:
//!
//! ```text
//!  63        32 31    24 23    16 15     8 7      0
//! ┌────────────┬────────┬────────┬────────┬────────┐
//! │    year    │ month  │  day   │  hour  │ minute │
//! └────────────┴────────┴────────┴────────┴────────┘
//! ```
//!
//! Seconds and anything finer are dropped by [`pack`]. Because the most
//! significant field sits in the highest bits, comparing two packed values
//! as integers orders them chronologically.

use std::fmt;

use time::{Date, Duration, Month, PrimitiveDateTime, Time};

use crate::error::{Error, Result};

/// Smallest year [`pack`] accepts.
pub const MIN_YEAR: i32 = 1;
/// Largest year [`pack`] accepts.
pub const MAX_YEAR: i32 = 9999;

const YEAR_SHIFT: u32 = 32;
const MONTH_SHIFT: u32 = 24;
const DAY_SHIFT: u32 = 16;
const HOUR_SHIFT: u32 = 8;
const FIELD_MASK: i64 = 0xFF;

/// Encodes `date_time` at minute precision.
pub fn pack(date_time: PrimitiveDateTime) -> Result<i64> {
    let year = date_time.year();
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::DateRangeOverflow {
            year: i64::from(year),
        });
    }
    Ok(i64::from(year) << YEAR_SHIFT
        | i64::from(u8::from(date_time.month())) << MONTH_SHIFT
        | i64::from(date_time.day()) << DAY_SHIFT
        | i64::from(date_time.hour()) << HOUR_SHIFT
        | i64::from(date_time.minute()))
}

/// Decodes a value produced by [`pack`].
pub fn unpack(raw: i64) -> Result<PrimitiveDateTime> {
    if raw < 0 {
        return Err(Error::InvalidPackedValue { raw });
    }
    let year = raw >> YEAR_SHIFT;
    if year < i64::from(MIN_YEAR) || year > i64::from(MAX_YEAR) {
        return Err(Error::DateRangeOverflow { year });
    }
    let invalid = |_| Error::InvalidPackedValue { raw };
    let month = Month::try_from(field(raw, MONTH_SHIFT)).map_err(invalid)?;
    // year is within MIN_YEAR..=MAX_YEAR here, so the narrowing is lossless
    let date =
        Date::from_calendar_date(year as i32, month, field(raw, DAY_SHIFT)).map_err(invalid)?;
    let time = Time::from_hms(field(raw, HOUR_SHIFT), field(raw, 0), 0).map_err(invalid)?;
    Ok(PrimitiveDateTime::new(date, time))
}

/// Drops everything below minute precision, yielding what survives a
/// [`pack`]/[`unpack`] round trip.
pub fn truncate_to_precision(date_time: PrimitiveDateTime) -> PrimitiveDateTime {
    let minutes = i64::from(date_time.hour()) * 60 + i64::from(date_time.minute());
    date_time.replace_time(Time::MIDNIGHT + Duration::minutes(minutes))
}

fn field(raw: i64, shift: u32) -> u8 {
    ((raw >> shift) & FIELD_MASK) as u8
}

/// A date-time held in its packed form.
///
/// Columns store these directly so reading a date from a row never
/// materialises a calendar structure unless asked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedDateTime(i64);

impl PackedDateTime {
    /// Packs `date_time`, failing with [`Error::DateRangeOverflow`] outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn pack(date_time: PrimitiveDateTime) -> Result<Self> {
        pack(date_time).map(Self)
    }

    /// Wraps an already encoded value without validating it.
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn raw_value(self) -> i64 {
        self.0
    }

    pub fn year(self) -> i32 {
        (self.0 >> YEAR_SHIFT) as i32
    }

    pub fn month(self) -> u8 {
        field(self.0, MONTH_SHIFT)
    }

    pub fn day(self) -> u8 {
        field(self.0, DAY_SHIFT)
    }

    pub fn hour(self) -> u8 {
        field(self.0, HOUR_SHIFT)
    }

    pub fn minute(self) -> u8 {
        field(self.0, 0)
    }

    /// Decodes into a calendar date-time.
    pub fn to_date_time(self) -> Result<PrimitiveDateTime> {
        unpack(self.0)
    }

    /// Decodes the date part only.
    pub fn date(self) -> Result<Date> {
        self.to_date_time().map(|dt| dt.date())
    }
}

impl TryFrom<PrimitiveDateTime> for PackedDateTime {
    type Error = Error;

    fn try_from(date_time: PrimitiveDateTime) -> Result<Self> {
        Self::pack(date_time)
    }
}

impl fmt::Display for PackedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn fields_land_in_their_bytes() {
        let raw = pack(datetime!(2020-03-04 05:06)).unwrap();
        assert_eq!(raw, 2020 << 32 | 3 << 24 | 4 << 16 | 5 << 8 | 6);
    }

    #[test]
    fn getters_read_without_decoding() {
        let packed = PackedDateTime::pack(datetime!(1999-12-31 23:59)).unwrap();
        assert_eq!(packed.year(), 1999);
        assert_eq!(packed.month(), 12);
        assert_eq!(packed.day(), 31);
        assert_eq!(packed.hour(), 23);
        assert_eq!(packed.minute(), 59);
        assert_eq!(packed.to_string(), "1999-12-31T23:59");
    }

    #[test]
    fn raw_order_is_chronological() {
        let earlier = pack(datetime!(2019-12-31 23:59)).unwrap();
        let later = pack(datetime!(2020-01-01 00:00)).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn stray_bits_are_rejected() {
        let valid = pack(datetime!(2020-01-01 00:00)).unwrap();
        // minute byte of 60
        assert_eq!(
            unpack(valid | 60),
            Err(Error::InvalidPackedValue { raw: valid | 60 })
        );
        // month byte of 13
        let bad_month = (valid & !(FIELD_MASK << MONTH_SHIFT)) | 13 << MONTH_SHIFT;
        assert!(matches!(unpack(bad_month), Err(Error::InvalidPackedValue { .. })));
        assert!(matches!(unpack(-1), Err(Error::InvalidPackedValue { .. })));
    }
}
