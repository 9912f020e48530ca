//! Date/time parsing
//!
//! ISO9660 has two datetime formats: 7-byte and 17-byte. Both record a GMT
//! offset in 15-minute intervals, which is kept rather than folded into the
//! local timezone.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

/// 7-byte directory record datetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTime7 {
    /// Years since 1900
    pub year: u8,

    /// Month (1-12)
    pub month: u8,

    /// Day (1-31)
    pub day: u8,

    /// Hour (0-23)
    pub hour: u8,

    /// Minute (0-59)
    pub minute: u8,

    /// Second (0-59)
    pub second: u8,

    /// GMT offset in 15-minute intervals (-48 to +52)
    pub gmt_offset: i8,
}

impl DateTime7 {
    /// Parse from 7-byte array
    pub fn from_bytes(bytes: &[u8; 7]) -> Self {
        Self {
            year: bytes[0],
            month: bytes[1],
            day: bytes[2],
            hour: bytes[3],
            minute: bytes[4],
            second: bytes[5],
            gmt_offset: bytes[6] as i8,
        }
    }

    /// Get full year (1900 + year)
    pub fn full_year(&self) -> u16 {
        1900 + self.year as u16
    }

    /// Offset-aware instant, `None` if the fields do not form a valid date
    ///
    /// An all-zero field (no date recorded) yields `None`.
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let offset = gmt_offset(self.gmt_offset)?;
        let naive = NaiveDate::from_ymd_opt(
            self.full_year() as i32,
            self.month as u32,
            self.day as u32,
        )?
        .and_hms_opt(self.hour as u32, self.minute as u32, self.second as u32)?;
        offset.from_local_datetime(&naive).single()
    }
}

/// 17-byte ASCII datetime (volume descriptors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTime17 {
    /// Year (4 ASCII digits)
    pub year: u16,

    /// Month (2 ASCII digits, 1-12)
    pub month: u8,

    /// Day (2 ASCII digits, 1-31)
    pub day: u8,

    /// Hour (2 ASCII digits, 0-23)
    pub hour: u8,

    /// Minute (2 ASCII digits, 0-59)
    pub minute: u8,

    /// Second (2 ASCII digits, 0-59)
    pub second: u8,

    /// Hundredths (2 ASCII digits)
    pub hundredths: u8,

    /// GMT offset in 15-minute intervals
    pub gmt_offset: i8,
}

impl DateTime17 {
    /// Parse from 17-byte ASCII string
    ///
    /// Returns `None` when any of the 16 digit positions is not an ASCII
    /// digit. Some mastering tools zero-fill unused timestamps.
    pub fn from_bytes(bytes: &[u8; 17]) -> Option<Self> {
        let digits = &bytes[..16];
        if !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let num = |range: core::ops::Range<usize>| {
            digits[range]
                .iter()
                .fold(0u16, |acc, d| acc * 10 + (d - b'0') as u16)
        };

        Some(Self {
            year: num(0..4),
            month: num(4..6) as u8,
            day: num(6..8) as u8,
            hour: num(8..10) as u8,
            minute: num(10..12) as u8,
            second: num(12..14) as u8,
            hundredths: num(14..16) as u8,
            gmt_offset: bytes[16] as i8,
        })
    }

    /// Is this the "not specified" value (all digits zero)?
    pub fn is_unspecified(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }

    /// Offset-aware instant, `None` when unspecified or out of range
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let offset = gmt_offset(self.gmt_offset)?;
        let naive = NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, self.day as u32)?
            .and_hms_milli_opt(
                self.hour as u32,
                self.minute as u32,
                self.second as u32,
                self.hundredths as u32 * 10,
            )?;
        offset.from_local_datetime(&naive).single()
    }
}

fn gmt_offset(quarter_hours: i8) -> Option<FixedOffset> {
    FixedOffset::east_opt(quarter_hours as i32 * 15 * 60)
}
