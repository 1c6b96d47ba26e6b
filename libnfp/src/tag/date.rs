// libnfp/src/tag/date.rs

use crate::types::CalendarDate;

const YEAR_BASE: u16 = 2000;
const YEAR_MASK: u16 = 0xFE00;
const MONTH_MASK: u16 = 0x01E0;
const DAY_MASK: u16 = 0x001F;

/// Packed tag date: `year - 2000` in bits 9-15, month in bits 5-8 and day
/// in bits 0-4. Stored big endian on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AmiiboDate(u16);

impl AmiiboDate {
    /// Wrap a packed value.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Packed value.
    pub fn raw(&self) -> u16 {
        self.0
    }

    /// Read the on-tag form.
    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    /// On-tag form.
    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Pack a calendar day. Years outside 2000..=2127 are clamped to the
    /// representable range.
    pub fn from_calendar(date: CalendarDate) -> Self {
        let year = date.year.clamp(YEAR_BASE, YEAR_BASE + 0x7F) - YEAR_BASE;
        let month = u16::from(date.month) & 0x0F;
        let day = u16::from(date.day) & 0x1F;
        Self((year << 9) | (month << 5) | day)
    }

    /// Full year, 2000 based.
    pub fn year(&self) -> u16 {
        ((self.0 & YEAR_MASK) >> 9) + YEAR_BASE
    }

    /// Month, 1 based.
    pub fn month(&self) -> u8 {
        ((self.0 & MONTH_MASK) >> 5) as u8
    }

    /// Day of the month.
    pub fn day(&self) -> u8 {
        (self.0 & DAY_MASK) as u8
    }

    /// Unpack into a calendar day.
    pub fn to_calendar(&self) -> CalendarDate {
        CalendarDate::new(self.year(), self.month(), self.day())
    }
}

impl From<CalendarDate> for AmiiboDate {
    fn from(date: CalendarDate) -> Self {
        Self::from_calendar(date)
    }
}
