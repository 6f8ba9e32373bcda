use std::fmt;

use chrono::NaiveDateTime;

/// A calendar timestamp decoded from the MS-DOS date and time words used by ZIP.
///
/// Fields are taken from the bit layout as-is. No calendar validation is done,
/// so a value such as February 31st is representable here; only the conversion
/// to [`NaiveDateTime`] rejects it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DosTimestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// Always even: MS-DOS stores seconds with two second granularity.
    pub second: u8,
}

impl DosTimestamp {
    /// Constructs chrono's [`NaiveDateTime`] representation of this timestamp.
    ///
    /// Returns `None` when the stored fields do not form a real date or time.
    pub fn as_chrono(&self) -> Option<NaiveDateTime> {
        chrono::NaiveDate::from_ymd_opt(self.year.into(), self.month.into(), self.day.into())?
            .and_hms_opt(self.hour.into(), self.minute.into(), self.second.into())
    }
}

impl fmt::Display for DosTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Decode an MS-DOS `date`/`time` pair.
///
/// `time`: bits 0-4 seconds/2, bits 5-10 minute, bits 11-15 hour.
/// `date`: bits 0-4 day, bits 5-8 month, bits 9-15 years since 1980.
pub fn decode_dos_timestamp(date: u16, time: u16) -> DosTimestamp {
    DosTimestamp {
        year: ((date >> 9) & 0x7F) + 1980,
        month: ((date >> 5) & 0x0F) as u8,
        day: (date & 0x1F) as u8,
        hour: ((time >> 11) & 0x1F) as u8,
        minute: ((time >> 5) & 0x3F) as u8,
        second: ((time & 0x1F) * 2) as u8,
    }
}
