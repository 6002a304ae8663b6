//! Shared utility functions for WXR crates.

/// Calendar helpers
pub mod dates {
    use chrono::NaiveDate;

    /// Any non-leap year works here; February must have 28 days.
    const CANONICAL_YEAR: i32 = 2001;

    /// Month names accepted by [`parse_month`], January first.
    pub const MONTH_NAMES: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];

    /// Number of days in `month` ignoring leap years (February is always 28).
    ///
    /// Returns `None` for a month outside 1..=12.
    pub fn canonical_days_in_month(month: u32) -> Option<u32> {
        let first = NaiveDate::from_ymd_opt(CANONICAL_YEAR, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(CANONICAL_YEAR + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(CANONICAL_YEAR, month + 1, 1)?
        };
        Some((next - first).num_days() as u32)
    }

    /// Number of days in `year` under the simple rule: every year divisible
    /// by 4 is a leap year. Century years are not special-cased, so 1900
    /// and 2100 both count as 366 days.
    pub fn simple_days_in_year(year: i32) -> u32 {
        if year % 4 == 0 {
            366
        } else {
            365
        }
    }

    /// True if `year`/`month`/`day` names a real calendar date
    /// (proleptic Gregorian, so Feb 29 is only valid in real leap years).
    pub fn is_calendar_date(year: i32, month: u32, day: u32) -> bool {
        NaiveDate::from_ymd_opt(year, month, day).is_some()
    }

    /// Parse a month from its English name (full or three-letter prefix,
    /// any case) or from an integer 1..=12.
    pub fn parse_month(s: &str) -> anyhow::Result<u32> {
        let s = s.trim().to_lowercase();
        if let Some(index) = MONTH_NAMES
            .iter()
            .position(|name| *name == s || (s.len() == 3 && name.starts_with(&s)))
        {
            return Ok(index as u32 + 1);
        }
        let month: u32 = s
            .parse()
            .map_err(|_| anyhow::anyhow!("not a month name or number: {s}"))?;
        if !(1..=12).contains(&month) {
            anyhow::bail!("month must be between 1 and 12, got {month}");
        }
        Ok(month)
    }

}
