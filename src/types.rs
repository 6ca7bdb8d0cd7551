use crate::DateError;
use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DAYS_IN_MONTH, DECEMBER, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, JANUARY, LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_DAY, WEEKDAY_ABBREVS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;
use std::num::NonZeroU16;
use std::str::FromStr;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, DateError> {
        let non_zero = NonZeroU16::new(value).ok_or(DateError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(DateError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = DateError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateError> {
        let non_zero = NonZeroU8::new(value).ok_or(DateError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(DateError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// The first day of any month.
    pub const MIN: Self = Self(NonZeroU8::MIN);

    /// Creates a new Day, validating that it's non-zero and valid for the given year and month
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if the value is 0 or invalid for the given year and month.
    pub fn new(value: u8, year: u16, month: u8) -> Result<Self, DateError> {
        let non_zero = NonZeroU8::new(value).ok_or(DateError::InvalidDay {
            month,
            day: value,
            year,
        })?;

        let max_day = days_in_month(year, month);
        if value > max_day {
            return Err(DateError::InvalidDay {
                month,
                day: value,
                year,
            });
        }

        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate without year/month context, so just check minimum
        if value < MIN_DAY {
            return Err(DateError::InvalidDay {
                month: 0,
                day: value,
                year: 0,
            });
        }
        // Since we validated value >= MIN_DAY (which is 1), value is non-zero
        let non_zero = NonZeroU8::new(value).ok_or(DateError::InvalidDay {
            month: 0,
            day: value,
            year: 0,
        })?;
        Ok(Self(non_zero))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A date truncated to day granularity.
///
/// There is no time-of-day anywhere in this type, so comparison and equality
/// are by calendar day. Ordering is lexicographic over (year, month, day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

impl CalendarDate {
    /// Creates a new date, validating every component.
    ///
    /// # Errors
    /// Returns `DateError` if the year, month, or day is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year_t = Year::new(year)?;
        let month_t = Month::new(month)?;
        let day_t = Day::new(day, year, month)?;
        Ok(Self {
            year: year_t,
            month: month_t,
            day: day_t,
        })
    }

    /// Returns the year as u16
    #[inline]
    pub const fn year(self) -> u16 {
        self.year.get()
    }

    /// Returns the month as u8
    #[inline]
    pub const fn month(self) -> u8 {
        self.month.get()
    }

    /// Returns the day as u8
    #[inline]
    pub const fn day(self) -> u8 {
        self.day.get()
    }

    /// Truncates to the 1st of this date's month.
    pub const fn first_of_month(self) -> Self {
        Self {
            day: Day::MIN,
            ..self
        }
    }

    /// Adds `months` whole months, clamping the day to the target month's
    /// length. Returns `None` past the `MAX_YEAR` limit.
    pub fn add_months(self, months: u32) -> Option<Self> {
        let ordinal = month_ordinal(self.year(), self.month()).checked_add(months)?;
        let year = u16::try_from(ordinal / u32::from(MAX_MONTH)).ok()?;
        if year > MAX_YEAR {
            return None;
        }
        let month = (ordinal % u32::from(MAX_MONTH)) as u8 + 1;
        let day = self.day().min(days_in_month(year, month));
        Self::new(year, month, day).ok()
    }

    /// Successor day, rolling over month and year boundaries.
    /// Returns `None` past the `MAX_YEAR` limit.
    pub fn next_day(self) -> Option<Self> {
        let (year, month, day) = next_day(self.year(), self.month(), self.day())?;
        Self::new(year, month, day).ok()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{sep}{:02}{sep}{:02}",
            self.year(),
            self.month(),
            self.day(),
            sep = DATE_SEPARATOR
        )
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        // ISO format only: YYYY-MM-DD
        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(DateError::InvalidFormat(format!(
                "Expected YYYY{sep}MM{sep}DD: {s}",
                sep = DATE_SEPARATOR
            )));
        }

        let year = parse_u16(parts[0])?;
        let month = parse_u8(parts[1])?;
        let day = parse_u8(parts[2])?;
        Self::new(year, month, day)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Which day begins each 7-cell grid row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstDayOfWeek {
    #[default]
    Monday,
    Sunday,
}

/// Helper to parse u16 with better error messages
fn parse_u16(s: &str) -> Result<u16, DateError> {
    s.parse::<u16>()
        .map_err(|_| DateError::InvalidFormat(s.to_owned()))
}

/// Helper to parse u8 with better error messages
fn parse_u8(s: &str) -> Result<u8, DateError> {
    s.parse::<u8>()
        .map_err(|_| DateError::InvalidFormat(s.to_owned()))
}

// --- helpers for calendar arithmetic ---

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Whole months since year 1 January; the section-index basis.
pub(crate) const fn month_ordinal(year: u16, month: u8) -> u32 {
    (year as u32) * (MAX_MONTH as u32) + (month as u32) - 1
}

fn next_month(year: u16, month: u8) -> Option<(u16, u8)> {
    debug_assert!(month != 0 && month <= MAX_MONTH);
    if month == DECEMBER {
        // Check both overflow and our MAX_YEAR limit
        if year >= MAX_YEAR {
            None
        } else {
            Some((year + 1, JANUARY))
        }
    } else {
        Some((year, month + 1))
    }
}

fn next_day(year: u16, month: u8, day: u8) -> Option<(u16, u8, u8)> {
    let max = days_in_month(year, month);
    if day < max {
        Some((year, month, day + 1))
    } else {
        // roll to first of next month (respects MAX_YEAR limit)
        next_month(year, month).map(|(ny, nm)| (ny, nm, MIN_DAY))
    }
}

/// Day of week, 0 = Sunday .. 6 = Saturday (Zeller's congruence).
pub(crate) const fn day_of_week(year: u16, month: u8, day: u8) -> u8 {
    let (y, m) = if month < 3 {
        (year as i32 - 1, month as i32 + 12)
    } else {
        (year as i32, month as i32)
    };
    let k = y % 100;
    let j = y / 100;
    // h: 0 = Saturday, 1 = Sunday, ...
    let h = (day as i32 + (13 * (m + 1)) / 5 + k + k / 4 + j / 4 + 5 * j) % 7;
    ((h + 6) % 7) as u8
}

/// Position of `date`'s weekday within a grid row, in `1..=7`:
/// 1 = the configured first day of the week, 7 = the last.
pub fn weekday_index(date: CalendarDate, first_day: FirstDayOfWeek) -> u8 {
    let dow = day_of_week(date.year(), date.month(), date.day());
    match first_day {
        FirstDayOfWeek::Sunday => dow + 1,
        FirstDayOfWeek::Monday => {
            if dow == 0 {
                7
            } else {
                dow
            }
        }
    }
}

/// Abbreviated weekday name for a grid-row position in `1..=7`,
/// honoring the configured first day of the week.
pub fn weekday_abbrev(index: u8, first_day: FirstDayOfWeek) -> Option<&'static str> {
    if !(1..=7).contains(&index) {
        return None;
    }
    let offset = match first_day {
        FirstDayOfWeek::Sunday => 0,
        FirstDayOfWeek::Monday => 1,
    };
    let slot = (usize::from(index) - 1 + offset) % WEEKDAY_ABBREVS.len();
    Some(WEEKDAY_ABBREVS[slot])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(2000).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_new_invalid() {
        let result = Year::new(0);
        assert!(matches!(result, Err(DateError::InvalidYear(0))));

        let result = Year::new(10000);
        assert!(matches!(result, Err(DateError::InvalidYear(10000))));
    }

    #[test]
    fn test_month_new_valid() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        let result = Month::new(0);
        assert!(matches!(result, Err(DateError::InvalidMonth(0))));

        let result = Month::new(13);
        assert!(matches!(result, Err(DateError::InvalidMonth(13))));
    }

    #[test]
    fn test_day_new_valid() {
        // January - 31 days
        assert!(Day::new(1, 2024, 1).is_ok());
        assert!(Day::new(31, 2024, 1).is_ok());

        // February non-leap - 28 days
        assert!(Day::new(28, 2023, 2).is_ok());
        assert!(Day::new(29, 2023, 2).is_err());

        // February leap year - 29 days
        assert!(Day::new(29, 2024, 2).is_ok());
        assert!(Day::new(30, 2024, 2).is_err());

        // April - 30 days
        assert!(Day::new(30, 2024, 4).is_ok());
        assert!(Day::new(31, 2024, 4).is_err());
    }

    #[test]
    fn test_day_new_invalid_zero() {
        let result = Day::new(0, 2024, 1);
        assert!(matches!(result, Err(DateError::InvalidDay { .. })));
    }

    #[test]
    fn test_date_new_and_accessors() {
        let d = CalendarDate::new(2024, 1, 15).unwrap();
        assert_eq!(d.year(), 2024);
        assert_eq!(d.month(), 1);
        assert_eq!(d.day(), 15);
    }

    #[test]
    fn test_date_new_invalid_components() {
        assert!(matches!(
            CalendarDate::new(0, 1, 1),
            Err(DateError::InvalidYear(0))
        ));
        assert!(matches!(
            CalendarDate::new(2024, 13, 1),
            Err(DateError::InvalidMonth(13))
        ));
        assert!(matches!(
            CalendarDate::new(2024, 2, 30),
            Err(DateError::InvalidDay {
                month: 2,
                day: 30,
                year: 2024
            })
        ));
    }

    #[test]
    fn test_date_ordering() {
        assert!(date(2024, 1, 10) < date(2024, 1, 20));
        assert!(date(2024, 1, 31) < date(2024, 2, 1));
        assert!(date(2023, 12, 31) < date(2024, 1, 1));
        assert_eq!(date(2024, 1, 10), date(2024, 1, 10));
    }

    #[test]
    fn test_first_of_month() {
        assert_eq!(date(2024, 1, 15).first_of_month(), date(2024, 1, 1));
        assert_eq!(date(2024, 1, 1).first_of_month(), date(2024, 1, 1));
    }

    #[test]
    fn test_add_months_cases() {
        struct TestCase {
            start: (u16, u8, u8),
            months: u32,
            expected: Option<(u16, u8, u8)>,
            description: &'static str,
        }

        let cases = [
            TestCase {
                start: (2024, 1, 1),
                months: 0,
                expected: Some((2024, 1, 1)),
                description: "zero months is identity",
            },
            TestCase {
                start: (2024, 1, 1),
                months: 2,
                expected: Some((2024, 3, 1)),
                description: "within the same year",
            },
            TestCase {
                start: (2024, 11, 1),
                months: 3,
                expected: Some((2025, 2, 1)),
                description: "rolls over the year boundary",
            },
            TestCase {
                start: (2024, 1, 31),
                months: 1,
                expected: Some((2024, 2, 29)),
                description: "day clamps to leap February",
            },
            TestCase {
                start: (2023, 1, 31),
                months: 1,
                expected: Some((2023, 2, 28)),
                description: "day clamps to non-leap February",
            },
            TestCase {
                start: (9999, 12, 1),
                months: 1,
                expected: None,
                description: "past the year limit",
            },
        ];

        for case in &cases {
            let (y, m, d) = case.start;
            let result = date(y, m, d).add_months(case.months);
            let expected = case.expected.map(|(y, m, d)| date(y, m, d));
            assert_eq!(result, expected, "{}", case.description);
        }
    }

    #[test]
    fn test_next_day_within_month() {
        assert_eq!(date(2024, 1, 15).next_day(), Some(date(2024, 1, 16)));
    }

    #[test]
    fn test_next_day_rollover_and_leap() {
        assert_eq!(date(2024, 1, 31).next_day(), Some(date(2024, 2, 1)));
        assert_eq!(date(2024, 2, 28).next_day(), Some(date(2024, 2, 29)));
        assert_eq!(date(2023, 2, 28).next_day(), Some(date(2023, 3, 1)));
        assert_eq!(date(2023, 12, 31).next_day(), Some(date(2024, 1, 1)));
        assert_eq!(date(9999, 12, 31).next_day(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(date(2024, 1, 5).to_string(), "2024-01-05");
        assert_eq!(date(987, 12, 31).to_string(), "0987-12-31");
    }

    #[test]
    fn test_from_str_valid() {
        let d = "2024-01-15".parse::<CalendarDate>().unwrap();
        assert_eq!(d, date(2024, 1, 15));

        // Whitespace is tolerated
        let d = " 2024-01-15 ".parse::<CalendarDate>().unwrap();
        assert_eq!(d, date(2024, 1, 15));
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(matches!(
            "".parse::<CalendarDate>(),
            Err(DateError::EmptyInput)
        ));
        assert!(matches!(
            "2024-01".parse::<CalendarDate>(),
            Err(DateError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-01-15-23".parse::<CalendarDate>(),
            Err(DateError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-XX-15".parse::<CalendarDate>(),
            Err(DateError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-02-30".parse::<CalendarDate>(),
            Err(DateError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_serde_string_format() {
        let d = date(2024, 2, 29);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""2024-02-29""#);

        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn test_serde_validation() {
        // Invalid day for February should be rejected
        let result: Result<CalendarDate, _> = serde_json::from_str(r#""2024-02-30""#);
        assert!(result.is_err());

        // Century non-leap year
        let result: Result<CalendarDate, _> = serde_json::from_str(r#""1900-02-29""#);
        assert!(result.is_err());

        // Valid leap day succeeds
        let result: Result<CalendarDate, _> = serde_json::from_str(r#""2000-02-29""#);
        assert!(result.is_ok());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: u16,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month_table() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2023, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
        assert_eq!(days_in_month(2024, 2), 29);
    }

    #[test]
    fn test_day_of_week_anchors() {
        // 2024-01-01 was a Monday
        assert_eq!(day_of_week(2024, 1, 1), 1);
        // 2024-03-31 was a Sunday
        assert_eq!(day_of_week(2024, 3, 31), 0);
        // 2000-01-01 was a Saturday
        assert_eq!(day_of_week(2000, 1, 1), 6);
        // 1900-01-01 was a Monday
        assert_eq!(day_of_week(1900, 1, 1), 1);
    }

    #[test]
    fn test_weekday_index_monday_first() {
        // 2024-01-01 is Monday -> index 1
        assert_eq!(weekday_index(date(2024, 1, 1), FirstDayOfWeek::Monday), 1);
        // 2024-01-07 is Sunday -> index 7
        assert_eq!(weekday_index(date(2024, 1, 7), FirstDayOfWeek::Monday), 7);
        // 2024-01-06 is Saturday -> index 6
        assert_eq!(weekday_index(date(2024, 1, 6), FirstDayOfWeek::Monday), 6);
    }

    #[test]
    fn test_weekday_index_sunday_first() {
        // 2024-01-07 is Sunday -> index 1
        assert_eq!(weekday_index(date(2024, 1, 7), FirstDayOfWeek::Sunday), 1);
        // 2024-01-01 is Monday -> index 2
        assert_eq!(weekday_index(date(2024, 1, 1), FirstDayOfWeek::Sunday), 2);
        // 2024-01-06 is Saturday -> index 7
        assert_eq!(weekday_index(date(2024, 1, 6), FirstDayOfWeek::Sunday), 7);
    }

    #[test]
    fn test_weekday_abbrev() {
        assert_eq!(weekday_abbrev(1, FirstDayOfWeek::Monday), Some("Mon"));
        assert_eq!(weekday_abbrev(7, FirstDayOfWeek::Monday), Some("Sun"));
        assert_eq!(weekday_abbrev(1, FirstDayOfWeek::Sunday), Some("Sun"));
        assert_eq!(weekday_abbrev(7, FirstDayOfWeek::Sunday), Some("Sat"));
        assert_eq!(weekday_abbrev(0, FirstDayOfWeek::Monday), None);
        assert_eq!(weekday_abbrev(8, FirstDayOfWeek::Monday), None);
    }

    #[test]
    fn test_month_ordinal_is_monotonic() {
        assert_eq!(
            month_ordinal(2024, 2) - month_ordinal(2024, 1),
            1,
            "adjacent months differ by one"
        );
        assert_eq!(
            month_ordinal(2025, 1) - month_ordinal(2024, 12),
            1,
            "year boundary differs by one"
        );
    }

    #[test]
    fn test_first_day_of_week_serde() {
        let json = serde_json::to_string(&FirstDayOfWeek::Sunday).unwrap();
        assert_eq!(json, r#""sunday""#);

        let parsed: FirstDayOfWeek = serde_json::from_str(r#""monday""#).unwrap();
        assert_eq!(parsed, FirstDayOfWeek::Monday);
    }
}
