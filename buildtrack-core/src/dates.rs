//! Calendar-date helpers.
//!
//! Records carry dates as ISO `YYYY-MM-DD` strings. Everything that compares
//! "days" works on [`Date`] values (midnight-normalized), never on timestamp
//! differences.

use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, Month,
    OffsetDateTime, PrimitiveDateTime, UtcOffset,
};

/// Parse an ISO calendar date. A trailing time component (`2024-03-10T08:00`)
/// is ignored.
pub fn parse_date(value: &str) -> Option<Date> {
    let day_part = value.trim().split('T').next()?;
    Date::parse(day_part, format_description!("[year]-[month]-[day]")).ok()
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parse a reminder timestamp into the given offset.
///
/// Accepts RFC 3339 (converted into `offset`) or a local
/// `YYYY-MM-DDTHH:MM[:SS]` value, which is interpreted in `offset`.
pub fn parse_reminder(value: &str, offset: UtcOffset) -> Option<OffsetDateTime> {
    let value = value.trim();
    if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(parsed.to_offset(offset));
    }

    PrimitiveDateTime::parse(
        value,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(value, format_description!("[year]-[month]-[day]T[hour]:[minute]"))
    })
    .ok()
    .map(|local| local.assume_offset(offset))
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: Date, to: Date) -> i64 {
    (to - from).whole_days()
}

pub fn first_of_month(year: i32, month: Month) -> Option<Date> {
    Date::from_calendar_date(year, month, 1).ok()
}

pub fn last_of_month(year: i32, month: Month) -> Option<Date> {
    let (next_year, next_month) = if month == Month::December {
        (year + 1, Month::January)
    } else {
        (year, month.next())
    };
    first_of_month(next_year, next_month)?.previous_day()
}

pub fn days_in_month(year: i32, month: Month) -> u8 {
    last_of_month(year, month).map(|d| d.day()).unwrap_or(0)
}

/// Step `count` months back from (`year`, `month`).
pub fn months_back(year: i32, month: Month, count: u32) -> (i32, Month) {
    (0..count).fold((year, month), |(y, m), _| {
        if m == Month::January {
            (y - 1, Month::December)
        } else {
            (y, m.previous())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, offset};

    #[test]
    fn parse_date_accepts_iso_and_ignores_time() {
        assert_eq!(parse_date("2024-03-10"), Some(date!(2024 - 03 - 10)));
        assert_eq!(parse_date("2024-03-10T08:30:00"), Some(date!(2024 - 03 - 10)));
        assert_eq!(parse_date("10/03/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn format_date_zero_pads() {
        assert_eq!(format_date(date!(2024 - 03 - 01)), "2024-03-01");
    }

    #[test]
    fn parse_reminder_handles_local_and_offset_values() {
        let vn = offset!(+7);
        assert_eq!(
            parse_reminder("2024-03-10T09:00:00", vn),
            Some(datetime!(2024-03-10 09:00 +7))
        );
        assert_eq!(
            parse_reminder("2024-03-10T09:00", vn),
            Some(datetime!(2024-03-10 09:00 +7))
        );
        assert_eq!(
            parse_reminder("2024-03-10T02:00:00Z", vn),
            Some(datetime!(2024-03-10 09:00 +7))
        );
        assert_eq!(parse_reminder("tomorrow", vn), None);
    }

    #[test]
    fn month_bounds() {
        assert_eq!(last_of_month(2024, Month::February), Some(date!(2024 - 02 - 29)));
        assert_eq!(last_of_month(2023, Month::December), Some(date!(2023 - 12 - 31)));
        assert_eq!(days_in_month(2023, Month::February), 28);
    }

    #[test]
    fn months_back_wraps_years() {
        assert_eq!(months_back(2024, Month::March, 5), (2023, Month::October));
        assert_eq!(months_back(2024, Month::March, 0), (2024, Month::March));
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date!(2024 - 03 - 10), date!(2024 - 03 - 13)), 3);
        assert_eq!(days_between(date!(2024 - 03 - 10), date!(2024 - 03 - 08)), -2);
    }
}
