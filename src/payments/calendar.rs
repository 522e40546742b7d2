use chrono::{DateTime, Datelike, Utc};

/// month lengths of a common (non-leap) year, january first
pub const COMMON_YEAR_MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// actual length of a calendar month, leap-aware
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => COMMON_YEAR_MONTH_DAYS[(month - 1) as usize],
        _ => 30,
    }
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// days in the calendar month containing `at`
pub fn days_in_current_month(at: DateTime<Utc>) -> u32 {
    days_in_month(at.year(), at.month())
}

/// days in the calendar year containing `at`
pub fn days_in_current_year(at: DateTime<Utc>) -> u32 {
    days_in_year(at.year())
}

/// calendar months starting the month after `current_month`, wrapping
/// december to january, for `count` months
pub fn month_cycle_after(current_month: u32, count: u32) -> impl Iterator<Item = u32> {
    let start = current_month % 12;
    (0..count).map(move |k| (start + k) % 12 + 1)
}

/// common-year length of a calendar month
pub fn common_month_days(month: u32) -> u32 {
    days_in_month(1, month)
}
