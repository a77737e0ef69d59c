//! Interval overlap arithmetic.
//!
//! Measures how much of a shift falls inside a reference window such as the
//! normal-hours window or a break.

use chrono::NaiveDateTime;

/// Returns the number of seconds shared by two intervals.
///
/// Both intervals are expected to be ordered (`start <= end`); this is the
/// caller's responsibility and is not checked. Intervals that only touch at an
/// endpoint share zero seconds.
///
/// # Example
///
/// ```
/// use billing_engine::calculation::overlap_seconds;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
///
/// // 08:00-17:00 against the 12:00-13:00 lunch window
/// let seconds = overlap_seconds(
///     at("2026-01-13 08:00:00"),
///     at("2026-01-13 17:00:00"),
///     at("2026-01-13 12:00:00"),
///     at("2026-01-13 13:00:00"),
/// );
/// assert_eq!(seconds, 3600);
/// ```
pub fn overlap_seconds(
    start_a: NaiveDateTime,
    end_a: NaiveDateTime,
    start_b: NaiveDateTime,
    end_b: NaiveDateTime,
) -> i64 {
    let overlap_start = start_a.max(start_b);
    let overlap_end = end_a.min(end_b);
    if overlap_end > overlap_start {
        (overlap_end - overlap_start).num_seconds()
    } else {
        0
    }
}
