use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Europe::Paris;
use common::model::stamp::LocalStamp;

/// Wall-clock fields of `instant` in Europe/Paris, daylight saving included.
pub fn paris_stamp(instant: DateTime<Utc>) -> LocalStamp {
    let local = instant.with_timezone(&Paris);

    LocalStamp {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        time: format!("{}:{:02}", local.hour(), local.minute()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stamp_at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> LocalStamp {
        paris_stamp(Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap())
    }

    fn expected(year: i32, month: u32, day: u32, time: &str) -> LocalStamp {
        LocalStamp {
            year,
            month,
            day,
            time: time.to_string(),
        }
    }

    #[test]
    fn winter_is_one_hour_ahead() {
        assert_eq!(stamp_at(2024, 1, 15, 8, 5), expected(2024, 1, 15, "9:05"));
    }

    #[test]
    fn summer_is_two_hours_ahead_and_rolls_the_date() {
        assert_eq!(stamp_at(2024, 7, 1, 22, 30), expected(2024, 7, 2, "0:30"));
    }

    #[test]
    fn new_year_rolls_over_locally() {
        assert_eq!(
            stamp_at(2023, 12, 31, 23, 15),
            expected(2024, 1, 1, "0:15")
        );
    }

    #[test]
    fn spring_forward_skips_two_oclock() {
        // 2024-03-31: clocks jump from 02:00 CET to 03:00 CEST at 01:00 UTC.
        assert_eq!(stamp_at(2024, 3, 31, 0, 59), expected(2024, 3, 31, "1:59"));
        assert_eq!(stamp_at(2024, 3, 31, 1, 0), expected(2024, 3, 31, "3:00"));
    }

    #[test]
    fn fall_back_repeats_two_oclock() {
        // 2024-10-27: clocks go back from 03:00 CEST to 02:00 CET at 01:00 UTC.
        assert_eq!(stamp_at(2024, 10, 27, 0, 30), expected(2024, 10, 27, "2:30"));
        assert_eq!(stamp_at(2024, 10, 27, 1, 30), expected(2024, 10, 27, "2:30"));
    }
}
