use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime};

/// The studio runs on fixed São Paulo civil time; no DST handling anywhere.
pub const STUDIO_TZ: &str = "America/Sao_Paulo";

const STUDIO_OFFSET_SECS: i32 = -3 * 3600;

pub fn studio_offset() -> FixedOffset {
    FixedOffset::east_opt(STUDIO_OFFSET_SECS).expect("offset within bounds")
}

/// Instant whose wall-clock reading in the studio offset is `date` + `time`.
pub fn studio_instant(date: NaiveDate, time: NaiveTime) -> DateTime<FixedOffset> {
    let offset = studio_offset();
    let wall = date.and_time(time);
    (wall.and_utc() - Duration::seconds(i64::from(offset.local_minus_utc())))
        .with_timezone(&offset)
}

pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    let next_month = shift_days(first, 31);
    month_start(next_month) - Duration::days(1)
}

/// Grid row times: every `step_min` minutes from `start_hour` (inclusive) up
/// to `end_hour` (exclusive). Defaults in the agenda are 8→20 step 30.
pub fn hhmm_range(start_hour: u32, end_hour: u32, step_min: u32) -> Vec<NaiveTime> {
    let mut out = Vec::new();
    if step_min == 0 {
        return out;
    }
    for hour in start_hour..end_hour {
        let mut minute = 0;
        while minute < 60 {
            if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) {
                out.push(time);
            }
            minute += step_min;
        }
    }
    out
}

pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    // chrono accepts single-digit hours; the wire format is strictly HH:MM.
    if value.len() != 5 {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

pub fn is_valid_hhmm(value: &str) -> bool {
    parse_hhmm(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn shift_days_crosses_month_boundaries() {
        assert_eq!(shift_days(date(2025, 1, 15), 5), date(2025, 1, 20));
        assert_eq!(shift_days(date(2025, 1, 15), -5), date(2025, 1, 10));
        assert_eq!(shift_days(date(2025, 1, 30), 5), date(2025, 2, 4));
    }

    #[test]
    fn week_starts_on_monday() {
        // 2025-09-03 is a Wednesday.
        assert_eq!(week_start(date(2025, 9, 3)), date(2025, 9, 1));
        // Sunday belongs to the week that started the previous Monday.
        assert_eq!(week_start(date(2025, 9, 7)), date(2025, 9, 1));
        assert_eq!(week_start(date(2025, 9, 1)), date(2025, 9, 1));
    }

    #[test]
    fn month_bounds() {
        assert_eq!(month_start(date(2025, 9, 17)), date(2025, 9, 1));
        assert_eq!(month_end(date(2025, 9, 17)), date(2025, 9, 30));
        assert_eq!(month_end(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(month_end(date(2025, 12, 1)), date(2025, 12, 31));
    }

    #[test]
    fn hhmm_range_defaults() {
        let slots = hhmm_range(9, 11, 30);
        let rendered: Vec<String> = slots.iter().map(|t| t.format("%H:%M").to_string()).collect();
        assert_eq!(rendered, vec!["09:00", "09:30", "10:00", "10:30"]);
    }

    #[test]
    fn hhmm_range_custom_step() {
        let slots = hhmm_range(9, 10, 15);
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[1], NaiveTime::from_hms_opt(9, 15, 0).unwrap());
    }

    #[test]
    fn hhmm_range_zero_step_is_empty() {
        assert!(hhmm_range(8, 20, 0).is_empty());
    }

    #[test]
    fn hhmm_parsing() {
        assert!(is_valid_hhmm("09:30"));
        assert!(!is_valid_hhmm("9:30"));
        assert!(!is_valid_hhmm("25:00"));
        assert!(!is_valid_hhmm("09-30"));
        assert_eq!(parse_hhmm("14:45"), NaiveTime::from_hms_opt(14, 45, 0));
    }

    #[test]
    fn studio_offset_is_minus_three() {
        assert_eq!(studio_offset().local_minus_utc(), -3 * 3600);
    }

    #[test]
    fn studio_instant_keeps_the_wall_clock_reading() {
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let instant = studio_instant(date(2025, 9, 3), time);
        assert_eq!(instant.to_rfc3339(), "2025-09-03T09:00:00-03:00");
        assert_eq!(instant.date_naive(), date(2025, 9, 3));
        assert_eq!(instant.time(), time);
    }
}
