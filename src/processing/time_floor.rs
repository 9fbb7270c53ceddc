use chrono::{DateTime, Duration, Utc};

/// Zaokrúhli čas nadol na násobok `minutes` minút od začiatku epochy.
/// Pre `minutes == 0` vráti čas bez zmeny.
pub fn floor_timestamp(ts: DateTime<Utc>, minutes: u32) -> DateTime<Utc> {
    if minutes == 0 {
        return ts;
    }
    let step = i64::from(minutes) * 60;
    let seconds = ts.timestamp();
    let floored = seconds - seconds.rem_euclid(step);
    let nanos = Duration::nanoseconds(i64::from(ts.timestamp_subsec_nanos()));
    ts - Duration::seconds(seconds - floored) - nanos
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn floors_to_five_minutes() {
        let ts = Utc.with_ymd_and_hms(2022, 1, 1, 10, 7, 59).unwrap();
        let floored = floor_timestamp(ts, 5);
        assert_eq!(floored, Utc.with_ymd_and_hms(2022, 1, 1, 10, 5, 0).unwrap());
    }

    #[test]
    fn aligned_and_zero_step_are_unchanged() {
        let ts = Utc.with_ymd_and_hms(2022, 1, 1, 10, 30, 0).unwrap();
        assert_eq!(floor_timestamp(ts, 30), ts);
        let odd = Utc.with_ymd_and_hms(2022, 1, 1, 10, 31, 12).unwrap();
        assert_eq!(floor_timestamp(odd, 0), odd);
    }

    #[test]
    fn floors_before_epoch() {
        let ts = Utc.with_ymd_and_hms(1969, 12, 31, 23, 58, 0).unwrap();
        assert_eq!(
            floor_timestamp(ts, 5),
            Utc.with_ymd_and_hms(1969, 12, 31, 23, 55, 0).unwrap()
        );
    }
}
