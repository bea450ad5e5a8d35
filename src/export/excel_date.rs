use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Day zero of the Excel 1900 date system (with its leap-year quirk folded in).
fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
}

/// Fraction of a day, the Excel representation of a time of day.
pub(crate) fn time_serial(t: NaiveTime) -> f64 {
    f64::from(t.num_seconds_from_midnight()) / 86_400.0
}

pub(crate) fn datetime_serial(dt: NaiveDateTime) -> f64 {
    let days = (dt.date() - excel_epoch().date()).num_days() as f64;
    days + time_serial(dt.time())
}

pub(crate) fn date_serial(d: NaiveDate) -> f64 {
    datetime_serial(d.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_serials() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(date_serial(d), 45658.0);

        let noon = d.and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(datetime_serial(noon), 45658.5);
        assert_eq!(time_serial(NaiveTime::from_hms_opt(6, 0, 0).unwrap()), 0.25);
    }
}
