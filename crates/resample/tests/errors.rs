use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use demeter_calendar::{daily_calendar, Calendar, CalendarError, Role};
use demeter_resample::{Reduction, ResampleError, Tabular};

fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_time(NaiveTime::MIN)
}

fn daily_axis(from: NaiveDateTime, n: u64) -> Vec<NaiveDateTime> {
    (0..n).map(|i| from + Days::new(i)).collect()
}

fn one_year_of_ones() -> Tabular {
    let time = daily_axis(ts(2019, 1, 1), 365);
    Tabular::from_series(time, "x", vec![1.0; 365]).unwrap()
}

#[test]
fn error_unknown_method_name() {
    assert_eq!(
        "geometric_mean".parse::<Reduction>().unwrap_err(),
        ResampleError::UnknownMethod {
            name: "geometric_mean".to_string()
        }
    );
}

#[test]
fn error_resampling_before_mapping() {
    let mut cal = Calendar::new("12-31").unwrap();
    cal.add_intervals(Role::Target, "20d", 1).unwrap();
    let result = demeter_resample::resample_tabular(&cal, &one_year_of_ones(), &Reduction::Mean);
    assert_eq!(
        result.unwrap_err(),
        ResampleError::Calendar(CalendarError::UnmappedCalendar)
    );
}

#[test]
fn error_resampling_without_intervals() {
    let mut cal = Calendar::new("12-31").unwrap();
    cal.map_years(2019, 2019).unwrap();
    let result = demeter_resample::resample_tabular(&cal, &one_year_of_ones(), &Reduction::Mean);
    assert_eq!(result.unwrap_err(), ResampleError::NoIntervals);
}

#[test]
fn error_reserved_column_name() {
    let mut cal = Calendar::new("12-31").unwrap();
    cal.add_intervals(Role::Target, "20d", 1).unwrap();
    cal.map_years(2019, 2019).unwrap();

    let time = daily_axis(ts(2019, 1, 1), 365);
    let data = Tabular::from_series(time, "i_interval", vec![1.0; 365]).unwrap();
    assert_eq!(
        demeter_resample::resample_tabular(&cal, &data, &Reduction::Mean).unwrap_err(),
        ResampleError::ReservedName {
            name: "i_interval".to_string()
        }
    );
}

#[test]
fn error_insufficient_coverage_surfaces_through_resample() {
    // A data-mapped calendar that cannot realize a single anchor year fails
    // inside materialization and the error is passed through untouched.
    let mut cal = daily_calendar("12-31", "180d", 1, 0, false).unwrap();
    let data = one_year_of_ones();
    cal.map_to_data(data.time()).unwrap();

    let result = demeter_resample::resample_tabular(&cal, &data, &Reduction::Mean);
    assert!(matches!(
        result.unwrap_err(),
        ResampleError::Calendar(CalendarError::InsufficientDataCoverage { .. })
    ));
}

#[test]
fn error_empty_input_rejected_at_construction() {
    assert_eq!(
        Tabular::new(vec![], vec![]).unwrap_err(),
        ResampleError::EmptyTimeAxis
    );
}
