use chrono::Days;
use demeter_calendar::{calendar_shifter, staggered_calendar, Calendar, Offset, Role};

fn base_calendar() -> Calendar {
    let mut cal = Calendar::new("07-01").unwrap();
    cal.add_intervals(Role::Target, "7d", 1).unwrap();
    cal.add_intervals_with_gap(Role::Precursor, "7d", "14d", 1)
        .unwrap();
    cal.add_intervals(Role::Precursor, "7d", 3).unwrap();
    cal
}

#[test]
fn staggered_ensemble_moves_in_lockstep() {
    let mut cal = base_calendar();
    cal.map_years(2020, 2020).unwrap();

    let ensemble = staggered_calendar(&cal, Offset::days(7), 3).unwrap();
    assert_eq!(ensemble.len(), 4);

    let base = cal.get_intervals().unwrap();
    for (i, member) in ensemble.iter().enumerate() {
        let mut member = member.clone();
        member.map_years(2020, 2020).unwrap();
        let intervals = member.get_intervals().unwrap();
        let offset = Days::new(7 * i as u64);
        // Every interval of every member is the base interval moved forward
        // by the member's multiple of the shift.
        for bin in base.flat() {
            let moved = intervals.get(bin.anchor_year, bin.i_interval).unwrap();
            assert_eq!(moved.left(), bin.span.left() + offset);
            assert_eq!(moved.right(), bin.span.right() + offset);
        }
    }
}

#[test]
fn shift_round_trip_restores_realized_intervals() {
    let mut cal = base_calendar();
    cal.map_years(2019, 2021).unwrap();
    let base = cal.get_intervals().unwrap();

    let there = calendar_shifter(&cal, Offset::new(1, 1, 3)).unwrap();
    let back = calendar_shifter(&there, -Offset::new(1, 1, 3)).unwrap();
    assert_eq!(back.get_intervals().unwrap(), base);
}

#[test]
fn week_shift_on_month_gaps() {
    let mut cal = Calendar::new("12-31").unwrap();
    cal.add_intervals_with_gap(Role::Target, "1M", "1M", 1).unwrap();
    cal.add_intervals(Role::Precursor, "1M", 1).unwrap();

    let shifted = calendar_shifter(&cal, Offset::weeks(2)).unwrap();
    // Units are kept apart: a week shift on a month gap yields a composite
    // offset rather than an approximate day count.
    assert_eq!(shifted.targets()[0].gap(), Offset::new(1, 2, 0));
    assert_eq!(shifted.precursors()[0].gap(), Offset::new(0, -2, 0));
}

#[test]
fn shifted_calendar_keeps_anchor_years() {
    let mut cal = base_calendar();
    cal.map_years(2018, 2022).unwrap();
    let mut shifted = calendar_shifter(&cal, Offset::days(14)).unwrap();
    shifted.map_years(2018, 2022).unwrap();

    assert_eq!(
        cal.get_intervals().unwrap().anchor_years(),
        shifted.get_intervals().unwrap().anchor_years()
    );
}
