use demeter_calendar::{Anchor, Calendar, CalendarError};

#[test]
fn accepted_anchor_inputs() {
    // (input, expected canonical string, expected format code)
    let cases = [
        ("5-5", "05-05", "%m-%d"),
        ("02-5", "02-05", "%m-%d"),
        ("06-05", "06-05", "%m-%d"),
        ("5-05", "05-05", "%m-%d"),
        ("11-30", "11-30", "%m-%d"),
        ("12-31", "12-31", "%m-%d"),
        ("W01", "W01-1", "W%W-%w"),
        ("W9", "W09-1", "W%W-%w"),
        ("W01-4", "W01-4", "W%W-%w"),
        ("W9-1", "W09-1", "W%W-%w"),
        ("December", "12", "%m"),
        ("dec", "12", "%m"),
        ("jan", "01", "%m"),
        ("Jan", "01", "%m"),
        ("4", "04", "%m"),
    ];
    for (input, canonical, code) in cases {
        let anchor: Anchor = input.parse().unwrap_or_else(|e| {
            panic!("anchor {input:?} should parse, got {e}");
        });
        assert_eq!(anchor.to_string(), canonical, "canonical form of {input:?}");
        assert_eq!(anchor.format_code(), code, "format code of {input:?}");
        // Calendars accept the same grammar.
        assert!(Calendar::new(input).is_ok());
    }
}

#[test]
fn rejected_anchor_inputs() {
    let format_errors = [
        "w12",     // lowercase week marker
        "juli",    // non-English month name
        "July 5",  // month name plus day
        "July-5",
        "jan 20",
        "jan-20",
        "",
        "2021-12-31", // full dates are not anchors
    ];
    for input in format_errors {
        assert!(
            matches!(
                Calendar::new(input),
                Err(CalendarError::InvalidAnchorFormat { .. })
            ),
            "anchor {input:?} should be a format error"
        );
    }

    let value_errors = [
        "0",     // month below 1
        "13",    // month above 12
        "12-0",  // day below 1
        "12-32", // day above 31
        "31-12", // month/day swapped
        "4-31",  // April has 30 days
        "2-29",  // not present in every year
        "W60",   // week above 52
        "W53",   // not every year has a 53rd week
        "W01-0", // weekday below Monday
        "W01-8", // weekday above Sunday
    ];
    for input in value_errors {
        assert!(
            matches!(
                Calendar::new(input),
                Err(CalendarError::InvalidAnchorValue { .. })
            ),
            "anchor {input:?} should be a value error"
        );
    }
}

#[test]
fn canonical_forms_are_fixed_points() {
    for input in [
        "5-5", "02-5", "11-30", "12-31", "W01", "W9-1", "W01-4", "December", "dec", "4",
    ] {
        let anchor: Anchor = input.parse().unwrap();
        let canonical = anchor.to_string();
        let reparsed: Anchor = canonical.parse().unwrap();
        assert_eq!(reparsed, anchor);
        assert_eq!(reparsed.to_string(), canonical);
    }
}
