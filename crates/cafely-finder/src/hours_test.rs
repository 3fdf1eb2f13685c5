use chrono::{FixedOffset, Utc};

use super::*;

// 2024-06-03 is a Monday.
fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, minute, 0).unwrap()
}

fn check(raw: &str, now: &DateTime<Utc>) -> OpeningHours {
    interpret_at(Some(raw), now)
}

// -----------------------------------------------------------------------
// Open / closed
// -----------------------------------------------------------------------

#[test]
fn weekday_range_open_during_hours() {
    let hours = check("Mo-Fr 08:00-18:00", &at(3, 10, 0));
    assert_eq!(hours.status, HoursStatus::OpenNow);
    assert_eq!(hours.is_open_now, Some(true));
    assert_eq!(hours.next_change.as_deref(), Some("2024-06-03T18:00:00+00:00"));
    assert!(hours.error.is_none());
}

#[test]
fn weekend_closed_until_monday_morning() {
    let hours = check("Mo-Fr 08:00-18:00", &at(8, 10, 0));
    assert_eq!(hours.status, HoursStatus::Closed);
    assert_eq!(hours.is_open_now, Some(false));
    assert_eq!(hours.next_change.as_deref(), Some("2024-06-10T08:00:00+00:00"));
}

#[test]
fn always_open_has_no_next_change() {
    let hours = check("24/7", &at(5, 3, 30));
    assert_eq!(hours.status, HoursStatus::OpenNow);
    assert_eq!(hours.next_change, None);
}

#[test]
fn overnight_span_carries_into_next_day() {
    let hours = check("Mo-Su 18:00-02:00", &at(4, 1, 0));
    assert_eq!(hours.status, HoursStatus::OpenNow);
    assert_eq!(hours.next_change.as_deref(), Some("2024-06-04T02:00:00+00:00"));
}

#[test]
fn open_end_runs_until_midnight() {
    let hours = check("18:00+", &at(3, 23, 0));
    assert_eq!(hours.status, HoursStatus::OpenNow);
    assert_eq!(hours.next_change.as_deref(), Some("2024-06-04T00:00:00+00:00"));
}

#[test]
fn later_rule_overrides_earlier_for_its_days() {
    let hours = check("Mo-Fr 08:00-18:00; We off", &at(5, 10, 0));
    assert_eq!(hours.status, HoursStatus::Closed);
    assert_eq!(hours.next_change.as_deref(), Some("2024-06-06T08:00:00+00:00"));

    let tuesday = check("Mo-Fr 08:00-18:00; We off", &at(4, 10, 0));
    assert_eq!(tuesday.status, HoursStatus::OpenNow);
}

#[test]
fn wrapping_weekday_range() {
    let sunday = check("Fr-Mo 10:00-14:00", &at(9, 11, 0));
    assert_eq!(sunday.status, HoursStatus::OpenNow);

    let wednesday = check("Fr-Mo 10:00-14:00", &at(5, 11, 0));
    assert_eq!(wednesday.status, HoursStatus::Closed);
    assert_eq!(wednesday.next_change.as_deref(), Some("2024-06-07T10:00:00+00:00"));
}

#[test]
fn lunch_break_between_spans() {
    let hours = check("Mo-Fr 08:00-12:00,13:00-17:00", &at(3, 12, 30));
    assert_eq!(hours.status, HoursStatus::Closed);
    assert_eq!(hours.next_change.as_deref(), Some("2024-06-03T13:00:00+00:00"));
}

#[test]
fn spaced_lists_are_tolerated() {
    let wednesday = check("Mo, We 09:00-12:00, 14:00-16:00", &at(5, 15, 0));
    assert_eq!(wednesday.status, HoursStatus::OpenNow);

    let tuesday = check("Mo, We 09:00-12:00", &at(4, 10, 0));
    assert_eq!(tuesday.status, HoursStatus::Closed);
}

#[test]
fn additional_rule_adds_days() {
    let hours = check("Mo-Fr 08:00-12:00, Sa 09:00-11:00", &at(8, 10, 0));
    assert_eq!(hours.status, HoursStatus::OpenNow);
}

#[test]
fn additional_off_rule_removes_only_its_span() {
    let raw = "Mo-Fr 08:00-18:00, We 12:00-13:00 off";

    let morning = check(raw, &at(5, 10, 0));
    assert_eq!(morning.status, HoursStatus::OpenNow);
    assert_eq!(morning.next_change.as_deref(), Some("2024-06-05T12:00:00+00:00"));

    let lunch = check(raw, &at(5, 12, 30));
    assert_eq!(lunch.status, HoursStatus::Closed);
    assert_eq!(lunch.next_change.as_deref(), Some("2024-06-05T13:00:00+00:00"));

    let thursday_lunch = check(raw, &at(6, 12, 30));
    assert_eq!(thursday_lunch.status, HoursStatus::OpenNow);
}

#[test]
fn additional_off_rule_without_span_closes_the_day() {
    let hours = check("Mo-Fr 08:00-18:00, We off", &at(5, 10, 0));
    assert_eq!(hours.status, HoursStatus::Closed);
    assert_eq!(hours.next_change.as_deref(), Some("2024-06-06T08:00:00+00:00"));
}

#[test]
fn spaced_time_ranges_are_tolerated() {
    let hours = check("Mo-Fr 08:00 - 18:00", &at(3, 10, 0));
    assert_eq!(hours.status, HoursStatus::OpenNow);
    assert_eq!(hours.next_change.as_deref(), Some("2024-06-03T18:00:00+00:00"));
    assert!(hours.error.is_none());
}

#[test]
fn double_pipe_separates_rules() {
    let hours = check("Mo-Fr 09:00-17:00 || Sa 10:00-12:00", &at(8, 11, 0));
    assert_eq!(hours.status, HoursStatus::OpenNow);
}

#[test]
fn comments_are_ignored() {
    let hours = check(r#"Mo-Fr 08:00-18:00 "call ahead on holidays""#, &at(3, 9, 0));
    assert_eq!(hours.status, HoursStatus::OpenNow);
}

#[test]
fn public_holiday_rules_never_apply() {
    let hours = check("Mo-Su 07:00-19:00; PH off", &at(3, 9, 0));
    assert_eq!(hours.status, HoursStatus::OpenNow);
}

#[test]
fn unknown_modifier_counts_as_closed() {
    let hours = check("Mo-Fr 08:00-18:00; Mo unknown", &at(3, 9, 0));
    assert_eq!(hours.status, HoursStatus::Closed);
}

#[test]
fn next_change_uses_caller_offset() {
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    let now = offset.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
    let hours = interpret_at(Some("Mo-Fr 08:00-18:00"), &now);
    assert_eq!(hours.next_change.as_deref(), Some("2024-06-03T18:00:00+02:00"));
}

// -----------------------------------------------------------------------
// No data
// -----------------------------------------------------------------------

#[test]
fn missing_value_is_no_data_without_error() {
    let hours = interpret_at(None, &at(3, 9, 0));
    assert_eq!(hours.status, HoursStatus::NoData);
    assert_eq!(hours.is_open_now, None);
    assert!(hours.error.is_none());
    assert!(hours.raw.is_none());

    let blank = check("   ", &at(3, 9, 0));
    assert_eq!(blank.status, HoursStatus::NoData);
}

#[test]
fn month_selector_is_unsupported() {
    let hours = check("Jan-Mar 08:00-18:00", &at(3, 9, 0));
    assert_eq!(hours.status, HoursStatus::NoData);
    assert_eq!(hours.raw.as_deref(), Some("Jan-Mar 08:00-18:00"));
    let error = hours.error.expect("error recorded");
    assert!(error.contains("unsupported"), "got: {error}");
}

#[test]
fn out_of_range_time_is_rejected() {
    let hours = check("Mo-Fr 25:00-26:00", &at(3, 9, 0));
    assert_eq!(hours.status, HoursStatus::NoData);
    assert!(hours.error.is_some());
}

#[test]
fn holiday_only_value_has_no_data() {
    let hours = check("PH off", &at(3, 9, 0));
    assert_eq!(hours.status, HoursStatus::NoData);
}

#[test]
fn unterminated_comment_is_rejected() {
    assert_eq!(
        parse_schedule(r#"Mo 08:00-10:00 "oops"#),
        Err(HoursParseError::UnterminatedComment)
    );
}

#[test]
fn status_serialises_as_display_label() {
    assert_eq!(serde_json::to_string(&HoursStatus::OpenNow).unwrap(), "\"Open now\"");
    assert_eq!(HoursStatus::NoData.to_string(), "No data");
}

#[test]
fn subtracting_spans_splits_and_trims() {
    let open = [Span { start: 480, end: 1080 }];
    let closed = [
        Span { start: 720, end: 780 },
        Span { start: 1020, end: 1200 },
    ];
    assert_eq!(
        subtract_spans(&open, &closed),
        vec![Span { start: 480, end: 720 }, Span { start: 780, end: 1020 }]
    );
}
