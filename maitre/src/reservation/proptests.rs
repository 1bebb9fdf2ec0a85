//! Property-based tests for booking values and time windows.

use super::{BookingRequest, PartySize};
use crate::ids::CustomerId;
use crate::table::Capacity;
use crate::window::TimeWindow;
use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;

fn time_strategy() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

fn window_strategy() -> impl Strategy<Value = TimeWindow> {
    (time_strategy(), 1u32..=600).prop_map(|(t, d)| TimeWindow::new(t, d).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        .. ProptestConfig::default()
    })]

    // Overlap does not depend on argument order
    #[test]
    fn overlap_is_symmetric(a in window_strategy(), b in window_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    // Overlap agrees with the half-open interval definition
    #[test]
    fn overlap_matches_interval_math(a in window_strategy(), b in window_strategy()) {
        let expected = a.start() < b.end() && b.start() < a.end();
        prop_assert_eq!(a.overlaps(&b), expected);
    }

    // A window that starts exactly when another ends never overlaps it
    #[test]
    fn adjacent_windows_do_not_overlap(start in time_strategy(), first in 1u32..=300, second in 1u32..=300) {
        let a = TimeWindow::new(start, first).unwrap();
        prop_assume!(a.end() < 24 * 60);
        let b_start = NaiveTime::from_hms_opt(a.end() / 60, a.end() % 60, 0).unwrap();
        let b = TimeWindow::new(b_start, second).unwrap();
        prop_assert!(!a.overlaps(&b));
    }

    // Party sizes are accepted exactly on 1..=20
    #[test]
    fn party_size_range(n in 0u32..100) {
        prop_assert_eq!(PartySize::try_from(n).is_ok(), (1..=20).contains(&n));
    }

    // A table seats a party exactly when it has at least as many seats
    #[test]
    fn capacity_seats_party(seats in 1u32..=20, party in 1u32..=20) {
        let capacity = Capacity::try_from(seats).unwrap();
        let party_size = PartySize::try_from(party).unwrap();
        prop_assert_eq!(capacity.seats(party_size), party <= seats);
    }

    // Requests validate only when they start strictly after now
    #[test]
    fn request_must_be_in_future(offset in -600i64..600) {
        let now = NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let start = now + chrono::Duration::minutes(offset);
        let request = BookingRequest::new(CustomerId::new(1), start.date(), start.time(), 2);
        prop_assert_eq!(request.validate(now).is_ok(), offset > 0);
    }
}
