//! Property-based tests for the engine invariants.
//!
//! Each case runs a random sequence of calls against a fresh database and
//! then inspects the stored state directly.

use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;

use crate::database::test_util::{create_test_database, insert_test_table, test_now};
use crate::database::Database;
use crate::ids::{CustomerId, WaitlistId};
use crate::operations::{FixedClock, ReservationLifecycle, WaitlistQueue};
use crate::reservation::BookingRequest;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, day).unwrap()
}

// (table index, day, start in 15-minute steps from 10:00, duration in 15-minute steps)
fn booking_strategy() -> impl Strategy<Value = (usize, u32, u32, u32)> {
    (0usize..3, 1u32..=2, 0u32..48, 1u32..=16)
}

#[derive(Debug, Clone)]
enum QueueOp {
    Join { slot: usize, party: u32 },
    Seat(usize),
    Remove(usize),
    Expire(usize),
    Purge(usize),
}

fn queue_op_strategy() -> impl Strategy<Value = QueueOp> {
    prop_oneof![
        3 => (0usize..2, 1u32..=8).prop_map(|(slot, party)| QueueOp::Join { slot, party }),
        1 => any::<usize>().prop_map(QueueOp::Seat),
        1 => any::<usize>().prop_map(QueueOp::Remove),
        1 => any::<usize>().prop_map(QueueOp::Expire),
        1 => any::<usize>().prop_map(QueueOp::Purge),
    ]
}

fn pick(joined: &[WaitlistId], i: usize) -> Option<WaitlistId> {
    (!joined.is_empty()).then(|| joined[i % joined.len()])
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    // No two active reservations on one table and date overlap, whatever
    // sequence of bookings and cancellations was attempted
    #[test]
    fn active_reservations_never_overlap(
        bookings in prop::collection::vec((booking_strategy(), any::<bool>()), 1..25)
    ) {
        let mut db = create_test_database();
        let tables = [
            insert_test_table(db.connection(), "A", 4),
            insert_test_table(db.connection(), "B", 4),
            insert_test_table(db.connection(), "C", 6),
        ];

        {
            let mut lc = ReservationLifecycle::with_clock(&mut db, FixedClock(test_now()));
            for ((table, day, start, length), cancel) in bookings {
                let time = NaiveTime::from_hms_opt(10, 0, 0).unwrap()
                    + chrono::Duration::minutes(i64::from(start) * 15);
                let request = BookingRequest::new(CustomerId::new(1), date(day), time, 2)
                    .with_duration(length * 15);
                if let Ok(id) = lc.create(tables[table], &request) {
                    if cancel {
                        lc.cancel(id).unwrap();
                    }
                }
            }
        }

        for table in tables {
            for day in 1..=2 {
                let active =
                    Database::active_reservations_for_table_on(db.connection(), table, date(day))
                        .unwrap();
                for (i, a) in active.iter().enumerate() {
                    for b in &active[i + 1..] {
                        prop_assert!(
                            !a.window().unwrap().overlaps(&b.window().unwrap()),
                            "{:?} overlaps {:?}", a, b
                        );
                    }
                }
            }
        }
    }

    // Active positions in every queue are exactly 1..=n after any sequence
    // of joins and departures
    #[test]
    fn waitlist_positions_stay_contiguous(
        ops in prop::collection::vec(queue_op_strategy(), 1..40)
    ) {
        let mut db = create_test_database();
        let slots = [
            (date(1), NaiveTime::from_hms_opt(19, 0, 0).unwrap()),
            (date(1), NaiveTime::from_hms_opt(20, 0, 0).unwrap()),
        ];

        {
            let mut q = WaitlistQueue::with_clock(&mut db, FixedClock(test_now()));
            let mut joined = Vec::new();
            for op in ops {
                // Departures on entries that already left fail cleanly and are ignored
                match op {
                    QueueOp::Join { slot, party } => {
                        let (d, t) = slots[slot];
                        joined.push(q.join(CustomerId::new(1), d, t, party).unwrap().id);
                    }
                    QueueOp::Seat(i) => {
                        if let Some(id) = pick(&joined, i) {
                            let _ = q.seat(id);
                        }
                    }
                    QueueOp::Remove(i) => {
                        if let Some(id) = pick(&joined, i) {
                            let _ = q.remove(id);
                        }
                    }
                    QueueOp::Expire(i) => {
                        if let Some(id) = pick(&joined, i) {
                            let _ = q.expire(id);
                        }
                    }
                    QueueOp::Purge(i) => {
                        if let Some(id) = pick(&joined, i) {
                            let _ = q.purge(id);
                        }
                    }
                }
            }
        }

        for (d, t) in slots {
            let positions: Vec<u32> = Database::active_waitlist_for_slot(db.connection(), d, t)
                .unwrap()
                .into_iter()
                .map(|e| e.position)
                .collect();
            let expected: Vec<u32> = (1..=u32::try_from(positions.len()).unwrap()).collect();
            prop_assert_eq!(positions, expected);
        }
    }
}
