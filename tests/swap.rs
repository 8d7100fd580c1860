#![forbid(unsafe_code)]
use equipe::{
    assign_shifts, swap, swap_in_place, Day, Ledger, Rejection, Roster, Scheduler, SchedError,
    Shift, ShiftId, SwapError, Worker, WorkerId,
};

fn wid(id: u32) -> WorkerId {
    WorkerId::new(id).unwrap()
}
fn sid(id: u32) -> ShiftId {
    ShiftId::new(id).unwrap()
}

fn bob_on_monday() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.assign(wid(2), sid(1));
    ledger
}

#[test]
fn swap_hands_the_shift_over() {
    let workers = vec![
        Worker::new(1, "Ana", 40, []).unwrap(),
        Worker::new(2, "Bob", 40, []).unwrap(),
    ];
    let shifts = vec![Shift::new(1, Day::Monday, 8, 8, 1).unwrap()];
    let ledger = bob_on_monday();

    let report = swap(&ledger, wid(1), wid(2), sid(1), &workers, &shifts);
    assert!(report.success);
    insta::assert_snapshot!(report.message, @"worker 1 now holds shift 1 (was worker 2)");

    let updated = report.updated_ledger.unwrap();
    assert!(updated.assigned_shifts_for(wid(1)).contains(&sid(1)));
    assert!(!updated.assigned_shifts_for(wid(2)).contains(&sid(1)));
    assert!(updated.is_consistent());
    // l'original n'est pas touché par la variante non mutante
    assert_eq!(ledger, bob_on_monday());
}

#[test]
fn swap_fails_when_holder_does_not_hold_the_shift() {
    let workers = vec![
        Worker::new(1, "Ana", 40, []).unwrap(),
        Worker::new(2, "Bob", 40, []).unwrap(),
    ];
    let shifts = vec![Shift::new(1, Day::Monday, 8, 8, 1).unwrap()];

    let report = swap(&Ledger::new(), wid(1), wid(2), sid(1), &workers, &shifts);
    assert!(!report.success);
    assert!(report.message.contains("not assigned to shift"));
    assert!(report.updated_ledger.is_none());
}

#[test]
fn swap_fails_on_unavailable_day_and_keeps_the_ledger() {
    let workers = vec![
        Worker::new(1, "Ana", 40, [Day::Monday]).unwrap(),
        Worker::new(2, "Bob", 40, []).unwrap(),
    ];
    let shifts = vec![Shift::new(1, Day::Monday, 8, 8, 1).unwrap()];
    let mut ledger = bob_on_monday();

    let err = swap_in_place(&mut ledger, wid(1), wid(2), sid(1), &workers, &shifts).unwrap_err();
    assert!(matches!(
        err,
        SwapError::Rejected(Rejection::UnavailableDay { day: Day::Monday, .. })
    ));
    assert!(err.to_string().contains("unavailable day"));
    assert!(ledger.contains(wid(2), sid(1)));
    assert!(!ledger.contains(wid(1), sid(1)));
}

#[test]
fn swap_respects_the_takers_hour_cap() {
    let workers = vec![
        Worker::new(1, "Ana", 10, []).unwrap(),
        Worker::new(2, "Bob", 40, []).unwrap(),
    ];
    let shifts = vec![
        Shift::new(1, Day::Monday, 8, 8, 1).unwrap(),
        Shift::new(2, Day::Tuesday, 8, 6, 1).unwrap(),
    ];
    let mut ledger = bob_on_monday();
    ledger.assign(wid(1), sid(2));
    let before = ledger.clone();

    let report = swap(&ledger, wid(1), wid(2), sid(1), &workers, &shifts);
    assert!(!report.success);
    assert!(report.message.contains("hour cap exceeded"));

    let err = swap_in_place(&mut ledger, wid(1), wid(2), sid(1), &workers, &shifts).unwrap_err();
    assert!(matches!(
        err,
        SwapError::Rejected(Rejection::HourCapExceeded {
            remaining: 4,
            requested: 8,
            ..
        })
    ));
    assert_eq!(ledger, before);
}

#[test]
fn swap_reports_time_overlap() {
    let workers = vec![
        Worker::new(1, "Ana", 40, []).unwrap(),
        Worker::new(2, "Bob", 40, []).unwrap(),
    ];
    let shifts = vec![
        Shift::new(1, Day::Monday, 8, 8, 1).unwrap(),
        Shift::new(2, Day::Monday, 14, 6, 1).unwrap(),
    ];
    let mut ledger = bob_on_monday();
    ledger.assign(wid(1), sid(2));

    let report = swap(&ledger, wid(1), wid(2), sid(1), &workers, &shifts);
    assert!(!report.success);
    assert!(report.message.contains("time overlap"));
}

#[test]
fn swap_after_assignment_keeps_all_invariants() {
    let workers = vec![
        Worker::new(1, "Ana", 40, [Day::Sunday]).unwrap(),
        Worker::new(2, "Bob", 30, [Day::Monday, Day::Friday]).unwrap(),
        Worker::new(3, "Carlos", 40, []).unwrap(),
    ];
    let shifts = vec![
        Shift::new(1, Day::Monday, 8, 8, 1).unwrap(),
        Shift::new(2, Day::Tuesday, 8, 8, 1).unwrap(),
    ];
    let roster = Roster::new(workers.clone(), shifts.clone()).unwrap();
    let mut scheduler = Scheduler::new(roster);
    let out = scheduler.assign();
    assert!(out.ledger.contains(wid(1), sid(1)));
    assert!(out.ledger.contains(wid(2), sid(2)));

    // Bob ne travaille pas le lundi
    let err = scheduler.swap(sid(1), wid(2), wid(1)).unwrap_err();
    assert!(matches!(err, SchedError::SwapInvalid(SwapError::Rejected(_))));
    assert_eq!(scheduler.ledger(), &out.ledger);

    scheduler.swap(sid(1), wid(3), wid(1)).unwrap();
    assert!(scheduler.ledger().contains(wid(3), sid(1)));
    assert!(scheduler.ledger().is_consistent());
    assert!(scheduler.detect_conflicts().is_empty());

    let hours = scheduler.hours_by_worker();
    assert_eq!(hours[&wid(1)], 0);
    assert_eq!(hours[&wid(3)], 8);

    // un second passage du moteur repart de zéro
    let again = assign_shifts(&workers, &shifts);
    assert_eq!(again, out);
}

#[test]
fn unknown_ids_fail_without_touching_the_ledger() {
    let workers = vec![Worker::new(2, "Bob", 40, []).unwrap()];
    let shifts = vec![Shift::new(1, Day::Monday, 8, 8, 1).unwrap()];

    let report = swap(&bob_on_monday(), wid(9), wid(2), sid(1), &workers, &shifts);
    assert!(!report.success);
    assert!(report.message.contains("unknown worker"));

    let report = swap(&bob_on_monday(), wid(2), wid(2), sid(5), &workers, &shifts);
    assert!(report.message.contains("unknown shift"));
}

#[test]
fn taker_already_on_the_shift_ends_up_holding_it_once() {
    let workers = vec![
        Worker::new(1, "Ana", 8, []).unwrap(),
        Worker::new(2, "Bob", 40, []).unwrap(),
    ];
    let shifts = vec![Shift::new(1, Day::Monday, 8, 8, 2).unwrap()];
    let mut ledger = bob_on_monday();
    ledger.assign(wid(1), sid(1));

    let report = swap(&ledger, wid(1), wid(2), sid(1), &workers, &shifts);
    assert!(report.success);
    let updated = report.updated_ledger.unwrap();
    assert_eq!(
        updated.assigned_workers_for(sid(1)).iter().copied().collect::<Vec<_>>(),
        vec![wid(1)]
    );
    assert_eq!(updated.assigned_shifts_for(wid(1)).len(), 1);
    assert!(updated.assigned_shifts_for(wid(2)).is_empty());
    assert!(updated.is_consistent());
}

#[test]
fn swapping_a_worker_with_themself_keeps_the_shift() {
    let workers = vec![Worker::new(2, "Bob", 8, []).unwrap()];
    let shifts = vec![Shift::new(1, Day::Monday, 8, 8, 1).unwrap()];
    let mut ledger = bob_on_monday();

    swap_in_place(&mut ledger, wid(2), wid(2), sid(1), &workers, &shifts).unwrap();
    assert_eq!(ledger, bob_on_monday());
    assert!(ledger.is_consistent());

    let report = swap(&ledger, wid(2), wid(2), sid(1), &workers, &shifts);
    assert!(report.success);
    insta::assert_snapshot!(report.message, @"worker 2 now holds shift 1 (was worker 2)");
    assert_eq!(report.updated_ledger, Some(bob_on_monday()));
}
