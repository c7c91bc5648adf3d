use std::{thread, time::Instant};

use sweet_board::{HintStatus, LoggingBackend, PowerHint, PowerHintRouter, PowerTuning};

#[test]
fn concurrent_flings_never_leak_requests() {
    let router = PowerHintRouter::new(LoggingBackend::new(), PowerTuning::default());

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..200 {
                    let st = router.dispatch(PowerHint::Interaction { duration_ms: Some(1200) });
                    assert_eq!(st, HintStatus::Handled);
                }
            });
        }
    });

    router.with_backend(|b| assert_eq!(b.active(), 1));
    assert_eq!(router.snapshot().outstanding(), 1);
}

#[test]
fn concurrent_launch_starts_open_one_cycle() {
    let router = PowerHintRouter::new(LoggingBackend::new(), PowerTuning::default());

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| router.dispatch(PowerHint::Launch { started: true }));
        }
    });

    router.with_backend(|b| assert_eq!(b.active(), 1));
    assert_eq!(router.dispatch(PowerHint::Launch { started: false }), HintStatus::Handled);
    router.with_backend(|b| assert_eq!(b.active(), 0));
}

#[test]
fn raw_hal_codes_round_trip() {
    let router = PowerHintRouter::new(LoggingBackend::new(), PowerTuning::default());
    let now = Instant::now();

    assert_eq!(router.dispatch_at(PowerHint::from_raw(2, None), now).code(), 0);
    assert_eq!(router.dispatch_at(PowerHint::from_raw(6, Some(1)), now).code(), -1);
}
