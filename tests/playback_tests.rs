use std::time::{Duration, Instant};

use sheetscroll::playback::{DWELL_POLL, PAUSE_POLL, Tick, Timing, Transport};

fn timing(speed: f32) -> Timing {
    Timing::for_speed(speed, Duration::from_millis(200))
}

#[test]
fn speed_maps_to_step_and_delay() {
    let t = timing(2.0);
    assert_eq!(t.step_px, 2);
    assert_eq!(t.frame_delay, Duration::from_millis(25));

    // Slow speeds still advance at least a pixel.
    let t = timing(0.5);
    assert_eq!(t.step_px, 1);
    assert_eq!(t.frame_delay, Duration::from_millis(100));

    // Fast speeds never drop below a millisecond of wait.
    let t = timing(100.0);
    assert_eq!(t.step_px, 100);
    assert_eq!(t.frame_delay, Duration::from_millis(1));
}

#[test]
fn nonsense_speed_falls_back_to_one() {
    let t = Timing::for_speed(0.0, Duration::from_secs(1));
    assert_eq!(t.step_px, 1);
    assert_eq!(t.frame_delay, Duration::from_millis(50));
    let t = Timing::for_speed(f32::NAN, Duration::from_secs(1));
    assert_eq!(t.step_px, 1);
}

#[test]
fn advances_on_schedule() {
    let t0 = Instant::now();
    let mut transport = Transport::new(timing(2.0), t0);

    // First tick advances immediately.
    let tick = transport.tick(t0, false, false);
    assert_eq!(
        tick,
        Tick::Advance {
            px: 2,
            next: t0 + Duration::from_millis(25)
        }
    );

    // Before the deadline: hold until it.
    let tick = transport.tick(t0 + Duration::from_millis(10), false, false);
    assert_eq!(
        tick,
        Tick::Hold {
            next: t0 + Duration::from_millis(25)
        }
    );

    // At the deadline: advance again.
    let tick = transport.tick(t0 + Duration::from_millis(25), false, false);
    assert!(matches!(tick, Tick::Advance { px: 2, .. }));
}

#[test]
fn pause_holds_and_resume_does_not_burst() {
    let t0 = Instant::now();
    let mut transport = Transport::new(timing(2.0), t0);

    let tick = transport.tick(t0, true, false);
    assert_eq!(tick, Tick::Hold { next: t0 + PAUSE_POLL });

    // Still paused much later: still holding, still pollable.
    let later = t0 + Duration::from_secs(5);
    let tick = transport.tick(later, true, false);
    assert_eq!(tick, Tick::Hold { next: later + PAUSE_POLL });

    // Resume waits one frame delay instead of replaying missed steps.
    let tick = transport.tick(later, false, false);
    assert_eq!(
        tick,
        Tick::Hold {
            next: later + Duration::from_millis(25)
        }
    );
    let tick = transport.tick(later + Duration::from_millis(25), false, false);
    assert!(matches!(tick, Tick::Advance { .. }));
}

#[test]
fn bottom_dwells_then_restarts() {
    let t0 = Instant::now();
    let mut transport = Transport::new(timing(2.0), t0);

    // Bottom reached: hold, waking no later than the dwell poll.
    let tick = transport.tick(t0, false, true);
    let Tick::Hold { next } = tick else {
        panic!("expected Hold at bottom, got {tick:?}");
    };
    assert!(next <= t0 + DWELL_POLL);

    // Mid-dwell: still holding the final frame.
    let tick = transport.tick(t0 + Duration::from_millis(100), false, true);
    assert!(matches!(tick, Tick::Hold { .. }));

    // Dwell elapsed (200 ms): restart from the top.
    let t_done = t0 + Duration::from_millis(250);
    let tick = transport.tick(t_done, false, true);
    assert_eq!(
        tick,
        Tick::Restart {
            next: t_done + Duration::from_millis(25)
        }
    );

    // Back at the top, scrolling resumes.
    let tick = transport.tick(t_done + Duration::from_millis(25), false, false);
    assert!(matches!(tick, Tick::Advance { .. }));
}

#[test]
fn dwell_polls_frequently_enough_for_stop() {
    let t0 = Instant::now();
    let mut transport = Transport::new(Timing::for_speed(2.0, Duration::from_secs(120)), t0);

    // Every wake during the dwell is within one poll interval, so a stop
    // flag set at any point is observed within DWELL_POLL.
    let mut now = t0;
    for _ in 0..5 {
        let tick = transport.tick(now, false, true);
        assert!(matches!(tick, Tick::Hold { .. }));
        let next = tick.next_wake();
        assert!(next <= now + DWELL_POLL);
        now = next;
    }
}

#[test]
fn pause_during_dwell_does_not_restart() {
    let t0 = Instant::now();
    let mut transport = Transport::new(timing(2.0), t0);

    transport.tick(t0, false, true);
    // Paused past the dwell deadline: the pause wins.
    let late = t0 + Duration::from_secs(1);
    let tick = transport.tick(late, true, true);
    assert_eq!(tick, Tick::Hold { next: late + PAUSE_POLL });
}
