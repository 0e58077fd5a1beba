//! Blink state machine tests: show/hide lifecycle, tick parity, cancellation

mod common;

use caret::blink::BlinkScheduler;
use caret::commands::Cmd;
use caret::timer::BlinkTimerConfig;
use caret::update::update;
use caret::CaretMsg;
use common::{model_with_interval, ms, rect, t0, test_model};

// ========================================================================
// Lifecycle
// ========================================================================

#[test]
fn test_show_paints_immediately() {
    let mut caret = BlinkScheduler::default();
    let cmd = caret.show_at(rect(10.0, 20.0, 2.0, 16.0), t0());

    assert!(cmd.needs_redraw());
    assert!(caret.is_visible());
    assert!(caret.state().blink_on);
    assert!(caret.is_painted());
    assert_eq!(caret.caret_rect(), rect(10.0, 20.0, 2.0, 16.0));
}

#[test]
fn test_show_arms_the_timer() {
    let now = t0();
    let mut caret = BlinkScheduler::default();
    let cmd = caret.show_at(rect(0.0, 0.0, 2.0, 16.0), now);

    assert_eq!(cmd.wake_deadline(), Some(now + ms(500)));
    assert_eq!(caret.next_deadline(), Some(now + ms(500)));
}

#[test]
fn test_hide_stops_painting_and_timer() {
    let mut caret = BlinkScheduler::default();
    caret.show_at(rect(0.0, 0.0, 2.0, 16.0), t0());

    assert_eq!(caret.hide(), Some(Cmd::Redraw));
    assert!(!caret.is_visible());
    assert!(!caret.is_painted());
    assert_eq!(caret.next_deadline(), None);
}

#[test]
fn test_hide_twice_same_as_once() {
    let mut caret = BlinkScheduler::default();
    caret.show_at(rect(0.0, 0.0, 2.0, 16.0), t0());
    caret.hide();
    let after_first = *caret.state();

    assert_eq!(caret.hide(), None);
    assert_eq!(*caret.state(), after_first);
}

#[test]
fn test_hide_before_show_is_noop() {
    let mut caret = BlinkScheduler::default();
    assert_eq!(caret.hide(), None);
    assert!(!caret.is_visible());
}

#[test]
fn test_show_while_visible_resets_phase() {
    let now = t0();
    let mut caret = BlinkScheduler::default();
    caret.show_at(rect(0.0, 0.0, 2.0, 16.0), now);
    caret.on_tick();
    assert!(!caret.state().blink_on);

    let later = now + ms(700);
    caret.show_at(rect(30.0, 0.0, 2.0, 16.0), later);

    assert!(caret.state().blink_on);
    assert_eq!(caret.caret_rect().x, 30.0);
    assert_eq!(caret.next_deadline(), Some(later + ms(500)));
}

// ========================================================================
// Ticks
// ========================================================================

#[test]
fn test_ticks_alternate_starting_off() {
    let mut caret = BlinkScheduler::default();
    caret.show_at(rect(0.0, 0.0, 2.0, 16.0), t0());

    let phases: Vec<bool> = (0..6)
        .map(|_| {
            caret.on_tick();
            caret.state().blink_on
        })
        .collect();
    assert_eq!(phases, vec![false, true, false, true, false, true]);
}

#[test]
fn test_tick_after_hide_is_ignored() {
    let mut caret = BlinkScheduler::default();
    caret.show_at(rect(0.0, 0.0, 2.0, 16.0), t0());
    caret.hide();
    let before = *caret.state();

    assert_eq!(caret.on_tick(), None);
    assert_eq!(*caret.state(), before);
}

#[test]
fn test_tick_before_show_is_ignored() {
    let mut caret = BlinkScheduler::default();
    assert_eq!(caret.on_tick(), None);
    assert!(caret.state().blink_on);
    assert!(!caret.is_painted());
}

#[test]
fn test_poll_before_deadline_does_nothing() {
    let now = t0();
    let mut caret = BlinkScheduler::default();
    caret.show_at(rect(0.0, 0.0, 2.0, 16.0), now);

    assert_eq!(caret.poll(now + ms(499)), None);
    assert!(caret.state().blink_on);
}

#[test]
fn test_poll_delivers_one_tick_per_interval() {
    let now = t0();
    let mut caret = BlinkScheduler::default();
    caret.show_at(rect(0.0, 0.0, 2.0, 16.0), now);

    let cmd = caret.poll(now + ms(500)).unwrap();
    assert!(cmd.needs_redraw());
    assert_eq!(cmd.wake_deadline(), Some(now + ms(1000)));
    assert!(!caret.state().blink_on);

    caret.poll(now + ms(1000));
    assert!(caret.state().blink_on);
}

#[test]
fn test_poll_after_missed_intervals_keeps_parity() {
    let now = t0();
    let mut caret = BlinkScheduler::default();
    caret.show_at(rect(0.0, 0.0, 2.0, 16.0), now);

    // Two elapsed intervals flip twice: back to on, no redraw needed
    let cmd = caret.poll(now + ms(1200)).unwrap();
    assert!(!cmd.needs_redraw());
    assert!(caret.state().blink_on);
    assert_eq!(caret.next_deadline(), Some(now + ms(1500)));

    // Three intervals from there: odd, so off
    caret.poll(now + ms(2600));
    assert!(!caret.state().blink_on);
    assert_eq!(caret.next_deadline(), Some(now + ms(3000)));
}

#[test]
fn test_poll_after_hide_does_nothing() {
    let now = t0();
    let mut caret = BlinkScheduler::default();
    caret.show_at(rect(0.0, 0.0, 2.0, 16.0), now);
    caret.hide();

    assert_eq!(caret.poll(now + ms(5000)), None);
}

// ========================================================================
// Blink configuration
// ========================================================================

#[test]
fn test_disabled_blink_never_toggles() {
    let now = t0();
    let mut caret = BlinkScheduler::new(BlinkTimerConfig::from_millis(0));
    let cmd = caret.show_at(rect(0.0, 0.0, 2.0, 16.0), now);

    assert_eq!(cmd, Cmd::Redraw);
    assert_eq!(caret.next_deadline(), None);
    assert_eq!(caret.on_tick(), None);
    assert_eq!(caret.poll(now + ms(10_000)), None);
    assert!(caret.is_painted());
}

#[test]
fn test_negative_interval_disables_blink() {
    let mut caret = BlinkScheduler::new(BlinkTimerConfig::from_millis(-1));
    caret.show_at(rect(0.0, 0.0, 2.0, 16.0), t0());
    assert_eq!(caret.next_deadline(), None);
}

#[test]
fn test_custom_interval() {
    let now = t0();
    let mut caret = BlinkScheduler::new(BlinkTimerConfig::from_millis(120));
    caret.show_at(rect(0.0, 0.0, 2.0, 16.0), now);
    assert_eq!(caret.next_deadline(), Some(now + ms(120)));
}

#[test]
fn test_config_change_while_hidden_stays_hidden() {
    let mut caret = BlinkScheduler::default();
    assert_eq!(
        caret.set_timer_config(BlinkTimerConfig::from_millis(250)),
        None
    );
    assert!(!caret.is_visible());
    assert_eq!(caret.timer_config(), BlinkTimerConfig::from_millis(250));
}

#[test]
fn test_config_change_while_visible_restarts_on() {
    let mut caret = BlinkScheduler::default();
    caret.show_at(rect(0.0, 0.0, 2.0, 16.0), t0());
    caret.on_tick();

    let cmd = caret
        .set_timer_config(BlinkTimerConfig::from_millis(0))
        .unwrap();
    assert_eq!(cmd, Cmd::Redraw);
    assert!(caret.state().blink_on);
    assert_eq!(caret.next_deadline(), None);
}

// ========================================================================
// Through update()
// ========================================================================

#[test]
fn test_update_show_hide_roundtrip() {
    let mut model = test_model();
    let cmd = update(&mut model, CaretMsg::Show(rect(5.0, 5.0, 2.0, 14.0))).unwrap();
    assert!(cmd.needs_redraw());
    assert!(model.caret.state().is_painted());

    assert_eq!(update(&mut model, CaretMsg::Hide), Some(Cmd::Redraw));
    assert_eq!(update(&mut model, CaretMsg::Hide), None);
    assert_eq!(update(&mut model, CaretMsg::BlinkTick), None);
}

#[test]
fn test_update_tick_toggles_phase() {
    let mut model = test_model();
    update(&mut model, CaretMsg::Show(rect(0.0, 0.0, 2.0, 16.0)));

    assert_eq!(update(&mut model, CaretMsg::BlinkTick), Some(Cmd::Redraw));
    assert!(!model.caret.state().blink_on);
    assert!(!model.caret.state().is_painted());
}

#[test]
fn test_update_disabled_blink_ignores_ticks() {
    let mut model = model_with_interval(0);
    update(&mut model, CaretMsg::Show(rect(0.0, 0.0, 2.0, 16.0)));

    assert_eq!(update(&mut model, CaretMsg::BlinkTick), None);
    assert!(model.caret.state().is_painted());
}
