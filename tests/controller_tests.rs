//! Integration tests for mode transitions, buttons, the command channel and
//! brightness control.

mod common;
use common::*;

use traffic_light_controller::{
    BLINK_ALL_PERIOD_MS, ButtonId, LampLevels, Mode, TrafficController,
};

type Controller<'t> = TrafficController<'t, TestInstant, MockLamps, MockSink, MockTimeSource>;

fn started_controller(clock: &MockTimeSource) -> (Controller<'_>, MockLamps, MockSink) {
    let lamps = MockLamps::new();
    let sink = MockSink::new();
    let mut controller = TrafficController::new(lamps.clone(), sink.clone(), clock);
    controller.start();
    (controller, lamps, sink)
}

#[test]
fn startup_emits_banner_then_normal_mode_line() {
    let clock = MockTimeSource::new();
    let (controller, _lamps, sink) = started_controller(&clock);

    assert_eq!(sink.lines(), ["Traffic Light System Started", "MODE:NORMAL"]);
    assert_eq!(controller.mode(), Mode::Normal);
}

#[test]
fn every_transition_emits_its_mode_line() {
    let clock = MockTimeSource::new();
    let (mut controller, _lamps, sink) = started_controller(&clock);
    sink.clear();

    controller.set_mode(Mode::Emergency);
    controller.set_mode(Mode::Blinking);
    controller.set_mode(Mode::Off);
    controller.set_mode(Mode::Normal);

    assert_eq!(
        sink.lines(),
        ["MODE:EMERGENCY", "MODE:BLINKING", "MODE:OFF", "MODE:NORMAL"]
    );
}

#[test]
fn emergency_holds_a_steady_red() {
    let clock = MockTimeSource::new();
    let (mut controller, lamps, sink) = started_controller(&clock);
    controller.service();

    controller.set_mode(Mode::Emergency);
    assert_eq!(lamps.last(), Some(LampLevels::RED));
    lamps.clear();
    sink.clear();

    // Nothing is scheduled; time passing changes nothing.
    assert_eq!(controller.service(), None);
    clock.advance(10_000);
    assert_eq!(controller.service(), None);
    assert!(lamps.history().is_empty());
    assert!(sink.lines().is_empty());
}

#[test]
fn blinking_always_restarts_with_the_lit_half() {
    let clock = MockTimeSource::new();
    let (mut controller, lamps, _sink) = started_controller(&clock);

    controller.set_mode(Mode::Blinking);
    controller.service();
    assert_eq!(lamps.last(), Some(LampLevels::ALL));

    // Park the flash in its dark half, then leave and re-enter.
    clock.advance(BLINK_ALL_PERIOD_MS);
    controller.service();
    assert_eq!(lamps.last(), Some(LampLevels::OFF));

    controller.set_mode(Mode::Normal);
    controller.set_mode(Mode::Blinking);
    controller.service();
    assert_eq!(lamps.last(), Some(LampLevels::ALL));
}

#[test]
fn off_darkens_everything_and_schedules_nothing() {
    let clock = MockTimeSource::new();
    let (mut controller, lamps, _sink) = started_controller(&clock);
    controller.set_mode(Mode::Blinking);
    controller.service();
    assert_eq!(lamps.last(), Some(LampLevels::ALL));

    controller.set_mode(Mode::Off);

    assert_eq!(lamps.last(), Some(LampLevels::OFF));
    assert_eq!(controller.current_levels(), LampLevels::OFF);
    assert_eq!(controller.service(), None);
    clock.advance(60_000);
    assert_eq!(controller.service(), None);
}

#[test]
fn each_button_toggles_its_mode_against_normal() {
    let clock = MockTimeSource::new();
    let (mut controller, _lamps, _sink) = started_controller(&clock);

    controller.handle_button_press(ButtonId::Emergency);
    assert_eq!(controller.mode(), Mode::Emergency);
    controller.handle_button_press(ButtonId::Emergency);
    assert_eq!(controller.mode(), Mode::Normal);

    controller.handle_button_press(ButtonId::Blinking);
    assert_eq!(controller.mode(), Mode::Blinking);
    controller.handle_button_press(ButtonId::Blinking);
    assert_eq!(controller.mode(), Mode::Normal);

    controller.handle_button_press(ButtonId::Power);
    assert_eq!(controller.mode(), Mode::Off);
    controller.handle_button_press(ButtonId::Power);
    assert_eq!(controller.mode(), Mode::Normal);
}

#[test]
fn buttons_cut_across_modes_without_passing_through_normal() {
    let clock = MockTimeSource::new();
    let (mut controller, _lamps, sink) = started_controller(&clock);

    controller.handle_button_press(ButtonId::Emergency);
    sink.clear();

    controller.handle_button_press(ButtonId::Blinking);
    assert_eq!(controller.mode(), Mode::Blinking);
    assert_eq!(sink.lines(), ["MODE:BLINKING"]);

    // Power from a non-OFF mode always goes to OFF.
    controller.handle_button_press(ButtonId::Power);
    assert_eq!(controller.mode(), Mode::Off);

    // Emergency works from OFF as well.
    controller.handle_button_press(ButtonId::Emergency);
    assert_eq!(controller.mode(), Mode::Emergency);
}

#[test]
fn duration_commands_echo_their_new_values() {
    let clock = MockTimeSource::new();
    let (mut controller, _lamps, sink) = started_controller(&clock);
    sink.clear();

    controller.handle_line("RED:1500").unwrap();
    controller.handle_line("YELLOW:300").unwrap();
    controller.handle_line("GREEN:2500").unwrap();

    assert_eq!(
        sink.lines(),
        ["RED_DURATION:1500", "YELLOW_DURATION:300", "GREEN_DURATION:2500"]
    );
    assert_eq!(controller.timing().red, TestDuration(1500));
    assert_eq!(controller.timing().yellow, TestDuration(300));
    assert_eq!(controller.timing().green, TestDuration(2500));
}

#[test]
fn mode_commands_match_button_behavior() {
    let clock = MockTimeSource::new();
    let (mut controller, lamps, _sink) = started_controller(&clock);

    controller.handle_line("MODE:EMERGENCY").unwrap();
    assert_eq!(controller.mode(), Mode::Emergency);
    assert_eq!(lamps.last(), Some(LampLevels::RED));

    controller.handle_line("MODE:OFF").unwrap();
    assert_eq!(controller.mode(), Mode::Off);
    assert_eq!(lamps.last(), Some(LampLevels::OFF));
}

#[test]
fn malformed_lines_leave_all_state_untouched() {
    let clock = MockTimeSource::new();
    let (mut controller, _lamps, sink) = started_controller(&clock);
    sink.clear();
    let timing = controller.timing();

    for line in ["", "RED", "RED:", "RED:12x", "MODE:MAYBE", "BLUE:7", "red:5"] {
        assert!(controller.handle_line(line).is_err(), "accepted {line:?}");
    }

    assert_eq!(controller.mode(), Mode::Normal);
    assert_eq!(controller.timing(), timing);
    assert!(sink.lines().is_empty());
}

#[test]
fn brightness_changes_rescale_the_current_picture() {
    let clock = MockTimeSource::new();
    let (mut controller, lamps, sink) = started_controller(&clock);
    controller.service();
    sink.clear();

    // A dark reading drops to the floor brightness; the red lamp dims but
    // stays logically red.
    controller.update_brightness(0);
    assert_eq!(sink.lines(), ["Brightness: 10"]);
    assert_eq!(lamps.last(), Some(LampLevels::new(10, 0, 0)));
    assert_eq!(controller.current_levels(), LampLevels::RED);

    // The factor sticks across a mode change.
    controller.set_mode(Mode::Blinking);
    controller.service();
    assert_eq!(lamps.last(), Some(LampLevels::new(10, 10, 10)));
}

#[test]
fn sensor_noise_inside_the_deadband_reports_nothing() {
    let clock = MockTimeSource::new();
    let (mut controller, _lamps, sink) = started_controller(&clock);
    controller.update_brightness(512);
    sink.clear();
    let brightness = controller.brightness();

    for raw in [510, 514, 511, 513, 512] {
        controller.update_brightness(raw);
    }

    assert!(sink.lines().is_empty());
    assert_eq!(controller.brightness(), brightness);
}

#[test]
fn full_scale_reading_restores_full_brightness() {
    let clock = MockTimeSource::new();
    let (mut controller, _lamps, sink) = started_controller(&clock);
    controller.update_brightness(0);
    sink.clear();

    controller.update_brightness(1023);

    assert_eq!(sink.lines(), ["Brightness: 255"]);
    assert_eq!(controller.brightness(), 255);
}
