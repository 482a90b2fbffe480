//! Key-by-key scenarios driven through the runtime simulator.

use std::time::Duration;

use radix::{Base, BlinkCursor, CursorMode, RadixApp};
use radix_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use radix_runtime::{HeadlessEventSource, Program, ProgramConfig, ProgramSimulator};

fn sim_with(base: Base) -> ProgramSimulator<RadixApp> {
    let cursor = BlinkCursor::new(CursorMode::Hide, Duration::from_millis(530));
    let mut sim = ProgramSimulator::new(RadixApp::new(base, cursor));
    sim.init();
    sim
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code))
}

fn chars(s: &str) -> Vec<Event> {
    s.chars().map(|c| key(KeyCode::Char(c))).collect()
}

#[test]
fn initial_view() {
    let sim = sim_with(Base::Decimal);
    assert_eq!(sim.last_frame(), Some("bin: 0\noct: 0\ndec: 0\nhex: 0\n"));
}

#[test]
fn typing_123_in_decimal() {
    let mut sim = sim_with(Base::Decimal);
    sim.inject_events(&chars("123"));

    let conv = sim.model().converter();
    assert_eq!(conv.buffer(Base::Decimal), "123");
    assert_eq!(conv.buffer(Base::Binary), "1111011");
    assert_eq!(conv.buffer(Base::Octal), "173");
    assert_eq!(conv.buffer(Base::Hexadecimal), "7B");
    assert_eq!(conv.cursor(), 3);
    assert_eq!(sim.view(), "bin: 1111011\noct: 173\ndec: 123 \nhex: 7B\n");
}

#[test]
fn down_moves_to_hex_and_clamps() {
    let mut sim = sim_with(Base::Decimal);
    sim.inject_events(&chars("123"));
    sim.inject_event(key(KeyCode::Down));

    let conv = sim.model().converter();
    assert_eq!(conv.active(), Base::Hexadecimal);
    assert_eq!(conv.buffer(Base::Hexadecimal), "7B");
    assert_eq!(conv.cursor(), 2);
    assert_eq!(sim.view(), "bin: 1111011\noct: 173\ndec: 123\nhex: 7B \n");
}

#[test]
fn leading_zero_on_empty_state() {
    let mut sim = sim_with(Base::Decimal);
    let before = sim.view();
    sim.inject_event(key(KeyCode::Char('0')));
    assert_eq!(sim.model().converter().value(), 0);
    assert_eq!(sim.model().converter().cursor(), 0);
    assert_eq!(sim.view(), before);
}

#[test]
fn hex_backspace() {
    let mut sim = sim_with(Base::Hexadecimal);
    sim.inject_events(&chars("A3"));
    sim.inject_event(key(KeyCode::Backspace));

    let conv = sim.model().converter();
    assert_eq!(conv.buffer(Base::Hexadecimal), "A");
    assert_eq!(conv.buffer(Base::Binary), "1010");
    assert_eq!(conv.buffer(Base::Octal), "12");
    assert_eq!(conv.buffer(Base::Decimal), "10");
}

#[test]
fn q_and_ctrl_c_quit() {
    let mut sim = sim_with(Base::Decimal);
    sim.inject_events(&chars("4q5"));
    assert!(!sim.is_running());
    assert_eq!(sim.model().converter().value(), 4);

    let mut sim = sim_with(Base::Decimal);
    sim.inject_event(Event::Key(
        KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL),
    ));
    assert!(!sim.is_running());
}

#[test]
fn blink_subscription_restarts_on_edit() {
    let mut sim = ProgramSimulator::new(RadixApp::default());
    sim.init();
    assert_eq!(sim.subscription_ids(), [0]);

    sim.inject_event(key(KeyCode::Char('9')));
    assert_eq!(sim.subscription_ids(), [1]);

    // no cursor movement, no restart
    sim.inject_event(key(KeyCode::Right));
    assert_eq!(sim.subscription_ids(), [1]);
}

#[test]
fn blink_ticks_toggle_highlight() {
    let mut sim = ProgramSimulator::new(RadixApp::default());
    sim.init();
    sim.inject_events(&chars("42"));
    assert!(sim.view().contains("dec: 42\x1b[7m \x1b[27m\n"));

    let epoch = sim.model().cursor().epoch();
    sim.send(radix::Msg::Blink(epoch));
    assert!(sim.view().contains("dec: 42 \n"));

    // superseded phase
    sim.send(radix::Msg::Blink(epoch - 1));
    assert!(sim.view().contains("dec: 42 \n"));

    sim.send(radix::Msg::Blink(epoch));
    assert!(sim.view().contains("\x1b[7m \x1b[27m"));
}

#[test]
fn start_base_from_config_is_active() {
    let mut sim = sim_with(Base::Binary);
    sim.inject_events(&chars("1012"));
    assert_eq!(sim.model().converter().value(), 5);
    assert_eq!(sim.model().converter().buffer(Base::Binary), "101");
}

#[test]
fn max_value_redraws_wrapped_binary_row_in_place() {
    let cursor = BlinkCursor::new(CursorMode::Hide, Duration::from_millis(530));
    let app = RadixApp::new(Base::Hexadecimal, cursor);
    let mut program = Program::with_writer(app, ProgramConfig::default(), Vec::new());
    let mut script = chars("FFFFFFFFFFFFFFFF");
    script.push(key(KeyCode::Char('q')));
    let mut events = HeadlessEventSource::new(script).with_size(40, 24);

    program.run_with(&mut events).unwrap();

    assert_eq!(program.model().converter().value(), u64::MAX);
    let out = String::from_utf8_lossy(program.writer().get_ref()).into_owned();
    // 69-column binary row wraps to two rows; three more rows follow it.
    let last_redraw = &out[out.rfind("\x1b[1G").unwrap()..];
    assert!(
        last_redraw.starts_with("\x1b[1G\x1b[4A\x1b[J"),
        "redraw: {last_redraw:?}"
    );
    assert!(last_redraw.contains(&format!("bin: {}", "1".repeat(64))));
}
