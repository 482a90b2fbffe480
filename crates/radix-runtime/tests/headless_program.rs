//! End-to-end runs of [`Program`] against scripted input and an in-memory
//! terminal, including a live interval subscription.

use std::time::{Duration, Instant};

use radix_core::event::{Event, KeyCode, KeyEvent};
use radix_core::terminal_session::{SessionOptions, TerminalSession};
use radix_runtime::{
    Cmd, Every, EventSource, HeadlessEventSource, Model, Program, ProgramConfig, ScreenMode,
    Subscription,
};

struct Ticker {
    ticks: u32,
    keys: u32,
}

#[derive(Debug)]
enum Msg {
    Key,
    Tick,
    Quit,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(k) if k.is_char('q') => Msg::Quit,
            _ => Msg::Key,
        }
    }
}

impl Model for Ticker {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Key => {
                self.keys += 1;
                Cmd::none()
            }
            Msg::Tick => {
                self.ticks += 1;
                if self.ticks >= 3 {
                    Cmd::quit()
                } else {
                    Cmd::none()
                }
            }
            Msg::Quit => Cmd::quit(),
        }
    }

    fn view(&self) -> String {
        format!("keys: {}\nticks: {}\n", self.keys, self.ticks)
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Msg>>> {
        vec![Box::new(Every::new(Duration::from_millis(5), || Msg::Tick))]
    }
}

/// Never yields input; only subscriptions can end the run.
struct IdleSource {
    deadline: Instant,
}

impl EventSource for IdleSource {
    fn poll_event(&mut self, timeout: Duration) -> std::io::Result<bool> {
        std::thread::sleep(timeout);
        Ok(false)
    }

    fn read_event(&mut self) -> std::io::Result<Option<Event>> {
        Ok(None)
    }

    fn termination_requested(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

fn key(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c)))
}

#[test]
fn quit_key_ends_run_and_leaves_frame() {
    let mut program = Program::with_writer(
        Ticker { ticks: 0, keys: 0 },
        ProgramConfig::default().with_poll_timeout(Duration::from_millis(1)),
        Vec::new(),
    );
    let mut events = HeadlessEventSource::new([key('a'), key('q')]);

    program.run_with(&mut events).unwrap();

    assert!(!program.is_running());
    assert_eq!(program.model().keys, 1);
    let out = String::from_utf8_lossy(program.writer().get_ref()).into_owned();
    assert!(out.contains("keys: 1\r\nticks: "), "out: {out:?}");
    assert!(out.ends_with("\r\n"));
}

#[test]
fn interval_subscription_drives_updates() {
    let mut program = Program::with_writer(
        Ticker { ticks: 0, keys: 0 },
        ProgramConfig::default().with_poll_timeout(Duration::from_millis(2)),
        Vec::new(),
    );
    let mut events = IdleSource {
        deadline: Instant::now() + Duration::from_secs(5),
    };

    program.run_with(&mut events).unwrap();

    assert_eq!(program.model().ticks, 3);
    assert_eq!(program.model().keys, 0);
}

#[test]
fn alt_screen_frames_start_at_origin() {
    let mut program = Program::with_writer(
        Ticker { ticks: 0, keys: 0 },
        ProgramConfig {
            screen_mode: ScreenMode::AltScreen,
            ..ProgramConfig::default()
        },
        Vec::new(),
    );
    assert_eq!(program.writer().mode(), ScreenMode::AltScreen);
    let mut events = HeadlessEventSource::new([key('q')]);

    program.run_with(&mut events).unwrap();

    let out = String::from_utf8_lossy(program.writer().get_ref()).into_owned();
    assert!(out.starts_with("\x1b[1;1H"), "out: {out:?}");
}

#[test]
fn terminal_session_is_an_event_source() {
    fn assert_source<E: EventSource>(_: &E) {}

    let session = TerminalSession::new_for_tests(SessionOptions::default()).unwrap();
    assert_source(&session);
    assert!(!EventSource::termination_requested(&session));
}
