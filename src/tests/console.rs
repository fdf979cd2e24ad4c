use std::string::String;

use log::LevelFilter;

use super::support::ScriptedPort;
use crate::config::{CMDBUF_SIZE, MONITOR_MAX_FRAMES, MonitorConfig, PROMPT};
use crate::console::print::PRINT_LOCK;
use crate::console::{
    Console, LineBuffer, SerialConsole, init_logger_with_level, set_output,
};
use crate::error::MonitorError;
use crate::sync::Mutex;

static CAPTURED: Mutex<String> = Mutex::new(String::new());

fn capture(s: &str) {
    CAPTURED.lock().push_str(s);
}

#[test]
fn log_records_reach_the_output_sink() {
    assert!(set_output(capture));
    assert!(!set_output(capture));
    init_logger_with_level(LevelFilter::Trace).unwrap();
    assert!(init_logger_with_level(LevelFilter::Info).is_err());

    info!("monitor logger online");
    kprintln!("direct output {}", 7);

    // A print nested inside a held print lock still reaches the sink.
    {
        let _held = PRINT_LOCK.lock();
        kprintln!("nested output");
        warn!("nested log record");
    }

    let captured = CAPTURED.lock().clone();
    assert!(captured.contains("[INFO "), "{captured}");
    assert!(captured.contains("monitor logger online"));
    assert!(captured.contains("direct output 7\n"));
    assert!(captured.contains("nested output\n"));
    assert!(captured.contains("nested log record"));
}

#[test]
fn line_buffer_holds_one_console_line() {
    let mut buf = LineBuffer::new();
    for _ in 0..CMDBUF_SIZE {
        assert!(buf.push(b'x'));
    }
    assert!(!buf.push(b'y'));
    assert_eq!(buf.len(), CMDBUF_SIZE);

    assert!(buf.pop());
    assert_eq!(buf.len(), CMDBUF_SIZE - 1);
    buf.clear();
    assert!(buf.is_empty());
    assert!(!buf.pop());
    assert_eq!(buf.as_str(), "");
}

#[test]
fn read_line_echoes_and_returns_the_line() {
    let mut console = SerialConsole::new(ScriptedPort::new("kerninfo\tnow\r"));
    let mut buf = LineBuffer::default();

    let line = console.read_line("K> ", &mut buf).unwrap();
    assert_eq!(line, Some("kerninfo\tnow"));
    assert_eq!(console.port().output(), "K> kerninfo\tnow\r\n");
}

#[test]
fn read_line_skips_control_bytes() {
    let mut console = SerialConsole::new(ScriptedPort::new("\x1bhe\x01lp\n"));
    let mut buf = LineBuffer::new();
    assert_eq!(console.read_line("", &mut buf), Ok(Some("help")));
}

#[test]
fn backspace_on_empty_line_is_silent() {
    let mut console = SerialConsole::new(ScriptedPort::new("\x08\x7fa\r"));
    let mut buf = LineBuffer::new();
    assert_eq!(console.read_line("", &mut buf), Ok(Some("a")));
    assert_eq!(console.port().output(), "a\r\n");
}

#[test]
fn read_line_reports_overflow_and_end_of_input() {
    let mut long = String::new();
    for _ in 0..=CMDBUF_SIZE {
        long.push('z');
    }
    let port = ScriptedPort::new(&long).then("\r").eof();
    let mut console = SerialConsole::new(port);
    let mut buf = LineBuffer::new();

    assert_eq!(
        console.read_line("", &mut buf),
        Err(MonitorError::LineTooLong { max: CMDBUF_SIZE })
    );
    assert_eq!(console.read_line("", &mut buf), Ok(None));
}

#[test]
fn newlines_are_sent_as_crlf() {
    use core::fmt::Write;

    let mut console = SerialConsole::new(ScriptedPort::new(""));
    write!(console, "a\nb\n").unwrap();
    assert_eq!(console.into_inner().output(), "a\r\nb\r\n");
}

#[test]
fn default_config_uses_build_constants() {
    let config = MonitorConfig::default();
    assert_eq!(config.prompt, PROMPT);
    assert_eq!(config.hex_mode, crate::mm::HexMode::Strict);
    match MONITOR_MAX_FRAMES {
        0 => assert_eq!(config.max_frames, None),
        n => assert_eq!(config.max_frames, Some(n)),
    }
}
