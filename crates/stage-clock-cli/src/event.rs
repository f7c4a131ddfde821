use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use stage_clock_core::TickSource;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::warn;

/// Everything the UI task reacts to, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick(TickSource),
    Key(KeyEvent),
    Resize(u16, u16),
    /// The input reader stopped; no more keys will arrive.
    InputClosed(String),
}

/// How long the reader blocks before checking whether the UI went away.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn input_failed(stage: &str, e: &io::Error) -> AppEvent {
    warn!("terminal {stage} failed: {e}");
    AppEvent::InputClosed(format!("terminal {stage} failed: {e}"))
}

/// The queue event for a terminal event, if it matters to the app.
fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(width, height) => Some(AppEvent::Resize(width, height)),
        _ => None,
    }
}

/// Forward terminal input into the event queue from a blocking task.
///
/// The task ends on its own once the receiving side is dropped. A terminal
/// error ends it too, after posting [`AppEvent::InputClosed`].
pub fn spawn_input_reader(tx: UnboundedSender<AppEvent>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    let _ = tx.send(input_failed("poll", &e));
                    break;
                }
            }
            let forwarded = match event::read() {
                Ok(event) => match translate(event) {
                    Some(event) => tx.send(event),
                    None => Ok(()),
                },
                Err(e) => {
                    let _ = tx.send(input_failed("read", &e));
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        }
    })
}
