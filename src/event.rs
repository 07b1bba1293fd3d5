use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum AppEvent {
    /// A key-down and when it was read. Releases are dropped here. Auto-repeats
    /// are only distinguishable when the terminal reports event kinds.
    Key(KeyEvent, Instant),
    Tick(Instant),
    Resize,
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    /// Ticks go out every `tick_rate` whether or not input keeps arriving.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                let event = match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(AppEvent::Key(key, Instant::now()))
                        }
                        Ok(Event::Resize(_, _)) => Some(AppEvent::Resize),
                        Ok(_) => None,
                        Err(e) => {
                            log::error!("terminal event read failed: {e}");
                            return;
                        }
                    },
                    Ok(false) => None,
                    Err(e) => {
                        log::error!("terminal event poll failed: {e}");
                        return;
                    }
                };
                if let Some(event) = event {
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    last_tick = Instant::now();
                    if tx.send(AppEvent::Tick(last_tick)).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
