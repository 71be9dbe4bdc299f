//! Event pump for the UI loop.
//!
//! A dedicated thread polls the terminal for input and emits ticks at the
//! spin-animation rate; background tasks (content fetch, analytics) feed
//! their results through the same channel via [`EventHandler::sender`].

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEvent, MouseEvent};

use crate::content::RemoteContent;

pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Pasted text; qualifies as activity, content is dropped.
    Paste,
    Resize(u16, u16),
    Tick,
    /// Content fetch finished successfully.
    ContentLoaded(Box<RemoteContent>),
    /// Content fetch failed; the kiosk stays on the loading screen.
    ContentError(String),
    /// An interaction append failed (generic message, never retried).
    AnalyticsError(String),
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());

                match crossterm::event::poll(timeout) {
                    Ok(true) => match crossterm::event::read() {
                        Ok(Event::Key(key)) => {
                            if event_tx.send(AppEvent::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(Event::Mouse(mouse)) => {
                            if event_tx.send(AppEvent::Mouse(mouse)).is_err() {
                                break;
                            }
                        }
                        Ok(Event::Paste(_)) => {
                            if event_tx.send(AppEvent::Paste).is_err() {
                                break;
                            }
                        }
                        Ok(Event::Resize(cols, rows)) => {
                            if event_tx.send(AppEvent::Resize(cols, rows)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(err) => {
                            tracing::error!(%err, "Terminal event read failed");
                            break;
                        }
                    },
                    Ok(false) => {
                        // Timeout, no input
                    }
                    Err(err) => {
                        tracing::error!(%err, "Terminal event poll failed");
                        break;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if event_tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx, tx }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }
}
