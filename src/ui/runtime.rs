use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::analytics::{spawn_recorder, AnalyticsClient};
use crate::config::Config;
use crate::content::fetch_content;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Runs the kiosk until quit.
///
/// The UI loop stays on this thread; a small tokio runtime hosts the
/// one-shot content fetch and the analytics recorder, both of which feed
/// their results back through the event channel.
pub fn run(config: Config) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.remote.http_timeout_seconds))
        .build()?;

    let tick_rate = Duration::from_millis(config.kiosk.spin_tick_ms);
    let events = EventHandler::new(tick_rate);
    let mut app = App::new(config.clone());

    // Exactly one content fetch per session, no retry.
    {
        let tx = events.sender();
        let http = http.clone();
        let url = config.remote.content_url.clone();
        runtime.spawn(async move {
            match fetch_content(&http, &url).await {
                Ok(content) => {
                    let _ = tx.send(AppEvent::ContentLoaded(Box::new(content)));
                }
                Err(err) => {
                    let _ = tx.send(AppEvent::ContentError(err.to_string()));
                }
            }
        });
    }

    if let Some(interact_url) = config.remote.interact_url.clone() {
        let tx = events.sender();
        let client = AnalyticsClient::new(http, interact_url);
        let recorder = spawn_recorder(runtime.handle(), client, move |message| {
            let _ = tx.send(AppEvent::AnalyticsError(message));
        });
        app.set_recorder(recorder);
    }

    let (mut terminal, guard) = setup_terminal()?;

    loop {
        terminal.draw(|frame| draw(frame, &mut app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => app.on_key(key),
            Ok(AppEvent::Mouse(mouse)) => app.on_mouse(mouse),
            Ok(AppEvent::Paste) => app.on_paste(),
            Ok(AppEvent::Resize(_, _)) => app.note_activity(Instant::now()),
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::ContentLoaded(content)) => app.on_content_loaded(*content),
            Ok(AppEvent::ContentError(message)) => app.on_content_failed(message),
            Ok(AppEvent::AnalyticsError(message)) => app.on_analytics_error(message),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    Ok(())
}
