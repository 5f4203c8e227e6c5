use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use folklore_core::SyncEvent;
use futures::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::input::handle_key;
use crate::render::render;
use crate::ui::{App, Tui};

pub(crate) async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut UnboundedReceiver<SyncEvent>,
) -> Result<()> {
    let mut event_stream = EventStream::new();

    // One-second tick: drives the header clock and toast expiry. Data
    // polling lives in the core worker, not here.
    let mut tick = tokio::time::interval(Duration::from_secs(1));

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                if let Some(Ok(Event::Key(key))) = maybe_event {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        app.quit();
                    } else {
                        handle_key(app, key)?;
                    }
                }
            }

            Some(event) = events.recv() => {
                app.handle_sync_event(event);
                // Drain whatever else is queued before redrawing
                while let Ok(event) = events.try_recv() {
                    app.handle_sync_event(event);
                }
            }

            _ = tick.tick() => {
                app.tick();
            }
        }
    }
    Ok(())
}
