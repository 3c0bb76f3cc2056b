use crate::tui::{TuiActor, TuiMsg};
use hub_actors::actor::Addr;
use hub_actors::system::ShutdownHandle;
use std::time::Duration;
use tokio::{self, time};

/// Spawn the three feeder tasks behind the TUI actor: the terminal input
/// reader, the render tick, and the eligibility poll. All of them exit on
/// the shutdown broadcast.
pub fn spawn_tui_feeders(tui: Addr<TuiActor>, poll_interval: Duration, shutdown: ShutdownHandle) {
    let tui_in = tui.clone();
    let mut shutdown_input = shutdown.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                res = shutdown_input.recv() => {
                    if res.is_err() {
                        break;
                    }
                    break;
                }
                ev = tokio::task::spawn_blocking(crossterm::event::read) => {
                    match ev {
                        Ok(Ok(e)) => {
                            let _ = tui_in.send(TuiMsg::InputEvent(e)).await;
                        }
                        Ok(Err(e)) => {
                            tracing::warn!(error = %e, "terminal input read failed");
                        }
                        Err(_) => break,
                    }
                }
            }
        }
    });

    let tui_tick = tui.clone();
    let mut shutdown_tick = shutdown.subscribe();
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_millis(80));
        loop {
            tokio::select! {
                res = shutdown_tick.recv() => {
                    if res.is_err() {
                        break;
                    }
                    break;
                }
                _ = interval.tick() => {
                    let _ = tui_tick.try_send(TuiMsg::Tick);
                }
            }
        }
    });

    let tui_poll = tui;
    let mut shutdown_poll = shutdown.subscribe();
    tokio::spawn(async move {
        let mut interval = time::interval(poll_interval);
        loop {
            tokio::select! {
                res = shutdown_poll.recv() => {
                    if res.is_err() {
                        break;
                    }
                    break;
                }
                _ = interval.tick() => {
                    // try_send keeps a stalled actor from queueing a backlog
                    // of polls; a skipped tick is made up on the next one.
                    let _ = tui_poll.try_send(TuiMsg::PollStatus);
                }
            }
        }
    });
}
