use crate::view::{self, ViewSnap};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::{
    event::{Event as CtEvent, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hub_actors::{
    actor::{Actor, Addr, Context},
    claim::{ClaimEvent, ClaimState, DisplayMode, Effect},
    system::ShutdownHandle,
};
use hub_api::{CouponApi, EligibilityStatus};
use hub_http::HttpError;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::{task::JoinHandle, time::sleep};

const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub enum TuiMsg {
    InputEvent(CtEvent),
    Tick,
    /// Fired by the poll feeder once per second.
    PollStatus,
    StatusResult {
        seq: u64,
        result: Result<EligibilityStatus, HttpError>,
    },
    ClaimResult(Result<String, HttpError>),
    /// The auto-dismiss timer elapsed. Carries the generation it was armed
    /// with; a stale generation means the timer was replaced and the fire is
    /// ignored.
    DismissTimerFired(u64),
    Shutdown,
}

/// Owns the claim state, the terminal, and both timers' handles. Every
/// mutation funnels through [`ClaimState::apply`]; this actor only
/// interprets effects and pushes frames.
pub struct TuiActor {
    api: Arc<dyn CouponApi>,

    state: ClaimState,

    // terminal
    term: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    last_tick: Instant,
    dirty: bool,
    spin_idx: usize,

    // status polling: monotonically increasing sequence for last-write-wins
    poll_seq: u64,

    // countdown auto-dismiss
    auto_dismiss_delay: Duration,
    dismiss_timer: Option<JoinHandle<()>>,
    dismiss_gen: u64,

    // shutdown coordination
    shutdown: ShutdownHandle,
}

impl TuiActor {
    pub fn new(
        api: Arc<dyn CouponApi>,
        auto_dismiss_delay: Duration,
        shutdown: ShutdownHandle,
    ) -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;
        term.clear()?;

        Ok(Self {
            api,
            state: ClaimState::default(),
            term,
            tick_rate: Duration::from_millis(80),
            last_tick: Instant::now(),
            dirty: true,
            spin_idx: 0,
            poll_seq: 0,
            auto_dismiss_delay,
            dismiss_timer: None,
            dismiss_gen: 0,
            shutdown,
        })
    }

    fn spinner(&self) -> &'static str {
        if self.state.loading {
            BRAILLE_FRAMES[self.spin_idx % BRAILLE_FRAMES.len()]
        } else {
            " "
        }
    }

    fn step_spinner(&mut self) {
        if self.state.loading {
            self.spin_idx = (self.spin_idx + 1) % BRAILLE_FRAMES.len();
            self.dirty = true;
        }
    }

    fn draw(&mut self) -> Result<()> {
        let snap = ViewSnap {
            display: self.state.display(),
            time_left: self.state.status.time_left,
            coupon: self.state.coupon.clone(),
            error: self.state.error.clone(),
            spinner: self.spinner(),
        };
        view::draw(&mut self.term, &snap)
    }

    /// Run one event through the machine and carry out its effects.
    fn apply_event(&mut self, event: ClaimEvent, me: &Addr<TuiActor>) {
        let effects = self.state.apply(event);
        self.dirty = true;

        for effect in effects {
            match effect {
                Effect::RefreshStatus => self.spawn_status_fetch(me.clone()),
                Effect::ArmDismissTimer => self.arm_dismiss_timer(me.clone()),
                Effect::CancelDismissTimer => self.cancel_dismiss_timer(),
            }
        }
    }

    /// Fire a status fetch on its own task. Overlapping fetches are fine:
    /// the sequence number lets the machine drop out-of-order results.
    fn spawn_status_fetch(&mut self, me: Addr<TuiActor>) {
        self.poll_seq += 1;
        let seq = self.poll_seq;
        let api = self.api.clone();
        tokio::spawn(async move {
            let result = api.status().await;
            let _ = me.send(TuiMsg::StatusResult { seq, result }).await;
        });
    }

    fn arm_dismiss_timer(&mut self, me: Addr<TuiActor>) {
        self.cancel_dismiss_timer();
        self.dismiss_gen += 1;
        let gen = self.dismiss_gen;
        let delay = self.auto_dismiss_delay;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let _ = me.send(TuiMsg::DismissTimerFired(gen)).await;
        });
        self.dismiss_timer = Some(handle);
    }

    fn cancel_dismiss_timer(&mut self) {
        if let Some(handle) = self.dismiss_timer.take() {
            handle.abort();
        }
    }

    fn start_claim(&mut self, me: &Addr<TuiActor>) {
        if !self.state.can_start_claim() {
            return;
        }
        self.apply_event(ClaimEvent::ClaimStarted, me);

        let api = self.api.clone();
        let me2 = me.clone();
        tokio::spawn(async move {
            // Always reports back, success or failure, so `loading` is
            // released on every path.
            let result = api.claim().await;
            let _ = me2.send(TuiMsg::ClaimResult(result)).await;
        });
    }

    /// Esc closes whichever overlay is on top.
    fn dismiss_current(&mut self, me: &Addr<TuiActor>) {
        match self.state.display() {
            DisplayMode::ErrorDisplay => self.apply_event(ClaimEvent::ErrorDismissed, me),
            DisplayMode::CouponDisplay => self.apply_event(ClaimEvent::CouponDismissed, me),
            DisplayMode::Waiting => self.apply_event(ClaimEvent::CountdownDismissed, me),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, me: &Addr<TuiActor>) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::NONE) => {
                let _ = me.try_send(TuiMsg::Shutdown);
            }
            (KeyCode::Enter, _) | (KeyCode::Char('c'), KeyModifiers::NONE) => {
                self.start_claim(me);
            }
            (KeyCode::Esc, _) => self.dismiss_current(me),
            _ => {}
        }
    }
}

#[async_trait]
impl Actor for TuiActor {
    type Msg = TuiMsg;

    async fn handle(&mut self, msg: Self::Msg, ctx: &mut Context<Self>) -> Result<()> {
        let me = ctx.addr();
        match msg {
            TuiMsg::InputEvent(ev) => {
                if let CtEvent::Key(k) = ev {
                    self.handle_key(k, &me);
                }
            }
            TuiMsg::PollStatus => self.spawn_status_fetch(me),
            TuiMsg::StatusResult { seq, result } => match result {
                Ok(status) => self.apply_event(ClaimEvent::StatusFetched { seq, status }, &me),
                Err(e) => {
                    tracing::warn!(error = %e, "status poll failed");
                    self.apply_event(ClaimEvent::StatusFetchFailed, &me);
                }
            },
            TuiMsg::ClaimResult(result) => match result {
                Ok(coupon) => self.apply_event(ClaimEvent::ClaimSucceeded { coupon }, &me),
                Err(e) => {
                    tracing::warn!(error = %e, "claim failed");
                    let message = e.server_message().map(str::to_string);
                    self.apply_event(ClaimEvent::ClaimFailed { message }, &me);
                }
            },
            TuiMsg::DismissTimerFired(gen) => {
                if gen == self.dismiss_gen {
                    self.apply_event(ClaimEvent::CountdownDismissed, &me);
                }
            }
            TuiMsg::Tick => {
                self.step_spinner();
                if self.dirty || self.last_tick.elapsed() >= self.tick_rate {
                    self.draw()?;
                    self.last_tick = Instant::now();
                    self.dirty = false;
                }
            }
            TuiMsg::Shutdown => {
                self.cancel_dismiss_timer();
                disable_raw_mode().ok();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                self.shutdown.signal();
                ctx.stop();
            }
        }

        Ok(())
    }
}
