//! Interactive explorer session.
//!
//! Reads one command per line, drives the board controller and keeps the
//! statistics panel in step with the displayed position. Statistics are
//! fetched on spawned tasks; answers come back over a channel and are only
//! shown if they still match the board.

use std::cell::Cell;
use std::io::Write as _;
use std::rc::Rc;
use std::sync::Arc;

use board::{BoardController, BoardEvent, InputEffect, MoveOutcome, PromotionResolution};
use chess::format_square;
use stats_client::{
    MoveStat, QueryTicket, QueryTracker, StatsPanel, StatsQuery, StatsResult, StatsService,
    TimeRange,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::command::{Command, HELP};
use crate::config::Identity;
use crate::render;

/// Maximum number of statistics answers waiting to be handled.
const REPLY_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A statistics answer and the query it belongs to.
#[derive(Debug)]
pub struct StatsReply {
    pub ticket: QueryTicket,
    pub result: StatsResult<Vec<MoveStat>>,
}

pub struct Session<S> {
    board: BoardController,
    service: Arc<S>,
    identity: Option<Identity>,
    time_range: TimeRange,
    tracker: QueryTracker,
    panel: StatsPanel,
    /// Set by the board listener when the statistics question changed.
    stale: Rc<Cell<bool>>,
    replies_tx: mpsc::Sender<StatsReply>,
    replies_rx: mpsc::Receiver<StatsReply>,
    message: Option<String>,
}

impl<S: StatsService + 'static> Session<S> {
    pub fn new(
        mut board: BoardController,
        service: Arc<S>,
        identity: Option<Identity>,
        time_range: TimeRange,
    ) -> Self {
        let stale = Rc::new(Cell::new(true));
        let flag = Rc::clone(&stale);
        board.subscribe(move |event| {
            if matches!(
                event,
                BoardEvent::PositionChanged { .. } | BoardEvent::OrientationChanged(_)
            ) {
                flag.set(true);
            }
        });

        let (replies_tx, replies_rx) = mpsc::channel(REPLY_CHANNEL_CAPACITY);
        Self {
            board,
            service,
            identity,
            time_range,
            tracker: QueryTracker::new(),
            panel: StatsPanel::Empty,
            stale,
            replies_tx,
            replies_rx,
            message: None,
        }
    }

    pub fn board(&self) -> &BoardController {
        &self.board
    }

    pub fn panel(&self) -> &StatsPanel {
        &self.panel
    }

    pub fn tracker(&self) -> &QueryTracker {
        &self.tracker
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The statistics question for the displayed position, if a player is
    /// configured.
    pub fn stats_query(&self) -> Option<StatsQuery> {
        let identity = self.identity.as_ref()?;
        Some(StatsQuery {
            fen: self.board.current().fen().to_string(),
            play_as: self.board.play_as(),
            username: identity.username.clone(),
            platform: identity.platform,
            time_range: self.time_range,
        })
    }

    /// Apply one input line.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            self.message = None;
            return Flow::Continue;
        }

        let flow = match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(e) => {
                self.message = Some(e.to_string());
                Flow::Continue
            }
        };

        self.refresh_if_stale();
        flow
    }

    fn execute(&mut self, command: Command) -> Flow {
        tracing::debug!(?command, "executing");
        self.message = match command {
            Command::Click(square) => describe_effect(self.board.click(square)),
            Command::Drag(from, to) => describe_effect(self.board.drop_piece(from, to)),
            Command::Move { from, to, role } => match self.board.attempt_move(from, to, role) {
                MoveOutcome::Success(applied) => Some(format!("Played {}", applied.played.san)),
                MoveOutcome::Promotion(pending) => Some(format!(
                    "Promote {}: promote q|r|b|n or promote cancel",
                    pending.draft()
                )),
                MoveOutcome::Illegal => Some("Illegal move".to_string()),
            },
            Command::Promote(role) => match self.board.resolve_promotion(role) {
                PromotionResolution::NothingPending => Some("No promotion pending".to_string()),
                PromotionResolution::Cancelled(_) => Some("Promotion cancelled".to_string()),
                PromotionResolution::Committed(applied) => {
                    Some(format!("Played {}", applied.played.san))
                }
                PromotionResolution::Rejected(_) => Some("Illegal promotion".to_string()),
            },
            Command::Select(square) => {
                if self.board.select(square) {
                    None
                } else {
                    Some(format!("Cannot select {}", format_square(square)))
                }
            }
            Command::Deselect => {
                self.board.deselect();
                None
            }
            Command::Back => (!self.board.step_back()).then(|| "At the first position".to_string()),
            Command::Forward => {
                (!self.board.step_forward()).then(|| "At the latest position".to_string())
            }
            Command::Start => {
                self.board.jump_to_start();
                None
            }
            Command::Live => {
                self.board.jump_to_live();
                None
            }
            Command::Flip => {
                self.board.flip_orientation();
                None
            }
            Command::Reset => {
                self.board.reset_board();
                None
            }
            Command::Range { from_unix, to_unix } => self.set_time_range(from_unix, to_unix),
            Command::Hover(row) => self.hover(row),
            Command::Help => Some(HELP.to_string()),
            Command::Quit => return Flow::Quit,
        };
        Flow::Continue
    }

    fn set_time_range(&mut self, from_unix: Option<i64>, to_unix: Option<i64>) -> Option<String> {
        if let (Some(from), Some(to)) = (from_unix, to_unix) {
            if from > to {
                return Some("Range start is after its end".to_string());
            }
        }
        self.time_range = TimeRange::new(from_unix, to_unix);
        self.stale.set(true);
        Some(format!("Games finished in {}", self.time_range))
    }

    fn hover(&mut self, row: Option<usize>) -> Option<String> {
        let table = self.panel.table_mut()?;
        table.clear_hover();
        if let Some(row) = row {
            if row > table.len() {
                return Some(format!("No row {}", row));
            }
            table.set_hovered(row - 1, true);
        }
        None
    }

    fn refresh_if_stale(&mut self) {
        if self.stale.replace(false) {
            self.refresh_stats();
        }
    }

    /// Ask for statistics of the displayed position. The panel shows
    /// loading until the matching answer arrives.
    fn refresh_stats(&mut self) {
        let Some(query) = self.stats_query() else {
            self.tracker.clear();
            self.panel = StatsPanel::Empty;
            return;
        };

        let ticket = self.tracker.issue(&query);
        self.panel = StatsPanel::Loading;
        tracing::debug!("Requesting statistics #{} for {}", ticket.id, query.fen);

        let service = Arc::clone(&self.service);
        let tx = self.replies_tx.clone();
        tokio::spawn(async move {
            let result = service.move_stats(&query).await;
            if tx.send(StatsReply { ticket, result }).await.is_err() {
                tracing::debug!("Session closed before statistics arrived");
            }
        });
    }

    /// Show a statistics answer if it is still relevant. Returns whether
    /// the panel changed.
    pub fn handle_reply(&mut self, reply: StatsReply) -> bool {
        if !self.tracker.accept(&reply.ticket) {
            return false;
        }

        match reply.result {
            Ok(stats) => {
                tracing::debug!("Statistics #{}: {} moves", reply.ticket.id, stats.len());
                self.panel = StatsPanel::ready(stats);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch statistics: {}", e);
                self.panel = StatsPanel::Empty;
                self.message = Some("Statistics unavailable".to_string());
            }
        }
        true
    }

    /// Wait for the next statistics answer.
    pub async fn next_reply(&mut self) -> Option<StatsReply> {
        self.replies_rx.recv().await
    }

    pub fn render(&self) -> String {
        let mut out = render::render_board(&self.board);
        out.push_str(&render::render_status(&self.board));
        out.push('\n');

        let moves = render::render_moves(&self.board);
        if !moves.is_empty() {
            out.push_str(&moves);
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&render::render_stats(
            &self.board,
            &self.panel,
            self.identity.is_some(),
        ));
        out.push('\n');

        if let Some(message) = &self.message {
            out.push_str(message);
            out.push('\n');
        }
        out
    }

    /// Run until `quit` or end of input, redrawing after every command and
    /// every accepted statistics answer.
    pub async fn run<R>(&mut self, input: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        self.refresh_if_stale();
        redraw(&self.render());

        loop {
            let changed = tokio::select! {
                biased;

                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if self.handle_line(&line) == Flow::Quit {
                                break;
                            }
                            true
                        }
                        None => break,
                    }
                }

                Some(reply) = self.replies_rx.recv() => self.handle_reply(reply),
            };

            if changed {
                redraw(&self.render());
            }
        }

        tracing::info!(
            "Session ended after {} positions, {} stale statistics answers dropped",
            self.board.history_len(),
            self.tracker.discarded()
        );
        Ok(())
    }
}

fn redraw(screen: &str) {
    println!("{}", screen);
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn describe_effect(effect: InputEffect) -> Option<String> {
    match effect {
        InputEffect::Ignored => Some("Nothing to do there".to_string()),
        InputEffect::Selected(_) | InputEffect::Deselected => None,
        InputEffect::Moved(played) => Some(format!("Played {}", played.san)),
        InputEffect::PromotionPending(pending) => Some(format!(
            "Promote {}: promote q|r|b|n or promote cancel",
            pending.draft()
        )),
        InputEffect::Rejected { .. } => Some("Illegal move".to_string()),
    }
}
