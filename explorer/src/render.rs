//! Plain-text rendering of the board, move list and statistics panel.

use std::fmt::Write;

use board::{BoardController, HistoryEntry};
use chess::{format_file, Codec, DisplayBoard, PieceColor, PositionStatus, Square};
use stats_client::{StatsPanel, StatsTable};

/// The board as seen from the bottom side.
///
/// Cells are three characters wide: `[x]` selected, `(x)` legal
/// destination of the selection, `<x>` last move, ` x ` otherwise.
pub fn render_board(board: &BoardController) -> String {
    let current = board.current();
    let display = match DisplayBoard::from_fen(current.fen()) {
        Ok(display) => display,
        Err(e) => {
            tracing::warn!("Cannot draw {}: {}", current.fen(), e);
            return format!("(unrenderable position: {})\n", current.fen());
        }
    };

    let destinations = board.selection_destinations();
    let last = board.last_move().map(|played| (played.mv.from, played.mv.to));
    let rows = board.orientation().rows();

    let files: String = rows
        .last()
        .map(|row| row.iter().map(|sq| format!(" {} ", format_file(sq.file()))).collect())
        .unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(out, "   {}", files);
    for row in &rows {
        let rank = row.first().map(|sq| sq.rank() as u8 + 1).unwrap_or(0);
        let cells: String = row
            .iter()
            .map(|&sq| cell(sq, display.glyph(sq), board.selected(), &destinations, last))
            .collect();
        let _ = writeln!(out, "{:>2} {} {}", rank, cells, rank);
    }
    let _ = writeln!(out, "   {}", files);
    out
}

fn cell(
    square: Square,
    glyph: char,
    selected: Option<Square>,
    destinations: &[Square],
    last: Option<(Square, Square)>,
) -> String {
    if selected == Some(square) {
        format!("[{}]", glyph)
    } else if destinations.contains(&square) {
        format!("({})", glyph)
    } else if last.is_some_and(|(from, to)| from == square || to == square) {
        format!("<{}>", glyph)
    } else {
        format!(" {} ", glyph)
    }
}

/// One line describing whose turn it is and what the board is waiting for.
pub fn render_status(board: &BoardController) -> String {
    let current = board.current();
    let side = match current.side_to_move() {
        PieceColor::White => "White",
        PieceColor::Black => "Black",
    };

    let mut status = match current.status() {
        PositionStatus::Checkmate => format!("{} is checkmated", side),
        PositionStatus::Drawn => "Draw".to_string(),
        PositionStatus::Ongoing if current.in_check() => format!("{} to move, in check", side),
        PositionStatus::Ongoing => format!("{} to move", side),
    };

    if let Some(pending) = board.pending_promotion() {
        let _ = write!(
            status,
            " | promote {}: q/r/b/n or cancel",
            pending.draft()
        );
    }
    if board.cursor() > 0 {
        let _ = write!(
            status,
            " | viewing {} of {}",
            board.history_len() - board.cursor(),
            board.history_len()
        );
    }
    let _ = write!(status, " | stats as {}", board.play_as());
    status
}

/// Numbered move list; the move leading to the displayed position is
/// bracketed.
pub fn render_moves(board: &BoardController) -> String {
    let entries = board.history().entries();
    let shown = board.history().current_index();
    let mut out = String::new();

    for (index, pair) in entries.windows(2).enumerate() {
        let [before, after] = pair else { continue };
        let Some(played) = after_move(after) else { continue };

        let number = before.position.fullmove_number();
        match before.position.side_to_move() {
            PieceColor::White => {
                let _ = write!(out, "{}. ", number);
            }
            PieceColor::Black if index == 0 => {
                let _ = write!(out, "{}... ", number);
            }
            PieceColor::Black => {}
        }

        if index + 1 == shown {
            let _ = write!(out, "[{}] ", played);
        } else {
            let _ = write!(out, "{} ", played);
        }
    }

    out.trim_end().to_string()
}

fn after_move(entry: &HistoryEntry) -> Option<&str> {
    entry.reached_by.as_ref().map(|played| played.san.as_str())
}

/// The statistics panel below the board.
pub fn render_stats(board: &BoardController, panel: &StatsPanel, enabled: bool) -> String {
    if !enabled {
        return "Statistics disabled: pass --username or set EXPLORER_USERNAME".to_string();
    }

    match panel {
        StatsPanel::Empty => "No statistics".to_string(),
        StatsPanel::Loading => "Loading statistics...".to_string(),
        StatsPanel::Ready { table, summary } => {
            let mut out = String::new();
            match summary {
                Some(summary) => {
                    let _ = writeln!(
                        out,
                        "{} games, {:.1}% won, {:.1}% drawn, avg opponent {:.0}",
                        summary.total_games,
                        summary.win_rate() * 100.0,
                        percent(summary.draws, summary.total_games),
                        summary.avg_opponent_elo
                    );
                }
                None => {
                    let _ = writeln!(out, "No games reached this position");
                }
            }
            out.push_str(&render_table(board, table));
            out.trim_end().to_string()
        }
    }
}

fn render_table(board: &BoardController, table: &StatsTable) -> String {
    if table.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "   # {:<8} {:>6} {:>7} {:>7} {:>7} {:>8}",
        "move", "games", "played", "won", "drawn", "opp elo"
    );
    for (index, row) in table.rows().iter().enumerate() {
        let marker = if row.hovered { '>' } else { ' ' };
        let label = row
            .mv
            .and_then(|mv| board.codec().san(board.current(), mv))
            .unwrap_or_else(|| row.stat.move_uci.clone());
        let _ = writeln!(
            out,
            "{} {:>2} {:<8} {:>6} {:>6.1}% {:>6.1}% {:>6.1}% {:>8}",
            marker,
            index + 1,
            label,
            row.stat.total,
            row.play_rate * 100.0,
            row.win_rate * 100.0,
            percent(row.stat.draws, row.stat.total),
            row.stat.avg_opponent_elo
        );
    }
    out
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
