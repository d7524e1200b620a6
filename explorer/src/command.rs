//! Line commands accepted by the explorer session.

use chess::{parse_square, PieceKind, Square};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Click(Square),
    Drag(Square, Square),
    Move {
        from: Square,
        to: Square,
        role: Option<PieceKind>,
    },
    /// `None` cancels the pending promotion.
    Promote(Option<PieceKind>),
    Select(Square),
    Deselect,
    Back,
    Forward,
    Start,
    Live,
    Flip,
    Reset,
    Range {
        from_unix: Option<i64>,
        to_unix: Option<i64>,
    },
    /// 1-based row of the statistics table; `None` clears the hover.
    Hover(Option<usize>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),
    #[error("Missing {0}")]
    MissingArgument(&'static str),
    #[error("Not a square: {0}")]
    InvalidSquare(String),
    #[error("Not a promotion piece: {0}")]
    InvalidRole(String),
    #[error("Not a number: {0}")]
    InvalidNumber(String),
    #[error("Unexpected argument: {0}")]
    TrailingArgument(String),
}

pub const HELP: &str = "\
Commands:
  click <sq>              select a piece, or play to <sq> if one is selected
  drag <from> <to>        drag a piece and release it on <to>
  move <from> <to> [q|r|b|n]
                          play a move directly
  promote <q|r|b|n|cancel>
                          finish or abandon a pending promotion
  select <sq> / deselect  change the selection
  back / forward          step through the history
  start / live            jump to the first / latest position
  flip                    turn the board around (changes the statistics side)
  reset                   back to the starting position
  range <from|*> <to|*>   limit statistics to games finished in a unix-time range
  hover [n]               highlight row n of the statistics table
  help / quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?.to_lowercase();
        let mut args = Args { words };

        let command = match name.as_str() {
            "click" | "c" => Command::Click(args.square("square")?),
            "drag" | "d" => Command::Drag(args.square("origin")?, args.square("target")?),
            "move" | "m" => Command::Move {
                from: args.square("origin")?,
                to: args.square("target")?,
                role: args.optional_role()?,
            },
            "promote" | "p" => match args.next("promotion piece")? {
                "cancel" | "none" | "x" => Command::Promote(None),
                role => Command::Promote(Some(parse_role(role)?)),
            },
            "select" => Command::Select(args.square("square")?),
            "deselect" => Command::Deselect,
            "back" | "b" => Command::Back,
            "forward" | "f" => Command::Forward,
            "start" => Command::Start,
            "live" => Command::Live,
            "flip" => Command::Flip,
            "reset" => Command::Reset,
            "range" => Command::Range {
                from_unix: args.bound("range start")?,
                to_unix: args.bound("range end")?,
            },
            "hover" => Command::Hover(args.optional_index()?),
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        args.finish()?;
        Ok(command)
    }
}

struct Args<'a> {
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn next(&mut self, what: &'static str) -> Result<&'a str, CommandError> {
        self.words.next().ok_or(CommandError::MissingArgument(what))
    }

    fn square(&mut self, what: &'static str) -> Result<Square, CommandError> {
        let word = self.next(what)?;
        parse_square(&word.to_lowercase())
            .ok_or_else(|| CommandError::InvalidSquare(word.to_string()))
    }

    fn optional_role(&mut self) -> Result<Option<PieceKind>, CommandError> {
        self.words.next().map(parse_role).transpose()
    }

    fn bound(&mut self, what: &'static str) -> Result<Option<i64>, CommandError> {
        match self.next(what)? {
            "*" | "-" => Ok(None),
            word => word
                .parse()
                .map(Some)
                .map_err(|_| CommandError::InvalidNumber(word.to_string())),
        }
    }

    fn optional_index(&mut self) -> Result<Option<usize>, CommandError> {
        match self.words.next() {
            None => Ok(None),
            Some(word) => match word.parse::<usize>() {
                Ok(n) if n > 0 => Ok(Some(n)),
                _ => Err(CommandError::InvalidNumber(word.to_string())),
            },
        }
    }

    fn finish(mut self) -> Result<(), CommandError> {
        match self.words.next() {
            Some(extra) => Err(CommandError::TrailingArgument(extra.to_string())),
            None => Ok(()),
        }
    }
}

fn parse_role(word: &str) -> Result<PieceKind, CommandError> {
    PieceKind::parse(word)
        .filter(|kind| kind.is_promotion_role())
        .ok_or_else(|| CommandError::InvalidRole(word.to_string()))
}
