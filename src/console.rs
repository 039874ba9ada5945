//! Line-oriented front end that drives a [`SketchSession`] from a terminal.

use std::str::FromStr;

use crate::error::{Result, SketchError};
use crate::grid::GridSize;
use crate::session::SketchSession;

pub const HELP: &str = "\
commands:
  paint <row> <col>    paint one cell
  press <x> <y>        pointer down at canvas pixel (x, y)
  drag <x> <y>         pointer move; paints while pressed
  release              pointer up
  train <label>        store the drawing under <label> and clear the grid
  guess                guess the label of the drawing
  yes                  the last guess was right
  no <label>           the last guess was wrong; it was <label>
  clear                clear the grid
  resize <16|32|48>    switch grid size (forgets all training)
  show                 print the grid
  status               print classifier state
  help                 print this text
  quit                 leave";

/// One parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Paint { row: usize, col: usize },
    Press { x: f64, y: f64 },
    Drag { x: f64, y: f64 },
    Release,
    Train(String),
    Guess,
    Yes,
    No(String),
    Clear,
    Resize(GridSize),
    Show,
    Status,
    Help,
    Quit,
}

fn parse_arg<T: FromStr>(value: Option<&str>, name: &str) -> Result<T> {
    let value = value.ok_or_else(|| SketchError::Command(format!("missing <{}>", name)))?;
    value
        .parse()
        .map_err(|_| SketchError::Command(format!("invalid <{}>: {:?}", name, value)))
}

/// Everything after the keyword, trimmed; labels may contain spaces.
fn parse_label(rest: &str) -> Result<String> {
    let label = rest.trim();
    if label.is_empty() {
        return Err(SketchError::Command("missing <label>".to_string()));
    }
    Ok(label.to_string())
}

impl FromStr for Command {
    type Err = SketchError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let mut args = rest.split_whitespace();

        let command = match keyword.to_ascii_lowercase().as_str() {
            "paint" => Command::Paint {
                row: parse_arg(args.next(), "row")?,
                col: parse_arg(args.next(), "col")?,
            },
            "press" => Command::Press {
                x: parse_arg(args.next(), "x")?,
                y: parse_arg(args.next(), "y")?,
            },
            "drag" => Command::Drag {
                x: parse_arg(args.next(), "x")?,
                y: parse_arg(args.next(), "y")?,
            },
            "release" => Command::Release,
            "train" => Command::Train(parse_label(rest)?),
            "guess" => Command::Guess,
            "yes" => Command::Yes,
            "no" => Command::No(parse_label(rest)?),
            "clear" => Command::Clear,
            "resize" => {
                let cells: usize = parse_arg(args.next(), "size")?;
                Command::Resize(GridSize::try_from(cells)?)
            }
            "show" => Command::Show,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err(SketchError::Command("empty command".to_string())),
            other => return Err(SketchError::Command(format!("unknown command {:?} (try 'help')", other))),
        };
        Ok(command)
    }
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Runs `command` against `session` and describes the outcome.
///
/// Rejections the user can act on (unknown correction label, feedback with no
/// guess) come back as errors so the caller can print them.
pub fn execute(session: &mut SketchSession, command: Command) -> Result<Reply> {
    let text = match command {
        Command::Paint { row, col } => {
            if session.paint_cell(row, col) {
                format!("painted ({}, {})", row, col)
            } else {
                format!("({}, {}) unchanged", row, col)
            }
        }
        Command::Press { x, y } => {
            session.press(x, y);
            "pressed".to_string()
        }
        Command::Drag { x, y } => {
            session.drag(x, y);
            format!("{} cells painted", session.grid().painted_cells())
        }
        Command::Release => {
            session.release();
            "released".to_string()
        }
        Command::Train(label) => {
            let count = session.train(label);
            format!("stored; {} training examples", count)
        }
        Command::Guess => match session.guess() {
            Some(label) => format!("model guess: {} (yes / no <label>)", label),
            None => format!(
                "need more than {} examples to guess, have {}",
                session.classifier().k(),
                session.classifier().len()
            ),
        },
        Command::Yes => {
            let label = session.confirm()?;
            format!("great, it was {}", label)
        }
        Command::No(label) => {
            let count = session.correct(&label)?;
            format!("learned {}; {} training examples", label, count)
        }
        Command::Clear => {
            session.clear_grid();
            "cleared".to_string()
        }
        Command::Resize(size) => {
            if session.resize(size) {
                format!("grid is now {}; training examples cleared", size)
            } else {
                format!("grid is already {}", size)
            }
        }
        Command::Show => session.render(),
        Command::Status => {
            let classifier = session.classifier();
            format!(
                "grid {}, k = {}, {} examples, labels [{}]",
                session.grid().size(),
                classifier.k(),
                classifier.len(),
                classifier.labels().join(", ")
            )
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Reply::Quit),
    };
    Ok(Reply::Text(text))
}
