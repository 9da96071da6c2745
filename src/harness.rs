//! Line-oriented game loop over stdin/stdout.

use anyhow::Result;
use strictly_arbiter::{CellIndex, MoveArbiter, Outcome, Position, SessionSnapshot};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, instrument};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Tap a cell.
    Cell(CellIndex),
    /// Start over.
    Reset,
    /// Show the board again.
    Board,
    /// Leave the game.
    Quit,
    /// Anything else.
    Unknown(String),
}

impl Input {
    /// Parses a line: a cell number or label, or a keyword.
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "reset" | "r" => Input::Reset,
            "board" | "b" => Input::Board,
            "quit" | "exit" | "q" => Input::Quit,
            other => Position::from_label_or_number(other)
                .map(|pos| Input::Cell(pos.to_index()))
                .unwrap_or_else(|| Input::Unknown(line.trim().to_string())),
        }
    }
}

/// Dialog text shown when a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeNotice {
    /// Headline.
    pub title: &'static str,
    /// Body.
    pub message: &'static str,
    /// Dismiss button label.
    pub button: &'static str,
}

impl OutcomeNotice {
    /// Notice for a terminal outcome; `None` while in progress.
    pub fn for_outcome(outcome: Outcome) -> Option<Self> {
        let notice = match outcome {
            Outcome::HumanWin => Self {
                title: "You Win!",
                message: "Well Done",
                button: "Yay!",
            },
            Outcome::OpponentWin => Self {
                title: "You Lost!",
                message: "Oh Dear",
                button: "Try again!",
            },
            Outcome::Draw => Self {
                title: "It's a draw!",
                message: " - ",
                button: "Rematch!",
            },
            Outcome::InProgress => return None,
        };
        Some(notice)
    }
}

fn render(snapshot: &SessionSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }

    println!("{}\n", snapshot.board.display());
    if let Some(notice) = snapshot.outcome.and_then(OutcomeNotice::for_outcome) {
        println!("{}\n{}", notice.title, notice.message);
        println!("[{}] (type 'reset' to play again)\n", notice.button);
    } else if !snapshot.input_enabled {
        println!("Opponent is thinking...\n");
    }
    Ok(())
}

fn render_if_changed(updates: &mut watch::Receiver<SessionSnapshot>, json: bool) -> Result<()> {
    if updates.has_changed()? {
        let snapshot = updates.borrow_and_update().clone();
        render(&snapshot, json)?;
    }
    Ok(())
}

/// Runs the game loop until stdin closes or the player quits.
#[instrument(skip(arbiter))]
pub async fn run(arbiter: MoveArbiter, json: bool) -> Result<()> {
    let mut updates = arbiter.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if !json {
        println!("Enter a cell (0-8 or a name like 'center'), 'reset', 'board', or 'quit'.\n");
    }
    render(&updates.borrow_and_update().clone(), json)?;

    while let Some(line) = lines.next_line().await? {
        let input = Input::parse(&line);
        debug!(?input, "Read input");
        match input {
            Input::Cell(cell) => {
                arbiter.process_move(cell);
                render_if_changed(&mut updates, json)?;
                arbiter.wait_for_reply().await;
                render_if_changed(&mut updates, json)?;
            }
            Input::Reset => {
                arbiter.reset();
                render_if_changed(&mut updates, json)?;
            }
            Input::Board => render(&arbiter.snapshot(), json)?,
            Input::Quit => break,
            Input::Unknown(text) => println!("Unrecognized input: {text}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cells_and_keywords() {
        assert_eq!(Input::parse("4"), Input::Cell(4));
        assert_eq!(Input::parse(" Center "), Input::Cell(4));
        assert_eq!(Input::parse("top left"), Input::Cell(0));
        assert_eq!(Input::parse("RESET"), Input::Reset);
        assert_eq!(Input::parse("q"), Input::Quit);
        assert_eq!(Input::parse("9"), Input::Unknown("9".to_string()));
    }

    #[test]
    fn test_displayed_numbers_parse_to_their_cells() {
        use strictly_arbiter::Board;

        for board in [Board::new(), Board::from_cells(&[0, 8], &[4])] {
            let shown: Vec<char> = board
                .display()
                .lines()
                .filter(|line| !line.starts_with('-'))
                .flat_map(|line| line.split('|').flat_map(|cell| cell.chars()).collect::<Vec<_>>())
                .collect();
            assert_eq!(shown.len(), 9);

            for (cell, symbol) in shown.into_iter().enumerate() {
                if let Some(digit) = symbol.to_digit(10) {
                    assert_eq!(Input::parse(&symbol.to_string()), Input::Cell(cell));
                    assert_eq!(digit as usize, cell);
                } else {
                    assert!(board.is_occupied(cell));
                }
            }
        }
    }

    #[test]
    fn test_notice_only_for_terminal_outcomes() {
        assert_eq!(OutcomeNotice::for_outcome(Outcome::InProgress), None);
        assert_eq!(
            OutcomeNotice::for_outcome(Outcome::OpponentWin).map(|n| n.title),
            Some("You Lost!")
        );
    }
}
