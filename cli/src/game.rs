use std::io::{BufRead, Write};
use tilesweep_core::*;

use crate::{input, render};

/// Reads one line, `false` once input is closed.
fn read_line(input: &mut impl BufRead, line: &mut String) -> anyhow::Result<bool> {
    line.clear();
    Ok(input.read_line(line)? > 0)
}

/// Asks for a board size until a valid token arrives.
pub(crate) fn prompt_difficulty(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<Option<Difficulty>> {
    for difficulty in Difficulty::ALL {
        writeln!(output, "{difficulty}")?;
    }

    let mut line = String::new();
    loop {
        write!(output, "Choose board size: ")?;
        output.flush()?;
        if !read_line(input, &mut line)? {
            return Ok(None);
        }

        match line.parse() {
            Ok(difficulty) => return Ok(Some(difficulty)),
            Err(err) => {
                log::debug!("Rejected difficulty {:?}: {}", line.trim(), err);
                writeln!(output, "{err}")?;
            }
        }
    }
}

/// Runs a session until it is won, lost or input runs out, then prints the
/// full board if the game ended.
pub(crate) fn play(
    session: &mut GameSession,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    let dim = session.dim();
    let mut line = String::new();

    if session.is_finished() {
        return Err(GameError::AlreadyEnded.into());
    }

    loop {
        write!(output, "\n{}", render::visibility(session.visibility()))?;
        write!(output, "Cell (index or row col): ")?;
        output.flush()?;
        if !read_line(input, &mut line)? {
            log::info!("Input closed before the game ended");
            return Ok(());
        }

        let Some(index) = input::parse_cell(&line, dim) else {
            writeln!(
                output,
                "Enter an index below {} or a row and column below {}",
                session.total_cells(),
                dim
            )?;
            continue;
        };

        let outcome = session.reveal(index)?;
        match outcome {
            RevealOutcome::Win => writeln!(output, "\nAll mines found!")?,
            RevealOutcome::Loss => writeln!(output, "\nStepped on a mine, game over")?,
            RevealOutcome::NoChange => writeln!(output, "Already revealed")?,
            RevealOutcome::Continue => {}
        }
        if outcome.is_final() {
            break;
        }
    }

    write!(output, "{}", render::board(session.full_board()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(dim: Coord, mines: &[CellIndex]) -> GameSession {
        GameSession::from_board(Board::from_mine_indices(dim, mines).unwrap())
    }

    fn run(session: &mut GameSession, input: &str) -> String {
        let mut output = Vec::new();
        play(session, &mut Cursor::new(input), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn difficulty_prompt_retries_until_valid() {
        let mut output = Vec::new();

        let chosen = prompt_difficulty(&mut Cursor::new("XL\nm\n"), &mut output).unwrap();

        assert_eq!(chosen, Some(Difficulty::Medium));
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains(&GameError::InvalidDifficulty.to_string()));
        assert_eq!(output.matches("Choose board size").count(), 2);
    }

    #[test]
    fn difficulty_prompt_stops_on_eof() {
        let mut output = Vec::new();

        assert_eq!(
            prompt_difficulty(&mut Cursor::new(""), &mut output).unwrap(),
            None
        );
    }

    #[test]
    fn flood_fill_win_prints_full_board() {
        let mut game = session(3, &[0]);

        let output = run(&mut game, "2 2\n");

        assert!(output.contains("All mines found!"));
        assert!(output.ends_with(" 0 [M][1][0]\n 1 [1][1][0]\n 2 [0][0][0]\n"));
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn mine_ends_the_loop() {
        let mut game = session(3, &[0, 4]);

        let output = run(&mut game, "8\n4\n1\n");

        assert!(output.contains("Stepped on a mine"));
        assert_eq!(game.state(), GameState::Lost);
        // input after the loss is never read
        assert!(!game.visibility().is_revealed(1));
    }

    #[test]
    fn finished_session_is_refused() {
        let mut game = session(3, &[0]);
        game.reveal(8).unwrap();

        let mut output = Vec::new();
        let err = play(&mut game, &mut Cursor::new("0\n"), &mut output).unwrap_err();

        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::AlreadyEnded)
        );
        assert!(output.is_empty());
    }

    #[test]
    fn bad_and_repeated_input_is_reprompted() {
        let mut game = session(3, &[0, 4]);

        let output = run(&mut game, "nope\n8\n8\n99\n");

        assert!(output.contains("Enter an index below 9"));
        assert!(output.contains("Already revealed"));
        assert_eq!(game.visibility().revealed_count(), 1);
        assert!(!game.is_finished());
    }
}
