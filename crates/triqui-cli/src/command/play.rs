use std::{
    fmt::Write as _,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use rand::RngCore;
use triqui_engine::{Board, Mark, Outcome};
use triqui_evaluator::{
    agent::Agent as _, fitness_evaluator::MatchTally, heuristic_agent::HeuristicAgent,
};

use crate::model::ai_model::AiModel;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to the model file (JSON format); the default preset is used otherwise
    #[arg(long)]
    model: Option<PathBuf>,
    /// Let the computer make the first move
    #[arg(long)]
    computer_first: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let genome = AiModel::genome_or_default(arg.model.as_ref())?;
    let agent = HeuristicAgent::new(genome);
    let mut rng = rand::rng();

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let tally = play_session(stdin, stdout, &agent, arg.computer_first, &mut rng)?;

    eprintln!("Final score: {}", format_tally(&tally));
    Ok(())
}

/// Plays games until the player quits, returning the tally from the player's side.
///
/// The first mover always plays X. A game abandoned halfway is not counted.
fn play_session<R, W>(
    mut input: R,
    mut output: W,
    agent: &HeuristicAgent,
    computer_first: bool,
    rng: &mut dyn RngCore,
) -> anyhow::Result<MatchTally>
where
    R: BufRead,
    W: Write,
{
    let human = if computer_first { Mark::O } else { Mark::X };
    let mut tally = MatchTally::new();

    writeln!(output, "You play {human}. Enter a cell number (1-9), or q to quit.")?;
    loop {
        let Some(outcome) = play_game(&mut input, &mut output, agent, human, rng)? else {
            return Ok(tally);
        };
        tally.record(outcome, human);

        let message = match outcome {
            Outcome::Win(mark) if mark == human => "You win!",
            Outcome::Win(_) => "The computer wins.",
            Outcome::Draw => "It's a draw.",
        };
        writeln!(output, "{message}")?;
        writeln!(output, "Score: {}", format_tally(&tally))?;

        write!(output, "Play again? [y/N] ")?;
        output.flush()?;
        let answer = read_line(&mut input)?;
        if !answer.is_some_and(|answer| answer.eq_ignore_ascii_case("y")) {
            return Ok(tally);
        }
    }
}

/// Plays one game. Returns `None` if the player quits before it ends.
fn play_game<R, W>(
    input: &mut R,
    output: &mut W,
    agent: &HeuristicAgent,
    human: Mark,
    rng: &mut dyn RngCore,
) -> anyhow::Result<Option<Outcome>>
where
    R: BufRead,
    W: Write,
{
    let mut board = Board::new();
    let mut mark = Mark::X;
    loop {
        if mark == human {
            write!(output, "{}", render_board(&board))?;
            let Some(index) = read_human_move(input, output, &board)? else {
                return Ok(None);
            };
            board.place(mark, index)?;
        } else {
            let index = agent
                .choose_move(&board, mark, rng)
                .context("computer found no move on an unfinished board")?;
            board.place(mark, index)?;
            writeln!(output, "Computer plays {}.", index + 1)?;
        }

        if let Some(outcome) = board.winner() {
            write!(output, "{}", render_board(&board))?;
            return Ok(Some(outcome));
        }
        mark = mark.opponent();
    }
}

fn read_human_move<R, W>(
    input: &mut R,
    output: &mut W,
    board: &Board,
) -> anyhow::Result<Option<usize>>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "Your move: ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match line.parse::<usize>() {
            Ok(cell @ 1..=9) if board.cell(cell - 1) == Some(Mark::Empty) => {
                return Ok(Some(cell - 1));
            }
            Ok(cell @ 1..=9) => writeln!(output, "Cell {cell} is already taken.")?,
            _ => writeln!(output, "Enter a cell number from 1 to 9, or q to quit.")?,
        }
    }
}

/// Reads one trimmed line, `None` at end of input.
fn read_line<R>(input: &mut R) -> io::Result<Option<String>>
where
    R: BufRead,
{
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// Draws the board with empty cells numbered 1-9.
fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for (row, cells) in board.cells().chunks(3).enumerate() {
        if row > 0 {
            out.push_str("---+---+---\n");
        }
        let line = cells
            .iter()
            .enumerate()
            .map(|(col, mark)| match mark {
                Mark::Empty => format!(" {} ", row * 3 + col + 1),
                mark => format!(" {mark} "),
            })
            .collect::<Vec<_>>()
            .join("|");
        let _ = writeln!(out, "{line}");
    }
    out
}

fn format_tally(tally: &MatchTally) -> String {
    format!(
        "you {}, computer {}, draws {}",
        tally.wins, tally.losses, tally.draws
    )
}
