//! tictactoe — a self-playing game of tic-tac-toe for the rust_bp framework.
//!
//! Every rule of the game is its own behavior thread: turn alternation,
//! square reuse, win and draw detection, and the end of the game are all
//! expressed as request / wait-for / block triples, with no central game
//! logic anywhere.  The two players just request every cell each turn; the
//! rule threads shape what can actually happen.
//!
//! Registration order matters here: the per-square guard threads outrank the
//! players, which makes move selection deterministic, and the win/draw
//! detectors outrank everything that requests moves, so a finished game ends
//! before another move can fire.
//!
//! Run with `RUST_LOG=info cargo run -p tictactoe` to see the round-by-round
//! arbitration decisions.

use anyhow::Result;

use bp_core::{EventSet, SyncSpec};
use bp_program::{ProgramBuilder, TraceObserver};
use bp_thread::BtHandle;

// ── Event vocabulary ──────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
enum Game {
    /// X marks (row, col).
    X(u8, u8),
    /// O marks (row, col).
    O(u8, u8),
    XWin,
    OWin,
    Draw,
}

const ENDINGS: [Game; 3] = [Game::XWin, Game::OWin, Game::Draw];

const LINES: [[(u8, u8); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

fn cells() -> impl Iterator<Item = (u8, u8)> {
    (0u8..3).flat_map(|row| (0u8..3).map(move |col| (row, col)))
}

fn x_moves() -> Vec<Game> {
    cells().map(|(row, col)| Game::X(row, col)).collect()
}

fn o_moves() -> Vec<Game> {
    cells().map(|(row, col)| Game::O(row, col)).collect()
}

// ── Program ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut builder = ProgramBuilder::new()
        // Each player requests every cell every turn; the square guards and
        // the turn enforcer veto everything illegal.  An ending releases the
        // player from its loop.
        .add("x player", |bt: &mut BtHandle<Game>| {
            loop {
                let event = bt.sync(SyncSpec::new().request(x_moves()).wait_for(ENDINGS))?;
                if ENDINGS.contains(&event) {
                    return Ok(());
                }
            }
        })
        .add("o player", |bt: &mut BtHandle<Game>| {
            loop {
                let event = bt.sync(SyncSpec::new().request(o_moves()).wait_for(ENDINGS))?;
                if ENDINGS.contains(&event) {
                    return Ok(());
                }
            }
        })
        .add("board", |bt: &mut BtHandle<Game>| {
            let mut board = [[' '; 3]; 3];
            loop {
                match bt.sync(SyncSpec::new().wait_for(EventSet::all()))? {
                    Game::X(row, col) => board[row as usize][col as usize] = 'X',
                    Game::O(row, col) => board[row as usize][col as usize] = 'O',
                    Game::XWin => {
                        println!("X wins!");
                        return Ok(());
                    }
                    Game::OWin => {
                        println!("O wins!");
                        return Ok(());
                    }
                    Game::Draw => {
                        println!("Draw.");
                        return Ok(());
                    }
                }
                println!("---------");
                for row in &board {
                    println!("{} | {} | {}", row[0], row[1], row[2]);
                }
            }
        })
        // X moves first; blocking the side whose turn it isn't alternates
        // the game for as long as it runs.
        .add("enforce turns", |bt: &mut BtHandle<Game>| {
            loop {
                bt.sync(SyncSpec::new().wait_for(x_moves()).block(o_moves()))?;
                bt.sync(SyncSpec::new().wait_for(o_moves()).block(x_moves()))?;
            }
        });

    // One guard per square: once either player marks it, both marks are
    // blocked forever.
    for (row, col) in cells() {
        builder = builder.add(
            format!("square ({row}, {col})"),
            move |bt: &mut BtHandle<Game>| {
                let marks = [Game::X(row, col), Game::O(row, col)];
                bt.sync(SyncSpec::new().wait_for(marks))?;
                bt.sync(SyncSpec::<Game>::new().block(marks))?;
                Ok(())
            },
        );
    }

    // Nine moves with no winner is a draw.  The wait-for lets a win fired at
    // the same moment preempt the draw request.
    builder = builder.add("referee", |bt: &mut BtHandle<Game>| {
        let moves: Vec<Game> = x_moves().into_iter().chain(o_moves()).collect();
        for _ in 0..9 {
            bt.sync(SyncSpec::new().wait_for(moves.clone()))?;
        }
        bt.sync(
            SyncSpec::new()
                .request(Game::Draw)
                .wait_for([Game::XWin, Game::OWin]),
        )?;
        Ok(())
    });

    // A detector per line and player.  Squares cannot repeat, so three
    // notifications mean the whole line is marked.
    for line in LINES {
        builder = builder.add(format!("x line {line:?}"), move |bt: &mut BtHandle<Game>| {
            let marks = line.map(|(row, col)| Game::X(row, col));
            for _ in 0..3 {
                bt.sync(SyncSpec::new().wait_for(marks))?;
            }
            bt.sync(
                SyncSpec::new()
                    .request(Game::XWin)
                    .wait_for([Game::OWin, Game::Draw]),
            )?;
            Ok(())
        });
    }
    for line in LINES {
        builder = builder.add(format!("o line {line:?}"), move |bt: &mut BtHandle<Game>| {
            let marks = line.map(|(row, col)| Game::O(row, col));
            for _ in 0..3 {
                bt.sync(SyncSpec::new().wait_for(marks))?;
            }
            bt.sync(
                SyncSpec::new()
                    .request(Game::OWin)
                    .wait_for([Game::XWin, Game::Draw]),
            )?;
            Ok(())
        });
    }

    // The game ends exactly once.
    let program = builder
        .add("game over", |bt: &mut BtHandle<Game>| {
            bt.sync(SyncSpec::new().wait_for(ENDINGS))?;
            bt.sync(SyncSpec::<Game>::new().block(ENDINGS))?;
            Ok(())
        })
        .build()?;

    let outcome = program.run_with(&mut TraceObserver)?;
    println!("run finished: {outcome:?}");
    Ok(())
}
