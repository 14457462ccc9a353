//! # crossword-solver
//!
//! A command-line crossword filler. Given a structure file describing the
//! grid (underscores mark the cells to fill, anything else is blocked) and
//! a word list, it fills every slot with a distinct word so that all
//! crossings agree, or reports that no fill exists.
//!
//! The engine enforces node consistency (word length), propagates the
//! crossing constraints to a fixpoint with AC-3, and then runs heuristic
//! backtracking search (minimum remaining values with a degree tie-break,
//! least-constraining-value ordering).
//!
//! ## Subcommands
//!
//! 1. **`solve`**: fill a structure file with words from a word list file.
//!    ```sh
//!    crossword-solver solve --structure data/structure0.txt --words data/words0.txt
//!    ```
//! 2. **`text`**: fill a structure provided inline, with a comma-separated
//!    vocabulary.
//!    ```sh
//!    crossword-solver text --structure '#_#
//!    ___
//!    #_#' --words cat,mat
//!    ```
//! 3. **`batch`**: fill every `.txt` structure file in a directory against
//!    one word list.
//!    ```sh
//!    crossword-solver batch --dir data --words data/words0.txt
//!    ```
//! 4. **`completions`**: generate shell completion scripts.
//!
//! ## Common options
//!
//! -   `-d, --debug`: verbose output while solving (default: `false`).
//! -   `--verify`: re-check the returned fill against every constraint
//!     (default: `true`).
//! -   `--stats`: print problem and search statistics (default: `true`).
//! -   `-p, --print-solution`: print the word assigned to each slot
//!     (default: `false`).

use clap::{Args, CommandFactory, Parser, Subcommand};
use crossword_solver::grid::Grid;
use crossword_solver::render;
use crossword_solver::solver::assignment::Assignment;
use crossword_solver::solver::puzzle::Puzzle;
use crossword_solver::solver::search::{CrosswordSolver, SolveStats};
use crossword_solver::words::WordList;
use itertools::Itertools;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator`, which also backs the
/// memory figures in the statistics table.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the crossword solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "crossword-solver", version, about = "A heuristic crossword filler")]
struct Cli {
    /// Specifies the subcommand to execute (e.g. `solve`, `text`, `batch`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill a structure file with words from a word list file.
    Solve {
        /// Path to the structure file. Underscores mark open cells.
        #[arg(long)]
        structure: PathBuf,

        /// Path to the word list file, one word per line.
        #[arg(long)]
        words: PathBuf,

        /// Optional path to write the filled grid to.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Fill a structure provided as inline text.
    Text {
        /// The structure itself; rows separated by newlines.
        #[arg(long)]
        structure: String,

        /// Comma-separated vocabulary (e.g. "cat,mat,arm").
        #[arg(long)]
        words: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Fill every `.txt` structure file in a directory against one word
    /// list.
    Batch {
        /// Path to the directory of structure files.
        #[arg(long)]
        dir: PathBuf,

        /// Path to the word list file shared by every structure.
        #[arg(long)]
        words: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
struct CommonOptions {
    /// Enable debug output, providing more verbose logging during solving.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable verification of the fill. A returned fill is re-checked
    /// against the length, uniqueness and crossing constraints.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Enable printing of the word assigned to each slot.
    #[arg(short, long, default_value_t = false)]
    print_solution: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Solve {
            structure,
            words,
            output,
            common,
        }) => solve_file(&structure, &words, output.as_deref(), &common),

        Some(Commands::Text {
            structure,
            words,
            common,
        }) => solve_text(&structure, &words, &common),

        Some(Commands::Batch { dir, words, common }) => solve_dir(&dir, &words, &common),

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }

        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Parses a structure file and a word list file, then solves and reports.
fn solve_file(
    structure: &Path,
    words: &Path,
    output: Option<&Path>,
    common: &CommonOptions,
) -> Result<(), String> {
    let time = std::time::Instant::now();

    let grid = Grid::from_file(structure)
        .map_err(|e| format!("Error parsing {}: {e}", structure.display()))?;
    let vocabulary =
        WordList::from_file(words).map_err(|e| format!("Error reading {}: {e}", words.display()))?;
    let puzzle = Puzzle::new(grid);

    let parse_time = time.elapsed();
    solve_and_report(
        &puzzle,
        &vocabulary,
        Some(structure),
        parse_time,
        output,
        common,
    )
}

/// Solves a structure given inline, with a comma-separated vocabulary.
fn solve_text(structure: &str, words: &str, common: &CommonOptions) -> Result<(), String> {
    let time = std::time::Instant::now();

    let grid = Grid::from_text(structure).map_err(|e| format!("Error parsing structure: {e}"))?;
    let vocabulary = parse_inline_words(words);
    let puzzle = Puzzle::new(grid);

    let parse_time = time.elapsed();
    solve_and_report(&puzzle, &vocabulary, None, parse_time, None, common)
}

/// Solves every `.txt` structure file under `dir` against one word list.
fn solve_dir(dir: &Path, words: &Path, common: &CommonOptions) -> Result<(), String> {
    if !dir.is_dir() {
        return Err(format!("Provided path is not a directory: {}", dir.display()));
    }

    let vocabulary =
        WordList::from_file(words).map_err(|e| format!("Error reading {}: {e}", words.display()))?;

    for entry in walkdir::WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        let file_path = entry.path().to_path_buf();
        if !file_path.is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "txt") {
            eprintln!("Skipping non-structure file: {}", file_path.display());
            continue;
        }

        // The word list may live in the same directory; it is not a grid.
        if file_path == words {
            continue;
        }

        let time = std::time::Instant::now();
        let grid = Grid::from_file(&file_path)
            .map_err(|e| format!("Error parsing {}: {e}", file_path.display()))?;
        let puzzle = Puzzle::new(grid);
        let parse_time = time.elapsed();

        solve_and_report(&puzzle, &vocabulary, Some(&file_path), parse_time, None, common)?;
    }

    Ok(())
}

/// Splits a comma-separated vocabulary argument into a word list.
fn parse_inline_words(input: &str) -> WordList {
    WordList::new(input.split(','))
}

/// Solves a puzzle and reports the result, statistics and verification.
fn solve_and_report(
    puzzle: &Puzzle,
    words: &WordList,
    label: Option<&Path>,
    parse_time: Duration,
    output: Option<&Path>,
    common: &CommonOptions,
) -> Result<(), String> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    if common.debug {
        println!("Structure:\n{}", puzzle.grid());
        println!("Variables: {}", puzzle.variables().len());
        println!("Words: {}", words.len());
    }

    epoch::advance().unwrap();

    let time = std::time::Instant::now();
    let mut solver = CrosswordSolver::new(puzzle, words);
    let sol = solver.solve();
    let elapsed = time.elapsed();

    if common.debug {
        println!("Solution: {sol:?}");
        println!("Time: {elapsed:?}");
    }

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_solution(puzzle, words, sol.as_ref());
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            puzzle,
            words,
            solver.stats(),
            allocated_mib,
            resident_mib,
            sol.is_some(),
        );
    }

    match &sol {
        Some(assignment) => {
            println!("Solution:\n{}", render::render(puzzle, words, assignment));

            if common.print_solution {
                for (v, id) in assignment.iter().sorted() {
                    println!("{v} = {}", words.get(id));
                }
            }

            if let Some(path) = output {
                render::write_solution(path, puzzle, words, assignment)
                    .map_err(|e| format!("Unable to write {}: {e}", path.display()))?;
                println!("Solution written to: {}", path.display());
            }
        }
        None => println!("No solution found"),
    }

    Ok(())
}

/// Verifies a returned fill against every constraint.
///
/// Prints whether the verification was successful; a fill that fails it
/// is a solver defect, so this panics. `None` (no fill exists) prints
/// "UNSOLVABLE".
fn verify_solution(puzzle: &Puzzle, words: &WordList, sol: Option<&Assignment>) {
    if let Some(assignment) = sol {
        let ok = assignment.is_complete(puzzle) && assignment.is_consistent(puzzle, words);
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    } else {
        println!("UNSOLVABLE");
    }
}

/// Helper function to print a single statistic line in a formatted table
/// row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
#[allow(clippy::cast_precision_loss)]
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
#[allow(clippy::too_many_arguments)]
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    puzzle: &Puzzle,
    words: &WordList,
    s: &SolveStats,
    allocated: f64,
    resident: f64,
    solved: bool,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let overlaps: usize = puzzle
        .variables()
        .iter()
        .map(|&v| puzzle.degree(v))
        .sum::<usize>()
        / 2;

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", puzzle.variables().len());
    stat_line("Words", words.len());
    stat_line("Overlaps", overlaps);

    println!("========================[ Search Statistics ]========================");
    stat_line("Pruned (node consistency)", s.node_eliminations);
    stat_line("Pruned (arc consistency)", s.arc_eliminations);
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solved {
        println!("\nSOLVED");
    } else {
        println!("\nUNSOLVABLE");
    }
}
