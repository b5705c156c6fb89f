mod report;

use anyhow::{Context, Result, bail};
use blackhole_common::{Layout, Rules, parse_ints};
use blackhole_solver::{Checker, SearchOptions, Solver, Strategy};
use clap::{Args, Parser, Subcommand, ValueEnum};

use std::io::{IsTerminal, Read, stdin};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random layout and print its integer encoding
    Gen {
        /// Shuffle seed
        seed: u64,
        /// Cards dealt across the piles
        #[arg(default_value_t = 51)]
        cards: usize,
        /// Ranks per suit
        #[arg(default_value_t = 13)]
        ranks: i32,
        /// Number of suits
        #[arg(default_value_t = 4)]
        suits: i32,
        /// Number of piles
        #[arg(default_value_t = 17)]
        piles: i32,
    },
    /// Solve a black-hole layout
    Solve(SolveArgs),
    /// Solve a worm-hole layout
    Solveworm(SolveArgs),
    /// Check a black-hole solution against a layout
    Check(CheckArgs),
    /// Check a worm-hole solution against a layout
    Checkworm(CheckArgs),
    /// Sweep a layout parameter, solving each generated puzzle and
    /// recording its statistics
    Bench(BenchArgs),
}

#[derive(Args)]
struct SolveArgs {
    /// Layout file; omit or pass `-` to read stdin
    file: Option<PathBuf>,
    /// Sibling exploration order
    #[arg(long, value_enum, default_value_t = StrategyArg::Stack)]
    strategy: StrategyArg,
    /// Enumerate every solution instead of stopping at the first
    #[arg(long)]
    complete: bool,
    /// Wall-clock budget in milliseconds
    #[arg(long, default_value_t = 60_000, value_name = "MS")]
    budget: u64,
    /// Abort after visiting this many nodes
    #[arg(long, value_name = "NUM")]
    max_nodes: Option<u64>,
    /// Suppress the solution line
    #[arg(long)]
    quiet: bool,
    /// Report elapsed time
    #[arg(long)]
    time: bool,
    /// Report the visited-node count
    #[arg(long)]
    nodes: bool,
}

#[derive(Args)]
struct CheckArgs {
    /// Layout file, or `-` for stdin
    layout: String,
    /// Solution file, or `-`/omitted for stdin
    solution: Option<String>,
}

#[derive(Args)]
struct BenchArgs {
    /// Swept layout parameter
    #[arg(long, value_enum)]
    variant: BenchVariant,
    /// Values taken by the swept parameter
    #[arg(long, value_delimiter = ',', required = true)]
    values: Vec<i64>,
    /// Shuffle seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Solve under worm-hole rules
    #[arg(long)]
    worm: bool,
    /// Sibling exploration order
    #[arg(long, value_enum, default_value_t = StrategyArg::Stack)]
    strategy: StrategyArg,
    /// Label for the results subdirectory
    #[arg(long, default_value = "bench")]
    part: String,
    /// Directory results are written under
    #[arg(long, default_value = "results")]
    out: PathBuf,
    /// Wall-clock budget per puzzle in milliseconds
    #[arg(long, default_value_t = 60_000, value_name = "MS")]
    budget: u64,
    /// Abort a puzzle after visiting this many nodes
    #[arg(long, value_name = "NUM")]
    max_nodes: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Explore the last-generated sibling first
    Stack,
    /// Explore siblings in generation order
    Ordered,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Stack => Strategy::Stack,
            StrategyArg::Ordered => Strategy::Ordered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BenchVariant {
    Rank,
    Suit,
    Pile,
    Deck,
    Seed,
}

impl BenchVariant {
    fn name(self) -> &'static str {
        match self {
            BenchVariant::Rank => "rank",
            BenchVariant::Suit => "suit",
            BenchVariant::Pile => "pile",
            BenchVariant::Deck => "decksize",
            BenchVariant::Seed => "seed",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Gen {
            seed,
            cards,
            ranks,
            suits,
            piles,
        } => {
            let mut layout = Layout::new(*ranks, *suits, *piles);
            layout.randomise(*seed, *cards);
            print!("{}", layout.encode());
        }
        Commands::Solve(args) => run_solve(args, Rules::BlackHole)?,
        Commands::Solveworm(args) => run_solve(args, Rules::WormHole)?,
        Commands::Check(args) => run_check(args, Rules::BlackHole)?,
        Commands::Checkworm(args) => run_check(args, Rules::WormHole)?,
        Commands::Bench(args) => run_bench(args)?,
    }

    Ok(())
}

fn run_solve(args: &SolveArgs, rules: Rules) -> Result<()> {
    let content = match &args.file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file {}", path.display()))?,
        _ => read_stdin()?,
    };
    let layout = Layout::parse(&content);
    let budget = Duration::from_millis(args.budget);
    let options = SearchOptions {
        rules,
        strategy: args.strategy.into(),
        complete: args.complete,
        budget,
        max_nodes: args.max_nodes,
    };

    let mut solver = Solver::new(layout, options);
    solver.run()?;

    if !args.quiet {
        println!("{}", report::solution_line(solver.solution().as_ref()));
    }
    let mut extras = Vec::new();
    if args.time {
        extras.push(report::elapsed_field(
            solver.elapsed(),
            solver.timed_out(),
            budget,
        ));
    }
    if args.nodes {
        extras.push(solver.nodes_visited().to_string());
    }
    if !extras.is_empty() {
        println!("{}", extras.join("\t"));
    }
    Ok(())
}

fn run_check(args: &CheckArgs, rules: Rules) -> Result<()> {
    let solution_source = args.solution.as_deref().unwrap_or("-");
    if args.layout == "-" && solution_source == "-" {
        bail!("At least one of the layout and solution inputs must be a file.");
    }

    let layout = Layout::parse(&read_source(&args.layout)?);
    let pairs = parse_ints(&read_source(solution_source)?);
    let checker = Checker::new(layout, pairs, rules);
    println!("{}", checker.run());
    Ok(())
}

fn run_bench(args: &BenchArgs) -> Result<()> {
    let rules = if args.worm {
        Rules::WormHole
    } else {
        Rules::BlackHole
    };
    let budget = Duration::from_millis(args.budget);

    for &value in &args.values {
        let layout = bench_layout(args.variant, value, args.seed);
        let options = SearchOptions {
            rules,
            strategy: args.strategy.into(),
            complete: false,
            budget,
            max_nodes: args.max_nodes,
        };
        let mut solver = Solver::new(layout, options);
        let solved = solver.run()?;
        let line = report::stats_line(
            value,
            solver.elapsed(),
            solver.timed_out(),
            budget,
            solver.nodes_visited(),
            solved,
        );
        report::write_result(&args.out, &args.part, args.variant.name(), value, &line)?;
        println!("{line}");
    }
    Ok(())
}

/// Build one swept layout: the non-swept dimensions stay at the standard
/// 52-card ratios.
fn bench_layout(variant: BenchVariant, value: i64, seed: u64) -> Layout {
    match variant {
        BenchVariant::Rank => {
            let ranks = value as i32;
            let suits = 52 / ranks.max(1);
            let mut layout = Layout::new(ranks, suits, 10);
            layout.randomise(seed, 52);
            layout
        }
        BenchVariant::Suit => {
            let suits = value as i32;
            let ranks = 52 / suits.max(1);
            let mut layout = Layout::new(ranks, suits, 10);
            layout.randomise(seed, 52);
            layout
        }
        BenchVariant::Deck => {
            let suits = (value * 4 / 52) as i32;
            let ranks = (value * 13 / 52) as i32;
            let mut layout = Layout::new(ranks, suits, 10);
            layout.randomise(seed, (ranks.saturating_mul(suits)).max(0) as usize);
            layout
        }
        BenchVariant::Pile => {
            let mut layout = Layout::new(13, 4, value as i32);
            layout.randomise(seed, 52);
            layout
        }
        BenchVariant::Seed => {
            let mut layout = Layout::standard();
            layout.randomise_full(value as u64);
            layout
        }
    }
}

fn read_stdin() -> Result<String> {
    if stdin().is_terminal() {
        bail!("No input file provided and stdin is a terminal.");
    }
    let mut content = String::new();
    stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;
    Ok(content)
}

fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        read_stdin()
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
    }
}
