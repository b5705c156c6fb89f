use crate::generator::legal_moves;
use crate::node::Node;

use blackhole_common::{Layout, Rules, StateKey};

use ahash::RandomState;
use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

/// Default wall-clock budget for a search.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(60);

/// Which sibling a depth-first step explores first.
///
/// Both strategies run on the same explicit LIFO frontier; they differ only
/// in the order children are pushed, which fixes the branch explored
/// deepest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Children are pushed in generation order, so the frontier visits the
    /// last-generated sibling (highest pile index) first.
    #[default]
    Stack,
    /// Children are pushed in reverse, so siblings are visited in generation
    /// order — the tie-break a call-stack traversal would produce, without
    /// its unbounded recursion depth.
    Ordered,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub rules: Rules,
    pub strategy: Strategy,
    /// Collect every solution instead of stopping at the first.
    pub complete: bool,
    /// Wall-clock budget. Hitting it is a clean partial-result termination,
    /// not an error; reported elapsed time is clamped to it.
    pub budget: Duration,
    /// Optional cap on visited nodes. Exceeding it is fatal.
    pub max_nodes: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            rules: Rules::BlackHole,
            strategy: Strategy::Stack,
            complete: false,
            budget: DEFAULT_BUDGET,
            max_nodes: None,
        }
    }
}

/// Fatal search failure. A timeout is not one; it simply ends the search
/// with whatever was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The visited-node cap was exceeded before the search finished.
    NodeBudgetExceeded { limit: u64 },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NodeBudgetExceeded { limit } => {
                write!(f, "search aborted after visiting more than {limit} nodes")
            }
        }
    }
}

impl Error for SearchError {}

/// Depth-first search engine over the move graph of one puzzle.
///
/// Seeded with a root layout, it explores child positions created by the
/// move generator, deduplicating visited states by their [`StateKey`]
/// equivalence. An engine runs at most once; calling [`Solver::run`] again
/// re-reports the prior outcome.
#[derive(Debug, Clone)]
pub struct Solver {
    options: SearchOptions,
    frontier: Vec<Node>,
    has_run: bool,
    error: Option<SearchError>,
    timed_out: bool,
    nodes_visited: u64,
    elapsed: Duration,
    solution: Option<Node>,
    solutions: Vec<Node>,
}

impl Solver {
    pub fn new(layout: Layout, options: SearchOptions) -> Self {
        let layout = match options.rules {
            Rules::BlackHole => layout.into_black_hole(),
            Rules::WormHole => layout.into_worm_hole(),
        };
        Solver {
            options,
            frontier: vec![Node::root(layout)],
            has_run: false,
            error: None,
            timed_out: false,
            nodes_visited: 0,
            elapsed: Duration::ZERO,
            solution: None,
            solutions: Vec::new(),
        }
    }

    /// Run the search to completion, exhaustion, or timeout. Returns whether
    /// a solution was found.
    pub fn run(&mut self) -> Result<bool, SearchError> {
        if !self.has_run {
            self.has_run = true;
            if let Err(err) = self.search() {
                self.error = Some(err);
            }
        }
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.solution.is_some()),
        }
    }

    fn search(&mut self) -> Result<(), SearchError> {
        let timer = Instant::now();
        let mut visited: HashSet<StateKey, RandomState> = HashSet::with_hasher(RandomState::new());

        while let Some(node) = self.frontier.pop() {
            self.nodes_visited += 1;
            if let Some(limit) = self.options.max_nodes
                && self.nodes_visited > limit
            {
                self.elapsed = timer.elapsed().min(self.options.budget);
                return Err(SearchError::NodeBudgetExceeded { limit });
            }

            // Different move orders can reach top-card-equivalent states, so
            // the move graph is not acyclic; never re-expand a seen state.
            if !visited.insert(node.layout().state_key()) {
                continue;
            }

            if node.layout().is_cleared() {
                if self.options.complete {
                    self.solutions.push(node);
                    continue;
                }
                self.solutions.push(node.clone());
                self.solution = Some(node);
                break;
            }

            let moves = legal_moves(node.layout());
            match self.options.strategy {
                Strategy::Stack => {
                    for mov in moves {
                        if let Some(child) = node.child(mov) {
                            self.frontier.push(child);
                        }
                    }
                }
                Strategy::Ordered => {
                    for mov in moves.into_iter().rev() {
                        if let Some(child) = node.child(mov) {
                            self.frontier.push(child);
                        }
                    }
                }
            }

            self.elapsed = timer.elapsed();
            if self.elapsed > self.options.budget {
                self.elapsed = self.options.budget;
                self.timed_out = true;
                break;
            }
        }

        if !self.timed_out {
            self.elapsed = timer.elapsed().min(self.options.budget);
        }
        if self.options.complete {
            self.solution = self.solutions.first().cloned();
        }
        self.frontier.clear();
        Ok(())
    }

    /// First solution found, if any. In enumerate-all mode this is the first
    /// one in expansion order.
    pub fn solution(&self) -> Option<Node> {
        self.solution.clone()
    }

    /// Every solution found so far, in the order they were encountered.
    pub fn solutions(&self) -> Vec<Node> {
        self.solutions.clone()
    }

    /// Wall-clock time spent searching, clamped to the budget.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of frontier nodes visited, counting deduplicated revisits.
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }
}

/// Outcome of a one-shot [`solve`] call.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub solved: bool,
    pub solution: Option<Node>,
    pub solutions: Vec<Node>,
    pub nodes_visited: u64,
    pub elapsed: Duration,
    pub timed_out: bool,
}

/// Construct an engine, run it once, and collect its report.
pub fn solve(layout: Layout, options: SearchOptions) -> Result<SolveReport, SearchError> {
    let mut solver = Solver::new(layout, options);
    let solved = solver.run()?;
    Ok(SolveReport {
        solved,
        solution: solver.solution(),
        solutions: solver.solutions(),
        nodes_visited: solver.nodes_visited(),
        elapsed: solver.elapsed(),
        timed_out: solver.timed_out(),
    })
}
