use anyhow::{Context, Result};
use blackhole_common::Move;
use blackhole_solver::Node;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Field delimiter of the persisted statistics line.
const DELIMITER: char = ':';

/// Solved output: `1` followed by the flattened move pairs; unsolved: `0`.
pub fn solution_line(solution: Option<&Node>) -> String {
    match solution {
        None => "0".to_string(),
        Some(node) => {
            let mut out = String::from("1");
            for (pile, card) in node.log().iter().map(Move::to_pair) {
                out.push_str(&format!(" {pile} {card}"));
            }
            out
        }
    }
}

/// Elapsed-time field: milliseconds to two decimals, or the timeout marker
/// when the budget was hit.
pub fn elapsed_field(elapsed: Duration, timed_out: bool, budget: Duration) -> String {
    if timed_out {
        format!("TIMEOUT >{}s", budget.as_secs())
    } else {
        format!("{:.2}ms", elapsed.as_secs_f64() * 1000.0)
    }
}

/// Statistics line consumed by the results layer: ordinal parameter value,
/// elapsed time, node count, and solved flag, colon-joined.
pub fn stats_line(
    ordinal: i64,
    elapsed: Duration,
    timed_out: bool,
    budget: Duration,
    nodes: u64,
    solved: bool,
) -> String {
    let time_field = elapsed_field(elapsed, timed_out, budget);
    [
        ordinal.to_string(),
        time_field,
        nodes.to_string(),
        solved.to_string(),
    ]
    .join(&DELIMITER.to_string())
}

/// Persist one statistics line under
/// `<root>/<part>/<variant>/<bucket>/<millis-timestamp>`.
pub fn write_result(
    root: &Path,
    part: &str,
    variant: &str,
    bucket: i64,
    line: &str,
) -> Result<PathBuf> {
    let dir = root.join(part).join(variant).join(bucket.to_string());
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create results directory {}", dir.display()))?;
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the epoch")?
        .as_millis();
    let path = dir.join(stamp.to_string());
    fs::write(&path, line)
        .with_context(|| format!("Failed to write result file {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackhole_common::{Layout, Target};
    use blackhole_solver::Node;

    #[test]
    fn test_solution_line_formats() {
        assert_eq!(solution_line(None), "0");

        let root = Node::root(Layout::from_ints(&[13, 4, 2, 1, 2, -1, 3, -1]));
        assert_eq!(solution_line(Some(&root)), "1");

        let child = root
            .child(Move::Play {
                from: Target::Pile(0),
                card: blackhole_common::Card::new(2),
            })
            .unwrap();
        assert_eq!(solution_line(Some(&child)), "1 0 2");
    }

    #[test]
    fn test_elapsed_field_marks_timeouts() {
        let budget = Duration::from_secs(60);
        assert_eq!(
            elapsed_field(Duration::from_millis(1234), false, budget),
            "1234.00ms"
        );
        assert_eq!(elapsed_field(budget, true, budget), "TIMEOUT >60s");
    }

    #[test]
    fn test_stats_line_is_colon_joined() {
        let budget = Duration::from_secs(60);
        assert_eq!(
            stats_line(13, Duration::from_millis(20), false, budget, 420, true),
            "13:20.00ms:420:true"
        );
        assert_eq!(
            stats_line(4, budget, true, budget, 9000, false),
            "4:TIMEOUT >60s:9000:false"
        );
    }
}
