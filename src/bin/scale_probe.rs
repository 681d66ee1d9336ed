use std::collections::VecDeque;
use std::env;
use std::time::Instant;

use grid_lip::utils::{step, DIRECTIONS};
use grid_lip::{Grid, GridSource, PathEngineBuilder, Strategy};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const SIDES: &[usize] = &[16, 32, 64, 128, 256, 512, 1024];

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Longest Increasing Path: scaling probe");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Runs the path engine over square grids of increasing side length.");
    eprintln!(
        "Results are checked against a peeling baseline up to {} cells.",
        options.verify_limit
    );
    eprintln!("Strategy: {}", options.strategy_label());
    eprintln!();
    eprintln!("Metrics:");
    eprintln!("  • wall_s: wall-clock seconds for one engine run");
    eprintln!("  • rss_delta_kib: resident set growth across the run");
    eprintln!("  • status: 'passed' = matches baseline, 'not_checked' = above verify limit");
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();
    let scenarios = Scenario::ALL;
    for (idx, scenario) in scenarios.iter().enumerate() {
        eprintln!(
            "[{}/{}] {} grids ({})",
            idx + 1,
            scenarios.len(),
            scenario.name(),
            scenario.describe()
        );
        measurements.extend(run_scenario(*scenario, &options, &mut sys));
        eprintln!();
    }

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("scale_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
    strategy: Option<Strategy>,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 1usize << 16;
        let mut strategy = None;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            }
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg, None),
            };
            let mut value = || -> Result<String, String> {
                match inline.clone() {
                    Some(v) => Ok(v),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {flag}")),
                }
            };
            match flag.as_str() {
                "--format" => format = OutputFormat::from_str(&value()?)?,
                "--verify-limit" => {
                    verify_limit = value()?
                        .parse::<usize>()
                        .map_err(|_| "verify limit must be a non-negative integer".to_string())?
                }
                "--strategy" => strategy = parse_strategy(&value()?)?,
                _ => return Err(format!("unrecognized argument '{flag}'")),
            }
        }

        Ok(Self {
            format,
            verify_limit,
            strategy,
        })
    }

    fn strategy_label(&self) -> &'static str {
        self.strategy.map(Strategy::as_str).unwrap_or("auto")
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --features probe --bin scale_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest grid (in cells) checked against the baseline (default: 65536)
  --strategy <NAME>             auto, recursive, iterative or parallel (default: auto);
                                recursive can exhaust the stack on large serpentine grids
  -h, --help                    Print this help message

Examples:
  cargo run --features probe --bin scale_probe
  cargo run --features probe,parallel --bin scale_probe -- --format table --strategy parallel
"
        );
    }
}

fn parse_strategy(value: &str) -> Result<Option<Strategy>, String> {
    match value {
        "auto" => Ok(None),
        "recursive" => Ok(Some(Strategy::Recursive)),
        "iterative" => Ok(Some(Strategy::Iterative)),
        #[cfg(feature = "parallel")]
        "parallel" => Ok(Some(Strategy::Parallel)),
        #[cfg(not(feature = "parallel"))]
        "parallel" => Err("strategy 'parallel' needs the `parallel` feature".to_string()),
        other => Err(format!("unknown strategy '{other}'")),
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Copy, Clone)]
enum Scenario {
    Random,
    Serpentine,
    Plateau,
    Checkerboard,
}

impl Scenario {
    const ALL: [Scenario; 4] = [
        Scenario::Random,
        Scenario::Serpentine,
        Scenario::Plateau,
        Scenario::Checkerboard,
    ];

    fn name(self) -> &'static str {
        match self {
            Scenario::Random => "random",
            Scenario::Serpentine => "serpentine",
            Scenario::Plateau => "plateau",
            Scenario::Checkerboard => "checkerboard",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Scenario::Random => "pseudo-random values in 0..1000",
            Scenario::Serpentine => "one path through every cell, maximal depth",
            Scenario::Plateau => "all cells equal, every path has length 1",
            Scenario::Checkerboard => "alternating 0/1, every path has length 2",
        }
    }

    fn build(self, side: usize) -> Grid<i64> {
        let cells = match self {
            Scenario::Random => random_cells(side),
            Scenario::Serpentine => serpentine(side, side),
            Scenario::Plateau => vec![7; side * side],
            Scenario::Checkerboard => (0..side * side)
                .map(|i| ((i / side + i % side) % 2) as i64)
                .collect(),
        };
        Grid::from_flat(side, side, cells).unwrap_or_default()
    }

    /// Length known without running anything, where there is one.
    fn closed_form(self, side: usize) -> Option<usize> {
        match self {
            Scenario::Random => None,
            Scenario::Serpentine => Some(side * side),
            Scenario::Plateau => Some(1),
            Scenario::Checkerboard => Some(if side > 1 { 2 } else { 1 }),
        }
    }
}

#[derive(Clone)]
struct Measurement {
    scenario: &'static str,
    size_desc: String,
    strategy: &'static str,
    length: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
        }
    }
}

fn run_scenario(scenario: Scenario, options: &Options, sys: &mut System) -> Vec<Measurement> {
    let total = SIDES.len();
    SIDES
        .iter()
        .enumerate()
        .map(|(idx, &side)| {
            eprint!("      [{}/{}] side {}... ", idx + 1, total, side);
            let grid = scenario.build(side);
            let mut builder = PathEngineBuilder::new(&grid);
            if let Some(strategy) = options.strategy {
                builder = builder.with_strategy(strategy);
            }
            let engine = builder.build();
            let m = measure(scenario.name(), format!("{side}x{side}"), sys, || {
                (engine.run(), engine.strategy().as_str())
            });
            let m = verify(m, scenario, &grid, options);
            eprintln!(
                "{} length={}, strategy={}, time={:.3}s, status={}",
                m.verification_status.icon(),
                m.length,
                m.strategy,
                m.wall_s,
                m.verification_status.label()
            );
            m
        })
        .collect()
}

fn verify(
    mut m: Measurement,
    scenario: Scenario,
    grid: &Grid<i64>,
    options: &Options,
) -> Measurement {
    let length = m.length;
    let side = grid.rows();
    let expected = if grid.cell_count() <= options.verify_limit {
        Some(peel_baseline(grid))
    } else {
        scenario.closed_form(side)
    };
    let (status, detail) = match expected {
        Some(e) if e == length => (VerificationStatus::Passed, None),
        Some(e) => (
            VerificationStatus::Failed,
            Some(format!("expected {e}, got {length}")),
        ),
        None => (VerificationStatus::NotChecked, None),
    };
    m.verification_status = status;
    m.verification_detail = detail;
    m
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("{}", "=".repeat(80));
    eprintln!("Summary");
    eprintln!("{}", "=".repeat(80));

    let mut passed = 0;
    let mut failed = 0;
    let mut not_checked = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Failed => failed += 1,
            VerificationStatus::NotChecked => not_checked += 1,
        }
    }
    let total = measurements.len().max(1) as f64;
    eprintln!("  runs: {}", measurements.len());
    eprintln!("  ✓ passed: {} ({:.1}%)", passed, 100.0 * passed as f64 / total);
    eprintln!("  ✗ failed: {} ({:.1}%)", failed, 100.0 * failed as f64 / total);
    eprintln!(
        "  ○ not checked (> {} cells, no closed form): {} ({:.1}%)",
        options.verify_limit,
        not_checked,
        100.0 * not_checked as f64 / total
    );
    eprintln!();

    for m in measurements
        .iter()
        .filter(|m| matches!(m.verification_status, VerificationStatus::Failed))
    {
        eprintln!("  ✗ {} ({})", m.scenario, m.size_desc);
        if let Some(detail) = &m.verification_detail {
            eprintln!("     {detail}");
        }
    }

    for scenario in Scenario::ALL {
        let ms: Vec<&Measurement> = measurements
            .iter()
            .filter(|m| m.scenario == scenario.name())
            .collect();
        let (Some(first), Some(last)) = (ms.first(), ms.last()) else {
            continue;
        };
        let max_mem = ms.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);
        let ratio = if first.wall_s > 0.0 {
            last.wall_s / first.wall_s
        } else {
            0.0
        };
        eprintln!(
            "  {}: {} -> {} took {:.1}x longer, max rss delta {} KiB",
            scenario.name(),
            first.size_desc,
            last.size_desc,
            ratio,
            max_mem
        );
    }
    eprintln!();
    if failed == 0 {
        eprintln!("✓ All verified runs match the baseline.");
    } else {
        eprintln!("✗ {failed} run(s) disagree with the baseline.");
    }
    eprintln!("  Time should grow linearly with the number of cells.");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn measure<F>(scenario: &'static str, size_desc: String, sys: &mut System, compute: F) -> Measurement
where
    F: FnOnce() -> (usize, &'static str),
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (length, strategy) = compute();
    let wall_s = start.elapsed().as_secs_f64();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        size_desc,
        strategy,
        length,
        wall_s,
        rss_delta_kib: after.saturating_sub(before),
        verification_status: VerificationStatus::NotChecked,
        verification_detail: None,
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,size,strategy,length,wall_s,rss_delta_kib,status,detail");
    for m in measurements {
        let detail = m.verification_detail.as_deref().unwrap_or("");
        println!(
            "{},{},{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.size_desc,
            m.strategy,
            m.length,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail.replace('"', "'")
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let scenario_w = measurements
        .iter()
        .map(|m| m.scenario.len())
        .fold("scenario".len(), usize::max);
    let size_w = measurements
        .iter()
        .map(|m| m.size_desc.len())
        .fold("size".len(), usize::max);

    println!(
        "{:<scenario_w$}  {:<size_w$}  {:<10}  {:>9}  {:>9}  {:>13}  {:<11}  detail",
        "scenario", "size", "strategy", "length", "wall_s", "rss_delta_kib", "status",
    );
    println!("{}", "-".repeat(scenario_w + size_w + 10 + 9 + 9 + 13 + 11 + 20));
    for m in measurements {
        println!(
            "{:<scenario_w$}  {:<size_w$}  {:<10}  {:>9}  {:>9.3}  {:>13}  {:<11}  {}",
            m.scenario,
            m.size_desc,
            m.strategy,
            m.length,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    let rows: Vec<String> = measurements
        .iter()
        .map(|m| {
            let detail = match &m.verification_detail {
                Some(d) => format!("\"{}\"", d.replace('"', "'")),
                None => "null".to_string(),
            };
            format!(
                "  {{\"scenario\":\"{}\",\"size\":\"{}\",\"strategy\":\"{}\",\"length\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"status\":\"{}\",\"detail\":{}}}",
                m.scenario,
                m.size_desc,
                m.strategy,
                m.length,
                m.wall_s,
                m.rss_delta_kib,
                m.verification_status.label(),
                detail
            )
        })
        .collect();
    println!("[\n{}\n]", rows.join(",\n"));
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        // sysinfo reports bytes
        Some(process) => process.memory() / 1024,
        None => 0,
    }
}

/// Values in `0..1000` drawn from a generator seeded with the side length.
fn random_cells(side: usize) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(side as u64);
    (0..side * side).map(|_| rng.gen_range(0..1000)).collect()
}

fn serpentine(rows: usize, cols: usize) -> Vec<i64> {
    let mut cells = vec![0i64; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            let col = if r % 2 == 0 { c } else { cols - 1 - c };
            cells[r * cols + col] = (r * cols + c) as i64;
        }
    }
    cells
}

/// Longest path by peeling local maxima layer by layer.
///
/// Independent of the engine: a cell is removed once none of its strictly
/// greater neighbours remain, and the number of rounds is the answer.
fn peel_baseline<G: GridSource>(grid: &G) -> usize {
    if grid.is_empty() {
        return 0;
    }
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut out_degree = vec![0usize; rows * cols];
    let mut queue = VecDeque::new();
    for r in 0..rows {
        for c in 0..cols {
            let higher = DIRECTIONS
                .iter()
                .filter_map(|&d| step(r, c, d, rows, cols))
                .filter(|&(nr, nc)| grid.value(nr, nc) > grid.value(r, c))
                .count();
            out_degree[r * cols + c] = higher;
            if higher == 0 {
                queue.push_back((r, c));
            }
        }
    }
    let mut rounds = 0;
    while !queue.is_empty() {
        rounds += 1;
        for _ in 0..queue.len() {
            let Some((r, c)) = queue.pop_front() else {
                break;
            };
            for &d in &DIRECTIONS {
                if let Some((nr, nc)) = step(r, c, d, rows, cols) {
                    if grid.value(nr, nc) < grid.value(r, c) {
                        let idx = nr * cols + nc;
                        out_degree[idx] -= 1;
                        if out_degree[idx] == 0 {
                            queue.push_back((nr, nc));
                        }
                    }
                }
            }
        }
    }
    rounds
}
