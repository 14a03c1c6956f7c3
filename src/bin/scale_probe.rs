use std::env;
use std::time::Instant;

use balanced_embedding::{EmbeddingEngine, NodeAffinity, TokenPairing};
use sysinfo::{get_current_pid, ProcessExt, ProcessRefreshKind, System, SystemExt};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    let pairing = TokenPairing::new([(b'(', b')'), (b'[', b']')])
        .expect("static pairing is valid");

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/2] Self-match under universal affinity (score must equal open count)...");
    measurements.extend(run_self_match(&options, &pairing, &mut sys));
    eprintln!();

    eprintln!("[2/2] Cross-match under strict equality (embedding laws must hold)...");
    measurements.extend(run_cross_match(&options, &pairing, &mut sys));
    eprintln!();

    let failed = measurements
        .iter()
        .filter(|m| matches!(m.status, Status::Failed))
        .count();
    options.format.write(&measurements);
    if failed > 0 {
        eprintln!("scale_probe: {failed} verification failure(s)");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    max_pairs: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut max_pairs = 48usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--max-pairs=") {
                max_pairs = value
                    .parse::<usize>()
                    .map_err(|_| "max pairs must be a positive integer".to_string())?;
            } else if arg == "--max-pairs" {
                let value: String = args
                    .next()
                    .ok_or_else(|| "missing value after --max-pairs".to_string())?
                    .into();
                max_pairs = value
                    .parse::<usize>()
                    .map_err(|_| "max pairs must be a positive integer".to_string())?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self { format, max_pairs })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin scale_probe [-- <options>]

Options:
  --format <csv|table>   Output format (default: csv)
  --max-pairs <N>        Largest input size, in open/close pairs (default: 48)
  -h, --help             Print this help message

Examples:
  cargo run --bin scale_probe
  cargo run --bin scale_probe -- --format table --max-pairs 48
"
        );
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
        }
    }
}

struct Measurement {
    scenario: &'static str,
    pairs: usize,
    score: f64,
    wall_s: f64,
    rss_delta_kib: u64,
    status: Status,
}

#[derive(Clone, Copy)]
enum Status {
    Passed,
    Failed,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
        }
    }
}

fn probe_sizes(max_pairs: usize) -> Vec<usize> {
    let mut sizes = Vec::new();
    let mut n = 6usize;
    while n <= max_pairs {
        sizes.push(n);
        n *= 2;
    }
    sizes
}

fn run_self_match(options: &Options, pairing: &TokenPairing, sys: &mut System) -> Vec<Measurement> {
    probe_sizes(options.max_pairs)
        .into_iter()
        .map(|pairs| {
            let seq = deterministic_balanced(pairs, 0);
            let opens = pairs as f64;
            let engine = EmbeddingEngine::new(pairing, NodeAffinity::Universal);

            let before = rss_kib(sys);
            let start = Instant::now();
            let found = engine.run(&seq, &seq).expect("generated input is valid");
            let wall_s = start.elapsed().as_secs_f64();
            let after = rss_kib(sys);

            let status = if found.score == opens && found.seq1 == seq && found.seq2 == seq {
                Status::Passed
            } else {
                Status::Failed
            };
            eprintln!(
                "      pairs={pairs} score={} time={wall_s:.3}s status={}",
                found.score,
                status.label()
            );
            Measurement {
                scenario: "self_match_universal",
                pairs,
                score: found.score,
                wall_s,
                rss_delta_kib: after.saturating_sub(before),
                status,
            }
        })
        .collect()
}

fn run_cross_match(options: &Options, pairing: &TokenPairing, sys: &mut System) -> Vec<Measurement> {
    probe_sizes(options.max_pairs)
        .into_iter()
        .map(|pairs| {
            let seq1 = deterministic_balanced(pairs, 0);
            let seq2 = deterministic_balanced(pairs, 3);
            let engine = EmbeddingEngine::new(pairing, NodeAffinity::StrictEquality);

            let before = rss_kib(sys);
            let start = Instant::now();
            let found = engine.run(&seq1, &seq2).expect("generated input is valid");
            let wall_s = start.elapsed().as_secs_f64();
            let after = rss_kib(sys);

            let laws_hold = found.seq1.len() == found.seq2.len()
                && found.seq1.len() % 2 == 0
                && is_subsequence(&found.seq1, &seq1)
                && is_subsequence(&found.seq2, &seq2)
                && found.score <= pairs as f64;
            let status = if laws_hold { Status::Passed } else { Status::Failed };
            eprintln!(
                "      pairs={pairs} score={} time={wall_s:.3}s status={}",
                found.score,
                status.label()
            );
            Measurement {
                scenario: "cross_match_strict",
                pairs,
                score: found.score,
                wall_s,
                rss_delta_kib: after.saturating_sub(before),
                status,
            }
        })
        .collect()
}

fn write_csv(measurements: &[Measurement]) {
    println!("scenario,pairs,score,wall_s,rss_delta_kib,status");
    for m in measurements {
        println!(
            "{},{},{},{:.3},{},{}",
            m.scenario,
            m.pairs,
            m.score,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label()
        );
    }
}

fn write_table(measurements: &[Measurement]) {
    println!(
        "{:<24}  {:>6}  {:>8}  {:>8}  {:>14}  {}",
        "scenario", "pairs", "score", "wall_s", "rss_delta_kib", "status"
    );
    for m in measurements {
        println!(
            "{:<24}  {:>6}  {:>8}  {:>8.3}  {:>14}  {}",
            m.scenario,
            m.pairs,
            m.score,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label()
        );
    }
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory()
    } else {
        0
    }
}

/// Deterministic balanced sequence with `pairs` open/close pairs. `phase`
/// varies the branching pattern so two probes disagree in places.
fn deterministic_balanced(pairs: usize, phase: usize) -> Vec<u8> {
    const OPENS: [(u8, u8); 2] = [(b'(', b')'), (b'[', b']')];
    let mut out = Vec::with_capacity(pairs * 2);
    let mut stack: Vec<u8> = Vec::new();
    let mut opened = 0usize;
    let mut step = phase;
    while opened < pairs || !stack.is_empty() {
        let open_more = opened < pairs && (stack.is_empty() || step % 3 != 0);
        if open_more {
            let (open, close) = OPENS[(opened + phase) % OPENS.len()];
            out.push(open);
            stack.push(close);
            opened += 1;
        } else {
            out.push(stack.pop().expect("stack checked non-empty"));
        }
        step += 1;
    }
    out
}

fn is_subsequence(needle: &[u8], haystack: &[u8]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|tok| rest.any(|h| h == tok))
}
