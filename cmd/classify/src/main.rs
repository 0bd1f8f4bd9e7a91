//! classify: load integer lists from files, classify every failure.
//!
//! Each file holds one integer per line (blank lines and `#` comments are
//! skipped). Every failure is mapped to an HTTP status through its coder
//! and logged once.
//!
//! Run:
//!   RUST_LOG=info classify [-v|--verbose] FILE...
//!   classify --demo          # built-in failure scenarios
//!
//! `CLASSIFY_VERBOSE=1` has the same effect as `-v`.

use std::fs;
use std::process::ExitCode;

use cerror::codes::{BAD_REQUEST, INTERNAL_SERVER, NOT_FOUND, TIMEOUT, VALIDATION};
use cerror::{report, CResult, Coded, ErrorGroup, ResultExt};

// ── Loading ──

fn parse(path: &str, text: &str) -> CResult<Vec<i64>> {
    let mut eg = ErrorGroup::with_message(format!("parse {path}"));
    let values: Vec<i64> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|(n, line)| {
            eg.add_result(
                line.parse::<i64>()
                    .wrap_with(|| format!("line {n}: {line:?}"))
                    .with_code(VALIDATION),
            )
        })
        .collect();
    eg.into_result()?;
    cerror::ensure!(!values.is_empty(), BAD_REQUEST, "{path} holds no values");
    Ok(values)
}

fn load(path: &str) -> CResult<Vec<i64>> {
    let text = fs::read_to_string(path)
        .map_err(Coded::from)
        .wrap_with(|| format!("read {path}"))?;
    parse(path, &text)
}

// ── Scenarios ──

fn demo() -> Vec<(&'static str, CResult<Vec<i64>>)> {
    vec![
        ("missing file", load("/nonexistent/cerror-classify.txt")),
        ("bad lines", parse("inline", "1\nx\n3\n4.5\n")),
        ("empty file", parse("inline", "# nothing here\n\n")),
        (
            "upstream",
            Err(cerror::wrap(cerror::new_with_code(TIMEOUT, "fetch list"), "sync").into()),
        ),
        ("unclassified", Err(cerror::errorf!("checksum {:#x} mismatch", 0xbeefu32).into())),
        ("good", parse("inline", "10\n20\n")),
    ]
}

// ── Reporting ──

fn status_of(err: &(dyn std::error::Error + 'static)) -> u16 {
    cerror::match_code!(*err, {
        NOT_FOUND => 404,
        TIMEOUT => 504,
        _ => cerror::get_coder(err).map_or(INTERNAL_SERVER.http_status(), |c| c.http_status()),
    })
}

fn classify(name: &str, result: CResult<Vec<i64>>, verbose: bool) -> bool {
    match result {
        Ok(values) => {
            let sum: i64 = values.iter().sum();
            println!("  200  {:<40} {} values, sum {}", name, values.len(), sum);
            log::debug!("{name}: {values:?}");
            true
        }
        Err(err) => {
            let err: &(dyn std::error::Error + 'static) = &*err;
            println!("  {}  {:<40} {}", status_of(err), name, err);
            if verbose {
                report::log_error_verbose(name, err);
            } else {
                report::log_error(name, err);
            }
            false
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut verbose = std::env::var("CLASSIFY_VERBOSE").is_ok_and(|v| v == "1" || v == "true");
    let mut run_demo = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "--demo" => run_demo = true,
            _ => paths.push(arg),
        }
    }

    if paths.is_empty() && !run_demo {
        eprintln!("usage: classify [-v|--verbose] [--demo] FILE...");
        return ExitCode::from(2);
    }

    let mut ok = true;
    if run_demo {
        for (name, result) in demo() {
            ok &= classify(name, result, verbose);
        }
    }
    for path in &paths {
        ok &= classify(path, load(path), verbose);
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
