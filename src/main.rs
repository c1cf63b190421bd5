//! # bidi-core CLI
//!
//! Usage:
//!   bidi-core --ltr L R L           one-shot: resolve typed tokens under a forced base
//!   bidi-core --auto L R L
//!   bidi-core --test fixture.txt    run a BidiTest/BidiCharacterTest-format fixture
//!   bidi-core --verbose ...         RUST_LOG-controlled phase tracing on stderr

use bidi_core::testfile::TestCase;
use bidi_core::{bidi, testfile, BaseDirection, BidiClass};
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let verbose = take_flag(&mut args, "--verbose");
    init_logging(verbose);

    ExitCode::from(run(&args))
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    if let Some(pos) = args.iter().position(|a| a == flag) {
        args.remove(pos);
        true
    } else {
        false
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(args: &[String]) -> u8 {
    match args.first().map(String::as_str) {
        None | Some("--help") | Some("-h") => {
            print_usage();
            if args.is_empty() {
                2
            } else {
                0
            }
        }
        Some("--test") => run_test_mode(&args[1..]),
        Some(flag @ ("--ltr" | "--rtl" | "--auto")) => run_one_shot(flag, &args[1..]),
        Some(other) => {
            eprintln!("✗ unrecognized argument: {other}");
            print_usage();
            2
        }
    }
}

fn print_usage() {
    eprintln!(
        "usage:\n  \
         bidi-core --ltr|--rtl|--auto <TYPE>...   resolve one typed token sequence\n  \
         bidi-core --test <file>...               run BidiTest-format fixtures\n  \
         bidi-core --verbose ...                  enable debug tracing on stderr\n\n\
         <TYPE> is one of: L R AL EN ES ET AN CS NSM BN B S WS ON LRE LRO RLE RLO PDF LRI RLI FSI PDI"
    );
}

fn run_one_shot(flag: &str, tokens: &[String]) -> u8 {
    let base = match flag {
        "--ltr" => BaseDirection::Ltr,
        "--rtl" => BaseDirection::Rtl,
        _ => BaseDirection::Auto,
    };

    let types: Result<Vec<BidiClass>, _> = tokens
        .iter()
        .map(|t| BidiClass::from_token(t).ok_or_else(|| t.clone()))
        .collect();

    let types = match types {
        Ok(types) => types,
        Err(bad) => {
            eprintln!("✗ unknown bidi type code {bad:?}");
            return 2;
        }
    };

    let result = bidi(&types, base);
    let levels: Vec<String> = result.levels.iter().map(|l| l.to_string()).collect();
    let order: Vec<String> = result.order.iter().map(usize::to_string).collect();
    println!("levels:  {}", levels.join(" "));
    println!("order:   {}", order.join(" "));
    0
}

fn run_test_mode(paths: &[String]) -> u8 {
    if paths.is_empty() {
        eprintln!("✗ --test requires at least one fixture path");
        return 2;
    }

    let mut total = 0;
    let mut failed = 0;

    for path in paths {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("✗ failed to open {path:?}: {e}");
                return 2;
            }
        };
        let cases = match testfile::load_cases(BufReader::new(file)) {
            Ok(cases) => cases,
            Err(e) => {
                eprintln!("✗ {path}: {e}");
                return 2;
            }
        };

        for case in cases {
            total += 1;
            if let Err(message) = check_case(&case) {
                failed += 1;
                eprintln!("✗ {path}:{}: {message}", case.line);
            }
        }
    }

    println!("{} passed, {} failed, {} total", total - failed, failed, total);
    if failed > 0 {
        1
    } else {
        0
    }
}

fn check_case(case: &TestCase) -> Result<(), String> {
    let result = bidi(&case.types, case.base);

    if !case.expected_levels.is_empty() {
        let actual: Vec<Option<u8>> = result.levels.iter().map(|l| l.number()).collect();
        if actual != case.expected_levels {
            return Err(format!(
                "level mismatch: expected {:?}, got {:?}",
                case.expected_levels, actual
            ));
        }
    }

    if !case.expected_order.is_empty() && result.order != case.expected_order {
        return Err(format!(
            "order mismatch: expected {:?}, got {:?}",
            case.expected_order, result.order
        ));
    }

    Ok(())
}
