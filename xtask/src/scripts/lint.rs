use crate::cli::LintArgs;
use color_eyre::eyre::{eyre, Result};
use duct::cmd;

// ---------------------------------------------------------------------------
// Functional Core — pure types and logic, no I/O
// ---------------------------------------------------------------------------

/// Identifier for each check, used to match skip flags and fix-mode overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckId {
    Fmt,
    Clippy,
    Test,
}

/// A lint check to execute.
struct Check {
    id: CheckId,
    program: &'static str,
    args: &'static [&'static str],
}

/// The ordered pipeline of checks to run.
const CHECKS: &[Check] = &[
    Check {
        id: CheckId::Fmt,
        program: "cargo",
        args: &["fmt", "--all", "--check"],
    },
    Check {
        id: CheckId::Clippy,
        program: "cargo",
        args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    },
    Check {
        id: CheckId::Test,
        program: "cargo",
        args: &["test", "--workspace"],
    },
];

fn should_skip(id: CheckId, args: &LintArgs) -> bool {
    match id {
        CheckId::Fmt => args.no_fmt,
        CheckId::Clippy => args.no_clippy,
        CheckId::Test => args.no_test,
    }
}

/// Arguments for a check, accounting for `--fix` mode.
///
/// In fix mode `fmt` drops `--check` and `clippy` applies its suggestions.
fn effective_args(check: &Check, fix: bool) -> Vec<&'static str> {
    match (check.id, fix) {
        (CheckId::Fmt, true) => vec!["fmt", "--all"],
        (CheckId::Clippy, true) => vec![
            "clippy",
            "--workspace",
            "--all-targets",
            "--fix",
            "--allow-dirty",
            "--",
            "-D",
            "warnings",
        ],
        _ => check.args.to_vec(),
    }
}

fn display_name(program: &str, args: &[&str]) -> String {
    format!("{} {}", program, args.join(" "))
}

// ---------------------------------------------------------------------------
// Imperative Shell — I/O, side effects, orchestration
// ---------------------------------------------------------------------------

/// Run the checks in order and stop at the first failure.
pub fn run(args: &LintArgs) -> Result<()> {
    for check in CHECKS {
        if should_skip(check.id, args) {
            continue;
        }

        let check_args = effective_args(check, args.fix);
        let name = display_name(check.program, &check_args);
        println!("[run] {name}");

        let output = cmd(check.program, &check_args)
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run()?;
        let text = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            print!("{text}");
            return Err(eyre!("lint failed at: {name}"));
        }

        if args.verbose {
            print!("{text}");
        }
    }

    println!("lint passed");
    Ok(())
}
