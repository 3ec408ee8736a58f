//! Hygiene: source-level standards checked at test time.
//!
//! Each pattern below has a budget of occurrences allowed in production code
//! under `src/` (sibling `*_test.rs` files are exempt). Budgets only go down.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

// Touch handling must never abort the host.
const UNWRAP: Budget = Budget { pattern: ".unwrap()", max: 0, why: "panics on None/Err" };
const EXPECT: Budget = Budget { pattern: ".expect(", max: 0, why: "panics on None/Err" };
const PANIC: Budget = Budget { pattern: "panic!(", max: 0, why: "aborts the gesture" };
const UNREACHABLE: Budget = Budget { pattern: "unreachable!(", max: 0, why: "aborts the gesture" };
const TODO: Budget = Budget { pattern: "todo!(", max: 0, why: "unfinished code" };
const UNIMPLEMENTED: Budget = Budget { pattern: "unimplemented!(", max: 0, why: "unfinished code" };

// Errors are inspected, not dropped.
const SILENT_DISCARD: Budget = Budget { pattern: "let _ =", max: 0, why: "discards a value unseen" };
const DOT_OK: Budget = Budget { pattern: ".ok()", max: 0, why: "discards the error" };

// Output goes through `tracing`.
const PRINTLN: Budget = Budget { pattern: "println!(", max: 0, why: "bypasses tracing" };

const ALLOW_DEAD_CODE: Budget = Budget { pattern: "#[allow(dead_code)]", max: 0, why: "hides unused code" };

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn check(budget: &Budget) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");

    let hits: Vec<(String, usize)> = files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(budget.pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    let count: usize = hits.iter().map(|(_, n)| n).sum();
    let listing = hits
        .iter()
        .map(|(path, n)| format!("  {path}: {n}"))
        .collect::<Vec<_>>()
        .join("\n");

    assert!(
        count <= budget.max,
        "`{}` budget exceeded ({}): found {count}, max {}.\n{listing}",
        budget.pattern,
        budget.why,
        budget.max,
    );
}

#[test]
fn unwrap_budget() {
    check(&UNWRAP);
}

#[test]
fn expect_budget() {
    check(&EXPECT);
}

#[test]
fn panic_budget() {
    check(&PANIC);
}

#[test]
fn unreachable_budget() {
    check(&UNREACHABLE);
}

#[test]
fn todo_budget() {
    check(&TODO);
}

#[test]
fn unimplemented_budget() {
    check(&UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    check(&SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check(&DOT_OK);
}

#[test]
fn println_budget() {
    check(&PRINTLN);
}

#[test]
fn allow_dead_code_budget() {
    check(&ALLOW_DEAD_CODE);
}
