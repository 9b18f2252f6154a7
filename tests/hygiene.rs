//! Hygiene: enforces coding standards at test time.
//!
//! Scans the production sources under `src/` for patterns that panic or
//! silently discard results. Theme resolution runs while the page boots, so
//! every budget is zero and stays zero.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

struct Rule {
    pattern: &'static str,
    budget: usize,
    label: &'static str,
}

const RULES: &[Rule] = &[
    // Panics crash the page.
    Rule { pattern: ".unwrap()", budget: 0, label: ".unwrap()" },
    Rule { pattern: ".expect(", budget: 0, label: ".expect()" },
    Rule { pattern: "panic!(", budget: 0, label: "panic!()" },
    Rule { pattern: "unreachable!(", budget: 0, label: "unreachable!()" },
    Rule { pattern: "todo!(", budget: 0, label: "todo!()" },
    Rule { pattern: "unimplemented!(", budget: 0, label: "unimplemented!()" },
    // Silent loss: errors discarded without inspection.
    Rule { pattern: "let _ =", budget: 0, label: "let _ =" },
    Rule { pattern: ".ok()", budget: 0, label: ".ok()" },
    // Structure.
    Rule { pattern: "#[allow(dead_code)]", budget: 0, label: "#[allow(dead_code)]" },
];

/// Collect production `.rs` files from `src/`, excluding `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("policy.rs")), "run from the crate root");
}

#[test]
fn pattern_budgets_hold() {
    let files = source_files();
    let mut violations = Vec::new();

    for rule in RULES {
        let hits = count_in_source(&files, rule.pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > rule.budget {
            let detail = hits
                .iter()
                .map(|(path, c)| format!("    {path}: {c}"))
                .collect::<Vec<_>>()
                .join("\n");
            violations.push(format!("  {} budget exceeded: found {count}, max {}\n{detail}", rule.label, rule.budget));
        }
    }

    assert!(violations.is_empty(), "hygiene violations:\n{}", violations.join("\n"));
}
