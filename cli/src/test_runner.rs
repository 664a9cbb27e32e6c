use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::expectation::{self, Expectation};

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: TestOutcome,
}

/// Options for one run of the fixture suite.
#[derive(Debug, Default)]
pub struct RunOptions {
    pub no_color: bool,
    /// Only run fixtures in these categories (subfolder names).
    pub categories: Vec<String>,
    /// Stop after the first failing fixture.
    pub fail_fast: bool,
}

fn run_single_test(path: &Path) -> TestResult {
    let fail = |description: Option<String>, reason: String| TestResult {
        path: path.to_path_buf(),
        description,
        outcome: TestOutcome::Fail(reason),
    };

    // 1. Read input and its expectation
    let input = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return fail(None, format!("cannot read file: {}", e)),
    };
    let Some(expectation_path) = expectation::companion(path) else {
        return fail(None, "no .json or .toml expectation file".into());
    };
    let expectation = match Expectation::load(&expectation_path) {
        Ok(exp) => exp,
        Err(e) => return fail(None, format!("expectation error: {}", e)),
    };
    let description = expectation.description.clone();

    // 2. Parse
    let parse_result = blockscan::parse(&input);

    // 3. Handle expect_error
    if expectation.expect_error {
        return match parse_result {
            Err(_) => TestResult {
                path: path.to_path_buf(),
                description,
                outcome: TestOutcome::Pass,
            },
            Ok(_) => fail(description, "expected parse error, but parsing succeeded".into()),
        };
    }

    let doc = match parse_result {
        Ok(doc) => doc,
        Err(e) => return fail(description, format!("unexpected parse error: {}", e)),
    };

    // 4. Compare structurally
    let expected = match expectation.to_document() {
        Ok(doc) => doc,
        Err(e) => return fail(description, format!("expectation error: {}", e)),
    };
    match doc.diff(&expected) {
        None => TestResult {
            path: path.to_path_buf(),
            description,
            outcome: TestOutcome::Pass,
        },
        Some(reason) => fail(
            description,
            format!("{}\n  actual document:\n{}", reason, indent(&doc.to_string())),
        ),
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Discover fixtures grouped by category (subfolder relative to root).
/// A fixture is a `.md` file with a companion expectation file; files
/// directly in `root` get category "" (uncategorized).
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    if root.is_file() {
        categories.insert(String::new(), vec![root.to_path_buf()]);
        return categories;
    }
    collect_tests(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_tests(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_tests(&path, root, out);
        } else if path.extension().is_some_and(|ext| ext == "md") {
            if expectation::companion(&path).is_none() {
                debug!(path = %path.display(), "skipping markdown file without expectation");
                continue;
            }
            let category = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            out.entry(category).or_default().push(path);
        }
    }
}

/// List available categories for the given fixture path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no fixtures found in {}", path.display());
        return;
    }

    eprintln!("available categories:");
    for (cat, files) in &categories {
        let label = if cat.is_empty() { "(root)" } else { cat.as_str() };
        eprintln!("  {} ({} fixtures)", label, files.len());
    }
}

fn pass_label(no_color: bool) -> &'static str {
    if no_color { "PASS" } else { "\x1b[32mPASS\x1b[0m" }
}

fn fail_label(no_color: bool) -> &'static str {
    if no_color { "FAIL" } else { "\x1b[31mFAIL\x1b[0m" }
}

fn bold(s: &str, no_color: bool) -> String {
    if no_color {
        s.to_string()
    } else {
        format!("\x1b[1m{}\x1b[0m", s)
    }
}

fn select_categories<'a>(
    all: &'a BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<&'a str, &'a Vec<PathBuf>> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v)).collect();
    }

    let mut filtered = BTreeMap::new();
    for requested in requested {
        let req = requested.trim_matches('/');
        let mut found = false;
        for (cat, files) in all {
            if cat == req || cat.starts_with(&format!("{}/", req)) {
                filtered.insert(cat.as_str(), files);
                found = true;
            }
        }
        if !found {
            eprintln!(
                "warning: category '{}' not found (available: {})",
                req,
                all.keys()
                    .map(|k| if k.is_empty() { "(root)" } else { k.as_str() })
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }
    filtered
}

/// Run all fixtures under `path` (or a single fixture file).
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_tests(path: &Path, options: &RunOptions) -> i32 {
    let no_color = options.no_color;
    let all_categories = discover_categorized(path);

    if all_categories.is_empty() {
        eprintln!("no fixtures found in {}", path.display());
        return 1;
    }

    let categories = if path.is_file() {
        &[][..]
    } else {
        options.categories.as_slice()
    };
    let run_categories = select_categories(&all_categories, categories);

    if run_categories.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    'categories: for (cat, files) in &run_categories {
        let header = if cat.is_empty() {
            "(root)".to_string()
        } else {
            cat.to_string()
        };
        eprintln!();
        eprintln!("{}", bold(&header, no_color));

        for file in *files {
            let result = run_single_test(file);
            let label = result.description.as_deref().unwrap_or_else(|| {
                file.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("?")
            });

            match &result.outcome {
                TestOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", pass_label(no_color), label);
                }
                TestOutcome::Fail(_) => {
                    eprintln!("  {}  {}", fail_label(no_color), label);
                    failures.push(result);
                    if options.fail_fast {
                        break 'categories;
                    }
                }
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for f in &failures {
            eprintln!();
            eprintln!("  --- {} ---", f.path.display());
            if let TestOutcome::Fail(reason) = &f.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    let failed = failures.len();
    if failed == 0 {
        let ok = if no_color { "ok" } else { "\x1b[32mok\x1b[0m" };
        eprintln!("test result: {}. {} passed, 0 failed", ok, passed);
        0
    } else {
        let label = if no_color {
            "FAILED"
        } else {
            "\x1b[31mFAILED\x1b[0m"
        };
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            label,
            passed,
            failed,
            passed + failed
        );
        1
    }
}
