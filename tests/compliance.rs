use std::{fs, path::Path};

use kodiscript::Runner;
use walkdir::WalkDir;

/// Runs every `tests/scripts/*.kodi` file and compares its captured output
/// against the sibling `.out` file.
///
/// Directive comments configure a case:
/// - `// config: maxOps=N` caps the operation budget,
/// - `// expect: error` asserts the run fails instead of comparing output.
///
/// Output comparison trims each line and treats two lines as equal when
/// both parse as numbers within 1e-4 of each other, so reference files do
/// not need full double precision.
#[test]
fn script_files_match_reference_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| {
                                         e.path().extension().is_some_and(|ext| ext == "kodi")
                                     })
    {
        count += 1;
        run_script_case(entry.path());
    }

    assert!(count > 0, "No .kodi scripts found in tests/scripts");
}

fn run_script_case(path: &Path) {
    let source =
        fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

    let mut max_ops = None;
    let mut expect_error = false;
    for line in source.lines() {
        let trimmed = line.trim();
        if let Some(config) = trimmed.strip_prefix("// config:") {
            for setting in config.split_whitespace() {
                if let Some(value) = setting.strip_prefix("maxOps=") {
                    max_ops = value.parse::<u64>().ok();
                }
            }
        }
        if trimmed == "// expect: error" {
            expect_error = true;
        }
    }

    let mut runner = Runner::new();
    if let Some(limit) = max_ops {
        runner = runner.max_operations(limit);
    }
    let result = runner.execute(&source);

    if expect_error {
        assert!(!result.errors.is_empty(),
                "{path:?} was expected to fail but completed with output {:?}",
                result.output);
        return;
    }

    assert!(result.errors.is_empty(),
            "{path:?} failed unexpectedly: {:?}",
            result.errors);

    let out_path = path.with_extension("out");
    let expected = fs::read_to_string(&out_path).unwrap_or_else(|e| {
                       panic!("Failed to read reference output {out_path:?}: {e}")
                   });

    compare_outputs(path, &result.output, &expected);
}

fn compare_outputs(path: &Path, actual: &[String], expected: &str) {
    let mut actual: Vec<&str> = actual.iter().map(|l| l.trim()).collect();
    let mut expected: Vec<&str> = expected.lines().map(str::trim).collect();

    while actual.last() == Some(&"") {
        actual.pop();
    }
    while expected.last() == Some(&"") {
        expected.pop();
    }

    assert_eq!(actual.len(),
               expected.len(),
               "{path:?}: expected {} output lines, got {}:\n{actual:#?}",
               expected.len(),
               actual.len());

    for (index, (a, e)) in actual.iter().zip(&expected).enumerate() {
        if lines_match(a, e) {
            continue;
        }
        panic!("{path:?}: line {} mismatch: expected {e:?}, got {a:?}", index + 1);
    }
}

/// Trimmed-line comparison with numeric tolerance: lines that both parse
/// as numbers match when they are within 1e-4, regardless of decimal
/// formatting.
fn lines_match(actual: &str, expected: &str) -> bool {
    if actual == expected {
        return true;
    }
    match (actual.parse::<f64>(), expected.parse::<f64>()) {
        (Ok(a), Ok(e)) => (a - e).abs() <= 1e-4,
        _ => false,
    }
}
