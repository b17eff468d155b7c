use std::collections::HashMap;

use kodiscript::{Runner, Value, evaluate, run};
use proptest::prelude::*;

proptest! {
    /// Ensure the parser never panics on arbitrary valid UTF-8 input; it
    /// should return Ok or Err but not panic.
    #[test]
    fn parser_does_not_panic(s in "\\PC*") {
        let _ = std::panic::catch_unwind(|| {
            let _ = kodiscript::interpreter::parser::core::parse_source(&s);
        });
    }
}

proptest! {
    /// Tokenizing the source twice is stable: the same token kinds come
    /// back in the same order.
    #[test]
    fn tokenization_is_stable(s in "[a-z0-9+*()\\[\\]{}<>=!,;. \n\"]*") {
        let first = kodiscript::interpreter::lexer::tokenize(&s);
        let second = kodiscript::interpreter::lexer::tokenize(&s);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(_), Err(_)) => {},
            _ => prop_assert!(false, "lexing the same input twice disagreed"),
        }
    }
}

proptest! {
    /// An injected variable reads back unchanged: eval("x", {x: v}) == v.
    #[test]
    fn injected_number_round_trips(n in proptest::num::f64::NORMAL) {
        let mut variables = HashMap::new();
        variables.insert("x".to_string(), Value::Number(n));
        let result = run("x", Some(variables));
        prop_assert!(result.errors.is_empty());
        prop_assert_eq!(result.value, Value::Number(n));
    }

    #[test]
    fn injected_string_round_trips(s in "\\PC*") {
        let mut variables = HashMap::new();
        variables.insert("x".to_string(), Value::Str(s.clone()));
        let result = run("x", Some(variables));
        prop_assert!(result.errors.is_empty());
        prop_assert_eq!(result.value, Value::Str(s));
    }
}

proptest! {
    /// The elvis operator yields the left value unless it is null, in
    /// which case it yields the default.
    #[test]
    fn elvis_defaults_only_null(n in proptest::num::f64::NORMAL, use_null in any::<bool>()) {
        let injected = if use_null { Value::Null } else { Value::Number(n) };
        let mut variables = HashMap::new();
        variables.insert("x".to_string(), injected.clone());

        let result = run("x ?: \"default\"", Some(variables));
        prop_assert!(result.errors.is_empty());

        if use_null {
            prop_assert_eq!(result.value, Value::Str("default".to_string()));
        } else {
            prop_assert_eq!(result.value, injected);
        }
    }
}

proptest! {
    /// toNumber(toString(n)) round-trips every finite number.
    #[test]
    fn to_number_to_string_round_trips(n in proptest::num::f64::NORMAL) {
        let mut variables = HashMap::new();
        variables.insert("x".to_string(), Value::Number(n));
        let result = run("toNumber(toString(x))", Some(variables));
        prop_assert!(result.errors.is_empty());
        prop_assert_eq!(result.value, Value::Number(n));
    }
}

proptest! {
    /// The recursive triangular-number function agrees with the closed
    /// form k * (k + 1) / 2.
    #[test]
    fn recursive_sum_matches_closed_form(k in 0u32..40) {
        let source = format!(
            "let f = fn(n) {{ if (n <= 0) {{ return 0 }} return n + f(n - 1) }} f({k})"
        );
        let value = evaluate(&source).unwrap();
        prop_assert_eq!(value, Value::Number(f64::from(k * (k + 1)) / 2.0));
    }
}

proptest! {
    /// Any program with at least one statement trips a one-operation
    /// budget.
    #[test]
    fn one_operation_budget_always_trips(statements in 1usize..20) {
        let source = "1;".repeat(statements);
        let result = Runner::new().max_operations(1).execute(&source);
        prop_assert_eq!(result.errors.len(), 1);
        prop_assert!(result.errors[0].contains("operation"));
    }
}

proptest! {
    /// A pure script run twice on fresh contexts produces identical
    /// results.
    #[test]
    fn pure_scripts_are_deterministic(a in -1000i64..1000, b in -1000i64..1000) {
        let source = format!(
            "let xs = sort([{a}, {b}, {a} * {b} % 97]) print(join(xs, \",\")) jsonStringify(xs)"
        );

        let first = run(&source, None);
        let second = run(&source, None);

        prop_assert_eq!(first.errors.is_empty(), second.errors.is_empty());
        prop_assert_eq!(first.value, second.value);
        prop_assert_eq!(first.output, second.output);
    }
}
