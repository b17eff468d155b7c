use std::{collections::HashMap, rc::Rc};

use kodiscript::{Runner, Value, evaluate, run};

fn eval_value(src: &str) -> Value {
    match evaluate(src) {
        Ok(value) => value,
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn eval_number(src: &str) -> f64 {
    match eval_value(src) {
        Value::Number(n) => n,
        other => panic!("Expected a number, got {other:?}\n{src}"),
    }
}

fn eval_string(src: &str) -> String {
    match eval_value(src) {
        Value::Str(s) => s,
        other => panic!("Expected a string, got {other:?}\n{src}"),
    }
}

fn assert_failure(src: &str) {
    if evaluate(src).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{src}")
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(eval_number("2 + 3 * 4"), 14.0);
    assert_eq!(eval_number("(2 + 3) * 4"), 20.0);
    assert_eq!(eval_number("10 % 3"), 1.0);
    assert_eq!(eval_number("7 - 2 - 1"), 4.0);
    assert_eq!(eval_number("2 * -3"), -6.0);
    assert_eq!(eval_number("9 / 2"), 4.5);
}

#[test]
fn assignment_overwrites() {
    assert_eq!(eval_number("let x = 10; x = 100; x"), 100.0);
    assert_eq!(eval_number("y = 5 y"), 5.0);
}

#[test]
fn for_in_sums_an_array() {
    assert_eq!(eval_number("let sum = 0 for (i in [1,2,3,4,5]) { sum = sum + i } sum"),
               15.0);
}

#[test]
fn for_in_iterates_object_values_and_strings() {
    assert_eq!(eval_number("let total = 0 for (v in {a: 1, b: 2, c: 3}) { total = total + v } total"),
               6.0);
    assert_eq!(eval_string("let out = \"\" for (c in \"abc\") { out = out + c + \"-\" } out"),
               "a-b-c-");
}

#[test]
fn while_loops_until_falsy() {
    assert_eq!(eval_number("let n = 5 let acc = 1 while (n > 1) { acc = acc * n n = n - 1 } acc"),
               120.0);
}

#[test]
fn print_captures_output_in_order() {
    let result = run("print(\"Hello\"); print(\"World\")", None);

    assert!(result.errors.is_empty());
    assert_eq!(result.output, vec!["Hello".to_string(), "World".to_string()]);
    assert_eq!(result.value, Value::Null);
}

#[test]
fn print_joins_arguments_with_spaces() {
    let result = run("print(\"x =\", 1 + 1, true, null)", None);
    assert_eq!(result.output, vec!["x = 2 true null".to_string()]);
}

#[test]
fn safe_member_on_null_and_object() {
    let mut variables = HashMap::new();
    variables.insert("user".to_string(), Value::Null);
    let result = run("user?.name", Some(variables));
    assert!(result.errors.is_empty());
    assert_eq!(result.value, Value::Null);

    let result = run("let user = {name: \"Alice\"} user?.name", None);
    assert_eq!(result.value, Value::Str("Alice".to_string()));
}

#[test]
fn member_access_on_non_object_fails() {
    assert_failure("let x = 5 x.name");
    assert_failure("let user = null user.name");
}

#[test]
fn recursion_through_the_caller_environment() {
    let source = "let factorial = fn(n) { if (n <= 1) { return 1 } return n * factorial(n - 1) } \
                  factorial(5)";
    assert_eq!(eval_number(source), 120.0);
}

#[test]
fn recursive_sum_matches_closed_form() {
    for k in 0..20 {
        let source = format!("let f = fn(n) {{ if (n <= 0) {{ return 0 }} return n + f(n - 1) }} \
                              f({k})");
        assert_eq!(eval_number(&source), (k * (k + 1)) as f64 / 2.0);
    }
}

#[test]
fn closures_capture_by_snapshot() {
    // The closure sees the captured value, not the later mutation.
    assert_eq!(eval_number("let a = 1 let f = fn() { a } a = 2 f()"), 1.0);
    // Names bound inside a call do not leak out.
    assert_eq!(eval_number("let x = 1 let f = fn() { x = 99 x } f() x"), 1.0);
}

#[test]
fn functions_are_first_class() {
    assert_eq!(eval_number("let apply = fn(f, v) { f(v) } apply(fn(n) { n * 2 }, 21)"),
               42.0);
    assert_eq!(eval_string("let f = toUpperCase f(\"abc\")"), "ABC");
}

#[test]
fn missing_arguments_bind_null_and_extras_are_ignored() {
    assert_eq!(eval_value("let f = fn(a, b) { b } f(1)"), Value::Null);
    assert_eq!(eval_number("let f = fn(a) { a } f(7, 8, 9)"), 7.0);
}

#[test]
fn function_body_without_return_yields_last_value() {
    assert_eq!(eval_number("let f = fn(n) { n * 2 } f(4)"), 8.0);
}

#[test]
fn return_unwinds_nested_control_flow() {
    let source = "let f = fn(items) { for (i in items) { if (i > 2) { return i } } return -1 } \
                  f([1, 2, 3, 4])";
    assert_eq!(eval_number(source), 3.0);

    assert_eq!(eval_number("return 7; 99"), 7.0);
}

#[test]
fn host_functions_resolve_between_variables_and_builtins() {
    let result = Runner::new().function("greet", Rc::new(|args: &[Value]| {
                                  Ok(Value::Str(format!("Hello, {}!", args[0])))
                              }))
                              .execute("greet(\"PHP\")");

    assert!(result.errors.is_empty());
    assert_eq!(result.value, Value::Str("Hello, PHP!".to_string()));
}

#[test]
fn host_function_errors_are_captured_verbatim() {
    let result = Runner::new().function("boom", Rc::new(|_args: &[Value]| {
                                  Err("the gasket blew".to_string())
                              }))
                              .execute("boom()");

    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("the gasket blew"));
}

#[test]
fn undefined_variable_is_an_error_with_null_value() {
    let result = run("undefined_variable", None);
    assert!(!result.errors.is_empty());
    assert_eq!(result.value, Value::Null);
}

#[test]
fn output_before_an_error_is_preserved() {
    let result = run("print(\"before\") missing_name print(\"after\")", None);
    assert_eq!(result.output, vec!["before".to_string()]);
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn elvis_tests_null_not_truthiness() {
    assert_eq!(eval_number("null ?: 5"), 5.0);
    assert_eq!(eval_number("0 ?: 1"), 0.0);
    assert_eq!(eval_string("\"\" ?: \"fallback\""), "");
    assert_eq!(eval_number("let x = null x ?: 3"), 3.0);
}

#[test]
fn equality_is_strict_across_types() {
    assert_eq!(eval_value("1 == \"1\""), Value::Bool(false));
    assert_eq!(eval_value("1 == 1"), Value::Bool(true));
    assert_eq!(eval_value("null == null"), Value::Bool(true));
    assert_eq!(eval_value("null == 0"), Value::Bool(false));
    assert_eq!(eval_value("[1, 2] == [1, 2]"), Value::Bool(true));
    assert_eq!(eval_value("1 != 2"), Value::Bool(true));
}

#[test]
fn comparisons_choose_lexicographic_for_strings() {
    assert_eq!(eval_value("\"abc\" < \"abd\""), Value::Bool(true));
    assert_eq!(eval_value("\"2\" < \"10\""), Value::Bool(false));
    assert_eq!(eval_value("2 < 10"), Value::Bool(true));
    assert_eq!(eval_value("3 >= 3"), Value::Bool(true));
}

#[test]
fn string_concatenation_stringifies_both_sides() {
    assert_eq!(eval_string("\"a\" + 1"), "a1");
    assert_eq!(eval_string("1 + \"a\""), "1a");
    assert_eq!(eval_string("\"v = \" + null"), "v = null");
    assert_eq!(eval_string("\"is \" + true"), "is true");
    assert_eq!(eval_string("\"\" + [1, \"x\"]"), "[1,\"x\"]");
}

#[test]
fn logical_operators_use_truthiness() {
    assert_eq!(eval_value("not false"), Value::Bool(true));
    assert_eq!(eval_value("!0"), Value::Bool(true));
    assert_eq!(eval_value("1 and \"\""), Value::Bool(false));
    assert_eq!(eval_value("0 or \"x\""), Value::Bool(true));
    assert_eq!(eval_value("true && true"), Value::Bool(true));
    assert_eq!(eval_value("false || false"), Value::Bool(false));
}

#[test]
fn division_and_modulo_by_zero_fail() {
    assert_failure("1 / 0");
    assert_failure("1 % 0");
}

#[test]
fn if_branches_may_be_blocks_or_single_statements() {
    assert_eq!(eval_number("if (1 < 2) { 10 } else { 20 }"), 10.0);
    assert_eq!(eval_number("if (1 > 2) 10 else 20"), 20.0);
    assert_eq!(eval_value("if (false) 1"), Value::Null);
    assert_eq!(eval_number("if (false) 1 else if (true) 2 else 3"), 2.0);
}

#[test]
fn object_literals_keep_insertion_order_and_last_duplicate() {
    assert_eq!(eval_number("let o = {a: 1, b: 2, a: 3} o.a"), 3.0);
    assert_eq!(eval_string("\"\" + {b: 1, a: 2}"), "{\"b\":1,\"a\":2}");
    assert_eq!(eval_value("let o = {a: 1} o.missing"), Value::Null);
}

#[test]
fn indexing_arrays_objects_and_strings() {
    assert_eq!(eval_number("[10, 20, 30][1]"), 20.0);
    assert_eq!(eval_value("[10][5]"), Value::Null);
    assert_eq!(eval_number("let o = {a: 7} o[\"a\"]"), 7.0);
    assert_eq!(eval_string("\"hello\"[1]"), "e");
    assert_eq!(eval_value("\"hi\"[9]"), Value::Null);
    assert_failure("true[0]");
}

#[test]
fn string_builtins() {
    assert_eq!(eval_number("length(\"héllo\")"), 5.0);
    assert_eq!(eval_string("substring(\"hello\", 1, 3)"), "el");
    assert_eq!(eval_string("substring(\"hello\", 3)"), "lo");
    assert_eq!(eval_string("toUpperCase(\"abc\")"), "ABC");
    assert_eq!(eval_string("toLowerCase(\"AbC\")"), "abc");
    assert_eq!(eval_string("trim(\"  x  \")"), "x");
    assert_eq!(eval_string("replace(\"a-b-c\", \"-\", \"+\")"), "a+b+c");
    assert_eq!(eval_string("join(split(\"a,b,c\", \",\"), \"|\")"), "a|b|c");
    assert_eq!(eval_value("contains(\"hello\", \"ell\")"), Value::Bool(true));
    assert_eq!(eval_value("startsWith(\"hello\", \"he\")"), Value::Bool(true));
    assert_eq!(eval_value("endsWith(\"hello\", \"lo\")"), Value::Bool(true));
    assert_eq!(eval_string("repeat(\"ab\", 3)"), "ababab");
    assert_eq!(eval_string("padLeft(\"7\", 3, \"0\")"), "007");
    assert_eq!(eval_string("padRight(\"7\", 3)"), "7  ");
}

#[test]
fn index_of_reports_position_zero_correctly() {
    assert_eq!(eval_number("indexOf(\"hello\", \"h\")"), 0.0);
    assert_eq!(eval_number("indexOf(\"hello\", \"llo\")"), 2.0);
    assert_eq!(eval_number("indexOf(\"hello\", \"z\")"), -1.0);
}

#[test]
fn math_builtins() {
    assert_eq!(eval_number("abs(-5)"), 5.0);
    assert_eq!(eval_number("floor(3.7)"), 3.0);
    assert_eq!(eval_number("ceil(3.2)"), 4.0);
    assert_eq!(eval_number("round(3.5)"), 4.0);
    assert_eq!(eval_number("pow(2, 10)"), 1024.0);
    assert_eq!(eval_number("sqrt(9)"), 3.0);
    assert_eq!(eval_number("min(3, 1, 2)"), 1.0);
    assert_eq!(eval_number("max([4, 9])"), 9.0);
    assert_eq!(eval_number("sin(0)"), 0.0);
    assert_eq!(eval_number("log(exp(1))"), 1.0);
    assert_eq!(eval_number("log10(1000)"), 3.0);
}

#[test]
fn numeric_coercion_in_arithmetic() {
    assert_eq!(eval_number("\"3\" * \"4\""), 12.0);
    assert_eq!(eval_number("true + true"), 2.0);
    assert_eq!(eval_number("null + 1"), 1.0);
    assert_eq!(eval_number("toNumber(\" 42 \")"), 42.0);
    assert_eq!(eval_number("toNumber(\"nope\")"), 0.0);
    assert_failure("[1] + 1");
}

#[test]
fn type_builtins() {
    assert_eq!(eval_string("typeOf(null)"), "null");
    assert_eq!(eval_string("typeOf(true)"), "boolean");
    assert_eq!(eval_string("typeOf(1)"), "number");
    assert_eq!(eval_string("typeOf(\"s\")"), "string");
    assert_eq!(eval_string("typeOf([])"), "array");
    assert_eq!(eval_string("typeOf({})"), "object");
    assert_eq!(eval_string("typeOf(fn() { 1 })"), "function");
    assert_eq!(eval_string("typeOf(print)"), "function");
    assert_eq!(eval_value("isNull(null)"), Value::Bool(true));
    assert_eq!(eval_value("isNumber(1)"), Value::Bool(true));
    assert_eq!(eval_value("isString(\"\")"), Value::Bool(true));
    assert_eq!(eval_value("isBool(false)"), Value::Bool(true));
}

#[test]
fn array_builtins() {
    assert_eq!(eval_number("size([1, 2, 3])"), 3.0);
    assert_eq!(eval_number("first([9, 8])"), 9.0);
    assert_eq!(eval_number("last([9, 8])"), 8.0);
    assert_eq!(eval_value("first([])"), Value::Null);
    assert_eq!(eval_string("join(reverse([1, 2, 3]), \"\")"), "321");
    assert_eq!(eval_string("join(slice([1, 2, 3, 4], 1, 3), \",\")"), "2,3");
    assert_eq!(eval_string("join(sort([3, 1, 2], \"asc\"), \"\")"), "123");
    assert_eq!(eval_string("join(sort([3, 1, 2], \"desc\"), \"\")"), "321");
    assert_eq!(eval_string("join(sort([\"b\", \"a\"]), \"\")"), "ab");
}

#[test]
fn sort_by_field_with_missing_keys_first() {
    let source = "let rows = [{n: 2}, {n: 1}, {x: 0}] join(map(sortBy(rows, \"n\"), fn(r) { r.n ?: \"-\" }), \"\")";
    assert_eq!(eval_string(source), "-12");

    let source = "let rows = [{n: \"b\"}, {n: \"a\"}] sortBy(rows, \"n\", \"desc\")[0].n";
    assert_eq!(eval_string(source), "b");
}

#[test]
fn higher_order_builtins_apply_user_functions() {
    assert_eq!(eval_string("join(map([1, 2, 3], fn(n) { n * 2 }), \",\")"), "2,4,6");
    assert_eq!(eval_string("join(filter([1, 2, 3, 4], fn(n) { n % 2 == 0 }), \",\")"),
               "2,4");
    assert_eq!(eval_number("reduce([1, 2, 3, 4], fn(acc, n) { acc + n }, 0)"), 10.0);
    assert_eq!(eval_number("find([5, 12, 8], fn(n) { n > 10 })"), 12.0);
    assert_eq!(eval_value("find([1], fn(n) { n > 10 })"), Value::Null);
    assert_eq!(eval_number("findIndex([5, 12, 8], fn(n) { n > 10 })"), 1.0);
    assert_eq!(eval_number("findIndex([5], fn(n) { n > 10 })"), -1.0);
    assert_eq!(eval_string("join(map([-1, 2], abs), \",\")"), "1,2");
}

#[test]
fn json_builtins_round_trip() {
    assert_eq!(eval_number("jsonParse(\"{\\\"a\\\": 41}\").a + 1"), 42.0);
    assert_eq!(eval_string("jsonStringify({a: 1, b: [true, null, \"x\"]})"),
               "{\"a\":1,\"b\":[true,null,\"x\"]}");
    assert_eq!(eval_string("jsonStringify(jsonParse(\"[1,\\\"two\\\",{\\\"k\\\":null}]\"))"),
               "[1,\"two\",{\"k\":null}]");
    assert_failure("jsonParse(\"{nope\")");
}

#[test]
fn encoding_builtins() {
    assert_eq!(eval_string("base64Encode(\"hello\")"), "aGVsbG8=");
    assert_eq!(eval_string("base64Decode(\"aGVsbG8=\")"), "hello");
    assert_eq!(eval_string("urlEncode(\"a b&c\")"), "a%20b%26c");
    assert_eq!(eval_string("urlDecode(\"a%20b%26c\")"), "a b&c");
    assert_failure("base64Decode(\"!!!\")");
}

#[test]
fn hash_builtins_produce_known_hex_digests() {
    assert_eq!(eval_string("md5(\"\")"), "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(eval_string("sha1(\"abc\")"), "a9993e364706816aba3e25717850c26c9cd0d89d");
    assert_eq!(eval_string("sha256(\"abc\")"),
               "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[test]
fn date_builtins_work_in_utc() {
    assert_eq!(eval_string("formatDate(0, \"%Y-%m-%d\")"), "1970-01-01");
    assert_eq!(eval_string("date(0)"), "1970-01-01");
    assert_eq!(eval_string("time(0)"), "00:00:00");
    assert_eq!(eval_string("datetime(86400000)"), "1970-01-02 00:00:00");
    assert_eq!(eval_number("year(0)"), 1970.0);
    assert_eq!(eval_number("month(0)"), 1.0);
    assert_eq!(eval_number("day(0)"), 1.0);
    assert_eq!(eval_number("hour(3600000)"), 1.0);
    assert_eq!(eval_number("minute(60000)"), 1.0);
    assert_eq!(eval_number("second(1000)"), 1.0);
    // 1970-01-01 was a Thursday.
    assert_eq!(eval_number("dayOfWeek(0)"), 4.0);
    assert_eq!(eval_number("timestamp(\"1970-01-02\")"), 86_400_000.0);
    assert_eq!(eval_number("timestamp(\"1970-01-01 01:00:00\")"), 3_600_000.0);
    assert_eq!(eval_number("addDays(0, 2)"), 172_800_000.0);
    assert_eq!(eval_number("addHours(0, -1)"), -3_600_000.0);
    assert_eq!(eval_number("diffDays(172800000, 0)"), 2.0);
    assert_failure("formatDate(0, \"%Q\")");
}

#[test]
fn random_builtins_have_the_right_shape() {
    let result = run("random()", None);
    match result.value {
        Value::Number(n) => assert!((0.0..1.0).contains(&n)),
        other => panic!("Expected a number, got {other:?}"),
    }

    assert_eq!(eval_number("randomInt(4, 4)"), 4.0);
    let n = eval_number("randomInt(1, 6)");
    assert!((1.0..=6.0).contains(&n));
    assert_failure("randomInt(5, 1)");

    let uuid = eval_string("randomUUID()");
    assert_eq!(uuid.len(), 36);
    assert_eq!(uuid.chars().filter(|&c| c == '-').count(), 4);
}

#[test]
fn string_templates_interpolate_expressions() {
    assert_eq!(eval_string("let name = \"World\" \"Hello, ${name}!\""), "Hello, World!");
    assert_eq!(eval_string("\"1 + 1 = ${1 + 1}\""), "1 + 1 = 2");
    assert_eq!(eval_string("let o = {a: 5} \"a is ${o.a}\""), "a is 5");
    // An escaped dollar stays literal.
    assert_eq!(eval_string("\"\\${name}\""), "${name}");
    // ... even when the same literal also contains a genuine marker.
    assert_eq!(eval_string("\"\\${y} and ${1 + 1}\""), "${y} and 2");
    assert_eq!(eval_string("let y = 9 \"${y} and \\${y}\""), "9 and ${y}");
    assert_failure("\"broken ${\"");
}

#[test]
fn string_escape_sequences_decode() {
    assert_eq!(eval_string("\"a\\tb\\nc\""), "a\tb\nc");
    assert_eq!(eval_string("'single \\'quotes\\''"), "single 'quotes'");
    assert_eq!(eval_string("\"back\\\\slash\""), "back\\slash");
    assert_eq!(eval_string("\"\\q\""), "q");
}

#[test]
fn lexical_errors_report_position() {
    let err = evaluate("let x = @").unwrap_err().to_string();
    assert!(err.contains("Unexpected character"), "{err}");
    assert!(err.contains("line 1"), "{err}");

    let err = evaluate("\n\"unterminated").unwrap_err().to_string();
    assert!(err.contains("Unterminated string"), "{err}");
    assert!(err.contains("line 2"), "{err}");

    assert_failure("a & b");
    assert_failure("a | b");
    assert_failure("a ? b");
}

#[test]
fn parse_errors_cite_the_mismatch() {
    let err = evaluate("if (true { 1 }").unwrap_err().to_string();
    assert!(err.contains("Expected"), "{err}");

    assert_failure("let = 5");
    assert_failure("for (x in [1]) 1");
    assert_failure("[1, 2,]");
    assert_failure("fn (a { }");
}

#[test]
fn type_errors_for_misused_values() {
    assert_failure("let x = 5 x()");
    assert_failure("for (i in 42) { i }");
    assert_failure("abs(1, 2)");
    assert_failure("sort([1], \"sideways\")");
}

#[test]
fn operation_limit_terminates_the_run() {
    let result = Runner::new().max_operations(1).execute("1 + 1");
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("operation"), "{}", result.errors[0]);

    let result = Runner::new().max_operations(10_000).execute("while (true) { 1 }");
    assert_eq!(result.errors.len(), 1);

    let result = Runner::new().max_operations(10_000).execute("2 + 2");
    assert!(result.errors.is_empty());
}

#[test]
fn wall_clock_deadline_terminates_a_tight_loop() {
    let result = Runner::new().timeout_ms(20).execute("while (true) { 1 }");
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("timed out"), "{}", result.errors[0]);
}

#[test]
fn injected_values_round_trip() {
    let values = vec![Value::Null,
                      Value::Bool(true),
                      Value::Number(1.5),
                      Value::Str("héllo".to_string()),
                      Value::Array(Rc::new(vec![Value::Number(1.0)])),
                      Value::object_from_pairs(vec![("k".to_string(), Value::Bool(false))])];

    for value in values {
        let mut variables = HashMap::new();
        variables.insert("x".to_string(), value.clone());
        let result = run("x", Some(variables));
        assert!(result.errors.is_empty());
        assert_eq!(result.value, value);
    }
}

#[test]
fn fresh_runs_of_a_pure_script_agree() {
    let source = "let acc = [] for (i in [3, 1, 2]) { acc = map(sort(acc), fn(n) { n }) } \
                  jsonStringify(sort([9, 4, 7]))";

    let first = run(source, None);
    let second = run(source, None);

    assert!(first.errors.is_empty());
    assert_eq!(first.value, second.value);
    assert_eq!(first.output, second.output);
}
