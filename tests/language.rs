use std::fs;

use indoc::indoc;
use treelox::{
    error::{LoxError, ParseError, RuntimeError},
    get_output,
    interpreter::evaluator::core::{Config, Interpreter},
    run_source,
};
use walkdir::WalkDir;

/// What a fixture script says should happen when it runs.
#[derive(Default)]
struct Expectations {
    output:        Vec<String>,
    runtime_error: Option<String>,
    syntax_error:  bool,
}

fn read_expectations(source: &str) -> Expectations {
    let mut expected = Expectations::default();

    for line in source.lines() {
        let Some((_, comment)) = line.split_once("// expect") else {
            continue;
        };
        if let Some(text) = comment.strip_prefix(": ") {
            expected.output.push(text.to_string());
        } else if let Some(message) = comment.strip_prefix(" runtime error: ") {
            expected.runtime_error = Some(message.to_string());
        } else if comment.starts_with(" syntax error") {
            expected.syntax_error = true;
        }
    }

    expected
}

#[test]
fn script_fixtures_behave_as_annotated() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "lox"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = read_expectations(&source);
        count += 1;

        let mut interpreter = Interpreter::new(Vec::new());
        let result = run_source(&source, &mut interpreter);
        let output = String::from_utf8_lossy(interpreter.output()).into_owned();
        let lines: Vec<&str> = output.lines().collect();

        match (&result, &expected.runtime_error) {
            (Err(LoxError::Syntax(errors)), _) => {
                assert!(expected.syntax_error, "{path:?} failed to parse: {errors:?}");
            },
            (_, _) if expected.syntax_error => {
                panic!("{path:?} was expected to be rejected but parsed");
            },
            (Err(LoxError::Runtime(error)), Some(message)) => {
                assert_eq!(&error.message(), message, "wrong runtime error in {path:?}");
            },
            (Err(LoxError::Runtime(error)), None) => {
                panic!("{path:?} failed at runtime: {error}");
            },
            (Ok(()), Some(message)) => {
                panic!("{path:?} succeeded but was expected to fail with '{message}'");
            },
            (Ok(()), None) => {},
        }

        assert_eq!(lines, expected.output, "wrong output from {path:?}");
    }

    assert!(count > 0, "No fixtures found in tests/scripts");
}

fn assert_prints(src: &str, expected: &str) {
    match get_output(src) {
        Ok(output) => assert_eq!(output, expected, "unexpected output from:\n{src}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_runtime_error(src: &str) -> RuntimeError {
    match get_output(src) {
        Err(LoxError::Runtime(e)) => e,
        Err(e) => panic!("Script was rejected instead of failing at runtime: {e}"),
        Ok(_) => panic!("Script succeeded but was expected to fail"),
    }
}

fn assert_syntax_errors(src: &str) -> Vec<ParseError> {
    match get_output(src) {
        Err(LoxError::Syntax(errors)) => errors,
        Err(e) => panic!("Script failed at runtime instead of being rejected: {e}"),
        Ok(_) => panic!("Script succeeded but was expected to be rejected"),
    }
}

#[test]
fn arithmetic_and_concatenation() {
    assert_prints("print 1 + 2;", "3\n");
    assert_prints("print 0.5 + 0.25;", "0.75\n");
    assert_prints("print \"x\" + \"y\";", "xy\n");
    assert_prints("print 7 / 2;", "3.5\n");
    assert_prints("print -0;", "-0\n");

    let error = assert_runtime_error("print 1 + \"x\";");
    assert_eq!(error.message(), "Operands of '+' must be two numbers or two strings.");
}

#[test]
fn precedence_and_associativity() {
    assert_prints("print 2 + 3 * 4;", "14\n");
    assert_prints("print (2 + 3) * 4;", "20\n");
    assert_prints("print 1 - 2 - 3;", "-4\n");
    assert_prints("print 12 / 3 / 2;", "2\n");
    assert_prints("print !!true;", "true\n");
    assert_prints("print -(-3);", "3\n");
}

#[test]
fn short_circuit_skips_the_right_operand() {
    assert_prints("print false and undefinedCall();", "false\n");
    assert_prints("print true or undefinedCall();", "true\n");
    assert_prints("print nil or \"fallback\";", "fallback\n");
    assert_prints("print 1 and 2;", "2\n");
}

#[test]
fn truthiness() {
    assert_prints(indoc! {r#"
        if (0) print "zero is truthy";
        if ("") print "empty string is truthy";
        if (nil) print "unreachable"; else print "nil is falsey";
        print !nil;
    "#},
                  "zero is truthy\nempty string is truthy\nnil is falsey\ntrue\n");
}

#[test]
fn block_scoping() {
    let error = assert_runtime_error(indoc! {"
        {
            var inner = 1;
        }
        print inner;
    "});
    assert_eq!(error,
               RuntimeError::UndefinedVariable { name: "inner".to_string(),
                                                 line: 4, });

    assert_prints(indoc! {"
        var outer = 1;
        {
            outer = 2;
            var shadow = 3;
        }
        print outer;
    "},
                  "2\n");
}

#[test]
fn assignment_never_declares() {
    let error = assert_runtime_error("ghost = 1;");
    assert_eq!(error.message(), "Undefined variable 'ghost'.");
}

#[test]
fn for_loop_counts() {
    assert_prints("for (var i = 0; i < 3; i = i + 1) print i;", "0\n1\n2\n");
}

#[test]
fn functions() {
    assert_prints(indoc! {"
        fun add(a, b) { return a + b; }
        print add(2, 5);
        fun nothing() {}
        print nothing();
        print add;
    "},
                  "7\nnil\n<fn add>\n");

    let error = assert_runtime_error("fun f(a, b) {}\nf(1);");
    assert_eq!(error,
               RuntimeError::ArgumentCountMismatch { expected: 2,
                                                     found:    1,
                                                     line:     2, });
    assert_eq!(error.message(), "Expected 2 arguments but got 1.");
}

#[test]
fn recursion() {
    assert_prints(indoc! {"
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        print fib(15);
    "},
                  "610\n");
}

#[test]
fn only_functions_are_callable() {
    let error = assert_runtime_error("\"not a function\"();");
    assert_eq!(error.message(), "Can only call functions and classes.");
}

#[test]
fn runaway_recursion_is_a_runtime_error() {
    let config = Config { max_call_depth: 100,
                          ..Config::default() };
    let mut interpreter = Interpreter::with_config(Vec::new(), config);
    let result = run_source("fun down() { down(); }\ndown();", &mut interpreter);
    assert!(matches!(result, Err(LoxError::Runtime(RuntimeError::StackOverflow { line: 1 }))));
}

/// Runs `source` through the default configuration on a thread with the
/// stack size std gives spawned threads.
fn get_output_on_small_stack(source: &'static str) -> Result<String, LoxError> {
    std::thread::Builder::new().stack_size(2 * 1024 * 1024)
                               .spawn(move || get_output(source))
                               .unwrap()
                               .join()
                               .unwrap()
}

#[test]
fn default_limits_hold_on_a_small_thread_stack() {
    let near_limit = "fun f(n) { if (n == 0) return 0; return 1 + f(n - 1); } print f(500);";
    match get_output_on_small_stack(near_limit) {
        Ok(output) => assert_eq!(output, "500\n"),
        Err(LoxError::Runtime(RuntimeError::StackOverflow { .. })) => {},
        Err(e) => panic!("unexpected failure: {e}"),
    }

    let unbounded = "fun f(n) { return 1 + f(n + 1); } print f(0);";
    assert!(matches!(get_output_on_small_stack(unbounded),
                     Err(LoxError::Runtime(RuntimeError::StackOverflow { line: 1 }))));
}

#[test]
fn moderate_recursion_fits_the_default_budget() {
    let source = "fun f(n) { if (n == 0) return 0; return 1 + f(n - 1); } print f(50);";
    assert_eq!(get_output_on_small_stack(source).unwrap(), "50\n");
}

#[test]
fn classes_parse_but_do_not_run() {
    let error = assert_runtime_error("print 1;\nclass Point {}");
    assert_eq!(error,
               RuntimeError::ClassesUnsupported { name: "Point".to_string(),
                                                  line: 2, });
}

#[test]
fn recovery_reports_every_independent_error() {
    let errors = assert_syntax_errors(indoc! {"
        var = 1;
        print \"fine\";
        print (2;
    "});
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].to_string(), "Error on line 1 at '=': Expect variable name.");
    assert_eq!(errors[1].to_string(), "Error on line 3 at ';': Expect ')' after expression.");
}

#[test]
fn scan_and_parse_errors_are_reported_together() {
    let errors = assert_syntax_errors("print @;\nvar x = ;");
    assert_eq!(errors.len(), 3);
    assert!(matches!(errors[0], ParseError::UnexpectedCharacter { line: 1, .. }));
    assert_eq!(errors[2].line(), 2);
}

#[test]
fn syntax_errors_prevent_any_execution() {
    let mut interpreter = Interpreter::new(Vec::new());
    let result = run_source("print 1;\nprint ;", &mut interpreter);
    assert!(matches!(result, Err(LoxError::Syntax(_))));
    assert!(interpreter.output().is_empty());
}

#[test]
fn output_before_a_runtime_error_is_kept() {
    let mut interpreter = Interpreter::new(Vec::new());
    let result = run_source("print \"before\";\nprint -\"x\";\nprint \"after\";", &mut interpreter);

    let Err(LoxError::Runtime(error)) = result else {
        panic!("expected a runtime error, got {result:?}");
    };
    assert_eq!(error.to_string(), "Error on line 2: Operand of '-' must be a number.");
    assert_eq!(interpreter.output(), b"before\n");
}

#[test]
fn globals_persist_between_runs() {
    let mut interpreter = Interpreter::new(Vec::new());
    run_source("var count = 1;", &mut interpreter).unwrap();
    run_source("fun bump() { count = count + 1; }", &mut interpreter).unwrap();
    run_source("bump(); bump(); print count;", &mut interpreter).unwrap();
    assert_eq!(interpreter.output(), b"3\n");
}

#[test]
fn exit_codes_distinguish_failures() {
    let syntax = get_output("print").unwrap_err();
    let runtime = get_output("print -nil;").unwrap_err();
    assert_eq!(syntax.exit_code(), 65);
    assert_eq!(runtime.exit_code(), 70);
}
