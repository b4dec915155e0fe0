use std::fs::File;
use std::io::Write;

use pretty_assertions::assert_eq;

use crate::parser::{Token, INDENT_WIDTH};

use super::{
    ControlError, EvalError, ExitCode, InterpreterError, Program, Runtime, RuntimeError,
    RuntimeErrorKind, Value,
};

fn fixture_test(test_name: &str) {
    let program_path = format!("./src/runtime/tests/test_programs/{}.tl", test_name);
    let fixture_folder = "./src/runtime/tests/fixtures";
    let output_path_expected = format!("{}/{}.output.expected", fixture_folder, test_name);
    let err_path_expected = format!("{}/{}.error.expected", fixture_folder, test_name);

    let source = std::fs::read_to_string(&program_path).unwrap();
    let mut runtime = Runtime::init(Program::default());
    runtime.save_output();

    let error = match run_script(&mut runtime, &source) {
        Ok(()) => String::new(),
        Err(err) => err.render(),
    };
    let output = runtime.take_saved_output().unwrap_or_default();

    if std::env::var("OVERWRITE_FIXTURES").is_ok() {
        for (path, actual) in [(&output_path_expected, &output), (&err_path_expected, &error)] {
            let mut file = File::create(path).unwrap();

            file.write_all(actual.as_bytes()).unwrap();
        }
    }

    let expected_output = std::fs::read_to_string(&output_path_expected).unwrap_or_default();
    let expected_error = std::fs::read_to_string(&err_path_expected).unwrap_or_default();

    assert_eq!(expected_output, output);
    assert_eq!(expected_error, error);
}

fn run_script(runtime: &mut Runtime, source: &str) -> Result<(), InterpreterError> {
    runtime.load_inline(source)?;

    runtime.run()
}

fn run(source: &str) -> (Runtime, Result<(), InterpreterError>) {
    let mut runtime = Runtime::init(Program::default());
    runtime.save_output();

    let result = run_script(&mut runtime, source);

    (runtime, result)
}

fn output_of(source: &str) -> String {
    let (mut runtime, result) = run(source);

    result.unwrap();
    runtime.take_saved_output().unwrap()
}

fn runtime_error(source: &str) -> RuntimeError {
    match run(source).1 {
        Err(InterpreterError::RuntimeError(err)) => err,
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

#[test]
fn count_loop() {
    fixture_test("count_loop");
}

#[test]
fn nested_loops() {
    fixture_test("nested_loops");
}

#[test]
fn false_loop() {
    fixture_test("false_loop");
}

#[test]
fn halving() {
    fixture_test("halving");
}

#[test]
fn arithmetic() {
    fixture_test("arithmetic");
}

#[test]
fn uninitialized() {
    fixture_test("uninitialized");
}

#[test]
fn division_by_zero() {
    fixture_test("division_by_zero");
}

#[test]
fn bad_indent() {
    fixture_test("bad_indent");
}

#[test]
fn invalid_character() {
    fixture_test("invalid_character");
}

#[test]
fn loop_terminates_with_final_binding() {
    let (mut runtime, result) = run("x = 0\nwhile x < 3\n    x = x + 1\nprint x\n");

    result.unwrap();
    assert!(!runtime.is_running());
    assert_eq!(runtime.variables().get("x"), Some(Value::Int(3)));
    assert_eq!(runtime.take_saved_output().unwrap(), "3\n");
}

#[test]
fn false_loop_restores_indentation() {
    let (runtime, result) = run("x = 1\nwhile 0\n    x = 2\n    x = 3\ny = x\n");

    result.unwrap();
    assert_eq!(runtime.variables().get("x"), Some(Value::Int(1)));
    assert_eq!(runtime.variables().get("y"), Some(Value::Int(1)));
}

#[test]
fn parenthesized_condition_behaves_the_same() {
    let bare = output_of("x = 0\nwhile x < 3\n    print x\n    x = x + 1\n");
    let wrapped = output_of("x = 0\nwhile (x < 3)\n    print x\n    x = x + 1\n");

    assert_eq!(bare, "0\n1\n2\n");
    assert_eq!(bare, wrapped);
}

#[test]
fn boolean_variable_as_condition() {
    let output = output_of("go = True\nn = 0\nwhile go\n    n = n + 1\n    go = n < 4\nprint n go\n");

    assert_eq!(output, "4 False\n");
}

#[test]
fn print_formats_every_residual() {
    assert_eq!(output_of("print 1 < 2"), "True\n");
    assert_eq!(output_of("print 5 (2 > 3)"), "5 False\n");
    assert_eq!(output_of("print -7"), "-7\n");
}

#[test]
fn end_of_file_inside_loop_body() {
    let (runtime, result) = run("i = 0\nwhile i < 2\n\ti = i + 1");

    result.unwrap();
    assert_eq!(runtime.variables().get("i"), Some(Value::Int(2)));
}

#[test]
fn dedent_by_several_levels() {
    let source = "\
a = 0
total = 0
while a < 2
    a = a + 1
    b = 0
    while b < 3
        total = total + 1
        b = b + 1
print a total
";

    assert_eq!(output_of(source), "2 6\n");
}

#[test]
fn skipped_inner_loop_does_not_leak_into_later_blocks() {
    let source = "\
i = 0
hits = 0
while i < 1
    i = i + 1
    while 0
        hits = 100
i = 5
while i < 7
    hits = hits + 1
    i = i + 1
print hits
";

    assert_eq!(output_of(source), "2\n");
}

#[test]
fn unbound_identifier_names_variable_and_line() {
    let err = runtime_error("x = 1\n\ny = x + missing\n");

    assert_eq!(err.line, 3);
    assert_eq!(
        err.kind,
        RuntimeErrorKind::Eval(EvalError::UninitializedVariable("missing".to_string()))
    );
}

#[test]
fn committed_bindings_survive_a_failure() {
    let (runtime, result) = run("x = 4\ny = x / 0\n");

    assert!(result.is_err());
    assert_eq!(runtime.variables().get("x"), Some(Value::Int(4)));
    assert_eq!(runtime.variables().get("y"), None);
}

#[test]
fn while_needs_exactly_one_condition() {
    let err = runtime_error("while 1 2\n    x = 1\n");
    assert_eq!(err.kind, RuntimeErrorKind::Eval(EvalError::WrongConditionCount(2)));

    let err = runtime_error("x = 0\nwhile\n    x = 1\n");
    assert_eq!(err.kind, RuntimeErrorKind::Eval(EvalError::WrongConditionCount(0)));
    assert_eq!(err.line, 2);
}

#[test]
fn while_needs_a_body() {
    let err = runtime_error("x = 1\nwhile x\nx = 2\n");
    assert_eq!(err.kind, RuntimeErrorKind::Control(ControlError::UnexpectedLineEnding));
    assert_eq!(err.line, 2);

    let err = runtime_error("while 1\n\n");
    assert_eq!(err.kind, RuntimeErrorKind::Control(ControlError::UnexpectedLineEnding));
}

#[test]
fn invalid_line_starts() {
    let err = runtime_error("3 + 4\n");
    assert_eq!(
        err.kind,
        RuntimeErrorKind::Control(ControlError::InvalidLineStart(Token::Int(3)))
    );

    let err = runtime_error("x = 1\nTrue\n");
    assert_eq!(
        err.kind,
        RuntimeErrorKind::Control(ControlError::InvalidLineStart(Token::Bool(true)))
    );
    assert_eq!(err.line, 2);
}

#[test]
fn body_cannot_jump_two_levels() {
    let indent = " ".repeat(INDENT_WIDTH * 2);
    let err = runtime_error(&format!("while 1\n{indent}x = 1\n"));

    assert_eq!(
        err.kind,
        RuntimeErrorKind::Control(ControlError::IndentationError {
            expected: 1,
            found: 2
        })
    );
    assert_eq!(err.line, 2);
}

#[test]
fn parse_errors_surface_while_running() {
    let (_, result) = run("x = 1\nprint (x + 1\n");

    match result {
        Err(InterpreterError::ParseError(err)) => assert_eq!(err.line, 2),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn stepping_one_line_at_a_time() {
    let mut runtime = Runtime::init(Program::default());
    runtime.save_output();
    runtime.load_inline("x = 2\n\nprint x * x").unwrap();

    assert!(runtime.is_running());
    assert_eq!(runtime.step().unwrap(), ExitCode::Yield);
    assert_eq!(runtime.step().unwrap(), ExitCode::Yield);
    assert_eq!(runtime.step().unwrap(), ExitCode::Print("4".to_string()));
    assert!(!runtime.is_running());
    assert_eq!(runtime.step().unwrap(), ExitCode::Exit);
    assert_eq!(runtime.take_saved_output().unwrap(), "4\n");
}

#[test]
fn variables_persist_across_loads() {
    let mut runtime = Runtime::init(Program::default());
    runtime.save_output();

    run_script(&mut runtime, "x = 41").unwrap();
    run_script(&mut runtime, "x = x + 1\nprint x").unwrap();

    assert_eq!(runtime.take_saved_output().unwrap(), "42\n");
    assert_eq!(
        runtime.variables().bindings(),
        vec![("x", Value::Int(42))]
    );
}

#[test]
fn dump_lists_bindings_in_name_order() {
    let (mut runtime, result) = run("zeta = 2\nalpha = zeta > 1\nmid = -3\n");

    result.unwrap();
    runtime.dump_variables().unwrap();

    assert_eq!(
        runtime.take_saved_output().unwrap(),
        "alpha = True\nmid = -3\nzeta = 2\n"
    );
}

#[test]
fn empty_program_halts_immediately() {
    let (runtime, result) = run("");

    result.unwrap();
    assert!(runtime.variables().is_empty());
}

#[test]
fn trace_records_each_statement() {
    let trace = std::env::temp_dir().join("tablang_trace_records_each_statement.log");
    let mut runtime = Runtime::init(Program::default());
    runtime.save_output();
    runtime.set_trace(Box::new(File::create(&trace).unwrap()));

    run_script(&mut runtime, "x = 0\nwhile x < 1\n    x = x + 1\n").unwrap();
    drop(runtime);

    let records = std::fs::read_to_string(&trace).unwrap();
    let lines: Vec<&str> = records.lines().collect();

    assert_eq!(lines.first(), Some(&"[step] indent=0 loops=0    1 | x = 0"));
    assert!(lines.contains(&"[step] end of program, closing loop at line 2 (body indent 1)"));
    assert_eq!(lines.last(), Some(&"[step] halted"));
}
