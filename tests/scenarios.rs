// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! End-to-end behavior of layered instrumentation.

use std::fmt;

use serde::Deserialize;
use ulog::{
    args, Arguments, ArgsConfig, CallConfig, CallError, ExceptionConfig, Func, Function,
    Instrument, MemoryBackend, ReturnConfig, Severity, Signature, TypedFunc, Ulog, UlogError,
};

#[derive(Debug, Clone, PartialEq)]
enum MathError {
    ZeroDivision { numerator: f64 },
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDivision { numerator } => write!(f, "{numerator} divided by zero"),
        }
    }
}

#[derive(Deserialize)]
struct DivideArgs {
    x: f64,
    y: f64,
}

fn divide_body(args: DivideArgs) -> Result<f64, MathError> {
    if args.y == 0.0 {
        return Err(MathError::ZeroDivision { numerator: args.x });
    }
    Ok(args.x / args.y)
}

fn divide() -> TypedFunc<DivideArgs, fn(DivideArgs) -> Result<f64, MathError>> {
    let sig = Signature::function("divide")
        .param("x")
        .param("y")
        .build()
        .unwrap();
    TypedFunc::new(sig, divide_body as fn(DivideArgs) -> Result<f64, MathError>)
}

fn engine(threshold: Severity) -> (Ulog, MemoryBackend) {
    let backend = MemoryBackend::new();
    (Ulog::new(backend.clone()).with_threshold(threshold), backend)
}

// ============================================================================
// Composition
// ============================================================================

fn fully_logged(ulog: &Ulog) -> impl Function<Output = f64, Error = MathError> {
    divide()
        .log_args(ulog, ArgsConfig::default())
        .unwrap()
        .log_return(ulog, ReturnConfig::default())
        .unwrap()
        .log_exception(ulog, ExceptionConfig::default())
        .unwrap()
}

#[test]
fn test_divide_success_logs_args_then_return() {
    let (ulog, backend) = engine(Severity::Debug);
    let divide = fully_logged(&ulog);

    assert_eq!(divide.invoke(&args![3, 2]).unwrap(), 1.5);

    let messages = backend.messages();
    assert_eq!(messages.len(), 2);
    insta::assert_snapshot!(messages[0].clone(), @r#"
    Call: "divide" called with arguments
    x: 3
    y: 2
    "#);
    insta::assert_snapshot!(messages[1].clone(), @r#"Call: "divide" returned value "1.5""#);
}

#[test]
fn test_divide_by_zero_logs_args_then_exception() {
    let (ulog, backend) = engine(Severity::Debug);
    let divide = fully_logged(&ulog);

    let err = divide.invoke(&args![0, 0]).unwrap_err();
    assert_eq!(err, CallError::Raised(MathError::ZeroDivision { numerator: 0.0 }));

    let records = backend.records();
    assert_eq!(records.len(), 2);
    assert!(records[0].message.starts_with("Call: \"divide\" called with arguments"));
    assert_eq!(records[0].severity, Severity::Debug);
    assert_eq!(
        records[1].message,
        "Call: \"divide\" raised exception of type MathError"
    );
    assert_eq!(records[1].severity, Severity::Error);
    assert!(records[1].include_trace);
}

fn reverse_logged(ulog: &Ulog) -> impl Function<Output = f64, Error = MathError> {
    divide()
        .log_exception(ulog, ExceptionConfig::default().with_template("exception {exception}"))
        .unwrap()
        .log_return(ulog, ReturnConfig::default().with_template("return {return_value}"))
        .unwrap()
        .log_args(ulog, ArgsConfig::default().with_template("args"))
        .unwrap()
}

#[test]
fn test_reverse_order_success() {
    let (ulog, backend) = engine(Severity::Debug);
    let divide = reverse_logged(&ulog);

    assert_eq!(divide.invoke(&args![3, 2]).unwrap(), 1.5);
    assert_eq!(backend.messages(), vec!["args\nx: 3\ny: 2", "return 1.5"]);
}

#[test]
fn test_reverse_order_failure_passes_through_return_layer() {
    let (ulog, backend) = engine(Severity::Debug);
    let divide = reverse_logged(&ulog);

    let err = divide.invoke(&args![0, 0]).unwrap_err();
    assert_eq!(err, CallError::Raised(MathError::ZeroDivision { numerator: 0.0 }));
    assert_eq!(
        backend.messages(),
        vec!["args\nx: 0\ny: 0", "exception 0 divided by zero"]
    );
    assert_eq!(backend.records()[1].severity, Severity::Error);
}

#[test]
fn test_layer_order_does_not_change_outcome() {
    let (ulog, _) = engine(Severity::Debug);
    let forward = fully_logged(&ulog);
    let reverse = reverse_logged(&ulog);

    for (x, y) in [(3, 2), (0, 0), (-9, 4), (5, 0)] {
        assert_eq!(forward.invoke(&args![x, y]), reverse.invoke(&args![x, y]));
    }
}

#[test]
fn test_default_threshold_only_logs_failures() {
    let backend = MemoryBackend::new();
    let ulog = Ulog::new(backend.clone());
    let divide = fully_logged(&ulog);

    divide.invoke(&args![3, 2]).unwrap();
    assert!(backend.is_empty());

    divide.invoke(&args![1, 0]).unwrap_err();
    assert_eq!(backend.len(), 1);
}

#[test]
fn test_call_layer_composes_with_keywords() {
    let (ulog, backend) = engine(Severity::Debug);
    let divide = divide()
        .log_call(&ulog, CallConfig::default().with_template("{func_name}({x}, {y})"))
        .unwrap()
        .log_return(&ulog, ReturnConfig::default().with_template("= {return_value}"))
        .unwrap();

    assert_eq!(divide.invoke(&args![; y = 4, x = 2]).unwrap(), 0.5);
    assert_eq!(backend.messages(), vec!["divide(2, 4)", "= 0.5"]);
    assert_eq!(divide.signature().name(), "divide");
}

// ============================================================================
// Severity gate
// ============================================================================

#[test]
fn test_gate_below_threshold_emits_nothing() {
    for (i, &threshold) in Severity::ALL.iter().enumerate() {
        for &below in &Severity::ALL[..i] {
            let (ulog, backend) = engine(threshold);
            let f = divide()
                .log_call(&ulog, CallConfig::default().with_severity(below))
                .unwrap();
            f.invoke(&args![1, 1]).unwrap();
            assert!(backend.is_empty(), "{below} emitted at threshold {threshold}");
        }
    }
}

#[test]
fn test_gate_at_or_above_threshold_emits_once() {
    for (i, &threshold) in Severity::ALL.iter().enumerate() {
        for &at_or_above in &Severity::ALL[i..] {
            let (ulog, backend) = engine(threshold);
            let f = divide()
                .log_call(&ulog, CallConfig::default().with_severity(at_or_above))
                .unwrap();
            f.invoke(&args![1, 1]).unwrap();
            assert_eq!(backend.len(), 1, "{at_or_above} at threshold {threshold}");
        }
    }
}

// ============================================================================
// Transparency
// ============================================================================

#[test]
fn test_return_logging_never_changes_value() {
    let (ulog, _backend) = engine(Severity::NotSet);
    let bare = divide();
    let logged = divide().log_return(&ulog, ReturnConfig::default()).unwrap();

    for (x, y) in [(1.0, 3.0), (-8.5, 2.0), (0.0, 7.0), (1e300, 1e-10), (5.0, -0.5)] {
        assert_eq!(logged.invoke(&args![x, y]), bare.invoke(&args![x, y]));
    }
}

#[test]
fn test_exception_logging_preserves_error() {
    let (ulog, backend) = engine(Severity::Error);
    let logged = divide().log_exception(&ulog, ExceptionConfig::default()).unwrap();

    for x in [0.0, 2.5, -3.0] {
        backend.clear();
        let expected = divide().invoke(&args![x, 0]).unwrap_err();
        let actual = logged.invoke(&args![x, 0]).unwrap_err();
        assert_eq!(actual, expected);
        assert_eq!(actual.into_raised(), Some(MathError::ZeroDivision { numerator: x }));
        assert_eq!(backend.len(), 1);
    }
}

// ============================================================================
// Argument resolution
// ============================================================================

type Greet = fn(&Arguments) -> Result<(), String>;

fn greet() -> Func<Greet> {
    let sig = Signature::function("f")
        .param("p1")
        .param_with_default("kw1", "")
        .build()
        .unwrap();
    let body: Greet = |_| Ok(());
    Func::new(sig, body)
}

#[test]
fn test_selected_and_all_parameters() {
    let (ulog, backend) = engine(Severity::Debug);

    let selected = greet()
        .log_args(&ulog, ArgsConfig::default().with_arguments(["p1"]))
        .unwrap();
    selected.invoke(&args!["v1"]).unwrap();
    assert_eq!(backend.messages()[0].matches("p1: v1").count(), 1);

    backend.clear();
    let all = greet().log_args(&ulog, ArgsConfig::default()).unwrap();
    all.invoke(&args!["v1", "v2"]).unwrap();
    let message = backend.messages().remove(0);
    assert!(message.contains("p1: v1"));
    assert!(message.contains("kw1: v2"));
}

#[test]
fn test_unknown_parameter_rejected() {
    let (ulog, _) = engine(Severity::Debug);
    let err = greet()
        .log_args(&ulog, ArgsConfig::default().with_arguments(["p2"]))
        .unwrap_err();
    assert!(err.is_unknown_parameter());
    assert_eq!(err.to_string(), "Unknown argument p2");
}

#[test]
fn test_missing_argument_names_parameter_and_index() {
    let (ulog, backend) = engine(Severity::Debug);
    let f = greet()
        .log_args(&ulog, ArgsConfig::default().with_arguments(["p1"]))
        .unwrap();

    let err = f.invoke(&args![; kw1 = "x"]).unwrap_err();
    assert_eq!(
        err.instrumentation(),
        Some(&UlogError::MissingArgument {
            name: "p1".to_string(),
            index: 0
        })
    );
    assert!(backend.is_empty());
}
