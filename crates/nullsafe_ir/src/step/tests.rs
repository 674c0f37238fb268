#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::ChainBuilder;
use pretty_assertions::assert_eq;

#[test]
fn test_captured_is_root() {
    let chain = ChainBuilder::constant("abc").build();
    let step = chain.step(chain.terminal());
    assert!(step.is_root());
    assert_eq!(step.name(), None);
    assert!(matches!(step.shape(), StepShape::Captured(Some(_))));
}

#[test]
fn test_member_read_shape() {
    let chain = ChainBuilder::constant("abc")
        .property("len", |v: &Value| Some(v.as_str().map_or(0, str::len)))
        .build();
    let step = chain.step(chain.terminal());
    assert_eq!(step.receiver(), Some(StepId::new(0)));
    assert_eq!(step.name().map(Name::as_str), Some("len"));
    match step.shape() {
        StepShape::Read { owner, read } => {
            assert_eq!(owner, StepId::new(0));
            assert_eq!(read(&Value::string("abcd")).unwrap(), Some(Value::Int(4)));
        }
        _ => panic!("expected an instance read"),
    }
}

#[test]
fn test_static_call_shape() {
    let chain = ChainBuilder::static_call(
        "repeat",
        [ArgumentExpr::constant('a'), ArgumentExpr::constant(3_i64)],
        |args| {
            let c = args[0].as_ref().and_then(Value::as_char).unwrap_or(' ');
            let n = args[1].as_ref().and_then(Value::as_int).unwrap_or(0);
            Some(std::iter::repeat(c).take(usize::try_from(n).unwrap_or(0)).collect::<String>())
        },
    )
    .build();
    let step = chain.step(chain.terminal());
    assert!(step.is_root());
    assert_eq!(step.arguments().len(), 2);
    match step.shape() {
        StepShape::StaticCall { invoke, arguments } => {
            assert_eq!(arguments.len(), 2);
            let out = invoke(&[Some(Value::Char('a')), Some(Value::Int(3))]).unwrap();
            assert_eq!(out, Some(Value::string("aaa")));
        }
        _ => panic!("expected a static call"),
    }
}

#[test]
fn test_unsupported_keeps_receiver() {
    let chain = ChainBuilder::null().unsupported("indexer").build();
    let step = chain.step(chain.terminal());
    assert_eq!(step.receiver(), Some(StepId::new(0)));
    assert!(matches!(
        step.shape(),
        StepShape::Unsupported { construct, receiver: Some(_) } if construct.as_str() == "indexer"
    ));
}

#[test]
fn test_into_outcome_conversions() {
    assert_eq!(Some(3_i64).into_outcome().unwrap(), Some(Value::Int(3)));
    assert_eq!(None::<i64>.into_outcome().unwrap(), None);

    let failed: Result<Option<i64>, std::fmt::Error> = Err(std::fmt::Error);
    let raised = failed.into_outcome().unwrap_err();
    assert!(raised.downcast_ref::<std::fmt::Error>().is_some());
}

#[test]
fn test_argument_debug() {
    assert_eq!(format!("{:?}", ArgumentExpr::null()), "Constant(None)");
    assert_eq!(
        format!("{:?}", ArgumentExpr::captured(|| Some(1_i64))),
        "Captured(..)"
    );
}
