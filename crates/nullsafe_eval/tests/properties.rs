//! Property-based tests for short-circuiting and failure propagation.
//!
//! Each generated chain starts at `0` and every step either adds one,
//! yields absence, or fails. Steps record themselves when they run, so the
//! tests can check exactly which part of the chain executed.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]
#![allow(
    clippy::needless_pass_by_value,
    reason = "Proptest macros generate code with these patterns"
)]

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::DivideByZero;
use nullsafe_eval::{ChainBuilder, Evaluator, Value};
use proptest::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Behavior {
    Increment,
    Absent,
    Fail,
}

fn behavior_strategy() -> impl Strategy<Value = Behavior> {
    prop_oneof![
        6 => Just(Behavior::Increment),
        2 => Just(Behavior::Absent),
        1 => Just(Behavior::Fail),
    ]
}

/// Build the chain and return the log its steps write their index into.
fn build(behaviors: &[Behavior]) -> (nullsafe_eval::Chain, Rc<RefCell<Vec<usize>>>) {
    let ran: Rc<RefCell<Vec<usize>>> = Rc::default();
    let mut builder = ChainBuilder::constant(0_i64);
    for (index, behavior) in behaviors.iter().copied().enumerate() {
        let ran = Rc::clone(&ran);
        builder = builder.call("step", [], move |v: &Value, _: &[Option<Value>]| {
            ran.borrow_mut().push(index);
            match behavior {
                Behavior::Increment => Ok(v.as_int().map(|n| n + 1)),
                Behavior::Absent => Ok(None),
                Behavior::Fail => Err(DivideByZero),
            }
        });
    }
    (builder.build(), ran)
}

proptest! {
    #[test]
    fn absence_and_failure_stop_the_chain(
        behaviors in prop::collection::vec(behavior_strategy(), 0..40),
        default in any::<i64>(),
    ) {
        let (chain, ran) = build(&behaviors);
        let result = Evaluator::new().or_default(&chain, default);

        let stop = behaviors.iter().position(|b| *b != Behavior::Increment);
        match stop {
            None => {
                prop_assert_eq!(result.unwrap(), i64::try_from(behaviors.len()).unwrap());
            }
            Some(index) if behaviors[index] == Behavior::Absent => {
                prop_assert_eq!(result.unwrap(), default);
            }
            Some(_) => {
                let err = result.unwrap_err();
                prop_assert!(err.raised_ref::<DivideByZero>().is_some());
            }
        }

        // Steps run in order, and nothing after the stopping step runs.
        let expected: Vec<usize> = match stop {
            None => (0..behaviors.len()).collect(),
            Some(index) => (0..=index).collect(),
        };
        prop_assert_eq!(ran.borrow().clone(), expected);
    }

    #[test]
    fn untyped_and_typed_results_agree(
        behaviors in prop::collection::vec(
            prop_oneof![Just(Behavior::Increment), Just(Behavior::Absent)],
            1..20,
        ),
    ) {
        let (chain, _) = build(&behaviors);
        let evaluator = Evaluator::new();
        let untyped = evaluator.evaluate(&chain).unwrap();
        let typed = evaluator.or_zero::<Option<i64>>(&chain).unwrap();
        prop_assert_eq!(untyped.and_then(|v| v.as_int()), typed);
    }
}
