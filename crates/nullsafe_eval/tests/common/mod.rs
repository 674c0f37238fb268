//! Shared fixtures: a small self-referential object graph and the chain
//! steps that navigate it.

#![allow(dead_code, reason = "Not every test binary uses every fixture")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use nullsafe_eval::{ChainBuilder, Raised, Value};

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("attempted to divide by zero")]
pub struct DivideByZero;

/// What a scripted member answers when read or called.
#[derive(Clone, Debug, Default)]
pub enum Answer {
    #[default]
    Absent,
    Returns(&'static str),
    Throws,
}

impl Answer {
    fn resolve(&self) -> Result<Option<String>, DivideByZero> {
        match self {
            Answer::Absent => Ok(None),
            Answer::Returns(text) => Ok(Some((*text).to_string())),
            Answer::Throws => Err(DivideByZero),
        }
    }
}

/// Node with two self-typed members and two string members, one of each
/// exposed as a property and one as a method.
#[derive(Debug, Default)]
pub struct Node {
    pub me_p: Option<Arc<Node>>,
    pub me_m: Option<Arc<Node>>,
    pub value_p: Answer,
    pub value_m: Answer,
    value_m_calls: AtomicUsize,
}

impl Node {
    pub fn value_p(&self) -> Result<Option<String>, DivideByZero> {
        self.value_p.resolve()
    }

    pub fn value_m(&self) -> Result<Option<String>, DivideByZero> {
        self.value_m_calls.fetch_add(1, Ordering::SeqCst);
        self.value_m.resolve()
    }

    pub fn value_m_calls(&self) -> usize {
        self.value_m_calls.load(Ordering::SeqCst)
    }
}

/// Steps that navigate a [`Node`] graph.
pub trait NodeSteps {
    fn me_p(self) -> Self;
    fn me_m(self) -> Self;
    fn value_p(self) -> Self;
    fn value_m(self) -> Self;
}

impl NodeSteps for ChainBuilder {
    fn me_p(self) -> Self {
        self.property("me_p", |v| v.downcast::<Node>().map(|n| n.me_p.clone()))
    }

    fn me_m(self) -> Self {
        self.call("me_m", [], |v, _| v.downcast::<Node>().map(|n| n.me_m.clone()))
    }

    fn value_p(self) -> Self {
        self.property("value_p", |v| -> Result<Option<String>, Raised> {
            Ok(v.downcast::<Node>()?.value_p()?)
        })
    }

    fn value_m(self) -> Self {
        self.call("value_m", [], |v, _| -> Result<Option<String>, Raised> {
            Ok(v.downcast::<Node>()?.value_m()?)
        })
    }
}

/// Start a chain at a captured node.
pub fn root(node: &Arc<Node>) -> ChainBuilder {
    ChainBuilder::captured(Some(Arc::clone(node)))
}

pub fn node_with(configure: impl FnOnce(&mut Node)) -> Arc<Node> {
    let mut node = Node::default();
    configure(&mut node);
    Arc::new(node)
}

pub fn string(text: &str) -> Option<Value> {
    Some(Value::string(text))
}
