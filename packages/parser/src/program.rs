use serde::{Deserialize, Serialize};
use std::fmt;

/// Which abstract structure the file benchmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureKind {
    Vector,
    Map,
}

/// One benchmarkable backing implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Implementation {
    Avl,
    Rrb,
    Finger,
}

/// The set of implementations a run should cover.
///
/// Flags accumulate across the `[implem]` section and are never cleared
/// by later lines, so duplicates are harmless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationSet {
    avl: bool,
    rrb: bool,
    finger: bool,
}

impl ImplementationSet {
    pub fn insert(&mut self, implementation: Implementation) {
        match implementation {
            Implementation::Avl => self.avl = true,
            Implementation::Rrb => self.rrb = true,
            Implementation::Finger => self.finger = true,
        }
    }

    pub fn contains(&self, implementation: Implementation) -> bool {
        match implementation {
            Implementation::Avl => self.avl,
            Implementation::Rrb => self.rrb,
            Implementation::Finger => self.finger,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.avl || self.rrb || self.finger)
    }

    /// Enabled flags in fixed AVL, RRB, FINGER order
    pub fn iter(&self) -> impl Iterator<Item = Implementation> {
        let flags = [
            (Implementation::Avl, self.avl),
            (Implementation::Rrb, self.rrb),
            (Implementation::Finger, self.finger),
        ];
        flags
            .into_iter()
            .filter_map(|(flag, enabled)| enabled.then_some(flag))
    }
}

/// Declared type of element values, and of map keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    Int,
    Text,
}

/// A literal argument, tagged with the type it was read under.
///
/// The tag travels with the value so a literal can never be
/// reinterpreted after the fact under a different declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Text(String),
}

/// One operation from a command section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Operation {
    /// Instantiate a new empty structure
    Create,
    /// Release a structure
    Unref { handle: String },
    /// Replace the element at an index
    Update {
        handle: String,
        index: i64,
        value: Value,
    },
    /// Append an element
    Push { handle: String, value: Value },
    /// Remove the last element
    Pop { handle: String },
    /// Read the element at an index
    Lookup { handle: String, index: i64 },
    /// Combine two structures into one
    Merge { left: String, right: String },
    /// Cut a structure at an index into two named outputs
    Split {
        handle: String,
        index: i64,
        first_out: String,
        second_out: String,
    },
    /// Query the element count
    Size { handle: String },
    /// Print the contents, for debugging a run
    Dump { handle: String },
}

/// A command together with its optional `name = ...` output binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub output: Option<String>,
    pub operation: Operation,
}

/// A fully parsed benchmark description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub structure: Option<StructureKind>,
    pub implementations: ImplementationSet,
    pub element_type: Option<ValueType>,
    pub key_type: Option<ValueType>,
    pub init_commands: Vec<Command>,
    pub bench_commands: Vec<Command>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// A program with command storage pre-sized from the section scan
    pub fn with_capacity(init: usize, bench: usize) -> Self {
        Self {
            init_commands: Vec::with_capacity(init),
            bench_commands: Vec::with_capacity(bench),
            ..Self::default()
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureKind::Vector => write!(f, "vector"),
            StructureKind::Map => write!(f, "map"),
        }
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Implementation::Avl => write!(f, "AVL"),
            Implementation::Rrb => write!(f, "RRB"),
            Implementation::Finger => write!(f, "FINGER"),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Int => write!(f, "int"),
            ValueType::Text => write!(f, "string"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Text(text) => write!(f, "{}", text),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create()"),
            Operation::Unref { handle } => write!(f, "unref({})", handle),
            Operation::Update {
                handle,
                index,
                value,
            } => write!(f, "update({}, {}, {})", handle, index, value),
            Operation::Push { handle, value } => write!(f, "push({}, {})", handle, value),
            Operation::Pop { handle } => write!(f, "pop({})", handle),
            Operation::Lookup { handle, index } => write!(f, "lookup({}, {})", handle, index),
            Operation::Merge { left, right } => write!(f, "merge({}, {})", left, right),
            Operation::Split {
                handle,
                index,
                first_out,
                second_out,
            } => write!(
                f,
                "split({}, {}, {}, {})",
                handle, index, first_out, second_out
            ),
            Operation::Size { handle } => write!(f, "size({})", handle),
            Operation::Dump { handle } => write!(f, "dump({})", handle),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(output) = &self.output {
            write!(f, "{} = ", output)?;
        }
        write!(f, "{}", self.operation)
    }
}
