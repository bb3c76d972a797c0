//! PuppetDB AST query expressions
//!
//! Queries are kept as a typed tree and only rendered to the wire form
//! (`["=", "report", "<hash>"]`) on demand, so a scope built by one value
//! type can be combined with further predicates by the caller.

use std::fmt;
use std::io;

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// Comparison operators of the PuppetDB query language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    Match,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Null,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::Match => "~",
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::Null => "null?",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A query expression
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// `[op, field, value]`
    Binary {
        op: Operator,
        field: String,
        value: Value,
    },
    /// `["in", field, ["array", values...]]`
    In { field: String, values: Vec<Value> },
    And(Vec<Query>),
    Or(Vec<Query>),
    Not(Box<Query>),
}

impl Query {
    fn binary(op: Operator, field: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::Binary {
            op,
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::binary(Operator::Equal, field, value)
    }

    pub fn matches(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::binary(Operator::Match, field, Value::String(pattern.into()))
    }

    pub fn less_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::binary(Operator::Less, field, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::binary(Operator::LessOrEqual, field, value)
    }

    pub fn greater_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::binary(Operator::Greater, field, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::binary(Operator::GreaterOrEqual, field, value)
    }

    pub fn is_null(field: impl Into<String>, is_null: bool) -> Self {
        Self::binary(Operator::Null, field, is_null)
    }

    pub fn in_values<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Query::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn negate(query: Query) -> Self {
        Query::Not(Box::new(query))
    }

    /// Conjoin another predicate, flattening into an existing `and`
    pub fn and_also(self, other: Query) -> Self {
        match self {
            Query::And(mut conditions) => {
                conditions.push(other);
                Query::And(conditions)
            }
            query => Query::And(vec![query, other]),
        }
    }

    /// The PuppetDB AST as a JSON value
    pub fn to_value(&self) -> Value {
        match self {
            Query::Binary { op, field, value } => json!([op.as_str(), field, value]),
            Query::In { field, values } => {
                let mut array = Vec::with_capacity(values.len() + 1);
                array.push(Value::from("array"));
                array.extend(values.iter().cloned());
                json!(["in", field, array])
            }
            Query::And(conditions) => Self::compound("and", conditions),
            Query::Or(conditions) => Self::compound("or", conditions),
            Query::Not(inner) => json!(["not", inner.to_value()]),
        }
    }

    fn compound(op: &str, conditions: &[Query]) -> Value {
        let mut array = Vec::with_capacity(conditions.len() + 1);
        array.push(Value::from(op));
        array.extend(conditions.iter().map(Query::to_value));
        Value::Array(array)
    }

    /// Wire form without whitespace, as sent to PuppetDB
    pub fn to_compact_json(&self) -> String {
        self.to_value().to_string()
    }

    /// URL-encoded `query=` parameter
    pub fn to_query_param(&self) -> String {
        format!("query={}", urlencoding::encode(&self.to_compact_json()))
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Separates array items and object entries with `", "` and `": "`
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        self.to_value().serialize(&mut ser).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

/// Builder for AST queries
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    conditions: Vec<Query>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition: ["=", field, value]
    pub fn equals(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Query::equals(field, value));
        self
    }

    /// Add a regex match condition: ["~", field, pattern]
    pub fn matches(mut self, field: &str, pattern: &str) -> Self {
        self.conditions.push(Query::matches(field, pattern));
        self
    }

    pub fn greater_than(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Query::greater_than(field, value));
        self
    }

    pub fn less_than(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Query::less_than(field, value));
        self
    }

    pub fn gte(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Query::gte(field, value));
        self
    }

    pub fn lte(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Query::lte(field, value));
        self
    }

    /// Add a null check: ["null?", field, true/false]
    pub fn is_null(mut self, field: &str, is_null: bool) -> Self {
        self.conditions.push(Query::is_null(field, is_null));
        self
    }

    /// Add an IN condition: ["in", field, ["array", values...]]
    pub fn in_array(mut self, field: &str, values: &[&str]) -> Self {
        self.conditions
            .push(Query::in_values(field, values.iter().copied()));
        self
    }

    /// Negate a whole sub-builder: ["not", query]
    pub fn not(mut self, subquery: QueryBuilder) -> Self {
        if let Some(q) = subquery.build() {
            self.conditions.push(Query::negate(q));
        }
        self
    }

    /// Add an already-built condition, e.g. a report's scope
    pub fn condition(mut self, query: Query) -> Self {
        self.conditions.push(query);
        self
    }

    pub fn build(&self) -> Option<Query> {
        match self.conditions.len() {
            0 => None,
            1 => Some(self.conditions[0].clone()),
            _ => Some(Query::And(self.conditions.clone())),
        }
    }
}
