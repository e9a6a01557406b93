//! Deciding whether a `Condition="..."` attribute applies to the build
//! variant being converted.
//!
//! Three strategies are available through [`ConditionMatcher`]:
//!
//! - **marker**: the condition merely has to contain a fixed word such as
//!   `Release` anywhere in its text;
//! - **identity**: the condition has to contain the canonical
//!   `Build|Platform` string of a [`ConfigurationIdentity`];
//! - **evaluated**: the condition is parsed as an MSBuild expression and
//!   evaluated with `$(Configuration)` / `$(Platform)` bound to the
//!   identity, e.g.
//!   `'$(Configuration)|$(Platform)'=='Release|x64'`.
//!
//! The expression grammar is implemented with [`chumsky`]
//! (case-insensitive keywords):
//!
//! ```text
//! expr       = or_expr
//! or_expr    = and_expr ('or' and_expr)*
//! and_expr   = atom ('and' atom)*
//! atom       = comparison | exists | '(' expr ')'
//! comparison = quoted ('==' | '!=') quoted
//! exists     = 'Exists' '(' quoted ')'
//! quoted     = "'" chars "'"
//! ```

use chumsky::prelude::*;
use std::collections::HashMap;

use crate::config::{ConfigurationIdentity, ConfigurationRecord};
use crate::error::Error;

/// Marker used when no configuration is selected explicitly.
pub const DEFAULT_MARKER: &str = "Release";

// ═══════════════════════════════════════════════════════════════════════════════
//  Matcher
// ═══════════════════════════════════════════════════════════════════════════════

/// Strategy for deciding whether a conditioned group is in scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionMatcher {
    /// Condition text contains the marker substring.
    Marker(String),
    /// Condition text contains the identity's canonical `Build|Platform` form.
    Identity(ConfigurationIdentity),
    /// Condition is parsed and evaluated against the identity. Falls back
    /// to the substring rule of [`ConditionMatcher::Identity`] when the
    /// expression cannot be parsed.
    Evaluated(ConfigurationIdentity),
}

impl Default for ConditionMatcher {
    fn default() -> Self {
        Self::Marker(DEFAULT_MARKER.to_string())
    }
}

impl ConditionMatcher {
    /// Does `condition` select this matcher's build variant?
    pub fn matches(&self, condition: &str) -> bool {
        match self {
            Self::Marker(marker) => contains_marker(condition, marker),
            Self::Identity(identity) => contains_identity(condition, identity),
            Self::Evaluated(identity) => match parse_condition(condition) {
                Ok(expr) => evaluate(&expr, &identity_variables(identity)),
                Err(err) => {
                    tracing::debug!("{err}; falling back to substring match");
                    contains_identity(condition, identity)
                }
            },
        }
    }

    /// Decide whether an element carrying the optional `condition` applies.
    ///
    /// Unconditioned elements apply unless `required` is set, in which case
    /// a condition is what selects the element in the first place.
    pub fn applies(&self, condition: Option<&str>, required: bool) -> bool {
        match condition {
            Some(condition) => self.matches(condition),
            None => !required,
        }
    }
}

/// `true` when `marker` occurs anywhere in `condition`, including at
/// offset 0.
pub fn contains_marker(condition: &str, marker: &str) -> bool {
    condition.find(marker).is_some()
}

/// `true` when the canonical `Build|Platform` form occurs in `condition`.
pub fn contains_identity(condition: &str, identity: &ConfigurationIdentity) -> bool {
    contains_marker(condition, &identity.canonical())
}

/// First record whose identity is named by `condition`.
///
/// An empty record set never matches.
pub fn find_record<'a>(
    records: &'a mut [ConfigurationRecord],
    condition: &str,
) -> Option<&'a mut ConfigurationRecord> {
    records
        .iter_mut()
        .find(|record| contains_identity(condition, &record.identity))
}

fn identity_variables(identity: &ConfigurationIdentity) -> HashMap<String, String> {
    HashMap::from([
        ("Configuration".to_string(), identity.build_type().to_string()),
        ("Platform".to_string(), identity.platform().to_string()),
    ])
}

// ═══════════════════════════════════════════════════════════════════════════════
//  AST
// ═══════════════════════════════════════════════════════════════════════════════

/// A parsed MSBuild condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `'lhs' == 'rhs'` or `'lhs' != 'rhs'`.
    Compare {
        lhs: Vec<Fragment>,
        op: CompareOp,
        rhs: Vec<Fragment>,
    },
    /// `Exists('path')`. No filesystem access is done; always `true`.
    Exists(Vec<Fragment>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equal,
    NotEqual,
}

/// Piece of a quoted operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    /// `$(Name)` property reference.
    Property(String),
}

/// Split the text between single quotes into literal text and `$(Name)`
/// references.
fn split_fragments(s: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut text = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'(') {
            if !text.is_empty() {
                fragments.push(Fragment::Text(std::mem::take(&mut text)));
            }
            chars.next();
            let name: String = chars.by_ref().take_while(|&ch| ch != ')').collect();
            fragments.push(Fragment::Property(name));
        } else {
            text.push(c);
        }
    }

    if !text.is_empty() {
        fragments.push(Fragment::Text(text));
    }

    fragments
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Parser
// ═══════════════════════════════════════════════════════════════════════════════

fn expr_parser<'a>() -> impl Parser<'a, &'a str, Expr, extra::Err<Simple<'a, char>>> {
    recursive(|expr| {
        let quoted = just('\'')
            .ignore_then(none_of('\'').repeated().to_slice())
            .then_ignore(just('\''))
            .map(split_fragments);

        let op = just("==")
            .to(CompareOp::Equal)
            .or(just("!=").to(CompareOp::NotEqual));

        let comparison = quoted
            .padded()
            .then(op.padded())
            .then(quoted.padded())
            .map(|((lhs, op), rhs)| Expr::Compare { lhs, op, rhs });

        let word = any()
            .filter(|c: &char| c.is_ascii_alphabetic())
            .repeated()
            .at_least(1)
            .to_slice();

        let exists = word
            .filter(|s: &&str| s.eq_ignore_ascii_case("exists"))
            .ignore_then(just('(').padded())
            .ignore_then(quoted)
            .then_ignore(just(')').padded())
            .map(Expr::Exists);

        let group = expr.delimited_by(just('(').padded(), just(')').padded());

        let atom = choice((comparison, exists, group)).padded();

        let and_kw = word
            .filter(|s: &&str| s.eq_ignore_ascii_case("and"))
            .padded();
        let conjunction = atom.clone().foldl(
            and_kw.ignore_then(atom).repeated(),
            |lhs, rhs| Expr::And(Box::new(lhs), Box::new(rhs)),
        );

        let or_kw = word
            .filter(|s: &&str| s.eq_ignore_ascii_case("or"))
            .padded();
        conjunction.clone().foldl(
            or_kw.ignore_then(conjunction).repeated(),
            |lhs, rhs| Expr::Or(Box::new(lhs), Box::new(rhs)),
        )
    })
}

/// Parse a `Condition` attribute value.
pub fn parse_condition(input: &str) -> Result<Expr, Error> {
    expr_parser().parse(input).into_result().map_err(|errs| {
        let messages: Vec<String> = errs.iter().map(|e| format!("{e}")).collect();
        Error::Condition(format!(
            "Failed to parse condition '{}': {}",
            input,
            messages.join("; ")
        ))
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Evaluation
// ═══════════════════════════════════════════════════════════════════════════════

/// Property names are case-insensitive in MSBuild; unknown ones expand to
/// the empty string.
fn lookup<'v>(vars: &'v HashMap<String, String>, name: &str) -> &'v str {
    vars.get(name)
        .or_else(|| {
            vars.iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .map(String::as_str)
        .unwrap_or("")
}

fn expand(fragments: &[Fragment], vars: &HashMap<String, String>) -> String {
    fragments
        .iter()
        .map(|fragment| match fragment {
            Fragment::Text(s) => s.as_str(),
            Fragment::Property(name) => lookup(vars, name),
        })
        .collect()
}

/// Evaluate `expr` with the given property bindings. String comparison
/// ignores ASCII case, as MSBuild does.
pub fn evaluate(expr: &Expr, vars: &HashMap<String, String>) -> bool {
    match expr {
        Expr::Compare { lhs, op, rhs } => {
            let equal = expand(lhs, vars).eq_ignore_ascii_case(&expand(rhs, vars));
            match op {
                CompareOp::Equal => equal,
                CompareOp::NotEqual => !equal,
            }
        }
        Expr::Exists(_) => true,
        Expr::And(a, b) => evaluate(a, vars) && evaluate(b, vars),
        Expr::Or(a, b) => evaluate(a, vars) || evaluate(b, vars),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════════
