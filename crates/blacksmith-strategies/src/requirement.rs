//! Dependency version requirements
//!
//! A requirement is one or two comparison clauses such as `>= 1.0.0 < 2.0.0`.
//! Parsing keeps the exact source text of every clause and the whitespace
//! around them, so an untouched requirement renders back byte-for-byte and an
//! edited one only changes the clause that was rewritten.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use blacksmith_core::error::VersionError;

use crate::types::VersionComponents;

static CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<op>>=|<=|>|<|=)(?P<gap>\s*)(?P<version>[^\s<>=]+)")
        .expect("clause regex is valid")
});

/// Comparison operator of a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `>=`
    GreaterEq,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `=`
    Exact,
}

impl Operator {
    /// Returns the operator as written in a manifest
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GreaterEq => ">=",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Exact => "=",
        }
    }

    /// `>=` and `>`
    pub fn is_lower_bound(&self) -> bool {
        matches!(self, Self::GreaterEq | Self::Greater)
    }

    /// `<=` and `<`
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, Self::LessEq | Self::Less)
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            ">=" => Some(Self::GreaterEq),
            "<=" => Some(Self::LessEq),
            ">" => Some(Self::Greater),
            "<" => Some(Self::Less),
            "=" => Some(Self::Exact),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `<operator><gap><version>` clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    operator: Operator,
    /// Whitespace between operator and version, kept on rewrite
    gap: String,
    version: VersionComponents,
    /// Original text; `None` once the clause has been edited
    source: Option<String>,
}

impl Clause {
    /// Create a clause with no space between operator and version
    pub fn new(operator: Operator, version: VersionComponents) -> Self {
        Self {
            operator,
            gap: String::new(),
            version,
            source: None,
        }
    }

    /// The clause operator
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The clause version
    pub fn version(&self) -> &VersionComponents {
        &self.version
    }

    fn rewrite(&mut self, operator: Operator, version: VersionComponents) {
        self.operator = operator;
        self.version = version;
        self.source = None;
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => f.write_str(source),
            None => write!(f, "{}{}{}", self.operator, self.gap, self.version),
        }
    }
}

/// Structural view of a dependency's version requirement string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRequirement {
    leading: String,
    clauses: Vec<Clause>,
    /// Whitespace between consecutive clauses
    separators: Vec<String>,
    trailing: String,
}

impl VersionRequirement {
    /// Parse a requirement such as `>=1.0.0 <2.0.0`
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let invalid = |reason: String| VersionError::InvalidRequirement {
            requirement: input.to_string(),
            reason,
        };

        let (leading, mut rest) = split_whitespace_prefix(input);
        if rest.is_empty() {
            return Err(invalid("requirement is empty".to_string()));
        }

        let mut clauses = Vec::new();
        let mut separators = Vec::new();
        let trailing;

        loop {
            let captures = CLAUSE_REGEX.captures(rest).ok_or_else(|| {
                invalid(format!(
                    "expected an operator (>=, <=, >, <, =) followed by a version at '{}'",
                    rest
                ))
            })?;

            let whole = captures.get(0).map_or("", |m| m.as_str());
            let op = captures.name("op").map_or("", |m| m.as_str());
            let gap = captures.name("gap").map_or("", |m| m.as_str());
            let version = captures.name("version").map_or("", |m| m.as_str());

            let operator = Operator::parse(op)
                .ok_or_else(|| invalid(format!("unknown operator '{}'", op)))?;
            let version = version.parse::<VersionComponents>().map_err(|_| {
                invalid(format!("'{}' is not a MAJOR.MINOR.PATCH version", version))
            })?;

            clauses.push(Clause {
                operator,
                gap: gap.to_string(),
                version,
                source: Some(whole.to_string()),
            });

            let (ws, after) = split_whitespace_prefix(&rest[whole.len()..]);
            if after.is_empty() {
                trailing = ws.to_string();
                break;
            }
            if ws.is_empty() {
                return Err(invalid("clauses must be separated by whitespace".to_string()));
            }
            separators.push(ws.to_string());
            rest = after;
        }

        let requirement = Self {
            leading: leading.to_string(),
            clauses,
            separators,
            trailing,
        };
        requirement.validate().map_err(invalid)?;
        Ok(requirement)
    }

    /// A requirement with a single `>=min` clause
    pub fn minimum(min: VersionComponents) -> Self {
        Self {
            leading: String::new(),
            clauses: vec![Clause::new(Operator::GreaterEq, min)],
            separators: Vec::new(),
            trailing: String::new(),
        }
    }

    /// All clauses in source order
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// The `>=`/`>` clause, if any
    pub fn lower_bound(&self) -> Option<&Clause> {
        self.clauses.iter().find(|c| c.operator.is_lower_bound())
    }

    /// The `<`/`<=` clause, if any
    pub fn upper_bound(&self) -> Option<&Clause> {
        self.clauses.iter().find(|c| c.operator.is_upper_bound())
    }

    /// Rewrite the lower bound to `>=min`, leaving any upper bound untouched
    ///
    /// A missing lower bound is prepended. An exact pin (`=x`) turns into the
    /// new lower bound.
    pub fn set_minimum(&self, min: &VersionComponents) -> Self {
        let mut next = self.clone();

        let lower = next
            .clauses
            .iter_mut()
            .find(|c| c.operator.is_lower_bound() || c.operator == Operator::Exact);

        match lower {
            Some(clause) => clause.rewrite(Operator::GreaterEq, min.clone()),
            None => {
                let gap = next.clauses.first().map(|c| c.gap.clone()).unwrap_or_default();
                let clause = Clause {
                    operator: Operator::GreaterEq,
                    gap,
                    version: min.clone(),
                    source: None,
                };
                next.clauses.insert(0, clause);
                if next.clauses.len() > 1 {
                    next.separators.insert(0, " ".to_string());
                }
            }
        }

        if let Some(upper) = next.upper_bound() {
            let crosses = match upper.operator {
                Operator::Less => min.semver_cmp(&upper.version).is_ge(),
                _ => min.semver_cmp(&upper.version).is_gt(),
            };
            if crosses {
                warn!(
                    minimum = %min,
                    upper = %upper,
                    "new minimum is not below the upper bound; requirement is unsatisfiable"
                );
            }
        }

        debug!(from = %self, to = %next, "rewrote requirement minimum");
        next
    }

    fn validate(&self) -> Result<(), String> {
        if self.clauses.len() > 2 {
            return Err(format!(
                "at most two clauses are supported, found {}",
                self.clauses.len()
            ));
        }

        let lower = self.clauses.iter().filter(|c| c.operator.is_lower_bound()).count();
        let upper = self.clauses.iter().filter(|c| c.operator.is_upper_bound()).count();
        let exact = self.clauses.iter().filter(|c| c.operator == Operator::Exact).count();

        if lower > 1 {
            return Err("more than one lower-bound clause".to_string());
        }
        if upper > 1 {
            return Err("more than one upper-bound clause".to_string());
        }
        if exact > 0 && self.clauses.len() > 1 {
            return Err("an exact version cannot be combined with other clauses".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.leading)?;
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(self.separators.get(i - 1).map_or(" ", String::as_str))?;
            }
            write!(f, "{}", clause)?;
        }
        f.write_str(&self.trailing)
    }
}

impl FromStr for VersionRequirement {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn split_whitespace_prefix(s: &str) -> (&str, &str) {
    let idx = s.find(|c: char| !c.is_whitespace()).unwrap_or(s.len());
    s.split_at(idx)
}
