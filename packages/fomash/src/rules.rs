//! Rule data types, loading, and cooking.
//!
//! Raw rules are lines of text as written by the user. Cooking turns them into
//! [`ConcreteRule`]s, the exact strings handed to the rewriter with `-r`:
//! comments and blank lines disappear, plain rules pass through, and
//! ellipsised rules expand into one rule per arity (see [`Template`]).

use std::num::ParseIntError;
use std::str::FromStr;

use derive_more::{AsRef, Display, Error};

pub use cook::{cook, cook_all};
pub use source::load_raw;
pub use template::Template;

mod cook;
mod source;
mod template;

/// A fully expanded rule, ready to be passed to the rewriter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, AsRef)]
#[as_ref(forward)]
pub struct ConcreteRule(String);

impl ConcreteRule {
    /// View the rule text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Upper bound on the number of variables an ellipsised rule expands to.
///
/// Values above [`MaxExpansion::LIMIT`] are clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub struct MaxExpansion(u8);

impl MaxExpansion {
    /// Largest accepted expansion: the rest of the lowercase alphabet after `a`.
    pub const LIMIT: u8 = 25;

    /// Expansion used when none is configured.
    pub const DEFAULT: Self = Self(7);

    /// Create a bound, clamping it to [`MaxExpansion::LIMIT`].
    pub fn new(max: usize) -> Self {
        Self(max.min(usize::from(Self::LIMIT)) as u8)
    }

    /// The bound as a number of variables.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<String> for ConcreteRule {
    fn from(rule: String) -> Self {
        Self(rule)
    }
}

impl From<&str> for ConcreteRule {
    fn from(rule: &str) -> Self {
        Self(rule.to_string())
    }
}

impl Default for MaxExpansion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for MaxExpansion {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<usize>().map(Self::new)
    }
}

/// A rule that cannot be cooked.
///
/// These are configuration errors: the rule set is invalid and no rule should
/// be run, since a malformed template could rewrite code incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CookError {
    /// The two ellipsised characters differ, e.g. `f(a…) -> g(b…)`.
    #[display("bad rule {rule:?}: ellipsised character should be the same on both sides ({left:?} vs {right:?})")]
    AnchorMismatch {
        rule: String,
        left: char,
        right: char,
    },

    /// The ellipsised character is not a lowercase ASCII letter.
    #[display("bad rule {rule:?}: ellipsised character {anchor:?} should be in [a-z]")]
    AnchorOutOfRange { rule: String, anchor: char },
}
