//! Canonical compiled pattern form
//!
//! The compiler lowers every pattern into this representation: branches of
//! steps whose consuming matchers are normalized [`CharSet`]s. Because
//! lowering is canonical, structural equality of two programs decides
//! pattern equivalence for the supported feature set - the property the
//! redundant-escape contract is stated in terms of.

use crate::compile::charset::CharSet;
use crate::grammar::escapes::AnchorKind;
use serde::{Deserialize, Serialize};

/// What one step matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Matcher {
    /// One scalar value from a normalized set
    Set(CharSet),
    /// Zero-width assertion
    Assert(AnchorKind),
    /// Compiled subgroup
    Sub(CompiledPattern),
}

/// One quantified step of a branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub matcher: Matcher,
    pub min: u32,
    /// None = unbounded
    pub max: Option<u32>,
}

impl Step {
    pub fn once(matcher: Matcher) -> Self {
        Self {
            matcher,
            min: 1,
            max: Some(1),
        }
    }
}

/// A compiled pattern in canonical form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledPattern {
    /// Alternation branches; each branch is a step sequence
    pub branches: Vec<Vec<Step>>,
    /// ASCII case-insensitivity was applied during lowering; kept so that
    /// `/a/` and `/a/i` stay distinguishable even where folding is a no-op
    pub ignore_case: bool,
}

impl CompiledPattern {
    /// Structural equivalence of canonical forms. Sound and complete for
    /// the supported feature set: lowering normalizes every matcher, so two
    /// patterns accepting the same language compile to the same program.
    pub fn is_equivalent(&self, other: &CompiledPattern) -> bool {
        self == other
    }

    /// Total number of steps, groups included
    pub fn step_count(&self) -> usize {
        self.branches
            .iter()
            .flat_map(|branch| branch.iter())
            .map(|step| match &step.matcher {
                Matcher::Sub(sub) => 1 + sub.step_count(),
                _ => 1,
            })
            .sum()
    }

    /// Total number of scalar spans across all sets, groups included
    pub fn span_count(&self) -> usize {
        self.branches
            .iter()
            .flat_map(|branch| branch.iter())
            .map(|step| match &step.matcher {
                Matcher::Set(set) => set.span_count(),
                Matcher::Assert(_) => 0,
                Matcher::Sub(sub) => sub.span_count(),
            })
            .sum()
    }

    /// Total number of branches, groups included
    pub fn branch_count(&self) -> usize {
        self.branches.len()
            + self
                .branches
                .iter()
                .flat_map(|branch| branch.iter())
                .map(|step| match &step.matcher {
                    Matcher::Sub(sub) => sub.branch_count(),
                    _ => 0,
                })
                .sum::<usize>()
    }
}
