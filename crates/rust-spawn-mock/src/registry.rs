//! The expectation registry.
//!
//! Expectations are kept in declaration order, which is also match priority:
//! when several could match a command, the first one declared wins.

use std::sync::Arc;

use crate::Command;
use crate::expectation::Expectation;
use crate::pattern::CommandPattern;

/// A registered expectation and how often it has matched.
#[derive(Debug)]
struct Entry {
    pattern: CommandPattern,
    expectation: Arc<Expectation>,
    invoke_count: usize,
}

/// Snapshot of one registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectationSummary {
    /// Position in declaration order.
    pub index: usize,
    /// The declared pattern.
    pub pattern: Command,
    /// How many processes have been spawned from it.
    pub invoke_count: usize,
    /// One-line description.
    pub description: String,
}

/// Ordered collection of expectations.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an expectation. Returns its index.
    pub fn push(&mut self, expectation: Expectation) -> usize {
        let pattern = CommandPattern::new(expectation.pattern().clone());
        self.entries.push(Entry {
            pattern,
            expectation: Arc::new(expectation),
            invoke_count: 0,
        });
        self.entries.len() - 1
    }

    /// Number of expectations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the first expectation matching `command`, without counting it.
    #[must_use]
    pub fn find(&self, command: &Command) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.pattern.matches(command))
    }

    /// Match `command` and count the invocation.
    ///
    /// Returns the index and the matched expectation. The counter moves exactly
    /// once per successful call.
    pub fn consume(&mut self, command: &Command) -> Option<(usize, Arc<Expectation>)> {
        let index = self.find(command)?;
        let entry = &mut self.entries[index];
        entry.invoke_count += 1;
        Some((index, Arc::clone(&entry.expectation)))
    }

    /// How often the expectation at `index` has matched.
    #[must_use]
    pub fn invoke_count(&self, index: usize) -> Option<usize> {
        self.entries.get(index).map(|entry| entry.invoke_count)
    }

    /// The first expectation that has never matched.
    #[must_use]
    pub fn first_unused(&self) -> Option<(usize, &Expectation)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.invoke_count == 0)
            .map(|(i, entry)| (i, entry.expectation.as_ref()))
    }

    /// Snapshot every entry.
    #[must_use]
    pub fn summaries(&self) -> Vec<ExpectationSummary> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| ExpectationSummary {
                index,
                pattern: entry.expectation.pattern().clone(),
                invoke_count: entry.invoke_count,
                description: entry.expectation.to_string(),
            })
            .collect()
    }

    /// One line per expectation, at most `limit` of them, plus how many were left out.
    #[must_use]
    pub fn describe(&self, limit: usize) -> (Vec<String>, usize) {
        let lines = self
            .entries
            .iter()
            .take(limit)
            .map(|entry| format!("{} (invoked {} times)", entry.expectation, entry.invoke_count))
            .collect();
        (lines, self.entries.len().saturating_sub(limit))
    }
}
