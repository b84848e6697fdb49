//! Symbol-to-label resolution.
//!
//! Labels are for display only. Node identity is always the symbol itself.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Turns a symbol into a human-readable label
pub trait SymbolResolver<S: ?Sized> {
    fn resolve(&self, symbol: &S) -> String;
}

/// Resolver that uses the symbol's `Display` implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayResolver;

impl<S: fmt::Display + ?Sized> SymbolResolver<S> for DisplayResolver {
    fn resolve(&self, symbol: &S) -> String {
        symbol.to_string()
    }
}

impl<S: ?Sized, F: Fn(&S) -> String> SymbolResolver<S> for F {
    fn resolve(&self, symbol: &S) -> String {
        self(symbol)
    }
}

/// Resolver backed by a table of known labels
///
/// Symbols missing from the table fall back to their `Debug` form, which
/// for raw addresses is usually what a symbol provider would show anyway.
#[derive(Debug, Clone)]
pub struct MapResolver<S> {
    labels: HashMap<S, String>,
}

impl<S: Eq + Hash> MapResolver<S> {
    pub fn new() -> Self {
        Self {
            labels: HashMap::new(),
        }
    }

    pub fn with_label(mut self, symbol: S, label: impl Into<String>) -> Self {
        self.labels.insert(symbol, label.into());
        self
    }

    pub fn insert(&mut self, symbol: S, label: impl Into<String>) {
        self.labels.insert(symbol, label.into());
    }
}

impl<S: Eq + Hash> Default for MapResolver<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash + fmt::Debug> SymbolResolver<S> for MapResolver<S> {
    fn resolve(&self, symbol: &S) -> String {
        self.labels
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| format!("{:?}", symbol))
    }
}
