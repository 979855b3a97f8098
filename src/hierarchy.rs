//! Namespace tree construction.
//!
//! Interfaces arrive with fully-qualified names and are placed at the depth
//! their name implies. Intermediate namespaces are created on first use and
//! keep the order in which they were discovered.

use indexmap::IndexMap;
use tracing::warn;

use crate::ast::{Interface, QualifiedName};

/// A namespace node. Owns its child namespaces and interfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    pub name: QualifiedName,
    /// Child namespaces keyed by local name, in discovery order.
    pub children: IndexMap<String, Namespace>,
    /// Interfaces declared directly in this namespace, in insertion order.
    pub interfaces: Vec<Interface>,
}

/// Outcome of [`Namespace::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The interface was attached to the tree.
    Attached,
    /// The interface was not nested below the namespace and was discarded.
    Dropped,
}

impl Namespace {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            children: IndexMap::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn local_name(&self) -> &str {
        self.name.local_name()
    }

    pub fn depth(&self) -> usize {
        self.name.depth()
    }

    /// Insert an interface at the depth implied by its qualified name.
    ///
    /// Only segment counts are compared, as the vendor data never mixes
    /// roots. Interfaces that are not deeper than this namespace are dropped.
    pub fn insert(&mut self, interface: Interface) -> Insertion {
        let depth = self.depth();
        let target = interface.name.depth();

        if depth + 1 == target {
            self.interfaces.push(interface);
            return Insertion::Attached;
        }

        if depth + 1 > target {
            warn!(
                namespace = %self.name,
                interface = %interface.name,
                "interface is not nested below namespace, dropping it"
            );
            return Insertion::Dropped;
        }

        let segment = interface.name.segments()[depth].clone();
        let parent = &self.name;
        self.children
            .entry(segment)
            .or_insert_with_key(|segment| Namespace::new(parent.child(segment)))
            .insert(interface)
    }

    /// Look up a descendant namespace by relative path.
    pub fn namespace(&self, path: &[&str]) -> Option<&Namespace> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.children.get(*first)?.namespace(rest),
        }
    }

    /// Total number of interfaces in this namespace and all descendants.
    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
            + self
                .children
                .values()
                .map(Namespace::interface_count)
                .sum::<usize>()
    }
}
