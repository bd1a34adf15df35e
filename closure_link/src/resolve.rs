//! Symbol resolution
//!
//! Maps a `SymbolicRef` seen from a requesting scope to exactly one
//! `FunctionDef`. The requesting unit's own definitions are searched first
//! (any visibility), then the public definitions of imported units.
//! Imports are walked breadth-first in declaration order; each unit is
//! visited once, so import cycles terminate and a definition reached along
//! two paths counts once.
//!
//! A name that only exists at other arities is reported as `NoSuchFunction`.
//! More than one distinct match is always `AmbiguousFunction`, except that
//! `ShadowPolicy::LocalFirst` lets a single local match hide imports.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crate::config::{LinkerConfig, ShadowPolicy};
use crate::error::{LinkError, LinkResult};
use crate::reference::SymbolicRef;
use crate::space::{CompilationUnit, FunctionDef, FunctionSpace};

#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    space: &'a FunctionSpace,
    config: &'a LinkerConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(space: &'a FunctionSpace, config: &'a LinkerConfig) -> Self {
        Self { space, config }
    }

    pub fn resolve(&self, reference: &SymbolicRef, scope: &str) -> LinkResult<Arc<FunctionDef>> {
        let unit = self
            .space
            .unit(scope)
            .ok_or_else(|| LinkError::UnknownScope {
                scope: scope.to_string(),
            })?;

        let mut candidates: Vec<Arc<FunctionDef>> = unit.matching(reference).cloned().collect();

        let local_wins = candidates.len() == 1 && self.config.shadowing == ShadowPolicy::LocalFirst;
        if !local_wins && candidates.len() < 2 {
            for imported in self.imported_units(unit)? {
                for def in imported.matching(reference).filter(|d| d.is_public()) {
                    if !candidates.iter().any(|c| Arc::ptr_eq(c, def)) {
                        candidates.push(Arc::clone(def));
                    }
                }
            }
        }

        match candidates.len() {
            0 => Err(LinkError::NoSuchFunction {
                name: reference.name().to_string(),
                arity: reference.arity(),
                scope: scope.to_string(),
                other_arities: self.visible_arities(unit, reference.name())?,
            }),
            1 => {
                let def = candidates.remove(0);
                tracing::debug!(
                    target: "closure_link::resolve",
                    name = reference.name(),
                    arity = reference.arity(),
                    scope,
                    unit = def.unit(),
                    "resolved function reference"
                );
                Ok(def)
            }
            _ => {
                let mut names: Vec<String> = candidates.iter().map(|d| d.qualified_name()).collect();
                names.sort();
                Err(LinkError::AmbiguousFunction {
                    name: reference.name().to_string(),
                    arity: reference.arity(),
                    scope: scope.to_string(),
                    candidates: names,
                })
            }
        }
    }

    /// Units reachable through `unit`'s imports, in breadth-first order.
    fn imported_units(&self, unit: &'a CompilationUnit) -> LinkResult<Vec<&'a CompilationUnit>> {
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(unit.name());

        let mut queue: VecDeque<&'a CompilationUnit> = VecDeque::new();
        queue.push_back(unit);

        let mut reached = Vec::new();
        while let Some(current) = queue.pop_front() {
            // Only the requesting unit's imports count unless transitive
            if !self.config.transitive_imports && !std::ptr::eq(current, unit) {
                continue;
            }
            for import in current.imports() {
                if !seen.insert(import.as_str()) {
                    continue;
                }
                let imported = self
                    .space
                    .unit(import)
                    .ok_or_else(|| LinkError::UnknownImport {
                        unit: current.name().to_string(),
                        import: import.clone(),
                    })?;
                reached.push(imported.as_ref());
                queue.push_back(imported.as_ref());
            }
        }
        Ok(reached)
    }

    /// Arities at which `name` is visible from `unit`, sorted and unique.
    fn visible_arities(&self, unit: &'a CompilationUnit, name: &str) -> LinkResult<Vec<usize>> {
        let mut arities: Vec<usize> = unit.named(name).map(|d| d.arity()).collect();
        for imported in self.imported_units(unit)? {
            arities.extend(imported.named(name).filter(|d| d.is_public()).map(|d| d.arity()));
        }
        arities.sort_unstable();
        arities.dedup();
        Ok(arities)
    }
}
