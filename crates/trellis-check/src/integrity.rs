//! Parent-pointer graph integrity: orphan references and cycles

use crate::taxonomy::{ErrorRecord, Rule};
use std::collections::HashMap;
use trellis_core::{ComponentGraph, ComponentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the parent chain currently being walked
    Gray,
    /// Fully processed
    Black,
}

/// Detects structural defects that never surface as runtime failures
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphIntegrityChecker;

impl GraphIntegrityChecker {
    pub fn new() -> Self {
        Self
    }

    /// Orphans first, then cycles
    pub fn check(&self, graph: &ComponentGraph) -> Vec<ErrorRecord> {
        let mut errors = self.find_orphans(graph);
        errors.extend(self.find_cycles(graph));
        errors
    }

    /// One record per component whose parent id is not in the graph
    pub fn find_orphans(&self, graph: &ComponentGraph) -> Vec<ErrorRecord> {
        graph
            .iter()
            .filter_map(|component| {
                let parent = component.parent.as_ref()?;
                if graph.parent_of(&component.id).is_some() {
                    return None;
                }
                Some(
                    ErrorRecord::new(
                        Rule::Orphan,
                        format!("Component references non-existent parent {}", parent),
                    )
                    .for_component(&component.id),
                )
            })
            .collect()
    }

    /// One record per distinct cycle.
    ///
    /// Every component has at most one outgoing edge (to its parent), so a
    /// depth-first walk is a walk up the parent chain. Nodes on the chain
    /// being walked are gray; reaching a gray node closes a cycle. Finished
    /// chains turn black and are never walked again, so the whole pass is
    /// linear in the number of components.
    pub fn find_cycles(&self, graph: &ComponentGraph) -> Vec<ErrorRecord> {
        let mut marks: HashMap<&ComponentId, Mark> = HashMap::with_capacity(graph.len());
        let mut errors = Vec::new();

        for start in graph.iter() {
            if marks.contains_key(&start.id) {
                continue;
            }

            let mut path: Vec<&ComponentId> = Vec::new();
            let mut current = Some(&start.id);

            while let Some(id) = current {
                match marks.get(id) {
                    Some(Mark::Black) => break,
                    Some(Mark::Gray) => {
                        let from = path.iter().position(|p| *p == id).unwrap_or(0);
                        errors.push(cycle_record(id, &path[from..]));
                        break;
                    }
                    None => {
                        marks.insert(id, Mark::Gray);
                        path.push(id);
                        current = graph.parent_of(id).map(|parent| &parent.id);
                    }
                }
            }

            for id in path {
                marks.insert(id, Mark::Black);
            }
        }

        errors
    }
}

fn cycle_record(closing: &ComponentId, members: &[&ComponentId]) -> ErrorRecord {
    let chain = members
        .iter()
        .map(|id| id.as_str())
        .chain(std::iter::once(closing.as_str()))
        .collect::<Vec<_>>()
        .join(" -> ");

    ErrorRecord::new(
        Rule::CircularDependency,
        format!("Circular dependency detected in component relationships: {}", chain),
    )
    .for_component(closing)
}
