//! Canvas snapshots as parent-pointer graphs

use crate::component::Component;
use crate::error::{Result, TrellisError};
use crate::id::ComponentId;
use std::collections::HashMap;

/// An unordered collection of components addressed by id.
///
/// Parent/child relationships are implied by each component's `parent`
/// field. Dangling parents and cycles are allowed here; detecting them is the
/// integrity checker's job.
#[derive(Debug, Clone, Default)]
pub struct ComponentGraph {
    components: Vec<Component>,
    index: HashMap<ComponentId, usize>,
}

impl ComponentGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a list of components.
    ///
    /// Fails if two components share an id.
    pub fn from_components(components: Vec<Component>) -> Result<Self> {
        let mut graph = Self::new();
        for component in components {
            graph.insert(component)?;
        }
        Ok(graph)
    }

    /// Add a component, rejecting duplicate ids
    pub fn insert(&mut self, component: Component) -> Result<()> {
        if self.index.contains_key(&component.id) {
            return Err(TrellisError::DuplicateComponentId(component.id.to_string()));
        }
        self.index
            .insert(component.id.clone(), self.components.len());
        self.components.push(component);
        Ok(())
    }

    /// Swap in a new value for an existing component, returning the old one
    pub fn replace(&mut self, component: Component) -> Result<Component> {
        let idx = *self
            .index
            .get(&component.id)
            .ok_or_else(|| TrellisError::ComponentNotFound(component.id.to_string()))?;
        Ok(std::mem::replace(&mut self.components[idx], component))
    }

    /// Remove a component by id
    pub fn remove(&mut self, id: &ComponentId) -> Option<Component> {
        let idx = self.index.remove(id)?;
        let removed = self.components.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, id: &ComponentId) -> Option<&Component> {
        self.index.get(id).map(|&idx| &self.components[idx])
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.index.contains_key(id)
    }

    /// Components in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Every component except the one with `id`
    pub fn others<'a>(&'a self, id: &'a ComponentId) -> impl Iterator<Item = &'a Component> + 'a {
        self.components.iter().filter(move |c| &c.id != id)
    }

    /// Resolve a component's parent, if it exists in the graph
    pub fn parent_of(&self, id: &ComponentId) -> Option<&Component> {
        self.get(id)
            .and_then(|c| c.parent.as_ref())
            .and_then(|parent| self.get(parent))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Consume the graph, returning components in insertion order
    pub fn into_components(self) -> Vec<Component> {
        self.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Properties;

    fn component(id: &str) -> Component {
        Component::new(id, "container", Properties::new(0.0, 0.0, 10.0, 10.0))
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ComponentGraph::from_components(vec![component("a"), component("a")]);
        assert!(matches!(result, Err(TrellisError::DuplicateComponentId(id)) if id == "a"));
    }

    #[test]
    fn test_parent_resolution() {
        let graph = ComponentGraph::from_components(vec![
            component("root"),
            component("child").with_parent("root"),
            component("stray").with_parent("ghost"),
        ])
        .unwrap();

        let child = ComponentId::from("child");
        assert_eq!(graph.parent_of(&child).map(|c| c.id.as_str()), Some("root"));
        assert!(graph.parent_of(&ComponentId::from("stray")).is_none());
        assert!(graph.parent_of(&ComponentId::from("root")).is_none());
    }

    #[test]
    fn test_others_excludes_self() {
        let graph =
            ComponentGraph::from_components(vec![component("a"), component("b"), component("c")])
                .unwrap();
        let a = ComponentId::from("a");
        let ids: Vec<&str> = graph.others(&a).map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_replace_and_remove() {
        let mut graph =
            ComponentGraph::from_components(vec![component("a"), component("b")]).unwrap();

        let mut moved = component("a");
        moved.properties.x = 40.0;
        let old = graph.replace(moved).unwrap();
        assert_eq!(old.properties.x, 0.0);
        assert_eq!(graph.get(&ComponentId::from("a")).unwrap().properties.x, 40.0);

        assert!(graph.remove(&ComponentId::from("a")).is_some());
        assert_eq!(graph.len(), 1);
        assert!(graph.get(&ComponentId::from("b")).is_some());
        assert!(graph.replace(component("zzz")).is_err());
    }
}
