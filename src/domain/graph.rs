//! Arena owning every entity of one NML description.
//!
//! # Determinism
//! - Handles are dense indices assigned in insertion order.
//! - Relation collections keep insertion order, so serialization of an
//!   unchanged graph always yields the same document.

use crate::domain::entity::{Entity, EntityData, EntityId, EntityKind, Handle};
use std::ops::{Index, IndexMut};

/// Owner of all entities. Relations between entities are handles into it.
#[derive(Debug, Clone, Default)]
pub struct NmlGraph {
    entities: Vec<EntityData>,
}

impl NmlGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
        }
    }

    /// Moves `entity` into the graph. Entities are never removed.
    pub fn insert<T: Entity>(&mut self, entity: T) -> Handle<T> {
        let index = u32::try_from(self.entities.len())
            .unwrap_or_else(|_| panic!("NmlGraph cannot hold more than {} entities", u32::MAX));
        self.entities.push(entity.into_data());
        tracing::trace!("Inserted {} #{}", T::KIND, index);
        Handle::new(index)
    }

    pub fn get<T: Entity>(&self, handle: Handle<T>) -> Option<&T> {
        self.entities
            .get(handle.index() as usize)
            .and_then(T::from_data)
    }

    pub fn get_mut<T: Entity>(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.entities
            .get_mut(handle.index() as usize)
            .and_then(T::from_data_mut)
    }

    /// Looks up a kind-erased id, checking the stored variant matches.
    pub fn entry(&self, id: EntityId) -> Option<&EntityData> {
        self.entities
            .get(id.index() as usize)
            .filter(|data| data.kind() == id.kind())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entry(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities
            .iter()
            .enumerate()
            .map(|(index, data)| EntityId::new(index as u32, data.kind()))
    }

    pub fn iter_kind(&self, kind: EntityKind) -> impl Iterator<Item = EntityId> + '_ {
        self.ids().filter(move |id| id.kind() == kind)
    }
}

impl<T: Entity> Index<Handle<T>> for NmlGraph {
    type Output = T;

    fn index(&self, handle: Handle<T>) -> &T {
        self.get(handle)
            .unwrap_or_else(|| panic!("{:?} does not belong to this graph", handle))
    }
}

impl<T: Entity> IndexMut<Handle<T>> for NmlGraph {
    fn index_mut(&mut self, handle: Handle<T>) -> &mut T {
        self.get_mut(handle)
            .unwrap_or_else(|| panic!("{:?} does not belong to this graph", handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Lifetime;
    use crate::domain::network::{NetworkObject, Node, Port};

    #[test]
    fn test_insert_and_lookup() {
        let mut graph = NmlGraph::new();
        let node = graph.insert(Node::new());
        let port = graph.insert(Port::new());

        graph[node].has_inbound_port(port);
        graph[port].set_encoding("http://schemas.ogf.org/nml/2012/10/ethernet");

        assert_eq!(graph.len(), 2);
        assert_eq!(graph[node].inbound_ports(), &[port]);
        assert!(graph.contains(port.id()));
        assert_eq!(
            graph.get(port).and_then(|p| p.encoding()),
            Some("http://schemas.ogf.org/nml/2012/10/ethernet")
        );
    }

    #[test]
    fn test_entry_checks_kind() {
        let mut graph = NmlGraph::new();
        let lifetime = graph.insert(Lifetime::new());
        let forged = EntityId::new(lifetime.index(), EntityKind::Node);

        assert!(graph.entry(lifetime.id()).is_some());
        assert!(graph.entry(forged).is_none());
    }

    #[test]
    fn test_iter_kind_in_insertion_order() {
        let mut graph = NmlGraph::new();
        let a = graph.insert(Node::new());
        graph.insert(Port::new());
        let b = graph.insert(Node::new());

        let nodes: Vec<EntityId> = graph.iter_kind(EntityKind::Node).collect();
        assert_eq!(nodes, vec![a.id(), b.id()]);
    }

    #[test]
    fn test_graph_wires_validated_relations() {
        let mut graph = NmlGraph::new();
        let node = graph.insert(Node::new());
        let alias = graph.insert(Node::new());
        let lifetime = graph.insert(Lifetime::new());

        graph[node].is_alias(alias).unwrap();
        graph[node].exists_during(lifetime).unwrap();
        assert!(graph[node].exists_during(alias).is_err());
        assert_eq!(graph[node].lifetimes(), &[lifetime]);
    }

    #[test]
    #[should_panic(expected = "does not belong to this graph")]
    fn test_foreign_handle_panics_on_index() {
        let graph = NmlGraph::new();
        let handle: Handle<Node> = Handle::new(0);
        let _ = &graph[handle];
    }
}
