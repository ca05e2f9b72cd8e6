//! Depth-first walk of the entity graph into a [`MarkupBuilder`].
//!
//! Each variant writes itself through [`ToNml`]; the pieces shared by every
//! network object (identity attributes, isAlias, existsDuring, locatedAt)
//! live in [`Emitter::open_object`] and run before any variant content.

use crate::domain::entity::{EntityData, EntityId};
use crate::domain::graph::NmlGraph;
use crate::domain::network::NetworkObject;
use crate::domain::ports::MarkupBuilder;
use crate::utils::error::{NmlError, Result};
use std::fmt;

pub const NML_PREFIX: &str = "nml";
pub const NML_NAMESPACE: &str = "http://schemas.ogf.org/nml/2013/05/base";
pub const RELATION_TAG: &str = "Relation";

/// Values of the `type` attribute on `Relation` wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    IsAlias,
    ExistsDuring,
    LocatedAt,
    HasNode,
    HasInboundPort,
    HasOutboundPort,
    HasService,
    HasTopology,
    HasLabel,
    HasPort,
    HasLink,
    IsSink,
    IsSource,
    IsSerialCompoundLink,
}

impl RelationType {
    pub const fn as_str(self) -> &'static str {
        match self {
            RelationType::IsAlias => "isAlias",
            RelationType::ExistsDuring => "existsDuring",
            RelationType::LocatedAt => "locatedAt",
            RelationType::HasNode => "hasNode",
            RelationType::HasInboundPort => "hasInboundPort",
            RelationType::HasOutboundPort => "hasOutboundPort",
            RelationType::HasService => "hasService",
            RelationType::HasTopology => "hasTopology",
            RelationType::HasLabel => "hasLabel",
            RelationType::HasPort => "hasPort",
            RelationType::HasLink => "hasLink",
            RelationType::IsSink => "isSink",
            RelationType::IsSource => "isSource",
            RelationType::IsSerialCompoundLink => "isSerialCompoundLink",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writes one entity, and everything it relates to, below `parent`.
///
/// With no parent the entity becomes the document root.
pub trait ToNml {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element>;
}

pub struct Emitter<'a, B: MarkupBuilder> {
    graph: &'a NmlGraph,
    builder: &'a mut B,
    emitted: usize,
}

impl<'a, B: MarkupBuilder> Emitter<'a, B> {
    pub fn new(graph: &'a NmlGraph, builder: &'a mut B) -> Self {
        Self {
            graph,
            builder,
            emitted: 0,
        }
    }

    /// Number of entity elements written so far (Relation wrappers excluded).
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn emit(&mut self, id: EntityId, parent: Option<B::Element>) -> Result<B::Element> {
        let graph = self.graph;
        let data = graph.entry(id).ok_or(NmlError::EntityNotFound(id))?;
        tracing::trace!("Emitting {}", id);

        let element = match data {
            EntityData::Node(node) => node.to_nml(self, parent),
            EntityData::Port(port) => port.to_nml(self, parent),
            EntityData::Link(link) => link.to_nml(self, parent),
            EntityData::SwitchingService(service) => service.to_nml(self, parent),
            EntityData::AdaptationService(service) => service.to_nml(self, parent),
            EntityData::DeadaptationService(service) => service.to_nml(self, parent),
            EntityData::Topology(topology) => topology.to_nml(self, parent),
            EntityData::PortGroup(group) => group.to_nml(self, parent),
            EntityData::LinkGroup(group) => group.to_nml(self, parent),
            EntityData::BidirectionalPort(port) => port.to_nml(self, parent),
            EntityData::BidirectionalLink(link) => link.to_nml(self, parent),
            EntityData::Location(location) => location.to_nml(self, parent),
            EntityData::Lifetime(lifetime) => lifetime.to_nml(self, parent),
            EntityData::Label(label) => label.to_nml(self, parent),
            EntityData::LabelGroup(_) | EntityData::OrderedList(_) | EntityData::ListItem(_) => {
                Err(NmlError::NotSerializable(data.kind()))
            }
        }?;

        self.emitted += 1;
        Ok(element)
    }

    /// Opens an unqualified element without namespace bindings.
    pub fn open(&mut self, tag: &str, parent: Option<B::Element>) -> B::Element {
        match parent {
            Some(parent) => self.builder.create_child(parent, tag),
            None => self.builder.create_root(tag, &[]),
        }
    }

    /// Opens a network object element and writes the shared base content.
    pub fn open_object<T: NetworkObject>(
        &mut self,
        object: &T,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let tag = format!("{}:{}", NML_PREFIX, T::KIND.tag());
        let this = match parent {
            Some(parent) => self.builder.create_child(parent, &tag),
            None => self
                .builder
                .create_root(&tag, &[(NML_PREFIX, NML_NAMESPACE)]),
        };

        self.attribute(this, "id", object.identification());
        self.attribute(this, "name", object.name());
        self.attribute(this, "version", object.version());

        self.relations(this, RelationType::IsAlias, object.aliases().iter().copied())?;
        self.relations(this, RelationType::ExistsDuring, object.lifetimes().iter().copied())?;
        if let Some(location) = object.location() {
            self.relation(this, RelationType::LocatedAt, location)?;
        }

        Ok(this)
    }

    /// Sets the attribute only when a non-empty value is present.
    pub fn attribute(&mut self, element: B::Element, key: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.builder.set_attribute(element, key, value);
        }
    }

    /// Sets a boolean attribute only when it is true.
    pub fn flag(&mut self, element: B::Element, key: &str, value: bool) {
        if value {
            self.builder.set_attribute(element, key, "true");
        }
    }

    pub fn number(&mut self, element: B::Element, key: &str, value: Option<f64>) {
        if let Some(value) = value {
            self.builder.set_attribute(element, key, &value.to_string());
        }
    }

    /// Wraps the target in `<Relation type="...">` below `this`.
    pub fn relation(
        &mut self,
        this: B::Element,
        relation: RelationType,
        target: impl Into<EntityId>,
    ) -> Result<()> {
        let target = target.into();
        if !target.kind().has_element_form() {
            return Err(NmlError::NotSerializable(target.kind()));
        }

        let wrapper = self.builder.create_child(this, RELATION_TAG);
        self.builder
            .set_attribute(wrapper, "type", relation.as_str());
        self.emit(target, Some(wrapper))?;
        Ok(())
    }

    pub fn relations<I>(&mut self, this: B::Element, relation: RelationType, targets: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<EntityId>,
    {
        for target in targets {
            self.relation(this, relation, target)?;
        }
        Ok(())
    }

    /// Writes the targets directly below `this`, without a wrapper.
    pub fn nest<I>(&mut self, this: B::Element, targets: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<EntityId>,
    {
        for target in targets {
            self.emit(target.into(), Some(this))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_vocabulary() {
        assert_eq!(RelationType::HasOutboundPort.as_str(), "hasOutboundPort");
        assert_eq!(RelationType::IsSerialCompoundLink.to_string(), "isSerialCompoundLink");
    }
}
