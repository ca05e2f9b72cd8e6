//! Groups: collections of network objects. Groups may nest, and an object
//! may belong to several groups at once.

use crate::domain::entity::{EntityId, Handle};
use crate::domain::model::LabelGroup;
use crate::domain::network::{impl_network_object, Link, NetworkObject, Node, ObjectBase, Port};
use crate::domain::service::ServiceId;

/// Marker for the group variants.
pub trait Group: NetworkObject {}

impl Group for Topology {}
impl Group for PortGroup {}
impl Group for LinkGroup {}
impl Group for BidirectionalPort {}
impl Group for BidirectionalLink {}

/// A set of connected network objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    base: ObjectBase,
    nodes: Vec<Handle<Node>>,
    inbound_ports: Vec<Handle<Port>>,
    outbound_ports: Vec<Handle<Port>>,
    services: Vec<EntityId>,
    topologies: Vec<Handle<Topology>>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_node(&mut self, node: Handle<Node>) {
        self.nodes.push(node);
    }

    pub fn has_inbound_port(&mut self, port: Handle<Port>) {
        self.inbound_ports.push(port);
    }

    pub fn has_outbound_port(&mut self, port: Handle<Port>) {
        self.outbound_ports.push(port);
    }

    pub fn has_service(&mut self, service: impl Into<ServiceId>) {
        self.services.push(service.into().id());
    }

    pub fn has_topology(&mut self, topology: Handle<Topology>) {
        self.topologies.push(topology);
    }

    pub fn nodes(&self) -> &[Handle<Node>] {
        &self.nodes
    }

    pub fn inbound_ports(&self) -> &[Handle<Port>] {
        &self.inbound_ports
    }

    pub fn outbound_ports(&self) -> &[Handle<Port>] {
        &self.outbound_ports
    }

    pub fn services(&self) -> &[EntityId] {
        &self.services
    }

    pub fn topologies(&self) -> &[Handle<Topology>] {
        &self.topologies
    }
}

/// An unordered set of Ports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortGroup {
    base: ObjectBase,
    encoding: Option<String>,
    label_group: Option<Handle<LabelGroup>>,
    ports: Vec<Handle<Port>>,
    sink_link_groups: Vec<Handle<LinkGroup>>,
    source_link_groups: Vec<Handle<LinkGroup>>,
}

impl PortGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = Some(encoding.into());
    }

    pub fn has_label_group(&mut self, label_group: Handle<LabelGroup>) {
        self.label_group = Some(label_group);
    }

    pub fn has_port(&mut self, port: Handle<Port>) {
        self.ports.push(port);
    }

    pub fn is_sink(&mut self, link_group: Handle<LinkGroup>) {
        self.sink_link_groups.push(link_group);
    }

    pub fn is_source(&mut self, link_group: Handle<LinkGroup>) {
        self.source_link_groups.push(link_group);
    }

    pub fn label_group(&self) -> Option<Handle<LabelGroup>> {
        self.label_group
    }

    pub fn ports(&self) -> &[Handle<Port>] {
        &self.ports
    }

    pub fn sink_link_groups(&self) -> &[Handle<LinkGroup>] {
        &self.sink_link_groups
    }

    pub fn source_link_groups(&self) -> &[Handle<LinkGroup>] {
        &self.source_link_groups
    }
}

/// An unordered set of Links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGroup {
    base: ObjectBase,
    encoding: Option<String>,
    label_group: Option<Handle<LabelGroup>>,
    links: Vec<Handle<Link>>,
    serial_compound: Vec<Handle<LinkGroup>>,
}

impl LinkGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = Some(encoding.into());
    }

    pub fn has_label_group(&mut self, label_group: Handle<LabelGroup>) {
        self.label_group = Some(label_group);
    }

    pub fn has_link(&mut self, link: Handle<Link>) {
        self.links.push(link);
    }

    /// Appends one group; [`Link::is_serial_compound_link`] replaces instead.
    pub fn is_serial_compound_link(&mut self, link_group: Handle<LinkGroup>) {
        self.serial_compound.push(link_group);
    }

    pub fn label_group(&self) -> Option<Handle<LabelGroup>> {
        self.label_group
    }

    pub fn links(&self) -> &[Handle<Link>] {
        &self.links
    }

    pub fn serial_compound_link_groups(&self) -> &[Handle<LinkGroup>] {
        &self.serial_compound
    }
}

/// A pair of unidirectional Ports forming one bidirectional port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidirectionalPort {
    base: ObjectBase,
    encoding: Option<String>,
    ports: Vec<[Handle<Port>; 2]>,
}

impl BidirectionalPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = Some(encoding.into());
    }

    pub fn has_port(&mut self, port0: Handle<Port>, port1: Handle<Port>) {
        self.ports.push([port0, port1]);
    }

    pub fn port_pairs(&self) -> &[[Handle<Port>; 2]] {
        &self.ports
    }

    pub fn ports(&self) -> impl Iterator<Item = Handle<Port>> + '_ {
        self.ports.iter().flatten().copied()
    }
}

/// A pair of unidirectional Links forming one bidirectional link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidirectionalLink {
    base: ObjectBase,
    encoding: Option<String>,
    links: Vec<[Handle<Link>; 2]>,
}

impl BidirectionalLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = Some(encoding.into());
    }

    pub fn has_link(&mut self, link0: Handle<Link>, link1: Handle<Link>) {
        self.links.push([link0, link1]);
    }

    pub fn link_pairs(&self) -> &[[Handle<Link>; 2]] {
        &self.links
    }

    pub fn links(&self) -> impl Iterator<Item = Handle<Link>> + '_ {
        self.links.iter().flatten().copied()
    }
}

impl_network_object!(
    Topology,
    PortGroup,
    LinkGroup,
    BidirectionalPort,
    BidirectionalLink
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bidirectional_port_appends_pairs() {
        let a: Handle<Port> = Handle::new(1);
        let b: Handle<Port> = Handle::new(2);
        let c: Handle<Port> = Handle::new(3);
        let d: Handle<Port> = Handle::new(4);

        let mut bidi = BidirectionalPort::new();
        bidi.has_port(a, b);
        bidi.has_port(c, d);

        assert_eq!(bidi.port_pairs(), &[[a, b], [c, d]]);
        assert_eq!(bidi.ports().collect::<Vec<_>>(), vec![a, b, c, d]);
    }

    #[test]
    fn test_link_group_serial_compound_appends() {
        let first: Handle<LinkGroup> = Handle::new(1);
        let second: Handle<LinkGroup> = Handle::new(2);

        let mut group = LinkGroup::new();
        group.is_serial_compound_link(first);
        group.is_serial_compound_link(second);
        assert_eq!(group.serial_compound_link_groups(), &[first, second]);
    }

    #[test]
    fn test_topology_nesting() {
        let mut topology = Topology::new();
        topology.has_topology(Handle::new(9));
        topology.has_node(Handle::new(1));
        assert_eq!(topology.topologies().len(), 1);
        assert_eq!(topology.nodes().len(), 1);
    }
}
