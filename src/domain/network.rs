//! Network objects: the shared base capabilities plus Node, Port and Link.

use crate::domain::entity::{Entity, EntityId, EntityKind, Handle};
use crate::domain::model::{Label, Lifetime, Location};
use crate::domain::ports::UriValidator;
use crate::domain::service::ServiceId;
use crate::utils::error::{NmlError, Result};
use crate::utils::validation::AbsoluteUriValidator;

/// State every network object carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectBase {
    identification: Option<String>,
    name: Option<String>,
    version: Option<String>,
    aliases: Vec<EntityId>,
    lifetimes: Vec<Handle<Lifetime>>,
    location: Option<Handle<Location>>,
}

/// Capabilities shared by every network object variant.
///
/// Every method is provided on top of [`NetworkObject::base`], so a variant
/// only has to expose its [`ObjectBase`].
pub trait NetworkObject: Entity {
    fn base(&self) -> &ObjectBase;
    fn base_mut(&mut self) -> &mut ObjectBase;

    /// Creates a default instance with a validated identifier.
    fn with_id(identification: impl Into<String>) -> Result<Self>
    where
        Self: Default,
    {
        let mut object = Self::default();
        object.set_identification(identification)?;
        Ok(object)
    }

    fn identification(&self) -> Option<&str> {
        self.base().identification.as_deref()
    }

    /// Sets the identifier if it is an absolute URI with a scheme.
    ///
    /// On failure the previous identifier is kept.
    fn set_identification(&mut self, identification: impl Into<String>) -> Result<()> {
        self.set_identification_with(&AbsoluteUriValidator, identification)
    }

    fn set_identification_with<V: UriValidator + ?Sized>(
        &mut self,
        validator: &V,
        identification: impl Into<String>,
    ) -> Result<()> {
        let identification = identification.into();
        if !validator.is_valid_absolute_uri(&identification) {
            tracing::warn!(
                "Rejected identification {:?} for {}",
                identification,
                Self::KIND
            );
            return Err(NmlError::Identification {
                value: identification,
            });
        }

        self.base_mut().identification = Some(identification);
        Ok(())
    }

    fn name(&self) -> Option<&str> {
        self.base().name.as_deref()
    }

    fn set_name(&mut self, name: impl Into<String>) {
        self.base_mut().name = Some(name.into());
    }

    fn version(&self) -> Option<&str> {
        self.base().version.as_deref()
    }

    fn set_version(&mut self, version: impl Into<String>) {
        self.base_mut().version = Some(version.into());
    }

    /// Appends a lifetime. Anything other than a Lifetime is rejected.
    fn exists_during(&mut self, lifetime: impl Into<EntityId>) -> Result<()> {
        let lifetime = lifetime.into();
        if lifetime.kind() != EntityKind::Lifetime {
            tracing::warn!("{} cannot exist during a {}", Self::KIND, lifetime.kind());
            return Err(NmlError::ExistsDuring {
                found: lifetime.kind(),
            });
        }

        self.base_mut()
            .lifetimes
            .push(Handle::new(lifetime.index()));
        Ok(())
    }

    /// Appends an alias. The alias must be the same variant as `self`.
    fn is_alias(&mut self, other: impl Into<EntityId>) -> Result<()> {
        let other = other.into();
        if other.kind() != Self::KIND {
            tracing::warn!("{} cannot be an alias of a {}", Self::KIND, other.kind());
            return Err(NmlError::IsAlias {
                expected: Self::KIND,
                found: other.kind(),
            });
        }

        self.base_mut().aliases.push(other);
        Ok(())
    }

    /// Replaces any previous location.
    fn located_at(&mut self, location: Handle<Location>) {
        self.base_mut().location = Some(location);
    }

    fn aliases(&self) -> &[EntityId] {
        &self.base().aliases
    }

    fn lifetimes(&self) -> &[Handle<Lifetime>] {
        &self.base().lifetimes
    }

    fn location(&self) -> Option<Handle<Location>> {
        self.base().location
    }
}

macro_rules! impl_network_object {
    ($($variant:ty),* $(,)?) => {
        $(
            impl $crate::domain::network::NetworkObject for $variant {
                fn base(&self) -> &$crate::domain::network::ObjectBase {
                    &self.base
                }

                fn base_mut(&mut self) -> &mut $crate::domain::network::ObjectBase {
                    &mut self.base
                }
            }
        )*
    };
}

pub(crate) use impl_network_object;

/// A device in a network topology, physical or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    base: ObjectBase,
    inbound_ports: Vec<Handle<Port>>,
    outbound_ports: Vec<Handle<Port>>,
    services: Vec<EntityId>,
    implemented_by: Vec<Handle<Node>>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
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

    /// Nodes implementing this one are nested directly in the output.
    pub fn implemented_by(&mut self, node: Handle<Node>) {
        self.implemented_by.push(node);
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

    pub fn implementing_nodes(&self) -> &[Handle<Node>] {
        &self.implemented_by
    }
}

/// Connection point of a network object. Ports are joined by Links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Port {
    base: ObjectBase,
    encoding: Option<String>,
    label: Option<Handle<Label>>,
    services: Vec<EntityId>,
    sink_links: Vec<Handle<Link>>,
    source_links: Vec<Handle<Link>>,
}

impl Port {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = Some(encoding.into());
    }

    pub fn has_label(&mut self, label: Handle<Label>) {
        self.label = Some(label);
    }

    pub fn has_service(&mut self, service: impl Into<ServiceId>) {
        self.services.push(service.into().id());
    }

    pub fn is_sink(&mut self, link: Handle<Link>) {
        self.sink_links.push(link);
    }

    pub fn is_source(&mut self, link: Handle<Link>) {
        self.source_links.push(link);
    }

    pub fn label(&self) -> Option<Handle<Label>> {
        self.label
    }

    pub fn services(&self) -> &[EntityId] {
        &self.services
    }

    pub fn sink_links(&self) -> &[Handle<Link>] {
        &self.sink_links
    }

    pub fn source_links(&self) -> &[Handle<Link>] {
        &self.source_links
    }
}

/// Unidirectional connection from sources to sinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    base: ObjectBase,
    encoding: Option<String>,
    no_return_traffic: bool,
    label: Option<Handle<Label>>,
    serial_compound: Vec<Handle<Link>>,
}

impl Link {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = Some(encoding.into());
    }

    pub fn no_return_traffic(&self) -> bool {
        self.no_return_traffic
    }

    pub fn set_no_return_traffic(&mut self, no_return_traffic: bool) {
        self.no_return_traffic = no_return_traffic;
    }

    pub fn has_label(&mut self, label: Handle<Label>) {
        self.label = Some(label);
    }

    pub fn label(&self) -> Option<Handle<Label>> {
        self.label
    }

    /// Replaces the whole ordered list of links this one is composed of.
    pub fn is_serial_compound_link(&mut self, links: impl IntoIterator<Item = Handle<Link>>) {
        self.serial_compound = links.into_iter().collect();
    }

    pub fn serial_compound_links(&self) -> &[Handle<Link>] {
        &self.serial_compound
    }
}

impl_network_object!(Node, Port, Link);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service::SwitchingService;

    #[test]
    fn test_rejected_identification_keeps_previous_value() {
        let mut node = Node::new();
        node.set_identification("urn:ogf:network:example.org:node:a")
            .unwrap();

        let err = node.set_identification("node-a").unwrap_err();
        assert!(matches!(err, NmlError::Identification { .. }));
        assert_eq!(
            node.identification(),
            Some("urn:ogf:network:example.org:node:a")
        );
    }

    #[test]
    fn test_custom_validator() {
        struct UrnOnly;
        impl UriValidator for UrnOnly {
            fn is_valid_absolute_uri(&self, candidate: &str) -> bool {
                candidate.starts_with("urn:")
            }
        }

        let mut port = Port::new();
        assert!(port
            .set_identification_with(&UrnOnly, "http://example.org/port")
            .is_err());
        assert!(port.set_identification_with(&UrnOnly, "urn:x").is_ok());
    }

    #[test]
    fn test_is_alias_requires_same_kind() {
        let mut node = Node::new();
        let other_node: Handle<Node> = Handle::new(3);
        let port: Handle<Port> = Handle::new(4);

        assert!(node.is_alias(other_node).is_ok());
        let err = node.is_alias(port).unwrap_err();
        assert!(matches!(
            err,
            NmlError::IsAlias {
                expected: EntityKind::Node,
                found: EntityKind::Port
            }
        ));
        assert_eq!(node.aliases(), &[other_node.id()]);
    }

    #[test]
    fn test_exists_during_requires_lifetime() {
        let mut link = Link::new();
        let lifetime: Handle<Lifetime> = Handle::new(1);
        let location: Handle<Location> = Handle::new(2);

        assert!(link.exists_during(lifetime).is_ok());
        assert!(link.exists_during(location).is_err());
        assert_eq!(link.lifetimes(), &[lifetime]);
    }

    #[test]
    fn test_located_at_overwrites() {
        let mut port = Port::new();
        port.located_at(Handle::new(1));
        let second: Handle<Location> = Handle::new(2);
        port.located_at(second);
        assert_eq!(port.location(), Some(second));
    }

    #[test]
    fn test_serial_compound_link_replaces() {
        let mut link = Link::new();
        link.is_serial_compound_link([Handle::new(1), Handle::new(2)]);
        let last: Handle<Link> = Handle::new(3);
        link.is_serial_compound_link([last]);
        assert_eq!(link.serial_compound_links(), &[last]);
    }

    #[test]
    fn test_node_relations_append() {
        let mut node = Node::new();
        let service: Handle<SwitchingService> = Handle::new(5);
        node.has_service(service);
        node.has_service(service);
        node.has_inbound_port(Handle::new(1));
        assert_eq!(node.services().len(), 2);
        assert_eq!(node.inbound_ports().len(), 1);
        assert!(node.outbound_ports().is_empty());
    }

    #[test]
    fn test_with_id() {
        let port = Port::with_id("urn:ogf:network:example.org:port:x").unwrap();
        assert_eq!(port.identification(), Some("urn:ogf:network:example.org:port:x"));
        assert!(Port::with_id("port-x").is_err());
    }
}
