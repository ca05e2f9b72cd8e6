//! Services: abilities a network offers on top of its ports and links.

use crate::domain::entity::{EntityId, EntityKind, Handle};
use crate::domain::network::{impl_network_object, Link, NetworkObject, ObjectBase, Port};
use crate::utils::error::{NmlError, Result};

/// Marker for the service variants.
pub trait Service: NetworkObject {}

/// Id of any service variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceId(EntityId);

impl ServiceId {
    pub fn id(&self) -> EntityId {
        self.0
    }
}

impl<S: Service> From<Handle<S>> for ServiceId {
    fn from(handle: Handle<S>) -> Self {
        ServiceId(handle.id())
    }
}

impl TryFrom<EntityId> for ServiceId {
    type Error = NmlError;

    fn try_from(id: EntityId) -> Result<Self> {
        if id.kind().is_service() {
            Ok(ServiceId(id))
        } else {
            Err(NmlError::NotAService { found: id.kind() })
        }
    }
}

impl Service for SwitchingService {}
impl Service for AdaptationService {}
impl Service for DeadaptationService {}

/// Ability to create new Links between inbound and outbound Ports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchingService {
    base: ObjectBase,
    encoding: Option<String>,
    label_swapping: bool,
    inbound_ports: Vec<Handle<Port>>,
    outbound_ports: Vec<Handle<Port>>,
    provided_links: Vec<Handle<Link>>,
}

impl SwitchingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = Some(encoding.into());
    }

    pub fn label_swapping(&self) -> bool {
        self.label_swapping
    }

    pub fn set_label_swapping(&mut self, label_swapping: bool) {
        self.label_swapping = label_swapping;
    }

    pub fn has_inbound_port(&mut self, port: Handle<Port>) {
        self.inbound_ports.push(port);
    }

    pub fn has_outbound_port(&mut self, port: Handle<Port>) {
        self.outbound_ports.push(port);
    }

    pub fn provides_link(&mut self, link: Handle<Link>) {
        self.provided_links.push(link);
    }

    pub fn inbound_ports(&self) -> &[Handle<Port>] {
        &self.inbound_ports
    }

    pub fn outbound_ports(&self) -> &[Handle<Port>] {
        &self.outbound_ports
    }

    pub fn provided_links(&self) -> &[Handle<Link>] {
        &self.provided_links
    }
}

fn check_providable(service: EntityKind, candidate: EntityId) -> Result<EntityId> {
    match candidate.kind() {
        EntityKind::Port | EntityKind::PortGroup => Ok(candidate),
        found => {
            tracing::warn!("{} cannot provide a {}", service, found);
            Err(NmlError::CanProvidePort { service, found })
        }
    }
}

/// Ability to embed the data of one port into another (multiplexing).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdaptationService {
    base: ObjectBase,
    adaptation_function: Option<String>,
    can_provide: Vec<EntityId>,
    provided_ports: Vec<Handle<Port>>,
}

impl AdaptationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adaptation_function(&self) -> Option<&str> {
        self.adaptation_function.as_deref()
    }

    pub fn set_adaptation_function(&mut self, adaptation_function: impl Into<String>) {
        self.adaptation_function = Some(adaptation_function.into());
    }

    /// Appends a Port or PortGroup; any other variant is rejected.
    pub fn can_provide_port(&mut self, port: impl Into<EntityId>) -> Result<()> {
        let port = check_providable(EntityKind::AdaptationService, port.into())?;
        self.can_provide.push(port);
        Ok(())
    }

    pub fn provides_port(&mut self, port: Handle<Port>) {
        self.provided_ports.push(port);
    }

    pub fn providable_ports(&self) -> &[EntityId] {
        &self.can_provide
    }

    pub fn provided_ports(&self) -> &[Handle<Port>] {
        &self.provided_ports
    }
}

/// Inverse of [`AdaptationService`]: extracts the data of one port from
/// another (demultiplexing).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadaptationService {
    base: ObjectBase,
    adaptation_function: Option<String>,
    can_provide: Vec<EntityId>,
    provided_ports: Vec<Handle<Port>>,
}

impl DeadaptationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adaptation_function(&self) -> Option<&str> {
        self.adaptation_function.as_deref()
    }

    pub fn set_adaptation_function(&mut self, adaptation_function: impl Into<String>) {
        self.adaptation_function = Some(adaptation_function.into());
    }

    /// Same rule as [`AdaptationService::can_provide_port`].
    pub fn can_provide_port(&mut self, port: impl Into<EntityId>) -> Result<()> {
        let port = check_providable(EntityKind::DeadaptationService, port.into())?;
        self.can_provide.push(port);
        Ok(())
    }

    pub fn provides_port(&mut self, port: Handle<Port>) {
        self.provided_ports.push(port);
    }

    pub fn providable_ports(&self) -> &[EntityId] {
        &self.can_provide
    }

    pub fn provided_ports(&self) -> &[Handle<Port>] {
        &self.provided_ports
    }
}

impl_network_object!(SwitchingService, AdaptationService, DeadaptationService);
