//! Entity kinds, handles and the storage slot shared by every variant.
//!
//! Entities never point at each other directly. A relation collection stores
//! handles into the owning [`NmlGraph`](crate::domain::graph::NmlGraph), so a
//! single Port can be the sink of many Links and a Location can be shared by
//! any number of objects.

use crate::domain::group::{BidirectionalLink, BidirectionalPort, LinkGroup, PortGroup, Topology};
use crate::domain::model::{Label, LabelGroup, Lifetime, ListItem, Location, OrderedList};
use crate::domain::network::{Link, Node, Port};
use crate::domain::service::{AdaptationService, DeadaptationService, SwitchingService};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Concrete variant of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Node,
    Port,
    Link,
    SwitchingService,
    AdaptationService,
    DeadaptationService,
    Topology,
    PortGroup,
    LinkGroup,
    BidirectionalPort,
    BidirectionalLink,
    Location,
    Lifetime,
    Label,
    LabelGroup,
    OrderedList,
    ListItem,
}

impl EntityKind {
    /// Element name of the variant, unqualified.
    pub const fn tag(self) -> &'static str {
        match self {
            EntityKind::Node => "Node",
            EntityKind::Port => "Port",
            EntityKind::Link => "Link",
            EntityKind::SwitchingService => "SwitchingService",
            EntityKind::AdaptationService => "AdaptationService",
            EntityKind::DeadaptationService => "DeadaptationService",
            EntityKind::Topology => "Topology",
            EntityKind::PortGroup => "PortGroup",
            EntityKind::LinkGroup => "LinkGroup",
            EntityKind::BidirectionalPort => "BidirectionalPort",
            EntityKind::BidirectionalLink => "BidirectionalLink",
            EntityKind::Location => "Location",
            EntityKind::Lifetime => "Lifetime",
            EntityKind::Label => "Label",
            EntityKind::LabelGroup => "LabelGroup",
            EntityKind::OrderedList => "OrderedList",
            EntityKind::ListItem => "ListItem",
        }
    }

    pub const fn is_network_object(self) -> bool {
        !matches!(
            self,
            EntityKind::Location
                | EntityKind::Lifetime
                | EntityKind::Label
                | EntityKind::LabelGroup
                | EntityKind::OrderedList
                | EntityKind::ListItem
        )
    }

    pub const fn is_service(self) -> bool {
        matches!(
            self,
            EntityKind::SwitchingService
                | EntityKind::AdaptationService
                | EntityKind::DeadaptationService
        )
    }

    pub const fn is_group(self) -> bool {
        matches!(
            self,
            EntityKind::Topology
                | EntityKind::PortGroup
                | EntityKind::LinkGroup
                | EntityKind::BidirectionalPort
                | EntityKind::BidirectionalLink
        )
    }

    /// LabelGroup, OrderedList and ListItem are value holders with no element form.
    pub const fn has_element_form(self) -> bool {
        !matches!(
            self,
            EntityKind::LabelGroup | EntityKind::OrderedList | EntityKind::ListItem
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Kind-erased handle: an arena index plus the variant stored there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    index: u32,
    kind: EntityKind,
}

impl EntityId {
    pub(crate) const fn new(index: u32, kind: EntityKind) -> Self {
        Self { index, kind }
    }

    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Recovers the typed handle when the id refers to a `T`.
    pub fn typed<T: Entity>(&self) -> Option<Handle<T>> {
        (self.kind == T::KIND).then(|| Handle::new(self.index))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.index)
    }
}

/// Typed, non-owning handle to an entity of variant `T`.
///
/// Obtained from [`NmlGraph::insert`](crate::domain::graph::NmlGraph::insert).
pub struct Handle<T> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> Handle<T> {
    pub(crate) const fn new(index: u32) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn id(&self) -> EntityId {
        EntityId::new(self.index, T::KIND)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: Entity> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle<{}>({})", T::KIND, self.index)
    }
}

impl<T: Entity> From<Handle<T>> for EntityId {
    fn from(handle: Handle<T>) -> Self {
        handle.id()
    }
}

/// Storage for one arena slot.
#[derive(Debug, Clone)]
pub enum EntityData {
    Node(Node),
    Port(Port),
    Link(Link),
    SwitchingService(SwitchingService),
    AdaptationService(AdaptationService),
    DeadaptationService(DeadaptationService),
    Topology(Topology),
    PortGroup(PortGroup),
    LinkGroup(LinkGroup),
    BidirectionalPort(BidirectionalPort),
    BidirectionalLink(BidirectionalLink),
    Location(Location),
    Lifetime(Lifetime),
    Label(Label),
    LabelGroup(LabelGroup),
    OrderedList(OrderedList),
    ListItem(ListItem),
}

impl EntityData {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityData::Node(_) => EntityKind::Node,
            EntityData::Port(_) => EntityKind::Port,
            EntityData::Link(_) => EntityKind::Link,
            EntityData::SwitchingService(_) => EntityKind::SwitchingService,
            EntityData::AdaptationService(_) => EntityKind::AdaptationService,
            EntityData::DeadaptationService(_) => EntityKind::DeadaptationService,
            EntityData::Topology(_) => EntityKind::Topology,
            EntityData::PortGroup(_) => EntityKind::PortGroup,
            EntityData::LinkGroup(_) => EntityKind::LinkGroup,
            EntityData::BidirectionalPort(_) => EntityKind::BidirectionalPort,
            EntityData::BidirectionalLink(_) => EntityKind::BidirectionalLink,
            EntityData::Location(_) => EntityKind::Location,
            EntityData::Lifetime(_) => EntityKind::Lifetime,
            EntityData::Label(_) => EntityKind::Label,
            EntityData::LabelGroup(_) => EntityKind::LabelGroup,
            EntityData::OrderedList(_) => EntityKind::OrderedList,
            EntityData::ListItem(_) => EntityKind::ListItem,
        }
    }
}

/// Implemented by every concrete variant so the graph can store it.
pub trait Entity: Sized + 'static {
    const KIND: EntityKind;

    fn into_data(self) -> EntityData;
    fn from_data(data: &EntityData) -> Option<&Self>;
    fn from_data_mut(data: &mut EntityData) -> Option<&mut Self>;
}

macro_rules! impl_entity {
    ($($variant:ident),* $(,)?) => {
        $(
            impl Entity for $variant {
                const KIND: EntityKind = EntityKind::$variant;

                fn into_data(self) -> EntityData {
                    EntityData::$variant(self)
                }

                fn from_data(data: &EntityData) -> Option<&Self> {
                    match data {
                        EntityData::$variant(entity) => Some(entity),
                        _ => None,
                    }
                }

                fn from_data_mut(data: &mut EntityData) -> Option<&mut Self> {
                    match data {
                        EntityData::$variant(entity) => Some(entity),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_entity!(
    Node,
    Port,
    Link,
    SwitchingService,
    AdaptationService,
    DeadaptationService,
    Topology,
    PortGroup,
    LinkGroup,
    BidirectionalPort,
    BidirectionalLink,
    Location,
    Lifetime,
    Label,
    LabelGroup,
    OrderedList,
    ListItem,
);
