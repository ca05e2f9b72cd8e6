//! Per-variant element layout.
//!
//! Node, Topology and Port wrap related objects in `Relation` elements.
//! Composition relations (Node implementedBy, the ports and links of a
//! SwitchingService, the ports of (de)adaptation services) are nested as
//! plain children.

use crate::core::emitter::{Emitter, RelationType, ToNml};
use crate::domain::group::{BidirectionalLink, BidirectionalPort, LinkGroup, PortGroup, Topology};
use crate::domain::model::{Label, Lifetime, Location};
use crate::domain::network::{Link, Node, Port};
use crate::domain::ports::MarkupBuilder;
use crate::domain::service::{AdaptationService, DeadaptationService, SwitchingService};
use crate::utils::error::Result;

impl ToNml for Node {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open_object(self, parent)?;

        emitter.relations(this, RelationType::HasInboundPort, self.inbound_ports().iter().copied())?;
        emitter.relations(this, RelationType::HasOutboundPort, self.outbound_ports().iter().copied())?;
        emitter.relations(this, RelationType::HasService, self.services().iter().copied())?;
        emitter.nest(this, self.implementing_nodes().iter().copied())?;

        Ok(this)
    }
}

impl ToNml for Port {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open_object(self, parent)?;
        emitter.attribute(this, "encoding", self.encoding());

        if let Some(label) = self.label() {
            emitter.relation(this, RelationType::HasLabel, label)?;
        }
        emitter.relations(this, RelationType::HasService, self.services().iter().copied())?;
        emitter.relations(this, RelationType::IsSink, self.sink_links().iter().copied())?;
        emitter.relations(this, RelationType::IsSource, self.source_links().iter().copied())?;

        Ok(this)
    }
}

impl ToNml for Link {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open_object(self, parent)?;
        emitter.attribute(this, "encoding", self.encoding());
        emitter.flag(this, "no_return_traffic", self.no_return_traffic());

        if let Some(label) = self.label() {
            emitter.relation(this, RelationType::HasLabel, label)?;
        }
        emitter.relations(
            this,
            RelationType::IsSerialCompoundLink,
            self.serial_compound_links().iter().copied(),
        )?;

        Ok(this)
    }
}

impl ToNml for SwitchingService {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open_object(self, parent)?;
        emitter.attribute(this, "encoding", self.encoding());
        emitter.flag(this, "label_swapping", self.label_swapping());

        emitter.nest(this, self.inbound_ports().iter().copied())?;
        emitter.nest(this, self.outbound_ports().iter().copied())?;
        emitter.nest(this, self.provided_links().iter().copied())?;

        Ok(this)
    }
}

impl ToNml for AdaptationService {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open_object(self, parent)?;
        emitter.attribute(this, "adaptation_function", self.adaptation_function());

        emitter.nest(this, self.providable_ports().iter().copied())?;
        emitter.nest(this, self.provided_ports().iter().copied())?;

        Ok(this)
    }
}

impl ToNml for DeadaptationService {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open_object(self, parent)?;
        emitter.attribute(this, "adaptation_function", self.adaptation_function());

        emitter.nest(this, self.providable_ports().iter().copied())?;
        emitter.nest(this, self.provided_ports().iter().copied())?;

        Ok(this)
    }
}

impl ToNml for Topology {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open_object(self, parent)?;

        emitter.relations(this, RelationType::HasNode, self.nodes().iter().copied())?;
        emitter.relations(this, RelationType::HasInboundPort, self.inbound_ports().iter().copied())?;
        emitter.relations(this, RelationType::HasOutboundPort, self.outbound_ports().iter().copied())?;
        emitter.relations(this, RelationType::HasService, self.services().iter().copied())?;
        emitter.relations(this, RelationType::HasTopology, self.topologies().iter().copied())?;

        Ok(this)
    }
}

// hasLabelGroup is stored on port and link groups but LabelGroup has no
// element form, so it is not written.

impl ToNml for PortGroup {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open_object(self, parent)?;
        emitter.attribute(this, "encoding", self.encoding());

        emitter.relations(this, RelationType::HasPort, self.ports().iter().copied())?;
        emitter.relations(this, RelationType::IsSink, self.sink_link_groups().iter().copied())?;
        emitter.relations(this, RelationType::IsSource, self.source_link_groups().iter().copied())?;

        Ok(this)
    }
}

impl ToNml for LinkGroup {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open_object(self, parent)?;
        emitter.attribute(this, "encoding", self.encoding());

        emitter.relations(this, RelationType::HasLink, self.links().iter().copied())?;
        emitter.relations(
            this,
            RelationType::IsSerialCompoundLink,
            self.serial_compound_link_groups().iter().copied(),
        )?;

        Ok(this)
    }
}

impl ToNml for BidirectionalPort {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open_object(self, parent)?;
        emitter.attribute(this, "encoding", self.encoding());
        emitter.relations(this, RelationType::HasPort, self.ports())?;
        Ok(this)
    }
}

impl ToNml for BidirectionalLink {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open_object(self, parent)?;
        emitter.attribute(this, "encoding", self.encoding());
        emitter.relations(this, RelationType::HasLink, self.links())?;
        Ok(this)
    }
}

impl ToNml for Location {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open("Location", parent);
        emitter.attribute(this, "id", self.identification.as_deref());
        emitter.attribute(this, "name", self.name.as_deref());
        emitter.number(this, "long", self.longitude);
        emitter.number(this, "lat", self.latitude);
        emitter.number(this, "alt", self.altitude);
        emitter.attribute(this, "unlocode", self.unlocode.as_deref());
        emitter.attribute(this, "address", self.address.as_deref());
        Ok(this)
    }
}

impl ToNml for Lifetime {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open("Lifetime", parent);
        emitter.attribute(this, "start", self.start.as_deref());
        emitter.attribute(this, "end", self.end.as_deref());
        Ok(this)
    }
}

impl ToNml for Label {
    fn to_nml<B: MarkupBuilder>(
        &self,
        emitter: &mut Emitter<'_, B>,
        parent: Option<B::Element>,
    ) -> Result<B::Element> {
        let this = emitter.open("Label", parent);
        emitter.attribute(this, "labeltype", self.labeltype.as_deref());
        emitter.attribute(this, "value", self.value.as_deref());
        Ok(this)
    }
}
