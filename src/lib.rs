//! Object model for the OGF Network Markup Language (NML) and an emitter
//! that writes an entity graph as an NML document.
//!
//! ```
//! use nml::{NetworkObject, NmlGraph, Node, Port, Topology};
//!
//! let mut graph = NmlGraph::new();
//! let topology = graph.insert(Topology::new());
//! let node = graph.insert(Node::new());
//! let port = graph.insert(Port::new());
//!
//! graph[topology].has_node(node);
//! graph[node].has_inbound_port(port);
//! graph[port]
//!     .set_identification("urn:ogf:network:example.org:port:x")
//!     .unwrap();
//!
//! let xml = graph.to_xml_string(topology).unwrap();
//! assert!(xml.contains(r#"<nml:Port id="urn:ogf:network:example.org:port:x"/>"#));
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TopologyDescription;

pub use crate::core::{ElementRef, ElementTree, RelationType, RenderOptions, NML_NAMESPACE};
pub use domain::entity::{Entity, EntityId, EntityKind, Handle};
pub use domain::graph::NmlGraph;
pub use domain::group::{
    BidirectionalLink, BidirectionalPort, Group, LinkGroup, PortGroup, Topology,
};
pub use domain::model::{Label, LabelGroup, Lifetime, ListItem, Location, OrderedList};
pub use domain::network::{Link, NetworkObject, Node, Port};
pub use domain::ports::{MarkupBuilder, UriValidator};
pub use domain::service::{
    AdaptationService, DeadaptationService, Service, ServiceId, SwitchingService,
};
pub use utils::error::{NmlError, Result};
