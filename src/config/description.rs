//! TOML topology descriptions.
//!
//! Every entry carries a local `key`; relations name other entries by key.
//! Building happens in two passes: all entities are created first, then the
//! relations are wired through the same API a library caller would use, so
//! every alias, lifetime and adaptation rule still applies.

use crate::domain::entity::{Entity, EntityId, Handle};
use crate::domain::graph::NmlGraph;
use crate::domain::group::{BidirectionalLink, BidirectionalPort, LinkGroup, PortGroup, Topology};
use crate::domain::model::{Label, Lifetime, Location};
use crate::domain::network::{Link, NetworkObject, Node, Port};
use crate::domain::service::{AdaptationService, DeadaptationService, ServiceId, SwitchingService};
use crate::utils::error::{NmlError, Result};
use crate::utils::validation::Validate;
use chrono::DateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyDescription {
    pub topology: TopologyEntry,
    #[serde(default, rename = "location")]
    pub locations: Vec<LocationEntry>,
    #[serde(default, rename = "lifetime")]
    pub lifetimes: Vec<LifetimeEntry>,
    #[serde(default, rename = "label")]
    pub labels: Vec<LabelEntry>,
    #[serde(default, rename = "port")]
    pub ports: Vec<PortEntry>,
    #[serde(default, rename = "link")]
    pub links: Vec<LinkEntry>,
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeEntry>,
    #[serde(default, rename = "switching_service")]
    pub switching_services: Vec<SwitchingServiceEntry>,
    #[serde(default, rename = "adaptation_service")]
    pub adaptation_services: Vec<AdaptationEntry>,
    #[serde(default, rename = "deadaptation_service")]
    pub deadaptation_services: Vec<AdaptationEntry>,
    #[serde(default, rename = "port_group")]
    pub port_groups: Vec<PortGroupEntry>,
    #[serde(default, rename = "link_group")]
    pub link_groups: Vec<LinkGroupEntry>,
    #[serde(default, rename = "bidirectional_port")]
    pub bidirectional_ports: Vec<BidirectionalPortEntry>,
    #[serde(default, rename = "bidirectional_link")]
    pub bidirectional_links: Vec<BidirectionalLinkEntry>,
    #[serde(default, rename = "sub_topology")]
    pub sub_topologies: Vec<TopologyEntry>,
}

/// Fields shared by every network object entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectEntry {
    #[serde(default)]
    pub key: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub exists_during: Vec<String>,
    pub located_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyEntry {
    #[serde(flatten)]
    pub object: ObjectEntry,
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub inbound_ports: Vec<String>,
    #[serde(default)]
    pub outbound_ports: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub topologies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationEntry {
    pub key: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub long: Option<f64>,
    pub lat: Option<f64>,
    pub alt: Option<f64>,
    pub unlocode: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifetimeEntry {
    pub key: String,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelEntry {
    pub key: String,
    pub labeltype: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortEntry {
    #[serde(flatten)]
    pub object: ObjectEntry,
    pub encoding: Option<String>,
    pub label: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub is_sink: Vec<String>,
    #[serde(default)]
    pub is_source: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkEntry {
    #[serde(flatten)]
    pub object: ObjectEntry,
    pub encoding: Option<String>,
    #[serde(default)]
    pub no_return_traffic: bool,
    pub label: Option<String>,
    #[serde(default)]
    pub serial_compound: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeEntry {
    #[serde(flatten)]
    pub object: ObjectEntry,
    #[serde(default)]
    pub inbound_ports: Vec<String>,
    #[serde(default)]
    pub outbound_ports: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub implemented_by: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwitchingServiceEntry {
    #[serde(flatten)]
    pub object: ObjectEntry,
    pub encoding: Option<String>,
    #[serde(default)]
    pub label_swapping: bool,
    #[serde(default)]
    pub inbound_ports: Vec<String>,
    #[serde(default)]
    pub outbound_ports: Vec<String>,
    #[serde(default)]
    pub provides_links: Vec<String>,
}

/// Used for both adaptation and deadaptation services.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdaptationEntry {
    #[serde(flatten)]
    pub object: ObjectEntry,
    pub adaptation_function: Option<String>,
    #[serde(default)]
    pub can_provide_ports: Vec<String>,
    #[serde(default)]
    pub provides_ports: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortGroupEntry {
    #[serde(flatten)]
    pub object: ObjectEntry,
    pub encoding: Option<String>,
    #[serde(default)]
    pub ports: Vec<String>,
    #[serde(default)]
    pub is_sink: Vec<String>,
    #[serde(default)]
    pub is_source: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkGroupEntry {
    #[serde(flatten)]
    pub object: ObjectEntry,
    pub encoding: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub serial_compound: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BidirectionalPortEntry {
    #[serde(flatten)]
    pub object: ObjectEntry,
    pub encoding: Option<String>,
    #[serde(default)]
    pub ports: Vec<[String; 2]>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BidirectionalLinkEntry {
    #[serde(flatten)]
    pub object: ObjectEntry,
    pub encoding: Option<String>,
    #[serde(default)]
    pub links: Vec<[String; 2]>,
}

impl TopologyDescription {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a description after substituting `${VAR}` from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }

    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| NmlError::description(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// Keys of every entry, in declaration order, excluding the root topology.
    fn keys(&self) -> Vec<&str> {
        let objects = self
            .ports
            .iter()
            .map(|e| &e.object)
            .chain(self.links.iter().map(|e| &e.object))
            .chain(self.nodes.iter().map(|e| &e.object))
            .chain(self.switching_services.iter().map(|e| &e.object))
            .chain(self.adaptation_services.iter().map(|e| &e.object))
            .chain(self.deadaptation_services.iter().map(|e| &e.object))
            .chain(self.port_groups.iter().map(|e| &e.object))
            .chain(self.link_groups.iter().map(|e| &e.object))
            .chain(self.bidirectional_ports.iter().map(|e| &e.object))
            .chain(self.bidirectional_links.iter().map(|e| &e.object))
            .chain(self.sub_topologies.iter().map(|e| &e.object))
            .map(|o| o.key.as_str());

        self.locations
            .iter()
            .map(|e| e.key.as_str())
            .chain(self.lifetimes.iter().map(|e| e.key.as_str()))
            .chain(self.labels.iter().map(|e| e.key.as_str()))
            .chain(objects)
            .collect()
    }

    /// Every key named by a relation, paired with the key of the entry naming it.
    fn references(&self) -> Vec<(&str, &str)> {
        fn object_refs<'a>(entry: &'a ObjectEntry, out: &mut Vec<(&'a str, &'a str)>) {
            let from = entry.key.as_str();
            out.extend(entry.aliases.iter().map(|k| (from, k.as_str())));
            out.extend(entry.exists_during.iter().map(|k| (from, k.as_str())));
            out.extend(entry.located_at.iter().map(|k| (from, k.as_str())));
        }

        fn list_refs<'a>(from: &'a str, keys: &'a [String], out: &mut Vec<(&'a str, &'a str)>) {
            out.extend(keys.iter().map(|k| (from, k.as_str())));
        }

        fn topology_refs<'a>(entry: &'a TopologyEntry, out: &mut Vec<(&'a str, &'a str)>) {
            let from = entry.object.key.as_str();
            object_refs(&entry.object, out);
            list_refs(from, &entry.nodes, out);
            list_refs(from, &entry.inbound_ports, out);
            list_refs(from, &entry.outbound_ports, out);
            list_refs(from, &entry.services, out);
            list_refs(from, &entry.topologies, out);
        }

        let mut out = Vec::new();
        topology_refs(&self.topology, &mut out);
        for entry in &self.sub_topologies {
            topology_refs(entry, &mut out);
        }
        for entry in &self.ports {
            let from = entry.object.key.as_str();
            object_refs(&entry.object, &mut out);
            out.extend(entry.label.iter().map(|k| (from, k.as_str())));
            list_refs(from, &entry.services, &mut out);
            list_refs(from, &entry.is_sink, &mut out);
            list_refs(from, &entry.is_source, &mut out);
        }
        for entry in &self.links {
            let from = entry.object.key.as_str();
            object_refs(&entry.object, &mut out);
            out.extend(entry.label.iter().map(|k| (from, k.as_str())));
            list_refs(from, &entry.serial_compound, &mut out);
        }
        for entry in &self.nodes {
            let from = entry.object.key.as_str();
            object_refs(&entry.object, &mut out);
            list_refs(from, &entry.inbound_ports, &mut out);
            list_refs(from, &entry.outbound_ports, &mut out);
            list_refs(from, &entry.services, &mut out);
            list_refs(from, &entry.implemented_by, &mut out);
        }
        for entry in &self.switching_services {
            let from = entry.object.key.as_str();
            object_refs(&entry.object, &mut out);
            list_refs(from, &entry.inbound_ports, &mut out);
            list_refs(from, &entry.outbound_ports, &mut out);
            list_refs(from, &entry.provides_links, &mut out);
        }
        for entry in self.adaptation_services.iter().chain(&self.deadaptation_services) {
            let from = entry.object.key.as_str();
            object_refs(&entry.object, &mut out);
            list_refs(from, &entry.can_provide_ports, &mut out);
            list_refs(from, &entry.provides_ports, &mut out);
        }
        for entry in &self.port_groups {
            let from = entry.object.key.as_str();
            object_refs(&entry.object, &mut out);
            list_refs(from, &entry.ports, &mut out);
            list_refs(from, &entry.is_sink, &mut out);
            list_refs(from, &entry.is_source, &mut out);
        }
        for entry in &self.link_groups {
            let from = entry.object.key.as_str();
            object_refs(&entry.object, &mut out);
            list_refs(from, &entry.links, &mut out);
            list_refs(from, &entry.serial_compound, &mut out);
        }
        for entry in &self.bidirectional_ports {
            let from = entry.object.key.as_str();
            object_refs(&entry.object, &mut out);
            for pair in &entry.ports {
                list_refs(from, pair, &mut out);
            }
        }
        for entry in &self.bidirectional_links {
            let from = entry.object.key.as_str();
            object_refs(&entry.object, &mut out);
            for pair in &entry.links {
                list_refs(from, pair, &mut out);
            }
        }
        out
    }

    /// Builds the graph and returns it with the root topology handle.
    pub fn build(&self) -> Result<(NmlGraph, Handle<Topology>)> {
        self.validate()?;
        let mut builder = GraphBuilder::default();
        let root = builder.create(self)?;
        builder.wire(self, root)?;
        tracing::info!(
            "Built topology {:?} with {} entities",
            self.topology.object.id.as_deref().unwrap_or(""),
            builder.graph.len()
        );
        Ok((builder.graph, root))
    }
}

impl Validate for TopologyDescription {
    fn validate(&self) -> Result<()> {
        let keys = self.keys();
        let mut seen = HashSet::new();
        for key in &keys {
            if key.is_empty() {
                return Err(NmlError::description("every entry needs a non-empty key"));
            }
            if !seen.insert(*key) {
                return Err(NmlError::description(format!("duplicate key {:?}", key)));
            }
        }

        for (from, key) in self.references() {
            if !seen.contains(key) {
                let from = if from.is_empty() { "topology" } else { from };
                return Err(NmlError::description(format!(
                    "{:?} references unknown key {:?}",
                    from, key
                )));
            }
        }

        for lifetime in &self.lifetimes {
            for bound in [&lifetime.start, &lifetime.end].into_iter().flatten() {
                DateTime::parse_from_rfc3339(bound).map_err(|e| {
                    NmlError::description(format!(
                        "lifetime {:?}: {:?} is not an RFC 3339 timestamp ({})",
                        lifetime.key, bound, e
                    ))
                })?;
            }
        }

        Ok(())
    }
}

#[derive(Default)]
struct GraphBuilder {
    graph: NmlGraph,
    index: HashMap<String, EntityId>,
}

impl GraphBuilder {
    fn register<T: Entity>(&mut self, key: &str, entity: T) -> Handle<T> {
        let handle = self.graph.insert(entity);
        self.index.insert(key.to_string(), handle.id());
        handle
    }

    fn lookup(&self, key: &str) -> Result<EntityId> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| NmlError::description(format!("unknown key {:?}", key)))
    }

    fn resolve<T: Entity>(&self, key: &str) -> Result<Handle<T>> {
        let id = self.lookup(key)?;
        id.typed::<T>().ok_or_else(|| {
            NmlError::description(format!("{:?} is a {}, expected a {}", key, id.kind(), T::KIND))
        })
    }

    fn resolve_all<T: Entity>(&self, keys: &[String]) -> Result<Vec<Handle<T>>> {
        keys.iter().map(|key| self.resolve(key)).collect()
    }

    fn resolve_service(&self, key: &str) -> Result<ServiceId> {
        ServiceId::try_from(self.lookup(key)?)
    }

    fn object<T: NetworkObject + Default>(entry: &ObjectEntry) -> Result<T> {
        let mut object = T::default();
        if let Some(id) = &entry.id {
            object.set_identification(id.as_str())?;
        }
        if let Some(name) = &entry.name {
            object.set_name(name.as_str());
        }
        if let Some(version) = &entry.version {
            object.set_version(version.as_str());
        }
        Ok(object)
    }

    /// First pass: one entity per entry, scalar attributes only.
    fn create(&mut self, description: &TopologyDescription) -> Result<Handle<Topology>> {
        for entry in &description.locations {
            let location = Location {
                identification: entry.id.clone(),
                name: entry.name.clone(),
                longitude: entry.long,
                latitude: entry.lat,
                altitude: entry.alt,
                unlocode: entry.unlocode.clone(),
                address: entry.address.clone(),
            };
            self.register(&entry.key, location);
        }
        for entry in &description.lifetimes {
            let lifetime = Lifetime {
                start: entry.start.clone(),
                end: entry.end.clone(),
            };
            self.register(&entry.key, lifetime);
        }
        for entry in &description.labels {
            let label = Label {
                labeltype: entry.labeltype.clone(),
                value: entry.value.clone(),
            };
            self.register(&entry.key, label);
        }

        for entry in &description.ports {
            let mut port: Port = Self::object(&entry.object)?;
            if let Some(encoding) = &entry.encoding {
                port.set_encoding(encoding.as_str());
            }
            self.register(&entry.object.key, port);
        }
        for entry in &description.links {
            let mut link: Link = Self::object(&entry.object)?;
            if let Some(encoding) = &entry.encoding {
                link.set_encoding(encoding.as_str());
            }
            link.set_no_return_traffic(entry.no_return_traffic);
            self.register(&entry.object.key, link);
        }
        for entry in &description.nodes {
            let node: Node = Self::object(&entry.object)?;
            self.register(&entry.object.key, node);
        }
        for entry in &description.switching_services {
            let mut service: SwitchingService = Self::object(&entry.object)?;
            if let Some(encoding) = &entry.encoding {
                service.set_encoding(encoding.as_str());
            }
            service.set_label_swapping(entry.label_swapping);
            self.register(&entry.object.key, service);
        }
        for entry in &description.adaptation_services {
            let mut service: AdaptationService = Self::object(&entry.object)?;
            if let Some(function) = &entry.adaptation_function {
                service.set_adaptation_function(function.as_str());
            }
            self.register(&entry.object.key, service);
        }
        for entry in &description.deadaptation_services {
            let mut service: DeadaptationService = Self::object(&entry.object)?;
            if let Some(function) = &entry.adaptation_function {
                service.set_adaptation_function(function.as_str());
            }
            self.register(&entry.object.key, service);
        }
        for entry in &description.port_groups {
            let mut group: PortGroup = Self::object(&entry.object)?;
            if let Some(encoding) = &entry.encoding {
                group.set_encoding(encoding.as_str());
            }
            self.register(&entry.object.key, group);
        }
        for entry in &description.link_groups {
            let mut group: LinkGroup = Self::object(&entry.object)?;
            if let Some(encoding) = &entry.encoding {
                group.set_encoding(encoding.as_str());
            }
            self.register(&entry.object.key, group);
        }
        for entry in &description.bidirectional_ports {
            let mut port: BidirectionalPort = Self::object(&entry.object)?;
            if let Some(encoding) = &entry.encoding {
                port.set_encoding(encoding.as_str());
            }
            self.register(&entry.object.key, port);
        }
        for entry in &description.bidirectional_links {
            let mut link: BidirectionalLink = Self::object(&entry.object)?;
            if let Some(encoding) = &entry.encoding {
                link.set_encoding(encoding.as_str());
            }
            self.register(&entry.object.key, link);
        }
        for entry in &description.sub_topologies {
            let topology: Topology = Self::object(&entry.object)?;
            self.register(&entry.object.key, topology);
        }

        let root: Topology = Self::object(&description.topology.object)?;
        Ok(self.graph.insert(root))
    }

    fn wire_object<T: NetworkObject>(&mut self, handle: Handle<T>, entry: &ObjectEntry) -> Result<()> {
        for key in &entry.aliases {
            let alias = self.lookup(key)?;
            self.graph[handle].is_alias(alias)?;
        }
        for key in &entry.exists_during {
            let lifetime = self.lookup(key)?;
            self.graph[handle].exists_during(lifetime)?;
        }
        if let Some(key) = &entry.located_at {
            let location = self.resolve::<Location>(key)?;
            self.graph[handle].located_at(location);
        }
        Ok(())
    }

    fn wire_topology(&mut self, handle: Handle<Topology>, entry: &TopologyEntry) -> Result<()> {
        self.wire_object(handle, &entry.object)?;
        for node in self.resolve_all::<Node>(&entry.nodes)? {
            self.graph[handle].has_node(node);
        }
        for port in self.resolve_all::<Port>(&entry.inbound_ports)? {
            self.graph[handle].has_inbound_port(port);
        }
        for port in self.resolve_all::<Port>(&entry.outbound_ports)? {
            self.graph[handle].has_outbound_port(port);
        }
        for key in &entry.services {
            let service = self.resolve_service(key)?;
            self.graph[handle].has_service(service);
        }
        for topology in self.resolve_all::<Topology>(&entry.topologies)? {
            self.graph[handle].has_topology(topology);
        }
        Ok(())
    }

    /// Second pass: relations, in declaration order.
    fn wire(&mut self, description: &TopologyDescription, root: Handle<Topology>) -> Result<()> {
        for entry in &description.ports {
            let port = self.resolve::<Port>(&entry.object.key)?;
            self.wire_object(port, &entry.object)?;
            if let Some(key) = &entry.label {
                let label = self.resolve::<Label>(key)?;
                self.graph[port].has_label(label);
            }
            for key in &entry.services {
                let service = self.resolve_service(key)?;
                self.graph[port].has_service(service);
            }
            for link in self.resolve_all::<Link>(&entry.is_sink)? {
                self.graph[port].is_sink(link);
            }
            for link in self.resolve_all::<Link>(&entry.is_source)? {
                self.graph[port].is_source(link);
            }
        }

        for entry in &description.links {
            let link = self.resolve::<Link>(&entry.object.key)?;
            self.wire_object(link, &entry.object)?;
            if let Some(key) = &entry.label {
                let label = self.resolve::<Label>(key)?;
                self.graph[link].has_label(label);
            }
            if !entry.serial_compound.is_empty() {
                let links = self.resolve_all::<Link>(&entry.serial_compound)?;
                self.graph[link].is_serial_compound_link(links);
            }
        }

        for entry in &description.nodes {
            let node = self.resolve::<Node>(&entry.object.key)?;
            self.wire_object(node, &entry.object)?;
            for port in self.resolve_all::<Port>(&entry.inbound_ports)? {
                self.graph[node].has_inbound_port(port);
            }
            for port in self.resolve_all::<Port>(&entry.outbound_ports)? {
                self.graph[node].has_outbound_port(port);
            }
            for key in &entry.services {
                let service = self.resolve_service(key)?;
                self.graph[node].has_service(service);
            }
            for implementing in self.resolve_all::<Node>(&entry.implemented_by)? {
                self.graph[node].implemented_by(implementing);
            }
        }

        for entry in &description.switching_services {
            let service = self.resolve::<SwitchingService>(&entry.object.key)?;
            self.wire_object(service, &entry.object)?;
            for port in self.resolve_all::<Port>(&entry.inbound_ports)? {
                self.graph[service].has_inbound_port(port);
            }
            for port in self.resolve_all::<Port>(&entry.outbound_ports)? {
                self.graph[service].has_outbound_port(port);
            }
            for link in self.resolve_all::<Link>(&entry.provides_links)? {
                self.graph[service].provides_link(link);
            }
        }

        for entry in &description.adaptation_services {
            let service = self.resolve::<AdaptationService>(&entry.object.key)?;
            self.wire_object(service, &entry.object)?;
            for key in &entry.can_provide_ports {
                let port = self.lookup(key)?;
                self.graph[service].can_provide_port(port)?;
            }
            for port in self.resolve_all::<Port>(&entry.provides_ports)? {
                self.graph[service].provides_port(port);
            }
        }

        for entry in &description.deadaptation_services {
            let service = self.resolve::<DeadaptationService>(&entry.object.key)?;
            self.wire_object(service, &entry.object)?;
            for key in &entry.can_provide_ports {
                let port = self.lookup(key)?;
                self.graph[service].can_provide_port(port)?;
            }
            for port in self.resolve_all::<Port>(&entry.provides_ports)? {
                self.graph[service].provides_port(port);
            }
        }

        for entry in &description.port_groups {
            let group = self.resolve::<PortGroup>(&entry.object.key)?;
            self.wire_object(group, &entry.object)?;
            for port in self.resolve_all::<Port>(&entry.ports)? {
                self.graph[group].has_port(port);
            }
            for link_group in self.resolve_all::<LinkGroup>(&entry.is_sink)? {
                self.graph[group].is_sink(link_group);
            }
            for link_group in self.resolve_all::<LinkGroup>(&entry.is_source)? {
                self.graph[group].is_source(link_group);
            }
        }

        for entry in &description.link_groups {
            let group = self.resolve::<LinkGroup>(&entry.object.key)?;
            self.wire_object(group, &entry.object)?;
            for link in self.resolve_all::<Link>(&entry.links)? {
                self.graph[group].has_link(link);
            }
            for link_group in self.resolve_all::<LinkGroup>(&entry.serial_compound)? {
                self.graph[group].is_serial_compound_link(link_group);
            }
        }

        for entry in &description.bidirectional_ports {
            let bidirectional = self.resolve::<BidirectionalPort>(&entry.object.key)?;
            self.wire_object(bidirectional, &entry.object)?;
            for [first, second] in &entry.ports {
                let first = self.resolve::<Port>(first)?;
                let second = self.resolve::<Port>(second)?;
                self.graph[bidirectional].has_port(first, second);
            }
        }

        for entry in &description.bidirectional_links {
            let bidirectional = self.resolve::<BidirectionalLink>(&entry.object.key)?;
            self.wire_object(bidirectional, &entry.object)?;
            for [first, second] in &entry.links {
                let first = self.resolve::<Link>(first)?;
                let second = self.resolve::<Link>(second)?;
                self.graph[bidirectional].has_link(first, second);
            }
        }

        for entry in &description.sub_topologies {
            let topology = self.resolve::<Topology>(&entry.object.key)?;
            self.wire_topology(topology, entry)?;
        }

        self.wire_topology(root, &description.topology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[topology]
id = "urn:ogf:network:example.org:2013:topology"
name = "example"
nodes = ["node-a"]

[[port]]
key = "port-x"
id = "urn:ogf:network:example.org:port:x"

[[node]]
key = "node-a"
inbound_ports = ["port-x"]
"#;

    #[test]
    fn test_parse_minimal_description() {
        let description = TopologyDescription::from_toml_str(MINIMAL).unwrap();
        assert_eq!(description.nodes.len(), 1);
        assert_eq!(description.ports[0].object.key, "port-x");
        assert_eq!(description.topology.nodes, vec!["node-a".to_string()]);
    }

    #[test]
    fn test_build_wires_relations() {
        let description = TopologyDescription::from_toml_str(MINIMAL).unwrap();
        let (graph, root) = description.build().unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph[root].name(), Some("example"));
        let node = graph[root].nodes()[0];
        assert_eq!(graph[node].inbound_ports().len(), 1);
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let content = r#"
[topology]

[[port]]
key = "p"

[[link]]
key = "p"
"#;
        let description = TopologyDescription::from_toml_str(content).unwrap();
        let err = description.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate key"));
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let content = r#"
[topology]
nodes = ["ghost"]
"#;
        let description = TopologyDescription::from_toml_str(content).unwrap();
        let err = description.validate().unwrap_err();
        assert!(err.to_string().contains("unknown key \"ghost\""));
        assert!(description.build().is_err());
    }

    #[test]
    fn test_unknown_reference_in_nested_entry_rejected() {
        let content = r#"
[topology]

[[port]]
key = "a"

[[bidirectional_port]]
key = "pair"
ports = [["a", "missing"]]
"#;
        let description = TopologyDescription::from_toml_str(content).unwrap();
        let err = description.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Topology description error: \"pair\" references unknown key \"missing\""
        );
    }

    #[test]
    fn test_references_checked_across_all_entries() {
        let description = TopologyDescription::from_toml_str(MINIMAL).unwrap();
        assert!(description.validate().is_ok());

        let references: Vec<&str> = description.references().into_iter().map(|(_, k)| k).collect();
        assert_eq!(references, vec!["node-a", "port-x"]);
    }

    #[test]
    fn test_wrong_kind_reference_rejected() {
        let content = r#"
[topology]
nodes = ["p"]

[[port]]
key = "p"
"#;
        let description = TopologyDescription::from_toml_str(content).unwrap();
        let err = description.build().unwrap_err();
        assert!(err.to_string().contains("expected a Node"));
    }

    #[test]
    fn test_invalid_lifetime_rejected() {
        let content = r#"
[topology]

[[lifetime]]
key = "always"
start = "yesterday"
"#;
        let description = TopologyDescription::from_toml_str(content).unwrap();
        assert!(description.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NML_TEST_TOPOLOGY_ID", "urn:ogf:network:env.example.org:topo");

        let content = r#"
[topology]
id = "${NML_TEST_TOPOLOGY_ID}"
"#;
        let description = TopologyDescription::from_toml_str(content).unwrap();
        assert_eq!(
            description.topology.object.id.as_deref(),
            Some("urn:ogf:network:env.example.org:topo")
        );

        std::env::remove_var("NML_TEST_TOPOLOGY_ID");
    }
}
