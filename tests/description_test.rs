use anyhow::Result;
use nml::{EntityKind, NetworkObject, NmlError, RenderOptions, TopologyDescription};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn example_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/example-topology.toml")
}

#[test]
fn test_example_description_renders() -> Result<()> {
    let description = TopologyDescription::from_file(example_path())?;
    let (graph, root) = description.build()?;

    assert_eq!(graph[root].identification(), Some("urn:ogf:network:example.org:2013:topology"));
    assert_eq!(graph.iter_kind(EntityKind::Port).count(), 4);

    let xml = graph.to_xml_string(root)?;
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><nml:Topology xmlns:nml="http://schemas.ogf.org/nml/2013/05/base" id="urn:ogf:network:example.org:2013:topology" name="example.org" version="2013-05-01T00:00:00Z">"#));
    assert!(xml.contains(r#"<Relation type="existsDuring"><Lifetime start="2013-05-01T00:00:00Z"/></Relation>"#));
    assert!(xml.contains(r#"<Relation type="locatedAt"><Location name="Amsterdam" long="4.9041" lat="52.3676" unlocode="NLAMS"/></Relation>"#));
    assert!(xml.contains(r#"<nml:Link id="urn:ogf:network:example.org:2013:link:a-to-b" no_return_traffic="true"/>"#));
    assert!(xml.contains(r#"label_swapping="true""#));
    assert!(!xml.contains("hasOutoundPort"));
    Ok(())
}

#[test]
fn test_example_bidirectional_link_renders() -> Result<()> {
    let description = TopologyDescription::from_file(example_path())?;
    let (graph, _) = description.build()?;

    let bidirectional = graph
        .iter_kind(EntityKind::BidirectionalLink)
        .next()
        .expect("example declares one bidirectional link");
    let xml = graph.render(
        bidirectional,
        &RenderOptions {
            declaration: false,
            indent: None,
        },
    )?;

    assert!(xml.starts_with(
        r#"<nml:BidirectionalLink xmlns:nml="http://schemas.ogf.org/nml/2013/05/base" id="urn:ogf:network:example.org:2013:link:a-b">"#
    ));
    assert!(xml.contains(
        r#"<Relation type="hasLink"><nml:Link id="urn:ogf:network:example.org:2013:link:a-to-b" no_return_traffic="true"/></Relation><Relation type="hasLink"><nml:Link id="urn:ogf:network:example.org:2013:link:b-to-a"/></Relation>"#
    ));
    Ok(())
}

#[test]
fn test_description_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(
        br#"
[topology]
id = "urn:ogf:network:file.example.org:topology"
nodes = ["n"]

[[node]]
key = "n"
name = "from-file"
"#,
    )?;

    let description = TopologyDescription::from_file(file.path())?;
    let (graph, root) = description.build()?;
    let xml = graph.render(
        root,
        &RenderOptions {
            declaration: false,
            indent: Some(2),
        },
    )?;

    let expected = concat!(
        "<nml:Topology xmlns:nml=\"http://schemas.ogf.org/nml/2013/05/base\" id=\"urn:ogf:network:file.example.org:topology\">\n",
        "  <Relation type=\"hasNode\">\n",
        "    <nml:Node name=\"from-file\"/>\n",
        "  </Relation>\n",
        "</nml:Topology>\n",
    );
    assert_eq!(xml, expected);
    Ok(())
}

#[test]
fn test_invalid_identification_fails_build() {
    let description = TopologyDescription::from_toml_str(
        r#"
[topology]

[[port]]
key = "p"
id = "not an absolute uri"
"#,
    )
    .unwrap();

    let err = description.build().unwrap_err();
    assert!(matches!(err, NmlError::Identification { .. }));
    assert!(err.is_validation());
}

#[test]
fn test_alias_of_other_kind_fails_build() {
    let description = TopologyDescription::from_toml_str(
        r#"
[topology]

[[port]]
key = "p"

[[node]]
key = "n"
aliases = ["p"]
"#,
    )
    .unwrap();

    let err = description.build().unwrap_err();
    assert!(matches!(
        err,
        NmlError::IsAlias {
            expected: EntityKind::Node,
            found: EntityKind::Port
        }
    ));
}

#[test]
fn test_exists_during_non_lifetime_fails_build() {
    let description = TopologyDescription::from_toml_str(
        r#"
[topology]
exists_during = ["ams"]

[[location]]
key = "ams"
"#,
    )
    .unwrap();

    let err = description.build().unwrap_err();
    assert!(matches!(
        err,
        NmlError::ExistsDuring {
            found: EntityKind::Location
        }
    ));
}

#[test]
fn test_adaptation_can_provide_port_group() -> Result<()> {
    let description = TopologyDescription::from_toml_str(
        r#"
[topology]
services = ["adapt"]

[[port]]
key = "p"

[[port_group]]
key = "vlans"
ports = ["p"]

[[adaptation_service]]
key = "adapt"
adaptation_function = "http://schemas.ogf.org/nml/2012/10/ethernet#vlan"
can_provide_ports = ["vlans"]
provides_ports = ["p"]
"#,
    )?;

    let (graph, root) = description.build()?;
    let xml = graph.to_xml_string(root)?;
    assert!(xml.contains(
        "<nml:PortGroup><Relation type=\"hasPort\"><nml:Port/></Relation></nml:PortGroup><nml:Port/>"
    ));
    Ok(())
}

#[test]
fn test_can_provide_link_fails_build() {
    let description = TopologyDescription::from_toml_str(
        r#"
[topology]

[[link]]
key = "l"

[[deadaptation_service]]
key = "demux"
can_provide_ports = ["l"]
"#,
    )
    .unwrap();

    let err = description.build().unwrap_err();
    assert!(matches!(
        err,
        NmlError::CanProvidePort {
            service: EntityKind::DeadaptationService,
            found: EntityKind::Link
        }
    ));
}

#[test]
fn test_missing_file_reports_io_error() {
    let err = TopologyDescription::from_file("/nonexistent/topology.toml").unwrap_err();
    assert!(matches!(err, NmlError::Io(_)));
}
