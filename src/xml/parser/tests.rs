use super::*;
use crate::core::CurveProvider;

fn pid(curve: usize, point: usize) -> PointId {
    PointId::new(curve, point)
}

const TWO_SPLINES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<SplineNetwork version="1">
    <name>Kreuzung</name>
    <splines>
        <spline>
            <x>0,1,2,3,4,5,6</x>
            <y>0,0,0,0,0,0,0</y>
            <z>0,0,0,0,0,0,0</z>
        </spline>
        <spline>
            <x>3,3,3,3</x>
            <y>0,1,2,3</y>
            <z>0,0,0,0</z>
        </spline>
    </splines>
    <nodes>
        <node>0-3,1-0</node>
        <node>0-6</node>
    </nodes>
</SplineNetwork>
"#;

#[test]
fn parses_splines_and_junctions() {
    let document = parse_network(TWO_SPLINES).expect("Parsing erwartet");

    assert_eq!(document.name.as_deref(), Some("Kreuzung"));
    assert_eq!(document.curves.curve_count(), 2);
    assert_eq!(document.curves.control_point_count(0), 7);
    assert_eq!(document.curves.control_point(1, 3), Vec3::new(3.0, 3.0, 0.0));
    assert_eq!(document.graph.len(), 2);
    assert_eq!(document.graph.members(0), vec![pid(0, 3), pid(1, 0)]);
    assert_eq!(document.graph.members(1), vec![pid(0, 6)]);
}

#[test]
fn rejects_unknown_root_element() {
    let err = parse_network("<RoadNetwork version=\"3\"></RoadNetwork>").expect_err("Fehler erwartet");
    assert!(format!("{err:#}").contains("Wurzelelement"));
}

#[test]
fn rejects_missing_root() {
    assert!(parse_network("").is_err());
}

#[test]
fn empty_network_is_valid() {
    let document = parse_network("<SplineNetwork/>").expect("Parsing erwartet");
    assert!(document.curves.is_empty());
    assert!(document.graph.is_empty());
}

#[test]
fn mismatched_coordinate_lists_fail_with_spline_index() {
    let xml = r#"
    <SplineNetwork>
        <splines>
            <spline><x>0,1,2,3</x><y>0,0,0</y><z>0,0,0,0</z></spline>
        </splines>
    </SplineNetwork>
    "#;
    let err = parse_network(xml).expect_err("Fehler erwartet");
    let msg = format!("{err:#}");
    assert!(msg.contains("Spline 0"));
    assert!(msg.contains("Laengen"));
}

#[test]
fn invalid_point_count_fails() {
    let xml = r#"
    <SplineNetwork>
        <splines>
            <spline><x>0,1,2,3,4</x><y>0,0,0,0,0</y><z>0,0,0,0,0</z></spline>
        </splines>
    </SplineNetwork>
    "#;
    let err = parse_network(xml).expect_err("Fehler erwartet");
    assert!(format!("{err:#}").contains("3n+1"));
}

#[test]
fn non_numeric_coordinate_fails() {
    let xml = r#"
    <SplineNetwork>
        <splines>
            <spline><x>0,a,2,3</x><y>0,0,0,0</y><z>0,0,0,0</z></spline>
        </splines>
    </SplineNetwork>
    "#;
    let err = parse_network(xml).expect_err("Fehler erwartet");
    assert!(format!("{err:#}").contains("X-Koordinaten"));
}

#[test]
fn non_finite_coordinate_fails() {
    let xml = r#"
    <SplineNetwork>
        <splines>
            <spline><x>0,1,2,inf</x><y>0,0,0,0</y><z>0,0,0,0</z></spline>
        </splines>
    </SplineNetwork>
    "#;
    assert!(parse_network(xml).is_err());
}

#[test]
fn unknown_points_and_malformed_identities_are_skipped() {
    let xml = r#"
    <SplineNetwork>
        <splines>
            <spline><x>0,1,2,3</x><y>0,0,0,0</y><z>0,0,0,0</z></spline>
        </splines>
        <nodes>
            <node>0-0,7-0,abc</node>
            <node>0-9</node>
            <node>0-3</node>
        </nodes>
    </SplineNetwork>
    "#;
    let document = parse_network(xml).expect("Parsing erwartet");

    assert_eq!(document.graph.len(), 2);
    assert_eq!(document.graph.members(0), vec![pid(0, 0)]);
    assert_eq!(document.graph.members(1), vec![pid(0, 3)]);
}

#[test]
fn legacy_connections_are_folded_into_junctions() {
    let xml = r#"
    <SplineNetwork version="1">
        <splines>
            <spline><x>0,1,2,3</x><y>0,0,0,0</y><z>0,0,0,0</z></spline>
            <spline><x>3,4,5,6</x><y>0,0,0,0</y><z>0,0,0,0</z></spline>
        </splines>
        <connections>
            <keys>0-3</keys>
            <values>1-0</values>
        </connections>
    </SplineNetwork>
    "#;
    let document = parse_network(xml).expect("Parsing erwartet");

    assert_eq!(document.graph.len(), 1);
    assert!(document.graph.are_connected(pid(0, 3), pid(1, 0)));
}

#[test]
fn legacy_connections_with_mismatched_lists_fail() {
    let xml = r#"
    <SplineNetwork>
        <splines>
            <spline><x>0,1,2,3</x><y>0,0,0,0</y><z>0,0,0,0</z></spline>
        </splines>
        <connections>
            <keys>0-0;0-3</keys>
            <values>0-3</values>
        </connections>
    </SplineNetwork>
    "#;
    let err = parse_network(xml).expect_err("Fehler erwartet");
    assert!(format!("{err:#}").contains("Verbindungstabelle"));
}

#[test]
fn invalid_version_attribute_fails() {
    assert!(parse_network("<SplineNetwork version=\"x\"></SplineNetwork>").is_err());
}

#[test]
fn malformed_xml_fails() {
    assert!(parse_network("<SplineNetwork><splines></SplineNetwork>").is_err());
}

#[test]
fn name_with_special_characters_survives_write_and_parse() {
    let curves: SplineNetwork = [BezierSpline::line(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0))]
        .into_iter()
        .collect();
    let mut graph = JunctionGraph::new();
    graph.mark_as_junction(pid(0, 0));

    for name in ["Nord & Sued", "<Kreuzung> \"A\" & 'B'", "a\r\nb", "&"] {
        let xml = crate::xml::write_network(Some(name), &curves, &graph);
        let document = parse_network(&xml).expect("Parsing erwartet");
        assert_eq!(document.name.as_deref(), Some(name));
        assert_eq!(document.curves, curves);
        assert_eq!(document.graph, graph);
    }
}

#[test]
fn resolves_character_references_in_name() {
    let xml = "<SplineNetwork version=\"1\"><name> A&#38;B &#x263A; &unbekannt; </name></SplineNetwork>";
    let document = parse_network(xml).expect("Parsing erwartet");
    assert_eq!(document.name.as_deref(), Some("A&B \u{263A}"));
}

#[test]
fn whitespace_only_name_is_dropped() {
    let xml = "<SplineNetwork version=\"1\"><name>   </name></SplineNetwork>";
    let document = parse_network(xml).expect("Parsing erwartet");
    assert!(document.name.is_none());
}
