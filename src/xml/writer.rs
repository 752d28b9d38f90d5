//! Writer für Kurven-Netzwerk-Dateien.
//!
//! Die alte Verbindungstabelle wird nicht mehr geschrieben; beim Laden wird
//! sie bereits in Junctions überführt.

use super::codec::encode_junctions;
use super::parser::SUPPORTED_VERSION;
use crate::core::{JunctionGraph, SplineNetwork};

/// Schreibt Kurven und Junctions als XML.
pub fn write_network(name: Option<&str>, curves: &SplineNetwork, graph: &JunctionGraph) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    output.push_str(&format!(
        "<SplineNetwork version=\"{}\">\n",
        SUPPORTED_VERSION
    ));

    if let Some(name) = name {
        output.push_str(&format!("    <name>{}</name>\n", escape_xml(name)));
    }

    output.push_str("    <splines>\n");
    for spline in curves.iter() {
        let points = spline.points();
        let join = |axis: fn(&glam::Vec3) -> f32| {
            points
                .iter()
                .map(|p| format_float(axis(p)))
                .collect::<Vec<_>>()
                .join(",")
        };
        output.push_str("        <spline>\n");
        output.push_str(&format!("            <x>{}</x>\n", join(|p| p.x)));
        output.push_str(&format!("            <y>{}</y>\n", join(|p| p.y)));
        output.push_str(&format!("            <z>{}</z>\n", join(|p| p.z)));
        output.push_str("        </spline>\n");
    }
    output.push_str("    </splines>\n");

    output.push_str("    <nodes>\n");
    for line in encode_junctions(graph) {
        output.push_str(&format!("        <node>{}</node>\n", escape_xml(&line)));
    }
    output.push_str("    </nodes>\n");

    output.push_str("</SplineNetwork>\n");
    output
}

/// Kürzeste Darstellung, die beim Einlesen exakt denselben Wert ergibt.
fn format_float(value: f32) -> String {
    format!("{}", value)
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
        .replace('\r', "&#13;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BezierSpline, PointId};
    use glam::Vec3;

    #[test]
    fn format_float_is_lossless() {
        assert_eq!(format_float(10.0), "10");
        assert_eq!(format_float(-0.5), "-0.5");
        let third = 1.0f32 / 3.0;
        assert_eq!(format_float(third).parse::<f32>().ok(), Some(third));
    }

    #[test]
    fn escape_xml_replaces_special_characters() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }

    #[test]
    fn writes_splines_and_nodes() {
        let curves: SplineNetwork = [BezierSpline::line(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0))]
            .into_iter()
            .collect();
        let mut graph = JunctionGraph::new();
        graph.mark_as_junction(PointId::new(0, 3));

        let xml = write_network(Some("Test & Co"), &curves, &graph);

        assert!(xml.contains("<SplineNetwork version=\"1\">"));
        assert!(xml.contains("<name>Test &amp; Co</name>"));
        assert!(xml.contains("<x>0,1,2,3</x>"));
        assert!(xml.contains("<y>0,0,0,0</y>"));
        assert!(xml.contains("<node>0-3</node>"));
        assert!(!xml.contains("<connections>"));
    }
}
