#![no_main]

use libfuzzer_sys::fuzz_target;
use spline_route_network::{parse_network, write_network};

fuzz_target!(|data: &[u8]| {
    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };
    // Erfolgreich geparste Netzwerke muessen Schreiben und Neu-Einlesen unveraendert ueberstehen
    if let Ok(document) = parse_network(xml) {
        let written = write_network(document.name.as_deref(), &document.curves, &document.graph);
        let reparsed = parse_network(&written).expect("geschriebenes Netzwerk muss parsebar sein");
        assert_eq!(reparsed, document);
    }
});
