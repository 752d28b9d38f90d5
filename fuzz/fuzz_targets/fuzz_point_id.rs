#![no_main]

use libfuzzer_sys::fuzz_target;
use spline_route_network::PointId;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(point) = text.parse::<PointId>() {
            assert_eq!(point.to_string().parse::<PointId>().ok(), Some(point));
        }
    }
});
