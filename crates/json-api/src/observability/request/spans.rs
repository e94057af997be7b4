//! Route names for spans and metric labels.

use uuid::Uuid;

/// Replace identifier segments so every certificate maps onto one route.
pub(super) fn route_name(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
