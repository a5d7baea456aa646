//! Property tests for the draw-tool state machine and geometry round trips.

use proptest::prelude::*;

use carbonmap::models::{FeatureCollection, LatLng};
use carbonmap::{CompletedShape, DrawEvent, DrawMode, DrawTool, Geometry, RegionStore, ToolKind};

fn latlng() -> impl Strategy<Value = LatLng> {
    ((-85.0f64..85.0), (-180.0f64..180.0)).prop_map(|(lat, lng)| LatLng::new(lat, lng))
}

fn vertices() -> impl Strategy<Value = Vec<LatLng>> {
    proptest::collection::vec(latlng(), 3..12)
}

fn draw_event() -> impl Strategy<Value = DrawEvent> {
    prop_oneof![
        Just(DrawEvent::ToolSelected(ToolKind::Rectangle)),
        Just(DrawEvent::ToolSelected(ToolKind::Polygon)),
        Just(DrawEvent::Cancel),
        Just(DrawEvent::LocationFound),
        (latlng(), latlng()).prop_map(|(a, b)| {
            DrawEvent::DrawCompleted(CompletedShape::Rectangle {
                south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
                north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
            })
        }),
        vertices().prop_map(|v| DrawEvent::DrawCompleted(CompletedShape::Polygon {
            vertices: v
        })),
    ]
}

proptest! {
    /// Geometry only ever reaches the store through a completion of the
    /// matching active tool; tool switches and cancels emit nothing.
    #[test]
    fn tool_switching_never_leaks_partial_geometry(events in proptest::collection::vec(draw_event(), 0..40)) {
        let mut tool = DrawTool::new();
        let mut store = RegionStore::new();

        for event in events {
            let mode_before = tool.mode();
            let emitted = tool.handle(event.clone());

            match &event {
                DrawEvent::ToolSelected(_) | DrawEvent::Cancel | DrawEvent::LocationFound => {
                    prop_assert!(emitted.is_none());
                }
                DrawEvent::DrawCompleted(shape) => {
                    // A completion always ends the session.
                    prop_assert_eq!(tool.mode(), DrawMode::Idle);
                    if emitted.is_some() {
                        let matching = matches!(
                            (mode_before, shape),
                            (DrawMode::DrawingRectangle, CompletedShape::Rectangle { .. })
                                | (DrawMode::DrawingPolygon, CompletedShape::Polygon { .. })
                        );
                        prop_assert!(matching);
                    }
                }
            }

            if let Some(geometry) = emitted {
                store.add(geometry);
            }
        }

        // Whatever ended up stored is structurally valid for submission.
        let collection = store.to_feature_collection();
        prop_assert_eq!(collection.features.len(), store.len());
    }

    /// Serializing the store and re-parsing the document preserves every
    /// vertex in order, bit for bit.
    #[test]
    fn serialization_round_trip_preserves_vertex_sequence(v in vertices()) {
        let mut distinct: Vec<LatLng> = Vec::new();
        for p in &v {
            if !distinct.contains(p) {
                distinct.push(*p);
            }
        }
        prop_assume!(distinct.len() >= 3);

        let mut store = RegionStore::new();
        store.add(Geometry::polygon(distinct.clone()).unwrap());

        let json = serde_json::to_string(&store.to_feature_collection()).unwrap();
        let parsed: FeatureCollection = serde_json::from_str(&json).unwrap();
        let points = parsed.features[0].geometry.points();

        prop_assert_eq!(&points[..distinct.len()], &distinct[..]);
        prop_assert_eq!(points.last(), points.first());
    }

    /// Rectangles survive the GeoJSON round trip with their corner
    /// coordinates intact.
    #[test]
    fn rectangle_round_trip_preserves_corners(a in latlng(), b in latlng()) {
        let sw = LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng));
        let ne = LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng));

        let mut store = RegionStore::new();
        store.add(Geometry::rectangle(sw, ne));

        let json = serde_json::to_string(&store.to_feature_collection()).unwrap();
        let parsed: FeatureCollection = serde_json::from_str(&json).unwrap();
        let points = parsed.features[0].geometry.points();

        prop_assert_eq!(points[0], sw);
        prop_assert_eq!(points[2], ne);
    }
}
