//! Decode pipeline tests: sniffing, strict decoders, collection expansion.

use fluree_db_geojson::{
    as_map, decode, decode_collection, decode_line_string, decode_multi_line_string,
    decode_multi_point, decode_multi_polygon, decode_point, decode_polygon, Envelope,
    GeoJsonError, Geometry, GeometryType,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

// ============================================================================
// Fixtures
// ============================================================================

fn fixture(kind: GeometryType) -> Value {
    match kind {
        GeometryType::Point => json!({"type": "Point", "coordinates": [100.0, 0.0]}),
        GeometryType::LineString => json!({
            "type": "LineString",
            "coordinates": [[100.0, 0.0], [101.0, 1.0]]
        }),
        GeometryType::Polygon => json!({
            "type": "Polygon",
            "coordinates": [
                [[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]]
            ]
        }),
        GeometryType::MultiPoint => json!({
            "type": "MultiPoint",
            "coordinates": [[100.0, 0.0], [101.0, 1.0]]
        }),
        GeometryType::MultiLineString => json!({
            "type": "MultiLineString",
            "coordinates": [
                [[100.0, 0.0], [101.0, 1.0]],
                [[102.0, 2.0], [103.0, 3.0]]
            ]
        }),
        GeometryType::MultiPolygon => json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[102.0, 2.0], [103.0, 2.0], [103.0, 3.0], [102.0, 3.0], [102.0, 2.0]]],
                [
                    [[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]],
                    [[100.2, 0.2], [100.2, 0.8], [100.8, 0.8], [100.8, 0.2], [100.2, 0.2]]
                ]
            ]
        }),
        GeometryType::GeometryCollection => json!({
            "type": "GeometryCollection",
            "geometries": [
                {"type": "Point", "coordinates": [100.0, 0.0]},
                {"type": "LineString", "coordinates": [[101.0, 0.0], [102.0, 1.0]]}
            ]
        }),
    }
}

fn bytes(kind: GeometryType) -> Vec<u8> {
    serde_json::to_vec(&fixture(kind)).unwrap()
}

/// Run the kind-specific decoder for `decoder_kind` and keep only the error.
fn run_decoder(decoder_kind: GeometryType, env: &Envelope) -> Result<(), GeoJsonError> {
    match decoder_kind {
        GeometryType::Point => decode_point(env).map(drop),
        GeometryType::LineString => decode_line_string(env).map(drop),
        GeometryType::Polygon => decode_polygon(env).map(drop),
        GeometryType::MultiPoint => decode_multi_point(env).map(drop),
        GeometryType::MultiLineString => decode_multi_line_string(env).map(drop),
        GeometryType::MultiPolygon => decode_multi_polygon(env).map(drop),
        GeometryType::GeometryCollection => decode_collection(env).map(drop),
    }
}

// ============================================================================
// Envelope
// ============================================================================

#[test]
fn test_envelope_tag_and_raw_for_every_kind() {
    for kind in GeometryType::ALL {
        let raw = bytes(kind);
        let env = Envelope::from_slice(&raw).unwrap();
        assert_eq!(env.type_tag(), kind.as_str());
        assert_eq!(env.raw(), raw.as_slice());
        assert_eq!(decode(&env).unwrap().geometry_type(), kind);
    }
}

// ============================================================================
// Typed decoders
// ============================================================================

#[test]
fn test_each_decoder_rejects_other_kinds() {
    for kind in GeometryType::ALL {
        let env = Envelope::from_slice(&bytes(kind)).unwrap();
        for decoder_kind in GeometryType::ALL {
            let result = run_decoder(decoder_kind, &env);
            if decoder_kind == kind {
                assert!(result.is_ok(), "{} decoder failed on its own kind", kind);
            } else {
                let err = result.unwrap_err();
                assert!(
                    matches!(err, GeoJsonError::TypeMismatch { .. }),
                    "{} decoder on {}: expected TypeMismatch, got {:?}",
                    decoder_kind,
                    kind,
                    err
                );
            }
        }
    }
}

#[test]
fn test_truncated_input_is_parse_error() {
    for kind in GeometryType::ALL {
        let raw = bytes(kind);
        let truncated = &raw[..raw.len() / 2];
        let err = Envelope::from_slice(truncated).unwrap_err();
        assert!(err.is_parse(), "{}: {:?}", kind, err);
    }
}

#[test]
fn test_malformed_body_is_parse_error_for_every_decoder() {
    // The type member sniffs fine but the rest of the object is broken.
    for kind in GeometryType::ALL {
        let raw = format!(r#"{{"type": "{}", "coordinates": [[[}}"#, kind);
        let err = Envelope::from_slice(raw.as_bytes()).unwrap_err();
        assert!(err.is_parse());

        let raw = format!(r#"{{"type": "{}", "coordinates": "nope", "geometries": 1}}"#, kind);
        let env = Envelope::from_slice(raw.as_bytes()).unwrap();
        let err = run_decoder(kind, &env).unwrap_err();
        assert!(err.is_parse(), "{}: {:?}", kind, err);
    }
}

#[test]
fn test_decoded_records() {
    let env = Envelope::from_slice(&bytes(GeometryType::MultiPolygon)).unwrap();
    let mpg = decode_multi_polygon(&env).unwrap();
    assert_eq!(mpg.coordinates.len(), 2);
    assert_eq!(mpg.coordinates[1].len(), 2);
    assert_eq!(mpg.coordinates[1][1][0].as_slice(), &[100.2, 0.2]);

    let env = Envelope::from_slice(&bytes(GeometryType::MultiLineString)).unwrap();
    let mls = decode_multi_line_string(&env).unwrap();
    assert_eq!(mls.coordinates[1][1].x(), 103.0);
    assert_eq!(mls.coordinates[1][1].y(), 3.0);
}

// ============================================================================
// Collections
// ============================================================================

#[test]
fn test_collection_children_in_order() {
    let env = Envelope::from_slice(&bytes(GeometryType::GeometryCollection)).unwrap();
    let gc = decode_collection(&env).unwrap();

    assert_eq!(gc.raw_children.len(), 2);
    let kinds: Vec<_> = gc.iter().map(Geometry::geometry_type).collect();
    assert_eq!(kinds, vec![GeometryType::Point, GeometryType::LineString]);
    assert!(gc.is_complete());
}

#[test]
fn test_collection_partial_result_on_failure() {
    let raw = json!({
        "type": "GeometryCollection",
        "geometries": [
            {"type": "Point", "coordinates": [1.0, 2.0]},
            {"type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]]},
            {"type": "Polygon", "coordinates": [1.0, 2.0]},
            {"type": "Point", "coordinates": [5.0, 6.0]}
        ]
    });
    let env = Envelope::from_slice(&serde_json::to_vec(&raw).unwrap()).unwrap();
    let err = decode_collection(&env).unwrap_err();

    match &err {
        GeoJsonError::PartialCollection {
            index,
            partial,
            source,
        } => {
            assert_eq!(*index, 2);
            assert_eq!(partial.raw_children.len(), 4);
            assert_eq!(partial.geometries.len(), 2);
            assert!(!partial.is_complete());
            assert!(matches!(**source, GeoJsonError::Parse(_)));
        }
        other => panic!("expected PartialCollection, got {:?}", other),
    }
    assert!(err.is_parse());
}

#[test]
fn test_collection_unknown_member_type() {
    let raw = json!({
        "type": "GeometryCollection",
        "geometries": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}}
        ]
    });
    let env = Envelope::from_slice(&serde_json::to_vec(&raw).unwrap()).unwrap();
    let err = decode(&env).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        GeoJsonError::UnknownType(t) if t == "Feature"
    ));
    assert_eq!(err.partial_collection().unwrap().len(), 0);
}

#[test]
fn test_deeply_nested_collection_is_bounded() {
    let mut doc = json!({"type": "Point", "coordinates": [0.0, 0.0]});
    for _ in 0..40 {
        doc = json!({"type": "GeometryCollection", "geometries": [doc]});
    }
    let env = Envelope::from_slice(&serde_json::to_vec(&doc).unwrap()).unwrap();
    let err = decode(&env).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        GeoJsonError::DepthExceeded { max_depth: 32 }
    ));
}

// ============================================================================
// Generic view
// ============================================================================

#[test]
fn test_generic_view_point() {
    let env = Envelope::from_slice(br#"{"type": "Point", "coordinates": [102.0, 0.5]}"#).unwrap();
    let map = as_map(&env).unwrap();
    assert_eq!(map.get("coordinates"), Some(&json!([102.0, 0.5])));
}

#[test]
fn test_generic_view_of_collection() {
    let env = Envelope::from_slice(&bytes(GeometryType::GeometryCollection)).unwrap();
    let map = as_map(&env).unwrap();
    assert_eq!(map["geometries"].as_array().map(Vec::len), Some(2));
}
