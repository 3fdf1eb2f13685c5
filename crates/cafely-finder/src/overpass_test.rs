use super::*;

fn mirror() -> Url {
    Url::parse("https://overpass.test/api/interpreter").unwrap()
}

fn shop(id: &str, distance_m: Option<f64>) -> ShopRecord {
    let raw: RawElement = serde_json::from_value(serde_json::json!({
        "type": "node",
        "id": 1,
        "lat": 0.0,
        "lon": 0.0
    }))
    .unwrap();
    let mut record = crate::normalize::normalize_element(raw, Coordinate::new(0.0, 0.0));
    record.id = id.to_owned();
    record.distance_m = distance_m;
    record
}

// -----------------------------------------------------------------------
// build_query
// -----------------------------------------------------------------------

#[test]
fn query_covers_nodes_ways_and_relations() {
    let q = build_query(Coordinate::new(45.5, -73.56), 1500);
    assert!(q.starts_with("[out:json][timeout:25];"));
    for kind in ["node", "way", "relation"] {
        assert!(
            q.contains(&format!("{kind}[\"amenity\"=\"cafe\"](around:1500,45.5,-73.56);")),
            "missing {kind} clause in:\n{q}"
        );
    }
    assert!(q.trim_end().ends_with("out center tags;"));
}

// -----------------------------------------------------------------------
// classify_status
// -----------------------------------------------------------------------

#[test]
fn server_errors_and_throttling_are_transient() {
    for status in [500, 502, 503, 504, 429] {
        let outcome = classify_status(StatusCode::from_u16(status).unwrap(), &mirror());
        assert!(matches!(outcome, Some(MirrorOutcome::Transient(_))), "status {status}");
    }
}

#[test]
fn client_errors_are_fatal() {
    for status in [400, 403, 404] {
        let outcome = classify_status(StatusCode::from_u16(status).unwrap(), &mirror());
        assert!(
            matches!(
                outcome,
                Some(MirrorOutcome::Fatal(FinderError::QueryRejected { status: s, .. })) if s == status
            ),
            "status {status}"
        );
    }
}

#[test]
fn success_is_not_classified() {
    assert!(classify_status(StatusCode::OK, &mirror()).is_none());
}

// -----------------------------------------------------------------------
// decode_elements
// -----------------------------------------------------------------------

#[test]
fn drops_elements_without_numeric_position() {
    let body = serde_json::json!({
        "elements": [
            { "type": "node", "id": 1, "lat": 1.0, "lon": 2.0, "tags": { "name": "A" } },
            { "type": "node", "id": 2, "lat": "north", "lon": 2.0 },
            { "type": "way", "id": 3, "center": { "lat": 1.5, "lon": 2.5 } },
            { "type": "relation", "id": 4 },
            { "id": 5 }
        ]
    })
    .to_string();

    let elements = decode_elements(&body, &mirror()).unwrap();
    let ids: Vec<i64> = elements.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn missing_elements_is_empty() {
    assert!(decode_elements(r#"{"version": 0.6}"#, &mirror()).unwrap().is_empty());
    assert!(decode_elements(r#"{"elements": []}"#, &mirror()).unwrap().is_empty());
}

#[test]
fn non_json_body_is_an_error() {
    let err = decode_elements("<html>busy</html>", &mirror()).unwrap_err();
    assert!(matches!(err, FinderError::Deserialize { .. }));
}

// -----------------------------------------------------------------------
// sort_by_distance
// -----------------------------------------------------------------------

#[test]
fn sorts_nearest_first_with_unknown_last() {
    let mut results = vec![
        shop("far", Some(900.0)),
        shop("unknown-1", None),
        shop("near", Some(10.0)),
        shop("unknown-2", None),
        shop("mid", Some(300.0)),
    ];
    sort_by_distance(&mut results);
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["near", "mid", "far", "unknown-1", "unknown-2"]);
}

#[test]
fn empty_mirror_list_is_rejected() {
    let err = OverpassClient::with_mirrors::<&str>(5, "test", &[]).unwrap_err();
    assert!(matches!(err, FinderError::InvalidInput(_)));
}
