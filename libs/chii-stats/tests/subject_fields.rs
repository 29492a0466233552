use chii_api::{ErrorKind, Value};
use chii_codec::{DecodeConfig, decode_legacy_text};
use chii_stats::{Score, compute_rating, compute_tags, tags_from_text};

/// Build a `field_tags` column value the way the legacy site serialized it.
fn field_tags(tags: &[(Option<&str>, &str)]) -> String {
    let mut out = format!("a:{}:{{", tags.len());
    for (i, (name, result)) in tags.iter().enumerate() {
        let name = match name {
            Some(n) => format!("s:{}:\"{}\";", n.len(), n),
            None => "N;".to_string(),
        };
        out.push_str(&format!(
            "i:{i};a:2:{{s:8:\"tag_name\";{name}s:6:\"result\";s:{}:\"{}\";}}",
            result.len(),
            result
        ));
    }
    out.push('}');
    out
}

#[test]
fn tag_cloud_from_column_text() {
    let text = field_tags(&[(Some("TV"), "1520"), (None, "3"), (Some("京都动画"), "87")]);
    let tags = tags_from_text(&text, &DecodeConfig::default()).unwrap();

    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].name, "TV");
    assert_eq!(tags[0].count, Value::Text("1520".into()));
    assert_eq!(tags[1].name, "京都动画");
    assert_eq!(tags[1].count_i64(), Some(87));

    let json = serde_json::to_value(&tags).unwrap();
    assert_eq!(json, serde_json::json!([
        {"name": "TV", "count": "1520"},
        {"name": "京都动画", "count": "87"},
    ]));
}

#[test]
fn empty_tag_array_yields_nothing() {
    let decoded = decode_legacy_text("a:0:{}").unwrap();
    assert!(compute_tags(Some(&decoded)).unwrap().is_empty());
}

#[test]
fn corrupt_tag_column_is_unavailable_as_a_whole() {
    let text = "a:2:{i:0;a:2:{s:8:\"tag_name\";s:1:\"A\";s:6:\"result\";i:2;}i:1;a:1:{s:8:\"tag_name\";s:1:\"B\";}}";
    let err = tags_from_text(text, &DecodeConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);

    let truncated = &field_tags(&[(Some("TV"), "1")])[..20];
    let err = tags_from_text(truncated, &DecodeConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn deeply_nested_tag_column_hits_depth_limit() {
    let cfg = DecodeConfig { max_depth: 1, ..DecodeConfig::default() };
    let err = tags_from_text(&field_tags(&[(Some("TV"), "1")]), &cfg).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);
}

#[test]
fn rating_from_rate_columns() {
    let r = compute_rating(512, [1, 0, 0, 2, 5, 10, 20, 8, 3, 1]);
    assert_eq!(r.total, 50);
    // 1 + 8 + 25 + 60 + 140 + 64 + 27 + 10 = 335 -> 6.7
    assert_eq!(r.score, Score::Tenths(67));
    assert_eq!(r.count.get("7"), Some(20));

    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["rank"], 512);
    assert_eq!(json["score"], 6.7);
    assert_eq!(json["total"], 50);
    assert_eq!(json["count"]["10"], 1);
}

#[test]
fn unrated_subject_reports_integer_zero() {
    let json = serde_json::to_value(compute_rating(0, [0; 10])).unwrap();
    assert_eq!(json["score"], serde_json::json!(0));
    assert!(json["score"].is_u64());
    assert_eq!(json["total"], 0);
}
