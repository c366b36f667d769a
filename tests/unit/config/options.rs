use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k| map.get(k).cloned()
}

#[test]
fn both_overrides_become_target() {
    let opts = PreviewOptions::from_lookup(env(&[
        ("WIDTH", "1280"),
        ("HEIGHT", "720"),
        ("DISPLAY", ":0"),
    ]))
    .unwrap();
    assert_eq!(
        opts.target,
        Some(ScreenSize {
            width: 1280,
            height: 720
        })
    );
    assert!(!opts.headless);
    assert_eq!(opts.shrink_factor, DEFAULT_SHRINK_FACTOR);
}

#[test]
fn no_overrides_means_probe() {
    let opts = PreviewOptions::from_lookup(env(&[("DISPLAY", ":1")])).unwrap();
    assert_eq!(opts.target, None);
    assert!(!opts.headless);
}

#[test]
fn empty_overrides_count_as_unset() {
    let opts =
        PreviewOptions::from_lookup(env(&[("WIDTH", ""), ("HEIGHT", " "), ("DISPLAY", ":0")]))
            .unwrap();
    assert_eq!(opts.target, None);
}

#[test]
fn one_override_without_the_other_is_rejected() {
    let err = PreviewOptions::from_lookup(env(&[("WIDTH", "1920")])).unwrap_err();
    assert!(matches!(err, PreviewError::Config(_)));
    assert!(err.to_string().contains("HEIGHT"));

    let err = PreviewOptions::from_lookup(env(&[("HEIGHT", "1080")])).unwrap_err();
    assert!(matches!(err, PreviewError::Config(_)));
}

#[test]
fn malformed_override_is_rejected() {
    let err = PreviewOptions::from_lookup(env(&[("WIDTH", "wide"), ("HEIGHT", "1080")]))
        .unwrap_err();
    assert!(err.to_string().contains("WIDTH"));
    assert!(PreviewOptions::from_lookup(env(&[("WIDTH", "0"), ("HEIGHT", "1080")])).is_err());
}

#[test]
fn missing_or_empty_display_is_headless() {
    assert!(PreviewOptions::from_lookup(env(&[])).unwrap().headless);
    assert!(
        PreviewOptions::from_lookup(env(&[("DISPLAY", "")]))
            .unwrap()
            .headless
    );
}

#[test]
fn validate_rejects_out_of_range_shrink() {
    for bad in [0.0, -0.5, 1.5, f64::NAN] {
        let opts = PreviewOptions {
            shrink_factor: bad,
            ..PreviewOptions::default()
        };
        assert!(opts.validate().is_err(), "shrink {bad} should be rejected");
    }
    assert!(PreviewOptions::default().validate().is_ok());
}

#[test]
fn deserializes_with_defaults() {
    let opts: PreviewOptions =
        serde_json::from_str(r#"{ "target": { "width": 800, "height": 600 } }"#).unwrap();
    assert_eq!(opts.shrink_factor, DEFAULT_SHRINK_FACTOR);
    assert!(!opts.headless);
    assert_eq!(opts.target.map(|t| t.width), Some(800));
}
