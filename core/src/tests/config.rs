use alloc::string::ToString;
use alloc::vec;

use super::*;
use crate::error::DrawError;

#[test]
fn test_config_from_catalog_defaults() {
    let mut catalog = create_catalog(vec![], 19);
    catalog.defaults.lower_lvl_bound = 10;
    catalog.defaults.upper_lvl_bound = 0;
    catalog.meta.mtg_color = Some(vec![key_color("red", "#f00"), key_color("blue", "#00f")]);

    let config = ConfigState::from_catalog_defaults(&catalog);

    assert_eq!(config.style, "single");
    assert_eq!(config.lower_bound, 10);
    // an unset upper bound opens the range to the top level
    assert_eq!(config.upper_bound, 19);
    assert_eq!(config.chart_count, crate::config::DEFAULT_CHART_COUNT);
    assert!(config.difficulties.contains("expert"));
    assert!(!config.difficulties.contains("basic"));
    let colors: Vec<&str> = config.mtg_color.iter().map(|c| c.as_str()).collect();
    assert_eq!(colors, vec!["blue", "red", UNCOLORED]);
    assert!(!config.use_weights);
    assert!(config.force_distribution);
    assert!(config.constrain_pocket_picks);
}

#[test]
fn test_config_keeps_explicit_upper_bound() {
    let mut catalog = create_catalog(vec![], 19);
    catalog.defaults.upper_lvl_bound = 14;

    let config = ConfigState::from_catalog_defaults(&catalog);
    assert_eq!(config.upper_bound, 14);
    assert_eq!(config.mtg_color.len(), 1);
}

#[test]
fn test_validate_rejects_inverted_bounds_and_zero_count() {
    assert_eq!(create_config(3, 5, 1).validate(), Ok(()));
    assert_eq!(create_config(5, 5, 1).validate(), Ok(()));

    assert!(matches!(
        create_config(6, 5, 1).validate(),
        Err(DrawError::InvalidConfig { .. })
    ));
    assert!(matches!(
        create_config(1, 5, 0).validate(),
        Err(DrawError::InvalidConfig { .. })
    ));
}

#[test]
fn test_weight_defaults_to_zero() {
    let mut config = create_config(1, 5, 3);
    config.weights = weights(&[(2, 7)]);

    assert_eq!(config.weight(2), 7);
    assert_eq!(config.weight(3), 0);
}

#[test]
fn test_forced_distribution_requires_weights() {
    let mut config = create_config(1, 5, 3);
    config.force_distribution = true;
    assert!(!config.forced_distribution());

    config.use_weights = true;
    assert!(config.forced_distribution());
}

#[test]
fn test_grouping_threshold() {
    let mut config = create_config(1, 5, 3);
    config.group_songs_at = Some(4);
    assert_eq!(config.grouping_threshold(), None);

    config.use_weights = true;
    assert_eq!(config.grouping_threshold(), Some(4));

    config.group_songs_at = Some(0);
    assert_eq!(config.grouping_threshold(), None);

    config.group_songs_at = None;
    assert_eq!(config.grouping_threshold(), None);
}

#[cfg(feature = "std")]
#[test]
fn test_config_parses_weight_map() {
    let config = ConfigState::from_json_str(
        r#"{
            "style": "single",
            "difficulties": ["expert"],
            "lowerBound": 1,
            "upperBound": 4,
            "chartCount": 3,
            "useWeights": true,
            "weights": { "1": 2, "3": null, "4": 1 },
            "groupSongsAt": 3
        }"#,
    )
    .unwrap();

    assert_eq!(config.weights, weights(&[(1, 2), (4, 1)]));
    assert_eq!(config.group_songs_at, Some(3));
    assert!(config.force_distribution);
    assert!(config.constrain_pocket_picks);
    assert!(config.flags.is_empty());
}

#[cfg(feature = "std")]
#[test]
fn test_config_parses_sparse_weight_array() {
    let config = ConfigState::from_json_str(
        r#"{
            "style": "double",
            "lowerBound": 1,
            "upperBound": 3,
            "chartCount": 5,
            "weights": [null, 2, null, 1],
            "forceDistribution": false,
            "constrainPocketPicks": false
        }"#,
    )
    .unwrap();

    assert_eq!(config.weights, weights(&[(1, 2), (3, 1)]));
    assert!(!config.force_distribution);
    assert!(!config.constrain_pocket_picks);
}

#[cfg(feature = "std")]
#[test]
fn test_config_null_weights_and_bad_input() {
    let config = ConfigState::from_json_str(
        r#"{ "style": "single", "lowerBound": 1, "upperBound": 3, "chartCount": 5, "weights": null }"#,
    )
    .unwrap();
    assert!(config.weights.is_empty());

    let err = ConfigState::from_json_str(r#"{ "style": "single" }"#).unwrap_err();
    assert!(matches!(err, DrawError::InvalidConfig { .. }));
}

#[cfg(feature = "std")]
#[test]
fn test_config_serializes_camel_case() {
    let mut config = create_config(2, 9, 7);
    config.group_songs_at = Some(8);
    let value = serde_json::to_value(&config).unwrap();

    assert_eq!(value["lowerBound"], 2);
    assert_eq!(value["chartCount"], 7);
    assert_eq!(value["groupSongsAt"], 8);

    let back: ConfigState = serde_json::from_value(value).unwrap();
    assert_eq!(back.style, "single".to_string());
    assert_eq!(back.group_songs_at, Some(8));
}
