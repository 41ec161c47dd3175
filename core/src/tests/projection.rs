use alloc::string::ToString;
use alloc::vec;

use super::*;
use crate::catalog::ChartRef;
use crate::projection::project_chart;

const REF: ChartRef = ChartRef { song: 0, chart: 0 };

#[test]
fn test_projection_resolves_display_fields() {
    let mut song = create_song("Paranoia", vec![]);
    song.name_translation = Some("パラノイア".to_string());
    song.flags = vec!["copyright".to_string()];
    let mut chart = create_chart(14, "expert");
    chart.draw_group = Some(3);
    chart.flags = vec!["unlock".to_string(), "copyright".to_string()];
    let catalog = create_catalog(vec![], 19);

    let projected = project_chart(&catalog, REF, &song, &chart);

    assert_eq!(projected.name, "Paranoia");
    assert_eq!(projected.name_translation.as_deref(), Some("パラノイア"));
    assert_eq!(projected.artist, "Paranoia Artist");
    assert_eq!(projected.bpm, "150");
    assert_eq!(projected.level, 14);
    assert_eq!(projected.draw_group, Some(3));
    assert_eq!(projected.level_metric(), 3);
    assert_eq!(projected.diff_abbr, "ESP");
    assert_eq!(projected.diff_color, "#ff0044");
    // chart flags first, song flags appended without repeats
    assert_eq!(
        projected.flags,
        vec!["unlock".to_string(), "copyright".to_string()]
    );
    assert_eq!(projected.mtg_color_abbr, None);
    assert_eq!(projected.mtg_color_color, None);
}

#[test]
fn test_projection_jacket_override_and_fallback() {
    let song = create_song("Jacketed", vec![]);
    let mut chart = create_chart(5, "basic");
    let catalog = create_catalog(vec![], 19);

    assert_eq!(project_chart(&catalog, REF, &song, &chart).jacket, "jacketed.jpg");

    chart.jacket = Some("alt.png".to_string());
    assert_eq!(project_chart(&catalog, REF, &song, &chart).jacket, "alt.png");
}

#[test]
fn test_projection_unknown_difficulty_defaults_to_empty() {
    let song = create_song("Edit", vec![]);
    let chart = create_chart(5, "edit");
    let catalog = create_catalog(vec![], 19);

    let projected = project_chart(&catalog, REF, &song, &chart);
    assert_eq!(projected.diff_abbr, "");
    assert_eq!(projected.diff_color, "");
}

#[test]
fn test_projection_color_axis_defaults_to_uncolored() {
    let song = create_song("Colorful", vec![]);
    let mut catalog = create_catalog(vec![], 19);
    catalog.meta.mtg_color = Some(vec![key_color("red", "#f00"), key_color(UNCOLORED, "#888")]);
    let strings = catalog.i18n.get_mut("en").unwrap();
    strings.mtg_abbr.insert("red".to_string(), "R".to_string());
    strings.mtg_abbr.insert("UNC".to_string(), "C".to_string());

    let plain = project_chart(&catalog, REF, &song, &create_chart(5, "expert"));
    assert_eq!(plain.mtg_color_abbr.as_deref(), Some("C"));
    assert_eq!(plain.mtg_color_color.as_deref(), Some("#888"));

    let mut red = create_chart(5, "expert");
    red.mtg_color = Some("red".to_string());
    let red = project_chart(&catalog, REF, &song, &red);
    assert_eq!(red.mtg_color_abbr.as_deref(), Some("R"));
    assert_eq!(red.mtg_color_color.as_deref(), Some("#f00"));

    let mut unknown = create_chart(5, "expert");
    unknown.mtg_color = Some("green".to_string());
    let unknown = project_chart(&catalog, REF, &song, &unknown);
    assert_eq!(unknown.mtg_color_abbr, None);
    assert_eq!(unknown.mtg_color_color.as_deref(), Some(""));
}

#[test]
fn test_projection_is_idempotent() {
    let catalog = ladder_catalog(&[0, 0, 2]);
    let (song, chart) = catalog.chart(ChartRef { song: 1, chart: 0 }).unwrap();
    let r = ChartRef { song: 1, chart: 0 };

    let a = project_chart(&catalog, r, song, chart);
    let b = project_chart(&catalog, r, song, chart);
    assert_eq!(a, b);
    assert_eq!(a.chart_ref, r);
}
