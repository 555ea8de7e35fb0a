//! Normalization, persistence and settings around an edit

use contour_edit::io::{instance_from_json, instance_to_json};
use contour_edit::{
    check_contour, normalize_curve, Arc, Contour, Curve, EditSettings, ModifyContourPoints,
    PointTransform, Pnt, Polyline, SegmentKind, SpaceInstance, Spline, Vec3, TOLERANCE,
};

fn p(x: f64, y: f64) -> Pnt {
    Pnt::new(x, y, 0.0)
}

#[test]
fn test_closed_polyline_becomes_closed_contour() {
    let square = Polyline::new(vec![
        p(0.0, 0.0),
        p(1.0, 0.0),
        p(1.0, 1.0),
        p(0.0, 1.0),
        p(0.0, 0.0),
    ])
    .unwrap();
    let contour = normalize_curve(&Curve::Polyline(square)).unwrap();
    assert!(contour.is_closed());
    assert_eq!(contour.len(), 4);
    assert!(check_contour(&contour, TOLERANCE).is_empty());

    // Every vertex is now a join; four joins in a closed loop
    let edit = ModifyContourPoints::bind(contour).unwrap();
    assert_eq!(edit.control_point_info().len(), 5);
}

#[test]
fn test_normalized_polyline_edits_a_vertex() {
    let zigzag = Polyline::new(vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0), p(3.0, 1.0)]).unwrap();
    let instance = SpaceInstance::new(Curve::Polyline(zigzag));
    let contour = ModifyContourPoints::prepare(&instance).unwrap();

    // Open: 0 S, 1 E, 2 S, 3 E, 4 S, 5 E; vertex (2, 0) is entries 3 and 4
    let mut edit = ModifyContourPoints::bind(contour).unwrap();
    edit.set_control_points([3usize, 4]).unwrap();
    let result = edit
        .calculate(&PointTransform::translate(Vec3::new(0.0, -1.0, 0.0)))
        .unwrap();
    assert_eq!(result.segments()[1].end_point(), p(2.0, -1.0));
    assert_eq!(result.segments()[2].start_point(), p(2.0, -1.0));
}

#[test]
fn test_spline_and_arc_normalize_to_single_segment() {
    let spline = Spline::new(vec![p(0.0, 0.0), p(1.0, 2.0), p(2.0, 0.0)]).unwrap();
    let contour = normalize_curve(&Curve::Spline(spline)).unwrap();
    assert_eq!(contour.len(), 1);
    assert_eq!(contour.segments()[0].kind(), SegmentKind::Spline);

    let arc = Arc::through_points(p(1.0, 0.0), p(0.0, 1.0), p(-1.0, 0.0)).unwrap();
    let contour = normalize_curve(&Curve::Arc(arc)).unwrap();
    assert_eq!(contour.segments()[0].kind(), SegmentKind::Arc);
    let edit = ModifyContourPoints::bind(contour).unwrap();
    assert_eq!(edit.control_point_info().len(), 2);
}

#[test]
fn test_edit_survives_json_round_trip() {
    let contour = Contour::from_segments(
        vec![
            Polyline::new(vec![p(1.0, 0.0), p(1.0, -1.0), p(-1.0, -1.0), p(-1.0, 0.0)])
                .unwrap()
                .into(),
            Arc::through_points(p(-1.0, 0.0), p(0.0, 1.0), p(1.0, 0.0)).unwrap().into(),
        ],
        true,
    );
    let text = instance_to_json(&SpaceInstance::named("slot", contour)).unwrap();
    let instance = instance_from_json(&text).unwrap();

    let mut edit = ModifyContourPoints::bind_instance(&instance).unwrap();
    // Closed: polyline S, I, I; arc S, E
    assert_eq!(edit.control_point_info().len(), 5);
    edit.set_control_points([1usize, 2]).unwrap();
    let committed = edit
        .commit(&PointTransform::scale(Pnt::origin(), Vec3::new(1.0, 2.0, 1.0)))
        .unwrap();

    let reread = instance_from_json(&instance_to_json(&committed).unwrap()).unwrap();
    assert_eq!(reread, committed);
    let points = reread.curve.as_contour().unwrap().segments()[0].points().unwrap().to_vec();
    assert_eq!(points[1], p(1.0, -2.0));
    assert_eq!(points[2], p(-1.0, -2.0));
}

#[test]
fn test_settings_file_controls_degenerate_handling() {
    let strict = EditSettings::from_toml_str("allow_degenerate = false\n").unwrap();
    assert!(!strict.allow_degenerate);
    assert!(EditSettings::from_toml_str("ruled_tolerance = -1.0\n").is_err());

    // Collapse the middle span of an open three-span chain
    let chain = Polyline::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(2.0, 1.0)]).unwrap();
    let contour = normalize_curve(&Curve::Polyline(chain)).unwrap();
    let collapse = PointTransform::translate(Vec3::new(0.0, -1.0, 0.0));

    // Entries 3 and 4 are the vertex (1, 1)
    let mut lenient = ModifyContourPoints::bind(contour.clone()).unwrap();
    lenient.set_control_points([3usize, 4]).unwrap();
    assert_eq!(lenient.calculate(&collapse).unwrap().len(), 2);

    let mut strict_edit = ModifyContourPoints::bind(contour).unwrap().with_settings(strict);
    strict_edit.set_control_points([3usize, 4]).unwrap();
    assert!(strict_edit.calculate(&collapse).unwrap_err().is_fatal());
}
