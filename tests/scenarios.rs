use cushion_diagram::accessories::{TieContext, place_ties, place_zippers};
use cushion_diagram::offset::distance_to_line;
use cushion_diagram::shapes::{Cushion, CushionShape};
use cushion_diagram::spec::RequestedOffset;
use cushion_diagram::{
    CushionSpec, EngineConfig, Length, Outline, Segment, ShapeFamily, Viewport, classify, layout, offset_outline,
};
use serde_json::json;

const EPS: f64 = 1e-9;

fn spec(value: serde_json::Value) -> CushionSpec {
    CushionSpec::from_value(value).unwrap()
}

fn cushion(value: serde_json::Value) -> Cushion {
    let spec = spec(value);
    let family = classify(&spec).unwrap();
    Cushion::from_spec(family, &spec).unwrap()
}

fn config() -> EngineConfig {
    EngineConfig::new(Viewport::new(3.5, 4.25))
}

fn context<'a>(outline: &'a Outline, from_corner: Option<&'a RequestedOffset>) -> TieContext<'a> {
    TieContext {
        base: outline,
        from_corner,
        along_length: None,
        along_width: None,
        corner_offset: Length::inches(4.0),
        min_edge: Length::inches(1.0),
    }
}

fn label_texts(value: serde_json::Value) -> Vec<String> {
    let diagram = layout(&spec(value), &config()).unwrap();
    diagram.dimension_labels.into_iter().map(|label| label.text).collect()
}

// ==================== concrete scenarios ====================

#[test]
fn rectangle_fills_the_viewport_width() {
    let diagram = layout(&spec(json!({"length": 24, "width": 18, "thickness": 2})), &config()).unwrap();
    assert!((diagram.scale - 0.145_833_333_333).abs() < 1e-9);
    let bbox = diagram.outline.bbox();
    assert!((bbox.width().raw() - 3.5).abs() < EPS);
    assert!((bbox.height().raw() - 2.625).abs() < EPS);
}

#[test]
fn trapezoid_bases_are_canonicalized() {
    let texts = label_texts(json!({"top_base": 114, "bottom_base": 59, "height": 26, "thickness": 3}));
    assert!(texts.iter().any(|t| t.contains("37.85\"")), "labels: {texts:?}");

    let swapped = cushion(json!({"top_base": 114, "bottom_base": 59, "height": 26}));
    let bbox = swapped.outline().bbox();
    assert!((bbox.width().raw() - 114.0).abs() < EPS);
}

#[test]
fn clipped_trapezoid_angled_edge() {
    let texts = label_texts(json!({"bottom_width": 80, "top_width": 50, "height": 30, "edge": 10, "thickness": 3}));
    assert!(texts.iter().any(|t| t.contains("18.03\"")), "labels: {texts:?}");
}

#[test]
fn round_piping_adds_the_margin_to_the_radius() {
    let round = cushion(json!({"diameter": 40, "thickness": 2}));
    let piped = offset_outline(&round.outline(), Length::inches(0.5));
    match piped.segment(0) {
        Some(Segment::Arc(arc)) => assert!((arc.radius_x - 20.5).abs() < EPS),
        other => panic!("expected arc, got {other:?}"),
    }

    let diagram = layout(&spec(json!({"diameter": 40, "thickness": 2, "piping": "yes"})), &config()).unwrap();
    match diagram.piping_outline.as_ref().and_then(|p| p.segment(0)) {
        Some(Segment::Arc(arc)) => assert!((arc.radius_x - 20.5 * diagram.scale).abs() < EPS),
        other => panic!("expected arc, got {other:?}"),
    }
}

#[test]
fn oversized_tie_offset_falls_back_instead_of_failing() {
    let diagram = layout(
        &spec(json!({
            "length": 30, "width": 10, "thickness": 2,
            "ties": "4 Side", "tie_offset_from_corner": 20
        })),
        &config(),
    )
    .unwrap();
    assert_eq!(diagram.tie_marks.len(), 4);
    for mark in &diagram.tie_marks {
        assert_eq!(mark.distance_label.as_deref(), Some("2\""));
    }
}

// ==================== properties ====================

#[test]
fn more_specific_family_wins() {
    // also satisfies the rectangle rule through length/width/thickness
    let fields = json!({"length": 80, "width": 20, "top_width": 20, "bottom_width": 30, "ear": 25, "thickness": 3});
    assert_eq!(classify(&spec(fields)).unwrap(), ShapeFamily::LShape);

    let round = json!({"diameter": 40, "length": 40, "width": 40, "thickness": 2});
    assert_eq!(classify(&spec(round)).unwrap(), ShapeFamily::Round);
}

#[test]
fn swapping_trapezoid_bases_changes_nothing() {
    let a = cushion(json!({"top_base": 59, "bottom_base": 114, "height": 26}));
    let b = cushion(json!({"top_base": 114, "bottom_base": 59, "height": 26}));
    assert_eq!(a.outline(), b.outline());
}

#[test]
fn piping_edges_sit_exactly_one_margin_out() {
    let polygons = [
        json!({"length": 24, "width": 18, "thickness": 2}),
        json!({"top_base": 59, "bottom_base": 114, "height": 26}),
        json!({"top_width": 50, "bottom_width": 80, "height": 30, "edge": 10}),
        json!({"length": 80, "top_width": 20, "bottom_width": 30, "ear": 25, "thickness": 3}),
        json!({"length": 80, "top_width": 40, "bottom_width": 20, "ear": 25, "thickness": 3}),
        json!({"length": 80, "top_width": 30, "bottom_width": 30, "ear": 25, "thickness": 3}),
        json!({"side": 20, "thickness": 2}),
        json!({"cushion_name": "Triangle", "length": 16, "width": 12, "thickness": 2}),
        json!({"top_width": 10, "bottom_width": 20, "length": 30}),
        json!({"cushion_name": "Left Arm", "top_width": 10, "bottom_width": 20, "length": 30}),
    ];
    let margin = 0.5;
    for fields in polygons {
        let base = cushion(fields.clone()).outline();
        assert!(base.is_polygon());
        let piped = offset_outline(&base, Length::inches(margin));
        assert_eq!(piped.len(), base.len());
        for (edge, piped_edge) in base.segments().iter().zip(piped.segments()) {
            if edge.is_degenerate() {
                continue;
            }
            for p in [piped_edge.start(), piped_edge.end()] {
                let d = distance_to_line(p, edge).unwrap();
                assert!((d - margin).abs() < 1e-6, "{fields}: {d} from {edge:?}");
            }
        }
    }
}

#[test]
fn computed_scale_is_the_largest_that_fits() {
    let viewport = Viewport::new(3.5, 4.25);
    let cases = [
        json!({"length": 24, "width": 18, "thickness": 2, "piping": "yes"}),
        json!({"diameter": 40, "thickness": 2}),
        json!({"width": 20, "side_length": 18, "middle_length": 24}),
        json!({"cushion_name": "Triangle", "length": 60, "width": 12, "thickness": 2}),
    ];
    for fields in cases {
        let diagram = layout(&spec(fields), &EngineConfig::new(viewport)).unwrap();
        let mut bbox = diagram.outline.bbox();
        if let Some(piping) = &diagram.piping_outline {
            bbox.expand_bbox(&piping.bbox());
        }
        let (w, h) = (bbox.width().raw(), bbox.height().raw());
        assert!(w <= viewport.max_width + 1e-9 && h <= viewport.max_height + 1e-9);
        let grown = 1.001;
        assert!(w * grown > viewport.max_width || h * grown > viewport.max_height);
    }
}

#[test]
fn tie_offsets_past_the_midpoint_never_leave_the_first_half() {
    let rect = cushion(json!({"length": 30, "width": 10, "thickness": 2, "ties": "2 Side"}));
    let outline = rect.outline();
    for requested in [5.0, 7.5, 20.0, 1e6] {
        let requested = RequestedOffset::Inches(requested);
        let roles = rect.tie_roles(&context(&outline, Some(&requested))).unwrap();
        let marks = place_ties(&roles, &outline, &outline).unwrap();
        for mark in marks {
            // short edges are x = 0 and x = 30, 10" long; the default is the midpoint
            assert!((mark.anchor.y - 5.0).abs() < EPS, "{:?}", mark.anchor);
        }
    }
}

#[test]
fn zippers_run_parallel_to_their_edges() {
    let cases = [
        (json!({"top_base": 59, "bottom_base": 114, "height": 26, "zipper": "Angled Side"}), "angled side"),
        (
            json!({"top_width": 50, "bottom_width": 80, "height": 30, "edge": 10, "zipper": "Top Plus Angled"}),
            "top plus angled",
        ),
        (json!({"length": 24, "width": 18, "thickness": 2, "zipper": "Long"}), "long side"),
        (json!({"cushion_name": "Triangle", "length": 16, "width": 12, "thickness": 2, "zipper": "Hypotenuse"}), "hypotenuse"),
    ];
    for (fields, name) in cases {
        let shape = cushion(fields);
        let outline = shape.outline();
        let roles = shape.zipper_roles();
        assert!(!roles.is_empty(), "{name}");
        let marks = place_zippers(name, &roles, &outline, Length::inches(1.0)).unwrap();
        for (role, mark) in roles.iter().zip(&marks) {
            let cushion_diagram::accessories::ZipperPath::Edge(edge) = role.path else {
                panic!("{name}: expected a whole edge");
            };
            let along = outline.segment(edge).and_then(Segment::direction).unwrap();
            let zipper = mark.segment.direction().unwrap();
            assert!((along.dot(zipper) - 1.0).abs() < 1e-9, "{name}");
            let gap = distance_to_line(mark.segment.start(), outline.segment(edge).unwrap()).unwrap();
            assert!((gap - 1.0).abs() < 1e-9, "{name}");
        }
    }
}

#[test]
fn order_form_option_wording_lays_out() {
    let cases = [
        json!({"diameter": 40, "thickness": 2, "ties": "4 Ties Evenly Spaced"}),
        json!({"length": 80, "top_width": 20, "bottom_width": 30, "ear": 25, "thickness": 3, "ties": "2 Corner Ties along length"}),
        json!({"length": 80, "top_width": 20, "bottom_width": 30, "ear": 25, "thickness": 3, "ties": "2 ties along the width"}),
        json!({"length": 80, "top_width": 40, "bottom_width": 20, "ear": 25, "thickness": 3, "ties": "2 Corner ties top width"}),
        json!({"length": 80, "top_width": 40, "bottom_width": 20, "ear": 25, "thickness": 3, "ties": "2 Corner ties bottom width"}),
        json!({"length": 80, "top_width": 40, "bottom_width": 20, "ear": 25, "thickness": 3, "ties": "2 Side ties-along length"}),
        json!({"top_base": 59, "bottom_base": 114, "height": 26, "zipper": "ShortPlusAngled"}),
        json!({"top_width": 50, "bottom_width": 80, "height": 30, "edge": 10, "zipper": "TopPlusAngled"}),
        json!({"width": 20, "side_length": 18, "middle_length": 24, "ties": "4 corners"}),
    ];
    for fields in cases {
        let diagram = layout(&spec(fields.clone()), &config()).unwrap_or_else(|err| panic!("{fields}: {err}"));
        assert!(!diagram.tie_marks.is_empty() || !diagram.zipper_marks.is_empty(), "{fields}");
    }
}
