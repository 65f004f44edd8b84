//! Tests for the FlexImaging serializer.

use super::*;
use crate::geometry::BoundingBox;

fn poly(coords: &[(i32, i32)]) -> Area {
    Area::Polygon(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
}

fn names(doc: &Document) -> Vec<&str> {
    doc.elements().iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn test_triangle_document() {
    let doc = serialize(&[poly(&[(0, 0), (4, 0), (0, 4)])], &ExportSettings::default()).unwrap();

    assert_eq!(doc.len(), 1);
    assert_eq!(doc.elements()[0].area_type, AreaType::Polygon);
    assert_eq!(
        doc.to_xml().unwrap(),
        "<Area Type=\"3\" Name=\"myroi_1\" Enabled=\"0\" ShowSpectra=\"0\" SpectrumColor=\"#5e4fa2\">\n\
         \x20 <Raster>100,100</Raster>\n\
         \x20 <Method>mymethod.par</Method>\n\
         \x20 <Point>0,0</Point>\n\
         \x20 <Point>4,0</Point>\n\
         \x20 <Point>0,4</Point>\n\
         </Area>\n"
    );
}

#[test]
fn test_rectangle_emits_two_points_with_type_zero() {
    let doc = serialize(
        &[Area::Box(BoundingBox::new(1, 2, 5, 6))],
        &ExportSettings::default(),
    )
    .unwrap();

    let element = &doc.elements()[0];
    assert_eq!(element.area_type, AreaType::Rectangle);
    assert_eq!(element.points, vec![Point::new(1, 2), Point::new(5, 6)]);

    let xml = doc.to_xml().unwrap();
    assert!(xml.starts_with("<Area Type=\"0\" "));
    assert_eq!(xml.matches("<Point>").count(), 2);
    assert!(xml.contains("<Point>1,2</Point>"));
    assert!(xml.contains("<Point>5,6</Point>"));
}

#[test]
fn test_boxes_keep_order_and_get_spread_colors() {
    let boxes = [
        Area::Box(BoundingBox::new(30, 0, 31, 1)),
        Area::Box(BoundingBox::new(20, 0, 21, 1)),
        Area::Box(BoundingBox::new(10, 0, 11, 1)),
    ];
    let doc = serialize(&boxes, &ExportSettings::default()).unwrap();

    assert_eq!(names(&doc), vec!["myroi_1", "myroi_2", "myroi_3"]);
    assert_eq!(doc.elements()[0].points[0], Point::new(30, 0));
    let colors: Vec<&str> = doc
        .elements()
        .iter()
        .map(|e| e.spectrum_color.as_str())
        .collect();
    assert_eq!(colors, vec!["#9e0142", "#ffffbf", "#5e4fa2"]);
}

#[test]
fn test_repeated_serialization_is_identical() {
    let areas = [
        poly(&[(0, 0), (4, 0), (0, 4)]),
        poly(&[(9, 9), (12, 9), (12, 14)]),
        poly(&[(5, 1), (7, 1), (6, 3)]),
    ];
    let settings = ExportSettings::default();

    let a = serialize(&areas, &settings).unwrap();
    let b = serialize(&areas, &settings).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.to_xml().unwrap(), b.to_xml().unwrap());
}

#[test]
fn test_polygons_sorted_by_min_x() {
    let areas = [
        poly(&[(10, 0), (12, 0), (11, 2)]),
        poly(&[(2, 5), (4, 5), (3, 7)]),
        poly(&[(6, 1), (5, 3), (8, 3)]),
    ];
    let doc = serialize(&areas, &ExportSettings::default()).unwrap();

    let first_points: Vec<Point> = doc.elements().iter().map(|e| e.points[0]).collect();
    assert_eq!(
        first_points,
        vec![Point::new(2, 5), Point::new(6, 1), Point::new(10, 0)]
    );
    assert_eq!(names(&doc), vec!["myroi_1", "myroi_2", "myroi_3"]);
}

#[test]
fn test_short_polygons_dropped_without_renumbering() {
    let areas = [
        poly(&[(5, 0), (6, 1)]),
        poly(&[(3, 0), (4, 0), (3, 2)]),
        poly(&[(0, 0)]),
    ];
    let doc = serialize(&areas, &ExportSettings::default()).unwrap();

    assert_eq!(names(&doc), vec!["myroi_2", "myroi_3"]);
    assert_eq!(doc.elements()[0].spectrum_color, "#ffffbf");
    assert_eq!(doc.elements()[0].area_type, AreaType::Polygon);
    // A two-point polygon is written with the rectangle type.
    assert_eq!(doc.elements()[1].area_type, AreaType::Rectangle);
    assert_eq!(doc.elements()[1].spectrum_color, "#5e4fa2");
}

#[test]
fn test_mixed_areas_are_config_error() {
    let areas = [
        Area::Box(BoundingBox::new(0, 0, 1, 1)),
        poly(&[(0, 0), (1, 0), (0, 1)]),
    ];
    assert!(matches!(
        serialize(&areas, &ExportSettings::default()),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_empty_input_gives_empty_document() {
    let doc = serialize(&[], &ExportSettings::default()).unwrap();
    assert!(doc.is_empty());
    assert_eq!(doc.to_xml().unwrap(), "");
}

#[test]
fn test_settings_flow_into_elements() {
    let settings = ExportSettings {
        raster_pitch: 20.0,
        method: "par".to_string(),
        name_prefix: "roi_split0_".to_string(),
    };
    let doc = serialize(&[Area::Box(BoundingBox::new(0, 0, 2, 2))], &settings).unwrap();
    let element = &doc.elements()[0];
    assert_eq!(element.raster, "20,20");
    assert_eq!(element.method, "par");
    assert_eq!(element.name, "roi_split0_1");

    let fractional = ExportSettings {
        raster_pitch: 12.5,
        ..ExportSettings::default()
    };
    let doc = serialize(&[Area::Box(BoundingBox::new(0, 0, 2, 2))], &fractional).unwrap();
    assert_eq!(doc.elements()[0].raster, "12.5,12.5");
}

#[test]
fn test_rooted_document() {
    let doc = serialize(
        &[Area::Box(BoundingBox::new(1, 2, 5, 6))],
        &ExportSettings::default(),
    )
    .unwrap();

    assert_eq!(
        doc.to_xml_rooted("Areas").unwrap(),
        "<Areas>\n\
         \x20 <Area Type=\"0\" Name=\"myroi_1\" Enabled=\"0\" ShowSpectra=\"0\" SpectrumColor=\"#5e4fa2\">\n\
         \x20   <Raster>100,100</Raster>\n\
         \x20   <Method>mymethod.par</Method>\n\
         \x20   <Point>1,2</Point>\n\
         \x20   <Point>5,6</Point>\n\
         \x20 </Area>\n\
         </Areas>\n"
    );
}

#[test]
fn test_write_to_file() {
    let doc = serialize(
        &[
            poly(&[(0, 0), (4, 0), (0, 4)]),
            poly(&[(5, 5), (9, 5), (5, 9)]),
        ],
        &ExportSettings::default(),
    )
    .unwrap();
    let path = common::test_utils::test_output_path("fleximaging_write_to.xml");

    doc.write_to(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, doc.to_xml().unwrap());
    assert_eq!(written.matches("<Area ").count(), 2);
    assert_eq!(written.matches("</Area>\n").count(), 2);
}
