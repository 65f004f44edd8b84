use super::*;

#[test]
fn test_to_raster_swaps_row_and_col() {
    let p = to_raster(RowCol::new(3, 7));
    assert_eq!(p, Point::new(7, 3));
}

#[test]
fn test_point_display_is_instrument_notation() {
    assert_eq!(Point::new(12, -4).to_string(), "12,-4");
}

#[test]
fn test_rectangle_builds_four_corners() {
    let roi = Roi::rectangle(RowCol::new(5, 8), RowCol::new(1, 2));
    assert_eq!(
        roi.vertices(),
        &[
            RowCol::new(1, 2),
            RowCol::new(1, 8),
            RowCol::new(5, 8),
            RowCol::new(5, 2),
        ]
    );
    assert_eq!(
        roi.opposite_corners(),
        Some((RowCol::new(1, 2), RowCol::new(5, 8)))
    );
}

#[test]
fn test_rectangle_raster_box_is_column_major() {
    // rows 1..5, cols 2..8 => x 2..8, y 1..5
    let roi = Roi::rectangle(RowCol::new(1, 2), RowCol::new(5, 8));
    assert_eq!(roi.raster_box(), Some(BoundingBox::new(2, 1, 8, 5)));
    assert_eq!(roi.to_area(), Area::Box(BoundingBox::new(2, 1, 8, 5)));
}

#[test]
fn test_polygon_raster_vertices_flip() {
    let roi = Roi::polygon(vec![RowCol::new(0, 1), RowCol::new(2, 3)]);
    assert_eq!(
        roi.raster_vertices(true),
        vec![Point::new(1, 0), Point::new(3, 2)]
    );
    assert_eq!(
        roi.raster_vertices(false),
        vec![Point::new(0, 1), Point::new(2, 3)]
    );
    assert_eq!(roi.raster_box(), None);
}

#[test]
fn test_collection_rejects_mixed_shapes() {
    let result = RoiCollection::new(vec![
        Roi::rectangle(RowCol::new(0, 0), RowCol::new(2, 2)),
        Roi::polygon(vec![RowCol::new(0, 0), RowCol::new(1, 1), RowCol::new(0, 2)]),
    ]);
    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("ROI 2 is a polygon")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_collection_labels_are_one_based() {
    let rois = RoiCollection::new(vec![
        Roi::rectangle(RowCol::new(0, 0), RowCol::new(2, 2)),
        Roi::rectangle(RowCol::new(4, 4), RowCol::new(6, 6)),
    ])
    .unwrap();

    let labels: Vec<u32> = rois.labeled().map(|(label, _)| label).collect();
    assert_eq!(labels, vec![1, 2]);
    assert_eq!(rois.by_label(0), None);
    assert_eq!(rois.by_label(2), Some(&rois.rois()[1]));
    assert_eq!(rois.by_label(3), None);
    assert_eq!(rois.shape(), Some(Shape::Rectangle));
}

#[test]
fn test_empty_collection() {
    let rois = RoiCollection::new(Vec::new()).unwrap();
    assert!(rois.is_empty());
    assert_eq!(rois.shape(), None);
    assert_eq!(rois, RoiCollection::empty());
}

#[test]
fn test_bounding_box_from_rect_and_enclosing() {
    let bbox = BoundingBox::from_rect(3, 4, 5, 2);
    assert_eq!(bbox, BoundingBox::new(3, 4, 8, 6));
    assert_eq!(bbox.width(), 5);
    assert_eq!(bbox.height(), 2);

    let enclosing =
        BoundingBox::enclosing(&[Point::new(3, 4), Point::new(7, 5), Point::new(5, 4)]).unwrap();
    assert_eq!(enclosing, bbox);
    assert_eq!(BoundingBox::enclosing(&[]), None);
}

#[test]
fn test_bounding_box_saturates_at_i32_limits() {
    let bbox = BoundingBox::from_rect(i32::MAX - 1, 0, 10, i32::MAX);
    assert_eq!(bbox, BoundingBox::new(i32::MAX - 1, 0, i32::MAX, i32::MAX));
    assert_eq!(bbox.width(), 1);

    let enclosing =
        BoundingBox::enclosing(&[Point::new(i32::MAX, i32::MAX), Point::new(i32::MIN, 0)]).unwrap();
    assert_eq!(enclosing, BoundingBox::new(i32::MIN, 0, i32::MAX, i32::MAX));
    assert_eq!(enclosing.width(), i32::MAX);
}

#[test]
fn test_area_points_and_min_x() {
    let rect = Area::from(BoundingBox::new(1, 2, 3, 4));
    assert_eq!(rect.points(), vec![Point::new(1, 2), Point::new(3, 4)]);
    assert_eq!(rect.point_count(), 2);
    assert_eq!(rect.min_x(), Some(1));

    let poly = Area::from(vec![Point::new(9, 0), Point::new(4, 3), Point::new(6, 8)]);
    assert_eq!(poly.min_x(), Some(4));
    assert_eq!(poly.shape(), Shape::Polygon);
    assert_eq!(Area::Polygon(Vec::new()).min_x(), None);
}

#[test]
fn test_shape_display() {
    assert_eq!(Shape::Rectangle.to_string(), "rectangle");
    assert_eq!(Shape::Polygon.to_string(), "polygon");
}
