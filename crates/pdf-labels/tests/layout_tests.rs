use pdf_labels::layout::*;
use pdf_labels::*;

fn letter() -> LabelSheetOptions {
    LabelSheetOptions::default()
}

#[test]
fn test_default_letter_geometry() {
    let geometry = resolve_geometry(&letter()).unwrap();

    assert_eq!((geometry.sheet_width_px, geometry.sheet_height_px), (2550, 3300));
    assert_eq!((geometry.left_px, geometry.top_px), (75, 150));
    assert_eq!(geometry.available_width_px, 2400);
    assert_eq!(geometry.available_height_px, 3000);
    assert_eq!((geometry.h_gap_px, geometry.v_gap_px), (30, 30));
    assert_eq!((geometry.cell_width_px, geometry.cell_height_px), (780, 727));
    assert_eq!(geometry.labels_per_sheet(), 12);
}

#[test]
fn test_auto_residual_smaller_than_grid() {
    for cols in 1..=7 {
        for rows in 1..=9 {
            let mut options = letter();
            options.sheet.columns = cols;
            options.sheet.rows = rows;
            let geometry = resolve_geometry(&options).unwrap();

            let h = geometry.horizontal_residual();
            let v = geometry.vertical_residual();
            assert!((0..cols as i64).contains(&h), "{}x{} leaves {}px", cols, rows, h);
            assert!((0..rows as i64).contains(&v), "{}x{} leaves {}px", cols, rows, v);
        }
    }
}

#[test]
fn test_auto_cells_do_not_overlap() {
    let mut options = letter();
    options.sheet.columns = 4;
    options.sheet.rows = 6;
    let geometry = resolve_geometry(&options).unwrap();

    let cells: Vec<PixelRect> = (0..geometry.labels_per_sheet())
        .map(|pos| geometry.cell_rect(pos))
        .collect();
    for (i, a) in cells.iter().enumerate() {
        for b in &cells[i + 1..] {
            assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
        }
    }
    assert!(!geometry.overflows_sheet());
}

#[test]
fn test_origins_are_row_major() {
    let geometry = resolve_geometry(&letter()).unwrap();

    assert_eq!(geometry.grid_position(0), GridPosition::new(0, 0));
    assert_eq!(geometry.grid_position(2), GridPosition::new(0, 2));
    assert_eq!(geometry.grid_position(3), GridPosition::new(1, 0));
    assert_eq!(geometry.origin(0), (75, 150));
    assert_eq!(geometry.origin(1), (75 + 810, 150));
    assert_eq!(geometry.origin(3), (75, 150 + 757));
}

#[test]
fn test_explicit_size_may_overflow() {
    let mut options = letter();
    options.sizing = LabelSizing::Explicit {
        width: 4.0,
        height: 3.0,
        h_spacing: 0.5,
        v_spacing: 0.5,
    };
    let geometry = resolve_geometry(&options).unwrap();

    assert_eq!((geometry.cell_width_px, geometry.cell_height_px), (1200, 900));
    assert!(geometry.overflows_sheet());
    assert!(options.validate().is_ok());
}

#[test]
fn test_inset_content_and_scale() {
    let mut options = letter();
    options.sizing = LabelSizing::Inset { buffer: 0.1 };
    options.image_scale_percent = 50;
    let geometry = resolve_geometry(&options).unwrap();

    assert_eq!((geometry.h_gap_px, geometry.v_gap_px), (0, 0));
    assert_eq!((geometry.cell_width_px, geometry.cell_height_px), (800, 750));
    assert_eq!(geometry.inset_px, 30);
    assert_eq!((geometry.content_width_px, geometry.content_height_px), (740, 690));
    assert_eq!((geometry.effective_width_px, geometry.effective_height_px), (370, 345));
}

#[test]
fn test_scale_above_hundred_centers_negatively() {
    let mut options = letter();
    options.image_scale_percent = 150;
    let geometry = resolve_geometry(&options).unwrap();

    assert_eq!(geometry.effective_width_px, 1170);
    let (dx, _) = geometry.centering_offset(1170, 10);
    assert_eq!(dx, -195);
}

#[test]
fn test_inset_larger_than_cell_is_rejected() {
    let mut options = letter();
    options.sizing = LabelSizing::Inset { buffer: 2.0 };

    match resolve_geometry(&options) {
        Err(LabelError::InvalidConfiguration(msg)) => assert!(msg.contains("Inset")),
        other => panic!("Expected InvalidConfiguration, got {:?}", other),
    }
}

#[test]
fn test_millimeter_sheet() {
    let mut options = letter();
    options.sheet = SheetSpec::from_paper(PaperSize::A4, MeasurementUnit::Millimeters);
    options.sizing = LabelSizing::Auto {
        h_spacing: 2.54,
        v_spacing: 2.54,
    };
    let geometry = resolve_geometry(&options).unwrap();

    assert_eq!((geometry.sheet_width_px, geometry.sheet_height_px), (2480, 3507));
    assert_eq!((geometry.h_gap_px, geometry.v_gap_px), (30, 30));
}

#[test]
fn test_image_scale_past_raster_limit_is_rejected() {
    let mut options = letter();
    options.dpi = 1.0;
    options.image_scale_percent = 200;
    options.sizing = LabelSizing::Explicit {
        width: 4_000_000_000.0,
        height: 1.0,
        h_spacing: 0.0,
        v_spacing: 0.0,
    };

    match resolve_geometry(&options) {
        Err(LabelError::InvalidConfiguration(msg)) => assert!(msg.contains("Scaled label width")),
        other => panic!("Expected InvalidConfiguration, got {:?}", other),
    }
}

#[test]
fn test_huge_margin_is_rejected() {
    let mut options = letter();
    options.sheet.margins.left = 1e300;

    assert!(matches!(
        resolve_geometry(&options),
        Err(LabelError::InvalidConfiguration(_))
    ));
}
