use pdf_labels::*;

#[test]
fn test_defaults_match_letter_sheet() {
    let options = LabelSheetOptions::default();

    assert_eq!(options.sheet.width, 8.5);
    assert_eq!(options.sheet.height, 11.0);
    assert_eq!(options.sheet.labels_per_sheet(), 12);
    assert_eq!(options.sheet.margins.top, 0.5);
    assert_eq!(options.sheet.margins.left, 0.25);
    assert_eq!(options.dpi, 300.0);
    assert_eq!(options.resize_mode, ResizeMode::Fit);
    assert_eq!(options.start_position, 1);
    assert_eq!(options.batch_size, 50);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_rejects_empty_grid() {
    let mut options = LabelSheetOptions::default();
    options.sheet.rows = 0;

    match options.validate() {
        Err(LabelError::InvalidConfiguration(msg)) => assert!(msg.contains("column")),
        other => panic!("Expected InvalidConfiguration, got {:?}", other),
    }
}

#[test]
fn test_validation_rejects_bad_numbers() {
    let base = LabelSheetOptions::default();

    let mut options = base.clone();
    options.dpi = 0.0;
    assert!(options.validate().is_err());

    let mut options = base.clone();
    options.preview_dpi = f64::NAN;
    assert!(options.validate().is_err());

    let mut options = base.clone();
    options.batch_size = 0;
    assert!(options.validate().is_err());

    let mut options = base.clone();
    options.start_position = 0;
    assert!(options.validate().is_err());

    let mut options = base.clone();
    options.image_scale_percent = 0;
    assert!(options.validate().is_err());

    let mut options = base.clone();
    options.sheet.margins.left = -0.1;
    assert!(options.validate().is_err());

    let mut options = base;
    options.sizing = LabelSizing::Auto {
        h_spacing: f64::INFINITY,
        v_spacing: 0.1,
    };
    assert!(options.validate().is_err());
}

#[test]
fn test_validation_rejects_margins_wider_than_sheet() {
    let mut options = LabelSheetOptions::default();
    options.sheet.margins = Margins::uniform(5.0);

    assert!(matches!(
        options.validate(),
        Err(LabelError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_validation_rejects_gaps_that_consume_cells() {
    let mut options = LabelSheetOptions::default();
    options.sizing = LabelSizing::Auto {
        h_spacing: 4.0,
        v_spacing: 0.1,
    };

    assert!(options.validate().is_err());
}

#[test]
fn test_sheet_count() {
    let mut options = LabelSheetOptions::default();
    assert_eq!(options.sheet_count(0), 0);
    assert_eq!(options.sheet_count(1), 1);
    assert_eq!(options.sheet_count(12), 1);
    assert_eq!(options.sheet_count(13), 2);

    options.start_position = 5;
    assert_eq!(options.skipped_cells(), 4);
    assert_eq!(options.sheet_count(8), 1);
    assert_eq!(options.sheet_count(9), 2);
}

#[test]
fn test_paper_sizes_in_units() {
    assert_eq!(PaperSize::Letter.dimensions(MeasurementUnit::Points), (612.0, 792.0));
    let (w, h) = PaperSize::A4.dimensions(MeasurementUnit::Millimeters);
    assert!((w - 210.0).abs() < 1e-9);
    assert!((h - 297.0).abs() < 1e-9);
    assert_eq!(MeasurementUnit::Millimeters.to_px(25.4, 300.0), 300);
}

#[test]
fn test_template_options_validate() {
    for template in LabelTemplate::ALL {
        let options = template.options();
        assert!(options.validate().is_ok(), "{} is invalid", template.name());
    }
    assert_eq!(LabelTemplate::Avery5167.options().sheet.labels_per_sheet(), 80);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let mut options = LabelTemplate::Avery5163.options();
    options.resize_mode = ResizeMode::Fill;
    options.image_scale_percent = 90;
    options.start_position = 4;
    options.guides = GuideLines::PlacedOnly;
    options.batch_size = 20;

    let temp_file = NamedTempFile::new().unwrap();
    options.save(temp_file.path()).await.unwrap();
    let loaded = LabelSheetOptions::load(temp_file.path()).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(
        temp_file.path(),
        r#"{ "sizing": { "mode": "inset", "buffer": 0.05 }, "dpi": 150.0 }"#,
    )
    .await
    .unwrap();

    let loaded = LabelSheetOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.sizing, LabelSizing::Inset { buffer: 0.05 });
    assert_eq!(loaded.dpi, 150.0);
    assert_eq!(loaded.sheet, SheetSpec::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_rejects_malformed_config() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), "not json").await.unwrap();

    assert!(matches!(
        LabelSheetOptions::load(temp_file.path()).await,
        Err(LabelError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_convert_units_keeps_layout() {
    let mut options = LabelSheetOptions::default();
    options.convert_units(MeasurementUnit::Points);

    assert_eq!(options.sheet.unit, MeasurementUnit::Points);
    assert_eq!(options.sheet.width, 612.0);
    assert_eq!(options.sheet.margins.left, 18.0);
    assert_eq!(
        options.sizing,
        LabelSizing::Auto {
            h_spacing: 7.2,
            v_spacing: 7.2,
        }
    );
}

#[test]
fn test_validation_rejects_infinite_label_size() {
    let mut options = LabelSheetOptions::default();
    options.sizing = LabelSizing::Explicit {
        width: f64::INFINITY,
        height: 1.0,
        h_spacing: 0.1,
        v_spacing: 0.1,
    };

    match options.validate() {
        Err(LabelError::InvalidConfiguration(msg)) => assert!(msg.contains("label width")),
        other => panic!("Expected InvalidConfiguration, got {:?}", other),
    }
}

#[test]
fn test_validation_rejects_label_larger_than_a_raster() {
    // 143165577in at 30 dpi is 4294967310px, just past u32::MAX
    let mut options = LabelSheetOptions::default();
    options.dpi = 30.0;
    options.sizing = LabelSizing::Explicit {
        width: 143_165_577.0,
        height: 1.0,
        h_spacing: 0.1,
        v_spacing: 0.1,
    };

    match options.validate() {
        Err(LabelError::InvalidConfiguration(msg)) => assert!(msg.contains("Label width")),
        other => panic!("Expected InvalidConfiguration, got {:?}", other),
    }
}
