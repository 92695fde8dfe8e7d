mod common;

use common::*;
use image::{Rgb, RgbImage};
use pdf_labels::raster::SourceFingerprint;
use pdf_labels::*;

#[test]
fn test_read_metadata_counts_pages() {
    let pdf = create_test_pdf(7);
    assert_eq!(read_metadata(&pdf).unwrap().page_count, 7);
}

#[test]
fn test_read_metadata_rejects_garbage() {
    assert!(matches!(
        read_metadata(b"%PDF-1.7 truncated"),
        Err(LabelError::SourceDecode(_))
    ));
}

#[test]
fn test_fingerprint_is_content_hash() {
    let a = SourceFingerprint::of(b"first document");
    let b = SourceFingerprint::of(b"first document");
    let c = SourceFingerprint::of(b"second document");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.to_string().len(), 64);
}

#[test]
fn test_cache_serves_repeat_requests() {
    let mut cache = CachingRasterizer::new(SyntheticRasterizer::new(10, 4, 4));

    let first = cache.rasterize(b"doc", 1, 3, 72.0).unwrap();
    let second = cache.rasterize(b"doc", 1, 3, 72.0).unwrap();

    assert_eq!(first, second);
    assert_eq!(cache.inner().windows, vec![(1, 3)]);
    assert_eq!(cache.stats(), (3, 3));
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_cache_fetches_only_missing_span() {
    let mut cache = CachingRasterizer::new(SyntheticRasterizer::new(10, 4, 4));
    cache.rasterize(b"doc", 2, 3, 72.0).unwrap();

    let pages = cache.rasterize(b"doc", 1, 5, 72.0).unwrap();

    assert_eq!(pages.len(), 5);
    for (i, page) in pages.iter().enumerate() {
        assert_eq!(*page.get_pixel(0, 0), page_color(i + 1));
    }
    assert_eq!(cache.inner().windows, vec![(2, 3), (1, 5)]);
}

#[test]
fn test_cache_keys_on_document_and_resolution() {
    let mut cache = CachingRasterizer::new(SyntheticRasterizer::new(10, 4, 4));
    cache.rasterize(b"doc", 1, 1, 72.0).unwrap();
    cache.rasterize(b"doc", 1, 1, 150.0).unwrap();
    cache.rasterize(b"other", 1, 1, 72.0).unwrap();

    assert_eq!(cache.inner().windows.len(), 3);
    assert_eq!(cache.len(), 3);

    cache.evict_document(SourceFingerprint::of(b"doc"));
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_cache_evicts_least_recently_used() {
    let mut cache = CachingRasterizer::with_capacity(SyntheticRasterizer::new(10, 4, 4), 2);
    cache.rasterize(b"doc", 1, 1, 72.0).unwrap();
    cache.rasterize(b"doc", 2, 2, 72.0).unwrap();
    // Touch page 1 so page 2 is the oldest
    cache.rasterize(b"doc", 1, 1, 72.0).unwrap();
    cache.rasterize(b"doc", 3, 3, 72.0).unwrap();

    assert_eq!(cache.len(), 2);
    cache.rasterize(b"doc", 1, 1, 72.0).unwrap();
    cache.rasterize(b"doc", 2, 2, 72.0).unwrap();
    assert_eq!(
        cache.inner().windows,
        vec![(1, 1), (2, 2), (3, 3), (2, 2)]
    );
}

#[test]
fn test_cached_preview_matches_uncached() {
    let options = small_options();
    let mut plain = SyntheticRasterizer::for_options(3, &options);
    let mut cached = CachingRasterizer::new(SyntheticRasterizer::for_options(3, &options));

    let expected = render_preview(&mut plain, &[], &options).unwrap();
    let first = render_preview(&mut cached, &[], &options).unwrap();
    let again = render_preview(&mut cached, &[], &options).unwrap();

    assert_eq!(first, expected);
    assert_eq!(again, expected);
    assert_eq!(cached.inner().windows, vec![(1, 1)]);
}

#[test]
fn test_write_pdf_pages_in_order() {
    let sheets = vec![
        RgbImage::from_pixel(60, 30, Rgb([0, 0, 0])),
        RgbImage::from_pixel(60, 30, Rgb([255, 255, 255])),
        RgbImage::from_pixel(60, 30, Rgb([255, 0, 0])),
    ];
    let bytes = write_pdf(&sheets, 30.0).unwrap();

    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 3);

    let page = doc.get_dictionary(pages[&1]).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    assert_eq!(media_box[2].as_float().unwrap(), 144.0);
    assert_eq!(media_box[3].as_float().unwrap(), 72.0);
}

#[test]
fn test_sheet_writer_streams_sheets() {
    let mut writer = PdfSheetWriter::new(300.0);
    for _ in 0..4 {
        writer
            .push_sheet(RgbImage::from_pixel(30, 30, Rgb([10, 20, 30])))
            .unwrap();
    }
    assert_eq!(writer.page_count(), 4);

    let bytes = writer.finish().unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));
    assert_eq!(read_metadata(&bytes).unwrap().page_count, 4);
}
