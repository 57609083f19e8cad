//! Hero image fallback chain.

mod test_utils;

use fabula_core::{FileKind, ImageProvenance};
use fabula_studio::extract_canon_json;
use test_utils::{MockImageDriver, StubRasterizer, TestHarnessBuilder, sample_canon_json};

#[tokio::test]
async fn non_pdf_source_never_rasterizes() {
    let (harness, rasterizer) = TestHarnessBuilder::new()
        .rasterizer(StubRasterizer::succeeding("https://raster.example/page1.png"))
        .build();
    let canon = extract_canon_json(&sample_canon_json()).unwrap();

    let hero = harness
        .studio
        .generate_hero(&canon, "p1", FileKind::Txt, b"plain text", "gemini-3-preview")
        .await
        .unwrap();

    assert_eq!(hero.source, ImageProvenance::Ai);
    assert_eq!(hero.engine_id.as_deref(), Some("gemini-3-preview"));
    assert_eq!(rasterizer.unwrap().call_count(), 0);
    assert_eq!(harness.image.call_count(), 1);
}

#[tokio::test]
async fn failed_rasterization_falls_through_to_ai() {
    let (harness, rasterizer) = TestHarnessBuilder::new()
        .rasterizer(StubRasterizer::failing())
        .build();
    let canon = extract_canon_json(&sample_canon_json()).unwrap();

    let hero = harness
        .studio
        .generate_hero(&canon, "p1", FileKind::Pdf, b"%PDF-1.4", "gemini-3-preview")
        .await
        .unwrap();

    assert_eq!(hero.source, ImageProvenance::Ai);
    assert_eq!(rasterizer.unwrap().call_count(), 1);
    assert_eq!(harness.image.call_count(), 1);
}

#[tokio::test]
async fn pdf_source_uses_rasterized_page() {
    let (harness, _) = TestHarnessBuilder::new()
        .rasterizer(StubRasterizer::succeeding("https://raster.example/page1.png"))
        .build();
    let canon = extract_canon_json(&sample_canon_json()).unwrap();

    let hero = harness
        .studio
        .generate_hero(&canon, "p1", FileKind::Pdf, b"%PDF-1.4", "gemini-3-preview")
        .await
        .unwrap();

    assert_eq!(hero.source, ImageProvenance::Pdf);
    assert!(hero.engine_id.is_none());
    assert!(hero.url.contains("pdf-hero-"));
    // No AI generation happened.
    assert_eq!(harness.image.call_count(), 0);

    // Both the source PDF and the page image were persisted.
    let keys = harness.objects.keys().await;
    assert!(keys.iter().any(|k| k.contains("/source/")));
    assert!(keys.iter().any(|k| k.contains("/hero/pdf-hero-")));
}

#[tokio::test]
async fn missing_rasterizer_skips_straight_to_ai() {
    let (harness, _) = TestHarnessBuilder::new().build();
    let canon = extract_canon_json(&sample_canon_json()).unwrap();

    let hero = harness
        .studio
        .generate_hero(&canon, "p1", FileKind::Pdf, b"%PDF-1.4", "gemini-3-preview")
        .await
        .unwrap();

    assert_eq!(hero.source, ImageProvenance::Ai);
}

#[tokio::test]
async fn both_pipelines_failing_yields_no_hero() {
    let (harness, _) = TestHarnessBuilder::new()
        .rasterizer(StubRasterizer::failing())
        .image(MockImageDriver::failing())
        .build();
    let canon = extract_canon_json(&sample_canon_json()).unwrap();

    let hero = harness
        .studio
        .generate_hero(&canon, "p1", FileKind::Pdf, b"%PDF-1.4", "gemini-3-preview")
        .await;

    assert!(hero.is_none());
}

#[tokio::test]
async fn unknown_image_engine_falls_back_to_default() {
    let (harness, _) = TestHarnessBuilder::new().build();
    let canon = extract_canon_json(&sample_canon_json()).unwrap();

    let hero = harness
        .studio
        .generate_hero(&canon, "p1", FileKind::Txt, b"text", "dall-e-9")
        .await
        .unwrap();

    assert_eq!(hero.source, ImageProvenance::Ai);
    assert_eq!(hero.engine_id.as_deref(), Some("gemini-3-preview"));
}
