use std::fs;
use std::path::Path;

use icon_variants::{
    IconError, OutputFormat, OutputTarget, RenderProfile, VariantSettings, ICO_SIZES,
};
use image::{Rgba, RgbaImage};

/// 512x512 opaque red with a transparent 64px top-left corner.
fn write_source(path: &Path) {
    let img = RgbaImage::from_fn(512, 512, |x, y| {
        if x < 64 && y < 64 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([255, 0, 0, 255])
        }
    });
    img.save(path).unwrap();
}

#[test]
fn standard_job_writes_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("ico.png");
    write_source(&source);

    let out_dir = dir.path().join("icons");
    let profile = RenderProfile::standard(&source, &out_dir);

    let mut printed = Vec::new();
    let renderer = icon_variants::IconRenderer::open(&source).unwrap();
    let artifacts = profile
        .run_with(&renderer, |a| printed.push(a.to_string()))
        .unwrap();

    assert_eq!(artifacts.len(), 6);
    assert_eq!(printed.len(), 6);
    assert!(printed[0].starts_with("Created: "));
    assert!(printed[3].starts_with("Created (Solid White BG): "));
    assert!(printed[5].starts_with("Created (Padded for Android): "));

    for artifact in &artifacts {
        assert!(artifact.path.exists(), "{} missing", artifact.path.display());
        assert_eq!((artifact.width, artifact.height), (512, 512));
        match artifact.format {
            OutputFormat::Png => assert_eq!(artifact.frame_sizes, vec![512]),
            OutputFormat::Ico => assert_eq!(artifact.frame_sizes, ICO_SIZES.to_vec()),
        }
    }

    // Rounded PNG: the transparent source corner sits outside the rounded
    // mask, so it stays transparent.
    let rounded = image::open(out_dir.join("new_ico_white.png")).unwrap().to_rgba8();
    assert_eq!(rounded.dimensions(), (512, 512));
    assert_eq!(rounded.get_pixel(0, 0)[3], 0);
    // Corner edges are hard: every pixel is either kept or cut.
    assert!(rounded.pixels().all(|p| p[3] == 0 || p[3] == 255));
    // Inside the mask but under transparent source pixels: white.
    assert_eq!(rounded.get_pixel(63, 63).0, [255, 255, 255, 255]);
    assert_eq!(rounded.get_pixel(300, 300).0, [255, 0, 0, 255]);

    // Tray PNG: no alpha, corner becomes white.
    let tray = image::open(out_dir.join("tray_icon.png")).unwrap();
    assert_eq!(tray.color(), image::ColorType::Rgb8);
    assert_eq!(tray.to_rgb8().get_pixel(0, 0).0, [255, 255, 255]);

    // Android foreground: same canvas, content centered.
    let padded = image::open(out_dir.join("new_ico_padded.png")).unwrap().to_rgba8();
    assert_eq!(padded.dimensions(), (512, 512));
    assert_eq!(padded.get_pixel(89, 300)[3], 0);
    assert_eq!(padded.get_pixel(422, 300)[3], 0);
    assert_eq!(padded.get_pixel(256, 256).0, [255, 0, 0, 255]);

    // ICO: seven frames in the header; the decoder returns the largest.
    for name in ["ico.ico", "tray_icon.ico"] {
        let bytes = fs::read(out_dir.join(name)).unwrap();
        assert_eq!(usize::from(u16::from_le_bytes([bytes[4], bytes[5]])), ICO_SIZES.len());
    }
    let ico = image::open(out_dir.join("ico.ico")).unwrap();
    assert_eq!(ico.width(), *ICO_SIZES.last().unwrap());
    let tray_ico = image::open(out_dir.join("tray_icon.ico")).unwrap().to_rgba8();
    assert!(tray_ico.pixels().all(|p| p[3] == 255));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("ico.png");
    write_source(&source);

    let first = RenderProfile::standard(&source, dir.path().join("a")).run().unwrap();
    let second = RenderProfile::standard(&source, dir.path().join("b")).run().unwrap();

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(fs::read(&a.path).unwrap(), fs::read(&b.path).unwrap());
    }
}

#[test]
fn profile_file_resolves_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    write_source(&dir.path().join("master.png"));

    let profile = RenderProfile::new("master.png")
        .with_target(OutputTarget::new("out/fg.png", VariantSettings::padded_foreground()))
        .with_target(
            OutputTarget::new("out/tray.bin", VariantSettings::solid_white())
                .with_format(OutputFormat::Ico),
        );
    let profile_path = dir.path().join("job.json");
    fs::write(&profile_path, profile.to_json_pretty().unwrap()).unwrap();

    let loaded = RenderProfile::load(&profile_path).unwrap();
    assert_eq!(loaded.source, dir.path().join("master.png"));

    let artifacts = loaded.run().unwrap();
    assert_eq!(artifacts[1].format, OutputFormat::Ico);
    assert!(dir.path().join("out/fg.png").exists());
    assert!(dir.path().join("out/tray.bin").exists());
}

#[test]
fn missing_source_aborts_the_job() {
    let dir = tempfile::tempdir().unwrap();
    let profile = RenderProfile::standard(dir.path().join("nope.png"), dir.path());

    let err = profile.run().unwrap_err();
    assert!(matches!(err, IconError::Io { .. }), "got {err:?}");
    assert!(!dir.path().join("ico.png").exists());
}

#[test]
fn non_square_source_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("wide.png");
    RgbaImage::new(64, 32).save(&source).unwrap();

    let err = RenderProfile::standard(&source, dir.path()).run().unwrap_err();
    assert!(matches!(err, IconError::NotSquare { width: 64, height: 32 }));
}

#[test]
fn unsupported_extension_stops_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("ico.png");
    write_source(&source);

    let profile = RenderProfile::new(&source)
        .with_target(OutputTarget::new(dir.path().join("icon.gif"), VariantSettings::rounded_white()));

    let err = profile.run().unwrap_err();
    assert!(matches!(err, IconError::UnsupportedFormat(_)));
    assert!(!dir.path().join("icon.gif").exists());
}

#[test]
fn svg_source_feeds_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("logo.svg");
    fs::write(
        &source,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect x="2" y="2" width="6" height="6" fill="#0000ff"/></svg>"##,
    )
    .unwrap();

    let mut profile = RenderProfile::new(&source)
        .with_target(OutputTarget::new(dir.path().join("logo.png"), VariantSettings::solid_white()));
    profile.svg_size = 100;

    let artifacts = profile.run().unwrap();
    assert_eq!((artifacts[0].width, artifacts[0].height), (100, 100));

    let out = image::open(dir.path().join("logo.png")).unwrap().to_rgb8();
    assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(out.get_pixel(50, 50).0, [0, 0, 255]);
}
