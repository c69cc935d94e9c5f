mod common;

use circlescan::{load_image, FilePresenter};
use common::*;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_missing_file_is_load_error() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("does-not-exist.png");

    let err = load_image(&path).expect_err("missing file must fail");
    match err.downcast_ref::<SearchError>() {
        Some(SearchError::Load { path: failed, .. }) => assert_eq!(failed, &path),
        other => panic!("expected load error, got {other:?}"),
    }
}

#[test]
fn test_undecodable_file_is_load_error() -> anyhow::Result<()> {
    let file = tempfile::Builder::new().suffix(".png").tempfile()?;
    std::fs::write(file.path(), b"definitely not a png")?;

    let err = load_image(file.path()).expect_err("garbage must fail to decode");
    assert!(matches!(
        err.downcast_ref::<SearchError>(),
        Some(SearchError::Load { .. })
    ));
    Ok(())
}

#[test]
fn test_load_failure_precedes_detection() {
    let calls = Rc::new(Cell::new(0u32));
    let counter = calls.clone();
    let search = CircleSearch::default().with_detector(Box::new(move |_: &image::GrayImage| {
        counter.set(counter.get() + 1);
        Vec::new()
    }));

    let result = load_image("no/such/dir/can.png")
        .and_then(|mut img| search.run(&mut img, &mut |_: &image::RgbImage| -> anyhow::Result<()> { Ok(()) }));

    assert!(result.is_err());
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_loads_png_as_rgb() -> anyhow::Result<()> {
    let img = disk_image(40, 30, (20, 15), 8);
    let file = save_temp_png(&img);

    let loaded = load_image(file.path())?;
    assert_eq!(loaded.dimensions(), (40, 30));
    assert_eq!(loaded, img);
    Ok(())
}

#[test]
fn test_file_presenter_writes_annotated_image() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let out = dir.path().join("annotated.png");

    let mut img = disk_image(200, 200, (100, 100), 40);
    let outcome = CircleSearch::default().run(&mut img, &mut FilePresenter::new(&out))?;
    assert!(outcome.is_found());

    let written = load_image(&out)?;
    assert_eq!(written, img);
    Ok(())
}
