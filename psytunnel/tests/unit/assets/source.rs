use super::*;

#[test]
fn missing_file_is_an_input_error_naming_the_path() {
    let err = SourceImage::load("/definitely/not/here.png", Canvas::new(8, 8)).unwrap_err();
    match &err {
        TunnelError::Input { path, .. } => {
            assert_eq!(path, Path::new("/definitely/not/here.png"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("/definitely/not/here.png"));
}

#[test]
fn undecodable_file_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.png");
    std::fs::write(&path, b"not an image").unwrap();
    let err = SourceImage::load(&path, Canvas::new(8, 8)).unwrap_err();
    assert!(matches!(err, TunnelError::Input { .. }));
}

#[test]
fn rgb_file_is_normalized_to_rgba_at_working_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blue.png");
    image::RgbImage::from_pixel(20, 10, image::Rgb([0, 0, 255]))
        .save(&path)
        .unwrap();

    let src = SourceImage::load(&path, Canvas::new(16, 16)).unwrap();
    assert_eq!(src.canvas(), Canvas::new(16, 16));
    assert_eq!(src.path(), Some(path.as_path()));
    let px = src.raster().pixel(8, 8);
    assert_eq!(px[3], 255);
    assert!(px[2] > 240 && px[0] < 10);
}

#[test]
fn from_rgba_keeps_dimensions() {
    let src = SourceImage::from_rgba(image::RgbaImage::new(5, 9));
    assert_eq!(src.canvas(), Canvas::new(5, 9));
    assert!(src.path().is_none());
}
