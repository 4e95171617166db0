//! Tests for image loading and saving

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use tempfile::TempDir;
    use tonemosaic::MosaicError;
    use tonemosaic::io::image::{load_image, save_image};

    // Saved images load back with the same pixels
    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("picture.png");
        let image = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8 * 50, y as u8 * 90, 7]));

        save_image(&image, &path).unwrap();
        let loaded = load_image(&path).unwrap();

        assert_eq!(loaded.to_rgb8(), image);
    }

    // Missing parent directories are created
    #[test]
    fn test_save_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("gray.png");

        save_image(&GrayImage::from_pixel(1, 1, Luma([3])), &path).unwrap();

        assert!(path.exists());
    }

    // Missing files are reported as load errors with their path
    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.png");

        let result = load_image(&path);

        assert!(matches!(result, Err(MosaicError::ImageLoad { path: p, .. }) if p == path));
    }

    // Non-image content fails to decode
    #[test]
    fn test_load_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(matches!(
            load_image(&path),
            Err(MosaicError::ImageLoad { .. })
        ));
    }

    // A parent that is a file cannot be created
    #[test]
    fn test_save_into_file_parent() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let result = save_image(&GrayImage::new(1, 1), &blocker.join("out.png"));

        assert!(matches!(result, Err(MosaicError::FileSystem { .. })));
    }

    // Unknown extensions fail to encode
    #[test]
    fn test_save_unknown_format() {
        let dir = TempDir::new().unwrap();
        let result = save_image(&GrayImage::new(1, 1), &dir.path().join("out.unknown"));

        assert!(matches!(result, Err(MosaicError::ImageExport { .. })));
    }
}
