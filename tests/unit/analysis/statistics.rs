//! Tests for block statistics against a naive per-pixel reference

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use tonemosaic::MosaicError;
    use tonemosaic::analysis::statistics::{
        ToneKey, average_color, average_luminance, channel_means, full_block, pixel_view,
    };
    use tonemosaic::spatial::{Block, BlockGrid};

    fn naive_average_color(image: &RgbImage, block: &Block) -> [u8; 3] {
        let mut sums = [0_u64; 3];
        for y in block.y..block.bottom() {
            for x in block.x..block.right() {
                let Rgb(channels) = *image.get_pixel(x, y);
                for (sum, value) in sums.iter_mut().zip(channels) {
                    *sum += u64::from(value);
                }
            }
        }
        let count = block.area();
        sums.map(|sum| (sum / count) as u8)
    }

    fn naive_average_luminance(image: &GrayImage, block: &Block) -> u8 {
        let mut sum = 0_u64;
        for y in block.y..block.bottom() {
            for x in block.x..block.right() {
                sum += u64::from(image.get_pixel(x, y)[0]);
            }
        }
        (sum / block.area()) as u8
    }

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                (x * 37 % 256) as u8,
                (y * 91 % 256) as u8,
                ((x * y + 13) % 256) as u8,
            ])
        })
    }

    // Uniform blocks average to their own color
    #[test]
    fn test_average_color_uniform() {
        let image = RgbImage::from_pixel(6, 4, Rgb([200, 100, 50]));
        let key = average_color(&image, &Block::new(1, 1, 3, 2)).unwrap();
        assert_eq!(key, ToneKey::new(200, 100, 50));
    }

    // Means are truncated, not rounded
    #[test]
    fn test_average_color_truncates() {
        let mut image = RgbImage::from_pixel(3, 1, Rgb([0, 0, 0]));
        image.put_pixel(0, 0, Rgb([1, 2, 255]));
        image.put_pixel(1, 0, Rgb([1, 2, 255]));
        // Sums 2, 4, 510 over 3 pixels
        let key = average_color(&image, &full_block(&image)).unwrap();
        assert_eq!(key, ToneKey::new(0, 1, 170));
    }

    // Alternating extremes average to 127, the truncated half
    #[test]
    fn test_average_color_maximum_variance() {
        let image = RgbImage::from_fn(4, 4, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        let key = average_color(&image, &full_block(&image)).unwrap();
        assert_eq!(key, ToneKey::new(127, 127, 127));
    }

    // The array-based extractor agrees with a per-pixel loop on every block
    #[test]
    fn test_average_color_matches_naive_reference() {
        let image = gradient(23, 17);
        for (block_width, block_height) in [(1, 1), (4, 4), (5, 3), (23, 17), (7, 17), (30, 30)] {
            let grid = BlockGrid::new(23, 17, block_width, block_height).unwrap();
            for block in grid.blocks() {
                let key = average_color(&image, &block).unwrap();
                assert_eq!(
                    key.channels(),
                    naive_average_color(&image, &block),
                    "block {block:?}"
                );
            }
        }
    }

    // Luminance extraction agrees with a per-pixel loop
    #[test]
    fn test_average_luminance_matches_naive_reference() {
        let image = GrayImage::from_fn(19, 11, |x, y| Luma([((x * 29 + y * 53) % 256) as u8]));
        let grid = BlockGrid::new(19, 11, 4, 3).unwrap();
        for block in grid.blocks() {
            assert_eq!(
                average_luminance(&image, &block).unwrap(),
                naive_average_luminance(&image, &block),
                "block {block:?}"
            );
        }
    }

    // Single pixel blocks return the pixel itself
    #[test]
    fn test_single_pixel_block() {
        let image = gradient(5, 5);
        let block = Block::new(3, 2, 1, 1);
        let key = average_color(&image, &block).unwrap();
        assert_eq!(key.channels(), image.get_pixel(3, 2).0);
    }

    // Channel means work for any channel count
    #[test]
    fn test_channel_means_generic() {
        let image = GrayImage::from_pixel(2, 2, Luma([9]));
        assert_eq!(channel_means(&image, &full_block(&image)).unwrap(), vec![9]);

        let rgb = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));
        assert_eq!(channel_means(&rgb, &full_block(&rgb)).unwrap(), vec![1, 2, 3]);
    }

    // The pixel view is rows x columns x channels
    #[test]
    fn test_pixel_view_shape() {
        let image = gradient(7, 3);
        let view = pixel_view(&image).unwrap();
        assert_eq!(view.shape(), &[3, 7, 3]);
        assert_eq!(view[[2, 5, 1]], image.get_pixel(5, 2)[1]);
    }

    // Empty or out-of-bounds blocks are rejected
    #[test]
    fn test_invalid_blocks() {
        let image = gradient(4, 4);
        for block in [
            Block::new(0, 0, 0, 2),
            Block::new(0, 0, 5, 1),
            Block::new(3, 3, 2, 2),
        ] {
            assert!(matches!(
                average_color(&image, &block),
                Err(MosaicError::InvalidParameter { .. })
            ));
        }
    }

    // Blocks whose edges overflow are rejected rather than panicking
    #[test]
    fn test_overflowing_block() {
        let block = Block::new(u32::MAX, 0, 2, 1);
        assert!(matches!(
            average_color(&RgbImage::new(4, 4), &block),
            Err(MosaicError::InvalidParameter { .. })
        ));
        assert!(matches!(
            average_luminance(&GrayImage::new(4, 4), &Block::new(0, u32::MAX, 1, 1)),
            Err(MosaicError::InvalidParameter { .. })
        ));
    }

    // Keys render as `r_g_b` for tone file names
    #[test]
    fn test_tone_key_display() {
        assert_eq!(ToneKey::new(255, 0, 17).to_string(), "255_0_17");
        assert_eq!(ToneKey([1, 2, 3]).channels(), [1, 2, 3]);
    }

    // The whole-image block matches the image dimensions
    #[test]
    fn test_full_block() {
        let image = GrayImage::new(9, 4);
        assert_eq!(full_block(&image), Block::new(0, 0, 9, 4));
    }
}
