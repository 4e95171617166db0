//! Tests for argument parsing and end-to-end command runs

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::imageops::FilterType;
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tonemosaic::MosaicError;
    use tonemosaic::io::cli::{Cli, Command, MosaicRunner, ResizeFilter};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tonemosaic").chain(args.iter().copied())).unwrap()
    }

    fn path_arg(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    // Color arguments fall back to the documented defaults
    #[test]
    fn test_parse_color_defaults() {
        let cli = parse(&["color", "photo.jpg"]);

        assert!(!cli.quiet);
        assert!(cli.should_show_progress());
        assert!(matches!(cli.command, Command::Color(_)));

        let common = cli.common();
        assert_eq!(common.input, PathBuf::from("photo.jpg"));
        assert!(common.output.is_none());
        assert!(!common.save_tones);
        assert!(common.tones_dir.is_none());
        assert!((common.canvas_factor - 2.0).abs() < f64::EPSILON);
        assert!((common.seed_factor - 0.02).abs() < f64::EPSILON);
        assert_eq!(common.filter, ResizeFilter::CatmullRom);
    }

    // Gray arguments accept a level count and every shared option
    #[test]
    fn test_parse_gray_options() {
        let cli = parse(&[
            "gray", "in.png", "out.png", "-n", "12", "-c", "1.5", "-f", "0.1", "-t",
            "--tones-dir", "levels", "--filter", "nearest", "-q",
        ]);

        let Command::Gray(args) = &cli.command else {
            panic!("expected the gray command");
        };
        assert_eq!(args.levels, 12);
        assert!(cli.quiet);
        assert!(!cli.should_show_progress());

        let common = cli.common();
        assert_eq!(common.output, Some(PathBuf::from("out.png")));
        assert!(common.save_tones);
        assert_eq!(common.tones_dir, Some(PathBuf::from("levels")));

        let config = common.mosaic_config();
        assert!((config.canvas_factor - 1.5).abs() < f64::EPSILON);
        assert!((config.seed_factor - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.filter, FilterType::Nearest);
    }

    // A tones directory is only accepted together with --save-tones
    #[test]
    fn test_tones_dir_requires_save_tones() {
        assert!(Cli::try_parse_from(["tonemosaic", "color", "in.png", "--tones-dir", "t"]).is_err());

        let cli = parse(&["color", "in.png", "--tones-dir", "t", "--save-tones"]);
        assert!(cli.common().save_tones);
        assert_eq!(cli.common().tones_dir, Some(PathBuf::from("t")));
    }

    // The default level count is 30
    #[test]
    fn test_parse_gray_default_levels() {
        let cli = parse(&["gray", "in.png"]);
        let Command::Gray(args) = cli.command else {
            panic!("expected the gray command");
        };
        assert_eq!(args.levels, 30);
    }

    // Quiet is global and may precede the subcommand
    #[test]
    fn test_parse_global_quiet() {
        assert!(parse(&["-q", "color", "in.png"]).quiet);
        assert!(parse(&["color", "--quiet", "in.png"]).quiet);
    }

    // Missing inputs and unknown commands are parse errors
    #[test]
    fn test_parse_errors() {
        assert!(Cli::try_parse_from(["tonemosaic", "color"]).is_err());
        assert!(Cli::try_parse_from(["tonemosaic", "sepia", "in.png"]).is_err());
        assert!(Cli::try_parse_from(["tonemosaic", "gray", "in.png", "-n", "many"]).is_err());
    }

    // Filters map onto the resampling filters of the image crate
    #[test]
    fn test_filter_conversion() {
        assert_eq!(FilterType::from(ResizeFilter::Nearest), FilterType::Nearest);
        assert_eq!(FilterType::from(ResizeFilter::Triangle), FilterType::Triangle);
        assert_eq!(FilterType::from(ResizeFilter::Gaussian), FilterType::Gaussian);
        assert_eq!(FilterType::from(ResizeFilter::Lanczos3), FilterType::Lanczos3);
    }

    // Outputs default to `<stem>_mosaic.<ext>` beside the input
    #[test]
    fn test_get_output_path() {
        assert_eq!(
            MosaicRunner::get_output_path(Path::new("photos/cat.jpg")),
            PathBuf::from("photos/cat_mosaic.jpg")
        );
        assert_eq!(
            MosaicRunner::get_output_path(Path::new("cat.png")),
            PathBuf::from("cat_mosaic.png")
        );
        assert_eq!(
            MosaicRunner::get_output_path(Path::new("noext")),
            PathBuf::from("noext_mosaic.png")
        );
    }

    // A missing input fails with a load error
    #[test]
    fn test_run_missing_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("nothing.png");
        let cli = parse(&["color", &path_arg(&input), "-q"]);

        let result = MosaicRunner::new(cli).run();

        assert!(matches!(result, Err(MosaicError::ImageLoad { .. })));
    }

    // The color command writes the mosaic next to the input
    #[test]
    fn test_run_color() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("source.png");
        RgbImage::from_pixel(20, 10, Rgb([30, 60, 90]))
            .save(&input)
            .unwrap();
        let tones = dir.path().join("tones");
        let cli = parse(&[
            "color",
            &path_arg(&input),
            "-c",
            "1.0",
            "-f",
            "0.5",
            "-t",
            "--tones-dir",
            &path_arg(&tones),
            "-q",
        ]);

        let output = MosaicRunner::new(cli).run().unwrap();

        assert_eq!(output, dir.path().join("source_mosaic.png"));
        let mosaic = image::open(&output).unwrap();
        assert_eq!((mosaic.width(), mosaic.height()), (20, 10));
        assert!(tones.join("30_60_90.png").exists());
    }

    // The gray command honors an explicit output path
    #[test]
    fn test_run_gray() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("source.png");
        GrayImage::from_pixel(16, 16, Luma([128])).save(&input).unwrap();
        let output = dir.path().join("nested").join("result.png");
        let cli = parse(&[
            "gray",
            &path_arg(&input),
            &path_arg(&output),
            "-c",
            "0.5",
            "-f",
            "0.25",
            "-n",
            "4",
            "-q",
        ]);

        let written = MosaicRunner::new(cli).run().unwrap();

        assert_eq!(written, output);
        let mosaic = image::open(&output).unwrap();
        assert_eq!((mosaic.width(), mosaic.height()), (8, 8));
    }

    // An invalid level count fails before anything is written
    #[test]
    fn test_run_gray_rejects_single_level() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("source.png");
        GrayImage::new(8, 8).save(&input).unwrap();
        let cli = parse(&["gray", &path_arg(&input), "-n", "1", "-q"]);

        let result = MosaicRunner::new(cli).run();

        assert!(matches!(
            result,
            Err(MosaicError::InvalidParameter {
                parameter: "levels",
                ..
            })
        ));
        assert!(!dir.path().join("source_mosaic.png").exists());
    }
}
