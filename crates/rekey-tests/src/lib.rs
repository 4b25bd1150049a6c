//! Integration tests for rekey crates.
//!
//! End-to-end cases that decode, process, encode and decode again, checking
//! what actually lands on disk for each format.

#[cfg(test)]
mod tests {
    use rekey_core::{BackgroundMode, ProcessOptions, Raster, Rgb8, Rgba8};
    use rekey_io::{Format, IoError, SaveOptions};
    use rekey_ops::{process_file, CancelFlag, OpsError, Pipeline, Stage, Unstoppable};
    use tempfile::tempdir;

    /// Green screen with a grey square subject in the middle.
    fn green_screen() -> Raster {
        Raster::from_fn(64, 48, |x, y| {
            if (16..48).contains(&x) && (12..36).contains(&y) {
                Rgba8::new(120, 110, 100, 255)
            } else {
                Rgba8::new(8, 250, 12, 255)
            }
        })
        .unwrap()
    }

    fn write_input(dir: &std::path::Path, raster: &Raster) -> std::path::PathBuf {
        rekey_io::save(raster, &SaveOptions::new(Format::Png, dir.join("input"))).unwrap()
    }

    #[test]
    fn test_green_screen_to_png() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), &green_screen());

        let process = ProcessOptions::default().with_custom_color(Rgb8::new(0, 255, 0), 10);
        let save = SaveOptions::new(Format::Png, dir.path().join("keyed"));
        let out = process_file(&input, &process, &save, &Unstoppable).unwrap();

        let result = rekey_io::read(&out).unwrap();
        assert_eq!(result.dimensions(), (64, 48));
        assert_eq!(result.pixel(5, 5), Rgba8::TRANSPARENT);
        assert_eq!(result.pixel(30, 20), Rgba8::new(120, 110, 100, 255));
        // Border survives: red is far from green.
        assert_eq!(result.pixel(0, 0), Rgba8::RED);
    }

    #[test]
    fn test_png_lossless_after_pipeline() {
        let dir = tempdir().unwrap();
        let src = Raster::from_fn(32, 32, |x, y| Rgba8::new(x as u8 * 7, y as u8 * 7, 200, (x * 8) as u8)).unwrap();
        let processed = Pipeline::default().run(src, &Unstoppable).unwrap();

        let path = rekey_io::save(&processed, &SaveOptions::new(Format::Png, dir.path().join("a"))).unwrap();
        assert_eq!(rekey_io::read(&path).unwrap(), processed);
    }

    #[test]
    fn test_jpeg_flattens_keyed_area_to_white() {
        let dir = tempdir().unwrap();
        // Large enough that some 16x16 blocks touch neither subject nor border.
        let src = Raster::from_fn(96, 96, |x, y| {
            if (40..56).contains(&x) && (40..56).contains(&y) {
                Rgba8::new(120, 110, 100, 255)
            } else {
                Rgba8::new(8, 250, 12, 255)
            }
        })
        .unwrap();
        let input = write_input(dir.path(), &src);

        let process = ProcessOptions::default().with_custom_color(Rgb8::new(0, 255, 0), 10);
        let save = SaveOptions::new(Format::Jpeg, dir.path().join("keyed.png")).with_quality(90);
        let out = process_file(&input, &process, &save, &Unstoppable).unwrap();
        assert_eq!(out.extension().and_then(|e| e.to_str()), Some("jpg"));

        let result = rekey_io::read(&out).unwrap();
        assert!(!result.has_transparency());
        let bg = result.pixel(24, 24);
        assert!(bg.r > 240 && bg.g > 240 && bg.b > 240, "{bg}");
    }

    #[test]
    fn test_bmp_reduced_and_opaque() {
        let dir = tempdir().unwrap();
        let src = Raster::from_fn(50, 50, |x, y| {
            Rgba8::new((x * 5) as u8, (y * 5) as u8, ((x ^ y) * 4) as u8, if (x + y) % 3 == 0 { 0 } else { 255 })
        })
        .unwrap();
        let input = write_input(dir.path(), &src);

        let save = SaveOptions::new(Format::Bmp, dir.path().join("out"));
        let out = process_file(&input, &ProcessOptions::default(), &save, &Unstoppable).unwrap();

        let result = rekey_io::read(&out).unwrap();
        assert!(result.pixels().iter().all(|p| p.a == 255));
        let mut colors: Vec<_> = result.pixels().iter().map(|p| p.rgb().to_array()).collect();
        colors.sort_unstable();
        colors.dedup();
        assert!(colors.len() <= 16, "{} colors", colors.len());
    }

    #[test]
    fn test_every_format_writes_canonical_extension() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), &green_screen());

        for format in Format::ALL {
            let save = SaveOptions::new(format, dir.path().join(format!("out_{}.data", format.name())));
            let out = process_file(&input, &ProcessOptions::default(), &save, &Unstoppable).unwrap();
            assert_eq!(out.extension().and_then(|e| e.to_str()), Some(format.extension()));
            let back = rekey_io::read(&out).unwrap();
            assert_eq!(back.dimensions(), (64, 48), "{format}");
        }
    }

    #[test]
    fn test_white_mode_resize_crop_replace() {
        let dir = tempdir().unwrap();
        let src = Raster::from_fn(200, 100, |x, _| if x < 100 { Rgba8::WHITE } else { Rgba8::BLACK }).unwrap();
        let input = write_input(dir.path(), &src);

        let process = ProcessOptions::default()
            .with_resize(100, 50)
            .with_crop(10, 10, 90, 40)
            .with_background(BackgroundMode::White, 10)
            .with_replacement(Rgba8::new(0, 0, 255, 255));
        let save = SaveOptions::new(Format::Tiff, dir.path().join("out"));
        let out = process_file(&input, &process, &save, &Unstoppable).unwrap();

        let result = rekey_io::read(&out).unwrap();
        assert_eq!(result.dimensions(), (80, 30));
        assert_eq!(result.pixel(10, 15), Rgba8::new(0, 0, 255, 255));
        assert_eq!(result.pixel(70, 15), Rgba8::BLACK);
    }

    #[test]
    fn test_invalid_crop_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), &green_screen());

        let process = ProcessOptions::default().with_crop(0, 0, 65, 10);
        let save = SaveOptions::new(Format::Png, dir.path().join("never"));
        let err = process_file(&input, &process, &save, &Unstoppable).unwrap_err();

        assert_eq!(err.failed_stage(), Some(Stage::Crop));
        assert!(!dir.path().join("never.png").exists());
    }

    #[test]
    fn test_cancelled_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), &green_screen());

        let flag = CancelFlag::new();
        flag.cancel();
        let save = SaveOptions::new(Format::Png, dir.path().join("never"));
        let err = process_file(&input, &ProcessOptions::default(), &save, &flag).unwrap_err();

        assert!(err.is_cancelled());
        assert!(!dir.path().join("never.png").exists());
    }

    #[test]
    fn test_corrupt_input_is_decode_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.png");
        std::fs::write(&input, b"\x89PNG but not really").unwrap();

        let save = SaveOptions::new(Format::Png, dir.path().join("out"));
        let err = process_file(&input, &ProcessOptions::default(), &save, &Unstoppable).unwrap_err();
        assert!(matches!(err, OpsError::Io(IoError::DecodeError(_))));
    }

    #[test]
    fn test_pipeline_runs_on_worker_thread() {
        let src = Raster::from_fn(64, 64, |x, y| {
            if (24..40).contains(&x) && (24..40).contains(&y) {
                Rgba8::new(200, 180, 160, 255)
            } else {
                Rgba8::new(10, 10, 10, 255)
            }
        })
        .unwrap();
        let pipeline = Pipeline::new(ProcessOptions::default().with_background(BackgroundMode::Black, 20));

        let out = std::thread::spawn(move || pipeline.run(src, &Unstoppable))
            .join()
            .unwrap()
            .unwrap();

        assert_eq!(out.pixel(5, 5), Rgba8::TRANSPARENT);
        assert_eq!(out.pixel(30, 30), Rgba8::new(200, 180, 160, 255));
    }

    #[test]
    fn test_single_pixel_every_format_and_quality() {
        let dir = tempdir().unwrap();
        let px = Raster::filled(1, 1, Rgba8::new(40, 90, 200, 128)).unwrap();

        for format in Format::ALL {
            for quality in [0, 50, 91, 100] {
                let save = SaveOptions::new(format, dir.path().join(format!("px_{quality}"))).with_quality(quality);
                let path = rekey_io::save(&px, &save).unwrap();
                let back = rekey_io::read(&path).unwrap();
                assert_eq!(back.dimensions(), (1, 1), "{format} q{quality}");
            }
        }
    }

    #[test]
    fn test_reprocessing_keyed_output_is_stable() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), &green_screen());
        let process = ProcessOptions::default()
            .with_custom_color(Rgb8::new(0, 255, 0), 10)
            .with_invert(true);

        let first = process_file(&input, &process, &SaveOptions::new(Format::Png, dir.path().join("one")), &Unstoppable).unwrap();
        let first = rekey_io::read(&first).unwrap();
        let second = Pipeline::new(process).run(first.clone(), &Unstoppable).unwrap();

        for (a, b) in first.pixels().iter().zip(second.pixels()) {
            if a.is_transparent() {
                assert_eq!(*b, Rgba8::TRANSPARENT);
            }
        }
    }
}
