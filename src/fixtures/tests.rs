#[cfg(test)]
mod tests {
    use crate::camera::{DetectorLayout, Extent2I};
    use crate::fixtures::{
        DataProduct, DatasetType, FakeDataRef, make_dark, make_fake_amp, make_fake_wcs,
        make_flat, make_raw,
    };

    fn assert_close(actual: f32, expected: f64) {
        assert!(
            (actual as f64 - expected).abs() < 1e-3,
            "{} != {}",
            actual,
            expected
        );
    }

    fn small_layout() -> DetectorLayout {
        DetectorLayout::builder()
            .amps(2, 2)
            .amp_pixels(16, 12)
            .prescan_rows(1)
            .h_overscan_cols(2)
            .v_overscan_rows(3)
            .extended_cols(1)
            .build()
    }

    #[test]
    fn test_fake_wcs() {
        let wcs = make_fake_wcs();
        assert_eq!(wcs.pixel_to_sky(0.0, 0.0), (45.0, 45.0));
        assert_eq!(wcs.cd, [[1.0, 0.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_fake_amp_marks_first_pixel_read() {
        let detector = DetectorLayout::default().build_detector(true).unwrap();
        let amp = detector.amp("A:2,1").unwrap();
        let im = make_fake_amp(amp).unwrap();
        assert_eq!(im.dimensions(), Extent2I::new(523, 1043));
        let data_min = amp.raw_data_bbox.min();
        // zeroed read mark at the data minimum, gain elsewhere
        assert_eq!(im.get(data_min.x, data_min.y), 0.0);
        assert_eq!(im.get(data_min.x + 9, data_min.y + 9), 0.0);
        assert_eq!(im.get(data_min.x + 10, data_min.y), amp.gain as f32);
        assert_eq!(im.get(0, 0), amp.gain as f32);
    }

    #[test]
    fn test_dark_pixel_values() {
        let layout = DetectorLayout::default();
        let dark_rate = 2.0;
        let exptime = 40.0;
        let dark = make_dark(&layout, dark_rate, exptime).unwrap();
        assert_eq!(dark.calib.exptime, exptime);
        let detector = layout.build_detector(false).unwrap();
        for amp in &detector {
            let min = amp.bbox.min();
            let max = amp.bbox.max();
            let expected = dark_rate * exptime / amp.gain;
            assert_close(dark.image().get(min.x, min.y), expected);
            assert_close(dark.image().get(max.x, max.y), expected);
        }
    }

    #[test]
    fn test_flat_row_gradient() {
        let layout = DetectorLayout::default();
        let gradient = 0.10;
        let flat = make_flat(&layout, gradient).unwrap();
        let detector = layout.build_detector(false).unwrap();
        let n_rows = layout.n_pix_y;
        for amp in &detector {
            let min = amp.bbox.min();
            for r in [0, 1, 511, n_rows - 1] {
                let expected = (1.0 - gradient * r as f64 / (n_rows - 1) as f64) / amp.gain;
                assert_close(flat.image().get(min.x + 5, min.y + r), expected);
            }
        }
    }

    #[test]
    fn test_raw_pixel_values() {
        let layout = small_layout();
        let (dark_rate, oscan, gradient, exptime) = (2.0, 1000.0, 0.10, 15.0);
        let raw = make_raw(&layout, dark_rate, oscan, gradient, exptime).unwrap();
        assert_eq!(raw.calib.exptime, exptime);

        let detector = layout.build_detector(false).unwrap();
        let n_rows = layout.n_pix_y;
        for amp in &detector {
            let data_min = amp.raw_data_bbox.min();
            for r in [0, n_rows - 1] {
                let grad = 1.0 - gradient * r as f64 / (n_rows - 1) as f64;
                let expected = (5000.0 * grad + dark_rate * exptime) / amp.gain + oscan;
                assert_close(raw.image().get(data_min.x, data_min.y + r), expected);
            }
            let oscan_min = amp.raw_horizontal_overscan_bbox.min();
            assert_close(raw.image().get(oscan_min.x, oscan_min.y), oscan);
        }
    }

    #[test]
    fn test_raw_is_untrimmed_mosaic() {
        let layout = small_layout();
        let raw = make_raw(&layout, 2.0, 1000.0, 0.10, 15.0).unwrap();
        let raw_dims = layout.raw_amp_dimensions();
        assert_eq!(
            raw.bbox().dimensions(),
            Extent2I::new(layout.n_amp_x * raw_dims.x, layout.n_amp_y * raw_dims.y)
        );
        assert!(raw.detector().is_some());
        assert!(raw.wcs().is_some());
    }

    #[test]
    fn test_fake_data_ref_products() {
        let data_ref = FakeDataRef {
            layout: small_layout(),
            ..FakeDataRef::default()
        };

        let raw = data_ref.get(DatasetType::Raw).unwrap().into_exposure().unwrap();
        assert_eq!(raw.calib.exptime, data_ref.exptime);

        let dark = data_ref.get(DatasetType::Dark).unwrap().into_exposure().unwrap();
        assert_eq!(dark.calib.exptime, data_ref.dark_exptime);
        assert_eq!(
            dark.bbox().dimensions(),
            data_ref.layout.science_dimensions()
        );

        let flat = data_ref.get(DatasetType::Flat).unwrap().into_exposure().unwrap();
        assert_eq!(
            flat.bbox().dimensions(),
            data_ref.layout.science_dimensions()
        );

        match data_ref.get(DatasetType::Defects).unwrap() {
            DataProduct::Defects(defects) => assert!(defects.is_empty()),
            DataProduct::Exposure(_) => panic!("expected a defect list"),
        }
    }

    #[test]
    fn test_fake_data_ref_put_writes_tiff() {
        let data_ref = FakeDataRef {
            layout: small_layout(),
            ..FakeDataRef::default()
        };
        let flat = data_ref.get(DatasetType::Flat).unwrap().into_exposure().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let written = data_ref.put(&flat, dir.path().join("flat_out")).unwrap();
        assert_eq!(written.extension().unwrap(), "tiff");
        let bytes = std::fs::read(&written).unwrap();
        assert_eq!(&bytes[..4], b"II\x2a\x00");
    }
}
