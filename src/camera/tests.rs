#[cfg(test)]
mod tests {
    use crate::camera::geom::{Box2I, Extent2I, Point2I};
    use crate::camera::{DetectorLayout, ReadoutCorner, build_amp};
    use crate::common::error::CcdError;

    fn small_layout() -> DetectorLayout {
        DetectorLayout::builder()
            .amps(2, 2)
            .amp_pixels(8, 6)
            .prescan_rows(1)
            .h_overscan_cols(2)
            .v_overscan_rows(3)
            .extended_cols(1)
            .build()
    }

    #[test]
    fn test_box_flip_lr() {
        let mut b = Box2I::new(Point2I::new(1, 4), Extent2I::new(512, 1024));
        b.flip_lr(523);
        assert_eq!(b.min(), Point2I::new(10, 4));
        assert_eq!(b.dimensions(), Extent2I::new(512, 1024));
    }

    #[test]
    fn test_box_flip_tb() {
        let mut b = Box2I::new(Point2I::new(1, 4), Extent2I::new(512, 1024));
        b.flip_tb(1043);
        assert_eq!(b.min(), Point2I::new(1, 15));
    }

    #[test]
    fn test_box_include_from_empty() {
        let mut hull = Box2I::empty();
        hull.include(&Box2I::new(Point2I::new(2, 3), Extent2I::new(4, 5)));
        hull.include(&Box2I::new(Point2I::new(0, 0), Extent2I::new(1, 1)));
        assert_eq!(hull.min(), Point2I::new(0, 0));
        assert_eq!(hull.dimensions(), Extent2I::new(6, 8));
    }

    #[test]
    fn test_readout_corner_bijection() {
        assert_eq!(
            ReadoutCorner::from_flips(true, true),
            ReadoutCorner::UpperRight
        );
        assert_eq!(
            ReadoutCorner::from_flips(true, false),
            ReadoutCorner::LowerRight
        );
        assert_eq!(
            ReadoutCorner::from_flips(false, true),
            ReadoutCorner::UpperLeft
        );
        assert_eq!(
            ReadoutCorner::from_flips(false, false),
            ReadoutCorner::LowerLeft
        );
    }

    #[test]
    fn test_amp_sub_regions_disjoint_with_hull_equal_to_raw_bbox() {
        let layout = DetectorLayout::default();
        for per_amp in [true, false] {
            let detector = layout.build_detector(per_amp).unwrap();
            for amp in &detector {
                let boxes = amp.raw_sub_boxes();
                for i in 0..boxes.len() {
                    for j in (i + 1)..boxes.len() {
                        assert!(
                            !boxes[i].overlaps(boxes[j]),
                            "{}: {} overlaps {}",
                            amp.name,
                            boxes[i],
                            boxes[j]
                        );
                    }
                }
                let mut hull = Box2I::empty();
                for b in boxes {
                    hull.include(b);
                }
                assert_eq!(hull, amp.raw_bbox, "{}", amp.name);
            }
        }
    }

    #[test]
    fn test_per_amp_geometry() {
        let layout = DetectorLayout::default();
        let amp = build_amp(&layout, true, false, 1, 0, true).unwrap();
        // 1 extended + 512 data + 10 h-overscan by 4 prescan + 1024 data + 15 v-overscan
        assert_eq!(amp.raw_bbox.dimensions(), Extent2I::new(523, 1043));
        assert_eq!(amp.raw_bbox.min(), Point2I::new(0, 0));
        assert_eq!(amp.raw_xy_offset, Extent2I::new(523, 0));
        assert!(amp.raw_flip_x);
        assert!(!amp.raw_flip_y);
        assert_eq!(amp.readout_corner, ReadoutCorner::LowerRight);
        assert_eq!(amp.bbox.min(), Point2I::new(512, 0));
        assert_eq!(amp.raw_data_bbox.min(), Point2I::new(1, 4));
    }

    #[test]
    fn test_mosaic_geometry_clears_flips() {
        let layout = DetectorLayout::default();
        let amp = build_amp(&layout, true, false, 1, 0, false).unwrap();
        assert!(!amp.raw_flip_x);
        assert!(!amp.raw_flip_y);
        assert_eq!(amp.readout_corner, ReadoutCorner::LowerLeft);
        assert_eq!(amp.raw_xy_offset, Extent2I::new(0, 0));
        assert_eq!(amp.raw_bbox.min(), Point2I::new(523, 0));
        // data box mirrored inside the segment, then translated
        assert_eq!(amp.raw_data_bbox.min(), Point2I::new(523 + 10, 4));
        assert_eq!(amp.raw_horizontal_overscan_bbox.min(), Point2I::new(523, 4));
    }

    #[test]
    fn test_detector_grid_flips_checkerboard() {
        let detector = small_layout().build_detector(true).unwrap();
        let corner = |name: &str| detector.amp(name).unwrap().readout_corner;
        assert_eq!(corner("A:0,0"), ReadoutCorner::LowerLeft);
        assert_eq!(corner("A:1,0"), ReadoutCorner::LowerRight);
        assert_eq!(corner("A:0,1"), ReadoutCorner::UpperLeft);
        assert_eq!(corner("A:1,1"), ReadoutCorner::UpperRight);
    }

    #[test]
    fn test_detector_gain_assignment() {
        let layout = DetectorLayout::default();
        let detector = layout.build_detector(true).unwrap();
        for iy in 0..layout.n_amp_y {
            for ix in 0..layout.n_amp_x {
                let amp = detector.amp(&format!("A:{},{}", ix, iy)).unwrap();
                assert_eq!(amp.gain, (ix + iy * layout.n_amp_x + 1) as f64);
                assert_eq!(amp.read_noise, 1.0);
                assert_eq!(amp.saturation, 100_000.0);
            }
        }
    }

    #[test]
    fn test_detector_metadata() {
        let detector = DetectorLayout::default().build_detector(false).unwrap();
        assert_eq!(detector.name, "TestDetector");
        assert_eq!(detector.serial, "THX1138");
        assert_eq!(detector.bbox.dimensions(), Extent2I::new(1536, 2048));
        assert_eq!(detector.ref_pos, (767.5, 1023.5));
        assert_eq!(detector.pixel_size_mm, (0.01, 0.01));
        assert_eq!(detector.yaw_deg, 0.0);
        assert_eq!(detector.amps().len(), 6);
    }

    #[test]
    fn test_layout_builder_defaults() {
        let layout = DetectorLayout::builder().amps(4, 4).build();
        assert_eq!(layout.n_amp_x, 4);
        assert_eq!(layout.n_amp_y, 4);
        assert_eq!(layout.n_pix_x, 512);
        assert_eq!(layout.prescan_rows, 4);
        assert_eq!(layout.name, "TestDetector");
    }

    #[test]
    fn test_zero_width_regions_allowed() {
        let layout = DetectorLayout::builder()
            .amps(1, 1)
            .amp_pixels(8, 6)
            .prescan_rows(0)
            .h_overscan_cols(0)
            .v_overscan_rows(0)
            .extended_cols(0)
            .build();
        let amp = build_amp(&layout, false, false, 0, 0, true).unwrap();
        assert_eq!(amp.raw_bbox, amp.raw_data_bbox);
    }

    #[test]
    fn test_verify_raw_geometry_rejects_overlap() {
        let layout = small_layout();
        let mut amp = build_amp(&layout, false, false, 0, 0, true).unwrap();
        amp.raw_prescan_bbox = amp.raw_data_bbox;
        let err = amp.verify_raw_geometry().unwrap_err();
        assert!(matches!(err, CcdError::AmpGeometry(_)));
    }

    #[test]
    fn test_verify_raw_geometry_rejects_hull_mismatch() {
        let layout = small_layout();
        let mut amp = build_amp(&layout, false, false, 0, 0, true).unwrap();
        amp.raw_bbox = Box2I::new(amp.raw_bbox.min(), Extent2I::new(1000, 1000));
        let err = amp.verify_raw_geometry().unwrap_err();
        assert!(matches!(err, CcdError::AmpGeometry(_)));
    }

    #[test]
    fn test_linearity_identity_default() {
        let linearity = crate::camera::Linearity::default();
        assert_eq!(linearity.apply(1234.5), 1234.5);
        assert_eq!(linearity.apply(0.0), 0.0);
    }
}
