#[cfg(test)]
mod tests {
    use crate::api::{IndexStatistics, MapId, OverlayId, Rgb, HEALTHY_WASH, STRESSED_WASH};
    use crate::services::raster::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stats(min: f64, max: f64) -> IndexStatistics {
        IndexStatistics {
            mean: (min + max) / 2.0,
            std: 0.0,
            min,
            max,
        }
    }

    fn channel_delta(a: Rgb, b: Rgb) -> u8 {
        a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
    }

    #[test]
    fn test_ramp_endpoints_are_exact() {
        for map in MapId::ALL {
            let ramp = map.ramp();
            assert_eq!(ramp_color(ramp, 0.0), ramp[0], "{} start", map);
            assert_eq!(ramp_color(ramp, 1.0), ramp[ramp.len() - 1], "{} end", map);
        }
    }

    #[test]
    fn test_ramp_midpoint_interpolates() {
        // 8 stops: t = 0.5 lands halfway between stops 3 and 4.
        let color = ramp_color(MapId::Ndvi.ramp(), 0.5);
        assert_eq!(color, Rgb::new(242, 235, 146));
    }

    #[test]
    fn test_ramp_hits_interior_stops() {
        let ramp = MapId::Gndvi.ramp();
        assert_eq!(ramp_color(ramp, 0.2), ramp[1]);
        assert_eq!(ramp_color(ramp, 0.6), ramp[3]);
    }

    #[test]
    fn test_ramp_clamps_out_of_range() {
        let ramp = MapId::Soil.ramp();
        assert_eq!(ramp_color(ramp, -3.0), ramp[0]);
        assert_eq!(ramp_color(ramp, 7.5), ramp[5]);
    }

    #[test]
    fn test_render_scalar_map_wraps_source() {
        let values = vec![0.0, 1.0];
        let image = render_scalar_map(&values, &stats(0.0, 1.0), 3, 1, MapId::Ndvi.ramp());

        assert_eq!(image.pixels.len(), 12);
        let first = MapId::Ndvi.ramp()[0];
        let last = MapId::Ndvi.ramp()[7];
        assert_eq!(image.pixel(0, 0), [first.r, first.g, first.b, 255]);
        assert_eq!(image.pixel(1, 0), [last.r, last.g, last.b, 255]);
        assert_eq!(image.pixel(2, 0), [first.r, first.g, first.b, 255]);
    }

    #[test]
    fn test_render_scalar_map_flat_range_uses_mid_ramp() {
        let values = vec![0.4; 4];
        let image = render_scalar_map(&values, &stats(0.4, 0.4), 2, 2, MapId::Savi.ramp());
        let mid = ramp_color(MapId::Savi.ramp(), 0.5);
        assert!(image.pixels().all(|p| p == [mid.r, mid.g, mid.b, 255]));
    }

    #[test]
    fn test_render_scalar_map_empty_is_gray() {
        let image = render_scalar_map(&[], &stats(0.0, 1.0), 4, 3, MapId::Soil.ramp());
        assert_eq!(image.width, 4);
        assert_eq!(image.height, 3);
        assert!(image.pixels().all(|p| p == [128, 128, 128, 255]));
    }

    #[test]
    fn test_base_field_is_opaque_and_seeded() {
        let a = render_base_field(16, 8, &mut StdRng::seed_from_u64(3));
        let b = render_base_field(16, 8, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert_eq!(a.pixels.len(), 16 * 8 * 4);
        assert!(a.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_base_field_origin_stays_near_palette_center() {
        // sin(0) = 0, so only the jitter moves the origin pixel.
        let image = render_base_field(1, 1, &mut StdRng::seed_from_u64(0));
        let [r, g, b, _] = image.pixel(0, 0);
        assert!((77..=83).contains(&r));
        assert!((115..=125).contains(&g));
        assert!((58..=62).contains(&b));
    }

    #[test]
    fn test_full_stress_ratio_washes_every_pixel() {
        let base = render_base_field(6, 6, &mut StdRng::seed_from_u64(9));
        let overlay = render_stress_overlay(6, 6, 1.0, &mut StdRng::seed_from_u64(9));

        let alpha = STRESSED_WASH.a as f64 / 255.0;
        for (b, o) in base.pixels().zip(overlay.pixels()) {
            let expected = (STRESSED_WASH.r as f64 * alpha + b[0] as f64 * (1.0 - alpha)).round();
            assert_eq!(o[0] as f64, expected);
            assert_eq!(o[3], 255);
        }
    }

    #[test]
    fn test_zero_stress_ratio_uses_healthy_wash() {
        let base = render_base_field(4, 4, &mut StdRng::seed_from_u64(1));
        let overlay = render_stress_overlay(4, 4, 0.0, &mut StdRng::seed_from_u64(1));

        let alpha = HEALTHY_WASH.a as f64 / 255.0;
        for (b, o) in base.pixels().zip(overlay.pixels()) {
            let expected = (HEALTHY_WASH.b as f64 * alpha + b[2] as f64 * (1.0 - alpha)).round();
            assert_eq!(o[2] as f64, expected);
        }
    }

    #[test]
    fn test_risk_overlay_all_high() {
        // Both cutoffs at zero push every draw into the high band.
        let base = render_base_field(5, 5, &mut StdRng::seed_from_u64(2));
        let overlay = render_risk_overlay(5, 5, 0.0, 0.0, &mut StdRng::seed_from_u64(2));
        let high = OverlayId::PestRisk.palette()[2];
        let alpha = high.a as f64 / 255.0;
        for (b, o) in base.pixels().zip(overlay.pixels()) {
            let expected = (high.g as f64 * alpha + b[1] as f64 * (1.0 - alpha)).round();
            assert_eq!(o[1] as f64, expected);
        }
    }

    #[test]
    fn test_stress_overlay_matches_ratio_in_expectation() {
        let overlay = render_stress_overlay(100, 100, 0.25, &mut StdRng::seed_from_u64(17));
        // Stressed pixels end up red-dominant, healthy ones blue-dominant.
        let stressed = overlay.pixels().filter(|p| p[0] > p[2]).count();
        let share = stressed as f64 / 10_000.0;
        assert!((share - 0.25).abs() < 0.02, "share {}", share);
    }

    proptest! {
        #[test]
        fn prop_ramp_is_continuous(step in 0usize..1000) {
            let ramp = MapId::Ndvi.ramp();
            let max_stop_delta = ramp
                .windows(2)
                .map(|w| channel_delta(w[0], w[1]))
                .max()
                .unwrap();
            let t0 = step as f64 / 1000.0;
            let t1 = (step + 1) as f64 / 1000.0;
            let delta = channel_delta(ramp_color(ramp, t0), ramp_color(ramp, t1));
            prop_assert!(delta <= max_stop_delta);
        }

        #[test]
        fn prop_scalar_map_size(
            len in 0usize..50,
            width in 0usize..20,
            height in 0usize..20,
        ) {
            let values: Vec<f64> = (0..len).map(|i| i as f64).collect();
            let image = render_scalar_map(&values, &stats(0.0, len as f64), width, height, MapId::Gndvi.ramp());
            prop_assert_eq!(image.pixels.len(), width * height * 4);
        }
    }
}
