mod tests {
    use core::f64::consts::TAU;

    use gravity_hoop::trig::{atan2, nabs, q15_div, q15_mul};

    /// Worst acceptable error, in turns
    const MAX_ERROR_TURNS: f64 = 0.002;

    fn error_turns(x: i16, y: i16) -> f64 {
        let approx = f64::from(atan2(x, y)) / 65536.0;
        let exact = (f64::from(y).atan2(f64::from(x)) / TAU).rem_euclid(1.0);
        let diff = (approx - exact).abs();
        diff.min(1.0 - diff)
    }

    #[test]
    fn test_atan2_diagonals() {
        assert_eq!(atan2(1, 1), 8192);
        assert_eq!(atan2(32767, 32767), 8192);
        assert_eq!(atan2(-1, -1), 40960);
        assert_eq!(atan2(-32768, -32768), 40960);
        assert_eq!(atan2(0, 0), 0);
    }

    #[test]
    fn test_atan2_axes() {
        assert_eq!(atan2(100, 0), 0);
        assert_eq!(atan2(0, 100), 16384);
        assert_eq!(atan2(-100, 0), 32768);
        assert_eq!(atan2(0, -100), 49152);
    }

    #[test]
    fn test_atan2_anti_diagonals() {
        assert_eq!(atan2(-100, 100), 24576);
        assert_eq!(atan2(100, -100), 57344);
        assert_eq!(atan2(3, -3), 57344);
    }

    #[test]
    fn test_atan2_error_bound() {
        let mut worst: f64 = 0.0;
        for x in (-32767..=32767).step_by(257) {
            for y in (-32767..=32767).step_by(263) {
                if x == 0 && y == 0 {
                    continue;
                }
                worst = worst.max(error_turns(x, y));
            }
        }
        assert!(worst <= MAX_ERROR_TURNS, "worst error {worst} turns");
    }

    #[test]
    fn test_atan2_small_vectors() {
        for x in -16i16..=16 {
            for y in -16i16..=16 {
                if x == 0 && y == 0 {
                    continue;
                }
                let error = error_turns(x, y);
                assert!(error <= MAX_ERROR_TURNS, "({x}, {y}) off by {error} turns");
            }
        }
    }

    #[test]
    fn test_atan2_extremes() {
        assert!(error_turns(-32768, 32767) <= MAX_ERROR_TURNS);
        assert!(error_turns(32767, -32768) <= MAX_ERROR_TURNS);
        assert!(error_turns(-32768, 0) <= MAX_ERROR_TURNS);
        assert!(error_turns(0, -32768) <= MAX_ERROR_TURNS);
    }

    #[test]
    fn test_nabs() {
        assert_eq!(nabs(5), -5);
        assert_eq!(nabs(-5), -5);
        assert_eq!(nabs(0), 0);
        assert_eq!(nabs(i16::MIN), i16::MIN);
    }

    #[test]
    fn test_q15_div() {
        assert_eq!(q15_div(1, 2), 16384);
        assert_eq!(q15_div(-1, 2), -16384);
        assert_eq!(q15_div(-7, 7), -32768);
        // +1.0 does not fit and wraps to -1.0
        assert_eq!(q15_div(7, 7), -32768);
    }

    #[test]
    fn test_q15_mul() {
        assert_eq!(q15_mul(16384, 16384), 8192);
        assert_eq!(q15_mul(-32768, 16384), -16384);
        assert_eq!(q15_mul(26214, 5000), 3999);
        assert_eq!(q15_mul(26214, -5000), -4000);
    }
}
