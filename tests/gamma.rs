mod tests {
    use collar_light::{
        Rgb,
        gamma::{GAMMA8, correct, correct_rgb, output_of},
    };

    #[test]
    fn test_endpoints() {
        assert_eq!(correct(0), 0);
        assert_eq!(correct(255), 255);
    }

    #[test]
    fn test_monotonic() {
        for pair in GAMMA8.windows(2) {
            assert!(pair[0] <= pair[1], "{} > {}", pair[0], pair[1]);
        }
        for a in 0..=255u8 {
            for b in a..=255u8 {
                assert!(correct(a) <= correct(b));
            }
        }
    }

    #[test]
    fn test_correct_rgb() {
        assert_eq!(
            correct_rgb(Rgb::new(255, 128, 0)),
            Rgb::new(255, 47, 0)
        );
    }

    #[test]
    fn test_output_of() {
        assert_eq!(output_of(Rgb::new(0, 0, 0)), 0);
        assert_eq!(output_of(Rgb::new(255, 255, 255)), 765);
        assert_eq!(output_of(Rgb::new(146, 146, 146)), 192);
    }
}
