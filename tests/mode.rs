mod tests {
    use collar_light::{
        LAST_MODE, LightOutput, ModeId, ModeRunner, ModeState, Rgb, Timestamp,
        math8::scale8,
        mode::{MODE_UTILITY_OFF, MODE_UTILITY_TEST, MODE_UTILITY_WAKE},
    };

    #[derive(Debug, Default)]
    struct Recorder {
        color: Option<(Rgb, bool)>,
        leds: Option<(bool, bool)>,
    }

    impl LightOutput for Recorder {
        fn set_color(&mut self, color: Rgb, check_levels: bool) {
            self.color = Some((color, check_levels));
        }

        fn set_led_state(&mut self, led1_on: bool, led2_on: bool) {
            self.leds = Some((led1_on, led2_on));
        }
    }

    fn at(millis: u32) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    fn state(mode: ModeId, start: u32) -> ModeState {
        ModeState {
            mode,
            effect_start: at(start),
            ..ModeState::off(at(start))
        }
    }

    #[test]
    fn test_mode_id_from_raw() {
        assert_eq!(ModeId::from_raw(MODE_UTILITY_OFF), Some(ModeId::Off));
        assert_eq!(ModeId::from_raw(1), Some(ModeId::ColorCycle));
        assert_eq!(ModeId::from_raw(3), Some(ModeId::Christmas));
        assert_eq!(ModeId::from_raw(MODE_UTILITY_WAKE), Some(ModeId::Wake));
        assert_eq!(ModeId::from_raw(MODE_UTILITY_TEST), Some(ModeId::Test));
        assert_eq!(ModeId::from_raw(4), None);
        assert_eq!(ModeId::from_raw(200), None);
    }

    #[test]
    fn test_mode_id_names() {
        assert_eq!(ModeId::Christmas.as_str(), "christmas");
        assert_eq!(ModeId::parse_from_str("breathe"), Some(ModeId::Breathe));
        assert_eq!(ModeId::parse_from_str("disco"), None);
    }

    #[test]
    fn test_next_regular_is_cyclic() {
        let mut mode = ModeId::FIRST;
        for _ in 0..LAST_MODE {
            assert!(mode.is_regular());
            mode = mode.next_regular();
        }
        assert_eq!(mode, ModeId::FIRST);
        assert_eq!(ModeId::Off.next_regular(), ModeId::FIRST);
        assert_eq!(ModeId::Test.next_regular(), ModeId::FIRST);
        assert!(!ModeId::Wake.is_regular());
    }

    #[test]
    fn test_off_forces_dark_without_level_check() {
        let runner = ModeRunner::default();
        let mut output = Recorder::default();
        let active = runner.run(ModeId::Off, at(500), &state(ModeId::Off, 0), &mut output);
        assert!(!active);
        assert_eq!(output.color, Some((Rgb::new(0, 0, 0), false)));
        assert_eq!(output.leds, Some((false, false)));
    }

    #[test]
    fn test_unknown_raw_mode_runs_as_off() {
        let runner = ModeRunner::default();
        let mut output = Recorder::default();
        let active = runner.run_raw(7, at(500), &state(ModeId::ColorCycle, 0), &mut output);
        assert!(!active);
        assert_eq!(output.color, Some((Rgb::new(0, 0, 0), false)));
    }

    #[test]
    fn test_color_cycle_output_is_gamma_corrected() {
        let runner = ModeRunner::default();
        let mut output = Recorder::default();
        let state = state(ModeId::ColorCycle, 1000);

        assert!(runner.run(ModeId::ColorCycle, at(1000), &state, &mut output));
        assert_eq!(output.color, Some((Rgb::new(255, 0, 0), true)));
        assert_eq!(output.leds, Some((false, false)));

        // halfway red -> green: linear (128, 127, 0)
        assert!(runner.run(ModeId::ColorCycle, at(2000), &state, &mut output));
        assert_eq!(output.color, Some((Rgb::new(47, 47, 0), true)));

        // start of the green -> blue step
        assert!(runner.run(ModeId::ColorCycle, at(3000), &state, &mut output));
        assert_eq!(output.color, Some((Rgb::new(0, 255, 0), true)));

        // one full loop later
        assert!(runner.run(ModeId::ColorCycle, at(7000), &state, &mut output));
        assert_eq!(output.color, Some((Rgb::new(255, 0, 0), true)));
    }

    #[test]
    fn test_christmas_blinks_indicators() {
        let runner = ModeRunner::default();
        let mut output = Recorder::default();
        let state = state(ModeId::Christmas, 0);

        assert!(runner.run(ModeId::Christmas, at(0), &state, &mut output));
        assert_eq!(output.leds, Some((true, false)));
        assert!(runner.run(ModeId::Christmas, at(300), &state, &mut output));
        assert_eq!(output.leds, Some((false, true)));
        assert!(runner.run(ModeId::Christmas, at(1500), &state, &mut output));
        assert_eq!(output.color, Some((Rgb::new(0, 255, 0), true)));
    }

    #[test]
    fn test_breathe_follows_pulse() {
        let runner = ModeRunner::default();
        let mut output = Recorder::default();
        let state = state(ModeId::Breathe, 0);

        assert!(runner.run(ModeId::Breathe, at(0), &state, &mut output));
        assert_eq!(output.color, Some((Rgb::new(0, 0, 0), true)));
        assert_eq!(output.leds, Some((false, false)));

        assert!(runner.run(ModeId::Breathe, at(500), &state, &mut output));
        let peak = Rgb::new(0, scale8(180, 255), scale8(160, 255));
        assert_eq!(output.color, Some((runner.output_color(peak), true)));
        assert_eq!(output.leds, Some((true, true)));
    }

    #[test]
    fn test_wake_pattern_expires() {
        let runner = ModeRunner::default();
        let mut output = Recorder::default();
        let state = state(ModeId::Wake, 0);

        assert!(runner.run(ModeId::Wake, at(250), &state, &mut output));
        assert_eq!(output.color, Some((Rgb::new(0, 0, 0), true)));
        assert_eq!(output.leds, Some((true, true)));

        assert!(!runner.run(ModeId::Wake, at(5000), &state, &mut output));
    }

    #[test]
    fn test_test_pattern_sequence() {
        let runner = ModeRunner::default();
        let mut output = Recorder::default();
        let state = state(ModeId::Test, 0);

        assert!(runner.run(ModeId::Test, at(0), &state, &mut output));
        assert_eq!(output.color, Some((Rgb::new(255, 0, 0), true)));
        assert!(runner.run(ModeId::Test, at(1200), &state, &mut output));
        assert_eq!(output.color, Some((Rgb::new(0, 0, 255), true)));

        // white goes through the power limiter
        assert!(runner.run(ModeId::Test, at(1600), &state, &mut output));
        assert_eq!(output.color, Some((Rgb::new(146, 146, 146), true)));

        assert!(runner.run(ModeId::Test, at(2100), &state, &mut output));
        assert_eq!(output.leds, Some((true, false)));
        assert!(runner.run(ModeId::Test, at(2600), &state, &mut output));
        assert_eq!(output.leds, Some((false, true)));

        assert!(!runner.run(ModeId::Test, at(3000), &state, &mut output));
        assert_eq!(output.leds, Some((false, false)));
    }
}
