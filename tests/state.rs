mod tests {
    use collar_light::{
        ButtonEvent, Duration, Gesture, LAST_MODE, ModeConfig, ModeId, ModeStateMachine,
        OffGesture, Timestamp, Transition, WakePolicy,
    };

    const START: ButtonEvent = ButtonEvent::RapidSequenceComplete {
        gesture: Gesture::Start,
        count: 3,
    };
    const RAPID_OFF: ButtonEvent = ButtonEvent::RapidSequenceComplete {
        gesture: Gesture::Off,
        count: 4,
    };

    fn at(millis: u32) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    fn started(config: ModeConfig) -> ModeStateMachine {
        let mut machine = ModeStateMachine::new(config, at(0));
        machine.handle_event(START, at(1000));
        assert_eq!(machine.mode(), ModeId::ColorCycle);
        machine
    }

    #[test]
    fn test_starts_off() {
        let machine = ModeStateMachine::new(ModeConfig::DEFAULT, at(0));
        assert_eq!(machine.mode(), ModeId::Off);
    }

    #[test]
    fn test_start_gesture() {
        let mut machine = ModeStateMachine::new(ModeConfig::DEFAULT, at(0));
        assert_eq!(machine.handle_event(ButtonEvent::ShortPress, at(100)), None);
        assert_eq!(machine.handle_event(ButtonEvent::LongPress, at(100)), None);
        assert_eq!(machine.mode(), ModeId::Off);

        let transition = machine.handle_event(START, at(1000));
        assert_eq!(
            transition,
            Some(Transition {
                from: ModeId::Off,
                to: ModeId::ColorCycle,
                at: at(1000)
            })
        );
        let state = machine.state();
        assert_eq!(state.effect_start, at(1000));
        assert_eq!(state.last_activity, at(1000));
        assert_eq!(state.cooldown_until, Some(at(1500)));
    }

    #[test]
    fn test_cooldown_ignores_presses() {
        let mut machine = started(ModeConfig::DEFAULT);
        assert_eq!(machine.handle_event(ButtonEvent::ShortPress, at(1200)), None);
        assert_eq!(machine.handle_event(ButtonEvent::LongPress, at(1499)), None);
        assert_eq!(machine.mode(), ModeId::ColorCycle);

        assert!(machine.handle_event(ButtonEvent::ShortPress, at(1500)).is_some());
        assert_eq!(machine.mode(), ModeId::Breathe);
    }

    #[test]
    fn test_start_ignored_during_cooldown_after_quick_off() {
        let config = ModeConfig {
            auto_off: Duration::from_millis(100),
            ..ModeConfig::DEFAULT
        };
        let mut machine = started(config);
        assert!(machine.tick(at(1100)).is_some());
        assert_eq!(machine.mode(), ModeId::Off);

        assert_eq!(machine.handle_event(START, at(1300)), None);
        assert_eq!(machine.mode(), ModeId::Off);

        assert!(machine.handle_event(START, at(1600)).is_some());
        assert_eq!(machine.mode(), ModeId::ColorCycle);
    }

    #[test]
    fn test_mode_cycling_wraps() {
        let mut machine = started(ModeConfig::DEFAULT);
        let mut t = 2000;
        let mut seen = Vec::new();
        for _ in 0..LAST_MODE {
            machine.handle_event(ButtonEvent::ShortPress, at(t));
            seen.push(machine.mode());
            t += 300;
        }
        assert_eq!(
            seen,
            vec![ModeId::Breathe, ModeId::Christmas, ModeId::ColorCycle]
        );
        assert_eq!(machine.state().effect_start, at(2600));
    }

    #[test]
    fn test_long_press_turns_off() {
        let mut machine = started(ModeConfig::DEFAULT);
        machine.handle_event(ButtonEvent::LongPress, at(3000));
        assert_eq!(machine.mode(), ModeId::Off);
        assert_eq!(machine.state().effect_start, at(3000));
    }

    #[test]
    fn test_off_gesture_policy() {
        let config = ModeConfig {
            off_gesture: OffGesture::RapidPress,
            ..ModeConfig::DEFAULT
        };
        let mut machine = started(config);
        machine.handle_event(ButtonEvent::LongPress, at(3000));
        assert_eq!(machine.mode(), ModeId::ColorCycle);
        machine.handle_event(RAPID_OFF, at(4000));
        assert_eq!(machine.mode(), ModeId::Off);

        let mut machine = started(ModeConfig::DEFAULT);
        machine.handle_event(RAPID_OFF, at(4000));
        assert_eq!(machine.mode(), ModeId::ColorCycle);

        let config = ModeConfig {
            off_gesture: OffGesture::Either,
            ..ModeConfig::DEFAULT
        };
        let mut machine = started(config);
        machine.handle_event(RAPID_OFF, at(4000));
        assert_eq!(machine.mode(), ModeId::Off);
    }

    #[test]
    fn test_start_sequence_ignored_while_on() {
        let mut machine = started(ModeConfig::DEFAULT);
        assert_eq!(machine.handle_event(START, at(3000)), None);
        assert_eq!(machine.mode(), ModeId::ColorCycle);
    }

    #[test]
    fn test_auto_off() {
        let config = ModeConfig {
            auto_off: Duration::from_millis(10_000),
            ..ModeConfig::DEFAULT
        };
        let mut machine = started(config);
        assert_eq!(machine.tick(at(10_999)), None);
        let transition = machine.tick(at(11_000));
        assert_eq!(transition.map(|t| t.to), Some(ModeId::Off));
    }

    #[test]
    fn test_activity_postpones_auto_off() {
        let config = ModeConfig {
            auto_off: Duration::from_millis(10_000),
            ..ModeConfig::DEFAULT
        };
        let mut machine = started(config);
        machine.handle_event(ButtonEvent::Pressed, at(8000));
        assert_eq!(machine.tick(at(11_000)), None);
        assert!(machine.tick(at(18_000)).is_some());
        assert_eq!(machine.mode(), ModeId::Off);
    }

    #[test]
    fn test_auto_off_across_clock_wrap() {
        let config = ModeConfig {
            auto_off: Duration::from_millis(10_000),
            ..ModeConfig::DEFAULT
        };
        let start = u32::MAX - 4_999;
        let mut machine = ModeStateMachine::new(config, at(start));
        machine.handle_event(START, at(start));
        assert_eq!(machine.mode(), ModeId::ColorCycle);

        assert_eq!(machine.tick(at(4_999)), None);
        assert!(machine.tick(at(5_000)).is_some());
    }

    #[test]
    fn test_wake_requires_press() {
        let mut machine = ModeStateMachine::new(ModeConfig::DEFAULT, at(0));
        machine.wake(at(100));
        assert_eq!(machine.mode(), ModeId::Wake);

        assert_eq!(machine.handle_event(ButtonEvent::Pressed, at(150)), None);
        machine.handle_event(ButtonEvent::ShortPress, at(300));
        assert_eq!(machine.mode(), ModeId::ColorCycle);

        let mut machine = ModeStateMachine::new(ModeConfig::DEFAULT, at(0));
        machine.wake(at(100));
        machine.finish(at(5100));
        assert_eq!(machine.mode(), ModeId::Off);
    }

    #[test]
    fn test_wake_auto_resume() {
        let config = ModeConfig {
            wake_policy: WakePolicy::AutoResume,
            ..ModeConfig::DEFAULT
        };
        let mut machine = started(config);
        machine.handle_event(ButtonEvent::ShortPress, at(2000));
        machine.handle_event(ButtonEvent::ShortPress, at(2500));
        assert_eq!(machine.mode(), ModeId::Christmas);
        machine.handle_event(ButtonEvent::LongPress, at(3000));
        assert_eq!(machine.mode(), ModeId::Off);

        machine.wake(at(60_000));
        assert_eq!(machine.mode(), ModeId::Wake);
        machine.finish(at(65_000));
        assert_eq!(machine.mode(), ModeId::Christmas);
        assert_eq!(machine.state().effect_start, at(65_000));
    }

    #[test]
    fn test_test_mode() {
        let mut machine = started(ModeConfig::DEFAULT);
        machine.enter_test(at(2000));
        assert_eq!(machine.mode(), ModeId::Test);

        machine.handle_event(ButtonEvent::ShortPress, at(2500));
        assert_eq!(machine.mode(), ModeId::Test);
        assert_eq!(machine.wake(at(2600)), None);

        machine.finish(at(5000));
        assert_eq!(machine.mode(), ModeId::Off);

        machine.enter_test(at(6000));
        machine.handle_event(ButtonEvent::LongPress, at(7000));
        assert_eq!(machine.mode(), ModeId::Off);
    }
}
