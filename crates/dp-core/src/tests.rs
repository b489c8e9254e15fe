//! Unit tests for dp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ForkId, PhilosopherId};

    #[test]
    fn seat_index_is_zero_based() {
        assert_eq!(PhilosopherId(1).seat_index(), 0);
        assert_eq!(PhilosopherId(5).seat_index(), 4);
        assert_eq!(PhilosopherId::from_seat_index(4), PhilosopherId(5));
    }

    #[test]
    fn parity() {
        assert!(!PhilosopherId(1).is_even());
        assert!(PhilosopherId(2).is_even());
    }

    #[test]
    fn fork_index() {
        assert_eq!(ForkId(3).index(), 3);
        assert_eq!(ForkId::try_from(7usize).unwrap(), ForkId(7));
    }

    #[test]
    fn display() {
        assert_eq!(PhilosopherId(7).to_string(), "PhilosopherId(7)");
    }
}

#[cfg(test)]
mod time {
    use std::time::{Duration, Instant};

    use crate::time::{wait, wait_unless};
    use crate::{Epoch, Millis};

    #[test]
    fn millis_arithmetic() {
        assert_eq!(Millis(10) + Millis(5), Millis(15));
        assert_eq!(Millis(15) - Millis(10), Millis(5));
        // Elapsed math never underflows.
        assert_eq!(Millis(3) - Millis(10), Millis::ZERO);
        assert_eq!(Millis(250).to_string(), "250ms");
    }

    #[test]
    fn epoch_is_monotonic() {
        let epoch = Epoch::start();
        let a = epoch.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        let b = epoch.elapsed();
        assert!(b >= a + Millis(5), "a={a} b={b}");
    }

    #[test]
    fn wait_lasts_at_least_duration() {
        let start = Instant::now();
        wait(Millis(20), Duration::from_micros(500));
        let took = start.elapsed();
        assert!(took >= Duration::from_millis(20), "took {took:?}");
        assert!(took < Duration::from_millis(200), "took {took:?}");
    }

    #[test]
    fn wait_unless_returns_early_on_interrupt() {
        let start = Instant::now();
        let mut polls = 0;
        let completed = wait_unless(Millis(5_000), Duration::from_micros(500), || {
            polls += 1;
            polls > 3
        });
        assert!(!completed);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn zero_wait_completes_immediately() {
        assert!(wait_unless(Millis::ZERO, Duration::from_micros(500), || true));
    }
}

#[cfg(test)]
mod config {
    use std::time::Duration;

    use crate::{DpError, Millis, SimConfig, WaitPolicy, parse_meals, parse_positive};

    #[test]
    fn new_uses_default_tunables() {
        let cfg = SimConfig::new(5, 800, 200, 200);
        assert_eq!(cfg.time_to_die, Millis(800));
        assert_eq!(cfg.meals_required, None);
        assert_eq!(cfg.start_stagger, Millis(1));
        assert_eq!(cfg.monitor_interval, Duration::from_millis(1));
        assert_eq!(cfg.wait_policy, WaitPolicy::Uninterruptible);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_philosophers_rejected() {
        let err = SimConfig::new(0, 800, 200, 200).validate().unwrap_err();
        assert!(matches!(err, DpError::Config(_)));
    }

    #[test]
    fn zero_durations_rejected() {
        assert!(SimConfig::new(5, 0, 200, 200).validate().is_err());
        assert!(SimConfig::new(5, 800, 0, 200).validate().is_err());
        assert!(SimConfig::new(5, 800, 200, 0).validate().is_err());
    }

    #[test]
    fn zero_poll_interval_rejected() {
        let mut cfg = SimConfig::new(5, 800, 200, 200);
        cfg.monitor_interval = Duration::ZERO;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn satisfied_only_with_meal_limit() {
        let unbounded = SimConfig::new(2, 800, 200, 200);
        assert!(!unbounded.is_satisfied(u32::MAX));

        let bounded = unbounded.with_meals_required(3);
        assert!(!bounded.is_satisfied(2));
        assert!(bounded.is_satisfied(3));
        assert!(bounded.is_satisfied(4));
    }

    #[test]
    fn think_time_only_at_odd_tables() {
        assert_eq!(SimConfig::new(5, 800, 200, 200).think_time(), Millis(200));
        assert_eq!(SimConfig::new(3, 600, 100, 100).think_time(), Millis(100));
        // Sleeping already covers the neighbours' turn.
        assert_eq!(SimConfig::new(5, 800, 100, 300).think_time(), Millis::ZERO);
        assert_eq!(SimConfig::new(4, 410, 200, 100).think_time(), Millis::ZERO);
        assert_eq!(SimConfig::new(1, 800, 200, 100).think_time(), Millis::ZERO);
    }

    #[test]
    fn parse_positive_accepts_digits() {
        assert_eq!(parse_positive("5").unwrap(), 5);
        assert_eq!(parse_positive("007").unwrap(), 7);
        assert_eq!(parse_positive("2147483647").unwrap(), i32::MAX as u32);
    }

    #[test]
    fn parse_positive_rejects_malformed() {
        for bad in ["", "0", "-5", "+5", " 5", "5ms", "2147483648", "99999999999999999999"] {
            assert!(parse_positive(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn parse_meals_accepts_zero() {
        assert_eq!(parse_meals("0").unwrap(), 0);
        assert!(parse_meals("-1").is_err());
    }
}

#[cfg(test)]
mod event {
    use crate::{Action, Event, Millis, PhilosopherId};

    #[test]
    fn line_format() {
        let e = Event::new(Millis(200), PhilosopherId(3), Action::TookFork);
        assert_eq!(e.to_string(), "200 3 has taken a fork");
        let d = Event::new(Millis(310), PhilosopherId(1), Action::Died);
        assert_eq!(d.to_string(), "310 1 died");
    }

    #[test]
    fn parse_every_action() {
        for action in Action::ALL {
            let line = format!("42 2 {action}");
            let parsed: Event = line.parse().unwrap();
            assert_eq!(parsed, Event::new(Millis(42), PhilosopherId(2), action));
        }
    }

    #[test]
    fn parse_tolerates_trailing_newline() {
        let parsed: Event = "0 1 is thinking\n".parse().unwrap();
        assert_eq!(parsed.action, Action::Thinking);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Event>().is_err());
        assert!("x 1 died".parse::<Event>().is_err());
        assert!("10 0 died".parse::<Event>().is_err());
        assert!("10 1 is dancing".parse::<Event>().is_err());
        assert!("10 1".parse::<Event>().is_err());
    }
}
