//! Unit tests for dp-output.

use dp_core::{Action, Event, Millis, PhilosopherId, SimConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ev(at: u64, id: u32, action: Action) -> Event {
    Event::new(Millis(at), PhilosopherId(id), action)
}

/// Fork takes plus the meal line for one philosopher.
fn meal(at: u64, id: u32) -> [Event; 3] {
    [
        ev(at, id, Action::TookFork),
        ev(at, id, Action::TookFork),
        ev(at, id, Action::Eating),
    ]
}

fn log_of(chunks: &[&[Event]]) -> Vec<Event> {
    chunks.iter().flat_map(|c| c.iter().copied()).collect()
}

#[cfg(test)]
mod log_tests {
    use std::io::Cursor;

    use dp_table::EventSink;

    use super::*;
    use crate::{LogWriter, OutputError, read_log};

    #[test]
    fn writes_one_line_per_event() {
        let mut w = LogWriter::new(Vec::new());
        w.record(&ev(0, 1, Action::TookFork));
        w.record(&ev(200, 1, Action::Sleeping));
        w.finish();
        assert_eq!(w.lines(), 2);
        assert!(w.take_error().is_none());
        let text = String::from_utf8(w.into_inner()).unwrap();
        assert_eq!(text, "0 1 has taken a fork\n200 1 is sleeping\n");
    }

    #[test]
    fn read_back_what_was_written() {
        let events = log_of(&[&meal(0, 2), &[ev(200, 2, Action::Sleeping), ev(410, 1, Action::Died)]]);
        let mut w = LogWriter::new(Vec::new());
        for e in &events {
            w.record(e);
        }
        let parsed = read_log(Cursor::new(w.into_inner())).unwrap();
        assert_eq!(parsed, events);
    }

    #[test]
    fn read_reports_line_number() {
        let text = "0 1 has taken a fork\n\n5 1 is dancing\n";
        match read_log(Cursor::new(text)) {
            Err(OutputError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    /// A writer that always fails.
    struct Broken;
    impl std::io::Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_are_kept() {
        let mut w = LogWriter::new(Broken);
        w.record(&ev(0, 1, Action::Thinking));
        w.record(&ev(1, 1, Action::Thinking));
        assert_eq!(w.lines(), 0);
        assert!(matches!(w.take_error(), Some(OutputError::Io(_))));
        assert!(w.take_error().is_none());
    }
}

#[cfg(test)]
mod csv_tests {
    use dp_table::EventSink;
    use tempfile::TempDir;

    use super::*;
    use crate::CsvWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_header_and_rows() {
        let dir = tmp();
        let path = dir.path().join("events.csv");
        let mut w = CsvWriter::new(&path).unwrap();
        w.record(&ev(0, 1, Action::TookFork));
        w.record(&ev(310, 4, Action::Died));
        w.finish();
        w.finish();
        assert!(w.take_error().is_none());

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["elapsed_ms", "philosopher", "event"]);

        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "has taken a fork");
        assert_eq!(&rows[1][0], "310");
        assert_eq!(&rows[1][1], "4");
        assert_eq!(&rows[1][2], "died");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        let path = dir.path().join("no/such/dir/events.csv");
        assert!(CsvWriter::new(&path).is_err());
    }
}

#[cfg(test)]
mod audit_tests {
    use super::*;
    use crate::{Violation, audit};

    /// 3 philosophers, die 400, eat 100, sleep 100.
    fn cfg() -> SimConfig {
        SimConfig::new(3, 400, 100, 100)
    }

    #[test]
    fn clean_log_passes() {
        // p1 and p2 share fork 1; p2 and p3 share fork 2; p3 and p1 share fork 0.
        let events = log_of(&[
            &meal(0, 1),
            &[ev(100, 1, Action::Sleeping)],
            &meal(100, 2),
            &[ev(200, 2, Action::Sleeping)],
            &meal(200, 3),
            &[ev(200, 1, Action::Thinking)],
            &[ev(300, 3, Action::Sleeping)],
            &meal(300, 1),
        ]);
        let report = audit(&events, &cfg()).unwrap();
        assert_eq!(report.meals, vec![2, 1, 1]);
        assert_eq!(report.death, None);
        assert_eq!(report.events, events.len());
        assert!(report.everyone_ate(1));
        assert!(!report.everyone_ate(2));
    }

    #[test]
    fn neighbours_eating_together_is_flagged() {
        let events = log_of(&[&meal(0, 1), &meal(50, 2)]);
        match audit(&events, &cfg()) {
            Err(Violation::SharedFork { fork, first, second, .. }) => {
                assert_eq!(fork, 1);
                assert_eq!((first, second), (1, 2));
            }
            other => panic!("expected SharedFork, got {other:?}"),
        }
    }

    #[test]
    fn non_neighbours_may_eat_together() {
        let cfg = SimConfig::new(4, 400, 100, 100);
        // p1 (forks 0,1) and p3 (forks 2,3) share nothing.
        let events = log_of(&[&meal(0, 1), &meal(0, 3)]);
        assert!(audit(&events, &cfg).is_ok());
    }

    #[test]
    fn eating_with_one_fork_is_flagged() {
        let events = vec![ev(0, 1, Action::TookFork), ev(0, 1, Action::Eating)];
        assert_eq!(
            audit(&events, &cfg()),
            Err(Violation::ForkCount { philosopher: 1, at: Millis(0), held: 1 })
        );
    }

    #[test]
    fn third_fork_is_flagged() {
        let events = vec![ev(0, 2, Action::TookFork); 3];
        assert!(matches!(audit(&events, &cfg()), Err(Violation::TooManyForks { .. })));
    }

    #[test]
    fn lone_philosopher_starving_passes() {
        let cfg = SimConfig::new(1, 800, 200, 200);
        let events = vec![ev(0, 1, Action::TookFork), ev(801, 1, Action::Died)];
        let report = audit(&events, &cfg).unwrap();
        assert_eq!(report.death, Some((PhilosopherId(1), Millis(801))));
        assert_eq!(report.meals, vec![0]);
    }

    #[test]
    fn early_death_is_flagged() {
        let events = log_of(&[&meal(100, 1), &[ev(450, 1, Action::Died)]]);
        assert!(matches!(
            audit(&events, &cfg()),
            Err(Violation::PrematureDeath { philosopher: 1, .. })
        ));
    }

    #[test]
    fn nothing_may_follow_a_death() {
        let events = vec![ev(400, 2, Action::Died), ev(401, 1, Action::Thinking)];
        assert!(matches!(audit(&events, &cfg()), Err(Violation::EventAfterDeath { .. })));

        let events = vec![ev(400, 2, Action::Died), ev(400, 3, Action::Died)];
        assert!(matches!(audit(&events, &cfg()), Err(Violation::MultipleDeaths { first: 2, .. })));
    }

    #[test]
    fn time_going_backwards_is_flagged() {
        let events = vec![ev(10, 1, Action::Thinking), ev(9, 2, Action::Thinking)];
        assert!(matches!(audit(&events, &cfg()), Err(Violation::OutOfOrder { .. })));
    }

    #[test]
    fn unknown_philosopher_is_flagged() {
        let events = vec![ev(0, 4, Action::Thinking)];
        assert!(matches!(
            audit(&events, &cfg()),
            Err(Violation::UnknownPhilosopher { philosophers: 3, .. })
        ));
    }
}
