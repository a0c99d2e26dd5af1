//! Integration tests for pursuit-output.

#[cfg(test)]
mod csv_tests {
    use pursuit_core::{AlertState, Vec3};
    use pursuit_sim::WantedPhase;
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_HEADER, SUMMARY_HEADER};
    use crate::row::{AgentSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent_id: u32, tick: u64, last_known: Option<Vec3>) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            tick,
            awareness:     42.5,
            alert_state:   AlertState::Curious,
            line_of_sight: true,
            last_known,
        }
    }

    fn read(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created_in_new_dir() {
        let dir = tmp();
        let out = dir.path().join("nested").join("run");
        let _w = CsvWriter::new(&out).unwrap();
        assert!(out.join("agent_snapshots.csv").exists());
        assert!(out.join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, SNAPSHOT_HEADER);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, SUMMARY_HEADER);
    }

    #[test]
    fn snapshot_columns() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![
            snap_row(0, 5, Some(Vec3::new(1.0, 0.0, -2.5))),
            snap_row(1, 5, None),
        ];
        w.write_snapshots(&rows).unwrap();
        w.finish().unwrap();

        let read_rows = read(dir.path().join("agent_snapshots.csv"));
        assert_eq!(read_rows.len(), 2);
        assert_eq!(&read_rows[0][0], "0");      // agent_id
        assert_eq!(&read_rows[0][1], "5");      // tick
        assert_eq!(&read_rows[0][2], "42.500"); // awareness
        assert_eq!(&read_rows[0][3], "curious");
        assert_eq!(&read_rows[0][4], "1");
        assert_eq!(&read_rows[0][7], "-2.500"); // lkp_z
        assert_eq!(&read_rows[1][5], "", "no LKP leaves the columns empty");
    }

    #[test]
    fn tick_summary_columns() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:         3,
            time_secs:    0.6,
            stars:        2,
            phase:        WantedPhase::Chase,
            noise_events: 1,
            broadcasts:   0,
        })
        .unwrap();
        w.finish().unwrap();

        let read_rows = read(dir.path().join("tick_summaries.csv"));
        assert_eq!(read_rows.len(), 1);
        assert_eq!(&read_rows[0][0], "3");
        assert_eq!(&read_rows[0][1], "0.600");
        assert_eq!(&read_rows[0][2], "2");
        assert_eq!(&read_rows[0][3], "chase");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }

    #[test]
    fn integration_csv() {
        use pursuit_agent::AgentStoreBuilder;
        use pursuit_behavior::NoopBehavior;
        use pursuit_core::{AgentId, SimConfig};
        use pursuit_sim::{NoopCallbacks, SimBuilder};
        use pursuit_world::{BlockWorld, PlayerState};

        use crate::observer::SimOutputObserver;

        let config = SimConfig { total_ticks: 6, output_interval_ticks: 2, ..SimConfig::default() };
        let agents = AgentStoreBuilder::new(config.seed, config.sensor)
            .agent(AgentId(0), Vec3::new(0.0, 1.6, 0.0), Vec3::Z, NoopBehavior)
            .agent(AgentId(1), Vec3::new(5.0, 1.6, 0.0), Vec3::Z, NoopBehavior)
            .agent(AgentId(2), Vec3::new(-5.0, 1.6, 0.0), Vec3::Z, NoopBehavior)
            .build()
            .unwrap();
        let mut sim = SimBuilder::new(config, BlockWorld::open(), NoopCallbacks)
            .agents(agents)
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(|_| PlayerState::at(Vec3::new(0.0, 0.0, 8.0)), &mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // output_interval = 2 → snapshots at ticks 0, 2, 4 (3 ticks × 3 agents = 9 rows)
        let rows = read(dir.path().join("agent_snapshots.csv"));
        assert_eq!(rows.len(), 9, "expected 3 ticks × 3 agents = 9 snapshot rows, got {}", rows.len());
        assert_eq!(read(dir.path().join("tick_summaries.csv")).len(), 6);
    }
}

#[cfg(test)]
mod observer_tests {
    use pursuit_core::{AgentId, AlertState, Tick};
    use pursuit_sim::{SensorSnapshot, SimObserver, TickSummary, WantedPhase};

    use crate::{AgentSnapshotRow, OutputError, OutputResult, OutputWriter, SimOutputObserver, TickSummaryRow};

    /// Fails every write with an I/O error and counts the attempts.
    #[derive(Default)]
    struct Broken {
        attempts: usize,
    }

    impl OutputWriter for Broken {
        fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
            self.attempts += 1;
            Err(std::io::Error::other("disk full").into())
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(std::io::Error::other("disk full").into())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    fn summary() -> TickSummary {
        TickSummary {
            tick:              Tick(0),
            time_secs:         0.0,
            stars:             0,
            phase:             WantedPhase::None,
            noise_events:      0,
            broadcasts:        0,
            any_line_of_sight: false,
        }
    }

    #[test]
    fn first_error_is_kept_and_taken_once() {
        let mut obs = SimOutputObserver::new(Broken::default());
        obs.on_tick_end(Tick(0), &summary());
        obs.on_snapshot(Tick(0), &[SensorSnapshot {
            agent:         AgentId(0),
            awareness:     0.0,
            alert_state:   AlertState::Idle,
            line_of_sight: false,
            last_known:    None,
        }]);

        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().attempts, 2);
    }

    #[test]
    fn empty_snapshot_is_not_written() {
        let mut obs = SimOutputObserver::new(Broken::default());
        obs.on_snapshot(Tick(0), &[]);
        assert!(obs.take_error().is_none());
    }
}
