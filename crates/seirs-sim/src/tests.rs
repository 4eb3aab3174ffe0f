//! Integration tests for seirs-sim.

use seirs_agent::{Agent, DwellTimes, Population, Status};
use seirs_core::EpidemicConfig;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(agent_count: usize, grid_size: u32, days: u32) -> EpidemicConfig {
    EpidemicConfig {
        agent_count,
        grid_size,
        days,
        replications: 3,
        base_seed: 42,
        ..EpidemicConfig::default()
    }
}

fn dwell(exposed: f64, infectious: f64, recovered: f64) -> DwellTimes {
    DwellTimes { exposed, infectious, recovered }
}

fn agent(status: Status, x: u32, y: u32) -> Agent {
    Agent::new(status, dwell(3.0, 7.0, 365.0), x, y)
}

/// Flatten records to `(day, S, E, I, R)` rows.
fn rows(records: &[crate::DailyRecord]) -> Vec<(u32, u32, u32, u32, u32)> {
    records.iter().map(|r| r.as_row()).collect()
}

// ── Transition rule ───────────────────────────────────────────────────────────

#[cfg(test)]
mod transition_tests {
    use seirs_core::{AgentId, SimRng};
    use seirs_spatial::SpatialIndex;

    use super::*;
    use crate::{Transition, TransitionTally, advance_agent, infection_probability};

    const CERTAIN: f64 = 1.0e9;

    fn indexed(agents: &[Agent], size: u32) -> SpatialIndex {
        let mut index = SpatialIndex::with_size(size).unwrap();
        index.rebuild(agents);
        index
    }

    #[test]
    fn probability_formula() {
        assert_eq!(infection_probability(0.5, 0), 0.0);
        assert!((infection_probability(0.5, 1) - 0.393_469_340_287_366_6).abs() < 1e-12);
        assert!((infection_probability(0.5, 4) - (1.0 - (-2.0f64).exp())).abs() < 1e-15);
        assert_eq!(infection_probability(CERTAIN, 1), 1.0);
    }

    #[test]
    fn isolated_susceptible_draws_nothing() {
        let mut agents = vec![agent(Status::Susceptible, 0, 0), agent(Status::Infectious, 5, 5)];
        let index = indexed(&agents, 10);
        let mut rng = SimRng::new(1);
        let mut twin = SimRng::new(1);

        let t = advance_agent(&mut agents, AgentId(0), &index, &mut rng, CERTAIN);
        assert_eq!(t, None);
        assert_eq!(agents[0].time_in_status, 1);
        assert_eq!(rng.next_u32(), twin.next_u32());
    }

    #[test]
    fn exposed_with_infectious_neighbour() {
        let mut agents = vec![agent(Status::Susceptible, 0, 0), agent(Status::Infectious, 9, 9)];
        agents[0].time_in_status = 12;
        let index = indexed(&agents, 10);
        let mut rng = SimRng::new(1);

        let t = advance_agent(&mut agents, AgentId(0), &index, &mut rng, CERTAIN);
        assert_eq!(t, Some(Transition { from: Status::Susceptible, to: Status::Exposed }));
        assert_eq!(agents[0].status, Status::Exposed);
        assert_eq!(agents[0].time_in_status, 0);
    }

    #[test]
    fn zero_contact_rate_never_infects_but_still_draws() {
        let mut agents = vec![agent(Status::Susceptible, 0, 0), agent(Status::Infectious, 0, 0)];
        let index = indexed(&agents, 3);
        let mut rng = SimRng::new(4);
        let mut twin = SimRng::new(4);

        assert_eq!(advance_agent(&mut agents, AgentId(0), &index, &mut rng, 0.0), None);
        twin.next_u32();
        assert_eq!(rng.next_u32(), twin.next_u32());
    }

    #[test]
    fn timed_states_wait_for_their_threshold() {
        let mut agents = vec![Agent::new(Status::Exposed, dwell(2.5, 1.0, 1.0), 0, 0)];
        let index = indexed(&agents, 3);
        let mut rng = SimRng::new(1);

        // Day 1 and 2: 1 < 2.5, 2 < 2.5.
        assert_eq!(advance_agent(&mut agents, AgentId(0), &index, &mut rng, 0.5), None);
        assert_eq!(advance_agent(&mut agents, AgentId(0), &index, &mut rng, 0.5), None);
        assert_eq!(agents[0].time_in_status, 2);
        // Day 3: 3 >= 2.5.
        let t = advance_agent(&mut agents, AgentId(0), &index, &mut rng, 0.5);
        assert_eq!(t, Some(Transition { from: Status::Exposed, to: Status::Infectious }));
        assert_eq!(agents[0].time_in_status, 0);
    }

    #[test]
    fn full_cycle_reuses_dwell_times() {
        let d = dwell(1.0, 1.0, 1.0);
        let mut agents = vec![Agent::new(Status::Infectious, d, 0, 0)];
        let index = indexed(&agents, 3);
        let mut rng = SimRng::new(1);

        let next = |agents: &mut Vec<Agent>, rng: &mut SimRng| {
            advance_agent(agents, AgentId(0), &index, rng, 0.5).map(|t| t.to)
        };
        assert_eq!(next(&mut agents, &mut rng), Some(Status::Recovered));
        assert_eq!(next(&mut agents, &mut rng), Some(Status::Susceptible));
        assert_eq!(agents[0].dwell, d);
    }

    #[test]
    fn zero_threshold_fires_on_first_visit() {
        let mut agents = vec![Agent::new(Status::Recovered, dwell(3.0, 7.0, 0.0), 0, 0)];
        let index = indexed(&agents, 3);
        let mut rng = SimRng::new(1);
        let t = advance_agent(&mut agents, AgentId(0), &index, &mut rng, 0.5);
        assert_eq!(t.map(|t| t.to), Some(Status::Susceptible));
    }

    /// A neighbour that turns Infectious earlier in the pass is visible to
    /// agents visited later the same day, but not to those visited before.
    #[test]
    fn later_visits_see_earlier_transitions() {
        let start = vec![
            agent(Status::Susceptible, 1, 1),
            Agent::new(Status::Exposed, dwell(0.0, 7.0, 365.0), 1, 1),
        ];

        // Exposed neighbour first: it becomes Infectious, then infects.
        let mut agents = start.clone();
        let index = indexed(&agents, 4);
        let mut rng = SimRng::new(1);
        advance_agent(&mut agents, AgentId(1), &index, &mut rng, CERTAIN);
        advance_agent(&mut agents, AgentId(0), &index, &mut rng, CERTAIN);
        assert_eq!(agents[0].status, Status::Exposed);

        // Susceptible first: nobody is infectious yet.
        let mut agents = start;
        let mut rng = SimRng::new(1);
        advance_agent(&mut agents, AgentId(0), &index, &mut rng, CERTAIN);
        advance_agent(&mut agents, AgentId(1), &index, &mut rng, CERTAIN);
        assert_eq!(agents[0].status, Status::Susceptible);
        assert_eq!(agents[1].status, Status::Infectious);
    }

    #[test]
    fn tally_counts_by_origin() {
        let mut tally = TransitionTally::default();
        tally.record(Transition { from: Status::Susceptible, to: Status::Exposed });
        tally.record(Transition { from: Status::Susceptible, to: Status::Exposed });
        tally.record(Transition { from: Status::Recovered, to: Status::Susceptible });
        assert_eq!(tally.infections, 2);
        assert_eq!(tally.waned, 1);
        assert_eq!(tally.total(), 3);
    }
}

// ── EngineBuilder validation ──────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::{EngineBuilder, SimError};

    #[test]
    fn builds_with_drawn_population() {
        let engine = EngineBuilder::new(test_config(50, 10, 5)).build().unwrap();
        assert_eq!(engine.population.len(), 50);
        assert_eq!(engine.seed, 42);
        assert_eq!(engine.counts().infectious, 20);
        assert_eq!(engine.current_day().0, 0);
    }

    #[test]
    fn explicit_seed_overrides_base_seed() {
        let engine = EngineBuilder::new(test_config(50, 10, 5)).seed(7).build().unwrap();
        assert_eq!(engine.seed, 7);
    }

    #[test]
    fn invalid_config_rejected_before_anything_runs() {
        let result = EngineBuilder::new(test_config(0, 10, 5)).build();
        assert!(matches!(result, Err(SimError::Core(_))));

        let result = EngineBuilder::new(test_config(10, 0, 5)).build();
        assert!(result.is_err());
    }

    #[test]
    fn population_count_mismatch_errors() {
        let pop = Population::from_agents(vec![agent(Status::Susceptible, 0, 0); 3]);
        let result = EngineBuilder::new(test_config(4, 10, 5)).population(pop).build();
        assert!(matches!(
            result,
            Err(SimError::AgentCountMismatch { expected: 4, got: 3, .. })
        ));
    }

    #[test]
    fn population_outside_grid_errors() {
        let pop = Population::from_agents(vec![
            agent(Status::Susceptible, 0, 0),
            agent(Status::Infectious, 10, 2),
        ]);
        let err = EngineBuilder::new(test_config(2, 10, 5)).population(pop).build();
        assert!(matches!(err, Err(SimError::Config(_))));
    }
}

// ── Day loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use std::ops::ControlFlow;

    use seirs_core::Day;

    use super::*;
    use crate::{
        DailyRecord, EngineBuilder, NoopObserver, RecordCollector, SimError, SimObserver,
    };

    fn collect(config: EpidemicConfig, seed: u64) -> Vec<DailyRecord> {
        let mut engine = EngineBuilder::new(config).seed(seed).build().unwrap();
        let mut records = RecordCollector::default();
        engine.run(&mut records).unwrap();
        records.into_records()
    }

    /// 500 agents, 20×20 grid, seed 42: known-good series.
    #[test]
    fn five_day_series_golden() {
        let records = collect(test_config(500, 20, 5), 42);
        assert_eq!(
            rows(&records),
            [
                (0, 405, 75, 18, 2),
                (1, 321, 142, 34, 3),
                (2, 203, 227, 67, 3),
                (3, 99, 265, 124, 12),
                (4, 28, 269, 169, 34),
            ]
        );
        assert!(records[4].counts.susceptible <= records[0].counts.susceptible);
    }

    /// 100 agents, 10×10 grid, seed 7: known-good series.
    #[test]
    fn small_grid_series_golden() {
        let records = collect(test_config(100, 10, 10), 7);
        assert_eq!(
            rows(&records),
            [
                (0, 40, 40, 19, 1),
                (1, 18, 52, 27, 3),
                (2, 5, 47, 41, 7),
                (3, 2, 34, 54, 10),
                (4, 0, 26, 56, 18),
                (5, 0, 18, 56, 26),
                (6, 0, 12, 55, 33),
                (7, 0, 10, 46, 44),
                (8, 1, 7, 40, 52),
                (9, 1, 4, 42, 53),
            ]
        );
    }

    #[test]
    fn counts_conserved_every_day() {
        let records = collect(test_config(800, 15, 120), 3);
        assert_eq!(records.len(), 120);
        for (d, r) in records.iter().enumerate() {
            assert_eq!(r.day, Day(d as u32));
            assert_eq!(r.counts.total(), 800, "day {d}: {}", r.counts);
        }
    }

    #[test]
    fn same_seed_same_series() {
        let a = collect(test_config(300, 12, 40), 99);
        let b = collect(test_config(300, 12, 40), 99);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = collect(test_config(300, 12, 40), 1);
        let b = collect(test_config(300, 12, 40), 2);
        assert_ne!(a, b);
    }

    #[test]
    fn everyone_infectious_at_start() {
        let config = EpidemicConfig {
            initial_infectious: 100,
            ..test_config(100, 10, 3)
        };
        let mut engine = EngineBuilder::new(config).seed(5).build().unwrap();
        assert_eq!(engine.counts().infectious, 100);
        assert_eq!(engine.counts().susceptible, 0);

        let first = engine.step_day();
        // One visit per day: I → R at most, so nobody is Susceptible yet.
        assert_eq!(first.counts.susceptible, 0);
        assert_eq!(first.counts.exposed, 0);
        assert_eq!(first.counts.total(), 100);
    }

    #[test]
    fn step_day_advances_and_rebuilds_index() {
        let mut engine = EngineBuilder::new(test_config(200, 8, 10)).build().unwrap();
        let r0 = engine.step_day();
        let r1 = engine.step_day();
        assert_eq!((r0.day, r1.day), (Day(0), Day(1)));
        assert_eq!(engine.current_day(), Day(2));
        assert_eq!(engine.index().total_len(), 200);

        let a = engine.population.as_slice()[17];
        assert!(engine.index().agents_at(a.x, a.y).contains(&seirs_core::AgentId(17)));
    }

    #[test]
    fn run_days_then_run_finishes_at_config_days() {
        let mut engine = EngineBuilder::new(test_config(100, 10, 10)).build().unwrap();
        engine.run_days(4, &mut NoopObserver).unwrap();
        assert_eq!(engine.current_day(), Day(4));
        let mut rest = RecordCollector::default();
        engine.run(&mut rest).unwrap();
        assert_eq!(rest.records.len(), 6);
        assert_eq!(rest.records[0].day, Day(4));
        assert_eq!(engine.current_day(), Day(10));
    }

    #[test]
    fn stepping_matches_running() {
        let config = test_config(250, 11, 12);
        let mut stepped = EngineBuilder::new(config.clone()).build().unwrap();
        let by_step: Vec<_> = (0..12).map(|_| stepped.step_day()).collect();
        assert_eq!(by_step, collect(config, 42));
    }

    #[test]
    fn zero_days_emits_nothing() {
        struct EndFlag(Option<Day>);
        impl SimObserver for EndFlag {
            fn on_sim_end(&mut self, final_day: Day) {
                self.0 = Some(final_day);
            }
        }
        let mut engine = EngineBuilder::new(test_config(10, 5, 0)).build().unwrap();
        let mut flag = EndFlag(None);
        engine.run(&mut flag).unwrap();
        assert_eq!(flag.0, Some(Day(0)));
    }

    /// Observer that stops after a fixed number of days.
    struct StopAfter {
        limit:   usize,
        seen:    Vec<DailyRecord>,
        starts:  usize,
        ended:   bool,
    }

    impl SimObserver for StopAfter {
        fn on_day_start(&mut self, _day: Day) {
            self.starts += 1;
        }
        fn on_day_end(&mut self, record: &DailyRecord) -> ControlFlow<()> {
            self.seen.push(*record);
            if self.seen.len() >= self.limit {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
        fn on_sim_end(&mut self, _final_day: Day) {
            self.ended = true;
        }
    }

    #[test]
    fn observer_break_aborts_after_whole_day() {
        let mut engine = EngineBuilder::new(test_config(100, 10, 50)).build().unwrap();
        let mut obs = StopAfter { limit: 3, seen: Vec::new(), starts: 0, ended: false };
        let err = engine.run(&mut obs).unwrap_err();

        assert!(matches!(err, SimError::Aborted { day: Day(2) }));
        assert_eq!(obs.seen.len(), 3);
        assert_eq!(obs.starts, 3);
        assert!(!obs.ended);
        assert_eq!(engine.current_day(), Day(3));
        assert_eq!(err.to_string(), "run stopped by observer after day 2");
    }
}

// ── Replications ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod replication_tests {
    use super::*;
    use crate::{EngineBuilder, RecordCollector, ReplicationRunner, SimError};

    #[test]
    fn plans_use_consecutive_seeds() {
        let runner = ReplicationRunner::new(test_config(20, 5, 3)).unwrap();
        let seeds: Vec<(u32, u64)> = runner.plans().map(|p| (p.index, p.seed)).collect();
        assert_eq!(seeds, [(0, 42), (1, 43), (2, 44)]);
    }

    #[test]
    fn invalid_config_rejected_up_front() {
        assert!(ReplicationRunner::new(test_config(20, 0, 3)).is_err());
    }

    #[test]
    fn in_memory_run_matches_single_engines() {
        let config = test_config(150, 9, 15);
        let runner = ReplicationRunner::new(config.clone()).unwrap();
        let results = runner.run_in_memory();
        assert_eq!(results.len(), 3);

        for (plan, series) in results {
            let series = series.unwrap();
            assert_eq!(series.len(), 15);

            let mut engine = EngineBuilder::new(config.clone()).seed(plan.seed).build().unwrap();
            let mut expected = RecordCollector::default();
            engine.run(&mut expected).unwrap();
            assert_eq!(series, expected.records, "replication {}", plan.index);
        }
    }

    #[test]
    fn failing_replication_leaves_others_intact() {
        let runner = ReplicationRunner::new(test_config(60, 6, 4)).unwrap();
        let results = runner.run_each(|plan, mut engine| {
            if plan.index == 1 {
                return Err(SimError::Config("disk full".into()));
            }
            let mut records = RecordCollector::default();
            engine.run(&mut records)?;
            Ok(records.records.len())
        });

        let outcomes: Vec<_> = results.iter().map(|(p, r)| (p.index, r.is_ok())).collect();
        assert_eq!(outcomes, [(0, true), (1, false), (2, true)]);
        assert_eq!(*results[0].1.as_ref().unwrap(), 4);
    }

    #[test]
    fn replications_are_independent_of_each_other() {
        let runner = ReplicationRunner::new(test_config(120, 8, 10)).unwrap();
        let all = runner.run_in_memory();
        let mut solo = runner.engine(all[2].0).unwrap();
        let mut records = RecordCollector::default();
        solo.run(&mut records).unwrap();
        assert_eq!(all[2].1.as_ref().unwrap(), &records.records);
    }
}
