use wumpus_core::trace::tags;
use wumpus_core::{
    coord, Action, Agent, AgentConfig, AgentError, Arrow, Coord, Effect, Fact, Goal, Hazard,
    Outcome, Percepts, Proposition, Termination, WorldMut, WorldView,
};

#[derive(Debug, Default)]
struct TestWorld {
    size: i32,
    wumpus: Option<Coord>,
    pits: Vec<Coord>,
    gold: Option<Coord>,
    /// Shots always miss.
    armored: bool,
    shots: u32,
}

impl TestWorld {
    fn new(size: i32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    fn adjacent_to(&self, at: Coord, cell: Coord) -> bool {
        coord::neighbors(at, self.size).contains(&cell)
    }
}

impl WorldView for TestWorld {
    fn size(&self) -> i32 {
        self.size
    }

    fn percepts(&self, at: Coord) -> Percepts {
        Percepts {
            stench: self.wumpus.is_some_and(|w| self.adjacent_to(at, w)),
            breeze: self.pits.iter().any(|&p| self.adjacent_to(at, p)),
            glitter: self.gold == Some(at),
            bump: false,
            scream: false,
        }
    }
}

impl WorldMut for TestWorld {
    fn attack(&mut self, _arrow: Arrow, target: Coord) -> bool {
        self.shots += 1;
        if self.armored || self.wumpus != Some(target) {
            return false;
        }
        self.wumpus = None;
        true
    }
}

fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

/// 2x2: wumpus in the far corner, gold at (1,2).
fn corner_world() -> TestWorld {
    TestWorld {
        wumpus: Some(c(2, 2)),
        gold: Some(c(1, 2)),
        ..TestWorld::new(2)
    }
}

#[test]
fn new_agent_knows_only_its_start() {
    let agent = Agent::default();
    assert_eq!(agent.position(), c(1, 1));
    assert_eq!(agent.goal(), Goal::SeekGold);
    assert_eq!(agent.arrows(), 1);
    assert_eq!(agent.safe_cells().iter().collect::<Vec<_>>(), vec![c(1, 1)]);
    assert!(agent.knowledge().ask(Fact::not(Proposition::Pit(c(1, 1)))));
    assert!(agent.knowledge().ask(Fact::not(Proposition::Wumpus(c(1, 1)))));
    assert_eq!(agent.knowledge().len(), 3);
}

#[test]
fn first_step_advances_along_the_fixed_order() {
    let mut world = TestWorld::new(4);
    let mut agent = Agent::default();

    let report = agent.step(&mut world).unwrap();
    assert_eq!(report.action, Action::Advance(c(2, 1)));
    assert_eq!(
        report.effect,
        Effect::Moved {
            from: c(1, 1),
            to: c(2, 1)
        }
    );
    assert_eq!(report.deductions.newly_safe, vec![c(1, 2), c(2, 1)]);
    assert_eq!(agent.path().as_slice(), &[c(1, 1), c(2, 1)]);
}

#[test]
fn boxed_in_start_is_stuck_not_an_error() {
    let mut world = TestWorld {
        pits: vec![c(2, 1), c(1, 2)],
        ..TestWorld::new(2)
    };
    let mut agent = Agent::default();

    let report = agent.run_steps(&mut world, 10).unwrap();
    assert_eq!(report.outcome, Outcome::Stuck);
    assert_eq!(report.steps, 1);
    assert_eq!(agent.goal(), Goal::Terminated(Termination::Stuck));
}

#[test]
fn gold_on_start_returns_immediately() {
    let mut world = TestWorld {
        gold: Some(c(1, 1)),
        ..TestWorld::new(3)
    };
    let mut agent = Agent::default();

    let report = agent.run_steps(&mut world, 10).unwrap();
    assert_eq!(report.outcome, Outcome::Success);
    assert_eq!(report.steps, 1);
    assert!(report.has_gold);
}

#[test]
fn located_wumpus_is_attacked_on_the_same_step() {
    let mut world = corner_world();
    let mut agent = Agent::default();

    agent.step(&mut world).unwrap();
    let report = agent.step(&mut world).unwrap();

    assert_eq!(report.at, c(2, 1));
    assert!(report.percepts.stench);
    assert_eq!(report.deductions.located, vec![(Hazard::Wumpus, c(2, 2))]);
    assert_eq!(report.action, Action::Attack(c(2, 2)));
    assert_eq!(
        report.effect,
        Effect::Shot {
            target: c(2, 2),
            hit: true
        }
    );
    assert_eq!(agent.arrows(), 0);
    assert_eq!(agent.position(), c(2, 1));
}

#[test]
fn hit_retracts_stale_stench_and_clears_target() {
    let mut world = corner_world();
    let mut agent = Agent::default();
    agent.step(&mut world).unwrap();
    agent.step(&mut world).unwrap();

    let kb = agent.knowledge();
    assert!(!kb.iter().any(|f| matches!(f.prop, Proposition::Stench(_))));
    assert_eq!(kb.located(Hazard::Wumpus), None);
    assert!(kb.ask(Fact::not(Proposition::Wumpus(c(2, 2)))));
    assert!(kb.ask(Fact::not(Proposition::WumpusAlive)));

    // Deduction after the hit does not resurrect the wumpus.
    let again = agent.deduce(&world).unwrap();
    assert!(again.located.is_empty());
    assert_eq!(again.newly_safe, vec![c(2, 2)]);
}

#[test]
fn corner_world_runs_to_success() {
    let mut world = corner_world();
    let mut agent = Agent::default().with_trace_log();

    let report = agent.run_steps(&mut world, 50).unwrap();
    assert_eq!(report.outcome, Outcome::Success);
    assert_eq!(report.steps, 8);
    assert_eq!(report.position, c(1, 1));
    assert_eq!(report.arrows_left, 0);
    assert_eq!(report.visited_count, 4);
    assert_eq!(world.shots, 1);

    let log = agent.trace_log().unwrap();
    let located: Vec<_> = log.tagged(tags::WUMPUS_LOCATED).collect();
    assert_eq!(located.len(), 1);
    assert_eq!(located[0].at, Some(c(2, 2)));
    assert_eq!(log.tagged(tags::ATTACK).next().map(|e| e.value), Some(1));
    assert_eq!(log.tagged(tags::GOLD).next().map(|e| e.at), Some(Some(c(1, 2))));
    assert_eq!(log.tagged(tags::HALT).count(), 1);
}

#[test]
fn gold_flips_the_goal_before_more_exploration() {
    let mut world = corner_world();
    let mut agent = Agent::default();

    // Steps 1-4: advance, attack, advance (2,2), advance (1,2).
    for _ in 0..4 {
        agent.step(&mut world).unwrap();
    }
    assert_eq!(agent.position(), c(1, 2));
    assert_eq!(agent.goal(), Goal::SeekGold);

    let report = agent.step(&mut world).unwrap();
    assert!(report.percepts.glitter);
    assert_eq!(agent.goal(), Goal::ReturnHome);
    assert!(agent.has_gold());
    assert_eq!(report.action, Action::Retreat(c(2, 2)));
}

#[test]
fn miss_spends_the_charge_and_changes_no_knowledge() {
    let mut world = TestWorld {
        armored: true,
        ..corner_world()
    };
    let mut agent = Agent::default();

    agent.step(&mut world).unwrap();
    agent.perceive(&world).unwrap();
    agent.deduce(&world).unwrap();
    let facts_before = agent.knowledge().len();

    let action = agent.decide(&world);
    assert_eq!(action, Action::Attack(c(2, 2)));
    let effect = agent.apply(&mut world, action).unwrap();

    assert_eq!(
        effect,
        Effect::Shot {
            target: c(2, 2),
            hit: false
        }
    );
    assert_eq!(agent.arrows(), 0);
    assert_eq!(agent.knowledge().len(), facts_before);
    assert!(agent.knowledge().ask(Fact::holds(Proposition::Wumpus(c(2, 2)))));
}

#[test]
fn second_attack_is_refused_without_touching_the_world() {
    let mut world = TestWorld {
        armored: true,
        ..corner_world()
    };
    let mut agent = Agent::default();

    agent.apply(&mut world, Action::Attack(c(2, 2))).unwrap();
    let err = agent
        .apply(&mut world, Action::Attack(c(2, 2)))
        .unwrap_err();

    assert_eq!(err, AgentError::ChargeSpent);
    assert_eq!(world.shots, 1);
    assert_eq!(agent.arrows(), 0);
}

#[test]
fn armored_wumpus_is_never_shot_twice_in_a_run() {
    let mut world = TestWorld {
        armored: true,
        gold: None,
        ..corner_world()
    };
    let mut agent = Agent::default();

    let report = agent.run_steps(&mut world, 50).unwrap();
    assert_eq!(world.shots, 1);
    assert_eq!(report.outcome, Outcome::Stuck);
    assert!(!report.has_gold);
}

#[test]
fn illegal_actions_fail_loudly() {
    let mut world = TestWorld::new(4);
    let mut agent = Agent::default();

    assert_eq!(
        agent.apply(&mut world, Action::Advance(c(3, 3))),
        Err(AgentError::IllegalMove {
            from: c(1, 1),
            to: c(3, 3)
        })
    );
    assert_eq!(
        agent.apply(&mut world, Action::Advance(c(0, 1))),
        Err(AgentError::IllegalMove {
            from: c(1, 1),
            to: c(0, 1)
        })
    );
    // Adjacent, but not where the trail leads back to.
    assert!(matches!(
        agent.apply(&mut world, Action::Retreat(c(2, 1))),
        Err(AgentError::IllegalMove { .. })
    ));
    assert!(matches!(
        agent.apply(&mut world, Action::Halt(Termination::Success)),
        Err(AgentError::IllegalHalt { .. })
    ));
    assert_eq!(agent.position(), c(1, 1));
    assert_eq!(agent.goal(), Goal::SeekGold);
}

#[test]
fn budget_caps_the_run() {
    let mut world = corner_world();
    let mut agent = Agent::default();

    let report = agent.run_steps(&mut world, 3).unwrap();
    assert_eq!(report.outcome, Outcome::BudgetExhausted);
    assert_eq!(report.steps, 3);

    // The run can be resumed with a fresh budget.
    let report = agent.run_steps(&mut world, 50).unwrap();
    assert_eq!(report.outcome, Outcome::Success);
    assert_eq!(report.steps, 8);
}

#[test]
fn knowledge_sets_only_grow() {
    let mut world = TestWorld {
        wumpus: Some(c(3, 3)),
        pits: vec![c(3, 1), c(1, 3)],
        gold: Some(c(2, 3)),
        ..TestWorld::new(3)
    };
    let mut agent = Agent::new(AgentConfig::default());

    let mut safe = agent.safe_cells().clone();
    let mut visited = agent.visited_cells().clone();
    while !agent.goal().is_terminal() && agent.steps_taken() < 40 {
        agent.step(&mut world).unwrap();
        assert!(agent.safe_cells().is_superset(&safe));
        assert!(agent.visited_cells().is_superset(&visited));
        for cell in agent.safe_cells().iter() {
            if cell != agent.config().start {
                assert!(agent.knowledge().ask(Fact::not(Proposition::Pit(cell))));
                assert!(agent.knowledge().ask(Fact::not(Proposition::Wumpus(cell))));
            }
        }
        safe = agent.safe_cells().clone();
        visited = agent.visited_cells().clone();
    }
}

#[test]
fn halted_agent_stays_halted() {
    let mut world = TestWorld {
        gold: Some(c(1, 1)),
        ..TestWorld::new(2)
    };
    let mut agent = Agent::default();
    agent.run_steps(&mut world, 5).unwrap();

    let facts = agent.knowledge().len();
    let report = agent.step(&mut world).unwrap();
    assert_eq!(report.action, Action::Halt(Termination::Success));
    assert_eq!(agent.knowledge().len(), facts);
}
