//! Self-play sessions over a roster of agents.

mod common;

use std::{cell::RefCell, rc::Rc};

use chomp::{
    Agent, Pairing, Seat, SelfPlayConfig, SelfPlaySession, play_match,
    pipeline::{MetricsObserver, Observer},
};
use common::{all_weights, playbook_is_unique, seeded};

fn small_config(seed: u64) -> SelfPlayConfig {
    SelfPlayConfig::default()
        .with_board(4, 3)
        .with_rounds(50)
        .with_agents(3)
        .with_seed(seed)
}

#[test]
fn every_match_has_one_winner_and_ends_in_time() {
    let mut rng = seeded(1);
    let mut first = Agent::new("first");
    let mut second = Agent::new("second");

    for game in 1..=200 {
        let record = play_match(&mut first, &mut second, 5, 4, &mut rng).unwrap();

        assert!(record.turns <= 5 * 4);
        assert!(record.final_state().unwrap().is_terminal());
        assert_eq!(first.wins() + first.losses(), game);
        assert_eq!(first.wins(), second.losses());
        assert_eq!(first.losses(), second.wins());
        assert!(first.current_moves().is_empty());
        assert!(second.current_moves().is_empty());
        // The player left facing the bare poison square loses
        let loser_moves_next = record.turns % 2 == 0;
        assert_eq!(record.winner == Seat::Second, loser_moves_next);
    }
}

#[test]
fn win_ratio_history_tracks_every_game() {
    let mut session = SelfPlaySession::new(small_config(7)).unwrap();
    let summary = session.run().unwrap();

    assert_eq!(summary.total_matches, 100);
    assert_eq!(session.matches_played(), 100);

    let agents = session.agents();
    assert_eq!(agents[0].win_ratio().len(), 100);
    assert_eq!(agents[1].win_ratio().len(), 50);
    assert_eq!(agents[2].win_ratio().len(), 50);
    for agent in agents {
        assert!(agent.win_ratio().iter().all(|r| *r > 0.0 && *r <= 1.0));
        assert!(playbook_is_unique(agent));
        assert!(all_weights(agent).iter().all(|w| *w >= 1.0));
    }

    let total_wins: usize = agents.iter().map(Agent::wins).sum();
    let total_losses: usize = agents.iter().map(Agent::losses).sum();
    assert_eq!(total_wins, 100);
    assert_eq!(total_losses, 100);
}

#[test]
fn seeded_sessions_are_reproducible() {
    let run = |seed| {
        let mut session = SelfPlaySession::new(small_config(seed)).unwrap();
        session.run().unwrap();
        session
            .into_agents()
            .into_iter()
            .map(|agent| (agent.win_ratio().to_vec(), all_weights(&agent)))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn custom_schedule_is_played_in_order() {
    let config = SelfPlayConfig::default()
        .with_board(3, 3)
        .with_rounds(10)
        .with_agents(2)
        .with_pairings(vec![Pairing::new(0, 1), Pairing::new(1, 0)])
        .with_seed(5);

    let metrics = Rc::new(RefCell::new(MetricsObserver::new()));
    let mut session = SelfPlaySession::new(config)
        .unwrap()
        .with_observer(Box::new(Rc::clone(&metrics)));
    let summary = session.run().unwrap();

    let metrics = metrics.borrow();
    assert_eq!(metrics.total_matches(), 20);
    assert_eq!(summary.first_seat_wins, metrics.summary().first_seat_wins);
    assert_eq!(metrics.wins_for(0) + metrics.wins_for(1), 20);
    assert_eq!(session.agents()[0].win_ratio().len(), 20);
    assert_eq!(session.agents()[1].win_ratio().len(), 20);
}

#[derive(Default)]
struct EventLog {
    events: Vec<String>,
}

impl Observer for EventLog {
    fn on_session_start(&mut self, total_matches: usize) -> chomp::Result<()> {
        self.events.push(format!("start {total_matches}"));
        Ok(())
    }

    fn on_match_start(&mut self, match_num: usize, pairing: Pairing) -> chomp::Result<()> {
        self.events
            .push(format!("begin {match_num} {}-{}", pairing.first, pairing.second));
        Ok(())
    }

    fn on_match_end(
        &mut self,
        match_num: usize,
        _pairing: Pairing,
        _record: &chomp::MatchRecord,
    ) -> chomp::Result<()> {
        self.events.push(format!("end {match_num}"));
        Ok(())
    }

    fn on_session_end(&mut self) -> chomp::Result<()> {
        self.events.push("done".to_string());
        Ok(())
    }
}

#[test]
fn observers_see_events_in_order() {
    let log = Rc::new(RefCell::new(EventLog::default()));
    let config = SelfPlayConfig::default()
        .with_board(2, 2)
        .with_rounds(1)
        .with_agents(3)
        .with_seed(3);
    let mut session = SelfPlaySession::new(config)
        .unwrap()
        .with_observer(Box::new(Rc::clone(&log)));
    session.run().unwrap();

    assert_eq!(
        log.borrow().events,
        vec![
            "start 2",
            "begin 0 0-1",
            "end 0",
            "begin 1 0-2",
            "end 1",
            "done",
        ]
    );
}

#[test]
fn invalid_rosters_are_rejected() {
    let bad_pairing = SelfPlayConfig::default()
        .with_agents(2)
        .with_pairings(vec![Pairing::new(0, 2)]);
    assert!(SelfPlaySession::new(bad_pairing).is_err());

    let self_match = SelfPlayConfig::default()
        .with_agents(2)
        .with_pairings(vec![Pairing::new(1, 1)]);
    assert!(SelfPlaySession::new(self_match).is_err());

    assert!(SelfPlaySession::new(SelfPlayConfig::default().with_agents(1)).is_err());
    assert!(SelfPlaySession::new(SelfPlayConfig::default().with_board(0, 3)).is_err());
}

#[test]
fn config_file_fills_missing_fields_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selfplay.json");
    std::fs::write(&path, r#"{ "width": 5, "rounds": 20, "seed": 11 }"#).unwrap();

    let config = SelfPlayConfig::load(&path).unwrap();
    assert_eq!(config.width, 5);
    assert_eq!(config.height, 3);
    assert_eq!(config.rounds, 20);
    assert_eq!(config.agents, 3);
    assert_eq!(config.seed, Some(11));
    assert_eq!(config.total_matches(), 40);

    assert!(SelfPlayConfig::load(dir.path().join("missing.json")).is_err());
}
