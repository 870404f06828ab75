//! Tests for the play pipeline, its observers and exports

use std::{
    fs,
    io::{BufRead, BufReader},
    sync::{Arc, Mutex},
};

use minesweeper_ai::{
    Error,
    adapters::repository_for_path,
    export::GamesCsvExporter,
    minesweeper::{BoardConfig, GameOutcome, GameSummary, Turn},
    pipeline::{GameRecord, JsonlObserver, MetricsObserver, Observer, PlayConfig, PlayPipeline},
    types::Cell,
};

fn config(num_games: usize, seed: u64) -> PlayConfig {
    PlayConfig {
        num_games,
        board: BoardConfig::new(6, 6, 5),
        seed: Some(seed),
        max_passes: None,
    }
}

/// Records every event so tests can check their order
#[derive(Clone, Default)]
struct RecordingObserver {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl Observer for RecordingObserver {
    fn on_session_start(&mut self, total_games: usize) -> minesweeper_ai::Result<()> {
        self.push(format!("session_start {total_games}"));
        Ok(())
    }

    fn on_game_start(&mut self, game_num: usize, _config: &BoardConfig) -> minesweeper_ai::Result<()> {
        self.push(format!("game_start {game_num}"));
        Ok(())
    }

    fn on_turn(&mut self, game_num: usize, _turn: &Turn) -> minesweeper_ai::Result<()> {
        self.push(format!("turn {game_num}"));
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, _summary: &GameSummary) -> minesweeper_ai::Result<()> {
        self.push(format!("game_end {game_num}"));
        Ok(())
    }

    fn on_session_end(&mut self) -> minesweeper_ai::Result<()> {
        self.push("session_end".to_string());
        Ok(())
    }
}

mod sessions {
    use super::*;

    #[test]
    fn test_outcomes_add_up_to_total() {
        let result = PlayPipeline::new(config(40, 42)).run().unwrap();

        assert_eq!(result.total_games, 40);
        assert_eq!(result.wins + result.losses + result.stuck, 40);
        assert_eq!(result.seed, 42);
        assert!((0.0..=1.0).contains(&result.win_rate));
        assert!(result.win_rate_interval.lower <= result.win_rate);
        assert!(result.win_rate <= result.win_rate_interval.upper);
        assert!(result.safe_moves + result.random_moves > 0);
    }

    #[test]
    fn test_same_seed_gives_same_result() {
        let first = PlayPipeline::new(config(25, 7)).run().unwrap();
        let second = PlayPipeline::new(config(25, 7)).run().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unseeded_session_reports_the_seed_it_used() {
        let mut unseeded = config(5, 0);
        unseeded.seed = None;
        let result = PlayPipeline::new(unseeded).run().unwrap();

        let replay = PlayPipeline::new(config(5, result.seed)).run().unwrap();
        assert_eq!(replay.wins, result.wins);
        assert_eq!(replay.safe_moves, result.safe_moves);
    }

    #[test]
    fn test_mine_free_board_needs_one_guess_per_game() {
        let config = PlayConfig {
            num_games: 5,
            board: BoardConfig::new(4, 4, 0),
            seed: Some(1),
            max_passes: None,
        };
        let result = PlayPipeline::new(config).run().unwrap();

        assert_eq!(result.wins, 5);
        // the first guess reveals a zero and everything else follows
        assert_eq!(result.random_moves, 5);
        assert_eq!(result.safe_moves, 5 * 15);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_play() {
        let observer = RecordingObserver::default();
        let mut bad = config(0, 1);
        let err = PlayPipeline::new(bad.clone())
            .with_observer(Box::new(observer.clone()))
            .run()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
        assert!(observer.events().is_empty());

        bad.num_games = 1;
        bad.board = BoardConfig::new(2, 2, 5);
        assert!(PlayPipeline::new(bad).run().is_err());
    }

    #[test]
    fn test_run_single_returns_finished_game() {
        let game = PlayPipeline::new(config(10, 3)).run_single().unwrap();
        assert!(game.is_over());
        assert!(!game.turns().is_empty());
    }
}

mod observers {
    use super::*;

    #[test]
    fn test_events_arrive_in_order() {
        let observer = RecordingObserver::default();
        PlayPipeline::new(config(3, 11))
            .with_observer(Box::new(observer.clone()))
            .run()
            .unwrap();

        let events = observer.events();
        assert_eq!(events.first().map(String::as_str), Some("session_start 3"));
        assert_eq!(events.last().map(String::as_str), Some("session_end"));

        let mut current = None;
        for event in &events[1..events.len() - 1] {
            let (kind, game) = event.split_once(' ').unwrap();
            let game: usize = game.parse().unwrap();
            match kind {
                "game_start" => {
                    assert_eq!(current, None, "game {game} started inside another");
                    current = Some(game);
                }
                "turn" => assert_eq!(current, Some(game)),
                "game_end" => {
                    assert_eq!(current, Some(game));
                    current = None;
                }
                other => panic!("unexpected event {other}"),
            }
        }
        let starts = events.iter().filter(|e| e.starts_with("game_start")).count();
        assert_eq!(starts, 3);
    }

    #[test]
    fn test_turn_events_match_game_length() {
        let observer = RecordingObserver::default();
        let game = PlayPipeline::new(config(1, 5))
            .with_observer(Box::new(observer.clone()))
            .run_single()
            .unwrap();

        let turns = observer
            .events()
            .iter()
            .filter(|event| event.starts_with("turn"))
            .count();
        assert_eq!(turns, game.turns().len());
    }

    #[test]
    fn test_metrics_observer_matches_result() {
        struct Shared(Arc<Mutex<MetricsObserver>>);

        impl Observer for Shared {
            fn on_game_end(
                &mut self,
                game_num: usize,
                summary: &GameSummary,
            ) -> minesweeper_ai::Result<()> {
                self.0.lock().unwrap().on_game_end(game_num, summary)
            }
        }

        let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
        let result = PlayPipeline::new(config(20, 99))
            .with_observer(Box::new(Shared(Arc::clone(&metrics))))
            .run()
            .unwrap();

        let metrics = metrics.lock().unwrap();
        let stats = metrics.stats();
        assert_eq!(stats.games, 20);
        assert_eq!(stats.wins, result.wins);
        assert_eq!(stats.losses, result.losses);
        assert_eq!(stats.safe_moves, result.safe_moves);
    }

    #[test]
    fn test_jsonl_observer_writes_one_record_per_game() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.jsonl");

        let result = PlayPipeline::new(config(4, 21))
            .with_observer(Box::new(JsonlObserver::new(&path).unwrap()))
            .run()
            .unwrap();

        let reader = BufReader::new(fs::File::open(&path).unwrap());
        let records: Vec<GameRecord> = reader
            .lines()
            .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
            .collect();

        assert_eq!(records.len(), 4);
        let wins = records
            .iter()
            .filter(|record| record.summary.outcome == Some(GameOutcome::Won))
            .count();
        assert_eq!(wins, result.wins);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.game_num, i);
            assert_eq!(record.turns.len(), record.summary.turns);
        }
    }

    #[test]
    fn test_csv_export_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.csv");

        PlayPipeline::new(config(6, 8))
            .with_observer(Box::new(GamesCsvExporter::new(&path).unwrap()))
            .run()
            .unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(0), Some("game"));
        assert_eq!(headers.get(1), Some("outcome"));
        assert_eq!(reader.records().count(), 6);
    }
}

mod persistence {
    use super::*;

    #[test]
    fn test_config_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("play.json");
        fs::write(&path, r#"{"num_games": 12, "board": {"mines": 3}}"#).unwrap();

        let config = PlayConfig::load(&path).unwrap();
        assert_eq!(config.num_games, 12);
        assert_eq!(config.board, BoardConfig::new(8, 8, 3));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");

        let result = PlayPipeline::new(config(5, 13)).run().unwrap();
        result.save(&path).unwrap();
        let loaded = minesweeper_ai::pipeline::PlayResult::load(&path).unwrap();
        assert_eq!(loaded.wins, result.wins);
        assert_eq!(loaded.total_games, result.total_games);
    }

    #[test]
    fn test_saved_knowledge_resumes_play_decisions() {
        let dir = tempfile::tempdir().unwrap();
        let game = PlayPipeline::new(config(1, 17)).run_single().unwrap();
        let knowledge = game.knowledge();

        for name in ["kb.json", "kb.msgpack"] {
            let path = dir.path().join(name);
            let repository = repository_for_path(&path);
            repository.save(knowledge, &path).unwrap();
            let loaded = repository.load(&path).unwrap();

            assert_eq!(&loaded, knowledge);
            assert_eq!(loaded.make_safe_move(), knowledge.make_safe_move());
            let unplayed: Vec<Cell> = loaded
                .safes()
                .difference(loaded.moves_made())
                .copied()
                .collect();
            assert_eq!(loaded.make_safe_move(), unplayed.first().copied());
        }
    }
}
