use std::time::Duration;

use arcade_hub::error::ArcadeError;
use arcade_hub::games::{breakout, pacman, tetris, Game, Simulation, Surface};
use arcade_hub::input::{Command, Direction};
use arcade_hub::scheduler::Scheduler;

const DT: Duration = Duration::from_millis(16);

fn games(seed: u64) -> Vec<Box<dyn Game>> {
    vec![
        Box::new(tetris::new_game(seed, tetris::DEFAULT_DROP_INTERVAL)),
        Box::new(pacman::new_game(seed)),
        Box::new(breakout::new_game(seed)),
    ]
}

#[test]
fn every_game_runs_alone_and_detaches_cleanly() {
    let mut scheduler = Scheduler::new();
    for mut game in games(11) {
        game.init(Surface::new(80, 21), &mut scheduler).unwrap();
        game.start(&mut scheduler);
        assert_eq!(scheduler.tick_count(), 1, "{}", game.title());
        assert_eq!(scheduler.input_count(), 1, "{}", game.title());

        for i in 0..120 {
            if i % 10 == 0 {
                scheduler.dispatch_input(Command::Move(Direction::Left));
            }
            scheduler.dispatch_tick(DT);
        }

        game.stop(&mut scheduler);
        assert_eq!(scheduler.tick_count(), 0);
        assert_eq!(scheduler.input_count(), 0);
    }
}

#[test]
fn stop_is_safe_in_any_state() {
    let mut scheduler = Scheduler::new();
    for mut game in games(2) {
        // never initialized
        game.stop(&mut scheduler);
        // twice
        game.stop(&mut scheduler);
        assert_eq!(scheduler.tick_count(), 0);
    }
    for mut game in games(3) {
        // initialized, never started
        game.init(Surface::new(80, 21), &mut scheduler).unwrap();
        game.stop(&mut scheduler);
        assert_eq!(scheduler.input_count(), 0);
    }
}

#[test]
fn failed_init_registers_nothing_and_start_is_inert() {
    let mut scheduler = Scheduler::new();
    for mut game in games(4) {
        let err = game.init(Surface::new(10, 5), &mut scheduler).unwrap_err();
        assert!(matches!(err, ArcadeError::SurfaceTooSmall { .. }));
        game.start(&mut scheduler);
        assert_eq!(scheduler.tick_count(), 0);
        assert_eq!(scheduler.input_count(), 0);
    }
}

#[test]
fn stopped_game_does_not_receive_ticks() {
    let mut scheduler = Scheduler::new();
    let mut game = breakout::new_game(5);
    game.init(Surface::new(80, 21), &mut scheduler).unwrap();
    game.start(&mut scheduler);
    scheduler.dispatch_tick(DT);
    assert!(game.with_sim(|s| s.ball().y).is_some());

    game.stop(&mut scheduler);
    scheduler.dispatch_tick(DT);
    assert!(game.with_sim(|s| s.ball().y).is_none());
    assert_eq!(game.get_score(), 0);
    assert!(!game.is_game_over());
}

#[test]
fn same_seed_same_play() {
    let run = |seed| {
        let mut scheduler = Scheduler::new();
        let mut game = tetris::new_game(seed, Duration::from_millis(50));
        game.init(Surface::new(80, 21), &mut scheduler).unwrap();
        game.start(&mut scheduler);
        for i in 0..400 {
            if i % 30 == 0 {
                scheduler.dispatch_input(Command::HardDrop);
            }
            scheduler.dispatch_tick(DT);
        }
        game.with_sim(|s| (s.score(), s.lines(), s.pieces()))
    };
    assert_eq!(run(9), run(9));
}
