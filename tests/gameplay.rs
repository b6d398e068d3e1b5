//! Whole-session scenarios driven through the public API

use glam::Vec2;
use tilt_kick::Settings;
use tilt_kick::game::Game;
use tilt_kick::hud::messages;
use tilt_kick::input::{Handedness, StickSample};
use tilt_kick::sim::{Ball, GameState, TickInput, tick};

const DT: f32 = 1.0 / 60.0;

fn quiet_game() -> Game {
    let settings = Settings {
        show_hints: false,
        ..Settings::default()
    };
    Game::new(7, settings)
}

/// Run frames until `done` holds, up to `seconds`; returns whether it did
fn run_until(game: &mut Game, seconds: f32, mut done: impl FnMut(&Game) -> bool) -> bool {
    let frames = (seconds / DT).ceil() as u32;
    for _ in 0..frames {
        game.frame(DT);
        if done(game) {
            return true;
        }
    }
    false
}

#[test]
fn goal_miss_and_idle_reset_in_one_session() {
    let mut game = quiet_game();

    // Goal
    game.state.ball.set_plane_pos(Vec2::new(0.1, -1.8));
    game.frame(DT);
    assert_eq!(game.messages.current(), Some(messages::GOAL.0));
    let board = game.state.scoreboard;
    assert_eq!((board.score, board.streak, board.best_score), (1, 1, 1));
    assert!(!game.state.confetti.is_empty());

    // Let the cooldown pass
    run_until(&mut game, 0.9, |_| false);

    // Miss beside the goal keeps the score
    game.state.ball.set_plane_pos(Vec2::new(-0.6, -1.9));
    game.frame(DT);
    assert_eq!(game.messages.current(), Some(messages::MISS.0));
    let board = game.state.scoreboard;
    assert_eq!((board.score, board.streak, board.best_score), (1, 0, 1));
    assert_eq!(game.state.ball.pos, Ball::spawn_position());

    // Another goal, then the ball is left alone until it resets
    run_until(&mut game, 0.9, |_| false);
    game.state.ball.set_plane_pos(Vec2::new(0.0, -1.85));
    game.frame(DT);
    assert_eq!(game.state.scoreboard.streak, 1);

    let reset = run_until(&mut game, 4.0, |g| {
        g.messages.current() == Some(messages::RESET.0)
    });
    assert!(reset, "resting ball should reset");
    let board = game.state.scoreboard;
    assert_eq!((board.score, board.streak, board.best_score), (2, 0, 2));
}

#[test]
fn tilting_toward_the_goal_ends_the_round() {
    let mut game = quiet_game();
    game.key("ArrowDown", true);

    let decided = run_until(&mut game, 6.0, |g| {
        matches!(
            g.messages.current(),
            Some(text) if text == messages::GOAL.0 || text == messages::MISS.0
        )
    });
    assert!(decided, "ball should reach the far end");
    assert_eq!(game.state.ball.pos, Ball::spawn_position());
}

#[test]
fn tilting_toward_the_player_never_scores() {
    let mut game = quiet_game();
    game.key("ArrowUp", true);
    game.key("ArrowRight", true);
    run_until(&mut game, 2.0, |_| false);

    assert_eq!(game.state.scoreboard.score, 0);
    let bounds = tilt_kick::sim::collision::ball_bounds(game.state.ball.radius);
    let p = game.state.ball.plane_pos();
    assert!(p.x.abs() <= bounds.x + 1e-5 && p.y.abs() <= bounds.y + 1e-5);
}

#[test]
fn thumbsticks_drive_tilt_and_striker() {
    let mut game = quiet_game();
    let start = game.state.striker.pos;
    game.set_stick_samples(&[
        StickSample {
            handedness: Handedness::Right,
            axes: vec![1.0, 0.0],
        },
        StickSample {
            handedness: Handedness::Left,
            axes: vec![1.0, 0.0],
        },
    ]);
    game.frame(DT);

    assert_eq!(game.state.tilt.z, 1.0);
    assert_eq!(game.state.tilt.x, 0.0);
    assert!(game.state.striker.pos.x > start.x);

    // Within the dead zone nothing moves
    let mut game = quiet_game();
    game.set_stick_samples(&[StickSample {
        handedness: Handedness::Left,
        axes: vec![0.05, 0.05],
    }]);
    game.frame(DT);
    assert_eq!(game.state.striker.pos, start);
}

#[test]
fn hud_tracks_score_and_message() {
    let mut game = quiet_game();
    let first = game.hud_update().expect("first frame paints");
    assert_eq!(first.lines.len(), 2);
    assert_eq!(first.lines[1].text, "Streak: 0 | Best: 0");

    game.state.ball.set_plane_pos(Vec2::new(0.0, -1.85));
    game.frame(DT);
    let goal = game.hud_update().expect("goal repaints");
    let texts: Vec<_> = goal.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["GOAL!", "Score: 1", "Streak: 1 | Best: 1"]);
}

#[test]
fn same_seed_same_game() {
    let script = |state: &mut GameState| {
        let mut input = TickInput::default();
        for step in 0..600 {
            let code = ["ArrowDown", "ArrowLeft", "KeyW", "ArrowRight"][(step / 150) % 4];
            input.keys.apply_key(code, step % 150 < 100);
            tick(state, &input, DT);
        }
    };

    let mut a = GameState::new(2024);
    let mut b = GameState::new(2024);
    script(&mut a);
    script(&mut b);

    assert_eq!(a.ball.pos, b.ball.pos);
    assert_eq!(a.scoreboard, b.scoreboard);
    assert_eq!(a.confetti.len(), b.confetti.len());
    for (pa, pb) in a.confetti.iter().zip(&b.confetti) {
        assert_eq!(pa.pos, pb.pos);
    }
}
