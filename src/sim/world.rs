//! Entity bundle owned by the match controller

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::entities::{Ball, Player, PlayerId, PushOutcome};
use crate::settings::{PlayerSettings, Settings};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub players: [Player; 2],
    pub ball: Ball,
    pub arena: Arena,
}

impl World {
    pub fn new(settings: &Settings) -> Self {
        let arena = Arena::new(&settings.arena);
        let [p1, p2] = spawn_points(settings);
        Self {
            players: [
                Player::new(PlayerId::One, p1, &settings.player),
                Player::new(PlayerId::Two, p2, &settings.player),
            ],
            ball: Ball::new(arena.center(), &settings.ball),
            arena,
        }
    }

    #[inline]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Fire `id`'s push at the ball and the rival
    pub fn push(&mut self, id: PlayerId, settings: &PlayerSettings) -> PushOutcome {
        let [p1, p2] = &mut self.players;
        let (pusher, rival) = match id {
            PlayerId::One => (p1, p2),
            PlayerId::Two => (p2, p1),
        };
        pusher.push(&mut self.ball, rival, settings)
    }

    pub fn mode_scores(&self) -> [i32; 2] {
        [self.players[0].mode_score, self.players[1].mode_score]
    }

    pub fn totals(&self) -> [i32; 2] {
        [self.players[0].score, self.players[1].score]
    }

    /// Put both players back on their spawn points, stopped
    pub fn reset_positions(&mut self, settings: &Settings) {
        for (player, spawn) in self.players.iter_mut().zip(spawn_points(settings)) {
            player.place(spawn);
        }
    }

    pub fn reset_ball(&mut self) {
        let center = self.arena.center();
        self.ball.place(center);
    }

    /// Player whose center is strictly closest to the ball. Ties keep the
    /// earlier player in iteration order.
    pub fn nearest_player_to_ball(&self) -> PlayerId {
        let mut nearest = PlayerId::One;
        let mut best = f32::INFINITY;
        for player in &self.players {
            let dist = player.pos.distance(self.ball.pos);
            if dist < best {
                best = dist;
                nearest = player.id;
            }
        }
        nearest
    }
}

/// Player 1 left, player 2 right, both at mid height
pub fn spawn_points(settings: &Settings) -> [Vec2; 2] {
    let inset = settings.player.spawn_inset;
    let mid_y = settings.arena.height / 2.0;
    [
        Vec2::new(inset, mid_y),
        Vec2::new(settings.arena.width - inset, mid_y),
    ]
}
