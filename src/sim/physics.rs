//! Arcade physics step
//!
//! Integrates bodies, resolves walls, world bounds and body contacts, then
//! reports overlaps between bodies and sensor zones as discrete events.
//! Overlaps are reported every step while they persist; rules that react to
//! them latch or reset so a lingering overlap never double-counts.

use glam::Vec2;

use super::arena::{Rect, Region, ZoneKind};
use super::collision::{bounce_velocity, circle_circle_collision, circle_rect_collision, contain_circle};
use super::entities::PlayerId;
use super::world::World;
use crate::settings::Settings;

/// A body that can touch a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    Player(PlayerId),
    Ball,
}

/// A body overlapping a sensor zone during this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub body: Body,
    pub zone: ZoneKind,
    pub for_player: Option<PlayerId>,
}

/// Advance all bodies by `dt` and collect sensor overlaps
pub fn step(world: &mut World, settings: &Settings, dt: f32) -> Vec<Overlap> {
    let ball_cfg = &settings.ball;

    // --- Integration ---
    for player in &mut world.players {
        player.tick(dt, settings.player.knockback_drag);
        player.vel = player.move_vel + player.knockback;
        player.pos += player.vel * dt;
    }

    let ball = &mut world.ball;
    ball.enforce_speed_cap(ball_cfg.max_speed);
    ball.pos += ball.vel * dt;
    ball.apply_drag(ball_cfg.drag, dt);

    // --- Walls ---
    let walls: Vec<Rect> = world
        .arena
        .zones_of(ZoneKind::Wall)
        .filter_map(|z| match z.region {
            Region::Rect(rect) => Some(rect),
            Region::Circle { .. } => None,
        })
        .collect();

    for wall in &walls {
        for player in &mut world.players {
            let hit = circle_rect_collision(player.pos, player.radius, wall);
            if hit.hit {
                player.pos += hit.normal * hit.penetration;
                player.knockback = bounce_velocity(player.knockback, hit.normal, 0.0);
            }
        }

        let ball = &mut world.ball;
        let hit = circle_rect_collision(ball.pos, ball.radius, wall);
        if hit.hit {
            ball.pos += hit.normal * hit.penetration;
            ball.vel = bounce_velocity(ball.vel, hit.normal, ball_cfg.bounce);
        }
    }

    // --- World bounds ---
    let bounds = Rect {
        min: Vec2::ZERO,
        max: Vec2::new(world.arena.width, world.arena.height),
    };
    let clamp_x = !world.arena.open_sides();
    for player in &mut world.players {
        for normal in contain_circle(&mut player.pos, player.radius, &bounds, clamp_x, true) {
            player.knockback = bounce_velocity(player.knockback, normal, 0.0);
        }
    }

    let ball = &mut world.ball;
    for normal in contain_circle(&mut ball.pos, ball.radius, &bounds, true, true) {
        ball.vel = bounce_velocity(ball.vel, normal, ball_cfg.bounce);
    }

    // --- Player vs player ---
    {
        let [p1, p2] = &mut world.players;
        let hit = circle_circle_collision(p1.pos, p1.radius, p2.pos, p2.radius);
        if hit.hit {
            let half = hit.normal * (hit.penetration / 2.0);
            p1.pos += half;
            p2.pos -= half;
        }
    }

    // --- Player vs ball ---
    for player in &world.players {
        let ball = &mut world.ball;
        let hit = circle_circle_collision(ball.pos, ball.radius, player.pos, player.radius);
        if hit.hit {
            ball.pos += hit.normal * hit.penetration;
            let relative = bounce_velocity(ball.vel - player.vel, hit.normal, ball_cfg.bounce);
            ball.vel = relative + player.vel;
        }
    }
    world.ball.enforce_speed_cap(ball_cfg.max_speed);

    collect_overlaps(world)
}

/// Ball against goals and baskets, players against end zones
fn collect_overlaps(world: &World) -> Vec<Overlap> {
    let mut overlaps = Vec::new();
    for zone in world.arena.zones().iter().filter(|z| z.kind.is_sensor()) {
        match zone.kind {
            ZoneKind::Goal | ZoneKind::Basket => {
                if zone.region.overlaps_circle(world.ball.pos, world.ball.radius) {
                    overlaps.push(Overlap {
                        body: Body::Ball,
                        zone: zone.kind,
                        for_player: zone.for_player,
                    });
                }
            }
            ZoneKind::EndZone => {
                for player in &world.players {
                    if zone.region.overlaps_circle(player.pos, player.radius) {
                        overlaps.push(Overlap {
                            body: Body::Player(player.id),
                            zone: zone.kind,
                            for_player: zone.for_player,
                        });
                    }
                }
            }
            ZoneKind::Wall | ZoneKind::Lava | ZoneKind::CenterZone => {}
        }
    }
    overlaps
}
