//! Arena zones
//!
//! The arena is a flat collection of typed zones. Builders are additive;
//! `clear_all` drops everything so the next mode starts from an empty arena.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::PlayerId;
use crate::ease_out_cubic;
use crate::settings::ArenaSettings;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            max: center + size / 2.0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Inclusive point containment
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Closest point of the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    pub fn with_center(&self, center: Vec2) -> Self {
        Self::from_center(center, self.size())
    }
}

/// Geometric region of a zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Region {
    Rect(Rect),
    Circle { center: Vec2, radius: f32 },
}

impl Region {
    /// Whether a circle body overlaps this region
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        match *self {
            Region::Rect(rect) => rect.closest_point(center).distance_squared(center) < radius * radius,
            Region::Circle { center: c, radius: r } => c.distance(center) < r + radius,
        }
    }

    pub fn center(&self) -> Vec2 {
        match *self {
            Region::Rect(rect) => rect.center(),
            Region::Circle { center, .. } => center,
        }
    }
}

/// Zone types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Wall,
    Goal,
    Basket,
    Lava,
    CenterZone,
    EndZone,
}

impl ZoneKind {
    /// Zones that report overlaps instead of blocking bodies
    pub fn is_sensor(self) -> bool {
        !matches!(self, ZoneKind::Wall)
    }
}

/// Sinusoidal vertical motion of a goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sway {
    pub base_y: f32,
    /// Phase offset (radians)
    pub phase: f32,
}

/// A zone in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    pub region: Region,
    /// Owning player, `None` for neutral zones
    pub for_player: Option<PlayerId>,
    pub sway: Option<Sway>,
}

impl Zone {
    fn neutral(kind: ZoneKind, region: Region) -> Self {
        Self {
            kind,
            region,
            for_player: None,
            sway: None,
        }
    }

    fn owned(kind: ZoneKind, region: Region, player: PlayerId) -> Self {
        Self {
            kind,
            region,
            for_player: Some(player),
            sway: None,
        }
    }
}

/// The shrinkable safe zone of the lava field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeZone {
    center: Vec2,
    base_size: Vec2,
    /// Scale at the start of the running animation
    from_scale: f32,
    /// Scale the animation settles at
    target_scale: f32,
    elapsed: f32,
    duration: f32,
}

impl SafeZone {
    pub fn new(center: Vec2, size: Vec2, duration: f32) -> Self {
        Self {
            center,
            base_size: size,
            from_scale: 1.0,
            target_scale: 1.0,
            elapsed: duration,
            duration,
        }
    }

    /// Current animated scale
    pub fn scale(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.target_scale;
        }
        let t = ease_out_cubic(self.elapsed / self.duration);
        self.from_scale + (self.target_scale - self.from_scale) * t
    }

    pub fn target_scale(&self) -> f32 {
        self.target_scale
    }

    /// Current rectangle
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, self.base_size * self.scale())
    }

    /// Start animating toward `factor` times the current target size
    pub fn shrink(&mut self, factor: f32) {
        self.from_scale = self.scale();
        self.target_scale *= factor;
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}

/// The live arena configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    zones: Vec<Zone>,
    safe_zone: Option<SafeZone>,
    /// Left and right edges are open: players may leave the world sideways
    open_sides: bool,
}

impl Arena {
    pub fn new(settings: &ArenaSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            zones: Vec::new(),
            safe_zone: None,
            open_sides: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zones_of(&self, kind: ZoneKind) -> impl Iterator<Item = &Zone> {
        self.zones.iter().filter(move |z| z.kind == kind)
    }

    pub fn safe_zone(&self) -> Option<&SafeZone> {
        self.safe_zone.as_ref()
    }

    #[inline]
    pub fn open_sides(&self) -> bool {
        self.open_sides
    }

    /// No zones of any kind are live
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty() && self.safe_zone.is_none() && !self.open_sides
    }

    /// Remove every zone
    pub fn clear_all(&mut self) {
        self.zones.clear();
        self.safe_zone = None;
        self.open_sides = false;
    }

    /// Top and bottom walls, plus side walls unless `open_sides`
    pub fn build_boundaries(&mut self, settings: &ArenaSettings, open_sides: bool) {
        let (w, h, t) = (self.width, self.height, settings.wall_thickness);

        if open_sides {
            self.open_sides = true;
        } else {
            self.push_wall(Vec2::new(t / 2.0, h / 2.0), Vec2::new(t, h));
            self.push_wall(Vec2::new(w - t / 2.0, h / 2.0), Vec2::new(t, h));
        }
        self.push_wall(Vec2::new(w / 2.0, t / 2.0), Vec2::new(w, t));
        self.push_wall(Vec2::new(w / 2.0, h - t / 2.0), Vec2::new(w, t));
    }

    fn push_wall(&mut self, center: Vec2, size: Vec2) {
        self.zones
            .push(Zone::neutral(ZoneKind::Wall, Region::Rect(Rect::from_center(center, size))));
    }

    /// One goal on each side. The left goal is where player 2 scores, the right
    /// goal player 1. Moving goals sway half a cycle apart.
    pub fn build_goals(&mut self, settings: &ArenaSettings, moving: bool) {
        let size = Vec2::new(settings.goal_width, settings.goal_height);
        let mid_y = self.height / 2.0;
        let sides = [
            (settings.goal_width / 2.0, PlayerId::Two, 0.0),
            (self.width - settings.goal_width / 2.0, PlayerId::One, std::f32::consts::PI),
        ];

        for (x, player, phase) in sides {
            let region = Region::Rect(Rect::from_center(Vec2::new(x, mid_y), size));
            let mut goal = Zone::owned(ZoneKind::Goal, region, player);
            if moving {
                goal.sway = Some(Sway { base_y: mid_y, phase });
            }
            self.zones.push(goal);
        }
    }

    /// Circular baskets near each side; left belongs to player 2, right to player 1
    pub fn build_baskets(&mut self, settings: &ArenaSettings) {
        let mid_y = self.height / 2.0;
        let radius = settings.basket_radius;
        let sides = [
            (settings.basket_inset, PlayerId::Two),
            (self.width - settings.basket_inset, PlayerId::One),
        ];
        for (x, player) in sides {
            let region = Region::Circle {
                center: Vec2::new(x, mid_y),
                radius,
            };
            self.zones.push(Zone::owned(ZoneKind::Basket, region, player));
        }
    }

    /// Central safe zone surrounded by four lava bands
    pub fn build_lava_field(&mut self, settings: &ArenaSettings) {
        let (w, h, m) = (self.width, self.height, settings.lava_margin);

        self.safe_zone = Some(SafeZone::new(
            self.center(),
            Vec2::new(w - 2.0 * m, h - 2.0 * m),
            settings.shrink_duration,
        ));

        let bands = [
            (Vec2::new(m / 2.0, h / 2.0), Vec2::new(m, h)),
            (Vec2::new(w - m / 2.0, h / 2.0), Vec2::new(m, h)),
            (Vec2::new(w / 2.0, m / 2.0), Vec2::new(w - 2.0 * m, m)),
            (Vec2::new(w / 2.0, h - m / 2.0), Vec2::new(w - 2.0 * m, m)),
        ];
        for (center, size) in bands {
            self.zones
                .push(Zone::neutral(ZoneKind::Lava, Region::Rect(Rect::from_center(center, size))));
        }
    }

    pub fn build_center_zone(&mut self, settings: &ArenaSettings) {
        let size = Vec2::new(settings.center_zone_width, settings.center_zone_height);
        self.zones.push(Zone::neutral(
            ZoneKind::CenterZone,
            Region::Rect(Rect::from_center(self.center(), size)),
        ));
    }

    /// End zones: left for player 1, right for player 2
    pub fn build_end_zones(&mut self, settings: &ArenaSettings) {
        let zw = settings.end_zone_width;
        let size = Vec2::new(zw, self.height - 30.0);
        let mid_y = self.height / 2.0;
        let sides = [(zw / 2.0, PlayerId::One), (self.width - zw / 2.0, PlayerId::Two)];
        for (x, player) in sides {
            let region = Region::Rect(Rect::from_center(Vec2::new(x, mid_y), size));
            self.zones.push(Zone::owned(ZoneKind::EndZone, region, player));
        }
    }

    /// Reposition swaying goals for the given match time. Driven by the shared
    /// clock so both goals stay in lockstep.
    pub fn update_moving_goals(&mut self, match_time: f32, settings: &ArenaSettings) {
        for zone in &mut self.zones {
            let (Some(sway), Region::Rect(rect)) = (zone.sway, &mut zone.region) else {
                continue;
            };
            let y = sway.base_y
                + (match_time * settings.goal_sway_speed + sway.phase).sin() * settings.goal_sway_amplitude;
            *rect = rect.with_center(Vec2::new(rect.center().x, y));
        }
    }

    /// Shrink the safe zone; no-op without a lava field
    pub fn shrink_safe_zone(&mut self, factor: f32) {
        if let Some(safe) = &mut self.safe_zone {
            safe.shrink(factor);
        }
    }

    /// Advance zone animations
    pub fn advance(&mut self, dt: f32) {
        if let Some(safe) = &mut self.safe_zone {
            safe.advance(dt);
        }
    }

    /// Without a lava field every point counts as safe
    pub fn is_in_safe_zone(&self, p: Vec2) -> bool {
        self.safe_zone.as_ref().is_none_or(|safe| safe.rect().contains(p))
    }

    pub fn is_in_center_zone(&self, p: Vec2) -> bool {
        self.zones_of(ZoneKind::CenterZone).any(|z| match z.region {
            Region::Rect(rect) => rect.contains(p),
            Region::Circle { center, radius } => center.distance(p) <= radius,
        })
    }
}
