//! Player action controller.
//!
//! Folds one tick of intent into the body: timers first, then horizontal
//! movement, gravity, jump start, jump cut, integration, and finally the
//! terrain pass. The order is fixed so a jump always launches at full speed
//! (gravity has already run) and landings are judged on resolved positions.
//!
//! Events describe transitions, not states: `Landed` fires on the tick the
//! body goes from airborne to grounded, `Jumped` on the tick a jump starts,
//! `HitCeiling` on the tick an upward overlap is resolved.

use crossbeam_channel::Sender;
use tracing::{debug, trace};

use karst_common::{Aabb, EntityId, Vec2};
use karst_physics::{
    KinematicBody, MovementController, PhysicsConfig, TerrainContact, TerrainPass, TileGrid,
};

use crate::events::GameplayEvent;
use crate::input::Intent;
use crate::visual::VisualSink;

/// What one controller tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    /// Position after resolution
    pub position: Vec2,
    /// Velocity after resolution
    pub velocity: Vec2,
    /// On the ground at the end of the tick
    pub grounded: bool,
    /// Pressing into a wall at the end of the tick
    pub on_wall: bool,
    /// A jump started this tick
    pub jumped: bool,
    /// The body touched down this tick
    pub landed: bool,
    /// The body struck a ceiling this tick
    pub hit_ceiling: bool,
}

/// Drives one kinematic body from player intent.
#[derive(Debug)]
pub struct ActionController {
    /// Entity this controller drives
    entity_id: EntityId,
    /// The simulated body
    body: KinematicBody,
    /// Horizontal movement and coyote bookkeeping
    movement: MovementController,
    /// Collision pass shared by every tick
    pass: TerrainPass,
    /// Launch speed for jumps
    jump_velocity: f32,
    /// Fraction of rise kept when jump is released early
    jump_cut_multiplier: f32,
    /// Press-to-land forgiveness window
    jump_buffer_ms: f32,
    /// Time left on the buffered press
    jump_buffer_remaining_ms: f32,
    /// Whether the current jump has already been cut
    jump_cut_applied: bool,
    /// Where gameplay events go, if anyone listens
    events: Option<Sender<GameplayEvent>>,
}

impl ActionController {
    /// Creates a controller for a body spawned airborne at `position`.
    #[must_use]
    pub fn new(
        entity_id: EntityId,
        position: Vec2,
        half_extents: Vec2,
        config: &PhysicsConfig,
    ) -> Self {
        Self {
            entity_id,
            body: KinematicBody::new(position, half_extents, config),
            movement: MovementController::new(config),
            pass: TerrainPass::new(config),
            jump_velocity: config.jump_velocity,
            jump_cut_multiplier: config.jump_cut_multiplier,
            jump_buffer_ms: config.jump_buffer_ms,
            jump_buffer_remaining_ms: 0.0,
            jump_cut_applied: false,
            events: None,
        }
    }

    /// Routes this controller's events to a bus sender.
    pub fn connect_events(&mut self, sender: Sender<GameplayEvent>) {
        self.events = Some(sender);
    }

    /// The entity this controller drives.
    #[must_use]
    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    /// The simulated body.
    #[must_use]
    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    /// Mutable access to the simulated body.
    pub fn body_mut(&mut self) -> &mut KinematicBody {
        &mut self.body
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Whether the body is on the ground.
    #[must_use]
    pub fn grounded(&self) -> bool {
        self.body.grounded
    }

    /// Moves the body somewhere else and forgets all motion state.
    pub fn teleport(&mut self, position: Vec2) {
        self.body.position = position;
        self.body.velocity = Vec2::ZERO;
        self.body.grounded = false;
        self.body.on_wall = false;
        self.movement.set_grounded(false);
        self.jump_buffer_remaining_ms = 0.0;
        self.jump_cut_applied = false;
    }

    /// Runs one tick against a tile grid.
    ///
    /// `delta_ms <= 0` leaves the body untouched and reports nothing.
    pub fn tick<G: TileGrid, V: VisualSink>(
        &mut self,
        intent: &Intent,
        grid: &G,
        visual: &mut V,
        delta_ms: f32,
    ) -> TickOutcome {
        if delta_ms <= 0.0 {
            return self.idle_outcome();
        }
        let jumped = self.advance(intent, delta_ms);
        let was_grounded = self.body.grounded;
        let contact = self.pass.resolve(&mut self.body, grid);
        self.finish(visual, jumped, was_grounded, contact)
    }

    /// Runs one tick against an explicit list of static rectangles.
    pub fn tick_with_rects<V: VisualSink>(
        &mut self,
        intent: &Intent,
        rects: &[Aabb],
        visual: &mut V,
        delta_ms: f32,
    ) -> TickOutcome {
        if delta_ms <= 0.0 {
            return self.idle_outcome();
        }
        let jumped = self.advance(intent, delta_ms);
        let was_grounded = self.body.grounded;
        let contact = self.pass.resolve_rects(&mut self.body, rects);
        self.finish(visual, jumped, was_grounded, contact)
    }

    /// Everything before collision: timers, movement, gravity, jump, cut,
    /// integration. Returns whether a jump started.
    fn advance(&mut self, intent: &Intent, delta_ms: f32) -> bool {
        // Buffer the press edge, then age both forgiveness timers
        if intent.jump_pressed {
            self.jump_buffer_remaining_ms = self.jump_buffer_ms;
        }
        self.jump_buffer_remaining_ms = (self.jump_buffer_remaining_ms - delta_ms).max(0.0);
        self.movement.update_coyote(delta_ms);

        self.movement.apply_move(&mut self.body, intent.axis, delta_ms);
        self.body.apply_gravity(delta_ms);

        // Jump starts after gravity so the first airborne tick rises at
        // exactly the launch speed
        let mut jumped = false;
        if self.jump_buffer_remaining_ms > 0.0 && self.movement.can_jump() {
            self.movement.jump(&mut self.body, self.jump_velocity);
            self.jump_buffer_remaining_ms = 0.0;
            self.jump_cut_applied = false;
            jumped = true;
            trace!(entity_id = ?self.entity_id, "jump started");
        }

        // Releasing early shortens the rise, once per jump
        if intent.jump_released
            && !self.jump_cut_applied
            && !self.body.grounded
            && self.body.velocity.y < 0.0
        {
            self.body.velocity.y *= self.jump_cut_multiplier;
            self.jump_cut_applied = true;
        }

        self.body.update_position(delta_ms);
        jumped
    }

    /// Everything after collision: events, movement sync, visual sync.
    fn finish<V: VisualSink>(
        &mut self,
        visual: &mut V,
        jumped: bool,
        was_grounded: bool,
        contact: TerrainContact,
    ) -> TickOutcome {
        let landed = !was_grounded && self.body.grounded;
        self.movement.set_grounded(self.body.grounded);

        if jumped {
            self.publish(GameplayEvent::Jumped {
                entity_id: self.entity_id,
            });
        }
        if landed {
            debug!(entity_id = ?self.entity_id, y = self.body.position.y, "landed");
            self.publish(GameplayEvent::Landed {
                entity_id: self.entity_id,
            });
        }
        if contact.hit_ceiling {
            self.publish(GameplayEvent::HitCeiling {
                entity_id: self.entity_id,
            });
        }

        visual.sync_visual(self.body.position);

        TickOutcome {
            position: self.body.position,
            velocity: self.body.velocity,
            grounded: self.body.grounded,
            on_wall: self.body.on_wall,
            jumped,
            landed,
            hit_ceiling: contact.hit_ceiling,
        }
    }

    fn idle_outcome(&self) -> TickOutcome {
        TickOutcome {
            position: self.body.position,
            velocity: self.body.velocity,
            grounded: self.body.grounded,
            on_wall: self.body.on_wall,
            ..TickOutcome::default()
        }
    }

    fn publish(&self, event: GameplayEvent) {
        if let Some(sender) = &self.events {
            // Non-blocking send - if full, event is dropped
            let _ = sender.try_send(event);
        }
    }
}
