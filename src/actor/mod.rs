//! # Actor Module
//!
//! The behavioral side of the engine. [`BasicActor`] is the generic
//! skeleton: the behavior machine, the active direction-indexed sprite set,
//! and frame advancement. [`Actor`] layers the RPG stat block, target
//! tracking, and tick-by-tick consumption of the travel paths produced by
//! [`crate::Grid::construct_path`].
//!
//! Everything here is driven from the outside: one
//! [`Actor::update_time_dependent_states`] call per game tick, plus discrete
//! events (clicks, hits, spell orders) as they happen. There is no internal
//! event loop.

pub mod machine;
pub mod sprites;
pub mod stats;

pub use machine::{transition, ActorEvent, ActorState};
pub use sprites::{ActorSprites, SpriteSheet};
pub use stats::{StatBlock, StatNotification};

use crate::direction::Direction;
use crate::geometry::Point;
use crate::grid::{Grid, PathEndpoint, TravelPath};
use crate::scene::LevelObject;
use crate::DuskholdResult;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a walking tick accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Not walking, or nothing left to consume.
    Idle,
    /// Moved along the path; more remains.
    Moving,
    /// Consumed the final step this tick; the target-reached event fired.
    Arrived,
}

/// Generic animated-actor skeleton: behavior machine lifecycle, active
/// sprite-set swap, and frame advancement.
///
/// Cloning copies everything explicitly; there is no hidden data sharing
/// between clones.
#[derive(Debug, Clone)]
pub struct BasicActor {
    id: ActorId,
    state: ActorState,
    direction: Direction,
    sprites: ActorSprites,
    frame: usize,
    needs_repaint: bool,
}

impl BasicActor {
    /// A new actor in `Standing`, facing South, with no sprites assigned.
    pub fn new() -> Self {
        Self {
            id: ActorId::new(),
            state: ActorState::Standing,
            direction: Direction::South,
            sprites: ActorSprites::new(),
            frame: 0,
            needs_repaint: false,
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Changes the facing direction, requesting a repaint when it actually
    /// changed.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.direction != direction {
            self.direction = direction;
            self.needs_repaint = true;
        }
    }

    /// Forces a state, running the usual exit/enter side effects. Intended
    /// for spawning and scripted setups; gameplay goes through
    /// [`BasicActor::handle_event`].
    pub fn set_state(&mut self, state: ActorState) {
        self.exit_state();
        self.state = state;
        self.enter_state();
    }

    /// Forces state and facing together.
    pub fn set_state_and_direction(&mut self, state: ActorState, direction: Direction) {
        self.set_state(state);
        self.set_direction(direction);
    }

    /// Assigns the sprite sets once image assets are ready, restarting the
    /// active animation.
    pub fn set_actor_sprites(&mut self, sprites: ActorSprites) {
        self.sprites = sprites;
        self.frame = 0;
        self.needs_repaint = true;
    }

    /// The sheet for the current state, if assigned.
    pub fn active_sheet(&self) -> Option<SpriteSheet> {
        self.sprites.get(self.state)
    }

    /// Current frame of the active animation.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Feeds one event through the behavior machine. Returns whether a
    /// transition fired; exit side effects run before enter side effects.
    pub fn handle_event(&mut self, event: ActorEvent) -> bool {
        let Some(next) = machine::transition(self.state, event) else {
            trace!("actor {:?}: {event:?} ignored in {:?}", self.id, self.state);
            return false;
        };
        debug!(
            "actor {:?}: {:?} --{event:?}--> {next:?}",
            self.id, self.state
        );
        self.exit_state();
        self.state = next;
        self.enter_state();
        true
    }

    fn exit_state(&mut self) {
        self.frame = 0;
    }

    fn enter_state(&mut self) {
        // The active sheet is looked up by state, so entering the state is
        // what swaps the sprite set; the counter restarts with it.
        self.frame = 0;
        self.needs_repaint = true;
    }

    /// Advances the active animation by one frame. Returns `true` when the
    /// frame sequence just completed a full cycle.
    pub fn advance_frame(&mut self) -> bool {
        let Some(sheet) = self.active_sheet() else {
            return false;
        };
        if sheet.frame_count == 0 {
            return false;
        }
        self.frame += 1;
        self.needs_repaint = true;
        if self.frame >= sheet.frame_count {
            self.frame = 0;
            return true;
        }
        false
    }

    /// Polls and clears the repaint request.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }
}

impl Default for BasicActor {
    fn default() -> Self {
        Self::new()
    }
}

/// A character or monster: the [`BasicActor`] skeleton plus RPG stats and
/// click-to-move behavior.
#[derive(Debug, Clone)]
pub struct Actor {
    base: BasicActor,
    stats: StatBlock,
    position: Point,
    walk_speed: f64,
    path: TravelPath,
    segment: usize,
    segment_progress: f64,
    target_attackable: bool,
}

impl Actor {
    /// Spawns an actor at the given feet position.
    pub fn new(position: Point, stats: StatBlock) -> Self {
        Self {
            base: BasicActor::new(),
            stats,
            position,
            walk_speed: crate::config::DEFAULT_WALK_SPEED,
            path: TravelPath::empty(),
            segment: 0,
            segment_progress: 0.0,
            target_attackable: false,
        }
    }

    pub fn id(&self) -> ActorId {
        self.base.id()
    }

    pub fn state(&self) -> ActorState {
        self.base.state()
    }

    pub fn direction(&self) -> Direction {
        self.base.direction()
    }

    /// The actor's feet position in scene coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn walk_speed(&self) -> f64 {
        self.walk_speed
    }

    /// Sets the walk speed in pixels per tick; non-positive values stop the
    /// actor in place.
    pub fn set_walk_speed(&mut self, speed: f64) {
        self.walk_speed = speed.max(0.0);
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    /// Base-attribute and resistance mutations; health and mana go through
    /// [`Actor::set_health`] / [`Actor::set_mana`] so the behavior machine
    /// sees depletion.
    pub fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }

    /// Sets health, feeding a depletion straight into the behavior machine.
    /// Returns the stat notifications for external observers.
    pub fn set_health(&mut self, health: i64) -> Vec<StatNotification> {
        let notifications = self.stats.set_health(health);
        if notifications.contains(&StatNotification::HealthDepleted) {
            self.base.handle_event(ActorEvent::HealthDepleted);
        }
        notifications
    }

    /// Sets mana. Returns the stat notifications for external observers.
    pub fn set_mana(&mut self, mana: i64) -> Vec<StatNotification> {
        self.stats.set_mana(mana)
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.base.set_direction(direction);
    }

    pub fn set_state_and_direction(&mut self, state: ActorState, direction: Direction) {
        self.base.set_state_and_direction(state, direction);
    }

    pub fn set_actor_sprites(&mut self, sprites: ActorSprites) {
        self.base.set_actor_sprites(sprites);
    }

    pub fn active_sheet(&self) -> Option<SpriteSheet> {
        self.base.active_sheet()
    }

    pub fn frame(&self) -> usize {
        self.base.frame()
    }

    pub fn take_repaint(&mut self) -> bool {
        self.base.take_repaint()
    }

    /// Whether the final state has been reached and the scene layer should
    /// remove this actor.
    pub fn is_terminal(&self) -> bool {
        self.base.state().is_terminal()
    }

    /// Feeds a discrete gameplay event (hit, spell order, ...) through the
    /// behavior machine.
    pub fn handle_event(&mut self, event: ActorEvent) -> bool {
        self.base.handle_event(event)
    }

    /// Resolves a click on `target` into a travel path and starts walking
    /// it.
    ///
    /// An empty path (unreachable or off-grid target) leaves the actor
    /// exactly as it was and returns `false`; issuing a new target while a
    /// previous path is still being walked simply discards the old path.
    pub fn set_target(
        &mut self,
        grid: &mut Grid,
        target: &dyn LevelObject,
    ) -> DuskholdResult<bool> {
        let from = PathEndpoint::Feet(self.position);
        let to = PathEndpoint::for_object(target);
        let path = grid.construct_path(from, to)?;
        Ok(self.follow_path(path, target.can_be_attacked()))
    }

    /// Starts walking a precomputed path. Returns `false` (and changes
    /// nothing) when the path is empty or the machine refuses the walk.
    pub fn follow_path(&mut self, path: TravelPath, attackable: bool) -> bool {
        if path.is_empty() {
            return false;
        }
        if !self.base.handle_event(ActorEvent::TargetSet) {
            return false;
        }
        self.target_attackable = attackable;
        self.segment = 0;
        self.segment_progress = 0.0;
        if let Some(step) = path.steps().first() {
            self.base.set_direction(step.direction);
        }
        self.path = path;
        true
    }

    /// The path currently being walked; empty when idle.
    pub fn path(&self) -> &TravelPath {
        &self.path
    }

    /// Per-tick advancement: one frame of the active animation (possibly
    /// completing a cycle and firing its transition), then path consumption
    /// when walking.
    ///
    /// Called once per tick by the external game loop.
    pub fn update_time_dependent_states(&mut self) -> WalkOutcome {
        if self.base.advance_frame() {
            self.base.handle_event(ActorEvent::AnimationFinished);
        }
        if self.base.state() != ActorState::Walking {
            return WalkOutcome::Idle;
        }
        self.walk_tick()
    }

    /// Consumes up to `walk_speed` pixels of the path, updating position
    /// and facing per step. Firing the target-reached event on the final
    /// step hands control back to the behavior machine.
    fn walk_tick(&mut self) -> WalkOutcome {
        let mut budget = self.walk_speed;
        let mut moved = false;
        while budget > 0.0 {
            let Some(step) = self.path.steps().get(self.segment).copied() else {
                break;
            };
            self.base.set_direction(step.direction);
            let from = self.path.points()[self.segment];
            let to = self.path.points()[self.segment + 1];
            let remaining = step.distance - self.segment_progress;
            if budget >= remaining {
                self.position = to;
                self.segment += 1;
                self.segment_progress = 0.0;
                budget -= remaining;
                moved = true;
            } else {
                self.segment_progress += budget;
                let t = self.segment_progress / step.distance;
                self.position = Point::new(
                    from.x + (to.x - from.x) * t,
                    from.y + (to.y - from.y) * t,
                );
                budget = 0.0;
                moved = true;
            }
        }

        if self.segment >= self.path.steps().len() {
            trace!("actor {:?} reached target at {:?}", self.id(), self.position);
            self.path = TravelPath::empty();
            self.segment = 0;
            self.segment_progress = 0.0;
            self.base.handle_event(ActorEvent::TargetReached {
                attackable: self.target_attackable,
            });
            return WalkOutcome::Arrived;
        }
        if moved {
            WalkOutcome::Moving
        } else {
            WalkOutcome::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheets() -> ActorSprites {
        let mut sprites = ActorSprites::new();
        for state in ActorState::ALL {
            sprites.set(state, SpriteSheet::new(state.index() as u32, 4));
        }
        sprites
    }

    fn straight_path(len: f64) -> TravelPath {
        TravelPath::from_points(vec![Point::new(0.0, 0.0), Point::new(0.0, len)])
    }

    #[test]
    fn test_follow_path_enters_walking_and_faces_first_step() {
        let mut actor = Actor::new(Point::new(0.0, 0.0), StatBlock::new(100, 0));
        assert!(actor.follow_path(straight_path(20.0), false));
        assert_eq!(actor.state(), ActorState::Walking);
        assert_eq!(actor.direction(), Direction::South);
    }

    #[test]
    fn test_empty_path_means_no_movement() {
        let mut actor = Actor::new(Point::new(0.0, 0.0), StatBlock::new(100, 0));
        assert!(!actor.follow_path(TravelPath::empty(), false));
        assert_eq!(actor.state(), ActorState::Standing);
    }

    #[test]
    fn test_walk_consumes_path_and_stands_at_non_attackable_target() {
        let mut actor = Actor::new(Point::new(0.0, 0.0), StatBlock::new(100, 0));
        actor.set_walk_speed(6.0);
        assert!(actor.follow_path(straight_path(20.0), false));
        let mut ticks = 0;
        while actor.state() == ActorState::Walking {
            actor.update_time_dependent_states();
            ticks += 1;
            assert!(ticks < 100, "walk never terminated");
        }
        assert_eq!(actor.state(), ActorState::Standing);
        assert!(actor.position().approx_eq(Point::new(0.0, 20.0)));
        assert_eq!(ticks, 4); // ceil(20 / 6)
    }

    #[test]
    fn test_walk_ends_in_attack_on_attackable_target() {
        let mut actor = Actor::new(Point::new(0.0, 0.0), StatBlock::new(100, 0));
        actor.set_walk_speed(25.0);
        assert!(actor.follow_path(straight_path(20.0), true));
        actor.update_time_dependent_states();
        assert_eq!(actor.state(), ActorState::Attacking);
    }

    #[test]
    fn test_new_target_discards_previous_path() {
        let mut actor = Actor::new(Point::new(0.0, 0.0), StatBlock::new(100, 0));
        actor.set_walk_speed(1.0);
        assert!(actor.follow_path(straight_path(100.0), false));
        actor.update_time_dependent_states();
        let east = TravelPath::from_points(vec![actor.position(), Point::new(50.0, 1.0)]);
        assert!(actor.follow_path(east, false));
        assert_eq!(actor.state(), ActorState::Walking);
        assert_eq!(actor.path().destination().unwrap(), Point::new(50.0, 1.0));
    }

    #[test]
    fn test_depleted_health_walks_the_death_chain() {
        let mut actor = Actor::new(Point::new(0.0, 0.0), StatBlock::new(50, 0));
        actor.set_actor_sprites(sheets());
        let notifications = actor.set_health(0);
        assert!(notifications.contains(&StatNotification::HealthDepleted));
        assert_eq!(actor.state(), ActorState::Dying);
        // Four frames complete the dying animation; the wrap fires the
        // final transition.
        for _ in 0..4 {
            actor.update_time_dependent_states();
        }
        assert!(actor.is_terminal());
        // And there is no way back.
        assert!(!actor.handle_event(ActorEvent::TargetSet));
        assert!(!actor.follow_path(straight_path(10.0), false));
    }

    #[test]
    fn test_dying_while_walking_stops_movement() {
        let mut actor = Actor::new(Point::new(0.0, 0.0), StatBlock::new(50, 0));
        actor.set_walk_speed(2.0);
        assert!(actor.follow_path(straight_path(100.0), false));
        actor.update_time_dependent_states();
        let before = actor.position();
        actor.set_health(0);
        assert_eq!(actor.state(), ActorState::Dying);
        actor.update_time_dependent_states();
        assert!(actor.position().approx_eq(before));
    }

    #[test]
    fn test_recoil_interrupts_and_returns_to_standing() {
        let mut actor = Actor::new(Point::new(0.0, 0.0), StatBlock::new(50, 0));
        actor.set_actor_sprites(sheets());
        assert!(actor.follow_path(straight_path(40.0), false));
        assert!(actor.handle_event(ActorEvent::Hit));
        assert_eq!(actor.state(), ActorState::Recoiling);
        for _ in 0..4 {
            actor.update_time_dependent_states();
        }
        assert_eq!(actor.state(), ActorState::Standing);
    }

    #[test]
    fn test_state_entry_restarts_frame_counter() {
        let mut actor = BasicActor::new();
        actor.set_actor_sprites(sheets());
        actor.advance_frame();
        actor.advance_frame();
        assert_eq!(actor.frame(), 2);
        assert!(actor.handle_event(ActorEvent::TargetSet));
        assert_eq!(actor.frame(), 0);
        assert!(actor.take_repaint());
        assert!(!actor.take_repaint());
    }

    #[test]
    fn test_frame_cycle_reports_completion() {
        let mut actor = BasicActor::new();
        actor.set_actor_sprites(sheets());
        assert!(!actor.advance_frame());
        assert!(!actor.advance_frame());
        assert!(!actor.advance_frame());
        assert!(actor.advance_frame());
        assert_eq!(actor.frame(), 0);
    }
}
