//! # Behavior Machine Module
//!
//! The actor behavior graph as a pure transition function over a tagged
//! event union, so the whole machine is statically inspectable and testable
//! without a live event loop.
//!
//! The original client wired this as a hierarchical state chart:
//!
//! ```text
//! ActionStates ──healthDepleted──> Dying ──animation done──> Dead (final)
//!   └─ AliveStates
//!        ├─ Recoiling            (entered on hit, back to Standing)
//!        └─ NonRecoiling
//!             ├─ Casting         (entered on spellCastAt, back to Standing)
//!             └─ NonCasting
//!                  ├─ Standing ──target set──> Walking
//!                  ├─ Walking ──reached, attackable──> Attacking
//!                  │      └────reached, not attackable──> Standing
//!                  └─ Attacking ──animation done──> Standing
//! ```
//!
//! Flattened here, the hierarchy survives as precedence: health depletion
//! preempts everything, a hit preempts casting and the walking states, and
//! the final state absorbs all events.

use serde::{Deserialize, Serialize};

/// The actor's active behavioral mode, driving which sprite set is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorState {
    Standing,
    Walking,
    Attacking,
    Casting,
    Recoiling,
    Dying,
    Dead,
}

impl ActorState {
    /// All states in enum order.
    pub const ALL: [ActorState; 7] = [
        ActorState::Standing,
        ActorState::Walking,
        ActorState::Attacking,
        ActorState::Casting,
        ActorState::Recoiling,
        ActorState::Dying,
        ActorState::Dead,
    ];

    /// The state's integer value, usable as an array index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether the actor can still act at all. Dying and Dead are the
    /// one-way tail of the graph.
    pub fn is_alive(self) -> bool {
        !matches!(self, ActorState::Dying | ActorState::Dead)
    }

    /// Whether this is the final state; external code removes the actor
    /// from the scene once it is reached.
    pub fn is_terminal(self) -> bool {
        self == ActorState::Dead
    }
}

/// Events consumed by the behavior machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorEvent {
    /// A new movement target was set and a non-empty path exists.
    TargetSet,
    /// The end of the path was reached; `attackable` reports whether the
    /// target answers `can_be_attacked`.
    TargetReached { attackable: bool },
    /// The actor was struck by something.
    Hit,
    /// The actor was ordered to cast a spell at a target.
    SpellCastAt,
    /// Health just reached zero.
    HealthDepleted,
    /// The active sprite's frame sequence completed a full cycle.
    AnimationFinished,
}

/// The behavior transition function: the next state for `(state, event)`,
/// or `None` when the event does not apply in that state.
///
/// Returning `Some` with the same state (Walking + TargetSet) still means a
/// full exit/re-enter, which is how issuing a new target restarts the walk.
pub fn transition(state: ActorState, event: ActorEvent) -> Option<ActorState> {
    use ActorEvent as E;
    use ActorState as S;

    // Final state absorbs everything; Dying only finishes its animation.
    match state {
        S::Dead => return None,
        S::Dying => {
            return match event {
                E::AnimationFinished => Some(S::Dead),
                _ => None,
            }
        }
        _ => {}
    }

    // Health depletion preempts every alive state.
    if event == E::HealthDepleted {
        return Some(S::Dying);
    }

    match (state, event) {
        // Recoiling blocks everything until its animation ends.
        (S::Recoiling, E::AnimationFinished) => Some(S::Standing),
        (S::Recoiling, _) => None,

        // A hit preempts casting and the walking states.
        (_, E::Hit) => Some(S::Recoiling),

        (S::Casting, E::AnimationFinished) => Some(S::Standing),
        (S::Casting, _) => None,

        (_, E::SpellCastAt) => Some(S::Casting),

        (S::Standing, E::TargetSet) => Some(S::Walking),
        (S::Walking, E::TargetSet) => Some(S::Walking),
        (S::Walking, E::TargetReached { attackable: true }) => Some(S::Attacking),
        (S::Walking, E::TargetReached { attackable: false }) => Some(S::Standing),
        (S::Attacking, E::AnimationFinished) => Some(S::Standing),

        _ => None,
    }
}
