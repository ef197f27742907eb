//! Events emitted by the simulation
//!
//! The simulation never touches audio or the DOM. It queues events on the
//! game state and the frontend drains them after each frame.

use super::entities::PowerUpKind;

/// Sound trigger points consumed by the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Collect,
    Jump,
    Hit,
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LevelLoaded { level: u32 },
    Jumped,
    ItemCollected { collected: u32 },
    PowerUpCollected(PowerUpKind),
    DoorOpened,
    PlayerHit { lives: u8 },
    BossHit { health: u32 },
    LevelComplete { level: u32 },
    GameOver,
    Victory,
}

impl GameEvent {
    /// Sound to play for this event, if any
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Jumped => Some(SoundCue::Jump),
            GameEvent::ItemCollected { .. } | GameEvent::PowerUpCollected(_) => {
                Some(SoundCue::Collect)
            }
            GameEvent::PlayerHit { .. } | GameEvent::BossHit { .. } => Some(SoundCue::Hit),
            GameEvent::LevelComplete { .. } | GameEvent::Victory => Some(SoundCue::Victory),
            GameEvent::LevelLoaded { .. } | GameEvent::DoorOpened | GameEvent::GameOver => None,
        }
    }
}
