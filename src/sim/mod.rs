//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only, so a seed replays a game exactly
//! - Single-threaded; removals happen through `retain` passes
//! - No rendering, audio or device dependencies

pub mod background;
pub mod clock;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod steering;
pub mod tick;

pub use background::{Star, Starfield};
pub use clock::{ClockMode, SimClock};
pub use collision::{any_hits, centers_within, resolve_bullet_hits};
pub use spawn::spawn_wave;
pub use state::{Entity, GameEvent, GamePhase, GameState};
pub use steering::steer_toward;
pub use tick::{EnemyStep, TickInput, tick};
