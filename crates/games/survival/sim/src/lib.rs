pub mod actions;
pub mod config;
pub mod events;
pub mod game;
pub mod observe;
pub mod systems;
pub mod timers;
pub mod world;

pub use actions::SurvivalAction;
pub use config::{EnemyKind, EnemySpec, SpawnWeights, SurvivalConfig};
pub use events::{RejectReason, Skill, SurvivalEvent};
pub use game::SurvivalGame;
pub use world::{BossPhase, Enemy, EnemyId, Projectile, ProjectileId, SurvivalState, World};
