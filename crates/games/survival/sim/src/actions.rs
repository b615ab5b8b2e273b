use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SurvivalAction {
    /// Fire a projectile from the emitter toward the aim point.
    Shoot { x: f32, y: f32 },
    Freeze,
    Heal,
    DamageBoost,
}
