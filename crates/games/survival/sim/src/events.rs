use crate::config::EnemyKind;
use crate::world::{EnemyId, ProjectileId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skill {
    Freeze,
    Heal,
    DamageBoost,
}

/// Why a skill activation was refused. Surfaced as transient feedback, never
/// an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    NotEnoughScore,
    AlreadyActive,
    AtFullHealth,
}

#[derive(Clone, Debug)]
pub enum SurvivalEvent {
    EnemySpawned {
        id: EnemyId,
        kind: EnemyKind,
    },
    EnemyAttached {
        id: EnemyId,
        kind: EnemyKind,
    },
    EnemyHit {
        id: EnemyId,
        hp: i32,
    },
    EnemyKilled {
        id: EnemyId,
        kind: EnemyKind,
        score: u32,
    },
    StructureDamaged {
        by: EnemyId,
        amount: i32,
        hp: i32,
    },
    StructureHealed {
        amount: i32,
        hp: i32,
    },
    ShotFired {
        id: ProjectileId,
    },
    /// Shot attempt inside the cooldown window; a no-op that leaves the
    /// cooldown untouched.
    ShotOnCooldown,
    SkillActivated {
        skill: Skill,
    },
    SkillRejected {
        skill: Skill,
        reason: RejectReason,
    },
    SkillExpired {
        skill: Skill,
    },
    PaceQuickened {
        spawn_interval_ms: u32,
    },
    BossAlert {
        wave: u32,
    },
    BossSpawned {
        wave: u32,
        id: EnemyId,
    },
    BossDefeated {
        wave: u32,
    },
    SessionEnded {
        score: u32,
        kills: u32,
        survived_secs: u64,
    },
}
