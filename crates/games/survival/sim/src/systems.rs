use crate::actions::SurvivalAction;
use crate::config::EnemyKind;
use crate::events::{RejectReason, Skill, SurvivalEvent};
use crate::world::{BossPhase, Enemy, EnemyId, Projectile, ProjectileId, SurvivalState};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use sim_core::Tick;

pub fn apply_action(
    state: &mut SurvivalState,
    tick: Tick,
    action: &SurvivalAction,
    events: &mut Vec<SurvivalEvent>,
) {
    match action {
        SurvivalAction::Shoot { x, y } => try_shoot(state, tick, *x, *y, events),
        SurvivalAction::Freeze => try_freeze(state, tick, events),
        SurvivalAction::Heal => try_heal(state, tick, events),
        SurvivalAction::DamageBoost => try_damage_boost(state, tick, events),
    }
}

/// Fire one projectile toward the aim point, subject to the shot cooldown.
/// A premature attempt is a no-op that leaves the cooldown untouched.
pub fn try_shoot(
    state: &mut SurvivalState,
    tick: Tick,
    aim_x: f32,
    aim_y: f32,
    events: &mut Vec<SurvivalEvent>,
) {
    if tick < state.next_shot_tick {
        events.push(SurvivalEvent::ShotOnCooldown);
        return;
    }

    let (ex, ey) = state.config.emitter;
    let (dx, dy) = (aim_x - ex, aim_y - ey);
    let len = (dx * dx + dy * dy).sqrt();
    if !len.is_normal() {
        // Aim point on the emitter itself; no direction to shoot in.
        return;
    }

    state.next_shot_tick = tick + state.config.duration_to_ticks(state.config.shot_cooldown);
    state.shots_fired += 1;

    let expire_tick = tick + state.config.duration_to_ticks(state.config.projectile_flight);
    let id = state.world.projectiles.insert(Projectile {
        x: ex,
        y: ey,
        dir: (dx / len, dy / len),
        expire_tick,
    });
    events.push(SurvivalEvent::ShotFired { id });
}

pub fn try_freeze(state: &mut SurvivalState, tick: Tick, events: &mut Vec<SurvivalEvent>) {
    if state.score < state.config.freeze_cost {
        events.push(SurvivalEvent::SkillRejected {
            skill: Skill::Freeze,
            reason: RejectReason::NotEnoughScore,
        });
        return;
    }
    if state.frozen(tick) {
        events.push(SurvivalEvent::SkillRejected {
            skill: Skill::Freeze,
            reason: RejectReason::AlreadyActive,
        });
        return;
    }

    state.score -= state.config.freeze_cost;
    let duration = state.config.duration_to_ticks(state.config.freeze_duration);
    state.freeze_until = Some(tick + duration);
    // Suspend every pending attack with its remaining delay intact.
    state.attacks.defer_all(duration);
    events.push(SurvivalEvent::SkillActivated {
        skill: Skill::Freeze,
    });
}

pub fn try_heal(state: &mut SurvivalState, _tick: Tick, events: &mut Vec<SurvivalEvent>) {
    if state.score < state.config.heal_cost {
        events.push(SurvivalEvent::SkillRejected {
            skill: Skill::Heal,
            reason: RejectReason::NotEnoughScore,
        });
        return;
    }
    if state.structure_hp >= state.config.structure_max_hp {
        events.push(SurvivalEvent::SkillRejected {
            skill: Skill::Heal,
            reason: RejectReason::AtFullHealth,
        });
        return;
    }

    state.score -= state.config.heal_cost;
    let healed = state
        .config
        .heal_amount
        .min(state.config.structure_max_hp - state.structure_hp);
    state.structure_hp += healed;
    events.push(SurvivalEvent::SkillActivated { skill: Skill::Heal });
    events.push(SurvivalEvent::StructureHealed {
        amount: healed,
        hp: state.structure_hp,
    });
}

pub fn try_damage_boost(state: &mut SurvivalState, tick: Tick, events: &mut Vec<SurvivalEvent>) {
    if state.score < state.config.boost_cost {
        events.push(SurvivalEvent::SkillRejected {
            skill: Skill::DamageBoost,
            reason: RejectReason::NotEnoughScore,
        });
        return;
    }
    if state.boosted(tick) {
        // No stacking; an active boost is neither extended nor re-charged.
        events.push(SurvivalEvent::SkillRejected {
            skill: Skill::DamageBoost,
            reason: RejectReason::AlreadyActive,
        });
        return;
    }

    state.score -= state.config.boost_cost;
    let duration = state.config.duration_to_ticks(state.config.boost_duration);
    state.boost_until = Some(tick + duration);
    events.push(SurvivalEvent::SkillActivated {
        skill: Skill::DamageBoost,
    });
}

pub fn expire_skills(state: &mut SurvivalState, tick: Tick, events: &mut Vec<SurvivalEvent>) {
    if let Some(until) = state.freeze_until {
        if tick >= until {
            state.freeze_until = None;
            events.push(SurvivalEvent::SkillExpired {
                skill: Skill::Freeze,
            });
        }
    }
    if let Some(until) = state.boost_until {
        if tick >= until {
            state.boost_until = None;
            events.push(SurvivalEvent::SkillExpired {
                skill: Skill::DamageBoost,
            });
        }
    }
}

/// Tighten the spawn cadence on the difficulty interval. The step is skipped
/// outright while a boss encounter is running.
pub fn update_difficulty(state: &mut SurvivalState, tick: Tick, events: &mut Vec<SurvivalEvent>) {
    if tick < state.next_difficulty_tick {
        return;
    }
    state.next_difficulty_tick =
        tick + state.config.duration_to_ticks(state.config.difficulty_interval);

    if state.boss_phase.wave_active() {
        return;
    }
    if state.spawn_interval > state.config.spawn_interval_floor {
        state.spawn_interval = state
            .spawn_interval
            .saturating_sub(state.config.spawn_interval_step)
            .max(state.config.spawn_interval_floor);
        events.push(SurvivalEvent::PaceQuickened {
            spawn_interval_ms: state.spawn_interval.as_millis(),
        });
    }
}

/// Advance the boss cycle. A due time at or before the current tick enters
/// the alert immediately, so a non-positive delay never schedules into the
/// past.
pub fn update_boss(
    state: &mut SurvivalState,
    rng: &mut ChaCha8Rng,
    tick: Tick,
    events: &mut Vec<SurvivalEvent>,
) {
    match state.boss_phase {
        BossPhase::Scheduled { due_tick } if tick >= due_tick => {
            let alert = state.config.duration_to_ticks(state.config.boss_alert);
            state.boss_phase = BossPhase::Alerting {
                spawn_tick: tick + alert,
            };
            events.push(SurvivalEvent::BossAlert {
                wave: state.boss_wave,
            });
        }
        BossPhase::Alerting { spawn_tick } if tick >= spawn_tick => {
            let id = spawn_enemy_of_kind(state, rng, EnemyKind::Boss);
            state.world.boss = Some(id);
            state.boss_phase = BossPhase::Active { id };
            events.push(SurvivalEvent::BossSpawned {
                wave: state.boss_wave,
                id,
            });
        }
        _ => {}
    }
}

/// Regular spawning on the current cadence. Attempts keep their schedule
/// during a boss window but create nothing.
pub fn spawn_enemies(
    state: &mut SurvivalState,
    rng: &mut ChaCha8Rng,
    tick: Tick,
    events: &mut Vec<SurvivalEvent>,
) {
    if tick < state.next_spawn_tick {
        return;
    }
    state.next_spawn_tick = tick
        + state
            .config
            .duration_to_ticks(state.spawn_interval)
            .max(1);

    if state.boss_phase.wave_active() {
        return;
    }

    let kind = state.config.spawn_weights.roll(rng);
    let id = spawn_enemy_of_kind(state, rng, kind);
    events.push(SurvivalEvent::EnemySpawned { id, kind });
}

fn spawn_enemy_of_kind(
    state: &mut SurvivalState,
    rng: &mut ChaCha8Rng,
    kind: EnemyKind,
) -> EnemyId {
    let spec = state.config.spec(kind);
    let speed = roll_speed(rng, spec.speed_min, spec.speed_max);
    let enemy = Enemy {
        kind,
        hp: spec.max_hp,
        max_hp: spec.max_hp,
        x: state.config.spawn_x,
        y: spec.spawn_y,
        base_y: spec.spawn_y,
        bob_tick: 0,
        speed,
        attached: false,
    };
    state.world.enemies.insert(enemy)
}

fn roll_speed<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Move unattached enemies toward the structure and attach those that reach
/// their approach position. Airborne kinds bob around their spawn altitude,
/// with a tighter oscillation once attached. Frozen sessions skip movement
/// entirely, which also keeps freshly spawned enemies inert.
pub fn move_enemies(state: &mut SurvivalState, tick: Tick, events: &mut Vec<SurvivalEvent>) {
    if state.frozen(tick) {
        return;
    }

    let config = &state.config;
    let world = &mut state.world;
    let attacks = &mut state.attacks;

    let tick_hz = config.tick_hz as f32;
    let walk_bob = (
        config.bob_amplitude,
        config.duration_to_ticks(config.bob_period).max(1),
    );
    let attack_bob = (
        config.bob_attack_amplitude,
        config.duration_to_ticks(config.bob_attack_period).max(1),
    );

    for (id, enemy) in world.enemies.iter_mut() {
        let spec = config.spec(enemy.kind);

        if enemy.attached {
            if spec.airborne {
                enemy.bob_tick += 1;
                enemy.y = enemy.base_y + bob_offset(enemy.bob_tick, attack_bob);
            }
            continue;
        }

        enemy.x -= enemy.speed / tick_hz;
        if spec.airborne {
            enemy.bob_tick += 1;
            enemy.y = enemy.base_y + bob_offset(enemy.bob_tick, walk_bob);
        }

        if enemy.x <= spec.approach_x {
            enemy.x = spec.approach_x;
            enemy.attached = true;
            attacks.schedule(tick + config.duration_to_ticks(spec.attack_period), id);
            events.push(SurvivalEvent::EnemyAttached {
                id,
                kind: enemy.kind,
            });
        }
    }
}

fn bob_offset(bob_tick: u64, (amplitude, period): (f32, u64)) -> f32 {
    let phase = (bob_tick % period) as f32 / period as f32;
    amplitude * (std::f32::consts::TAU * phase).sin()
}

/// Land every attack hit that has come due. A hit whose owner is gone is a
/// stale entry and resolves to nothing; once the structure falls, remaining
/// hits this tick are dropped.
pub fn process_attacks(state: &mut SurvivalState, tick: Tick, events: &mut Vec<SurvivalEvent>) {
    for (due, id) in state.attacks.drain_due(tick) {
        if state.structure_hp <= 0 {
            break;
        }
        let Some(enemy) = state.world.enemies.get(id) else {
            continue;
        };
        if !enemy.attached {
            continue;
        }

        let spec = state.config.spec(enemy.kind);
        let amount = spec.attack_damage;
        let period = state.config.duration_to_ticks(spec.attack_period);

        state.structure_hp = (state.structure_hp - amount).max(0);
        state.attacks.schedule(due + period, id);
        events.push(SurvivalEvent::StructureDamaged {
            by: id,
            amount,
            hp: state.structure_hp,
        });
    }
}

/// Advance projectiles and drop the ones whose flight time is up.
pub fn move_projectiles(state: &mut SurvivalState, tick: Tick) {
    let expired: Vec<ProjectileId> = state
        .world
        .projectiles
        .iter()
        .filter(|(_, p)| p.expire_tick <= tick)
        .map(|(id, _)| id)
        .collect();
    for id in expired {
        state.world.projectiles.remove(id);
    }

    let step = state.config.px_per_tick(state.config.projectile_speed);
    for (_, projectile) in state.world.projectiles.iter_mut() {
        projectile.x += projectile.dir.0 * step;
        projectile.y += projectile.dir.1 * step;
    }
}

/// Test every live projectile against every live enemy's hitbox. A
/// projectile resolves against at most one enemy; an enemy absorbs at most
/// one projectile per tick. Kills award score, cancel the victim's attack
/// entries, and roll the boss cycle back to `Scheduled` if the victim was
/// the boss.
pub fn resolve_collisions(state: &mut SurvivalState, tick: Tick, events: &mut Vec<SurvivalEvent>) {
    let damage = state.config.projectile_damage * state.damage_multiplier(tick);
    let boss_respawn = state.config.duration_to_ticks(state.config.boss_interval);

    let proj_ids: Vec<ProjectileId> = state.world.projectiles.keys().collect();
    let enemy_ids: Vec<EnemyId> = state.world.enemies.keys().collect();
    let mut hit_this_tick: Vec<EnemyId> = Vec::new();

    for pid in proj_ids {
        let Some(projectile) = state.world.projectiles.get(pid) else {
            continue;
        };
        let (px, py) = (projectile.x, projectile.y);

        for &eid in &enemy_ids {
            if hit_this_tick.contains(&eid) {
                continue;
            }
            let Some(enemy) = state.world.enemies.get_mut(eid) else {
                continue;
            };

            let spec = state.config.spec(enemy.kind);
            let (hx, hy) = (
                enemy.x + spec.hitbox_offset.0,
                enemy.y + spec.hitbox_offset.1,
            );
            let (dx, dy) = (px - hx, py - hy);
            if dx * dx + dy * dy >= spec.hitbox_radius * spec.hitbox_radius {
                continue;
            }

            enemy.hp -= damage;
            let hp = enemy.hp;
            let kind = enemy.kind;
            let score = spec.score;

            state.shots_hit += 1;
            state.world.projectiles.remove(pid);
            hit_this_tick.push(eid);

            if hp <= 0 {
                state.world.enemies.remove(eid);
                state.attacks.cancel(eid);
                state.score += score;
                state.kills += 1;
                events.push(SurvivalEvent::EnemyKilled {
                    id: eid,
                    kind,
                    score,
                });

                if state.world.boss == Some(eid) {
                    state.world.boss = None;
                    let wave = state.boss_wave;
                    state.boss_wave += 1;
                    state.boss_phase = BossPhase::Scheduled {
                        due_tick: tick + boss_respawn,
                    };
                    events.push(SurvivalEvent::BossDefeated { wave });
                }
            } else {
                events.push(SurvivalEvent::EnemyHit { id: eid, hp });
            }

            break;
        }
    }
}

/// Detect the terminal condition and freeze the session. Idempotent: the
/// `over` flag gates every later `step`.
pub fn check_terminal(state: &mut SurvivalState, events: &mut Vec<SurvivalEvent>) {
    if state.over || state.structure_hp > 0 {
        return;
    }
    state.over = true;
    state.attacks.clear();
    events.push(SurvivalEvent::SessionEnded {
        score: state.score,
        kills: state.kills,
        survived_secs: state.survived_secs(),
    });
}
