//! Plays one scripted survival session headlessly and prints the event
//! stream: aims at the closest enemy on every cooldown, heals when the
//! structure is hurting, buys a damage boost for boss fights and a freeze
//! when the field gets crowded.

use sim_host::SessionHost;
use sim_survival::{BossPhase, SurvivalAction, SurvivalConfig, SurvivalEvent, SurvivalGame};
use std::time::{Duration, Instant};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let realtime = args.iter().any(|a| a == "--realtime" || a == "-r");
    let seed = args
        .iter()
        .position(|a| a == "--seed")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345u64);

    let config = SurvivalConfig::default();
    let tick_hz = config.tick_hz;
    let cooldown_ticks = config.duration_to_ticks(config.shot_cooldown).max(1);

    let mut host = SessionHost::<SurvivalGame>::new(config, seed, tick_hz);

    println!("=== Survival session (seed {}) ===", seed);

    let tick_duration = Duration::from_secs_f64(1.0 / tick_hz as f64);
    let max_ticks = tick_hz as u64 * 60 * 10;
    let mut all_events = Vec::new();
    let mut last_status = Instant::now();

    while host.current_tick() < max_ticks {
        let tick_start = Instant::now();

        let Some(events) = host.step_one_tick() else {
            break;
        };
        for event in &events {
            print_event(host.current_tick(), event);
        }
        all_events.extend(events);

        queue_player_input(&mut host, cooldown_ticks);

        if realtime {
            if last_status.elapsed() >= Duration::from_secs(1) {
                print_status(&host);
                last_status = Instant::now();
            }
            let elapsed = tick_start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            }
        }
    }

    println!("\n=== Session complete ===");
    let state = host.game().state();
    println!("Final tick: {}", host.current_tick());
    println!("Score: {}", state.score);
    println!("Kills: {}", state.kills);
    println!("Structure: {}/{}", state.structure_hp, state.config.structure_max_hp);
    println!("Survived: {}s", state.survived_secs());
    if let Some(report) = host.report() {
        println!(
            "Report: score={} kills={} accuracy={}/{} duration={}ms",
            report.score, report.kills, report.shots_hit, report.shots_fired, report.survived_ms
        );
    }
    print_event_summary(&all_events);
}

/// Decide this tick's input from the current state and queue it for the next
/// tick.
fn queue_player_input(host: &mut SessionHost<SurvivalGame>, cooldown_ticks: u64) {
    let tick = host.current_tick();
    let state = host.game().state();
    let config = &state.config;

    // Skills first: heal when hurt and affordable, boost for boss fights,
    // freeze when swamped.
    let action = if state.score >= config.heal_cost
        && state.structure_hp <= config.structure_max_hp / 2
    {
        Some(SurvivalAction::Heal)
    } else if state.score >= config.boost_cost
        && !state.boosted(tick)
        && matches!(state.boss_phase, BossPhase::Active { .. })
    {
        Some(SurvivalAction::DamageBoost)
    } else if state.score >= config.freeze_cost
        && !state.frozen(tick)
        && state.world.enemies.len() >= 6
    {
        Some(SurvivalAction::Freeze)
    } else if tick % cooldown_ticks == 0 {
        // Aim at the hitbox centre of the enemy closest to the structure.
        state
            .world
            .enemies
            .values()
            .min_by(|a, b| a.x.total_cmp(&b.x))
            .map(|enemy| {
                let spec = config.spec(enemy.kind);
                SurvivalAction::Shoot {
                    x: enemy.x + spec.hitbox_offset.0,
                    y: enemy.y + spec.hitbox_offset.1,
                }
            })
    } else {
        None
    };

    if let Some(action) = action {
        host.submit(action, tick + 1);
    }
}

fn print_event(tick: u64, event: &SurvivalEvent) {
    match event {
        SurvivalEvent::EnemySpawned { kind, .. } => {
            println!("[{:>6}] {} enemy spawned", tick, kind.name())
        }
        SurvivalEvent::EnemyAttached { kind, .. } => {
            println!("[{:>6}] {} enemy reached the structure", tick, kind.name())
        }
        SurvivalEvent::EnemyKilled { kind, score, .. } => {
            println!("[{:>6}] {} enemy killed (+{})", tick, kind.name(), score)
        }
        SurvivalEvent::StructureDamaged { amount, hp, .. } => {
            println!("[{:>6}] structure hit for {} ({} left)", tick, amount, hp)
        }
        SurvivalEvent::StructureHealed { amount, hp } => {
            println!("[{:>6}] structure healed {} ({} now)", tick, amount, hp)
        }
        SurvivalEvent::SkillActivated { skill } => {
            println!("[{:>6}] skill activated: {:?}", tick, skill)
        }
        SurvivalEvent::SkillExpired { skill } => {
            println!("[{:>6}] skill expired: {:?}", tick, skill)
        }
        SurvivalEvent::PaceQuickened { spawn_interval_ms } => {
            println!("[{:>6}] spawn interval now {}ms", tick, spawn_interval_ms)
        }
        SurvivalEvent::BossAlert { wave } => {
            println!("[{:>6}] === BOSS WAVE {} INCOMING ===", tick, wave)
        }
        SurvivalEvent::BossSpawned { wave, .. } => {
            println!("[{:>6}] === boss {} on the field ===", tick, wave)
        }
        SurvivalEvent::BossDefeated { wave } => {
            println!("[{:>6}] === boss {} defeated ===", tick, wave)
        }
        SurvivalEvent::SessionEnded {
            score,
            kills,
            survived_secs,
        } => println!(
            "[{:>6}] structure destroyed: score {}, {} kills, {}s survived",
            tick, score, kills, survived_secs
        ),
        SurvivalEvent::EnemyHit { .. }
        | SurvivalEvent::ShotFired { .. }
        | SurvivalEvent::ShotOnCooldown
        | SurvivalEvent::SkillRejected { .. } => {}
    }
}

fn print_status(host: &SessionHost<SurvivalGame>) {
    let state = host.game().state();
    println!(
        "  [{:>4}s] score {}, kills {}, hp {}/{}, enemies {}, boss wave {}",
        state.survived_secs(),
        state.score,
        state.kills,
        state.structure_hp,
        state.config.structure_max_hp,
        state.world.enemies.len(),
        state.boss_wave,
    );
}

fn print_event_summary(events: &[SurvivalEvent]) {
    let mut spawned = 0;
    let mut killed = 0;
    let mut shots = 0;
    let mut blocked_shots = 0;
    let mut skills = 0;
    let mut rejected_skills = 0;
    let mut bosses_defeated = 0;

    for event in events {
        match event {
            SurvivalEvent::EnemySpawned { .. } | SurvivalEvent::BossSpawned { .. } => spawned += 1,
            SurvivalEvent::EnemyKilled { .. } => killed += 1,
            SurvivalEvent::ShotFired { .. } => shots += 1,
            SurvivalEvent::ShotOnCooldown => blocked_shots += 1,
            SurvivalEvent::SkillActivated { .. } => skills += 1,
            SurvivalEvent::SkillRejected { .. } => rejected_skills += 1,
            SurvivalEvent::BossDefeated { .. } => bosses_defeated += 1,
            _ => {}
        }
    }

    println!("\n=== Event summary ===");
    println!("Enemies spawned: {}", spawned);
    println!("Enemies killed: {}", killed);
    println!("Shots fired: {} ({} blocked by cooldown)", shots, blocked_shots);
    println!("Skills used: {} ({} rejected)", skills, rejected_skills);
    println!("Bosses defeated: {}", bosses_defeated);
}
