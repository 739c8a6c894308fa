use std::io::Write;
use std::path::Path;

use inferno_core::{EngineSignal, Settings, SettingsExt, SignalHandler, Tile};

use crate::context::CliContext;
use crate::error::CliError;
use crate::script::{Script, ScriptEvent, ScriptTick};

pub fn load(path: &str, ctx: &mut CliContext) -> Result<(), CliError> {
    let script = Script::load(Path::new(path))?;
    println!("loaded {} ticks from {}", script.ticks.len(), path);
    ctx.start_script(script);
    Ok(())
}

pub fn step(count: usize, ctx: &mut CliContext) -> Result<(), CliError> {
    if !ctx.has_script() {
        return Err(CliError::NoScript);
    }
    for _ in 0..count {
        let Some(tick) = ctx.next_tick() else {
            println!("end of script");
            ctx.printer.on_encounter_end();
            break;
        };
        replay_tick(&tick, ctx);
    }
    Ok(())
}

pub fn run(ctx: &mut CliContext) -> Result<(), CliError> {
    let remaining = ctx.remaining();
    step(remaining.max(1), ctx)
}

/// Deliver a tick's events, then the tick itself
fn replay_tick(tick: &ScriptTick, ctx: &mut CliContext) {
    for event in &tick.events {
        let signals: Vec<EngineSignal> = match event {
            ScriptEvent::Spawn { actor, npc_id, x, y } => {
                ctx.engine.on_spawn(*actor, *npc_id, Tile::new(*x, *y))
            }
            ScriptEvent::Despawn { actor } => ctx.engine.on_despawn(*actor),
            ScriptEvent::Animation { actor, animation } => {
                ctx.engine.on_animation(*actor, *animation)
            }
            ScriptEvent::Chat { message } => ctx.engine.on_chat_message(message),
            ScriptEvent::Click { x, y } => ctx.engine.on_tile_clicked(*x, *y).into_iter().collect(),
            ScriptEvent::Leave => {
                ctx.engine.reset();
                ctx.printer.on_encounter_end();
                Vec::new()
            }
        };
        ctx.printer.handle_signals(&signals, Some(ctx.engine.snapshot()));
    }

    let signals = ctx.engine.on_tick(&tick.world());
    ctx.player = Some(tick.player);
    ctx.printer.handle_signals(&signals, Some(ctx.engine.snapshot()));
}

pub fn status(json: bool, ctx: &CliContext) -> Result<(), CliError> {
    let snapshot = ctx.engine.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    println!("tick {}  wave {}  next {}", snapshot.tick, snapshot.wave, snapshot.next_wave);
    println!("recommendation: {}", snapshot.recommendation);
    if let Some(closest) = snapshot.closest_attack {
        println!("closest attack: {:?} in {} ticks", closest.kind, closest.tick);
    }
    for npc in ctx.engine.tracker().npcs() {
        println!(
            "  {:<12} {:>4}  ({}, {})  clock {:>3}  {:?}",
            npc.npc_type.name(),
            npc.actor,
            npc.position.x,
            npc.position.y,
            npc.ticks_until_attack,
            npc.next_attack,
        );
    }
    if !snapshot.simultaneous_groups.is_empty() {
        println!("simultaneous groups: {}", snapshot.simultaneous_groups.len());
    }
    for warning in &snapshot.dig_warnings {
        let level = if warning.danger { "DIG" } else { "dig" };
        println!("  {level} {} idle {}", warning.actor, warning.idle_ticks);
    }
    if let Some(timer) = ctx.engine.tracker().spawn_timer() {
        println!("spawn timer: {} ticks", timer.ticks_remaining());
    }
    Ok(())
}

/// Print the safe-tile classes around the player, north up.
/// Digits are exposure bits (1 melee, 2 ranged, 4 magic), `#` is unclassified.
pub fn map(ctx: &CliContext) -> Result<(), CliError> {
    let Some(player) = ctx.player else {
        return Err(CliError::NoScript);
    };
    let snapshot = ctx.engine.snapshot();
    let radius = (ctx.engine.settings().safespots_check_size / 2) as i32;

    let mut out = String::new();
    for dy in (-radius..=radius).rev() {
        for dx in -radius..=radius {
            let tile = player.offset(dx, dy);
            let cell = match snapshot.safe_tiles.get(tile) {
                _ if tile == player => 'P',
                Some(mask) => char::from(b'0' + mask.bits()),
                None => '#',
            };
            out.push(cell);
        }
        out.push('\n');
    }
    print!("{out}");
    Ok(())
}

/// Show the active settings, or load new ones from a TOML file first
pub fn show_settings(path: Option<&str>, ctx: &mut CliContext) -> Result<(), CliError> {
    if let Some(path) = path {
        let settings = Settings::load_from_path(Path::new(path))?;
        ctx.engine.set_settings(settings.clone());
        ctx.settings = settings;
        println!("settings loaded from {path}");
    }
    match toml::to_string_pretty(ctx.engine.settings()) {
        Ok(text) => println!("{text}"),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

pub fn save_settings(ctx: &CliContext) -> Result<(), CliError> {
    ctx.settings.save()?;
    println!("settings saved");
    Ok(())
}

pub fn exit() {
    let _ = write!(std::io::stdout(), "quitting...");
    let _ = std::io::stdout().flush();
}
