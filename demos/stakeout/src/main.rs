//! stakeout — end-to-end demo for the pursuit perception framework.
//!
//! Four guards watch a floodlit container yard.  An intruder sneaks in along
//! the hedge, breaks the site-office window at 30 s, fires a shot at the gate
//! at 48 s, then hides behind the containers and waits for the heat to die
//! down.  Guards walk towards whatever their intents point at; police units
//! requested by the wanted level arrive at the gate and join the search.
//!
//! Writes `agent_snapshots.csv` and `tick_summaries.csv` to `--out`.

mod yard;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pursuit_agent::AgentStoreBuilder;
use pursuit_behavior::{Intent, IntentLog};
use pursuit_core::geo::{horizontal, horizontal_direction};
use pursuit_core::{AgentId, SimConfig, Vec3};
use pursuit_output::{CsvWriter, SimOutputObserver};
use pursuit_senses::{NoiseEmitter, NoiseEvent, NoiseKind};
use pursuit_sim::{Sim, SimBuilder, SimObserver, WantedCallbacks, WantedPhase};
use pursuit_world::{BlockWorld, PlayerState};

use yard::{EYE_HEIGHT, GATE, OFFICE_WINDOW, build_yard, guard_posts, intruder_at, is_sprinting};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default run length: 120 s at the default 5 Hz.
const DEFAULT_TICKS: u64 = 600;
/// Guard walking speed, m/s.
const GUARD_SPEED:   f32 = 3.0;
/// The dispatcher refuses further units beyond this many.
const MAX_UNITS:     u32 = 12;
/// Footstep noises are emitted once per this many ticks.
const STEP_EVERY:    u64 = 5;

const GLASS_AT_SECS: f32 = 30.0;
const SHOT_AT_SECS:  f32 = 48.0;

type Yard = Sim<IntentLog, BlockWorld, Dispatch>;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "stakeout")]
#[command(about = "Scripted pursuit run over a floodlit container yard")]
struct Args {
    /// JSON `SimConfig`; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the CSV trace.
    #[arg(long, default_value = "output/stakeout")]
    out: PathBuf,

    /// Override the config's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the config's tick count.
    #[arg(long)]
    ticks: Option<u64>,
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Answers the wanted level's reinforcement requests.  Spawned units are
/// queued here and inserted into the store after the tick.
#[derive(Default)]
struct Dispatch {
    next_unit:   u32,
    arriving:    Vec<(AgentId, Vec3)>,
    released:    Vec<AgentId>,
    helicopters: usize,
    roadblocks:  usize,
}

impl Dispatch {
    fn dispatch(&mut self, near: Vec3) -> Option<AgentId> {
        if self.next_unit >= MAX_UNITS {
            return None;
        }
        let id = AgentId(100 + self.next_unit);
        self.next_unit += 1;
        self.arriving.push((id, near));
        Some(id)
    }
}

impl WantedCallbacks for Dispatch {
    fn on_phase_change(&mut self, prev: WantedPhase, next: WantedPhase) {
        println!("  wanted: {prev} → {next}");
    }

    fn spawn_police_unit(&mut self, near: Vec3) -> Option<AgentId> {
        self.dispatch(near)
    }

    fn spawn_swat_unit(&mut self, near: Vec3) -> Option<AgentId> {
        self.dispatch(near)
    }

    fn spawn_helicopter(&mut self, over: Vec3) {
        self.helicopters += 1;
        info!(?over, "helicopter overhead");
    }

    fn create_roadblock(&mut self, position: Vec3, facing: Vec3) {
        self.roadblocks += 1;
        info!(?position, ?facing, "roadblock set up");
    }

    fn release_units(&mut self, units: &[AgentId]) {
        self.released.extend_from_slice(units);
    }
}

// ── Per-tick host work ────────────────────────────────────────────────────────

/// Insert units that arrived this tick at the gate; remove released ones.
fn reinforce(sim: &mut Yard, homes: &mut HashMap<AgentId, Vec3>) -> Result<()> {
    let dispatch = sim.wanted_mut().callbacks_mut();
    let arriving = std::mem::take(&mut dispatch.arriving);
    let released = std::mem::take(&mut dispatch.released);

    for (i, (id, near)) in arriving.into_iter().enumerate() {
        let at = GATE + Vec3::new(i as f32 * 1.5 - 3.0, EYE_HEIGHT, -1.0);
        let look = horizontal_direction(near - at).unwrap_or(Vec3::NEG_Z);
        sim.agents_mut().spawn(id, at, look, IntentLog::new())?;
        homes.insert(id, at);
    }
    for id in released {
        sim.agents_mut().remove(id)?;
        homes.remove(&id);
    }
    Ok(())
}

/// Walk every agent towards the point of its latest intent.
fn move_guards(sim: &mut Yard, homes: &HashMap<AgentId, Vec3>, goals: &mut HashMap<AgentId, Vec3>, dt: f32) {
    for agent in sim.agents_mut().iter_mut() {
        for intent in agent.behavior.drain() {
            match intent {
                Intent::Retreat => {
                    if let Some(&home) = homes.get(&agent.id) {
                        goals.insert(agent.id, home);
                    }
                }
                Intent::TakeCover => {
                    goals.remove(&agent.id);
                }
                Intent::LookAt(p) => {
                    if let Some(dir) = horizontal_direction(p - agent.position) {
                        agent.look_dir = dir;
                    }
                }
                other => {
                    if let Some(p) = other.point() {
                        goals.insert(agent.id, horizontal(p) + Vec3::Y * EYE_HEIGHT);
                    }
                }
            }
        }

        let Some(&goal) = goals.get(&agent.id) else { continue };
        let to_goal = goal - agent.position;
        let Some(dir) = horizontal_direction(to_goal) else {
            goals.remove(&agent.id);
            continue;
        };
        let stride = (GUARD_SPEED * dt).min(horizontal(to_goal).length());
        agent.position += dir * stride;
        agent.look_dir = dir;
    }
}

/// Footsteps while moving, louder when sprinting.
fn footsteps(emitter: &NoiseEmitter, player: &PlayerState, now: f64) -> Result<()> {
    if player.velocity.length_squared() < 1e-4 {
        return Ok(());
    }
    let kind = if is_sprinting(player) {
        NoiseKind::Sprint
    } else if player.crouching {
        NoiseKind::CrouchWalk
    } else {
        NoiseKind::Walk
    };
    emitter.emit(NoiseEvent::new(kind, player.position, now))?;
    Ok(())
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig { total_ticks: DEFAULT_TICKS, ..SimConfig::default() },
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        config.total_ticks = ticks;
    }
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    println!("=== stakeout — pursuit perception demo ===");
    println!(
        "Ticks: {}  |  Tick: {:.2} s  |  Seed: {}",
        config.total_ticks, config.tick_duration_secs, config.seed
    );
    println!();

    // 1. World.
    let world = build_yard().context("building the yard")?;
    println!("Yard: {} walls, {} light zones", world.wall_count(), world.light_zones().len());

    // 2. Guards.
    let mut homes = HashMap::new();
    let mut builder = AgentStoreBuilder::new(config.seed, config.sensor);
    for (i, (post, look)) in guard_posts().into_iter().enumerate() {
        let id = AgentId(i as u32);
        let eye = post + Vec3::Y * EYE_HEIGHT;
        homes.insert(id, eye);
        builder = builder.agent(id, eye, look, IntentLog::new());
    }
    let agents = builder.build()?;

    // 3. Sim and output.
    let end = config.end_tick();
    let dt = config.tick_duration_secs;
    let mut sim = SimBuilder::new(config, world, Dispatch::default())
        .agents(agents)
        .build()?;
    let emitter = sim.emitter();

    let writer = CsvWriter::new(&args.out)
        .with_context(|| format!("creating output in {}", args.out.display()))?;
    let mut obs = SimOutputObserver::new(writer);

    // 4. Run.
    let mut goals = HashMap::new();
    let (mut glass_broken, mut shot_fired) = (false, false);
    let t0 = Instant::now();

    while sim.current_tick() < end {
        let now = sim.now_secs();
        let t = now as f32;
        let player = intruder_at(t);

        if !glass_broken && t >= GLASS_AT_SECS {
            glass_broken = true;
            emitter.emit(NoiseEvent::new(NoiseKind::GlassBreak, OFFICE_WINDOW, now))?;
            sim.add_wanted_event(1, OFFICE_WINDOW);
        }
        if !shot_fired && t >= SHOT_AT_SECS {
            shot_fired = true;
            emitter.emit(NoiseEvent::new(NoiseKind::Gunshot, GATE, now))?;
            sim.add_wanted_event(2, GATE);
        }
        if sim.current_tick().0.is_multiple_of(STEP_EVERY) {
            footsteps(&emitter, &player, now)?;
        }

        sim.step(&player, &mut obs)?;
        reinforce(&mut sim, &mut homes)?;
        move_guards(&mut sim, &homes, &mut goals, dt);
    }
    obs.on_sim_end(sim.current_tick());
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        warn!(error = %e, "trace incomplete");
    }

    // 5. Summary.
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "Final wanted level: {} star(s), phase {}",
        sim.stars(),
        sim.phase()
    );
    let dispatch = sim.wanted().callbacks();
    println!(
        "Units dispatched: {}  |  helicopters: {}  |  roadblocks: {}",
        dispatch.next_unit, dispatch.helicopters, dispatch.roadblocks
    );
    println!("Trace written to {}", args.out.display());
    println!();

    println!("{:<8} {:<10} {:>9}  {:<24}", "Agent", "Alert", "Aware", "Last known");
    println!("{}", "-".repeat(56));
    for agent in sim.agents() {
        let lkp = match agent.sensor.last_known() {
            Some(l) => format!("({:.1}, {:.1}) @ {:.1}s", l.position.x, l.position.z, l.time),
            None => "-".to_owned(),
        };
        println!(
            "{:<8} {:<10} {:>9.1}  {:<24}",
            agent.id.to_string(),
            agent.sensor.alert_state().as_str(),
            agent.sensor.awareness(),
            lkp,
        );
    }

    Ok(())
}
