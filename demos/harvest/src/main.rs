//! harvest: scripted quarry demo for the wear simulation core.
//!
//! Three miners work a row of ore blocks for 40 simulated seconds:
//!
//! - `ActorId(1)` holds a fresh iron pickaxe.
//! - `ActorId(2)` holds a badly worn stone pickaxe and carries a bonus tier,
//!   so blocks take longer but the pickaxe wears slower.
//! - `ActorId(3)` swaps to a shovel halfway through a block, aborting it,
//!   and then digs ore with the wrong tool.
//!
//! Every finished block applies one point of base wear through the engine;
//! a tool that breaks drops salvage from its tier's pool.
//! Run with `RUST_LOG=debug` to see the action lifecycle.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use tracing::info;

use wear_action::{ActionHost, ProgressStage};
use wear_core::{ActorId, Category, EquipSlot, ItemState, TargetId, TargetInfo, ToolClass, ToolSnapshot};
use wear_durability::WearOutcome;
use wear_sim::{EngineBuilder, EngineObserver, PassReport, WearConfig, WearEngine};

// ── Constants ─────────────────────────────────────────────────────────────────

const PASSES:          u64 = 400; // 2 ticks per pass → 40 s
const SWAP_AT_PASS:    u64 = 6;
const BLOCKS_PER_ROW:  u64 = 1_000;

const CONFIG_YAML: &str = r#"
seed: 42
bonus_tiers:
  - { tag: durability.bonus.gold, factor: 0.5 }
wrong_tool:
  blocks: { enabled: true, multiplier: 2.0 }
mining:
  mode: delay
  duration_curve: { "100": 1.0, "50": 1.25, "20": 1.75, "5": 2.5 }
  per_item_duration_curves:
    "STONE_*": { "100": 1.1, "30": 2.0 }
weather:
  tool_prefixes: [IRON, STONE]
low_alert:
  threshold_percent: 10
  cooldown_seconds: 5
salvage:
  per_tier: { STONE: [COBBLESTONE, FLINT], IRON: [IRON_NUGGET] }
"#;

// ── Quarry (the host) ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Quarry {
    present: HashSet<ActorId>,
    aiming:  HashMap<ActorId, TargetInfo>,
    tools:   HashMap<ActorId, ItemState>,
    tags:    HashMap<ActorId, Vec<String>>,
    mined:   HashMap<ActorId, u64>,
}

impl Quarry {
    fn join(&mut self, actor: ActorId, tool: ItemState, tags: &[&str]) {
        self.present.insert(actor);
        self.tools.insert(actor, tool);
        self.tags.insert(actor, tags.iter().map(|t| t.to_string()).collect());
        self.aim_next(actor);
    }

    /// Point `actor` at the next untouched ore block in its row.
    fn aim_next(&mut self, actor: ActorId) -> TargetInfo {
        let done = self.mined.get(&actor).copied().unwrap_or(0);
        let id = TargetId(actor.0 as u64 * BLOCKS_PER_ROW + done);
        let target = TargetInfo::new(id, "IRON_ORE", Some(ToolClass::Pickaxe));
        self.aiming.insert(actor, target.clone());
        target
    }
}

impl ActionHost for Quarry {
    fn actor_present(&self, actor: ActorId) -> bool {
        self.present.contains(&actor)
    }

    fn still_targets(&self, actor: ActorId, target: TargetId) -> bool {
        self.aiming.get(&actor).is_some_and(|t| t.id == target)
    }

    fn held_tool(&self, actor: ActorId) -> Option<Category> {
        self.tools.get(&actor).map(|t| t.category.clone())
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints overlay changes and queues finished blocks for the main loop.
#[derive(Default)]
struct QuarryLog {
    finished: Vec<(ActorId, TargetInfo)>,
    aborted:  usize,
}

impl EngineObserver for QuarryLog {
    fn finalize_action(&mut self, actor: ActorId, target: &TargetInfo, tool: &ToolSnapshot) {
        info!(%actor, target = %target.id, tool = %tool.category, wear = %tool.wear, "block harvested");
        self.finished.push((actor, target.clone()));
    }

    fn set_progress_stage(&mut self, actor: ActorId, target: TargetId, stage: ProgressStage) {
        tracing::debug!(%actor, %target, %stage, "overlay");
    }

    fn on_pass_end(&mut self, report: &PassReport) {
        self.aborted += report.aborted;
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let config = WearConfig::from_yaml_str(CONFIG_YAML)?;
    let mut engine = EngineBuilder::new(config).build()?;

    let alex = ActorId(1);
    let sam = ActorId(2);
    let jo = ActorId(3);

    let mut quarry = Quarry::default();
    quarry.join(alex, ItemState::new("IRON_PICKAXE", 250), &[]);
    quarry.join(sam, ItemState::new("STONE_PICKAXE", 131).with_damage(110), &["durability.bonus.gold"]);
    quarry.join(jo, ItemState::new("IRON_PICKAXE", 250), &[]);

    let mut log = QuarryLog::default();
    for actor in [alex, sam, jo] {
        begin(&mut engine, &quarry, actor, &mut log);
    }

    for pass in 1..=PASSES {
        if pass == SWAP_AT_PASS {
            info!(actor = %jo, "switching to a shovel mid-block");
            quarry.tools.insert(jo, ItemState::new("IRON_SHOVEL", 250));
        }

        engine.tick_pulse(&quarry, &mut log);

        for (actor, target) in std::mem::take(&mut log.finished) {
            harvest(&mut engine, &mut quarry, actor, &target);
            begin(&mut engine, &quarry, actor, &mut log);
        }

        // The aborted block is never re-begun by the host; start the next one.
        if pass == SWAP_AT_PASS {
            begin(&mut engine, &quarry, jo, &mut log);
        }

        if engine.weather_pulse() {
            let mut worn = 0;
            for tool in quarry.tools.values_mut() {
                worn += engine.weather_wear([(EquipSlot::MainHand, tool)]);
            }
            info!(tick = %engine.now(), worn, "storm passed over the quarry");
        }
    }

    let cleared = engine.shutdown(&mut log);

    // ── Summary ───────────────────────────────────────────────────────────
    println!("\n=== Quarry summary after {}s ===", engine.now().0 / 20);
    for actor in [alex, sam, jo] {
        let mined = quarry.mined.get(&actor).copied().unwrap_or(0);
        match quarry.tools.get(&actor) {
            Some(tool) => println!(
                "{actor}: {mined:>3} blocks  {:<14} {:>3}/{:<3} left ({})",
                tool.category.as_str(),
                tool.remaining(),
                tool.max_wear,
                tool.remaining_percent(),
            ),
            None => println!("{actor}: {mined:>3} blocks  (tool broken)"),
        }
    }
    println!("aborted actions: {}  cleared at shutdown: {cleared}", log.aborted);
    Ok(())
}

fn begin(engine: &mut WearEngine, quarry: &Quarry, actor: ActorId, log: &mut QuarryLog) {
    let (Some(target), Some(tool)) = (quarry.aiming.get(&actor), quarry.tools.get(&actor)) else {
        return;
    };
    engine.begin_action(quarry, actor, target.clone(), tool, log);
}

/// Break the block, wear the tool, move on.
fn harvest(engine: &mut WearEngine, quarry: &mut Quarry, actor: ActorId, target: &TargetInfo) {
    let Some(tool) = quarry.tools.get(&actor).cloned() else {
        return;
    };
    engine.note_block_break(actor, &tool.category, target);

    let tags = quarry.tags.get(&actor).cloned().unwrap_or_default();
    let outcome = engine.wear_event(actor, &tags, None, &tool, 1);
    if let Some(held) = quarry.tools.get_mut(&actor) {
        outcome.apply_to(held);
    }
    match outcome {
        WearOutcome::Applied { breaks: true, ref salvage, .. } => {
            let drops: Vec<&str> = salvage.iter().map(|c| c.as_str()).collect();
            info!(%actor, tool = %tool.category, ?drops, "tool broke");
            quarry.tools.remove(&actor);
        }
        WearOutcome::Applied { low_alert: true, .. } => {
            info!(%actor, tool = %tool.category, "tool is nearly worn out");
        }
        _ => {}
    }

    *quarry.mined.entry(actor).or_default() += 1;
    quarry.aim_next(actor);
}
