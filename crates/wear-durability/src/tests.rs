//! Unit tests for wear-durability.

use std::collections::HashSet;

use wear_core::{ActorId, Category, EquipSlot, ItemLabel, ItemState, Percent, TargetId, TargetInfo, Tick, ToolClass, WearRng};
use wear_curve::{CategoryCurveIndex, CategoryMatcher, Curve};

use crate::{
    BonusTier, DegradationCurves, DurabilityService, FatigueStyle, MendingPolicy, MiningMode,
    MultiplierResolver, NoTags, SalvagePolicy, SalvageRule, WeatherWear, WearAccumulator, WearOutcome, WearPolicy,
    WearRequest,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const ALEX: ActorId = ActorId(1);

fn req(base: u32, now: u64) -> WearRequest<'static, NoTags> {
    WearRequest { actor: ALEX, tags: &NoTags, context: None, base, now: Tick(now) }
}

fn service(policy: WearPolicy) -> DurabilityService {
    DurabilityService::new(MultiplierResolver::default(), policy)
}

fn stone() -> TargetInfo {
    TargetInfo::new(TargetId(1), "STONE", Some(ToolClass::Pickaxe))
}

// ── MultiplierResolver ────────────────────────────────────────────────────────

#[cfg(test)]
mod multiplier {
    use super::*;

    fn configured() -> MultiplierResolver {
        let mut categories = CategoryMatcher::new();
        categories.insert_prefix("DIAMOND_", 0.5);
        MultiplierResolver::new(2.0)
            .with_categories(categories)
            .with_context("nether", 1.5)
            .with_tiers(vec![BonusTier::new("vip", 0.5), BonusTier::new("mvp", 0.25)])
    }

    #[test]
    fn unconfigured_is_identity() {
        let r = MultiplierResolver::default();
        assert_eq!(r.resolve(&NoTags, &"IRON_PICKAXE".into(), None), 1.0);
        assert_eq!(r.resolve(&NoTags, &"ELYTRA".into(), Some("overworld")), 1.0);
    }

    #[test]
    fn stages_multiply() {
        let r = configured();
        let tags = ["mvp", "vip"];
        assert_eq!(r.resolve(&tags[..], &"DIAMOND_SWORD".into(), Some("nether")), 0.375);
        assert_eq!(r.resolve(&NoTags, &"IRON_SWORD".into(), None), 2.0);
        assert_eq!(r.resolve(&NoTags, &"IRON_SWORD".into(), Some("end")), 2.0);
    }

    #[test]
    fn first_declared_tier_wins() {
        let r = configured();
        let tags: HashSet<String> = ["mvp".to_string(), "vip".to_string()].into_iter().collect();
        let b = r.breakdown(&tags, &"IRON_SWORD".into(), None);
        assert_eq!(b.tier.as_deref(), Some("vip"));
        assert_eq!(b.bonus, 0.5);

        let only_mvp = vec!["mvp".to_string()];
        assert_eq!(r.resolve(&only_mvp, &"IRON_SWORD".into(), None), 0.5);
    }

    #[test]
    fn special_default_then_override() {
        let r = MultiplierResolver::new(1.0).with_special_default("ELYTRA", 3.0);
        assert_eq!(r.resolve(&NoTags, &"ELYTRA".into(), None), 3.0);

        let mut categories = CategoryMatcher::new();
        categories.insert_exact("ELYTRA", 0.5);
        let r = r.with_categories(categories);
        assert_eq!(r.resolve(&NoTags, &"ELYTRA".into(), None), 0.5);
    }
}

// ── WearAccumulator ───────────────────────────────────────────────────────────

#[cfg(test)]
mod accumulator {
    use super::*;

    #[test]
    fn mean_matches_expectation() {
        let mut rng = WearRng::new(42);
        let trials = 100_000;
        let total: u64 = (0..trials).map(|_| WearAccumulator::apply(1, 0.3, &mut rng) as u64).sum();
        let mean = total as f64 / trials as f64;
        assert!((mean - 0.3).abs() < 0.01, "mean = {mean}");
    }

    #[test]
    fn whole_products_are_exact() {
        let mut rng = WearRng::new(1);
        for _ in 0..100 {
            assert_eq!(WearAccumulator::apply(3, 2.0, &mut rng), 6);
        }
    }

    #[test]
    fn fractional_products_round_either_way() {
        let mut rng = WearRng::new(7);
        let seen: HashSet<u32> = (0..1_000).map(|_| WearAccumulator::apply(5, 1.5, &mut rng)).collect();
        assert_eq!(seen, [7, 8].into_iter().collect());
    }

    #[test]
    fn non_positive_factor_is_zero() {
        let mut rng = WearRng::new(0);
        assert_eq!(WearAccumulator::apply(10, 0.0, &mut rng), 0);
        assert_eq!(WearAccumulator::apply(10, -1.0, &mut rng), 0);
        assert_eq!(WearAccumulator::apply(10, f64::NAN, &mut rng), 0);
        assert_eq!(WearAccumulator::apply(0, 5.0, &mut rng), 0);
    }
}

// ── DurabilityService ─────────────────────────────────────────────────────────

#[cfg(test)]
mod service {
    use super::*;

    #[test]
    fn items_without_wear_skipped() {
        let mut s = service(WearPolicy::default());
        let mut rng = WearRng::new(0);
        let item = ItemState::new("STICK", 0);
        assert_eq!(s.wear_event(&req(1, 0), &item, &mut rng), WearOutcome::Skipped);
    }

    #[test]
    fn armor_excluded_when_configured() {
        let mut s = service(WearPolicy { include_armor: false, ..WearPolicy::default() });
        let mut rng = WearRng::new(0);
        let helmet = ItemState::new("IRON_HELMET", 165);
        assert_eq!(s.wear_event(&req(1, 0), &helmet, &mut rng), WearOutcome::Skipped);
    }

    #[test]
    fn zero_multiplier_negates() {
        let mut s = DurabilityService::new(MultiplierResolver::new(0.0), WearPolicy::default());
        let mut rng = WearRng::new(0);
        let pick = ItemState::new("IRON_PICKAXE", 250);
        assert_eq!(s.wear_event(&req(5, 0), &pick, &mut rng), WearOutcome::Negated);
    }

    #[test]
    fn wrong_tool_block_mark_consumed_once() {
        let mut s = service(WearPolicy { wrong_tool_blocks: Some(2.0), ..WearPolicy::default() });
        let mut rng = WearRng::new(0);
        let shovel = ItemState::new("IRON_SHOVEL", 250);

        s.note_block_break(ALEX, &shovel.category, &stone());
        assert_eq!(s.wear_event(&req(1, 0), &shovel, &mut rng).delta(), 2);
        assert_eq!(s.wear_event(&req(1, 0), &shovel, &mut rng).delta(), 1);
    }

    #[test]
    fn matching_tool_not_marked() {
        let mut s = service(WearPolicy { wrong_tool_blocks: Some(2.0), ..WearPolicy::default() });
        let mut rng = WearRng::new(0);
        let pick = ItemState::new("IRON_PICKAXE", 250);

        s.note_block_break(ALEX, &pick.category, &stone());
        assert_eq!(s.wear_event(&req(1, 0), &pick, &mut rng).delta(), 1);
    }

    #[test]
    fn non_weapon_hit_marked() {
        let mut s = service(WearPolicy { wrong_tool_combat: Some(3.0), ..WearPolicy::default() });
        let mut rng = WearRng::new(0);
        let hoe = ItemState::new("IRON_HOE", 250);

        s.note_hit(ALEX, &hoe.category);
        assert_eq!(s.wear_event(&req(1, 0), &hoe, &mut rng).delta(), 3);

        s.note_hit(ALEX, &Category::new("IRON_SWORD"));
        assert_eq!(s.wear_event(&req(1, 0), &hoe, &mut rng).delta(), 1);
    }

    #[test]
    fn auto_protect_holds_last_point() {
        let mut s = service(WearPolicy { auto_protect: true, ..WearPolicy::default() });
        let mut rng = WearRng::new(0);
        let mut pick = ItemState::new("IRON_PICKAXE", 10).with_damage(9);

        let outcome = s.wear_event(&req(1, 0), &pick, &mut rng);
        assert_eq!(outcome, WearOutcome::Protected { salvage: vec![] });
        assert_eq!(outcome.delta(), 0);

        outcome.apply_to(&mut pick);
        assert_eq!(pick.damage, 9);
        assert!(pick.broken);
        assert!(!DurabilityService::is_usable(&pick));
    }

    #[test]
    fn unprotected_item_breaks() {
        let mut s = service(WearPolicy::default());
        let mut rng = WearRng::new(0);
        let pick = ItemState::new("IRON_PICKAXE", 10).with_damage(9);
        assert_eq!(
            s.wear_event(&req(1, 0), &pick, &mut rng),
            WearOutcome::Applied { delta: 1, breaks: true, low_alert: false, salvage: vec![] },
        );
    }

    #[test]
    fn low_alert_respects_threshold_and_cooldown() {
        let mut s = service(WearPolicy::default());
        let mut rng = WearRng::new(0);
        let healthy = ItemState::new("IRON_PICKAXE", 100).with_damage(90);
        let worn = ItemState::new("IRON_PICKAXE", 100).with_damage(95);

        let alert = |o: WearOutcome| matches!(o, WearOutcome::Applied { low_alert: true, .. });
        assert!(!alert(s.wear_event(&req(1, 0), &healthy, &mut rng)));
        assert!(alert(s.wear_event(&req(1, 0), &worn, &mut rng)));
        assert!(!alert(s.wear_event(&req(1, 10), &worn, &mut rng)));
        assert!(alert(s.wear_event(&req(1, 200), &worn, &mut rng)));

        s.set_alert_opt_out(ALEX, true);
        assert!(!s.alerts_enabled_for(ALEX));
        assert!(!alert(s.wear_event(&req(1, 1_000), &worn, &mut rng)));
    }

    #[test]
    fn forget_actor_drops_marks() {
        let mut s = service(WearPolicy { wrong_tool_blocks: Some(2.0), ..WearPolicy::default() });
        let mut rng = WearRng::new(0);
        let shovel = ItemState::new("IRON_SHOVEL", 250);

        s.note_block_break(ALEX, &shovel.category, &stone());
        s.forget_actor(ALEX);
        assert_eq!(s.wear_event(&req(1, 0), &shovel, &mut rng).delta(), 1);
    }

    #[test]
    fn command_helpers() {
        let protecting = service(WearPolicy { auto_protect: true, ..WearPolicy::default() });
        let mut item = ItemState::new("IRON_AXE", 10);

        protecting.take_durability(&mut item, 20);
        assert_eq!((item.damage, item.broken), (9, true));

        DurabilityService::add_durability(&mut item, 4);
        assert_eq!((item.damage, item.broken), (5, false));

        DurabilityService::set_remaining(&mut item, 3);
        assert_eq!(item.remaining(), 3);

        DurabilityService::repair(&mut item);
        assert_eq!(item.damage, 0);

        let plain = service(WearPolicy::default());
        plain.take_durability(&mut item, 50);
        assert_eq!((item.damage, item.broken), (10, false));
    }
}

// ── DegradationCurves ─────────────────────────────────────────────────────────

#[cfg(test)]
mod degrade {
    use super::*;

    fn half_below_fifty() -> CategoryCurveIndex<f64> {
        CategoryCurveIndex::new(Curve::from_points(vec![(50, 0.5), (100, 1.0)], 1.0))
    }

    fn effect_mode(style: FatigueStyle) -> DegradationCurves {
        let mut d = DegradationCurves::default()
            .with_fatigue(CategoryCurveIndex::new(Curve::from_points(vec![(25, 3), (100, 0)], 0)));
        d.mode = MiningMode::Effect;
        d.style = style;
        d
    }

    #[test]
    fn weapon_factor_follows_health() {
        let mut d = DegradationCurves::default().with_weapon(half_below_fifty());
        let sword = ItemState::new("IRON_SWORD", 100).with_damage(60);
        assert_eq!(d.weapon_factor(&sword), 0.5);
        assert_eq!(d.weapon_factor(&ItemState::new("IRON_SWORD", 100)), 1.0);

        d.toggles.weapon = false;
        assert_eq!(d.weapon_factor(&sword), 1.0);
    }

    #[test]
    fn armor_factor_averages_wearing_pieces() {
        let d = DegradationCurves::default()
            .with_armor(CategoryCurveIndex::new(Curve::from_points(vec![(50, 1.5), (100, 1.0)], 1.0)));
        let pieces = [
            ItemState::new("IRON_HELMET", 100),
            ItemState::new("IRON_BOOTS", 100).with_damage(60),
            ItemState::new("CARVED_PUMPKIN", 0),
        ];
        assert_eq!(d.armor_factor(&pieces), 1.25);
        assert_eq!(d.armor_factor(&[]), 1.0);
    }

    #[test]
    fn mining_delay_only_in_delay_mode() {
        let d = DegradationCurves::default().with_mining_delay(half_below_fifty());
        let pick: Category = "IRON_PICKAXE".into();
        assert_eq!(d.mining_delay_factor(&pick, Percent::new(10)), 0.5);

        let e = effect_mode(FatigueStyle::default()).with_mining_delay(half_below_fifty());
        assert!(!e.delays_actions());
        assert_eq!(e.mining_delay_factor(&pick, Percent::new(10)), 1.0);
    }

    #[test]
    fn burst_fatigue() {
        let d = effect_mode(FatigueStyle::Burst { duration_ticks: 5 });
        let pick: Category = "IRON_PICKAXE".into();
        let fx = d.fatigue(&pick, Percent::new(10)).unwrap();
        assert_eq!((fx.level, fx.amplifier, fx.duration_ticks), (3, 2, 20));
        assert!(d.fatigue(&pick, Percent::new(80)).is_none());
    }

    #[test]
    fn smooth_fatigue_scales_duration_and_clamps_level() {
        let d = effect_mode(FatigueStyle::Smooth {
            min_level:          1,
            max_level:          2,
            min_duration_ticks: 40,
            max_duration_ticks: 200,
        });
        let pick: Category = "IRON_PICKAXE".into();

        let broken = d.fatigue(&pick, Percent::ZERO).unwrap();
        assert_eq!((broken.level, broken.duration_ticks), (2, 200));

        let quarter = d.fatigue(&pick, Percent::new(25)).unwrap();
        assert_eq!(quarter.duration_ticks, 160);
    }

    #[test]
    fn smooth_fatigue_survives_huge_duration_span() {
        let d = effect_mode(FatigueStyle::Smooth {
            min_level:          1,
            max_level:          2,
            min_duration_ticks: 0,
            max_duration_ticks: u32::MAX,
        });
        let pick: Category = "IRON_PICKAXE".into();

        assert_eq!(d.fatigue(&pick, Percent::ZERO).unwrap().duration_ticks, u32::MAX);
        let half = d.fatigue(&pick, Percent::new(20)).unwrap();
        assert_eq!(half.duration_ticks as u64, 80 * u32::MAX as u64 / 100);
    }

    #[test]
    fn no_fatigue_in_delay_mode() {
        let mut d = effect_mode(FatigueStyle::default());
        d.mode = MiningMode::Delay;
        assert!(d.fatigue(&"IRON_PICKAXE".into(), Percent::ZERO).is_none());
    }
}

// ── SalvagePolicy ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod salvage {
    use super::*;

    fn pools() -> SalvagePolicy {
        SalvagePolicy::new(1, 3)
            .with_rule(SalvageRule::new(["netherite_scrap"]).for_category("DIAMOND_PICKAXE").with_model_data(7))
            .with_rule(SalvageRule::new(["emerald"]).with_lore("soulbound"))
            .with_item_pool("DIAMOND_PICKAXE", ["DIAMOND", "STICK"])
            .with_tier_pool("DIAMOND", ["DIAMOND"])
            .with_tier_pool("IRON", ["IRON_NUGGET", "", "AIR"])
    }

    fn labelled(category: &str, label: ItemLabel) -> ItemState {
        ItemState::new(category, 100).with_label(label)
    }

    #[test]
    fn rules_then_item_then_tier() {
        let p = pools();
        let custom = labelled("DIAMOND_PICKAXE", ItemLabel { model_data: Some(7), ..ItemLabel::default() });
        let bound = labelled("STONE_AXE", ItemLabel { lore: vec!["Soulbound".into()], ..ItemLabel::default() });

        assert_eq!(p.pool(&custom), &[Category::new("NETHERITE_SCRAP")]);
        assert_eq!(p.pool(&bound), &[Category::new("EMERALD")]);
        assert_eq!(p.pool(&ItemState::new("DIAMOND_PICKAXE", 100)).len(), 2);
        assert_eq!(p.pool(&ItemState::new("DIAMOND_SWORD", 100)), &[Category::new("DIAMOND")]);
        assert_eq!(p.pool(&ItemState::new("IRON_HOE", 100)), &[Category::new("IRON_NUGGET")]);
        assert!(p.pool(&ItemState::new("GOLDEN_HOE", 100)).is_empty());
    }

    #[test]
    fn count_stays_within_bounds() {
        let p = pools();
        let sword = ItemState::new("DIAMOND_SWORD", 100);
        let mut rng = WearRng::new(21);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let drops = p.roll(&sword, &mut rng);
            assert!((1..=3).contains(&drops.len()));
            assert!(drops.iter().all(|d| d.as_str() == "DIAMOND"));
            seen.insert(drops.len());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn inverted_bounds_collapse_to_min() {
        let p = SalvagePolicy::new(2, 0).with_tier_pool("IRON", ["IRON_NUGGET"]);
        assert_eq!(p.count_range(), (2, 2));
        let drops = p.roll(&ItemState::new("IRON_SWORD", 100), &mut WearRng::new(0));
        assert_eq!(drops.len(), 2);
    }

    #[test]
    fn empty_pool_draws_nothing() {
        let p = pools();
        let mut rng = WearRng::new(5);
        let mut untouched = WearRng::new(5);
        assert!(p.roll(&ItemState::new("GOLDEN_HOE", 100), &mut rng).is_empty());
        assert_eq!(rng.unit(), untouched.unit());
    }

    #[test]
    fn break_carries_salvage_and_protect_only_when_asked() {
        let sword = ItemState::new("IRON_SWORD", 10).with_damage(9);
        let mut rng = WearRng::new(3);

        let mut breaking = service(WearPolicy::default()).with_salvage(pools());
        let outcome = breaking.wear_event(&req(1, 0), &sword, &mut rng);
        assert!(matches!(outcome, WearOutcome::Applied { breaks: true, .. }));
        assert!(!outcome.salvage().is_empty());
        assert!(outcome.salvage().iter().all(|d| d.as_str() == "IRON_NUGGET"));

        let protect = WearPolicy { auto_protect: true, ..WearPolicy::default() };
        let mut quiet = service(protect.clone()).with_salvage(pools());
        assert_eq!(quiet.wear_event(&req(1, 0), &sword, &mut rng), WearOutcome::Protected { salvage: vec![] });

        let mut eager_pools = pools();
        eager_pools.also_on_auto_protect = true;
        let mut eager = service(protect).with_salvage(eager_pools);
        let held = eager.wear_event(&req(1, 0), &sword, &mut rng);
        assert!(matches!(held, WearOutcome::Protected { .. }));
        assert!(!held.salvage().is_empty());

        let mut off = pools();
        off.enabled = false;
        let mut disabled = service(WearPolicy::default()).with_salvage(off);
        assert!(disabled.wear_event(&req(1, 0), &sword, &mut rng).salvage().is_empty());
    }

    #[test]
    fn healthy_wear_has_no_salvage() {
        let mut s = service(WearPolicy::default()).with_salvage(pools());
        let outcome = s.wear_event(&req(1, 0), &ItemState::new("IRON_SWORD", 100), &mut WearRng::new(0));
        assert_eq!(outcome.delta(), 1);
        assert!(outcome.salvage().is_empty());
    }
}

// ── MendingPolicy ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod mending {
    use super::*;

    #[test]
    fn scales_and_floors() {
        let m = MendingPolicy::new(0.5).with_non_repairable(["ELYTRA"]);
        let pick: Category = "IRON_PICKAXE".into();
        assert_eq!(m.mend(&pick, 5), Some(2));
        assert_eq!(m.mend(&pick, 1), None);
        assert_eq!(m.mend(&"ELYTRA".into(), 100), None);
        assert!(!m.repairable(&"ELYTRA".into()));
    }

    #[test]
    fn zero_factor_cancels() {
        let m = MendingPolicy::new(0.0);
        assert_eq!(m.mend(&"IRON_PICKAXE".into(), 100), None);
        assert_eq!(MendingPolicy::default().mend(&"IRON_PICKAXE".into(), 7), Some(7));
    }
}

// ── WeatherWear ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod weather {
    use super::*;

    fn storm() -> WeatherWear {
        WeatherWear::default().with_prefixes(["WOODEN", " iron "], ["LEATHER"], ["WOODEN"])
    }

    #[test]
    fn prefix_requires_separator() {
        let w = storm();
        assert!(w.affects(&ItemState::new("IRON_PICKAXE", 250), EquipSlot::MainHand));
        assert!(!w.affects(&ItemState::new("IRONWOOD_AXE", 250), EquipSlot::MainHand));
    }

    #[test]
    fn slot_selects_prefix_list() {
        let w = storm();
        let boots = ItemState::new("LEATHER_BOOTS", 65);
        assert!(w.affects(&boots, EquipSlot::Feet));
        assert!(!w.affects(&boots, EquipSlot::OffHand));

        let mut w = storm();
        w.affect_armor = false;
        assert!(!w.affects(&boots, EquipSlot::Feet));
    }

    #[test]
    fn exempt_tiers_win() {
        assert!(!storm().affects(&ItemState::new("WOODEN_SWORD", 59), EquipSlot::MainHand));
    }

    #[test]
    fn pass_wears_one_point_up_to_budget() {
        let w = storm();
        let mut pick = ItemState::new("IRON_PICKAXE", 250);
        let mut spent = ItemState::new("IRON_SHOVEL", 10).with_damage(10);
        let mut boots = ItemState::new("DIAMOND_BOOTS", 429);

        let worn = w.wear_pass([
            (EquipSlot::MainHand, &mut pick),
            (EquipSlot::OffHand, &mut spent),
            (EquipSlot::Feet, &mut boots),
        ]);
        assert_eq!(worn, 1);
        assert_eq!(pick.damage, 1);
        assert_eq!(spent.damage, 10);
        assert_eq!(boots.damage, 0);
    }

    #[test]
    fn due_once_per_period() {
        let mut w = storm();
        assert!(w.due(Tick(0)));
        assert!(!w.due(Tick(50)));
        assert!(w.due(Tick(100)));

        let mut off = storm();
        off.enabled = false;
        assert!(!off.due(Tick(0)));
    }
}
