mod common;

use common::{catalog, rec, RecordingResolver};
use depcheck_core::catalog::Catalog;
use depcheck_core::component::ComponentType::{self, Era, Modification, Scenario};
use depcheck_core::component::{ComponentRecord, ComponentRef};
use depcheck_core::selection::SelectionState;
use depcheck_resolver::conflict::{conflicts, filter_compatible};
use depcheck_resolver::manager::DependencyManager;
use proptest::prelude::*;

const ERAS: [&str; 3] = ["E0", "E1", "E2"];
const SCENARIOS: [&str; 3] = ["S0", "S1", "S2"];
const MODS: [&str; 4] = ["M0", "M1", "M2", "M3"];

fn pool(kind: ComponentType) -> &'static [&'static str] {
    match kind {
        Era => &ERAS,
        Scenario => &SCENARIOS,
        Modification => &MODS,
    }
}

fn pick(kind: ComponentType, mask: u64) -> Vec<&'static str> {
    pool(kind)
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, id)| *id)
        .collect()
}

/// Build a record from random bits. Per other type, ten bits: a restriction
/// mode (2), its id mask (4), an exemption flag (1) and its id mask (3).
/// Bits 30..34 pick forced modifications; 34 and 35 together add a missing one.
fn decode(kind: ComponentType, id: &str, bits: u64) -> ComponentRecord {
    let mut record = rec(kind, id);
    for (n, other) in ComponentType::ALL.into_iter().enumerate() {
        let chunk = bits >> (n * 10);
        let ids = pick(other, chunk >> 2);
        record = match chunk & 0b11 {
            2 => record.with_allow(other, ids),
            3 => record.with_disallow(other, ids),
            _ => record,
        };
        if chunk & (1 << 6) != 0 {
            record = record.with_ignored(other, pick(other, (chunk >> 7) & 0b111));
        }
    }
    let forced = bits >> 30;
    record = record.with_forced(pick(Modification, forced));
    if forced & 0b11_0000 == 0b11_0000 {
        record = record.with_forced(["M9"]);
    }
    record
}

fn random_catalog(bits: &[u64]) -> Catalog {
    let ids = ComponentType::ALL
        .into_iter()
        .flat_map(|kind| pool(kind).iter().map(move |id| (kind, *id)));
    catalog(ids.zip(bits).map(|((kind, id), b)| decode(kind, id, *b)))
}

fn every_ref() -> Vec<ComponentRef> {
    let mut refs: Vec<ComponentRef> = ComponentType::ALL
        .into_iter()
        .flat_map(|kind| pool(kind).iter().map(move |id| ComponentRef::new(kind, *id)))
        .collect();
    refs.push(ComponentRef::era("E9"));
    refs.push(ComponentRef::modification("M9"));
    refs
}

fn catalog_bits() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(any::<u64>(), 10)
}

proptest! {
    #[test]
    fn prop_conflict_is_symmetric_and_irreflexive(bits in catalog_bits()) {
        let c = random_catalog(&bits);
        let refs = every_ref();
        for a in &refs {
            prop_assert!(!conflicts(&c, a, a));
            for b in &refs {
                prop_assert_eq!(conflicts(&c, a, b), conflicts(&c, b, a), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn prop_exemption_overrides_everything(bits in catalog_bits()) {
        let c = random_catalog(&bits);
        for kind in ComponentType::ALL {
            for record in c.records(kind) {
                for (other, ids) in &record.ignore_incompatible {
                    for id in ids {
                        let b = ComponentRef::new(*other, id.as_str());
                        prop_assert!(!conflicts(&c, &record.component_ref(), &b));
                    }
                }
            }
        }
    }

    #[test]
    fn prop_forced_modification_escapes_allow_list(
        forced_mask in 0u64..16,
        allow_mask in 0u64..16,
        owner_is_era in any::<bool>(),
    ) {
        let kind = if owner_is_era { Era } else { Scenario };
        let forced = pick(Modification, forced_mask);
        let allowed = pick(Modification, allow_mask);
        let owner = rec(kind, "X")
            .with_allow(Modification, allowed.clone())
            .with_forced(forced.clone());
        let c = catalog(
            std::iter::once(owner).chain(MODS.iter().map(|id| rec(Modification, id))),
        );

        let x = ComponentRef::new(kind, "X");
        for id in MODS {
            let expected = !(forced.contains(&id) || allowed.contains(&id));
            prop_assert_eq!(conflicts(&c, &x, &ComponentRef::modification(id)), expected);
        }
    }

    #[test]
    fn prop_greedy_filter_keeps_compatible_set(
        bits in catalog_bits(),
        order in prop::collection::vec(0..5usize, 0..8),
    ) {
        let c = random_catalog(&bits);
        let ids: Vec<&str> = order.iter().map(|i| MODS.get(*i).copied().unwrap_or("M9")).collect();
        let (accepted, report) = filter_compatible(&c, &ids);

        for (i, a) in accepted.iter().enumerate() {
            for b in &accepted[i + 1..] {
                prop_assert_ne!(a, b);
                prop_assert!(!conflicts(
                    &c,
                    &ComponentRef::modification(a.as_str()),
                    &ComponentRef::modification(b.as_str()),
                ));
            }
        }
        for dropped in &report.incompatibilities {
            prop_assert!(accepted.contains(&dropped.conflicts_with));
            prop_assert!(conflicts(
                &c,
                &ComponentRef::modification(dropped.dropped.as_str()),
                &ComponentRef::modification(dropped.conflicts_with.as_str()),
            ));
        }
        prop_assert_eq!(filter_compatible(&c, &ids), (accepted, report));
    }

    #[test]
    fn prop_failed_changes_leave_no_trace(
        bits in catalog_bits(),
        start in (0..3usize, 0..3usize, 0u64..16),
        op in 0..3usize,
        target in 0..4usize,
        mod_mask in 0u64..16,
        confirm in any::<bool>(),
        choices in prop::collection::vec(proptest::option::of(0..4usize), 0..4),
    ) {
        let c = random_catalog(&bits);
        let before = SelectionState::new(
            ERAS[start.0],
            SCENARIOS[start.1],
            pick(Modification, start.2),
        );
        let mut m = DependencyManager::with_selection(c, before.clone());
        let base = if confirm {
            RecordingResolver::accepting()
        } else {
            RecordingResolver::declining()
        };
        let mut ui = base.choosing(choices);

        let era = ERAS.get(target).copied().unwrap_or("E9");
        let scenario = SCENARIOS.get(target).copied().unwrap_or("S9");
        let result = match op {
            0 => m.try_era(era, false, &mut ui),
            1 => m.try_scenario(scenario, false, &mut ui),
            _ => m.try_modifications(&pick(Modification, mod_mask), false, &mut ui),
        };

        match (result, op) {
            (Err(_), _) => {
                prop_assert_eq!(m.selection(), &before);
            }
            (Ok(()), 0) => {
                prop_assert_eq!(m.era(), era);
            }
            (Ok(()), 1) => {
                prop_assert_eq!(m.scenario(), scenario);
            }
            (Ok(()), _) => {}
        }
    }
}
