//! End-to-end match scenarios.
//!
//! Each test builds a small match, runs it through the round engine and
//! checks the report, the event stream and the stats it produces.

use proptest::prelude::*;

use crate::combat::{Combat, CombatEvent, DrawReason, EventLog, Fighter, Loadout, Outcome, SkipReason};
use crate::entity::{CharacterId, Gear};
use crate::stats::StatsBook;
use crate::store::{Catalog, EntityStore};
use crate::team::Side;

use super::helpers::{
    armed_fighter, armor, bare_fighter, character, league_catalog, prep_rng, seeded_engine, team,
    weapon,
};

const EPS: f64 = 1e-9;

fn duel_catalog() -> Catalog {
    Catalog::new(
        vec![character(1, "Aldo", 80), character(2, "Brina", 80)],
        vec![weapon(10, 50, 10), armor(20, 10, 10)],
        vec![team("Red", &[1]), team("Blue", &[2])],
    )
}

// =============================================================================
// Match outcomes
// =============================================================================

#[test]
fn first_attacker_wins_even_duel() {
    let catalog = duel_catalog();
    let combat = Combat::prepare(&catalog, &catalog.teams()[0], &catalog.teams()[1], &mut prep_rng(1));
    let mut engine = seeded_engine(combat, 1, 500);
    let report = engine.run(&mut EventLog::new());

    assert_eq!(report.outcome, Outcome::Winner(Side::Team1));
    assert_eq!(report.rounds, 1);
    assert_eq!(report.winner_name(), Some("Red"));
    assert_eq!(report.verdict(), "Team Red wins!");

    let brina = report.fighter(CharacterId::new(2)).unwrap();
    assert!((brina.accumulated_damage - 24.3).abs() < EPS);
    let aldo = report.fighter(CharacterId::new(1)).unwrap();
    assert!(aldo.accumulated_damage.abs() < EPS);
    assert_eq!(aldo.weapon.durability(), 9);
    assert_eq!(brina.armor.durability(), 9);

    assert_eq!(report.summaries[1], vec!["Brina - K.O.".to_string()]);
    assert_eq!(report.summaries[0], vec!["Aldo - 0.00% damage".to_string()]);
}

#[test]
fn knocked_out_members_can_still_be_hit() {
    let combat = Combat::new(
        team("Red", &[1, 2]),
        team("Blue", &[3]),
        [
            armed_fighter(1, "Aldo", 80, 50, 10),
            armed_fighter(2, "Brina", 80, 50, 10),
            armed_fighter(3, "Corvo", 80, 50, 10),
        ],
    );
    let mut engine = seeded_engine(combat, 5, 500);
    let mut log = EventLog::new();
    let report = engine.run(&mut log);

    let hits: Vec<f64> = log
        .attacks()
        .filter_map(|e| match e {
            CombatEvent::Attack { final_damage, .. } => Some(*final_damage),
            _ => None,
        })
        .collect();
    assert_eq!(hits.len(), 2);
    assert!((hits[0] - 24.3).abs() < EPS);
    // Corvo's ledger is already past 1.0, so his defense term turns negative.
    assert!((hits[1] - 109.35).abs() < EPS);

    let corvo = report.fighter(CharacterId::new(3)).unwrap();
    assert!((corvo.accumulated_damage - 133.65).abs() < EPS);
    // The second hit lands on a member who is already out.
    assert_eq!(report.delta(Side::Team1).ko_done, 1);
    assert_eq!(report.outcome, Outcome::Winner(Side::Team1));
}

#[test]
fn both_sides_eliminated_is_a_draw() {
    let catalog = duel_catalog();
    let mirror = team("Mirror", &[1]);
    let combat = Combat::prepare(&catalog, &mirror, &mirror, &mut prep_rng(2));
    assert_eq!(combat.fighters().count(), 1);

    let mut engine = seeded_engine(combat, 2, 500);
    let report = engine.run(&mut EventLog::new());

    assert_eq!(report.outcome, Outcome::Draw(DrawReason::BothEliminated));
    assert_eq!(report.verdict(), "Both teams are eliminated. It's a draw!");
    let aldo = report.fighter(CharacterId::new(1)).unwrap();
    assert!((aldo.accumulated_damage - 24.3).abs() < EPS);

    let mut book = StatsBook::new();
    report.apply_to(&mut book);
    let mirror = book.get("mirror").unwrap();
    assert_eq!(mirror.games_played, 2);
    assert_eq!(mirror.games_won, 0);
    assert_eq!(mirror.ko_done, 1);
    assert_eq!(mirror.ko_received, 1);
}

#[test]
fn harmless_fighters_hit_the_round_cap() {
    // Both defenses outweigh both attacks, so no damage ever lands.
    let combat = Combat::new(
        team("Feathers", &[1]),
        team("Pebbles", &[2]),
        [bare_fighter(1, "Piuma", 1), bare_fighter(2, "Sasso", 10)],
    );
    let mut engine = seeded_engine(combat, 3, 5);
    let mut log = EventLog::new();
    let report = engine.run(&mut log);

    assert_eq!(report.outcome, Outcome::Draw(DrawReason::RoundCap));
    assert_eq!(report.rounds, 5);
    assert_eq!(report.verdict(), "No team fell after 5 rounds. It's a draw!");
    assert!(report.fighters.iter().all(|f| f.accumulated_damage == 0.0));

    // A zero ledger still fails the knockout draw.
    assert_eq!(report.summaries[1], vec!["Sasso - K.O.".to_string()]);
    assert_eq!(log.attacks().count(), 5);
    for attack in log.attacks() {
        let CombatEvent::Attack { final_damage, .. } = attack else {
            unreachable!()
        };
        assert!(*final_damage < 0.0);
    }
}

#[test]
fn empty_opponent_loses_in_round_one() {
    let combat = Combat::new(
        team("Red", &[1]),
        team("Nobody", &[]),
        [armed_fighter(1, "Aldo", 80, 50, 10)],
    );
    let mut engine = seeded_engine(combat, 4, 500);
    let report = engine.run(&mut EventLog::new());
    assert_eq!(report.outcome, Outcome::Winner(Side::Team1));
    assert_eq!(report.rounds, 1);
}

#[test]
fn two_empty_teams_draw() {
    let combat = Combat::new(team("A", &[]), team("B", &[]), Vec::<Fighter>::new());
    let mut engine = seeded_engine(combat, 4, 500);
    let report = engine.run(&mut EventLog::new());
    assert_eq!(report.outcome, Outcome::Draw(DrawReason::BothEliminated));
}

// =============================================================================
// Event stream
// =============================================================================

#[test]
fn missing_character_skips_its_turn() {
    let catalog = duel_catalog();
    let red = team("Red", &[1, 77]);
    let combat = Combat::prepare(&catalog, &red, &catalog.teams()[1], &mut prep_rng(6));
    let mut engine = seeded_engine(combat, 6, 500);
    let mut log = EventLog::new();
    let report = engine.run(&mut log);

    assert!(log.events().iter().any(|e| matches!(
        e,
        CombatEvent::AttackSkipped {
            attacker,
            reason: SkipReason::MissingAttacker,
            ..
        } if *attacker == CharacterId::new(77)
    )));
    assert_eq!(report.outcome, Outcome::Winner(Side::Team1));
}

#[test]
fn attack_events_come_in_order() {
    let fragile = |id: u32, name: &str| {
        Fighter::new(
            character(id, name, 80),
            Loadout::new(
                Gear::Equipped(weapon(id * 10, 50, 1)),
                Gear::Equipped(armor(id * 10 + 1, 10, 1)),
            ),
        )
    };
    let combat = Combat::new(
        team("Red", &[1]),
        team("Blue", &[2]),
        [fragile(1, "Aldo"), fragile(2, "Brina")],
    );
    let mut engine = seeded_engine(combat, 7, 500);
    let mut log = EventLog::new();
    engine.run(&mut log);

    let kinds: Vec<&str> = log
        .events()
        .iter()
        .map(|e| match e {
            CombatEvent::CombatReady { .. } => "ready",
            CombatEvent::RoundStarted { .. } => "round",
            CombatEvent::Attack { .. } => "attack",
            CombatEvent::ItemDestroyed { .. } => "destroyed",
            CombatEvent::KnockedOut { .. } => "ko",
            CombatEvent::AttackSkipped { .. } => "skip",
            CombatEvent::RoundResolved { .. } => "resolved",
            CombatEvent::MatchEnded { .. } => "end",
        })
        .collect();
    assert_eq!(
        kinds,
        ["ready", "ready", "round", "attack", "destroyed", "destroyed", "ko", "resolved", "end"]
    );

    let destroyed: Vec<CharacterId> = log
        .events()
        .iter()
        .filter_map(|e| match e {
            CombatEvent::ItemDestroyed { owner, .. } => Some(*owner),
            _ => None,
        })
        .collect();
    // Attacker's weapon first, then the target's armor.
    assert_eq!(destroyed, [CharacterId::new(1), CharacterId::new(2)]);
}

// =============================================================================
// Stats reconciliation
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn league_match_reconciles(seed in any::<u64>()) {
        let catalog = league_catalog();
        let (wolves, ravens) = (&catalog.teams()[0], &catalog.teams()[1]);
        let combat = Combat::prepare(&catalog, wolves, ravens, &mut prep_rng(seed));
        let mut engine = seeded_engine(combat, seed, 200);
        let report = engine.run(&mut EventLog::new());

        let mut book = StatsBook::new();
        report.apply_to(&mut book);
        let w = book.get("Wolves").unwrap();
        let r = book.get("Ravens").unwrap();

        prop_assert_eq!(w.games_played, 1);
        prop_assert_eq!(r.games_played, 1);
        prop_assert!(w.games_won + r.games_won <= 1);
        prop_assert_eq!(w.games_won + r.games_won == 0, report.outcome.is_draw());
        prop_assert_eq!(w.ko_done, r.ko_received);
        prop_assert_eq!(r.ko_done, w.ko_received);
        prop_assert!(w.ko_done <= 3 && r.ko_done <= 3);
        prop_assert!(report.fighters.iter().all(|f| f.accumulated_damage >= 0.0));
    }
}
