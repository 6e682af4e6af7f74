//! Unit tests for event construction and execution.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use isle_core::{AgentId, HouseId, SimTime};
use isle_world::{Agent, AgentRngs, House, TravelMatrix, World};

use crate::{
    EventError, FinishTrip, HouseExchange, PetExchange, StartTrip, detect_house_exchange,
    detect_pet_exchanges,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const MAX_TIME: SimTime = SimTime(1_000);

/// Three fully connected houses (duration 1), one agent each, with uniform
/// exchange propensities.
fn world(house_pct: u32, pet_pct: u32) -> World {
    let colors = ["red", "green", "blue"];
    let mut agents = BTreeMap::new();
    let mut houses = BTreeMap::new();
    for id in 1..=3u32 {
        agents.insert(
            AgentId(id),
            Agent::new(
                AgentId(id),
                format!("nation-{id}"),
                "tea",
                "pipe",
                format!("pet-{id}"),
                HouseId(id),
                FxHashMap::default(),
                house_pct,
                pet_pct,
            ),
        );
        houses.insert(
            HouseId(id),
            House::new(HouseId(id), colors[(id - 1) as usize], AgentId(id)),
        );
    }
    let mut matrix = TravelMatrix::new(3);
    for a in 1..=3u32 {
        for b in 1..=3u32 {
            if a != b {
                matrix.set(HouseId(a), HouseId(b), Some(1)).unwrap();
            }
        }
    }
    World::new(agents, houses, matrix).unwrap()
}

fn rngs() -> AgentRngs {
    AgentRngs::new(42, (1..=3).map(AgentId))
}

/// Walk agent 2 over to house 1 (via a real start/finish pair).
fn move_agent_to(world: &mut World, rngs: &mut AgentRngs, agent: AgentId, dest: HouseId) {
    let mut start = StartTrip::new(SimTime(0), agent, dest);
    let mut finish = start.run(world, MAX_TIME).unwrap().expect("trip starts");
    finish.run(world, rngs).unwrap();
}

// ── StartTrip ─────────────────────────────────────────────────────────────────

mod start_trip {
    use super::*;

    #[test]
    fn departure_leaves_house_and_queues_arrival() {
        let mut w = world(0, 0);
        let mut start = StartTrip::new(SimTime(0), AgentId(1), HouseId(2));
        let finish = start.run(&mut w, MAX_TIME).unwrap().unwrap();

        assert_eq!(finish.time, SimTime(1));
        assert_eq!(finish.agent, AgentId(1));
        assert_eq!(finish.target, HouseId(2));
        assert_eq!(start.origin, Some(HouseId(1)));

        let agent = w.agent(AgentId(1)).unwrap();
        assert!(agent.travelling);
        assert_eq!(agent.location, HouseId(1), "location names origin in flight");
        assert!(!w.house(HouseId(1)).unwrap().is_present(AgentId(1)));
    }

    #[test]
    fn already_travelling_is_noop() {
        let mut w = world(0, 0);
        let mut first = StartTrip::new(SimTime(0), AgentId(1), HouseId(2));
        first.run(&mut w, MAX_TIME).unwrap().unwrap();

        let mut second = StartTrip::new(SimTime(0), AgentId(1), HouseId(3));
        assert!(second.run(&mut w, MAX_TIME).unwrap().is_none());
    }

    #[test]
    fn unreachable_target_leaves_agent_in_place() {
        let mut w = world(0, 0);
        w.matrix.set(HouseId(1), HouseId(2), None).unwrap();

        let mut start = StartTrip::new(SimTime(0), AgentId(1), HouseId(2));
        assert!(start.run(&mut w, MAX_TIME).unwrap().is_none());

        let agent = w.agent(AgentId(1)).unwrap();
        assert!(!agent.travelling);
        assert!(
            w.house(HouseId(1)).unwrap().is_present(AgentId(1)),
            "failed start must not remove the agent from its house"
        );
    }

    #[test]
    fn self_target_is_noop() {
        let mut w = world(0, 0);
        let mut start = StartTrip::new(SimTime(0), AgentId(1), HouseId(1));
        assert!(start.run(&mut w, MAX_TIME).unwrap().is_none());
        assert!(w.house(HouseId(1)).unwrap().is_present(AgentId(1)));
    }

    #[test]
    fn arrival_past_horizon_aborts() {
        let mut w = world(0, 0);
        let mut start = StartTrip::new(SimTime(0), AgentId(1), HouseId(2));
        // Horizon 0, travel duration 1 → arrival at 1 exceeds it.
        assert!(start.run(&mut w, SimTime(0)).unwrap().is_none());
        let agent = w.agent(AgentId(1)).unwrap();
        assert!(!agent.travelling);
        assert!(w.house(HouseId(1)).unwrap().is_present(AgentId(1)));
    }

    #[test]
    fn log_fields_are_nationality_origin_target() {
        let mut w = world(0, 0);
        let mut start = StartTrip::new(SimTime(0), AgentId(1), HouseId(2));
        start.run(&mut w, MAX_TIME).unwrap().unwrap();
        assert_eq!(
            start.log_fields(&w).unwrap(),
            vec!["nation-1".to_string(), "1".into(), "2".into()]
        );
    }
}

// ── FinishTrip ────────────────────────────────────────────────────────────────

mod finish_trip {
    use super::*;

    #[test]
    fn owner_present_marks_success_and_exchanges_knowledge() {
        let mut w = world(0, 0);
        let mut r = rngs();
        let mut start = StartTrip::new(SimTime(0), AgentId(1), HouseId(2));
        let mut finish = start.run(&mut w, MAX_TIME).unwrap().unwrap();
        let arrival = finish.run(&mut w, &mut r).unwrap();

        assert!(arrival.success);
        assert_eq!(arrival.met, vec![AgentId(2)]);
        let visitor = w.agent(AgentId(1)).unwrap();
        assert_eq!(visitor.location, HouseId(2));
        assert!(!visitor.travelling);
        assert_eq!(
            visitor.knowledge.get(&AgentId(2)).unwrap().time,
            SimTime(1)
        );
        let host = w.agent(AgentId(2)).unwrap();
        assert_eq!(host.knowledge.get(&AgentId(1)).unwrap().location, HouseId(2));
    }

    #[test]
    fn owner_absent_means_no_knowledge_exchange() {
        let mut w = world(0, 0);
        let mut r = rngs();
        // Owner 2 leaves home first.
        move_agent_to(&mut w, &mut r, AgentId(2), HouseId(3));

        let mut start = StartTrip::new(SimTime(1), AgentId(1), HouseId(2));
        let mut finish = start.run(&mut w, MAX_TIME).unwrap().unwrap();
        let arrival = finish.run(&mut w, &mut r).unwrap();

        assert!(!arrival.success);
        assert!(arrival.met.is_empty());
        assert!(arrival.house_exchange.is_none());
        assert!(!w
            .agent(AgentId(1))
            .unwrap()
            .knowledge
            .contains_key(&AgentId(2)));
    }

    #[test]
    fn log_fields_omit_success_flag_at_home() {
        let mut w = world(0, 0);
        let mut r = rngs();
        move_agent_to(&mut w, &mut r, AgentId(1), HouseId(2));

        // Trip back home.
        let mut start = StartTrip::new(SimTime(1), AgentId(1), HouseId(1));
        let mut finish = start.run(&mut w, MAX_TIME).unwrap().unwrap();
        finish.run(&mut w, &mut r).unwrap();
        assert_eq!(
            finish.log_fields(&w).unwrap(),
            vec!["nation-1".to_string(), "1".into()]
        );
    }

    #[test]
    fn log_fields_include_success_flag_away() {
        let mut w = world(0, 0);
        let mut r = rngs();
        let mut start = StartTrip::new(SimTime(0), AgentId(1), HouseId(2));
        let mut finish = start.run(&mut w, MAX_TIME).unwrap().unwrap();
        finish.run(&mut w, &mut r).unwrap();
        assert_eq!(
            finish.log_fields(&w).unwrap(),
            vec!["1".to_string(), "nation-1".into(), "2".into()]
        );
    }

    #[test]
    fn return_home_classification_follows_current_home() {
        let w = world(0, 0);
        let finish = FinishTrip::new(SimTime(1), AgentId(1), HouseId(1));
        assert!(finish.is_return_home(&w));
        let finish = FinishTrip::new(SimTime(1), AgentId(1), HouseId(2));
        assert!(!finish.is_return_home(&w));
    }
}

// ── Exchange construction ─────────────────────────────────────────────────────

mod construction {
    use super::*;

    #[test]
    fn fewer_than_two_participants_fails() {
        let err = PetExchange::new(SimTime(0), vec![AgentId(1)], vec!["cat".into()]);
        assert!(matches!(
            err,
            Err(EventError::TooFewParticipants { got: 1 })
        ));
    }

    #[test]
    fn mismatched_rotation_fails() {
        let err = HouseExchange::new(
            SimTime(0),
            vec![AgentId(1), AgentId(2)],
            vec![HouseId(2)],
        );
        assert!(matches!(err, Err(EventError::RotationMismatch { .. })));
    }
}

// ── Exchange execution ────────────────────────────────────────────────────────

mod exchange_run {
    use super::*;

    #[test]
    fn pet_rotation_permutes_and_preserves_multiset() {
        let mut w = world(0, 0);
        let mut r = rngs();
        move_agent_to(&mut w, &mut r, AgentId(1), HouseId(2));

        let mut ev = PetExchange::new(
            SimTime(1),
            vec![AgentId(1), AgentId(2)],
            vec!["pet-2".into(), "pet-1".into()],
        )
        .unwrap();
        assert!(ev.run(&mut w).unwrap());

        assert_eq!(w.agent(AgentId(1)).unwrap().pet, "pet-2");
        assert_eq!(w.agent(AgentId(2)).unwrap().pet, "pet-1");

        let mut all_pets: Vec<String> =
            w.agents.values().map(|a| a.pet.clone()).collect();
        all_pets.sort();
        assert_eq!(all_pets, vec!["pet-1", "pet-2", "pet-3"]);
    }

    #[test]
    fn pet_exchange_noop_when_owner_left() {
        let mut w = world(0, 0);
        let mut r = rngs();
        move_agent_to(&mut w, &mut r, AgentId(1), HouseId(2));
        // Owner 2 walks away before the event runs.
        move_agent_to(&mut w, &mut r, AgentId(2), HouseId(3));

        let mut ev = PetExchange::new(
            SimTime(2),
            vec![AgentId(1), AgentId(2)],
            vec!["pet-2".into(), "pet-1".into()],
        )
        .unwrap();
        assert!(!ev.run(&mut w).unwrap());
        assert_eq!(w.agent(AgentId(1)).unwrap().pet, "pet-1");
    }

    #[test]
    fn house_rotation_reassigns_homes_and_owners() {
        let mut w = world(0, 0);
        let mut r = rngs();
        move_agent_to(&mut w, &mut r, AgentId(1), HouseId(2));

        let mut ev = HouseExchange::new(
            SimTime(1),
            vec![AgentId(1), AgentId(2)],
            vec![HouseId(2), HouseId(1)],
        )
        .unwrap();
        assert!(ev.run(&mut w).unwrap());

        assert_eq!(w.agent(AgentId(1)).unwrap().home, HouseId(2));
        assert_eq!(w.agent(AgentId(2)).unwrap().home, HouseId(1));
        assert_eq!(w.house(HouseId(2)).unwrap().owner, AgentId(1));
        assert_eq!(w.house(HouseId(1)).unwrap().owner, AgentId(2));
    }

    #[test]
    fn exchange_updates_witness_knowledge() {
        let mut w = world(0, 0);
        let mut r = rngs();
        move_agent_to(&mut w, &mut r, AgentId(1), HouseId(2));
        move_agent_to(&mut w, &mut r, AgentId(3), HouseId(2));

        let mut ev = PetExchange::new(
            SimTime(5),
            vec![AgentId(1), AgentId(2)],
            vec!["pet-2".into(), "pet-1".into()],
        )
        .unwrap();
        ev.run(&mut w).unwrap();

        // Agent 3 witnessed the rotation without participating.
        let witness = w.agent(AgentId(3)).unwrap();
        assert_eq!(witness.knowledge.get(&AgentId(1)).unwrap().pet, "pet-2");
        assert_eq!(witness.knowledge.get(&AgentId(1)).unwrap().time, SimTime(5));
    }

    #[test]
    fn log_fields_list_count_nationalities_values() {
        let w = world(0, 0);
        let ev = PetExchange::new(
            SimTime(0),
            vec![AgentId(1), AgentId(2)],
            vec!["a".into(), "b".into()],
        )
        .unwrap();
        assert_eq!(
            ev.log_fields(&w).unwrap(),
            vec!["2".to_string(), "nation-1".into(), "nation-2".into(), "a".into(), "b".into()]
        );
    }
}

// ── Detection ─────────────────────────────────────────────────────────────────

mod detection {
    use super::*;

    #[test]
    fn certain_propensities_always_form_a_group() {
        // House propensity raised only after positioning, so the set-up trip
        // itself cannot rotate homes.
        let mut w = world(0, 100);
        let mut r = rngs();
        move_agent_to(&mut w, &mut r, AgentId(1), HouseId(2));

        let pets = detect_pet_exchanges(&w, SimTime(1), &mut r).unwrap();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].participants, vec![AgentId(1), AgentId(2)]);
        assert_eq!(pets[0].pets_after, vec!["pet-2".to_string(), "pet-1".into()]);

        for agent in w.agents.values_mut() {
            agent.house_exchange_pct = 100;
        }
        let houses = detect_house_exchange(&w, HouseId(2), SimTime(1), &mut r)
            .unwrap()
            .unwrap();
        assert_eq!(houses.participants, vec![AgentId(1), AgentId(2)]);
        assert_eq!(houses.homes_after, vec![HouseId(2), HouseId(1)]);
    }

    #[test]
    fn zero_propensities_never_form_a_group() {
        let mut w = world(0, 0);
        let mut r = rngs();
        move_agent_to(&mut w, &mut r, AgentId(1), HouseId(2));

        assert!(detect_pet_exchanges(&w, SimTime(1), &mut r).unwrap().is_empty());
        assert!(detect_house_exchange(&w, HouseId(2), SimTime(1), &mut r)
            .unwrap()
            .is_none());
    }

    #[test]
    fn owner_absent_house_is_skipped() {
        let mut w = world(0, 100);
        let mut r = rngs();
        // Owner 2 leaves; agents 1 and 3 gather at house 2.
        move_agent_to(&mut w, &mut r, AgentId(2), HouseId(3));
        move_agent_to(&mut w, &mut r, AgentId(1), HouseId(2));
        move_agent_to(&mut w, &mut r, AgentId(3), HouseId(2));

        let pets = detect_pet_exchanges(&w, SimTime(1), &mut r).unwrap();
        assert!(
            pets.iter().all(|e| !e.participants.contains(&AgentId(1))),
            "no pet exchange at an ownerless house"
        );
    }

    #[test]
    fn lone_agent_never_exchanges() {
        let mut w = world(100, 100);
        let mut r = rngs();
        assert!(detect_house_exchange(&w, HouseId(1), SimTime(0), &mut r)
            .unwrap()
            .is_none());
    }

    #[test]
    fn three_way_rotation_cycles() {
        let mut w = world(0, 100);
        let mut r = rngs();
        move_agent_to(&mut w, &mut r, AgentId(1), HouseId(3));
        move_agent_to(&mut w, &mut r, AgentId(2), HouseId(3));

        let pets = detect_pet_exchanges(&w, SimTime(1), &mut r).unwrap();
        assert_eq!(pets.len(), 1);
        let ev = &pets[0];
        assert_eq!(ev.participants, vec![AgentId(1), AgentId(2), AgentId(3)]);
        // Each participant receives the next participant's pet, cyclically.
        assert_eq!(
            ev.pets_after,
            vec!["pet-2".to_string(), "pet-3".into(), "pet-1".into()]
        );
    }
}
