//! Unit tests for isle-world.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use isle_core::{AgentId, AgentRng, HouseId, SimTime};

use crate::{Agent, ColorIndex, House, TravelMatrix, World};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn basic_agent(id: u32, weights: &[(u32, u32)]) -> Agent {
    Agent::new(
        AgentId(id),
        format!("nation-{id}"),
        "water",
        "none",
        format!("pet-{id}"),
        HouseId(id),
        weights.iter().copied().collect::<FxHashMap<_, _>>(),
        0,
        0,
    )
}

/// Three houses (red, green, blue), fully connected with duration 1.
fn three_house_world(weights: &[(u32, u32)]) -> World {
    let colors = ["red", "green", "blue"];
    let mut agents = BTreeMap::new();
    let mut houses = BTreeMap::new();
    for id in 1..=3u32 {
        agents.insert(AgentId(id), basic_agent(id, weights));
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

// ── House ─────────────────────────────────────────────────────────────────────

mod house {
    use super::*;

    #[test]
    fn enter_leave_tracks_presence() {
        let mut h = House::new(HouseId(1), "red", AgentId(1));
        assert_eq!(h.present_count(), 0);
        h.enter(AgentId(2));
        h.enter(AgentId(1));
        assert!(h.is_present(AgentId(2)));
        assert_eq!(h.present().collect::<Vec<_>>(), vec![AgentId(1), AgentId(2)]);
        h.leave(AgentId(2));
        assert!(!h.is_present(AgentId(2)));
        // Leaving twice is harmless.
        h.leave(AgentId(2));
        assert_eq!(h.present_count(), 1);
    }

    #[test]
    fn owner_present_follows_ownership() {
        let mut h = House::new(HouseId(1), "red", AgentId(1));
        assert!(!h.owner_present());
        h.enter(AgentId(1));
        assert!(h.owner_present());
        h.set_owner(AgentId(2));
        assert!(!h.owner_present());
        h.enter(AgentId(2));
        assert!(h.owner_present());
    }
}

// ── TravelMatrix ──────────────────────────────────────────────────────────────

mod matrix {
    use super::*;

    #[test]
    fn diagonal_is_zero_rest_unreachable() {
        let m = TravelMatrix::new(3);
        assert_eq!(m.duration(HouseId(2), HouseId(2)), Some(0));
        assert_eq!(m.duration(HouseId(1), HouseId(2)), None);
    }

    #[test]
    fn set_is_directional() {
        let mut m = TravelMatrix::new(2);
        m.set(HouseId(1), HouseId(2), Some(5)).unwrap();
        assert_eq!(m.duration(HouseId(1), HouseId(2)), Some(5));
        assert_eq!(m.duration(HouseId(2), HouseId(1)), None);
    }

    #[test]
    fn out_of_range_ids() {
        let mut m = TravelMatrix::new(2);
        assert_eq!(m.duration(HouseId(0), HouseId(1)), None);
        assert_eq!(m.duration(HouseId(1), HouseId(9)), None);
        assert!(m.set(HouseId(1), HouseId(9), Some(1)).is_err());
    }

    #[test]
    fn houses_iterates_one_based() {
        let m = TravelMatrix::new(3);
        let ids: Vec<_> = m.houses().collect();
        assert_eq!(ids, vec![HouseId(1), HouseId(2), HouseId(3)]);
    }
}

// ── ColorIndex ────────────────────────────────────────────────────────────────

mod colors {
    use super::*;

    #[test]
    fn positions_are_one_based_ascending() {
        let world = three_house_world(&[]);
        assert_eq!(world.colors.index_of("red"), 1);
        assert_eq!(world.colors.index_of("green"), 2);
        assert_eq!(world.colors.index_of("blue"), 3);
        assert_eq!(world.colors.index_of("mauve"), 0);
    }

    #[test]
    fn duplicate_color_keeps_last_position() {
        let mut houses = BTreeMap::new();
        houses.insert(HouseId(1), House::new(HouseId(1), "red", AgentId(1)));
        houses.insert(HouseId(2), House::new(HouseId(2), "red", AgentId(2)));
        houses.insert(HouseId(3), House::new(HouseId(3), "blue", AgentId(3)));
        let index = ColorIndex::build(&houses);
        assert_eq!(index.index_of("red"), 2);
        assert_eq!(index.index_of("blue"), 3);
    }
}

// ── Agent & knowledge ─────────────────────────────────────────────────────────

mod agent {
    use super::*;
    use crate::MobilityState;

    #[test]
    fn knows_itself_at_start() {
        let a = basic_agent(1, &[]);
        let self_record = a.knowledge.get(&AgentId(1)).unwrap();
        assert_eq!(self_record.house, HouseId(1));
        assert_eq!(self_record.location, HouseId(1));
        assert_eq!(self_record.time, SimTime::ZERO);
    }

    #[test]
    fn observation_is_last_writer_wins() {
        let mut a = basic_agent(1, &[]);
        let mut b = basic_agent(2, &[]);
        a.observe(&b, SimTime(5));
        assert_eq!(a.knowledge.get(&AgentId(2)).unwrap().pet, "pet-2");

        b.pet = "zebra".into();
        a.observe(&b, SimTime(9));
        let record = a.knowledge.get(&AgentId(2)).unwrap();
        assert_eq!(record.pet, "zebra");
        assert_eq!(record.time, SimTime(9));
    }

    #[test]
    fn mobility_state_derivation() {
        let mut a = basic_agent(1, &[]);
        assert_eq!(a.state(), MobilityState::AtHome);
        a.travelling = true;
        assert_eq!(a.state(), MobilityState::Travelling);
        a.travelling = false;
        a.location = HouseId(2);
        assert_eq!(a.state(), MobilityState::Visiting);
    }

    #[test]
    fn destination_none_when_isolated() {
        let world = three_house_world(&[]);
        let isolated = TravelMatrix::new(3); // diagonal only
        let mut rng = AgentRng::new(1, AgentId(1));
        let a = world.agent(AgentId(1)).unwrap();
        assert_eq!(
            a.choose_destination(&isolated, &world.houses, &world.colors, &mut rng),
            None
        );
    }

    #[test]
    fn zero_weights_fall_back_to_uniform() {
        let world = three_house_world(&[]);
        let a = world.agent(AgentId(1)).unwrap();
        let mut rng = AgentRng::new(42, AgentId(1));
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            let dest = a
                .choose_destination(&world.matrix, &world.houses, &world.colors, &mut rng)
                .unwrap();
            assert_ne!(dest, HouseId(1), "never picks own location");
            seen.insert(dest);
        }
        assert_eq!(seen.len(), 2, "uniform pick covers both candidates");
    }

    #[test]
    fn weighted_draw_respects_dominant_weight() {
        // All weight on the color of house 3 ("blue", index 3).
        let world = three_house_world(&[(3, 100)]);
        let a = world.agent(AgentId(1)).unwrap();
        let mut rng = AgentRng::new(7, AgentId(1));
        for _ in 0..100 {
            let dest = a
                .choose_destination(&world.matrix, &world.houses, &world.colors, &mut rng)
                .unwrap();
            assert_eq!(dest, HouseId(3));
        }
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

mod world {
    use super::*;

    #[test]
    fn owners_placed_at_start() {
        let world = three_house_world(&[]);
        for house in world.houses.values() {
            assert!(house.owner_present(), "house {} owner absent", house.id);
        }
    }

    #[test]
    fn unknown_owner_rejected() {
        let mut agents = BTreeMap::new();
        agents.insert(AgentId(1), basic_agent(1, &[]));
        let mut houses = BTreeMap::new();
        houses.insert(HouseId(1), House::new(HouseId(1), "red", AgentId(9)));
        assert!(World::new(agents, houses, TravelMatrix::new(1)).is_err());
    }

    #[test]
    fn undersized_matrix_rejected() {
        let mut agents = BTreeMap::new();
        let mut houses = BTreeMap::new();
        for id in 1..=2u32 {
            agents.insert(AgentId(id), basic_agent(id, &[]));
            houses.insert(HouseId(id), House::new(HouseId(id), "red", AgentId(id)));
        }
        assert!(World::new(agents, houses, TravelMatrix::new(1)).is_err());
    }

    #[test]
    fn mutual_observation_updates_both() {
        let mut world = three_house_world(&[]);
        world
            .observe_each_other(AgentId(1), AgentId(2), SimTime(3))
            .unwrap();
        let a = world.agent(AgentId(1)).unwrap();
        let b = world.agent(AgentId(2)).unwrap();
        assert_eq!(a.knowledge.get(&AgentId(2)).unwrap().time, SimTime(3));
        assert_eq!(b.knowledge.get(&AgentId(1)).unwrap().time, SimTime(3));
    }

    #[test]
    fn witness_is_one_way() {
        let mut world = three_house_world(&[]);
        world.witness(AgentId(1), AgentId(3), SimTime(4)).unwrap();
        assert!(world
            .agent(AgentId(1))
            .unwrap()
            .knowledge
            .contains_key(&AgentId(3)));
        assert!(!world
            .agent(AgentId(3))
            .unwrap()
            .knowledge
            .contains_key(&AgentId(1)));
    }
}
