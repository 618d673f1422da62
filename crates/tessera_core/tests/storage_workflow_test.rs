//! # Storage Workflow
//!
//! Identities addressing component arrays, component bits set per entity from
//! the type index registry, and matching entities found by intersecting
//! bitmasks.

use tessera_core::{
    Bag, BitSet, IdentityAllocator, IntBag, OffsetBag, SetBits, TesseraConfig, TypeIndexRegistry,
};

trait Component {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position(f32, f32);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity(f32, f32);

impl Component for Position {}
impl Component for Velocity {}

#[test]
fn test_spawn_attach_query_despawn() {
    let registry = TypeIndexRegistry::new();
    let position_bit = registry.index_of::<Position, dyn Component>();
    let velocity_bit = registry.index_of::<Velocity, dyn Component>();

    let mut ids = IdentityAllocator::new(0, 1_024).unwrap();
    let mut positions: Bag<Position> = Bag::with_capacity(8);
    let mut velocities: Bag<Velocity> = Bag::with_capacity(8);
    let mut with_position = BitSet::new();
    let mut with_velocity = BitSet::new();
    let mut masks: Bag<BitSet> = Bag::with_capacity(8);

    for i in 0..100u32 {
        let entity = ids.alloc() as usize;
        let mut mask = BitSet::new();

        positions.set(entity, Position(i as f32, 0.0));
        with_position.insert(entity);
        mask.insert(position_bit);

        if i % 3 == 0 {
            velocities.set(entity, Velocity(1.0, 0.0));
            with_velocity.insert(entity);
            mask.insert(velocity_bit);
        }
        masks.set(entity, mask);
    }

    let mut moving = with_position.clone();
    moving.intersect_with(&with_velocity);
    let matched: Vec<usize> = moving.iter().collect();
    assert_eq!(matched.len(), 34);
    assert!(matched.iter().all(|e| e % 3 == 0));

    for entity in moving.iter() {
        let velocity = *velocities.get(entity).unwrap();
        let position = positions.get_mut(entity).unwrap();
        position.0 += velocity.0;
    }
    assert_eq!(positions.get(3), Some(&Position(4.0, 0.0)));
    assert_eq!(positions.get(4), Some(&Position(4.0, 0.0)));

    // Despawn entity 3 and reuse its identity
    with_position.remove(3);
    with_velocity.remove(3);
    masks.set(3, BitSet::new());
    ids.free(3).unwrap();
    assert_eq!(ids.alloc(), 3);
    assert!(!masks.get(3).unwrap().contains(velocity_bit));
}

#[test]
fn test_config_drives_construction() {
    let config = TesseraConfig::from_toml_str(
        "[array]\ninitial_capacity = 8\ngrowth_threshold = 16\n\n[identity]\nstart = 1\nend = 33\n",
    )
    .unwrap();

    let mut ids = IdentityAllocator::from_config(&config.identity).unwrap();
    let mut values = IntBag::from_config(&config.array);
    while let Ok(id) = ids.try_alloc() {
        values.set(id as usize, id * 2);
    }

    assert_eq!(values.len(), 33);
    // 8 -> 16 doubling, then 1.5x once 16 elements were reached
    assert_eq!(values.capacity(), 36);
    assert_eq!(values.get(32), 64);
    assert_eq!(values.get(0), 0);
}

#[test]
fn test_secondary_index_in_offset_bag() {
    // External identities clustered far from zero
    let mut by_external: OffsetBag<u32> = OffsetBag::with_capacity(4);
    for (local, external) in [(0u32, 90_010usize), (1, 90_004), (2, 90_007)] {
        by_external.add(external, local);
    }
    assert_eq!(by_external.offset(), 90_004);
    assert_eq!(by_external.len(), 7);
    assert_eq!(by_external.get(90_007), Some(&2));

    by_external.remove(90_004);
    assert_eq!(by_external.offset(), 90_007);
    let entries: Vec<_> = by_external.iter().collect();
    assert_eq!(entries, vec![(90_007, &2), (90_010, &0)]);
}

#[test]
fn test_enumerate_caller_owned_words() {
    let words: [u64; 2] = [0b1010, 0b1];
    let mut bits = SetBits::new(words);
    assert_eq!(bits.next(), Some(1));
    bits.reset();
    assert_eq!(bits.collect::<Vec<_>>(), vec![1, 3, 64]);
}
