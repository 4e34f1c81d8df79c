//! Integration tests verifying cross-replica convergence.
//!
//! For any CvRDT, merging payloads of the same identity in any order,
//! any association, and any number of repetitions must produce
//! state-equivalent results on every replica.

use convergent::clock::ManualClock;
use convergent::prelude::*;
use convergent::CrdtError;

#[test]
fn gcounter_three_way_merge_orders_agree() {
    let a = GCounter::initial("hits").increment("a");
    let b = GCounter::initial("hits").increment("b").increment("b");
    let c = GCounter::initial("hits").increment("c").increment("c").increment("c");

    let order1 = a.merge(&b).unwrap().merge(&c).unwrap();
    let order2 = c.merge(&a).unwrap().merge(&b).unwrap();
    let order3 = b.merge(&c).unwrap().merge(&a).unwrap();

    assert_eq!(order1.value(), 6);
    assert_eq!(order2.value(), 6);
    assert_eq!(order3.value(), 6);
    assert!(order1.compare(&order2).unwrap());
    assert!(order2.compare(&order3).unwrap());
}

#[test]
fn pncounter_concurrent_ops_converge() {
    let a = PNCounter::initial("stock")
        .increment("a")
        .increment("a")
        .decrement("a");
    let b = PNCounter::initial("stock")
        .decrement("b")
        .decrement("b")
        .increment("b");

    let ab = a.merge(&b).unwrap();
    let ba = b.merge(&a).unwrap();

    assert!(ab.compare(&ba).unwrap());
    assert_eq!(ab.value(), 0); // (2 - 1) + (1 - 2)
}

#[test]
fn twopset_remove_wins_over_concurrent_add() {
    let a = TwoPSet::initial("cart").add("x").remove("x");
    let b = TwoPSet::initial("cart").add("x");

    let merged = a.merge(&b).unwrap();
    assert!(!merged.contains(&"x"), "2P-Set: remove is permanent");
}

#[test]
fn uset_ghost_removal_diverges_from_twopset() {
    // Removing a never-added element: a no-op for U-Set...
    let u = USet::<&str>::initial("cart");
    assert!(u.compare(&u.remove("ghost")).unwrap());

    // ...but an observable tombstone for 2P-Set.
    let tp = TwoPSet::<&str>::initial("cart");
    assert!(!tp.compare(&tp.remove("ghost")).unwrap());
}

#[test]
fn uset_guard_is_local_only() {
    // Replica b never observed the add, so its remove is a no-op; the
    // element survives the exchange.
    let a = USet::initial("cart").add("x");
    let b = USet::<&str>::initial("cart").remove("x");

    let merged = a.merge(&b).unwrap();
    assert!(merged.contains(&"x"));
}

#[test]
fn lww_register_concurrent_assigns_converge() {
    let clock = ManualClock::starting_at(100);
    let shared = LWWRegister::initial("title", "draft", "p0", &clock);

    // Two replicas assign concurrently at different instants.
    clock.advance(1);
    let a = shared.assign("from-a", "pa", &clock).unwrap();
    clock.advance(1);
    let b = shared.assign("from-b", "pb", &clock).unwrap();

    clock.advance(1);
    let ab = a.merge(&b, &clock).unwrap();
    let ba = b.merge(&a, &clock).unwrap();

    assert!(ab.compare(&ba).unwrap());
    assert_eq!(*ab.value(), "from-b");
    assert_eq!(ab.writer_id(), "pb");
    assert_eq!(ab.timestamp(), 102);
}

#[test]
fn lww_register_tie_resolves_by_writer_on_both_sides() {
    let clock = ManualClock::starting_at(100);
    let a = LWWRegister::initial("title", "from-a", "pa", &clock);
    let b = LWWRegister::initial("title", "from-b", "pb", &clock);

    clock.advance(1);
    let ab = a.merge(&b, &clock).unwrap();
    let ba = b.merge(&a, &clock).unwrap();

    assert!(ab.compare(&ba).unwrap());
    assert_eq!(*ab.value(), "from-b");
}

#[test]
fn lww_element_set_out_of_order_remove_resolves_by_timestamp() {
    let clock = ManualClock::starting_at(1);
    let shared = LWWElementSet::initial("tags").add("x", &clock);

    // Replica a removes at t=3; replica b re-adds at t=2. The remove is
    // newer, so it wins regardless of merge order.
    clock.set(3);
    let a = shared.remove("x", &clock);
    clock.set(2);
    let b = shared.add("x", &clock);

    let ab = a.merge(&b).unwrap();
    let ba = b.merge(&a).unwrap();

    assert!(ab.compare(&ba).unwrap());
    assert!(!ab.contains(&"x"));
}

#[test]
fn lww_element_set_add_remove_readd_is_member() {
    let clock = ManualClock::starting_at(1);
    let mut s = LWWElementSet::initial("tags");
    for _ in 0..3 {
        s = s.add("x", &clock);
        clock.advance(1);
        s = s.remove("x", &clock);
        clock.advance(1);
    }
    s = s.add("x", &clock);
    assert!(s.contains(&"x"));
}

#[test]
fn repeated_merge_is_idempotent() {
    let a = GSet::initial("tags").add(1).add(2);
    let b = GSet::initial("tags").add(2).add(3);

    let merged = a.merge(&b).unwrap();
    let twice = merged.merge(&b).unwrap();
    let thrice = twice.merge(&b).unwrap();

    assert!(merged.compare(&twice).unwrap());
    assert!(merged.compare(&thrice).unwrap());
}

#[test]
fn identity_mismatch_fails_for_every_type() {
    assert!(matches!(
        GCounter::initial("x").merge(&GCounter::initial("y")),
        Err(CrdtError::IdentityMismatch { .. })
    ));
    assert!(matches!(
        GSet::<u8>::initial("x").compare(&GSet::initial("y")),
        Err(CrdtError::IdentityMismatch { .. })
    ));
    assert!(matches!(
        PNCounter::initial("x").merge(&PNCounter::initial("y")),
        Err(CrdtError::IdentityMismatch { .. })
    ));
    assert!(matches!(
        TwoPSet::<u8>::initial("x").merge(&TwoPSet::initial("y")),
        Err(CrdtError::IdentityMismatch { .. })
    ));
    assert!(matches!(
        USet::<u8>::initial("x").merge(&USet::initial("y")),
        Err(CrdtError::IdentityMismatch { .. })
    ));
    assert!(matches!(
        LWWElementSet::<u8>::initial("x").merge(&LWWElementSet::initial("y")),
        Err(CrdtError::IdentityMismatch { .. })
    ));

    let clock = ManualClock::starting_at(1);
    let a = LWWRegister::initial("x", 0u8, "p1", &clock);
    let b = LWWRegister::initial("y", 0u8, "p1", &clock);
    clock.advance(1);
    assert!(matches!(
        a.merge(&b, &clock),
        Err(CrdtError::IdentityMismatch { .. })
    ));
}

#[test]
fn composed_payloads_survive_nested_merges() {
    // PN-Counter merges recurse into identified G-Counter sub-payloads;
    // a deep three-way exchange must keep both directions intact.
    let a = PNCounter::initial("stock").increment("a").increment("a");
    let b = PNCounter::initial("stock").decrement("b");
    let c = PNCounter::initial("stock").increment("c").decrement("c");

    let left = a.merge(&b).unwrap().merge(&c).unwrap();
    let right = a.merge(&b.merge(&c).unwrap()).unwrap();

    assert!(left.compare(&right).unwrap());
    assert_eq!(left.value(), 1); // 2 - 1 + 1 - 1
}
