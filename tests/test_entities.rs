use bunny_run::entities::*;

#[test]
fn rect_edges() {
    let r = Rect::new(10, 20, 64, 32);
    assert_eq!((r.left(), r.right(), r.top(), r.bottom()), (10, 74, 20, 52));
    assert_eq!(r.center_x(), 42);
}

#[test]
fn rect_edge_setters_keep_size() {
    let mut r = Rect::cell(0, 0, 64);
    r.set_right(100);
    assert_eq!(r, Rect::cell(36, 0, 64));
    r.set_bottom(70);
    assert_eq!(r, Rect::cell(36, 6, 64));
}

#[test]
fn shared_edges_do_not_overlap() {
    let a = Rect::cell(0, 0, 64);
    assert!(!a.overlaps(&Rect::cell(64, 0, 64)));
    assert!(!a.overlaps(&Rect::cell(0, 64, 64)));
    assert!(a.overlaps(&Rect::cell(63, 63, 64)));
}

#[test]
fn facing_from_velocity() {
    assert_eq!(Facing::Left.from_velocity(3), Facing::Right);
    assert_eq!(Facing::Right.from_velocity(-1), Facing::Left);
    assert_eq!(Facing::Left.from_velocity(0), Facing::Left);
}

#[test]
fn enemy_behaviors() {
    assert_eq!(
        EnemyKind::Patrol.behavior(),
        Behavior { gravity: true, edge_aware: false }
    );
    assert_eq!(
        EnemyKind::EdgeAwarePatrol.behavior(),
        Behavior { gravity: true, edge_aware: true }
    );
    assert_eq!(
        EnemyKind::Flyer.behavior(),
        Behavior { gravity: false, edge_aware: false }
    );
}
