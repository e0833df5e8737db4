mod common;

use bunny_run::entities::{Body, Rect};
use bunny_run::physics::*;
use bunny_run::terrain::Terrain;

use common::{cell_rect, terrain_of, CELL};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── apply_gravity ─────────────────────────────────────────────────────────────

#[test]
fn gravity_accelerates_downward() {
    let mut body = Body::at_rest(cell_rect(0, 0));
    apply_gravity(&mut body, 1, 32);
    assert_eq!(body.vy, 1);
    apply_gravity(&mut body, 1, 32);
    assert_eq!(body.vy, 2);
}

#[test]
fn gravity_clamps_at_terminal_velocity() {
    let mut body = Body { vy: 30, ..Body::at_rest(cell_rect(0, 0)) };
    apply_gravity(&mut body, 5, 32);
    assert_eq!(body.vy, 32);
    apply_gravity(&mut body, 5, 32);
    assert_eq!(body.vy, 32);
}

#[test]
fn gravity_never_exceeds_terminal_velocity() {
    let mut rng = seeded_rng();
    for _ in 0..1000 {
        let mut body = Body {
            vy: rng.gen_range(-100..100),
            ..Body::at_rest(cell_rect(0, 0))
        };
        let gravity = rng.gen_range(0..10);
        let terminal = rng.gen_range(1..50);
        apply_gravity(&mut body, gravity, terminal);
        assert!(body.vy <= terminal);
    }
}

// ── single-axis resolution ────────────────────────────────────────────────────

#[test]
fn moving_right_stops_at_left_face_of_block() {
    let terrain = terrain_of(&[(2, 0)]);
    let mut rect = Rect::cell(60, 0, CELL);
    let hits = sweep_x(&mut rect, 10, &terrain);
    assert_eq!(hits.len(), 1);
    assert_eq!(rect.right(), 2 * CELL);
}

#[test]
fn moving_left_stops_at_right_face_of_block() {
    let terrain = terrain_of(&[(0, 0)]);
    let mut rect = Rect::cell(70, 0, CELL);
    sweep_x(&mut rect, -10, &terrain);
    assert_eq!(rect.left(), CELL);
}

#[test]
fn falling_stops_on_top_face_and_lands() {
    let terrain = terrain_of(&[(0, 2)]);
    let mut body = Body {
        vy: 10,
        ..Body::at_rest(Rect::cell(0, 60, CELL))
    };
    let collision = move_and_collide(&mut body, &terrain);
    assert!(collision.landed());
    assert_eq!(body.rect.bottom(), 2 * CELL);
    assert_eq!(body.vy, 0);
}

#[test]
fn rising_stops_at_bottom_face() {
    let terrain = terrain_of(&[(0, 0)]);
    let mut body = Body {
        vy: -10,
        ..Body::at_rest(Rect::cell(0, 70, CELL))
    };
    let collision = move_and_collide(&mut body, &terrain);
    assert!(!collision.landed());
    assert_eq!(body.rect.top(), CELL);
    assert_eq!(body.vy, 0);
}

#[test]
fn horizontal_hit_leaves_velocity_to_caller() {
    let terrain = terrain_of(&[(2, 0)]);
    let mut body = Body {
        vx: 10,
        ..Body::at_rest(Rect::cell(60, 0, CELL))
    };
    let collision = move_and_collide(&mut body, &terrain);
    assert!(collision.hit_wall);
    assert_eq!(body.vx, 10);
}

#[test]
fn sliding_along_floor_is_not_a_wall_hit() {
    let terrain = terrain_of(&[(0, 1), (1, 1), (2, 1)]);
    let mut body = Body {
        vx: 5,
        vy: 1,
        ..Body::at_rest(cell_rect(0, 0))
    };
    let collision = move_and_collide(&mut body, &terrain);
    assert!(!collision.hit_wall);
    assert!(collision.landed());
    assert_eq!(body.rect, Rect::cell(5, 0, CELL));
}

#[test]
fn landing_across_a_seam_reports_both_blocks() {
    let terrain = terrain_of(&[(0, 1), (1, 1)]);
    let mut body = Body {
        vy: 3,
        ..Body::at_rest(Rect::cell(30, 0, CELL))
    };
    let collision = move_and_collide(&mut body, &terrain);
    assert_eq!(collision.landed_on, vec![cell_rect(0, 1), cell_rect(1, 1)]);
    assert_eq!(body.rect, Rect::cell(30, 0, CELL));
}

#[test]
fn wall_hit_across_a_seam_reports_both_blocks() {
    let terrain = terrain_of(&[(2, 0), (2, 1)]);
    let mut rect = Rect::cell(60, 30, CELL);
    let hits = sweep_x(&mut rect, 10, &terrain);
    assert_eq!(hits, vec![cell_rect(2, 0), cell_rect(2, 1)]);
    assert_eq!(rect.right(), 2 * CELL);
}

// ── corners ───────────────────────────────────────────────────────────────────

#[test]
fn diagonal_move_into_corner_does_not_tunnel() {
    // Floor along row 2 with a wall rising at column 2.
    let terrain = terrain_of(&[(0, 2), (1, 2), (2, 2), (2, 1)]);
    let mut body = Body {
        vx: 20,
        vy: 20,
        ..Body::at_rest(Rect::cell(50, 50, CELL))
    };
    let collision = move_and_collide(&mut body, &terrain);
    assert!(collision.hit_wall);
    assert!(collision.landed());
    assert_eq!(body.rect, Rect::cell(CELL, CELL, CELL));
    assert!(!terrain.any_overlap(&body.rect));
}

#[test]
fn random_moves_never_end_inside_terrain() {
    let mut rng = seeded_rng();
    let mut cells = Vec::new();
    for x in 0..12 {
        for y in 0..12 {
            if rng.gen_ratio(1, 4) {
                cells.push((x, y));
            }
        }
    }
    let terrain = terrain_of(&cells);

    for _ in 0..50 {
        // Start in a free cell.
        let (x, y) = loop {
            let c = (rng.gen_range(0..12), rng.gen_range(0..12));
            if !cells.contains(&c) {
                break c;
            }
        };
        let mut body = Body::at_rest(cell_rect(x, y));
        for _ in 0..200 {
            body.vx = rng.gen_range(-40..=40);
            body.vy = rng.gen_range(-40..=40);
            move_and_collide(&mut body, &terrain);
            assert!(
                !terrain.any_overlap(&body.rect),
                "ended inside terrain at {:?}",
                body.rect
            );
        }
    }
}

#[test]
fn empty_terrain_never_collides() {
    let terrain = Terrain::new(Vec::new(), CELL);
    let mut body = Body {
        vx: 7,
        vy: 9,
        ..Body::at_rest(cell_rect(1, 1))
    };
    let collision = move_and_collide(&mut body, &terrain);
    assert_eq!(collision, Collision::default());
    assert_eq!(body.rect, Rect::cell(CELL + 7, CELL + 9, CELL));
}

// ── world bounds ──────────────────────────────────────────────────────────────

#[test]
fn clamp_to_world_left_edge() {
    let mut rect = Rect::cell(-5, 0, CELL);
    assert_eq!(clamp_to_world(&mut rect, 640), Some(Boundary::Left));
    assert_eq!(rect.left(), 0);
}

#[test]
fn clamp_to_world_right_edge() {
    let mut rect = Rect::cell(600, 0, CELL);
    assert_eq!(clamp_to_world(&mut rect, 640), Some(Boundary::Right));
    assert_eq!(rect.right(), 640);
}

#[test]
fn clamp_to_world_inside_is_untouched() {
    let mut rect = Rect::cell(100, 0, CELL);
    assert_eq!(clamp_to_world(&mut rect, 640), None);
    assert_eq!(rect.x, 100);
}

#[test]
fn clamped_actor_always_inside_world() {
    let mut rng = seeded_rng();
    for _ in 0..1000 {
        let mut rect = Rect::cell(rng.gen_range(-500..1500), 0, CELL);
        clamp_to_world(&mut rect, 1024);
        assert!(rect.left() >= 0 && rect.right() <= 1024);
    }
}

// ── ground probe ──────────────────────────────────────────────────────────────

#[test]
fn probe_finds_ground_directly_below() {
    let terrain = terrain_of(&[(0, 1)]);
    assert!(probe_ground(&cell_rect(0, 0), &terrain));
}

#[test]
fn probe_misses_when_airborne() {
    let terrain = terrain_of(&[(0, 3)]);
    assert!(!probe_ground(&cell_rect(0, 0), &terrain));
}

#[test]
fn probe_does_not_move_the_rect() {
    let terrain = terrain_of(&[(0, 1)]);
    let rect = cell_rect(0, 0);
    probe_ground(&rect, &terrain);
    assert_eq!(rect, cell_rect(0, 0));
}

// ── terrain index ─────────────────────────────────────────────────────────────

#[test]
fn terrain_query_returns_load_order() {
    let terrain = terrain_of(&[(3, 0), (1, 0), (2, 0)]);
    let wide = Rect::new(0, 0, 5 * CELL, CELL);
    let hits = terrain.overlapping(&wide);
    assert_eq!(hits, vec![cell_rect(3, 0), cell_rect(1, 0), cell_rect(2, 0)]);
}

#[test]
fn terrain_query_ignores_touching_edges() {
    let terrain = terrain_of(&[(1, 0)]);
    assert!(terrain.overlapping(&cell_rect(0, 0)).is_empty());
    assert!(terrain.overlapping(&cell_rect(2, 0)).is_empty());
}

#[test]
fn terrain_handles_negative_coordinates() {
    let terrain = terrain_of(&[(-1, 0)]);
    assert!(terrain.any_overlap(&Rect::cell(-10, 0, CELL)));
}
