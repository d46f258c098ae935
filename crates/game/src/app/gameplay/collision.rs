use dino_engine::Rect;

use super::obstacles::Obstacle;

/// Half-open rectangle test: rectangles that only share an edge do not
/// overlap.
pub(crate) fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// Index of the first obstacle hitting `hitbox`, in spawn order.
pub(crate) fn first_hit(hitbox: Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|obstacle| overlaps(hitbox, obstacle.rect()))
}
