/// Stateless collision predicates on axis-aligned rectangles.
use crate::entities::Rect;

/// Strict AABB overlap.  Touching edges do not count.
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// True when `body` is standing on (or sinking into) the top of `platform`.
///
/// Requires horizontal overlap, the body's bottom edge inside the platform's
/// vertical extent, and the body's top edge above the platform top.  Side and
/// underside contacts never qualify.
pub fn check_platform_collision(body: &Rect, platform: &Rect) -> bool {
    body.x < platform.right()
        && body.right() > platform.x
        && body.bottom() >= platform.y
        && body.bottom() <= platform.bottom()
        && body.y < platform.y
}
