/// Axis-aligned footprint of a placed node. `x` is the left edge, `y` the
/// vertical center; height extends `height / 2` above and below `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Padded interval-intersection test on both axes. Symmetric in its
/// arguments; a box always overlaps itself for padding >= 0.
pub fn overlaps(a: &BBox, b: &BBox, padding: f32) -> bool {
    let a_x_min = a.x - padding;
    let a_x_max = a.x + a.width + padding;
    let a_y_min = a.y - a.height / 2.0 - padding;
    let a_y_max = a.y + a.height / 2.0 + padding;

    let b_x_min = b.x - padding;
    let b_x_max = b.x + b.width + padding;
    let b_y_min = b.y - b.height / 2.0 - padding;
    let b_y_max = b.y + b.height / 2.0 + padding;

    !(a_x_max < b_x_min || b_x_max < a_x_min || a_y_max < b_y_min || b_y_max < a_y_min)
}

/// Square canvas extent covering every box's far edge plus padding, never
/// below `min_size`. Empty input collapses to `min_size`.
pub fn canvas_size(boxes: &[BBox], min_size: f32, padding: f32) -> f32 {
    let max_x = boxes
        .iter()
        .map(|b| b.x + b.width)
        .fold(0.0f32, f32::max);
    let max_y = boxes
        .iter()
        .map(|b| b.y.abs() + b.height / 2.0)
        .fold(0.0f32, f32::max);
    min_size.max(max_x.max(max_y) + padding)
}
