use std::ops::Mul;

/// 2×3 affine matrix mapping image space onto the canvas.
///
/// A point is mapped as `x' = xx·x + xy·y + dx`, `y' = yx·x + yy·y + dy`,
/// matching the field layout of common canvas matrices. Multiplication
/// applies the right-hand operand first: `(a * b).apply(p)` equals
/// `a.apply(b.apply(p))`, so `translation(..) * scale(..) * rotation(..)`
/// rotates, then scales, then translates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        xx: 1.0,
        yx: 0.0,
        xy: 0.0,
        yy: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            ..Self::IDENTITY
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            xx: sx,
            yy: sy,
            ..Self::IDENTITY
        }
    }

    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            xx: cos,
            yx: sin,
            xy: -sin,
            yy: cos,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.xx * x + self.xy * y + self.dx,
            self.yx * x + self.yy * y + self.dy,
        )
    }
}

impl Mul for Transform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            xx: self.xx * rhs.xx + self.xy * rhs.yx,
            yx: self.yx * rhs.xx + self.yy * rhs.yx,
            xy: self.xx * rhs.xy + self.xy * rhs.yy,
            yy: self.yx * rhs.xy + self.yy * rhs.yy,
            dx: self.xx * rhs.dx + self.xy * rhs.dy + self.dx,
            dy: self.yx * rhs.dx + self.yy * rhs.dy + self.dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_point((x, y): (f64, f64), ex: f64, ey: f64) {
        assert!((x - ex).abs() < 1e-12 && (y - ey).abs() < 1e-12, "({x}, {y})");
    }

    #[test]
    fn identity_maps_points_unchanged() {
        assert_point(Transform::IDENTITY.apply(3.5, -2.0), 3.5, -2.0);
    }

    #[test]
    fn positive_rotation_maps_x_axis_onto_y() {
        assert_point(Transform::rotation(FRAC_PI_2).apply(1.0, 0.0), 0.0, 1.0);
    }

    #[test]
    fn right_operand_applies_first() {
        let a = Transform::translation(5.0, 0.0) * Transform::scale(2.0, 2.0);
        assert_point(a.apply(1.0, 1.0), 7.0, 2.0);

        let b = Transform::scale(2.0, 2.0) * Transform::translation(5.0, 0.0);
        assert_point(b.apply(1.0, 1.0), 12.0, 2.0);
    }

    #[test]
    fn composed_equals_sequential_application() {
        let rotate = Transform::rotation(0.7);
        let scale = Transform::scale(1.5, 0.5);
        let translate = Transform::translation(-3.0, 8.0);
        let composed = translate * scale * rotate;

        let (x1, y1) = rotate.apply(2.0, -1.0);
        let (x2, y2) = scale.apply(x1, y1);
        let (ex, ey) = translate.apply(x2, y2);
        assert_point(composed.apply(2.0, -1.0), ex, ey);
    }
}
