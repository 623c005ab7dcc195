use std::f64::consts::FRAC_1_SQRT_2;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

pub const SQRT_1_2: f64 = FRAC_1_SQRT_2;
/// tan(22.5°), half the opening of a root wedge.
pub const TAN_PI_8: f64 = std::f64::consts::SQRT_2 - 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reflects across the horizontal axis.
    pub fn flip(self) -> Self {
        Self::new(self.x, -self.y)
    }

    pub fn scale(self, k: f64) -> Self {
        Self::new(k * self.x, k * self.y)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs.scale(self)
    }
}

/// Screen-space name of an octant. Screen y grows downwards, so the octants
/// run clockwise on screen starting from east.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum Compass {
    #[strum(serialize = "E")]
    East,
    #[strum(serialize = "SE")]
    SouthEast,
    #[strum(serialize = "S")]
    South,
    #[strum(serialize = "SW")]
    SouthWest,
    #[strum(serialize = "W")]
    West,
    #[strum(serialize = "NW")]
    NorthWest,
    #[strum(serialize = "N")]
    North,
    #[strum(serialize = "NE")]
    NorthEast,
}

/// One of eight orientations spaced 45° apart, stored as an index modulo 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rotor(u8);

impl Rotor {
    pub const IDENTITY: Self = Self(0);
    /// +90°, the turn into a right child.
    pub const RIGHT_TURN: Self = Self(2);
    /// −90°, the turn into a left child.
    pub const LEFT_TURN: Self = Self(6);

    pub const fn new(index: u8) -> Self {
        Self(index & 7)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).map(Self)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn compose(self, other: Self) -> Self {
        Self::new(self.0.wrapping_add(other.0))
    }

    pub const fn invert(self) -> Self {
        Self::new(self.0.wrapping_neg())
    }

    pub fn compass(self) -> Compass {
        Compass::iter().nth(self.index()).unwrap_or(Compass::East)
    }

    /// Rotates `v` by `45° * index`. Each bit of the index selects one step:
    /// bit 2 turns by 180°, bit 1 by 90°, bit 0 by 45°.
    pub fn apply(self, v: Vec2) -> Vec2 {
        let Vec2 { mut x, mut y } = v;
        if self.0 & 4 != 0 {
            x = -x;
            y = -y;
        }
        if self.0 & 2 != 0 {
            (x, y) = (-y, x);
        }
        if self.0 & 1 != 0 {
            (x, y) = (SQRT_1_2 * x - SQRT_1_2 * y, SQRT_1_2 * x + SQRT_1_2 * y);
        }
        Vec2::new(x, y)
    }
}

impl std::fmt::Display for Rotor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.0, self.compass())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        let tol = 1e-9 * (1.0 + a.length().max(b.length()));
        (a - b).length() <= tol
    }

    #[test]
    fn test_index_wraps_modulo_eight() {
        assert_eq!(Rotor::new(9).index(), 1);
        assert_eq!(Rotor::new(5).compose(Rotor::new(6)).index(), 3);
        assert_eq!(Rotor::new(3).invert().index(), 5);
        assert_eq!(Rotor::IDENTITY.invert(), Rotor::IDENTITY);
    }

    #[test]
    fn test_compose_with_inverse_is_identity() {
        for r in Rotor::all() {
            assert_eq!(r.compose(r.invert()), Rotor::IDENTITY);
        }
    }

    #[test]
    fn test_apply_steps_by_45_degrees() {
        let e = Vec2::new(1.0, 0.0);
        assert!(close(Rotor::new(2).apply(e), Vec2::new(0.0, 1.0)));
        assert!(close(Rotor::new(4).apply(e), Vec2::new(-1.0, 0.0)));
        assert!(close(Rotor::new(6).apply(e), Vec2::new(0.0, -1.0)));
        assert!(close(Rotor::new(1).apply(e), Vec2::new(SQRT_1_2, SQRT_1_2)));
        for r in Rotor::all() {
            let angle = r.index() as f64 * std::f64::consts::FRAC_PI_4;
            assert!(close(r.apply(e), Vec2::new(angle.cos(), angle.sin())));
        }
    }

    #[test]
    fn test_compass_names() {
        assert_eq!(Rotor::new(0).compass(), Compass::East);
        assert_eq!(Rotor::new(2).compass(), Compass::South);
        assert_eq!(Rotor::new(7).to_string(), "7 (NE)");
    }

    #[test]
    fn test_vector_ops() {
        let a = Vec2::new(3.0, -4.0);
        assert_eq!(a.flip(), Vec2::new(3.0, 4.0));
        assert_eq!(-a, Vec2::new(-3.0, 4.0));
        assert_eq!(2.0 * a, Vec2::new(6.0, -8.0));
        assert_eq!(a - a, Vec2::ZERO);
        assert_eq!(a.length(), 5.0);
    }

    fn rotor() -> impl Strategy<Value = Rotor> {
        (0u8..8).prop_map(Rotor::new)
    }

    fn vector() -> impl Strategy<Value = Vec2> {
        (-1e4f64..1e4, -1e4f64..1e4).prop_map(|(x, y)| Vec2::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_inverse_undoes_rotation(r in rotor(), v in vector()) {
            prop_assert!(close(r.invert().apply(r.apply(v)), v));
        }

        #[test]
        fn prop_compose_matches_sequential_apply(a in rotor(), b in rotor(), v in vector()) {
            prop_assert!(close(a.compose(b).apply(v), a.apply(b.apply(v))));
        }
    }
}
