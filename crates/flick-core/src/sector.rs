use crate::geometry::{Rotor, SQRT_1_2, Vec2};

/// A displacement resolved against the eight root wedges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub rot: Rotor,
    /// The displacement expressed in `rot`'s frame; `x` is the radial distance
    /// along the wedge axis.
    pub local: Vec2,
}

/// Finds the root wedge containing `pos` by folding it in half three times.
///
/// Only additions, comparisons and √½ are used, so wedge edges resolve the
/// same way on every platform. Comparisons are strict, so a point exactly on
/// a fold line stays on the unfolded side.
pub fn classify(pos: Vec2) -> Sector {
    let mut side = 0u8;
    let Vec2 { mut x, mut y } = pos;
    // coordinates along the two diagonals
    let mut a = SQRT_1_2 * (x + y);
    let mut b = SQRT_1_2 * (y - x);

    // behind the edge shared by wedges 7|0 and 3|4: turn the half plane over
    if x < -b {
        side = 4;
        (x, y, a, b) = (-x, -y, -a, -b);
    }

    // past the 1|2 edge: quarter turn back
    if x < b {
        side += 2;
        (x, y, a, b) = (y, -x, b, -a);
    }

    if x < a {
        Sector {
            rot: Rotor::new(side + 1),
            local: Vec2::new(a, b),
        }
    } else {
        Sector {
            rot: Rotor::new(side),
            local: Vec2::new(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::TAN_PI_8;

    #[test]
    fn test_axis_points() {
        let cases = [
            (Vec2::new(1.0, 0.0), 0),
            (Vec2::new(1.0, 1.0), 1),
            (Vec2::new(0.0, 1.0), 2),
            (Vec2::new(-1.0, 1.0), 3),
            (Vec2::new(-1.0, 0.0), 4),
            (Vec2::new(-1.0, -1.0), 5),
            (Vec2::new(0.0, -1.0), 6),
            (Vec2::new(1.0, -1.0), 7),
        ];
        for (pos, expected) in cases {
            let sector = classify(pos);
            assert_eq!(sector.rot.index(), expected, "classifying {:?}", pos);
            assert!((sector.local.x - pos.length()).abs() < 1e-12);
            assert!(sector.local.y.abs() < 1e-12);
        }
    }

    #[test]
    fn test_origin_falls_in_first_wedge() {
        let sector = classify(Vec2::ZERO);
        assert_eq!(sector.rot, Rotor::IDENTITY);
        assert_eq!(sector.local, Vec2::ZERO);
    }

    #[test]
    fn test_points_on_fold_lines_stay_unfolded() {
        let diag = |p: Vec2| (SQRT_1_2 * (p.x + p.y), SQRT_1_2 * (p.y - p.x));

        // x == -b: no half turn
        for (pos, expected) in [
            (Vec2::new(37.0, -15.325901807804517), 0),
            (Vec2::new(-250.0, 103.5533905932737), 3),
        ] {
            let (_, b) = diag(pos);
            assert_eq!(pos.x, -b);
            assert_eq!(classify(pos).rot.index(), expected, "{:?}", pos);
        }

        // x == b, directly and after the half turn: no quarter turn
        for (pos, expected) in [
            (Vec2::new(37.0, 89.32590180780451), 1),
            (Vec2::new(-37.0, -89.32590180780451), 5),
        ] {
            let (_, b) = diag(pos);
            assert_eq!(pos.x.abs(), b.abs());
            assert_eq!(classify(pos).rot.index(), expected, "{:?}", pos);
        }

        // x == a, directly and after the half turn: the even wedge wins
        for (pos, expected) in [
            (Vec2::new(37.0, 15.32590180780451), 0),
            (Vec2::new(-37.0, -15.32590180780451), 4),
        ] {
            let (a, _) = diag(pos);
            assert_eq!(pos.x.abs(), a.abs());
            let sector = classify(pos);
            assert_eq!(sector.rot.index(), expected, "{:?}", pos);
            assert_eq!(sector.local, Vec2::new(pos.x.abs(), pos.y.abs()));
        }
    }

    #[test]
    fn test_local_position_round_trips_to_global() {
        for step in 0..720 {
            let angle = (step as f64 + 0.25).to_radians() * 0.5;
            let pos = Vec2::new(300.0 * angle.cos(), 300.0 * angle.sin());
            let sector = classify(pos);
            let back = sector.rot.apply(sector.local);
            assert!((back - pos).length() < 1e-9, "angle {}", angle);
        }
    }

    #[test]
    fn test_sweep_covers_each_octant_once() {
        let radius = 500.0;
        let steps = 3600;
        let sectors: Vec<_> = (0..steps)
            .map(|i| {
                let angle = (i as f64 * 0.1 + 0.05).to_radians();
                classify(Vec2::new(radius * angle.cos(), radius * angle.sin()))
            })
            .collect();

        for sector in &sectors {
            assert!(sector.local.x >= 0.0);
            assert!(sector.local.y.abs() <= sector.local.x * TAN_PI_8 + 1e-9);
        }

        // a contiguous, non-overlapping cover changes octant exactly eight times
        // around the circle, always to the next index
        let transitions = (0..steps)
            .filter(|&i| sectors[i].rot != sectors[(i + 1) % steps].rot)
            .inspect(|&i| {
                let next = sectors[(i + 1) % steps].rot;
                assert_eq!(next, sectors[i].rot.compose(Rotor::new(1)));
            })
            .count();
        assert_eq!(transitions, 8);

        for r in Rotor::all() {
            let centre = r.index() * 450;
            assert_eq!(sectors[centre].rot, r);
        }
    }
}
