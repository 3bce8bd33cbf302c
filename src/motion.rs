use crate::circle::{Circle, Circles};

/// Moves one circle by its velocity and flips each velocity component whose
/// axis ended up past `bound`. Position is never clamped, so a circle may sit
/// slightly outside for one frame before the flipped velocity brings it back.
pub fn advance(circle: &mut Circle, bound: f32) {
    for axis in 0..2 {
        circle.pos[axis] += circle.vel[axis];
    }
    for axis in 0..2 {
        if circle.pos[axis] > bound || circle.pos[axis] < -bound {
            circle.vel[axis] = -circle.vel[axis];
        }
    }
}

/// One physics frame for every circle, followed by the fan refresh.
pub fn step(circles: &mut Circles) {
    let bound = 1.0 - circles.radius();
    circles.update(|circle| advance(circle, bound));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(pos: [f32; 2], vel: [f32; 2]) -> Circles {
        Circles::from_circles(vec![Circle { pos, vel }], 0.10, 360)
    }

    #[test]
    fn bounces_off_right_edge() {
        let mut circles = single([0.0, 0.0], [0.0005, 0.0005]);

        let mut frames = 0;
        while circles.circles()[0].vel[0] > 0.0 {
            let before = circles.circles()[0].pos[0];
            step(&mut circles);
            frames += 1;
            let c = circles.circles()[0];
            if c.vel[0] > 0.0 {
                assert!(c.pos[0] <= 0.9, "no flip while inside, x = {}", c.pos[0]);
            }
            assert!(c.pos[0] > before);
            assert!(frames < 10_000);
        }

        let c = circles.circles()[0];
        assert!(c.pos[0] > 0.9);
        assert_eq!(c.vel[0], -0.0005);

        let x = c.pos[0];
        step(&mut circles);
        assert!(circles.circles()[0].pos[0] < x);
        step(&mut circles);
        assert!(circles.circles()[0].pos[0] < x);
    }

    #[test]
    fn speed_is_preserved() {
        let mut circles = Circles::from_circles(
            vec![
                Circle { pos: [0.85, -0.85], vel: [0.03, -0.02] },
                Circle { pos: [-0.2, 0.7], vel: [-0.05, 0.04] },
            ],
            0.10,
            32,
        );
        for _ in 0..500 {
            let before: Vec<_> = circles.circles().to_vec();
            step(&mut circles);
            for (b, a) in before.iter().zip(circles.circles()) {
                assert_eq!(b.vel[0].abs(), a.vel[0].abs());
                assert_eq!(b.vel[1].abs(), a.vel[1].abs());
            }
        }
    }

    #[test]
    fn flips_only_past_the_bound() {
        let mut circles = single([0.3, -0.6], [0.013, -0.007]);
        for _ in 0..5000 {
            let before = circles.circles()[0];
            step(&mut circles);
            let after = circles.circles()[0];
            for axis in 0..2 {
                if before.vel[axis] != after.vel[axis] {
                    assert!(after.pos[axis].abs() > 0.9);
                } else {
                    assert!(after.pos[axis].abs() <= 0.9);
                }
            }
        }
    }

    #[test]
    fn corner_flips_both_axes() {
        let mut circle = Circle { pos: [0.899, 0.899], vel: [0.002, 0.002] };
        advance(&mut circle, 0.9);
        assert_eq!(circle.vel, [-0.002, -0.002]);
    }

    #[test]
    fn zero_velocity_is_static() {
        let mut circles = single([0.4, 0.4], [0.0, 0.0]);
        let mirror = circles.vertex_mirror().to_vec();
        step(&mut circles);
        assert_eq!(circles.vertex_mirror(), mirror.as_slice());
    }

    #[test]
    fn circles_move_independently() {
        let a = Circle { pos: [0.0, 0.0], vel: [0.01, 0.01] };
        let b = Circle { pos: [0.0, 0.0], vel: [-0.01, -0.01] };
        let mut both = Circles::from_circles(vec![a, b], 0.10, 16);
        let mut only_a = Circles::from_circles(vec![a], 0.10, 16);
        let mut only_b = Circles::from_circles(vec![b], 0.10, 16);

        for _ in 0..1000 {
            step(&mut both);
            step(&mut only_a);
            step(&mut only_b);
            assert_eq!(both.circles()[0], only_a.circles()[0]);
            assert_eq!(both.circles()[1], only_b.circles()[0]);
        }
    }

    #[test]
    fn fans_follow_centers() {
        let mut circles = single([0.1, 0.1], [0.0005, 0.0005]);
        step(&mut circles);
        let c = circles.circles()[0];
        assert_eq!(circles.vertex_mirror()[0].position, [c.pos[0], c.pos[1], 0.0]);
    }
}
