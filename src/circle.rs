use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::Config;
use crate::mesh::{self, Vertex};

#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Circle {
    pub pos: [f32; 2],
    pub vel: [f32; 2],
}

/// All circles plus the CPU copy of the vertex buffer. Circle `i` owns the
/// vertex range `i * fan_len .. (i + 1) * fan_len`.
pub struct Circles {
    circles: Vec<Circle>,
    vertices: Vec<Vertex>,
    radius: f32,
    segments: usize,
}

impl Circles {
    /// Random centers in `[-1, 1]^2`, all moving `(+speed, +speed)`.
    /// Overlap with each other or with the edges is left as is.
    pub fn new(config: &Config) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);

        let circles = (0..config.circle_count)
            .map(|_| Circle {
                pos: [
                    (rng.gen::<f32>() - 0.5) * 2.0,
                    (rng.gen::<f32>() - 0.5) * 2.0,
                ],
                vel: [config.speed, config.speed],
            })
            .collect();

        Self::from_circles(circles, config.radius, config.segments)
    }

    pub fn from_circles(circles: Vec<Circle>, radius: f32, segments: usize) -> Self {
        let mut vertices = Vec::with_capacity(circles.len() * mesh::fan_len(segments));
        for circle in &circles {
            vertices.extend(mesh::generate_fan(circle.pos, radius, segments));
        }

        Self {
            circles,
            vertices,
            radius,
            segments,
        }
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn fan_len(&self) -> usize {
        mesh::fan_len(self.segments)
    }

    #[cfg(test)]
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn vertex_mirror(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Runs `f` on every circle, then regenerates that circle's fan in place.
    pub fn update(&mut self, mut f: impl FnMut(&mut Circle)) {
        let fan_len = self.fan_len();
        for (circle, fan) in self.circles.iter_mut().zip(self.vertices.chunks_exact_mut(fan_len)) {
            f(circle);
            mesh::write_fan(fan, circle.pos, self.radius, self.segments);
        }
    }
}
