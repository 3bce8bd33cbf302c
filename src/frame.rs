use winit::event::VirtualKeyCode;

use crate::circle::Circles;
use crate::config::Config;
use crate::error::{self, BubblesError};
use crate::mesh::Vertex;
use crate::motion;

/// What the frame driver needs from the window and the GPU.
pub trait Backend {
    /// Seconds since the previous call.
    fn elapsed(&mut self) -> f32;
    fn key_pressed(&self, key: VirtualKeyCode) -> bool;
    /// Replaces the whole GPU vertex buffer. The slice is not kept past the call.
    fn upload_vertices(&mut self, vertices: &[Vertex]);
    /// Fills the fan made of `count` vertices starting at `first`.
    fn draw_fan(&mut self, first: u32, count: u32);
    fn present(&mut self) -> Result<(), wgpu::SurfaceError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Closing,
}

pub struct FpsCounter {
    interval: f32,
    elapsed: f32,
    frames: u32,
}

impl FpsCounter {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Counts one frame of length `dt`. Returns the average fps once at least
    /// `interval` seconds have piled up, and starts over.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt;
        self.frames += 1;

        if self.elapsed < self.interval {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        self.elapsed = 0.0;
        self.frames = 0;
        Some(fps)
    }
}

pub struct FrameDriver {
    circles: Circles,
    /// Vertices per fan and number of fans, both fitting a `u32` draw range.
    fan_len: u32,
    fans: u32,
    fps: FpsCounter,
    exit_key: VirtualKeyCode,
    state: DriverState,
}

impl FrameDriver {
    /// Fails before allocating anything when the mirror would not be
    /// addressable with `u32` vertex indices.
    pub fn new(config: &Config) -> error::Result<Self> {
        config.vertex_count().ok_or(BubblesError::TooManyCircles {
            count: config.circle_count,
        })?;
        Self::with_circles(Circles::new(config), config)
    }

    pub fn with_circles(circles: Circles, config: &Config) -> error::Result<Self> {
        let too_many = || BubblesError::TooManyCircles { count: circles.len() };
        let fan_len = u32::try_from(circles.fan_len()).map_err(|_| too_many())?;
        let fans = u32::try_from(circles.len()).map_err(|_| too_many())?;
        fans.checked_mul(fan_len).ok_or_else(too_many)?;

        Ok(Self {
            circles,
            fan_len,
            fans,
            fps: FpsCounter::new(config.fps_interval),
            exit_key: config.exit_key,
            state: DriverState::Running,
        })
    }

    #[cfg(test)]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[cfg(test)]
    pub fn circles(&self) -> &Circles {
        &self.circles
    }

    /// Window closed from outside; no more frames after this.
    pub fn request_close(&mut self) {
        self.state = DriverState::Closing;
    }

    /// Runs one frame: timing, input, physics, upload, draws, present.
    /// A frame in which the exit key is seen still completes.
    pub fn frame(&mut self, backend: &mut impl Backend) -> Result<DriverState, wgpu::SurfaceError> {
        if self.state == DriverState::Closing {
            return Ok(self.state);
        }

        if let Some(fps) = self.fps.tick(backend.elapsed()) {
            log::info!("fps: {:.1}", fps);
        }

        if backend.key_pressed(self.exit_key) {
            log::debug!("exit key pressed");
            self.state = DriverState::Closing;
        }

        motion::step(&mut self.circles);

        backend.upload_vertices(self.circles.vertex_mirror());

        for i in 0..self.fans {
            backend.draw_fan(i * self.fan_len, self.fan_len);
        }

        backend.present()?;

        Ok(self.state)
    }
}
