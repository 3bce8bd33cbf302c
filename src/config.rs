use winit::event::VirtualKeyCode;

const VERTEX_SHADER: &str = include_str!("shaders/bubble_vs.wgsl");
const FRAGMENT_SHADER: &str = include_str!("shaders/bubble_fs.wgsl");

/// Process-wide settings, fixed for the whole run.
#[derive(Clone, Debug)]
pub struct Config {
    pub circle_count: usize,
    pub radius: f32,
    pub segments: usize,
    /// Initial per-frame displacement on both axes.
    pub speed: f32,
    pub seed: u64,

    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub clear_color: wgpu::Color,
    pub exit_key: VirtualKeyCode,

    /// Seconds of accumulated frame time between fps reports.
    pub fps_interval: f32,

    pub vertex_shader: &'static str,
    pub fragment_shader: &'static str,
}

impl Config {
    pub fn new(circle_count: usize) -> Self {
        Self {
            circle_count,
            ..Self::default()
        }
    }

    /// Vertices in the whole mirror, or `None` when they cannot be addressed
    /// by a `u32` draw range.
    pub fn vertex_count(&self) -> Option<u32> {
        let n = self.circle_count.checked_mul(crate::mesh::fan_len(self.segments))?;
        u32::try_from(n).ok()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            circle_count: 1,
            radius: 0.10,
            segments: 360,
            speed: 0.0005,
            seed: 1,

            title: "Bubbles",
            width: 1920,
            height: 1080,
            fullscreen: true,
            clear_color: wgpu::Color::BLACK,
            exit_key: VirtualKeyCode::Escape,

            fps_interval: 1.0,

            vertex_shader: VERTEX_SHADER,
            fragment_shader: FRAGMENT_SHADER,
        }
    }
}
