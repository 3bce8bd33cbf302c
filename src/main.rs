mod circle;
mod cli;
mod config;
mod error;
mod frame;
mod mesh;
mod motion;
mod render;

use std::process::ExitCode;

use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
};

use config::Config;
use frame::{DriverState, FrameDriver};
use render::Renderer;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let circle_count = match cli::parse_circle_count(std::env::args_os()) {
        Ok(n) => n,
        Err(err) => {
            println!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };
    let config = Config::new(circle_count);

    // set up context and build window
    let event_loop = EventLoop::new();
    let setup = render::create_window(&event_loop, &config)
        .and_then(|window| pollster::block_on(Renderer::new(window, &config)))
        .and_then(|renderer| Ok((renderer, FrameDriver::new(&config)?)));
    let (renderer, driver) = match setup {
        Ok(setup) => setup,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    run(event_loop, renderer, driver)
}

fn run(event_loop: EventLoop<()>, mut renderer: Renderer, mut driver: FrameDriver) -> ! {
    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent {
            ref event,
            window_id,
        } if window_id == renderer.window().id() => match event {
            WindowEvent::CloseRequested => {
                driver.request_close();
                *control_flow = ControlFlow::Exit;
            }
            WindowEvent::KeyboardInput { input, .. } => renderer.key_input(input),
            WindowEvent::Resized(physical_size) => {
                renderer.resize(*physical_size);
            }
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                renderer.resize(**new_inner_size);
            }
            _ => {}
        },
        Event::RedrawRequested(window_id) if window_id == renderer.window().id() => {
            match driver.frame(&mut renderer) {
                Ok(DriverState::Running) => {}
                Ok(DriverState::Closing) => *control_flow = ControlFlow::Exit,
                // Reconfigure the surface if lost
                Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size()),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("out of GPU memory");
                    *control_flow = ControlFlow::ExitWithCode(1);
                }
                // Outdated and Timeout should be resolved by the next frame
                Err(e) => log::warn!("{:?}", e),
            }
        }
        Event::MainEventsCleared => {
            renderer.window().request_redraw();
        }
        _ => {}
    })
}
