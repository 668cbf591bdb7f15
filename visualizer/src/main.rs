use anyhow::Context;
use clap::Parser;
use framebuffer::FrameCanvas;
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use sweepcore::geometry::RadarGeometry;
use sweepcore::prelude::{DecodeStats, FrameDecoder, SampleStore};
use sweepcore::render::SweepRenderer;
use transport::{pump, SerialSource};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

mod framebuffer;
mod transport;

#[derive(Parser)]
#[command(author, version, about = "Radar-style display for serial sweep samples")]
struct Args {
    /// Serial device streaming "<angle>,<distance>." frames
    #[arg(long, default_value = "/dev/ttyACM0")]
    port: String,
    #[arg(long, default_value_t = 9600)]
    baud: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let geometry = RadarGeometry::default();

    // Open failure is reported once; the loop still runs and renders the
    // "no object" state from the store defaults.
    let mut source = match SerialSource::open(&args.port, args.baud) {
        Ok(source) => Some(source),
        Err(err) => {
            log::warn!("{err:#}; rendering without live samples");
            None
        }
    };

    let mut decoder = FrameDecoder::new();
    let mut store = SampleStore::default();
    let mut stats = DecodeStats::default();
    let canvas = FrameCanvas::new(geometry.canvas_width, geometry.canvas_height);
    let mut renderer = SweepRenderer::new(canvas, geometry.clone());

    let event_loop = EventLoop::new().context("creating event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Sweep Radar")
            .with_inner_size(LogicalSize::new(
                geometry.canvas_width as f64,
                geometry.canvas_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)
            .context("creating window")?,
    );
    let redraw_window = window.clone();

    let mut pixels = {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, &window);
        Pixels::new(geometry.canvas_width, geometry.canvas_height, surface)
            .context("creating pixel surface")?
    };

    let frame_budget = Duration::from_millis(33);
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    stats.log_summary();
                    elwt.exit();
                }
                WindowEvent::Resized(size) => {
                    if let Err(err) = pixels.resize_surface(size.width, size.height) {
                        log::error!("surface resize failed: {err}");
                        elwt.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    if let Some(source) = source.as_mut() {
                        pump(source, &mut decoder, &mut store, &mut stats);
                    }
                    let sample = *store.current();
                    renderer.render_frame(&sample);
                    pixels.frame_mut().copy_from_slice(renderer.canvas().data());
                    if let Err(err) = pixels.render() {
                        log::error!("present failed: {err}");
                        elwt.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let elapsed = last_frame.elapsed();
                if elapsed < frame_budget {
                    std::thread::sleep(frame_budget - elapsed);
                }
                last_frame = Instant::now();
                redraw_window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
