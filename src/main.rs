//! Headless run of the fountain and ring toys.
//!
//! Usage: `fountain-rings [frames] [grid_size]`
//!
//! Drives both simulators on a fixed 60 Hz clock with a scripted pointer:
//! a circular stroke through the basin, then a drag around one of the rings.

use std::f64::consts::TAU;
use std::process;

use fountain_rings::app::App;
use fountain_rings::config::{FRAME_INTERVAL_SECS, GRID_SIZE, RING_TIME_SCALE};
use fountain_rings::ring::{lonely_highlight, RingGeometry, Viewport};
use fountain_rings::SimError;

const DEFAULT_FRAMES: u64 = 600;
/// Quarter of the full basin resolution
const DEFAULT_GRID_SIZE: usize = GRID_SIZE / 4;
const CANVAS_PX: f64 = 720.0;
const DRAGGED_RING: usize = 2;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let frames = parse_arg(args.next(), "frames", DEFAULT_FRAMES);
    let grid_size = parse_arg(args.next(), "grid_size", DEFAULT_GRID_SIZE);

    if let Err(e) = run(frames, grid_size) {
        log::error!("{}", e);
        process::exit(1);
    }
}

/// Parse an optional positional argument, warning and falling back on garbage
fn parse_arg<T>(arg: Option<String>, name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match arg.map(|a| (a.parse::<T>(), a)) {
        None => default,
        Some((Ok(value), _)) => value,
        Some((Err(e), raw)) => {
            log::warn!("Ignoring {} argument {:?} ({}), using {}", name, raw, e, default);
            default
        }
    }
}

fn run(frames: u64, grid_size: usize) -> Result<(), SimError> {
    let mut app = App::with_defaults(grid_size, CANVAS_PX)?;
    let viewport = Viewport::new(CANVAS_PX, CANVAS_PX, 1.0);
    let geometry = RingGeometry::default();

    let stroke = frames / 10..frames * 4 / 10;
    let drag = frames / 2..frames * 7 / 10;

    for frame in 0..frames {
        let now = frame as f64 * FRAME_INTERVAL_SECS;

        // Circular stroke through the basin
        if stroke.contains(&frame) {
            let phase = (frame - stroke.start) as f64 / 60.0 * TAU;
            let r = CANVAS_PX * 0.2;
            app.set_pointer(Some((
                CANVAS_PX / 2.0 + r * phase.cos(),
                CANVAS_PX / 2.0 + r * phase.sin(),
            )));
        } else {
            app.set_pointer(None);
        }

        // Grab a runner on the ring under the pointer and carry it a quarter turn
        if drag.contains(&frame) {
            let progress = (frame - drag.start) as f64 / (drag.end - drag.start) as f64;
            let angle = progress * TAU / 4.0;
            let radius = geometry.track_radius(DRAGGED_RING, &viewport) / viewport.scale();
            let pointer_x = CANVAS_PX / 2.0 + radius * angle.cos();
            let pointer_y = CANVAS_PX / 2.0 - radius * angle.sin();
            let (polar_radius, polar_angle) = viewport.to_polar(pointer_x, pointer_y);

            if frame == drag.start {
                if let Some(ring) = geometry.ring_at(polar_radius, app.rings().ring_count(), &viewport) {
                    app.begin_drag(ring, polar_angle, now)?;
                }
            } else {
                app.drag_to(polar_angle)?;
            }
        } else if frame == drag.end {
            app.end_drag();
        }

        let Some(stats) = app.frame(now) else {
            continue;
        };

        if stats.frame % 60 == 0 {
            let runners: usize = stats.been_lonely.iter().sum();
            let brightest = app
                .rings()
                .snapshot(DRAGGED_RING, now * RING_TIME_SCALE)?
                .iter()
                .map(|s| lonely_highlight(s.loneliness))
                .fold(0.0, f64::max);
            log::info!(
                "t={:.2}s energy={:.4} been-lonely runners={} ring {} brightest={:.2}",
                now,
                stats.pressure_energy,
                runners,
                DRAGGED_RING,
                brightest
            );
        }
    }

    log::info!(
        "Done after {} frames, wave energy {:.4}",
        app.frame_number(),
        app.wave().wave_energy()
    );
    Ok(())
}
