//! Headless demo loop
//!
//! Stands in for the platform layer: feeds a seeded session a scripted
//! sequence of frames, surface observations, and trigger pulls, and logs
//! HUD state whenever something happens. Useful for soak-testing the sim
//! without a device.

use glam::Vec3;
use swat_ar::sim::{FrameClock, FrameInput, SessionState, SurfacePoint, Viewpoint, tick};

const FPS: f32 = 60.0;
const RUN_SECONDS: u32 = 60;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1337);

    let mut state = SessionState::new(seed);
    let mut clock = FrameClock::new();
    let view = Viewpoint::default();

    for frame in 0..(RUN_SECONDS * FPS as u32) {
        let elapsed = frame as f32 / FPS;
        let dt = clock.delta(elapsed);

        // A tracked surface every few frames, sweeping across a virtual
        // floor; a trigger pull once a second
        let surface = (frame % 7 == 0).then(|| SurfacePoint {
            position: Vec3::new((frame % 30) as f32 * 0.1 - 1.5, -1.0, -2.0),
            normal: Vec3::Y,
        });
        let fire = frame % FPS as u32 == 30;

        tick(&mut state, &FrameInput { surface, fire }, &view, dt);

        for event in state.drain_events() {
            let hud = state.hud();
            log::info!(
                "{event:?}: score={} ammo={}/{} reloading={} flies={}",
                hud.score,
                hud.loaded,
                hud.reserve,
                hud.reloading,
                hud.flies_left
            );
        }

        if state.flock_empty() {
            break;
        }
    }

    let hud = state.hud();
    log::info!(
        "session over after {:.1}s: score={} flies left={}",
        state.time,
        hud.score,
        hud.flies_left
    );
}
