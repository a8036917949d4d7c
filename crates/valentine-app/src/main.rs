//! Headless demo: plays the button game, then runs a confetti burst
//! against the recording surface and reports what got drawn.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use valentine_core::{EngineConfig, ParticleEngine};
use valentine_page::{effects, DodgeBounds, PageSession};
use valentine_platform::{FixedViewport, ManualScheduler, RecordingSurface, Viewport};

const CONFIG_PATH: &str = "valentine.toml";

fn main() {
    // Init logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter("info")
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Valentine starting");
    if let Err(e) = run() {
        eprintln!("Valentine error: {e}");
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = if Path::new(CONFIG_PATH).exists() {
        EngineConfig::load(CONFIG_PATH)?
    } else {
        EngineConfig::default()
    };
    info!(preset = %config.preset.name, count = config.preset.particle_count, "loaded burst preset");

    let viewport = Viewport::new(1280.0, 720.0);
    let mut rng = StdRng::from_entropy();

    // The button game: hover "No" a few times, then give in.
    let mut session = PageSession::new();
    let bounds = DodgeBounds::from_layout(viewport.width, viewport.height, 440.0, 300.0);
    for _ in 0..3 {
        let view = session.dodge(bounds, &mut rng);
        info!(
            attempts = session.no_attempts(),
            no = view.no_label,
            yes = view.yes_label,
            "the No button dodged"
        );
    }

    if !session.press_yes() {
        return Ok(());
    }
    let hearts = effects::floating_hearts(&mut rng, viewport.width);
    let burst = effects::celebration(&mut rng, viewport.width, viewport.height);
    info!(hearts = hearts.len(), emoji = burst.len(), "celebration effects planned");

    // Celebration confetti, pumped frame by frame until it dies out.
    let surface = Rc::new(RefCell::new(RecordingSurface::new(viewport)));
    let scheduler = Rc::new(RefCell::new(ManualScheduler::new()));
    let mut engine = ParticleEngine::new(
        Box::new(surface.clone()),
        Box::new(scheduler.clone()),
        Box::new(FixedViewport::new(viewport)),
        config,
    )?;

    engine.start();
    let instances = engine.instances();
    info!(
        particles = instances.len(),
        instance_bytes = std::mem::size_of_val(instances.as_slice()),
        "burst snapshot"
    );

    let mut frames: u64 = 1;
    loop {
        let due = scheduler.borrow_mut().take_due();
        match due {
            Some(handle) => {
                engine.on_frame(handle);
                frames += 1;
            }
            None => break,
        }
    }

    info!(
        frames,
        fills = surface.borrow().fill_count(),
        clears = surface.borrow().clear_count(),
        "burst complete"
    );
    Ok(())
}
