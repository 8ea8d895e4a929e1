//! Headless skirmish
//!
//! Загружает roster из `data/skirmish.ron`, спавнит персонажей и крутит
//! симуляцию до конца матча (или лимита тиков).

use std::process::ExitCode;

use skirmish_simulation::logger::{set_log_level, LogLevel};
use skirmish_simulation::{
    create_headless_app, log_error, log_info, spawn_roster, GameSession, Roster, VfxJournal,
};

const MAX_TICKS: u32 = 1000;

fn main() -> ExitCode {
    let seed = 42;
    let mut app = create_headless_app(seed);
    // Per-hit debug lines only in tests
    set_log_level(LogLevel::Info);
    log_info(&format!("Starting SKIRMISH headless simulation (seed: {})", seed));

    let roster = match Roster::default_roster() {
        Ok(roster) => roster,
        Err(err) => {
            log_error(&format!("❌ Roster load failed: {}", err));
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = spawn_roster(app.world_mut(), &roster) {
        log_error(&format!("❌ Spawn failed: {}", err));
        return ExitCode::FAILURE;
    }

    let mut ticks = 0;
    while ticks < MAX_TICKS {
        app.update();
        ticks += 1;

        if app.world().resource::<GameSession>().is_finished() {
            break;
        }

        if ticks % 100 == 0 {
            let session = app.world().resource::<GameSession>();
            log_info(&format!(
                "Tick {}: score {}, player health {:?}",
                ticks,
                session.score(),
                session.player_health()
            ));
        }
    }

    let session = app.world().resource::<GameSession>();
    let vfx = app.world().resource::<VfxJournal>();
    log_info(&format!(
        "Simulation complete after {} ticks: result {:?}, score {}, player health {:?}, vfx {}",
        ticks,
        session.result(),
        session.score(),
        session.player_health(),
        vfx.total()
    ));

    ExitCode::SUCCESS
}
