//! PixelOffice Headless Simulation Harness
//!
//! Validates the office layout, agent logic and the running engine without
//! a browser or backend. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p pixeloffice-simtest
//!   cargo run -p pixeloffice-simtest -- --verbose
//!   cargo run -p pixeloffice-simtest -- --config office.json

use pixeloffice_core::api::{chat_reply_text, deck_outcome, Reply, TransportError};
use pixeloffice_core::engine::OfficeSimulation;
use pixeloffice_logic::behavior::{update_agent, ErrandDraw, TickOutcome};
use pixeloffice_logic::config::SimConfig;
use pixeloffice_logic::motion::{facing_from_delta, resolve_arrival};
use pixeloffice_logic::poi::PoiMap;
use pixeloffice_logic::roster::{default_roster, validate_roster};
use pixeloffice_logic::sprite::{SpriteGrid, SpriteRenderConfig};
use pixeloffice_logic::types::{AgentState, AgentStatus, Direction, Position, Role};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    if let Err(e) = fast_log::init(fast_log::config::Config::new().console().level(level)) {
        eprintln!("logger init failed: {}", e);
    }

    println!("=== PixelOffice Simulation Harness ===\n");

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            println!("config error: {}", e);
            log::logger().flush();
            std::process::exit(1);
        }
    };

    let mut results = Vec::new();

    // 1. Layout and roster
    results.extend(validate_layout(&config, verbose));

    // 2. Motion and arrival rules
    results.extend(validate_motion(&config));

    // 3. Errand rate
    results.extend(validate_errand_rate(&config, verbose));

    // 4. Sprite geometry
    results.extend(validate_geometry(&config));

    // 5. Engine soak
    results.extend(validate_engine(&config, verbose));

    // 6. Backend reply mapping
    results.extend(validate_reply_mapping());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );
    log::logger().flush();

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_config(args: &[String]) -> Result<SimConfig, String> {
    let Some(idx) = args.iter().position(|a| a == "--config") else {
        return Ok(SimConfig::default().with_seed(42));
    };
    let path = args
        .get(idx + 1)
        .ok_or_else(|| "--config needs a path".to_string())?;
    let json = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    let mut config = SimConfig::from_json(&json).map_err(|e| e.to_string())?;
    if config.seed.is_none() {
        config.seed = Some(42);
    }
    Ok(config)
}

// ── 1. Layout ───────────────────────────────────────────────────────────

fn validate_layout(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Layout ---");
    let pois = PoiMap::office();
    let roster = default_roster();

    let poi_errors = pois.validate();
    if verbose {
        for e in &poi_errors {
            println!("    [{}] {}", e.category, e.message);
        }
    }
    let roster_errors = validate_roster(&roster, &pois, config.poi_tolerance);
    if verbose {
        for e in &roster_errors {
            println!("    [{}] {}", e.category, e.message);
        }
    }

    let roles_covered = Role::ALL
        .iter()
        .all(|role| roster.iter().any(|a| a.role == *role));

    vec![
        check(
            "config_valid",
            config.validate().is_ok(),
            format!(
                "tick {} ms, speed {}, p {}",
                config.tick_interval_ms, config.walk_speed, config.errand_probability
            ),
        ),
        check(
            "poi_layout",
            poi_errors.is_empty(),
            format!("{} POIs, {} errors", pois.len(), poi_errors.len()),
        ),
        check(
            "roster_anchored",
            roster_errors.is_empty(),
            format!("{} agents, {} errors", roster.len(), roster_errors.len()),
        ),
        check(
            "roster_roles",
            roles_covered,
            "every role has a character",
        ),
    ]
}

// ── 2. Motion ───────────────────────────────────────────────────────────

fn validate_motion(config: &SimConfig) -> Vec<TestResult> {
    println!("--- Motion ---");
    let pois = PoiMap::office();
    let mut results = Vec::new();

    let facings = [
        ((-14.0, -8.0), Direction::Left),
        ((3.0, 1.0), Direction::Right),
        ((0.0, 5.0), Direction::Down),
        ((0.0, -5.0), Direction::Up),
        ((2.0, 2.0), Direction::Down),
    ];
    let wrong: Vec<_> = facings
        .iter()
        .filter(|((dx, dy), want)| facing_from_delta(*dx, *dy) != *want)
        .collect();
    results.push(check(
        "facing_from_delta",
        wrong.is_empty(),
        format!("{}/{} cases", facings.len() - wrong.len(), facings.len()),
    ));

    let arrivals = [
        (Position::new(36.0, 42.0), AgentStatus::Sitting, Direction::Down),
        (Position::new(16.0, 45.0), AgentStatus::Action1, Direction::Right),
        (Position::new(78.0, 75.0), AgentStatus::Idle, Direction::Up),
        (Position::new(5.0, 5.0), AgentStatus::Idle, Direction::Left),
    ];
    let ok = arrivals.iter().all(|(pos, status, dir)| {
        resolve_arrival(*pos, Direction::Left, &pois, config.poi_tolerance) == (*status, *dir)
    });
    results.push(check(
        "arrival_resolution",
        ok,
        "SEAT -> SITTING, STAND -> ACTION_1, LOITER -> IDLE, off-POI keeps facing",
    ));

    // Forced errand from the middle of the floor to seat_top_1.
    let seat = pois.iter().position(|p| p.id == "seat_top_1").unwrap_or(0);
    let target = Position::new(36.0, 42.0);
    let start = AgentState::at(Position::new(50.0, 50.0), Direction::Down, AgentStatus::Idle);
    let (mut state, _) = update_agent(&start, ErrandDraw::forced(seat), &pois, config);
    let mut last = state.position.distance(&target);
    let mut monotonic = true;
    let mut ticks = 0;
    while ticks < 1000 {
        let (next, outcome) = update_agent(&state, ErrandDraw::quiet(), &pois, config);
        ticks += 1;
        state = next;
        if outcome == TickOutcome::Arrived {
            break;
        }
        let d = state.position.distance(&target);
        monotonic &= d < last;
        last = d;
    }
    let settled = state.position == target
        && state.status == AgentStatus::Sitting
        && state.direction == Direction::Down
        && state.target.is_none();
    results.push(check(
        "walk_to_seat",
        monotonic && settled,
        format!(
            "{} ticks, ended at ({}, {}) {:?}/{:?}",
            ticks, state.position.x, state.position.y, state.status, state.direction
        ),
    ));

    // Arrival is idempotent: a settled agent stays put.
    let (again, outcome) = update_agent(&state, ErrandDraw::quiet(), &pois, config);
    results.push(check(
        "arrival_idempotent",
        again == state && outcome == TickOutcome::Unchanged,
        format!("{:?}", outcome),
    ));

    results
}

// ── 3. Errand rate ──────────────────────────────────────────────────────

fn validate_errand_rate(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Errand Rate ---");
    let pois = PoiMap::office();
    let mut rng = rand_rng(config);
    let rolls = 200_000;
    let settled = AgentState::at(Position::new(36.0, 42.0), Direction::Down, AgentStatus::Sitting);

    let mut started = 0usize;
    let mut on_poi = true;
    for _ in 0..rolls {
        let draw = ErrandDraw::roll(&mut rng, pois.len());
        let (next, outcome) = update_agent(&settled, draw, &pois, config);
        if outcome == TickOutcome::StartedErrand {
            started += 1;
            on_poi &= next
                .target
                .is_some_and(|t| pois.iter().any(|p| p.position() == t));
        }
    }

    let expected = rolls as f64 * config.errand_probability as f64;
    let rate_ok = (started as f64 - expected).abs() <= expected.max(10.0) * 0.3;
    if verbose {
        println!("    {} errands in {} rolls (expected ~{:.0})", started, rolls, expected);
    }

    vec![
        check(
            "errand_rate",
            rate_ok,
            format!("{} started, expected ~{:.0}", started, expected),
        ),
        check("errand_targets_are_pois", on_poi, "every target is a POI coordinate"),
    ]
}

fn rand_rng(config: &SimConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed.unwrap_or(42))
}

// ── 4. Geometry ─────────────────────────────────────────────────────────

fn validate_geometry(config: &SimConfig) -> Vec<TestResult> {
    println!("--- Sprite Geometry ---");
    let grid = SpriteGrid::default();
    let mut results = Vec::new();

    match SpriteRenderConfig::resolve(2000, 3000, &grid, config.base_frame_width) {
        Some(geo) => {
            let expected_scale = config.base_frame_width / 500.0;
            let expected_height = 600.0 * expected_scale;
            results.push(check(
                "frame_normalization",
                (geo.scale_factor - expected_scale).abs() < 1e-4
                    && (geo.frame_height - expected_height).abs() < 1e-2,
                format!(
                    "scale {:.3}, frame {}x{:.1}",
                    geo.scale_factor, geo.frame_width, geo.frame_height
                ),
            ));
            let (ox, oy) = geo.background_offset(2, 1);
            results.push(check(
                "background_offset",
                (ox + geo.frame_width).abs() < 1e-2 && (oy + 2.0 * geo.frame_height).abs() < 1e-2,
                format!("row 2 frame 1 -> ({:.1}, {:.1})", ox, oy),
            ));
        }
        None => results.push(check("frame_normalization", false, "resolve returned None")),
    }

    results.push(check(
        "zero_size_unrenderable",
        SpriteRenderConfig::resolve(0, 3000, &grid, config.base_frame_width).is_none(),
        "zero width yields no geometry",
    ));

    results
}

// ── 5. Engine soak ──────────────────────────────────────────────────────

fn validate_engine(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Engine ---");
    let mut sim = match OfficeSimulation::new(config.clone()) {
        Ok(sim) => sim,
        Err(e) => return vec![check("engine_setup", false, e.to_string())],
    };
    for role in Role::ALL {
        if let Err(e) = sim.assets_mut().complete(role, 2000, 3000) {
            println!("    asset {}: {}", role, e);
        }
    }

    // Ten simulated minutes in 16 ms frames.
    let frames = 10 * 60 * 1000 / 16;
    let mut consistent = true;
    let mut in_bounds = true;
    let mut layered = true;
    let mut max_walking = 0;
    for _ in 0..frames {
        sim.update(Duration::from_millis(16));
        for agent in sim.agents() {
            consistent &= agent.state.is_consistent();
            in_bounds &= agent.state.position.in_floor_bounds();
        }
        let sprites = sim.render();
        layered &= sprites.len() == sim.agent_count()
            && sprites.windows(2).all(|w| w[0].draw.layer <= w[1].draw.layer);
        max_walking = max_walking.max(sim.walking_count());
    }

    if verbose {
        for agent in sim.agents() {
            println!(
                "    {} ({}) at ({:.1}, {:.1}) {:?}",
                agent.name, agent.role, agent.state.position.x, agent.state.position.y, agent.state.status
            );
        }
    }

    let expected_ticks = frames as u64 * 16 / config.tick_interval_ms;
    vec![
        check(
            "tick_accumulator",
            sim.tick_count() == expected_ticks,
            format!("{} ticks (expected {})", sim.tick_count(), expected_ticks),
        ),
        check(
            "walking_iff_target",
            consistent,
            "status WALKING exactly when a target is set",
        ),
        check("positions_in_bounds", in_bounds, "all positions within 0..=100"),
        check(
            "render_layers_sorted",
            layered,
            format!("{} sprites per frame", sim.agent_count()),
        ),
        check(
            "agents_wander",
            config.errand_probability == 0.0 || max_walking > 0,
            format!("at most {} walking at once", max_walking),
        ),
    ]
}

// ── 6. Reply mapping ────────────────────────────────────────────────────

fn validate_reply_mapping() -> Vec<TestResult> {
    println!("--- Reply Mapping ---");
    let offline = || Err(TransportError::Connection("offline".into()));
    let rejected = || {
        Ok(Reply {
            status: 503,
            body: serde_json::Value::Null,
        })
    };

    vec![
        check(
            "chat_network_error",
            chat_reply_text(offline()) == "❌ Network Error",
            "transport failure",
        ),
        check(
            "chat_connection_lost",
            chat_reply_text(rejected()) == "❌ Connection Lost",
            "non-success status",
        ),
        check(
            "deck_system_error",
            deck_outcome(offline()) == Err("❌ System Error"),
            "transport failure",
        ),
        check(
            "deck_generation_failed",
            deck_outcome(Ok(Reply::ok(serde_json::json!({"status": "error"}))))
                == Err("❌ Generation failed."),
            "status != success",
        ),
    ]
}
