// src/main.rs

mod classifier;
mod config;
mod dispatcher;
mod event_log;
mod hand_source;
mod landmarks;
mod link;
mod types;
mod udp_link;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use classifier::{FingerClassifier, PoseError};
use dispatcher::GestureDispatcher;
use event_log::CommandLog;
use hand_source::{HandSource, ReplayHandSource};
use link::VehicleLink;
use types::{CommandRecord, Config, FlightState, LinkMode};

#[derive(Default)]
struct SessionStats {
    frames: u64,
    hand_frames: u64,
    degenerate_frames: u64,
    commands: u64,
    takeoffs: u32,
    landings: u32,
    link_errors: u32,
}

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());
    let config = Config::load(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(config.logging.level.as_str())
        .init();

    info!("🛸 Gesture Flight Control starting");
    info!(
        "Thresholds: thumb>{:.2}, fingers>{:.2}, point v={:.3}h h={:.3}w",
        config.detection.thumb_raise_ratio,
        config.detection.finger_raise_ratio,
        config.detection.vertical_point_ratio,
        config.detection.horizontal_point_ratio
    );

    let mut link: Box<dyn VehicleLink> = match config.link.mode {
        LinkMode::DryRun => {
            warn!("⚪ Dry-run link: commands are logged, nothing flies");
            Box::new(link::DryRunLink::new())
        }
        LinkMode::Udp => Box::new(udp_link::UdpLink::bind(&config.link)?),
    };

    link.connect().context("entering vehicle command mode")?;
    info!("✓ Vehicle link ready");

    let battery = link.battery().context("querying battery")?;
    if battery < 15 {
        warn!("🔋 Battery low: {}%", battery);
    } else {
        info!("🔋 Battery: {}%", battery);
    }

    link.stream_on().context("enabling video stream")?;

    let mut source = ReplayHandSource::open(&config.input.landmarks_path)?;
    let session_name = source
        .path()
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("session")
        .to_string();

    let mut command_log = if config.output.save_commands {
        Some(CommandLog::create(&config.output.dir, &session_name)?)
    } else {
        None
    };

    let classifier = FingerClassifier::new(config.detection.clone());
    let mut dispatcher = GestureDispatcher::new(config.motion.clone());
    let mut stats = SessionStats::default();

    while let Some(frame) = source.next_frame()? {
        stats.frames += 1;

        // Nothing detected this frame: the dispatcher is not consulted.
        let Some(hand) = frame.landmarks else {
            continue;
        };
        stats.hand_frames += 1;

        let pose = match classifier.classify(&hand, frame.width, frame.height) {
            Ok(pose) => pose,
            Err(e @ PoseError::DegenerateScale { .. }) => {
                stats.degenerate_frames += 1;
                debug!("Frame {}: skipped, {}", stats.frames, e);
                continue;
            }
            Err(e) => {
                warn!("Frame {}: skipped, {}", stats.frames, e);
                continue;
            }
        };

        info!("🖐 Frame {}: fingers {}", stats.frames, pose.fingers);

        match dispatcher.dispatch(&pose, link.as_mut()) {
            Ok(Some(rule)) => {
                stats.commands += 1;
                match rule.action {
                    dispatcher::FlightAction::TakeOff => stats.takeoffs += 1,
                    dispatcher::FlightAction::Land => stats.landings += 1,
                    _ => {}
                }
                info!(
                    "🚀 Frame {}: {} ({})",
                    stats.frames,
                    rule.action.as_str(),
                    dispatcher.state().as_str()
                );
                if let Some(log) = command_log.as_mut() {
                    log.append(&CommandRecord {
                        frame_id: stats.frames,
                        timestamp_ms: frame.timestamp_ms,
                        action: rule.action.as_str(),
                        fingers: pose.fingers.to_string(),
                        state: dispatcher.state().as_str(),
                    })?;
                }
            }
            Ok(None) => {}
            Err(e) => {
                // No retry: the failure is surfaced and the next frame gets
                // a fresh chance. Takeoff/land state was not advanced.
                stats.link_errors += 1;
                error!(
                    "Frame {}: vehicle command failed: {} (state stays {})",
                    stats.frames,
                    e,
                    dispatcher.state().as_str()
                );
            }
        }

        if stats.frames % 50 == 0 {
            info!(
                "Progress: {} frames | hand: {} | commands: {} | state: {}",
                stats.frames,
                stats.hand_frames,
                stats.commands,
                dispatcher.state().as_str()
            );
        }
    }

    if dispatcher.state() == FlightState::Airborne {
        warn!("⚠️  Input ended while airborne, sending land");
        match link.land() {
            Ok(()) => stats.landings += 1,
            Err(e) => error!("Final land failed: {}", e),
        }
    }

    info!("\n📊 Session Report:");
    info!("  Frames: {}", stats.frames);
    info!(
        "  Frames with a hand: {} ({:.1}%)",
        stats.hand_frames,
        100.0 * stats.hand_frames as f64 / stats.frames.max(1) as f64
    );
    if stats.degenerate_frames > 0 {
        warn!("  Degenerate-scale skips: {}", stats.degenerate_frames);
    }
    info!("  Commands dispatched: {}", stats.commands);
    info!("  🛫 Takeoffs: {}  🛬 Landings: {}", stats.takeoffs, stats.landings);
    if stats.link_errors > 0 {
        warn!("  ❌ Link errors: {}", stats.link_errors);
    }
    if let Some(log) = command_log.as_ref() {
        info!("  💾 Command log: {}", log.path().display());
    }

    Ok(())
}
