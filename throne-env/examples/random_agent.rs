//! Runs a random policy on a scripted fight.
//!
//! The capture backend replays a fight in which the target loses health while
//! the player slowly dies, and the input backend only logs the key presses.
//!
//! ```bash
//! cargo run --example random_agent -p throne-env
//! ```
use anyhow::Result;
use throne_core::{
    record::{BufferedRecorder, RecordValue},
    util::eval_with_recorder,
    Env as _,
};
use throne_env::{
    tracker::Position,
    util::test::{test_layout, RandomPolicy, ScriptedCapture, ScriptedCaptureConfig},
    LoggingInput, Telemetry, ThroneEnv, ThroneEnvConfig,
};

type Env = ThroneEnv<ScriptedCapture, LoggingInput>;
type EnvConfig = ThroneEnvConfig<ScriptedCapture, LoggingInput>;

fn capture_config() -> ScriptedCaptureConfig {
    let mut config = ScriptedCaptureConfig::default().window_size(Some((160, 90)));
    for i in 0..20 {
        let telemetry = Telemetry {
            player_position: Some(Position::new(i * 7, i * 3)),
            ..Default::default()
        };
        let player = 1.0 - i as f32 / 19.0;
        let target = (0.9 - i as f32 * 0.1).max(0.0);
        config = config.push_frame(player, target, telemetry);
    }
    config
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    fastrand::seed(42);

    let config = EnvConfig::default()
        .hud_layout(test_layout())
        .capture_config(capture_config())
        .report_episode_length(true)
        .max_steps(Some(50));
    let mut env = Env::build(&config, 42)?;
    let mut policy = RandomPolicy::new();
    let mut recorder = BufferedRecorder::new();

    let returns = eval_with_recorder(&mut env, &mut policy, 1, &mut recorder)?;
    println!("Return: {:?}", returns);

    for record in recorder.iter() {
        if let Some(RecordValue::String(action)) = record.get("action") {
            println!(
                "{:>14} reward = {:>8.2}",
                action,
                record.get_scalar("reward")?
            );
        }
    }

    Ok(())
}
