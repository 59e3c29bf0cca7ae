//! farm-runner: headless host for the Riverfarm simulation.
//!
//! Usage:
//!   farm-runner --fertilizer high --pest intensive --buffer off --cycles 50
//!   farm-runner --config data/session.json --ipc-mode
//!   farm-runner --keys --fertilizer low
//!
//! --fertilizer, --pest and --buffer set the starting decisions in every mode.

use anyhow::Result;
use riverfarm_core::{
    FertilizerLevel, PestManagement, PlayerCommand, SessionConfig, SessionController,
    SessionState, SimError, SimEvent, SimResult,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Command { command: PlayerCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct IpcReply<'a> {
    state:  &'a SessionState,
    events: Vec<SimEvent>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let cycles = parse_arg(&args, "--cycles", 20u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let keys_mode = args.iter().any(|a| a == "--keys");

    let config = match arg_value(&args, "--config") {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let mut session = SessionController::with_config(config)?;

    apply_decision_flags(&mut session, &args)?;

    if ipc_mode {
        return run_ipc_loop(&mut session, io::stdin().lock(), io::stdout());
    }
    if keys_mode {
        return run_keys_loop(&mut session);
    }

    let decisions = session.state().decisions;
    println!("Riverfarm: farm-runner");
    println!("  fertilizer: {}", decisions.fertilizer_level);
    println!("  pest:       {}", decisions.pest_management);
    println!("  buffer:     {}", if decisions.buffer_present { "on" } else { "off" });
    println!("  cycles:     {cycles}");
    println!();

    let ran = run_batch(&mut session, cycles);
    print_summary(session.state(), ran);
    Ok(())
}

/// Decision flags seed every mode, not just batch.
fn apply_decision_flags(session: &mut SessionController, args: &[String]) -> SimResult<()> {
    if let Some(level) = arg_value(args, "--fertilizer") {
        session.set_fertilizer(level.parse()?);
    }
    if let Some(mode) = arg_value(args, "--pest") {
        session.set_pest_management(mode.parse()?);
    }
    if let Some(buffer) = arg_value(args, "--buffer") {
        session.set_buffer(parse_switch(buffer)?);
    }
    Ok(())
}

/// Advance up to `cycles` times, stopping once the session is terminal.
/// Returns the number of advances actually run.
fn run_batch(session: &mut SessionController, cycles: u64) -> u64 {
    let mut ran = 0;
    while ran < cycles && !session.state().status.is_terminal() {
        session.advance_cycle();
        ran += 1;
    }
    ran
}

fn run_ipc_loop<R: BufRead, W: Write>(
    session: &mut SessionController,
    mut input: R,
    mut output: W,
) -> Result<()> {
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err = SimError::from(e);
                let err_json = serde_json::json!({ "error": err.to_string() });
                writeln!(output, "{}", err_json)?;
                output.flush()?;
                continue;
            }
        };

        let events = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => vec![],
            IpcCommand::Command { command } => {
                log::debug!("ipc command: {}", command.name());
                session.apply(&command)
            }
        };
        let reply = IpcReply { state: session.state(), events };
        writeln!(output, "{}", serde_json::to_string(&reply)?)?;
        output.flush()?;
    }
    Ok(())
}

fn run_keys_loop(session: &mut SessionController) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("keys: 1/2/3 fertilizer, i/x pest, b buffer, n or space advance, r reset, q quit");
    writeln!(stdout, "{}", status_line(session.state()))?;

    for line in stdin.lock().lines() {
        let line = line?;
        for key in line.chars() {
            if key == 'q' {
                return Ok(());
            }
            let Some(command) = key_command(key, session.state()) else {
                log::warn!("Unknown key: {key:?}");
                continue;
            };
            for event in session.apply(&command) {
                log::info!("{}: {}", event.type_name(), serde_json::to_string(&event)?);
            }
        }
        writeln!(stdout, "{}", status_line(session.state()))?;
        stdout.flush()?;
    }
    Ok(())
}

/// Map one key press to a command. The buffer key toggles, so it needs the state.
fn key_command(key: char, state: &SessionState) -> Option<PlayerCommand> {
    let command = match key.to_ascii_lowercase() {
        '1' => PlayerCommand::SetFertilizer { level: FertilizerLevel::Low },
        '2' => PlayerCommand::SetFertilizer { level: FertilizerLevel::Medium },
        '3' => PlayerCommand::SetFertilizer { level: FertilizerLevel::High },
        'i' => PlayerCommand::SetPestManagement { mode: PestManagement::Integrated },
        'x' => PlayerCommand::SetPestManagement { mode: PestManagement::Intensive },
        'b' => PlayerCommand::SetBuffer { present: !state.decisions.buffer_present },
        'n' | ' ' => PlayerCommand::AdvanceCycle,
        'r' => PlayerCommand::Reset,
        _ => return None,
    };
    Some(command)
}

fn status_line(state: &SessionState) -> String {
    let d = &state.decisions;
    format!(
        "cycle {:>3} | {:?} | fert={} pest={} buffer={} | yield={} pollution={:.1} \
         | health={} | total={:.0}",
        state.cycle_count,
        state.status,
        d.fertilizer_level,
        d.pest_management,
        if d.buffer_present { "on" } else { "off" },
        state.last_result.crop_yield,
        state.last_result.pollution_index,
        state.river_health,
        state.cumulative_yield,
    )
}

fn print_summary(state: &SessionState, ran: u64) {
    println!("=== RUN SUMMARY ===");
    println!("  cycles run:       {ran}");
    println!("  final cycle:      {}", state.cycle_count);
    println!("  status:           {:?}", state.status);
    println!("  river health:     {}", state.river_health);
    println!("  cumulative yield: {:.0}", state.cumulative_yield);
    println!("  last pollution:   {:.1}", state.last_result.pollution_index);
}

fn parse_switch(value: &str) -> SimResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(SimError::invalid("buffer_present", value)),
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
