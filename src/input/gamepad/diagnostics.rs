//! `--list-gamepads`: enumerate controllers and the names their buttons map to

use super::buttons::gilrs_button_to_name;
use colored::*;
use gilrs::{Button, Event, EventType, Gilrs};
use std::thread;
use std::time::{Duration, Instant};

const ALL_BUTTONS: [Button; 17] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
];

/// Print every detected gamepad and its currently held buttons.
///
/// Waits a few seconds first so Bluetooth controllers have time to show up.
pub fn print_gamepad_diagnostics() -> anyhow::Result<()> {
    println!("\n{}", "=== Gamepad Diagnostics ===".bold().cyan());
    println!("Platform: {}", std::env::consts::OS);

    let mut gilrs = Gilrs::new().map_err(|e| anyhow::anyhow!("Failed to initialize gilrs: {}", e))?;

    println!("Waiting for gamepads to connect (3 seconds)...");
    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(3) {
        while let Some(Event { event, .. }) = gilrs.next_event() {
            if event == EventType::Connected {
                println!("  {}", "Gamepad connection detected".green());
            }
        }
        thread::sleep(Duration::from_millis(100));
    }

    let gamepads: Vec<_> = gilrs.gamepads().collect();
    if gamepads.is_empty() {
        println!("{}", "No gamepads detected".yellow());
        return Ok(());
    }

    println!("\n{} {}", "Found gamepads:".bold(), gamepads.len().to_string().green());
    for (id, gamepad) in gamepads {
        println!("\n  {} {:?}", "Gamepad".bright_white(), id);
        println!("    Name:      \"{}\"", gamepad.name());
        println!("    Connected: {}", gamepad.is_connected());
        println!("    Power:     {:?}", gamepad.power_info());

        let held: Vec<&str> = ALL_BUTTONS
            .iter()
            .filter(|b| gamepad.is_pressed(**b))
            .filter_map(|b| gilrs_button_to_name(*b))
            .collect();
        if held.is_empty() {
            println!("    Held:      (none)");
        } else {
            println!("    Held:      {}", held.join(", ").yellow());
        }
    }

    println!("\n{}", "Button names usable in config.json:".bold());
    let names: Vec<&str> = ALL_BUTTONS.iter().filter_map(|b| gilrs_button_to_name(*b)).collect();
    println!("  {}", names.join(", "));

    Ok(())
}
