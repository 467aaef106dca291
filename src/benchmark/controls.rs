use std::io::BufRead;
use std::thread;

use crate::sort::RunControl;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlCommand {
    TogglePause,
    Cancel,
}

/// Maps one line of user input to a control command.
pub fn parse_command(line: &str) -> Option<ControlCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "p" | "pause" | "resume" => Some(ControlCommand::TogglePause),
        "c" | "q" | "x" | "cancel" => Some(ControlCommand::Cancel),
        _ => None,
    }
}

pub fn apply_command(control: &RunControl, command: ControlCommand) {
    match command {
        ControlCommand::TogglePause => {
            control.toggle_pause();
            if control.is_paused() {
                eprintln!("\n  Operation PAUSED. Enter 'p' to resume...");
            } else {
                eprintln!("\n  Operation RESUMED!");
            }
        }
        ControlCommand::Cancel => {
            control.cancel();
            eprintln!("\n  Operation cancelled by user!");
        }
    }
}

pub fn print_controls() {
    println!("  Controls while sorting (type then press Enter):");
    println!("    p      : pause / resume");
    println!("    c      : cancel the current run");
    println!("    Ctrl+C : cancel the current run");
    println!();
}

/// Spawns a detached thread that reads stdin lines and drives `control`.
/// The thread ends when stdin closes.
pub fn spawn_key_watcher(control: RunControl) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if let Some(command) = parse_command(&line) {
                apply_command(&control, command);
            }
        }
    })
}
