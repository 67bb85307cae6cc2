use crate::device_display::interface::{DeviceDisplay, DisplayEvent, EventSubscribers, View};
use crate::error::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use unicode_width::UnicodeWidthStr;

const HELP: &str = "Commands: file <path> | run | camera | quit";

/// Reads commands from stdin and prints each view to stdout.
pub struct DeviceDisplayConsole {
    subscribers: EventSubscribers,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            subscribers: EventSubscribers::default(),
        }
    }
}

pub fn parse_command(line: &str) -> Option<DisplayEvent> {
    let line = line.trim();
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match (command.to_lowercase().as_str(), argument) {
        ("run", "") => Some(DisplayEvent::RunInference),
        ("camera", "") => Some(DisplayEvent::ToggleCamera),
        ("quit" | "exit", "") => Some(DisplayEvent::Quit),
        ("file", path) if !path.is_empty() => Some(DisplayEvent::SelectFile(PathBuf::from(path))),
        _ => None,
    }
}

pub fn format_view(view: &View) -> String {
    let mut lines = vec![
        format!(
            "Camera: {}  [{}]",
            if view.camera_on { "on" } else { "off" },
            view.camera_button
        ),
        format!("File: {}", view.file.as_deref().unwrap_or("(none)")),
    ];
    lines.extend(view.result.lines().map(str::to_string));
    if let Some(top) = &view.top {
        lines.push(format!(">> {} <<", top));
    }

    // Padding is counted in terminal columns; emoji take two.
    let width = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    let mut out = format!("┌{}┐\n", "─".repeat(width + 2));
    for line in &lines {
        let padding = width - line.width();
        out.push_str(&format!("│ {}{} │\n", line, " ".repeat(padding)));
    }
    out.push_str(&format!("└{}┘", "─".repeat(width + 2)));
    out
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<()> {
        println!("{}", HELP);
        Ok(())
    }

    fn render(&mut self, view: &View) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", format_view(view))?;
        stdout.flush()?;
        Ok(())
    }

    fn events(&self) -> Receiver<DisplayEvent> {
        let events = self.subscribers.subscribe();
        let subscribers = self.subscribers.clone();

        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(event) => {
                        if subscribers.send(event) == 0 {
                            return;
                        }
                    }
                    None => println!("Unknown command. {}", HELP),
                }
            }
            subscribers.send(DisplayEvent::Quit);
        });

        events
    }
}
