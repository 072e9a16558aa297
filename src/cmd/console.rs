//! A minimal line-based control console.
//!
//! Stands in for the out-of-scope GUI bindings: each input line becomes one
//! configuration command, applied by the frame loop between frames.

use std::time::Duration;

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tokio_util::sync::CancellationToken;

use crate::models::{AlertChannel, ConfigCommand};

/// One parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    /// A configuration update for the frame loop.
    Config(ConfigCommand),

    /// Stop monitoring.
    Stop,
}

/// Parses one console line. Returns `Ok(None)` for blank lines and an error
/// message suitable for direct display otherwise.
///
/// Numeric scales mirror the sliders they replace: `threshold` takes a raw
/// fraction, `zone` and `minarea` take percentages.
pub fn parse_line(line: &str) -> Result<Option<ConsoleInput>, String> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let input = match keyword {
        "stop" => ConsoleInput::Stop,
        "threshold" => {
            let value = parse_number(&rest, "threshold")?;
            ConsoleInput::Config(ConfigCommand::SetThreshold(value))
        }
        "zone" => {
            let percent = parse_number(&rest, "zone")?;
            ConsoleInput::Config(ConfigCommand::SetZoneMargin(percent / 100.0))
        }
        "minarea" => {
            let percent = parse_number(&rest, "minarea")?;
            ConsoleInput::Config(ConfigCommand::SetMinArea(percent / 100.0))
        }
        "cooldown" => {
            let seconds = parse_number(&rest, "cooldown")?;
            ConsoleInput::Config(ConfigCommand::SetCooldown(Duration::from_secs_f32(
                seconds.max(0.0),
            )))
        }
        "channel" => match rest.first() {
            Some(&"tone") => ConsoleInput::Config(ConfigCommand::SetChannel(AlertChannel::Tone)),
            Some(&"speech") =>
                ConsoleInput::Config(ConfigCommand::SetChannel(AlertChannel::Speech)),
            _ => return Err("usage: channel <tone|speech>".to_string()),
        },
        "text" => {
            ConsoleInput::Config(ConfigCommand::SetWarningText(rest.join(" ")))
        }
        "target" => match (rest.first(), rest.get(1)) {
            (Some(label), Some(&"on")) => ConsoleInput::Config(ConfigCommand::SetTarget {
                label: (*label).to_string(),
                enabled: true,
            }),
            (Some(label), Some(&"off")) => ConsoleInput::Config(ConfigCommand::SetTarget {
                label: (*label).to_string(),
                enabled: false,
            }),
            _ => return Err("usage: target <label> <on|off>".to_string()),
        },
        other => return Err(format!("unknown command: {}", other)),
    };
    Ok(Some(input))
}

fn parse_number(rest: &[&str], keyword: &str) -> Result<f32, String> {
    rest.first()
        .and_then(|word| word.parse::<f32>().ok())
        .ok_or_else(|| format!("usage: {} <number>", keyword))
}

/// Reads console lines from stdin until cancelled, forwarding configuration
/// commands to the frame loop and turning `stop` into a cancellation.
pub async fn run_console(
    commands: mpsc::Sender<ConfigCommand>,
    cancellation_token: CancellationToken,
) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = cancellation_token.cancelled() => break,
            line = lines.next_line() => line,
        };
        let Ok(Some(line)) = line else { break };
        match parse_line(&line) {
            Ok(Some(ConsoleInput::Stop)) => {
                cancellation_token.cancel();
                break;
            }
            Ok(Some(ConsoleInput::Config(command))) => {
                if commands.send(command).await.is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(message) => eprintln!("{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_parse_to_nothing() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn slider_scales_match_the_original_controls() {
        assert_eq!(
            parse_line("threshold 0.6").unwrap(),
            Some(ConsoleInput::Config(ConfigCommand::SetThreshold(0.6)))
        );
        assert_eq!(
            parse_line("zone 10").unwrap(),
            Some(ConsoleInput::Config(ConfigCommand::SetZoneMargin(0.1)))
        );
        assert_eq!(
            parse_line("minarea 1").unwrap(),
            Some(ConsoleInput::Config(ConfigCommand::SetMinArea(0.01)))
        );
    }

    #[test]
    fn cooldown_and_channel_and_target_parse() {
        assert_eq!(
            parse_line("cooldown 5").unwrap(),
            Some(ConsoleInput::Config(ConfigCommand::SetCooldown(Duration::from_secs(5))))
        );
        assert_eq!(
            parse_line("channel tone").unwrap(),
            Some(ConsoleInput::Config(ConfigCommand::SetChannel(AlertChannel::Tone)))
        );
        assert_eq!(
            parse_line("target cat off").unwrap(),
            Some(ConsoleInput::Config(ConfigCommand::SetTarget {
                label: "cat".to_string(),
                enabled: false
            }))
        );
        assert_eq!(parse_line("stop").unwrap(), Some(ConsoleInput::Stop));
    }

    #[test]
    fn warning_text_keeps_its_spaces() {
        assert_eq!(
            parse_line("text 立入禁止 です").unwrap(),
            Some(ConsoleInput::Config(ConfigCommand::SetWarningText("立入禁止 です".to_string())))
        );
    }

    #[test]
    fn malformed_lines_report_usage() {
        assert!(parse_line("threshold").is_err());
        assert!(parse_line("channel loud").is_err());
        assert!(parse_line("selfdestruct").is_err());
    }
}
