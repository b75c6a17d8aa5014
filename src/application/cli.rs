#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::CaptureName;
use crate::domain::models::PlaybackName;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Enter: Start a call.
- Space: Finish talking early and send what was recorded.
- Esc: End the chat.
- Up/Down, Ctrl+U/Ctrl+D, mouse wheel: Scroll the transcript.
- Ctrl+C: Quit.
"#;

    return text.trim().to_string();
}

/// Directory `debug.log` is written to when `RUST_LOG` includes callbot.
pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("CALLBOT_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("callbot");
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!(
        "Created default config file at {}",
        config_file_path.display()
    );
    return Ok(());
}

fn subcommand_call() -> Command {
    return Command::new("call").about("Start a voice call. This is the default when no subcommand is given.");
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Callbot")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Callbot with environment variable RUST_LOG=callbot")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_backend_url() -> Arg {
    return Arg::new(ConfigKey::BackendURL.to_string())
        .short('u')
        .long(ConfigKey::BackendURL.to_string())
        .env("CALLBOT_BACKEND_URL")
        .num_args(1)
        .help(format!(
            "Dialogue backend endpoint that transcribes recorded audio and replies. [default: {}]",
            Config::default(ConfigKey::BackendURL)
        ))
        .global(true);
}

fn arg_backend_timeout() -> Arg {
    return Arg::new(ConfigKey::BackendTimeout.to_string())
        .long(ConfigKey::BackendTimeout.to_string())
        .env("CALLBOT_BACKEND_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds for the dialogue backend to reply to a turn. [default: {}]",
            Config::default(ConfigKey::BackendTimeout)
        ))
        .global(true);
}

fn arg_backend_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::BackendHealthCheckTimeout.to_string())
        .long(ConfigKey::BackendHealthCheckTimeout.to_string())
        .env("CALLBOT_BACKEND_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out when checking the backend at startup. [default: {}]",
            Config::default(ConfigKey::BackendHealthCheckTimeout)
        ))
        .global(true);
}

fn arg_capture() -> Arg {
    return Arg::new(ConfigKey::Capture.to_string())
        .long(ConfigKey::Capture.to_string())
        .env("CALLBOT_CAPTURE")
        .num_args(1)
        .help(format!(
            "Where recorded audio comes from. [default: {}]",
            Config::default(ConfigKey::Capture)
        ))
        .value_parser(PossibleValuesParser::new(CaptureName::VARIANTS))
        .global(true);
}

fn arg_capture_command() -> Arg {
    return Arg::new(ConfigKey::CaptureCommand.to_string())
        .long(ConfigKey::CaptureCommand.to_string())
        .env("CALLBOT_CAPTURE_COMMAND")
        .num_args(1)
        .help(format!(
            "Recorder command that writes WAV audio to stdout until it is killed. [default: {}]",
            Config::default(ConfigKey::CaptureCommand)
        ))
        .global(true);
}

fn arg_capture_timeout() -> Arg {
    return Arg::new(ConfigKey::CaptureTimeout.to_string())
        .long(ConfigKey::CaptureTimeout.to_string())
        .env("CALLBOT_CAPTURE_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time in milliseconds after which a recording is stopped and sent. [default: {}]",
            Config::default(ConfigKey::CaptureTimeout)
        ))
        .global(true);
}

fn arg_playback() -> Arg {
    return Arg::new(ConfigKey::Playback.to_string())
        .long(ConfigKey::Playback.to_string())
        .env("CALLBOT_PLAYBACK")
        .num_args(1)
        .help(format!(
            "How bot replies are spoken. [default: {}]",
            Config::default(ConfigKey::Playback)
        ))
        .value_parser(PossibleValuesParser::new(PlaybackName::VARIANTS))
        .global(true);
}

fn arg_playback_command() -> Arg {
    return Arg::new(ConfigKey::PlaybackCommand.to_string())
        .long(ConfigKey::PlaybackCommand.to_string())
        .env("CALLBOT_PLAYBACK_COMMAND")
        .num_args(1)
        .help(format!(
            "Speech command that is passed the text to speak as its last argument. [default: {}]",
            Config::default(ConfigKey::PlaybackCommand)
        ))
        .global(true);
}

fn arg_greeting() -> Arg {
    return Arg::new(ConfigKey::Greeting.to_string())
        .long(ConfigKey::Greeting.to_string())
        .env("CALLBOT_GREETING")
        .num_args(1)
        .help(format!(
            "What the bot says when a call starts. [default: {}]",
            Config::default(ConfigKey::Greeting)
        ))
        .global(true);
}

fn arg_apology() -> Arg {
    return Arg::new(ConfigKey::Apology.to_string())
        .long(ConfigKey::Apology.to_string())
        .env("CALLBOT_APOLOGY")
        .num_args(1)
        .help(format!(
            "What the bot says when a turn fails. [default: {}]",
            Config::default(ConfigKey::Apology)
        ))
        .global(true);
}

fn arg_farewell() -> Arg {
    return Arg::new(ConfigKey::Farewell.to_string())
        .long(ConfigKey::Farewell.to_string())
        .env("CALLBOT_FAREWELL")
        .num_args(1)
        .help(format!(
            "What the bot says when the backend ends the conversation. [default: {}]",
            Config::default(ConfigKey::Farewell)
        ))
        .global(true);
}

fn arg_config_file() -> Arg {
    return Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("CALLBOT_CONFIG_FILE")
        .num_args(1)
        .help(format!(
            "Path to configuration file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
                return format!("CALL {line}").underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("callbot")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_call())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_config_file())
        .arg(arg_backend_url())
        .arg(arg_backend_timeout())
        .arg(arg_backend_health_check_timeout())
        .arg(arg_capture())
        .arg(arg_capture_command())
        .arg(arg_capture_timeout())
        .arg(arg_playback())
        .arg(arg_playback_command())
        .arg(arg_greeting())
        .arg(arg_apology())
        .arg(arg_farewell());
}

/// Handles the one-shot subcommands. Returns true when a call should be
/// started with the loaded config.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_dir().join("debug.log").display());
                }
                Some(("enum-config", _)) => {
                    println!("{}", ConfigKey::VARIANTS.join("\n"));
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("call", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
