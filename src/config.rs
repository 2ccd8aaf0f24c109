//! Configuration and CLI argument handling

use std::path::PathBuf;
use anyhow::bail;
use clap::Parser;

use crate::services::CuePlayer;

/// Topics used when none are given
pub const DEFAULT_TOPICS: [&str; 4] = ["Focus", "Reflect", "Create", "Rest"];

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "bead-timer")]
#[command(about = "A round-robin topic timer with audio cues and an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Topics to rotate through, comma separated
    #[arg(short, long, value_delimiter = ',', default_values = DEFAULT_TOPICS)]
    pub topics: Vec<String>,

    /// Seconds allotted to each topic
    #[arg(short, long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub duration: u32,

    /// Program that plays a sound file, e.g. paplay or afplay
    #[arg(long)]
    pub cue_player: Option<String>,

    /// Directory holding lo-metal-tone.mp3 and hi-metal-tone.mp3
    #[arg(long, default_value = "sounds")]
    pub sound_dir: PathBuf,

    /// Ring the terminal bell for cues when no player is set
    #[arg(long)]
    pub bell: bool,

    /// Start paused and wait for POST /resume
    #[arg(long)]
    pub start_paused: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Topics trimmed, without blanks or repeats, in the order given.
    pub fn topic_list(&self) -> anyhow::Result<Vec<String>> {
        let mut topics: Vec<String> = Vec::new();
        for topic in self.topics.iter().map(|t| t.trim()) {
            if !topic.is_empty() && !topics.iter().any(|t| t == topic) {
                topics.push(topic.to_string());
            }
        }

        if topics.is_empty() {
            bail!("at least one topic is required");
        }
        Ok(topics)
    }

    /// Pick the cue player from the flags; an explicit program wins over the bell.
    pub fn cue_player(&self) -> CuePlayer {
        match &self.cue_player {
            Some(program) => CuePlayer::command(program.clone(), &self.sound_dir),
            None if self.bell => CuePlayer::Bell,
            None => CuePlayer::Silent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("bead-timer").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.duration, 60);
        assert_eq!(config.topic_list().unwrap(), DEFAULT_TOPICS.to_vec());
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.cue_player(), CuePlayer::Silent);
    }

    #[test]
    fn topics_are_cleaned() {
        let config = parse(&["--topics", " Create ,,Rest,Create, "]).unwrap();
        assert_eq!(config.topic_list().unwrap(), vec!["Create", "Rest"]);
    }

    #[test]
    fn blank_topics_are_rejected() {
        let config = parse(&["--topics", " , "]).unwrap();
        assert!(config.topic_list().is_err());
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert!(parse(&["--duration", "0"]).is_err());
        assert!(parse(&["--duration", "-4"]).is_err());
        assert_eq!(parse(&["-d", "90"]).unwrap().duration, 90);
    }

    #[test]
    fn cue_player_selection() {
        let config = parse(&["--bell", "-v"]).unwrap();
        assert_eq!(config.cue_player(), CuePlayer::Bell);
        assert_eq!(config.log_level(), "debug");

        let config = parse(&["--bell", "--cue-player", "paplay", "--sound-dir", "/tmp/s"]).unwrap();
        assert_eq!(
            config.cue_player(),
            CuePlayer::command("paplay", std::path::Path::new("/tmp/s"))
        );
    }
}
