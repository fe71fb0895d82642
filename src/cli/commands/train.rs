//! Train command - run self-play between learning agents

use std::{
    cell::RefCell,
    fs::File,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::output::{format_number, print_kv, print_section, print_subsection},
    config::{Pairing, SelfPlayConfig},
    export::{heatmap_text, write_playbook_json, write_win_ratio_csv},
    learner::ReinforcementValues,
    pipeline::{MetricsObserver, MetricsSummary, ProgressObserver, SelfPlaySession, SessionSummary},
};

#[derive(Parser, Debug)]
#[command(about = "Run self-play between learning agents")]
pub struct TrainArgs {
    /// JSON configuration file; explicit flags override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Board width (columns)
    #[arg(long, short = 'W')]
    pub width: Option<usize>,

    /// Board height (rows)
    #[arg(long, short = 'H')]
    pub height: Option<usize>,

    /// Number of rounds of the pairing schedule
    #[arg(long, short = 'r')]
    pub rounds: Option<usize>,

    /// Number of agents in the roster
    #[arg(long, short = 'a')]
    pub agents: Option<usize>,

    /// Pairing schedule as first-second pairs (e.g., "0-1,0-2")
    #[arg(long)]
    pub pairings: Option<String>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Reinforcement factors (win=1.1,loss=0.9,floor=1.0)
    #[arg(long)]
    pub reward: Option<String>,

    /// Write every agent's win-ratio history as CSV
    #[arg(long)]
    pub win_ratio_csv: Option<PathBuf>,

    /// Write agent 0's playbook heatmaps as JSON
    #[arg(long)]
    pub playbook_json: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Print text heatmaps for the first N tables of agent 0
    #[arg(long, default_value_t = 0)]
    pub heatmaps: usize,

    /// Show progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    config: &'a SelfPlayConfig,
    session: &'a SessionSummary,
    metrics: &'a MetricsSummary,
}

/// Parse a pairing schedule such as `0-1,0-2`
pub(crate) fn parse_pairings(s: &str) -> Result<Vec<Pairing>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| -> Result<Pairing> {
            let (first, second) = part
                .split_once('-')
                .ok_or_else(|| anyhow!("Invalid pairing '{part}' (expected first-second)"))?;
            let first = first
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid agent index in pairing '{part}'"))?;
            let second = second
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid agent index in pairing '{part}'"))?;
            Ok(Pairing::new(first, second))
        })
        .collect()
}

/// Parse reinforcement factors from string (e.g., "win=1.1,loss=0.9,floor=1")
pub(crate) fn parse_reward_schedule(s: &str) -> Result<ReinforcementValues> {
    let mut values = ReinforcementValues::default();

    for part in s.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (key, value_str) = trimmed
            .split_once('=')
            .ok_or_else(|| anyhow!("Missing '=' in reward entry: '{trimmed}'"))?;
        let value: f64 = value_str
            .trim()
            .parse()
            .with_context(|| format!("Invalid reward value in '{trimmed}'"))?;

        match key.trim().to_ascii_lowercase().as_str() {
            "win" | "w" => values.win = value,
            "loss" | "l" => values.loss = value,
            "floor" | "f" => values.floor = value,
            other => return Err(anyhow!("Unknown reward key '{other}'")),
        }
    }

    Ok(values)
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("selfplay_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

/// Merge the optional config file with explicit flags.
pub(crate) fn build_config(args: &TrainArgs) -> Result<SelfPlayConfig> {
    let mut config = match &args.config {
        Some(path) => SelfPlayConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SelfPlayConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if let Some(agents) = args.agents {
        config.agents = agents;
    }
    if let Some(raw) = &args.pairings {
        config.pairings = Some(parse_pairings(raw)?);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(raw) = &args.reward {
        config.reinforcement = parse_reward_schedule(raw)?;
    }

    config.validate().context("Invalid self-play configuration")?;
    Ok(config)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = build_config(&args)?;
    info!("starting self-play with {config:?}");

    let metrics = Rc::new(RefCell::new(MetricsObserver::new()));
    let mut session = SelfPlaySession::new(config)?.with_observer(Box::new(Rc::clone(&metrics)));
    if args.progress {
        session = session.with_observer(Box::new(ProgressObserver::new()));
    }

    let summary = session.run()?;
    let metrics_summary = metrics.borrow().summary();
    let config = session.config();

    print_section("Self-play summary");
    print_kv("Board", &format!("{}x{}", config.width, config.height));
    print_kv("Matches", &format_number(summary.total_matches));
    print_kv(
        "Opener wins",
        &format!(
            "{} ({:.1}%)",
            format_number(summary.first_seat_wins),
            metrics_summary.first_seat_win_rate * 100.0
        ),
    );
    print_kv(
        "Avg match length",
        &format!("{:.2} moves", summary.avg_match_length),
    );
    print_kv("Longest match", &metrics_summary.longest_match.to_string());

    print_subsection("Agents");
    for stats in &summary.agents {
        let ratio = stats
            .final_win_ratio
            .map_or_else(|| "-".to_string(), |r| format!("{r:.3}"));
        print_kv(
            &stats.name,
            &format!(
                "W {} / L {}  ratio {ratio}  tables {}  entropy {:.3}",
                stats.wins, stats.losses, stats.playbook_size, stats.avg_entropy
            ),
        );
    }

    if args.heatmaps > 0
        && let Some(agent) = session.agent(0)
    {
        print_subsection(&format!("Heatmaps for {}", agent.name()));
        for table in agent.playbook().iter().take(args.heatmaps) {
            println!("{}", table.state());
            println!("{}", heatmap_text(table));
        }
    }

    if let Some(path) = &args.win_ratio_csv {
        ensure_parent(path)?;
        write_win_ratio_csv(session.agents(), path)
            .with_context(|| format!("Failed to write win ratios to {}", path.display()))?;
        println!("Win ratios written to {}", path.display());
    }

    if let Some(path) = &args.playbook_json
        && let Some(agent) = session.agent(0)
    {
        ensure_parent(path)?;
        write_playbook_json(agent, path)
            .with_context(|| format!("Failed to write playbook to {}", path.display()))?;
        println!("Playbook written to {}", path.display());
    }

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        ensure_parent(&path)?;
        let file = File::create(&path)
            .with_context(|| format!("Failed to create summary file {}", path.display()))?;
        to_writer_pretty(
            file,
            &TrainingSummaryFile {
                config,
                session: &summary,
                metrics: &metrics_summary,
            },
        )
        .context("Failed to serialize summary")?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> TrainArgs {
        TrainArgs::parse_from(std::iter::once("chomp-train").chain(args.iter().copied()))
    }

    #[test]
    fn pairings_parse_and_reject_garbage() {
        assert_eq!(
            parse_pairings("0-1, 2-0").unwrap(),
            vec![Pairing::new(0, 1), Pairing::new(2, 0)]
        );
        assert!(parse_pairings("0:1").is_err());
        assert!(parse_pairings("a-1").is_err());
    }

    #[test]
    fn reward_schedule_overrides_named_factors() {
        let values = parse_reward_schedule("win=1.5, floor=0.5").unwrap();
        assert_eq!(values.win, 1.5);
        assert_eq!(values.loss, 0.9);
        assert_eq!(values.floor, 0.5);
        assert!(parse_reward_schedule("draw=1").is_err());
        assert!(parse_reward_schedule("win").is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let config = build_config(&parse(&["--width", "5", "--agents", "2", "--seed", "9"])).unwrap();
        assert_eq!(config.width, 5);
        assert_eq!(config.height, 3);
        assert_eq!(config.agents, 2);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.schedule(), vec![Pairing::new(0, 1)]);
    }

    #[test]
    fn invalid_flags_fail_validation() {
        assert!(build_config(&parse(&["--agents", "2", "--pairings", "0-2"])).is_err());
        assert!(build_config(&parse(&["--width", "0"])).is_err());
        assert!(build_config(&parse(&["--reward", "win=0.5"])).is_err());
        assert!(build_config(&parse(&["--reward", "floor=0.5"])).is_err());
        assert!(build_config(&parse(&["--reward", "loss=1.2"])).is_err());
    }

    #[test]
    fn summary_path_gains_json_extension() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/run")),
            PathBuf::from("out/run.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.JSON")),
            PathBuf::from("out/run.JSON")
        );
    }
}
