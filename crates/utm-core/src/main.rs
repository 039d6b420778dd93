//! UTM command line
//!
//! Plays a single trust-gated match against a classic opponent, runs the
//! investment trust game, or prints the default configuration.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use utm_core::trust_game::{self, TrustGameParams};
use utm_core::{
    default_config_toml, play_match, utm_tft_wsls, utm_tit_for_tat, utm_win_stay_lose_shift,
    Alternator, Cooperator, Defector, Grudger, Policy, RandomPolicy, TitForTat, UtmConfig,
    WinStayLoseShift,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "utm")]
#[command(about = "Trust-gated repeated-game strategies")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one match of a trust-gated strategy against a classic opponent
    Play {
        /// Preset strategy; ignored when --config is given
        #[arg(long, value_enum, default_value_t = Preset::UtmTft)]
        strategy: Preset,

        /// TOML config describing the strategy
        #[arg(long)]
        config: Option<PathBuf>,

        /// Opponent policy
        #[arg(long, value_enum, default_value_t = Opponent::TitForTat)]
        opponent: Opponent,

        /// Number of rounds
        #[arg(long, default_value_t = 200)]
        rounds: usize,

        /// Seed for the random opponent
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Cooperation probability for the random opponent
        #[arg(long, default_value_t = 0.5)]
        cooperate_prob: f64,

        /// Write the per-round trace as JSONL
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Run the investment trust game
    TrustGame(TrustGameArgs),

    /// Print the default configuration as TOML
    DefaultConfig,
}

#[derive(clap::Args, Debug)]
struct TrustGameArgs {
    #[arg(long, default_value_t = 50)]
    rounds: usize,

    #[arg(long, default_value_t = 5.0)]
    send: f64,

    /// Share of the tripled investment returned on a good round
    #[arg(long, default_value_t = 0.5)]
    return_good: f64,

    #[arg(long, default_value_t = 0.0)]
    betray_prob: f64,

    /// Share returned on a betrayal round
    #[arg(long, default_value_t = 0.0)]
    return_bad: f64,

    #[arg(long, default_value_t = 0.45)]
    threshold: f64,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

impl From<TrustGameArgs> for TrustGameParams {
    /// The investor's estimator always comes from the library defaults.
    fn from(args: TrustGameArgs) -> Self {
        Self {
            rounds: args.rounds,
            send: args.send,
            return_good: args.return_good,
            betray_prob: args.betray_prob,
            return_bad: args.return_bad,
            threshold: args.threshold,
            seed: args.seed,
            ..TrustGameParams::default()
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    UtmTft,
    UtmWsls,
    UtmTftWsls,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Opponent {
    Cooperator,
    Defector,
    TitForTat,
    WinStayLoseShift,
    Grudger,
    Alternator,
    Random,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("UTM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn build_preset(preset: Preset) -> utm_core::Result<Box<dyn Policy>> {
    let player: Box<dyn Policy> = match preset {
        Preset::UtmTft => Box::new(utm_tit_for_tat()?),
        Preset::UtmWsls => Box::new(utm_win_stay_lose_shift()?),
        Preset::UtmTftWsls => Box::new(utm_tft_wsls()?),
    };
    Ok(player)
}

fn build_opponent(opponent: Opponent, seed: u64, p: f64) -> utm_core::Result<Box<dyn Policy>> {
    let policy: Box<dyn Policy> = match opponent {
        Opponent::Cooperator => Box::new(Cooperator),
        Opponent::Defector => Box::new(Defector),
        Opponent::TitForTat => Box::new(TitForTat),
        Opponent::WinStayLoseShift => Box::new(WinStayLoseShift),
        Opponent::Grudger => Box::new(Grudger),
        Opponent::Alternator => Box::new(Alternator),
        Opponent::Random => Box::new(RandomPolicy::new(p, seed)?),
    };
    Ok(policy)
}

#[allow(clippy::too_many_arguments)]
fn run_play(
    strategy: Preset,
    config: Option<PathBuf>,
    opponent: Opponent,
    rounds: usize,
    seed: u64,
    cooperate_prob: f64,
    trace_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut player, payoffs) = match config {
        Some(path) => {
            let config = UtmConfig::from_file(&path)?;
            (config.build_strategy()?, config.payoffs)
        }
        None => (build_preset(strategy)?, Default::default()),
    };
    let mut opponent = build_opponent(opponent, seed, cooperate_prob)?;
    if rounds == 0 {
        tracing::warn!("zero rounds requested, the match will be empty");
    }

    let trace = play_match(player.as_mut(), opponent.as_mut(), rounds, &payoffs)?;

    println!("{} vs {} ({} rounds)", trace.player_a, trace.player_b, rounds);
    println!("==========================");
    println!("Score: {} - {}", trace.score_a(), trace.score_b());
    println!("Cooperation rate: {:.3}", trace.cooperation_rate_a());
    if let Some(trust) = trace.trust_trajectory_a().last() {
        println!("Final trust: {:.3}", trust);
    }

    if let Some(path) = trace_path {
        fs::write(&path, trace.to_jsonl()?)?;
        println!("Wrote trace to {}", path.display());
    }
    Ok(())
}

fn run_trust_game(params: TrustGameParams) -> Result<(), Box<dyn std::error::Error>> {
    let report = trust_game::run(&params)?;

    println!("Investment Trust Game ({} rounds)", params.rounds);
    println!("==========================");
    println!("| Metric | Value |");
    println!("|--------|-------|");
    if let Some(final_trust) = report.final_trust() {
        println!("| Final trust | {:.3} |", final_trust);
    }
    println!("| Cumulative payoff | {:.2} |", report.cumulative_payoff());
    println!("| Cooperation rate | {:.3} |", report.cooperation_rate());
    println!("| Betrayals | {} |", report.betrayals);
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let result = match args.command {
        Command::Play {
            strategy,
            config,
            opponent,
            rounds,
            seed,
            cooperate_prob,
            trace,
        } => run_play(strategy, config, opponent, rounds, seed, cooperate_prob, trace),
        Command::TrustGame(args) => run_trust_game(args.into()),
        Command::DefaultConfig => default_config_toml()
            .map(|toml| print!("{}", toml))
            .map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
