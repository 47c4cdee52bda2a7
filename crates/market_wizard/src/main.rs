mod cli;

use std::fs;
use std::time::Duration;

use clap::Parser;
use color_eyre::{Result, eyre::WrapErr};
use tracing::info;

use market_wizard::action::Action;
use market_wizard::config::Config;
use market_wizard::core::r#loop::WizardLoop;
use market_wizard::core::state::MountOptions;
use market_wizard::domain::fixtures::Fixtures;
use market_wizard::domain::steps::compute_steps;
use market_wizard::domain::validation::Strictness;
use market_wizard::services::confirm::AutoConfirm;
use market_wizard::services::navigation::HistoryNavigator;
use market_wizard::services::notify::LogNotifier;
use market_wizard::{errors, logging};

use crate::cli::{Cli, Cmd};

#[tokio::main]
pub async fn main() -> Result<()> {
    errors::init()?;
    let args = Cli::parse();
    let config = match &args.config_dir {
        Some(dir) => Config::load_from(dir.clone())?,
        None => Config::new()?,
    };
    logging::init(&config.wizard.log_level)?;

    match args.cmd {
        Cmd::Run {
            script,
            with_group,
            strict,
            yes,
            delay_ms,
            timeout_secs,
        } => {
            let raw = fs::read_to_string(&script)
                .wrap_err_with(|| format!("reading script {}", script.display()))?;
            let actions: Vec<Action> =
                serde_json::from_str(&raw).wrap_err("script must be a JSON array of actions")?;

            let mut opts = MountOptions::from_config(&config.wizard, with_group);
            if strict {
                opts = opts.strictness(Strictness::Standalone);
            }
            if let Some(ms) = delay_ms {
                opts = opts.submit_delay(Duration::from_millis(ms));
            }

            let mut wizard = WizardLoop::new(
                opts,
                LogNotifier,
                HistoryNavigator::new("/create"),
                AutoConfirm(yes),
            );
            let outcome = wizard
                .run(actions, Duration::from_secs(timeout_secs))
                .await?;
            for line in wizard.state().draft.summary() {
                info!("review: {line}");
            }
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            wizard.shutdown().await?;
        }
        Cmd::Steps { with_group } => {
            for (i, step) in compute_steps(with_group).iter().enumerate() {
                println!("{}. {}", i + 1, step.label);
            }
        }
        Cmd::Fixtures => {
            let fixtures = Fixtures::builtin();
            for group in &fixtures.groups {
                println!("{} {} ({})", group.id, group.name, group.visibility);
                for market in fixtures.markets_in_group(group.id) {
                    println!("  {} [{}] {}", market.id, market.market_type, market.title);
                }
            }
        }
    }
    Ok(())
}
