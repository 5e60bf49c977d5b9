use anyhow::Result;
use sheetprune::cli::{CliArgs, Command, print_help};
use sheetprune::client::InstalledFlow;
use sheetprune::config::Config;
use sheetprune::context::StandardContext;
use sheetprune::controller::{delete_old_records, generate_demo_data};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse(env::args().skip(1))?;
    if args.command == Command::Help {
        print_help("sheetprune");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root);
    let config = Config::load_or_default(&ctx)?;
    if let Err(e) = sheetprune::logging::init(&ctx, config.log_level_filter()) {
        eprintln!("Logging disabled: {}", e);
    }

    // Client secrets are read up front so a missing file fails before any work.
    let provider = InstalledFlow::from_config(&config, &ctx).await?;

    let result = async {
        if matches!(args.command, Command::All | Command::Generate) {
            generate_demo_data(&config, &provider).await?;
        }
        if matches!(args.command, Command::All | Command::Prune) {
            delete_old_records(&config, &provider).await?;
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    if let Err(e) = &result {
        log::error!("{:#}", e);
    }
    result
}
