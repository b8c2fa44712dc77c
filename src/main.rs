use anyhow::Result;
use tracing::{error, info, warn};

use comet_collectd::cli::{self, CliError, USAGE};
use comet_collectd::core::{
    run, CometClient, Config, MetricsSampler, PollSchedule, PutvalWriter, SystemClock,
};
use comet_collectd::logging::init_logging;
use comet_collectd::utils::format_duration;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let config = match cli::load_config(std::env::args_os()) {
        Ok(config) => config,
        Err(CliError::Info(e)) => e.exit(),
        Err(CliError::Usage(reason)) => {
            warn!("invalid configuration: {}", reason.trim_end());
            println!("{}", USAGE);
            std::process::exit(1);
        }
    };

    if let Err(e) = handle_poll(&config).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn handle_poll(config: &Config) -> Result<()> {
    info!(
        url = config.credentials.base_url(),
        user = config.credentials.username(),
        namespace = %config.namespace,
        "polling Comet Server every {}",
        format_duration(config.interval_secs())
    );

    let client = CometClient::new(config.credentials.clone(), config.request_timeout)?;
    let sampler = MetricsSampler::new(client, SystemClock);
    let mut sink = PutvalWriter::from_config(std::io::stdout(), config);
    let mut schedule = PollSchedule::new(config.interval);

    let max_cycles = config.once.then_some(1);
    let cycles = run(&sampler, &mut sink, &mut schedule, max_cycles).await?;
    info!(cycles, "polling finished");

    Ok(())
}
