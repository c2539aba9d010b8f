use crate::clock::RunClock;
use crate::config::Config;
use crate::errors::PipelineError;
use crate::fx::{ExchangeRateHost, UsdNormalizer};
use crate::output::write_snapshot;
use crate::pipeline::Pipeline;
use crate::publisher::{MarketApiPublisher, PublishOutcome};
use crate::scraper::{BringATrailer, ClassicCom, CollectingCars, PageFetcher, SaleSource};
use log::{error, info};

mod clock;
mod config;
mod domain;
mod errors;
mod fx;
mod market;
mod output;
mod pipeline;
mod publisher;
mod scraper;
mod vehicles;

#[cfg(test)]
mod tests;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_args();

    if let Err(e) = run(&config) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), PipelineError> {
    let clock = RunClock::now();

    let vehicles = vehicles::load_vehicles(&config.vehicles_path)?;
    info!("loaded {} vehicles", vehicles.len());

    let sources = build_sources(config)?;
    let fx = ExchangeRateHost::new(config.fx_api_url.clone())
        .map_err(|e| PipelineError::Config(e.to_string()))?;

    let pipeline = Pipeline::new(sources, UsdNormalizer::new(fx), clock)
        .with_output_dir(&config.out_dir);
    let report = pipeline.run(&vehicles);
    info!(
        "{} of {} vehicles produced results",
        report.vehicles_seen - report.vehicles_skipped,
        report.vehicles_seen
    );

    let Some(snapshot) = report.snapshot else {
        return Ok(());
    };

    let path = write_snapshot(&config.out_dir, &snapshot)?;
    info!("wrote {}", path.display());

    let publisher =
        MarketApiPublisher::new(config.market_api_url.clone(), config.market_api_token.clone())?;
    match publisher.publish(&snapshot)? {
        PublishOutcome::Posted(status) => info!("snapshot published ({status})"),
        PublishOutcome::Skipped => info!("snapshot kept locally only"),
    }

    Ok(())
}

fn build_sources(config: &Config) -> Result<Vec<Box<dyn SaleSource>>, PipelineError> {
    let fetcher = || {
        PageFetcher::new(config.zenrows_api_key.clone())
            .map_err(|e| PipelineError::Config(e.to_string()))
    };

    let sources: Vec<Box<dyn SaleSource>> = vec![
        Box::new(BringATrailer::new(
            fetcher()?,
            config.max_results,
            config.include_bid_to,
        )),
        Box::new(CollectingCars),
        Box::new(ClassicCom::new(fetcher()?)),
    ];
    Ok(sources)
}
