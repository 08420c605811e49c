#![forbid(unsafe_code)]

use std::sync::Arc;

use dotenvy::dotenv;
use eyre::{Result, WrapErr};
use futures_lite::stream::StreamExt;
use log::info;
use serde_json::{json, Value};
use signal_hook::consts::*;
use signal_hook_tokio::Signals;
use tokio::sync::Notify;

use fishcast_api::{
    analyzer::{CannedAnalyzer, OpenRouterAnalyzer, SpotAnalyzer},
    api::{self, Context},
    config::Config,
    forecast::CannedForecast,
    store::CatchLog,
};

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("Signal hooking error")]
    Signals(#[source] std::io::Error),
}

async fn handle_signals(mut signals: Signals, quit_signal: Arc<Notify>) {
    info!("Starting signal handler");
    while let Some(signal) = signals.next().await {
        match signal {
            SIGTERM | SIGINT | SIGQUIT => {
                // Shutdown the system
                quit_signal.notify_waiters();
                break;
            }
            _ => unreachable!(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init_timed();
    dotenv().ok();

    run().await.wrap_err("failed to run the fishcast api")
}

async fn run() -> Result<()> {
    let signals = Signals::new(&[SIGTERM, SIGINT, SIGQUIT]).map_err(Error::Signals)?;
    let quit_signal = Arc::new(Notify::new());

    let config = Config::load().wrap_err("could not read the configuration")?;

    let store = Arc::new(CatchLog::new());
    if config.seed_demo {
        seed_demo_catches(&store)?;
    }

    let ctx = Context::new(
        store,
        spot_analyzer(&config)?,
        Arc::new(CannedForecast),
        &config,
    );
    let routes = api::routes(&ctx);

    let handle = signals.handle();
    let signals_task = tokio::spawn(handle_signals(signals, quit_signal.clone()));

    let shutdown = async move { quit_signal.notified().await };

    let (addr, server) =
        warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], config.port), shutdown);

    info!("{} listening on http://{addr}", api::SERVICE_NAME);

    server.await;

    // Terminate the signal stream.
    handle.close();
    signals_task.await?;

    Ok(())
}

fn spot_analyzer(config: &Config) -> Result<Arc<dyn SpotAnalyzer>> {
    match &config.openrouter {
        Some(openrouter) => {
            info!("Analyzing spot photos with {} via openrouter", openrouter.model);
            let analyzer = OpenRouterAnalyzer::new(openrouter.clone())
                .wrap_err("could not build the openrouter analyzer")?;

            Ok(Arc::new(analyzer))
        }
        None => {
            info!("OPENROUTER_API_KEY is not set, spot analysis returns the canned recommendation");

            Ok(Arc::new(CannedAnalyzer))
        }
    }
}

fn seed_demo_catches(store: &CatchLog) -> Result<()> {
    let catches = [
        json!({
            "species": "Largemouth Bass",
            "weight": 3.2,
            "length": 18.5,
            "bait": "Spinnerbait",
            "location": "Lake Michigan",
            "date": "2024-01-15",
            "time": "07:30",
            "weather": "Partly Cloudy",
            "notes": "Great fight! Caught near fallen log structure."
        }),
        json!({
            "species": "Rainbow Trout",
            "weight": 1.8,
            "length": 14.2,
            "bait": "PowerBait",
            "location": "Pine Creek",
            "date": "2024-01-12",
            "time": "06:15",
            "weather": "Overcast",
            "notes": "Beautiful colors on this one. Released after photo."
        }),
    ];
    let total = catches.len();

    for catch in catches {
        let Value::Object(fields) = catch else {
            unreachable!();
        };

        store.append(fields).wrap_err("could not seed the demo catches")?;
    }

    info!("Seeded {total} demo catches");

    Ok(())
}
