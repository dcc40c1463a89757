use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voicetube_core::config::AppConfig;
use voicetube_engine::error::CaptureRejected;
use voicetube_engine::session::SessionSnapshot;
use voicetube_platform::console::{ConsoleRecognizer, ConsoleSpeaker};
use voicetube_runtime::config_store::ConfigStore;
use voicetube_runtime::runtime_engine::build_state_machine_from_config;
use voicetube_runtime::secrets::{SecretKey, delete_secret, resolve_youtube_api_key, set_secret};

const CONFIG_ENV: &str = "VOICETUBE_CONFIG";

fn load_config() -> anyhow::Result<AppConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => ConfigStore::at_path(path).load_or_default(),
        None => Ok(AppConfig::default()),
    }
}

fn print_results(snap: &SessionSnapshot) {
    let Some(outcome) = &snap.outcome else {
        return;
    };
    if outcome.degraded {
        println!("(resultados de exemplo)");
    }
    for (i, v) in outcome.results.iter().enumerate() {
        println!("{:>2}. {} | {}", i + 1, v.title, v.channel_title);
        println!("    {}", v.watch_url());
    }
}

async fn run_session(cfg: &AppConfig) -> anyhow::Result<()> {
    let mut machine = build_state_machine_from_config(
        cfg,
        resolve_youtube_api_key(),
        Arc::new(ConsoleRecognizer::stdin()),
        Arc::new(ConsoleSpeaker),
    )?;

    let caps = machine.capabilities();
    info!(capture = caps.capture, output = caps.output, "session ready");
    println!("Diga o que deseja pesquisar (ex.: \"pesquisar gatos\"). Ctrl-D para sair.");

    loop {
        match machine.run_cycle().await {
            Ok(snap) => {
                if let Some(err) = &snap.last_error {
                    if !machine.capabilities().capture {
                        break;
                    }
                    warn!("capture error: {err}");
                    continue;
                }
                print_results(&snap);
            }
            Err(CaptureRejected::Unavailable) => break,
            Err(e) => return Err(e.into()),
        }
    }

    info!("input closed, exiting");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("set-key") => {
            let Some(key) = args.get(1) else {
                anyhow::bail!("usage: voicetube set-key <youtube-api-key>");
            };
            set_secret(SecretKey::YouTubeApiKey, key.trim())?;
            mark_key_present(true)?;
            println!("YouTube API key stored.");
            Ok(())
        }
        Some("clear-key") => {
            delete_secret(SecretKey::YouTubeApiKey)?;
            mark_key_present(false)?;
            println!("YouTube API key removed.");
            Ok(())
        }
        Some(other) => anyhow::bail!("unknown command: {other}"),
        None => {
            let cfg = load_config()?;
            run_session(&cfg).await
        }
    }
}

fn mark_key_present(present: bool) -> anyhow::Result<()> {
    // Only persisted when the user points us at a config file.
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return Ok(());
    };
    let store = ConfigStore::at_path(path);
    let mut cfg = store.load_or_default()?;
    cfg.api_key_present = present;
    store.save(&cfg)
}
