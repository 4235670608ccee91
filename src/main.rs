//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use journal_insights::adapters::ai::{MockCompletionAdapter, OllamaAdapter, OpenAiAdapter};
use journal_insights::adapters::api::HistoryEndpoint;
use journal_insights::adapters::prompts::JsonPromptLibrary;
use journal_insights::adapters::ui::tui::TuiInputPort;
use journal_insights::ports::{CompletionPort, InputPort, PromptStorePort};
use journal_insights::shared::config::{AppConfig, ModelBackend};
use journal_insights::usecases::{Classifier, DigestService, HistoryService, PromptService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    journal_insights::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });

    // --- Classifier (keyword by default, generative when JOURNAL_USE_MODEL=true) ---
    let classifier = if cfg.use_model_or_default() {
        let completion = build_completion(&cfg)?;
        info!(
            model = %completion.model(),
            timeout_secs = cfg.model_timeout_or_default().as_secs(),
            "generative classification enabled"
        );
        Classifier::generative(completion, cfg.model_timeout_or_default())
    } else {
        info!("JOURNAL_USE_MODEL not set, using keyword classification");
        Classifier::keyword()
    };

    // --- Services ---
    let history = Arc::new(
        HistoryService::new(Arc::new(classifier)).with_top_k(cfg.top_k_or_default()),
    );
    let endpoint = Arc::new(HistoryEndpoint::new(Arc::clone(&history)));

    let reports_dir = cfg.reports_dir_or_default();
    info!(reports_dir = %reports_dir.display(), "digest output directory");
    let digests = Arc::new(DigestService::new(Arc::clone(&history), reports_dir));

    let library: Arc<dyn PromptStorePort> =
        Arc::new(JsonPromptLibrary::load(cfg.prompt_library_path_or_default()).await);
    let prompts = Arc::new(PromptService::new(library));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        endpoint,
        digests,
        Arc::clone(&history),
        prompts,
    ));

    // --- Run (main menu -> Analyze / Classify / Prompt / Health) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}

/// Build the completion adapter for the configured backend.
fn build_completion(cfg: &AppConfig) -> anyhow::Result<Arc<dyn CompletionPort>> {
    let timeout = cfg.model_timeout_or_default();
    let adapter: Arc<dyn CompletionPort> = match cfg.model_backend_or_default() {
        ModelBackend::Ollama => Arc::new(
            OllamaAdapter::new(cfg.model_url_or_default(), cfg.model_name_or_default(), timeout)
                .map_err(|e| anyhow::anyhow!("{}", e))?,
        ),
        ModelBackend::OpenAi => {
            if cfg.model_api_key.is_none() {
                warn!("JOURNAL_MODEL_API_KEY not set, sending requests without a key");
            }
            Arc::new(
                OpenAiAdapter::new(
                    cfg.model_url_or_default(),
                    cfg.model_api_key_or_default(),
                    cfg.model_name_or_default(),
                    timeout,
                )
                .map_err(|e| anyhow::anyhow!("{}", e))?,
            )
        }
        ModelBackend::Mock => {
            warn!("JOURNAL_MODEL_BACKEND=mock, using canned completions");
            Arc::new(MockCompletionAdapter::new())
        }
    };
    Ok(adapter)
}
