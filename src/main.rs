//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use startup_copilot::adapters::ai::{GeminiAdapter, MockGenerationAdapter, OpenAiAdapter};
use startup_copilot::adapters::market::StaticMarketData;
use startup_copilot::adapters::persistence::InMemoryConversationStore;
use startup_copilot::adapters::scoring::HttpRiskScorer;
use startup_copilot::adapters::ui::tui::TuiInputPort;
use startup_copilot::ports::{
    ConversationPort, GenerationPort, InputPort, MarketDataPort, RiskScoringPort,
};
use startup_copilot::shared::config::{AiProvider, AppConfig};
use startup_copilot::usecases::{
    ChecklistService, MentorService, PredictionService, RoadmapService, SwotService,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
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

    startup_copilot::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config could not be loaded, using defaults");
        AppConfig::default()
    });
    let timeout = Duration::from_secs(cfg.request_timeout_secs_or_default());

    // --- Generation ---
    let ai: Arc<dyn GenerationPort> = match cfg.ai_provider() {
        AiProvider::Gemini => {
            info!(model = %cfg.ai_model_or_default(), url = %cfg.ai_api_url_or_default(), "using Gemini adapter");
            Arc::new(
                GeminiAdapter::new(
                    cfg.ai_api_url_or_default(),
                    cfg.ai_api_key().unwrap_or_default(),
                    cfg.ai_model_or_default(),
                    timeout,
                )
                .map_err(|e| anyhow::anyhow!("{}", e))?,
            )
        }
        AiProvider::OpenAi => {
            info!(model = %cfg.ai_model_or_default(), url = %cfg.ai_api_url_or_default(), "using OpenAI-compatible adapter");
            Arc::new(
                OpenAiAdapter::new(
                    cfg.ai_api_url_or_default(),
                    cfg.ai_api_key().unwrap_or_default(),
                    cfg.ai_model_or_default(),
                    timeout,
                )
                .map_err(|e| anyhow::anyhow!("{}", e))?,
            )
        }
        AiProvider::Mock => {
            warn!("COPILOT_AI_API_KEY / GEMINI_API_KEY not set, using mock generation adapter");
            Arc::new(MockGenerationAdapter::new())
        }
    };

    // --- Risk scoring, market data, sessions ---
    let scoring_url = cfg.scoring_url_or_default();
    info!(url = %scoring_url, "risk scoring endpoint");
    let scorer: Arc<dyn RiskScoringPort> = Arc::new(
        HttpRiskScorer::new(scoring_url, timeout).map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    let market: Arc<dyn MarketDataPort> = Arc::new(StaticMarketData::new());
    let store = Arc::new(InMemoryConversationStore::with_window(
        cfg.history_window_or_default(),
    ));
    info!(window = store.window(), "mentor history window");
    let conversations: Arc<dyn ConversationPort> = store;

    // --- Services ---
    let roadmap = Arc::new(RoadmapService::new(Arc::clone(&ai)));
    let checklist = Arc::new(ChecklistService::new(Arc::clone(&ai)));
    let swot = Arc::new(SwotService::new(Arc::clone(&ai), market));
    let prediction = Arc::new(PredictionService::new(scorer, Arc::clone(&ai)));
    let mentor = Arc::new(MentorService::new(ai, conversations));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        roadmap, checklist, swot, prediction, mentor,
    ));

    // --- Run (main menu -> profile / pipelines / mentor chat) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    info!("bye");
    Ok(())
}
