//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Collects a startup profile, runs the chosen pipeline behind a spinner and prints the JSON
//! result. No business logic here.

use crate::domain::{DomainError, ErrorBody, Profile};
use crate::ports::InputPort;
use crate::usecases::{
    ChecklistService, MentorService, PredictionService, RoadmapService, SwotService,
    merge_checklist_item,
};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Confirm, Select, Text};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

const INDUSTRIES: &[&str] = &[
    "tech",
    "health",
    "finance",
    "ecommerce",
    "education",
    "food",
    "transportation",
    "real_estate",
    "media",
    "energy",
    "manufacturing",
    "other",
];

const BUDGETS: &[&str] = &["bootstrap", "seed", "angel", "series_a", "series_b", "series_c"];
const TEAM_SIZES: &[&str] = &["solo", "small", "medium", "large", "enterprise"];
const MARKET_SIZES: &[&str] = &["niche", "medium", "large", "massive"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    EditProfile,
    Roadmap,
    TaskGuidance,
    Checklist,
    Swot,
    Prediction,
    Mentor,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 8] = [
        MenuAction::EditProfile,
        MenuAction::Roadmap,
        MenuAction::TaskGuidance,
        MenuAction::Checklist,
        MenuAction::Swot,
        MenuAction::Prediction,
        MenuAction::Mentor,
        MenuAction::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuAction::EditProfile => "Edit startup profile",
            MenuAction::Roadmap => "Generate roadmap",
            MenuAction::TaskGuidance => "Guidance for a roadmap task",
            MenuAction::Checklist => "Legal checklist",
            MenuAction::Swot => "SWOT analysis and competitors",
            MenuAction::Prediction => "Failure prediction and growth strategy",
            MenuAction::Mentor => "Chat with the AI mentor",
            MenuAction::Exit => "Exit",
        }
    }
}

/// Applies the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new(">").with_fg(Color::LightYellow));
    inquire::set_global_render_config(config);
}

fn ui_error(e: InquireError) -> DomainError {
    DomainError::Ui(e.to_string())
}

/// True when the user backed out of a prompt (Esc / Ctrl-C).
fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs `fut` while a spinner shows `message`.
async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let out = fut.await;
    spinner.finish_and_clear();
    out
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to render result: {}", e),
    }
}

fn print_error(e: &DomainError) {
    print_json(&ErrorBody::from(e));
}

fn select_value(prompt: &str, options: &[&str], current: &str) -> Result<String, InquireError> {
    let start = options.iter().position(|o| *o == current).unwrap_or(0);
    Select::new(prompt, options.to_vec())
        .with_starting_cursor(start)
        .prompt()
        .map(str::to_string)
}

fn text_value(prompt: &str, current: &str) -> Result<String, InquireError> {
    Text::new(prompt).with_initial_value(current).prompt()
}

fn optional_text(prompt: &str, current: Option<&str>) -> Result<Option<String>, InquireError> {
    let value = Text::new(prompt)
        .with_initial_value(current.unwrap_or_default())
        .with_help_message("Leave empty to skip")
        .prompt()?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Walks the user through every profile field, prefilled with the current values.
fn prompt_profile(current: &Profile) -> Result<Profile, InquireError> {
    Ok(Profile {
        industry: select_value("Industry:", INDUSTRIES, &current.industry)?,
        budget_range: select_value("Budget range:", BUDGETS, &current.budget_range)?,
        team_size: select_value("Team size:", TEAM_SIZES, &current.team_size)?,
        target_market_size: select_value(
            "Target market size:",
            MARKET_SIZES,
            &current.target_market_size,
        )?,
        country: text_value("Country (ISO code, e.g. IN):", &current.country)?,
        region: text_value("Region / state:", &current.region)?,
        problem_statement: text_value("Problem statement:", &current.problem_statement)?,
        target_customer: text_value("Target customer:", &current.target_customer)?,
        unique_value_proposition: text_value(
            "Unique value proposition:",
            &current.unique_value_proposition,
        )?,
        competitors: optional_text("Known competitors:", current.competitors.as_deref())?,
        go_to_market_strategy: optional_text(
            "Go-to-market strategy:",
            current.go_to_market_strategy.as_deref(),
        )?,
        revenue_model: optional_text("Revenue model:", current.revenue_model.as_deref())?,
        stage: optional_text("Stage (idea, mvp, revenue...):", current.stage.as_deref())?,
    })
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    roadmap: Arc<RoadmapService>,
    checklist: Arc<ChecklistService>,
    swot: Arc<SwotService>,
    prediction: Arc<PredictionService>,
    mentor: Arc<MentorService>,
    profile: Mutex<Profile>,
}

impl TuiInputPort {
    pub fn new(
        roadmap: Arc<RoadmapService>,
        checklist: Arc<ChecklistService>,
        swot: Arc<SwotService>,
        prediction: Arc<PredictionService>,
        mentor: Arc<MentorService>,
    ) -> Self {
        Self {
            roadmap,
            checklist,
            swot,
            prediction,
            mentor,
            profile: Mutex::new(Profile::default()),
        }
    }

    async fn edit_profile(&self) -> Result<(), InquireError> {
        let mut profile = self.profile.lock().await;
        *profile = prompt_profile(&profile)?;
        info!(industry = %profile.industry, country = %profile.country, "profile updated");
        Ok(())
    }

    async fn current_profile(&self) -> Profile {
        self.profile.lock().await.clone()
    }

    async fn run_roadmap(&self, profile: &Profile) {
        let resp = with_spinner("Generating roadmap...", self.roadmap.generate_roadmap(profile))
            .await;
        print_json(&resp);
    }

    async fn run_task_guidance(&self, profile: &Profile) -> Result<(), InquireError> {
        let title = Text::new("Task title:").prompt()?;
        let resp = with_spinner(
            "Generating task guidance...",
            self.roadmap.generate_task_guidance(&title, profile),
        )
        .await;
        print_json(&resp);
        Ok(())
    }

    async fn run_checklist(&self, profile: &Profile) -> Result<(), InquireError> {
        let items = match with_spinner(
            "Generating legal checklist...",
            self.checklist.list_checklist(profile),
        )
        .await
        {
            Ok(items) => items,
            Err(e) => {
                print_error(&e);
                return Ok(());
            }
        };
        print_json(&items);

        if items.is_empty() || !Confirm::new("Show details for an item?").with_default(false).prompt()? {
            return Ok(());
        }

        let labels: Vec<String> = items
            .iter()
            .map(|i| format!("{} ({})", i.title, i.id))
            .collect();
        let choice = Select::new("Item:", labels.clone()).prompt()?;
        let Some(item) = labels
            .iter()
            .position(|l| *l == choice)
            .and_then(|idx| items.get(idx).cloned())
        else {
            return Ok(());
        };

        match with_spinner(
            "Generating compliance detail...",
            self.checklist.checklist_item_detail(&item.id, profile),
        )
        .await
        {
            Ok(detail) => print_json(&merge_checklist_item(item, detail)),
            Err(e) => print_error(&e),
        }
        Ok(())
    }

    async fn run_swot(&self, profile: &Profile) {
        match with_spinner("Analysing market...", self.swot.generate_swot(profile)).await {
            Ok(bundle) => print_json(&bundle),
            Err(e) => print_error(&e),
        }
    }

    async fn run_prediction(&self, profile: &Profile) {
        match with_spinner("Scoring risk...", self.prediction.predict(profile)).await {
            Ok(resp) => print_json(&resp),
            Err(e) => print_error(&e),
        }
    }

    /// Chat loop. `/reset` clears the session, `/suggest` lists starter questions, an empty
    /// line or `/exit` returns to the menu.
    async fn run_mentor(&self, profile: &Profile) -> Result<(), InquireError> {
        let session_id = format!("tui-{}", chrono::Utc::now().timestamp_millis());
        let founder = (!profile.industry.is_empty()).then_some(profile);
        info!(session_id = %session_id, "mentor session started");
        println!("Mentor chat. Commands: /suggest, /reset, /exit");

        loop {
            let message = match Text::new("You:").prompt() {
                Ok(m) => m,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(e),
            };
            match message.trim() {
                "" | "/exit" => return Ok(()),
                "/suggest" => {
                    for q in self.mentor.suggested_questions().questions {
                        println!("  - {}", q);
                    }
                }
                "/reset" => match self.mentor.reset(&session_id).await {
                    Ok(resp) => println!("{}", resp.message),
                    Err(e) => print_error(&e),
                },
                question => {
                    match with_spinner("Thinking...", self.mentor.ask(&session_id, question, founder))
                        .await
                    {
                        Ok(reply) => {
                            println!("\n{}\n", reply.message);
                            println!("You might also ask:");
                            for q in &reply.follow_up_questions {
                                println!("  - {}", q);
                            }
                        }
                        Err(e) => print_error(&e),
                    }
                }
            }
        }
    }

    async fn dispatch(&self, action: MenuAction) -> Result<(), InquireError> {
        if action == MenuAction::EditProfile {
            return self.edit_profile().await;
        }
        let profile = self.current_profile().await;
        match action {
            MenuAction::Roadmap => self.run_roadmap(&profile).await,
            MenuAction::TaskGuidance => self.run_task_guidance(&profile).await?,
            MenuAction::Checklist => self.run_checklist(&profile).await?,
            MenuAction::Swot => self.run_swot(&profile).await,
            MenuAction::Prediction => self.run_prediction(&profile).await,
            MenuAction::Mentor => self.run_mentor(&profile).await?,
            MenuAction::EditProfile | MenuAction::Exit => {}
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        loop {
            let choice = match Select::new("What do you want to do?", labels.clone()).prompt() {
                Ok(c) => c,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(ui_error(e)),
            };
            let Some(action) = MenuAction::ALL.into_iter().find(|a| a.label() == choice) else {
                continue;
            };
            if action == MenuAction::Exit {
                return Ok(());
            }
            match self.dispatch(action).await {
                Ok(()) => {}
                Err(e) if is_cancel(&e) => println!("Cancelled."),
                Err(e) => return Err(ui_error(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_labels_are_unique() {
        let mut labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), MenuAction::ALL.len());
    }

    #[tokio::test]
    async fn test_spinner_returns_future_output() {
        let out = with_spinner("working", async { 41 + 1 }).await;
        assert_eq!(out, 42);
    }
}
