//! Build config for the support agent, read from environment variables.
//!
//! The binary loads `.env` / XDG config into the process environment first (see the `config`
//! crate), then calls [`SupportBuildConfig::from_env`] once and passes the result to
//! [`build_support_agent`]. Nothing under `agent` reads the environment during a turn.

use std::sync::Arc;

use async_openai::config::OpenAIConfig;

use crate::llm::{ChatOpenAI, ToolChoiceMode};
use crate::tool_source::ToolSourceError;
use crate::tools::support_tools;

use super::agent::SupportAgent;
use super::policy::ToolCallPolicy;

/// Model used when neither `OPENAI_MODEL` nor `MODEL` is set.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Error when building the support agent from config.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },
    #[error("no API key configured; set OPENAI_API_KEY")]
    MissingApiKey,
    #[error("failed to list tools: {0}")]
    Tools(#[from] ToolSourceError),
}

/// Settings for the model client and the turn controller.
#[derive(Clone, Debug, PartialEq)]
pub struct SupportBuildConfig {
    pub model: String,
    pub api_key: Option<String>,
    /// OpenAI-compatible base URL; `None` means the default OpenAI endpoint.
    pub base_url: Option<String>,
    pub temperature: f32,
    /// `None` leaves tool choice to the API default (auto when tools are present).
    pub tool_choice: Option<ToolChoiceMode>,
    pub tool_call_policy: ToolCallPolicy,
}

impl Default for SupportBuildConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: None,
            temperature: 0.0,
            tool_choice: None,
            tool_call_policy: ToolCallPolicy::default(),
        }
    }
}

impl SupportBuildConfig {
    /// Reads `OPENAI_MODEL` (or `MODEL`), `OPENAI_API_KEY`, `OPENAI_BASE_URL` (or
    /// `OPENAI_API_BASE`), `HELPDESK_TEMPERATURE`, `HELPDESK_TOOL_CHOICE` and
    /// `HELPDESK_TOOL_CALL_POLICY`. Empty values count as unset.
    pub fn from_env() -> Result<Self, BuildError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BuildError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(model) = get("OPENAI_MODEL").or_else(|| get("MODEL")) {
            config.model = model;
        }
        config.api_key = get("OPENAI_API_KEY");
        config.base_url = get("OPENAI_BASE_URL").or_else(|| get("OPENAI_API_BASE"));

        if let Some(raw) = get("HELPDESK_TEMPERATURE") {
            let temperature: f32 = raw.trim().parse().map_err(|_| BuildError::InvalidEnv {
                var: "HELPDESK_TEMPERATURE",
                reason: format!("not a number: {}", raw),
            })?;
            if !(0.0..=2.0).contains(&temperature) {
                return Err(BuildError::InvalidEnv {
                    var: "HELPDESK_TEMPERATURE",
                    reason: format!("must be between 0 and 2, got {}", temperature),
                });
            }
            config.temperature = temperature;
        }
        if let Some(raw) = get("HELPDESK_TOOL_CHOICE") {
            let mode = raw
                .parse::<ToolChoiceMode>()
                .map_err(|reason| BuildError::InvalidEnv {
                    var: "HELPDESK_TOOL_CHOICE",
                    reason,
                })?;
            config.tool_choice = Some(mode);
        }
        if let Some(raw) = get("HELPDESK_TOOL_CALL_POLICY") {
            config.tool_call_policy =
                raw.parse()
                    .map_err(|reason| BuildError::InvalidEnv {
                        var: "HELPDESK_TOOL_CALL_POLICY",
                        reason,
                    })?;
        }
        Ok(config)
    }

    fn openai_config(&self) -> Result<OpenAIConfig, BuildError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(BuildError::MissingApiKey)?;
        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = self.base_url.as_deref().filter(|s| !s.is_empty()) {
            openai_config = openai_config.with_api_base(base.trim_end_matches('/'));
        }
        Ok(openai_config)
    }
}

/// Builds a [`SupportAgent`] backed by `ChatOpenAI`, with the `cancel_order` registry bound
/// to the client and used for execution.
pub async fn build_support_agent(config: &SupportBuildConfig) -> Result<SupportAgent, BuildError> {
    let openai_config = config.openai_config()?;
    let tools = Arc::new(support_tools());
    let mut llm =
        ChatOpenAI::new_with_tool_source(openai_config, config.model.clone(), &*tools)
            .await?
            .with_temperature(config.temperature);
    if let Some(mode) = config.tool_choice {
        llm = llm.with_tool_choice(mode);
    }
    tracing::debug!(
        model = %config.model,
        url = %llm.url(),
        policy = %config.tool_call_policy,
        "Built support agent"
    );
    Ok(SupportAgent::new(Arc::new(llm), tools).with_tool_call_policy(config.tool_call_policy))
}
