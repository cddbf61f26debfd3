//! CLI library tests: one turn with a scripted model, option overrides and error paths.

use std::sync::Arc;

use cli::{render, run, run_with_agent, RunError, RunOptions, DEFAULT_MESSAGE, DEFAULT_ORDER_ID};
use helpdesk::{
    support_tools, AgentError, BuildError, MockLlm, SupportAgent, SupportBuildConfig,
    ToolCallPolicy,
};

fn mock_agent(llm: MockLlm) -> SupportAgent {
    SupportAgent::new(Arc::new(llm), Arc::new(support_tools()))
}

#[test]
fn defaults_match_reference_run() {
    let opts = RunOptions::default();
    assert_eq!(opts.order_id, DEFAULT_ORDER_ID);
    assert_eq!(opts.message, DEFAULT_MESSAGE);
    let state = opts.initial_state();
    assert_eq!(state.order_or_default().order_id, "A12345");
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].content(), "Please cancel my order A12345.");
}

#[test]
fn overrides_replace_env_config() {
    let opts = RunOptions {
        model: Some("gpt-4o-mini".into()),
        tool_call_policy: Some(ToolCallPolicy::All),
        ..RunOptions::default()
    };
    let config = opts.apply_to(SupportBuildConfig::default());
    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.tool_call_policy, ToolCallPolicy::All);

    let untouched = RunOptions::default().apply_to(SupportBuildConfig::default());
    assert_eq!(untouched, SupportBuildConfig::default());
}

/// **Scenario**: The default run prints human, ai, tool, ai lines.
#[tokio::test]
async fn default_run_prints_four_lines() {
    let opts = RunOptions::default();
    let state = run_with_agent(&opts, mock_agent(MockLlm::with_cancel_order_call("A12345")))
        .await
        .unwrap();

    let text = render(&state, false).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4, "{}", text);
    assert_eq!(lines[0], "human: Please cancel my order A12345.");
    assert!(lines[1].starts_with("ai:"));
    assert_eq!(lines[2], "tool: Order A12345 has been cancelled.");
    assert_eq!(lines[3], "ai: Your order A12345 has been cancelled.");
}

#[tokio::test]
async fn model_failure_is_turn_error() {
    let err = run_with_agent(
        &RunOptions::default(),
        mock_agent(MockLlm::failing("no backend")),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        RunError::Agent(AgentError::ModelUnavailable(_))
    ));
    assert!(err.to_string().starts_with("turn failed:"), "{}", err);
}

#[tokio::test]
async fn run_without_api_key_fails_to_build() {
    let err = run(&RunOptions::default(), SupportBuildConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RunError::Build(BuildError::MissingApiKey)));
}
