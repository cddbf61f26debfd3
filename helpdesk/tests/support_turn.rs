//! Turn controller tests: SupportAgent::run_turn with MockLlm and counting tools.


use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use helpdesk::{
    support_tools, AgentError, ConversationState, LlmResponse, LlmUsage, Message, MockLlm,
    OrderContext, SupportAgent, Tool, ToolCall, ToolCallContent, ToolCallPolicy, ToolRegistry,
    ToolSourceError, ToolSpec, TOOL_CANCEL_ORDER,
};

/// `cancel_order` stand-in that records every call it receives.
#[derive(Clone, Default)]
struct CountingCancel {
    calls: Arc<AtomicUsize>,
    seen_args: Arc<Mutex<Vec<Value>>>,
}

impl CountingCancel {
    fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn seen_args(&self) -> Vec<Value> {
        self.seen_args.lock().unwrap().clone()
    }
}

#[async_trait]
impl Tool for CountingCancel {
    fn name(&self) -> &str {
        TOOL_CANCEL_ORDER
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_CANCEL_ORDER.to_string(),
            description: None,
            input_schema: json!({
                "type": "object",
                "properties": { "order_id": { "type": "string" } },
                "required": ["order_id"]
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_args.lock().unwrap().push(args.clone());
        let id = args["order_id"].as_str().unwrap_or_default();
        Ok(ToolCallContent {
            text: helpdesk::cancel_order(id),
        })
    }
}

/// Tool that always fails with an execution error.
struct AlreadyShipped;

#[async_trait]
impl Tool for AlreadyShipped {
    fn name(&self) -> &str {
        TOOL_CANCEL_ORDER
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_CANCEL_ORDER.to_string(),
            description: None,
            input_schema: json!({ "type": "object" }),
        }
    }

    async fn call(&self, _args: Value) -> Result<ToolCallContent, ToolSourceError> {
        Err(ToolSourceError::Execution("order already shipped".to_string()))
    }
}

fn cancel_call(order_id: &str, id: Option<&str>) -> ToolCall {
    ToolCall {
        name: TOOL_CANCEL_ORDER.to_string(),
        arguments: json!({ "order_id": order_id }).to_string(),
        id: id.map(str::to_string),
    }
}

fn counting_agent(llm: Arc<MockLlm>) -> (SupportAgent, CountingCancel) {
    let tool = CountingCancel::default();
    let registry = ToolRegistry::new().with_tool(Box::new(tool.clone()));
    (SupportAgent::new(llm, Arc::new(registry)), tool)
}

fn cancel_request_state() -> ConversationState {
    ConversationState::new(
        OrderContext::new("A12345"),
        vec![Message::user("Please cancel my order A12345.")],
    )
}

/// **Scenario**: Cancellation request yields assistant(tool call), tool result, assistant
/// confirmation, with the tool result answering the requested call id.
#[tokio::test]
async fn cancel_request_produces_three_messages() {
    let llm = Arc::new(MockLlm::with_cancel_order_call("A12345"));
    let agent = SupportAgent::new(llm.clone(), Arc::new(support_tools()));

    let out = agent.run_turn(&cancel_request_state()).await.unwrap();

    assert_eq!(out.len(), 3, "{:?}", out);
    let requested = out[0].tool_calls();
    assert_eq!(requested.len(), 1);
    assert_eq!(requested[0].name, "cancel_order");
    let args: Value = serde_json::from_str(&requested[0].arguments).unwrap();
    assert_eq!(args, json!({ "order_id": "A12345" }));

    match &out[1] {
        Message::Tool { call_id, content } => {
            assert_eq!(call_id, "call-1");
            assert_eq!(content, "Order A12345 has been cancelled.");
        }
        other => panic!("expected tool message, got {:?}", other),
    }
    assert_eq!(out[2].kind(), "ai");
    assert!(out[2].content().contains("A12345"));
    assert!(out[2].tool_calls().is_empty());
    assert_eq!(llm.call_count(), 2);
}

/// **Scenario**: The model sees the system prompt first, and the second pass sees the tool
/// result right after the assistant's request.
#[tokio::test]
async fn model_receives_system_prompt_and_tool_result() {
    let llm = Arc::new(MockLlm::with_cancel_order_call("A12345"));
    let agent = SupportAgent::new(llm.clone(), Arc::new(support_tools()));

    agent.run_turn(&cancel_request_state()).await.unwrap();

    let calls = llm.calls();
    assert_eq!(calls.len(), 2);
    let first = &calls[0];
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].kind(), "system");
    assert!(first[0].content().contains("ORDER ID: A12345"));
    assert_eq!(first[1], Message::user("Please cancel my order A12345."));

    let second = &calls[1];
    assert_eq!(second.len(), 4);
    assert_eq!(&second[..2], &first[..]);
    assert_eq!(second[2].kind(), "ai");
    assert_eq!(
        second[3],
        Message::tool("call-1", "Order A12345 has been cancelled.")
    );
}

/// **Scenario**: A plain answer returns exactly one assistant message; no tool runs and the
/// model is called once.
#[tokio::test]
async fn no_tool_call_returns_single_message() {
    let llm = Arc::new(MockLlm::with_no_tool_calls(
        "You can return items within 30 days.",
    ));
    let (agent, tool) = counting_agent(llm.clone());
    let state = ConversationState::new(
        OrderContext::new("A12345"),
        vec![Message::user("What's your return policy?")],
    );

    let out = agent.run_turn(&state).await.unwrap();

    assert_eq!(out, vec![Message::assistant("You can return items within 30 days.")]);
    assert_eq!(tool.count(), 0);
    assert_eq!(llm.call_count(), 1);
}

/// **Scenario**: Default policy runs only the first of several requested calls, with the
/// first call's arguments.
#[tokio::test]
async fn first_only_policy_executes_first_call_once() {
    let llm = Arc::new(MockLlm::new(vec![
        LlmResponse::with_tool_calls(
            "",
            vec![
                cancel_call("A1", Some("call-a")),
                cancel_call("B2", Some("call-b")),
            ],
        ),
        LlmResponse::text("Done."),
    ]));
    let (agent, tool) = counting_agent(llm);

    let out = agent.run_turn(&cancel_request_state()).await.unwrap();

    assert_eq!(tool.count(), 1);
    assert_eq!(tool.seen_args(), vec![json!({ "order_id": "A1" })]);
    let kinds: Vec<&str> = out.iter().map(Message::kind).collect();
    assert_eq!(kinds, vec!["ai", "tool", "ai"]);
    assert_eq!(out[0].tool_calls(), &[cancel_call("A1", Some("call-a"))][..]);
    assert_eq!(out[1], Message::tool("call-a", "Order A1 has been cancelled."));
}

/// Tool-call ids requested by assistant messages in `context` and ids answered by tool
/// messages, in order.
fn requested_and_answered(context: &[Message]) -> (Vec<String>, Vec<String>) {
    let requested = context
        .iter()
        .flat_map(|m| m.tool_calls().iter())
        .filter_map(|c| c.id.clone())
        .collect();
    let answered = context
        .iter()
        .filter_map(|m| match m {
            Message::Tool { call_id, .. } => Some(call_id.clone()),
            _ => None,
        })
        .collect();
    (requested, answered)
}

/// **Scenario**: Under either policy, every tool call the confirmation pass sees on an
/// assistant message has a matching tool result, as the Chat Completions API requires.
#[tokio::test]
async fn confirmation_pass_answers_every_listed_tool_call() {
    for policy in [ToolCallPolicy::FirstOnly, ToolCallPolicy::All] {
        let llm = Arc::new(MockLlm::new(vec![
            LlmResponse::with_tool_calls(
                "",
                vec![
                    cancel_call("A1", Some("call-a")),
                    cancel_call("B2", Some("call-b")),
                ],
            ),
            LlmResponse::text("Done."),
        ]));
        let (agent, _tool) = counting_agent(llm.clone());
        let agent = agent.with_tool_call_policy(policy);

        agent.run_turn(&cancel_request_state()).await.unwrap();

        let calls = llm.calls();
        let (requested, answered) = requested_and_answered(&calls[1]);
        assert!(!requested.is_empty());
        assert_eq!(requested, answered, "policy {}", policy);
    }
}

/// **Scenario**: Token usage reported by the model is logged, not copied onto the messages.
#[tokio::test]
async fn reported_usage_does_not_change_messages() {
    let mut first = LlmResponse::with_tool_calls("", vec![cancel_call("A12345", Some("call-1"))]);
    first.usage = Some(LlmUsage {
        prompt_tokens: 42,
        completion_tokens: 7,
        total_tokens: 49,
    });
    let mut confirmation = LlmResponse::text("Your order A12345 has been cancelled.");
    confirmation.usage = Some(LlmUsage::default());
    let llm = Arc::new(MockLlm::new(vec![first, confirmation]));
    let (agent, _tool) = counting_agent(llm);

    let out = agent.run_turn(&cancel_request_state()).await.unwrap();

    assert_eq!(
        out,
        vec![
            Message::assistant_with_tool_calls("", vec![cancel_call("A12345", Some("call-1"))]),
            Message::tool("call-1", "Order A12345 has been cancelled."),
            Message::assistant("Your order A12345 has been cancelled."),
        ]
    );
}

/// **Scenario**: Policy All runs every call in order: assistant, tool, tool, assistant.
#[tokio::test]
async fn all_policy_executes_every_call_in_order() {
    let llm = Arc::new(MockLlm::new(vec![
        LlmResponse::with_tool_calls(
            "",
            vec![
                cancel_call("A1", Some("call-a")),
                cancel_call("B2", Some("call-b")),
            ],
        ),
        LlmResponse::text("Both orders are cancelled."),
    ]));
    let (agent, tool) = counting_agent(llm);
    let agent = agent.with_tool_call_policy(ToolCallPolicy::All);

    let out = agent.run_turn(&cancel_request_state()).await.unwrap();

    assert_eq!(out.len(), 4);
    assert_eq!(tool.count(), 2);
    assert_eq!(
        tool.seen_args(),
        vec![json!({ "order_id": "A1" }), json!({ "order_id": "B2" })]
    );
    assert_eq!(out[1], Message::tool("call-a", "Order A1 has been cancelled."));
    assert_eq!(out[2], Message::tool("call-b", "Order B2 has been cancelled."));
    assert_eq!(out[3], Message::assistant("Both orders are cancelled."));
}

/// **Scenario**: Without an order the prompt embeds UNKNOWN and the tool runs with that id.
#[tokio::test]
async fn missing_order_defaults_to_unknown() {
    let llm = Arc::new(MockLlm::with_cancel_order_call("UNKNOWN"));
    let (agent, tool) = counting_agent(llm.clone());
    let state = ConversationState {
        messages: vec![Message::user("Cancel my order please.")],
        order: None,
    };

    let out = agent.run_turn(&state).await.unwrap();

    assert!(llm.calls()[0][0].content().contains("ORDER ID: UNKNOWN"));
    assert_eq!(tool.seen_args(), vec![json!({ "order_id": "UNKNOWN" })]);
    assert_eq!(out[1].content(), "Order UNKNOWN has been cancelled.");
}

/// **Scenario**: A call without id gets a generated `call_` id that the tool result reuses.
#[tokio::test]
async fn missing_call_id_is_assigned_and_correlated() {
    let llm = Arc::new(MockLlm::new(vec![
        LlmResponse::with_tool_calls("", vec![cancel_call("A12345", None)]),
        LlmResponse::text("Cancelled."),
    ]));
    let agent = SupportAgent::new(llm, Arc::new(support_tools()));

    let out = agent.run_turn(&cancel_request_state()).await.unwrap();

    let assigned = out[0].tool_calls()[0].id.clone().expect("id assigned");
    assert!(assigned.starts_with("call_"), "{}", assigned);
    match &out[1] {
        Message::Tool { call_id, .. } => assert_eq!(call_id, &assigned),
        other => panic!("expected tool message, got {:?}", other),
    }
}

/// **Scenario**: Unknown tool names become an error tool message; the turn still confirms.
#[tokio::test]
async fn unknown_tool_is_reported_as_tool_message() {
    let llm = Arc::new(MockLlm::new(vec![
        LlmResponse::with_tool_calls(
            "",
            vec![ToolCall {
                name: "refund_order".to_string(),
                arguments: r#"{"order_id":"A12345"}"#.to_string(),
                id: Some("call-9".to_string()),
            }],
        ),
        LlmResponse::text("Sorry, I can't do that."),
    ]));
    let (agent, tool) = counting_agent(llm);

    let out = agent.run_turn(&cancel_request_state()).await.unwrap();

    assert_eq!(out.len(), 3);
    assert_eq!(tool.count(), 0);
    let text = out[1].content();
    assert!(
        text.starts_with("Error executing tool 'refund_order' with kwargs"),
        "{}",
        text
    );
    assert!(text.contains("tool not found: refund_order"), "{}", text);
    assert!(text.ends_with("Please fix the error and try again."), "{}", text);
}

/// **Scenario**: Missing required field and invalid JSON never reach the tool.
#[tokio::test]
async fn malformed_arguments_are_reported_without_running_tool() {
    for arguments in [r#"{"id":"A12345"}"#, "{not json"] {
        let llm = Arc::new(MockLlm::new(vec![
            LlmResponse::with_tool_calls(
                "",
                vec![ToolCall {
                    name: TOOL_CANCEL_ORDER.to_string(),
                    arguments: arguments.to_string(),
                    id: Some("call-1".to_string()),
                }],
            ),
            LlmResponse::text("Could you confirm the order id?"),
        ]));
        let (agent, tool) = counting_agent(llm);

        let out = agent.run_turn(&cancel_request_state()).await.unwrap();

        assert_eq!(tool.count(), 0, "arguments: {}", arguments);
        assert!(
            out[1].content().contains("invalid arguments"),
            "{}",
            out[1].content()
        );
        assert_eq!(out[2].content(), "Could you confirm the order id?");
    }
}

/// **Scenario**: A failing tool is reported to the model, not raised.
#[tokio::test]
async fn tool_execution_failure_becomes_tool_message() {
    let llm = Arc::new(MockLlm::with_cancel_order_call("A12345"));
    let registry = ToolRegistry::new().with_tool(Box::new(AlreadyShipped));
    let agent = SupportAgent::new(llm, Arc::new(registry));

    let out = agent.run_turn(&cancel_request_state()).await.unwrap();

    assert_eq!(out.len(), 3);
    assert!(out[1]
        .content()
        .contains("tool execution failed: order already shipped"));
}

/// **Scenario**: Model failure on either pass fails the turn with ModelUnavailable.
#[tokio::test]
async fn model_failure_fails_turn() {
    let first = SupportAgent::new(
        Arc::new(MockLlm::failing("connection refused")),
        Arc::new(support_tools()),
    );
    let err = first.run_turn(&cancel_request_state()).await.unwrap_err();
    assert!(matches!(err, AgentError::ModelUnavailable(_)));

    let second_llm = Arc::new(
        MockLlm::new(vec![LlmResponse::with_tool_calls(
            "",
            vec![cancel_call("A12345", Some("call-1"))],
        )])
        .then_fail("timeout"),
    );
    let (second, tool) = counting_agent(second_llm.clone());
    let err = second.run_turn(&cancel_request_state()).await.unwrap_err();
    assert!(matches!(err, AgentError::ModelUnavailable(r) if r == "timeout"));
    assert_eq!(tool.count(), 1);
    assert_eq!(second_llm.call_count(), 2);
}

#[test]
fn cancel_order_is_deterministic() {
    assert_eq!(
        helpdesk::cancel_order("A12345"),
        "Order A12345 has been cancelled."
    );
    assert_eq!(
        helpdesk::cancel_order("A12345"),
        helpdesk::cancel_order("A12345")
    );
}
