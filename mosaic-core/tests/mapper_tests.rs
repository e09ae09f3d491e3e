//! Tests for the OpenAI message mapper
//!
//! Covers outbound role legality, tool-result splitting, inbound flattening
//! and the tool-call codec through the public mapper surface.

use mosaic_core::protocol::{ContentPart, GenOpts, MappedResponse, Message, Role, ToolCall, ToolSpec};
use mosaic_core::providers::openai::codec::encode_tool_call;
use mosaic_core::providers::openai::types::{OpenAIContent, OpenAIContentPart, OpenAIRole};
use mosaic_core::providers::openai::{OpenAIChoice, OpenAIMessage, OpenAIResponse, PrefixPolicy};
use mosaic_core::providers::{MapperError, MessageMapper, OpenAIMessageMapper, ToolMapper};
use serde_json::json;
use test_case::test_case;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn choice(message: serde_json::Value) -> OpenAIChoice {
    serde_json::from_value(json!({ "index": 0, "message": message })).unwrap()
}

#[test]
fn test_weather_conversation_scenario() {
    init_tracing();
    let mapper = OpenAIMessageMapper::for_model("gpt-4.1");

    let wire = mapper
        .to_provider(&[
            Message::system("Be terse."),
            Message::user("Weather in Novi Sad?"),
        ])
        .unwrap();

    let body = serde_json::to_value(&wire).unwrap();
    assert_eq!(
        body,
        json!([
            {"role": "system", "content": [{"type": "text", "text": "Be terse."}]},
            {"role": "user", "content": [{"type": "text", "text": "Weather in Novi Sad?"}]}
        ])
    );

    let mapped = mapper.from_provider(&choice(json!({"content": "Sunny, 24C"})));
    assert_eq!(
        mapped,
        MappedResponse {
            text: "Sunny, 24C".to_string(),
            tool_calls: vec![],
        }
    );
}

#[test]
fn test_tool_call_scenario() {
    let mapper = OpenAIMessageMapper::new();
    let mapped = mapper.from_provider(&choice(json!({
        "content": null,
        "tool_calls": [{
            "id": "c1",
            "type": "function",
            "function": {"name": "getWeather", "arguments": "{\"city\":\"Novi Sad\"}"}
        }]
    })));

    assert_eq!(mapped.text, "");
    assert_eq!(
        mapped.tool_calls,
        vec![ToolCall::new("c1", "getWeather", json!({"city": "Novi Sad"}))]
    );
}

#[test]
fn test_malformed_arguments_degrade_to_string() {
    init_tracing();
    let mapper = OpenAIMessageMapper::new();
    let mapped = mapper.from_provider(&choice(json!({
        "tool_calls": [
            {"id": "c1", "function": {"name": "broken", "arguments": "{not json"}},
            {"id": "c2", "function": {"name": "fine", "arguments": "{\"n\":1}"}}
        ]
    })));

    assert_eq!(mapped.tool_calls.len(), 2);
    assert_eq!(mapped.tool_calls[0].args, json!("{not json"));
    assert!(mapped.tool_calls[0].args.is_string());
    assert_eq!(mapped.tool_calls[1].args, json!({"n": 1}));
}

#[test]
fn test_missing_tool_call_fields_degrade() {
    let mapper = OpenAIMessageMapper::new();
    let mapped = mapper.from_provider(&choice(json!({
        "tool_calls": [{"id": "c1"}]
    })));

    assert_eq!(mapped.tool_calls[0].name, "");
    assert_eq!(mapped.tool_calls[0].args, serde_json::Value::Null);
}

#[test_case(json!("plain"), "plain" ; "string content")]
#[test_case(json!([{"type": "text", "text": "A"}, {"type": "text", "text": "B"}]), "AB" ; "text parts concatenate")]
#[test_case(json!([{"type": "text", "text": "A"}, {"type": "image_url", "image_url": {"url": "u"}}, {"type": "text"}]), "A" ; "non text parts are empty")]
#[test_case(json!(null), "" ; "null content")]
#[test_case(json!([{"type": "text", "text": null}, {"type": "text", "text": "B"}]), "B" ; "null text is empty")]
#[test_case(json!([{"text": "A"}, {"refusal": "no"}, {"type": "text", "text": "B"}]), "AB" ; "untyped parts use their text")]
fn test_text_flattening(content: serde_json::Value, expected: &str) {
    let mapper = OpenAIMessageMapper::new();
    let mapped = mapper.from_provider(&choice(json!({ "content": content })));
    assert_eq!(mapped.text, expected);
    assert!(mapped.tool_calls.is_empty());
}

#[test]
fn test_null_tool_call_fields_degrade() {
    let mapper = OpenAIMessageMapper::new();
    let response: OpenAIResponse = serde_json::from_value(json!({
        "choices": [{"message": {
            "content": [{"text": "A"}],
            "tool_calls": [
                {"id": "c1", "type": "function", "function": {"name": "ping", "arguments": null}},
                {"id": "c2", "type": "function", "function": null}
            ]
        }}]
    }))
    .unwrap();

    let mapped = mapper.from_provider_response(&response);
    assert_eq!(mapped.text, "A");
    assert_eq!(
        mapped.tool_calls,
        vec![
            ToolCall::new("c1", "ping", serde_json::Value::Null),
            ToolCall::new("c2", "", serde_json::Value::Null),
        ]
    );
}

#[test]
fn test_absent_content_flattens_to_empty() {
    let mapper = OpenAIMessageMapper::new();
    let mapped = mapper.from_provider(&choice(json!({ "role": "assistant" })));
    assert_eq!(mapped.text, "");
}

#[test_case(Role::System, "gpt-4.1", Some(MapperError::ImageInInstructionMessage { role: "system".into() }) ; "system image")]
#[test_case(Role::System, "o1-mini", Some(MapperError::ImageInInstructionMessage { role: "developer".into() }) ; "developer image")]
#[test_case(Role::Assistant, "gpt-4.1", Some(MapperError::ImageInAssistantMessage) ; "assistant image")]
#[test_case(Role::Assistant, "o1-mini", Some(MapperError::ImageInInstructionMessage { role: "assistant".into() }) ; "assistant image under developer policy")]
#[test_case(Role::User, "gpt-4.1", None ; "user image")]
fn test_image_role_legality(role: Role, model: &str, expected: Option<MapperError>) {
    let mapper = OpenAIMessageMapper::for_model(model);
    let message = Message::with_parts(
        role,
        vec![
            ContentPart::text("look"),
            ContentPart::image("https://example.com/a.png?x=1&y=2"),
        ],
    );

    match (mapper.to_provider(&[message]), expected) {
        (Err(err), Some(expected)) => {
            assert_eq!(err, expected);
            assert!(err.is_protocol_violation());
        }
        (Ok(wire), None) => {
            let Some(OpenAIContent::Parts(parts)) = &wire[0].content else {
                panic!("expected content parts");
            };
            match &parts[1] {
                OpenAIContentPart::ImageUrl { image_url } => {
                    assert_eq!(image_url.url, "https://example.com/a.png?x=1&y=2");
                }
                other => panic!("expected image part, got {:?}", other),
            }
        }
        (result, expected) => panic!("unexpected outcome {:?}, expected {:?}", result, expected),
    }
}

#[test_case(Role::System, "gpt-4.1", "system" ; "system")]
#[test_case(Role::System, "o1-mini", "developer" ; "system under developer policy")]
#[test_case(Role::Assistant, "gpt-4.1", "assistant" ; "assistant")]
#[test_case(Role::Assistant, "o1-mini", "system" ; "assistant under developer policy")]
#[test_case(Role::User, "o1-mini", "user" ; "user under developer policy")]
fn test_wire_role_and_parts(role: Role, model: &str, wire_role: &str) {
    let mapper = OpenAIMessageMapper::for_model(model);
    let message = Message::with_parts(
        role,
        vec![
            ContentPart::text("a"),
            ContentPart::Unknown,
            ContentPart::tool_call("lookup", json!({})),
            ContentPart::text("b"),
        ],
    );

    let body = serde_json::to_value(mapper.to_provider(&[message]).unwrap()).unwrap();
    assert_eq!(
        body,
        json!([{"role": wire_role, "content": [
            {"type": "text", "text": "a"},
            {"type": "text", "text": ""},
            {"type": "text", "text": ""},
            {"type": "text", "text": "b"}
        ]}])
    );
}

#[test]
fn test_assistant_string_under_developer_policy() {
    let wire = OpenAIMessageMapper::for_model("o1-mini")
        .to_provider(&[Message::assistant("Noted.")])
        .unwrap();
    assert_eq!(
        serde_json::to_value(&wire).unwrap(),
        json!([{"role": "system", "content": [{"type": "text", "text": "Noted."}]}])
    );
}

#[test]
fn test_bare_tool_message_rejected() {
    let mapper = OpenAIMessageMapper::new();
    let result = mapper.to_provider(&[Message::user("hi"), Message::new(Role::Tool, "42")]);
    assert_eq!(result.unwrap_err(), MapperError::BareToolMessage);
}

#[test]
fn test_split_mixed_tool_results() {
    let mapper = OpenAIMessageMapper::new();
    let message = Message::with_parts(
        Role::User,
        vec![
            ContentPart::text("first"),
            ContentPart::tool_result("c1", json!({"temp": 24})),
            ContentPart::image("https://example.com/map.png"),
            ContentPart::tool_result("c2", json!("ok")),
            ContentPart::text("last"),
        ],
    );

    let wire = mapper
        .to_provider(&[Message::system("sys"), message, Message::assistant("done")])
        .unwrap();
    let body = serde_json::to_value(&wire).unwrap();

    assert_eq!(wire.len(), 5);
    assert_eq!(body[0]["role"], "system");
    assert_eq!(body[1], json!({"role": "tool", "tool_call_id": "c1", "content": "{\"temp\":24}"}));
    assert_eq!(body[2], json!({"role": "tool", "tool_call_id": "c2", "content": "ok"}));
    assert_eq!(
        body[3],
        json!({"role": "user", "content": [
            {"type": "text", "text": "first"},
            {"type": "image_url", "image_url": {"url": "https://example.com/map.png"}},
            {"type": "text", "text": "last"}
        ]})
    );
    assert_eq!(body[4], json!({"role": "assistant", "content": "done"}));
}

#[test]
fn test_tool_result_only_message_contributes_no_residual() {
    let mapper = OpenAIMessageMapper::new();
    let message = Message::with_parts(
        Role::Assistant,
        vec![ContentPart::tool_result("c1", json!([1, 2, 3]))],
    );

    let wire = mapper.to_provider(&[message]).unwrap();
    assert_eq!(wire.len(), 1);
    assert_eq!(wire[0].role, OpenAIRole::Tool);
    assert_eq!(wire[0].content, Some(OpenAIContent::Text("[1,2,3]".to_string())));
}

#[test]
fn test_residual_tool_role_still_rejected() {
    let mapper = OpenAIMessageMapper::new();
    let message = Message::with_parts(
        Role::Tool,
        vec![ContentPart::tool_result("c1", json!(1)), ContentPart::text("extra")],
    );
    assert_eq!(
        mapper.to_provider(&[message]).unwrap_err(),
        MapperError::BareToolMessage
    );
}

#[test]
fn test_deterministic_output() {
    let mapper = OpenAIMessageMapper::for_model("o1-preview");
    let messages = vec![
        Message::system("rules"),
        Message::with_parts(
            Role::User,
            vec![ContentPart::tool_result("c9", json!({"a": [1, {"b": null}]})), ContentPart::text("q")],
        ),
    ];

    assert_eq!(
        mapper.to_provider(&messages).unwrap(),
        mapper.to_provider(&messages).unwrap()
    );
}

#[test]
fn test_configurable_developer_prefixes() {
    let mapper = OpenAIMessageMapper::for_model("o3-mini").with_policy(PrefixPolicy::new(["o3"]));
    let wire = mapper.to_provider(&[Message::system("rules")]).unwrap();
    assert_eq!(wire[0].role, OpenAIRole::Developer);

    let wire = OpenAIMessageMapper::for_model("o3-mini")
        .to_provider(&[Message::system("rules")])
        .unwrap();
    assert_eq!(wire[0].role, OpenAIRole::System);
}

#[test]
fn test_tools_round_trip_through_mapper() {
    let mapper = OpenAIMessageMapper::for_model("gpt-4.1");
    let spec = ToolSpec::new(
        "getWeather",
        json!({
            "type": "object",
            "properties": {"city": {"type": "string"}},
            "required": ["city"]
        }),
    )
    .with_description("Current weather for a city");

    let defs = mapper.to_provider_tools(&[spec.clone()]);
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].function.name, spec.name);
    assert_eq!(defs[0].function.parameters.as_ref(), Some(&spec.schema));

    let args = json!({"city": "Novi Sad", "units": {"temp": "C"}});
    let wire_call = encode_tool_call(&ToolCall::new("c1", defs[0].function.name.clone(), args.clone()));
    let choice = OpenAIChoice {
        message: OpenAIMessage {
            tool_calls: Some(vec![wire_call]),
            ..Default::default()
        },
        ..Default::default()
    };

    let mapped = mapper.from_provider(&choice);
    assert_eq!(mapped.tool_calls[0].name, "getWeather");
    assert_eq!(mapped.tool_calls[0].args, args);
}

#[test]
fn test_full_request_and_response_cycle() {
    let mapper = OpenAIMessageMapper::for_model("gpt-4.1-mini");
    let tools = vec![ToolSpec::new("getWeather", json!({"type": "object"}))];

    let request = mapper
        .build_request(
            &[Message::user("Weather in Novi Sad?")],
            Some(tools.as_slice()),
            &GenOpts::default().with_temperature(0.0).with_max_tokens(64),
        )
        .unwrap();
    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["model"], "gpt-4.1-mini");
    assert_eq!(body["tool_choice"], "auto");
    assert_eq!(body["temperature"], 0.0);

    let response: OpenAIResponse = serde_json::from_value(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-4.1-mini",
        "choices": [{
            "index": 0,
            "finish_reason": "tool_calls",
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "c1",
                    "type": "function",
                    "function": {"name": "getWeather", "arguments": "{\"city\":\"Novi Sad\"}"}
                }]
            }
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }))
    .unwrap();

    let mapped = mapper.from_provider_response(&response);
    assert_eq!(mapped.tool_calls[0].args, json!({"city": "Novi Sad"}));
}

#[test]
fn test_concurrent_use_of_one_mapper() {
    let mapper = OpenAIMessageMapper::for_model("o1-mini");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let mapper = &mapper;
                scope.spawn(move || {
                    let wire = mapper
                        .to_provider(&[Message::system(format!("rules {}", i))])
                        .unwrap();
                    assert_eq!(wire[0].role, OpenAIRole::Developer);
                    wire.len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
    });
}
