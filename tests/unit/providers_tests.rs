/*!
 * Tests for provider request building and the mock provider
 */

use serde_json::json;

use duobook::providers::Provider;
use duobook::providers::mock::MockProvider;
use duobook::providers::ollama::ChatRequest;
use duobook::providers::openai::OpenAIRequest;

/// Test OpenAI request serialization
#[test]
fn test_openai_request_withMessageAndTemperature_shouldSerialize() {
    let request = OpenAIRequest::new("gpt-4.1")
        .add_message("user", "Translate this")
        .temperature(0.5);

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["model"], json!("gpt-4.1"));
    assert_eq!(value["messages"][0]["role"], json!("user"));
    assert_eq!(value["messages"][0]["content"], json!("Translate this"));
    assert_eq!(value["temperature"], json!(0.5));
    // max_tokens is omitted when unset
    assert!(value.get("max_tokens").is_none());
}

/// Test Ollama chat request serialization
#[test]
fn test_ollama_request_withMessage_shouldSerializeNonStreaming() {
    let request = ChatRequest::new("llama2")
        .add_message("user", "Hallo")
        .temperature(0.5);

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["model"], json!("llama2"));
    assert_eq!(value["stream"], json!(false));
    assert_eq!(value["messages"][0]["content"], json!("Hallo"));
    assert_eq!(value["options"]["temperature"], json!(0.5));
}

/// Test the working mock translation behavior
#[tokio::test]
async fn test_mock_working_withListPrompt_shouldTranslateEveryElement() {
    let mock = MockProvider::working();
    let prompt = "Translate into German.\nList:\n[\"Hallo\", \"Welt\"]";

    let response = mock.complete(prompt.to_string()).await.unwrap();
    assert!(response.contains("\"DE: Hallo\""));
    assert!(response.contains("\"DE: Welt\""));
}

/// Test the noise mock behavior
#[tokio::test]
async fn test_mock_noise_withAnyPrompt_shouldAnswerWithoutList() {
    let mock = MockProvider::noise();
    let response = mock.complete("anything".to_string()).await.unwrap();
    assert_eq!(response, "Sorry, I cannot help.");
}

/// Test scripted responses replay in order and then run dry
#[tokio::test]
async fn test_mock_scripted_withTwoResponses_shouldReplayThenFail() {
    let mock = MockProvider::scripted(vec!["first".to_string(), "second".to_string()]);

    assert_eq!(mock.complete("a".to_string()).await.unwrap(), "first");
    assert_eq!(mock.complete("b".to_string()).await.unwrap(), "second");
    assert!(mock.complete("c".to_string()).await.is_err());

    assert_eq!(mock.received_prompts(), vec!["a", "b", "c"]);
}

/// Test the failing mock behavior
#[tokio::test]
async fn test_mock_failing_withAnyPrompt_shouldError() {
    let mock = MockProvider::failing();
    assert!(mock.complete("anything".to_string()).await.is_err());
    assert!(mock.test_connection().await.is_err());
}
