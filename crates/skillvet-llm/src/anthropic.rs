use async_trait::async_trait;
use reqwest::Client;
use skillvet_core::Result;
use tracing::debug;

use crate::provider::*;

/// Anthropic Claude API provider.
#[derive(Debug)]
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.anthropic.com/v1".into(),
        }
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn build_request_body(&self, request: &LlmRequest) -> serde_json::Value {
        let mut messages = Vec::new();
        for msg in &request.messages {
            match msg.role {
                skillvet_core::Role::System => continue, // handled via top-level "system" field
                skillvet_core::Role::User => {
                    messages.push(serde_json::json!({
                        "role": "user",
                        "content": msg.text_content(),
                    }));
                }
                skillvet_core::Role::Assistant => {
                    if msg.tool_calls.is_empty() {
                        messages.push(serde_json::json!({
                            "role": "assistant",
                            "content": msg.text_content(),
                        }));
                    } else {
                        // Assistant message with tool_use blocks
                        let mut content_blocks: Vec<serde_json::Value> = Vec::new();
                        let text = msg.text_content();
                        if !text.is_empty() {
                            content_blocks.push(serde_json::json!({
                                "type": "text",
                                "text": text,
                            }));
                        }
                        for tc in &msg.tool_calls {
                            content_blocks.push(serde_json::json!({
                                "type": "tool_use",
                                "id": tc.id,
                                "name": tc.tool_name,
                                "input": tc.arguments,
                            }));
                        }
                        messages.push(serde_json::json!({
                            "role": "assistant",
                            "content": content_blocks,
                        }));
                    }
                }
                skillvet_core::Role::Tool => {
                    // Tool results sent as user message with tool_result content blocks
                    let mut content_blocks: Vec<serde_json::Value> = Vec::new();
                    for block in &msg.content {
                        if let skillvet_core::MessageContent::ToolResult {
                            tool_call_id,
                            content,
                            is_error,
                        } = block
                        {
                            content_blocks.push(serde_json::json!({
                                "type": "tool_result",
                                "tool_use_id": tool_call_id,
                                "content": content,
                                "is_error": is_error,
                            }));
                        }
                    }
                    if content_blocks.is_empty() {
                        messages.push(serde_json::json!({
                            "role": "user",
                            "content": msg.text_content(),
                        }));
                    } else {
                        messages.push(serde_json::json!({
                            "role": "user",
                            "content": content_blocks,
                        }));
                    }
                }
            }
        }

        let mut body = serde_json::json!({
            "model": &request.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": messages,
        });

        if let Some(ref system) = request.system {
            body["system"] = serde_json::json!(system);
        }

        if !request.tools.is_empty() {
            let tools: Vec<serde_json::Value> = request
                .tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "name": t.name,
                        "description": t.description,
                        "input_schema": t.parameters,
                    })
                })
                .collect();
            body["tools"] = serde_json::json!(tools);
        }

        body
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let body = self.build_request_body(request);
        debug!(model = %request.model, "sending Anthropic API request");

        let resp = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| skillvet_core::VetError::LlmProvider(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                return Err(skillvet_core::VetError::RateLimited {
                    retry_after_secs: 30,
                });
            }
            return Err(skillvet_core::VetError::LlmProvider(format!(
                "HTTP {status}: {text}"
            )));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| skillvet_core::VetError::LlmProvider(e.to_string()))?;

        let content_text = data["content"]
            .as_array()
            .map(|blocks| {
                blocks
                    .iter()
                    .filter_map(|b| {
                        if b["type"] == "text" {
                            b["text"].as_str().map(|s| s.to_string())
                        } else {
                            None
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let tool_calls: Vec<skillvet_core::ToolCall> = data["content"]
            .as_array()
            .map(|blocks| {
                blocks
                    .iter()
                    .filter_map(|b| {
                        if b["type"] == "tool_use" {
                            Some(skillvet_core::ToolCall {
                                id: b["id"].as_str().unwrap_or("").to_string(),
                                tool_name: b["name"].as_str().unwrap_or("").to_string(),
                                arguments: b["input"].clone(),
                            })
                        } else {
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let has_tool_calls = !tool_calls.is_empty();

        let stop_reason = match data["stop_reason"].as_str() {
            Some("tool_use") => StopReason::ToolUse,
            Some("max_tokens") => StopReason::MaxTokens,
            Some("stop_sequence") => StopReason::StopSequence,
            _ => StopReason::EndTurn,
        };

        let usage_data = &data["usage"];
        let usage = Usage {
            input_tokens: usage_data["input_tokens"].as_u64().unwrap_or(0) as u32,
            output_tokens: usage_data["output_tokens"].as_u64().unwrap_or(0) as u32,
        };

        let mut message = skillvet_core::Message::text(skillvet_core::Role::Assistant, content_text);
        message.tool_calls = tool_calls;

        Ok(LlmResponse {
            message,
            usage,
            has_tool_calls,
            stop_reason,
        })
    }

    async fn health_check(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(skillvet_core::VetError::LlmProvider(
                "ANTHROPIC_API_KEY not set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillvet_core::{Message, Role, Tool, ToolResult};

    fn request_with(messages: Vec<Message>, tools: Vec<Tool>) -> LlmRequest {
        LlmRequest {
            model: "claude-sonnet-4-20250514".into(),
            messages,
            tools,
            system: Some("You review skills.".into()),
            max_tokens: 1024,
            temperature: 0.2,
        }
    }

    #[test]
    fn body_includes_system_and_tools() {
        let provider = AnthropicProvider::new("key".into());
        let tools = vec![Tool {
            name: "file_read".into(),
            description: "Read a file".into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": { "path": { "type": "string" } },
                "required": ["path"]
            }),
        }];
        let req = request_with(vec![Message::text(Role::User, "review this")], tools);
        let body = provider.build_request_body(&req);

        assert_eq!(body["system"], "You review skills.");
        assert_eq!(body["tools"][0]["name"], "file_read");
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[test]
    fn tool_results_become_user_tool_result_blocks() {
        let provider = AnthropicProvider::new("key".into());
        let msg = Message::tool_result(ToolResult {
            tool_call_id: "call_1".into(),
            content: "file contents".into(),
            is_error: false,
        });
        let req = request_with(vec![msg], vec![]);
        let body = provider.build_request_body(&req);

        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"][0]["type"], "tool_result");
        assert_eq!(body["messages"][0]["content"][0]["tool_use_id"], "call_1");
    }

    #[test]
    fn assistant_tool_calls_become_tool_use_blocks() {
        let provider = AnthropicProvider::new("key".into());
        let mut msg = Message::text(Role::Assistant, "let me look");
        msg.tool_calls.push(skillvet_core::ToolCall {
            id: "call_2".into(),
            tool_name: "file_list".into(),
            arguments: serde_json::json!({"path": "/skills/alpha"}),
        });
        let req = request_with(vec![msg], vec![]);
        let body = provider.build_request_body(&req);

        let blocks = body["messages"][0]["content"].as_array().unwrap();
        assert_eq!(blocks[0]["type"], "text");
        assert_eq!(blocks[1]["type"], "tool_use");
        assert_eq!(blocks[1]["name"], "file_list");
    }

    #[tokio::test]
    async fn health_check_requires_key() {
        let provider = AnthropicProvider::new(String::new());
        assert!(provider.health_check().await.is_err());
        let provider = AnthropicProvider::new("sk-ant-test".into());
        assert!(provider.health_check().await.is_ok());
    }
}
