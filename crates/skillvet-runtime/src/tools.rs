use async_trait::async_trait;
use serde_json::json;
use skillvet_core::{Result, Tool, ToolCall, ToolExecutor, ToolResult};
use std::path::{Path, PathBuf};

/// The two file tools exposed to the reviewing model.
///
/// Filesystem failures (missing path, not a directory, non-UTF-8 content)
/// come back as `ToolResult { is_error: true }` for the model to recover
/// from; only malformed arguments are errors at this level.
pub struct ReviewTools {
    /// When set, paths resolving outside this root are rejected.
    /// `None` = unrestricted read access (the default posture).
    sandbox_root: Option<PathBuf>,
}

impl ReviewTools {
    pub fn new(sandbox_root: Option<PathBuf>) -> Self {
        // Canonicalize once so prefix checks compare like with like.
        let sandbox_root = sandbox_root.map(|r| r.canonicalize().unwrap_or(r));
        Self { sandbox_root }
    }

    /// Returns a rejection message when `path` resolves outside the sandbox
    /// root. Paths that cannot be canonicalized pass through so the actual
    /// filesystem call reports the real error.
    fn sandbox_violation(&self, path: &Path) -> Option<String> {
        let root = self.sandbox_root.as_ref()?;
        match path.canonicalize() {
            Ok(resolved) if resolved.starts_with(root) => None,
            Ok(resolved) => Some(format!(
                "path {} is outside the sandbox root {}",
                resolved.display(),
                root.display()
            )),
            Err(_) => None,
        }
    }

    fn path_arg<'a>(call: &'a ToolCall, tool: &str) -> Result<&'a str> {
        call.arguments["path"]
            .as_str()
            .ok_or_else(|| skillvet_core::VetError::ToolExecution {
                tool: tool.into(),
                reason: "missing 'path' argument".into(),
            })
    }

    async fn exec_file_read(&self, call: &ToolCall) -> Result<ToolResult> {
        let path = Self::path_arg(call, "file_read")?;

        if let Some(reason) = self.sandbox_violation(Path::new(path)) {
            return Ok(ToolResult::error(call.id.clone(), reason));
        }

        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(ToolResult {
                tool_call_id: call.id.clone(),
                content,
                is_error: false,
            }),
            Err(e) => Ok(ToolResult::error(
                call.id.clone(),
                format!("Error reading {}: {}", path, e),
            )),
        }
    }

    async fn exec_file_list(&self, call: &ToolCall) -> Result<ToolResult> {
        let path = Self::path_arg(call, "file_list")?;

        if let Some(reason) = self.sandbox_violation(Path::new(path)) {
            return Ok(ToolResult::error(call.id.clone(), reason));
        }

        let mut dir = match tokio::fs::read_dir(path).await {
            Ok(dir) => dir,
            Err(e) => {
                return Ok(ToolResult::error(
                    call.id.clone(),
                    format!("Error listing {}: {}", path, e),
                ));
            }
        };

        let mut entries = Vec::new();
        loop {
            match dir.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name().to_string_lossy().to_string();
                    let is_dir = entry
                        .file_type()
                        .await
                        .map(|ft| ft.is_dir())
                        .unwrap_or(false);
                    let kind = if is_dir { "dir" } else { "file" };
                    entries.push(format!("{kind}\t{name}"));
                }
                Ok(None) => break,
                Err(e) => {
                    return Ok(ToolResult::error(
                        call.id.clone(),
                        format!("Error listing {}: {}", path, e),
                    ));
                }
            }
        }

        entries.sort();
        Ok(ToolResult {
            tool_call_id: call.id.clone(),
            content: entries.join("\n"),
            is_error: false,
        })
    }
}

#[async_trait]
impl ToolExecutor for ReviewTools {
    fn tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: "file_list".into(),
                description: "List the immediate files and directories at a path".into(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "path": {
                            "type": "string",
                            "description": "Directory path to list"
                        }
                    },
                    "required": ["path"]
                }),
            },
            Tool {
                name: "file_read".into(),
                description: "Read the full UTF-8 contents of a file".into(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "path": {
                            "type": "string",
                            "description": "Path to the file to read"
                        }
                    },
                    "required": ["path"]
                }),
            },
        ]
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        match call.tool_name.as_str() {
            "file_read" => self.exec_file_read(call).await,
            "file_list" => self.exec_file_list(call).await,
            other => Err(skillvet_core::VetError::ToolNotFound(other.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(tool: &str, args: serde_json::Value) -> ToolCall {
        ToolCall {
            id: "call_1".into(),
            tool_name: tool.into(),
            arguments: args,
        }
    }

    #[tokio::test]
    async fn file_read_returns_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SKILL.md");
        std::fs::write(&path, "# My Skill\n").unwrap();

        let tools = ReviewTools::new(None);
        let result = tools
            .execute(&call("file_read", json!({"path": path})))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert_eq!(result.content, "# My Skill\n");
    }

    #[tokio::test]
    async fn file_read_missing_file_is_error_result_not_err() {
        let tools = ReviewTools::new(None);
        let result = tools
            .execute(&call("file_read", json!({"path": "/nonexistent/file.md"})))
            .await
            .unwrap();
        assert!(result.is_error);
        assert!(result.content.contains("/nonexistent/file.md"));
    }

    #[tokio::test]
    async fn file_list_tags_entries_with_type() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("SKILL.md"), "doc").unwrap();
        std::fs::create_dir_all(dir.path().join("references")).unwrap();

        let tools = ReviewTools::new(None);
        let result = tools
            .execute(&call("file_list", json!({"path": dir.path()})))
            .await
            .unwrap();
        assert!(!result.is_error);
        let lines: Vec<_> = result.content.lines().collect();
        assert!(lines.contains(&"file\tSKILL.md"));
        assert!(lines.contains(&"dir\treferences"));
    }

    #[tokio::test]
    async fn file_list_on_a_file_is_error_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SKILL.md");
        std::fs::write(&path, "doc").unwrap();

        let tools = ReviewTools::new(None);
        let result = tools
            .execute(&call("file_list", json!({"path": path})))
            .await
            .unwrap();
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn missing_path_argument_is_a_tool_execution_error() {
        let tools = ReviewTools::new(None);
        let err = tools
            .execute(&call("file_read", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            skillvet_core::VetError::ToolExecution { .. }
        ));
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let tools = ReviewTools::new(None);
        let err = tools
            .execute(&call("shell_exec", json!({"path": "/"})))
            .await
            .unwrap_err();
        assert!(matches!(err, skillvet_core::VetError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn sandbox_rejects_paths_outside_root() {
        let sandbox = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("secret.txt");
        std::fs::write(&secret, "hidden").unwrap();

        let tools = ReviewTools::new(Some(sandbox.path().to_path_buf()));
        let result = tools
            .execute(&call("file_read", json!({"path": secret})))
            .await
            .unwrap();
        assert!(result.is_error);
        assert!(result.content.contains("sandbox"));
    }

    #[tokio::test]
    async fn sandbox_allows_paths_under_root() {
        let sandbox = tempfile::tempdir().unwrap();
        let path = sandbox.path().join("SKILL.md");
        std::fs::write(&path, "ok").unwrap();

        let tools = ReviewTools::new(Some(sandbox.path().to_path_buf()));
        let result = tools
            .execute(&call("file_read", json!({"path": path})))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert_eq!(result.content, "ok");
    }

    #[test]
    fn exactly_two_tools_each_requiring_path() {
        let tools = ReviewTools::new(None);
        let defs = tools.tools();
        assert_eq!(defs.len(), 2);
        for def in defs {
            assert_eq!(def.parameters["required"], json!(["path"]));
        }
    }
}
