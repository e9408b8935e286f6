use super::{codes, ErrorCode, Hint};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHelpSummary {
    pub code: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHelp {
    pub code: String,
    pub summary: String,
    pub details_schema: Value,
    pub hints: Vec<Hint>,
}

pub fn list() -> Vec<ErrorHelpSummary> {
    codes::all_codes()
        .iter()
        .copied()
        .map(|code| {
            let help = explain(code);
            ErrorHelpSummary {
                code: help.code,
                summary: help.summary,
            }
        })
        .collect()
}

fn help(code: ErrorCode, summary: &str, details_schema: Value, hint: &str) -> ErrorHelp {
    ErrorHelp {
        code: code.as_str().to_string(),
        summary: summary.to_string(),
        details_schema,
        hints: vec![Hint {
            message: hint.to_string(),
        }],
    }
}

pub fn explain(code: ErrorCode) -> ErrorHelp {
    match code {
        ErrorCode::ConfigInvalidJson => help(
            code,
            "Configuration JSON is invalid",
            json!({"path":"string","error":"string"}),
            "Fix JSON syntax in stencil.json or run `stencil config reset`",
        ),
        ErrorCode::ConfigInvalidValue => help(
            code,
            "Configuration value is invalid",
            json!({"key":"string","value":"string?","problem":"string"}),
            "Correct the config value to match expected type/format",
        ),
        ErrorCode::ValidationMissingArgument => help(
            code,
            "Missing required CLI argument",
            json!({"args":"string[]"}),
            "Rerun the command with the required argument(s)",
        ),
        ErrorCode::ValidationInvalidArgument => help(
            code,
            "Invalid CLI argument",
            json!({"field":"string","problem":"string","id":"string?","tried":"string[]?"}),
            "Verify the argument value and try again",
        ),
        ErrorCode::ValidationInvalidJson => help(
            code,
            "Invalid JSON input",
            json!({"error":"string","context":"string?","input":"string?"}),
            "Validate the JSON you passed to the command",
        ),
        ErrorCode::DestinationInvalid => help(
            code,
            "Destination path cannot receive a template",
            json!({"path":"string","problem":"string"}),
            "Choose an empty or existing directory as the destination",
        ),
        ErrorCode::WorkspaceNotFound => help(
            code,
            "Project root does not exist",
            json!({"path":"string","problem":"string"}),
            "Pass --project <dir> pointing at an existing directory",
        ),
        ErrorCode::TemplateNoRoots => help(
            code,
            "No template root directory exists",
            json!({"searched":"string[]"}),
            "Create <project>/.templates or register roots with `stencil config add-path`",
        ),
        ErrorCode::TemplateNoneVisible => help(
            code,
            "Template roots contain no selectable templates",
            json!({"searched":"string[]"}),
            "Add a template directory whose name does not start with '.' or '('",
        ),
        ErrorCode::TemplateNotFound => help(
            code,
            "Template name not found in any root",
            json!({"name":"string","available":"string[]"}),
            "Run `stencil templates list` and verify the template name",
        ),
        ErrorCode::ScaffoldCancelled => help(
            code,
            "A prompt was cancelled; nothing was written",
            json!({"stage":"string"}),
            "Rerun the command and answer every prompt, or pass --no-input",
        ),
        ErrorCode::InternalIoError => help(
            code,
            "Internal IO error",
            json!({"error":"string","context":"string?"}),
            "Check permissions on the template and destination paths",
        ),
        ErrorCode::InternalJsonError => help(
            code,
            "Internal JSON error",
            json!({"error":"string","context":"string?"}),
            "Report as a stencil bug if persistent",
        ),
        ErrorCode::InternalUnexpected => help(
            code,
            "Unexpected internal error",
            json!({}),
            "Report as a stencil bug with steps to reproduce",
        ),
    }
}
