//! hctcolor MCP (Model Context Protocol) server
//!
//! A standalone server binary that exposes source-color extraction, color
//! inspection and harmonization over line-delimited JSON-RPC on stdio, so
//! AI assistants can reason about colors perceptually.

use hctcolor::{
    argb_from_hex, blend, hex_from_argb, ranked_colors_from_pixels, theme_from_source_color, Cam16, CustomColor,
    ExtractOptions, Hct, PixelBuffer,
};
use serde_json::{json, Map, Value};
use std::io::{self, BufRead, Write};
use std::path::Path;

const INVALID_PARAMS: i32 = -32602;
const METHOD_NOT_FOUND: i32 = -32601;
const TOOL_FAILURE: i32 = -32000;

/// MCP Request structure
#[derive(Debug, serde::Deserialize)]
struct McpRequest {
    #[serde(default)]
    #[allow(dead_code)]
    jsonrpc: String,
    #[serde(flatten)]
    kind: RequestKind,
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "method")]
enum RequestKind {
    #[serde(rename = "initialize")]
    Initialize {
        id: Value,
        #[serde(default)]
        params: Value,
    },
    #[serde(rename = "tools/list")]
    ToolsList { id: Value },
    #[serde(rename = "tools/call")]
    ToolsCall { id: Value, params: ToolCallParams },
}

#[derive(Debug, serde::Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// MCP Response structure
#[derive(Debug, serde::Serialize)]
struct McpResponse {
    jsonrpc: String,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, serde::Serialize)]
struct McpError {
    code: i32,
    message: String,
}

impl McpResponse {
    fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn text(id: Value, text: String) -> Self {
        Self::result(id, json!({ "content": [{ "type": "text", "text": text }] }))
    }

    fn error(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError { code, message }),
        }
    }
}

/// Tool failures, split by the JSON-RPC code they map to.
enum ToolError {
    InvalidParams(String),
    Failed(String),
}

struct HctColorMcpServer;

impl HctColorMcpServer {
    fn handle_initialize(&self, _params: Value, id: Value) -> McpResponse {
        McpResponse::result(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "serverInfo": {
                    "name": "hctcolor",
                    "version": env!("CARGO_PKG_VERSION")
                },
                "capabilities": {
                    "tools": {
                        "listChanged": false
                    }
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Value) -> McpResponse {
        McpResponse::result(
            id,
            json!({
                "tools": [
                    {
                        "name": "extract_source_color",
                        "description": "Rank the colors of an image that would work best as a theme source. Pixels are quantized (Wu then weighted k-means by default) and scored by hue population and chroma.",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "pixels": {
                                    "type": "array",
                                    "items": { "type": "integer" },
                                    "description": "Packed 0xAARRGGBB pixels. Translucent pixels are ignored."
                                },
                                "path": {
                                    "type": "string",
                                    "description": "File holding a JSON array of ARGB integers or hex colors, used when pixels is absent"
                                },
                                "max_colors": {
                                    "type": "integer",
                                    "description": "Colors to quantize to before scoring (default: 128)",
                                    "minimum": 1,
                                    "default": 128
                                },
                                "quantizer": {
                                    "type": "string",
                                    "enum": ["celebi", "wu", "wsmeans", "map"],
                                    "default": "celebi"
                                },
                                "desired": {
                                    "type": "integer",
                                    "description": "How many ranked colors to return (default: 4)",
                                    "minimum": 1,
                                    "default": 4
                                },
                                "lenient": {
                                    "type": "boolean",
                                    "description": "Skip malformed hex colors in the file at path instead of failing",
                                    "default": false
                                }
                            }
                        }
                    },
                    {
                        "name": "inspect_color",
                        "description": "Report the HCT and CAM16 attributes of a hex color.",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "color": { "type": "string", "description": "#rrggbb, #rgb or #aarrggbb" }
                            },
                            "required": ["color"]
                        }
                    },
                    {
                        "name": "harmonize_colors",
                        "description": "Rotate a design color's hue up to 15 degrees toward a source color, keeping its chroma and tone.",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "design": { "type": "string", "description": "Color to adjust" },
                                "source": { "type": "string", "description": "Color to lean toward" }
                            },
                            "required": ["design", "source"]
                        }
                    },
                    {
                        "name": "theme_from_color",
                        "description": "Build light and dark Material color schemes and tonal palettes from a source color.",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "color": { "type": "string", "description": "Source color" },
                                "custom_colors": {
                                    "type": "array",
                                    "description": "Extra colors, each harmonized toward the source when blend is true",
                                    "items": {
                                        "type": "object",
                                        "properties": {
                                            "name": { "type": "string" },
                                            "value": { "type": "string", "description": "Hex color" },
                                            "blend": { "type": "boolean", "default": false }
                                        },
                                        "required": ["name", "value"]
                                    }
                                }
                            },
                            "required": ["color"]
                        }
                    }
                ]
            }),
        )
    }

    fn handle_tools_call(&self, params: ToolCallParams, id: Value) -> McpResponse {
        let args = match params.arguments {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => {
                return McpResponse::error(
                    id,
                    INVALID_PARAMS,
                    "Invalid arguments: expected object".to_string(),
                );
            }
        };

        let outcome = match params.name.as_str() {
            "extract_source_color" => extract_source_color(&args),
            "inspect_color" => inspect_color(&args),
            "harmonize_colors" => harmonize_colors(&args),
            "theme_from_color" => theme_from_color(&args),
            _ => {
                return McpResponse::error(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Unknown tool: {}", params.name),
                );
            }
        };

        match outcome {
            Ok(text) => McpResponse::text(id, text),
            Err(ToolError::InvalidParams(message)) => McpResponse::error(id, INVALID_PARAMS, message),
            Err(ToolError::Failed(message)) => McpResponse::error(id, TOOL_FAILURE, message),
        }
    }

    /// Answers one request line; `None` for lines that are not requests.
    fn handle_line(&self, line: &str) -> Option<String> {
        let req = serde_json::from_str::<McpRequest>(line).ok()?;
        let response = match req.kind {
            RequestKind::Initialize { id, params } => self.handle_initialize(params, id),
            RequestKind::ToolsList { id } => self.handle_tools_list(id),
            RequestKind::ToolsCall { id, params } => self.handle_tools_call(params, id),
        };
        serde_json::to_string(&response).ok()
    }

    fn run(&self) {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut stdout_lock = stdout.lock();

        for line in stdin.lock().lines().map_while(Result::ok) {
            if let Some(response_json) = self.handle_line(&line) {
                writeln!(stdout_lock, "{}", response_json).ok();
                stdout_lock.flush().ok();
            }
        }
    }
}

fn color_arg(args: &Map<String, Value>, key: &str) -> Result<u32, ToolError> {
    let text = args
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::InvalidParams(format!("Missing required parameter: {key}")))?;
    argb_from_hex(text).map_err(|e| ToolError::InvalidParams(e.to_string()))
}

fn extract_source_color(args: &Map<String, Value>) -> Result<String, ToolError> {
    let options: ExtractOptions = serde_json::from_value(Value::Object(args.clone()))
        .map_err(|e| ToolError::InvalidParams(format!("Invalid options: {e}")))?;
    options
        .validate()
        .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

    let pixels = match (args.get("pixels"), args.get("path").and_then(|v| v.as_str())) {
        (Some(pixels), _) => serde_json::from_value::<Vec<u32>>(pixels.clone())
            .map_err(|e| ToolError::InvalidParams(format!("pixels must be ARGB integers: {e}")))?,
        (None, Some(path)) => {
            let lenient = args.get("lenient").and_then(|v| v.as_bool()).unwrap_or(false);
            let loaded = if lenient {
                PixelBuffer::load_lenient(Path::new(path))
            } else {
                PixelBuffer::load(Path::new(path))
            };
            loaded
                    .map_err(|e| ToolError::Failed(format!("Failed to read {path}: {e}")))?
                .pixels
        }
        (None, None) => {
            return Err(ToolError::InvalidParams(
                "Missing required parameter: pixels or path".to_string(),
            ));
        }
    };

    let ranked = ranked_colors_from_pixels(&pixels, &options);
    let colors: Vec<String> = ranked.iter().map(|&argb| hex_from_argb(argb)).collect();
    Ok(json!({ "source": colors.first(), "ranked": colors }).to_string())
}

fn inspect_color(args: &Map<String, Value>) -> Result<String, ToolError> {
    let argb = color_arg(args, "color")?;
    let hct = Hct::from_argb(argb);
    let cam = Cam16::from_argb(argb);
    Ok(json!({
        "hex": hex_from_argb(argb),
        "argb": argb,
        "hct": { "hue": hct.hue(), "chroma": hct.chroma(), "tone": hct.tone() },
        "cam16": {
            "j": cam.j(), "q": cam.q(), "m": cam.m(), "s": cam.s(),
            "jstar": cam.jstar(), "astar": cam.astar(), "bstar": cam.bstar()
        }
    })
    .to_string())
}

fn harmonize_colors(args: &Map<String, Value>) -> Result<String, ToolError> {
    let design = color_arg(args, "design")?;
    let source = color_arg(args, "source")?;
    Ok(hex_from_argb(blend::harmonize(design, source)))
}

/// Palette tones reported by `theme_from_color`.
const THEME_TONES: [f64; 13] = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 95.0, 99.0, 100.0];

fn theme_from_color(args: &Map<String, Value>) -> Result<String, ToolError> {
    let source = color_arg(args, "color")?;
    let mut custom_colors = Vec::new();
    if let Some(entries) = args.get("custom_colors") {
        let entries = entries
            .as_array()
            .ok_or_else(|| ToolError::InvalidParams("custom_colors must be an array".to_string()))?;
        for entry in entries {
            let entry = entry
                .as_object()
                .ok_or_else(|| ToolError::InvalidParams("custom color must be an object".to_string()))?;
            let name = entry
                .get("name")
                .and_then(|v| v.as_str())
                .ok_or_else(|| ToolError::InvalidParams("custom color needs a name".to_string()))?;
            custom_colors.push(CustomColor {
                name: name.to_string(),
                value: color_arg(entry, "value")?,
                blend: entry.get("blend").and_then(|v| v.as_bool()).unwrap_or(false),
            });
        }
    }
    let theme = theme_from_source_color(source, &custom_colors);
    Ok(theme.to_hex_json(&THEME_TONES).to_string())
}

fn main() {
    let server = HctColorMcpServer;
    server.run();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(request: Value) -> Value {
        let line = HctColorMcpServer
            .handle_line(&request.to_string())
            .expect("a response");
        serde_json::from_str(&line).unwrap()
    }

    fn tool_call(name: &str, arguments: Value) -> Value {
        call(json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }))
    }

    #[test]
    fn test_initialize_and_list() {
        let init = call(json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }));
        assert_eq!(init["result"]["serverInfo"]["name"], "hctcolor");

        let list = call(json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }));
        let names: Vec<&str> = list["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|tool| tool["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            ["extract_source_color", "inspect_color", "harmonize_colors", "theme_from_color"]
        );
    }

    #[test]
    fn test_extract_source_color_from_pixels() {
        let response = tool_call(
            "extract_source_color",
            json!({ "pixels": vec![0xff4285f4u32; 32], "max_colors": 8 }),
        );
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let report: Value = serde_json::from_str(text).unwrap();
        assert_eq!(report["source"], "#4285f4");
    }

    #[test]
    fn test_inspect_color() {
        let response = tool_call("inspect_color", json!({ "color": "#ff0000" }));
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let report: Value = serde_json::from_str(text).unwrap();
        let hue = report["hct"]["hue"].as_f64().unwrap();
        assert!((hue - 27.41).abs() < 0.1);
    }

    #[test]
    fn test_extract_lenient_path() {
        let path = std::env::temp_dir().join("hctcolor_mcp_lenient.txt");
        std::fs::write(&path, "#4285f4 oops #4285f4").unwrap();
        let path_text = path.display().to_string();

        let strict = tool_call("extract_source_color", json!({ "path": path_text }));
        assert_eq!(strict["error"]["code"], TOOL_FAILURE);

        let lenient = tool_call("extract_source_color", json!({ "path": path_text, "lenient": true }));
        let text = lenient["result"]["content"][0]["text"].as_str().unwrap();
        let report: Value = serde_json::from_str(text).unwrap();
        assert_eq!(report["source"], "#4285f4");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_theme_from_color() {
        let response = tool_call(
            "theme_from_color",
            json!({
                "color": "#4285f4",
                "custom_colors": [{ "name": "brand", "value": "#ff0000", "blend": true }]
            }),
        );
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let theme: Value = serde_json::from_str(text).unwrap();
        assert_eq!(theme["source"], "#4285f4");
        assert_eq!(theme["schemes"]["light"]["onPrimary"], "#ffffff");
        assert_eq!(theme["palettes"]["primary"]["100"], "#ffffff");
        assert_eq!(theme["customColors"][0]["name"], "brand");
        assert_ne!(theme["customColors"][0]["value"], "#ff0000");

        let bad = tool_call("theme_from_color", json!({ "color": "#4285f4", "custom_colors": [{ "value": "#ff0000" }] }));
        assert_eq!(bad["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_error_codes() {
        let unknown = tool_call("paint", json!({}));
        assert_eq!(unknown["error"]["code"], METHOD_NOT_FOUND);

        let missing = tool_call("harmonize_colors", json!({ "design": "#ff0000" }));
        assert_eq!(missing["error"]["code"], INVALID_PARAMS);

        let bad_hex = tool_call("inspect_color", json!({ "color": "#12" }));
        assert_eq!(bad_hex["error"]["code"], INVALID_PARAMS);

        let no_file = tool_call("extract_source_color", json!({ "path": "/nonexistent/pixels.json" }));
        assert_eq!(no_file["error"]["code"], TOOL_FAILURE);
    }

    #[test]
    fn test_ignores_non_requests() {
        assert!(HctColorMcpServer.handle_line("not json").is_none());
        assert!(
            HctColorMcpServer
                .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .is_none()
        );
    }
}
