use bevy::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

use crate::engine::error::PortalError;
use crate::engine::loading::progress::{LoadingProgress, SceneNotification, TrackedAsset};
use crate::tools::debug_panel::parameters::{
    DebugParameterChange, DebugParameterSink, DebugParameters, DebugTargets,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    /// `None` only when the member is absent; `"id": null` is still a call.
    #[serde(default, deserialize_with = "deserialize_present_id")]
    pub id: Option<Value>,
}

fn deserialize_present_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<Value>,
    pub error: Option<RpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: "Method not found".to_string(),
            data: Some(json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
/// Outgoing traffic is flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<DebugParameters>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    forward_scene_notifications,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::{Arc, Mutex};

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Cheap RPC check before queuing; full parsing happens in the frame loop.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) =
                window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
            }
        }
        None => error!("Window object not available"),
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut targets: DebugTargets,
    progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("RPC request: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &mut targets, &progress) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => warn!("Dropping malformed RPC message: {parse_error}"),
        }
    }
}

/// Handle individual RPC request and generate response based on method.
///
/// Requests without an id are notifications: they still take effect but get
/// no response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    sink: &mut impl DebugParameterSink,
    progress: &LoadingProgress,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_debug_parameters" => Ok(parameters_to_json(&sink.parameters())),
        "set_debug_parameter" => handle_set_debug_parameter(&request.params, sink),
        "get_load_status" => Ok(load_status_to_json(progress)),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn handle_set_debug_parameter(
    params: &Value,
    sink: &mut impl DebugParameterSink,
) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct SetParameterParams {
        name: String,
        value: Value,
    }

    let parsed = serde_json::from_value::<SetParameterParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'name' and 'value' parameters"))?;

    let change = parse_parameter_change(&parsed.name, &parsed.value)?;
    sink.apply(change);
    info!("Debug parameter '{}' set over RPC", parsed.name);

    Ok(parameters_to_json(&sink.parameters()))
}

fn parse_parameter_change(name: &str, value: &Value) -> Result<DebugParameterChange, RpcError> {
    match name {
        "portal_color_start" => parse_color(value).map(DebugParameterChange::PortalColorStart),
        "portal_color_end" => parse_color(value).map(DebugParameterChange::PortalColorEnd),
        "background_color" => parse_color(value).map(DebugParameterChange::ClearColor),
        "fireflies_size" => value
            .as_f64()
            .map(|size| DebugParameterChange::FirefliesPointSize(size as f32))
            .ok_or_else(|| RpcError::invalid_params("fireflies_size expects a number")),
        _ => Err(RpcError::invalid_params(&format!("Unknown parameter: {name}"))),
    }
}

fn parse_color(value: &Value) -> Result<Srgba, RpcError> {
    let hex = value
        .as_str()
        .ok_or_else(|| RpcError::invalid_params("Expected a '#rrggbb' colour string"))?;
    Srgba::hex(hex).map_err(|e| RpcError::invalid_params(&format!("Bad colour '{hex}': {e}")))
}

fn parameters_to_json(parameters: &DebugParameters) -> Value {
    json!({
        "portal_color_start": parameters.portal_color_start.to_hex(),
        "portal_color_end": parameters.portal_color_end.to_hex(),
        "fireflies_size": parameters.fireflies_point_size,
        "background_color": parameters.clear_color.to_hex(),
    })
}

fn load_status_to_json(progress: &LoadingProgress) -> Value {
    json!({
        "model": progress.is_loaded(TrackedAsset::Model),
        "baked_texture": progress.is_loaded(TrackedAsset::BakedTexture),
        "portal_shader": progress.is_loaded(TrackedAsset::PortalShader),
        "fireflies_shader": progress.is_loaded(TrackedAsset::FirefliesShader),
        "materials_bound": progress.materials_bound,
        "failures": progress
            .failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
    })
}

fn notification_params(failure: &PortalError) -> Value {
    match failure {
        PortalError::LoadFailure { asset, reason } => json!({
            "asset": asset,
            "reason": reason,
        }),
        PortalError::BindingFailure { node } => json!({ "node": node }),
    }
}

/// Relay loader and binding outcomes as JSON-RPC notifications.
fn forward_scene_notifications(
    mut notifications: EventReader<SceneNotification>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for notification in notifications.read() {
        match notification {
            SceneNotification::ModelReady => rpc_interface.send_notification("model_ready", json!({})),
            SceneNotification::Failed(failure) => rpc_interface
                .send_notification(failure.notification_method(), notification_params(failure)),
        }
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (the host page).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    // No-op for non-WASM targets.
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::scene::FIREFLIES_DEFAULT_POINT_SIZE;

    fn request(method: &str, params: Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(json!(7)),
        }
    }

    #[test]
    fn null_id_is_answered_but_absent_id_is_not() {
        let mut parameters = DebugParameters::default();
        let progress = LoadingProgress::default();

        let with_null: RpcRequest = serde_json::from_str(
            r#"{"jsonrpc":"2.0","method":"get_debug_parameters","id":null}"#,
        )
        .unwrap();
        assert_eq!(with_null.id, Some(Value::Null));
        let response = handle_rpc_request(&with_null, &mut parameters, &progress).unwrap();
        assert_eq!(response.id, Some(Value::Null));
        assert!(response.result.is_some());
        assert_eq!(
            serde_json::to_value(&response).unwrap()["id"],
            Value::Null
        );

        let without_id: RpcRequest = serde_json::from_str(
            r#"{"jsonrpc":"2.0","method":"get_debug_parameters"}"#,
        )
        .unwrap();
        assert_eq!(without_id.id, None);
        assert!(handle_rpc_request(&without_id, &mut parameters, &progress).is_none());
    }

    #[test]
    fn unknown_method_is_rejected() {
        let mut parameters = DebugParameters::default();
        let response = handle_rpc_request(
            &request("spin_portal", Value::Null),
            &mut parameters,
            &LoadingProgress::default(),
        )
        .unwrap();

        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
        assert_eq!(response.id, Some(json!(7)));
    }

    #[test]
    fn malformed_colour_is_invalid_params_and_changes_nothing() {
        let mut parameters = DebugParameters::default();
        let response = handle_rpc_request(
            &request(
                "set_debug_parameter",
                json!({ "name": "portal_color_start", "value": "purple-ish" }),
            ),
            &mut parameters,
            &LoadingProgress::default(),
        )
        .unwrap();

        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
        assert_eq!(parameters, DebugParameters::default());
    }

    #[test]
    fn set_debug_parameter_applies_the_change() {
        let mut parameters = DebugParameters::default();
        let response = handle_rpc_request(
            &request(
                "set_debug_parameter",
                json!({ "name": "portal_color_end", "value": "#ff0000" }),
            ),
            &mut parameters,
            &LoadingProgress::default(),
        )
        .unwrap();

        assert!(response.error.is_none());
        assert_eq!(parameters.portal_color_end, Srgba::rgb(1.0, 0.0, 0.0));
        assert_eq!(response.result.unwrap()["portal_color_end"], json!("#FF0000"));
    }

    #[test]
    fn notifications_apply_without_a_response() {
        let mut parameters = DebugParameters::default();
        let mut notification = request(
            "set_debug_parameter",
            json!({ "name": "fireflies_size", "value": 42 }),
        );
        notification.id = None;

        let response =
            handle_rpc_request(&notification, &mut parameters, &LoadingProgress::default());

        assert!(response.is_none());
        assert_eq!(parameters.fireflies_point_size, 42.0);
        assert_ne!(parameters.fireflies_point_size, FIREFLIES_DEFAULT_POINT_SIZE);
    }

    #[test]
    fn load_status_reports_failures() {
        let mut progress = LoadingProgress::default();
        progress.mark_loaded(TrackedAsset::Model);
        progress.record_failure(PortalError::binding_failure("portalLight"));

        let response = handle_rpc_request(
            &request("get_load_status", Value::Null),
            &mut DebugParameters::default(),
            &progress,
        )
        .unwrap();
        let status = response.result.unwrap();

        assert_eq!(status["model"], json!(true));
        assert_eq!(status["baked_texture"], json!(false));
        assert_eq!(status["failures"].as_array().unwrap().len(), 1);
    }
}
