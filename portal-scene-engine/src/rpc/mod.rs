//! JSON-RPC 2.0 bridge to the page embedding the canvas.
//!
//! On wasm the bridge listens for `postMessage` strings and replies to the
//! parent window; natively the transport is a no-op and requests can only be
//! exercised through [`web_rpc::handle_rpc_request`].
//!
//! ## Methods
//!
//! - `get_debug_parameters`: current portal colours, fireflies size and background
//! - `set_debug_parameter`: `{ "name": ..., "value": ... }`, colours as `#rrggbb`
//! - `get_load_status`: per-asset load flags, binding state and recorded failures
//!
//! ## Notifications
//!
//! - `model_ready`: materials are bound and the model is visible
//! - `load_failed`: `{ "asset", "reason" }`
//! - `binding_failed`: `{ "node" }`
//!
//! Error codes: `-32601` method not found, `-32602` invalid params.

pub mod web_rpc;
