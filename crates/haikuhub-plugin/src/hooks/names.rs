//! Built-in hook names.
//!
//! Plugins are free to register and run hooks under any name; these are the
//! chains the host itself fires.

/// Fired once after every enabled plugin initialized. Data:
/// `{"plugins": [names]}`. Observational by convention.
pub const PLUGINS_INITIALIZED: &str = "plugins:initialized";

/// Fired when the server starts listening. Data: `{"port": n}`.
/// Observational by convention.
pub const APP_START: &str = "app:start";

/// Transforms the haiku list before it is returned or rendered.
/// Data: the JSON array of haiku records.
pub const HAIKUS_RENDER: &str = "haikus:render";

/// Filters the haiku list against a caller-supplied term.
/// Data: `{"haikus": [...], "filter": term}`.
pub const HAIKUS_FILTER: &str = "haikus:filter";
