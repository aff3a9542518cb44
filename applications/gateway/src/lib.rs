//! Agora Gateway
//!
//! Minimal static-file and reverse-proxy server in front of the community
//! front-end:
//!
//! - `GET /` redirects to `/index.html`
//! - `GET /js/core/defaults.js` serves the client configuration module,
//!   generated from the environment at startup
//! - everything else is served from `public/`, then `assets/`
//! - the `/pages` prefix is forwarded to the backend origin with a
//!   bounded timeout; upstream failures answer with a JSON 502

pub mod config;
pub mod defaults_js;
pub mod error;
pub mod proxy;
pub mod routes;
pub mod state;
