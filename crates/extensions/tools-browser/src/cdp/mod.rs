//! Chrome DevTools Protocol (CDP) client implementation.
//!
//! A pure Rust CDP client: it connects to Chrome/Chromium over WebSocket and
//! exposes page sessions that implement [`crate::interaction::PageDriver`].
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let page = client.new_page(None).await?;
//! page.navigate("https://example.com").await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
