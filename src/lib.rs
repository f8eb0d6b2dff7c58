//! A small web service that turns text into a downloadable QR code PNG.
//!
//! The page offers colour, error correction, module size and border
//! controls, and switches between a dark and a light theme per session.

pub mod builder;
pub mod config;
pub mod error;
pub mod generate;
pub mod page;
pub mod params;
pub mod server;
pub mod session;
pub mod theme;

pub use builder::{BuildError, build_qr};
pub use config::ServerConfig;
pub use error::AppError;
pub use generate::{GenerateOutcome, display, on_generate};
pub use params::{EcTier, GenerateForm, HexColor, QrParams};
pub use session::{GeneratedImage, SessionState};
pub use theme::{Theme, ThemeResolution, resolve_theme};

pub const PAGE_TITLE: &str = "QR Code Generator";
pub const DOWNLOAD_FILE_NAME: &str = "qr_code.png";
pub const PNG_MIME: &str = "image/png";
