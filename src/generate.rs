//! The generate trigger and what the page shows afterwards.

use crate::builder::{BuildError, build_qr};
use crate::params::QrParams;
use crate::session::{GeneratedImage, SessionState};
use crate::{DOWNLOAD_FILE_NAME, PNG_MIME};

pub const EMPTY_PAYLOAD_WARNING: &str = "Please enter some data to generate a QR code.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// A new image replaced whatever the session held.
    Generated,
    /// Nothing to encode; the stored image was cleared.
    EmptyPayload,
    /// The encoder refused the payload at these settings; the stored image
    /// was cleared.
    Rejected(String),
}

/// Handle one press of the generate button.
///
/// The session image is always replaced or cleared in full. Only a PNG
/// encoding failure is returned as an error, and it leaves the session
/// untouched.
pub fn on_generate(session: &mut SessionState, params: &QrParams) -> Result<GenerateOutcome, BuildError> {
    if params.data.is_empty() {
        session.image = None;
        return Ok(GenerateOutcome::EmptyPayload);
    }

    match build_qr(params) {
        Ok(png) => {
            session.image = Some(GeneratedImage::new(png));
            Ok(GenerateOutcome::Generated)
        }
        Err(BuildError::Encode(err)) => {
            tracing::warn!(len = params.data.len(), tier = ?params.tier, "payload rejected: {err}");
            session.image = None;
            Ok(GenerateOutcome::Rejected(err.to_string()))
        }
        Err(err) => Err(err),
    }
}

/// What the page offers for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub image: GeneratedImage,
}

/// Runs on every render: a populated session exposes its image.
pub fn display(session: &SessionState) -> Option<Download> {
    session.image.clone().map(|image| Download {
        file_name: DOWNLOAD_FILE_NAME,
        mime: PNG_MIME,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GenerateForm;
    use crate::theme::Theme;

    fn happy_params() -> QrParams {
        GenerateForm::defaults(Theme::Dark).collect().unwrap()
    }

    #[test]
    fn default_happy_path_offers_png_download() {
        let mut session = SessionState::default();
        let outcome = on_generate(&mut session, &happy_params()).unwrap();
        assert_eq!(outcome, GenerateOutcome::Generated);

        let download = display(&session).expect("download offered");
        assert_eq!(download.file_name, "qr_code.png");
        assert_eq!(download.mime, "image/png");
        assert!(!download.image.bytes().is_empty());
    }

    #[test]
    fn empty_payload_clears_previous_image() {
        let mut session = SessionState::default();
        on_generate(&mut session, &happy_params()).unwrap();
        assert!(display(&session).is_some());

        let empty = QrParams {
            data: String::new(),
            ..happy_params()
        };
        assert_eq!(on_generate(&mut session, &empty).unwrap(), GenerateOutcome::EmptyPayload);
        assert!(session.image.is_none());
        assert!(display(&session).is_none());
    }

    #[test]
    fn identical_params_give_identical_bytes() {
        let mut a = SessionState::default();
        let mut b = SessionState::default();
        on_generate(&mut a, &happy_params()).unwrap();
        on_generate(&mut b, &happy_params()).unwrap();
        assert_eq!(a.image, b.image);
    }

    #[test]
    fn rejected_payload_clears_image() {
        let mut session = SessionState::default();
        on_generate(&mut session, &happy_params()).unwrap();

        let huge = QrParams {
            data: "z".repeat(8000),
            ..happy_params()
        };
        let outcome = on_generate(&mut session, &huge).unwrap();
        assert!(matches!(outcome, GenerateOutcome::Rejected(_)));
        assert!(session.image.is_none());
    }

    #[test]
    fn theme_is_not_touched_by_generation() {
        let mut session = SessionState::default();
        session.theme = Theme::Light;
        on_generate(&mut session, &happy_params()).unwrap();
        assert_eq!(session.theme, Theme::Light);
    }
}
