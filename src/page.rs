//! HTML rendering of the single page.

use std::fmt::Write as _;

use data_encoding::BASE64;

use crate::PAGE_TITLE;
use crate::generate::Download;
use crate::params::{EcTier, GenerateForm, BORDER_RANGE, MODULE_SIZE_RANGE};
use crate::theme::ThemeResolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn warning(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

pub struct PageContext<'a> {
    pub theme: ThemeResolution,
    pub form: &'a GenerateForm,
    pub notice: Option<Notice>,
    pub download: Option<Download>,
    pub portfolio_url: Option<&'a str>,
}

pub fn render(ctx: &PageContext<'_>) -> String {
    let form = ctx.form;
    let selected_tier = form.error_correction.parse::<EcTier>().unwrap_or_default();

    let mut tier_options = String::new();
    for tier in EcTier::ALL {
        let selected = if tier == selected_tier { " selected" } else { "" };
        let _ = write!(
            tier_options,
            r#"<option value="{}"{selected}>{}</option>"#,
            tier.letter(),
            tier.label()
        );
    }

    let notice = ctx
        .notice
        .as_ref()
        .map(|n| {
            let class = match n.kind {
                NoticeKind::Warning => "warning",
                NoticeKind::Error => "error",
            };
            format!(r#"<div class="notice {class}" role="alert">{}</div>"#, escape(&n.text))
        })
        .unwrap_or_default();

    let result = ctx
        .download
        .as_ref()
        .map(|d| {
            format!(
                r#"<div class="result">
  <img class="preview" src="data:{mime};base64,{data}" alt="Generated QR code">
  <a class="download" href="/{file}" download="{file}" type="{mime}">Download as PNG</a>
</div>"#,
                mime = d.mime,
                data = BASE64.encode(d.image.bytes()),
                file = d.file_name,
            )
        })
        .unwrap_or_default();

    let floating = ctx
        .portfolio_url
        .map(|url| {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener" class="floating-button">&#127760;</a>"#,
                escape(url)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{base}</style>
<style>{theme}</style>
</head>
<body>
<form class="layout" method="post" action="/generate">
<aside class="sidebar">
  <h2><code>Settings</code></h2>
  <div class="colors">
    <label>Fill color <input type="color" name="fill_color" value="{fill}"></label>
    <label>BG color <input type="color" name="back_color" value="{back}"></label>
  </div>
  <h3><code>Advanced</code></h3>
  <label>Error Correction <select name="error_correction">{tier_options}</select></label>
  <label>Box Size <input type="number" name="box_size" min="{box_min}" max="{box_max}" step="1" value="{box_size}" required></label>
  <label>Border <input type="number" name="border" min="{border_min}" max="{border_max}" step="1" value="{border}" required></label>
</aside>
<main>
  <div class="title-container">
    <h1 class="main-title">{title}</h1>
    <a href="/?theme={toggle}" class="theme-switcher-button">{toggle_label}</a>
  </div>
  <p>Enter data to encode and customize your QR code in the sidebar.</p>
  <input type="text" name="data" value="{data}" aria-label="Data to encode">
  <button type="submit" class="primary">Generate QR Code</button>
  {notice}
  {result}
</main>
</form>
{floating}
</body>
</html>
"#,
        title = PAGE_TITLE,
        base = BASE_CSS,
        theme = ctx.theme.style_sheet,
        fill = escape(&form.fill_color),
        back = escape(&form.back_color),
        box_min = MODULE_SIZE_RANGE.start(),
        box_max = MODULE_SIZE_RANGE.end(),
        box_size = form.box_size,
        border_min = BORDER_RANGE.start(),
        border_max = BORDER_RANGE.end(),
        border = form.border,
        toggle = ctx.theme.toggle_target,
        toggle_label = ctx.theme.effective.toggle_label(),
        data = escape(&form.data),
    )
}

/// Minimal escaping for text and double-quoted attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const BASE_CSS: &str = r#"
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 18rem; padding: 1.5rem; display: flex; flex-direction: column; gap: 0.75rem; }
.sidebar label { display: flex; flex-direction: column; gap: 0.25rem; }
.colors { display: flex; gap: 1rem; }
main { flex: 1; max-width: 46rem; margin: 0 auto; padding: 2rem; display: flex; flex-direction: column; gap: 1rem; }
.title-container { display: flex; align-items: center; gap: 16px; }
h1.main-title { font-size: 2.5rem; font-weight: 600; margin: 0; }
.theme-switcher-button { display: inline-block; padding: 8px 16px; border-radius: 8px; font-family: 'Courier New', Courier, monospace; font-size: 1.2rem; font-weight: bold; text-decoration: none; transition: background-color 0.3s ease; line-height: 1; }
input[type=text] { width: 100%; padding: 0.5rem; box-sizing: border-box; }
button.primary { width: 100%; padding: 0.6rem; border-radius: 0.25rem; cursor: pointer; font-family: monospace; }
.notice { padding: 0.75rem 1rem; border-radius: 0.25rem; }
.result { display: flex; flex-direction: column; gap: 1rem; }
.preview { width: 100%; height: auto; image-rendering: pixelated; }
a.download { padding: 0.5rem 1rem; border-radius: 0.25rem; text-decoration: none; text-align: center; }
.floating-button { position: fixed; width: 60px; height: 60px; bottom: 40px; right: 40px; color: white; border-radius: 50px; font-size: 24px; box-shadow: 2px 2px 6px rgba(0, 0, 0, 0.4); z-index: 100; display: flex; align-items: center; justify-content: center; text-decoration: none; transition: all 0.3s ease; }
.floating-button:hover { transform: scale(1.1); }
@media screen and (max-width: 768px) {
  .layout { flex-direction: column; }
  .sidebar { width: auto; }
  .floating-button { width: 50px; height: 50px; bottom: 20px; right: 20px; font-size: 20px; }
}
"#;
