//! Self-contained HTML pages for generated mind maps
//!
//! A page embeds the markdown in the markup `markmap-autoloader` scans for,
//! so the file renders on its own once served statically.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Last millisecond stamp handed out by [`next_filename`]
static LAST_STAMP: AtomicU64 = AtomicU64::new(0);

/// Attempts before giving up on finding a free filename
const MAX_NAME_ATTEMPTS: usize = 64;

/// Render the page for `markdown`, which is inlined verbatim
pub fn render(topic: &str, markdown: &str) -> String {
  format!(
    r#"<!DOCTYPE html>
<html>
<head>
    <title>Mind Map: {title}</title>
    <style>
        svg.markmap {{
            width: 100%;
            height: 100vh;
        }}
    </style>
    <script src="https://cdn.jsdelivr.net/npm/markmap-autoloader@0.16"></script>
</head>
<body>
    <div class="markmap">
        <script type="text/template">
{markdown}
        </script>
    </div>
</body>
</html>
"#,
    title = escape_html(topic),
  )
}

fn escape_html(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#39;"),
      _ => escaped.push(ch),
    }
  }
  escaped
}

fn now_millis() -> u64 {
  SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

/// Next millisecond stamp, strictly greater than any issued before in this process
fn next_stamp() -> u64 {
  let now = now_millis();
  let mut last = LAST_STAMP.load(Ordering::Relaxed);
  loop {
    let candidate = now.max(last + 1);
    match LAST_STAMP.compare_exchange_weak(last, candidate, Ordering::SeqCst, Ordering::Relaxed) {
      Ok(_) => return candidate,
      Err(actual) => last = actual,
    }
  }
}

/// `mindmap_<millis>.html`, unique within the process
pub fn next_filename() -> String {
  format!("mindmap_{}.html", next_stamp())
}

/// Writes rendered pages into an output directory
#[derive(Debug, Clone)]
pub struct PageWriter {
  output_dir: PathBuf,
}

impl PageWriter {
  pub fn new(output_dir: impl Into<PathBuf>) -> Self {
    Self { output_dir: output_dir.into() }
  }

  pub fn output_dir(&self) -> &Path {
    &self.output_dir
  }

  /// Write a page for `markdown` and return its filename
  ///
  /// Never overwrites: a name already taken on disk (say, by another process
  /// sharing the directory) moves on to the next stamp.
  pub async fn write(&self, topic: &str, markdown: &str) -> io::Result<String> {
    let output_dir = self.output_dir.clone();
    let html = render(topic, markdown);

    tokio::task::spawn_blocking(move || write_new(&output_dir, html.as_bytes()))
      .await
      .map_err(io::Error::other)?
  }
}

fn write_new(output_dir: &Path, contents: &[u8]) -> io::Result<String> {
  fs::create_dir_all(output_dir)?;

  for _ in 0..MAX_NAME_ATTEMPTS {
    let filename = next_filename();
    let path = output_dir.join(&filename);

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
      Ok(file) => file,
      Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
      Err(e) => return Err(e),
    };

    if let Err(e) = file.write_all(contents).and_then(|_| file.flush()) {
      let _ = fs::remove_file(&path);
      return Err(e);
    }

    return Ok(filename);
  }

  Err(io::Error::new(io::ErrorKind::AlreadyExists, "no free mind map filename"))
}
