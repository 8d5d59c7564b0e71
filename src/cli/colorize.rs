// `colorize` subcommand: upload a page to the relay and save the result
// Author: kelexine (https://github.com/kelexine)

use super::ColorizeArgs;
use crate::colorize::{ColorizerClient, UiState};
use crate::error::Result;
use crate::vision::{validate_upload, DataUrl, ImageFormat};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Colorize `args.input` and write the image; returns the path written.
///
/// Non-image files are rejected before anything is sent.
pub async fn run_colorize(args: &ColorizeArgs) -> Result<PathBuf> {
    let bytes = tokio::fs::read(&args.input).await?;
    let declared = ImageFormat::from_path(&args.input).map(|f| f.mime_type());
    let mime_type = validate_upload(&bytes, declared)?;

    let mut state = UiState::default();
    state.load_original(DataUrl::from_bytes(mime_type, &bytes))?;

    let client = ColorizerClient::new(&args.server, Duration::from_secs(args.timeout_secs))?;
    let image = client.colorize_session(&mut state).await?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, &image.mime_type));
    let decoded = image.decode()?;
    tokio::fs::write(&output, &decoded).await?;

    info!("Wrote {} ({} bytes)", output.display(), decoded.len());
    Ok(output)
}

/// `<dir>/<stem>_colorized.<ext>`, the extension following the returned media type.
pub fn default_output_path(input: &Path, mime_type: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("manga");
    let ext = ImageFormat::from_mime_type(mime_type)
        .map(|f| f.extension())
        .unwrap_or("png");
    input.with_file_name(format!("{}_colorized.{}", stem, ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/tmp/ch1/page01.jpg"), "image/png"),
            PathBuf::from("/tmp/ch1/page01_colorized.png")
        );
        assert_eq!(
            default_output_path(Path::new("page.png"), "image/jpeg"),
            PathBuf::from("page_colorized.jpg")
        );
        assert_eq!(
            default_output_path(Path::new("page.png"), "application/octet-stream"),
            PathBuf::from("page_colorized.png")
        );
    }
}
