// Upload/result state for one colorize session
// Author: kelexine (https://github.com/kelexine)

use crate::error::{ProxyError, Result};
use crate::models::ExtractedImage;
use crate::vision::DataUrl;

/// What the user has uploaded and what came back.
///
/// `is_processing` is advisory: it stops this session from starting a second
/// request but does not coordinate with anything else.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub original_image: Option<DataUrl>,
    pub colorized_image: Option<String>,
    pub is_processing: bool,
}

impl UiState {
    /// Replace the uploaded image and drop any previous result.
    pub fn load_original(&mut self, image: DataUrl) -> Result<()> {
        if self.is_processing {
            return Err(ProxyError::InvalidRequest(
                "A colorization is already in progress".to_string(),
            ));
        }
        self.original_image = Some(image);
        self.colorized_image = None;
        Ok(())
    }

    /// Mark a request as started and hand back the image to send.
    pub fn begin(&mut self) -> Result<DataUrl> {
        if self.is_processing {
            return Err(ProxyError::InvalidRequest(
                "A colorization is already in progress".to_string(),
            ));
        }
        let image = self
            .original_image
            .clone()
            .ok_or_else(|| ProxyError::InvalidRequest("No image uploaded".to_string()))?;
        self.is_processing = true;
        Ok(image)
    }

    pub fn complete(&mut self, image: &ExtractedImage) {
        self.colorized_image = Some(image.to_data_url());
        self.is_processing = false;
    }

    /// Return to idle after a failed request. The upload is kept for a retry.
    pub fn fail(&mut self) {
        self.is_processing = false;
    }

    /// "Colorize another": clear everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
