//! Imgflip API response types for the public `get_memes` endpoint.
//!
//! ## Observed shape
//!
//! ```json
//! {
//!   "success": true,
//!   "data": {
//!     "memes": [
//!       { "id": "181913649", "name": "Drake Hotline Bling",
//!         "url": "https://i.imgflip.com/30b1gx.jpg",
//!         "width": 1200, "height": 1200, "box_count": 2, "captions": 1234 }
//!     ]
//!   }
//! }
//! ```
//!
//! On failure the API answers HTTP 200 with `"success": false` and an
//! `error_message`, omitting `data`. Extra fields such as `captions` are
//! ignored.

use serde::Deserialize;

/// Top-level response from `GET /get_memes`.
#[derive(Debug, Deserialize)]
pub struct ImgflipResponse {
    pub success: bool,

    #[serde(default)]
    pub data: Option<ImgflipData>,

    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImgflipData {
    #[serde(default)]
    pub memes: Vec<ImgflipMeme>,
}

/// A single meme template as listed by Imgflip.
#[derive(Debug, Clone, Deserialize)]
pub struct ImgflipMeme {
    /// Imgflip template ID, a numeric string (e.g. `"181913649"`).
    pub id: String,

    pub name: String,

    /// Direct image URL.
    pub url: String,

    pub width: u32,

    pub height: u32,

    /// Number of caption boxes the template supports. Absent on some
    /// mirrors; defaults to `0`.
    #[serde(default)]
    pub box_count: u32,
}
