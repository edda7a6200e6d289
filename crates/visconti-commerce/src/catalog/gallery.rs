//! Physical menu photo gallery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ImageId;

/// A photo of the printed menu, from `GET /api/images`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    #[serde(rename = "_id")]
    pub id: ImageId,
    pub image_url: String,
    #[serde(default)]
    pub category: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Sort images newest first, the order the gallery shows them in.
pub fn newest_first(images: &mut [GalleryImage]) {
    images.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
}
