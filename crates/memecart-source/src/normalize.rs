//! Normalization from raw Imgflip types to [`memecart_core::CatalogItem`].

use std::collections::HashSet;

use memecart_core::CatalogItem;

use crate::error::SourceError;
use crate::types::ImgflipMeme;

/// Normalizes a raw [`ImgflipMeme`] into a [`CatalogItem`].
///
/// Surrounding whitespace is trimmed from the id and name.
///
/// # Errors
///
/// Returns [`SourceError::Normalization`] if the id or name is blank.
pub fn normalize_meme(meme: ImgflipMeme) -> Result<CatalogItem, SourceError> {
    let id = meme.id.trim().to_string();
    if id.is_empty() {
        return Err(SourceError::Normalization {
            id: meme.id,
            reason: "item id is blank".into(),
        });
    }

    let name = meme.name.trim().to_string();
    if name.is_empty() {
        return Err(SourceError::Normalization {
            id,
            reason: "item name is blank".into(),
        });
    }

    Ok(CatalogItem {
        id,
        name,
        image_ref: meme.url,
        width: meme.width,
        height: meme.height,
        box_count: meme.box_count,
    })
}

/// Normalizes a full listing, preserving order.
///
/// Items that fail normalization, and repeats of an id already seen, are
/// skipped with a warning rather than failing the whole catalog.
#[must_use]
pub fn normalize_catalog(memes: Vec<ImgflipMeme>) -> Vec<CatalogItem> {
    let mut seen = HashSet::with_capacity(memes.len());
    let mut items = Vec::with_capacity(memes.len());

    for meme in memes {
        match normalize_meme(meme) {
            Ok(item) => {
                if seen.insert(item.id.clone()) {
                    items.push(item);
                } else {
                    tracing::warn!(id = %item.id, "skipping duplicate catalog id");
                }
            }
            Err(e) => tracing::warn!(error = %e, "skipping catalog item"),
        }
    }

    items
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
