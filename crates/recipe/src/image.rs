use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use base64::{Engine, engine::general_purpose::STANDARD};
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub ext: String,
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    pub fn file_name(&self) -> String {
        format!("photo.{}", self.ext)
    }
}

fn invalid(message: &'static str) -> foodgram_shared::Error {
    let mut errors = ValidationErrors::new();
    errors.add(
        "image",
        ValidationError::new("data_uri").with_message(message.into()),
    );

    errors.into()
}

/// Parse `data:image/<ext>;base64,<payload>`.
pub fn decode_data_uri(value: &str) -> foodgram_shared::Result<DecodedImage> {
    let Some((format, payload)) = value
        .strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(";base64,"))
    else {
        return Err(invalid("Expected a data:image/<ext>;base64 URI."));
    };

    let ext = format.to_ascii_lowercase();
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("Unsupported image extension."));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|_| invalid("Image payload is not valid base64."))?;

    if bytes.is_empty() {
        return Err(invalid("Image payload is empty."));
    }

    Ok(DecodedImage { ext, bytes })
}

/// Recipe photos on disk, `<root>/recipes/<recipe_id>/<version>/photo.<ext>`.
///
/// Every save writes a new version next to the current one. Which version
/// survives is decided by [`ImageStore::settle`] once the transaction is over.
#[derive(Debug, Clone)]
pub struct ImageStore {
    pub root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn recipe_dir(&self, recipe_id: &str) -> PathBuf {
        self.root.join("recipes").join(recipe_id)
    }

    /// Writes a new version and returns its path relative to the root.
    pub async fn stage(&self, recipe_id: &str, image: &DecodedImage) -> anyhow::Result<String> {
        let version = foodgram_shared::new_id().to_lowercase();
        let dir = self.recipe_dir(recipe_id).join(&version);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = image.file_name();
        tokio::fs::write(dir.join(&file_name), &image.bytes).await?;

        Ok(format!("recipes/{recipe_id}/{version}/{file_name}"))
    }

    /// A committed version replaces every other one, an uncommitted one is dropped.
    pub async fn settle(&self, recipe_id: &str, staged: Option<&str>, committed: bool) {
        let Some(path) = staged else {
            return;
        };

        let result = if committed {
            self.keep_only(recipe_id, path).await
        } else {
            self.discard(path).await
        };

        if let Err(err) = result {
            tracing::warn!(recipe = recipe_id, path, err = %err, "photo cleanup failed");
        }
    }

    async fn keep_only(&self, recipe_id: &str, path: &str) -> anyhow::Result<()> {
        let keep = version_of(path);
        let mut entries = tokio::fs::read_dir(self.recipe_dir(recipe_id)).await?;

        while let Some(entry) = entries.next_entry().await? {
            if Some(entry.file_name().as_os_str()) == keep.map(OsStr::new) {
                continue;
            }

            if entry.file_type().await?.is_dir() {
                tokio::fs::remove_dir_all(entry.path()).await?;
            } else {
                tokio::fs::remove_file(entry.path()).await?;
            }
        }

        Ok(())
    }

    async fn discard(&self, path: &str) -> anyhow::Result<()> {
        let Some(dir) = self.root.join(path).parent().map(Path::to_path_buf) else {
            return Ok(());
        };

        ignore_missing(tokio::fs::remove_dir_all(dir).await)
    }

    pub async fn remove(&self, recipe_id: &str) -> anyhow::Result<()> {
        ignore_missing(tokio::fs::remove_dir_all(self.recipe_dir(recipe_id)).await)
    }
}

/// `recipes/<id>/<version>/photo.<ext>` -> `<version>`
fn version_of(path: &str) -> Option<&str> {
    Path::new(path)
        .parent()
        .and_then(Path::file_name)
        .and_then(OsStr::to_str)
}

fn ignore_missing(result: std::io::Result<()>) -> anyhow::Result<()> {
    match result {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
        _ => Ok(()),
    }
}
