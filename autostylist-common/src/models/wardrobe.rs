// File: autostylist-common/src/models/wardrobe.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::color::Color;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Top,
    Bottom,
    Shoes,
    Accessories,
    Jewellery,
    FullBody,
    Saree,
    Lehenga,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Top,
        Category::Bottom,
        Category::Shoes,
        Category::Accessories,
        Category::Jewellery,
        Category::FullBody,
        Category::Saree,
        Category::Lehenga,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Shoes => "shoes",
            Category::Accessories => "accessories",
            Category::Jewellery => "jewellery",
            Category::FullBody => "full_body",
            Category::Saree => "saree",
            Category::Lehenga => "lehenga",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Category::Top),
            "bottom" => Ok(Category::Bottom),
            "shoes" => Ok(Category::Shoes),
            "accessories" => Ok(Category::Accessories),
            "jewellery" => Ok(Category::Jewellery),
            "full_body" => Ok(Category::FullBody),
            "saree" => Ok(Category::Saree),
            "lehenga" => Ok(Category::Lehenga),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Casual,
    Formal,
    Party,
    Traditional,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Casual => "casual",
            Style::Formal => "formal",
            Style::Party => "party",
            Style::Traditional => "traditional",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "casual" => Ok(Style::Casual),
            "formal" => Ok(Style::Formal),
            "party" => Ok(Style::Party),
            "traditional" => Ok(Style::Traditional),
            _ => Err(format!("Unknown style: {}", s)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WardrobeItem {
    #[serde(alias = "_id")]
    pub id: String,
    pub category: Category,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub gender: Gender,
    pub image_path: String,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default)]
    pub preference_score: f64,
}

/// Item as embedded inside an outfit recommendation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WardrobeItemRef {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub image_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<Color>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WardrobeList {
    #[serde(default)]
    pub items: Vec<WardrobeItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WardrobeStats {
    pub total: u64,
    /// Keyed by the backend's category string.
    #[serde(default)]
    pub categories: BTreeMap<String, u64>,
}

impl WardrobeStats {
    pub fn count(&self, category: Category) -> u64 {
        self.categories.get(category.as_str()).copied().unwrap_or(0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UploadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Stored path, relative to the static root.
    pub image: String,
    #[serde(default)]
    pub colors: Vec<Color>,
}

/// Content types the upload endpoint accepts.
pub const ALLOWED_UPLOAD_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// An image ready to be sent as the `file` part of an upload.
#[derive(Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads an image from disk, inferring the content type from its extension.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::validation(format!("Not a file: {}", path.display())))?
            .to_string();
        let content_type = content_type_for(path)
            .ok_or_else(|| Error::validation("Only JPG, PNG, WEBP allowed"))?;
        let bytes = std::fs::read(path)?;
        Ok(Self::new(file_name, content_type, bytes))
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.bytes.is_empty() {
            return Err(Error::validation("Please select a file"));
        }
        if !ALLOWED_UPLOAD_TYPES.contains(&self.content_type.as_str()) {
            return Err(Error::validation("Only JPG, PNG, WEBP allowed"));
        }
        Ok(())
    }
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
