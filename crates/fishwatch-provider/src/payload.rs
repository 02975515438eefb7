//! Provider payload model and normalization.
//!
//! The provider body is modelled as an explicit [`ProviderPayload`]: either
//! a record is present at index 0 or it is absent. Nothing here indexes
//! into arrays directly.

use fishwatch_types::FishRecord;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ProviderError;

/// The first record of a provider response, with the fields we read.
///
/// Only presence is checked. A text field that is missing, `null`, or not
/// a string becomes an empty string in the normalized record, and a
/// gallery of any unexpected shape means no image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderSpecies {
    /// `"Species Name"`.
    #[serde(rename = "Species Name", default, deserialize_with = "lenient_text")]
    pub species_name: Option<String>,

    /// `"Physical Description"` (HTML fragment).
    #[serde(
        rename = "Physical Description",
        default,
        deserialize_with = "lenient_text"
    )]
    pub physical_description: Option<String>,

    /// `"Health Benefits"` (HTML fragment).
    #[serde(rename = "Health Benefits", default, deserialize_with = "lenient_text")]
    pub health_benefits: Option<String>,

    /// `"Image Gallery"`.
    #[serde(rename = "Image Gallery", default, deserialize_with = "lenient_gallery")]
    pub image_gallery: Option<ImageGallery>,
}

/// The `"Image Gallery"` field.
///
/// Usually an array of images, but some species carry a single image
/// object instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageGallery {
    /// An array of images; the first one is used.
    Many(Vec<ProviderImage>),
    /// A single image object.
    One(ProviderImage),
}

impl ImageGallery {
    /// Read a gallery out of an arbitrary JSON value.
    ///
    /// Arrays and objects are galleries; anything else is `None`. Array
    /// entries that are not image objects become empty images.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::Many(
                items.into_iter().map(ProviderImage::from_value).collect(),
            )),
            image @ Value::Object(_) => Some(Self::One(ProviderImage::from_value(image))),
            _ => None,
        }
    }

    /// The `src` of the first image, if there is a non-empty one.
    pub fn first_src(&self) -> Option<&str> {
        let first = match self {
            Self::Many(images) => images.first(),
            Self::One(image) => Some(image),
        };
        first
            .and_then(|image| image.src.as_deref())
            .filter(|src| !src.trim().is_empty())
    }
}

/// One entry of the image gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderImage {
    /// Absolute image URL.
    #[serde(default, deserialize_with = "lenient_text")]
    pub src: Option<String>,
    /// Alt text.
    #[serde(default, deserialize_with = "lenient_text")]
    pub alt: Option<String>,
    /// Caption.
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
}

impl ProviderImage {
    /// Read an image entry; a value that is not an object is an empty image.
    pub fn from_value(value: Value) -> Self {
        if value.is_object() {
            Self::deserialize(value).unwrap_or_default()
        } else {
            Self::default()
        }
    }
}

/// Keep a string value, drop anything else.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_gallery<'de, D>(deserializer: D) -> Result<Option<ImageGallery>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(ImageGallery::from_value(Value::deserialize(deserializer)?))
}

impl ProviderSpecies {
    /// Map provider field names onto the normalized record.
    pub fn into_record(self) -> FishRecord {
        let image = self
            .image_gallery
            .as_ref()
            .and_then(ImageGallery::first_src)
            .map(ToOwned::to_owned);

        FishRecord {
            species_name: self.species_name.unwrap_or_default(),
            physical_description: self.physical_description.unwrap_or_default(),
            health_benefits: self.health_benefits.unwrap_or_default(),
            image,
        }
    }
}

/// A decoded provider body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderPayload {
    /// The array had at least one record; this is index 0.
    Present(ProviderSpecies),
    /// `null`, an empty array, or a non-array value.
    Absent,
}

impl ProviderPayload {
    /// Decode a 200 response body.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Decode`] if the bytes are not JSON or the
    /// first array element is not a record-shaped object.
    pub fn from_slice(body: &[u8]) -> Result<Self, ProviderError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::Absent);
        }
        let value: Value =
            serde_json::from_slice(body).map_err(|e| ProviderError::Decode(e.to_string()))?;
        Self::from_value(value)
    }

    /// Decode an already-parsed body.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Decode`] if the first array element is not
    /// a record-shaped object.
    pub fn from_value(value: Value) -> Result<Self, ProviderError> {
        let Value::Array(items) = value else {
            return Ok(Self::Absent);
        };
        let Some(first) = items.into_iter().next() else {
            return Ok(Self::Absent);
        };
        if first.is_null() {
            return Ok(Self::Absent);
        }
        let species = ProviderSpecies::deserialize(first)
            .map_err(|e| ProviderError::Decode(format!("first record: {e}")))?;
        Ok(Self::Present(species))
    }

    /// Normalize into a record.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NoData`] when no record is present.
    pub fn into_record(self) -> Result<FishRecord, ProviderError> {
        match self {
            Self::Present(species) => Ok(species.into_record()),
            Self::Absent => Err(ProviderError::NoData),
        }
    }
}
