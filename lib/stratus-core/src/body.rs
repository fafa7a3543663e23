use std::io::Read;

use bytes::Bytes;
use headers::ContentType;
use serde::Serialize;

use crate::error::ApiClientError;

/// Represents the body of an HTTP request with its content type.
///
/// The JSON convenience constructor marshals a value and then goes through the
/// same generic path as [`CallBody::raw`]: the `Content-Type` header always comes
/// from the declared value, never from sniffing the bytes.
#[derive(Clone, derive_more::Debug)]
pub struct CallBody {
    pub(crate) content_type: ContentType,
    #[debug(ignore)]
    pub(crate) data: Bytes,
}

impl CallBody {
    /// Creates a JSON body from a serializable type.
    ///
    /// This method serializes the data as `application/json` using the `serde_json` crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use stratus_core::CallBody;
    /// # use serde::Serialize;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// #[derive(Serialize)]
    /// struct NewServer {
    ///     name: String,
    ///     flavor: String,
    /// }
    ///
    /// let server = NewServer {
    ///     name: "web-01".to_string(),
    ///     flavor: "s1.small".to_string(),
    /// };
    ///
    /// let body = CallBody::json(&server)?;
    /// assert_eq!(body.content_type().to_string(), "application/json");
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be marshaled.
    pub fn json<T>(t: &T) -> Result<Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_vec(t)?;
        Ok(Self::raw(data, ContentType::json()))
    }

    /// Creates a form-encoded body from a serializable type.
    ///
    /// This method serializes the data as `application/x-www-form-urlencoded`
    /// using the `serde_urlencoded` crate.
    ///
    /// # Errors
    ///
    /// Fails when the value is not a flat structure.
    pub fn form<T>(t: &T) -> Result<Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_urlencoded::to_string(t)
            .map_err(|e| ApiClientError::SerializationError {
                message: format!("Failed to serialize form data: {e}"),
            })?
            .into_bytes();

        Ok(Self::raw(data, ContentType::form_url_encoded()))
    }

    /// Creates a raw body with custom content type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stratus_core::CallBody;
    /// use headers::ContentType;
    ///
    /// // Send a disk image
    /// let image = vec![0x51, 0x46, 0x49, 0xFB];
    /// let body = CallBody::raw(image, ContentType::octet_stream());
    /// assert_eq!(body.data().len(), 4);
    /// ```
    pub fn raw(data: impl Into<Bytes>, content_type: ContentType) -> Self {
        Self {
            content_type,
            data: data.into(),
        }
    }

    /// Creates a raw body from a content type string, such as a multipart
    /// content type carrying its boundary.
    ///
    /// # Errors
    ///
    /// Fails when the content type is not a valid media type.
    pub fn with_content_type(
        data: impl Into<Bytes>,
        content_type: &str,
    ) -> Result<Self, ApiClientError> {
        let mime = content_type.parse::<mime::Mime>()?;
        Ok(Self::raw(data, ContentType::from(mime)))
    }

    /// Reads a whole byte stream into a body with the given content type.
    ///
    /// # Errors
    ///
    /// Fails when the reader fails.
    pub fn from_reader(
        mut reader: impl Read,
        content_type: ContentType,
    ) -> Result<Self, ApiClientError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::raw(data, content_type))
    }

    /// Creates a text body with text/plain content type.
    pub fn text(text: &str) -> Self {
        Self::raw(text.as_bytes().to_vec(), ContentType::text())
    }

    /// The declared content type.
    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// The encoded bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}
