//! Document decoding and page rasterization using lopdf.

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::{Bitmap, DocumentDecoder};
use crate::error::{DecodeError, RenderError};

/// US Letter in points, used when a page has no usable MediaBox.
const DEFAULT_MEDIA_BOX: (f32, f32) = (612.0, 792.0);

/// A PDF decoded by [`LopdfDecoder`].
pub struct LoadedPdf {
    document: Document,
}

/// Decoder that parses PDFs with lopdf.
///
/// lopdf does not interpret content streams, so a page is rasterized as a
/// white canvas the size of its MediaBox with the page's first decodable
/// image stretched over it. For scanned documents (the input the OCR
/// pipeline targets) that image is the page.
#[derive(Debug, Clone)]
pub struct LopdfDecoder {
    max_dimension: u32,
}

impl LopdfDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self {
            max_dimension: 8192,
        }
    }

    /// Set the largest canvas side in pixels.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Accept a parsed document, opening it with the empty password if it
    /// is encrypted.
    fn open(&self, mut doc: Document) -> Result<LoadedPdf, DecodeError> {
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(DecodeError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(DecodeError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(LoadedPdf { document: doc })
    }

    fn page_id(&self, doc: &Document, page: u32) -> Result<ObjectId, RenderError> {
        doc.get_pages()
            .get(&page)
            .copied()
            .ok_or(RenderError::InvalidPage(page))
    }

    fn canvas_size(&self, media_box: (f32, f32), scale: f32) -> Result<(u32, u32), RenderError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(RenderError::Canvas(format!("invalid scale {}", scale)));
        }

        let width = (media_box.0 * scale).round();
        let height = (media_box.1 * scale).round();
        let limit = self.max_dimension as f32;

        if width < 1.0 || height < 1.0 || width > limit || height > limit {
            return Err(RenderError::Canvas(format!(
                "{}x{} exceeds the {}px limit",
                width, height, self.max_dimension
            )));
        }

        Ok((width as u32, height as u32))
    }

    /// Width and height of the page in points, following the page tree for
    /// an inherited MediaBox.
    fn media_box(&self, doc: &Document, page_id: ObjectId) -> (f32, f32) {
        let rect = self
            .inherited_attribute(doc, page_id, b"MediaBox")
            .and_then(|obj| obj.as_array().ok())
            .and_then(|items| {
                let coords: Vec<f32> = items
                    .iter()
                    .filter_map(|o| doc.dereference(o).ok())
                    .filter_map(|(_, o)| o.as_float().ok())
                    .collect();
                (coords.len() == 4).then(|| {
                    (
                        (coords[2] - coords[0]).abs(),
                        (coords[3] - coords[1]).abs(),
                    )
                })
            });

        match rect {
            Some((w, h)) if w > 0.0 && h > 0.0 => (w, h),
            _ => {
                trace!("No usable MediaBox on page object {:?}, using Letter", page_id);
                DEFAULT_MEDIA_BOX
            }
        }
    }

    fn inherited_attribute<'a>(
        &self,
        doc: &'a Document,
        node_id: ObjectId,
        key: &[u8],
    ) -> Option<&'a Object> {
        let mut current = node_id;
        // Bounded walk, a malformed tree may loop.
        for _ in 0..32 {
            let dict = doc.get_object(current).ok()?.as_dict().ok()?;
            if let Ok(value) = dict.get(key) {
                return doc.dereference(value).ok().map(|(_, o)| o);
            }
            match dict.get(b"Parent") {
                Ok(Object::Reference(parent_id)) => current = *parent_id,
                _ => return None,
            }
        }
        None
    }

    fn page_resources<'a>(&self, doc: &'a Document, page_id: ObjectId) -> Option<&'a Dictionary> {
        self.inherited_attribute(doc, page_id, b"Resources")?
            .as_dict()
            .ok()
    }

    /// First decodable image XObject on the page.
    fn page_image(&self, doc: &Document, page_id: ObjectId) -> Option<DynamicImage> {
        let resources = self.page_resources(doc, page_id)?;
        let xobjects = resources.get(b"XObject").ok()?;
        let (_, xobjects) = doc.dereference(xobjects).ok()?;
        let xobjects = xobjects.as_dict().ok()?;

        xobjects.iter().find_map(|(name, obj_ref)| {
            let (_, obj) = doc.dereference(obj_ref).ok()?;
            let image = self.try_decode_image(doc, obj);
            if image.is_some() {
                trace!("Using image XObject /{}", String::from_utf8_lossy(name));
            }
            image
        })
    }

    fn try_decode_image(&self, doc: &Document, obj: &Object) -> Option<DynamicImage> {
        let Object::Stream(stream) = obj else {
            return None;
        };
        let dict = &stream.dict;

        if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
            return None;
        }

        let width = u32::try_from(dict.get(b"Width").ok()?.as_i64().ok()?).ok()?;
        let height = u32::try_from(dict.get(b"Height").ok()?.as_i64().ok()?).ok()?;

        if let Ok(filter) = dict.get(b"Filter") {
            let filter_name = match filter {
                Object::Name(name) => Some(name.as_slice()),
                Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
                _ => None,
            };

            match filter_name {
                Some(b"DCTDecode") => {
                    return image::load_from_memory_with_format(
                        &stream.content,
                        image::ImageFormat::Jpeg,
                    )
                    .ok();
                }
                Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
                    trace!("Skipping image with unsupported filter");
                    return None;
                }
                _ => {}
            }
        }

        let data = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());

        let color_space = dict
            .get(b"ColorSpace")
            .ok()
            .and_then(|o| match o {
                Object::Name(name) => Some(name.as_slice()),
                Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
                Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
                _ => None,
            })
            .unwrap_or(b"DeviceRGB");

        let bits = dict
            .get(b"BitsPerComponent")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(8);

        if bits != 8 {
            trace!("Unsupported bits per component: {}", bits);
            return None;
        }

        raw_to_rgba(&data, width, height, color_space).map(DynamicImage::ImageRgba8)
    }
}

/// Expand raw 8-bit gray or RGB samples into RGBA.
fn raw_to_rgba(data: &[u8], width: u32, height: u32, color_space: &[u8]) -> Option<RgbaImage> {
    let pixels = (width as usize).checked_mul(height as usize)?;
    let rgb_len = pixels.checked_mul(3)?;
    // RGBA output must be addressable too.
    pixels.checked_mul(4)?;

    let rgba: Vec<u8> = match color_space {
        b"DeviceRGB" | b"RGB" if data.len() >= rgb_len => data[..rgb_len]
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 255])
            .collect(),
        b"DeviceGray" | b"G" if data.len() >= pixels => data[..pixels]
            .iter()
            .flat_map(|&g| [g, g, g, 255])
            .collect(),
        _ => {
            trace!(
                "Could not decode image: colorspace={:?}, data_len={}",
                String::from_utf8_lossy(color_space),
                data.len()
            );
            return None;
        }
    };

    ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba)
}

impl Default for LopdfDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentDecoder for LopdfDecoder {
    type Document = LoadedPdf;

    fn load(&self, data: &[u8]) -> Result<LoadedPdf, DecodeError> {
        let doc = Document::load_mem(data).map_err(|e| DecodeError::Parse(e.to_string()))?;
        self.open(doc)
    }

    fn page_count(&self, document: &LoadedPdf) -> u32 {
        document.document.get_pages().len() as u32
    }

    fn rasterize(&self, document: &LoadedPdf, page: u32, scale: f32) -> Result<Bitmap, RenderError> {
        let doc = &document.document;
        let page_id = self.page_id(doc, page)?;
        let media_box = self.media_box(doc, page_id);
        let (width, height) = self.canvas_size(media_box, scale)?;

        let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

        match self.page_image(doc, page_id) {
            Some(image) => {
                let scaled = imageops::resize(&image.to_rgba8(), width, height, FilterType::Triangle);
                imageops::overlay(&mut canvas, &scaled, 0, 0);
                debug!("Rasterized page {} at {}x{} from page image", page, width, height);
            }
            None => {
                debug!("Rasterized page {} at {}x{} without page image", page, width, height);
            }
        }

        Ok(canvas)
    }
}
