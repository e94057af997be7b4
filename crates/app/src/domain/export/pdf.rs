//! Single-page PDF assembly.

use image::codecs::jpeg::JpegEncoder;
use lopdf::{
    Dictionary, Document, Object, Stream, StringFormat,
    content::{Content, Operation},
    dictionary,
};

use crate::domain::{
    certificates::records::CertificateRecord,
    export::{
        capture::{Area, Capture},
        errors::ExportError,
    },
};

/// A4 page width in points (210 mm).
pub const PAGE_WIDTH: f64 = 595.28;

const JPEG_QUALITY: u8 = 92;
const TITLE: &str = "الشهادة الصحية الموحدة";

/// Maps capture pixels onto page points.
#[derive(Debug, Clone, Copy)]
struct Page {
    scale: f64,
    height: f64,
}

impl Page {
    fn for_capture(capture: &Capture) -> Self {
        let scale = PAGE_WIDTH / f64::from(capture.image.width().max(1));

        Self {
            scale,
            height: f64::from(capture.image.height()) * scale,
        }
    }

    /// `[left, bottom, right, top]` of `area` in page space.
    fn rect(self, area: Area) -> [f64; 4] {
        let left = f64::from(area.x) * self.scale;
        let top = self.height - f64::from(area.y) * self.scale;
        let right = left + f64::from(area.width) * self.scale;
        let bottom = top - f64::from(area.height) * self.scale;

        [left, bottom, right, top]
    }
}

/// Embed `capture` into a single-page PDF whose QR code links to
/// `verification_url`.
///
/// # Errors
///
/// Returns an error when the capture cannot be JPEG-encoded or the document
/// cannot be written.
pub fn render(
    capture: &Capture,
    record: &CertificateRecord,
    verification_url: &str,
) -> Result<Vec<u8>, ExportError> {
    let page = Page::for_capture(capture);
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&capture.image)?;

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(capture.image.width()),
            "Height" => i64::from(capture.image.height()),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    ));

    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! { "Im0" => image_id },
    });

    let content = Content {
        operations: page_operations(page),
    };
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

    let [left, bottom, right, top] = page.rect(capture.qr_code);
    let link_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![real(left), real(bottom), real(right), real(top)],
        "Border" => vec![0.into(), 0.into(), 0.into()],
        "A" => dictionary! {
            "S" => "URI",
            "URI" => Object::string_literal(verification_url),
        },
    });

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), real(PAGE_WIDTH), real(page.height)],
        "Contents" => content_id,
        "Resources" => resources_id,
        "Annots" => vec![link_id.into()],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });

    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(TITLE),
        "Subject" => text_string(&format!(
            "{} - {}",
            record.details.name, record.details.certificate_number
        )),
        "Creator" => Object::string_literal("healthcert"),
        "CreationDate" => Object::string_literal(
            record.created_at.strftime("D:%Y%m%d%H%M%SZ").to_string(),
        ),
    });

    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;

    Ok(bytes)
}

fn page_operations(page: Page) -> Vec<Operation> {
    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                real(PAGE_WIDTH),
                0.into(),
                0.into(),
                real(page.height),
                0.into(),
                0.into(),
            ],
        ),
        Operation::new("Do", vec!["Im0".into()]),
        Operation::new("Q", vec![]),
    ]
}

/// UTF-16BE text string with byte order mark.
fn text_string(value: &str) -> Object {
    let bytes = [0xFE, 0xFF]
        .into_iter()
        .chain(value.encode_utf16().flat_map(u16::to_be_bytes))
        .collect();

    Object::String(bytes, StringFormat::Hexadecimal)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "PDF reals are single precision"
)]
fn real(value: f64) -> Object {
    Object::Real(value as f32)
}
