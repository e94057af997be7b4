//! Certificate raster capture.
//!
//! Lays the certificate out right-to-left on a fixed grid of layout pixels
//! and rasterizes it, text included, at [`CAPTURE_SCALE`] times that
//! resolution.

use image::{
    DynamicImage, Rgb, RgbImage,
    imageops::{self, FilterType},
};
use tracing::warn;

use crate::domain::{
    certificates::records::CertificateRecord,
    export::{
        errors::ExportError,
        text::{Align, Placement, Typeface, Weight},
    },
    issuance::qr,
};

/// Device pixels per layout pixel.
pub const CAPTURE_SCALE: u32 = 2;

const WIDTH: u32 = 480;
const PADDING: u32 = 24;
const GAP: u32 = 16;
const HEADER_HEIGHT: u32 = 72;
const PHOTO_WIDTH: u32 = 120;
const PHOTO_HEIGHT: u32 = 150;
const ROW_HEIGHT: u32 = 26;
const QR_SIZE: u32 = 150;
const FIELD_COUNT: u32 = 14;
const LABEL_WIDTH: u32 = 128;
const CELL_INSET: u32 = 6;

const TITLE: &str = "الشهادة الصحية الموحدة";
const SUBTITLE: &str = "Unified Health Certificate";
const SCAN_HINT: &str = "امسح الرمز للتحقق من صحة الشهادة";

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const HEADER: Rgb<u8> = Rgb([15, 118, 110]);
const HEADER_ACCENT: Rgb<u8> = Rgb([20, 184, 166]);
const FRAME: Rgb<u8> = Rgb([203, 213, 225]);
const PLACEHOLDER: Rgb<u8> = Rgb([241, 245, 249]);
const ROW_EVEN: Rgb<u8> = Rgb([248, 250, 252]);
const ROW_ODD: Rgb<u8> = Rgb([236, 253, 245]);
const PANEL: Rgb<u8> = Rgb([240, 253, 250]);
const TITLE_INK: Rgb<u8> = Rgb([255, 255, 255]);
const SUBTITLE_INK: Rgb<u8> = Rgb([204, 251, 241]);
const LABEL_INK: Rgb<u8> = Rgb([75, 85, 99]);
const VALUE_INK: Rgb<u8> = Rgb([17, 24, 39]);
const LINK_INK: Rgb<u8> = Rgb([15, 118, 110]);

/// A rectangle in capture pixels, measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Area {
    const fn layout(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x: x * CAPTURE_SCALE,
            y: y * CAPTURE_SCALE,
            width: width * CAPTURE_SCALE,
            height: height * CAPTURE_SCALE,
        }
    }

    /// A text line inside this area. `baseline` and `size` are in layout
    /// pixels, the baseline measured from the top of the area.
    fn line(self, baseline: u32, size: u32, align: Align) -> Placement {
        let x = match align {
            Align::Left => self.x,
            Align::Right => self.x + self.width,
        };

        Placement {
            x: coordinate(x),
            baseline: coordinate(self.y + baseline * CAPTURE_SCALE),
            size: coordinate(size * CAPTURE_SCALE),
            max_width: coordinate(self.width),
            align,
        }
    }
}

fn coordinate(value: u32) -> f32 {
    f32::from(u16::try_from(value).unwrap_or(u16::MAX))
}

/// One labelled value row of the capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub label: &'static str,
    pub value: String,
    pub area: Area,
}

/// A rasterized certificate.
#[derive(Debug, Clone)]
pub struct Capture {
    pub image: RgbImage,
    pub header: Area,
    pub qr_code: Area,
    pub panel: Area,
    pub rows: Vec<FieldRow>,
}

/// Printed fields in display order, [`FIELD_COUNT`] of them.
fn field_rows(record: &CertificateRecord) -> [(&'static str, String); FIELD_COUNT as usize] {
    let details = &record.details;

    [
        ("الاسم", details.name.clone()),
        ("رقم الهوية", details.id_number.clone()),
        ("الجنسية", details.nationality.clone()),
        ("المهنة", details.profession.clone()),
        ("الجنس", details.gender.label().to_string()),
        ("رقم الشهادة الصحية", details.certificate_number.clone()),
        ("تاريخ إصدار الشهادة الصحية", details.issue_date.clone()),
        ("تاريخ نهاية الشهادة الصحية", details.expiry_date.clone()),
        ("نوع البرنامج التفتيش", details.program_type.clone()),
        ("تاريخ انتهاء البرنامج التفتيش", details.program_end_date.clone()),
        ("اسم المنشأة", details.facility_name.clone()),
        ("رقم المنشأة", details.facility_number.clone()),
        ("رقم الرخصة", details.license_number.clone()),
        ("البلدية", details.municipality.clone()),
    ]
}

/// Rasterize `record`.
///
/// `photo` is the stored photo, if it could be fetched; an unreadable photo
/// is replaced by a placeholder. The QR code is regenerated from
/// `verification_url`.
///
/// # Errors
///
/// Returns an error when the QR code cannot be generated or the bundled
/// fonts cannot be loaded.
pub fn capture(
    record: &CertificateRecord,
    photo: Option<&[u8]>,
    verification_url: &str,
) -> Result<Capture, ExportError> {
    let regular = Typeface::load(Weight::Regular)?;
    let bold = Typeface::load(Weight::Bold)?;

    let fields = field_rows(record);
    let rows_top = HEADER_HEIGHT + GAP;
    let rows_x = PADDING + PHOTO_WIDTH + GAP;
    let rows_width = WIDTH - rows_x - PADDING;
    let rows_height = ROW_HEIGHT * FIELD_COUNT;
    let qr_top = rows_top + rows_height.max(PHOTO_HEIGHT) + GAP;
    let height = qr_top + QR_SIZE + PADDING;

    let mut image = RgbImage::from_pixel(WIDTH * CAPTURE_SCALE, height * CAPTURE_SCALE, BACKGROUND);

    let header = Area::layout(0, 0, WIDTH, HEADER_HEIGHT);
    fill(&mut image, header, HEADER);
    fill(&mut image, Area::layout(0, HEADER_HEIGHT - 4, WIDTH, 4), HEADER_ACCENT);

    let header_text = Area::layout(PADDING, 0, WIDTH - 2 * PADDING, HEADER_HEIGHT);
    bold.draw(
        &mut image,
        TITLE,
        header_text.line(38, 20, Align::Right),
        TITLE_INK,
    );
    regular.draw(
        &mut image,
        SUBTITLE,
        header_text.line(58, 10, Align::Right),
        SUBTITLE_INK,
    );

    let photo_area = Area::layout(PADDING, rows_top, PHOTO_WIDTH, PHOTO_HEIGHT);
    draw_photo(&mut image, photo_area, photo);

    let rows = fields
        .into_iter()
        .zip(0_u32..)
        .map(|((label, value), index)| {
            let area = Area::layout(rows_x, rows_top + index * ROW_HEIGHT, rows_width, ROW_HEIGHT);

            fill(&mut image, area, if index % 2 == 0 { ROW_EVEN } else { ROW_ODD });

            let label_cell = Area::layout(
                rows_x + rows_width - LABEL_WIDTH,
                rows_top + index * ROW_HEIGHT,
                LABEL_WIDTH - CELL_INSET,
                ROW_HEIGHT,
            );
            let value_cell = Area::layout(
                rows_x + CELL_INSET,
                rows_top + index * ROW_HEIGHT,
                rows_width - LABEL_WIDTH - 2 * CELL_INSET,
                ROW_HEIGHT,
            );

            regular.draw(&mut image, label, label_cell.line(17, 9, Align::Right), LABEL_INK);
            bold.draw(&mut image, &value, value_cell.line(17, 10, Align::Right), VALUE_INK);

            FieldRow { label, value, area }
        })
        .collect();

    let qr_code = Area::layout(PADDING, qr_top, QR_SIZE, QR_SIZE);
    let code = qr::render(verification_url, qr_code.width)?;
    let code = imageops::resize(
        &DynamicImage::ImageLuma8(code).to_rgb8(),
        qr_code.width,
        qr_code.height,
        FilterType::Nearest,
    );
    imageops::replace(&mut image, &code, i64::from(qr_code.x), i64::from(qr_code.y));

    let panel_x = PADDING + QR_SIZE + GAP;
    let panel = Area::layout(panel_x, qr_top, WIDTH - panel_x - PADDING, QR_SIZE);
    fill(&mut image, panel, PANEL);

    let panel_text = Area::layout(
        panel_x + CELL_INSET,
        qr_top,
        WIDTH - panel_x - PADDING - 2 * CELL_INSET,
        QR_SIZE,
    );
    regular.draw(&mut image, SCAN_HINT, panel_text.line(32, 11, Align::Right), VALUE_INK);
    bold.draw(
        &mut image,
        &record.details.certificate_number,
        panel_text.line(60, 12, Align::Right),
        VALUE_INK,
    );
    regular.draw(&mut image, verification_url, panel_text.line(132, 7, Align::Left), LINK_INK);

    Ok(Capture {
        image,
        header,
        qr_code,
        panel,
        rows,
    })
}

fn draw_photo(canvas: &mut RgbImage, area: Area, photo: Option<&[u8]>) {
    outline(canvas, area, FRAME);

    let inner = Area {
        x: area.x + CAPTURE_SCALE,
        y: area.y + CAPTURE_SCALE,
        width: area.width.saturating_sub(2 * CAPTURE_SCALE),
        height: area.height.saturating_sub(2 * CAPTURE_SCALE),
    };

    let decoded = photo.and_then(|bytes| {
        image::load_from_memory(bytes)
            .inspect_err(|error| warn!("unreadable certificate photo: {error}"))
            .ok()
    });

    match decoded {
        Some(photo) => {
            let fitted = photo
                .resize_to_fill(inner.width, inner.height, FilterType::Triangle)
                .to_rgb8();

            imageops::replace(canvas, &fitted, i64::from(inner.x), i64::from(inner.y));
        }
        None => fill(canvas, inner, PLACEHOLDER),
    }
}

fn fill(canvas: &mut RgbImage, area: Area, color: Rgb<u8>) {
    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
                *pixel = color;
            }
        }
    }
}

fn outline(canvas: &mut RgbImage, area: Area, color: Rgb<u8>) {
    let edge = CAPTURE_SCALE;
    let bottom = area.y + area.height.saturating_sub(edge);
    let right = area.x + area.width.saturating_sub(edge);

    fill(canvas, Area { height: edge, ..area }, color);
    fill(canvas, Area { y: bottom, height: edge, ..area }, color);
    fill(canvas, Area { width: edge, ..area }, color);
    fill(canvas, Area { x: right, width: edge, ..area }, color);
}
