//! Region extraction: apply a mask to a source raster and cut the
//! masked region out along its tight bounding box.
//!
//! The two operations are independent and composable: `mask_apply`
//! keeps source pixels under the mask, `bounding_box_of` reduces a mask
//! to the tightest rectangle around its filled pixels, and `crop`
//! slices that rectangle out of any same-scene raster (typically the
//! grayscale original handed onward to text recognition).

use image::{GrayImage, ImageBuffer, Pixel};

use crate::types::{BoundingBox, Dimensions, LocateError};

/// Keep source pixels where the mask is 255 and zero all others.
///
/// Works on any pixel layout with `u8` samples, so the output channel
/// count always matches the source's. The source is never modified.
///
/// # Errors
///
/// Returns [`LocateError::DimensionMismatch`] when source and mask
/// dimensions differ.
pub fn mask_apply<P>(
    source: &ImageBuffer<P, Vec<u8>>,
    mask: &GrayImage,
) -> Result<ImageBuffer<P, Vec<u8>>, LocateError>
where
    P: Pixel<Subpixel = u8>,
{
    if source.dimensions() != mask.dimensions() {
        return Err(LocateError::DimensionMismatch {
            raster: Dimensions {
                width: source.width(),
                height: source.height(),
            },
            mask: Dimensions {
                width: mask.width(),
                height: mask.height(),
            },
        });
    }

    let mut masked = source.clone();
    for (col, row, pixel) in masked.enumerate_pixels_mut() {
        if mask.get_pixel(col, row).0[0] != 255 {
            *pixel = pixel.map(|_| 0);
        }
    }
    Ok(masked)
}

/// Tightest axis-aligned rectangle enclosing every 255-valued pixel of
/// the mask.
///
/// # Errors
///
/// Returns [`LocateError::EmptyMask`] when no pixel equals 255. With a
/// mask produced from a successfully selected polygon this indicates a
/// logic error upstream, but the condition is still reported rather
/// than asserted.
pub fn bounding_box_of(mask: &GrayImage) -> Result<BoundingBox, LocateError> {
    let mut bounds: Option<BoundingBox> = None;

    for (col, row, pixel) in mask.enumerate_pixels() {
        if pixel.0[0] != 255 {
            continue;
        }
        bounds = Some(match bounds {
            None => BoundingBox {
                row_min: row,
                col_min: col,
                row_max: row,
                col_max: col,
            },
            Some(b) => BoundingBox {
                row_min: b.row_min.min(row),
                col_min: b.col_min.min(col),
                row_max: b.row_max.max(row),
                col_max: b.col_max.max(col),
            },
        });
    }

    bounds.ok_or(LocateError::EmptyMask)
}

/// Slice the inclusive bounding box out of a source raster.
///
/// # Errors
///
/// Returns [`LocateError::OutOfBounds`] when the box extends past the
/// raster's edge or is internally inconsistent (`min > max`). Boxes
/// derived from a same-sized mask always fit, but box and source are
/// independently supplied in general use, so the check is made
/// unconditionally.
pub fn crop<P>(
    source: &ImageBuffer<P, Vec<u8>>,
    bounds: &BoundingBox,
) -> Result<ImageBuffer<P, Vec<u8>>, LocateError>
where
    P: Pixel<Subpixel = u8>,
{
    if bounds.row_min > bounds.row_max
        || bounds.col_min > bounds.col_max
        || bounds.row_max >= source.height()
        || bounds.col_max >= source.width()
    {
        return Err(LocateError::OutOfBounds {
            bounds: *bounds,
            raster: Dimensions {
                width: source.width(),
                height: source.height(),
            },
        });
    }

    Ok(ImageBuffer::from_fn(
        bounds.width(),
        bounds.height(),
        |col, row| *source.get_pixel(bounds.col_min + col, bounds.row_min + row),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn mask_with_rect(rows: (u32, u32), cols: (u32, u32)) -> GrayImage {
        let mut mask = GrayImage::new(20, 20);
        for row in rows.0..=rows.1 {
            for col in cols.0..=cols.1 {
                mask.put_pixel(col, row, image::Luma([255]));
            }
        }
        mask
    }

    // --- mask_apply ---

    #[test]
    #[allow(clippy::unwrap_used)]
    fn mask_apply_keeps_only_masked_pixels() {
        let source = GrayImage::from_pixel(20, 20, image::Luma([200]));
        let mask = mask_with_rect((5, 8), (3, 10));

        let masked = mask_apply(&source, &mask).unwrap();
        for (col, row, pixel) in masked.enumerate_pixels() {
            let inside = (5..=8).contains(&row) && (3..=10).contains(&col);
            assert_eq!(pixel.0[0], if inside { 200 } else { 0 });
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn mask_apply_preserves_color_channels() {
        let source = RgbImage::from_pixel(20, 20, image::Rgb([10, 20, 30]));
        let mask = mask_with_rect((2, 4), (2, 4));

        let masked = mask_apply(&source, &mask).unwrap();
        assert_eq!(masked.get_pixel(3, 3), &image::Rgb([10, 20, 30]));
        assert_eq!(masked.get_pixel(10, 10), &image::Rgb([0, 0, 0]));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn mask_apply_is_idempotent() {
        let source = GrayImage::from_pixel(20, 20, image::Luma([77]));
        let mask = mask_with_rect((5, 9), (5, 9));

        let once = mask_apply(&source, &mask).unwrap();
        let twice = mask_apply(&once, &mask).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn mask_apply_rejects_dimension_mismatch() {
        let source = GrayImage::new(10, 10);
        let mask = GrayImage::new(12, 10);
        let result = mask_apply(&source, &mask);
        assert!(matches!(result, Err(LocateError::DimensionMismatch { .. })));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn mask_apply_does_not_mutate_source() {
        let source = GrayImage::from_pixel(8, 8, image::Luma([50]));
        let mask = GrayImage::new(8, 8); // nothing kept
        let masked = mask_apply(&source, &mask).unwrap();
        assert!(masked.pixels().all(|p| p.0[0] == 0));
        assert!(source.pixels().all(|p| p.0[0] == 50));
    }

    // --- bounding_box_of ---

    #[test]
    #[allow(clippy::unwrap_used)]
    fn bounding_box_is_tight() {
        let mask = mask_with_rect((5, 12), (3, 17));
        let bounds = bounding_box_of(&mask).unwrap();
        assert_eq!(
            bounds,
            BoundingBox {
                row_min: 5,
                col_min: 3,
                row_max: 12,
                col_max: 17,
            },
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn bounding_box_of_single_pixel() {
        let mut mask = GrayImage::new(20, 20);
        mask.put_pixel(7, 11, image::Luma([255]));
        let bounds = bounding_box_of(&mask).unwrap();
        assert_eq!(
            bounds,
            BoundingBox {
                row_min: 11,
                col_min: 7,
                row_max: 11,
                col_max: 7,
            },
        );
        assert_eq!(bounds.width(), 1);
        assert_eq!(bounds.height(), 1);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn bounding_box_spans_disconnected_regions() {
        let mut mask = GrayImage::new(20, 20);
        mask.put_pixel(2, 3, image::Luma([255]));
        mask.put_pixel(15, 18, image::Luma([255]));
        let bounds = bounding_box_of(&mask).unwrap();
        assert_eq!(
            bounds,
            BoundingBox {
                row_min: 3,
                col_min: 2,
                row_max: 18,
                col_max: 15,
            },
        );
    }

    #[test]
    fn empty_mask_is_an_error() {
        let result = bounding_box_of(&GrayImage::new(20, 20));
        assert!(matches!(result, Err(LocateError::EmptyMask)));
    }

    #[test]
    fn partial_values_do_not_count_as_filled() {
        let mut mask = GrayImage::new(10, 10);
        mask.put_pixel(4, 4, image::Luma([128]));
        let result = bounding_box_of(&mask);
        assert!(matches!(result, Err(LocateError::EmptyMask)));
    }

    // --- crop ---

    #[test]
    #[allow(clippy::unwrap_used)]
    fn crop_extracts_inclusive_box() {
        let source = GrayImage::from_fn(20, 20, |col, row| image::Luma([(row * 20 + col) as u8]));
        let bounds = BoundingBox {
            row_min: 5,
            col_min: 3,
            row_max: 12,
            col_max: 17,
        };

        let cropped = crop(&source, &bounds).unwrap();
        assert_eq!(cropped.dimensions(), (15, 8));
        assert_eq!(cropped.get_pixel(0, 0), source.get_pixel(3, 5));
        assert_eq!(cropped.get_pixel(14, 7), source.get_pixel(17, 12));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn crop_of_full_raster_is_identity() {
        let source = GrayImage::from_fn(6, 4, |col, row| image::Luma([(row * 6 + col) as u8]));
        let bounds = BoundingBox {
            row_min: 0,
            col_min: 0,
            row_max: 3,
            col_max: 5,
        };
        assert_eq!(crop(&source, &bounds).unwrap(), source);
    }

    #[test]
    fn crop_rejects_out_of_bounds_box() {
        let source = GrayImage::new(10, 10);
        let bounds = BoundingBox {
            row_min: 5,
            col_min: 5,
            row_max: 10,
            col_max: 9,
        };
        let result = crop(&source, &bounds);
        assert!(matches!(result, Err(LocateError::OutOfBounds { .. })));
    }

    #[test]
    fn crop_rejects_inverted_box() {
        let source = GrayImage::new(10, 10);
        let bounds = BoundingBox {
            row_min: 8,
            col_min: 2,
            row_max: 4,
            col_max: 6,
        };
        let result = crop(&source, &bounds);
        assert!(matches!(result, Err(LocateError::OutOfBounds { .. })));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn crop_works_on_color_rasters() {
        let source = RgbImage::from_pixel(10, 10, image::Rgb([1, 2, 3]));
        let bounds = BoundingBox {
            row_min: 2,
            col_min: 3,
            row_max: 5,
            col_max: 7,
        };
        let cropped = crop(&source, &bounds).unwrap();
        assert_eq!(cropped.dimensions(), (5, 4));
        assert_eq!(cropped.get_pixel(0, 0), &image::Rgb([1, 2, 3]));
    }

    // --- composition ---

    #[test]
    #[allow(clippy::unwrap_used)]
    fn cropped_mask_is_fully_filled_at_its_own_extent() {
        // Re-deriving the box from the cropped mask covers the whole
        // crop: no padding beyond the rectangle survives.
        let mask = mask_with_rect((5, 12), (3, 17));
        let bounds = bounding_box_of(&mask).unwrap();
        let cropped = crop(&mask, &bounds).unwrap();
        assert!(cropped.pixels().all(|p| p.0[0] == 255));

        let rebounds = bounding_box_of(&cropped).unwrap();
        assert_eq!(rebounds.width(), bounds.width());
        assert_eq!(rebounds.height(), bounds.height());
        assert_eq!(rebounds.row_min, 0);
        assert_eq!(rebounds.col_min, 0);
    }
}
