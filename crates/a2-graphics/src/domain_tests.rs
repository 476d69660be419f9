//! Domain-critical regression tests for a2-graphics.
//!
//! These tests target the places where a conversion can look plausible and
//! still be wrong on real hardware. Each test documents the regression it
//! guards against.

#[cfg(test)]
mod domain_tests {
    use crate::api::Converter;
    use crate::codec::{DhgrFramebuffer, DHGR_HEIGHT, DHGR_WIDTH};
    use crate::color::{LumaStandard, Rgb};
    use crate::dither::{DitherKernel, DitherOptions};
    use crate::format::{read_a2fc, write_a2fc};
    use crate::image::RgbImage;
    use crate::optimize::{best_palette, line_distance};
    use crate::palette::{BuiltinPalette, ColorMetric, Palette};
    use crate::rle::{pack_bytes, singleton_bound, unpack_bytes};

    // ========================================================================
    // GAP 1: Black is all zero bits
    // ========================================================================

    /// If this breaks, it means: the double hi-res encoder is setting bits
    /// for palette index 0, so a black picture loads as colored noise.
    #[test]
    fn test_black_image_encodes_to_zero_banks() {
        let image = RgbImage::filled(DHGR_WIDTH, DHGR_HEIGHT, Rgb::BLACK);
        for kernel in [
            DitherKernel::FloydSteinberg,
            DitherKernel::Atkinson,
            DitherKernel::AtkinsonReduced,
            DitherKernel::Buckels { random: true },
        ] {
            let fb = Converter::new(BuiltinPalette::Tohgr.palette().into())
                .dither(Some(DitherOptions::new(kernel)))
                .dhgr(&image)
                .unwrap();
            assert!(
                fb.to_bytes().iter().all(|&b| b == 0),
                "REGRESSION: {kernel} put set bits into an all-black picture"
            );
            assert_eq!(fb.get_pixel(70, 100), Some(0));
        }
    }

    // ========================================================================
    // GAP 2: Every pixel survives a framebuffer round trip
    // ========================================================================

    /// If this breaks, it means: plotting one pixel clobbers bits that belong
    /// to a neighbour sharing the same byte, or the bank interleave is off.
    #[test]
    fn test_every_pixel_reads_back() {
        let mut fb = DhgrFramebuffer::new();
        let color = |x: usize, y: usize| ((x * 7 + y * 3) % 16) as u8;
        for y in 0..DHGR_HEIGHT {
            for x in 0..DHGR_WIDTH {
                fb.plot_pixel(x, y, color(x, y));
            }
        }
        let reloaded = read_a2fc(&write_a2fc(&fb)).unwrap();
        for y in 0..DHGR_HEIGHT {
            for x in 0..DHGR_WIDTH {
                assert_eq!(
                    reloaded.get_pixel(x, y),
                    Some(color(x, y)),
                    "REGRESSION: pixel ({x}, {y}) did not read back"
                );
            }
        }
    }

    // ========================================================================
    // GAP 3: PackBytes never grows past the literal bound
    // ========================================================================

    /// If this breaks, it means: the encoder is emitting runs that cost more
    /// than sending the line as literals, which overflows the per-line buffer
    /// sized for the literal fallback.
    #[test]
    fn test_packbytes_bound_and_inverse() {
        let lines: Vec<Vec<u8>> = vec![
            vec![0; 160],
            (0..160).map(|i| i as u8).collect(),
            (0..160).map(|i| (i / 2) as u8).collect(),
            (0..160).map(|i| ((i / 3) * 2 + usize::from(i % 3 != 0)) as u8).collect(),
            (0..160).map(|i| [0x11, 0x11, 0x11, 0x22][i % 4]).collect(),
        ];
        for line in lines {
            let packed = pack_bytes(&line);
            assert!(
                packed.len() <= singleton_bound(line.len()),
                "REGRESSION: packed {} bytes, bound is {}",
                packed.len(),
                singleton_bound(line.len())
            );
            assert_eq!(unpack_bytes(&packed, line.len()).unwrap(), line);
        }
    }

    // ========================================================================
    // GAP 4: Nearest color is deterministic and exact hits win
    // ========================================================================

    /// If this breaks, it means: identical inputs can map to different
    /// palette entries, or a color present in the palette is matched to a
    /// neighbour instead of itself.
    #[test]
    fn test_nearest_is_deterministic() {
        let metric = ColorMetric::default();
        for builtin in BuiltinPalette::ALL {
            let palette = builtin.palette();
            for (i, &entry) in palette.entries().iter().enumerate() {
                let hit = metric.nearest(entry, &palette);
                assert_eq!(hit.distance, 0.0);
                assert_eq!(palette.get(hit.index), entry);
                assert!(hit.index as usize <= i, "{builtin}: exact match not lowest index");
            }
            let probe = Rgb::new(90, 140, 30);
            assert_eq!(metric.nearest(probe, &palette), metric.nearest(probe, &palette));
        }
    }

    // ========================================================================
    // GAP 5: Error summing conserves the distributed error
    // ========================================================================

    /// If this breaks, it means: truncation residue is being dropped even
    /// with error summing on, so large flat areas drift darker or lighter.
    #[test]
    fn test_error_sum_conserves_total() {
        for kernel in [
            DitherKernel::FloydSteinberg,
            DitherKernel::Atkinson,
            DitherKernel::Buckels { random: false },
            DitherKernel::Buckels { random: true },
        ] {
            let k = kernel.kernel();
            for error in [-255, -97, -1, 0, 1, 13, 100, 255] {
                let split = k.split(error, 8, true);
                let spread: i32 = split.shares().iter().sum();
                assert_eq!(
                    spread + split.residual,
                    error,
                    "REGRESSION: {kernel} lost error for input {error}"
                );
            }
        }

        // The reduced Atkinson kernel carries exactly 6/8 of the error
        let reduced = DitherKernel::AtkinsonReduced.kernel();
        for error in [-255, -97, -1, 0, 1, 13, 100, 255] {
            let split = reduced.split(error, 8, true);
            let spread: i32 = split.shares().iter().sum();
            assert_eq!(
                spread + split.residual,
                error * 6 / 8,
                "REGRESSION: atkinson-reduced carried the wrong total for {error}"
            );
        }
    }

    // ========================================================================
    // GAP 6: Adding palettes never makes the best match worse
    // ========================================================================

    /// If this breaks, it means: the palette search is stopping early or
    /// keeping a later, worse candidate.
    #[test]
    fn test_palette_search_is_monotonic() {
        let metric = ColorMetric::default();
        let line: Vec<Rgb> = (0..320).map(|x| Rgb::new(x as u8, 255 - x as u8, 64)).collect();
        let mut pool: Vec<Palette> = Vec::new();
        let mut previous = f64::MAX;
        for builtin in BuiltinPalette::ALL {
            pool.push(builtin.palette());
            let best = best_palette(&metric, &line, &pool).unwrap();
            assert!(best.distance <= previous);
            assert_eq!(best.distance, line_distance(&metric, &line, &pool[best.index]));
            previous = best.distance;
        }
    }

    // ========================================================================
    // GAP 7: Luma weights change the nearest color
    // ========================================================================

    /// If this breaks, it means: the luma standard is not reaching the
    /// distance function, so every standard gives the same output.
    #[test]
    fn test_luma_standard_changes_choice() {
        let palette = BuiltinPalette::Kegs32.palette();
        let color = Rgb::new(10, 40, 100);
        let bt601 = ColorMetric::new(LumaStandard::Bt601.coefficients());
        let bt709 = ColorMetric::new(LumaStandard::Bt709.coefficients());
        assert_eq!(bt601.nearest(color, &palette).index, 2);
        assert_eq!(bt709.nearest(color, &palette).index, 6);
    }
}
