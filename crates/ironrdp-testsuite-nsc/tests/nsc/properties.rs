use ironrdp_nsc::color_conversion::ycocg_to_bgra_pixel;
use ironrdp_nsc::color_loss::expand_sample;
use ironrdp_nsc::{pad2, pad8, rle, NscDecoder, Plane, PlaneSizes};
use ironrdp_testsuite_nsc::{rle_encode, NscMessageBuilder};
use proptest::array::uniform4;
use proptest::collection::vec;
use proptest::prelude::*;

/// Plane contents with few distinct values, so that runs show up.
fn plane_samples(len: impl Into<proptest::collection::SizeRange>) -> impl Strategy<Value = Vec<u8>> {
    vec(prop_oneof![3 => 0u8..4, 1 => any::<u8>()], len)
}

fn cycled(pattern: &[u8], len: usize) -> Vec<u8> {
    pattern.iter().copied().cycle().take(len).collect()
}

#[derive(Debug)]
struct Image {
    width: usize,
    height: usize,
    chroma_subsampling: bool,
    color_loss_level: u8,
    planes: [Vec<u8>; 4],
}

impl Image {
    fn message(&self) -> Vec<u8> {
        Plane::ALL
            .into_iter()
            .fold(NscMessageBuilder::new(), |builder, plane| {
                builder.samples(plane, &self.planes[plane.index()])
            })
            .color_loss_level(self.color_loss_level)
            .chroma_subsampling(self.chroma_subsampling)
            .build()
    }

    /// Computes every pixel directly from the plane samples it depends on.
    fn expected_bitmap(&self) -> Vec<u8> {
        let [y, co, cg, alpha] = &self.planes;
        let mut bitmap = Vec::new();

        for row in 0..self.height {
            for col in 0..self.width {
                let (luma_idx, chroma_idx) = if self.chroma_subsampling {
                    let luma_width = pad8(self.width);
                    (row * luma_width + col, (row / 2) * (luma_width / 2) + col / 2)
                } else {
                    (row * self.width + col, row * self.width + col)
                };

                bitmap.extend_from_slice(&ycocg_to_bgra_pixel(
                    y[luma_idx],
                    expand_sample(co[chroma_idx], self.color_loss_level),
                    expand_sample(cg[chroma_idx], self.color_loss_level),
                    alpha[row * self.width + col],
                ));
            }
        }

        bitmap
    }
}

fn image() -> impl Strategy<Value = Image> {
    (1u16..40, 1u16..40, any::<bool>(), 1u8..8, uniform4(plane_samples(1..48))).prop_map(
        |(width, height, chroma_subsampling, color_loss_level, patterns)| {
            let sizes = PlaneSizes::compute(width, height, chroma_subsampling).unwrap();
            let planes = Plane::ALL.map(|plane| cycled(&patterns[plane.index()], sizes.plane(plane)));

            Image {
                width: usize::from(width),
                height: usize::from(height),
                chroma_subsampling,
                color_loss_level,
                planes,
            }
        },
    )
}

proptest! {
    #[test]
    fn aligned_width_has_no_padding(width in (1usize..=128).prop_map(|n| n * 8), height in 1u16..=512) {
        let width = u16::try_from(width).unwrap();
        let pixels = usize::from(width) * usize::from(height);

        let sizes = PlaneSizes::compute(width, height, false).unwrap();
        prop_assert_eq!(sizes.row_padding(), 0);
        prop_assert_eq!(sizes.target, [pixels; 4]);
        prop_assert_eq!(sizes.bitmap, pixels * 4);

        let sizes = PlaneSizes::compute(width, height, true).unwrap();
        prop_assert_eq!(sizes.row_padding(), 0);
        prop_assert_eq!(sizes.plane(Plane::Y), pixels);
        prop_assert_eq!(sizes.plane(Plane::Alpha), pixels);
    }

    #[test]
    fn subsampled_chroma_covers_padded_image(width in 1u16..2048, height in 1u16..2048) {
        let (w, h) = (usize::from(width), usize::from(height));

        let sizes = PlaneSizes::compute(width, height, true).unwrap();

        prop_assert_eq!(sizes.plane(Plane::Y), pad8(w) * h);
        prop_assert_eq!(sizes.plane(Plane::Co) * 4, pad8(w) * pad2(h));
        prop_assert_eq!(sizes.plane(Plane::Cg), sizes.plane(Plane::Co));
        prop_assert_eq!(sizes.row_padding(), pad8(w) - w);
    }

    #[test]
    fn rle_encoded_plane_is_restored(samples in plane_samples(4..1024)) {
        let encoded = rle_encode(&samples);
        let mut dst = vec![0; samples.len()];

        let consumed = rle::decompress(&encoded, &mut dst).unwrap();

        prop_assert_eq!(consumed, encoded.len());
        prop_assert_eq!(dst, samples);
    }

    #[test]
    fn bitmap_has_image_size_or_decoding_fails(
        width in 1u16..32,
        height in 1u16..32,
        chroma_subsampling in any::<bool>(),
        color_loss_level in 0u8..16,
        payloads in uniform4(vec(any::<u8>(), 0..80)),
    ) {
        let message = Plane::ALL
            .into_iter()
            .fold(NscMessageBuilder::new(), |builder, plane| builder.plane(plane, payloads[plane.index()].clone()))
            .color_loss_level(color_loss_level)
            .chroma_subsampling(chroma_subsampling)
            .build();

        let mut decoder = NscDecoder::with_dimensions(width, height);

        match decoder.process_message(&message).map(<[u8]>::len) {
            Ok(len) => prop_assert_eq!(len, usize::from(width) * usize::from(height) * 4),
            Err(_) => prop_assert!(decoder.bitmap().is_none()),
        }
    }

    #[test]
    fn bitmap_matches_per_pixel_conversion(image in image()) {
        let width = u16::try_from(image.width).unwrap();
        let height = u16::try_from(image.height).unwrap();

        let mut decoder = NscDecoder::with_dimensions(width, height);
        let expected = image.expected_bitmap();
        let bitmap = decoder.process_message(&image.message()).unwrap();

        prop_assert_eq!(bitmap, expected.as_slice());
    }

    #[test]
    fn decoding_is_deterministic(image in image(), previous in image()) {
        let width = u16::try_from(image.width).unwrap();
        let height = u16::try_from(image.height).unwrap();
        let message = image.message();

        let mut fresh = NscDecoder::with_dimensions(width, height);
        let expected = fresh.process_message(&message).unwrap().to_vec();

        let mut other = NscDecoder::with_dimensions(width, height);
        prop_assert_eq!(other.process_message(&message).unwrap(), expected.as_slice());

        // Buffers left over from a previous message of another size must not leak into the output.
        let mut reused = NscDecoder::with_dimensions(
            u16::try_from(previous.width).unwrap(),
            u16::try_from(previous.height).unwrap(),
        );
        reused.process_message(&previous.message()).unwrap();
        reused.set_dimensions(width, height);
        prop_assert_eq!(reused.process_message(&message).unwrap(), expected.as_slice());
        prop_assert_eq!(reused.process_message(&message).unwrap(), expected.as_slice());
    }
}
