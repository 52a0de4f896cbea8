use ascime_ascii::luminance::to_gray;
use ascime_ascii::mapper::{GlyphMapper, map_frame};
use ascime_core::charset::PaletteKind;
use ascime_core::config::{ColorMode, RenderConfig};
use ascime_core::frame::FrameBuffer;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn noise_frame(width: u32, height: u32) -> FrameBuffer {
    let mut fb = FrameBuffer::new(width, height);
    let mut seed = 0x1234_5678_u32;
    for byte in &mut fb.data {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        *byte = (seed >> 24) as u8;
    }
    fb
}

fn bench_mapper(c: &mut Criterion) {
    let frame = noise_frame(200, 60);

    for mode in [ColorMode::Plain, ColorMode::Full] {
        let config = RenderConfig {
            palette: PaletteKind::Extended,
            color_mode: mode,
            ..RenderConfig::default()
        };
        let mapper = GlyphMapper::new(&config);
        c.bench_function(&format!("map_frame_200x60_{mode:?}"), |b| {
            b.iter(|| map_frame(black_box(&frame), &mapper).render());
        });
    }

    c.bench_function("to_gray_200x60", |b| b.iter(|| to_gray(black_box(&frame))));
}

criterion_group!(benches, bench_mapper);
criterion_main!(benches);
