use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use pixel_lessons::image_pipeline::{
    LessonConfig, PngWriter, RasterBuffer, RasterWriter, StandardTiffWriter, TiffCompression,
    WrongStepDemo, WRONG_STEP_PADDING, to_display_image,
};
use std::io::Cursor;

fn generate_mock_pixels(width: usize, height: usize, channels: usize, stride: usize) -> Vec<u8> {
    let mut data = vec![0u8; stride * height];
    for y in 0..height {
        for x in 0..width * channels {
            data[y * stride + x] = ((x + y) % 256) as u8;
        }
    }
    data
}

fn benchmark_adapter_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("adapter_by_size");

    let sizes = vec![
        (100, 100, "100x100"),
        (500, 500, "500x500"),
        (1000, 1000, "1000x1000"),
    ];

    for (width, height, label) in sizes {
        let data = generate_mock_pixels(width, height, 3, width * 3);

        group.bench_with_input(BenchmarkId::from_parameter(label), &data, |b, data| {
            let buffer = RasterBuffer::tight(data, width, height, 3).unwrap();
            b.iter(|| {
                let _ = to_display_image(black_box(&buffer));
            });
        });
    }

    group.finish();
}

fn benchmark_adapter_by_channels(c: &mut Criterion) {
    let mut group = c.benchmark_group("adapter_by_channels");

    for (channels, label) in [(1, "gray"), (3, "bgr"), (4, "bgra")] {
        let data = generate_mock_pixels(500, 500, channels, 500 * channels);
        group.bench_with_input(BenchmarkId::from_parameter(label), &data, |b, data| {
            let buffer = RasterBuffer::tight(data, 500, 500, channels).unwrap();
            b.iter(|| {
                let _ = to_display_image(black_box(&buffer));
            });
        });
    }

    group.finish();
}

fn benchmark_padded_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("padded_rows");

    let tight = generate_mock_pixels(500, 500, 3, 1500);
    let padded = generate_mock_pixels(500, 500, 3, 1500 + WRONG_STEP_PADDING);

    group.bench_function("tight", |b| {
        let buffer = RasterBuffer::tight(&tight, 500, 500, 3).unwrap();
        b.iter(|| {
            let _ = to_display_image(black_box(&buffer));
        });
    });

    group.bench_function("padded", |b| {
        let buffer = RasterBuffer::new(&padded, 500, 500, 3, 1500 + WRONG_STEP_PADDING).unwrap();
        b.iter(|| {
            let _ = to_display_image(black_box(&buffer));
        });
    });

    group.bench_function("wrong_step_demo", |b| {
        let buffer = RasterBuffer::tight(&tight, 500, 500, 3).unwrap();
        b.iter(|| {
            let demo = WrongStepDemo::build(black_box(&buffer), WRONG_STEP_PADDING).unwrap();
            let _ = demo.wrong_view();
        });
    });

    group.finish();
}

fn benchmark_writers(c: &mut Criterion) {
    let mut group = c.benchmark_group("writers");
    let data = generate_mock_pixels(500, 500, 3, 1500);
    let buffer = RasterBuffer::tight(&data, 500, 500, 3).unwrap();
    let image = to_display_image(&buffer).unwrap();

    group.bench_function("png", |b| {
        let config = LessonConfig::default();
        b.iter(|| {
            let mut output = Cursor::new(Vec::new());
            let _ = PngWriter.write_image(black_box(&image), &mut output, &config);
        });
    });

    let compressions = vec![
        (TiffCompression::None, "tiff_none"),
        (TiffCompression::Lzw, "tiff_lzw"),
        (TiffCompression::DeflateBalanced, "tiff_deflate"),
    ];

    for (compression, label) in compressions {
        group.bench_function(label, |b| {
            let config = LessonConfig::builder().compression(compression).build();
            b.iter(|| {
                let mut output = Cursor::new(Vec::new());
                let _ = StandardTiffWriter.write_image(black_box(&image), &mut output, &config);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_adapter_by_size,
    benchmark_adapter_by_channels,
    benchmark_padded_rows,
    benchmark_writers
);
criterion_main!(benches);
