use super::*;
use crate::foundation::core::Fps;

fn solid(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn frame_paths_are_zero_padded() {
    let sink = PngSequenceSink::new("out", "wave");
    assert_eq!(sink.frame_path(7), PathBuf::from("out").join("wave_00007.png"));
}

#[test]
fn writes_decodable_pngs() {
    let dir = PathBuf::from("target").join("png_sink_unit");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = PngSequenceSink::new(&dir, "f");
    sink.begin(SinkConfig {
        width: 3,
        height: 2,
        fps: Fps { num: 50, den: 1 },
    })
    .unwrap();
    sink.push_frame(0, &solid(3, 2, [0, 128, 0, 128])).unwrap();
    sink.push_frame(1, &solid(3, 2, [10, 20, 30, 255])).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    let img = image::open(&sink.written()[0]).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(1, 1).0, [0, 255, 0, 128]);

    assert!(sink.end().is_err());
}
