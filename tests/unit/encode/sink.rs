use super::*;

fn frame(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn in_memory_sink_captures_config_and_frames() {
    let mut sink = InMemorySink::new();
    let f = frame(2, 1, [1, 2, 3, 255]);
    write_single(&mut sink, &f).unwrap();

    assert_eq!(sink.config(), Some(SinkConfig { width: 2, height: 1 }));
    assert_eq!(sink.frames(), &[f]);
}

#[test]
fn png_sink_writes_straight_alpha() {
    let dir = std::env::temp_dir().join(format!(
        "stream_overlay_png_sink_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let path = dir.join("out").join("frame.png");
    let mut sink = PngSink::new(&path);
    write_single(&mut sink, &frame(3, 2, [64, 0, 0, 128])).unwrap();
    assert_eq!(sink.written(), 1);

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(0, 0).0, [128, 0, 0, 128]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_sink_rejects_push_before_begin_and_size_mismatch() {
    let path = std::env::temp_dir().join("stream_overlay_png_sink_unused.png");
    let mut sink = PngSink::new(&path);
    assert!(sink.push_frame(&frame(1, 1, [0, 0, 0, 0])).is_err());

    sink.begin(SinkConfig { width: 2, height: 2 }).unwrap();
    assert!(sink.push_frame(&frame(1, 1, [0, 0, 0, 0])).is_err());
    assert_eq!(sink.written(), 0);
}
