use image::{Rgb, RgbImage, Rgba, RgbaImage};
use lsb_stego::{capacity, decode, decode_file, encode, encode_file, CodecConfig, StegoError};
use rand::Rng;

fn random_rgb(width: u32, height: u32) -> RgbImage {
    let mut rng = rand::thread_rng();
    RgbImage::from_fn(width, height, |_, _| Rgb(rng.gen::<[u8; 3]>()))
}

fn random_message(len: usize, bits_per_char: u8) -> String {
    let mut rng = rand::thread_rng();
    let max = if bits_per_char == 7 { 127u8 } else { 255u8 };
    (0..len).map(|_| char::from(rng.gen_range(0..=max))).collect()
}

#[test]
fn every_configuration_roundtrips() {
    for bits_per_char in [7u8, 8] {
        for channel_count in [1u8, 2, 3] {
            for header_bytes in [1u8, 2, 4, 8] {
                let cfg = CodecConfig {
                    bits_per_char,
                    channel_count,
                    header_bytes,
                };
                let mut img = random_rgb(23, 17);
                let max = capacity(23, 17, &cfg).unwrap().max_message_len as usize;
                let message = random_message(max.min(100), bits_per_char);

                encode(&mut img, &message, &cfg).unwrap();
                assert_eq!(decode(&img, &cfg).unwrap(), message, "config {cfg:?}");
            }
        }
    }
}

#[test]
fn re_encoding_overwrites_previous_message() {
    let cfg = CodecConfig::default();
    let mut img = random_rgb(20, 20);

    encode(&mut img, "a much longer first message", &cfg).unwrap();
    encode(&mut img, "short", &cfg).unwrap();

    assert_eq!(decode(&img, &cfg).unwrap(), "short");
}

#[test]
fn independent_calls_share_no_state() {
    let cfg = CodecConfig::default();
    let mut first = random_rgb(16, 16);
    let mut second = random_rgb(16, 16);

    encode(&mut first, "first", &cfg).unwrap();
    encode(&mut second, "second", &cfg).unwrap();

    assert_eq!(decode(&first, &cfg).unwrap(), "first");
    assert_eq!(decode(&second, &cfg).unwrap(), "second");
}

#[test]
fn png_file_roundtrip_keeps_alpha_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cover.png");
    let output = dir.path().join("stego.png");
    RgbaImage::from_fn(30, 30, |x, y| Rgba([x as u8, y as u8, 128, 77]))
        .save(&input)
        .unwrap();

    let cfg = CodecConfig {
        bits_per_char: 8,
        ..Default::default()
    };
    let message = random_message(200, 8);
    encode_file(&input, &message, &output, &cfg).unwrap();

    assert_eq!(decode_file(&output, &cfg).unwrap(), message);
    let saved = image::open(&output).unwrap().into_rgba8();
    assert!(saved.pixels().all(|p| p[3] == 77));
}

#[test]
fn decoding_a_plain_image_reports_truncation() {
    // All-ones LSBs declare a length no image of this size can hold.
    let img = RgbImage::from_pixel(10, 10, Rgb([0xFF, 0xFF, 0xFF]));

    let err = decode(&img, &CodecConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        StegoError::TruncatedPayload {
            declared_length: 0xFFFF_FFFF,
            available_bits: 300,
            ..
        }
    ));
}
