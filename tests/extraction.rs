//! End-to-end extraction tests
//!
//! Build synthetic in-memory images with known sample values, run full
//! spec-to-payload extractions and check the packed bytes.

mod common;

use common::{gray_ramp, msb_fixture};
use stegbits::{
    BitOrder, BitsValue, Channel, ExtractionSpec, Extractor, MemoryImage, SpecOptions,
};

#[test]
fn test_msb_of_each_pixel_in_raster_order() {
    let img = msb_fixture();
    let opts = SpecOptions {
        channels: Some(vec![Channel::R]),
        bits: Some(BitsValue::Count(1)),
        bit_order: Some(BitOrder::MsbFirst),
        ..Default::default()
    };
    let spec = ExtractionSpec::from_options(&opts).unwrap();
    let payload = Extractor::new(&img).extract(&spec).unwrap();
    assert_eq!(payload, vec![0b1010_1010]);
}

#[test]
fn test_extraction_is_deterministic() {
    let img = msb_fixture();
    let spec = ExtractionSpec::parse("2b,rgb,lsb,yx").unwrap();
    let mut extractor = Extractor::new(&img);
    let first = extractor.extract(&spec).unwrap();
    let second = extractor.extract(&spec).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_embedded_message_round_trip() {
    // plant a message in the top bit-plane of consecutive r,g,b samples in
    // raster order ("1b" reads the single MSB of each sample), then pull it
    // back out with the matching spec
    let message = b"hi";
    let width = 3u32;
    let height = 3u32;
    let mut data = vec![0u8; (width * height * 4) as usize];
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&[0x40, 0x42, 0x44, 0xff]);
    }
    for (byte_idx, &byte) in message.iter().enumerate() {
        for bit in 0..8 {
            let stream_pos = byte_idx * 8 + bit;
            let pixel = stream_pos / 3;
            let channel = stream_pos % 3; // r, g, b at offsets 0, 1, 2
            let value = (byte >> bit) & 1; // lsb-first packing: low bit first
            data[pixel * 4 + channel] |= value << 7;
        }
    }
    let img = MemoryImage::new(width, height, data).unwrap();

    let opts = SpecOptions {
        limit: message.len() as u64,
        ..Default::default()
    };
    let spec = ExtractionSpec::parse_with("1b,rgb,lsb,xy", &opts).unwrap();
    let payload = Extractor::new(&img).extract(&spec).unwrap();
    assert_eq!(payload, message);
    assert_eq!(hex::encode(&payload), "6869");
}

#[test]
fn test_prime_filtering_visits_prime_indices_only() {
    // 8x4 = 32 pixels; MSB set exactly at row-major indices {2, 5, 11, 19}.
    // The first eight primes are 2 3 5 7 11 13 17 19, so the payload byte
    // reads 1 0 1 0 1 0 0 1.
    let mut pixels = [0u8; 32];
    for idx in [2usize, 5, 11, 19] {
        pixels[idx] = 0x80;
    }
    let img = MemoryImage::from_gray(8, 4, &pixels).unwrap();
    let opts = SpecOptions {
        channels: Some(vec![Channel::R]),
        bits: Some(BitsValue::Count(1)),
        bit_order: Some(BitOrder::MsbFirst),
        prime: true,
        limit: 1,
        ..Default::default()
    };
    let spec = ExtractionSpec::from_options(&opts).unwrap();
    let payload = Extractor::new(&img).extract(&spec).unwrap();
    assert_eq!(payload, vec![0b1010_1001]);
}

#[test]
fn test_limit_truncates_without_error() {
    let img = gray_ramp(100, 100);
    let unlimited = ExtractionSpec::parse("4b,rgb,lsb").unwrap();
    let mut extractor = Extractor::new(&img);
    let full = extractor.extract(&unlimited).unwrap();
    assert!(full.len() > 100);

    let capped = ExtractionSpec::parse_with(
        "4b,rgb,lsb",
        &SpecOptions {
            limit: 1,
            ..Default::default()
        },
    )
    .unwrap();
    let payload = extractor.extract(&capped).unwrap();
    assert_eq!(payload.len(), 1);
    assert_eq!(payload[0], full[0]);
}

#[test]
fn test_byte_major_walks_raw_buffer() {
    // 2x1 RGBA: the raw buffer is eight bytes with MSBs 1 0 1 0 1 0 1 0
    let data = vec![0x80, 0x00, 0xff, 0x7f, 0x81, 0x01, 0x90, 0x10];
    let img = MemoryImage::new(2, 1, data).unwrap();
    let spec = ExtractionSpec::parse("msb,by").unwrap();
    let payload = Extractor::new(&img).extract(&spec).unwrap();
    assert_eq!(payload, vec![0b1010_1010]);
}

#[test]
fn test_byte_major_scanline_direction() {
    // two scanlines of four bytes; bY walks the bottom line first
    let data = vec![0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff];
    let img = MemoryImage::new(1, 2, data).unwrap();
    let top_down = ExtractionSpec::parse("msb,by").unwrap();
    let bottom_up = ExtractionSpec::parse("msb,bY").unwrap();
    let mut extractor = Extractor::new(&img);
    assert_eq!(extractor.extract(&top_down).unwrap(), vec![0b0000_1111]);
    assert_eq!(extractor.extract(&bottom_up).unwrap(), vec![0b1111_0000]);
}

#[test]
fn test_wildcard_scan_covers_every_order() {
    let img = gray_ramp(8, 8);
    let spec = ExtractionSpec::parse_with(
        "1b,r,msb,all",
        &SpecOptions {
            limit: 4,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(spec.order_tokens.len(), 12);
    // a wildcard spec refuses a single explicit extraction
    let mut extractor = Extractor::new(&img);
    assert!(extractor.extract(&spec).is_err());

    let orders = spec.order_tokens.clone();
    let mut payloads = Vec::new();
    for order in orders {
        payloads.push(extractor.extract_with_order(&spec, order));
    }
    // the raster result matches a direct xy extraction
    let direct = ExtractionSpec::parse_with(
        "1b,r,msb,xy",
        &SpecOptions {
            limit: 4,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(payloads[0], extractor.extract(&direct).unwrap());
    for payload in &payloads {
        assert_eq!(payload.len(), 4);
    }
}

#[test]
fn test_channel_interleaving_order() {
    // one pixel, distinct channel MSBs: r=1 g=0 b=1 a=0, read twice over
    let img = MemoryImage::new(1, 1, vec![0xff, 0x00, 0x80, 0x7f]).unwrap();
    let opts = SpecOptions {
        bits: Some(BitsValue::Count(2)),
        bit_order: Some(BitOrder::MsbFirst),
        ..Default::default()
    };
    // rgba: bits 11 00 10 01 -> 0xc9; abgr: 01 10 00 11 -> 0x63
    let rgba = ExtractionSpec::parse_with("rgba", &opts).unwrap();
    let abgr = ExtractionSpec::parse_with("abgr", &opts).unwrap();
    let mut extractor = Extractor::new(&img);
    assert_eq!(extractor.extract(&rgba).unwrap(), vec![0xc9]);
    assert_eq!(extractor.extract(&abgr).unwrap(), vec![0x63]);
}

#[test]
fn test_malformed_parameter_produces_no_spec() {
    assert!(ExtractionSpec::parse("1b,zz,lsb").is_err());
    assert!(ExtractionSpec::parse("1b,rgb,xz").is_err());
}
