use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod as ZipMethod, DateTime, ZipWriter};

use zipwalk::zip::{CompressionMethod, DecodeOptions, LFH_FIXED_SIZE, walk_entries_with};
use zipwalk::{EntryWalker, ZipError, ZipExtractor, decode_header, walk_entries};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt...";

fn build(entries: &[(&str, ZipMethod, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let modified = DateTime::from_date_and_time(2024, 3, 15, 10, 30, 46).unwrap();

    for (name, method, data) in entries {
        let options = SimpleFileOptions::default()
            .compression_method(*method)
            .last_modified_time(modified);
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }

    writer.finish().unwrap().into_inner()
}

#[test]
fn stored_hello_from_real_writer() {
    let data = build(&[("hello.txt", ZipMethod::Stored, b"hi")]);

    let entries = walk_entries(&data).unwrap();
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry.file_name, "hello.txt");
    assert_eq!(entry.contents, b"hi");
    assert_eq!(entry.uncompressed_size, 2);
    assert_eq!(entry.method_code, 0);
    assert_eq!(entry.compression_method, CompressionMethod::Stored);
    assert_eq!(entry.last_modified.to_string(), "2024-03-15 10:30:46");
}

#[test]
fn mixed_archive_stops_at_central_directory() {
    let repeated = LOREM.repeat(20);
    let data = build(&[
        ("docs/", ZipMethod::Stored, b""),
        ("docs/lorem.txt", ZipMethod::Deflated, repeated.as_bytes()),
        ("raw.bin", ZipMethod::Stored, b"\x00\x01\x02\x03\xff"),
        ("empty.txt", ZipMethod::Deflated, b""),
    ]);

    let entries = walk_entries(&data).unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.file_name.as_str()).collect();
    assert_eq!(names, ["docs/", "docs/lorem.txt", "raw.bin", "empty.txt"]);

    assert!(entries[0].is_directory());

    let lorem = &entries[1];
    assert_eq!(lorem.compression_method, CompressionMethod::Deflate);
    assert_eq!(lorem.contents, repeated.as_bytes());
    assert!((lorem.compressed_size as usize) < repeated.len());

    assert_eq!(entries[2].contents, [0u8, 1, 2, 3, 255]);
    assert!(entries[3].contents.is_empty());
}

#[test]
fn record_offsets_chain() {
    let data = build(&[
        ("a.txt", ZipMethod::Deflated, LOREM.as_bytes()),
        ("b.txt", ZipMethod::Stored, b"second"),
    ]);

    let (first, next) = decode_header(&data, 0).unwrap();
    assert_eq!(
        next,
        LFH_FIXED_SIZE + first.file_name.len() + first.extra_field.len() + first.compressed_size as usize
    );

    let (second, after) = decode_header(&data, next).unwrap();
    assert_eq!(second.offset, next);
    assert_eq!(second.contents, b"second");

    assert!(matches!(decode_header(&data, after), Err(ZipError::NotAZip { .. })));
}

#[test]
fn truncated_archive_is_an_overrun() {
    let data = build(&[("a.txt", ZipMethod::Stored, LOREM.as_bytes())]);
    let (_, end) = decode_header(&data, 0).unwrap();

    for cut in [4, 20, LFH_FIXED_SIZE + 2, end - 1] {
        let result = walk_entries(&data[..cut]);
        assert!(
            matches!(result, Err(ZipError::Overrun { .. })),
            "cut at {cut}: {result:?}"
        );
    }
}

#[test]
fn strict_and_lenient_agree_on_supported_methods() {
    let data = build(&[
        ("a.txt", ZipMethod::Deflated, LOREM.as_bytes()),
        ("b.txt", ZipMethod::Stored, LOREM.as_bytes()),
    ]);

    let lenient = walk_entries(&data).unwrap();
    let strict = walk_entries_with(&data, DecodeOptions::strict()).unwrap();
    assert_eq!(lenient, strict);
}

#[test]
fn iterator_yields_entries_lazily() {
    let data = build(&[
        ("one", ZipMethod::Stored, b"1"),
        ("two", ZipMethod::Stored, b"2"),
        ("three", ZipMethod::Stored, b"3"),
    ]);

    let first_two: Vec<_> = EntryWalker::new(&data)
        .take(2)
        .map(|e| e.unwrap().file_name)
        .collect();
    assert_eq!(first_two, ["one", "two"]);
}

#[test]
fn garbage_is_not_a_zip() {
    let extractor = ZipExtractor::new(b"MZ\x90\x00 portable executable".to_vec());
    let err = extractor.entries().unwrap_err();
    let err = err.downcast::<ZipError>().unwrap();
    assert!(matches!(err, ZipError::NotAZip { offset: 0, .. }));
}

#[test]
fn entries_outlive_the_buffer() {
    let entries = {
        let data = build(&[("kept.txt", ZipMethod::Deflated, LOREM.as_bytes())]);
        walk_entries(&data).unwrap()
    };

    assert_eq!(entries[0].contents_lossy(), LOREM);
}

#[test]
fn short_tail_after_local_headers_ends_cleanly() {
    let data = build(&[("hello.txt", ZipMethod::Stored, b"hi")]);
    let (_, end) = decode_header(&data, 0).unwrap();

    for tail in 1..4 {
        let entries = walk_entries(&data[..end + tail]).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].contents, b"hi");
    }
}
