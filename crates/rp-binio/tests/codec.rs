use std::io::Cursor;

use proptest::prelude::*;
use rp_binio::{Block, BlockData, BlockReader, BlockType, BlockWriter, Endian, pad8};

fn write_blocks(blocks: &[Block]) -> Vec<u8> {
    let mut w = BlockWriter::new(Vec::new());
    for b in blocks {
        w.write_block(b).unwrap();
    }
    w.into_inner()
}

fn read_blocks(bytes: Vec<u8>) -> Vec<Block> {
    let mut r = BlockReader::new(Cursor::new(bytes)).unwrap();
    r.blocks().collect::<Result<Vec<_>, _>>().unwrap()
}

/// Hand-encode blocks little-endian. Covers INTE, DOUB and MESS only.
fn to_little_endian(blocks: &[Block]) -> Vec<u8> {
    let mut out = Vec::new();
    for b in blocks {
        let le = |v: i32| v.to_le_bytes();
        out.extend_from_slice(&le(16));
        out.extend_from_slice(pad8(&b.keyword).as_bytes());
        out.extend_from_slice(&le(b.count() as i32));
        out.extend_from_slice(b.kind().tag().as_bytes());
        out.extend_from_slice(&le(16));
        match &b.data {
            BlockData::Inte(v) => {
                for chunk in v.chunks(1000) {
                    out.extend_from_slice(&le(chunk.len() as i32 * 4));
                    for x in chunk {
                        out.extend_from_slice(&x.to_le_bytes());
                    }
                    out.extend_from_slice(&le(chunk.len() as i32 * 4));
                }
            }
            BlockData::Doub(v) => {
                for chunk in v.chunks(1000) {
                    out.extend_from_slice(&le(chunk.len() as i32 * 8));
                    for x in chunk {
                        out.extend_from_slice(&x.to_le_bytes());
                    }
                    out.extend_from_slice(&le(chunk.len() as i32 * 8));
                }
            }
            BlockData::Mess => {}
            other => panic!("unsupported in helper: {other:?}"),
        }
    }
    out
}

fn count_data_records(bytes: &[u8], elem_size: usize) -> usize {
    // Skip the 24 byte wrapped header, then walk marker-framed records.
    let mut pos = 24;
    let mut records = 0;
    while pos < bytes.len() {
        let len = i32::from_be_bytes(bytes[pos..pos + 4].try_into().unwrap()) as usize;
        assert_eq!(len % elem_size, 0);
        let tail = pos + 4 + len;
        assert_eq!(&bytes[pos..pos + 4], &bytes[tail..tail + 4]);
        pos = tail + 4;
        records += 1;
    }
    records
}

#[test]
fn chunk_counts_follow_element_limits() {
    for (n, expected) in [(1000, 1), (1001, 2), (2000, 2)] {
        let block = Block::new("PARAMS", BlockData::Real(vec![0.5; n]));
        let bytes = write_blocks(&[block.clone()]);
        assert_eq!(count_data_records(&bytes, 4), expected, "n = {n}");
        assert_eq!(bytes.len(), 24 + expected * 8 + n * 4);
        assert_eq!(read_blocks(bytes), vec![block]);
    }
}

#[test]
fn char_blocks_split_at_105() {
    let names: Vec<String> = (0..230).map(|i| pad8(&format!("W{i}"))).collect();
    let block = Block::new("WGNAMES", BlockData::Char(names));
    let bytes = write_blocks(&[block.clone()]);
    assert_eq!(count_data_records(&bytes, 8), 3);
    assert_eq!(read_blocks(bytes), vec![block]);
}

#[test]
fn char_values_are_padded_on_write() {
    let block = Block::new("UNITS", BlockData::Char(vec!["SM3/D".into(), "A_LONG_UNIT".into()]));
    let read = read_blocks(write_blocks(&[block]));
    assert_eq!(
        read[0].data,
        BlockData::Char(vec!["SM3/D   ".into(), "A_LONG_U".into()])
    );
}

#[test]
fn big_and_little_endian_files_decode_identically() {
    let blocks = vec![
        Block::new("SEQHDR", BlockData::Inte(vec![-1])),
        Block::new("MARKER", BlockData::Mess),
        Block::new("VALUES", BlockData::Doub((0..1500).map(|i| i as f64 * 0.25).collect())),
        Block::new("NUMS", BlockData::Inte((0..1001).collect())),
    ];
    let be = write_blocks(&blocks);
    let le = to_little_endian(&blocks);
    assert_ne!(be, le);

    let mut le_reader = BlockReader::new(Cursor::new(le)).unwrap();
    assert_eq!(le_reader.endian(), Endian::Little);
    let from_le: Vec<Block> = le_reader.blocks().map(Result::unwrap).collect();

    assert_eq!(read_blocks(be), blocks);
    assert_eq!(from_le, blocks);
}

#[test]
fn mess_blocks_carry_no_payload() {
    let bytes = write_blocks(&[Block::new("ENDSOL", BlockData::Mess)]);
    assert_eq!(bytes.len(), 24);
    let read = read_blocks(bytes);
    assert_eq!(read[0].kind(), BlockType::Mess);
    assert_eq!(read[0].count(), 0);
}

#[test]
fn failed_probe_is_format_error() {
    let bytes = b"not a binary summary file".to_vec();
    let err = BlockReader::new(Cursor::new(bytes)).err().unwrap();
    assert!(matches!(err, rp_binio::BinError::Format { .. }));
}

#[test]
fn list_and_dump_output() {
    let bytes = write_blocks(&[
        Block::new("DIMENS", BlockData::Inte((1..=12).collect())),
        Block::new("OK", BlockData::Logi(vec![true])),
    ]);

    let mut listing = Vec::new();
    BlockReader::new(Cursor::new(bytes.clone()))
        .unwrap()
        .list_all(&mut listing)
        .unwrap();
    let listing = String::from_utf8(listing).unwrap();
    assert_eq!(listing, "DIMENS   12 INTE\nOK       1 LOGI\n");

    let mut dump = Vec::new();
    BlockReader::new(Cursor::new(bytes))
        .unwrap()
        .dump_all(&mut dump)
        .unwrap();
    let dump = String::from_utf8(dump).unwrap();
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines[0], "DIMENS   12 INTE");
    assert_eq!(lines[1], "  1 2 3 4 5 6 7 8 9 10");
    assert_eq!(lines[2], "  11 12");
    assert_eq!(lines[3], "OK       1 LOGI");
    assert_eq!(lines[4], "  T");
}

fn block_strategy() -> impl Strategy<Value = Block> {
    let data = prop_oneof![
        prop::collection::vec(any::<i32>(), 0..2100).prop_map(BlockData::Inte),
        prop::collection::vec(-1e6_f32..1e6, 0..1200).prop_map(BlockData::Real),
        prop::collection::vec(-1e12_f64..1e12, 0..1200).prop_map(BlockData::Doub),
        prop::collection::vec(any::<bool>(), 0..1200).prop_map(BlockData::Logi),
        prop::collection::vec("[A-Z0-9 ]{8}", 0..250).prop_map(BlockData::Char),
        Just(BlockData::Mess),
    ];
    ("[A-Z][A-Z0-9]{0,7}", data).prop_map(|(k, d)| Block::new(k, d))
}

proptest! {
    #[test]
    fn written_blocks_read_back(blocks in prop::collection::vec(block_strategy(), 0..5)) {
        let bytes = write_blocks(&blocks);
        let mut r = BlockReader::new(Cursor::new(bytes)).unwrap();
        let read: Vec<Block> = r.blocks().collect::<Result<_, _>>().unwrap();
        prop_assert_eq!(read, blocks);
    }
}
